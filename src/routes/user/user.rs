use super::validate_user::{hash_password, validate_credentials};
use crate::auth_jwt::auth::{update_tokens, Claims};
use crate::errors::custom::CustomError;
use crate::models::User;
use crate::routes::pagination::PageQuery;
use crate::startup::AppState;
use crate::validations::name_email::{validate_password, UserEmail, UserName, UserPhone};
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use tracing::instrument;

type ValidSignup = (UserName, UserName, UserEmail, UserPhone, String, Option<String>);

#[derive(Deserialize)]
pub struct SignupBody {
    first_name: String,
    last_name: String,
    email: String,
    phone: String,
    password: String,
    avatar: Option<String>,
}
impl SignupBody {
    pub fn validate(self) -> Result<ValidSignup, String> {
        let first_name = UserName::parse(self.first_name)?;
        let last_name = UserName::parse(self.last_name)?;
        let email = UserEmail::parse(self.email)?;
        let phone = UserPhone::parse(self.phone)?;
        validate_password(&self.password)?;
        Ok((first_name, last_name, email, phone, self.password, self.avatar))
    }
}

#[derive(Deserialize)]
pub struct LoginBody {
    pub email: String,
    pub password: String,
}

/******************************************/
// Signing up a new user
/******************************************/
/**
 * @route   POST /users/signup
 * @access  Public
 */
#[instrument(name = "Sign up a new user", skip(req_user, state), fields(email = %req_user.email))]
pub async fn signup_user(
    state: web::Data<AppState>,
    req_user: web::Json<SignupBody>,
) -> Result<HttpResponse, CustomError> {
    let (first_name, last_name, email, phone, password, avatar) = req_user
        .into_inner()
        .validate()
        .map_err(CustomError::ValidationError)?;

    let taken = state
        .stores
        .users
        .count_users_with(email.as_ref(), phone.as_ref())
        .await?;
    if taken > 0 {
        return Err(CustomError::Conflict(
            "this email or phone number already exists".to_string(),
        ));
    }

    let password_hashed = hash_password(password).await?;
    let mut user = User::new(first_name, last_name, email, phone, avatar, password_hashed);
    let (token, refresh_token) = state.tokens.generate_tokens(&user)?;
    user.token = Some(token);
    user.refresh_token = Some(refresh_token);

    let user = state.stores.users.insert_user(user).await?;
    tracing::info!(user_id = %user.user_id, "user signed up");
    Ok(HttpResponse::Created().json(json!({
        "message": "User created successfully",
        "user_id": user.user_id,
    })))
}

/******************************************/
// Login Route
/******************************************/
/**
 * @route   POST /users/login
 * @access  Public
 */
#[instrument(name = "Login a user", skip(req_login, state), fields(email = %req_login.email))]
pub async fn login_user(
    state: web::Data<AppState>,
    req_login: web::Json<LoginBody>,
) -> Result<HttpResponse, CustomError> {
    let LoginBody { email, password } = req_login.into_inner();
    let mut user = validate_credentials(state.stores.users.as_ref(), &email, password).await?;

    let (token, refresh_token) = state.tokens.generate_tokens(&user)?;
    update_tokens(
        state.stores.users.as_ref(),
        &token,
        &refresh_token,
        &user.user_id,
    )
    .await?;
    user.token = Some(token);
    user.refresh_token = Some(refresh_token);

    Ok(HttpResponse::Ok().json(user))
}

/******************************************/
// Listing users page by page
/******************************************/
/**
 * @route   GET /users?recordPerPage=&page=&startIndex=
 * @access  JWT Protected
 */
#[instrument(name = "List users", skip(state, query, claims), fields(uid = %claims.uid))]
pub async fn list_users(
    state: web::Data<AppState>,
    query: web::Query<PageQuery>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse, CustomError> {
    let (offset, limit) = query.window();
    let page = state.stores.users.list_users(offset, limit).await?;
    Ok(HttpResponse::Ok().json(json!({
        "total_count": page.total_count,
        "user_items": page.items,
    })))
}

/******************************************/
// Reteriving a user using user_id
/******************************************/
/**
 * @route   GET /users/{user_id}
 * @access  JWT Protected
 */
#[instrument(name = "Get user", skip(state, claims), fields(uid = %claims.uid))]
pub async fn get_user(
    state: web::Data<AppState>,
    user_id: web::Path<String>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse, CustomError> {
    let user = state
        .stores
        .users
        .find_user(&user_id)
        .await?
        .ok_or_else(|| CustomError::NotFound(format!("user {} not found", user_id)))?;
    Ok(HttpResponse::Ok().json(user))
}
