use crate::errors::custom::{AuthError, CustomError};
use crate::models::User;
use crate::store::UserStore;
use actix_web::web;
use argon2::{
    self, password_hash::SaltString, Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
};
use tracing::instrument;

fn generate_random_salt() -> SaltString {
    let mut rng = rand::thread_rng();
    SaltString::generate(&mut rng)
}

/// Argon2 hash of `password`, computed off the async workers.
#[instrument(name = "Hash password", skip(password))]
pub async fn hash_password(password: String) -> Result<String, CustomError> {
    web::block(move || {
        let salt = generate_random_salt();
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|err| CustomError::HashingError(err.to_string()))
    })
    .await
    .map_err(|err| CustomError::BlockingError(err.to_string()))?
}

#[instrument(name = "Verify password", skip(expected_hash, candidate))]
async fn verify_password(expected_hash: String, candidate: String) -> Result<bool, CustomError> {
    web::block(move || {
        let password_hashed = PasswordHash::new(&expected_hash)
            .map_err(|err| CustomError::HashingError(err.to_string()))?;
        Ok::<_, CustomError>(
            Argon2::default()
                .verify_password(candidate.as_bytes(), &password_hashed)
                .is_ok(),
        )
    })
    .await
    .map_err(|err| CustomError::BlockingError(err.to_string()))?
}

/// The user owning `email`, provided `password` matches the stored hash.
#[instrument(name = "Validate credentials", skip(users, password))]
pub async fn validate_credentials(
    users: &dyn UserStore,
    email: &str,
    password: String,
) -> Result<User, CustomError> {
    let invalid = || {
        CustomError::AuthenticationError(AuthError::InvalidCredentials(
            "Invalid email or password".to_string(),
        ))
    };
    let user = users.find_user_by_email(email).await?.ok_or_else(invalid)?;

    if verify_password(user.password_hash.clone(), password).await? {
        Ok(user)
    } else {
        Err(invalid())
    }
}
