use crate::auth_jwt::auth::Claims;
use crate::errors::custom::CustomError;
use crate::models::{money, timestamp_now, Food, FoodChanges};
use crate::routes::pagination::PageQuery;
use crate::startup::AppState;
use crate::validations::name_email::EntityName;
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use tracing::instrument;

#[derive(Debug, Deserialize)]
pub struct FoodBody {
    pub name: Option<String>,
    pub price: Option<f64>,
    pub food_image: Option<String>,
    pub menu_id: Option<String>,
}

struct ValidFood {
    name: Option<EntityName>,
    price: Option<f64>,
    food_image: Option<String>,
    menu_id: Option<String>,
}

impl FoodBody {
    fn validate(self) -> Result<ValidFood, String> {
        Ok(ValidFood {
            name: self.name.map(|n| EntityName::parse(n, "food name")).transpose()?,
            price: self
                .price
                .map(|p| money::parse_price(p, "price"))
                .transpose()?,
            food_image: self.food_image,
            menu_id: self.menu_id,
        })
    }
}

async fn require_menu(state: &AppState, menu_id: &str) -> Result<(), CustomError> {
    match state.stores.menus.find_menu(menu_id).await? {
        Some(_) => Ok(()),
        None => Err(CustomError::NotFound(format!("menu {} not found", menu_id))),
    }
}

/******************************************/
// New Food Creation route
/******************************************/
/**
 * @route   POST /foods
 * @access  JWT Protected
 */
#[instrument(name = "Create new Food", skip(state, req_food, claims), fields(uid = %claims.uid))]
pub async fn create_food(
    state: web::Data<AppState>,
    req_food: web::Json<FoodBody>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse, CustomError> {
    let food = req_food
        .into_inner()
        .validate()
        .map_err(CustomError::ValidationError)?;
    let name = food
        .name
        .ok_or_else(|| CustomError::ValidationError("name is required".to_string()))?;
    let price = food
        .price
        .ok_or_else(|| CustomError::ValidationError("price is required".to_string()))?;
    let menu_id = food
        .menu_id
        .ok_or_else(|| CustomError::ValidationError("menu_id is required".to_string()))?;
    require_menu(&state, &menu_id).await?;

    let food = state
        .stores
        .foods
        .insert_food(Food::new(name.into_inner(), price, food.food_image, menu_id))
        .await?;
    Ok(HttpResponse::Created().json(food))
}

/******************************************/
// Listing Foods page by page
/******************************************/
/**
 * @route   GET /foods?recordPerPage=&page=&startIndex=
 * @access  JWT Protected
 */
#[instrument(name = "List Foods", skip(state, query, claims), fields(uid = %claims.uid))]
pub async fn list_foods(
    state: web::Data<AppState>,
    query: web::Query<PageQuery>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse, CustomError> {
    let (offset, limit) = query.window();
    let page = state.stores.foods.list_foods(offset, limit).await?;
    Ok(HttpResponse::Ok().json(json!({
        "total_count": page.total_count,
        "food_items": page.items,
    })))
}

/******************************************/
// Reteriving Food using food_id
/******************************************/
/**
 * @route   GET /foods/{food_id}
 * @access  JWT Protected
 */
#[instrument(name = "Get Food", skip(state, claims), fields(uid = %claims.uid))]
pub async fn get_food(
    state: web::Data<AppState>,
    food_id: web::Path<String>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse, CustomError> {
    let food = state
        .stores
        .foods
        .find_food(&food_id)
        .await?
        .ok_or_else(|| CustomError::NotFound(format!("food {} not found", food_id)))?;
    Ok(HttpResponse::Ok().json(food))
}

/******************************************/
// Updating Food using food_id
/******************************************/
/**
 * @route   PATCH /foods/{food_id}
 * @access  JWT Protected
 */
#[instrument(name = "Update Food", skip(state, req_food, claims), fields(uid = %claims.uid))]
pub async fn update_food(
    state: web::Data<AppState>,
    food_id: web::Path<String>,
    req_food: web::Json<FoodBody>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse, CustomError> {
    let food = req_food
        .into_inner()
        .validate()
        .map_err(CustomError::ValidationError)?;
    if let Some(menu_id) = &food.menu_id {
        require_menu(&state, menu_id).await?;
    }
    let changes = FoodChanges {
        name: food.name.map(EntityName::into_inner),
        price: food.price,
        food_image: food.food_image,
        menu_id: food.menu_id,
        updated_at: timestamp_now(),
    };
    let food = state
        .stores
        .foods
        .update_food(&food_id, changes)
        .await?
        .ok_or_else(|| CustomError::NotFound(format!("food {} not found", food_id)))?;
    Ok(HttpResponse::Ok().json(food))
}
