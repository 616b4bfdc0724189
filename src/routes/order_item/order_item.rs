use crate::auth_jwt::auth::Claims;
use crate::errors::custom::CustomError;
use crate::services::{OrderItemBatch, OrderItemInput};
use crate::startup::AppState;
use actix_web::{web, HttpResponse};
use tracing::instrument;

/******************************************/
// Creating a batch of Order Items
/******************************************/
/**
 * @route   POST /orderItems
 * @access  JWT Protected
 */
#[instrument(name = "Create Order Items", skip(state, req_batch, claims), fields(uid = %claims.uid))]
pub async fn create_order_items(
    state: web::Data<AppState>,
    req_batch: web::Json<OrderItemBatch>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse, CustomError> {
    let created = state
        .lifecycle
        .create_order_items(req_batch.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(created))
}

/******************************************/
// Reteriving all Order Items
/******************************************/
/**
 * @route   GET /orderItems
 * @access  JWT Protected
 */
#[instrument(name = "List Order Items", skip(state, claims), fields(uid = %claims.uid))]
pub async fn list_order_items(
    state: web::Data<AppState>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse, CustomError> {
    let order_items = state.stores.order_items.list_order_items().await?;
    Ok(HttpResponse::Ok().json(order_items))
}

/******************************************/
// Reteriving Order Item using order_item_id
/******************************************/
/**
 * @route   GET /orderItems/{order_item_id}
 * @access  JWT Protected
 */
#[instrument(name = "Get Order Item", skip(state, claims), fields(uid = %claims.uid))]
pub async fn get_order_item(
    state: web::Data<AppState>,
    order_item_id: web::Path<String>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse, CustomError> {
    let order_item = state
        .stores
        .order_items
        .find_order_item(&order_item_id)
        .await?
        .ok_or_else(|| {
            CustomError::NotFound(format!("order item {} not found", order_item_id))
        })?;
    Ok(HttpResponse::Ok().json(order_item))
}

/******************************************/
// Composed view of one Order's items
/******************************************/
/**
 * @route   GET /orderItems/order/{order_id}
 * @access  JWT Protected
 */
#[instrument(name = "Get Order Items by Order", skip(state, claims), fields(uid = %claims.uid))]
pub async fn get_order_items_by_order(
    state: web::Data<AppState>,
    order_id: web::Path<String>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse, CustomError> {
    let views = state.composer.compose(&order_id).await?;
    Ok(HttpResponse::Ok().json(views))
}

/******************************************/
// Updating Order Item using order_item_id
/******************************************/
/**
 * @route   PATCH /orderItems/{order_item_id}
 * @access  JWT Protected
 */
#[instrument(name = "Update Order Item", skip(state, req_item, claims), fields(uid = %claims.uid))]
pub async fn update_order_item(
    state: web::Data<AppState>,
    order_item_id: web::Path<String>,
    req_item: web::Json<OrderItemInput>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse, CustomError> {
    let order_item = state
        .lifecycle
        .update_order_item(&order_item_id, req_item.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(order_item))
}
