use crate::auth_jwt::auth::Claims;
use crate::errors::custom::CustomError;
use crate::services::OrderInput;
use crate::startup::AppState;
use actix_web::{web, HttpResponse};
use tracing::instrument;

/******************************************/
// New Order Creation route
/******************************************/
/**
 * @route   POST /orders
 * @access  JWT Protected
 */
#[instrument(name = "Create new Order", skip(state, req_order, claims), fields(uid = %claims.uid))]
pub async fn create_order(
    state: web::Data<AppState>,
    req_order: web::Json<OrderInput>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse, CustomError> {
    let order = state.lifecycle.create_order(req_order.into_inner()).await?;
    Ok(HttpResponse::Created().json(order))
}

/******************************************/
// Reteriving Order using order_id
/******************************************/
/**
 * @route   GET /orders/{order_id}
 * @access  JWT Protected
 */
#[instrument(name = "Get Order", skip(state, claims), fields(uid = %claims.uid))]
pub async fn get_order(
    state: web::Data<AppState>,
    order_id: web::Path<String>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse, CustomError> {
    let order = state
        .stores
        .orders
        .find_order(&order_id)
        .await?
        .ok_or_else(|| CustomError::NotFound(format!("order {} not found", order_id)))?;
    Ok(HttpResponse::Ok().json(order))
}

/******************************************/
// Reteriving all Orders
/******************************************/
/**
 * @route   GET /orders
 * @access  JWT Protected
 */
#[instrument(name = "List Orders", skip(state, claims), fields(uid = %claims.uid))]
pub async fn list_orders(
    state: web::Data<AppState>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse, CustomError> {
    let orders = state.stores.orders.list_orders().await?;
    Ok(HttpResponse::Ok().json(orders))
}

/******************************************/
// Moving an Order to another table
/******************************************/
/**
 * @route   PATCH /orders/{order_id}
 * @access  JWT Protected
 */
#[instrument(name = "Update Order", skip(state, req_order, claims), fields(uid = %claims.uid))]
pub async fn update_order(
    state: web::Data<AppState>,
    order_id: web::Path<String>,
    req_order: web::Json<OrderInput>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse, CustomError> {
    let order = state
        .lifecycle
        .update_order(&order_id, req_order.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(order))
}
