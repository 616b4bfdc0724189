use crate::auth_jwt::auth::Claims;
use crate::errors::custom::CustomError;
use crate::models::{timestamp_now, Invoice, InvoiceChanges, PaymentMethod, PaymentStatus};
use crate::startup::AppState;
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use tracing::instrument;

#[derive(Debug, Deserialize)]
pub struct CreateInvoiceBody {
    pub order_id: String,
    pub payment_method: Option<String>,
    pub payment_status: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateInvoiceBody {
    pub payment_method: Option<String>,
    pub payment_status: Option<String>,
}

/// The outer `Option` tells an absent method from an explicit `""`.
fn parse_payment(
    payment_method: Option<String>,
    payment_status: Option<String>,
) -> Result<(Option<Option<PaymentMethod>>, Option<PaymentStatus>), CustomError> {
    let method = payment_method
        .as_deref()
        .map(PaymentMethod::parse)
        .transpose()
        .map_err(CustomError::ValidationError)?;
    let status = payment_status
        .as_deref()
        .map(PaymentStatus::parse)
        .transpose()
        .map_err(CustomError::ValidationError)?;
    Ok((method, status))
}

/******************************************/
// New Invoice Creation route
/******************************************/
/**
 * @route   POST /invoices
 * @access  JWT Protected
 */
#[instrument(
    name = "Create new Invoice",
    skip(state, req_invoice, claims),
    fields(uid = %claims.uid, order_id = %req_invoice.order_id)
)]
pub async fn create_invoice(
    state: web::Data<AppState>,
    req_invoice: web::Json<CreateInvoiceBody>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse, CustomError> {
    let body = req_invoice.into_inner();
    if state.stores.orders.find_order(&body.order_id).await?.is_none() {
        return Err(CustomError::NotFound(format!(
            "order {} not found",
            body.order_id
        )));
    }
    let (method, status) = parse_payment(body.payment_method, body.payment_status)?;

    let invoice = state
        .stores
        .invoices
        .insert_invoice(Invoice::new(body.order_id, method.flatten(), status))
        .await?;
    Ok(HttpResponse::Created().json(invoice))
}

/******************************************/
// Reteriving all Invoices
/******************************************/
/**
 * @route   GET /invoices
 * @access  JWT Protected
 */
#[instrument(name = "List Invoices", skip(state, claims), fields(uid = %claims.uid))]
pub async fn list_invoices(
    state: web::Data<AppState>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse, CustomError> {
    let invoices = state.stores.invoices.list_invoices().await?;
    Ok(HttpResponse::Ok().json(invoices))
}

/******************************************/
// Composed Invoice view using invoice_id
/******************************************/
/**
 * @route   GET /invoices/{invoice_id}
 * @access  JWT Protected
 */
#[instrument(name = "Get Invoice", skip(state, claims), fields(uid = %claims.uid))]
pub async fn get_invoice(
    state: web::Data<AppState>,
    invoice_id: web::Path<String>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse, CustomError> {
    let view = state.invoices.compose(&invoice_id).await?;
    Ok(HttpResponse::Ok().json(view))
}

/******************************************/
// Updating Invoice using invoice_id
/******************************************/
/**
 * @route   PATCH /invoices/{invoice_id}
 * @access  JWT Protected
 */
#[instrument(name = "Update Invoice", skip(state, req_invoice, claims), fields(uid = %claims.uid))]
pub async fn update_invoice(
    state: web::Data<AppState>,
    invoice_id: web::Path<String>,
    req_invoice: web::Json<UpdateInvoiceBody>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse, CustomError> {
    let body = req_invoice.into_inner();
    let (method, status) = parse_payment(body.payment_method, body.payment_status)?;
    let changes = InvoiceChanges {
        payment_method: method.map(|chosen| chosen.map(|m| m.as_str().to_string())),
        payment_status: status,
        updated_at: timestamp_now(),
    };
    let invoice = state
        .stores
        .invoices
        .update_invoice(&invoice_id, changes)
        .await?
        .ok_or_else(|| CustomError::NotFound(format!("invoice {} not found", invoice_id)))?;
    Ok(HttpResponse::Ok().json(invoice))
}
