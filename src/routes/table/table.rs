use crate::auth_jwt::auth::Claims;
use crate::errors::custom::CustomError;
use crate::models::{timestamp_now, Table, TableChanges};
use crate::startup::AppState;
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use tracing::instrument;

#[derive(Debug, Deserialize)]
pub struct CreateTableBody {
    pub number_of_guests: Option<i32>,
    pub table_number: Option<i32>,
}
impl CreateTableBody {
    pub fn validate(self) -> Result<(i32, i32), String> {
        let number_of_guests = self
            .number_of_guests
            .ok_or_else(|| "number_of_guests is required".to_string())?;
        let table_number = self
            .table_number
            .ok_or_else(|| "table_number is required".to_string())?;
        check_guests(number_of_guests)?;
        Ok((number_of_guests, table_number))
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateTableBody {
    pub number_of_guests: Option<i32>,
    pub table_number: Option<i32>,
}

fn check_guests(number_of_guests: i32) -> Result<(), String> {
    if number_of_guests < 0 {
        return Err(format!(
            "number_of_guests must be non-negative, got {}",
            number_of_guests
        ));
    }
    Ok(())
}

/******************************************/
// New Table Creation route
/******************************************/
/**
 * @route   POST /tables
 * @access  JWT Protected
 */
#[instrument(name = "Create new Table", skip(state, req_table, claims), fields(uid = %claims.uid))]
pub async fn create_table(
    state: web::Data<AppState>,
    req_table: web::Json<CreateTableBody>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse, CustomError> {
    let (number_of_guests, table_number) = req_table
        .into_inner()
        .validate()
        .map_err(CustomError::ValidationError)?;
    let table = state
        .stores
        .tables
        .insert_table(Table::new(number_of_guests, table_number))
        .await?;
    Ok(HttpResponse::Created().json(table))
}

/******************************************/
// Reteriving all Tables
/******************************************/
/**
 * @route   GET /tables
 * @access  JWT Protected
 */
#[instrument(name = "List Tables", skip(state, claims), fields(uid = %claims.uid))]
pub async fn list_tables(
    state: web::Data<AppState>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse, CustomError> {
    let tables = state.stores.tables.list_tables().await?;
    Ok(HttpResponse::Ok().json(tables))
}

/******************************************/
// Reteriving Table using table_id
/******************************************/
/**
 * @route   GET /tables/{table_id}
 * @access  JWT Protected
 */
#[instrument(name = "Get Table", skip(state, claims), fields(uid = %claims.uid))]
pub async fn get_table(
    state: web::Data<AppState>,
    table_id: web::Path<String>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse, CustomError> {
    let table = state
        .stores
        .tables
        .find_table(&table_id)
        .await?
        .ok_or_else(|| CustomError::NotFound(format!("table {} not found", table_id)))?;
    Ok(HttpResponse::Ok().json(table))
}

/******************************************/
// Updating Table using table_id
/******************************************/
/**
 * @route   PATCH /tables/{table_id}
 * @access  JWT Protected
 */
#[instrument(name = "Update Table", skip(state, req_table, claims), fields(uid = %claims.uid))]
pub async fn update_table(
    state: web::Data<AppState>,
    table_id: web::Path<String>,
    req_table: web::Json<UpdateTableBody>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse, CustomError> {
    let body = req_table.into_inner();
    if let Some(number_of_guests) = body.number_of_guests {
        check_guests(number_of_guests).map_err(CustomError::ValidationError)?;
    }
    let changes = TableChanges {
        number_of_guests: body.number_of_guests,
        table_number: body.table_number,
        updated_at: timestamp_now(),
    };
    let table = state
        .stores
        .tables
        .update_table(&table_id, changes)
        .await?
        .ok_or_else(|| CustomError::NotFound(format!("table {} not found", table_id)))?;
    Ok(HttpResponse::Ok().json(table))
}
