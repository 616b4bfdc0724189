use crate::auth_jwt::auth::Claims;
use crate::errors::custom::CustomError;
use crate::models::menu::validate_window;
use crate::models::{timestamp_now, Menu, MenuChanges};
use crate::startup::AppState;
use crate::validations::name_email::EntityName;
use actix_web::{web, HttpResponse};
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Deserialize;
use tracing::instrument;

#[derive(Debug, Deserialize)]
pub struct MenuBody {
    pub name: Option<String>,
    pub category: Option<String>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
}

struct ValidMenu {
    name: Option<EntityName>,
    category: Option<EntityName>,
    start_date: Option<NaiveDateTime>,
    end_date: Option<NaiveDateTime>,
}

impl MenuBody {
    /// Parses whatever fields are present. The validity window is checked by
    /// the caller, which knows whether there is a stored menu to merge with.
    fn validate(self) -> Result<ValidMenu, String> {
        let name = self.name.map(|n| EntityName::parse(n, "menu name")).transpose()?;
        let category = self
            .category
            .map(|c| EntityName::parse(c, "menu category"))
            .transpose()?;
        let start_date = self.start_date.map(|d| d.naive_utc());
        let end_date = self.end_date.map(|d| d.naive_utc());
        Ok(ValidMenu {
            name,
            category,
            start_date,
            end_date,
        })
    }
}

/******************************************/
// New Menu Creation route
/******************************************/
/**
 * @route   POST /menus
 * @access  JWT Protected
 */
#[instrument(name = "Create new Menu", skip(state, req_menu, claims), fields(uid = %claims.uid))]
pub async fn create_menu(
    state: web::Data<AppState>,
    req_menu: web::Json<MenuBody>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse, CustomError> {
    let menu = req_menu
        .into_inner()
        .validate()
        .map_err(CustomError::ValidationError)?;
    let name = menu
        .name
        .ok_or_else(|| CustomError::ValidationError("name is required".to_string()))?;
    let category = menu
        .category
        .ok_or_else(|| CustomError::ValidationError("category is required".to_string()))?;
    if let (Some(start), Some(end)) = (menu.start_date, menu.end_date) {
        validate_window(start, end, timestamp_now()).map_err(CustomError::ValidationError)?;
    }

    let menu = state
        .stores
        .menus
        .insert_menu(Menu::new(
            name.into_inner(),
            category.into_inner(),
            menu.start_date,
            menu.end_date,
        ))
        .await?;
    Ok(HttpResponse::Created().json(menu))
}

/******************************************/
// Reteriving all Menus
/******************************************/
/**
 * @route   GET /menus
 * @access  JWT Protected
 */
#[instrument(name = "List Menus", skip(state, claims), fields(uid = %claims.uid))]
pub async fn list_menus(
    state: web::Data<AppState>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse, CustomError> {
    let menus = state.stores.menus.list_menus().await?;
    Ok(HttpResponse::Ok().json(menus))
}

/******************************************/
// Reteriving Menu using menu_id
/******************************************/
/**
 * @route   GET /menus/{menu_id}
 * @access  JWT Protected
 */
#[instrument(name = "Get Menu", skip(state, claims), fields(uid = %claims.uid))]
pub async fn get_menu(
    state: web::Data<AppState>,
    menu_id: web::Path<String>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse, CustomError> {
    let menu = state
        .stores
        .menus
        .find_menu(&menu_id)
        .await?
        .ok_or_else(|| CustomError::NotFound(format!("menu {} not found", menu_id)))?;
    Ok(HttpResponse::Ok().json(menu))
}

/******************************************/
// Updating Menu using menu_id
/******************************************/
/**
 * @route   PATCH /menus/{menu_id}
 * @access  JWT Protected
 */
#[instrument(name = "Update Menu", skip(state, req_menu, claims), fields(uid = %claims.uid))]
pub async fn update_menu(
    state: web::Data<AppState>,
    menu_id: web::Path<String>,
    req_menu: web::Json<MenuBody>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse, CustomError> {
    let menu = req_menu
        .into_inner()
        .validate()
        .map_err(CustomError::ValidationError)?;
    if menu.start_date.is_some() || menu.end_date.is_some() {
        let stored = state
            .stores
            .menus
            .find_menu(&menu_id)
            .await?
            .ok_or_else(|| CustomError::NotFound(format!("menu {} not found", menu_id)))?;
        stored
            .check_window_update(menu.start_date, menu.end_date, timestamp_now())
            .map_err(CustomError::ValidationError)?;
    }
    let changes = MenuChanges {
        name: menu.name.map(EntityName::into_inner),
        category: menu.category.map(EntityName::into_inner),
        start_date: menu.start_date,
        end_date: menu.end_date,
        updated_at: timestamp_now(),
    };
    let menu = state
        .stores
        .menus
        .update_menu(&menu_id, changes)
        .await?
        .ok_or_else(|| CustomError::NotFound(format!("menu {} not found", menu_id)))?;
    Ok(HttpResponse::Ok().json(menu))
}
