use super::{generate_id, timestamp_now};
use crate::schema::foods;
use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Queryable, Selectable, Insertable)]
#[diesel(table_name = foods)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Food {
    #[serde(skip_serializing)]
    pub id: Uuid,
    pub food_id: String,
    pub name: String,
    pub price: f64,
    pub food_image: Option<String>,
    pub menu_id: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Food {
    pub fn new(name: String, price: f64, food_image: Option<String>, menu_id: String) -> Self {
        let now = timestamp_now();
        Self {
            id: Uuid::new_v4(),
            food_id: generate_id(),
            name,
            price,
            food_image,
            menu_id,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply(&mut self, changes: &FoodChanges) {
        if let Some(name) = &changes.name {
            self.name = name.clone();
        }
        if let Some(price) = changes.price {
            self.price = price;
        }
        if let Some(food_image) = &changes.food_image {
            self.food_image = Some(food_image.clone());
        }
        if let Some(menu_id) = &changes.menu_id {
            self.menu_id = menu_id.clone();
        }
        self.updated_at = changes.updated_at;
    }
}

#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = foods)]
pub struct FoodChanges {
    pub name: Option<String>,
    pub price: Option<f64>,
    pub food_image: Option<String>,
    pub menu_id: Option<String>,
    pub updated_at: NaiveDateTime,
}
