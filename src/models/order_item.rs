use super::{generate_id, timestamp_now};
use crate::schema::order_items;
use chrono::NaiveDateTime;
use diesel::prelude::*;
use diesel_derive_enum::DbEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Portion size of an ordered dish.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, DbEnum)]
#[ExistingTypePath = "crate::schema::sql_types::Quantity"]
pub enum Quantity {
    #[db_rename = "S"]
    S,
    #[db_rename = "M"]
    M,
    #[db_rename = "L"]
    L,
}

impl Quantity {
    pub fn parse(s: &str) -> Result<Quantity, String> {
        match s {
            "S" => Ok(Quantity::S),
            "M" => Ok(Quantity::M),
            "L" => Ok(Quantity::L),
            other => Err(format!(
                "{} is not a valid quantity, expected one of S, M, L.",
                other
            )),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Quantity::S => "S",
            Quantity::M => "M",
            Quantity::L => "L",
        }
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Queryable, Selectable, Insertable)]
#[diesel(table_name = order_items)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct OrderItem {
    #[serde(skip_serializing)]
    pub id: Uuid,
    pub order_item_id: String,
    pub order_id: String,
    pub quantity: Quantity,
    pub unit_price: f64,
    pub food_id: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl OrderItem {
    /// `unit_price` is expected to be normalized already.
    pub fn new(order_id: &str, quantity: Quantity, unit_price: f64, food_id: String) -> Self {
        let now = timestamp_now();
        Self {
            id: Uuid::new_v4(),
            order_item_id: generate_id(),
            order_id: order_id.to_string(),
            quantity,
            unit_price,
            food_id,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply(&mut self, changes: &OrderItemChanges) {
        if let Some(quantity) = changes.quantity {
            self.quantity = quantity;
        }
        if let Some(unit_price) = changes.unit_price {
            self.unit_price = unit_price;
        }
        if let Some(food_id) = &changes.food_id {
            self.food_id = food_id.clone();
        }
        self.updated_at = changes.updated_at;
    }
}

#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = order_items)]
pub struct OrderItemChanges {
    pub quantity: Option<Quantity>,
    pub unit_price: Option<f64>,
    pub food_id: Option<String>,
    pub updated_at: NaiveDateTime,
}
