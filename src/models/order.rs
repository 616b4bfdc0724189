use super::{generate_id, timestamp_now};
use crate::schema::orders;
use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Queryable, Selectable, Insertable)]
#[diesel(table_name = orders)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Order {
    #[serde(skip_serializing)]
    pub id: Uuid,
    pub order_id: String,
    pub order_date: NaiveDateTime,
    pub table_id: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Order {
    pub fn new(table_id: Option<String>) -> Self {
        let now = timestamp_now();
        Self {
            id: Uuid::new_v4(),
            order_id: generate_id(),
            order_date: now,
            table_id,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply(&mut self, changes: &OrderChanges) {
        if let Some(table_id) = &changes.table_id {
            self.table_id = Some(table_id.clone());
        }
        self.updated_at = changes.updated_at;
    }
}

#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = orders)]
pub struct OrderChanges {
    pub table_id: Option<String>,
    pub updated_at: NaiveDateTime,
}
