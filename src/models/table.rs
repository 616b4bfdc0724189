use super::{generate_id, timestamp_now};
use crate::schema::dining_tables;
use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Queryable, Selectable, Insertable)]
#[diesel(table_name = dining_tables)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Table {
    #[serde(skip_serializing)]
    pub id: Uuid,
    pub table_id: String,
    pub number_of_guests: i32,
    pub table_number: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Table {
    pub fn new(number_of_guests: i32, table_number: i32) -> Self {
        let now = timestamp_now();
        Self {
            id: Uuid::new_v4(),
            table_id: generate_id(),
            number_of_guests,
            table_number,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply(&mut self, changes: &TableChanges) {
        if let Some(number_of_guests) = changes.number_of_guests {
            self.number_of_guests = number_of_guests;
        }
        if let Some(table_number) = changes.table_number {
            self.table_number = table_number;
        }
        self.updated_at = changes.updated_at;
    }
}

#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = dining_tables)]
pub struct TableChanges {
    pub number_of_guests: Option<i32>,
    pub table_number: Option<i32>,
    pub updated_at: NaiveDateTime,
}
