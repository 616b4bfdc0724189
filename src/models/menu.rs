use super::{generate_id, timestamp_now};
use crate::schema::menus;
use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Queryable, Selectable, Insertable)]
#[diesel(table_name = menus)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Menu {
    #[serde(skip_serializing)]
    pub id: Uuid,
    pub menu_id: String,
    pub name: String,
    pub category: String,
    pub start_date: Option<NaiveDateTime>,
    pub end_date: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Menu {
    pub fn new(
        name: String,
        category: String,
        start_date: Option<NaiveDateTime>,
        end_date: Option<NaiveDateTime>,
    ) -> Self {
        let now = timestamp_now();
        Self {
            id: Uuid::new_v4(),
            menu_id: generate_id(),
            name,
            category,
            start_date,
            end_date,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply(&mut self, changes: &MenuChanges) {
        if let Some(name) = &changes.name {
            self.name = name.clone();
        }
        if let Some(category) = &changes.category {
            self.category = category.clone();
        }
        if let Some(start_date) = changes.start_date {
            self.start_date = Some(start_date);
        }
        if let Some(end_date) = changes.end_date {
            self.end_date = Some(end_date);
        }
        self.updated_at = changes.updated_at;
    }

    /// Checks the window this menu would have after a partial update. A newly
    /// supplied start must lie in the future; the merged window must close
    /// after it opens.
    pub fn check_window_update(
        &self,
        start_date: Option<NaiveDateTime>,
        end_date: Option<NaiveDateTime>,
        now: NaiveDateTime,
    ) -> Result<(), String> {
        let merged_end = end_date.or(self.end_date);
        match (start_date, self.start_date, merged_end) {
            (Some(start), _, Some(end)) => validate_window(start, end, now),
            (Some(start), _, None) if start <= now => Err(format!(
                "menu start {} must be in the future",
                start
            )),
            (None, Some(start), Some(end)) if end <= start => Err(format!(
                "menu end {} must come after its start {}",
                end, start
            )),
            _ => Ok(()),
        }
    }
}

#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = menus)]
pub struct MenuChanges {
    pub name: Option<String>,
    pub category: Option<String>,
    pub start_date: Option<NaiveDateTime>,
    pub end_date: Option<NaiveDateTime>,
    pub updated_at: NaiveDateTime,
}

/// A menu window is accepted only when it opens in the future and closes
/// after it opens.
pub fn validate_window(
    start_date: NaiveDateTime,
    end_date: NaiveDateTime,
    now: NaiveDateTime,
) -> Result<(), String> {
    if start_date > now && end_date > start_date {
        Ok(())
    } else {
        Err(format!(
            "menu window {} .. {} must start in the future and end after it starts",
            start_date, end_date
        ))
    }
}
