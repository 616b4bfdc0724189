use super::{generate_id, timestamp_now};
use crate::schema::users;
use crate::validations::name_email::{UserEmail, UserName, UserPhone};
use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Queryable, Selectable, Insertable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct User {
    #[serde(skip_serializing)]
    pub id: Uuid,
    pub user_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub avatar: Option<String>,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub token: Option<String>,
    pub refresh_token: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl User {
    pub fn new(
        first_name: UserName,
        last_name: UserName,
        email: UserEmail,
        phone: UserPhone,
        avatar: Option<String>,
        password_hash: String,
    ) -> Self {
        let now = timestamp_now();
        Self {
            id: Uuid::new_v4(),
            user_id: generate_id(),
            first_name: first_name.as_ref().to_string(),
            last_name: last_name.as_ref().to_string(),
            email: email.as_ref().to_string(),
            phone: phone.as_ref().to_string(),
            avatar,
            password_hash,
            token: None,
            refresh_token: None,
            created_at: now,
            updated_at: now,
        }
    }
}
