pub mod food;
pub mod invoice;
pub mod menu;
pub mod money;
pub mod order;
pub mod order_item;
pub mod table;
pub mod user;

pub use food::{Food, FoodChanges};
pub use invoice::{Invoice, InvoiceChanges, PaymentMethod, PaymentStatus};
pub use menu::{Menu, MenuChanges};
pub use order::{Order, OrderChanges};
pub use order_item::{OrderItem, OrderItemChanges, Quantity};
pub use table::{Table, TableChanges};
pub use user::User;

use chrono::{NaiveDateTime, SubsecRound, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Current UTC time truncated to whole seconds, the resolution every
/// `created_at`/`updated_at` column is stored with.
pub fn timestamp_now() -> NaiveDateTime {
    Utc::now().naive_utc().trunc_subsecs(0)
}

/// Fresh textual identity for a new entity. Distinct from the storage key.
pub fn generate_id() -> String {
    Uuid::new_v4().simple().to_string()
}

/// One page of a listing together with the size of the whole collection.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub total_count: i64,
    pub items: Vec<T>,
}
