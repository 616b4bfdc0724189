//! Entity store seam.
//!
//! Each entity gets its own async trait so that services only ask for the
//! collections they actually touch. References between entities are plain
//! textual identifiers; no backend enforces them.

pub mod in_memory;
pub mod postgres;

pub use in_memory::InMemoryStore;
pub use postgres::PgStore;

use crate::errors::custom::DbError;
use crate::models::{
    Food, FoodChanges, Invoice, InvoiceChanges, Menu, MenuChanges, Order, OrderChanges,
    OrderItem, OrderItemChanges, Page, Table, TableChanges, User,
};
use async_trait::async_trait;
use chrono::NaiveDateTime;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

#[async_trait]
pub trait TableStore: Send + Sync {
    async fn insert_table(&self, table: Table) -> Result<Table, DbError>;
    async fn find_table(&self, table_id: &str) -> Result<Option<Table>, DbError>;
    async fn find_tables(&self, table_ids: &[String]) -> Result<Vec<Table>, DbError>;
    async fn list_tables(&self) -> Result<Vec<Table>, DbError>;
    async fn update_table(
        &self,
        table_id: &str,
        changes: TableChanges,
    ) -> Result<Option<Table>, DbError>;
}

#[async_trait]
pub trait MenuStore: Send + Sync {
    async fn insert_menu(&self, menu: Menu) -> Result<Menu, DbError>;
    async fn find_menu(&self, menu_id: &str) -> Result<Option<Menu>, DbError>;
    async fn list_menus(&self) -> Result<Vec<Menu>, DbError>;
    async fn update_menu(&self, menu_id: &str, changes: MenuChanges)
        -> Result<Option<Menu>, DbError>;
}

#[async_trait]
pub trait FoodStore: Send + Sync {
    async fn insert_food(&self, food: Food) -> Result<Food, DbError>;
    async fn find_food(&self, food_id: &str) -> Result<Option<Food>, DbError>;
    async fn find_foods(&self, food_ids: &[String]) -> Result<Vec<Food>, DbError>;
    async fn list_foods(&self, offset: i64, limit: i64) -> Result<Page<Food>, DbError>;
    async fn update_food(&self, food_id: &str, changes: FoodChanges)
        -> Result<Option<Food>, DbError>;
}

#[async_trait]
pub trait OrderStore: Send + Sync {
    async fn insert_order(&self, order: Order) -> Result<Order, DbError>;
    async fn find_order(&self, order_id: &str) -> Result<Option<Order>, DbError>;
    async fn find_orders(&self, order_ids: &[String]) -> Result<Vec<Order>, DbError>;
    async fn list_orders(&self) -> Result<Vec<Order>, DbError>;
    async fn update_order(
        &self,
        order_id: &str,
        changes: OrderChanges,
    ) -> Result<Option<Order>, DbError>;
}

#[async_trait]
pub trait OrderItemStore: Send + Sync {
    /// Persist a new parent order (when given) and every item as one unit:
    /// either all of them become visible or none do.
    async fn insert_order_items(
        &self,
        order: Option<Order>,
        items: Vec<OrderItem>,
    ) -> Result<Vec<OrderItem>, DbError>;
    async fn find_order_item(&self, order_item_id: &str) -> Result<Option<OrderItem>, DbError>;
    async fn find_order_items_by_order(&self, order_id: &str) -> Result<Vec<OrderItem>, DbError>;
    async fn list_order_items(&self) -> Result<Vec<OrderItem>, DbError>;
    async fn update_order_item(
        &self,
        order_item_id: &str,
        changes: OrderItemChanges,
    ) -> Result<Option<OrderItem>, DbError>;
}

#[async_trait]
pub trait InvoiceStore: Send + Sync {
    async fn insert_invoice(&self, invoice: Invoice) -> Result<Invoice, DbError>;
    async fn find_invoice(&self, invoice_id: &str) -> Result<Option<Invoice>, DbError>;
    async fn list_invoices(&self) -> Result<Vec<Invoice>, DbError>;
    async fn update_invoice(
        &self,
        invoice_id: &str,
        changes: InvoiceChanges,
    ) -> Result<Option<Invoice>, DbError>;
}

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn insert_user(&self, user: User) -> Result<User, DbError>;
    async fn find_user(&self, user_id: &str) -> Result<Option<User>, DbError>;
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, DbError>;
    /// Number of users already holding this email or this phone.
    async fn count_users_with(&self, email: &str, phone: &str) -> Result<i64, DbError>;
    async fn list_users(&self, offset: i64, limit: i64) -> Result<Page<User>, DbError>;
    /// Returns `false` when no user has `user_id`.
    async fn update_tokens(
        &self,
        user_id: &str,
        token: &str,
        refresh_token: &str,
        updated_at: NaiveDateTime,
    ) -> Result<bool, DbError>;
}

/// Handles to every collection, shared by all request handlers.
#[derive(Clone)]
pub struct Stores {
    pub users: Arc<dyn UserStore>,
    pub tables: Arc<dyn TableStore>,
    pub menus: Arc<dyn MenuStore>,
    pub foods: Arc<dyn FoodStore>,
    pub orders: Arc<dyn OrderStore>,
    pub order_items: Arc<dyn OrderItemStore>,
    pub invoices: Arc<dyn InvoiceStore>,
}

impl Stores {
    /// Serve every collection from a single backend.
    pub fn from_backend<S>(backend: Arc<S>) -> Self
    where
        S: UserStore
            + TableStore
            + MenuStore
            + FoodStore
            + OrderStore
            + OrderItemStore
            + InvoiceStore
            + 'static,
    {
        Self {
            users: backend.clone(),
            tables: backend.clone(),
            menus: backend.clone(),
            foods: backend.clone(),
            orders: backend.clone(),
            order_items: backend.clone(),
            invoices: backend,
        }
    }
}

/// Run a store operation under `deadline`. Expiry drops the operation and
/// reports [`DbError::Timeout`]; nothing is retried.
pub async fn bounded<F>(deadline: Duration, operation: F) -> Result<F::Output, DbError>
where
    F: Future,
{
    tokio::time::timeout(deadline, operation)
        .await
        .map_err(|_| DbError::Timeout(deadline))
}

#[cfg(test)]
mod tests {
    use super::*;
    use claim::assert_matches;

    #[tokio::test]
    async fn an_operation_past_its_deadline_times_out() {
        let result = bounded(Duration::from_millis(10), std::future::pending::<()>()).await;
        assert_matches!(result, Err(DbError::Timeout(_)));
    }

    #[tokio::test]
    async fn an_operation_within_its_deadline_completes() {
        let result = bounded(Duration::from_secs(1), async { 42 }).await;
        assert_eq!(result.ok(), Some(42));
    }
}
