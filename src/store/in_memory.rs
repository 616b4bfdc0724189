//! Process-local store used by tests and by `backend = "memory"` runs.

use super::{
    FoodStore, InvoiceStore, MenuStore, OrderItemStore, OrderStore, TableStore, UserStore,
};
use crate::errors::custom::DbError;
use crate::models::{
    Food, FoodChanges, Invoice, InvoiceChanges, Menu, MenuChanges, Order, OrderChanges,
    OrderItem, OrderItemChanges, Page, Table, TableChanges, User,
};
use async_trait::async_trait;
use chrono::NaiveDateTime;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Every collection is a `Vec` kept in insertion order behind its own lock.
#[derive(Default)]
pub struct InMemoryStore {
    users: RwLock<Vec<User>>,
    tables: RwLock<Vec<Table>>,
    menus: RwLock<Vec<Menu>>,
    foods: RwLock<Vec<Food>>,
    orders: RwLock<Vec<Order>>,
    order_items: RwLock<Vec<OrderItem>>,
    invoices: RwLock<Vec<Invoice>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn read<T>(lock: &RwLock<T>) -> Result<RwLockReadGuard<'_, T>, DbError> {
    lock.read()
        .map_err(|e| DbError::Other(format!("Failed to acquire read lock: {}", e)))
}

fn write<T>(lock: &RwLock<T>) -> Result<RwLockWriteGuard<'_, T>, DbError> {
    lock.write()
        .map_err(|e| DbError::Other(format!("Failed to acquire write lock: {}", e)))
}

fn page<T: Clone>(rows: &[T], offset: i64, limit: i64) -> Page<T> {
    let offset = usize::try_from(offset).unwrap_or(0);
    let limit = usize::try_from(limit).unwrap_or(0);
    Page {
        total_count: rows.len() as i64,
        items: rows.iter().skip(offset).take(limit).cloned().collect(),
    }
}

#[async_trait]
impl TableStore for InMemoryStore {
    async fn insert_table(&self, table: Table) -> Result<Table, DbError> {
        write(&self.tables)?.push(table.clone());
        Ok(table)
    }

    async fn find_table(&self, table_id: &str) -> Result<Option<Table>, DbError> {
        Ok(read(&self.tables)?
            .iter()
            .find(|table| table.table_id == table_id)
            .cloned())
    }

    async fn find_tables(&self, table_ids: &[String]) -> Result<Vec<Table>, DbError> {
        Ok(read(&self.tables)?
            .iter()
            .filter(|table| table_ids.contains(&table.table_id))
            .cloned()
            .collect())
    }

    async fn list_tables(&self) -> Result<Vec<Table>, DbError> {
        Ok(read(&self.tables)?.clone())
    }

    async fn update_table(
        &self,
        table_id: &str,
        changes: TableChanges,
    ) -> Result<Option<Table>, DbError> {
        let mut tables = write(&self.tables)?;
        Ok(tables
            .iter_mut()
            .find(|table| table.table_id == table_id)
            .map(|table| {
                table.apply(&changes);
                table.clone()
            }))
    }
}

#[async_trait]
impl MenuStore for InMemoryStore {
    async fn insert_menu(&self, menu: Menu) -> Result<Menu, DbError> {
        write(&self.menus)?.push(menu.clone());
        Ok(menu)
    }

    async fn find_menu(&self, menu_id: &str) -> Result<Option<Menu>, DbError> {
        Ok(read(&self.menus)?
            .iter()
            .find(|menu| menu.menu_id == menu_id)
            .cloned())
    }

    async fn list_menus(&self) -> Result<Vec<Menu>, DbError> {
        Ok(read(&self.menus)?.clone())
    }

    async fn update_menu(
        &self,
        menu_id: &str,
        changes: MenuChanges,
    ) -> Result<Option<Menu>, DbError> {
        let mut menus = write(&self.menus)?;
        Ok(menus
            .iter_mut()
            .find(|menu| menu.menu_id == menu_id)
            .map(|menu| {
                menu.apply(&changes);
                menu.clone()
            }))
    }
}

#[async_trait]
impl FoodStore for InMemoryStore {
    async fn insert_food(&self, food: Food) -> Result<Food, DbError> {
        write(&self.foods)?.push(food.clone());
        Ok(food)
    }

    async fn find_food(&self, food_id: &str) -> Result<Option<Food>, DbError> {
        Ok(read(&self.foods)?
            .iter()
            .find(|food| food.food_id == food_id)
            .cloned())
    }

    async fn find_foods(&self, food_ids: &[String]) -> Result<Vec<Food>, DbError> {
        Ok(read(&self.foods)?
            .iter()
            .filter(|food| food_ids.contains(&food.food_id))
            .cloned()
            .collect())
    }

    async fn list_foods(&self, offset: i64, limit: i64) -> Result<Page<Food>, DbError> {
        Ok(page(&read(&self.foods)?, offset, limit))
    }

    async fn update_food(
        &self,
        food_id: &str,
        changes: FoodChanges,
    ) -> Result<Option<Food>, DbError> {
        let mut foods = write(&self.foods)?;
        Ok(foods
            .iter_mut()
            .find(|food| food.food_id == food_id)
            .map(|food| {
                food.apply(&changes);
                food.clone()
            }))
    }
}

#[async_trait]
impl OrderStore for InMemoryStore {
    async fn insert_order(&self, order: Order) -> Result<Order, DbError> {
        write(&self.orders)?.push(order.clone());
        Ok(order)
    }

    async fn find_order(&self, order_id: &str) -> Result<Option<Order>, DbError> {
        Ok(read(&self.orders)?
            .iter()
            .find(|order| order.order_id == order_id)
            .cloned())
    }

    async fn find_orders(&self, order_ids: &[String]) -> Result<Vec<Order>, DbError> {
        Ok(read(&self.orders)?
            .iter()
            .filter(|order| order_ids.contains(&order.order_id))
            .cloned()
            .collect())
    }

    async fn list_orders(&self) -> Result<Vec<Order>, DbError> {
        Ok(read(&self.orders)?.clone())
    }

    async fn update_order(
        &self,
        order_id: &str,
        changes: OrderChanges,
    ) -> Result<Option<Order>, DbError> {
        let mut orders = write(&self.orders)?;
        Ok(orders
            .iter_mut()
            .find(|order| order.order_id == order_id)
            .map(|order| {
                order.apply(&changes);
                order.clone()
            }))
    }
}

#[async_trait]
impl OrderItemStore for InMemoryStore {
    async fn insert_order_items(
        &self,
        order: Option<Order>,
        items: Vec<OrderItem>,
    ) -> Result<Vec<OrderItem>, DbError> {
        // Both locks are taken before anything is written.
        let mut orders = write(&self.orders)?;
        let mut order_items = write(&self.order_items)?;
        if let Some(order) = order {
            orders.push(order);
        }
        order_items.extend(items.iter().cloned());
        Ok(items)
    }

    async fn find_order_item(&self, order_item_id: &str) -> Result<Option<OrderItem>, DbError> {
        Ok(read(&self.order_items)?
            .iter()
            .find(|item| item.order_item_id == order_item_id)
            .cloned())
    }

    async fn find_order_items_by_order(&self, order_id: &str) -> Result<Vec<OrderItem>, DbError> {
        Ok(read(&self.order_items)?
            .iter()
            .filter(|item| item.order_id == order_id)
            .cloned()
            .collect())
    }

    async fn list_order_items(&self) -> Result<Vec<OrderItem>, DbError> {
        Ok(read(&self.order_items)?.clone())
    }

    async fn update_order_item(
        &self,
        order_item_id: &str,
        changes: OrderItemChanges,
    ) -> Result<Option<OrderItem>, DbError> {
        let mut order_items = write(&self.order_items)?;
        Ok(order_items
            .iter_mut()
            .find(|item| item.order_item_id == order_item_id)
            .map(|item| {
                item.apply(&changes);
                item.clone()
            }))
    }
}

#[async_trait]
impl InvoiceStore for InMemoryStore {
    async fn insert_invoice(&self, invoice: Invoice) -> Result<Invoice, DbError> {
        write(&self.invoices)?.push(invoice.clone());
        Ok(invoice)
    }

    async fn find_invoice(&self, invoice_id: &str) -> Result<Option<Invoice>, DbError> {
        Ok(read(&self.invoices)?
            .iter()
            .find(|invoice| invoice.invoice_id == invoice_id)
            .cloned())
    }

    async fn list_invoices(&self) -> Result<Vec<Invoice>, DbError> {
        Ok(read(&self.invoices)?.clone())
    }

    async fn update_invoice(
        &self,
        invoice_id: &str,
        changes: InvoiceChanges,
    ) -> Result<Option<Invoice>, DbError> {
        let mut invoices = write(&self.invoices)?;
        Ok(invoices
            .iter_mut()
            .find(|invoice| invoice.invoice_id == invoice_id)
            .map(|invoice| {
                invoice.apply(&changes);
                invoice.clone()
            }))
    }
}

#[async_trait]
impl UserStore for InMemoryStore {
    async fn insert_user(&self, user: User) -> Result<User, DbError> {
        write(&self.users)?.push(user.clone());
        Ok(user)
    }

    async fn find_user(&self, user_id: &str) -> Result<Option<User>, DbError> {
        Ok(read(&self.users)?
            .iter()
            .find(|user| user.user_id == user_id)
            .cloned())
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, DbError> {
        Ok(read(&self.users)?
            .iter()
            .find(|user| user.email == email)
            .cloned())
    }

    async fn count_users_with(&self, email: &str, phone: &str) -> Result<i64, DbError> {
        Ok(read(&self.users)?
            .iter()
            .filter(|user| user.email == email || user.phone == phone)
            .count() as i64)
    }

    async fn list_users(&self, offset: i64, limit: i64) -> Result<Page<User>, DbError> {
        Ok(page(&read(&self.users)?, offset, limit))
    }

    async fn update_tokens(
        &self,
        user_id: &str,
        token: &str,
        refresh_token: &str,
        updated_at: NaiveDateTime,
    ) -> Result<bool, DbError> {
        let mut users = write(&self.users)?;
        match users.iter_mut().find(|user| user.user_id == user_id) {
            Some(user) => {
                user.token = Some(token.to_string());
                user.refresh_token = Some(refresh_token.to_string());
                user.updated_at = updated_at;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
