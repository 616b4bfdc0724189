use super::{
    bounded, FoodStore, InvoiceStore, MenuStore, OrderItemStore, OrderStore, TableStore,
    UserStore,
};
use crate::db::PgPool;
use crate::errors::custom::DbError;
use crate::models::{
    Food, FoodChanges, Invoice, InvoiceChanges, Menu, MenuChanges, Order, OrderChanges,
    OrderItem, OrderItemChanges, Page, Table, TableChanges, User,
};
use crate::schema::{dining_tables, foods, invoices, menus, order_items, orders, users};
use async_trait::async_trait;
use chrono::NaiveDateTime;
use diesel::prelude::*;
use diesel::result::QueryResult;
use diesel_async::pooled_connection::deadpool::Object;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, AsyncPgConnection, RunQueryDsl};
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;
use tracing::instrument;

/// PostgreSQL backend. Every round-trip, including checking a connection out
/// of the pool, runs under the configured deadline.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
    deadline: Duration,
}

impl PgStore {
    pub fn new(pool: PgPool, deadline: Duration) -> Self {
        Self { pool, deadline }
    }

    async fn conn(&self) -> Result<Object<AsyncPgConnection>, DbError> {
        bounded(self.deadline, self.pool.get())
            .await?
            .map_err(|err| DbError::ConnectionError(err.to_string()))
    }

    fn run<'a, T, F>(&'a self, query: F) -> Pin<Box<dyn Future<Output = Result<T, DbError>> + Send + 'a>>
    where
        F: Future<Output = QueryResult<T>> + Send + 'a,
        T: Send + 'a,
    {
        Box::pin(async move {
            bounded(self.deadline, query)
                .await?
                .map_err(|err| DbError::QueryBuilderError(err.to_string()))
        })
    }

    fn run_optional<'a, T, F>(
        &'a self,
        query: F,
    ) -> Pin<Box<dyn Future<Output = Result<Option<T>, DbError>> + Send + 'a>>
    where
        F: Future<Output = QueryResult<T>> + Send + 'a,
        T: Send + 'a,
    {
        Box::pin(async move {
            bounded(self.deadline, query)
                .await?
                .optional()
                .map_err(|err| DbError::QueryBuilderError(err.to_string()))
        })
    }

    async fn insert<F>(&self, query: F) -> Result<(), DbError>
    where
        F: Future<Output = QueryResult<usize>>,
    {
        let rows = bounded(self.deadline, query)
            .await?
            .map_err(|err| DbError::InsertionError(err.to_string()))?;
        if rows == 0 {
            return Err(DbError::InsertionError(
                "Failed data insertion in db".to_string(),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl TableStore for PgStore {
    #[instrument(name = "Insert table", skip(self, table), fields(table_id = %table.table_id))]
    async fn insert_table(&self, table: Table) -> Result<Table, DbError> {
        let mut conn = self.conn().await?;
        self.insert(
            diesel::insert_into(dining_tables::table)
                .values(&table)
                .execute(&mut conn),
        )
        .await?;
        Ok(table)
    }

    async fn find_table(&self, table_id: &str) -> Result<Option<Table>, DbError> {
        let mut conn = self.conn().await?;
        self.run_optional(
            dining_tables::table
                .filter(dining_tables::table_id.eq(table_id))
                .select(Table::as_select())
                .first(&mut conn),
        )
        .await
    }

    async fn find_tables(&self, table_ids: &[String]) -> Result<Vec<Table>, DbError> {
        let mut conn = self.conn().await?;
        self.run(
            dining_tables::table
                .filter(dining_tables::table_id.eq_any(table_ids))
                .select(Table::as_select())
                .load(&mut conn),
        )
        .await
    }

    async fn list_tables(&self) -> Result<Vec<Table>, DbError> {
        let mut conn = self.conn().await?;
        self.run(
            dining_tables::table
                .order(dining_tables::created_at.asc())
                .select(Table::as_select())
                .load(&mut conn),
        )
        .await
    }

    async fn update_table(
        &self,
        table_id: &str,
        changes: TableChanges,
    ) -> Result<Option<Table>, DbError> {
        let mut conn = self.conn().await?;
        self.run_optional(
            diesel::update(dining_tables::table.filter(dining_tables::table_id.eq(table_id)))
                .set(&changes)
                .returning(Table::as_returning())
                .get_result(&mut conn),
        )
        .await
    }
}

#[async_trait]
impl MenuStore for PgStore {
    #[instrument(name = "Insert menu", skip(self, menu), fields(menu_id = %menu.menu_id))]
    async fn insert_menu(&self, menu: Menu) -> Result<Menu, DbError> {
        let mut conn = self.conn().await?;
        self.insert(diesel::insert_into(menus::table).values(&menu).execute(&mut conn))
            .await?;
        Ok(menu)
    }

    async fn find_menu(&self, menu_id: &str) -> Result<Option<Menu>, DbError> {
        let mut conn = self.conn().await?;
        self.run_optional(
            menus::table
                .filter(menus::menu_id.eq(menu_id))
                .select(Menu::as_select())
                .first(&mut conn),
        )
        .await
    }

    async fn list_menus(&self) -> Result<Vec<Menu>, DbError> {
        let mut conn = self.conn().await?;
        self.run(
            menus::table
                .order(menus::created_at.asc())
                .select(Menu::as_select())
                .load(&mut conn),
        )
        .await
    }

    async fn update_menu(
        &self,
        menu_id: &str,
        changes: MenuChanges,
    ) -> Result<Option<Menu>, DbError> {
        let mut conn = self.conn().await?;
        self.run_optional(
            diesel::update(menus::table.filter(menus::menu_id.eq(menu_id)))
                .set(&changes)
                .returning(Menu::as_returning())
                .get_result(&mut conn),
        )
        .await
    }
}

#[async_trait]
impl FoodStore for PgStore {
    #[instrument(name = "Insert food", skip(self, food), fields(food_id = %food.food_id))]
    async fn insert_food(&self, food: Food) -> Result<Food, DbError> {
        let mut conn = self.conn().await?;
        self.insert(diesel::insert_into(foods::table).values(&food).execute(&mut conn))
            .await?;
        Ok(food)
    }

    async fn find_food(&self, food_id: &str) -> Result<Option<Food>, DbError> {
        let mut conn = self.conn().await?;
        self.run_optional(
            foods::table
                .filter(foods::food_id.eq(food_id))
                .select(Food::as_select())
                .first(&mut conn),
        )
        .await
    }

    async fn find_foods(&self, food_ids: &[String]) -> Result<Vec<Food>, DbError> {
        let mut conn = self.conn().await?;
        self.run(
            foods::table
                .filter(foods::food_id.eq_any(food_ids))
                .select(Food::as_select())
                .load(&mut conn),
        )
        .await
    }

    async fn list_foods(&self, offset: i64, limit: i64) -> Result<Page<Food>, DbError> {
        let mut conn = self.conn().await?;
        let total_count = self
            .run(foods::table.count().get_result::<i64>(&mut conn))
            .await?;
        let items = self
            .run(
                foods::table
                    .order(foods::created_at.asc())
                    .offset(offset)
                    .limit(limit)
                    .select(Food::as_select())
                    .load(&mut conn),
            )
            .await?;
        Ok(Page { total_count, items })
    }

    async fn update_food(
        &self,
        food_id: &str,
        changes: FoodChanges,
    ) -> Result<Option<Food>, DbError> {
        let mut conn = self.conn().await?;
        self.run_optional(
            diesel::update(foods::table.filter(foods::food_id.eq(food_id)))
                .set(&changes)
                .returning(Food::as_returning())
                .get_result(&mut conn),
        )
        .await
    }
}

#[async_trait]
impl OrderStore for PgStore {
    #[instrument(name = "Insert order", skip(self, order), fields(order_id = %order.order_id))]
    async fn insert_order(&self, order: Order) -> Result<Order, DbError> {
        let mut conn = self.conn().await?;
        self.insert(diesel::insert_into(orders::table).values(&order).execute(&mut conn))
            .await?;
        Ok(order)
    }

    async fn find_order(&self, order_id: &str) -> Result<Option<Order>, DbError> {
        let mut conn = self.conn().await?;
        self.run_optional(
            orders::table
                .filter(orders::order_id.eq(order_id))
                .select(Order::as_select())
                .first(&mut conn),
        )
        .await
    }

    async fn find_orders(&self, order_ids: &[String]) -> Result<Vec<Order>, DbError> {
        let mut conn = self.conn().await?;
        self.run(
            orders::table
                .filter(orders::order_id.eq_any(order_ids))
                .select(Order::as_select())
                .load(&mut conn),
        )
        .await
    }

    async fn list_orders(&self) -> Result<Vec<Order>, DbError> {
        let mut conn = self.conn().await?;
        self.run(
            orders::table
                .order(orders::created_at.asc())
                .select(Order::as_select())
                .load(&mut conn),
        )
        .await
    }

    async fn update_order(
        &self,
        order_id: &str,
        changes: OrderChanges,
    ) -> Result<Option<Order>, DbError> {
        let mut conn = self.conn().await?;
        self.run_optional(
            diesel::update(orders::table.filter(orders::order_id.eq(order_id)))
                .set(&changes)
                .returning(Order::as_returning())
                .get_result(&mut conn),
        )
        .await
    }
}

#[async_trait]
impl OrderItemStore for PgStore {
    #[instrument(name = "Insert order items", skip(self, order, items), fields(count = items.len()))]
    async fn insert_order_items(
        &self,
        order: Option<Order>,
        items: Vec<OrderItem>,
    ) -> Result<Vec<OrderItem>, DbError> {
        let mut conn = self.conn().await?;
        let parent = order.as_ref();
        let rows = items.as_slice();
        bounded(
            self.deadline,
            conn.transaction::<_, diesel::result::Error, _>(|conn| {
                async move {
                    if let Some(parent) = parent {
                        diesel::insert_into(orders::table)
                            .values(parent)
                            .execute(conn)
                            .await?;
                    }
                    diesel::insert_into(order_items::table)
                        .values(rows)
                        .execute(conn)
                        .await
                }
                .scope_boxed()
            }),
        )
        .await?
        .map_err(|err| DbError::InsertionError(err.to_string()))?;
        Ok(items)
    }

    async fn find_order_item(&self, order_item_id: &str) -> Result<Option<OrderItem>, DbError> {
        let mut conn = self.conn().await?;
        self.run_optional(
            order_items::table
                .filter(order_items::order_item_id.eq(order_item_id))
                .select(OrderItem::as_select())
                .first(&mut conn),
        )
        .await
    }

    async fn find_order_items_by_order(&self, order_id: &str) -> Result<Vec<OrderItem>, DbError> {
        let mut conn = self.conn().await?;
        self.run(
            order_items::table
                .filter(order_items::order_id.eq(order_id))
                .order(order_items::created_at.asc())
                .select(OrderItem::as_select())
                .load(&mut conn),
        )
        .await
    }

    async fn list_order_items(&self) -> Result<Vec<OrderItem>, DbError> {
        let mut conn = self.conn().await?;
        self.run(
            order_items::table
                .order(order_items::created_at.asc())
                .select(OrderItem::as_select())
                .load(&mut conn),
        )
        .await
    }

    async fn update_order_item(
        &self,
        order_item_id: &str,
        changes: OrderItemChanges,
    ) -> Result<Option<OrderItem>, DbError> {
        let mut conn = self.conn().await?;
        self.run_optional(
            diesel::update(order_items::table.filter(order_items::order_item_id.eq(order_item_id)))
                .set(&changes)
                .returning(OrderItem::as_returning())
                .get_result(&mut conn),
        )
        .await
    }
}

#[async_trait]
impl InvoiceStore for PgStore {
    #[instrument(name = "Insert invoice", skip(self, invoice), fields(invoice_id = %invoice.invoice_id))]
    async fn insert_invoice(&self, invoice: Invoice) -> Result<Invoice, DbError> {
        let mut conn = self.conn().await?;
        self.insert(
            diesel::insert_into(invoices::table)
                .values(&invoice)
                .execute(&mut conn),
        )
        .await?;
        Ok(invoice)
    }

    async fn find_invoice(&self, invoice_id: &str) -> Result<Option<Invoice>, DbError> {
        let mut conn = self.conn().await?;
        self.run_optional(
            invoices::table
                .filter(invoices::invoice_id.eq(invoice_id))
                .select(Invoice::as_select())
                .first(&mut conn),
        )
        .await
    }

    async fn list_invoices(&self) -> Result<Vec<Invoice>, DbError> {
        let mut conn = self.conn().await?;
        self.run(
            invoices::table
                .order(invoices::created_at.asc())
                .select(Invoice::as_select())
                .load(&mut conn),
        )
        .await
    }

    async fn update_invoice(
        &self,
        invoice_id: &str,
        changes: InvoiceChanges,
    ) -> Result<Option<Invoice>, DbError> {
        let mut conn = self.conn().await?;
        self.run_optional(
            diesel::update(invoices::table.filter(invoices::invoice_id.eq(invoice_id)))
                .set(&changes)
                .returning(Invoice::as_returning())
                .get_result(&mut conn),
        )
        .await
    }
}

#[async_trait]
impl UserStore for PgStore {
    #[instrument(name = "Insert user", skip(self, user), fields(user_id = %user.user_id))]
    async fn insert_user(&self, user: User) -> Result<User, DbError> {
        let mut conn = self.conn().await?;
        self.insert(diesel::insert_into(users::table).values(&user).execute(&mut conn))
            .await?;
        Ok(user)
    }

    async fn find_user(&self, user_id: &str) -> Result<Option<User>, DbError> {
        let mut conn = self.conn().await?;
        self.run_optional(
            users::table
                .filter(users::user_id.eq(user_id))
                .select(User::as_select())
                .first(&mut conn),
        )
        .await
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, DbError> {
        let mut conn = self.conn().await?;
        self.run_optional(
            users::table
                .filter(users::email.eq(email))
                .select(User::as_select())
                .first(&mut conn),
        )
        .await
    }

    async fn count_users_with(&self, email: &str, phone: &str) -> Result<i64, DbError> {
        let mut conn = self.conn().await?;
        self.run(
            users::table
                .filter(users::email.eq(email).or(users::phone.eq(phone)))
                .count()
                .get_result::<i64>(&mut conn),
        )
        .await
    }

    async fn list_users(&self, offset: i64, limit: i64) -> Result<Page<User>, DbError> {
        let mut conn = self.conn().await?;
        let total_count = self
            .run(users::table.count().get_result::<i64>(&mut conn))
            .await?;
        let items = self
            .run(
                users::table
                    .order(users::created_at.asc())
                    .offset(offset)
                    .limit(limit)
                    .select(User::as_select())
                    .load(&mut conn),
            )
            .await?;
        Ok(Page { total_count, items })
    }

    async fn update_tokens(
        &self,
        user_id: &str,
        token: &str,
        refresh_token: &str,
        updated_at: NaiveDateTime,
    ) -> Result<bool, DbError> {
        let mut conn = self.conn().await?;
        let rows = bounded(
            self.deadline,
            diesel::update(users::table.filter(users::user_id.eq(user_id)))
                .set((
                    users::token.eq(Some(token)),
                    users::refresh_token.eq(Some(refresh_token)),
                    users::updated_at.eq(updated_at),
                ))
                .execute(&mut conn),
        )
        .await?
        .map_err(|err| DbError::UpdationError(err.to_string()))?;
        Ok(rows > 0)
    }
}
