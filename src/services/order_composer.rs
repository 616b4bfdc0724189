//! Read-side order view.
//!
//! Stages run one after another against the store, each depending on the
//! identifiers produced by the previous one:
//!
//! 1. match the order items of the requested order,
//! 2. left-join every item to its food,
//! 3. left-join every item to its order, then the order to its table.
//!
//! The fetched rows are then joined in memory, grouped by order and projected.
//! A missing counterpart never drops an item; its projected fields are `None`.

use crate::errors::custom::CustomError;
use crate::models::{money, Food, Order, OrderItem, Quantity, Table};
use crate::store::{FoodStore, OrderItemStore, OrderStore, TableStore};
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::instrument;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderItemView {
    pub food_name: Option<String>,
    pub food_image: Option<String>,
    pub price: Option<f64>,
    pub quantity: Quantity,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderView {
    pub order_id: String,
    pub table_id: Option<String>,
    pub table_number: Option<i32>,
    /// Number of items in the group, not the sum of their quantities.
    pub total_count: usize,
    /// Sum of the resolved food prices.
    pub payment_due: f64,
    pub items: Vec<OrderItemView>,
}

/// An order item next to whatever its references resolved to.
struct JoinedRow<'a> {
    item: &'a OrderItem,
    food: Option<&'a Food>,
    order: Option<&'a Order>,
    table: Option<&'a Table>,
}

#[derive(Clone)]
pub struct OrderComposer {
    order_items: Arc<dyn OrderItemStore>,
    orders: Arc<dyn OrderStore>,
    tables: Arc<dyn TableStore>,
    foods: Arc<dyn FoodStore>,
}

impl OrderComposer {
    pub fn new(
        order_items: Arc<dyn OrderItemStore>,
        orders: Arc<dyn OrderStore>,
        tables: Arc<dyn TableStore>,
        foods: Arc<dyn FoodStore>,
    ) -> Self {
        Self {
            order_items,
            orders,
            tables,
            foods,
        }
    }

    /// Build the views for `order_id`. An id no item refers to yields an
    /// empty list. Any store failure fails the whole composition.
    #[instrument(name = "Compose order view", skip(self))]
    pub async fn compose(&self, order_id: &str) -> Result<Vec<OrderView>, CustomError> {
        let items = self.order_items.find_order_items_by_order(order_id).await?;
        if items.is_empty() {
            return Ok(Vec::new());
        }

        let food_ids = distinct(items.iter().map(|item| &item.food_id));
        let foods = self.foods.find_foods(&food_ids).await?;

        let order_ids = distinct(items.iter().map(|item| &item.order_id));
        let orders = self.orders.find_orders(&order_ids).await?;

        let table_ids = distinct(orders.iter().filter_map(|order| order.table_id.as_ref()));
        let tables = if table_ids.is_empty() {
            Vec::new()
        } else {
            self.tables.find_tables(&table_ids).await?
        };

        tracing::debug!(
            items = items.len(),
            foods = foods.len(),
            orders = orders.len(),
            tables = tables.len(),
            "joined order view stages"
        );
        Ok(assemble(&items, &foods, &orders, &tables))
    }
}

fn distinct<'a>(ids: impl Iterator<Item = &'a String>) -> Vec<String> {
    let mut seen = HashSet::new();
    ids.filter(|id| seen.insert(*id)).cloned().collect()
}

/// First row wins when an identity occurs more than once.
fn index_by<'a, T>(rows: &'a [T], key: impl Fn(&'a T) -> &'a str) -> HashMap<&'a str, &'a T> {
    let mut index = HashMap::with_capacity(rows.len());
    for row in rows {
        index.entry(key(row)).or_insert(row);
    }
    index
}

/// Join, group and project rows that were already fetched.
pub fn assemble(
    items: &[OrderItem],
    foods: &[Food],
    orders: &[Order],
    tables: &[Table],
) -> Vec<OrderView> {
    let foods = index_by(foods, |food| food.food_id.as_str());
    let orders = index_by(orders, |order| order.order_id.as_str());
    let tables = index_by(tables, |table| table.table_id.as_str());

    let rows = items.iter().map(|item| {
        let order = orders.get(item.order_id.as_str()).copied();
        let table = order
            .and_then(|order| order.table_id.as_deref())
            .and_then(|table_id| tables.get(table_id).copied());
        JoinedRow {
            item,
            food: foods.get(item.food_id.as_str()).copied(),
            order,
            table,
        }
    });

    let mut groups: Vec<(&str, Vec<JoinedRow<'_>>)> = Vec::new();
    let mut positions: HashMap<&str, usize> = HashMap::new();
    for row in rows {
        let key = row.item.order_id.as_str();
        let position = *positions.entry(key).or_insert_with(|| {
            groups.push((key, Vec::new()));
            groups.len() - 1
        });
        groups[position].1.push(row);
    }

    groups
        .into_iter()
        .map(|(order_id, rows)| project(order_id, &rows))
        .collect()
}

fn project(order_id: &str, rows: &[JoinedRow<'_>]) -> OrderView {
    let order = rows.iter().find_map(|row| row.order);
    let table = rows.iter().find_map(|row| row.table);

    let items: Vec<OrderItemView> = rows
        .iter()
        .map(|row| OrderItemView {
            food_name: row.food.map(|food| food.name.clone()),
            food_image: row.food.and_then(|food| food.food_image.clone()),
            price: row.food.map(|food| food.price),
            quantity: row.item.quantity,
        })
        .collect();

    OrderView {
        order_id: order
            .map(|order| order.order_id.clone())
            .unwrap_or_else(|| order_id.to_string()),
        table_id: table.map(|table| table.table_id.clone()),
        table_number: table.map(|table| table.table_number),
        total_count: items.len(),
        payment_due: money::total(items.iter().filter_map(|item| item.price)),
        items,
    }
}
