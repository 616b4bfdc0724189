//! Write side of orders and order items.
//!
//! Every reference a write introduces (an order's table, an item's food) is
//! looked up first; a missing target aborts the write before anything is
//! stored. A batch of items is validated as a whole and persisted together
//! with its parent order in one store call.

use crate::errors::custom::CustomError;
use crate::models::{
    money, timestamp_now, Order, OrderChanges, OrderItem, OrderItemChanges, Quantity, Table,
};
use crate::store::{FoodStore, OrderItemStore, OrderStore, TableStore};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::instrument;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrderInput {
    pub table_id: Option<String>,
}

/// One order item as submitted by a client. Every field is optional so the
/// same shape serves creation (all required) and partial updates.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrderItemInput {
    pub quantity: Option<String>,
    pub unit_price: Option<f64>,
    pub food_id: Option<String>,
}

/// Items to attach to `order_id`, or to a fresh order seated at `table_id`
/// when `order_id` is absent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrderItemBatch {
    pub order_id: Option<String>,
    pub table_id: Option<String>,
    #[serde(default)]
    pub order_items: Vec<OrderItemInput>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreatedOrderItems {
    pub order_id: String,
    pub order_items: Vec<OrderItem>,
}

struct ValidItem {
    quantity: Quantity,
    unit_price: f64,
    food_id: String,
}

fn validate_item(position: usize, input: OrderItemInput) -> Result<ValidItem, CustomError> {
    let invalid =
        |msg: String| CustomError::ValidationError(format!("order_items[{}]: {}", position, msg));

    let quantity = input
        .quantity
        .ok_or_else(|| invalid("quantity is required".to_string()))
        .and_then(|q| Quantity::parse(&q).map_err(invalid))?;
    let unit_price = input
        .unit_price
        .ok_or_else(|| invalid("unit_price is required".to_string()))
        .and_then(|price| money::parse_price(price, "unit_price").map_err(invalid))?;
    let food_id = match input.food_id {
        Some(food_id) if !food_id.trim().is_empty() => food_id,
        _ => return Err(invalid("food_id is required".to_string())),
    };

    Ok(ValidItem {
        quantity,
        unit_price,
        food_id,
    })
}

#[derive(Clone)]
pub struct OrderLifecycle {
    tables: Arc<dyn TableStore>,
    foods: Arc<dyn FoodStore>,
    orders: Arc<dyn OrderStore>,
    order_items: Arc<dyn OrderItemStore>,
}

impl OrderLifecycle {
    pub fn new(
        tables: Arc<dyn TableStore>,
        foods: Arc<dyn FoodStore>,
        orders: Arc<dyn OrderStore>,
        order_items: Arc<dyn OrderItemStore>,
    ) -> Self {
        Self {
            tables,
            foods,
            orders,
            order_items,
        }
    }

    async fn require_table(&self, table_id: &str) -> Result<Table, CustomError> {
        self.tables
            .find_table(table_id)
            .await?
            .ok_or_else(|| CustomError::NotFound(format!("table {} not found", table_id)))
    }

    async fn require_food(&self, food_id: &str) -> Result<(), CustomError> {
        match self.foods.find_food(food_id).await? {
            Some(_) => Ok(()),
            None => Err(CustomError::NotFound(format!("food {} not found", food_id))),
        }
    }

    /// Every distinct food in `food_ids` must exist; one lookup for all.
    async fn require_foods(&self, food_ids: &[String]) -> Result<(), CustomError> {
        let wanted: Vec<String> = food_ids
            .iter()
            .collect::<HashSet<_>>()
            .into_iter()
            .cloned()
            .collect();
        let found: HashSet<String> = self
            .foods
            .find_foods(&wanted)
            .await?
            .into_iter()
            .map(|food| food.food_id)
            .collect();

        match food_ids.iter().find(|food_id| !found.contains(*food_id)) {
            Some(missing) => Err(CustomError::NotFound(format!("food {} not found", missing))),
            None => Ok(()),
        }
    }

    #[instrument(name = "Create order", skip(self, input), fields(table_id = ?input.table_id))]
    pub async fn create_order(&self, input: OrderInput) -> Result<Order, CustomError> {
        let table_id = input
            .table_id
            .ok_or_else(|| CustomError::ValidationError("table_id is required".to_string()))?;
        self.require_table(&table_id).await?;

        Ok(self.orders.insert_order(Order::new(Some(table_id))).await?)
    }

    #[instrument(name = "Update order", skip(self, input), fields(table_id = ?input.table_id))]
    pub async fn update_order(&self, order_id: &str, input: OrderInput) -> Result<Order, CustomError> {
        if let Some(table_id) = &input.table_id {
            self.require_table(table_id).await?;
        }
        let changes = OrderChanges {
            table_id: input.table_id,
            updated_at: timestamp_now(),
        };

        self.orders
            .update_order(order_id, changes)
            .await?
            .ok_or_else(|| CustomError::NotFound(format!("order {} not found", order_id)))
    }

    /// Validates the whole batch and every food it names, then persists the
    /// parent order (when one is created) and all items atomically. The first
    /// failure aborts with nothing written.
    #[instrument(
        name = "Create order items",
        skip(self, batch),
        fields(order_id = ?batch.order_id, items = batch.order_items.len())
    )]
    pub async fn create_order_items(
        &self,
        batch: OrderItemBatch,
    ) -> Result<CreatedOrderItems, CustomError> {
        if batch.order_items.is_empty() {
            return Err(CustomError::ValidationError(
                "order_items must contain at least one item".to_string(),
            ));
        }
        if batch.order_id.is_some() && batch.table_id.is_some() {
            return Err(CustomError::ValidationError(
                "table_id can only be given when a new order is created".to_string(),
            ));
        }

        let items = batch
            .order_items
            .into_iter()
            .enumerate()
            .map(|(position, input)| validate_item(position, input))
            .collect::<Result<Vec<_>, _>>()?;
        let food_ids: Vec<String> = items.iter().map(|item| item.food_id.clone()).collect();
        self.require_foods(&food_ids).await?;

        let (order_id, new_order) = match batch.order_id {
            Some(order_id) => {
                if self.orders.find_order(&order_id).await?.is_none() {
                    return Err(CustomError::NotFound(format!("order {} not found", order_id)));
                }
                (order_id, None)
            }
            None => {
                if let Some(table_id) = &batch.table_id {
                    self.require_table(table_id).await?;
                }
                let order = Order::new(batch.table_id);
                (order.order_id.clone(), Some(order))
            }
        };

        let items = items
            .into_iter()
            .map(|item| OrderItem::new(&order_id, item.quantity, item.unit_price, item.food_id))
            .collect();
        let order_items = self.order_items.insert_order_items(new_order, items).await?;
        tracing::info!(order_id = %order_id, count = order_items.len(), "order items stored");

        Ok(CreatedOrderItems {
            order_id,
            order_items,
        })
    }

    #[instrument(name = "Update order item", skip(self, input))]
    pub async fn update_order_item(
        &self,
        order_item_id: &str,
        input: OrderItemInput,
    ) -> Result<OrderItem, CustomError> {
        let quantity = input
            .quantity
            .as_deref()
            .map(Quantity::parse)
            .transpose()
            .map_err(CustomError::ValidationError)?;
        let unit_price = input
            .unit_price
            .map(|price| money::parse_price(price, "unit_price"))
            .transpose()
            .map_err(CustomError::ValidationError)?;
        if let Some(food_id) = &input.food_id {
            self.require_food(food_id).await?;
        }
        let changes = OrderItemChanges {
            quantity,
            unit_price,
            food_id: input.food_id,
            updated_at: timestamp_now(),
        };

        self.order_items
            .update_order_item(order_item_id, changes)
            .await?
            .ok_or_else(|| CustomError::NotFound(format!("order item {} not found", order_item_id)))
    }
}
