use super::order_composer::{OrderComposer, OrderItemView, OrderView};
use crate::errors::custom::CustomError;
use crate::models::{Invoice, PaymentStatus};
use crate::store::InvoiceStore;
use chrono::NaiveDateTime;
use serde::Serialize;
use std::sync::Arc;
use tracing::instrument;

/// Shown instead of a payment method that has not been chosen yet.
pub const UNSET_PAYMENT_METHOD: &str = "null";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InvoiceView {
    pub invoice_id: String,
    pub order_id: String,
    pub payment_method: String,
    pub payment_status: PaymentStatus,
    pub payment_due_date: NaiveDateTime,
    pub payment_due: f64,
    pub table_number: Option<i32>,
    pub order_items: Vec<OrderItemView>,
}

impl InvoiceView {
    pub fn new(invoice: Invoice, order: OrderView) -> Self {
        Self {
            invoice_id: invoice.invoice_id,
            order_id: invoice.order_id,
            payment_method: invoice
                .payment_method
                .unwrap_or_else(|| UNSET_PAYMENT_METHOD.to_string()),
            payment_status: invoice.payment_status,
            payment_due_date: invoice.payment_due_date,
            payment_due: order.payment_due,
            table_number: order.table_number,
            order_items: order.items,
        }
    }
}

#[derive(Clone)]
pub struct InvoiceComposer {
    invoices: Arc<dyn InvoiceStore>,
    orders: OrderComposer,
}

impl InvoiceComposer {
    pub fn new(invoices: Arc<dyn InvoiceStore>, orders: OrderComposer) -> Self {
        Self { invoices, orders }
    }

    #[instrument(name = "Compose invoice view", skip(self))]
    pub async fn compose(&self, invoice_id: &str) -> Result<InvoiceView, CustomError> {
        let invoice = self
            .invoices
            .find_invoice(invoice_id)
            .await?
            .ok_or_else(|| CustomError::NotFound(format!("invoice {} not found", invoice_id)))?;

        let order = self
            .orders
            .compose(&invoice.order_id)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| {
                CustomError::CompositionEmpty(format!(
                    "order {} of invoice {} has no items",
                    invoice.order_id, invoice_id
                ))
            })?;

        Ok(InvoiceView::new(invoice, order))
    }
}
