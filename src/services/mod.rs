pub mod invoice_composer;
pub mod order_composer;
pub mod order_lifecycle;

pub use invoice_composer::{InvoiceComposer, InvoiceView};
pub use order_composer::{OrderComposer, OrderItemView, OrderView};
pub use order_lifecycle::{
    CreatedOrderItems, OrderInput, OrderItemBatch, OrderItemInput, OrderLifecycle,
};
