pub mod food;
pub mod health_check;
pub mod invoice;
pub mod menu;
pub mod order;
pub mod order_item;
pub mod pagination;
pub mod table;
pub mod user;
