mod health_check;
mod helper;
mod invoice;
mod order;
mod postgres;
mod user;
