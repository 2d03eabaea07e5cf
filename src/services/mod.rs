pub mod order_service;
pub mod order_validator;

pub use order_service::OrderService;
