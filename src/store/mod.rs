//! Durable storage for orders and their line items.

use async_trait::async_trait;

use crate::{
    error::AppResult,
    models::{NewOrder, Order, OrderFilter, OrderStatus, StatusPolicy},
};

pub mod in_memory;
pub mod orm;

pub use in_memory::InMemoryOrderStore;
pub use orm::OrmOrderStore;

#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Persist an order and all of its items as one unit.
    ///
    /// The store assigns ids and `created_at` and starts the order in
    /// `Pending`. On failure nothing is left behind.
    async fn create_order(&self, new_order: NewOrder) -> AppResult<Order>;

    async fn get_by_id(&self, id: i64) -> AppResult<Order>;

    /// Orders newest first.
    async fn list_all(&self, filter: OrderFilter) -> AppResult<Vec<Order>>;

    /// Move an order to `status` if `policy` allows it from its current status.
    async fn update_status(
        &self,
        id: i64,
        status: OrderStatus,
        policy: StatusPolicy,
    ) -> AppResult<Order>;
}
