use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;

use crate::{
    error::{AppError, AppResult},
    models::{NewOrder, Order, OrderFilter, OrderItem, OrderStatus, StatusPolicy},
    store::OrderStore,
};

/// Process-local order store, handy in tests and for embedding the service.
///
/// Nothing survives a restart. One lock guards orders and id counters, so an
/// order is never observable without its items.
#[derive(Default)]
pub struct InMemoryOrderStore {
    tables: Mutex<Tables>,
}

#[derive(Default)]
struct Tables {
    orders: BTreeMap<i64, Order>,
    last_order_id: i64,
    last_item_id: i64,
}

impl InMemoryOrderStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl OrderStore for InMemoryOrderStore {
    async fn create_order(&self, new_order: NewOrder) -> AppResult<Order> {
        let mut tables = self.tables.lock().await;

        tables.last_order_id += 1;
        let order_id = tables.last_order_id;

        let mut items = Vec::with_capacity(new_order.items.len());
        for item in new_order.items {
            tables.last_item_id += 1;
            items.push(OrderItem::new(
                tables.last_item_id,
                order_id,
                item.menu_item_id,
                item.menu_item_name,
                item.quantity,
                item.price,
            ));
        }

        let order = Order {
            id: order_id,
            customer_name: new_order.customer_name,
            customer_phone: new_order.customer_phone,
            customer_address: new_order.customer_address,
            total_amount: new_order.total_amount,
            status: OrderStatus::Pending,
            created_at: Utc::now(),
            items,
        };
        tables.orders.insert(order_id, order.clone());

        Ok(order)
    }

    async fn get_by_id(&self, id: i64) -> AppResult<Order> {
        let tables = self.tables.lock().await;
        tables.orders.get(&id).cloned().ok_or(AppError::NotFound)
    }

    async fn list_all(&self, filter: OrderFilter) -> AppResult<Vec<Order>> {
        let tables = self.tables.lock().await;
        let mut orders: Vec<Order> = tables
            .orders
            .values()
            .filter(|order| filter.status.is_none_or(|status| order.status == status))
            .cloned()
            .collect();
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(orders)
    }

    async fn update_status(
        &self,
        id: i64,
        status: OrderStatus,
        policy: StatusPolicy,
    ) -> AppResult<Order> {
        let mut tables = self.tables.lock().await;
        let order = tables.orders.get_mut(&id).ok_or(AppError::NotFound)?;
        policy.check(order.status, status)?;
        order.status = status;
        Ok(order.clone())
    }
}
