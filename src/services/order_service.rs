use std::sync::Arc;

use crate::{
    catalog::CatalogClient,
    config::CatalogMode,
    dto::orders::{CreateOrderRequest, UpdateOrderStatusRequest},
    error::{AppError, AppResult},
    models::{MenuItem, NewOrder, Order, OrderFilter, OrderStatus, StatusPolicy},
    routes::params::OrderListQuery,
    services::order_validator::{ensure_not_empty, validate_and_price},
    store::OrderStore,
};

/// Order workflows: create, read and status updates.
///
/// Creation fetches the menu, prices every line against it and hands the
/// priced order to the store in one atomic write.
pub struct OrderService {
    catalog: Arc<dyn CatalogClient>,
    store: Arc<dyn OrderStore>,
    catalog_mode: CatalogMode,
    status_policy: StatusPolicy,
}

impl OrderService {
    pub fn new(catalog: Arc<dyn CatalogClient>, store: Arc<dyn OrderStore>) -> Self {
        Self {
            catalog,
            store,
            catalog_mode: CatalogMode::default(),
            status_policy: StatusPolicy::default(),
        }
    }

    pub fn with_catalog_mode(mut self, catalog_mode: CatalogMode) -> Self {
        self.catalog_mode = catalog_mode;
        self
    }

    pub fn with_status_policy(mut self, status_policy: StatusPolicy) -> Self {
        self.status_policy = status_policy;
        self
    }

    pub async fn create_order(&self, payload: CreateOrderRequest) -> AppResult<Order> {
        let customer_name = match payload.customer_name {
            Some(name) if !name.trim().is_empty() => name,
            _ => return Err(AppError::BadRequest("Customer name is required".into())),
        };
        let lines = payload.items.unwrap_or_default();
        ensure_not_empty(&lines)?;

        let menu = self.menu_for_pricing().await?;
        let priced = validate_and_price(&lines, &menu)?;

        let order = self
            .store
            .create_order(NewOrder {
                customer_name,
                customer_phone: payload.customer_phone,
                customer_address: payload.customer_address,
                total_amount: priced.total_amount,
                items: priced.items,
            })
            .await?;

        tracing::info!(
            order_id = order.id,
            items = order.items.len(),
            total_amount = %order.total_amount,
            "order created"
        );
        Ok(order)
    }

    pub async fn get_order(&self, id: i64) -> AppResult<Order> {
        self.store.get_by_id(id).await
    }

    pub async fn list_orders(&self, query: OrderListQuery) -> AppResult<Vec<Order>> {
        let status = match query.status.as_deref().filter(|s| !s.is_empty()) {
            Some(status) => Some(status.parse::<OrderStatus>()?),
            None => None,
        };
        self.store.list_all(OrderFilter { status }).await
    }

    pub async fn update_order_status(
        &self,
        id: i64,
        payload: UpdateOrderStatusRequest,
    ) -> AppResult<Order> {
        let Some(status) = payload.status else {
            return self.store.get_by_id(id).await;
        };
        let status: OrderStatus = status.parse()?;

        let order = self
            .store
            .update_status(id, status, self.status_policy)
            .await?;

        tracing::info!(order_id = order.id, status = %order.status, "order status updated");
        Ok(order)
    }

    /// The live menu, passed through unchanged.
    pub async fn menu_snapshot(&self) -> AppResult<Vec<MenuItem>> {
        self.catalog.fetch_all().await.map_err(|err| {
            tracing::warn!(error = %err, "menu unavailable");
            AppError::from(err)
        })
    }

    async fn menu_for_pricing(&self) -> AppResult<Vec<MenuItem>> {
        match self.catalog.fetch_all().await {
            Ok(menu) => Ok(menu),
            Err(err) => match self.catalog_mode {
                CatalogMode::Lenient => {
                    tracing::warn!(error = %err, "menu unavailable, pricing against an empty menu");
                    Ok(Vec::new())
                }
                CatalogMode::Strict => {
                    tracing::warn!(error = %err, "menu unavailable, rejecting order");
                    Err(err.into())
                }
            },
        }
    }
}
