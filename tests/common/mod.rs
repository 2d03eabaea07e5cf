#![allow(dead_code)]

use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use httpmock::prelude::*;
use order_service::{
    catalog::HttpCatalogClient,
    config::CatalogMode,
    dto::orders::{CreateOrderRequest, OrderLineRequest},
    error::{AppError, AppResult},
    models::{NewOrder, Order, OrderFilter, OrderStatus, StatusPolicy},
    services::OrderService,
    store::{InMemoryOrderStore, OrderStore},
};
use serde_json::{Value, json};

pub fn burger_and_salad() -> Value {
    json!([
        {"id": 1, "name": "Burger", "description": "Delicious beef burger", "price": 9.99, "category": "Main Course"},
        {"id": 2, "name": "Salad", "description": "Fresh garden salad", "price": 6.99, "category": "Appetizer"}
    ])
}

/// Menu service stand-in serving `menu` at `GET /api/menu`.
pub async fn menu_server(menu: Value) -> MockServer {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/menu");
            then.status(200).json_body(menu);
        })
        .await;
    server
}

/// Menu service stand-in that always fails.
pub async fn failing_menu_server() -> MockServer {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/menu");
            then.status(500).body("boom");
        })
        .await;
    server
}

pub fn catalog_for(server: &MockServer) -> HttpCatalogClient {
    HttpCatalogClient::new(&server.base_url(), Duration::from_secs(2))
        .expect("failed to build catalog client")
}

pub fn service_with_store(
    server: &MockServer,
    store: Arc<dyn OrderStore>,
    mode: CatalogMode,
) -> OrderService {
    OrderService::new(Arc::new(catalog_for(server)), store).with_catalog_mode(mode)
}

pub fn service_for(server: &MockServer) -> OrderService {
    service_with_store(
        server,
        Arc::new(InMemoryOrderStore::new()),
        CatalogMode::Lenient,
    )
}

pub fn order_request(name: &str, lines: &[(i64, Option<i32>)]) -> CreateOrderRequest {
    CreateOrderRequest {
        customer_name: Some(name.to_string()),
        customer_phone: None,
        customer_address: None,
        items: Some(
            lines
                .iter()
                .map(|&(id, quantity)| OrderLineRequest {
                    menu_item_id: Some(id),
                    quantity,
                })
                .collect(),
        ),
    }
}

/// Store whose writes always fail, as a full disk or dropped connection would.
pub struct BrokenStore;

#[async_trait]
impl OrderStore for BrokenStore {
    async fn create_order(&self, _new_order: NewOrder) -> AppResult<Order> {
        Err(AppError::Persistence(
            "Failed to create order: disk full".into(),
        ))
    }

    async fn get_by_id(&self, _id: i64) -> AppResult<Order> {
        Err(AppError::NotFound)
    }

    async fn list_all(&self, _filter: OrderFilter) -> AppResult<Vec<Order>> {
        Ok(Vec::new())
    }

    async fn update_status(
        &self,
        _id: i64,
        _status: OrderStatus,
        _policy: StatusPolicy,
    ) -> AppResult<Order> {
        Err(AppError::NotFound)
    }
}
