use axum::{
    Json, Router,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::StatusCode,
    routing::{get, put},
};

use crate::{
    dto::orders::{CreateOrderRequest, UpdateOrderStatusRequest},
    error::{AppResult, ErrorData},
    models::Order,
    routes::params::OrderListQuery,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_orders).post(create_order))
        .route("/{id}", get(get_order))
        .route("/{id}/status", put(update_order_status))
}

#[utoipa::path(
    post,
    path = "/api/orders",
    request_body = CreateOrderRequest,
    responses(
        (status = 201, description = "Order created", body = Order),
        (status = 400, description = "Malformed body, missing customer name, no items or unknown menu item", body = ErrorData),
        (status = 500, description = "Order could not be stored", body = ErrorData),
        (status = 502, description = "Menu service unavailable (strict catalog mode)", body = ErrorData),
    ),
    tag = "Orders"
)]
pub async fn create_order(
    State(state): State<AppState>,
    payload: Result<Json<CreateOrderRequest>, JsonRejection>,
) -> AppResult<(StatusCode, Json<Order>)> {
    let Json(payload) = payload?;
    let order = state.orders.create_order(payload).await?;
    Ok((StatusCode::CREATED, Json(order)))
}

#[utoipa::path(
    get,
    path = "/api/orders",
    params(OrderListQuery),
    responses(
        (status = 200, description = "All orders, newest first", body = Vec<Order>),
        (status = 400, description = "Unknown status filter", body = ErrorData),
    ),
    tag = "Orders"
)]
pub async fn list_orders(
    State(state): State<AppState>,
    Query(query): Query<OrderListQuery>,
) -> AppResult<Json<Vec<Order>>> {
    let orders = state.orders.list_orders(query).await?;
    Ok(Json(orders))
}

#[utoipa::path(
    get,
    path = "/api/orders/{id}",
    params(
        ("id" = i64, Path, description = "Order ID")
    ),
    responses(
        (status = 200, description = "Order with its items", body = Order),
        (status = 404, description = "Not Found", body = ErrorData),
    ),
    tag = "Orders"
)]
pub async fn get_order(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Order>> {
    let order = state.orders.get_order(id).await?;
    Ok(Json(order))
}

#[utoipa::path(
    put,
    path = "/api/orders/{id}/status",
    params(
        ("id" = i64, Path, description = "Order ID")
    ),
    request_body = UpdateOrderStatusRequest,
    responses(
        (status = 200, description = "Order after the update", body = Order),
        (status = 400, description = "Malformed body, unknown status or transition not allowed", body = ErrorData),
        (status = 404, description = "Not Found", body = ErrorData),
    ),
    tag = "Orders"
)]
pub async fn update_order_status(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    payload: Result<Json<UpdateOrderStatusRequest>, JsonRejection>,
) -> AppResult<Json<Order>> {
    let Json(payload) = payload?;
    let order = state.orders.update_order_status(id, payload).await?;
    Ok(Json(order))
}
