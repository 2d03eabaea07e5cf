use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Body of `POST /api/orders`.
///
/// Every field is optional at the wire level so that missing values surface
/// as `400` validation messages instead of extractor rejections.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct CreateOrderRequest {
    pub customer_name: Option<String>,
    pub customer_phone: Option<String>,
    pub customer_address: Option<String>,
    pub items: Option<Vec<OrderLineRequest>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OrderLineRequest {
    pub menu_item_id: Option<i64>,
    /// Defaults to 1.
    pub quantity: Option<i32>,
}

/// Body of `PUT /api/orders/{id}/status`. A missing `status` leaves the order untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateOrderStatusRequest {
    pub status: Option<String>,
}
