use utoipa::{OpenApi, openapi::OpenApi as OpenApiSpec};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::orders::{CreateOrderRequest, OrderLineRequest, UpdateOrderStatusRequest},
    error::ErrorData,
    models::{MenuItem, Order, OrderItem, OrderStatus},
    routes::{health, menu, orders},
};

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        menu::list_menu,
        orders::create_order,
        orders::list_orders,
        orders::get_order,
        orders::update_order_status
    ),
    components(
        schemas(
            health::HealthData,
            MenuItem,
            Order,
            OrderItem,
            OrderStatus,
            CreateOrderRequest,
            OrderLineRequest,
            UpdateOrderStatusRequest,
            ErrorData
        )
    ),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Menu", description = "Menu pass-through from the menu service"),
        (name = "Orders", description = "Order endpoints"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
