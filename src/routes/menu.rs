use axum::{Json, extract::State};

use crate::{
    error::{AppResult, ErrorData},
    models::MenuItem,
    state::AppState,
};

#[utoipa::path(
    get,
    path = "/api/menu",
    responses(
        (status = 200, description = "Menu as served by the menu service", body = Vec<MenuItem>),
        (status = 502, description = "Menu service unavailable", body = ErrorData),
    ),
    tag = "Menu"
)]
pub async fn list_menu(State(state): State<AppState>) -> AppResult<Json<Vec<MenuItem>>> {
    let menu = state.orders.menu_snapshot().await?;
    Ok(Json(menu))
}
