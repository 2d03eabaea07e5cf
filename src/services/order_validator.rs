use std::collections::HashMap;

use rust_decimal::Decimal;

use crate::{
    dto::orders::OrderLineRequest,
    error::{AppError, AppResult},
    models::{MenuItem, PricedItem},
};

pub fn ensure_not_empty(lines: &[OrderLineRequest]) -> AppResult<()> {
    if lines.is_empty() {
        return Err(AppError::BadRequest(
            "Order must contain at least one item".into(),
        ));
    }
    Ok(())
}

/// Line items priced against one catalog snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct PricedOrder {
    pub items: Vec<PricedItem>,
    pub total_amount: Decimal,
}

/// Check every requested line against `catalog` and price it.
///
/// Fails on the first unknown item, so an order is either priced in full or
/// not at all. Duplicate ids are priced as separate lines.
pub fn validate_and_price(lines: &[OrderLineRequest], catalog: &[MenuItem]) -> AppResult<PricedOrder> {
    ensure_not_empty(lines)?;

    let menu: HashMap<i64, &MenuItem> = catalog.iter().map(|item| (item.id, item)).collect();

    let mut items = Vec::with_capacity(lines.len());
    let mut total_amount = Decimal::ZERO;

    for line in lines {
        let id = line
            .menu_item_id
            .ok_or_else(|| AppError::BadRequest("Menu item id is required".into()))?;
        let quantity = line.quantity.unwrap_or(1);

        let menu_item = menu
            .get(&id)
            .ok_or_else(|| AppError::BadRequest(format!("Menu item with id {id} not found")))?;

        if quantity < 1 {
            return Err(AppError::BadRequest(format!(
                "Quantity for menu item {id} must be at least 1"
            )));
        }
        if menu_item.price.is_sign_negative() {
            return Err(AppError::BadRequest(format!(
                "Menu item {id} has an invalid price"
            )));
        }

        let priced = PricedItem {
            menu_item_id: id,
            menu_item_name: menu_item.name.clone(),
            quantity,
            price: menu_item.price,
        };
        total_amount = priced
            .subtotal()
            .and_then(|subtotal| total_amount.checked_add(subtotal))
            .ok_or_else(|| AppError::BadRequest("Order total is too large".into()))?;
        items.push(priced);
    }

    Ok(PricedOrder {
        items,
        total_amount,
    })
}
