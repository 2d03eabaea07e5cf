use order_service::{
    db::run_migrations,
    entity::{OrderItems, Orders},
    error::AppError,
    models::{NewOrder, OrderFilter, OrderStatus, PricedItem, StatusPolicy},
    store::{OrderStore, OrmOrderStore},
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use sea_orm::{ConnectOptions, Database, DatabaseConnection, EntityTrait, PaginatorTrait};

fn line(id: i64, name: &str, quantity: i32, price: Decimal) -> PricedItem {
    PricedItem {
        menu_item_id: id,
        menu_item_name: name.to_string(),
        quantity,
        price,
    }
}

fn order_for(name: &str, items: Vec<PricedItem>) -> NewOrder {
    let total_amount = items
        .iter()
        .map(|item| item.price * Decimal::from(item.quantity))
        .sum();
    NewOrder {
        customer_name: name.into(),
        customer_phone: None,
        customer_address: None,
        total_amount,
        items,
    }
}

async fn sqlite_store() -> anyhow::Result<(DatabaseConnection, OrmOrderStore)> {
    // One connection, so every query sees the same in-memory database.
    let mut options = ConnectOptions::new("sqlite::memory:");
    options.max_connections(1).min_connections(1);
    let orm = Database::connect(options).await?;
    run_migrations(&orm).await?;
    Ok((orm.clone(), OrmOrderStore::new(orm)))
}

// The default local database runs the same store code as Postgres.
#[tokio::test]
async fn sqlite_store_flow() -> anyhow::Result<()> {
    let (orm, store) = sqlite_store().await?;

    let created = store
        .create_order(order_for(
            "Alice",
            vec![
                line(1, "Burger", 2, dec!(9.99)),
                line(2, "Salad", 1, dec!(6.99)),
            ],
        ))
        .await?;
    assert_eq!(created.status, OrderStatus::Pending);
    assert_eq!(created.items.len(), 2);

    let fetched = store.get_by_id(created.id).await?;
    assert_eq!(fetched.customer_name, "Alice");
    assert_eq!(fetched.total_amount.round_dp(2), dec!(26.97));
    assert_eq!(fetched.items[0].menu_item_name, "Burger");
    assert_eq!(fetched.items[0].subtotal.round_dp(2), dec!(19.98));
    assert_eq!(fetched.items[1].subtotal.round_dp(2), dec!(6.99));

    let second = store
        .create_order(order_for("Bob", vec![line(5, "Ice Cream", 1, dec!(4.99))]))
        .await?;
    let listed = store.list_all(OrderFilter::default()).await?;
    assert_eq!(
        listed.iter().map(|o| o.id).collect::<Vec<_>>(),
        vec![second.id, created.id]
    );
    assert!(listed.iter().all(|o| !o.items.is_empty()));

    let updated = store
        .update_status(created.id, OrderStatus::Confirmed, StatusPolicy::Strict)
        .await?;
    assert_eq!(updated.status, OrderStatus::Confirmed);
    assert_eq!(store.get_by_id(created.id).await?.status, OrderStatus::Confirmed);

    let rejected = store
        .update_status(second.id, OrderStatus::Ready, StatusPolicy::Strict)
        .await;
    assert!(matches!(rejected, Err(AppError::BadRequest(_))));
    assert!(matches!(store.get_by_id(999).await, Err(AppError::NotFound)));

    assert_eq!(Orders::find().count(&orm).await?, 2);
    assert_eq!(OrderItems::find().count(&orm).await?, 3);

    Ok(())
}
