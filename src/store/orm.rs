use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::ActiveValue::NotSet;
use sea_orm::sea_query::LockType;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionTrait,
};

use crate::{
    entity::{
        order_items::{
            ActiveModel as OrderItemActive, Column as OrderItemCol, Entity as OrderItems,
            Model as OrderItemModel,
        },
        orders::{ActiveModel as OrderActive, Column as OrderCol, Entity as Orders, Model as OrderModel},
    },
    error::{AppError, AppResult},
    models::{NewOrder, Order, OrderFilter, OrderItem, OrderStatus, StatusPolicy},
    store::OrderStore,
};

/// Order store backed by a relational database through SeaORM.
#[derive(Clone)]
pub struct OrmOrderStore {
    conn: DatabaseConnection,
}

impl OrmOrderStore {
    pub fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl OrderStore for OrmOrderStore {
    async fn create_order(&self, new_order: NewOrder) -> AppResult<Order> {
        let (order, items) = self
            .conn
            .transaction::<_, (OrderModel, Vec<OrderItemModel>), DbErr>(move |txn| {
                Box::pin(async move {
                    let order = OrderActive {
                        id: NotSet,
                        customer_name: Set(new_order.customer_name),
                        customer_phone: Set(new_order.customer_phone),
                        customer_address: Set(new_order.customer_address),
                        total_amount: Set(new_order.total_amount),
                        status: Set(OrderStatus::Pending.to_string()),
                        created_at: Set(Utc::now().into()),
                    }
                    .insert(txn)
                    .await?;

                    let mut items = Vec::with_capacity(new_order.items.len());
                    for item in new_order.items {
                        let item = OrderItemActive {
                            id: NotSet,
                            order_id: Set(order.id),
                            menu_item_id: Set(item.menu_item_id),
                            menu_item_name: Set(item.menu_item_name),
                            quantity: Set(item.quantity),
                            price: Set(item.price),
                        }
                        .insert(txn)
                        .await?;
                        items.push(item);
                    }

                    Ok((order, items))
                })
            })
            .await
            .map_err(|err| AppError::Persistence(format!("Failed to create order: {err}")))?;

        order_from_entity(order, items)
    }

    async fn get_by_id(&self, id: i64) -> AppResult<Order> {
        let order = Orders::find_by_id(id).one(&self.conn).await?;
        let order = match order {
            Some(o) => o,
            None => return Err(AppError::NotFound),
        };

        let items = OrderItems::find()
            .filter(OrderItemCol::OrderId.eq(order.id))
            .order_by_asc(OrderItemCol::Id)
            .all(&self.conn)
            .await?;

        order_from_entity(order, items)
    }

    async fn list_all(&self, filter: OrderFilter) -> AppResult<Vec<Order>> {
        let mut condition = Condition::all();
        if let Some(status) = filter.status {
            condition = condition.add(OrderCol::Status.eq(status.as_str()));
        }

        let orders = Orders::find()
            .filter(condition)
            .order_by_desc(OrderCol::CreatedAt)
            .order_by_desc(OrderCol::Id)
            .all(&self.conn)
            .await?;
        if orders.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<i64> = orders.iter().map(|o| o.id).collect();
        let mut items_by_order: HashMap<i64, Vec<OrderItemModel>> = HashMap::new();
        for item in OrderItems::find()
            .filter(OrderItemCol::OrderId.is_in(ids))
            .order_by_asc(OrderItemCol::Id)
            .all(&self.conn)
            .await?
        {
            items_by_order.entry(item.order_id).or_default().push(item);
        }

        orders
            .into_iter()
            .map(|order| {
                let items = items_by_order.remove(&order.id).unwrap_or_default();
                order_from_entity(order, items)
            })
            .collect()
    }

    async fn update_status(
        &self,
        id: i64,
        status: OrderStatus,
        policy: StatusPolicy,
    ) -> AppResult<Order> {
        let txn = self.conn.begin().await?;

        let order = Orders::find_by_id(id)
            .lock(LockType::Update)
            .one(&txn)
            .await?;
        let order = match order {
            Some(o) => o,
            None => return Err(AppError::NotFound),
        };

        let current = parse_stored_status(&order.status)?;
        policy.check(current, status)?;

        let order = if current == status {
            order
        } else {
            let mut active: OrderActive = order.into();
            active.status = Set(status.to_string());
            active.update(&txn).await?
        };

        let items = OrderItems::find()
            .filter(OrderItemCol::OrderId.eq(order.id))
            .order_by_asc(OrderItemCol::Id)
            .all(&txn)
            .await?;

        txn.commit().await?;

        order_from_entity(order, items)
    }
}

fn parse_stored_status(status: &str) -> AppResult<OrderStatus> {
    status
        .parse()
        .map_err(|_| AppError::Internal(anyhow::anyhow!("order has unknown stored status {status:?}")))
}

fn order_from_entity(model: OrderModel, items: Vec<OrderItemModel>) -> AppResult<Order> {
    Ok(Order {
        id: model.id,
        customer_name: model.customer_name,
        customer_phone: model.customer_phone,
        customer_address: model.customer_address,
        total_amount: model.total_amount,
        status: parse_stored_status(&model.status)?,
        created_at: model.created_at.with_timezone(&Utc),
        items: items.into_iter().map(order_item_from_entity).collect(),
    })
}

fn order_item_from_entity(model: OrderItemModel) -> OrderItem {
    OrderItem::new(
        model.id,
        model.order_id,
        model.menu_item_id,
        model.menu_item_name,
        model.quantity,
        model.price,
    )
}
