use async_trait::async_trait;
use contracts::domain::a001_fish_order::aggregate::{
    FishOrder, FishOrderId, OrderStatus, StatusFilter,
};
use contracts::domain::common::AggregateId;

use sea_orm::entity::prelude::*;
use sea_orm::sea_query::Expr;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

use super::store::FishOrderStore;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "a001_inventory_fisher_nane")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub user_uuid: String,
    pub agent_uuid: String,
    pub fish_type: String,
    pub fish_stock_weight: f64,
    pub amount_to_be_paid: f64,
    pub location: String,
    pub status: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<Model> for FishOrder {
    type Error = String;

    fn try_from(m: Model) -> Result<Self, Self::Error> {
        let status = m.status.parse::<OrderStatus>()?;
        Ok(FishOrder {
            id: FishOrderId::from_string(&m.id)?,
            user_uuid: m.user_uuid,
            agent_uuid: m.agent_uuid,
            fish_type: m.fish_type,
            fish_stock_weight: m.fish_stock_weight,
            amount_to_be_paid: m.amount_to_be_paid,
            location: m.location,
            status,
            timestamp: m.timestamp,
        })
    }
}

/// Строки с неизвестным статусом пропускаются: в коллекции их быть не должно
fn into_orders(models: Vec<Model>) -> Vec<FishOrder> {
    models
        .into_iter()
        .filter_map(|m| {
            let id = m.id.clone();
            match FishOrder::try_from(m) {
                Ok(order) => Some(order),
                Err(e) => {
                    tracing::warn!("Skipping order {}: {}", id, e);
                    None
                }
            }
        })
        .collect()
}

/// SQLite-хранилище коллекции заказов
#[derive(Clone)]
pub struct SqliteFishOrderStore {
    conn: DatabaseConnection,
}

impl SqliteFishOrderStore {
    pub fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl FishOrderStore for SqliteFishOrderStore {
    async fn query(&self, filter: StatusFilter) -> anyhow::Result<Vec<FishOrder>> {
        let mut select = Entity::find();
        if let Some(status) = filter.as_query() {
            select = select.filter(Column::Status.eq(status.as_str()));
        }
        let models = select
            .order_by_asc(Column::Timestamp)
            .order_by_asc(Column::Id)
            .all(&self.conn)
            .await?;
        Ok(into_orders(models))
    }

    async fn get_by_id(&self, id: &FishOrderId) -> anyhow::Result<Option<FishOrder>> {
        let Some(model) = Entity::find_by_id(id.as_string())
            .one(&self.conn)
            .await?
        else {
            return Ok(None);
        };
        FishOrder::try_from(model)
            .map(Some)
            .map_err(|e| anyhow::anyhow!("Order {}: {}", id, e))
    }

    async fn insert(&self, order: &FishOrder) -> anyhow::Result<()> {
        let active = ActiveModel {
            id: Set(order.id.as_string()),
            user_uuid: Set(order.user_uuid.clone()),
            agent_uuid: Set(order.agent_uuid.clone()),
            fish_type: Set(order.fish_type.clone()),
            fish_stock_weight: Set(order.fish_stock_weight),
            amount_to_be_paid: Set(order.amount_to_be_paid),
            location: Set(order.location.clone()),
            status: Set(order.status.as_str().to_string()),
            timestamp: Set(order.timestamp),
        };
        active.insert(&self.conn).await?;
        Ok(())
    }

    async fn update_status(&self, id: &FishOrderId, status: OrderStatus) -> anyhow::Result<bool> {
        let result = Entity::update_many()
            .col_expr(Column::Status, Expr::value(status.as_str()))
            .filter(Column::Id.eq(id.value()))
            .exec(&self.conn)
            .await?;
        Ok(result.rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data::db::connect_in_memory;
    use chrono::{Duration, TimeZone, Utc};
    use sea_orm::{ConnectionTrait, DatabaseBackend, Statement};

    fn order(id: &str, status: OrderStatus, minutes: i64) -> FishOrder {
        FishOrder {
            id: FishOrderId::new(id),
            user_uuid: format!("user-{}", id),
            agent_uuid: "agent-7".into(),
            fish_type: "tilapia".into(),
            fish_stock_weight: 30.0,
            amount_to_be_paid: 150000.0,
            location: "kasenyi".into(),
            status,
            timestamp: Utc.with_ymd_and_hms(2025, 3, 5, 14, 0, 0).unwrap()
                + Duration::minutes(minutes),
        }
    }

    async fn store_with(orders: &[FishOrder]) -> SqliteFishOrderStore {
        let store = SqliteFishOrderStore::new(connect_in_memory().await.unwrap());
        for o in orders {
            store.insert(o).await.unwrap();
        }
        store
    }

    #[tokio::test]
    async fn test_query_filters_by_status() {
        let store = store_with(&[
            order("a1", OrderStatus::Pending, 0),
            order("a2", OrderStatus::Approved, 1),
            order("a3", OrderStatus::Pending, 2),
            order("a4", OrderStatus::Rejected, 3),
        ])
        .await;

        for filter in StatusFilter::TABS {
            let orders = store.query(filter).await.unwrap();
            assert!(orders.iter().all(|o| filter.matches(o.status)));
        }

        let pending = store.query(StatusFilter::Pending).await.unwrap();
        let ids: Vec<&str> = pending.iter().map(|o| o.id.value()).collect();
        assert_eq!(ids, vec!["a1", "a3"]);

        assert_eq!(store.query(StatusFilter::All).await.unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_query_orders_by_timestamp() {
        let store = store_with(&[
            order("late", OrderStatus::Pending, 30),
            order("early", OrderStatus::Pending, 0),
        ])
        .await;
        let ids: Vec<String> = store
            .query(StatusFilter::All)
            .await
            .unwrap()
            .into_iter()
            .map(|o| o.id.0)
            .collect();
        assert_eq!(ids, vec!["early", "late"]);
    }

    #[tokio::test]
    async fn test_update_status_touches_only_status() {
        let original = order("abc123ef", OrderStatus::Pending, 0);
        let store = store_with(&[original.clone()]).await;

        let updated = store
            .update_status(&original.id, OrderStatus::Rejected)
            .await
            .unwrap();
        assert!(updated);

        let after = store.get_by_id(&original.id).await.unwrap().unwrap();
        assert_eq!(after.status, OrderStatus::Rejected);
        assert_eq!(
            FishOrder {
                status: OrderStatus::Pending,
                ..after
            },
            original
        );
    }

    #[tokio::test]
    async fn test_update_status_unknown_id() {
        let store = store_with(&[]).await;
        let updated = store
            .update_status(&FishOrderId::new("missing"), OrderStatus::Approved)
            .await
            .unwrap();
        assert!(!updated);
        assert!(store
            .get_by_id(&FishOrderId::new("missing"))
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_rows_with_unknown_status_are_skipped() {
        let store = store_with(&[order("ok", OrderStatus::Approved, 0)]).await;
        store
            .conn
            .execute(Statement::from_string(
                DatabaseBackend::Sqlite,
                "INSERT INTO a001_inventory_fisher_nane (id, status, timestamp) \
                 VALUES ('bad', 'paid', '2025-03-05T14:00:00+00:00');"
                    .to_string(),
            ))
            .await
            .unwrap();

        let all = store.query(StatusFilter::All).await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].id.value(), "ok");
        assert!(store.get_by_id(&FishOrderId::new("bad")).await.is_err());
    }
}
