use std::sync::Arc;

use contracts::domain::a001_fish_order::aggregate::{
    FishOrder, FishOrderDto, FishOrderId, OrderStatus, StatusFilter,
};
use contracts::domain::common::AggregateRoot;

use super::live_query::{ChangeNotice, LiveQuery, LiveQueryHub};
use super::store::FishOrderStore;
use crate::shared::logger;

#[derive(Debug, thiserror::Error)]
pub enum FishOrderError {
    #[error("order {0} not found")]
    NotFound(FishOrderId),
    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

/// Коллекция заказов: хранилище плюс рассылка изменений для live query
#[derive(Clone)]
pub struct FishOrderService {
    store: Arc<dyn FishOrderStore>,
    hub: LiveQueryHub,
}

impl FishOrderService {
    pub fn new(store: Arc<dyn FishOrderStore>, live_channel_capacity: usize) -> Self {
        Self {
            store,
            hub: LiveQueryHub::new(live_channel_capacity),
        }
    }

    /// Разовый запрос по фильтру
    pub async fn list(&self, filter: StatusFilter) -> anyhow::Result<Vec<FishOrder>> {
        self.store.query(filter).await
    }

    pub async fn get_by_id(&self, id: &FishOrderId) -> anyhow::Result<Option<FishOrder>> {
        self.store.get_by_id(id).await
    }

    /// Создание заказа внешней системой. Поля не валидируются.
    pub async fn create(&self, dto: FishOrderDto) -> anyhow::Result<FishOrderId> {
        let order = FishOrder::new_for_insert(dto);
        self.store.insert(&order).await?;
        tracing::info!("Order {} created ({})", order.id, order.status);
        self.hub.notify(ChangeNotice {
            id: order.id.clone(),
            status: order.status,
        });
        Ok(order.id)
    }

    /// Записать новый статус. Любой переход разрешён: ограничения есть только в UI.
    pub async fn set_status(
        &self,
        id: &FishOrderId,
        status: OrderStatus,
    ) -> Result<(), FishOrderError> {
        match self.store.update_status(id, status).await {
            Ok(true) => {
                tracing::info!("Order {} status set to {}", id, status);
                logger::log(
                    FishOrder::aggregate_index(),
                    &format!("Order {} status set to {}", id, status),
                );
                self.hub.notify(ChangeNotice {
                    id: id.clone(),
                    status,
                });
                Ok(())
            }
            Ok(false) => {
                tracing::warn!("Order {} not found, status {} not written", id, status);
                Err(FishOrderError::NotFound(id.clone()))
            }
            Err(e) => {
                tracing::error!("Error updating order {} status: {}", id, e);
                logger::log(
                    FishOrder::aggregate_index(),
                    &format!("Error updating order {} status: {}", id, e),
                );
                Err(FishOrderError::Store(e))
            }
        }
    }

    /// Открыть live query для фильтра
    pub fn subscribe(&self, filter: StatusFilter) -> LiveQuery {
        self.hub.subscribe(self.store.clone(), filter)
    }

    /// Число открытых live query
    pub fn live_subscribers(&self) -> usize {
        self.hub.subscriber_count()
    }

    /// Вставка тестовых данных
    pub async fn insert_test_data(&self) -> anyhow::Result<()> {
        let data = vec![
            FishOrderDto {
                user_uuid: "0c5e1a2b-7d4f-4a61-9b3e-2f8d6c1a9e01".into(),
                agent_uuid: "a7f3c9d2-1b6e-4c58-8a0f-3e9d2b7c6f10".into(),
                fish_type: "tilapia".into(),
                fish_stock_weight: 30.0,
                amount_to_be_paid: 150000.0,
                location: "kasenyi landing site".into(),
                status: Some(OrderStatus::Pending),
                timestamp: None,
            },
            FishOrderDto {
                user_uuid: "5b2d8e4f-3a1c-4f7b-9e6d-0c4a8b2f1d37".into(),
                agent_uuid: "a7f3c9d2-1b6e-4c58-8a0f-3e9d2b7c6f10".into(),
                fish_type: "nile perch".into(),
                fish_stock_weight: 25.0,
                amount_to_be_paid: 500000.0,
                location: "ggaba".into(),
                status: Some(OrderStatus::Approved),
                timestamp: None,
            },
            FishOrderDto {
                user_uuid: "9e7c1f3a-6b2d-4e85-a4c0-7d1f5b3e8a22".into(),
                agent_uuid: "d4b8e2a6-9c3f-4d17-b5e1-8f2a6c0d4b93".into(),
                fish_type: "mukene".into(),
                fish_stock_weight: 120.0,
                amount_to_be_paid: 360000.0,
                location: "jinja".into(),
                status: Some(OrderStatus::Rejected),
                timestamp: None,
            },
        ];

        for dto in data {
            self.create(dto).await?;
        }

        Ok(())
    }
}
