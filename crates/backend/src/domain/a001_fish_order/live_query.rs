use std::sync::Arc;

use contracts::domain::a001_fish_order::aggregate::{
    FishOrder, FishOrderId, OrderStatus, StatusFilter,
};
use tokio::sync::broadcast::{self, error::RecvError};

use super::store::FishOrderStore;

/// Уведомление о записи в коллекцию
#[derive(Debug, Clone, PartialEq)]
pub struct ChangeNotice {
    pub id: FishOrderId,
    pub status: OrderStatus,
}

/// Рассылка уведомлений об изменениях всем открытым live query
#[derive(Clone)]
pub struct LiveQueryHub {
    sender: broadcast::Sender<ChangeNotice>,
}

impl LiveQueryHub {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Ошибка отправки означает только отсутствие подписчиков
    pub fn notify(&self, notice: ChangeNotice) {
        let _ = self.sender.send(notice);
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }

    /// Открыть live query. Приёмник создаётся до первого запроса,
    /// поэтому запись между снимком и ожиданием не теряется.
    pub fn subscribe(&self, store: Arc<dyn FishOrderStore>, filter: StatusFilter) -> LiveQuery {
        LiveQuery {
            filter,
            store,
            receiver: self.sender.subscribe(),
            last: None,
        }
    }
}

/// Живой набор заказов для одного фильтра. Отмена подписки = drop.
pub struct LiveQuery {
    filter: StatusFilter,
    store: Arc<dyn FishOrderStore>,
    receiver: broadcast::Receiver<ChangeNotice>,
    last: Option<Vec<FishOrder>>,
}

impl LiveQuery {
    pub fn filter(&self) -> StatusFilter {
        self.filter
    }

    /// Текущий набор заказов (первое сообщение подписки)
    pub async fn snapshot(&mut self) -> anyhow::Result<Vec<FishOrder>> {
        let orders = self.store.query(self.filter).await?;
        self.last = Some(orders.clone());
        Ok(orders)
    }

    /// Ждёт изменения, после которого набор заказов отличается от последнего отданного.
    ///
    /// `None`, когда хаб закрыт. При отставании приёмника пропущенные
    /// уведомления не воспроизводятся: достаточно одного повторного запроса.
    pub async fn next_change(&mut self) -> Option<anyhow::Result<Vec<FishOrder>>> {
        loop {
            match self.receiver.recv().await {
                Ok(_) => {}
                Err(RecvError::Lagged(skipped)) => {
                    tracing::debug!("Live query {} lagged by {}", self.filter.as_str(), skipped);
                }
                Err(RecvError::Closed) => return None,
            }

            let orders = match self.store.query(self.filter).await {
                Ok(orders) => orders,
                Err(e) => return Some(Err(e)),
            };
            if self.last.as_ref() == Some(&orders) {
                continue;
            }
            self.last = Some(orders.clone());
            return Some(Ok(orders));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a001_fish_order::repository::SqliteFishOrderStore;
    use crate::shared::data::db::connect_in_memory;
    use chrono::Utc;
    use std::time::Duration;

    fn order(id: &str, status: OrderStatus) -> FishOrder {
        FishOrder {
            id: FishOrderId::new(id),
            user_uuid: "user-1".into(),
            agent_uuid: "agent-1".into(),
            fish_type: "nile perch".into(),
            fish_stock_weight: 30.0,
            amount_to_be_paid: 150000.0,
            location: "entebbe".into(),
            status,
            timestamp: Utc::now(),
        }
    }

    async fn seeded_store(orders: &[FishOrder]) -> Arc<dyn FishOrderStore> {
        let store = SqliteFishOrderStore::new(connect_in_memory().await.unwrap());
        for o in orders {
            store.insert(o).await.unwrap();
        }
        Arc::new(store)
    }

    async fn next(live: &mut LiveQuery) -> Vec<FishOrder> {
        tokio::time::timeout(Duration::from_secs(5), live.next_change())
            .await
            .expect("live query did not publish")
            .expect("hub closed")
            .expect("query failed")
    }

    #[tokio::test]
    async fn test_status_change_moves_order_between_filters() {
        let store = seeded_store(&[order("abc123ef", OrderStatus::Pending)]).await;
        let hub = LiveQueryHub::new(16);

        let mut pending = hub.subscribe(store.clone(), StatusFilter::Pending);
        let mut rejected = hub.subscribe(store.clone(), StatusFilter::Rejected);
        assert_eq!(pending.snapshot().await.unwrap().len(), 1);
        assert!(rejected.snapshot().await.unwrap().is_empty());

        let id = FishOrderId::new("abc123ef");
        assert!(store
            .update_status(&id, OrderStatus::Rejected)
            .await
            .unwrap());
        hub.notify(ChangeNotice {
            id: id.clone(),
            status: OrderStatus::Rejected,
        });

        assert!(next(&mut pending).await.is_empty());
        let now_rejected = next(&mut rejected).await;
        assert_eq!(now_rejected.len(), 1);
        assert_eq!(now_rejected[0].id, id);
        assert_eq!(now_rejected[0].status, OrderStatus::Rejected);
    }

    #[tokio::test]
    async fn test_unrelated_change_is_not_republished() {
        let store = seeded_store(&[
            order("p1", OrderStatus::Pending),
            order("a1", OrderStatus::Approved),
        ])
        .await;
        let hub = LiveQueryHub::new(16);
        let mut pending = hub.subscribe(store.clone(), StatusFilter::Pending);
        pending.snapshot().await.unwrap();

        // approved -> rejected does not touch the pending set
        store
            .update_status(&FishOrderId::new("a1"), OrderStatus::Rejected)
            .await
            .unwrap();
        hub.notify(ChangeNotice {
            id: FishOrderId::new("a1"),
            status: OrderStatus::Rejected,
        });

        let quiet = tokio::time::timeout(Duration::from_millis(200), pending.next_change()).await;
        assert!(quiet.is_err());
    }

    #[tokio::test]
    async fn test_closed_hub_ends_subscription() {
        let store = seeded_store(&[]).await;
        let hub = LiveQueryHub::new(4);
        let mut live = hub.subscribe(store, StatusFilter::All);
        assert_eq!(hub.subscriber_count(), 1);
        drop(hub);
        assert!(live.next_change().await.is_none());
    }

    #[tokio::test]
    async fn test_lagged_receiver_requeries_once() {
        let store = seeded_store(&[order("x1", OrderStatus::Pending)]).await;
        let hub = LiveQueryHub::new(1);
        let mut approved = hub.subscribe(store.clone(), StatusFilter::Approved);
        approved.snapshot().await.unwrap();

        store
            .update_status(&FishOrderId::new("x1"), OrderStatus::Approved)
            .await
            .unwrap();
        for _ in 0..3 {
            hub.notify(ChangeNotice {
                id: FishOrderId::new("x1"),
                status: OrderStatus::Approved,
            });
        }

        let orders = next(&mut approved).await;
        assert_eq!(orders.len(), 1);
        assert_eq!(orders[0].status, OrderStatus::Approved);
    }

    #[tokio::test]
    async fn test_dropping_live_query_unsubscribes() {
        let store = seeded_store(&[]).await;
        let hub = LiveQueryHub::new(4);
        let live = hub.subscribe(store, StatusFilter::Pending);
        assert_eq!(hub.subscriber_count(), 1);
        drop(live);
        assert_eq!(hub.subscriber_count(), 0);
    }
}
