use contracts::domain::a001_fish_order::aggregate::{FishOrder, StatusFilter};
use contracts::domain::a001_fish_order::live::LiveQueryMessage;
use leptos::prelude::*;

#[derive(Clone, Debug, Default)]
pub struct SupplyOrdersState {
    /// Фильтр текущей подписки
    pub filter: StatusFilter,
    pub orders: Vec<FishOrder>,
    pub is_loaded: bool,
}

impl SupplyOrdersState {
    /// Новая подписка: старый набор больше не показывается
    pub fn reset(&mut self, filter: StatusFilter) {
        self.filter = filter;
        self.orders.clear();
        self.is_loaded = false;
    }

    /// Применить сообщение live query. Снимки другого фильтра (от уже
    /// отменённой подписки) игнорируются. Ошибка оставляет список как есть.
    ///
    /// `false`: состояние не изменилось, перерисовка не нужна.
    pub fn apply(&mut self, msg: LiveQueryMessage) -> bool {
        match msg {
            LiveQueryMessage::Snapshot { filter, orders } if filter == self.filter => {
                self.orders = orders;
                self.is_loaded = true;
                true
            }
            LiveQueryMessage::Snapshot { filter, .. } => {
                log::debug!(
                    "Ignoring {} snapshot while showing {}",
                    filter.as_str(),
                    self.filter.as_str()
                );
                false
            }
            LiveQueryMessage::Error { message } => {
                log::error!("Live query {} failed: {}", self.filter.as_str(), message);
                false
            }
        }
    }
}

// Create state within component scope instead of thread-local
// This ensures state is properly disposed when component unmounts
pub fn create_state(filter: StatusFilter) -> RwSignal<SupplyOrdersState> {
    RwSignal::new(SupplyOrdersState {
        filter,
        ..Default::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use contracts::domain::a001_fish_order::aggregate::{FishOrderId, OrderStatus};

    fn order(id: &str, status: OrderStatus) -> FishOrder {
        FishOrder {
            id: FishOrderId::new(id),
            user_uuid: "u".into(),
            agent_uuid: "a".into(),
            fish_type: "tilapia".into(),
            fish_stock_weight: 30.0,
            amount_to_be_paid: 150000.0,
            location: "kasenyi".into(),
            status,
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn test_snapshot_for_current_filter_replaces_orders() {
        let mut state = SupplyOrdersState::default();
        state.reset(StatusFilter::Pending);
        assert!(state.apply(LiveQueryMessage::Snapshot {
            filter: StatusFilter::Pending,
            orders: vec![order("abc123ef", OrderStatus::Pending)],
        }));
        assert!(state.is_loaded);
        assert_eq!(state.orders.len(), 1);

        assert!(state.apply(LiveQueryMessage::Snapshot {
            filter: StatusFilter::Pending,
            orders: Vec::new(),
        }));
        assert!(state.orders.is_empty());
    }

    #[test]
    fn test_stale_snapshot_is_ignored() {
        let mut state = SupplyOrdersState::default();
        state.reset(StatusFilter::Rejected);
        let applied = state.apply(LiveQueryMessage::Snapshot {
            filter: StatusFilter::Pending,
            orders: vec![order("p1", OrderStatus::Pending)],
        });
        assert!(!applied);
        assert!(state.orders.is_empty());
        assert!(!state.is_loaded);
    }

    #[test]
    fn test_error_keeps_current_orders() {
        let mut state = SupplyOrdersState::default();
        state.reset(StatusFilter::Approved);
        state.apply(LiveQueryMessage::Snapshot {
            filter: StatusFilter::Approved,
            orders: vec![order("a1", OrderStatus::Approved)],
        });
        assert!(!state.apply(LiveQueryMessage::Error {
            message: "database is locked".into(),
        }));
        assert_eq!(state.orders.len(), 1);
    }

    #[test]
    fn test_reset_clears_previous_filter() {
        let mut state = SupplyOrdersState::default();
        state.reset(StatusFilter::Pending);
        state.apply(LiveQueryMessage::Snapshot {
            filter: StatusFilter::Pending,
            orders: vec![order("p1", OrderStatus::Pending)],
        });
        state.reset(StatusFilter::Approved);
        assert_eq!(state.filter, StatusFilter::Approved);
        assert!(state.orders.is_empty());
        assert!(!state.is_loaded);
    }
}
