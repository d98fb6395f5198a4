use crate::domain::a001_fish_order::api::update_order_status;
use crate::shared::date_utils::format_timestamp;
use contracts::domain::a001_fish_order::aggregate::{FishOrder, FishOrderId, OrderStatus};
use contracts::domain::common::AggregateRoot;
use leptos::prelude::*;

/// Раздел диалога: заголовок и пары "название - значение".
/// Пустое название: значение выводится без подписи.
#[derive(Clone, Debug, PartialEq)]
pub struct DetailSection {
    pub title: &'static str,
    pub rows: Vec<(&'static str, String)>,
}

/// Разделы диалога в порядке отображения
pub fn detail_sections(order: &FishOrder) -> Vec<DetailSection> {
    vec![
        DetailSection {
            title: "Order Information",
            rows: vec![
                ("Status", order.status.label().to_string()),
                ("Fish Type", order.fish_type.clone()),
                ("Weight", order.format_weight()),
                ("Location", order.location.clone()),
            ],
        },
        DetailSection {
            title: "Payment Information",
            rows: vec![
                ("Amount to be Paid", order.format_amount()),
                ("Price per kg", order.format_price_per_kg()),
            ],
        },
        DetailSection {
            title: "User & Agent Information",
            rows: vec![
                ("User UUID", order.user_uuid.clone()),
                ("Agent UUID", order.agent_uuid.clone()),
            ],
        },
        DetailSection {
            title: "Timestamp",
            rows: vec![("", format_timestamp(order.timestamp))],
        },
    ]
}

/// ViewModel диалога деталей. Хранит снимок заказа на момент открытия:
/// live обновления списка диалог не меняют.
#[derive(Clone, Copy)]
pub struct FishOrderDetailsViewModel {
    pub order: RwSignal<Option<FishOrder>>,
    pub open: RwSignal<bool>,
    write_status: Callback<(FishOrderId, OrderStatus)>,
}

impl FishOrderDetailsViewModel {
    pub fn new() -> Self {
        Self::with_writer(Callback::new(|(id, status)| update_order_status(id, status)))
    }

    /// Запись статуса через переданную функцию (PATCH в `new`)
    pub fn with_writer(write_status: Callback<(FishOrderId, OrderStatus)>) -> Self {
        Self {
            order: RwSignal::new(None),
            open: RwSignal::new(false),
            write_status,
        }
    }

    pub fn open_for(&self, order: FishOrder) {
        self.order.set(Some(order));
        self.open.set(true);
    }

    pub fn close(&self) {
        self.open.set(false);
    }

    /// Кнопка диалога: запись статуса и закрытие, не дожидаясь ответа сервера
    pub fn apply_action(&self, target: OrderStatus) {
        if let Some(order) = self.order.get_untracked() {
            self.write_status.run((order.id, target));
        }
        self.close();
    }

    pub fn title(&self) -> String {
        self.order
            .get()
            .map(|o| format!("{} Details #{}", FishOrder::element_name(), o.short_id()))
            .unwrap_or_default()
    }
}

impl Default for FishOrderDetailsViewModel {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use std::sync::{Arc, Mutex};

    fn approved_order() -> FishOrder {
        FishOrder {
            id: FishOrderId::new("0c5e1a2b-7d4f-4a61-9b3e-2f8dabc123ef"),
            user_uuid: "user-9".into(),
            agent_uuid: "agent-3".into(),
            fish_type: "nile perch".into(),
            fish_stock_weight: 25.0,
            amount_to_be_paid: 500000.0,
            location: "ggaba".into(),
            status: OrderStatus::Approved,
            timestamp: Utc.with_ymd_and_hms(2025, 3, 5, 14, 30, 0).unwrap(),
        }
    }

    fn value<'a>(sections: &'a [DetailSection], label: &str) -> &'a str {
        sections
            .iter()
            .flat_map(|s| s.rows.iter())
            .find(|(l, _)| *l == label)
            .map(|(_, v)| v.as_str())
            .unwrap()
    }

    #[test]
    fn test_sections_in_display_order() {
        let sections = detail_sections(&approved_order());
        let titles: Vec<&str> = sections.iter().map(|s| s.title).collect();
        assert_eq!(
            titles,
            vec![
                "Order Information",
                "Payment Information",
                "User & Agent Information",
                "Timestamp"
            ]
        );
    }

    #[test]
    fn test_payment_rows() {
        let sections = detail_sections(&approved_order());
        assert_eq!(value(&sections, "Amount to be Paid"), "Shs 500000");
        assert_eq!(value(&sections, "Price per kg"), "Shs 20000.00");
        assert_eq!(value(&sections, ""), "Mar 5, 2025, 02:30 PM");
        assert_eq!(value(&sections, "Status"), "Approved");
    }

    #[test]
    fn test_original_row_labels() {
        let sections = detail_sections(&approved_order());
        let labels: Vec<&str> = sections[0].rows.iter().map(|(l, _)| *l).collect();
        assert_eq!(labels, vec!["Status", "Fish Type", "Weight", "Location"]);
        assert_eq!(value(&sections, "Weight"), "25 kg");
        assert_eq!(value(&sections, "User UUID"), "user-9");
        assert_eq!(value(&sections, "Agent UUID"), "agent-3");
    }

    type Writes = Arc<Mutex<Vec<(FishOrderId, OrderStatus)>>>;

    fn recording_vm() -> (FishOrderDetailsViewModel, Writes) {
        let writes: Writes = Arc::new(Mutex::new(Vec::new()));
        let sink = writes.clone();
        let vm = FishOrderDetailsViewModel::with_writer(Callback::new(move |write| {
            sink.lock().unwrap().push(write);
        }));
        (vm, writes)
    }

    #[test]
    fn test_close_without_action_writes_nothing() {
        let (vm, writes) = recording_vm();
        let mut pending = approved_order();
        pending.status = OrderStatus::Pending;

        vm.open_for(pending.clone());
        assert!(vm.open.get_untracked());

        vm.close();
        assert!(!vm.open.get_untracked());
        assert_eq!(vm.order.get_untracked(), Some(pending));
        assert!(writes.lock().unwrap().is_empty());
    }

    #[test]
    fn test_action_writes_once_and_closes() {
        let (vm, writes) = recording_vm();
        let mut pending = approved_order();
        pending.status = OrderStatus::Pending;

        vm.open_for(pending.clone());
        vm.apply_action(OrderStatus::Rejected);

        assert!(!vm.open.get_untracked());
        assert_eq!(
            *writes.lock().unwrap(),
            vec![(pending.id, OrderStatus::Rejected)]
        );
    }
}
