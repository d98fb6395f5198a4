use crate::domain::common::{AggregateId, AggregateRoot};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

// ============================================================================
// ID Type
// ============================================================================

/// Идентификатор документа заказа. Выдаётся хранилищем и не меняется.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FishOrderId(pub String);

impl FishOrderId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn new_v4() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn value(&self) -> &str {
        &self.0
    }

    /// Последние 8 символов идентификатора (для заголовков карточек)
    pub fn short(&self) -> String {
        let count = self.0.chars().count();
        self.0.chars().skip(count.saturating_sub(8)).collect()
    }
}

impl AggregateId for FishOrderId {
    fn as_string(&self) -> String {
        self.0.clone()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        if s.trim().is_empty() {
            return Err("Order id cannot be empty".into());
        }
        Ok(Self(s.to_string()))
    }
}

impl fmt::Display for FishOrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// Status
// ============================================================================

/// Статус заказа. Других значений в коллекции не бывает.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Approved,
    Rejected,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Approved => "approved",
            OrderStatus::Rejected => "rejected",
        }
    }

    /// Capitalized label for badges
    pub fn label(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Approved => "Approved",
            OrderStatus::Rejected => "Rejected",
        }
    }

    /// Кнопки смены статуса в карточке заказа, в порядке отображения.
    ///
    /// Переходы ограничиваются только этим набором кнопок, хранилище их не проверяет.
    /// "Mark Pending" и "Pay" выполняют один и тот же переход approved -> pending.
    pub fn list_actions(&self) -> &'static [StatusAction] {
        match self {
            OrderStatus::Pending => &[
                StatusAction {
                    label: "Approve",
                    target: OrderStatus::Approved,
                },
                StatusAction {
                    label: "Reject",
                    target: OrderStatus::Rejected,
                },
            ],
            OrderStatus::Approved => &[
                StatusAction {
                    label: "Mark Pending",
                    target: OrderStatus::Pending,
                },
                StatusAction {
                    label: "Pay",
                    target: OrderStatus::Pending,
                },
            ],
            OrderStatus::Rejected => &[StatusAction {
                label: "Reactivate",
                target: OrderStatus::Pending,
            }],
        }
    }

    /// Кнопки в диалоге деталей: только approve/reject для pending
    pub fn dialog_actions(&self) -> &'static [StatusAction] {
        match self {
            OrderStatus::Pending => self.list_actions(),
            _ => &[],
        }
    }
}

impl FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Ok(OrderStatus::Pending),
            "approved" => Ok(OrderStatus::Approved),
            "rejected" => Ok(OrderStatus::Rejected),
            other => Err(format!("Unknown order status: {}", other)),
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Кнопка перехода статуса
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusAction {
    pub label: &'static str,
    pub target: OrderStatus,
}

// ============================================================================
// Filter (tabs)
// ============================================================================

/// Фильтр списка заказов, выбирается вкладкой
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    Pending,
    Approved,
    Rejected,
    #[default]
    All,
}

impl StatusFilter {
    /// Вкладки, которые показывает доска (All не отображается)
    pub const TABS: [StatusFilter; 3] = [
        StatusFilter::Pending,
        StatusFilter::Approved,
        StatusFilter::Rejected,
    ];

    /// 0 -> Pending, 1 -> Approved, 2 -> Rejected, остальное -> All
    pub fn from_tab_index(index: usize) -> Self {
        match index {
            0 => StatusFilter::Pending,
            1 => StatusFilter::Approved,
            2 => StatusFilter::Rejected,
            _ => StatusFilter::All,
        }
    }

    pub fn tab_index(&self) -> usize {
        match self {
            StatusFilter::Pending => 0,
            StatusFilter::Approved => 1,
            StatusFilter::Rejected => 2,
            StatusFilter::All => 3,
        }
    }

    /// Значение для условия `status == ?`; None означает без условия
    pub fn as_query(&self) -> Option<OrderStatus> {
        match self {
            StatusFilter::Pending => Some(OrderStatus::Pending),
            StatusFilter::Approved => Some(OrderStatus::Approved),
            StatusFilter::Rejected => Some(OrderStatus::Rejected),
            StatusFilter::All => None,
        }
    }

    pub fn matches(&self, status: OrderStatus) -> bool {
        self.as_query().map_or(true, |s| s == status)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StatusFilter::All => "all",
            other => other.as_query().map(|s| s.as_str()).unwrap_or("all"),
        }
    }

    pub fn tab_label(&self) -> &'static str {
        match self {
            StatusFilter::All => "All",
            other => other.as_query().map(|s| s.label()).unwrap_or("All"),
        }
    }
}

impl FromStr for StatusFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") || s.trim().is_empty() {
            return Ok(StatusFilter::All);
        }
        s.parse::<OrderStatus>().map(StatusFilter::from)
    }
}

impl From<OrderStatus> for StatusFilter {
    fn from(status: OrderStatus) -> Self {
        match status {
            OrderStatus::Pending => StatusFilter::Pending,
            OrderStatus::Approved => StatusFilter::Approved,
            OrderStatus::Rejected => StatusFilter::Rejected,
        }
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================

/// Заказ на поставку рыбы
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FishOrder {
    pub id: FishOrderId,
    pub user_uuid: String,
    pub agent_uuid: String,
    pub fish_type: String,
    /// кг
    pub fish_stock_weight: f64,
    pub amount_to_be_paid: f64,
    pub location: String,
    pub status: OrderStatus,
    /// Время создания, не меняется
    pub timestamp: DateTime<Utc>,
}

impl FishOrder {
    /// Создать новый заказ для вставки в хранилище
    pub fn new_for_insert(dto: FishOrderDto) -> Self {
        Self {
            id: FishOrderId::new_v4(),
            user_uuid: dto.user_uuid,
            agent_uuid: dto.agent_uuid,
            fish_type: dto.fish_type,
            fish_stock_weight: dto.fish_stock_weight,
            amount_to_be_paid: dto.amount_to_be_paid,
            location: dto.location,
            status: dto.status.unwrap_or(OrderStatus::Pending),
            timestamp: dto.timestamp.unwrap_or_else(Utc::now),
        }
    }

    pub fn short_id(&self) -> String {
        self.id.short()
    }

    /// Цена за кг. Вес не проверяется: при нулевом весе результат inf/NaN.
    pub fn price_per_kg(&self) -> f64 {
        self.amount_to_be_paid / self.fish_stock_weight
    }

    pub fn format_amount(&self) -> String {
        format!("Shs {}", self.amount_to_be_paid)
    }

    /// Нечисловые значения выводятся как в JS: "Infinity", "-Infinity", "NaN"
    pub fn format_price_per_kg(&self) -> String {
        let price = self.price_per_kg();
        if price.is_finite() {
            return format!("Shs {:.2}", price);
        }
        let text = if price.is_nan() {
            "NaN"
        } else if price.is_sign_negative() {
            "-Infinity"
        } else {
            "Infinity"
        };
        format!("Shs {}", text)
    }

    pub fn format_weight(&self) -> String {
        format!("{} kg", self.fish_stock_weight)
    }
}

impl AggregateRoot for FishOrder {
    type Id = FishOrderId;

    fn id(&self) -> Self::Id {
        self.id.clone()
    }

    fn aggregate_index() -> &'static str {
        "a001"
    }

    fn collection_name() -> &'static str {
        "inventoryFisherNane"
    }

    fn element_name() -> &'static str {
        "Fish Order"
    }

    fn table_name() -> &'static str {
        "a001_inventory_fisher_nane"
    }
}

// ============================================================================
// Forms / DTOs
// ============================================================================

/// DTO для внешнего создания заказа. Поля не валидируются.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct FishOrderDto {
    pub user_uuid: String,
    pub agent_uuid: String,
    pub fish_type: String,
    pub fish_stock_weight: f64,
    pub amount_to_be_paid: f64,
    pub location: String,
    #[serde(default)]
    pub status: Option<OrderStatus>,
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
}

/// Тело PATCH-запроса: меняется только поле status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetStatusRequest {
    pub status: OrderStatus,
}

/// Параметры запроса списка / live query
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct StatusQuery {
    #[serde(default)]
    pub status: StatusFilter,
}
