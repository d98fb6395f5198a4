use super::aggregate::{FishOrder, StatusFilter};
use serde::{Deserialize, Serialize};

/// Сообщение live query, отправляемое сервером в WebSocket текстовым кадром
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum LiveQueryMessage {
    /// Полный набор заказов, подходящих под фильтр подписки
    Snapshot {
        filter: StatusFilter,
        orders: Vec<FishOrder>,
    },
    /// Запрос к хранилищу не удался; подписка остаётся открытой
    Error { message: String },
}

impl LiveQueryMessage {
    pub fn to_json(&self) -> Result<String, String> {
        serde_json::to_string(self).map_err(|e| e.to_string())
    }

    pub fn from_json(text: &str) -> Result<Self, String> {
        serde_json::from_str(text).map_err(|e| e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_tagging() {
        let msg = LiveQueryMessage::Snapshot {
            filter: StatusFilter::Pending,
            orders: Vec::new(),
        };
        let json = msg.to_json().unwrap();
        assert_eq!(json, r#"{"type":"snapshot","filter":"pending","orders":[]}"#);
        assert_eq!(LiveQueryMessage::from_json(&json).unwrap(), msg);
    }

    #[test]
    fn test_error_message() {
        let parsed =
            LiveQueryMessage::from_json(r#"{"type":"error","message":"db is locked"}"#).unwrap();
        assert_eq!(
            parsed,
            LiveQueryMessage::Error {
                message: "db is locked".into()
            }
        );
        assert!(LiveQueryMessage::from_json(r#"{"type":"unknown"}"#).is_err());
    }
}
