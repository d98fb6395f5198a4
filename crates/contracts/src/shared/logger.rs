use serde::{Deserialize, Serialize};

/// Строка таблицы system_log
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub id: i64,
    pub timestamp: String,
    /// "server" или "client"
    pub source: String,
    /// Индекс агрегата, например "a001"
    pub category: String,
    pub message: String,
}

/// Запись, которую присылает клиент (ошибки смены статуса)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateLogRequest {
    pub source: String,
    pub category: String,
    pub message: String,
}
