pub mod repository;

/// Событие сервера в таблицу system_log (в фоне, ошибки только в tracing)
pub fn log(category: &str, message: &str) {
    repository::log_event_internal("server", category, message);
}
