use chrono::Utc;
use contracts::shared::logger::LogEntry;
use sea_orm::entity::prelude::*;
use sea_orm::{EntityTrait, QueryOrder, Set};

use crate::shared::data::db::{get_connection, try_get_connection};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "system_log")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub timestamp: String,
    pub source: String,
    pub category: String,
    pub message: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for LogEntry {
    fn from(m: Model) -> Self {
        LogEntry {
            id: m.id,
            timestamp: m.timestamp,
            source: m.source,
            category: m.category,
            message: m.message,
        }
    }
}

/// Запись в фоне (для вызовов из сервиса). Без инициализированной БД пропускается.
pub fn log_event_internal(source: &str, category: &str, message: &str) {
    let Some(db) = try_get_connection() else {
        return;
    };
    let (source, category, message) = (
        source.to_string(),
        category.to_string(),
        message.to_string(),
    );

    tokio::spawn(async move {
        if let Err(e) = insert_event(db, &source, &category, &message).await {
            tracing::warn!("Failed to write system log entry: {}", e);
        }
    });
}

pub async fn log_event(source: &str, category: &str, message: &str) -> anyhow::Result<()> {
    insert_event(get_connection(), source, category, message).await
}

pub async fn get_all_logs() -> anyhow::Result<Vec<LogEntry>> {
    list_events(get_connection()).await
}

pub async fn clear_all_logs() -> anyhow::Result<u64> {
    clear_events(get_connection()).await
}

async fn insert_event(
    db: &DatabaseConnection,
    source: &str,
    category: &str,
    message: &str,
) -> anyhow::Result<()> {
    ActiveModel {
        id: sea_orm::ActiveValue::NotSet,
        timestamp: Set(Utc::now().format("%Y-%m-%d %H:%M:%S%.3f").to_string()),
        source: Set(source.to_string()),
        category: Set(category.to_string()),
        message: Set(message.to_string()),
    }
    .insert(db)
    .await?;
    Ok(())
}

/// Новые записи сверху
async fn list_events(db: &DatabaseConnection) -> anyhow::Result<Vec<LogEntry>> {
    Ok(Entity::find()
        .order_by_desc(Column::Id)
        .all(db)
        .await?
        .into_iter()
        .map(Into::into)
        .collect())
}

async fn clear_events(db: &DatabaseConnection) -> anyhow::Result<u64> {
    let result = Entity::delete_many().exec(db).await?;
    Ok(result.rows_affected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data::db::connect_in_memory;

    #[tokio::test]
    async fn test_entries_listed_newest_first() {
        let db = connect_in_memory().await.unwrap();
        insert_event(&db, "server", "a001", "Order abc123ef status set to approved")
            .await
            .unwrap();
        insert_event(&db, "client", "a001", "Error updating order status: HTTP 500")
            .await
            .unwrap();

        let entries = list_events(&db).await.unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].source, "client");
        assert_eq!(entries[1].source, "server");
    }

    #[tokio::test]
    async fn test_clear_removes_everything() {
        let db = connect_in_memory().await.unwrap();
        insert_event(&db, "server", "a001", "one").await.unwrap();
        insert_event(&db, "server", "a001", "two").await.unwrap();

        assert_eq!(clear_events(&db).await.unwrap(), 2);
        assert!(list_events(&db).await.unwrap().is_empty());
    }
}
