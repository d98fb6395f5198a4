use async_trait::async_trait;
use contracts::domain::a001_fish_order::aggregate::{
    FishOrder, FishOrderId, OrderStatus, StatusFilter,
};

/// Хранилище документов коллекции `inventoryFisherNane`
#[async_trait]
pub trait FishOrderStore: Send + Sync {
    /// Все документы, подходящие под фильтр, в порядке хранилища (timestamp, id)
    async fn query(&self, filter: StatusFilter) -> anyhow::Result<Vec<FishOrder>>;

    async fn get_by_id(&self, id: &FishOrderId) -> anyhow::Result<Option<FishOrder>>;

    async fn insert(&self, order: &FishOrder) -> anyhow::Result<()>;

    /// Записать только поле status. `false`, если документа с таким id нет.
    async fn update_status(&self, id: &FishOrderId, status: OrderStatus) -> anyhow::Result<bool>;
}
