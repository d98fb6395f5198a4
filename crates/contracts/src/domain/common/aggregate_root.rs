/// Трейт для корня агрегата
///
/// Определяет идентификатор записи и статические метаданные коллекции
pub trait AggregateRoot {
    /// Тип идентификатора агрегата
    type Id;

    /// Получить ID записи
    fn id(&self) -> Self::Id;

    // ============================================================================
    // Метаданные класса агрегата (статические данные)
    // ============================================================================

    /// Индекс агрегата в системе (например, "a001")
    fn aggregate_index() -> &'static str;

    /// Имя коллекции документов (адресуется клиентами по этому имени)
    fn collection_name() -> &'static str;

    /// Имя элемента для UI (единственное число)
    fn element_name() -> &'static str;

    /// Имя таблицы в БД, в которой хранится коллекция
    fn table_name() -> &'static str;
}
