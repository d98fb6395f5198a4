use crate::shared::api_utils::{api_url, path_segment};
use contracts::domain::a001_fish_order::aggregate::{
    FishOrder, FishOrderId, OrderStatus, SetStatusRequest,
};
use contracts::domain::common::AggregateRoot;
use contracts::shared::logger::CreateLogRequest;
use gloo_net::http::Request;
use wasm_bindgen_futures::spawn_local;

fn order_url(id: &FishOrderId) -> String {
    api_url(&format!(
        "/api/{}/{}",
        FishOrder::collection_name(),
        path_segment(id.value())
    ))
}

/// PATCH только поля status
pub async fn set_status(id: &FishOrderId, status: OrderStatus) -> Result<(), String> {
    let response = Request::patch(&order_url(id))
        .json(&SetStatusRequest { status })
        .map_err(|e| format!("Failed to serialize request: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Request failed: {}", e))?;

    if !response.ok() {
        return Err(format!("HTTP {}", response.status()));
    }
    Ok(())
}

/// Записать статус без ожидания результата.
///
/// Ошибка только логируется: в консоль и в системный лог сервера. Список
/// меняется лишь когда live query увидит запись.
pub fn update_order_status(id: FishOrderId, status: OrderStatus) {
    spawn_local(async move {
        if let Err(e) = set_status(&id, status).await {
            log::error!("Error updating order status: {}", e);
            report_client_error(format!(
                "Error updating order {} status to {}: {}",
                id, status, e
            ))
            .await;
        }
    });
}

async fn report_client_error(message: String) {
    let request = CreateLogRequest {
        source: "client".into(),
        category: FishOrder::aggregate_index().into(),
        message,
    };
    let result = match Request::post(&api_url("/api/logs")).json(&request) {
        Ok(req) => req.send().await.map(|_| ()),
        Err(e) => Err(e),
    };
    if let Err(e) = result {
        log::warn!("Failed to report client error: {}", e);
    }
}
