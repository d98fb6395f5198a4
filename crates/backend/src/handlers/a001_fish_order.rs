use std::sync::Arc;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        Path, Query, State,
    },
    http::StatusCode,
    response::Response,
    Json,
};
use contracts::domain::a001_fish_order::aggregate::{
    FishOrder, FishOrderDto, FishOrderId, SetStatusRequest, StatusQuery,
};
use contracts::domain::a001_fish_order::live::LiveQueryMessage;
use futures_util::{SinkExt, StreamExt};
use serde_json::json;

use crate::domain::a001_fish_order::live_query::LiveQuery;
use crate::domain::a001_fish_order::service::{FishOrderError, FishOrderService};

pub type FishOrderState = Arc<FishOrderService>;

/// GET /api/inventoryFisherNane?status=pending
pub async fn list(
    State(service): State<FishOrderState>,
    Query(query): Query<StatusQuery>,
) -> Result<Json<Vec<FishOrder>>, StatusCode> {
    match service.list(query.status).await {
        Ok(v) => Ok(Json(v)),
        Err(e) => {
            tracing::error!("Failed to query orders ({}): {}", query.status.as_str(), e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// GET /api/inventoryFisherNane/:id
pub async fn get_by_id(
    State(service): State<FishOrderState>,
    Path(id): Path<String>,
) -> Result<Json<FishOrder>, StatusCode> {
    match service.get_by_id(&FishOrderId::new(id)).await {
        Ok(Some(v)) => Ok(Json(v)),
        Ok(None) => Err(StatusCode::NOT_FOUND),
        Err(_) => Err(StatusCode::INTERNAL_SERVER_ERROR),
    }
}

/// POST /api/inventoryFisherNane
pub async fn create(
    State(service): State<FishOrderState>,
    Json(dto): Json<FishOrderDto>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    match service.create(dto).await {
        Ok(id) => Ok(Json(json!({ "id": id }))),
        Err(e) => {
            tracing::error!("Failed to create order: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// PATCH /api/inventoryFisherNane/:id
///
/// Пишет только поле status
pub async fn set_status(
    State(service): State<FishOrderState>,
    Path(id): Path<String>,
    Json(req): Json<SetStatusRequest>,
) -> StatusCode {
    match service.set_status(&FishOrderId::new(id), req.status).await {
        Ok(()) => StatusCode::NO_CONTENT,
        Err(FishOrderError::NotFound(_)) => StatusCode::NOT_FOUND,
        Err(FishOrderError::Store(_)) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// POST /api/inventoryFisherNane/testdata
pub async fn insert_test_data(State(service): State<FishOrderState>) -> StatusCode {
    match service.insert_test_data().await {
        Ok(_) => StatusCode::OK,
        Err(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// GET /api/inventoryFisherNane/live?status=pending (WebSocket)
pub async fn live(
    ws: WebSocketUpgrade,
    State(service): State<FishOrderState>,
    Query(query): Query<StatusQuery>,
) -> Response {
    let live = service.subscribe(query.status);
    tracing::debug!(
        "Live query {} requested ({} open)",
        query.status.as_str(),
        service.live_subscribers()
    );
    ws.on_upgrade(move |socket| handle_live_socket(socket, live))
}

fn to_message(live: &LiveQuery, result: anyhow::Result<Vec<FishOrder>>) -> LiveQueryMessage {
    match result {
        Ok(orders) => LiveQueryMessage::Snapshot {
            filter: live.filter(),
            orders,
        },
        Err(e) => {
            tracing::error!("Live query {} failed: {}", live.filter().as_str(), e);
            LiveQueryMessage::Error {
                message: e.to_string(),
            }
        }
    }
}

async fn handle_live_socket(socket: WebSocket, mut live: LiveQuery) {
    let (mut sender, mut receiver) = socket.split();
    let filter = live.filter();
    tracing::debug!("Live query {} opened", filter.as_str());

    // Snapshot first, then one message per change of the result set
    let mut send_task = tokio::spawn(async move {
        let first = live.snapshot().await;
        let mut next = Some(to_message(&live, first));
        while let Some(msg) = next.take() {
            let text = match msg.to_json() {
                Ok(text) => text,
                Err(e) => {
                    tracing::error!("Failed to serialize live query message: {}", e);
                    break;
                }
            };
            if sender.send(Message::Text(text)).await.is_err() {
                break;
            }
            next = live
                .next_change()
                .await
                .map(|result| to_message(&live, result));
        }
    });

    // Client messages are ignored; Close ends the subscription
    let mut recv_task = tokio::spawn(async move {
        while let Some(Ok(msg)) = receiver.next().await {
            if let Message::Close(_) = msg {
                break;
            }
        }
    });

    tokio::select! {
        _ = (&mut send_task) => recv_task.abort(),
        _ = (&mut recv_task) => send_task.abort(),
    };
    tracing::debug!("Live query {} closed", filter.as_str());
}
