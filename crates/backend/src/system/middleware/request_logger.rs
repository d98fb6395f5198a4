use axum::body::to_bytes;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::middleware::Next;
use axum::response::Response;
use chrono::Utc;

use crate::shared::format::format_size;

/// Middleware для логирования HTTP запросов
///
/// Выводит в консоль время (UTC), длительность, размер ответа, статус, метод и путь.
/// Ответы 101 (WebSocket live query) не буферизуются.
pub async fn request_logger(req: Request<Body>, next: Next) -> Response {
    let start = std::time::Instant::now();
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    let response = next.run(req).await;

    if response.status() == StatusCode::SWITCHING_PROTOCOLS {
        print_line("35", start, "upgrade", response.status(), &method, &path);
        return response;
    }

    let (parts, body) = response.into_parts();

    // Читаем тело ответа, чтобы узнать реальный размер
    let bytes = match to_bytes(body, usize::MAX).await {
        Ok(b) => b,
        Err(e) => {
            tracing::warn!("Failed to buffer response body for {} {}: {}", method, path, e);
            print_line("33", start, "error", parts.status, &method, &path);
            return Response::from_parts(parts, Body::default());
        }
    };

    // Голубой для 2xx, коричневый для остальных
    let color_code = if parts.status.is_success() { "36" } else { "33" };
    print_line(
        color_code,
        start,
        &format_size(bytes.len()),
        parts.status,
        &method,
        &path,
    );

    Response::from_parts(parts, Body::from(bytes))
}

fn print_line(
    color_code: &str,
    start: std::time::Instant,
    size: &str,
    status: StatusCode,
    method: &axum::http::Method,
    path: &str,
) {
    println!(
        "\x1b[{}m{}\x1b[0m | {:>5}ms | {:>12} | {} {:>6} {}",
        color_code,
        Utc::now().format("%H:%M:%S"),
        start.elapsed().as_millis(),
        size,
        status.as_u16(),
        method,
        path
    );
}
