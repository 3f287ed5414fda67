//! Logging middleware
//!
//! Records HTTP request and response information

use axum::{
    extract::Request,
    http::{HeaderValue, Method, Uri},
    middleware::Next,
    response::Response,
};
use std::time::{Duration, Instant};
use tracing::{info, warn, Instrument};
use uuid::Uuid;

/// Header carrying the per-request id back to the caller
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Requests slower than this are flagged
const SLOW_REQUEST_THRESHOLD: Duration = Duration::from_secs(2);

/// Request logging middleware
///
/// Assigns a request id, logs the request line, status and duration
pub async fn request_logging_middleware(request: Request, next: Next) -> Response {
    let start_time = Instant::now();
    let request_id = Uuid::new_v4().to_string();
    let method = request.method().clone();
    let uri = request.uri().clone();

    let span = tracing::info_span!(
        "http_request",
        request_id = %request_id,
        method = %method,
        path = %uri.path(),
    );

    let mut response = async move {
        info!("Request started: {} {}", method, uri);

        let response = next.run(request).await;
        log_completion(&method, &uri, response.status().as_u16(), start_time.elapsed());
        response
    }
    .instrument(span)
    .await;

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    response
}

fn log_completion(method: &Method, uri: &Uri, status: u16, duration: Duration) {
    let millis = duration.as_secs_f64() * 1000.0;

    if status >= 500 {
        warn!("Server error: {} - Duration: {:.2}ms", status, millis);
    } else if status >= 400 {
        warn!("Client error: {} - Duration: {:.2}ms", status, millis);
    } else {
        info!("Request completed: {} - Duration: {:.2}ms", status, millis);
    }

    if duration > SLOW_REQUEST_THRESHOLD {
        warn!(
            "Slow request detected: {} {} - Duration: {:.2}s",
            method,
            uri,
            duration.as_secs_f64()
        );
    }
}
