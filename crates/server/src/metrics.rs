use std::time::Instant;

use axum::extract::{MatchedPath, Request};
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::Response;
use once_cell::sync::Lazy;
use prometheus::{
    register_histogram_vec, register_int_counter, register_int_counter_vec, register_int_gauge, Encoder,
    HistogramVec, IntCounter, IntCounterVec, IntGauge, TextEncoder,
};
use tracing::error;

// Prometheus metrics (default registry)
pub static HTTP_REQUESTS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "item_store_http_requests_total",
        "Total HTTP requests by method, route and status",
        &["method", "route", "status"]
    )
    .expect("register http_requests_total")
});

pub static HTTP_REQUEST_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    register_histogram_vec!(
        "item_store_http_request_duration_seconds",
        "Request duration in seconds",
        &["method", "route"],
        vec![0.0005, 0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0]
    )
    .expect("register http_request_duration")
});

pub static ITEMS_CREATED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!("item_store_items_created_total", "Total items appended")
        .expect("register items_created_total")
});

pub static ITEMS_NOT_FOUND_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "item_store_items_not_found_total",
        "Total lookups for a position outside the sequence"
    )
    .expect("register items_not_found_total")
});

pub static ITEMS_STORED: Lazy<IntGauge> = Lazy::new(|| {
    register_int_gauge!("item_store_items_stored", "Current number of stored items")
        .expect("register items_stored")
});

/// Register every collector up front so `/metrics` lists them before first use.
pub fn register() {
    Lazy::force(&HTTP_REQUESTS_TOTAL);
    Lazy::force(&HTTP_REQUEST_DURATION);
    Lazy::force(&ITEMS_CREATED_TOTAL);
    Lazy::force(&ITEMS_NOT_FOUND_TOTAL);
    Lazy::force(&ITEMS_STORED);
}

/// Middleware: count and time every request, labelled by matched route.
pub async fn track_requests(req: Request, next: Next) -> Response {
    let method = req.method().to_string();
    let route = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| "unmatched".to_string());
    let started = Instant::now();

    let resp = next.run(req).await;

    HTTP_REQUEST_DURATION
        .with_label_values(&[&method, &route])
        .observe(started.elapsed().as_secs_f64());
    HTTP_REQUESTS_TOTAL
        .with_label_values(&[&method, &route, resp.status().as_str()])
        .inc();
    resp
}

/// Render the default registry in Prometheus text format.
pub fn render() -> (StatusCode, String) {
    let mut buf = Vec::new();
    let encoder = TextEncoder::new();
    if let Err(e) = encoder.encode(&prometheus::gather(), &mut buf) {
        error!(error = %e, "failed to encode metrics");
        return (StatusCode::INTERNAL_SERVER_ERROR, e.to_string());
    }
    match String::from_utf8(buf) {
        Ok(body) => (StatusCode::OK, body),
        Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
    }
}

pub async fn metrics_handler() -> (StatusCode, String) {
    render()
}
