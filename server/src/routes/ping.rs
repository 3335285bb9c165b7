//! Liveness ping

use axum::http::header;
use axum::response::IntoResponse;
use axum::Json;
use chrono::{SecondsFormat, Utc};
use serde::Serialize;

use crate::constants::messages;

#[derive(Debug, Serialize)]
pub struct PingResponse {
    pub status: &'static str,
    /// RFC 3339 with milliseconds
    pub timestamp: String,
    pub message: &'static str,
}

pub async fn ping() -> impl IntoResponse {
    let body = PingResponse {
        status: "ok",
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        message: messages::PING,
    };

    (
        [
            (
                header::CACHE_CONTROL,
                "no-store, no-cache, must-revalidate, proxy-revalidate",
            ),
            (header::PRAGMA, "no-cache"),
            (header::EXPIRES, "0"),
        ],
        Json(body),
    )
}
