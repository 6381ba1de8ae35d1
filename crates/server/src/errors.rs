use axum::extract::path::ErrorKind as PathErrorKind;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::Value;
use service::errors::{FieldError, Location, ServiceError, ViolationKind};
use thiserror::Error;
use tracing::warn;

/// JSON error response: `{"detail": ...}`.
#[derive(Debug)]
pub struct JsonApiError {
    pub status: StatusCode,
    pub detail: Value,
}

impl JsonApiError {
    pub fn new(status: StatusCode, detail: impl Into<Value>) -> Self {
        Self { status, detail: detail.into() }
    }

    fn validation(errors: &[FieldError]) -> Self {
        let detail = serde_json::to_value(errors).unwrap_or_default();
        Self::new(StatusCode::UNPROCESSABLE_ENTITY, detail)
    }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        (self.status, Json(serde_json::json!({ "detail": self.detail }))).into_response()
    }
}

impl From<ServiceError> for JsonApiError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::Validation(errors) => Self::validation(&errors),
            ServiceError::NotFound(msg) => Self::new(StatusCode::NOT_FOUND, msg),
        }
    }
}

impl From<JsonRejection> for JsonApiError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::JsonSyntaxError(_)
            | JsonRejection::JsonDataError(_)
            | JsonRejection::MissingJsonContentType(_) => {
                let msg = rejection.body_text();
                warn!(error = %msg, "rejected request body");
                Self::validation(&[FieldError::new(Location::Body, None, ViolationKind::JsonInvalid, msg)])
            }
            other => Self::new(other.status(), other.body_text()),
        }
    }
}

impl From<PathRejection> for JsonApiError {
    fn from(rejection: PathRejection) -> Self {
        let msg = rejection.body_text();
        let (key, kind) = match &rejection {
            PathRejection::FailedToDeserializePathParams(e) => match e.kind() {
                PathErrorKind::InvalidUtf8InPathParam { key } => (Some(key.clone()), ViolationKind::StringUnicode),
                PathErrorKind::ParseErrorAtKey { key, .. } => {
                    (Some(key.clone()), ViolationKind::ValueError)
                }
                _ => (None, ViolationKind::ValueError),
            },
            _ => (None, ViolationKind::ValueError),
        };
        warn!(error = %msg, "rejected path parameters");
        Self::validation(&[FieldError::new(Location::Path, key.as_deref(), kind, msg)])
    }
}

impl From<QueryRejection> for JsonApiError {
    fn from(rejection: QueryRejection) -> Self {
        let msg = rejection.body_text();
        warn!(error = %msg, "rejected query string");
        Self::validation(&[FieldError::new(Location::Query, None, ViolationKind::ValueError, msg)])
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("cannot bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Any(#[from] anyhow::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_json(resp: Response) -> Value {
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn not_found_maps_to_404_with_message() {
        let resp = JsonApiError::from(ServiceError::item_not_found(3)).into_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(resp).await, serde_json::json!({"detail": "Item 3 not found"}));
    }

    #[tokio::test]
    async fn validation_maps_to_422_with_field_list() {
        let err = ServiceError::invalid(FieldError::new(
            Location::Body,
            Some("text"),
            ViolationKind::Missing,
            "Field required",
        ));
        let resp = JsonApiError::from(err).into_response();
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = body_json(resp).await;
        assert_eq!(body["detail"][0]["loc"], serde_json::json!(["body", "text"]));
        assert_eq!(body["detail"][0]["type"], "missing");
    }
}
