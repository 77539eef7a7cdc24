use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use dnscope_domain::DomainError;
use serde_json::json;

pub struct ApiError(pub DomainError);

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self(err)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            DomainError::InvalidInput(_) | DomainError::UnsupportedRecordType(_) => {
                StatusCode::BAD_REQUEST
            }
            DomainError::Timeout { .. } => StatusCode::GATEWAY_TIMEOUT,
            DomainError::NetworkError { .. } | DomainError::MalformedPacket(_) => {
                StatusCode::BAD_GATEWAY
            }
            DomainError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = json!({
            "error": self.0.to_string(),
            "kind": self.0.kind(),
        });
        (status, Json(body)).into_response()
    }
}
