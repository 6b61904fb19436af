use axum::http::{HeaderValue, StatusCode, header::CONTENT_TYPE};
use axum::response::{IntoResponse, Response};
use log::{error, warn};
use thiserror::Error;

use crate::database::SqliteDatabaseError;
use crate::weather::ProviderError;

#[derive(Debug, Error)]
#[error("{message}")]
pub struct InternalError {
    pub message: String,
}

impl InternalError {
    pub fn new(message: String) -> InternalError {
        InternalError { message }
    }
}

impl IntoResponse for InternalError {
    fn into_response(self) -> Response {
        error!(
            "Error encountered while processing request: {}",
            self.message
        );
        StatusCode::INTERNAL_SERVER_ERROR.into_response()
    }
}

impl From<SqliteDatabaseError> for InternalError {
    fn from(err: SqliteDatabaseError) -> Self {
        InternalError::new(format!("Database request failed: {err}"))
    }
}

impl From<askama::Error> for InternalError {
    fn from(err: askama::Error) -> Self {
        InternalError::new(format!("Failed to render template: {err}"))
    }
}

/// Everything that can stop a weather lookup from being answered.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("city_name must not be empty")]
    EmptyCityName,
    #[error(transparent)]
    Provider(#[from] ProviderError),
    #[error(transparent)]
    Storage(#[from] SqliteDatabaseError),
    #[error(transparent)]
    Internal(#[from] InternalError),
}

impl IntoResponse for LookupError {
    fn into_response(self) -> Response {
        match self {
            LookupError::EmptyCityName => {
                (StatusCode::BAD_REQUEST, "city_name must not be empty").into_response()
            }
            LookupError::Provider(ProviderError::Upstream {
                status,
                content_type,
                body,
            }) => {
                let status = StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY);
                let mut response = (status, body).into_response();
                if let Some(value) =
                    content_type.and_then(|value| value.parse::<HeaderValue>().ok())
                {
                    response.headers_mut().insert(CONTENT_TYPE, value);
                }
                response
            }
            LookupError::Provider(err) => {
                warn!("Weather lookup failed: {err}");
                (StatusCode::BAD_GATEWAY, "Weather provider unavailable").into_response()
            }
            LookupError::Storage(err) => InternalError::from(err).into_response(),
            LookupError::Internal(err) => err.into_response(),
        }
    }
}
