use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::domain::newsletter::DispatchError;

mod schema;

pub type AppResult<T, E = AppError> = std::result::Result<T, E>;

/// A common error type that can be used throughout the API.
///
/// Can be returned in a `Result` from an API handler function. Every variant
/// is rendered as a JSON `{ "error": ... }` body with the matching status code.
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("Unauthorized")]
    Unauthorized,
    #[error("{0}")]
    ValidationError(String),
    /// A write to the store failed. `message` is what the caller gets to see.
    #[error("{message}")]
    PersistenceError {
        message: &'static str,
        #[source]
        source: anyhow::Error,
    },
    #[error(transparent)]
    UnexpectedError(#[from] anyhow::Error),
}

impl AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::ValidationError(_) => StatusCode::BAD_REQUEST,
            Self::PersistenceError { .. } | Self::UnexpectedError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn public_message(&self) -> String {
        match self {
            Self::UnexpectedError(_) => "Internal server error".to_owned(),
            other => other.to_string(),
        }
    }
}

impl From<DispatchError> for AppError {
    fn from(err: DispatchError) -> Self {
        match err {
            DispatchError::Unauthorized => Self::Unauthorized,
            DispatchError::MissingFields => {
                Self::ValidationError(DispatchError::MissingFields.to_string())
            }
            DispatchError::NewsletterNotCreated(source) => Self::PersistenceError {
                message: "Failed to create newsletter",
                source,
            },
            DispatchError::RecipientsNotRecorded {
                newsletter_id,
                source,
            } => Self::PersistenceError {
                message: "Failed to record recipients",
                source: source.context(format!("newsletter {newsletter_id} has no recipients")),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            Self::PersistenceError { message, source } => {
                tracing::error!(details = ?source, "{}", message)
            }
            Self::UnexpectedError(e) => tracing::error!("{:?}", e),
            other => tracing::error!("{}", other),
        }

        (
            self.status_code(),
            Json(schema::Error {
                error: self.public_message(),
            }),
        )
            .into_response()
    }
}
