use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("attempt not found")]
    NotFound,

    #[error("points_achieved and points_maximum must be sent together")]
    IncompletePoints,

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::NotFound => StatusCode::NOT_FOUND.into_response(),
            Self::IncompletePoints => {
                (StatusCode::UNPROCESSABLE_ENTITY, self.to_string()).into_response()
            }
            Self::Database(err) => {
                tracing::error!(%err, "attempt query failed");
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}
