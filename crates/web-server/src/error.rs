use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use database::DbError;
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Database error: {0}")]
    Database(#[from] DbError),
}

/// Converts our custom `ApiError` into an HTTP response.
///
/// This is the single response-writing boundary: every failure a handler
/// propagates ends up here and terminates in exactly one `{"msg": …}`
/// response. Handlers never pick status codes themselves.
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let ApiError::Database(db_err) = self;
        let (status, msg) = match db_err {
            DbError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.to_string()),
            DbError::NotFound(msg) | DbError::ReferentialViolation(msg) => {
                (StatusCode::NOT_FOUND, msg.to_string())
            }
            other => {
                tracing::error!(error = ?other, "Unclassified failure while handling request.");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error".to_string(),
                )
            }
        };

        let body = Json(json!({ "msg": msg }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: DbError) -> StatusCode {
        ApiError::Database(err).into_response().status()
    }

    #[test]
    fn validation_failures_map_to_400() {
        assert_eq!(
            status_of(DbError::Validation("Invalid input")),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn missing_entities_map_to_404() {
        assert_eq!(
            status_of(DbError::NotFound("Article doesn't exist!")),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(DbError::ReferentialViolation("Username doesn't exist!")),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn everything_else_maps_to_500() {
        assert_eq!(
            status_of(DbError::Unclassified(sqlx::Error::PoolTimedOut)),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            status_of(DbError::ConnectionConfig("DATABASE_URL must be set.".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
