use thiserror::Error;

/// PostgreSQL SQLSTATE for a malformed text representation of a value,
/// e.g. a non-numeric string bound where an integer is expected.
const PG_INVALID_TEXT_REPRESENTATION: &str = "22P02";

/// PostgreSQL SQLSTATE for a foreign-key violation.
const PG_FOREIGN_KEY_VIOLATION: &str = "23503";

/// The failures a data-access operation can raise.
///
/// Every operation classifies its failure at the point of detection; the
/// web layer maps each variant onto exactly one HTTP response and never
/// re-interprets it.
#[derive(Error, Debug)]
pub enum DbError {
    #[error("Failed to load environment variables for database connection: {0}")]
    ConnectionConfig(String),

    #[error("Database migration failed: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// A malformed identifier or a missing required field. Maps to 400.
    #[error("{0}")]
    Validation(&'static str),

    /// A referenced entity is absent. Maps to 404.
    #[error("{0}")]
    NotFound(&'static str),

    /// A foreign-key violation reported by the store. Maps to 404.
    #[error("{0}")]
    ReferentialViolation(&'static str),

    /// Anything the taxonomy doesn't recognize. Maps to 500 and is logged
    /// at the response boundary.
    #[error("Unexpected database failure: {0}")]
    Unclassified(sqlx::Error),
}

/// Maps a raw SQLSTATE code onto a domain-level failure.
///
/// The only foreign key an insert can trip after the article-existence
/// check is the comment author, so 23503 carries the username message.
fn classify(code: &str) -> Option<DbError> {
    match code {
        PG_INVALID_TEXT_REPRESENTATION => Some(DbError::Validation("Invalid input")),
        PG_FOREIGN_KEY_VIOLATION => {
            Some(DbError::ReferentialViolation("Username doesn't exist!"))
        }
        _ => None,
    }
}

impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if let Some(classified) = db_err.code().as_deref().and_then(classify) {
                return classified;
            }
        }
        DbError::Unclassified(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_text_code_maps_to_invalid_input() {
        match classify("22P02") {
            Some(DbError::Validation(msg)) => assert_eq!(msg, "Invalid input"),
            other => panic!("unexpected classification: {other:?}"),
        }
    }

    #[test]
    fn foreign_key_code_maps_to_unknown_username() {
        match classify("23503") {
            Some(DbError::ReferentialViolation(msg)) => {
                assert_eq!(msg, "Username doesn't exist!")
            }
            other => panic!("unexpected classification: {other:?}"),
        }
    }

    #[test]
    fn unknown_codes_stay_unclassified() {
        assert!(classify("23505").is_none());
        assert!(classify("42P01").is_none());
    }

    #[test]
    fn non_database_errors_stay_unclassified() {
        let err: DbError = sqlx::Error::RowNotFound.into();
        assert!(matches!(err, DbError::Unclassified(_)));
    }
}
