//! Mapping of sqlx errors into [`AppError`].

use zenith_core::error::{AppError, ErrorKind};

/// PostgreSQL SQLSTATE for `unique_violation`.
const UNIQUE_VIOLATION: &str = "23505";

/// Build a mapper that turns a sqlx error into an [`AppError`].
///
/// Unique-constraint violations become [`ErrorKind::Conflict`] so callers
/// can tell a duplicate apart from a failed query. Everything else is a
/// [`ErrorKind::Database`] error carrying `context` as its message.
pub fn map_db_error(context: &'static str) -> impl FnOnce(sqlx::Error) -> AppError {
    move |err| {
        if is_unique_violation(&err) {
            return AppError::with_source(ErrorKind::Conflict, "Duplicate entry", err);
        }
        AppError::with_source(ErrorKind::Database, context, err)
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db) => db.code().as_deref() == Some(UNIQUE_VIOLATION),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_database_errors_map_to_database_kind() {
        let err = map_db_error("Failed to find file")(sqlx::Error::RowNotFound);
        assert_eq!(err.kind, ErrorKind::Database);
        assert_eq!(err.message, "Failed to find file");
    }
}
