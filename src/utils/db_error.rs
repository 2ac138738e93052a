//! Classification of PostgreSQL errors.

/// Primary key constraint of the `links` table.
const LINKS_PKEY: &str = "links_pkey";

/// Returns `true` if `e` is a uniqueness violation on the link code.
///
/// Used to turn a lost insert race into [`crate::domain::repositories::InsertOutcome::Conflict`]
/// instead of a storage failure.
pub fn is_unique_violation_on_code(e: &sqlx::Error) -> bool {
    let Some(db_err) = e.as_database_error() else {
        return false;
    };

    if !db_err.is_unique_violation() {
        return false;
    }

    matches!(db_err.constraint(), Some(LINKS_PKEY) | None)
}
