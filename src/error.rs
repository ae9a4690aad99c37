use thiserror::Error;

use crate::validate::ValidationError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database access attempt failed. Please contact the system administrator.")]
    Access(#[source] sqlx::Error),

    #[error("Database update failed. Please contact the system administrator.")]
    Update(#[source] sqlx::Error),

    #[error("Error: {0}")]
    Invalid(#[from] ValidationError),

    #[error("Error: {0}")]
    NotFound(String),

    #[error("Error: {0}")]
    Duplicate(String),

    #[error("Console input failed: {0}")]
    Input(#[from] dialoguer::Error),
}

impl AppError {
    /// Classify a failed write. A unique-key violation means another session
    /// inserted the same row between our existence check and the insert.
    pub fn update(err: sqlx::Error, duplicate: &str) -> Self {
        match &err {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                AppError::Duplicate(duplicate.to_string())
            }
            _ => AppError::Update(err),
        }
    }

    /// Only a dead console ends a menu loop; everything else returns to the menu.
    pub fn is_fatal(&self) -> bool {
        matches!(self, AppError::Input(_))
    }

    pub fn log(&self) {
        match self {
            AppError::Access(e) | AppError::Update(e) => tracing::error!(error = %e, "{}", self),
            AppError::Input(e) => tracing::error!(error = %e, "console closed"),
            _ => tracing::debug!("rejected: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_unique_write_failure_is_an_update_error() {
        let err = AppError::update(sqlx::Error::Protocol("lost".into()), "This route already exists.");
        assert!(matches!(err, AppError::Update(_)));
        assert_eq!(
            err.to_string(),
            "Database update failed. Please contact the system administrator."
        );
    }

    #[test]
    fn unique_violation_on_write_is_a_duplicate() {
        let err = AppError::update(
            crate::test::unique_violation(),
            "This route already exists. Returning to main menu.",
        );
        assert!(matches!(err, AppError::Duplicate(_)));
        assert_eq!(
            err.to_string(),
            "Error: This route already exists. Returning to main menu."
        );
        assert!(!err.is_fatal());
    }

    #[test]
    fn validation_messages_are_prefixed() {
        let err = AppError::from(ValidationError::AirportCode);
        assert_eq!(
            err.to_string(),
            "Error: Airport ID must be 3 characters. Please try again."
        );
        assert!(!err.is_fatal());
    }
}
