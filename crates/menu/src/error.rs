//! Unified error handling for the menu page.
//!
//! Controllers return `Result<T, PageError>`; the page wiring catches,
//! logs, and degrades. No failure in this subsystem is fatal.

use thiserror::Error;

use crate::markup::MarkupError;
use crate::storage::StorageError;

/// Application-level error type for the menu page.
#[derive(Debug, Error)]
pub enum PageError {
    /// Cart persistence failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Product markup could not be adapted.
    #[error("Markup error: {0}")]
    Markup(#[from] MarkupError),

    /// Template rendering failed.
    #[error("Render error: {0}")]
    Render(#[from] askama::Error),
}

/// Result type alias for `PageError`.
pub type Result<T> = std::result::Result<T, PageError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_error_display() {
        let err = PageError::Markup(MarkupError::MissingName);
        assert_eq!(err.to_string(), "Markup error: product source has no name");
    }
}
