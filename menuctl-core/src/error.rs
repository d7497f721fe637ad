/// Structured error types for menuctl-core.
///
/// Uses `thiserror` so the binary crate can wrap these in `anyhow` context
/// chains while library consumers still match on variants.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for menuctl-core operations
#[derive(Error, Debug)]
pub enum MenuError {
    /// Catalog file could not be read
    #[error("Failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Catalog file does not exist
    #[error("Catalog not found: {path:?}")]
    CatalogNotFound { path: PathBuf },

    /// Catalog document could not be parsed in its declared format
    #[error("Failed to parse {format} catalog {path:?}: {reason}")]
    Parse {
        path: PathBuf,
        format: &'static str,
        reason: String,
    },

    /// Catalog parsed but violates an item invariant
    #[error("Invalid catalog entry '{category} / {item}': {reason}")]
    InvalidCatalog {
        category: String,
        item: String,
        reason: String,
    },

    /// Configuration error
    #[error("Configuration error: {reason}")]
    Config { reason: String },
}

/// Result type alias for menuctl-core operations
pub type Result<T> = std::result::Result<T, MenuError>;

impl MenuError {
    /// Create an I/O error tied to a path
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a parse error
    pub fn parse(path: impl Into<PathBuf>, format: &'static str, reason: impl ToString) -> Self {
        Self::Parse {
            path: path.into(),
            format,
            reason: reason.to_string(),
        }
    }

    /// Create an invalid catalog entry error
    pub fn invalid_catalog(
        category: impl Into<String>,
        item: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidCatalog {
            category: category.into(),
            item: item.into(),
            reason: reason.into(),
        }
    }

    /// Create a config error
    pub fn config(reason: impl Into<String>) -> Self {
        Self::Config {
            reason: reason.into(),
        }
    }
}
