//! Error types for the wrapper generator.
//!
//! A single error hierarchy shared by every crate in the workspace,
//! with contextual fields on each variant.
//!
//! # Examples
//!
//! ```
//! use svcgen_core::{Error, Result};
//!
//! fn check_role(role: &str) -> Result<()> {
//!     if role.is_empty() {
//!         return Err(Error::InvalidArgument("role must not be empty".to_string()));
//!     }
//!     Ok(())
//! }
//!
//! let err = check_role("").unwrap_err();
//! assert!(err.is_invalid_argument());
//! ```

use thiserror::Error;

/// Main error type for the wrapper generator.
#[derive(Error, Debug)]
pub enum Error {
    /// Filesystem operation failed.
    ///
    /// Carries the path so per-file failures can be reported without
    /// losing track of which batch item they belong to.
    #[error("I/O error on {path}")]
    Io {
        /// Path of the file or directory the operation touched
        path: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Template registration or rendering failed.
    ///
    /// Should not occur with the built-in templates; surfaces broken
    /// custom templates or context mismatches.
    #[error("template error: {message}")]
    Template {
        /// Description of the template failure
        message: String,
    },

    /// Two sibling files share the same base identifier.
    ///
    /// Makes import rewriting ambiguous during migration, so the
    /// affected file is refused rather than rewritten.
    #[error("duplicate base identifier '{base}' among siblings in {dir}")]
    DuplicateSibling {
        /// The colliding base identifier
        base: String,
        /// Directory containing the collision
        dir: String,
    },

    /// Invalid CLI argument or domain value.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl Error {
    /// Builds an [`Error::Io`] from a path and an I/O error.
    pub fn io(path: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Returns `true` if this is an I/O error.
    #[must_use]
    pub const fn is_io(&self) -> bool {
        matches!(self, Self::Io { .. })
    }

    /// Returns `true` if this is a template error.
    #[must_use]
    pub const fn is_template(&self) -> bool {
        matches!(self, Self::Template { .. })
    }

    /// Returns `true` if this is a sibling base-identifier collision.
    #[must_use]
    pub const fn is_duplicate_sibling(&self) -> bool {
        matches!(self, Self::DuplicateSibling { .. })
    }

    /// Returns `true` if this is an invalid argument error.
    #[must_use]
    pub const fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }
}

/// Result type alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_detection() {
        let err = Error::io(
            "/tmp/missing.ts",
            std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        );
        assert!(err.is_io());
        assert!(!err.is_template());
    }

    #[test]
    fn test_template_error_detection() {
        let err = Error::Template {
            message: "unclosed tag".to_string(),
        };
        assert!(err.is_template());
        assert!(!err.is_io());
    }

    #[test]
    fn test_duplicate_sibling_detection() {
        let err = Error::DuplicateSibling {
            base: "gateway".to_string(),
            dir: "/src/types".to_string(),
        };
        assert!(err.is_duplicate_sibling());
        assert!(!err.is_invalid_argument());
    }

    #[test]
    fn test_error_display_includes_context() {
        let err = Error::io(
            "src/types/a.types.ts",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        let display = format!("{err}");
        assert!(display.contains("src/types/a.types.ts"));

        let err = Error::DuplicateSibling {
            base: "foo".to_string(),
            dir: "/d".to_string(),
        };
        assert!(format!("{err}").contains("'foo'"));
    }
}
