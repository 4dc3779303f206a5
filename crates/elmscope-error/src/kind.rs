//! Error kinds for elmscope operations

use strum_macros::{Display, IntoStaticStr};

/// The kind of error that occurred.
///
/// Callers match on the kind to decide how to react, e.g. the CLI skips a
/// tree file that fails with `ParseFailed` but aborts on `ConfigInvalid`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoStaticStr, Display)]
#[non_exhaustive]
pub enum ErrorKind {
    // =========================================================================
    // General errors
    // =========================================================================
    /// Catch-all for unhandled cases
    Unexpected,

    /// The requested operation is not supported for this input
    Unsupported,

    /// Invalid configuration file or value
    ConfigInvalid,

    /// Invalid argument passed to a function or command
    InvalidArgument,

    // =========================================================================
    // Tree provider errors
    // =========================================================================
    /// Tree notation could not be parsed
    ParseFailed,

    /// Well-formed input describing an impossible tree (unknown kind, bad span)
    InvalidFormat,

    /// Deserialization of a tree dump or report failed
    DeserializationFailed,

    /// Serialization of a tree or result failed
    SerializationFailed,

    // =========================================================================
    // Symbol errors
    // =========================================================================
    /// No declaration at the requested location
    SymbolNotFound,

    /// A replacement name is not a valid identifier of the required case
    InvalidIdentifier,

    // =========================================================================
    // File/IO errors
    // =========================================================================
    FileNotFound,

    PermissionDenied,

    /// IO operation failed
    IoFailed,

    /// Directory traversal failed
    TraversalFailed,

    // =========================================================================
    // External tool errors
    // =========================================================================
    /// The compiler executable could not be found or started
    ToolNotFound,

    /// The compiler ran but exited with an unexpected status
    ToolFailed,

    Timeout,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        (*self).into()
    }

    /// Check if this error kind is retryable by default
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ErrorKind::Timeout | ErrorKind::IoFailed | ErrorKind::ToolFailed
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kind_display() {
        assert_eq!(ErrorKind::ParseFailed.to_string(), "ParseFailed");
        assert_eq!(ErrorKind::InvalidIdentifier.as_str(), "InvalidIdentifier");
    }

    #[test]
    fn test_is_retryable() {
        assert!(ErrorKind::Timeout.is_retryable());
        assert!(ErrorKind::ToolFailed.is_retryable());
        assert!(!ErrorKind::ParseFailed.is_retryable());
        assert!(!ErrorKind::ConfigInvalid.is_retryable());
    }
}
