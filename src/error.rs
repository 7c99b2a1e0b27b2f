//! Error types used by the broadcaster and its endpoint registry.
//!
//! This module defines a single error enum, [`CastError`], covering the three
//! failure classes of the crate:
//!
//! - [`CastError::NotFound`] — recoverable, returned from `unregister`.
//! - [`CastError::InvalidEndpointKind`] — programmer error; the dynamic
//!   broadcaster raises it by panicking at registration time.
//! - [`CastError::TypeMismatch`] — programmer error; the dynamic broadcaster
//!   raises it by panicking when a handle or value does not match the element
//!   type fixed at first registration.
//!
//! The type provides helper methods (`as_label`, `as_message`) for
//! logging/metrics.

use thiserror::Error;

/// # Errors produced by broadcaster operations.
///
/// Only [`CastError::NotFound`] is ever returned as a `Result`; the other
/// variants signal misuse and are raised as panics carrying the variant's
/// `Display` output, so a caller never observes them as recoverable values.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CastError {
    /// Unregister was called with a handle that is not currently registered.
    #[error("endpoint is not registered")]
    NotFound,

    /// Dynamic registration was called with a value that is not an endpoint handle.
    #[error("registered value is not an endpoint handle")]
    InvalidEndpointKind,

    /// A handle or published value does not match the element type fixed at
    /// first registration.
    #[error("element type mismatch: registry carries {expected}, got {actual}")]
    TypeMismatch {
        /// Element type established at first registration.
        expected: &'static str,
        /// Element type of the offending handle or value.
        actual: &'static str,
    },
}

impl CastError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use chancast::CastError;
    ///
    /// assert_eq!(CastError::NotFound.as_label(), "endpoint_not_found");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            CastError::NotFound => "endpoint_not_found",
            CastError::InvalidEndpointKind => "invalid_endpoint_kind",
            CastError::TypeMismatch { .. } => "element_type_mismatch",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            CastError::NotFound => "endpoint is not registered".to_string(),
            CastError::InvalidEndpointKind => {
                "registered value is not an endpoint handle".to_string()
            }
            CastError::TypeMismatch { expected, actual } => {
                format!("expected element type {expected}, got {actual}")
            }
        }
    }

    /// Indicates whether the error is a misuse signal raised via panic rather
    /// than returned to the caller.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, CastError::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_are_stable() {
        assert_eq!(CastError::NotFound.as_label(), "endpoint_not_found");
        assert_eq!(
            CastError::InvalidEndpointKind.as_label(),
            "invalid_endpoint_kind"
        );
        assert_eq!(
            CastError::TypeMismatch {
                expected: "bool",
                actual: "i32"
            }
            .as_label(),
            "element_type_mismatch"
        );
    }

    #[test]
    fn mismatch_message_names_both_types() {
        let err = CastError::TypeMismatch {
            expected: "bool",
            actual: "alloc::string::String",
        };
        let msg = err.as_message();
        assert!(msg.contains("bool"));
        assert!(msg.contains("String"));
    }

    #[test]
    fn only_not_found_is_recoverable() {
        assert!(!CastError::NotFound.is_fatal());
        assert!(CastError::InvalidEndpointKind.is_fatal());
        assert!(CastError::TypeMismatch {
            expected: "a",
            actual: "b"
        }
        .is_fatal());
    }
}
