//! Common error infrastructure for pot-core.
//!
//! Domain-specific errors (e.g. `StoreError`, `AggregateError`) live next to
//! the code that produces them. Each implements [`PotError`] so callers can
//! classify failures uniformly.

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: the caller may continue, usually by falling back to a default
/// - **Validation**: invalid input that should be rejected without retry
/// - **Internal**: unexpected state inconsistencies that require investigation
/// - **Fatal**: derived state cannot be computed, the pot is unusable until repaired
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Recoverable error - continue with a documented fallback.
    ///
    /// Examples: corrupt persisted store, unknown item during visual reconciliation
    Recoverable,

    /// Validation error - invalid request, should not be retried unchanged.
    ///
    /// Examples: removing a use from an empty pot, zero-use ingredient
    Validation,

    /// Internal error - unexpected state inconsistency.
    Internal,

    /// Fatal error - the combined effect cannot be computed.
    ///
    /// Examples: ingredient whose definition is unknown, missing required oracle
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates a bug or corrupted state.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all pot-core errors.
///
/// # Implementation Guidelines
///
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait PotError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// Default implementation uses the error type name.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

/// Error type for transitions that never fail.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("this error should never be constructed")]
pub enum NeverError {}

impl PotError for NeverError {
    fn severity(&self) -> ErrorSeverity {
        match *self {}
    }

    fn error_code(&self) -> &'static str {
        match *self {}
    }
}
