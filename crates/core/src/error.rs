//! Error kinds shared across the workspace.

/// Errors raised when an object is constructed with invalid arguments.
///
/// Construction fails outright; no partially-built object is produced.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Total step count must be strictly positive.
    #[error("total steps must be positive (got {0})")]
    NonPositiveTotal(i64),

    /// Bar block count must be strictly positive.
    #[error("block count must be positive (got {0})")]
    NonPositiveBlocks(i64),

    /// A label is required (it may be empty, but it must be supplied).
    #[error("label is required")]
    MissingLabel,
}

/// Errors raised by protocol violations at call time.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    /// Observers can only register before the first non-zero advance.
    #[error("observer registration window is closed (current step {0})")]
    RegistrationClosed(u64),

    /// Steps can never be negative.
    #[error("cannot advance by a negative step count ({0})")]
    NegativeAdvance(i64),

    /// The tracker has been closed; no further advances are accepted.
    #[error("tracker is closed")]
    Closed,
}
