//! Error types for the feed core.

use signalgrid_types::ValidationError;

/// Errors surfaced by the feed's mutation operations.
///
/// Mutations otherwise succeed silently or degrade to a no-op; nothing
/// here ever unwinds into a caller.
#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    /// An incident draft failed field validation.
    #[error("invalid incident: {source}")]
    Validation {
        /// The underlying validation error, naming the rejected field.
        #[from]
        source: ValidationError,
    },
}
