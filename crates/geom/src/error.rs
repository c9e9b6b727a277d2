//! Error types for municlim-geom.

/// Error type for all fallible operations in the municlim-geom crate.
#[derive(Debug, thiserror::Error)]
pub enum GeomError {
    /// Returned when an operation needs at least one polygon.
    #[error("empty polygon collection: {operation} needs at least one polygon")]
    EmptyCollection {
        /// Name of the operation that was attempted.
        operation: String,
    },
}
