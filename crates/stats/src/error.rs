//! Error types for municlim-stats.

/// Error type for all fallible operations in the municlim-stats crate.
#[derive(Debug, thiserror::Error)]
pub enum StatsError {
    /// Returned when a bin specification is internally inconsistent.
    #[error("invalid bin specification: {details}")]
    InvalidBins {
        /// Human-readable description of the defect.
        details: String,
    },
}
