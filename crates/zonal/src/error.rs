//! Error types for municlim-zonal.

/// Error type for all fallible operations in the municlim-zonal crate.
#[derive(Debug, thiserror::Error)]
pub enum ZonalError {
    /// Returned when temporal aggregation receives no time slices.
    #[error("monthly table is empty: at least one time slice is required")]
    EmptyTable,

    /// Returned when the monthly rows disagree on polygon count.
    #[error("monthly table is ragged: slice {slice} has {got} polygons, expected {expected}")]
    RaggedTable {
        /// Index of the offending time slice.
        slice: usize,
        /// Polygon count of the first slice.
        expected: usize,
        /// Polygon count of the offending slice.
        got: usize,
    },
}
