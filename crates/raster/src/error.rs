//! Error types for municlim-raster.

use crate::grid::Crs;

/// Error type for all fallible operations in the municlim-raster crate.
#[derive(Debug, thiserror::Error)]
pub enum RasterError {
    /// Returned when a mask and a raster use different reference systems.
    /// Reprojection is an external capability; this crate only verifies.
    #[error("CRS mismatch: raster is {raster}, mask is {mask}")]
    CrsMismatch {
        /// CRS of the raster being clipped or sampled.
        raster: Crs,
        /// CRS of the vector mask.
        mask: Crs,
    },

    /// Returned when a mask and a raster extent share no area at all.
    #[error("no overlap between mask and raster extent: {details}")]
    NoOverlap {
        /// Human-readable description of the two extents.
        details: String,
    },

    /// Returned when the clip mask contains no geometry.
    #[error("clip mask is empty")]
    EmptyMask,
}
