//! # municlim-raster
//!
//! In-memory representation of a single-band climate raster plus the two
//! raster-side pipeline steps: clipping to a vector mask and inferring the
//! numeric-to-Celsius unit scale from a band's value distribution. File
//! formats live in municlim-io; this crate only sees arrays, affine
//! transforms, and nodata sentinels.

mod clip;
mod error;
mod grid;
mod scale;

pub use clip::{MASK_FILL_NODATA, clip};
pub use error::RasterError;
pub use grid::{Crs, GridTransform, RasterGrid, SliceDiagnostics};
pub use scale::{SCALE_DETECT_THRESHOLD, ScaleFactor, detect_scale};
