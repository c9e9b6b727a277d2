//! Unit-scale detection for raster bands.
//!
//! Some gridded temperature products store tenths of a degree in integer
//! bands to keep precision; others store degrees Celsius directly. The
//! heuristic: no real-world Celsius value exceeds 80, while any
//! tenths-of-degree encoding of real temperatures does.

use tracing::warn;

use crate::grid::RasterGrid;

/// Maximum plausible raw Celsius value; anything above it is taken to be
/// a tenths-of-degree encoding.
pub const SCALE_DETECT_THRESHOLD: f64 = 80.0;

/// Multiplier converting a raster's native values to degrees Celsius.
///
/// Both variants are consumed identically through [`ScaleFactor::factor`];
/// the distinction only records where the number came from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScaleFactor {
    /// Inferred from the band's value distribution.
    Detected(f64),
    /// Supplied by the operator, bypassing detection.
    Explicit(f64),
}

impl ScaleFactor {
    /// The multiplier itself.
    pub fn factor(&self) -> f64 {
        match self {
            ScaleFactor::Detected(f) | ScaleFactor::Explicit(f) => *f,
        }
    }
}

/// Infers the Celsius conversion factor from a slice's value distribution.
///
/// Scans valid cells (finite, not nodata) for the maximum value: above
/// [`SCALE_DETECT_THRESHOLD`] the band is assumed to hold tenths of a
/// degree (factor 0.1), otherwise plain Celsius (factor 1.0). A slice with
/// no valid cell at all defaults to 1.0 — a known heuristic limitation,
/// logged rather than failed.
pub fn detect_scale(grid: &RasterGrid) -> ScaleFactor {
    let mut max: Option<f64> = None;
    for &v in grid.data.iter() {
        if grid.is_valid_value(v) {
            let v = f64::from(v);
            max = Some(match max {
                Some(m) if m >= v => m,
                _ => v,
            });
        }
    }
    match max {
        None => {
            warn!("no valid cells in slice, defaulting scale to 1.0");
            ScaleFactor::Detected(1.0)
        }
        Some(m) if m > SCALE_DETECT_THRESHOLD => ScaleFactor::Detected(0.1),
        Some(_) => ScaleFactor::Detected(1.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{Crs, GridTransform};
    use approx::assert_relative_eq;
    use ndarray::array;

    fn grid_with(values: ndarray::Array2<f32>, nodata: Option<f32>) -> RasterGrid {
        RasterGrid::new(
            values,
            GridTransform::new(0.0, 2.0, 1.0, -1.0),
            Crs::WGS84,
            nodata,
        )
    }

    #[test]
    fn test_celsius_band_keeps_unit_scale() {
        let grid = grid_with(array![[12.0f32, 75.0], [-5.0, 30.0]], None);
        assert_eq!(detect_scale(&grid), ScaleFactor::Detected(1.0));
    }

    #[test]
    fn test_tenths_band_detected() {
        let grid = grid_with(array![[120.0f32, 95.0], [-50.0, 300.0]], None);
        assert_eq!(detect_scale(&grid), ScaleFactor::Detected(0.1));
    }

    #[test]
    fn test_nodata_excluded_from_max() {
        // The only value above the threshold is the nodata sentinel.
        let grid = grid_with(array![[12.0f32, 9999.0], [-5.0, 30.0]], Some(9999.0));
        assert_eq!(detect_scale(&grid), ScaleFactor::Detected(1.0));
    }

    #[test]
    fn test_all_invalid_defaults_to_one() {
        let grid = grid_with(array![[f32::NAN, -9999.0]], Some(-9999.0));
        assert_eq!(detect_scale(&grid), ScaleFactor::Detected(1.0));
    }

    #[test]
    fn test_detection_is_pure() {
        let grid = grid_with(array![[95.0f32]], None);
        assert_eq!(detect_scale(&grid), ScaleFactor::Detected(0.1));
        assert_eq!(detect_scale(&grid), detect_scale(&grid));
    }

    #[test]
    fn test_factor_ignores_provenance() {
        assert_relative_eq!(ScaleFactor::Detected(0.1).factor(), 0.1, epsilon = 1e-12);
        assert_relative_eq!(ScaleFactor::Explicit(0.1).factor(), 0.1, epsilon = 1e-12);
    }
}
