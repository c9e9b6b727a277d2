//! Dissolution of a polygon collection into one area-of-interest mask.

use geo::{MultiPolygon, unary_union};
use tracing::info;

use crate::error::GeomError;

/// Unions all polygons into a single multipolygon covering the overall
/// area of interest.
///
/// The output stays in the input's coordinate reference system; callers
/// working with GeoJSON boundaries already hold geographic WGS84
/// coordinates (EPSG:4326), the canonical CRS for the mask.
///
/// # Errors
///
/// Returns [`GeomError::EmptyCollection`] for an empty input.
pub fn dissolve(polygons: &[MultiPolygon<f64>]) -> Result<MultiPolygon<f64>, GeomError> {
    if polygons.is_empty() {
        return Err(GeomError::EmptyCollection {
            operation: "dissolve".to_string(),
        });
    }
    let unioned = unary_union(polygons.iter());
    info!(
        input_polygons = polygons.len(),
        output_parts = unioned.0.len(),
        "dissolved polygon collection"
    );
    Ok(unioned)
}
