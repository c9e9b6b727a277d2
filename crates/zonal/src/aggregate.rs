//! Nodata-aware zonal means over one raster time slice.

use geo::{BoundingRect, Contains, MultiPolygon, Point};
use municlim_raster::RasterGrid;
use rayon::prelude::*;
use tracing::trace;

/// Mean of all valid raster cells whose center lies inside one polygon.
///
/// Cells equal to the nodata sentinel or non-finite are excluded. A
/// polygon covering no valid cell yields `None` — missing, not zero.
pub fn zonal_mean(polygon: &MultiPolygon<f64>, grid: &RasterGrid) -> Option<f64> {
    let rect = polygon.bounding_rect()?;

    let (r_a, c_a) = grid.transform.locate(rect.min().x, rect.min().y);
    let (r_b, c_b) = grid.transform.locate(rect.max().x, rect.max().y);
    let (row_lo, row_hi) = (r_a.min(r_b), r_a.max(r_b));
    let (col_lo, col_hi) = (c_a.min(c_b), c_a.max(c_b));

    let height = grid.height() as f64;
    let width = grid.width() as f64;
    if row_hi <= 0.0 || col_hi <= 0.0 || row_lo >= height || col_lo >= width {
        return None;
    }
    let r0 = row_lo.floor().max(0.0) as usize;
    let r1 = row_hi.ceil().min(height) as usize;
    let c0 = col_lo.floor().max(0.0) as usize;
    let c1 = col_hi.ceil().min(width) as usize;

    let mut sum = 0.0f64;
    let mut count = 0usize;
    for row in r0..r1 {
        for col in c0..c1 {
            let value = grid.data[[row, col]];
            if !grid.is_valid_value(value) {
                continue;
            }
            let (x, y) = grid.transform.cell_center(row, col);
            if polygon.contains(&Point::new(x, y)) {
                sum += f64::from(value);
                count += 1;
            }
        }
    }
    trace!(cells = count, "zonal mean cell count");
    (count > 0).then(|| sum / count as f64)
}

/// Zonal means for every polygon against one time slice.
///
/// Output order matches input polygon order; the caller zips it
/// positionally with polygon identity attributes. Polygons are
/// independent, so the work runs on the rayon pool.
pub fn zonal_means(polygons: &[MultiPolygon<f64>], grid: &RasterGrid) -> Vec<Option<f64>> {
    polygons
        .par_iter()
        .map(|polygon| zonal_mean(polygon, grid))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use geo::polygon;
    use municlim_raster::{Crs, GridTransform};
    use ndarray::array;

    /// 2x2 grid over (0,0)..(2,2): values 10, 12 (top row), 14, 16.
    fn quad_grid(nodata: Option<f32>) -> RasterGrid {
        RasterGrid::new(
            array![[10.0f32, 12.0], [14.0, 16.0]],
            GridTransform::new(0.0, 2.0, 1.0, -1.0),
            Crs::WGS84,
            nodata,
        )
    }

    fn square(x0: f64, y0: f64, x1: f64, y1: f64) -> MultiPolygon<f64> {
        MultiPolygon::new(vec![polygon![
            (x: x0, y: y0),
            (x: x1, y: y0),
            (x: x1, y: y1),
            (x: x0, y: y1),
        ]])
    }

    #[test]
    fn test_mean_over_four_cells() {
        let grid = quad_grid(None);
        let mean = zonal_mean(&square(0.0, 0.0, 2.0, 2.0), &grid).unwrap();
        assert_relative_eq!(mean, 13.0, epsilon = 1e-10);
    }

    #[test]
    fn test_polygon_over_nodata_is_missing() {
        let grid = RasterGrid::new(
            array![[-9999.0f32, -9999.0], [-9999.0, -9999.0]],
            GridTransform::new(0.0, 2.0, 1.0, -1.0),
            Crs::WGS84,
            Some(-9999.0),
        );
        assert_eq!(zonal_mean(&square(0.0, 0.0, 2.0, 2.0), &grid), None);
    }

    #[test]
    fn test_partial_coverage_uses_covered_cells_only() {
        let grid = quad_grid(None);
        // Covers only the western column: centers (0.5, 0.5) and (0.5, 1.5).
        let mean = zonal_mean(&square(0.0, 0.0, 1.0, 2.0), &grid).unwrap();
        assert_relative_eq!(mean, 12.0, epsilon = 1e-10);
    }

    #[test]
    fn test_polygon_outside_grid_is_missing() {
        let grid = quad_grid(None);
        assert_eq!(zonal_mean(&square(10.0, 10.0, 12.0, 12.0), &grid), None);
    }

    #[test]
    fn test_polygon_between_cell_centers_is_missing() {
        let grid = quad_grid(None);
        // Small square containing no cell center.
        assert_eq!(zonal_mean(&square(0.9, 0.9, 1.1, 1.1), &grid), None);
    }

    #[test]
    fn test_nan_cells_excluded() {
        let grid = RasterGrid::new(
            array![[10.0f32, f32::NAN], [14.0, f32::NAN]],
            GridTransform::new(0.0, 2.0, 1.0, -1.0),
            Crs::WGS84,
            None,
        );
        let mean = zonal_mean(&square(0.0, 0.0, 2.0, 2.0), &grid).unwrap();
        assert_relative_eq!(mean, 12.0, epsilon = 1e-10);
    }

    #[test]
    fn test_mean_bounded_by_slice_range() {
        let grid = quad_grid(None);
        let mean = zonal_mean(&square(0.0, 0.0, 2.0, 2.0), &grid).unwrap();
        assert!((10.0..=16.0).contains(&mean));
    }

    #[test]
    fn test_output_order_matches_input_order() {
        let grid = quad_grid(Some(-9999.0));
        let polygons = vec![
            square(0.0, 0.0, 2.0, 2.0),  // all four cells
            square(10.0, 10.0, 12.0, 12.0), // outside
            square(0.0, 0.0, 1.0, 2.0),  // western column
        ];
        let means = zonal_means(&polygons, &grid);
        assert_eq!(means.len(), 3);
        assert_relative_eq!(means[0].unwrap(), 13.0, epsilon = 1e-10);
        assert_eq!(means[1], None);
        assert_relative_eq!(means[2].unwrap(), 12.0, epsilon = 1e-10);
    }
}
