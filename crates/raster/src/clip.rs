//! Raster clipping against a vector mask.

use geo::{BoundingRect, Contains, MultiPolygon, Point};
use ndarray::s;
use tracing::debug;

use crate::error::RasterError;
use crate::grid::{Crs, RasterGrid};

/// Sentinel written to masked-out cells when the source raster defines no
/// nodata value of its own.
pub const MASK_FILL_NODATA: f32 = -9999.0;

/// Crops a raster to the minimal sub-grid covering the mask's extent and
/// blanks every cell whose center falls outside the mask.
///
/// The output grid always carries a nodata sentinel: the source raster's
/// own if it has one, [`MASK_FILL_NODATA`] otherwise.
///
/// # Errors
///
/// - [`RasterError::CrsMismatch`] when the mask is not in the raster's
///   CRS (the caller must reproject first).
/// - [`RasterError::EmptyMask`] when the mask has no geometry.
/// - [`RasterError::NoOverlap`] when mask and raster extents are disjoint.
pub fn clip(
    grid: &RasterGrid,
    mask: &MultiPolygon<f64>,
    mask_crs: Crs,
) -> Result<RasterGrid, RasterError> {
    if grid.crs != mask_crs {
        return Err(RasterError::CrsMismatch {
            raster: grid.crs,
            mask: mask_crs,
        });
    }
    let rect = mask.bounding_rect().ok_or(RasterError::EmptyMask)?;

    // Fractional window of the mask extent, robust to y-axis orientation.
    let (r_a, c_a) = grid.transform.locate(rect.min().x, rect.min().y);
    let (r_b, c_b) = grid.transform.locate(rect.max().x, rect.max().y);
    let (row_lo, row_hi) = (r_a.min(r_b), r_a.max(r_b));
    let (col_lo, col_hi) = (c_a.min(c_b), c_a.max(c_b));

    let height = grid.height() as f64;
    let width = grid.width() as f64;
    if row_hi <= 0.0 || col_hi <= 0.0 || row_lo >= height || col_lo >= width {
        return Err(RasterError::NoOverlap {
            details: format!(
                "mask extent ({:.6}, {:.6})..({:.6}, {:.6}) outside raster of {}x{} cells",
                rect.min().x,
                rect.min().y,
                rect.max().x,
                rect.max().y,
                grid.height(),
                grid.width()
            ),
        });
    }

    let r0 = row_lo.floor().max(0.0) as usize;
    let r1 = (row_hi.ceil().min(height) as usize).max(r0 + 1);
    let c0 = col_lo.floor().max(0.0) as usize;
    let c1 = (col_hi.ceil().min(width) as usize).max(c0 + 1);

    let mut data = grid.data.slice(s![r0..r1, c0..c1]).to_owned();
    let transform = grid.transform.shifted(r0, c0);
    let fill = grid.nodata.unwrap_or(MASK_FILL_NODATA);

    for ((row, col), value) in data.indexed_iter_mut() {
        let (x, y) = transform.cell_center(row, col);
        if !mask.contains(&Point::new(x, y)) {
            *value = fill;
        }
    }

    debug!(
        rows = r1 - r0,
        cols = c1 - c0,
        fill_nodata = fill,
        "clipped raster to mask window"
    );

    Ok(RasterGrid::new(data, transform, grid.crs, Some(fill)))
}
