//! Raster grid, affine transform, and per-slice diagnostics.

use ndarray::Array2;

/// Coordinate reference system as an EPSG code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Crs(pub u32);

impl Crs {
    /// Geographic longitude/latitude on WGS84, the canonical CRS for
    /// boundary masks.
    pub const WGS84: Crs = Crs(4326);
}

impl std::fmt::Display for Crs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "EPSG:{}", self.0)
    }
}

/// Affine mapping from grid indices to CRS coordinates.
///
/// `(x_origin, y_origin)` is the outer corner of cell `(0, 0)`; `x_res` is
/// the cell width and `y_res` the signed cell height (negative for the
/// usual north-up rasters, where row indices grow southward).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridTransform {
    pub x_origin: f64,
    pub y_origin: f64,
    pub x_res: f64,
    pub y_res: f64,
}

impl GridTransform {
    pub fn new(x_origin: f64, y_origin: f64, x_res: f64, y_res: f64) -> Self {
        Self {
            x_origin,
            y_origin,
            x_res,
            y_res,
        }
    }

    /// CRS coordinates of the center of cell `(row, col)`.
    pub fn cell_center(&self, row: usize, col: usize) -> (f64, f64) {
        (
            self.x_origin + (col as f64 + 0.5) * self.x_res,
            self.y_origin + (row as f64 + 0.5) * self.y_res,
        )
    }

    /// Fractional `(row, col)` grid position of a CRS coordinate.
    pub fn locate(&self, x: f64, y: f64) -> (f64, f64) {
        (
            (y - self.y_origin) / self.y_res,
            (x - self.x_origin) / self.x_res,
        )
    }

    /// Transform of the sub-grid starting at cell `(row, col)`.
    pub fn shifted(&self, row: usize, col: usize) -> Self {
        Self {
            x_origin: self.x_origin + col as f64 * self.x_res,
            y_origin: self.y_origin + row as f64 * self.y_res,
            x_res: self.x_res,
            y_res: self.y_res,
        }
    }
}

/// A single-band raster: cell values, affine transform, CRS, and an
/// optional nodata sentinel. One grid exists per monthly time slice.
#[derive(Debug, Clone, PartialEq)]
pub struct RasterGrid {
    pub data: Array2<f32>,
    pub transform: GridTransform,
    pub crs: Crs,
    pub nodata: Option<f32>,
}

impl RasterGrid {
    pub fn new(
        data: Array2<f32>,
        transform: GridTransform,
        crs: Crs,
        nodata: Option<f32>,
    ) -> Self {
        Self {
            data,
            transform,
            crs,
            nodata,
        }
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.data.nrows()
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.data.ncols()
    }

    /// Whether a cell value is a real measurement: finite and not equal to
    /// the nodata sentinel.
    pub fn is_valid_value(&self, value: f32) -> bool {
        if !value.is_finite() {
            return false;
        }
        match self.nodata {
            Some(nd) => value != nd,
            None => true,
        }
    }

    /// Counts and value range of valid cells, for `--debug` output.
    pub fn diagnostics(&self) -> SliceDiagnostics {
        let mut valid = 0usize;
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for &v in self.data.iter() {
            if self.is_valid_value(v) {
                valid += 1;
                let v = f64::from(v);
                if v < min {
                    min = v;
                }
                if v > max {
                    max = v;
                }
            }
        }
        SliceDiagnostics {
            valid,
            total: self.data.len(),
            min: (valid > 0).then_some(min),
            max: (valid > 0).then_some(max),
        }
    }
}

/// Valid-cell counts and value range of one raster slice.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliceDiagnostics {
    /// Cells that are finite and not nodata.
    pub valid: usize,
    /// All cells in the slice.
    pub total: usize,
    /// Minimum valid value, if any cell is valid.
    pub min: Option<f64>,
    /// Maximum valid value, if any cell is valid.
    pub max: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    fn north_up() -> GridTransform {
        GridTransform::new(10.0, 20.0, 0.5, -0.5)
    }

    #[test]
    fn test_cell_center() {
        let t = north_up();
        let (x, y) = t.cell_center(0, 0);
        assert_relative_eq!(x, 10.25, epsilon = 1e-12);
        assert_relative_eq!(y, 19.75, epsilon = 1e-12);
        let (x, y) = t.cell_center(3, 2);
        assert_relative_eq!(x, 11.25, epsilon = 1e-12);
        assert_relative_eq!(y, 18.25, epsilon = 1e-12);
    }

    #[test]
    fn test_locate_roundtrip() {
        let t = north_up();
        let (x, y) = t.cell_center(7, 4);
        let (row, col) = t.locate(x, y);
        assert_relative_eq!(row, 7.5, epsilon = 1e-12);
        assert_relative_eq!(col, 4.5, epsilon = 1e-12);
    }

    #[test]
    fn test_shifted_transform() {
        let t = north_up().shifted(2, 3);
        assert_relative_eq!(t.x_origin, 11.5, epsilon = 1e-12);
        assert_relative_eq!(t.y_origin, 19.0, epsilon = 1e-12);
        assert_relative_eq!(t.x_res, 0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_is_valid_value() {
        let grid = RasterGrid::new(
            array![[1.0f32, -9999.0], [f32::NAN, 4.0]],
            north_up(),
            Crs::WGS84,
            Some(-9999.0),
        );
        assert!(grid.is_valid_value(1.0));
        assert!(!grid.is_valid_value(-9999.0));
        assert!(!grid.is_valid_value(f32::NAN));
        assert!(!grid.is_valid_value(f32::INFINITY));
    }

    #[test]
    fn test_valid_without_nodata() {
        let grid = RasterGrid::new(array![[1.0f32]], north_up(), Crs::WGS84, None);
        assert!(grid.is_valid_value(-9999.0));
        assert!(!grid.is_valid_value(f32::NAN));
    }

    #[test]
    fn test_diagnostics() {
        let grid = RasterGrid::new(
            array![[10.0f32, -9999.0], [f32::NAN, 30.0]],
            north_up(),
            Crs::WGS84,
            Some(-9999.0),
        );
        let d = grid.diagnostics();
        assert_eq!(d.valid, 2);
        assert_eq!(d.total, 4);
        assert_relative_eq!(d.min.unwrap(), 10.0, epsilon = 1e-12);
        assert_relative_eq!(d.max.unwrap(), 30.0, epsilon = 1e-12);
    }

    #[test]
    fn test_diagnostics_all_nodata() {
        let grid = RasterGrid::new(
            array![[-9999.0f32, -9999.0]],
            north_up(),
            Crs::WGS84,
            Some(-9999.0),
        );
        let d = grid.diagnostics();
        assert_eq!(d.valid, 0);
        assert!(d.min.is_none());
        assert!(d.max.is_none());
    }

    #[test]
    fn test_crs_display() {
        assert_eq!(Crs::WGS84.to_string(), "EPSG:4326");
    }
}
