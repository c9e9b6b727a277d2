//! # municlim-io
//!
//! Thin I/O collaborators for the municlim pipeline: GeoJSON boundary
//! layers in, GeoTIFF rasters in and out, flat CSV tables out, plus the
//! filename-convention catalog that maps rasters to calendar months.
//! Bridges external file formats into the pipeline's internal geometry,
//! grid, and record types; no aggregation logic lives here.

mod catalog;
mod error;
mod raster_read;
mod raster_write;
mod table;
mod vector;

pub use catalog::{MONTHS_PER_YEAR, ensure_full_year, list_rasters, pick_month};
pub use error::IoError;
pub use raster_read::read_geotiff;
pub use raster_write::write_geotiff;
pub use table::{
    AnnualRecord, read_annual_csv, write_annual_csv, write_bin_counts_csv, write_group_means_csv,
    write_ranking_csv,
};
pub use vector::{FieldNames, Municipality, read_mask, read_municipalities, read_polygons, write_mask};
