//! Monthly raster catalog built from filename conventions.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::IoError;

/// Calendar months in a year; a full annual run needs one raster each.
pub const MONTHS_PER_YEAR: usize = 12;

/// Lists the raster files in a directory, sorted by file name.
///
/// The monthly products this pipeline consumes carry the month number in
/// the file name (`tavg_01.tif` .. `tavg_12.tif`), so a lexicographic
/// sort yields calendar order.
///
/// # Errors
///
/// Fails when the directory is missing or holds no `.tif`/`.tiff` files.
pub fn list_rasters(dir: &Path) -> Result<Vec<PathBuf>, IoError> {
    if !dir.is_dir() {
        return Err(IoError::FileNotFound {
            path: dir.to_path_buf(),
        });
    }
    let mut rasters: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext.eq_ignore_ascii_case("tif") || ext.eq_ignore_ascii_case("tiff"))
        })
        .collect();
    if rasters.is_empty() {
        return Err(IoError::NoRasters {
            dir: dir.to_path_buf(),
        });
    }
    rasters.sort();
    debug!(dir = %dir.display(), count = rasters.len(), "listed raster catalog");
    Ok(rasters)
}

/// Checks that the catalog holds exactly one raster per calendar month.
pub fn ensure_full_year(rasters: &[PathBuf]) -> Result<(), IoError> {
    if rasters.len() != MONTHS_PER_YEAR {
        return Err(IoError::RasterCountMismatch {
            expected: MONTHS_PER_YEAR,
            got: rasters.len(),
        });
    }
    Ok(())
}

/// Picks the raster for one calendar month from the catalog.
///
/// Matches a `_MM` token in the file stem first, then falls back to the
/// positional slot when the sorted catalog holds at least `month` files.
pub fn pick_month(rasters: &[PathBuf], month: u8) -> Result<PathBuf, IoError> {
    let token = format!("_{month:02}");
    let by_name = rasters.iter().find(|path| {
        path.file_stem()
            .and_then(|stem| stem.to_str())
            .is_some_and(|stem| stem.to_ascii_lowercase().ends_with(&token))
    });
    if let Some(path) = by_name {
        return Ok(path.clone());
    }
    if usize::from(month) <= rasters.len() {
        return Ok(rasters[usize::from(month) - 1].clone());
    }
    Err(IoError::MonthNotFound { month })
}
