//! Error types for municlim-io.

use std::path::PathBuf;

/// Error type for all fallible operations in the municlim-io crate.
///
/// Covers filesystem failures, format-specific errors from the GeoJSON,
/// TIFF, and CSV layers, attribute/tag lookup problems, and the raster
/// catalog's configuration checks.
#[derive(Debug, thiserror::Error)]
pub enum IoError {
    /// Returned when a required file or directory does not exist on disk.
    #[error("file not found: {}", path.display())]
    FileNotFound {
        /// Path that could not be found.
        path: PathBuf,
    },

    /// Wraps a raw filesystem error.
    #[error("i/o error: {reason}")]
    Io {
        /// Description of the underlying failure.
        reason: String,
    },

    /// Wraps an error from the GeoJSON parser or converter.
    #[error("geojson error: {reason}")]
    Geojson {
        /// Description of the underlying GeoJSON failure.
        reason: String,
    },

    /// Wraps an error from the TIFF library.
    #[error("tiff error: {reason}")]
    Tiff {
        /// Description of the underlying TIFF failure.
        reason: String,
    },

    /// Wraps an error from the CSV library.
    #[error("csv error: {reason}")]
    Csv {
        /// Description of the underlying CSV failure.
        reason: String,
    },

    /// Returned when a boundary feature lacks a required attribute.
    #[error("feature {feature} has no usable '{name}' attribute")]
    MissingField {
        /// Attribute name that was looked up.
        name: String,
        /// Zero-based index of the feature in the collection.
        feature: usize,
    },

    /// Returned when a boundary feature's geometry is not polygonal.
    #[error("feature {feature} has unsupported geometry: {kind}")]
    UnsupportedGeometry {
        /// Geometry kind that was encountered.
        kind: String,
        /// Zero-based index of the feature in the collection.
        feature: usize,
    },

    /// Returned when a GeoTIFF lacks a required georeferencing tag.
    #[error("missing tag {name} in {}", path.display())]
    MissingTag {
        /// Tag name.
        name: String,
        /// Path to the file that was inspected.
        path: PathBuf,
    },

    /// Returned when a TIFF's sample format cannot be read as a band.
    #[error("unsupported pixel format in {}", path.display())]
    UnsupportedPixelFormat {
        /// Path to the file that was inspected.
        path: PathBuf,
    },

    /// Returned when a raster directory contains no raster files.
    #[error("no rasters found in {}", dir.display())]
    NoRasters {
        /// Directory that was scanned.
        dir: PathBuf,
    },

    /// Returned when full-year aggregation is requested but the catalog
    /// does not hold exactly one raster per month.
    #[error("expected {expected} rasters (one per month), found {got}; use a month filter to test a single slice")]
    RasterCountMismatch {
        /// Rasters required for a full year.
        expected: usize,
        /// Rasters actually found.
        got: usize,
    },

    /// Returned when no raster matches a requested month.
    #[error("no raster found for month {month:02}")]
    MonthNotFound {
        /// Requested calendar month (1-12).
        month: u8,
    },
}

impl From<std::io::Error> for IoError {
    fn from(e: std::io::Error) -> Self {
        IoError::Io {
            reason: e.to_string(),
        }
    }
}

impl From<geojson::Error> for IoError {
    fn from(e: geojson::Error) -> Self {
        IoError::Geojson {
            reason: e.to_string(),
        }
    }
}

impl From<tiff::TiffError> for IoError {
    fn from(e: tiff::TiffError) -> Self {
        IoError::Tiff {
            reason: e.to_string(),
        }
    }
}

impl From<csv::Error> for IoError {
    fn from(e: csv::Error) -> Self {
        IoError::Csv {
            reason: e.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_file_not_found() {
        let err = IoError::FileNotFound {
            path: PathBuf::from("/tmp/missing.geojson"),
        };
        assert_eq!(err.to_string(), "file not found: /tmp/missing.geojson");
    }

    #[test]
    fn display_missing_field() {
        let err = IoError::MissingField {
            name: "CD_MUN".to_string(),
            feature: 7,
        };
        assert_eq!(err.to_string(), "feature 7 has no usable 'CD_MUN' attribute");
    }

    #[test]
    fn display_raster_count_mismatch() {
        let err = IoError::RasterCountMismatch {
            expected: 12,
            got: 3,
        };
        assert_eq!(
            err.to_string(),
            "expected 12 rasters (one per month), found 3; use a month filter to test a single slice"
        );
    }

    #[test]
    fn display_month_not_found() {
        let err = IoError::MonthNotFound { month: 7 };
        assert_eq!(err.to_string(), "no raster found for month 07");
    }

    #[test]
    fn from_csv_error() {
        let inner = csv::Error::from(std::io::Error::other("broken pipe"));
        let err: IoError = inner.into();
        assert!(matches!(err, IoError::Csv { .. }));
    }

    #[test]
    fn error_is_send_sync_and_std_error() {
        fn assert_bounds<T: Send + Sync + std::error::Error>() {}
        assert_bounds::<IoError>();
    }
}
