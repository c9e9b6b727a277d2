//! # municlim-zonal
//!
//! The aggregation heart of the pipeline: nodata-aware zonal means of one
//! raster slice per boundary polygon, physical plausibility filtering of
//! the scaled results, and the nan-tolerant combination of monthly values
//! into one annual value per polygon.
//!
//! Missing is a first-class `None` everywhere in this crate — a polygon
//! with no usable cells is `None`, never zero.

mod aggregate;
mod error;
mod plausibility;
mod temporal;

pub use aggregate::{zonal_mean, zonal_means};
pub use error::ZonalError;
pub use plausibility::PlausibilityBounds;
pub use temporal::annual_means;
