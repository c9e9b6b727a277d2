//! # municlim-geom
//!
//! Boundary polygon preparation: validity repair for administrative
//! polygons and dissolution of a polygon collection into a single area-of-
//! interest mask. Geometry comes in and goes out as
//! [`geo::MultiPolygon<f64>`]; no file I/O happens here.

mod dissolve;
mod error;
mod repair;

pub use dissolve::dissolve;
pub use error::GeomError;
pub use repair::{RepairReport, repair};
