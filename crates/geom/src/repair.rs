//! Validity repair for boundary polygons.
//!
//! Administrative boundary layers routinely carry minor topology defects:
//! self-intersecting rings, wrong ring orientation, duplicate vertices.
//! The classic fix is a zero-distance buffer, which re-nodes the rings
//! without materially changing the polygon's extent. The equivalent here
//! is a boolean union with the empty multipolygon, which runs the same
//! re-noding sweep.

use geo::{BooleanOps, MultiPolygon, Validation};
use tracing::{debug, warn};

/// Outcome counts of a [`repair`] pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RepairReport {
    /// Polygons that were invalid and successfully re-noded.
    pub repaired: usize,
    /// Polygons still invalid after re-noding (e.g. zero-area degenerates).
    /// These are kept in the output, not dropped.
    pub still_invalid: usize,
}

/// Repairs invalid polygons in place of their slot in the collection.
///
/// Valid polygons pass through untouched. Invalid polygons are re-noded;
/// if re-noding still yields an invalid or empty geometry, the original
/// polygon is kept and counted in [`RepairReport::still_invalid`] so the
/// caller can surface it.
pub fn repair(polygons: Vec<MultiPolygon<f64>>) -> (Vec<MultiPolygon<f64>>, RepairReport) {
    let mut report = RepairReport::default();
    let repaired: Vec<MultiPolygon<f64>> = polygons
        .into_iter()
        .enumerate()
        .map(|(idx, poly)| {
            if poly.is_valid() {
                return poly;
            }
            let renoded = renode(&poly);
            if renoded.0.is_empty() || !renoded.is_valid() {
                warn!(polygon = idx, "polygon still invalid after repair");
                report.still_invalid += 1;
                poly
            } else {
                debug!(polygon = idx, "repaired invalid polygon");
                report.repaired += 1;
                renoded
            }
        })
        .collect();
    (repaired, report)
}

/// Zero-distance-buffer equivalent: union with the empty multipolygon.
fn renode(poly: &MultiPolygon<f64>) -> MultiPolygon<f64> {
    poly.union(&MultiPolygon::new(Vec::new()))
}
