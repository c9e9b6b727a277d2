//! Nan-tolerant aggregation of monthly values into an annual value.

use crate::error::ZonalError;

/// Per-polygon mean over all present monthly values.
///
/// `monthly` is indexed `[time slice][polygon]`. A polygon missing in some
/// months is averaged over the months it has; a polygon missing in every
/// month stays missing. A cloud-damaged month therefore degrades a
/// municipality's annual value instead of disqualifying it.
///
/// # Errors
///
/// Returns [`ZonalError::EmptyTable`] for zero slices and
/// [`ZonalError::RaggedTable`] when slices disagree on polygon count.
pub fn annual_means(monthly: &[Vec<Option<f64>>]) -> Result<Vec<Option<f64>>, ZonalError> {
    let Some(first) = monthly.first() else {
        return Err(ZonalError::EmptyTable);
    };
    let n_polygons = first.len();
    for (slice, row) in monthly.iter().enumerate() {
        if row.len() != n_polygons {
            return Err(ZonalError::RaggedTable {
                slice,
                expected: n_polygons,
                got: row.len(),
            });
        }
    }

    Ok((0..n_polygons)
        .map(|polygon| {
            let mut sum = 0.0f64;
            let mut count = 0usize;
            for row in monthly {
                if let Some(v) = row[polygon] {
                    sum += v;
                    count += 1;
                }
            }
            (count > 0).then(|| sum / count as f64)
        })
        .collect())
}
