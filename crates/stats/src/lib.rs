//! # municlim-stats
//!
//! Numeric helpers and summary-table computations for the municlim
//! pipeline. Operates on plain `f64` slices and on per-municipality
//! [`Record`]s that have already been filtered to non-missing values.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `numeric` | Means, spread, and quantiles on `f64` slices |
//! | `summary` | Rankings, group means, bin counts, IQR outliers |
//! | `error` | Error types |

mod error;
mod numeric;
mod summary;

pub use error::StatsError;
pub use numeric::{mean, median, quantile_type7, sd, variance};
pub use summary::{
    BinCount, BinSpec, Describe, GroupMean, OutlierFences, RankOrder, Record, bin_counts,
    describe, group_means, iqr_fences, iqr_outliers, top_k,
};
