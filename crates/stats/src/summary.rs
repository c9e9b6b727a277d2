//! Summary tables over the per-municipality annual values.
//!
//! Every function here takes the already-filtered base table (rows with a
//! missing annual value are dropped upstream, not represented as zero) and
//! computes an independent view: nothing is shared or mutated between
//! tables, so they can be produced in any order.

use std::collections::BTreeMap;

use tracing::debug;

use crate::error::StatsError;
use crate::numeric::{mean, median, quantile_type7, sd};

/// One non-missing row of the annual table: identity attributes plus the
/// aggregated value in degrees Celsius.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// Numeric municipality code (kept as text to preserve leading zeros).
    pub code: String,
    /// Municipality name.
    pub name: String,
    /// State/region code.
    pub state: String,
    /// Annual mean temperature in degrees Celsius.
    pub value: f64,
}

/// Descriptive statistics block, mirroring pandas `describe()`.
#[derive(Debug, Clone, PartialEq)]
pub struct Describe {
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub q25: f64,
    pub median: f64,
    pub q75: f64,
    pub max: f64,
}

/// Computes the descriptive block over all record values.
///
/// Returns `None` for an empty table.
pub fn describe(records: &[Record]) -> Option<Describe> {
    if records.is_empty() {
        return None;
    }
    let mut sorted: Vec<f64> = records.iter().map(|r| r.value).collect();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let values: Vec<f64> = records.iter().map(|r| r.value).collect();
    Some(Describe {
        count: records.len(),
        mean: mean(&values),
        std: sd(&values),
        min: sorted[0],
        q25: quantile_type7(&sorted, 0.25),
        median: median(&sorted),
        q75: quantile_type7(&sorted, 0.75),
        max: sorted[sorted.len() - 1],
    })
}

/// Ranking direction for [`top_k`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankOrder {
    /// Hottest first.
    Descending,
    /// Coldest first.
    Ascending,
}

/// Top `k` records by value.
///
/// Uses a stable sort, so ties keep their original row order.
pub fn top_k(records: &[Record], k: usize, order: RankOrder) -> Vec<Record> {
    let mut ranked: Vec<Record> = records.to_vec();
    ranked.sort_by(|a, b| {
        let cmp = a
            .value
            .partial_cmp(&b.value)
            .unwrap_or(std::cmp::Ordering::Equal);
        match order {
            RankOrder::Descending => cmp.reverse(),
            RankOrder::Ascending => cmp,
        }
    });
    ranked.truncate(k);
    ranked
}

/// Arithmetic mean of values per state, sorted descending by mean.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupMean {
    /// State/region code.
    pub state: String,
    /// Mean annual temperature over the state's municipalities.
    pub mean_value: f64,
    /// Number of municipalities contributing to the mean.
    pub count: usize,
}

/// Groups records by state and computes the per-state mean.
///
/// Output is sorted descending by mean; states with equal means stay in
/// alphabetical order.
pub fn group_means(records: &[Record]) -> Vec<GroupMean> {
    let mut acc: BTreeMap<&str, (f64, usize)> = BTreeMap::new();
    for r in records {
        let entry = acc.entry(&r.state).or_insert((0.0, 0));
        entry.0 += r.value;
        entry.1 += 1;
    }
    let mut groups: Vec<GroupMean> = acc
        .into_iter()
        .map(|(state, (sum, count))| GroupMean {
            state: state.to_string(),
            mean_value: sum / count as f64,
            count,
        })
        .collect();
    groups.sort_by(|a, b| {
        b.mean_value
            .partial_cmp(&a.mean_value)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    debug!(states = groups.len(), "grouped records by state");
    groups
}

/// Ordered bin edges with one human-readable label per interval.
///
/// Intervals are half-open `(edges[i], edges[i+1]]`, except the lowest,
/// which also includes its left edge (pandas `cut` with `include_lowest`).
/// Values outside the overall edge range fall into no bin.
#[derive(Debug, Clone, PartialEq)]
pub struct BinSpec {
    /// Strictly increasing interval edges; one more edge than labels.
    pub edges: Vec<f64>,
    /// One label per interval, in edge order.
    pub labels: Vec<String>,
}

impl BinSpec {
    /// Checks that edges are strictly increasing and match the label count.
    ///
    /// # Errors
    ///
    /// Returns [`StatsError::InvalidBins`] on any inconsistency.
    pub fn validate(&self) -> Result<(), StatsError> {
        if self.edges.len() != self.labels.len() + 1 {
            return Err(StatsError::InvalidBins {
                details: format!(
                    "expected {} edges for {} labels, got {}",
                    self.labels.len() + 1,
                    self.labels.len(),
                    self.edges.len()
                ),
            });
        }
        if self.edges.windows(2).any(|w| w[0] >= w[1]) {
            return Err(StatsError::InvalidBins {
                details: "edges must be strictly increasing".to_string(),
            });
        }
        Ok(())
    }
}

/// Number of records falling into one labelled interval.
#[derive(Debug, Clone, PartialEq)]
pub struct BinCount {
    /// Interval label from the [`BinSpec`].
    pub label: String,
    /// Records in the interval; zero-member bins are still present.
    pub count: usize,
}

/// Counts records per interval of `spec`, in edge order.
///
/// Bins with no members appear with count 0.
///
/// # Errors
///
/// Returns [`StatsError::InvalidBins`] if `spec` fails validation.
pub fn bin_counts(records: &[Record], spec: &BinSpec) -> Result<Vec<BinCount>, StatsError> {
    spec.validate()?;
    let mut counts = vec![0usize; spec.labels.len()];
    for r in records {
        let v = r.value;
        for i in 0..counts.len() {
            let lo = spec.edges[i];
            let hi = spec.edges[i + 1];
            let in_bin = if i == 0 {
                v >= lo && v <= hi
            } else {
                v > lo && v <= hi
            };
            if in_bin {
                counts[i] += 1;
                break;
            }
        }
    }
    Ok(spec
        .labels
        .iter()
        .zip(counts)
        .map(|(label, count)| BinCount {
            label: label.clone(),
            count,
        })
        .collect())
}

/// Lower and upper IQR fences used for outlier detection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutlierFences {
    pub lower: f64,
    pub upper: f64,
}

/// Computes the IQR fences `Q1 - factor*IQR` and `Q3 + factor*IQR`.
///
/// Returns `None` for an empty table.
pub fn iqr_fences(records: &[Record], factor: f64) -> Option<OutlierFences> {
    if records.is_empty() {
        return None;
    }
    let mut sorted: Vec<f64> = records.iter().map(|r| r.value).collect();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let q1 = quantile_type7(&sorted, 0.25);
    let q3 = quantile_type7(&sorted, 0.75);
    let iqr = q3 - q1;
    Some(OutlierFences {
        lower: q1 - factor * iqr,
        upper: q3 + factor * iqr,
    })
}

/// Records strictly outside the IQR fences, sorted ascending by value.
pub fn iqr_outliers(records: &[Record], factor: f64) -> Vec<Record> {
    let Some(fences) = iqr_fences(records, factor) else {
        return Vec::new();
    };
    let mut outliers: Vec<Record> = records
        .iter()
        .filter(|r| r.value < fences.lower || r.value > fences.upper)
        .cloned()
        .collect();
    outliers.sort_by(|a, b| {
        a.value
            .partial_cmp(&b.value)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    debug!(
        lower = fences.lower,
        upper = fences.upper,
        outliers = outliers.len(),
        "applied iqr fences"
    );
    outliers
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn rec(code: &str, state: &str, value: f64) -> Record {
        Record {
            code: code.to_string(),
            name: format!("town {code}"),
            state: state.to_string(),
            value,
        }
    }

    #[test]
    fn test_describe_basic() {
        let records: Vec<Record> = (1..=5).map(|i| rec(&i.to_string(), "AA", i as f64)).collect();
        let d = describe(&records).unwrap();
        assert_eq!(d.count, 5);
        assert_relative_eq!(d.mean, 3.0, epsilon = 1e-10);
        assert_relative_eq!(d.min, 1.0, epsilon = 1e-10);
        assert_relative_eq!(d.q25, 2.0, epsilon = 1e-10);
        assert_relative_eq!(d.median, 3.0, epsilon = 1e-10);
        assert_relative_eq!(d.q75, 4.0, epsilon = 1e-10);
        assert_relative_eq!(d.max, 5.0, epsilon = 1e-10);
    }

    #[test]
    fn test_describe_empty() {
        assert!(describe(&[]).is_none());
    }

    #[test]
    fn test_top_k_descending() {
        let records = vec![rec("1", "AA", 20.0), rec("2", "AA", 30.0), rec("3", "BB", 25.0)];
        let top = top_k(&records, 2, RankOrder::Descending);
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].code, "2");
        assert_eq!(top[1].code, "3");
    }

    #[test]
    fn test_top_k_ties_keep_row_order() {
        let records = vec![rec("1", "AA", 20.0), rec("2", "AA", 20.0), rec("3", "AA", 20.0)];
        let top = top_k(&records, 2, RankOrder::Ascending);
        assert_eq!(top[0].code, "1");
        assert_eq!(top[1].code, "2");
    }

    #[test]
    fn test_top_k_shorter_than_k() {
        let records = vec![rec("1", "AA", 20.0)];
        assert_eq!(top_k(&records, 10, RankOrder::Descending).len(), 1);
    }

    #[test]
    fn test_hottest_and_coldest_disjoint() {
        let records: Vec<Record> = (0..25)
            .map(|i| rec(&i.to_string(), "AA", 10.0 + i as f64))
            .collect();
        let hottest = top_k(&records, 10, RankOrder::Descending);
        let coldest = top_k(&records, 10, RankOrder::Ascending);
        for h in &hottest {
            assert!(coldest.iter().all(|c| c.code != h.code));
        }
    }

    #[test]
    fn test_group_means_sorted_descending() {
        let records = vec![
            rec("1", "AA", 10.0),
            rec("2", "AA", 20.0),
            rec("3", "BB", 30.0),
            rec("4", "BB", 40.0),
        ];
        let groups = group_means(&records);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].state, "BB");
        assert_relative_eq!(groups[0].mean_value, 35.0, epsilon = 1e-10);
        assert_eq!(groups[0].count, 2);
        assert_eq!(groups[1].state, "AA");
        assert_relative_eq!(groups[1].mean_value, 15.0, epsilon = 1e-10);
    }

    fn default_bins() -> BinSpec {
        BinSpec {
            edges: vec![-50.0, 15.0, 18.0, 21.0, 24.0, 27.0, 50.0],
            labels: vec![
                "< 15°C".to_string(),
                "15–18°C".to_string(),
                "18–21°C".to_string(),
                "21–24°C".to_string(),
                "24–27°C".to_string(),
                "> 27°C".to_string(),
            ],
        }
    }

    #[test]
    fn test_bin_counts_include_zero_bins() {
        let records = vec![rec("1", "AA", 16.0), rec("2", "AA", 17.5), rec("3", "AA", 28.0)];
        let counts = bin_counts(&records, &default_bins()).unwrap();
        assert_eq!(counts.len(), 6);
        assert_eq!(counts[0].count, 0); // < 15°C
        assert_eq!(counts[1].count, 2); // 15–18°C
        assert_eq!(counts[2].count, 0);
        assert_eq!(counts[5].count, 1); // > 27°C
    }

    #[test]
    fn test_bin_counts_sum_to_record_count() {
        let records: Vec<Record> = (0..40)
            .map(|i| rec(&i.to_string(), "AA", 10.0 + i as f64 * 0.5))
            .collect();
        let counts = bin_counts(&records, &default_bins()).unwrap();
        let total: usize = counts.iter().map(|c| c.count).sum();
        assert_eq!(total, records.len());
    }

    #[test]
    fn test_bin_edges_half_open() {
        // 18.0 belongs to (15, 18], not (18, 21].
        let records = vec![rec("1", "AA", 18.0)];
        let counts = bin_counts(&records, &default_bins()).unwrap();
        assert_eq!(counts[1].count, 1);
        assert_eq!(counts[2].count, 0);
    }

    #[test]
    fn test_bin_lowest_edge_included() {
        let records = vec![rec("1", "AA", -50.0)];
        let counts = bin_counts(&records, &default_bins()).unwrap();
        assert_eq!(counts[0].count, 1);
    }

    #[test]
    fn test_bin_spec_rejects_bad_edges() {
        let spec = BinSpec {
            edges: vec![0.0, 10.0, 5.0],
            labels: vec!["a".to_string(), "b".to_string()],
        };
        assert!(matches!(
            spec.validate(),
            Err(StatsError::InvalidBins { .. })
        ));
    }

    #[test]
    fn test_bin_spec_rejects_label_count_mismatch() {
        let spec = BinSpec {
            edges: vec![0.0, 10.0],
            labels: vec!["a".to_string(), "b".to_string()],
        };
        assert!(spec.validate().is_err());
    }

    #[test]
    fn test_iqr_outliers_detects_extreme() {
        // 7 values, one far beyond the upper fence.
        let values = [10.0, 12.0, 14.0, 16.0, 18.0, 20.0, 100.0];
        let records: Vec<Record> = values
            .iter()
            .enumerate()
            .map(|(i, &v)| rec(&i.to_string(), "AA", v))
            .collect();
        let outliers = iqr_outliers(&records, 1.5);
        assert_eq!(outliers.len(), 1);
        assert_relative_eq!(outliers[0].value, 100.0, epsilon = 1e-10);
    }

    #[test]
    fn test_iqr_outliers_empty_for_tight_data() {
        let records = vec![
            rec("1", "AA", 20.0),
            rec("2", "AA", 21.0),
            rec("3", "AA", 22.0),
            rec("4", "AA", 23.0),
        ];
        assert!(iqr_outliers(&records, 1.5).is_empty());
    }

    #[test]
    fn test_iqr_outliers_sorted_ascending() {
        let mut records: Vec<Record> = (0..20).map(|i| rec(&i.to_string(), "AA", 20.0)).collect();
        records.push(rec("hot", "AA", 90.0));
        records.push(rec("cold", "AA", -60.0));
        let outliers = iqr_outliers(&records, 1.5);
        assert_eq!(outliers.len(), 2);
        assert_eq!(outliers[0].code, "cold");
        assert_eq!(outliers[1].code, "hot");
    }

    #[test]
    fn test_iqr_fences_empty() {
        assert!(iqr_fences(&[], 1.5).is_none());
    }
}
