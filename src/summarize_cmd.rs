//! Summarize command: summary tables over the annual result table.

use anyhow::{Context, Result};
use tracing::{info, info_span, warn};

use municlim_io::{
    read_annual_csv, write_bin_counts_csv, write_group_means_csv, write_ranking_csv,
};
use municlim_stats::{
    RankOrder, Record, bin_counts, describe, group_means, iqr_outliers, top_k,
};

use crate::cli::SummarizeArgs;
use crate::convert;

/// Run the summary-table pipeline.
pub fn run(args: SummarizeArgs) -> Result<()> {
    let _cmd = info_span!("summarize").entered();

    let config = convert::load_config(args.config.as_deref())?;
    let bins = convert::build_bin_spec(&config.bins)?;

    let annual = read_annual_csv(&args.input)
        .with_context(|| format!("failed to read annual table: {}", args.input.display()))?;

    // Missing rows carry no value; they are dropped here, not zeroed.
    let records: Vec<Record> = annual
        .iter()
        .filter_map(|r| {
            r.annual_mean_c.map(|value| Record {
                code: r.code.clone(),
                name: r.name.clone(),
                state: r.state.clone(),
                value,
            })
        })
        .collect();
    let missing = annual.len() - records.len();
    if missing > 0 {
        warn!(missing, "rows without an annual value were skipped");
    }
    info!(rows = records.len(), "summarizing annual table");

    if let Some(d) = describe(&records) {
        info!(
            count = d.count,
            mean = d.mean,
            std = d.std,
            min = d.min,
            q25 = d.q25,
            median = d.median,
            q75 = d.q75,
            max = d.max,
            "annual value distribution"
        );
    }

    std::fs::create_dir_all(&args.output)
        .with_context(|| format!("failed to create output dir: {}", args.output.display()))?;

    let hottest = top_k(&records, config.summary.top_k, RankOrder::Descending);
    write_ranking_csv(&args.output.join("top_hottest.csv"), &hottest)?;
    let coldest = top_k(&records, config.summary.top_k, RankOrder::Ascending);
    write_ranking_csv(&args.output.join("top_coldest.csv"), &coldest)?;

    let groups = group_means(&records);
    write_group_means_csv(&args.output.join("state_means.csv"), &groups)?;

    let counts = bin_counts(&records, &bins)?;
    write_bin_counts_csv(&args.output.join("bin_counts.csv"), &counts)?;

    let outliers = iqr_outliers(&records, config.summary.iqr_factor);
    if !outliers.is_empty() {
        warn!(count = outliers.len(), "outlier municipalities detected");
    }
    write_ranking_csv(&args.output.join("outliers.csv"), &outliers)?;

    info!(dir = %args.output.display(), "summary tables written");
    Ok(())
}
