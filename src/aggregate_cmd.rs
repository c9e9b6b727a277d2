//! Aggregate command: monthly rasters -> one annual mean per municipality.

use anyhow::{Context, Result, bail};
use tracing::{debug, info, info_span, warn};

use municlim_geom::repair;
use municlim_io::{
    AnnualRecord, ensure_full_year, list_rasters, pick_month, read_geotiff, read_municipalities,
    write_annual_csv,
};
use municlim_raster::{Crs, RasterGrid, ScaleFactor, detect_scale};
use municlim_stats::mean;
use municlim_zonal::{PlausibilityBounds, annual_means, zonal_means};

use crate::cli::AggregateArgs;
use crate::convert;

/// Run the full aggregation pipeline.
pub fn run(args: AggregateArgs) -> Result<()> {
    let _cmd = info_span!("aggregate").entered();

    // 1. Configuration: fail fast on anything malformed.
    let config = convert::load_config(args.config.as_deref())?;
    let fields = convert::build_field_names(&config.fields);
    let bounds = convert::build_plausibility(&config.plausibility)?;
    let scale_override = convert::build_scale_override(args.scale)?;

    // 2. Boundary layer with identity attributes.
    let municipalities = read_municipalities(&args.boundaries, &fields, args.limit)
        .with_context(|| format!("failed to read boundaries: {}", args.boundaries.display()))?;
    if municipalities.is_empty() {
        bail!("boundary layer holds no municipalities");
    }

    let geometries: Vec<_> = municipalities.iter().map(|m| m.geometry.clone()).collect();
    let (geometries, report) = repair(geometries);
    if report.repaired > 0 {
        info!(count = report.repaired, "repaired invalid boundary polygons");
    }
    if report.still_invalid > 0 {
        warn!(
            count = report.still_invalid,
            "boundary polygons still invalid after repair; their means may be off"
        );
    }

    // 3. Raster catalog: a full year, or one month for a quick check.
    let rasters = list_rasters(&args.rasters)
        .with_context(|| format!("failed to list rasters in {}", args.rasters.display()))?;
    let rasters = match args.month {
        Some(month) => {
            warn!(
                month,
                "aggregating a single month; the output is a monthly mean, not an annual one"
            );
            vec![pick_month(&rasters, month)?]
        }
        None => {
            ensure_full_year(&rasters)?;
            rasters
        }
    };

    // 4. One zonal-mean pass per monthly slice.
    let mut monthly: Vec<Vec<Option<f64>>> = Vec::with_capacity(rasters.len());
    for path in &rasters {
        let grid = read_geotiff(path)
            .with_context(|| format!("failed to read raster: {}", path.display()))?;
        if grid.crs != Crs::WGS84 {
            bail!(
                "raster {} is in {}, expected {}; reproject before aggregating",
                path.display(),
                grid.crs,
                Crs::WGS84
            );
        }
        let scale = resolve_scale(&grid, scale_override);
        if args.debug {
            let d = grid.diagnostics();
            info!(
                path = %path.display(),
                valid = d.valid,
                total = d.total,
                min = ?d.min,
                max = ?d.max,
                factor = scale.factor(),
                "raster diagnostics"
            );
        }

        let means = zonal_means(&geometries, &grid);
        let filtered: Vec<Option<f64>> = means
            .into_iter()
            .map(|m| bounds.filter_opt(m.map(|v| v * scale.factor())))
            .collect();
        debug!(
            path = %path.display(),
            with_value = filtered.iter().filter(|v| v.is_some()).count(),
            "monthly zonal means computed"
        );
        monthly.push(filtered);
    }

    // 5. Combine months and write the table.
    let annual = annual_means(&monthly)?;
    let records: Vec<AnnualRecord> = municipalities
        .into_iter()
        .zip(&annual)
        .map(|(m, value)| AnnualRecord {
            code: m.code,
            name: m.name,
            state: m.state,
            annual_mean_c: *value,
        })
        .collect();
    write_annual_csv(&args.output, &records)
        .with_context(|| format!("failed to write annual table: {}", args.output.display()))?;

    let values: Vec<f64> = records.iter().filter_map(|r| r.annual_mean_c).collect();
    let missing = records.len() - values.len();
    if missing > 0 {
        warn!(missing, "municipalities without any valid month");
    }
    if !values.is_empty() {
        info!(
            municipalities = values.len(),
            mean_c = mean(&values),
            "aggregation complete"
        );
    }
    Ok(())
}

/// Per-raster unit scale: the operator override wins, otherwise detect
/// from the slice's own value distribution.
fn resolve_scale(grid: &RasterGrid, scale_override: Option<ScaleFactor>) -> ScaleFactor {
    match scale_override {
        Some(explicit) => explicit,
        None => detect_scale(grid),
    }
}
