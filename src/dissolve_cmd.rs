//! Dissolve command: merge a boundary layer into one clip mask.

use anyhow::{Context, Result};
use tracing::{info, info_span, warn};

use municlim_geom::{dissolve, repair};
use municlim_io::{read_polygons, write_mask};

use crate::cli::DissolveArgs;

/// Run the mask preparation pipeline.
pub fn run(args: DissolveArgs) -> Result<()> {
    let _cmd = info_span!("dissolve").entered();

    info!(path = %args.input.display(), "reading boundary layer");
    let polygons = read_polygons(&args.input)
        .with_context(|| format!("failed to read boundaries: {}", args.input.display()))?;
    info!(count = polygons.len(), "boundary polygons loaded");

    let (polygons, report) = repair(polygons);
    if report.repaired > 0 {
        info!(count = report.repaired, "repaired invalid polygons");
    }
    if report.still_invalid > 0 {
        warn!(
            count = report.still_invalid,
            "polygons still invalid after repair; dissolving anyway"
        );
    }

    let mask = dissolve(&polygons).context("failed to dissolve boundary layer")?;
    info!(parts = mask.0.len(), "dissolved into mask");

    write_mask(&args.output, &mask)
        .with_context(|| format!("failed to write mask: {}", args.output.display()))?;

    Ok(())
}
