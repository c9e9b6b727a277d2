//! Clip command: crop each monthly raster to the dissolved mask.

use anyhow::{Context, Result};
use tracing::{debug, info, info_span};

use municlim_io::{list_rasters, read_geotiff, read_mask, write_geotiff};
use municlim_raster::{Crs, clip};

use crate::cli::ClipArgs;

/// Run the raster clipping pipeline.
pub fn run(args: ClipArgs) -> Result<()> {
    let _cmd = info_span!("clip").entered();

    let mask = read_mask(&args.mask)
        .with_context(|| format!("failed to read mask: {}", args.mask.display()))?;
    let rasters = list_rasters(&args.rasters)
        .with_context(|| format!("failed to list rasters in {}", args.rasters.display()))?;
    info!(count = rasters.len(), "clipping rasters to mask");

    std::fs::create_dir_all(&args.output)
        .with_context(|| format!("failed to create output dir: {}", args.output.display()))?;

    for path in &rasters {
        let grid = read_geotiff(path)
            .with_context(|| format!("failed to read raster: {}", path.display()))?;
        let clipped = clip(&grid, &mask, Crs::WGS84)
            .with_context(|| format!("failed to clip raster: {}", path.display()))?;
        debug!(
            path = %path.display(),
            rows = clipped.height(),
            cols = clipped.width(),
            "clipped raster window"
        );

        // File names survive the clip so the monthly catalog convention
        // still applies downstream.
        let file_name = path
            .file_name()
            .context("raster path has no file name")?;
        let out_path = args.output.join(file_name);
        write_geotiff(&out_path, &clipped)
            .with_context(|| format!("failed to write raster: {}", out_path.display()))?;
    }

    info!(
        count = rasters.len(),
        dir = %args.output.display(),
        "clipped rasters written"
    );
    Ok(())
}
