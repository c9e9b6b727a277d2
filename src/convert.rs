//! Pure conversion functions: TOML config structs -> crate API config types.

use std::path::Path;

use anyhow::{Context, Result, bail};

use municlim_io::FieldNames;
use municlim_raster::ScaleFactor;
use municlim_stats::BinSpec;
use municlim_zonal::PlausibilityBounds;

use crate::config::{BinsToml, FieldsToml, MuniclimConfig, PlausibilityToml};

/// Loads the TOML configuration, falling back to defaults when no path is
/// given. A path that does not parse is a hard error, never a silent
/// fallback.
pub fn load_config(path: Option<&Path>) -> Result<MuniclimConfig> {
    let Some(path) = path else {
        return Ok(MuniclimConfig::default());
    };
    let toml_str = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file: {}", path.display()))?;
    toml::from_str(&toml_str).context("failed to parse TOML config")
}

/// Builds the boundary attribute field names from the TOML configuration.
pub fn build_field_names(fields: &FieldsToml) -> FieldNames {
    FieldNames {
        code: fields.code.clone(),
        name: fields.name.clone(),
        state: fields.state.clone(),
    }
}

/// Builds the plausibility window from the TOML configuration.
///
/// An inverted window is rejected up front.
pub fn build_plausibility(p: &PlausibilityToml) -> Result<PlausibilityBounds> {
    if p.min_c >= p.max_c {
        bail!(
            "plausibility bounds must satisfy min_c < max_c, got [{}, {}]",
            p.min_c,
            p.max_c
        );
    }
    Ok(PlausibilityBounds {
        min_c: p.min_c,
        max_c: p.max_c,
    })
}

/// Builds and validates the histogram bin specification.
pub fn build_bin_spec(bins: &BinsToml) -> Result<BinSpec> {
    let spec = BinSpec {
        edges: bins.edges.clone(),
        labels: bins.labels.clone(),
    };
    spec.validate().context("invalid [bins] configuration")?;
    Ok(spec)
}

/// Turns an optional `--scale` override into a scale factor, when given.
///
/// Zero and negative factors would silently destroy the data, so they are
/// rejected here rather than downstream.
pub fn build_scale_override(scale: Option<f64>) -> Result<Option<ScaleFactor>> {
    match scale {
        None => Ok(None),
        Some(f) if f.is_finite() && f > 0.0 => Ok(Some(ScaleFactor::Explicit(f))),
        Some(f) => bail!("scale factor must be finite and positive, got {f}"),
    }
}
