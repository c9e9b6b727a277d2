//! Physical plausibility bounds for scaled temperatures.
//!
//! Raster noise or a mis-detected unit scale can produce wildly wrong
//! zonal means that would silently corrupt the annual average. A fixed
//! Celsius sanity window catches that class of error deterministically;
//! offending values become missing, never clamped.

/// Inclusive Celsius bounds applied to each scaled monthly zonal mean.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlausibilityBounds {
    pub min_c: f64,
    pub max_c: f64,
}

impl Default for PlausibilityBounds {
    fn default() -> Self {
        Self {
            min_c: -20.0,
            max_c: 50.0,
        }
    }
}

impl PlausibilityBounds {
    /// Keeps a value inside the inclusive bounds, drops everything else.
    pub fn filter(&self, value: f64) -> Option<f64> {
        (value.is_finite() && value >= self.min_c && value <= self.max_c).then_some(value)
    }

    /// [`filter`](Self::filter) lifted over an already-optional value.
    pub fn filter_opt(&self, value: Option<f64>) -> Option<f64> {
        value.and_then(|v| self.filter(v))
    }
}
