use serde::Deserialize;

/// Top-level municlim configuration.
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct MuniclimConfig {
    /// Boundary attribute field names.
    #[serde(default)]
    pub fields: FieldsToml,

    /// Plausibility window for scaled monthly means.
    #[serde(default)]
    pub plausibility: PlausibilityToml,

    /// Temperature-band histogram settings.
    #[serde(default)]
    pub bins: BinsToml,

    /// Summary-table settings.
    #[serde(default)]
    pub summary: SummaryToml,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldsToml {
    #[serde(default = "default_code_field")]
    pub code: String,
    #[serde(default = "default_name_field")]
    pub name: String,
    #[serde(default = "default_state_field")]
    pub state: String,
}

impl Default for FieldsToml {
    fn default() -> Self {
        Self {
            code: default_code_field(),
            name: default_name_field(),
            state: default_state_field(),
        }
    }
}

fn default_code_field() -> String {
    "CD_MUN".to_string()
}
fn default_name_field() -> String {
    "NM_MUN".to_string()
}
fn default_state_field() -> String {
    "SIGLA_UF".to_string()
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlausibilityToml {
    #[serde(default = "default_min_c")]
    pub min_c: f64,
    #[serde(default = "default_max_c")]
    pub max_c: f64,
}

impl Default for PlausibilityToml {
    fn default() -> Self {
        Self {
            min_c: default_min_c(),
            max_c: default_max_c(),
        }
    }
}

fn default_min_c() -> f64 {
    -20.0
}
fn default_max_c() -> f64 {
    50.0
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BinsToml {
    #[serde(default = "default_bin_edges")]
    pub edges: Vec<f64>,
    #[serde(default = "default_bin_labels")]
    pub labels: Vec<String>,
}

impl Default for BinsToml {
    fn default() -> Self {
        Self {
            edges: default_bin_edges(),
            labels: default_bin_labels(),
        }
    }
}

fn default_bin_edges() -> Vec<f64> {
    vec![-50.0, 15.0, 18.0, 21.0, 24.0, 27.0, 50.0]
}
fn default_bin_labels() -> Vec<String> {
    [
        "< 15°C", "15–18°C", "18–21°C", "21–24°C", "24–27°C", "> 27°C",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SummaryToml {
    #[serde(default = "default_top_k")]
    pub top_k: usize,
    #[serde(default = "default_iqr_factor")]
    pub iqr_factor: f64,
}

impl Default for SummaryToml {
    fn default() -> Self {
        Self {
            top_k: default_top_k(),
            iqr_factor: default_iqr_factor(),
        }
    }
}

fn default_top_k() -> usize {
    10
}
fn default_iqr_factor() -> f64 {
    1.5
}
