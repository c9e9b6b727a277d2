//! GeoJSON boundary layer reader and writer.

use std::fs;
use std::path::Path;

use geo::MultiPolygon;
use geojson::{Feature, FeatureCollection, GeoJson};
use tracing::{debug, info};

use crate::error::IoError;

/// Attribute field names carrying municipality identity in the boundary
/// layer. Defaults match the IBGE municipality layers the pipeline was
/// built for.
#[derive(Debug, Clone)]
pub struct FieldNames {
    /// Numeric municipality code field.
    pub code: String,
    /// Municipality name field.
    pub name: String,
    /// State/region code field.
    pub state: String,
}

impl Default for FieldNames {
    fn default() -> Self {
        Self {
            code: "CD_MUN".to_string(),
            name: "NM_MUN".to_string(),
            state: "SIGLA_UF".to_string(),
        }
    }
}

/// One administrative boundary with its identity attributes.
///
/// Read once, held immutably through the pipeline; only the derived
/// annual statistic is appended downstream.
#[derive(Debug, Clone)]
pub struct Municipality {
    /// Numeric code, kept as text to preserve leading zeros.
    pub code: String,
    /// Municipality name.
    pub name: String,
    /// State/region code.
    pub state: String,
    /// Boundary geometry in geographic WGS84 coordinates.
    pub geometry: MultiPolygon<f64>,
}

/// Reads the municipality layer with identity attributes.
///
/// `limit` truncates to the first N features after reading, for fast
/// test iterations.
///
/// # Errors
///
/// Fails on missing files, malformed GeoJSON, non-polygonal geometry, or
/// features lacking one of the configured attribute fields.
pub fn read_municipalities(
    path: &Path,
    fields: &FieldNames,
    limit: Option<usize>,
) -> Result<Vec<Municipality>, IoError> {
    let collection = read_collection(path)?;
    let mut municipalities = Vec::with_capacity(collection.features.len());
    for (index, feature) in collection.features.into_iter().enumerate() {
        let code = property_string(&feature, &fields.code, index)?;
        let name = property_string(&feature, &fields.name, index)?;
        let state = property_string(&feature, &fields.state, index)?;
        let geometry = feature_geometry(feature, index)?;
        municipalities.push(Municipality {
            code,
            name,
            state,
            geometry,
        });
    }
    info!(
        path = %path.display(),
        count = municipalities.len(),
        "loaded municipality layer"
    );
    if let Some(n) = limit {
        municipalities.truncate(n);
        debug!(count = municipalities.len(), "truncated municipality layer");
    }
    Ok(municipalities)
}

/// Reads only the geometries of a boundary layer, ignoring attributes.
pub fn read_polygons(path: &Path) -> Result<Vec<MultiPolygon<f64>>, IoError> {
    let collection = read_collection(path)?;
    collection
        .features
        .into_iter()
        .enumerate()
        .map(|(index, feature)| feature_geometry(feature, index))
        .collect()
}

/// Reads a boundary layer as a single clip mask, merging the polygon
/// parts of every feature.
pub fn read_mask(path: &Path) -> Result<MultiPolygon<f64>, IoError> {
    let polygons = read_polygons(path)?;
    let parts: Vec<geo::Polygon<f64>> = polygons.into_iter().flat_map(|mp| mp.0).collect();
    if parts.is_empty() {
        return Err(IoError::Geojson {
            reason: format!("no polygonal features in {}", path.display()),
        });
    }
    Ok(MultiPolygon::new(parts))
}

/// Writes a single-feature GeoJSON file holding the dissolved mask.
pub fn write_mask(path: &Path, mask: &MultiPolygon<f64>) -> Result<(), IoError> {
    let geometry = geojson::Geometry::new(geojson::Value::from(mask));
    let feature = Feature {
        bbox: None,
        geometry: Some(geometry),
        id: None,
        properties: None,
        foreign_members: None,
    };
    let collection = FeatureCollection {
        bbox: None,
        features: vec![feature],
        foreign_members: None,
    };
    fs::write(path, GeoJson::from(collection).to_string())?;
    info!(path = %path.display(), "wrote dissolved mask");
    Ok(())
}

fn read_collection(path: &Path) -> Result<FeatureCollection, IoError> {
    if !path.exists() {
        return Err(IoError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let raw = fs::read_to_string(path)?;
    match raw.parse::<GeoJson>()? {
        GeoJson::FeatureCollection(collection) => Ok(collection),
        GeoJson::Feature(feature) => Ok(FeatureCollection {
            bbox: None,
            features: vec![feature],
            foreign_members: None,
        }),
        GeoJson::Geometry(_) => Err(IoError::Geojson {
            reason: format!(
                "expected a FeatureCollection in {}, got a bare geometry",
                path.display()
            ),
        }),
    }
}

fn feature_geometry(feature: Feature, index: usize) -> Result<MultiPolygon<f64>, IoError> {
    let Some(geometry) = feature.geometry else {
        return Err(IoError::UnsupportedGeometry {
            kind: "none".to_string(),
            feature: index,
        });
    };
    let geometry = geo_types::Geometry::<f64>::try_from(geometry)?;
    match geometry {
        geo_types::Geometry::Polygon(polygon) => Ok(MultiPolygon::new(vec![polygon])),
        geo_types::Geometry::MultiPolygon(multi) => Ok(multi),
        other => Err(IoError::UnsupportedGeometry {
            kind: geometry_kind(&other).to_string(),
            feature: index,
        }),
    }
}

fn geometry_kind(geometry: &geo_types::Geometry<f64>) -> &'static str {
    match geometry {
        geo_types::Geometry::Point(_) => "Point",
        geo_types::Geometry::Line(_) => "Line",
        geo_types::Geometry::LineString(_) => "LineString",
        geo_types::Geometry::MultiPoint(_) => "MultiPoint",
        geo_types::Geometry::MultiLineString(_) => "MultiLineString",
        geo_types::Geometry::GeometryCollection(_) => "GeometryCollection",
        geo_types::Geometry::Rect(_) => "Rect",
        geo_types::Geometry::Triangle(_) => "Triangle",
        geo_types::Geometry::Polygon(_) | geo_types::Geometry::MultiPolygon(_) => "Polygon",
    }
}

fn property_string(feature: &Feature, name: &str, index: usize) -> Result<String, IoError> {
    match feature.property(name) {
        Some(serde_json::Value::String(s)) if !s.is_empty() => Ok(s.clone()),
        Some(serde_json::Value::Number(n)) => Ok(n.to_string()),
        _ => Err(IoError::MissingField {
            name: name.to_string(),
            feature: index,
        }),
    }
}
