//! GeoTIFF reader: one single-band grid with georeferencing tags.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use ndarray::Array2;
use tiff::decoder::{Decoder, DecodingResult};
use tiff::tags::Tag;
use tracing::debug;

use municlim_raster::{Crs, GridTransform, RasterGrid};

use crate::error::IoError;

/// GeoKey id for the geographic coordinate system EPSG code.
const GEOGRAPHIC_TYPE_GEOKEY: u32 = 2048;
/// GeoKey id for the projected coordinate system EPSG code.
const PROJECTED_CS_TYPE_GEOKEY: u32 = 3072;

/// Reads a single-band GeoTIFF into a [`RasterGrid`].
///
/// Georeferencing comes from the ModelPixelScale and ModelTiepoint tags,
/// the nodata sentinel from the GDAL_NODATA ASCII tag, and the EPSG code
/// from the GeoKey directory (defaulting to 4326 when absent, the usual
/// case for global climate products).
///
/// # Errors
///
/// Fails on missing files, TIFF decode errors, absent georeferencing
/// tags, or sample formats that cannot be represented as an `f32` band.
pub fn read_geotiff(path: &Path) -> Result<RasterGrid, IoError> {
    if !path.exists() {
        return Err(IoError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let file = File::open(path)?;
    let mut decoder = Decoder::new(BufReader::new(file))?;
    let (width, height) = decoder.dimensions()?;

    let pixel_scale = decoder
        .get_tag_f64_vec(Tag::ModelPixelScaleTag)
        .map_err(|_| IoError::MissingTag {
            name: "ModelPixelScale".to_string(),
            path: path.to_path_buf(),
        })?;
    let tiepoint = decoder
        .get_tag_f64_vec(Tag::ModelTiepointTag)
        .map_err(|_| IoError::MissingTag {
            name: "ModelTiepoint".to_string(),
            path: path.to_path_buf(),
        })?;
    if pixel_scale.len() < 2 || tiepoint.len() < 5 {
        return Err(IoError::Tiff {
            reason: format!(
                "short georeferencing tags in {} (scale {} values, tiepoint {} values)",
                path.display(),
                pixel_scale.len(),
                tiepoint.len()
            ),
        });
    }
    // Tiepoint maps raster position (i, j) to world (x, y); rasters are
    // stored north-up, so the y resolution is negative.
    let x_origin = tiepoint[3] - tiepoint[0] * pixel_scale[0];
    let y_origin = tiepoint[4] + tiepoint[1] * pixel_scale[1];
    let transform = GridTransform::new(x_origin, y_origin, pixel_scale[0], -pixel_scale[1]);

    let nodata = decoder
        .get_tag_ascii_string(Tag::GdalNodata)
        .ok()
        .and_then(|s| s.trim_matches(char::from(0)).trim().parse::<f32>().ok());

    let crs = read_epsg(&mut decoder).unwrap_or(Crs::WGS84);

    let values = read_band(&mut decoder, path)?;
    let data = Array2::from_shape_vec((height as usize, width as usize), values).map_err(|e| {
        IoError::Tiff {
            reason: format!("band shape mismatch in {}: {e}", path.display()),
        }
    })?;

    debug!(
        path = %path.display(),
        width,
        height,
        ?nodata,
        %crs,
        "read geotiff band"
    );
    Ok(RasterGrid::new(data, transform, crs, nodata))
}

/// Extracts the EPSG code from the GeoKey directory, if present.
fn read_epsg<R: std::io::Read + std::io::Seek>(decoder: &mut Decoder<R>) -> Option<Crs> {
    let directory = decoder
        .find_tag(Tag::GeoKeyDirectoryTag)
        .ok()
        .flatten()?
        .into_u32_vec()
        .ok()?;
    // Directory layout: a 4-value header, then 4-value key entries of
    // (key id, tag location, count, value). Location 0 means the value
    // is stored inline.
    let mut geographic = None;
    let mut projected = None;
    for entry in directory.chunks_exact(4).skip(1) {
        if entry[1] != 0 {
            continue;
        }
        match entry[0] {
            GEOGRAPHIC_TYPE_GEOKEY => geographic = Some(entry[3]),
            PROJECTED_CS_TYPE_GEOKEY => projected = Some(entry[3]),
            _ => {}
        }
    }
    projected.or(geographic).map(Crs)
}

fn read_band<R: std::io::Read + std::io::Seek>(
    decoder: &mut Decoder<R>,
    path: &Path,
) -> Result<Vec<f32>, IoError> {
    let values = match decoder.read_image()? {
        DecodingResult::U8(buf) => buf.into_iter().map(f32::from).collect(),
        DecodingResult::U16(buf) => buf.into_iter().map(f32::from).collect(),
        DecodingResult::U32(buf) => buf.into_iter().map(|v| v as f32).collect(),
        DecodingResult::I8(buf) => buf.into_iter().map(f32::from).collect(),
        DecodingResult::I16(buf) => buf.into_iter().map(f32::from).collect(),
        DecodingResult::I32(buf) => buf.into_iter().map(|v| v as f32).collect(),
        DecodingResult::F32(buf) => buf,
        DecodingResult::F64(buf) => buf.into_iter().map(|v| v as f32).collect(),
        _ => {
            return Err(IoError::UnsupportedPixelFormat {
                path: path.to_path_buf(),
            });
        }
    };
    Ok(values)
}
