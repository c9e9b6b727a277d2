//! GeoTIFF writer for clipped raster slices.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use tiff::encoder::{TiffEncoder, colortype};
use tiff::tags::Tag;
use tracing::debug;

use municlim_raster::RasterGrid;

use crate::error::IoError;

/// Writes a grid as a single-band float32 GeoTIFF.
///
/// Emits ModelPixelScale/ModelTiepoint georeferencing, a GeoKey
/// directory carrying the EPSG code, and a GDAL_NODATA tag when the
/// grid has a nodata sentinel.
///
/// # Errors
///
/// Fails on filesystem errors or TIFF encoding failures.
pub fn write_geotiff(path: &Path, grid: &RasterGrid) -> Result<(), IoError> {
    let file = File::create(path)?;
    let mut encoder = TiffEncoder::new(BufWriter::new(file))?;

    let width = grid.width() as u32;
    let height = grid.height() as u32;
    let mut image = encoder.new_image::<colortype::Gray32Float>(width, height)?;

    let t = grid.transform;
    image.encoder().write_tag(
        Tag::ModelPixelScaleTag,
        &[t.x_res, -t.y_res, 0.0][..],
    )?;
    image.encoder().write_tag(
        Tag::ModelTiepointTag,
        &[0.0, 0.0, 0.0, t.x_origin, t.y_origin, 0.0][..],
    )?;
    image
        .encoder()
        .write_tag(Tag::GeoKeyDirectoryTag, &geokey_directory(grid.crs.0)[..])?;
    if let Some(nodata) = grid.nodata {
        image
            .encoder()
            .write_tag(Tag::GdalNodata, format!("{nodata}").as_str())?;
    }

    let band: Vec<f32> = grid.data.iter().copied().collect();
    image.write_data(&band)?;

    debug!(path = %path.display(), width, height, "wrote geotiff band");
    Ok(())
}

/// Builds a minimal GeoKey directory for the given EPSG code.
///
/// Geographic systems (EPSG 4326) go under the geographic-type key,
/// anything else under the projected-type key.
fn geokey_directory(epsg: u32) -> Vec<u16> {
    let (model, key) = if epsg == 4326 {
        (2u16, 2048u16)
    } else {
        (1u16, 3072u16)
    };
    vec![
        1, 1, 0, 2, // version header, two key entries
        1024, 0, 1, model, // GTModelType
        key, 0, 1, epsg as u16,
    ]
}
