//! End-to-end checks of the file formats: a GeoTIFF written by the clip
//! stage must read back with identical georeferencing, and the annual
//! table must survive a write/read cycle including missing values.

use approx::assert_relative_eq;
use ndarray::Array2;

use municlim_io::{
    AnnualRecord, list_rasters, pick_month, read_annual_csv, read_geotiff, write_annual_csv,
    write_geotiff,
};
use municlim_raster::{Crs, GridTransform, RasterGrid};

fn sample_grid() -> RasterGrid {
    let data = Array2::from_shape_fn((4, 5), |(row, col)| (row * 10 + col) as f32 * 0.5);
    RasterGrid::new(
        data,
        GridTransform::new(-61.0, -9.0, 0.25, -0.25),
        Crs::WGS84,
        Some(-9999.0),
    )
}

#[test]
fn test_geotiff_roundtrip_preserves_georeferencing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tavg_01.tif");

    let grid = sample_grid();
    write_geotiff(&path, &grid).unwrap();
    let reread = read_geotiff(&path).unwrap();

    assert_eq!(reread.height(), 4);
    assert_eq!(reread.width(), 5);
    assert_eq!(reread.crs, Crs::WGS84);
    assert_eq!(reread.nodata, Some(-9999.0));
    assert_relative_eq!(reread.transform.x_origin, -61.0, epsilon = 1e-9);
    assert_relative_eq!(reread.transform.y_origin, -9.0, epsilon = 1e-9);
    assert_relative_eq!(reread.transform.x_res, 0.25, epsilon = 1e-9);
    assert_relative_eq!(reread.transform.y_res, -0.25, epsilon = 1e-9);
    assert_eq!(reread.data, grid.data);
}

#[test]
fn test_geotiff_roundtrip_without_nodata() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("slice.tif");

    let mut grid = sample_grid();
    grid.nodata = None;
    write_geotiff(&path, &grid).unwrap();
    let reread = read_geotiff(&path).unwrap();
    assert_eq!(reread.nodata, None);
}

#[test]
fn test_catalog_over_written_slices() {
    let dir = tempfile::tempdir().unwrap();
    let grid = sample_grid();
    for month in 1..=12u8 {
        let path = dir.path().join(format!("tavg_{month:02}.tif"));
        write_geotiff(&path, &grid).unwrap();
    }

    let rasters = list_rasters(dir.path()).unwrap();
    assert_eq!(rasters.len(), 12);
    let july = pick_month(&rasters, 7).unwrap();
    assert!(july.file_name().unwrap().to_str().unwrap().contains("07"));
    let reread = read_geotiff(&july).unwrap();
    assert_eq!(reread.width(), 5);
}

#[test]
fn test_annual_table_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("annual.csv");

    let records = vec![
        AnnualRecord {
            code: "1100015".to_string(),
            name: "Alta Floresta".to_string(),
            state: "RO".to_string(),
            annual_mean_c: Some(25.4),
        },
        AnnualRecord {
            code: "1100379".to_string(),
            name: "Alto Alegre".to_string(),
            state: "RO".to_string(),
            annual_mean_c: None,
        },
    ];
    write_annual_csv(&path, &records).unwrap();
    let reread = read_annual_csv(&path).unwrap();
    assert_eq!(reread, records);
}
