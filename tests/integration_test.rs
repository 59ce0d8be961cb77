use std::fs;
use tempfile::tempdir;
use zonal_grid::errors::ZonalError;
use zonal_grid::grid::{AnyGrid, ElementType, Grid};
use zonal_grid::loader::{load_grid, load_netcdf_grid, load_typed};
use zonal_grid::netcdf_io::{write_grid_to_netcdf, NetCDFWriter};
use zonal_grid::statistics::{AggregatorConfig, ProcessingMode, ZonalAggregator};

const ZONES_TXT: &str = "\
# zone identifiers
0 0 0 0
1 1 1 1
2 2 2 2
";

const VALUES_TXT: &str = "\
0.0 1.0 2.0 3.0
4.0 5.0 6.0 7.0
8.0 9.0 10.0 11.0
";

#[test]
fn test_load_and_aggregate_from_files() {
    let temp_dir = tempdir().expect("Failed to create temp dir");
    let zones_path = temp_dir.path().join("zonas.txt");
    let values_path = temp_dir.path().join("valores.txt");
    fs::write(&zones_path, ZONES_TXT).expect("Failed to write zones");
    fs::write(&values_path, VALUES_TXT).expect("Failed to write values");

    let zones = load_grid(&zones_path, ElementType::Int64).expect("Failed to load zones");
    let values = load_grid(&values_path, ElementType::Float64).expect("Failed to load values");
    assert_eq!(zones.element_type(), ElementType::Int64);
    assert_eq!(zones.shape(), &[3, 4]);

    let zone_set = zones.zone_set().expect("Zone set should be extracted");
    assert_eq!(zone_set.to_string(), "{0, 1, 2}");

    let result = ZonalAggregator::default()
        .aggregate_any(&zones, &values)
        .expect("Aggregation should succeed");
    match result {
        AnyGrid::Float64(grid) => {
            assert_eq!(grid.to_rows()[0], vec![1.5; 4]);
            assert_eq!(grid.to_rows()[2], vec![9.5; 4]);
        }
        other => panic!("Expected a float64 grid, got {:?}", other.element_type()),
    }

    // Loading the measurement grid as integers fails on the first decimal token
    match load_grid(&values_path, ElementType::Int32) {
        Err(ZonalError::ParseError { line, token, dtype }) => {
            assert_eq!(line, 1);
            assert_eq!(token, "0.0");
            assert_eq!(dtype, "int32");
        }
        other => panic!("Expected ParseError, got {:?}", other),
    }
}

#[test]
fn test_float_zone_file_is_rejected() {
    let temp_dir = tempdir().expect("Failed to create temp dir");
    let zones_path = temp_dir.path().join("zones.txt");
    fs::write(&zones_path, ZONES_TXT).expect("Failed to write zones");

    let zones = load_grid(&zones_path, ElementType::Float64).expect("Float load should succeed");
    let err = zones.zone_set().expect_err("Float zones must be rejected");
    assert_eq!(err.to_string(), "The elements type must be int, not float64");
}

#[test]
fn test_one_dimensional_files() {
    let temp_dir = tempdir().expect("Failed to create temp dir");
    let path = temp_dir.path().join("test.txt");
    fs::write(&path, "0 1 2 3 4 5\n").expect("Failed to write file");

    let as_int: Grid<i64> = load_typed(&path).expect("Failed to load ints");
    assert_eq!(as_int.shape(), &[6]);
    assert_eq!(as_int.iter().copied().collect::<Vec<_>>(), vec![0, 1, 2, 3, 4, 5]);

    let as_float: Grid<f64> = load_typed(&path).expect("Failed to load floats");
    assert_eq!(as_float.get(&[5]), Some(5.0));

    let two_rows = temp_dir.path().join("test2.txt");
    fs::write(&two_rows, "0 1 2 3 4 5\n6 7 8 9 10 11\n").expect("Failed to write file");
    let grid: Grid<i64> = load_typed(&two_rows).expect("Failed to load 2-D grid");
    assert_eq!(grid.shape(), &[2, 6]);
    assert_eq!(grid.get(&[1, 5]), Some(11));
}

#[test]
fn test_missing_file_is_io_error() {
    let temp_dir = tempdir().expect("Failed to create temp dir");
    let missing = temp_dir.path().join("does_not_exist.txt");

    let result = load_grid(&missing, ElementType::Int64);
    assert!(matches!(result, Err(ZonalError::IoError(_))));
}

#[test]
fn test_parallel_aggregation_from_files() {
    let temp_dir = tempdir().expect("Failed to create temp dir");
    let zones_path = temp_dir.path().join("zones.txt");
    let values_path = temp_dir.path().join("values.txt");

    let mut zones_txt = String::new();
    let mut values_txt = String::new();
    for row in 0..50 {
        let zone_row: Vec<String> = (0..20).map(|col| ((row / 10) * 2 + col / 10).to_string()).collect();
        let value_row: Vec<String> = (0..20).map(|col| (row * 20 + col).to_string()).collect();
        zones_txt.push_str(&zone_row.join(" "));
        zones_txt.push('\n');
        values_txt.push_str(&value_row.join(" "));
        values_txt.push('\n');
    }
    fs::write(&zones_path, zones_txt).expect("Failed to write zones");
    fs::write(&values_path, values_txt).expect("Failed to write values");

    let zones: Grid<u8> = load_typed(&zones_path).expect("Failed to load zones");
    let values: Grid<f64> = load_typed(&values_path).expect("Failed to load values");

    let sequential = ZonalAggregator::default()
        .aggregate(&zones, &values)
        .expect("Sequential aggregation failed");
    let parallel = ZonalAggregator::new(AggregatorConfig::default().with_mode(ProcessingMode::Parallel))
        .aggregate(&zones, &values)
        .expect("Parallel aggregation failed");

    // Integer-valued inputs sum exactly in any order
    assert_eq!(sequential, parallel);
    assert_eq!(sequential.shape(), &[50, 20]);

    // Zone 0 covers rows 0..10, cols 0..10: mean of row*20+col
    assert_eq!(sequential.get(&[0, 0]), Some(94.5));
}

#[test]
fn test_netcdf_round_trip() {
    let temp_dir = tempdir().expect("Failed to create temp dir");
    let output_path = temp_dir.path().join("zonal_mean.nc");

    let zones = Grid::from_rows(vec![vec![0, 0, 1], vec![1, 2, 2]]).expect("Invalid zones");
    let values = Grid::from_rows(vec![vec![1.0, 2.0, 3.0], vec![5.0, f64::NAN, 4.0]])
        .expect("Invalid values");
    let result = ZonalAggregator::default()
        .aggregate(&zones, &values)
        .expect("Aggregation failed");

    write_grid_to_netcdf(&result, "zonal_mean", "Zonal mean of test values", &output_path)
        .expect("Failed to write NetCDF");

    // Verify the output file was created and contains expected data
    let file = netcdf::open(&output_path).expect("Failed to open NetCDF output");
    let var = file.variable("zonal_mean").expect("Variable should exist");
    assert_eq!(var.dimensions().len(), 2);
    assert_eq!(var.dimensions()[0].name(), "y");
    assert_eq!(var.dimensions()[1].name(), "x");
    assert_eq!(var.dimensions()[0].len(), 2);
    assert_eq!(var.dimensions()[1].len(), 3);
    assert!(file.attribute("history").is_some());

    let read_back = load_netcdf_grid(&output_path, "zonal_mean").expect("Failed to read back");
    assert_eq!(read_back.shape(), &[2, 3]);
    assert_eq!(read_back.get(&[0, 0]), Some(1.5));
    assert_eq!(read_back.get(&[1, 0]), Some(4.0));
    assert!(read_back.get(&[1, 1]).unwrap().is_nan());

    // Writing again replaces the file
    let flat = Grid::from_shape_vec(&[3], vec![1.0, 2.0, 3.0]).expect("Invalid grid");
    NetCDFWriter::new(&output_path)
        .write_grid(&flat, "values", "flat values")
        .expect("Failed to overwrite NetCDF");
    let read_back = load_netcdf_grid(&output_path, "values").expect("Failed to read back");
    assert_eq!(read_back.shape(), &[3]);

    match load_netcdf_grid(&output_path, "zonal_mean") {
        Err(ZonalError::VariableNotFound { var }) => assert_eq!(var, "zonal_mean"),
        other => panic!("Expected VariableNotFound error, got {:?}", other),
    }
}

#[test]
fn test_netcdf_rejects_empty_and_high_rank_grids() {
    let temp_dir = tempdir().expect("Failed to create temp dir");
    let output_path = temp_dir.path().join("bad.nc");

    let empty = Grid::<f64>::from_shape_vec(&[0], vec![]).expect("Invalid grid");
    assert!(write_grid_to_netcdf(&empty, "v", "empty", &output_path).is_err());

    let cube = Grid::filled(&[2, 2, 2], 1.0_f64);
    assert!(write_grid_to_netcdf(&cube, "v", "cube", &output_path).is_err());
}
