mod support;

use airlens::dataset::{ColumnType, DatasetError, load_dataset};
use airlens::pollutant::Pollutant;
use support::fixtures::{AIR_QUALITY_CSV, write_file};

#[test]
fn loading_twice_yields_identical_tables() {
    let temp = tempfile::tempdir().expect("create tempdir");
    let path = write_file(temp.path(), "Air_Quality.csv", AIR_QUALITY_CSV);

    let first = load_dataset(&path).expect("first load");
    let second = load_dataset(&path).expect("second load");

    assert_eq!(first, second);
    assert_eq!(first.row_count(), 6);
    assert_eq!(first.column_count(), 11);
}

#[test]
fn column_types_follow_their_cells() {
    let temp = tempfile::tempdir().expect("create tempdir");
    let path = write_file(temp.path(), "Air_Quality.csv", AIR_QUALITY_CSV);
    let dataset = load_dataset(&path).expect("load");

    let dtype = |name: &str| dataset.column(name).expect(name).dtype();
    assert_eq!(dtype("Date"), ColumnType::Text);
    assert_eq!(dtype("City"), ColumnType::Text);
    assert_eq!(dtype("CO2"), ColumnType::Integer);
    assert_eq!(dtype("CO"), ColumnType::Float);
    assert_eq!(dtype("NO2"), ColumnType::Float);
    assert_eq!(dtype("PM2.5"), ColumnType::Float);
    assert_eq!(dtype("AQI"), ColumnType::Integer);
    assert_eq!(dtype("AQI_Bucket"), ColumnType::Text);

    let schema = dataset.schema();
    assert_eq!(schema.pollutants().len(), Pollutant::ALL.len());
    assert!(schema.absent_pollutants().is_empty());
    assert_eq!(schema.group().map(|(name, _)| name), Some("City"));
    assert_eq!(schema.target().map(|(name, _)| name), Some("AQI"));
}

#[test]
fn nonexistent_path_is_dataset_not_found() {
    let temp = tempfile::tempdir().expect("create tempdir");
    let missing = temp.path().join("nope.csv");

    let err = load_dataset(&missing).expect_err("missing file must fail");

    match err {
        DatasetError::DatasetNotFound { path } => assert_eq!(path, missing),
        other => panic!("expected DatasetNotFound, got {other:?}"),
    }
}

#[test]
fn inconsistent_row_is_a_parse_error_with_line() {
    let temp = tempfile::tempdir().expect("create tempdir");
    let path = write_file(
        temp.path(),
        "broken.csv",
        "City,CO,AQI\nDelhi,1.0,100\nMumbai,0.5\n",
    );

    let err = load_dataset(&path).expect_err("ragged row must fail");

    assert!(matches!(
        err,
        DatasetError::DatasetParseError { line: Some(3), .. }
    ));
}
