//! CSV loader for the air-quality table.

use std::collections::HashSet;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::{Column, ColumnData, ColumnRoles, ColumnType, Dataset};

/// Cell spellings treated as missing values.
pub const MISSING_MARKERS: &[&str] = &[
    "", "NA", "N/A", "n/a", "NaN", "nan", "-nan", "null", "NULL", "None", "#N/A",
];

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("Dataset not found at {path}")]
    DatasetNotFound { path: PathBuf },
    #[error("Failed to read dataset {path}: {source}")]
    DatasetRead { path: PathBuf, source: io::Error },
    #[error("Malformed dataset {path}{}: {message}", line_suffix(.line))]
    DatasetParseError {
        path: PathBuf,
        /// 1-based line of the offending record, when known.
        line: Option<u64>,
        message: String,
    },
}

fn line_suffix(line: &Option<u64>) -> String {
    line.map(|line| format!(" (line {line})")).unwrap_or_default()
}

/// Load a CSV table using the default `City`/`AQI` column roles.
pub fn load_dataset(path: &Path) -> Result<Dataset, DatasetError> {
    load_dataset_with(path, &ColumnRoles::default())
}

/// Load a CSV table, resolving the well-known columns with `roles`.
///
/// The header row names the columns exactly as written; only data fields are trimmed. Every
/// following record must have the same field count.
pub fn load_dataset_with(path: &Path, roles: &ColumnRoles) -> Result<Dataset, DatasetError> {
    let file = File::open(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => DatasetError::DatasetNotFound {
            path: path.to_path_buf(),
        },
        _ => DatasetError::DatasetRead {
            path: path.to_path_buf(),
            source,
        },
    })?;
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(false)
        .trim(csv::Trim::Fields)
        .from_reader(file);

    let headers = reader
        .headers()
        .map_err(|err| map_csv_error(path, err))?
        .iter()
        .map(str::to_string)
        .collect::<Vec<_>>();
    validate_headers(path, &headers)?;

    let mut raw: Vec<Vec<Option<String>>> = vec![Vec::new(); headers.len()];
    for record in reader.records() {
        let record = record.map_err(|err| map_csv_error(path, err))?;
        for (cells, field) in raw.iter_mut().zip(record.iter()) {
            cells.push(normalize_cell(field));
        }
    }

    let columns = headers
        .into_iter()
        .zip(raw)
        .map(|(name, cells)| build_column(name, cells))
        .collect::<Vec<_>>();
    let dataset = Dataset::new(path.to_path_buf(), columns, roles);
    tracing::info!(
        "Loaded dataset {} ({} rows x {} columns)",
        path.display(),
        dataset.row_count(),
        dataset.column_count()
    );
    if !dataset.schema().absent_pollutants().is_empty() {
        tracing::warn!(
            "Dataset has no numeric column for: {}",
            dataset
                .schema()
                .absent_pollutants()
                .iter()
                .map(|p| p.column_name())
                .collect::<Vec<_>>()
                .join(", ")
        );
    }
    Ok(dataset)
}

fn validate_headers(path: &Path, headers: &[String]) -> Result<(), DatasetError> {
    let header_error = |message: String| DatasetError::DatasetParseError {
        path: path.to_path_buf(),
        line: Some(1),
        message,
    };
    if headers.iter().all(|name| name.trim().is_empty()) {
        return Err(header_error("missing header row".to_string()));
    }
    let mut seen = HashSet::new();
    for (index, name) in headers.iter().enumerate() {
        if name.trim().is_empty() {
            return Err(header_error(format!("column {} has an empty name", index + 1)));
        }
        if !seen.insert(name.as_str()) {
            return Err(header_error(format!("duplicate column name '{name}'")));
        }
    }
    Ok(())
}

fn normalize_cell(field: &str) -> Option<String> {
    if MISSING_MARKERS.contains(&field) {
        None
    } else {
        Some(field.to_string())
    }
}

fn build_column(name: String, cells: Vec<Option<String>>) -> Column {
    let parsed = cells
        .iter()
        .map(|cell| cell.as_deref().map(str::parse::<f64>))
        .collect::<Vec<_>>();
    let numeric = parsed
        .iter()
        .all(|value| !matches!(value, Some(Err(_))));
    if !numeric {
        return Column::new(name, ColumnType::Text, ColumnData::Text(cells));
    }
    let all_integral = cells
        .iter()
        .all(|cell| cell.as_deref().is_some_and(|text| text.parse::<i64>().is_ok()));
    let dtype = if all_integral && !cells.is_empty() {
        ColumnType::Integer
    } else {
        ColumnType::Float
    };
    let values = parsed
        .into_iter()
        .map(|value| value.and_then(Result::ok))
        .collect();
    Column::new(name, dtype, ColumnData::Numeric(values))
}

fn map_csv_error(path: &Path, err: csv::Error) -> DatasetError {
    let line = err.position().map(csv::Position::line);
    match err.into_kind() {
        csv::ErrorKind::Io(source) => DatasetError::DatasetRead {
            path: path.to_path_buf(),
            source,
        },
        csv::ErrorKind::UnequalLengths {
            pos,
            expected_len,
            len,
        } => DatasetError::DatasetParseError {
            path: path.to_path_buf(),
            line: pos.map(|pos| pos.line()).or(line),
            message: format!("expected {expected_len} fields, found {len}"),
        },
        csv::ErrorKind::Utf8 { pos, err } => DatasetError::DatasetParseError {
            path: path.to_path_buf(),
            line: pos.map(|pos| pos.line()).or(line),
            message: format!("invalid UTF-8: {err}"),
        },
        other => DatasetError::DatasetParseError {
            path: path.to_path_buf(),
            line,
            message: format!("{other:?}"),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Cell;
    use crate::pollutant::Pollutant;
    use tempfile::tempdir;

    fn write_csv(dir: &Path, body: &str) -> PathBuf {
        let path = dir.join("aq.csv");
        std::fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn infers_column_types() {
        let dir = tempdir().unwrap();
        let path = write_csv(
            dir.path(),
            "Date,City,CO,PM2.5,Note\n\
             2024-01-01,Delhi,250,17.5,x\n\
             2024-01-02,Mumbai,300,NA,\n",
        );

        let dataset = load_dataset(&path).unwrap();

        let types: Vec<ColumnType> = dataset.columns().iter().map(Column::dtype).collect();
        assert_eq!(
            types,
            vec![
                ColumnType::Text,
                ColumnType::Text,
                ColumnType::Integer,
                ColumnType::Float,
                ColumnType::Text,
            ]
        );
        assert_eq!(dataset.column("PM2.5").unwrap().cell(1), Cell::Missing);
        assert_eq!(dataset.column("Note").unwrap().cell(1), Cell::Missing);
        assert_eq!(dataset.schema().pollutant(Pollutant::Co), Some(2));
    }

    #[test]
    fn integer_column_with_gap_becomes_float() {
        let dir = tempdir().unwrap();
        let path = write_csv(dir.path(), "CO,SO2\n1,2\n,3\n");

        let dataset = load_dataset(&path).unwrap();

        assert_eq!(dataset.column("CO").unwrap().dtype(), ColumnType::Float);
        assert_eq!(dataset.column("SO2").unwrap().dtype(), ColumnType::Integer);
    }

    #[test]
    fn all_missing_column_is_float() {
        let dir = tempdir().unwrap();
        let path = write_csv(dir.path(), "CO,O3\n1,NaN\n2,\n");
        let dataset = load_dataset(&path).unwrap();
        assert_eq!(dataset.column("O3").unwrap().dtype(), ColumnType::Float);
    }

    #[test]
    fn missing_file_is_not_found() {
        let dir = tempdir().unwrap();
        let err = load_dataset(&dir.path().join("absent.csv")).unwrap_err();
        assert!(matches!(err, DatasetError::DatasetNotFound { .. }));
    }

    #[test]
    fn ragged_row_reports_line() {
        let dir = tempdir().unwrap();
        let path = write_csv(dir.path(), "City,CO\nDelhi,1\nMumbai,2,3\n");

        let err = load_dataset(&path).unwrap_err();

        match err {
            DatasetError::DatasetParseError { line, message, .. } => {
                assert_eq!(line, Some(3));
                assert!(message.contains("expected 2 fields"), "{message}");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn duplicate_headers_are_rejected() {
        let dir = tempdir().unwrap();
        let path = write_csv(dir.path(), "CO,CO\n1,2\n");
        let err = load_dataset(&path).unwrap_err();
        assert!(err.to_string().contains("duplicate column name 'CO'"));
    }

    #[test]
    fn empty_file_is_a_parse_error() {
        let dir = tempdir().unwrap();
        let path = write_csv(dir.path(), "");
        let err = load_dataset(&path).unwrap_err();
        assert!(matches!(err, DatasetError::DatasetParseError { .. }));
    }

    #[test]
    fn header_names_are_kept_as_written() {
        let dir = tempdir().unwrap();
        let path = write_csv(dir.path(), "City, CO\nPune, 1.5 \n");

        let dataset = load_dataset(&path).unwrap();

        assert!(dataset.column("CO").is_none());
        assert_eq!(dataset.schema().pollutant(Pollutant::Co), None);
        let padded = dataset.column(" CO").unwrap();
        assert_eq!(padded.numeric(), Some(&[Some(1.5)][..]));
    }
}
