//! Immutable in-memory table loaded from the air-quality CSV.
//!
//! A [`Dataset`] is built once by [`load_dataset`] and then only read. Columns are stored
//! column-major with their inferred [`ColumnType`]; missing cells are `None`.

use std::fmt;
use std::path::{Path, PathBuf};

mod loader;
mod schema;

pub use loader::{DatasetError, MISSING_MARKERS, load_dataset, load_dataset_with};
pub use schema::{ColumnRoles, DatasetSchema};

/// Inferred storage type of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    /// Every cell present and integral.
    Integer,
    /// Numeric, possibly with missing cells.
    Float,
    /// Anything that is not numeric.
    Text,
}

impl ColumnType {
    pub fn is_numeric(self) -> bool {
        !matches!(self, ColumnType::Text)
    }

    /// Short type name shown in the overview table.
    pub fn label(self) -> &'static str {
        match self {
            ColumnType::Integer => "int64",
            ColumnType::Float => "float64",
            ColumnType::Text => "object",
        }
    }
}

/// Column values; numeric columns keep integers as `f64`.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnData {
    Numeric(Vec<Option<f64>>),
    Text(Vec<Option<String>>),
}

/// One named column of the table.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    name: String,
    dtype: ColumnType,
    data: ColumnData,
}

impl Column {
    pub(crate) fn new(name: String, dtype: ColumnType, data: ColumnData) -> Self {
        Self { name, dtype, data }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn dtype(&self) -> ColumnType {
        self.dtype
    }

    pub fn data(&self) -> &ColumnData {
        &self.data
    }

    /// Numeric values, or `None` for text columns.
    pub fn numeric(&self) -> Option<&[Option<f64>]> {
        match &self.data {
            ColumnData::Numeric(values) => Some(values),
            ColumnData::Text(_) => None,
        }
    }

    pub fn len(&self) -> usize {
        match &self.data {
            ColumnData::Numeric(values) => values.len(),
            ColumnData::Text(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Borrow a single cell.
    pub fn cell(&self, row: usize) -> Cell<'_> {
        match &self.data {
            ColumnData::Numeric(values) => match values.get(row).copied().flatten() {
                Some(value) if self.dtype == ColumnType::Integer => Cell::Integer(value),
                Some(value) => Cell::Float(value),
                None => Cell::Missing,
            },
            ColumnData::Text(values) => match values.get(row).and_then(|v| v.as_deref()) {
                Some(text) => Cell::Text(text),
                None => Cell::Missing,
            },
        }
    }

    /// Render a cell as a grouping key; missing cells have no key.
    pub fn key(&self, row: usize) -> Option<String> {
        match self.cell(row) {
            Cell::Missing => None,
            cell => Some(cell.to_string()),
        }
    }
}

/// Borrowed view of one table cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Cell<'a> {
    Missing,
    Integer(f64),
    Float(f64),
    Text(&'a str),
}

impl fmt::Display for Cell<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Missing => f.write_str("NaN"),
            Cell::Integer(value) => write!(f, "{value:.0}"),
            Cell::Float(value) if value.is_finite() && value.fract() == 0.0 => {
                write!(f, "{value:.1}")
            }
            Cell::Float(value) => write!(f, "{value}"),
            Cell::Text(text) => f.write_str(text),
        }
    }
}

/// Process-lifetime table of historical measurements.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    source: PathBuf,
    columns: Vec<Column>,
    row_count: usize,
    schema: DatasetSchema,
}

impl Dataset {
    pub(crate) fn new(source: PathBuf, columns: Vec<Column>, roles: &ColumnRoles) -> Self {
        let row_count = columns.first().map(Column::len).unwrap_or(0);
        let schema = DatasetSchema::resolve(&columns, roles);
        Self {
            source,
            columns,
            row_count,
            schema,
        }
    }

    /// File the table was read from.
    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Column by position; `index` comes from the resolved schema or a prior lookup.
    pub fn column_at(&self, index: usize) -> Option<&Column> {
        self.columns.get(index)
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|column| column.name == name)
    }

    /// Numeric columns in header order.
    pub fn numeric_columns(&self) -> impl Iterator<Item = &Column> {
        self.columns.iter().filter(|column| column.dtype.is_numeric())
    }

    pub fn schema(&self) -> &DatasetSchema {
        &self.schema
    }
}
