//! Standalone data sources and the sequential fallback chain over them.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::api::TabularRow;
use crate::core::RawValue;
use crate::error::{StreamGraphError, StreamGraphResult};

const MIN_COLUMNS: usize = 2;

/// Anything that can produce tabular rows for a standalone render.
pub trait DataSource {
    /// Human-readable location, used in logs and exhaustion errors.
    fn describe(&self) -> String;

    fn load(&self) -> StreamGraphResult<Vec<TabularRow>>;
}

/// CSV file with a header row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvFileSource {
    path: PathBuf,
}

impl CsvFileSource {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DataSource for CsvFileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn load(&self) -> StreamGraphResult<Vec<TabularRow>> {
        let file = File::open(&self.path)?;
        parse_csv_rows(file)
    }
}

/// Rows already in memory, e.g. produced by another loader.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct InMemorySource {
    name: String,
    rows: Vec<TabularRow>,
}

impl InMemorySource {
    #[must_use]
    pub fn new(name: impl Into<String>, rows: Vec<TabularRow>) -> Self {
        Self {
            name: name.into(),
            rows,
        }
    }
}

impl DataSource for InMemorySource {
    fn describe(&self) -> String {
        self.name.clone()
    }

    fn load(&self) -> StreamGraphResult<Vec<TabularRow>> {
        Ok(self.rows.clone())
    }
}

/// Reads CSV with a header row into auto-typed tabular rows.
///
/// Empty cells become null, `true`/`false` booleans, numeric text numbers;
/// everything else stays text. Short rows are padded with nulls.
pub fn parse_csv_rows<R: Read>(reader: R) -> StreamGraphResult<Vec<TabularRow>> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);
    let headers = reader.headers()?.clone();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let row: TabularRow = headers
            .iter()
            .enumerate()
            .map(|(index, header)| {
                let value = record.get(index).map_or(RawValue::Null, auto_type);
                (header.to_owned(), value)
            })
            .collect();
        rows.push(row);
    }
    debug!(rows = rows.len(), columns = headers.len(), "parsed csv rows");
    Ok(rows)
}

/// Infers the scalar type of one CSV cell.
#[must_use]
pub fn auto_type(cell: &str) -> RawValue {
    let trimmed = cell.trim();
    if trimmed.is_empty() {
        return RawValue::Null;
    }
    match trimmed {
        "true" => return RawValue::Bool(true),
        "false" => return RawValue::Bool(false),
        _ => {}
    }
    if trimmed.bytes().any(|byte| byte.is_ascii_digit()) {
        if let Ok(number) = trimmed.parse::<f64>() {
            if number.is_finite() {
                return RawValue::Number(number);
            }
        }
    }
    RawValue::text(trimmed)
}

fn check_candidate(rows: &[TabularRow]) -> Result<(), String> {
    let Some(first) = rows.first() else {
        return Err("no rows".to_owned());
    };
    if first.len() < MIN_COLUMNS {
        return Err(format!("only {} column(s)", first.len()));
    }
    Ok(())
}

/// Tries each source in order and returns the first valid row set.
///
/// A source that fails to load, yields no rows, or has fewer than two
/// columns is logged and skipped.
pub fn load_first_available(sources: &[Box<dyn DataSource>]) -> StreamGraphResult<Vec<TabularRow>> {
    let mut attempted = Vec::with_capacity(sources.len());
    for source in sources {
        let name = source.describe();
        match source.load() {
            Ok(rows) => match check_candidate(&rows) {
                Ok(()) => {
                    info!(source = %name, rows = rows.len(), "loaded data source");
                    return Ok(rows);
                }
                Err(reason) => warn!(source = %name, %reason, "skipping invalid data source"),
            },
            Err(err) => warn!(source = %name, error = %err, "failed to load data source"),
        }
        attempted.push(name);
    }
    Err(StreamGraphError::DataSourcesExhausted { attempted })
}
