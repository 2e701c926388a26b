//! Reading uploaded tabular files into a uniform grid of cells.
//!
//! Spreadsheet formats are read with `calamine` (first worksheet only) and CSV with the `csv`
//! crate. The first row is always the header row.

use std::{io::Cursor, path::Path};

use calamine::{open_workbook_auto_from_rs, Data, Reader};
use chrono::NaiveDateTime;

use crate::server::{error::ingest::IngestError, util::time::excel_serial_to_datetime};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Supported upload formats, chosen by file extension.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FileKind {
    Spreadsheet,
    Csv,
}

impl FileKind {
    /// Determines the file kind from the extension of `filename`, ignoring case
    pub fn from_filename(filename: &str) -> Result<Self, IngestError> {
        let extension = Path::new(filename)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .unwrap_or_default();

        match extension.as_str() {
            "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => Ok(Self::Spreadsheet),
            "csv" => Ok(Self::Csv),
            _ => Err(IngestError::UnsupportedFileType(filename.to_string())),
        }
    }
}

/// A single loosely-typed cell value.
#[derive(Clone, Debug, PartialEq)]
pub enum Cell {
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
    DateTime(NaiveDateTime),
}

impl Cell {
    /// Whether the cell holds no value, treating whitespace-only text as empty
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Text(text) => text.trim().is_empty(),
            _ => false,
        }
    }

    /// Renders the cell as trimmed text
    ///
    /// Whole numbers are rendered without a fractional part so that phone numbers stored as
    /// numeric cells come out as `13800138000` rather than `13800138000.0`.
    pub fn to_text(&self) -> String {
        match self {
            Self::Empty => String::new(),
            Self::Text(text) => text.trim().to_string(),
            Self::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => format!("{}", *n as i64),
            Self::Number(n) => n.to_string(),
            Self::Bool(b) => b.to_string(),
            Self::DateTime(dt) => dt.to_string(),
        }
    }
}

impl From<&Data> for Cell {
    fn from(data: &Data) -> Self {
        match data {
            Data::Empty => Cell::Empty,
            Data::String(s) if s.trim().is_empty() => Cell::Empty,
            Data::String(s) => Cell::Text(s.clone()),
            Data::Int(i) => Cell::Number(*i as f64),
            Data::Float(f) => Cell::Number(*f),
            Data::Bool(b) => Cell::Bool(*b),
            Data::DateTime(dt) => dt
                .as_datetime()
                .or_else(|| excel_serial_to_datetime(dt.as_f64()))
                .map(Cell::DateTime)
                .unwrap_or_else(|| Cell::Number(dt.as_f64())),
            Data::DateTimeIso(s) | Data::DurationIso(s) => Cell::Text(s.clone()),
            Data::Error(e) => Cell::Text(format!("#{:?}", e)),
        }
    }
}

/// Header row plus data rows of an uploaded file.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Table {
    /// Trimmed header names in column order
    pub headers: Vec<String>,
    /// Data rows in source order, rows may be shorter than the header
    pub rows: Vec<Vec<Cell>>,
}

impl Table {
    fn from_rows(mut rows: Vec<Vec<Cell>>) -> Result<Self, IngestError> {
        if rows.is_empty() {
            return Err(IngestError::EmptyFile);
        }

        let headers = rows
            .remove(0)
            .iter()
            .map(|cell| cell.to_text())
            .collect::<Vec<_>>();

        if headers.iter().all(|header| header.is_empty()) {
            return Err(IngestError::EmptyFile);
        }

        Ok(Self { headers, rows })
    }
}

/// Reads `bytes` into a [`Table`], choosing the parser from the extension of `filename`
///
/// # Returns
/// - `Ok(Table)` - Headers and data rows of the first worksheet
/// - `Err(IngestError::UnsupportedFileType)` - Extension is not a supported format
/// - `Err(IngestError::UnreadableFile)` - Content could not be parsed as the claimed format
/// - `Err(IngestError::EmptyFile)` - The file has no header row
pub fn read_table(filename: &str, bytes: Vec<u8>) -> Result<Table, IngestError> {
    let rows = match FileKind::from_filename(filename)? {
        FileKind::Spreadsheet => read_spreadsheet_rows(bytes)?,
        FileKind::Csv => read_csv_rows(&bytes)?,
    };

    Table::from_rows(rows)
}

fn read_spreadsheet_rows(bytes: Vec<u8>) -> Result<Vec<Vec<Cell>>, IngestError> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))
        .map_err(|e| IngestError::UnreadableFile(e.to_string()))?;

    let range = match workbook.worksheet_range_at(0) {
        Some(range) => range.map_err(|e| IngestError::UnreadableFile(e.to_string()))?,
        None => return Err(IngestError::EmptyFile),
    };

    Ok(range
        .rows()
        .map(|row| row.iter().map(Cell::from).collect())
        .collect())
}

fn read_csv_rows(bytes: &[u8]) -> Result<Vec<Vec<Cell>>, IngestError> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(bytes);

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| IngestError::UnreadableFile(e.to_string()))?;

        rows.push(
            record
                .iter()
                .map(|field| {
                    if field.trim().is_empty() {
                        Cell::Empty
                    } else {
                        Cell::Text(field.to_string())
                    }
                })
                .collect(),
        );
    }

    Ok(rows)
}
