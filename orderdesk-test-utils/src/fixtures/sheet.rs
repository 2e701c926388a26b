//! In-memory spreadsheet uploads.
//!
//! `SheetFixture` collects a header row and data rows as strings and renders them either as
//! CSV or as a single-worksheet XLSX workbook. In XLSX output, cells that parse as numbers are
//! written as numeric cells and empty strings are left blank, mirroring what spreadsheet
//! software produces for hand-entered data.

use rust_xlsxwriter::Workbook;

use crate::{constant::SHEET_HEADERS, error::TestError};

#[derive(Clone, Debug, Default)]
pub struct SheetFixture {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl SheetFixture {
    /// Start a sheet with custom headers.
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Start a sheet with the full standard header row.
    pub fn standard() -> Self {
        Self::new(SHEET_HEADERS)
    }

    /// Append a data row.
    pub fn row<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rows.push(values.into_iter().map(Into::into).collect());
        self
    }

    /// Append a complete valid row for the standard headers.
    pub fn valid_row(self, supplier: &str, customer: &str, amount: &str, phone: &str) -> Self {
        self.row([supplier, customer, amount, "2024-03-01 09:30:00", phone])
    }

    pub fn to_csv(&self) -> Result<Vec<u8>, TestError> {
        let mut writer = csv::WriterBuilder::new()
            .flexible(true)
            .from_writer(Vec::new());

        writer.write_record(&self.headers)?;
        for row in &self.rows {
            writer.write_record(row)?;
        }

        writer
            .into_inner()
            .map_err(|e| TestError::CsvWriteError(e.to_string()))
    }

    pub fn to_xlsx(&self) -> Result<Vec<u8>, TestError> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();

        for (col, header) in self.headers.iter().enumerate() {
            worksheet.write_string(0, col as u16, header)?;
        }

        for (row_idx, row) in self.rows.iter().enumerate() {
            let row_num = row_idx as u32 + 1;
            for (col, value) in row.iter().enumerate() {
                if value.is_empty() {
                    continue;
                }
                match value.parse::<f64>() {
                    Ok(number) => worksheet.write_number(row_num, col as u16, number)?,
                    Err(_) => worksheet.write_string(row_num, col as u16, value)?,
                };
            }
        }

        Ok(workbook.save_to_buffer()?)
    }
}
