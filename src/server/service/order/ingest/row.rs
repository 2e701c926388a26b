//! Column mapping and per-row validation for uploaded orders.

use std::{collections::HashMap, fmt};

use chrono::NaiveDateTime;

use crate::server::{
    service::order::{
        ingest::sheet::Cell, CUSTOMER_NAME_MAX_LEN, PHONE_MAX_LEN, SUPPLIER_NAME_MAX_LEN,
    },
    util::time::{excel_serial_to_datetime, parse_datetime},
};

/// Order fields that can be read from an upload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Field {
    SupplierName,
    CustomerName,
    Amount,
    IssueTime,
    Phone,
}

impl Field {
    pub const ALL: [Field; 5] = [
        Field::SupplierName,
        Field::CustomerName,
        Field::Amount,
        Field::IssueTime,
        Field::Phone,
    ];

    /// Fields without which a row cannot become an order
    pub const REQUIRED: [Field; 3] = [Field::CustomerName, Field::Amount, Field::Phone];

    pub fn internal_name(&self) -> &'static str {
        match self {
            Self::SupplierName => "supplier_name",
            Self::CustomerName => "customer_name",
            Self::Amount => "amount",
            Self::IssueTime => "issue_time",
            Self::Phone => "phone",
        }
    }

    /// Header used for the field in uploaded spreadsheets
    pub fn header(&self) -> &'static str {
        match self {
            Self::SupplierName => "供应商名称",
            Self::CustomerName => "客户名称",
            Self::Amount => "金额",
            Self::IssueTime => "发放时间",
            Self::Phone => "电话",
        }
    }

    /// Resolves a header cell to a field, accepting either the spreadsheet header or the
    /// internal field name
    pub fn from_header(header: &str) -> Option<Self> {
        let header = header.trim();

        Self::ALL
            .into_iter()
            .find(|field| field.header() == header || field.internal_name() == header)
    }
}

/// Position of each recognised field among the uploaded columns.
///
/// Unrecognised columns are ignored. If a field appears more than once, the leftmost column
/// wins.
#[derive(Clone, Debug, Default)]
pub struct ColumnMap {
    columns: HashMap<Field, usize>,
}

impl ColumnMap {
    pub fn from_headers(headers: &[String]) -> Self {
        let mut columns = HashMap::new();

        for (index, header) in headers.iter().enumerate() {
            if let Some(field) = Field::from_header(header) {
                columns.entry(field).or_insert(index);
            }
        }

        Self { columns }
    }

    pub fn contains(&self, field: Field) -> bool {
        self.columns.contains_key(&field)
    }

    /// Required fields that no column maps to, in declaration order
    pub fn missing_required(&self) -> Vec<Field> {
        Field::REQUIRED
            .into_iter()
            .filter(|field| !self.contains(*field))
            .collect()
    }

    /// The cell of `row` holding `field`, `None` if unmapped or beyond the end of the row
    pub fn cell<'r>(&self, row: &'r [Cell], field: Field) -> Option<&'r Cell> {
        self.columns.get(&field).and_then(|index| row.get(*index))
    }

    fn non_empty_cell<'r>(&self, row: &'r [Cell], field: Field) -> Option<&'r Cell> {
        self.cell(row, field).filter(|cell| !cell.is_empty())
    }
}

/// Category of a row-level ingestion problem.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WarningKind {
    /// Customer name, amount, or phone is missing; row skipped
    MissingRequiredData,
    /// A value could not be converted to its field type; row skipped
    TypeCoercionError,
    /// Issue time was unparseable and replaced by the ingestion time; row kept
    InvalidDateFallback,
    /// Unexpected failure while building the record; row skipped
    UnknownRowError,
    /// No free identifier could be generated; row skipped
    GenerationExhausted,
}

impl WarningKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MissingRequiredData => "MissingRequiredData",
            Self::TypeCoercionError => "TypeCoercionError",
            Self::InvalidDateFallback => "InvalidDateFallback",
            Self::UnknownRowError => "UnknownRowError",
            Self::GenerationExhausted => "GenerationExhausted",
        }
    }

    /// Whether a warning of this kind means the row was not persisted
    pub fn skips_row(&self) -> bool {
        !matches!(self, Self::InvalidDateFallback)
    }
}

/// A non-fatal problem with one uploaded row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RowWarning {
    /// 1-based spreadsheet row number, counting the header row
    pub row: usize,
    pub kind: WarningKind,
    pub detail: String,
}

impl RowWarning {
    pub fn new(row: usize, kind: WarningKind, detail: impl Into<String>) -> Self {
        Self {
            row,
            kind,
            detail: detail.into(),
        }
    }
}

impl fmt::Display for RowWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Row {}: [{}] {}", self.row, self.kind.as_str(), self.detail)
    }
}

/// Converts a 0-based data row index into the spreadsheet row number shown to users.
pub fn spreadsheet_row_number(data_index: usize) -> usize {
    data_index + 2
}

/// A row whose values passed validation, still lacking generated identifiers.
#[derive(Clone, Debug, PartialEq)]
pub struct ValidRow {
    /// Spreadsheet row number the values came from
    pub row: usize,
    pub supplier_name: String,
    pub customer_name: String,
    pub amount: f64,
    pub issue_time: NaiveDateTime,
    pub phone: String,
}

/// Result of validating one row: either a record to persist (with an optional non-fatal
/// warning) or a skip with its reason.
#[derive(Clone, Debug, PartialEq)]
pub enum RowOutcome {
    Valid {
        row: ValidRow,
        warning: Option<RowWarning>,
    },
    Skipped(RowWarning),
}

/// Validates and coerces one data row.
///
/// # Arguments
/// - `columns` - Mapping from fields to column positions
/// - `data_index` - 0-based position of the row among data rows
/// - `cells` - The row's cells
/// - `now` - Ingestion instant, used when the issue time is absent or unparseable
pub fn validate_row(
    columns: &ColumnMap,
    data_index: usize,
    cells: &[Cell],
    now: NaiveDateTime,
) -> RowOutcome {
    let row = spreadsheet_row_number(data_index);

    let missing: Vec<&str> = Field::REQUIRED
        .into_iter()
        .filter(|field| columns.non_empty_cell(cells, *field).is_none())
        .map(|field| field.header())
        .collect();

    if !missing.is_empty() {
        return RowOutcome::Skipped(RowWarning::new(
            row,
            WarningKind::MissingRequiredData,
            format!("Missing required data ({}), row skipped.", missing.join(", ")),
        ));
    }

    let amount = match columns
        .cell(cells, Field::Amount)
        .map(coerce_amount)
        .unwrap_or(Err("missing".to_string()))
    {
        Ok(amount) => amount,
        Err(reason) => {
            return RowOutcome::Skipped(RowWarning::new(
                row,
                WarningKind::TypeCoercionError,
                format!("Invalid amount ({}), row skipped.", reason),
            ))
        }
    };

    let customer_name = columns
        .cell(cells, Field::CustomerName)
        .map(Cell::to_text)
        .unwrap_or_default();
    let phone = columns
        .cell(cells, Field::Phone)
        .map(Cell::to_text)
        .unwrap_or_default();
    let supplier_name = columns
        .cell(cells, Field::SupplierName)
        .map(Cell::to_text)
        .unwrap_or_default();

    // Column widths match the order table, an oversized value would fail the whole commit
    let oversized: Vec<String> = [
        (Field::CustomerName, &customer_name, CUSTOMER_NAME_MAX_LEN),
        (Field::Phone, &phone, PHONE_MAX_LEN),
        (Field::SupplierName, &supplier_name, SUPPLIER_NAME_MAX_LEN),
    ]
    .into_iter()
    .filter(|(_, value, max_len)| value.chars().count() > *max_len)
    .map(|(field, _, max_len)| format!("{} exceeds {} characters", field.header(), max_len))
    .collect();

    if !oversized.is_empty() {
        return RowOutcome::Skipped(RowWarning::new(
            row,
            WarningKind::TypeCoercionError,
            format!("Value too long ({}), row skipped.", oversized.join(", ")),
        ));
    }

    let (issue_time, warning) = match columns.non_empty_cell(cells, Field::IssueTime) {
        None => (now, None),
        Some(cell) => match coerce_issue_time(cell) {
            Some(issue_time) => (issue_time, None),
            None => (
                now,
                Some(RowWarning::new(
                    row,
                    WarningKind::InvalidDateFallback,
                    format!(
                        "Issue time '{}' is invalid, the current time was used instead.",
                        cell.to_text()
                    ),
                )),
            ),
        },
    };

    RowOutcome::Valid {
        row: ValidRow {
            row,
            supplier_name,
            customer_name,
            amount,
            issue_time,
            phone,
        },
        warning,
    }
}

fn coerce_amount(cell: &Cell) -> Result<f64, String> {
    let amount = match cell {
        Cell::Number(n) => *n,
        Cell::Text(text) => text
            .trim()
            .parse::<f64>()
            .map_err(|_| format!("'{}' is not a number", text.trim()))?,
        Cell::Bool(_) | Cell::DateTime(_) => {
            return Err(format!("'{}' is not a number", cell.to_text()))
        }
        Cell::Empty => return Err("missing".to_string()),
    };

    if !amount.is_finite() {
        return Err(format!("'{}' is not a finite number", cell.to_text()));
    }
    if amount < 0.0 {
        return Err(format!("{} is negative", amount));
    }

    Ok(amount)
}

fn coerce_issue_time(cell: &Cell) -> Option<NaiveDateTime> {
    match cell {
        Cell::DateTime(dt) => Some(*dt),
        Cell::Number(serial) => excel_serial_to_datetime(*serial),
        Cell::Text(text) => parse_datetime(text),
        Cell::Bool(_) | Cell::Empty => None,
    }
}
