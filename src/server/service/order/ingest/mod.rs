//! Spreadsheet ingestion.
//!
//! An upload is read into a table, its headers are mapped onto order fields, and every data
//! row is validated in source order. Rows that fail validation are skipped with a warning;
//! the remaining rows receive generated identifiers and are committed in a single database
//! transaction, so a file is either persisted in full (minus skipped rows) or not at all.

pub mod row;
pub mod sheet;

use chrono::Utc;
use dioxus_logger::tracing;
use sea_orm::{DatabaseConnection, DatabaseTransaction, TransactionTrait};

use crate::{
    model::order::IngestResultDto,
    server::{
        data::order::{NewOrder, OrderRepository},
        error::{ingest::IngestError, order::OrderError, retry::is_unique_violation, Error},
        service::order::{
            identifier::{random_identifier, CandidateSource, IdentifierGenerator},
            ingest::{
                row::{validate_row, ColumnMap, RowOutcome, RowWarning, ValidRow, WarningKind},
                sheet::{read_table, Table},
            },
        },
    },
};

/// Attempts to insert one row when its identifiers collide with a concurrent insert.
const MAX_INSERT_ATTEMPTS: u32 = 3;

/// Outcome of ingesting one file.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct IngestResult {
    pub processed_count: usize,
    pub skipped_count: usize,
    /// Row warnings ordered by spreadsheet row
    pub warnings: Vec<RowWarning>,
}

impl IngestResult {
    pub fn message(&self) -> String {
        format!(
            "File processed. Added {} records, skipped {} records.",
            self.processed_count, self.skipped_count
        )
    }
}

impl From<IngestResult> for IngestResultDto {
    fn from(result: IngestResult) -> Self {
        Self {
            message: result.message(),
            processed_count: result.processed_count,
            skipped_count: result.skipped_count,
            warnings: result.warnings.iter().map(ToString::to_string).collect(),
        }
    }
}

enum RowInsertError {
    /// The row is skipped, the batch continues
    Skip(RowWarning),
    /// The batch must be rolled back
    Fatal(Error),
}

impl From<sea_orm::DbErr> for RowInsertError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Fatal(err.into())
    }
}

pub struct IngestService<'a> {
    db: &'a DatabaseConnection,
    candidate_source: CandidateSource,
}

impl<'a> IngestService<'a> {
    /// Creates a new instance of [`IngestService`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self {
            db,
            candidate_source: random_identifier,
        }
    }

    /// Replaces the source of identifier candidates
    pub fn with_candidate_source(mut self, candidate_source: CandidateSource) -> Self {
        self.candidate_source = candidate_source;
        self
    }

    /// Reads and ingests an uploaded file
    ///
    /// # Arguments
    /// - `filename` - Name of the uploaded file, its extension selects the parser
    /// - `bytes` - File content
    ///
    /// # Returns
    /// - `Ok(IngestResult)` - Counts and row warnings, rows may have been skipped
    /// - `Err(Error::IngestError)` - The file was rejected or the commit failed, nothing was
    ///   persisted
    pub async fn ingest(&self, filename: &str, bytes: Vec<u8>) -> Result<IngestResult, Error> {
        let table = read_table(filename, bytes)?;

        self.ingest_table(table).await
    }

    /// Validates every row of `table` and commits the valid ones as one batch
    pub async fn ingest_table(&self, table: Table) -> Result<IngestResult, Error> {
        let columns = ColumnMap::from_headers(&table.headers);

        let missing = columns.missing_required();
        if !missing.is_empty() {
            return Err(IngestError::MissingColumns(
                missing
                    .iter()
                    .map(|field| field.header().to_string())
                    .collect(),
            )
            .into());
        }

        let now = Utc::now().naive_utc();
        let mut result = IngestResult::default();
        let mut valid_rows = Vec::new();

        for (data_index, cells) in table.rows.iter().enumerate() {
            match validate_row(&columns, data_index, cells, now) {
                RowOutcome::Valid { row, warning } => {
                    if let Some(warning) = warning {
                        tracing::debug!("{}", warning);
                        result.warnings.push(warning);
                    }
                    valid_rows.push(row);
                }
                RowOutcome::Skipped(warning) => {
                    tracing::debug!("{}", warning);
                    result.warnings.push(warning);
                    result.skipped_count += 1;
                }
            }
        }

        if !valid_rows.is_empty() {
            let (processed_count, skipped) = self.commit_batch(valid_rows).await?;

            result.processed_count = processed_count;
            result.skipped_count += skipped.len();
            result.warnings.extend(skipped);
            result.warnings.sort_by_key(|warning| warning.row);
        }

        tracing::info!(
            "Ingested upload: {} records added, {} skipped",
            result.processed_count,
            result.skipped_count
        );

        Ok(result)
    }

    /// Inserts every validated row inside one transaction
    ///
    /// Each row is inserted under its own savepoint so a row whose identifiers cannot be
    /// settled is skipped without disturbing the rows around it. Any other database failure
    /// rolls back the whole batch.
    ///
    /// # Returns
    /// - `Ok((usize, Vec<RowWarning>))` - Number of rows persisted and warnings for rows skipped
    /// - `Err(Error::IngestError(IngestError::CommitFailure))` - Nothing was persisted
    async fn commit_batch(&self, rows: Vec<ValidRow>) -> Result<(usize, Vec<RowWarning>), Error> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| IngestError::CommitFailure(e.to_string()))?;

        let mut generator = IdentifierGenerator::new().with_candidate_source(self.candidate_source);
        let mut processed_count = 0;
        let mut skipped = Vec::new();

        for row in rows {
            match insert_row(&txn, &mut generator, row).await {
                Ok(()) => processed_count += 1,
                Err(RowInsertError::Skip(warning)) => {
                    tracing::debug!("{}", warning);
                    skipped.push(warning);
                }
                Err(RowInsertError::Fatal(err)) => {
                    if let Err(rollback_err) = txn.rollback().await {
                        tracing::error!("Failed to roll back upload batch: {}", rollback_err);
                    }

                    return Err(IngestError::CommitFailure(err.to_string()).into());
                }
            }
        }

        txn.commit()
            .await
            .map_err(|e| IngestError::CommitFailure(e.to_string()))?;

        Ok((processed_count, skipped))
    }
}

/// Generates identifiers for `row` and inserts it, regenerating on uniqueness violations
async fn insert_row(
    txn: &DatabaseTransaction,
    generator: &mut IdentifierGenerator,
    row: ValidRow,
) -> Result<(), RowInsertError> {
    for attempt in 1..=MAX_INSERT_ATTEMPTS {
        let savepoint = txn.begin().await?;

        let identifiers = async {
            let order_id = generator.generate_order_id(&savepoint).await?;
            let coupon_code = generator.generate_coupon_code(&savepoint).await?;

            Ok::<_, Error>((order_id, coupon_code))
        }
        .await;

        let (order_id, coupon_code) = match identifiers {
            Ok(identifiers) => identifiers,
            Err(e) => {
                savepoint.rollback().await?;
                return Err(RowInsertError::Skip(generation_warning(row.row, e)));
            }
        };

        let new_order = NewOrder {
            order_id,
            coupon_code,
            supplier_name: row.supplier_name.clone(),
            customer_name: row.customer_name.clone(),
            amount: row.amount,
            issue_time: row.issue_time,
            phone: row.phone.clone(),
        };

        match OrderRepository::new(&savepoint).insert(new_order).await {
            Ok(_) => {
                savepoint.commit().await?;
                return Ok(());
            }
            Err(e) if is_unique_violation(&e) => {
                tracing::warn!(
                    "Identifier collision inserting row {} (attempt {}/{}), regenerating",
                    row.row,
                    attempt,
                    MAX_INSERT_ATTEMPTS
                );
                savepoint.rollback().await?;
            }
            Err(e) => return Err(e.into()),
        }
    }

    Err(RowInsertError::Skip(RowWarning::new(
        row.row,
        WarningKind::GenerationExhausted,
        format!(
            "Identifiers collided {} times while saving, row skipped.",
            MAX_INSERT_ATTEMPTS
        ),
    )))
}

fn generation_warning(row: usize, err: Error) -> RowWarning {
    match err {
        Error::OrderError(err @ OrderError::GenerationExhausted { .. }) => RowWarning::new(
            row,
            WarningKind::GenerationExhausted,
            format!("{}, row skipped.", err),
        ),
        err => RowWarning::new(
            row,
            WarningKind::UnknownRowError,
            format!("Unexpected error creating the record, row skipped: {}", err),
        ),
    }
}
