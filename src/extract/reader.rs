use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use calamine::{Reader, open_workbook_auto};
use csv::{ReaderBuilder, StringRecord, Trim};
use serde::Deserialize;
use tracing::trace;

use crate::types::ReportError;

/// Column contract of the upstream extract format. `REJECT_MOTIVE_DESCRITION`
/// is misspelled upstream; the header must match it verbatim.
pub const REQUIRED_COLUMNS: [&str; 6] = [
    "ENDTOENDID",
    "DB_PARTIC_NAME",
    "CR_PARTIC_NAME",
    "TR_STATUS_NAME",
    "BANK_OP_CODE",
    "REJECT_MOTIVE_DESCRITION"
];

/// Operation codes excluded from the corpus before any aggregation.
pub const EXCLUDED_OP_CODES: [&str; 2] = ["CSDC", "PMCT"];

/// One payment row projected down to the six columns the report consumes.
///
/// Extracts carry many more columns; everything outside this projection is
/// dropped at read time. Read once, immutable afterwards.
#[derive(Debug, Clone, Deserialize)]
pub struct TransactionRecord {
    #[serde(rename = "ENDTOENDID")]
    pub end_to_end_id: String,
    #[serde(rename = "DB_PARTIC_NAME")]
    pub debtor: String,
    #[serde(rename = "CR_PARTIC_NAME")]
    pub creditor: String,
    #[serde(rename = "TR_STATUS_NAME")]
    pub status: String,
    #[serde(rename = "BANK_OP_CODE")]
    pub bank_op_code: String,
    #[serde(rename = "REJECT_MOTIVE_DESCRITION")]
    pub reject_motive: String
}

/// Reads one extract file and applies the record filter: project to the six
/// required columns and drop rows carrying an excluded operation code.
///
/// # Errors
/// Returns `ReportError` if:
/// - The file extension is neither `.csv` nor `.xlsx`.
/// - A required column is missing (names the file and every missing column).
/// - The underlying CSV or workbook read fails.
pub fn read_extract(path: &Path) -> Result<Vec<TransactionRecord>, ReportError> {
    let extension = path
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();

    let rows = match extension.as_str() {
        "csv" => read_csv_rows(path)?,
        "xlsx" => read_xlsx_rows(path)?,
        _ => return Err(ReportError::unsupported_extension(path))
    };

    project_records(path, &rows)
}

fn read_csv_rows(path: &Path) -> Result<Vec<Vec<String>>, ReportError> {
    let file = File::open(path).map_err(|error| ReportError::io(path, error))?;

    let mut reader = ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .has_headers(false)
        .from_reader(BufReader::new(file));

    let mut rows = Vec::new();

    for result in reader.records() {
        let record = result.map_err(|error| ReportError::csv(path, error))?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    Ok(rows)
}

fn read_xlsx_rows(path: &Path) -> Result<Vec<Vec<String>>, ReportError> {
    let mut workbook = open_workbook_auto(path).map_err(|error| ReportError::sheet(path, error))?;

    let Some(sheet) = workbook.sheet_names().first().cloned() else {
        return Ok(Vec::new());
    };

    let range = workbook
        .worksheet_range(&sheet)
        .map_err(|error| ReportError::sheet(path, error))?;

    let rows = range
        .rows()
        .map(|row| {
            row.iter()
                .map(|cell| cell.to_string().trim().to_string())
                .collect()
        })
        .collect();

    Ok(rows)
}

fn project_records(path: &Path, rows: &[Vec<String>]) -> Result<Vec<TransactionRecord>, ReportError> {
    // An empty extract has no header row, so every required column is absent.
    let Some((header, data)) = rows.split_first() else {
        return Err(ReportError::missing_columns(path, required_column_names()));
    };

    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|column| !header.iter().any(|cell| cell == *column))
        .map(|column| column.to_string())
        .collect();

    if !missing.is_empty() {
        return Err(ReportError::missing_columns(path, missing));
    }

    let headers = StringRecord::from(header.clone());
    let mut records = Vec::with_capacity(data.len());

    for row in data {
        let mut record = StringRecord::from(row.clone());

        // Null-fill: short rows pad out to empty strings before field mapping.
        while record.len() < headers.len() {
            record.push_field("");
        }

        let parsed: TransactionRecord = record
            .deserialize(Some(&headers))
            .map_err(|error| ReportError::csv(path, error))?;

        if EXCLUDED_OP_CODES.contains(&parsed.bank_op_code.as_str()) {
            trace!(
                "Excluding [{}] (operation code {})",
                parsed.end_to_end_id, parsed.bank_op_code
            );
            continue;
        }

        records.push(parsed);
    }

    Ok(records)
}

fn required_column_names() -> Vec<String> {
    REQUIRED_COLUMNS.iter().map(|column| column.to_string()).collect()
}
