use std::path::Path;

use csv::Writer;
use rust_xlsxwriter::Workbook;

use crate::report::reconcile::{Cell, ReportTable};
use crate::types::ReportError;

/// Both output files share this stem; only the extension differs.
pub const REPORT_BASENAME: &str = "3_hours";

/// Writes the reconciled report as `3_hours.csv` and `3_hours.xlsx` into the
/// target directory, silently overwriting previous runs. Neither file
/// carries a row index; both start with the header row.
pub fn write_report(table: &ReportTable, target: &Path) -> Result<(), ReportError> {
    write_delimited(table, &target.join(format!("{REPORT_BASENAME}.csv")))?;
    write_workbook(table, &target.join(format!("{REPORT_BASENAME}.xlsx")))
}

fn write_delimited(table: &ReportTable, path: &Path) -> Result<(), ReportError> {
    let mut writer = Writer::from_path(path).map_err(|error| ReportError::csv(path, error))?;

    writer
        .write_record(&table.columns)
        .map_err(|error| ReportError::csv(path, error))?;

    for row in &table.rows {
        writer
            .write_record(row.iter().map(Cell::render))
            .map_err(|error| ReportError::csv(path, error))?;
    }

    writer.flush().map_err(|error| ReportError::io(path, error))?;

    Ok(())
}

fn write_workbook(table: &ReportTable, path: &Path) -> Result<(), ReportError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    for (column, name) in table.columns.iter().enumerate() {
        worksheet
            .write_string(0, column as u16, name)
            .map_err(|error| ReportError::workbook(path, error))?;
    }

    for (index, row) in table.rows.iter().enumerate() {
        let row_index = (index + 1) as u32;

        for (column, cell) in row.iter().enumerate() {
            let column_index = column as u16;

            let written = match cell {
                Cell::Count(value) => worksheet.write_number(row_index, column_index, *value as f64),
                Cell::Text(text) => worksheet.write_string(row_index, column_index, text),
                Cell::Blank => continue
            };

            written.map_err(|error| ReportError::workbook(path, error))?;
        }
    }

    workbook.save(path).map_err(|error| ReportError::workbook(path, error))?;

    Ok(())
}
