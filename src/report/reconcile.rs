use std::collections::{HashMap, HashSet};

use crate::aggregate::{
    CreditorAggregate, CreditorRow, DebtorAggregate, GRAND_TOTAL_COLUMN, PARTICIPANT_COLUMN,
    SENT_POSTED_COLUMN, SUCCESS_COLUMN, format_percent
};
use crate::types::Count;

/// Participant-name value of the synthetic summary row.
pub const GRAND_TOTAL_ROW_LABEL: &str = "GRAND TOTAL";

/// One report cell. Absence is modeled explicitly instead of overloading a
/// zero count: a participant that genuinely settled nothing keeps its `0`,
/// while a cell with no data behind it stays blank.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Count(Count),
    Text(String),
    Blank
}

impl Cell {
    pub fn render(&self) -> String {
        match self {
            Cell::Count(value) => value.to_string(),
            Cell::Text(text) => text.clone(),
            Cell::Blank => String::new()
        }
    }

    fn count(&self) -> Option<Count> {
        match self {
            Cell::Count(value) => Some(*value),
            _ => None
        }
    }
}

/// The reconciled report, ready for export: ordered column names and one row
/// of cells per participant, the `GRAND TOTAL` row last.
#[derive(Debug, Clone)]
pub struct ReportTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Cell>>
}

/// Full outer join of the two aggregates on participant name.
///
/// Debtor rows come first (sorted), then creditor-only participants
/// (sorted); cells for the side a participant is missing from stay blank.
/// The appended `GRAND TOTAL` row holds column-wise sums of every numeric
/// column and the arithmetic mean of the per-participant success
/// percentages. Participants without a success value (debtor-only) do not
/// weigh into that mean.
pub fn reconcile(debtors: &DebtorAggregate, creditors: &CreditorAggregate) -> ReportTable {
    let mut columns = vec![PARTICIPANT_COLUMN.to_string(), SENT_POSTED_COLUMN.to_string()];
    columns.extend(creditors.count_columns.iter().cloned());
    columns.push(GRAND_TOTAL_COLUMN.to_string());
    columns.push(SUCCESS_COLUMN.to_string());

    let creditor_by_name: HashMap<&str, &CreditorRow> = creditors
        .rows
        .iter()
        .map(|row| (row.participant.as_str(), row))
        .collect();

    let debtor_names: HashSet<&str> = debtors
        .rows
        .iter()
        .map(|row| row.participant.as_str())
        .collect();

    // Count columns, Grand Total and Success.
    let creditor_width = creditors.count_columns.len() + 2;
    let mut rows = Vec::new();

    for debtor in &debtors.rows {
        let mut row = vec![
            Cell::Text(debtor.participant.clone()),
            Cell::Count(debtor.sent_posted),
        ];

        match creditor_by_name.get(debtor.participant.as_str()) {
            Some(creditor) => push_creditor_cells(&mut row, creditor),
            None => row.extend(std::iter::repeat_with(|| Cell::Blank).take(creditor_width))
        }

        rows.push(row);
    }

    for creditor in &creditors.rows {
        if debtor_names.contains(creditor.participant.as_str()) {
            continue;
        }

        let mut row = vec![Cell::Text(creditor.participant.clone()), Cell::Blank];
        push_creditor_cells(&mut row, creditor);
        rows.push(row);
    }

    let total = grand_total_row(&columns, &rows);
    rows.push(total);

    ReportTable { columns, rows }
}

fn push_creditor_cells(row: &mut Vec<Cell>, creditor: &CreditorRow) {
    for count in &creditor.counts {
        row.push(match count {
            Some(value) => Cell::Count(*value),
            None => Cell::Blank
        });
    }

    row.push(Cell::Count(creditor.grand_total));
    row.push(Cell::Text(creditor.success.clone()));
}

fn grand_total_row(columns: &[String], rows: &[Vec<Cell>]) -> Vec<Cell> {
    let mut total = vec![Cell::Text(GRAND_TOTAL_ROW_LABEL.to_string())];

    // Every column between the participant name and Success holds counts.
    for column in 1..columns.len() - 1 {
        let mut sum = 0;
        let mut observed = false;

        for row in rows {
            if let Some(value) = row[column].count() {
                sum += value;
                observed = true;
            }
        }

        total.push(if observed { Cell::Count(sum) } else { Cell::Blank });
    }

    let success_column = columns.len() - 1;
    let mut percentages = Vec::new();

    for row in rows {
        if let Cell::Text(text) = &row[success_column]
            && let Ok(value) = text.trim_end_matches('%').parse::<f64>()
        {
            percentages.push(value);
        }
    }

    total.push(if percentages.is_empty() {
        Cell::Blank
    } else {
        let mean = percentages.iter().sum::<f64>() / percentages.len() as f64;
        Cell::Text(format_percent(mean))
    });

    total
}
