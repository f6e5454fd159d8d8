use super::{Cell, GRAND_TOTAL_ROW_LABEL, reconcile, write_report};

use anyhow::Result;
use calamine::{Reader, open_workbook_auto};
use csv::ReaderBuilder;
use tempfile::TempDir;

use crate::aggregate::{LabelPolicy, aggregate_creditors, aggregate_debtors};
use crate::extract::TransactionRecord;

fn record(debtor: &str, creditor: &str, status: &str, motive: &str) -> TransactionRecord {
    TransactionRecord {
        end_to_end_id: "E2E".to_string(),
        debtor: debtor.to_string(),
        creditor: creditor.to_string(),
        status: status.to_string(),
        bank_op_code: "CTWA".to_string(),
        reject_motive: motive.to_string()
    }
}

/// The two-file scenario: extract A carries X as debtor, extract B carries X
/// as creditor. The missing counterparty cells group under the empty name,
/// which gets its own participant row.
fn scenario_corpus() -> Vec<TransactionRecord> {
    let mut corpus = Vec::new();

    for _ in 0..3 {
        corpus.push(record("X", "", "Posted", ""));
    }
    corpus.push(record("X", "", "Declined", "Lack of funds"));

    for _ in 0..3 {
        corpus.push(record("", "X", "Posted", ""));
    }
    corpus.push(record("", "X", "Declined", "Lack of funds"));

    corpus
}

fn scenario_table() -> super::ReportTable {
    let corpus = scenario_corpus();
    let debtors = aggregate_debtors(&corpus);
    let creditors = aggregate_creditors(&corpus, LabelPolicy::MergeDuplicates);
    reconcile(&debtors, &creditors)
}

#[test]
fn test_two_file_scenario_reconciles_to_expected_report() {
    let table = scenario_table();

    assert_eq!(
        table.columns,
        vec![
            "PARTICIPANT_NAME",
            "Sent Posted",
            "Received Posted",
            "Declined Lack of Funds",
            "Grand Total",
            "Success"
        ]
    );
    assert_eq!(table.rows.len(), 3);

    // The empty-name participant mirrors X exactly: file A's rows carry no
    // creditor, file B's rows no debtor.
    assert_eq!(
        table.rows[0],
        vec![
            Cell::Text(String::new()),
            Cell::Count(3),
            Cell::Count(3),
            Cell::Count(1),
            Cell::Count(4),
            Cell::Text("75.00%".to_string())
        ]
    );
    assert_eq!(
        table.rows[1],
        vec![
            Cell::Text("X".to_string()),
            Cell::Count(3),
            Cell::Count(3),
            Cell::Count(1),
            Cell::Count(4),
            Cell::Text("75.00%".to_string())
        ]
    );
    assert_eq!(
        table.rows[2],
        vec![
            Cell::Text(GRAND_TOTAL_ROW_LABEL.to_string()),
            Cell::Count(6),
            Cell::Count(6),
            Cell::Count(2),
            Cell::Count(8),
            Cell::Text("75.00%".to_string())
        ]
    );
}

#[test]
fn test_outer_join_keeps_participants_from_both_sides() {
    let corpus = vec![record("Delta Bank", "Charlie Bank", "Posted", "")];

    let debtors = aggregate_debtors(&corpus);
    let creditors = aggregate_creditors(&corpus, LabelPolicy::MergeDuplicates);
    let table = reconcile(&debtors, &creditors);

    // Debtor rows first, then creditor-only rows, then the summary.
    assert_eq!(table.rows.len(), 3);
    assert_eq!(table.rows[0][0], Cell::Text("Delta Bank".to_string()));
    assert_eq!(table.rows[1][0], Cell::Text("Charlie Bank".to_string()));

    // Missing-side cells stay blank.
    assert_eq!(table.rows[0][2], Cell::Blank);
    assert_eq!(*table.rows[0].last().unwrap(), Cell::Blank);
    assert_eq!(table.rows[1][1], Cell::Blank);
}

#[test]
fn test_genuine_zero_count_renders_zero_while_absent_stays_blank() {
    let corpus = vec![record("Y", "Charlie Bank", "Declined", "Lack of funds")];

    let debtors = aggregate_debtors(&corpus);
    let creditors = aggregate_creditors(&corpus, LabelPolicy::MergeDuplicates);
    let table = reconcile(&debtors, &creditors);

    // Y had rows but nothing settled: a genuine zero, not missing data.
    assert_eq!(table.rows[0][1], Cell::Count(0));
    assert_eq!(table.rows[0][1].render(), "0");
    // Charlie Bank never appears as a debtor: blank, not zero.
    assert_eq!(table.rows[1][1], Cell::Blank);
    assert_eq!(table.rows[1][1].render(), "");
}

#[test]
fn test_grand_total_row_sums_every_numeric_column() {
    let corpus = vec![
        record("A", "B", "Posted", ""),
        record("B", "A", "Posted", ""),
        record("B", "A", "Declined", "Lack of funds"),
        record("C", "B", "Declined", "Duplication"),
    ];

    let debtors = aggregate_debtors(&corpus);
    let creditors = aggregate_creditors(&corpus, LabelPolicy::MergeDuplicates);
    let table = reconcile(&debtors, &creditors);

    let total = table.rows.last().unwrap();
    assert_eq!(total[0], Cell::Text(GRAND_TOTAL_ROW_LABEL.to_string()));

    for column in 1..table.columns.len() - 1 {
        let expected: u64 = table.rows[..table.rows.len() - 1]
            .iter()
            .filter_map(|row| match row[column] {
                Cell::Count(value) => Some(value),
                _ => None
            })
            .sum();

        match &total[column] {
            Cell::Count(value) => assert_eq!(*value, expected),
            Cell::Blank => assert_eq!(expected, 0),
            other => panic!("unexpected total cell {other:?}")
        }
    }
}

#[test]
fn test_success_mean_excludes_debtor_only_participants() {
    // Delta only ever sends, so it has no success percentage.
    let corpus = vec![
        // Alpha: 1 of 2 settled -> 50.00%
        record("Delta", "Alpha", "Posted", ""),
        record("Delta", "Alpha", "Declined", "Lack of funds"),
        // Beta: 2 of 2 settled -> 100.00%
        record("Delta", "Beta", "Posted", ""),
        record("Delta", "Beta", "Posted", ""),
    ];

    let debtors = aggregate_debtors(&corpus);
    let creditors = aggregate_creditors(&corpus, LabelPolicy::MergeDuplicates);
    let table = reconcile(&debtors, &creditors);

    let total = table.rows.last().unwrap();
    assert_eq!(*total.last().unwrap(), Cell::Text("75.00%".to_string()));
}

#[test]
fn test_written_csv_round_trips_the_table() -> Result<()> {
    let table = scenario_table();
    let target = TempDir::new()?;

    write_report(&table, target.path())?;

    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .from_path(target.path().join("3_hours.csv"))?;

    let mut lines: Vec<Vec<String>> = Vec::new();

    for result in reader.records() {
        lines.push(result?.iter().map(str::to_string).collect());
    }

    assert_eq!(lines[0], table.columns);

    for (line, row) in lines[1..].iter().zip(&table.rows) {
        let rendered: Vec<String> = row.iter().map(Cell::render).collect();
        assert_eq!(*line, rendered);
    }

    assert_eq!(lines.len(), table.rows.len() + 1);

    Ok(())
}

#[test]
fn test_written_workbook_mirrors_the_table() -> Result<()> {
    let table = scenario_table();
    let target = TempDir::new()?;

    write_report(&table, target.path())?;

    let mut workbook = open_workbook_auto(target.path().join("3_hours.xlsx"))?;
    let sheet = workbook.sheet_names().first().cloned().unwrap();
    let range = workbook.worksheet_range(&sheet)?;
    let rows: Vec<Vec<String>> = range
        .rows()
        .map(|row| row.iter().map(|cell| cell.to_string()).collect())
        .collect();

    assert_eq!(rows[0], table.columns);
    assert_eq!(rows[1][0], "");
    assert_eq!(rows[2][0], "X");
    assert_eq!(rows[2][1], "3");
    assert_eq!(rows[2][4], "4");
    assert_eq!(rows[2][5], "75.00%");
    assert_eq!(rows[3][0], "GRAND TOTAL");

    Ok(())
}
