use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::extract::TransactionRecord;
use crate::labels::{POSTED_STATUS, derived_label};
use crate::types::Count;

use super::{RECEIVED_POSTED_COLUMN, format_percent};

/// How derived column labels that collide (because both dictionary lookups
/// missed) are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelPolicy {
    /// Colliding labels share one column; their counts are summed into the
    /// first occurrence. This keeps the merged shape the report always had,
    /// without dropping any count.
    MergeDuplicates,
    /// Colliding labels stay separate columns, disambiguated with a
    /// ` (2)`, ` (3)`… suffix in cross-tab order.
    KeepDistinct
}

/// Per-creditor pivot: received counts cross-tabulated by
/// (status, reject motive), plus the derived totals.
#[derive(Debug, Clone)]
pub struct CreditorAggregate {
    /// Count column headers, `Received Posted` first, then the remaining
    /// derived status/sub-status labels in cross-tab order.
    pub count_columns: Vec<String>,
    /// One row per distinct creditor name, sorted by participant.
    pub rows: Vec<CreditorRow>
}

#[derive(Debug, Clone)]
pub struct CreditorRow {
    pub participant: String,
    /// Aligned with `count_columns`; `None` means the combination was never
    /// observed for this participant, as opposed to a genuine zero.
    pub counts: Vec<Option<Count>>,
    pub grand_total: Count,
    pub success: String
}

/// Cross-tabulates the corpus by creditor name against every observed
/// (status, reject motive) combination.
///
/// Column keys are ordered lexicographically by (status, motive) before
/// label derivation, the `Posted` column is relocated to the first count
/// position and renamed `Received Posted`, and each row gains a `Grand
/// Total` (row-wise sum) and `Success` (posted share) value. A missing
/// creditor cell null-fills to the empty string upstream, so those rows
/// group under `""` like any other participant name.
pub fn aggregate_creditors(corpus: &[TransactionRecord], policy: LabelPolicy) -> CreditorAggregate {
    let mut keys: BTreeSet<(&str, &str)> = BTreeSet::new();
    let mut counts: BTreeMap<&str, HashMap<(&str, &str), Count>> = BTreeMap::new();

    for record in corpus {
        let key = (record.status.as_str(), record.reject_motive.as_str());
        keys.insert(key);

        *counts
            .entry(record.creditor.as_str())
            .or_default()
            .entry(key)
            .or_insert(0) += 1;
    }

    let (mut columns, column_of) = materialize_columns(&keys, policy);

    let mut rows: Vec<(&str, Vec<Option<Count>>)> = Vec::new();

    for (participant, cells) in &counts {
        let mut row = vec![None; columns.len()];

        for (key, count) in cells {
            // Under MergeDuplicates several keys may share a column.
            *row[column_of[key]].get_or_insert(0) += *count;
        }

        rows.push((participant, row));
    }

    let posted_index = match columns.iter().position(|label| label == POSTED_STATUS) {
        Some(index) => index,
        None => {
            // Nothing settled anywhere; synthesize an all-absent Posted
            // column so the report still carries Received Posted.
            columns.insert(0, POSTED_STATUS.to_string());

            for (_, row) in &mut rows {
                row.insert(0, None);
            }

            0
        }
    };

    if posted_index != 0 {
        let label = columns.remove(posted_index);
        columns.insert(0, label);

        for (_, row) in &mut rows {
            let cell = row.remove(posted_index);
            row.insert(0, cell);
        }
    }

    columns[0] = RECEIVED_POSTED_COLUMN.to_string();

    let rows = rows
        .into_iter()
        .map(|(participant, counts)| {
            let grand_total: Count = counts.iter().flatten().sum();
            let posted = counts[0].unwrap_or(0);

            CreditorRow {
                participant: participant.to_string(),
                counts,
                grand_total,
                success: success_rate(posted, grand_total)
            }
        })
        .collect();

    CreditorAggregate { count_columns: columns, rows }
}

/// Success percentage of a participant, `posted / grand_total * 100`.
///
/// A participant with a zero grand total has no defined ratio; the explicit
/// policy is to render it as `0.00%` (and let it weigh into the grand-total
/// mean) rather than leak NaN text into the report.
pub fn success_rate(posted: Count, grand_total: Count) -> String {
    if grand_total == 0 {
        return format_percent(0.0);
    }

    format_percent(posted as f64 / grand_total as f64 * 100.0)
}

fn materialize_columns<'a>(
    keys: &BTreeSet<(&'a str, &'a str)>,
    policy: LabelPolicy
) -> (Vec<String>, HashMap<(&'a str, &'a str), usize>) {
    let mut columns: Vec<String> = Vec::new();
    let mut column_of: HashMap<(&str, &str), usize> = HashMap::new();
    let mut first_index: HashMap<String, usize> = HashMap::new();
    let mut occurrences: HashMap<String, usize> = HashMap::new();

    for key in keys {
        let label = derived_label(key.0, key.1);

        match policy {
            LabelPolicy::MergeDuplicates => {
                if let Some(&index) = first_index.get(&label) {
                    column_of.insert(*key, index);
                } else {
                    first_index.insert(label.clone(), columns.len());
                    column_of.insert(*key, columns.len());
                    columns.push(label);
                }
            }
            LabelPolicy::KeepDistinct => {
                let occurrence = occurrences.entry(label.clone()).or_insert(0);
                *occurrence += 1;

                let column_label = if *occurrence == 1 {
                    label
                } else {
                    format!("{label} ({})", *occurrence)
                };

                column_of.insert(*key, columns.len());
                columns.push(column_label);
            }
        }
    }

    (columns, column_of)
}
