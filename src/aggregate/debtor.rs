use std::collections::BTreeMap;

use crate::extract::TransactionRecord;
use crate::labels::POSTED_STATUS;
use crate::types::Count;

/// Per-debtor pivot: how many transactions each participant sent that
/// settled successfully.
#[derive(Debug, Clone)]
pub struct DebtorAggregate {
    /// One row per distinct debtor name, sorted by participant.
    pub rows: Vec<DebtorRow>
}

#[derive(Debug, Clone)]
pub struct DebtorRow {
    pub participant: String,
    pub sent_posted: Count
}

/// Groups the corpus by debtor name and counts `Posted` rows per
/// participant.
///
/// Every distinct debtor appears, with a genuine zero when none of its rows
/// settled. A missing debtor cell null-fills to the empty string upstream,
/// so those rows group under `""` like any other participant name.
pub fn aggregate_debtors(corpus: &[TransactionRecord]) -> DebtorAggregate {
    let mut posted: BTreeMap<&str, Count> = BTreeMap::new();

    for record in corpus {
        let counter = posted.entry(record.debtor.as_str()).or_insert(0);

        if record.status == POSTED_STATUS {
            *counter += 1;
        }
    }

    let rows = posted
        .into_iter()
        .map(|(participant, sent_posted)| DebtorRow {
            participant: participant.to_string(),
            sent_posted
        })
        .collect();

    DebtorAggregate { rows }
}
