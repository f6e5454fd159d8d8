mod creditor;
mod debtor;

pub use creditor::{CreditorAggregate, CreditorRow, LabelPolicy, aggregate_creditors, success_rate};
pub use debtor::{DebtorAggregate, DebtorRow, aggregate_debtors};

pub const PARTICIPANT_COLUMN: &str = "PARTICIPANT_NAME";
pub const SENT_POSTED_COLUMN: &str = "Sent Posted";
pub const RECEIVED_POSTED_COLUMN: &str = "Received Posted";
pub const GRAND_TOTAL_COLUMN: &str = "Grand Total";
pub const SUCCESS_COLUMN: &str = "Success";

/// Renders a percentage with exactly two decimals and a trailing `%`.
pub fn format_percent(value: f64) -> String {
    format!("{value:.2}%")
}
