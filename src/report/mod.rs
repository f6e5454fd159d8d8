mod reconcile;
#[cfg(test)]
mod tests;
mod writer;

pub use reconcile::{Cell, GRAND_TOTAL_ROW_LABEL, ReportTable, reconcile};
pub use writer::{REPORT_BASENAME, write_report};
