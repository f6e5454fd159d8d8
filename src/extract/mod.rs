mod corpus;
mod reader;

pub use corpus::{build_corpus, discover_extracts};
pub use reader::{EXCLUDED_OP_CODES, REQUIRED_COLUMNS, TransactionRecord, read_extract};
