mod errors;

pub use errors::ReportError;

pub type Count = u64;
