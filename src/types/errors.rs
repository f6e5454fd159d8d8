use std::path::{Path, PathBuf};

use thiserror::Error;

/// Everything that can abort a report run. Every variant names the
/// offending path so the operator knows which input to fix before rerunning.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Directory not found: [{}]", .path.display())]
    PathNotFound {
        path: PathBuf
    },
    #[error("No extract files (.xlsx or .csv) in source directory [{}]", .path.display())]
    NoInputFiles {
        path: PathBuf
    },
    #[error("Extract [{}] vanished before it could be read", .path.display())]
    ExtractVanished {
        path: PathBuf
    },
    #[error("Extract [{}] is missing required column(s): {}", .path.display(), .columns.join(", "))]
    MissingColumns {
        path: PathBuf,
        columns: Vec<String>
    },
    #[error("Unsupported extract format: [{}]", .path.display())]
    UnsupportedExtension {
        path: PathBuf
    },
    #[error("CSV failure on [{}]: {source}", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error
    },
    #[error("Workbook read failure on [{}]: {source}", .path.display())]
    Sheet {
        path: PathBuf,
        #[source]
        source: calamine::Error
    },
    #[error("Workbook write failure on [{}]: {source}", .path.display())]
    Workbook {
        path: PathBuf,
        #[source]
        source: rust_xlsxwriter::XlsxError
    },
    #[error("I/O failure on [{}]: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error
    }
}

impl ReportError {
    pub fn path_not_found(path: &Path) -> Self {
        Self::PathNotFound { path: path.to_path_buf() }
    }

    pub fn no_input_files(path: &Path) -> Self {
        Self::NoInputFiles { path: path.to_path_buf() }
    }

    pub fn extract_vanished(path: &Path) -> Self {
        Self::ExtractVanished { path: path.to_path_buf() }
    }

    pub fn missing_columns(path: &Path, columns: Vec<String>) -> Self {
        Self::MissingColumns { path: path.to_path_buf(), columns }
    }

    pub fn unsupported_extension(path: &Path) -> Self {
        Self::UnsupportedExtension { path: path.to_path_buf() }
    }

    pub fn csv(path: &Path, source: csv::Error) -> Self {
        Self::Csv { path: path.to_path_buf(), source }
    }

    pub fn sheet(path: &Path, source: calamine::Error) -> Self {
        Self::Sheet { path: path.to_path_buf(), source }
    }

    pub fn workbook(path: &Path, source: rust_xlsxwriter::XlsxError) -> Self {
        Self::Workbook { path: path.to_path_buf(), source }
    }

    pub fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io { path: path.to_path_buf(), source }
    }
}
