use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::extract::reader::{TransactionRecord, read_extract};
use crate::progress::ProgressSink;
use crate::types::ReportError;

const EXTRACT_EXTENSIONS: [&str; 2] = ["xlsx", "csv"];

/// Enumerates the extract files in the source directory.
///
/// Directory enumeration order is platform-defined, so the result is sorted
/// by file name to keep the corpus (and therefore the report) stable across
/// runs. Non-extract files are ignored.
///
/// # Errors
/// Returns `ReportError::NoInputFiles` when the directory holds no extracts.
pub fn discover_extracts(source: &Path) -> Result<Vec<PathBuf>, ReportError> {
    let mut files = Vec::new();

    for entry in fs::read_dir(source).map_err(|error| ReportError::io(source, error))? {
        let entry = entry.map_err(|error| ReportError::io(source, error))?;
        let path = entry.path();

        if !path.is_file() {
            continue;
        }

        let extension = path
            .extension()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();

        if EXTRACT_EXTENSIONS.contains(&extension.as_str()) {
            files.push(path);
        }
    }

    if files.is_empty() {
        return Err(ReportError::no_input_files(source));
    }

    files.sort();

    Ok(files)
}

/// Reads and filters every discovered extract into one unified corpus,
/// file-discovery order then within-file order, ticking the progress sink
/// after each file.
///
/// # Errors
/// Returns `ReportError::ExtractVanished` if a discovered file was removed
/// before it could be read, or any error the reader surfaces. The first
/// failure aborts the whole run; a partial corpus is never returned.
pub fn build_corpus(
    files: &[PathBuf],
    progress: &mut dyn ProgressSink
) -> Result<Vec<TransactionRecord>, ReportError> {
    let mut corpus = Vec::new();

    for (index, path) in files.iter().enumerate() {
        if !path.exists() {
            return Err(ReportError::extract_vanished(path));
        }

        let mut records = read_extract(path)?;
        debug!("Extract [{}] contributed {} record(s)", path.display(), records.len());
        corpus.append(&mut records);

        let label = path.file_name().and_then(|s| s.to_str()).unwrap_or_default();
        progress.advance(index + 1, files.len(), label);
    }

    Ok(corpus)
}
