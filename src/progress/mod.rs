use std::io::{Write, stderr};

/// Consumer of per-file progress while the corpus is being merged.
///
/// The corpus builder calls `advance` once per processed extract with the
/// 1-based index, the total file count and the file name.
pub trait ProgressSink {
    fn advance(&mut self, current: usize, total: usize, label: &str);
}

/// Renders a single carriage-returned progress line on stderr, so it never
/// interleaves with report output or log lines routed elsewhere.
pub struct ConsoleProgress;

impl ProgressSink for ConsoleProgress {
    fn advance(&mut self, current: usize, total: usize, label: &str) {
        let mut err = stderr().lock();
        let _ = write!(err, "\rMerging extracts {current}/{total}: {label}");

        if current == total {
            let _ = writeln!(err);
        }

        let _ = err.flush();
    }
}
