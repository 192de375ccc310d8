//! Error reporting.

use std::error::Error;
use std::fmt::Write as _;
use std::path::Path;
use std::sync::Mutex;

/// Destination for failures caught at a request boundary.
pub trait ErrorLogger: Send + Sync {
    /// Report a failure for a project with a short tag and its full trace.
    fn log_error(&self, project_root: &Path, tag: &str, trace: &str);
}

/// Emits failures as `error`-level `tracing` events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingErrorLogger;

impl ErrorLogger for TracingErrorLogger {
    fn log_error(&self, project_root: &Path, tag: &str, trace: &str) {
        tracing::error!(
            project_root = %project_root.display(),
            tag = tag,
            "{}",
            trace
        );
    }
}

/// A reported failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorReport {
    pub project_root: String,
    pub tag: String,
    pub trace: String,
}

/// Keeps reports in memory.
#[derive(Debug, Default)]
pub struct RecordingErrorLogger {
    reports: Mutex<Vec<ErrorReport>>,
}

impl RecordingErrorLogger {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the recorded reports.
    pub fn reports(&self) -> Vec<ErrorReport> {
        match self.reports.lock() {
            Ok(reports) => reports.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl ErrorLogger for RecordingErrorLogger {
    fn log_error(&self, project_root: &Path, tag: &str, trace: &str) {
        let report = ErrorReport {
            project_root: project_root.display().to_string(),
            tag: tag.to_string(),
            trace: trace.to_string(),
        };
        match self.reports.lock() {
            Ok(mut reports) => reports.push(report),
            Err(poisoned) => poisoned.into_inner().push(report),
        }
    }
}

/// Render an error and every `source()` below it, one per line.
pub fn error_chain(err: &(dyn Error + 'static)) -> String {
    let mut out = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let _ = write!(out, "\n  caused by: {}", cause);
        source = cause.source();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fmt;

    #[derive(Debug)]
    struct Outer(std::io::Error);

    impl fmt::Display for Outer {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "failed to read app.json")
        }
    }

    impl Error for Outer {
        fn source(&self) -> Option<&(dyn Error + 'static)> {
            Some(&self.0)
        }
    }

    #[test]
    fn test_error_chain_includes_causes() {
        let err = Outer(std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"));
        let chain = error_chain(&err);

        assert_eq!(chain, "failed to read app.json\n  caused by: no such file");
    }

    #[test]
    fn test_recording_error_logger() {
        let logger = RecordingErrorLogger::new();
        logger.log_error(Path::new("/app"), "expo", "boom");

        let reports = logger.reports();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].project_root, "/app");
        assert_eq!(reports[0].tag, "expo");
        assert_eq!(reports[0].trace, "boom");
    }
}
