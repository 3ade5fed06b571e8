use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::{ErrorKind, ValidationError};
use crate::types::{ValidatedPayload, WorkbookFormat};

/// Severity classification used for observer callbacks and alerting thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum IntakeSeverity {
    /// Informational event.
    Info,
    /// A field in an otherwise well-formed workbook was rejected.
    Warning,
    /// The workbook's structure was rejected.
    Error,
    /// The decoder or the file system failed unexpectedly.
    Critical,
}

impl IntakeSeverity {
    /// Severity for a validation failure, derived from its message family.
    pub fn for_error(error: &ValidationError) -> Self {
        match error.kind() {
            ErrorKind::Field => IntakeSeverity::Warning,
            ErrorKind::Structural => IntakeSeverity::Error,
            ErrorKind::Wrapped => IntakeSeverity::Critical,
        }
    }
}

/// Context about a validation attempt.
#[derive(Debug, Clone)]
pub struct IntakeContext {
    /// Caller-supplied label for the input (file name, upload id, path).
    pub source: String,
    /// Size of the input buffer.
    pub bytes: usize,
}

/// Stats reported on successful validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntakeStats {
    /// Container format the decoder recognized.
    pub format: WorkbookFormat,
    /// The validated values.
    pub payload: ValidatedPayload,
}

/// Observer interface for validation outcomes.
///
/// Implementors can record metrics, logs, or trigger alerts.
pub trait IntakeObserver: Send + Sync {
    /// Called when validation succeeds.
    fn on_success(&self, _ctx: &IntakeContext, _stats: IntakeStats) {}

    /// Called when validation fails.
    fn on_failure(&self, _ctx: &IntakeContext, _severity: IntakeSeverity, _error: &ValidationError) {}

    /// Called when a failure meets the alert threshold.
    ///
    /// Default behavior forwards to [`Self::on_failure`].
    fn on_alert(&self, ctx: &IntakeContext, severity: IntakeSeverity, error: &ValidationError) {
        self.on_failure(ctx, severity, error)
    }
}

/// An observer that fans out callbacks to a list of observers.
#[derive(Default)]
pub struct CompositeObserver {
    observers: Vec<Arc<dyn IntakeObserver>>,
}

impl CompositeObserver {
    /// Create a new composite observer from a list of observers.
    pub fn new(observers: Vec<Arc<dyn IntakeObserver>>) -> Self {
        Self { observers }
    }
}

impl fmt::Debug for CompositeObserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeObserver")
            .field("observers_len", &self.observers.len())
            .finish()
    }
}

impl IntakeObserver for CompositeObserver {
    fn on_success(&self, ctx: &IntakeContext, stats: IntakeStats) {
        for o in &self.observers {
            o.on_success(ctx, stats);
        }
    }

    fn on_failure(&self, ctx: &IntakeContext, severity: IntakeSeverity, error: &ValidationError) {
        for o in &self.observers {
            o.on_failure(ctx, severity, error);
        }
    }

    fn on_alert(&self, ctx: &IntakeContext, severity: IntakeSeverity, error: &ValidationError) {
        for o in &self.observers {
            o.on_alert(ctx, severity, error);
        }
    }
}

/// Logs validation events to stderr.
#[derive(Debug, Default)]
pub struct StdErrObserver;

impl IntakeObserver for StdErrObserver {
    fn on_success(&self, ctx: &IntakeContext, stats: IntakeStats) {
        eprintln!(
            "[intake][ok] format={:?} source={} bytes={} seniority={} years={} availability={}",
            stats.format,
            ctx.source,
            ctx.bytes,
            stats.payload.seniority,
            stats.payload.years,
            stats.payload.availability
        );
    }

    fn on_failure(&self, ctx: &IntakeContext, severity: IntakeSeverity, error: &ValidationError) {
        eprintln!(
            "[intake][{:?}] kind={:?} source={} bytes={} err={}",
            severity,
            error.kind(),
            ctx.source,
            ctx.bytes,
            error
        );
    }

    fn on_alert(&self, ctx: &IntakeContext, severity: IntakeSeverity, error: &ValidationError) {
        eprintln!(
            "[ALERT][intake][{:?}] kind={:?} source={} bytes={} err={}",
            severity,
            error.kind(),
            ctx.source,
            ctx.bytes,
            error
        );
    }
}

/// Appends validation events to a local log file.
#[derive(Debug)]
pub struct FileObserver {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileObserver {
    /// Create a file observer that appends events to `path`.
    ///
    /// Writes are best-effort; failures to open/write the log file are ignored.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            lock: Mutex::new(()),
        }
    }

    fn append_line(&self, line: &str) {
        let _guard = self.lock.lock().ok();
        if let Ok(mut f) = OpenOptions::new().create(true).append(true).open(&self.path) {
            let _ = writeln!(f, "{line}");
        }
    }
}

impl IntakeObserver for FileObserver {
    fn on_success(&self, ctx: &IntakeContext, stats: IntakeStats) {
        let payload = serde_json::to_string(&stats.payload).unwrap_or_default();
        self.append_line(&format!(
            "{} ok format={:?} source={} bytes={} payload={}",
            unix_ts(),
            stats.format,
            ctx.source,
            ctx.bytes,
            payload
        ));
    }

    fn on_failure(&self, ctx: &IntakeContext, severity: IntakeSeverity, error: &ValidationError) {
        self.append_line(&format!(
            "{} fail severity={:?} kind={:?} source={} bytes={} err={}",
            unix_ts(),
            severity,
            error.kind(),
            ctx.source,
            ctx.bytes,
            error
        ));
    }

    fn on_alert(&self, ctx: &IntakeContext, severity: IntakeSeverity, error: &ValidationError) {
        self.append_line(&format!(
            "{} ALERT severity={:?} kind={:?} source={} bytes={} err={}",
            unix_ts(),
            severity,
            error.kind(),
            ctx.source,
            ctx.bytes,
            error
        ));
    }
}

fn unix_ts() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}
