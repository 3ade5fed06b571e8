use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

use rust_xlsxwriter::Workbook;

use candidate_intake::ingestion::{
    validate_workbook_from_path, validate_workbook_with, CompositeObserver, FileObserver,
    IntakeContext, IntakeObserver, IntakeSeverity, IntakeStats, StdErrObserver, ValidatorOptions,
};
use candidate_intake::types::WorkbookFormat;
use candidate_intake::{ErrorKind, ValidationError};

#[derive(Default)]
struct RecordingObserver {
    successes: Mutex<Vec<(String, IntakeStats)>>,
    failures: Mutex<Vec<IntakeSeverity>>,
    alerts: Mutex<Vec<IntakeSeverity>>,
}

impl IntakeObserver for RecordingObserver {
    fn on_success(&self, ctx: &IntakeContext, stats: IntakeStats) {
        self.successes.lock().unwrap().push((ctx.source.clone(), stats));
    }

    fn on_failure(&self, _ctx: &IntakeContext, severity: IntakeSeverity, _error: &ValidationError) {
        self.failures.lock().unwrap().push(severity);
    }

    fn on_alert(&self, _ctx: &IntakeContext, severity: IntakeSeverity, _error: &ValidationError) {
        self.alerts.lock().unwrap().push(severity);
    }
}

fn tmp_file(name: &str, ext: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    std::env::temp_dir().join(format!("candidate-intake-{name}-{nanos}.{ext}"))
}

fn workbook(availability: &str) -> Vec<u8> {
    let mut wb = Workbook::new();
    let ws = wb.add_worksheet();
    ws.write_string(0, 0, "seniority").unwrap();
    ws.write_string(0, 1, "years").unwrap();
    ws.write_string(0, 2, "availability").unwrap();
    ws.write_string(1, 0, "junior").unwrap();
    ws.write_number(1, 1, 5).unwrap();
    ws.write_string(1, 2, availability).unwrap();
    wb.save_to_buffer().unwrap()
}

fn options(obs: &Arc<RecordingObserver>, alert_at_or_above: IntakeSeverity) -> ValidatorOptions {
    ValidatorOptions {
        observer: Some(obs.clone()),
        alert_at_or_above,
        source_label: "upload-1.xlsx".to_string(),
    }
}

#[test]
fn observer_receives_success_with_format_and_payload() {
    let obs = Arc::new(RecordingObserver::default());
    let payload = validate_workbook_with(&workbook("yes"), &options(&obs, IntakeSeverity::Critical))
        .unwrap();

    let successes = obs.successes.lock().unwrap().clone();
    assert_eq!(successes.len(), 1);
    assert_eq!(successes[0].0, "upload-1.xlsx");
    assert_eq!(successes[0].1.format, WorkbookFormat::Xlsx);
    assert_eq!(successes[0].1.payload, payload);
    assert!(obs.failures.lock().unwrap().is_empty());
}

#[test]
fn field_failure_is_a_warning_without_alert() {
    let obs = Arc::new(RecordingObserver::default());
    let _ = validate_workbook_with(&workbook("maybe"), &options(&obs, IntakeSeverity::Critical))
        .unwrap_err();

    assert_eq!(*obs.failures.lock().unwrap(), vec![IntakeSeverity::Warning]);
    assert!(obs.alerts.lock().unwrap().is_empty());
}

#[test]
fn structural_failure_alerts_at_error_threshold() {
    let obs = Arc::new(RecordingObserver::default());
    let _ = validate_workbook_with(b"garbage", &options(&obs, IntakeSeverity::Error)).unwrap_err();

    assert_eq!(*obs.failures.lock().unwrap(), vec![IntakeSeverity::Error]);
    assert_eq!(*obs.alerts.lock().unwrap(), vec![IntakeSeverity::Error]);
}

#[test]
fn missing_path_is_wrapped_and_critical() {
    let obs = Arc::new(RecordingObserver::default());
    let err = validate_workbook_from_path(
        tmp_file("does-not-exist", "xlsx"),
        &options(&obs, IntakeSeverity::Critical),
    )
    .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Wrapped);
    assert!(err.to_string().starts_with("Failed to process Excel file: "));
    assert_eq!(*obs.failures.lock().unwrap(), vec![IntakeSeverity::Critical]);
    assert_eq!(*obs.alerts.lock().unwrap(), vec![IntakeSeverity::Critical]);
}

#[test]
fn validate_from_path_reads_file() {
    let path = tmp_file("from-path", "xlsx");
    std::fs::write(&path, workbook("no")).unwrap();

    let payload = validate_workbook_from_path(&path, &ValidatorOptions::default()).unwrap();
    assert!(!payload.availability);

    let _ = std::fs::remove_file(&path);
}

#[test]
fn file_observer_appends_lines() {
    let log = tmp_file("observer", "log");
    let opts = ValidatorOptions {
        observer: Some(Arc::new(FileObserver::new(&log))),
        alert_at_or_above: IntakeSeverity::Warning,
        ..Default::default()
    };

    validate_workbook_with(&workbook("true"), &opts).unwrap();
    let _ = validate_workbook_with(&workbook("maybe"), &opts).unwrap_err();

    let contents = std::fs::read_to_string(&log).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].contains(" ok format=Xlsx"));
    assert!(lines[0].contains(r#"payload={"seniority":"junior","years":5,"availability":true}"#));
    assert!(lines[1].contains(" fail severity=Warning kind=Field"));
    assert!(lines[2].contains(" ALERT severity=Warning"));

    let _ = std::fs::remove_file(&log);
}

#[test]
fn composite_observer_fans_out_to_every_observer() {
    let first = Arc::new(RecordingObserver::default());
    let second = Arc::new(RecordingObserver::default());
    let observers: Vec<Arc<dyn IntakeObserver>> =
        vec![first.clone(), second.clone(), Arc::new(StdErrObserver)];
    let opts = ValidatorOptions {
        observer: Some(Arc::new(CompositeObserver::new(observers))),
        alert_at_or_above: IntakeSeverity::Error,
        source_label: "batch.xlsx".to_string(),
    };

    validate_workbook_with(&workbook("1"), &opts).unwrap();
    let _ = validate_workbook_with(b"garbage", &opts).unwrap_err();

    for obs in [&first, &second] {
        let successes = obs.successes.lock().unwrap();
        assert_eq!(successes.len(), 1);
        assert_eq!(successes[0].0, "batch.xlsx");
        assert!(successes[0].1.payload.availability);
        assert_eq!(*obs.failures.lock().unwrap(), vec![IntakeSeverity::Error]);
        assert_eq!(*obs.alerts.lock().unwrap(), vec![IntakeSeverity::Error]);
    }
}

#[test]
fn stderr_observer_handles_every_callback() {
    let opts = ValidatorOptions {
        observer: Some(Arc::new(StdErrObserver)),
        alert_at_or_above: IntakeSeverity::Warning,
        ..Default::default()
    };

    assert!(validate_workbook_with(&workbook("no"), &opts).is_ok());
    let err = validate_workbook_with(&workbook("maybe"), &opts).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Field);
}
