//! End-to-end pipeline tests: recorder output feeding the analyzer.

// `cargo verify` runs clippy with `-D warnings` for all targets, including tests.
#![allow(clippy::expect_used, clippy::unwrap_used)]

use chrono::Utc;
use dashtriage::analyzer::FailureAnalyzer;
use dashtriage::record::{
    DiagnosticLog, EnvironmentSnapshot, RunResults, TestExecutionRecord, TestStatus, TimingStats,
};
use dashtriage::recorder::DiagnosticRecorder;
use dashtriage::report;
use dashtriage::store::RecordStore;
use dashtriage::MismatchCategory;
use pretty_assertions::assert_eq;
use std::path::PathBuf;
use tempfile::TempDir;

fn failing_record(name: &str, message: &str) -> TestExecutionRecord {
    TestExecutionRecord {
        full_name: name.to_string(),
        title: name.to_string(),
        status: TestStatus::Failed,
        duration_ms: Some(25),
        passing_asserts: 0,
        failing_asserts: 1,
        location: None,
        failure_messages: vec![message.to_string()],
    }
}

fn log_for(path: &str, records: Vec<TestExecutionRecord>) -> DiagnosticLog {
    DiagnosticLog {
        test_file_path: PathBuf::from(path),
        records,
        environment: EnvironmentSnapshot::capture(),
        timing: TimingStats {
            start_ms: 100,
            end_ms: 400,
        },
    }
}

#[test]
fn recorded_failures_are_mined_into_field_pattern() {
    let tmp = TempDir::new().unwrap();
    let store_root = tmp.path().join("diagnostics");
    let recorder = DiagnosticRecorder::new(RecordStore::new(&store_root));
    recorder.begin_run();

    // Three distinct files, each with the same one-sided expectation.
    let message = "expect(response.body.status).toBe('ok')\nExpected: \"ok\"\nReceived: \"undefined\"";
    for file in ["/suite/a.test.ts", "/suite/b.test.ts", "/suite/c.test.ts"] {
        recorder.record_file(&log_for(file, vec![failing_record("fails", message)]));
    }
    recorder.end_run(&RunResults {
        passed: 0,
        failed: 3,
        total: 3,
        started_at: Utc::now(),
        files: vec![],
    });

    let analyzer = FailureAnalyzer::new(
        tmp.path().join("no-sources"),
        &store_root,
        tmp.path().join("reports"),
    );
    let analysis = analyzer.run().unwrap();

    assert_eq!(analysis.mismatches.len(), 3);
    assert!(analysis
        .mismatches
        .iter()
        .all(|m| m.category == MismatchCategory::Field));

    // One pattern, raw count 3, three distinct provenance files.
    assert_eq!(analysis.patterns.len(), 1);
    assert_eq!(analysis.patterns[0].count, 3);
    assert_eq!(analysis.patterns[0].provenance.len(), 3);

    assert_eq!(report::exit_code(&analysis), 1);
}

#[test]
fn status_scenario_triggers_medium_recommendation() {
    let tmp = TempDir::new().unwrap();
    let store_root = tmp.path().join("diagnostics");
    let recorder = DiagnosticRecorder::new(RecordStore::new(&store_root));
    recorder.begin_run();

    recorder.record_file(&log_for(
        "/suite/routes.test.ts",
        vec![failing_record(
            "returns 200",
            "Expected: \"200\"\nReceived: \"404\"",
        )],
    ));

    let analysis = FailureAnalyzer::new(
        tmp.path().join("no-sources"),
        &store_root,
        tmp.path().join("reports"),
    )
    .run()
    .unwrap();

    assert_eq!(analysis.summary.status_issues, 1);
    let rec = analysis
        .recommendations
        .iter()
        .find(|r| r.details.contains("status code"))
        .expect("status recommendation present");
    assert_eq!(rec.priority, dashtriage::Priority::Medium);
    assert!(rec.details.contains("1 status code mismatches found"));
}

#[test]
fn passing_run_produces_clean_analysis() {
    let tmp = TempDir::new().unwrap();
    let store_root = tmp.path().join("diagnostics");
    let recorder = DiagnosticRecorder::new(RecordStore::new(&store_root));
    recorder.begin_run();

    recorder.record_file(&log_for(
        "/suite/healthy.test.ts",
        vec![TestExecutionRecord {
            full_name: "works".to_string(),
            title: "works".to_string(),
            status: TestStatus::Passed,
            duration_ms: Some(3),
            passing_asserts: 2,
            failing_asserts: 0,
            location: None,
            failure_messages: vec![],
        }],
    ));

    let analyzer = FailureAnalyzer::new(
        tmp.path().join("no-sources"),
        &store_root,
        tmp.path().join("reports"),
    );
    let analysis = analyzer.run().unwrap();

    assert!(!analysis.has_mismatches());
    assert!(analysis.recommendations.is_empty());
    assert_eq!(report::exit_code(&analysis), 0);

    // Reports are written even for clean runs.
    assert!(analyzer.json_report_path().is_file());
    assert!(analyzer.text_report_path().is_file());
}

#[test]
fn raw_payload_json_does_not_double_count_pairs() {
    // The artifact appends the whole payload as JSON; its escaped quotes must
    // not produce extra Expected/Received matches for the extractor.
    let tmp = TempDir::new().unwrap();
    let store_root = tmp.path().join("diagnostics");
    let recorder = DiagnosticRecorder::new(RecordStore::new(&store_root));
    recorder.begin_run();

    recorder.record_file(&log_for(
        "/suite/single.test.ts",
        vec![failing_record("fails", "Expected: \"200\"\nReceived: \"404\"")],
    ));

    let analysis = FailureAnalyzer::new(
        tmp.path().join("no-sources"),
        &store_root,
        tmp.path().join("reports"),
    )
    .run()
    .unwrap();

    assert_eq!(analysis.comparisons.len(), 1);
}

#[test]
fn source_expectations_are_carried_as_context() {
    let tmp = TempDir::new().unwrap();
    let sources = tmp.path().join("src");
    std::fs::create_dir_all(&sources).unwrap();
    std::fs::write(
        sources.join("convert.test.ts"),
        "it('rejects bad input', () => {\n  expect(response.body.error).toBe('validation_error');\n});\n",
    )
    .unwrap();

    let analysis = FailureAnalyzer::new(
        &sources,
        tmp.path().join("no-store"),
        tmp.path().join("reports"),
    )
    .run()
    .unwrap();

    // Declared intent is context only: no comparisons, no mismatches.
    assert_eq!(analysis.source_expectations.len(), 1);
    assert!(analysis.comparisons.is_empty());
    assert_eq!(report::exit_code(&analysis), 0);
}
