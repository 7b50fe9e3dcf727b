use std::path::PathBuf;
use std::process::{Command, Output};

use serde_json::Value;

fn fixture() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join("data")
        .join("fixtures")
        .join("regions.json")
}

fn iceberg_index(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_iceberg-index"))
        .args(args)
        .arg("--fixture")
        .arg(fixture())
        .arg("--no-color")
        .env_remove("ICEBERG_RISK_TABLE")
        .env_remove("ICEBERG_LOG")
        .output()
        .expect("run iceberg-index")
}

#[test]
fn json_report_for_fixture_region() {
    let output = iceberg_index(&["14604", "--format", "json"]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let report: Value = serde_json::from_slice(&output.stdout).expect("parse report json");
    assert_eq!(report["zip"], "14604");
    assert_eq!(report["index_score"], 60.5);
    assert_eq!(report["band"], "high");
    assert_eq!(report["dominant_sector"], "Office_Admin");
    assert_eq!(report["total_workers"], 4000);
    assert_eq!(report["buckets"]["high"], 1850);
    assert_eq!(report["buckets"]["medium"], 1150);
    assert_eq!(report["buckets"]["low"], 1000);
}

#[test]
fn text_report_for_fixture_region() {
    let output = iceberg_index(&["14424"]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let text = String::from_utf8(output.stdout).expect("utf8 stdout");
    assert!(text.contains("Disruption Index Score   43.6/100"));
    assert!(text.contains("Dominant Sector          Management"));
    assert!(text.contains("Total Workforce          12,000"));
    assert!(text.contains("Analysis: Moderate Exposure (Mixed Economy)"));
    assert!(text.contains("Workforce Exposure Breakdown"));
}

#[test]
fn small_population_exits_with_code_two() {
    let output = iceberg_index(&["99999"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(output.stdout.is_empty());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("error: population too low to calculate index"));
}

#[test]
fn unknown_zip_exits_with_code_one() {
    let output = iceberg_index(&["10001"]);
    assert_eq!(output.status.code(), Some(1));

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("error: no workforce data published for zip code 10001"));
}

#[test]
fn malformed_zip_is_rejected() {
    let output = iceberg_index(&["144"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("expected five digits"));
}
