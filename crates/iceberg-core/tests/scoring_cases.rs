use std::fs;
use std::path::PathBuf;

use iceberg_core::{compute_score, risk_buckets, ExposureBand, RiskBuckets, RiskTable, SectorCounts};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct Case {
    name: String,
    counts: SectorCounts,
    risk_table: RiskTable,
    expected: Option<Expected>,
    expected_error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Expected {
    index_score: f64,
    dominant_sector: Option<String>,
    band: ExposureBand,
    buckets: RiskBuckets,
}

#[test]
fn scoring_cases_pass() {
    let root = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let fixture = root
        .join("..")
        .join("..")
        .join("data")
        .join("cases")
        .join("scoring_cases.json");

    let content = fs::read_to_string(&fixture)
        .unwrap_or_else(|e| panic!("failed to read fixture {}: {e}", fixture.display()));
    let cases: Vec<Case> = serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("failed to parse fixture {}: {e}", fixture.display()));
    assert!(!cases.is_empty());

    for case in cases {
        let buckets = risk_buckets(&case.counts, &case.risk_table);
        let out = compute_score(case.counts, &case.risk_table);

        match (case.expected, case.expected_error.as_deref()) {
            (Some(expected), None) => {
                let out = out.unwrap_or_else(|e| panic!("case {} failed: {e}", case.name));
                assert_eq!(out.index_score, expected.index_score, "case {}", case.name);
                assert_eq!(
                    out.dominant_sector, expected.dominant_sector,
                    "case {}",
                    case.name
                );
                assert_eq!(out.band(), expected.band, "case {}", case.name);
                assert_eq!(buckets, expected.buckets, "case {}", case.name);
            }
            (None, Some("insufficient_population")) => {
                let err = out.expect_err(&case.name);
                assert!(err.is_insufficient_population(), "case {}", case.name);
            }
            _ => panic!("case {} has no usable expectation", case.name),
        }
    }
}
