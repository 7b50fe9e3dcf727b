pub mod acs;
pub mod fixture;

pub use acs::AcsSubjectProvider;
pub use fixture::FixtureProvider;

use serde_json::Value;
use tracing::warn;

/// Census-style cell to worker count. Null, empty, non-numeric and negative
/// cells (suppressed estimates use negative sentinels) count as zero.
pub(crate) fn parse_count(sector: &str, value: &Value) -> u64 {
    let parsed = match value {
        Value::Null => return 0,
        Value::Number(n) => n.as_i64(),
        Value::String(s) if s.trim().is_empty() => return 0,
        Value::String(s) => s.trim().replace(',', "").parse::<i64>().ok(),
        _ => None,
    };

    match parsed.map(u64::try_from) {
        Some(Ok(count)) => count,
        _ => {
            warn!(sector, value = %value, "normalizing unusable census cell to zero");
            0
        }
    }
}
