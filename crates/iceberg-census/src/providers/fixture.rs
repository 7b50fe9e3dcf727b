use std::collections::HashMap;
use std::fmt;
use std::fs;

use iceberg_core::SectorCounts;
use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::debug;

use crate::config::FixtureConfig;
use crate::error::ProviderError;
use crate::providers::parse_count;
use crate::traits::WorkforceProvider;
use crate::types::WorkforceRequest;

/// Serves recorded workforce tables from a JSON file keyed by zip code.
///
/// Cells go through the same normalization as live Census responses, so a
/// recorded `null` or negative sentinel reads as zero.
#[derive(Debug, Clone)]
pub struct FixtureProvider {
    config: FixtureConfig,
    regions: HashMap<String, SectorCounts>,
}

impl FixtureProvider {
    pub fn new(config: FixtureConfig) -> Result<Self, ProviderError> {
        let bytes = fs::read(&config.path)?;
        let regions = serde_json::from_slice::<HashMap<String, RecordedCounts>>(&bytes)?
            .into_iter()
            .map(|(zip, recorded)| (zip, recorded.0))
            .collect::<HashMap<_, _>>();
        debug!(
            path = %config.path.display(),
            regions = regions.len(),
            "loaded workforce fixture"
        );
        Ok(Self { config, regions })
    }
}

/// One recorded region, keeping the document's column order.
struct RecordedCounts(SectorCounts);

impl<'de> Deserialize<'de> for RecordedCounts {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(RecordedCountsVisitor)
    }
}

struct RecordedCountsVisitor;

impl<'de> Visitor<'de> for RecordedCountsVisitor {
    type Value = RecordedCounts;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of sector names to worker counts")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut counts = SectorCounts::new();
        while let Some((sector, cell)) = access.next_entry::<String, Value>()? {
            let count = parse_count(&sector, &cell);
            counts.insert(sector, count);
        }
        Ok(RecordedCounts(counts))
    }
}

#[async_trait::async_trait]
impl WorkforceProvider for FixtureProvider {
    fn name(&self) -> &'static str {
        "fixture"
    }

    async fn fetch(&self, request: WorkforceRequest) -> Result<SectorCounts, ProviderError> {
        request.validate()?;
        self.regions
            .get(&request.zip_code)
            .cloned()
            .ok_or_else(|| {
                debug!(
                    path = %self.config.path.display(),
                    zip = %request.zip_code,
                    "zip code absent from fixture"
                );
                ProviderError::RegionNotFound(request.zip_code.clone())
            })
    }
}
