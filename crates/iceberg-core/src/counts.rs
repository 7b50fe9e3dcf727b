use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Key under which the upstream table reports the whole civilian workforce.
pub const TOTAL_WORKERS_KEY: &str = "Total_Workers";

/// Worker counts per occupation sector for one region.
///
/// Entries keep the order the upstream table reported them in, which is also
/// the order used to break ties for the dominant sector.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectorCounts {
    entries: Vec<(String, u64)>,
}

impl SectorCounts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `key` to `count`, keeping the original position of an existing key.
    pub fn insert(&mut self, key: impl Into<String>, count: u64) -> Option<u64> {
        let key = key.into();
        if let Some((_, slot)) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            return Some(std::mem::replace(slot, count));
        }
        self.entries.push((key, count));
        None
    }

    pub fn get(&self, key: &str) -> Option<u64> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, count)| *count)
    }

    /// Reported workforce total, or 0 when the upstream row had no total.
    pub fn total_workers(&self) -> u64 {
        self.get(TOTAL_WORKERS_KEY).unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Every entry except the workforce total, in insertion order.
    pub fn sectors(&self) -> impl Iterator<Item = (&str, u64)> {
        self.iter().filter(|(k, _)| *k != TOTAL_WORKERS_KEY)
    }

    pub fn sector_sum(&self) -> u64 {
        self.sectors()
            .fold(0u64, |acc, (_, count)| acc.saturating_add(count))
    }

    /// Sectors sorted by worker count, largest first. Equal counts keep
    /// insertion order.
    pub fn composition(&self) -> Vec<(&str, u64)> {
        let mut rows = self.sectors().collect::<Vec<_>>();
        rows.sort_by(|a, b| b.1.cmp(&a.1));
        rows
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, u64)> for SectorCounts {
    fn from_iter<I: IntoIterator<Item = (K, u64)>>(iter: I) -> Self {
        let mut counts = Self::new();
        for (key, count) in iter {
            counts.insert(key, count);
        }
        counts
    }
}

impl Serialize for SectorCounts {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, count) in &self.entries {
            map.serialize_entry(key, count)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for SectorCounts {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(SectorCountsVisitor)
    }
}

struct SectorCountsVisitor;

impl<'de> Visitor<'de> for SectorCountsVisitor {
    type Value = SectorCounts;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of sector names to non-negative worker counts")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut counts = SectorCounts::new();
        while let Some((key, count)) = access.next_entry::<String, u64>()? {
            counts.insert(key, count);
        }
        Ok(counts)
    }
}

/// Human label for a sector key, e.g. `Office_Admin` becomes `Office Admin`.
pub fn sector_display_name(sector: &str) -> String {
    sector.replace('_', " ")
}
