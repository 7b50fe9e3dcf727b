use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::counts::SectorCounts;
use crate::error::TableError;

/// Weight used for sectors the risk table does not list.
pub const DEFAULT_RISK_WEIGHT: f64 = 0.5;

/// Weights at or above this land in the high-exposure bucket.
pub const HIGH_RISK_THRESHOLD: f64 = 0.7;

/// Weights at or above this (and below [`HIGH_RISK_THRESHOLD`]) are medium.
pub const MEDIUM_RISK_THRESHOLD: f64 = 0.4;

/// Sector to automation-exposure weight, each weight in `[0, 1]`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(try_from = "HashMap<String, f64>")]
pub struct RiskTable {
    weights: HashMap<String, f64>,
}

impl RiskTable {
    pub fn new<K, I>(entries: I) -> Result<Self, TableError>
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, f64)>,
    {
        let mut weights = HashMap::new();
        for (sector, weight) in entries {
            let sector = sector.into();
            if sector.trim().is_empty() {
                return Err(TableError::EmptySector);
            }
            if !weight.is_finite() || !(0.0..=1.0).contains(&weight) {
                return Err(TableError::WeightOutOfRange { sector, weight });
            }
            weights.insert(sector, weight);
        }
        Ok(Self { weights })
    }

    /// Weight for `sector`, falling back to [`DEFAULT_RISK_WEIGHT`].
    pub fn weight(&self, sector: &str) -> f64 {
        self.weights
            .get(sector)
            .copied()
            .unwrap_or(DEFAULT_RISK_WEIGHT)
    }

    pub fn contains(&self, sector: &str) -> bool {
        self.weights.contains_key(sector)
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }
}

impl TryFrom<HashMap<String, f64>> for RiskTable {
    type Error = TableError;

    fn try_from(weights: HashMap<String, f64>) -> Result<Self, Self::Error> {
        Self::new(weights)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    High,
    Medium,
    Low,
}

impl RiskLevel {
    pub fn from_weight(weight: f64) -> Self {
        if weight >= HIGH_RISK_THRESHOLD {
            Self::High
        } else if weight >= MEDIUM_RISK_THRESHOLD {
            Self::Medium
        } else {
            Self::Low
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::High => "High Exposure (AI Ready)",
            Self::Medium => "Medium Exposure (Augmented)",
            Self::Low => "Low Exposure (Physical/Human)",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskBuckets {
    pub high: u64,
    pub medium: u64,
    pub low: u64,
}

impl RiskBuckets {
    pub const fn total(&self) -> u64 {
        self.high
            .saturating_add(self.medium)
            .saturating_add(self.low)
    }

    /// Buckets in display order, highest exposure first.
    pub const fn levels(&self) -> [(RiskLevel, u64); 3] {
        [
            (RiskLevel::High, self.high),
            (RiskLevel::Medium, self.medium),
            (RiskLevel::Low, self.low),
        ]
    }

    fn add(&mut self, level: RiskLevel, count: u64) {
        let slot = match level {
            RiskLevel::High => &mut self.high,
            RiskLevel::Medium => &mut self.medium,
            RiskLevel::Low => &mut self.low,
        };
        *slot = slot.saturating_add(count);
    }
}

/// Partitions sector worker counts into high/medium/low exposure buckets.
///
/// Independent of the index score; the workforce total is not a sector and
/// is skipped.
pub fn risk_buckets(counts: &SectorCounts, risk_table: &RiskTable) -> RiskBuckets {
    counts
        .sectors()
        .fold(RiskBuckets::default(), |mut buckets, (sector, count)| {
            buckets.add(RiskLevel::from_weight(risk_table.weight(sector)), count);
            buckets
        })
}
