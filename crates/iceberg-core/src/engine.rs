use serde::{Deserialize, Serialize};

use crate::counts::SectorCounts;
use crate::error::ScoreError;
use crate::risk::RiskTable;

/// Regions with fewer workers than this are not scored.
pub const MIN_POPULATION: u64 = 10;

/// Upper bound (exclusive) of the low exposure band.
pub const MODERATE_EXPOSURE_SCORE: f64 = 40.0;

/// Lower bound (inclusive) of the high exposure band.
pub const HIGH_EXPOSURE_SCORE: f64 = 60.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreResult {
    /// Population-weighted mean risk weight scaled to 0..=100, one decimal.
    pub index_score: f64,
    pub total_workers: u64,
    /// Sector with the most workers; `None` when every sector is empty.
    pub dominant_sector: Option<String>,
    pub counts: SectorCounts,
}

impl ScoreResult {
    pub fn band(&self) -> ExposureBand {
        ExposureBand::classify(self.index_score)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExposureBand {
    Low,
    Moderate,
    High,
}

impl ExposureBand {
    pub fn classify(index_score: f64) -> Self {
        if index_score < MODERATE_EXPOSURE_SCORE {
            Self::Low
        } else if index_score < HIGH_EXPOSURE_SCORE {
            Self::Moderate
        } else {
            Self::High
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "Low Exposure",
            Self::Moderate => "Moderate Exposure",
            Self::High => "High Exposure",
        }
    }

    pub const fn analysis(self) -> &'static str {
        match self {
            Self::Low => "Low Exposure (Manual/Service Heavy)",
            Self::Moderate => "Moderate Exposure (Mixed Economy)",
            Self::High => "High Exposure (Admin/Information Heavy)",
        }
    }
}

/// Scores one region's workforce against the risk table.
///
/// Every sector other than the workforce total contributes
/// `count * weight`; the sum is divided by the reported total and scaled to
/// 0..=100. The dominant sector is the first sector holding the largest
/// count.
#[allow(clippy::cast_precision_loss)]
pub fn compute_score(
    counts: SectorCounts,
    risk_table: &RiskTable,
) -> Result<ScoreResult, ScoreError> {
    let total_workers = counts.total_workers();
    if total_workers < MIN_POPULATION {
        return Err(ScoreError::InsufficientPopulation {
            total_workers,
            minimum: MIN_POPULATION,
        });
    }

    let mut weighted_mass = 0.0_f64;
    let mut dominant: Option<(&str, u64)> = None;

    for (sector, count) in counts.sectors() {
        weighted_mass += count as f64 * risk_table.weight(sector);

        if count > dominant.map_or(0, |(_, best)| best) {
            dominant = Some((sector, count));
        }
    }

    let dominant_sector = dominant.map(|(sector, _)| sector.to_string());
    let index_score = round_to_tenth(weighted_mass / total_workers as f64 * 100.0);

    Ok(ScoreResult {
        index_score,
        total_workers,
        dominant_sector,
        counts,
    })
}

/// Scores the outcome of a workforce fetch.
///
/// A failed fetch is returned as [`ScoreError::UpstreamData`] with the
/// original error intact, so callers handle fetch and scoring failures on
/// one path.
pub fn score_fetched<E>(
    fetched: Result<SectorCounts, E>,
    risk_table: &RiskTable,
) -> Result<ScoreResult, ScoreError>
where
    E: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    let counts = fetched.map_err(ScoreError::upstream)?;
    compute_score(counts, risk_table)
}

/// One decimal, rounded on the exact binary value with ties to even
/// (`6.25` becomes `6.2`).
fn round_to_tenth(value: f64) -> f64 {
    format!("{value:.1}").parse().unwrap_or(value)
}
