use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScoreError {
    #[error(
        "population too low to calculate index: {total_workers} workers (minimum {minimum})"
    )]
    InsufficientPopulation { total_workers: u64, minimum: u64 },

    /// A fetch failure handed through untouched so callers keep one error path.
    #[error(transparent)]
    UpstreamData(Box<dyn std::error::Error + Send + Sync>),
}

impl ScoreError {
    pub fn upstream(err: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::UpstreamData(err.into())
    }

    pub const fn is_insufficient_population(&self) -> bool {
        matches!(self, Self::InsufficientPopulation { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum TableError {
    #[error("risk table contains an empty sector name")]
    EmptySector,

    #[error("risk weight for {sector} must be within [0, 1], got {weight}")]
    WeightOutOfRange { sector: String, weight: f64 },
}
