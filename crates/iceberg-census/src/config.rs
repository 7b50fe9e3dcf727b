use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_CENSUS_BASE_URL: &str = "https://api.census.gov";
pub const DEFAULT_CENSUS_YEAR: &str = "2024";
pub const DEFAULT_CENSUS_DATASET: &str = "acs/acs5/subject";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Clone)]
pub struct AcsSubjectConfig {
    pub api_key: String,
    pub base_url: String,
    pub year: String,
    pub dataset: String,
    pub timeout: Duration,
}

impl AcsSubjectConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_CENSUS_BASE_URL.to_string(),
            year: DEFAULT_CENSUS_YEAR.to_string(),
            dataset: DEFAULT_CENSUS_DATASET.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Reads `CENSUS_API_KEY` and the `ICEBERG_CENSUS_*` overrides.
    ///
    /// A missing key is not an error here; the provider reports it on the
    /// first fetch.
    pub fn from_env() -> Self {
        let mut cfg = Self::new(env_string("CENSUS_API_KEY").unwrap_or_default());
        if let Some(base_url) = env_string("ICEBERG_CENSUS_BASE_URL") {
            cfg.base_url = base_url;
        }
        if let Some(year) = env_string("ICEBERG_CENSUS_YEAR") {
            cfg.year = year;
        }
        if let Some(dataset) = env_string("ICEBERG_CENSUS_DATASET") {
            cfg.dataset = dataset;
        }
        cfg.timeout = Duration::from_secs(env_u64(
            "ICEBERG_CENSUS_TIMEOUT_SECS",
            DEFAULT_TIMEOUT_SECS,
            1,
            120,
        ));
        cfg
    }

    pub fn has_api_key(&self) -> bool {
        !self.api_key.trim().is_empty()
    }
}

// Keeps the key out of debug logs.
impl std::fmt::Debug for AcsSubjectConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AcsSubjectConfig")
            .field("api_key", &if self.has_api_key() { "<set>" } else { "<missing>" })
            .field("base_url", &self.base_url)
            .field("year", &self.year)
            .field("dataset", &self.dataset)
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct FixtureConfig {
    pub path: PathBuf,
}

impl FixtureConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn from_env() -> Option<Self> {
        env_string("ICEBERG_FIXTURE").map(Self::new)
    }
}

#[derive(Debug, Clone)]
pub enum WorkforceProviderConfig {
    AcsSubject(AcsSubjectConfig),
    Fixture(FixtureConfig),
}

impl WorkforceProviderConfig {
    /// Fixture data when `ICEBERG_FIXTURE` is set, the live Census API otherwise.
    pub fn from_env() -> Self {
        FixtureConfig::from_env().map_or_else(
            || Self::AcsSubject(AcsSubjectConfig::from_env()),
            Self::Fixture,
        )
    }
}

fn env_string(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn env_u64(name: &str, default: u64, min: u64, max: u64) -> u64 {
    std::env::var(name)
        .ok()
        .and_then(|v| v.trim().parse::<u64>().ok())
        .unwrap_or(default)
        .clamp(min, max)
}
