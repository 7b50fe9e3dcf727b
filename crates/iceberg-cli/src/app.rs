use iceberg_census::{
    build_workforce_provider, FixtureConfig, WorkforceProviderConfig, WorkforceRequest,
};
use iceberg_core::{score_fetched, RiskTable, ScoreError};
use iceberg_tables::{builtin_risk_table, load_risk_table, TableLoadError, RISK_TABLE_NAME};
use thiserror::Error;
use tracing::{debug, info};

use crate::cli::Args;
use crate::report::Report;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Score(#[from] ScoreError),

    #[error(transparent)]
    Table(#[from] TableLoadError),

    #[error("failed to start async runtime: {0}")]
    Runtime(#[source] std::io::Error),

    #[error("failed to write report: {0}")]
    Output(#[source] std::io::Error),
}

impl CliError {
    /// Too few workers is a business outcome, not a failure, and gets its own code.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Score(err) if err.is_insufficient_population() => 2,
            _ => 1,
        }
    }
}

/// Resolves the workforce source: environment first, then command-line overrides.
pub fn provider_config(args: &Args) -> WorkforceProviderConfig {
    let mut cfg = WorkforceProviderConfig::from_env();
    if let Some(path) = &args.fixture {
        cfg = WorkforceProviderConfig::Fixture(FixtureConfig::new(path));
    }
    if let (Some(year), WorkforceProviderConfig::AcsSubject(acs)) = (&args.year, &mut cfg) {
        acs.year = year.trim().to_string();
    }
    cfg
}

pub fn risk_table(args: &Args) -> Result<RiskTable, TableLoadError> {
    match &args.risk_table {
        Some(path) => {
            debug!(path = %path.display(), "loading risk table override");
            load_risk_table(path)
        }
        None => {
            debug!(table = RISK_TABLE_NAME, "using builtin risk table");
            builtin_risk_table()
        }
    }
}

/// Fetches the zip code's workforce table, scores it once and builds the report.
pub fn run(args: &Args) -> Result<Report, CliError> {
    let risk_table = risk_table(args)?;
    let provider_cfg = provider_config(args);
    debug!(config = ?provider_cfg, "resolved workforce provider");

    let runtime = tokio::runtime::Runtime::new().map_err(CliError::Runtime)?;
    let request = WorkforceRequest::zip(&args.zip);
    let fetched = build_workforce_provider(provider_cfg).and_then(|provider| {
        info!(provider = provider.name(), zip = %request.zip_code, "fetching workforce table");
        runtime.block_on(provider.fetch(request.clone()))
    });

    let result = score_fetched(fetched, &risk_table)?;
    info!(
        zip = %request.zip_code,
        index_score = result.index_score,
        dominant_sector = result.dominant_sector.as_deref().unwrap_or("none"),
        "computed iceberg index"
    );

    Ok(Report::new(request.zip_code, result, &risk_table))
}
