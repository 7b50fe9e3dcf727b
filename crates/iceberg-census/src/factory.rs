use std::sync::Arc;

use crate::config::WorkforceProviderConfig;
use crate::error::ProviderError;
use crate::providers::{AcsSubjectProvider, FixtureProvider};
use crate::traits::WorkforceProvider;

pub fn build_workforce_provider(
    cfg: WorkforceProviderConfig,
) -> Result<Arc<dyn WorkforceProvider>, ProviderError> {
    match cfg {
        WorkforceProviderConfig::AcsSubject(c) => Ok(Arc::new(AcsSubjectProvider::new(c)?)),
        WorkforceProviderConfig::Fixture(c) => Ok(Arc::new(FixtureProvider::new(c)?)),
    }
}
