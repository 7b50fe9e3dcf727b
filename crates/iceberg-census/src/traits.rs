use async_trait::async_trait;
use iceberg_core::SectorCounts;

use crate::error::ProviderError;
use crate::types::WorkforceRequest;

#[async_trait]
pub trait WorkforceProvider: Send + Sync {
    fn name(&self) -> &'static str;

    async fn fetch(&self, request: WorkforceRequest) -> Result<SectorCounts, ProviderError>;
}
