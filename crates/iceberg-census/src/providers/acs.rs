use iceberg_core::SectorCounts;
use iceberg_tables::{census_codes, census_sector};
use reqwest::{Client, StatusCode};
use serde_json::Value;
use tracing::debug;

use crate::config::AcsSubjectConfig;
use crate::error::ProviderError;
use crate::providers::parse_count;
use crate::traits::WorkforceProvider;
use crate::types::WorkforceRequest;

/// Occupation counts from the ACS 5-year subject table S2401.
#[derive(Clone)]
pub struct AcsSubjectProvider {
    config: AcsSubjectConfig,
    client: Client,
}

impl AcsSubjectProvider {
    pub fn new(config: AcsSubjectConfig) -> Result<Self, ProviderError> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { config, client })
    }

    fn query_url(&self, zip_code: &str, api_key: &str) -> String {
        format!(
            "{}/data/{}/{}?get={}&for=zip%20code%20tabulation%20area:{}&key={}",
            self.config.base_url.trim_end_matches('/'),
            self.config.year,
            self.config.dataset.trim_matches('/'),
            census_codes().collect::<Vec<_>>().join(","),
            zip_code,
            api_key
        )
    }
}

#[async_trait::async_trait]
impl WorkforceProvider for AcsSubjectProvider {
    fn name(&self) -> &'static str {
        "census-acs"
    }

    async fn fetch(&self, request: WorkforceRequest) -> Result<SectorCounts, ProviderError> {
        request.validate()?;
        if !self.config.has_api_key() {
            return Err(ProviderError::Config(
                "missing Census API key; set CENSUS_API_KEY or add it to .env".to_string(),
            ));
        }

        debug!(
            provider = self.name(),
            url = %self.query_url(&request.zip_code, "<redacted>"),
            "requesting census workforce table"
        );

        let res = self
            .client
            .get(self.query_url(&request.zip_code, self.config.api_key.trim()))
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            return Err(ProviderError::Api {
                status: status.as_u16(),
                body,
            });
        }
        if status == StatusCode::NO_CONTENT {
            return Err(ProviderError::RegionNotFound(request.zip_code));
        }

        let body = res.text().await?;
        if body.trim().is_empty() {
            return Err(ProviderError::RegionNotFound(request.zip_code));
        }

        let rows: Vec<Vec<Value>> = serde_json::from_str(&body)?;
        parse_census_rows(&rows)
    }
}

/// Maps a Census `[headers, values, ...]` table onto sector counts.
///
/// Columns whose header is not a known S2401 variable are ignored. Cells that
/// are empty, non-numeric or negative (Census marks suppressed estimates
/// with negative sentinels) count as zero.
pub fn parse_census_rows(rows: &[Vec<Value>]) -> Result<SectorCounts, ProviderError> {
    let [headers, values, ..] = rows else {
        return Err(ProviderError::InvalidResponse(
            "expected a header row and a value row".to_string(),
        ));
    };

    let mut counts = SectorCounts::new();
    for (header, value) in headers.iter().zip(values) {
        let Some(sector) = header.as_str().and_then(census_sector) else {
            continue;
        };
        counts.insert(sector, parse_count(sector, value));
    }

    if counts.is_empty() {
        return Err(ProviderError::InvalidResponse(
            "response carried none of the requested S2401 variables".to_string(),
        ));
    }
    Ok(counts)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn rows(value: Value) -> Vec<Vec<Value>> {
        serde_json::from_value(value).expect("rows")
    }

    #[test]
    fn query_url_lists_every_variable() {
        let mut cfg = AcsSubjectConfig::new("k");
        cfg.base_url = "http://localhost:9/".to_string();
        let provider = AcsSubjectProvider::new(cfg).expect("provider");

        let url = provider.query_url("14424", "abc");
        assert!(url.starts_with(
            "http://localhost:9/data/2024/acs/acs5/subject?get=S2401_C01_001E,S2401_C01_002E,"
        ));
        assert!(url.ends_with("&for=zip%20code%20tabulation%20area:14424&key=abc"));
        assert_eq!(url.matches("S2401_C01_").count(), 23);
    }

    #[test]
    fn maps_headers_to_sectors_in_order() {
        let table = rows(json!([
            ["S2401_C01_001E", "S2401_C01_019E", "S2401_C01_005E", "zip code tabulation area"],
            ["12000", "2100", "300", "14424"]
        ]));

        let counts = parse_census_rows(&table).expect("parse");
        let entries = counts.iter().collect::<Vec<_>>();
        assert_eq!(
            entries,
            vec![
                ("Total_Workers", 12000),
                ("Office_Admin", 2100),
                ("Computer_Math", 300)
            ]
        );
    }

    #[test]
    fn unusable_cells_become_zero() {
        let table = rows(json!([
            ["S2401_C01_001E", "S2401_C01_002E", "S2401_C01_003E", "S2401_C01_005E", "S2401_C01_009E"],
            ["1,500", null, "-666666666", "n/a", 42]
        ]));

        let counts = parse_census_rows(&table).expect("parse");
        assert_eq!(counts.total_workers(), 1500);
        assert_eq!(counts.get("Management"), Some(0));
        assert_eq!(counts.get("Business_Financial"), Some(0));
        assert_eq!(counts.get("Computer_Math"), Some(0));
        assert_eq!(counts.get("Legal"), Some(42));
    }

    #[test]
    fn header_only_table_is_invalid() {
        let table = rows(json!([["S2401_C01_001E"]]));
        assert!(matches!(
            parse_census_rows(&table),
            Err(ProviderError::InvalidResponse(_))
        ));
    }

    #[test]
    fn unrelated_columns_are_invalid() {
        let table = rows(json!([["NAME", "state"], ["Somewhere", "36"]]));
        assert!(matches!(
            parse_census_rows(&table),
            Err(ProviderError::InvalidResponse(_))
        ));
    }
}
