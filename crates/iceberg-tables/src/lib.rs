use std::fs;
use std::path::{Path, PathBuf};

use iceberg_core::{RiskTable, TOTAL_WORKERS_KEY};
use thiserror::Error;

pub const RISK_TABLE_NAME: &str = "builtin/risk_table.json";
pub const RISK_TABLE_SOURCE: &str =
    "Eloundou et al. (2023), \"GPTs are GPTs\" occupational exposure estimates";
pub const RISK_TABLE_TEXT: &str = include_str!("../../../data/risk_table.json");

/// ACS subject table holding occupation by sex for the civilian employed population.
pub const CENSUS_TABLE: &str = "S2401";

#[derive(Debug, Error)]
pub enum TableLoadError {
    #[error("failed to read risk table {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid risk table {name}: {source}")]
    Parse {
        name: String,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, Copy)]
pub struct CensusVariable {
    pub code: &'static str,
    pub sector: &'static str,
}

static CENSUS_VARIABLES: [CensusVariable; 23] = [
    CensusVariable {
        code: "S2401_C01_001E",
        sector: TOTAL_WORKERS_KEY,
    },
    CensusVariable {
        code: "S2401_C01_002E",
        sector: "Management",
    },
    CensusVariable {
        code: "S2401_C01_003E",
        sector: "Business_Financial",
    },
    CensusVariable {
        code: "S2401_C01_005E",
        sector: "Computer_Math",
    },
    CensusVariable {
        code: "S2401_C01_006E",
        sector: "Architecture_Engineering",
    },
    CensusVariable {
        code: "S2401_C01_007E",
        sector: "Science_Life_Physical",
    },
    CensusVariable {
        code: "S2401_C01_008E",
        sector: "Social_Services",
    },
    CensusVariable {
        code: "S2401_C01_009E",
        sector: "Legal",
    },
    CensusVariable {
        code: "S2401_C01_010E",
        sector: "Education",
    },
    CensusVariable {
        code: "S2401_C01_011E",
        sector: "Arts_Media",
    },
    CensusVariable {
        code: "S2401_C01_012E",
        sector: "Healthcare_Practitioners",
    },
    CensusVariable {
        code: "S2401_C01_013E",
        sector: "Healthcare_Support",
    },
    CensusVariable {
        code: "S2401_C01_014E",
        sector: "Protective_Service",
    },
    CensusVariable {
        code: "S2401_C01_015E",
        sector: "Food_Prep",
    },
    CensusVariable {
        code: "S2401_C01_016E",
        sector: "Cleaning_Maintenance",
    },
    CensusVariable {
        code: "S2401_C01_017E",
        sector: "Personal_Care",
    },
    CensusVariable {
        code: "S2401_C01_018E",
        sector: "Sales",
    },
    CensusVariable {
        code: "S2401_C01_019E",
        sector: "Office_Admin",
    },
    CensusVariable {
        code: "S2401_C01_020E",
        sector: "Farming_Fishing",
    },
    CensusVariable {
        code: "S2401_C01_021E",
        sector: "Construction",
    },
    CensusVariable {
        code: "S2401_C01_022E",
        sector: "Production",
    },
    CensusVariable {
        code: "S2401_C01_023E",
        sector: "Transportation",
    },
    CensusVariable {
        code: "S2401_C01_024E",
        sector: "Material_Moving",
    },
];

pub fn census_variables() -> &'static [CensusVariable] {
    &CENSUS_VARIABLES
}

pub fn census_codes() -> impl Iterator<Item = &'static str> {
    CENSUS_VARIABLES.iter().map(|variable| variable.code)
}

pub fn census_sector(code: &str) -> Option<&'static str> {
    CENSUS_VARIABLES
        .iter()
        .find(|variable| variable.code == code)
        .map(|variable| variable.sector)
}

pub fn builtin_risk_table() -> Result<RiskTable, TableLoadError> {
    parse_risk_table(RISK_TABLE_NAME, RISK_TABLE_TEXT)
}

pub fn load_risk_table(path: impl AsRef<Path>) -> Result<RiskTable, TableLoadError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| TableLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_risk_table(&path.display().to_string(), &text)
}

fn parse_risk_table(name: &str, text: &str) -> Result<RiskTable, TableLoadError> {
    serde_json::from_str(text).map_err(|source| TableLoadError::Parse {
        name: name.to_string(),
        source,
    })
}
