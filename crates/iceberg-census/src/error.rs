use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("invalid zip code {0:?}: expected five digits")]
    InvalidRegion(String),

    #[error("no workforce data published for zip code {0}")]
    RegionNotFound(String),

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("provider returned invalid response: {0}")]
    InvalidResponse(String),

    #[error("Census API error: status={status}, body={body}")]
    Api { status: u16, body: String },
}
