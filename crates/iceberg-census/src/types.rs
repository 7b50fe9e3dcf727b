use crate::error::ProviderError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkforceRequest {
    pub zip_code: String,
}

impl WorkforceRequest {
    pub fn zip(zip_code: impl Into<String>) -> Self {
        Self {
            zip_code: zip_code.into().trim().to_string(),
        }
    }

    /// ZIP Code Tabulation Areas are always five ASCII digits.
    pub fn validate(&self) -> Result<(), ProviderError> {
        let code = self.zip_code.as_str();
        if code.len() == 5 && code.bytes().all(|b| b.is_ascii_digit()) {
            Ok(())
        } else {
            Err(ProviderError::InvalidRegion(self.zip_code.clone()))
        }
    }
}
