//! Request and response types for the critique API.

use serde::{Deserialize, Serialize};

use crate::error::CriticError;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: String,
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    /// Bare base64 payload or a full `data:` URI.
    pub image: String,
}

impl AnalyzeRequest {
    pub fn validate(&self) -> Result<(), CriticError> {
        if self.image.trim().is_empty() {
            return Err(CriticError::MalformedInput(
                "`image` must be a non-empty string".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Serialize)]
pub struct AnalyzeResponse {
    pub status: &'static str,
    pub critique: String,
    pub timestamp: String,
}
