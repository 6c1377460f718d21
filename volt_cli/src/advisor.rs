//! HTTP transport for the technical advisory service.

use std::time::Duration;

use reqwest::blocking::Client;
use tracing::{debug, warn};

use volt_core::advisory::{
    check_prompt, Advisor, AdvisoryContext, AdvisoryError, GenerateRequest, GenerateResponse,
    Language,
};
use volt_core::settings::AdvisorySettings;

const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Blocking client for the `generateContent` endpoint. One request at a time, no retries.
pub struct GeminiAdvisor {
    client: Client,
    api_key: String,
    model: String,
    temperature: f64,
}

impl GeminiAdvisor {
    pub fn from_settings(settings: &AdvisorySettings) -> Result<Self, AdvisoryError> {
        let api_key = settings
            .api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .ok_or(AdvisoryError::MissingApiKey)?;

        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .map_err(|e| AdvisoryError::consultation_failed(e.to_string()))?;

        Ok(GeminiAdvisor {
            client,
            api_key,
            model: settings.model.clone(),
            temperature: settings.temperature,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", API_BASE, self.model)
    }
}

impl Advisor for GeminiAdvisor {
    fn advise(
        &self,
        prompt: &str,
        context: AdvisoryContext,
        language: Language,
    ) -> Result<String, AdvisoryError> {
        let prompt = check_prompt(prompt)?;
        let request = GenerateRequest::new(prompt, context, language, self.temperature);
        debug!(model = %self.model, ?context, %language, "sending advisory request");

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .and_then(|response| response.error_for_status())
            .map_err(|e| {
                warn!(error = %e, "advisory request failed");
                AdvisoryError::consultation_failed(e.to_string())
            })?;

        let body: GenerateResponse = response.json().map_err(|e| {
            warn!(error = %e, "advisory response unreadable");
            AdvisoryError::consultation_failed(e.to_string())
        })?;

        Ok(body.text())
    }
}
