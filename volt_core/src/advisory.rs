//! # Technical Advisory
//!
//! Interface to a text-generation assistant that answers standards, safety,
//! and field questions. The engine only defines the contract and the wire
//! types; the HTTP transport lives in the CLI.
//!
//! ## Example
//!
//! ```rust
//! use volt_core::advisory::{system_instruction, AdvisoryContext, Language};
//!
//! let instruction = system_instruction(AdvisoryContext::Norm, Language::Pt);
//! assert!(instruction.contains("Portuguese"));
//! assert!(instruction.contains("NBR 5410"));
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Model used when settings do not name one
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Low temperature for repeatable technical answers
pub const DEFAULT_TEMPERATURE: f64 = 0.3;

/// Returned when the service answers with no text
pub const FALLBACK_TEXT: &str = "No response generated.";

const PERSONA: &str =
    "You are an expert Senior Electrical Engineer assistant called VoltMaster AI.";

/// Response language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Pt,
    #[default]
    En,
    Es,
}

impl Language {
    pub const ALL: [Language; 3] = [Language::Pt, Language::En, Language::Es];

    pub fn code(&self) -> &'static str {
        match self {
            Language::Pt => "pt",
            Language::En => "en",
            Language::Es => "es",
        }
    }

    fn directive(&self) -> &'static str {
        match self {
            Language::Pt => "Respond ONLY in Portuguese (PT-BR).",
            Language::Es => "Respond ONLY in Spanish.",
            Language::En => "Respond in English.",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pt" | "pt-br" => Ok(Language::Pt),
            "en" => Ok(Language::En),
            "es" => Ok(Language::Es),
            other => Err(format!("unknown language '{}', expected pt, en or es", other)),
        }
    }
}

/// What kind of answer is wanted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AdvisoryContext {
    /// Standards lookup (IEC 60364, NEC, NBR 5410)
    Norm,
    /// Practical field advice
    #[default]
    General,
    /// Hazard-first guidance
    Safety,
}

impl AdvisoryContext {
    fn focus(&self) -> &'static str {
        match self {
            AdvisoryContext::Norm => {
                concat!(
                    "Focus on technical regulations (IEC 60364, NEC, NBR 5410). ",
                    "Cite specific articles where possible. Be precise."
                )
            }
            AdvisoryContext::Safety => {
                concat!(
                    "Prioritize safety above all else. ",
                    "Provide checklists and warning about potential arc flash or shock hazards."
                )
            }
            AdvisoryContext::General => {
                concat!(
                    "Provide practical, field-ready advice for electricians and engineers. ",
                    "Keep explanations concise and actionable."
                )
            }
        }
    }
}

impl FromStr for AdvisoryContext {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "norm" => Ok(AdvisoryContext::Norm),
            "general" => Ok(AdvisoryContext::General),
            "safety" => Ok(AdvisoryContext::Safety),
            other => Err(format!("unknown context '{}', expected norm, general or safety", other)),
        }
    }
}

/// Build the assistant persona for a context and language.
pub fn system_instruction(context: AdvisoryContext, language: Language) -> String {
    format!("{} {} {}", PERSONA, language.directive(), context.focus())
}

/// Advisory failures. Kept apart from engine errors; nothing here is retried.
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
#[serde(tag = "type", content = "details")]
pub enum AdvisoryError {
    #[error("API Key is missing. Please configure your environment.")]
    MissingApiKey,

    #[error("Prompt is empty")]
    EmptyPrompt,

    /// Transport or service failure; `reason` is for logs only
    #[error("Failed to consult the technical database. Please try again.")]
    ConsultationFailed { reason: String },
}

impl AdvisoryError {
    pub fn consultation_failed(reason: impl Into<String>) -> Self {
        AdvisoryError::ConsultationFailed { reason: reason.into() }
    }
}

/// A source of technical advice.
pub trait Advisor {
    fn advise(
        &self,
        prompt: &str,
        context: AdvisoryContext,
        language: Language,
    ) -> Result<String, AdvisoryError>;
}

/// Trimmed prompt, or `EmptyPrompt`
pub fn check_prompt(prompt: &str) -> Result<&str, AdvisoryError> {
    let prompt = prompt.trim();
    if prompt.is_empty() {
        return Err(AdvisoryError::EmptyPrompt);
    }
    Ok(prompt)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Part {
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub temperature: f64,
}

/// Body of a `generateContent` call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    pub contents: Vec<Content>,
    pub system_instruction: Content,
    pub generation_config: GenerationConfig,
}

impl GenerateRequest {
    pub fn new(
        prompt: &str,
        context: AdvisoryContext,
        language: Language,
        temperature: f64,
    ) -> Self {
        GenerateRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
            system_instruction: Content {
                role: None,
                parts: vec![Part {
                    text: system_instruction(context, language),
                }],
            },
            generation_config: GenerationConfig { temperature },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Candidate {
    #[serde(default)]
    pub content: Content,
}

/// Response of a `generateContent` call. Unknown fields are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct GenerateResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

impl GenerateResponse {
    /// Text of the first candidate, or [`FALLBACK_TEXT`] when there is none
    pub fn text(&self) -> String {
        let text: String = self
            .candidates
            .first()
            .map(|c| c.content.parts.iter().map(|p| p.text.as_str()).collect())
            .unwrap_or_default();
        if text.trim().is_empty() {
            FALLBACK_TEXT.to_string()
        } else {
            text
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct EchoAdvisor;

    impl Advisor for EchoAdvisor {
        fn advise(
            &self,
            prompt: &str,
            context: AdvisoryContext,
            language: Language,
        ) -> Result<String, AdvisoryError> {
            let prompt = check_prompt(prompt)?;
            Ok(format!("[{}:{:?}] {}", language, context, prompt))
        }
    }

    #[test]
    fn test_system_instruction_languages() {
        let pt = system_instruction(AdvisoryContext::General, Language::Pt);
        assert!(pt.starts_with(PERSONA));
        assert!(pt.contains("Respond ONLY in Portuguese (PT-BR)."));

        let es = system_instruction(AdvisoryContext::General, Language::Es);
        assert!(es.contains("Respond ONLY in Spanish."));

        let en = system_instruction(AdvisoryContext::General, Language::En);
        assert!(en.contains("Respond in English."));
    }

    #[test]
    fn test_system_instruction_contexts() {
        let norm = system_instruction(AdvisoryContext::Norm, Language::En);
        assert!(norm.contains("IEC 60364"));
        assert!(norm.contains("Cite specific articles"));

        let safety = system_instruction(AdvisoryContext::Safety, Language::En);
        assert!(safety.contains("arc flash"));

        let general = system_instruction(AdvisoryContext::General, Language::En);
        assert!(general.contains("field-ready"));
    }

    #[test]
    fn test_parse_enums() {
        assert_eq!("PT-BR".parse::<Language>(), Ok(Language::Pt));
        assert!("fr".parse::<Language>().is_err());
        assert_eq!("Safety".parse::<AdvisoryContext>(), Ok(AdvisoryContext::Safety));
        assert!("legal".parse::<AdvisoryContext>().is_err());
    }

    #[test]
    fn test_request_wire_shape() {
        let request = GenerateRequest::new(
            "Max cable for 32 A?",
            AdvisoryContext::Norm,
            Language::En,
            DEFAULT_TEMPERATURE,
        );
        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(value["contents"][0]["role"], "user");
        assert_eq!(value["contents"][0]["parts"][0]["text"], "Max cable for 32 A?");
        assert!(value["systemInstruction"]["role"].is_null());
        assert_eq!(value["generationConfig"]["temperature"], 0.3);
    }

    #[test]
    fn test_response_text() {
        let json = r#"{
            "candidates": [{
                "content": {"role": "model", "parts": [{"text": "Use "}, {"text": "6 mm²."}]},
                "finishReason": "STOP"
            }],
            "usageMetadata": {"totalTokenCount": 12}
        }"#;
        let response: GenerateResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.text(), "Use 6 mm².");
    }

    #[test]
    fn test_empty_response_falls_back() {
        let response: GenerateResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(response.text(), FALLBACK_TEXT);

        let json = r#"{"candidates":[{"content":{"parts":[{"text":"  "}]}}]}"#;
        let response: GenerateResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.text(), FALLBACK_TEXT);
    }

    #[test]
    fn test_advisor_trait() {
        let advisor = EchoAdvisor;
        let answer = advisor
            .advise("  grounding?  ", AdvisoryContext::Safety, Language::Es)
            .unwrap();
        assert_eq!(answer, "[es:Safety] grounding?");

        assert_eq!(
            advisor.advise("   ", AdvisoryContext::General, Language::En),
            Err(AdvisoryError::EmptyPrompt)
        );
    }

    #[test]
    fn test_error_messages() {
        let err = AdvisoryError::consultation_failed("timeout");
        assert_eq!(
            err.to_string(),
            "Failed to consult the technical database. Please try again."
        );
        assert!(AdvisoryError::MissingApiKey.to_string().contains("API Key"));
    }
}
