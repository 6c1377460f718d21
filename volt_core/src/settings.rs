//! # Settings
//!
//! Runtime configuration, read from an optional TOML file and then
//! overridden from the environment.
//!
//! ```toml
//! data_dir = ".voltmaster"
//! language = "pt"
//! catalog_path = "catalogs/br.json"
//!
//! [advisory]
//! model = "gemini-2.5-flash"
//! temperature = 0.3
//! timeout_secs = 30
//! ```
//!
//! | Variable | Setting |
//! |----------|---------|
//! | `VOLTMASTER_DATA_DIR` | `data_dir` |
//! | `VOLTMASTER_LANGUAGE` | `language` |
//! | `VOLTMASTER_API_KEY`, then `API_KEY` | `advisory.api_key` |

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::advisory::{Language, DEFAULT_MODEL, DEFAULT_TEMPERATURE};
use crate::catalogs::Catalogs;
use crate::errors::{CalcError, CalcResult};

/// Default seconds before an advisory request is abandoned
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Advisory client settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdvisorySettings {
    pub model: String,
    pub temperature: f64,
    pub timeout_secs: u64,
    /// Usually supplied through the environment, not the file
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

impl Default for AdvisorySettings {
    fn default() -> Self {
        AdvisorySettings {
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            api_key: None,
        }
    }
}

/// Application settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Directory holding the project store
    pub data_dir: PathBuf,
    pub language: Language,
    /// Regional catalogs JSON; the standard set is used when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catalog_path: Option<PathBuf>,
    pub advisory: AdvisorySettings,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            data_dir: PathBuf::from(".voltmaster"),
            language: Language::default(),
            catalog_path: None,
            advisory: AdvisorySettings::default(),
        }
    }
}

impl Settings {
    /// Parse settings from TOML. Missing keys take their defaults.
    pub fn from_toml_str(toml: &str) -> CalcResult<Self> {
        toml::from_str(toml)
            .map_err(|e| CalcError::serialization(format!("Invalid settings TOML: {}", e)))
    }

    /// Read settings from a TOML file.
    pub fn from_file(path: &Path) -> CalcResult<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| CalcError::file_error("read", path.display().to_string(), e.to_string()))?;
        Self::from_toml_str(&contents)
    }

    /// Settings from `path` if given, defaults otherwise, then environment overrides.
    pub fn load(path: Option<&Path>) -> CalcResult<Self> {
        let settings = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        Ok(settings.with_env_overrides())
    }

    /// Apply `VOLTMASTER_*` environment overrides.
    #[must_use]
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|key| env::var(key).ok())
    }

    /// Apply overrides from any key lookup.
    #[must_use]
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(dir) = lookup("VOLTMASTER_DATA_DIR").filter(|v| !v.trim().is_empty()) {
            self.data_dir = PathBuf::from(dir);
        }
        if let Some(lang) = lookup("VOLTMASTER_LANGUAGE") {
            match lang.parse::<Language>() {
                Ok(language) => self.language = language,
                Err(e) => warn!(error = %e, "ignoring VOLTMASTER_LANGUAGE"),
            }
        }
        let api_key = lookup("VOLTMASTER_API_KEY")
            .filter(|k| !k.trim().is_empty())
            .or_else(|| lookup("API_KEY").filter(|k| !k.trim().is_empty()));
        if api_key.is_some() {
            self.advisory.api_key = api_key;
        }
        self
    }

    /// Catalogs named by `catalog_path`, or the standard set.
    pub fn load_catalogs(&self) -> CalcResult<Catalogs> {
        match &self.catalog_path {
            Some(path) => Catalogs::from_json_file(path),
            None => Ok(Catalogs::standard().clone()),
        }
    }

    /// Serialize to TOML.
    pub fn to_toml_string(&self) -> CalcResult<String> {
        toml::to_string_pretty(self).map_err(|e| {
            CalcError::serialization(format!("Failed to serialize settings: {}", e))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.data_dir, PathBuf::from(".voltmaster"));
        assert_eq!(settings.language, Language::En);
        assert_eq!(settings.advisory.model, "gemini-2.5-flash");
        assert_eq!(settings.advisory.timeout_secs, 30);
        assert!(settings.advisory.api_key.is_none());
    }

    #[test]
    fn test_partial_toml() {
        let settings = Settings::from_toml_str(
            r#"
            language = "pt"

            [advisory]
            timeout_secs = 10
            "#,
        )
        .unwrap();
        assert_eq!(settings.language, Language::Pt);
        assert_eq!(settings.advisory.timeout_secs, 10);
        assert_eq!(settings.advisory.temperature, 0.3);
        assert_eq!(settings.data_dir, PathBuf::from(".voltmaster"));
    }

    #[test]
    fn test_bad_toml() {
        assert!(matches!(
            Settings::from_toml_str("language = \"fr\""),
            Err(CalcError::SerializationError { .. })
        ));
    }

    #[test]
    fn test_env_overrides() {
        let settings = Settings::default().with_overrides(lookup(&[
            ("VOLTMASTER_DATA_DIR", "/srv/volt"),
            ("VOLTMASTER_LANGUAGE", "es"),
            ("API_KEY", "fallback-key"),
        ]));
        assert_eq!(settings.data_dir, PathBuf::from("/srv/volt"));
        assert_eq!(settings.language, Language::Es);
        assert_eq!(settings.advisory.api_key.as_deref(), Some("fallback-key"));
    }

    #[test]
    fn test_primary_api_key_wins() {
        let settings = Settings::default().with_overrides(lookup(&[
            ("VOLTMASTER_API_KEY", "primary"),
            ("API_KEY", "fallback"),
        ]));
        assert_eq!(settings.advisory.api_key.as_deref(), Some("primary"));
    }

    #[test]
    fn test_invalid_language_ignored() {
        let settings =
            Settings::default().with_overrides(lookup(&[("VOLTMASTER_LANGUAGE", "klingon")]));
        assert_eq!(settings.language, Language::En);
    }

    #[test]
    fn test_load_catalogs() {
        let settings = Settings::default();
        assert_eq!(&settings.load_catalogs().unwrap(), Catalogs::standard());

        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("catalogs.json");
        let mut custom = Catalogs::standard().clone();
        custom.breaker_ratings_a = vec![6.0, 10.0, 13.0];
        fs::write(&path, serde_json::to_string(&custom).unwrap()).unwrap();

        let settings = Settings {
            catalog_path: Some(path),
            ..Settings::default()
        };
        assert_eq!(settings.load_catalogs().unwrap().breaker_ratings_a, vec![6.0, 10.0, 13.0]);
    }

    #[test]
    fn test_toml_roundtrip() {
        let settings = Settings {
            language: Language::Pt,
            ..Settings::default()
        };
        let text = settings.to_toml_string().unwrap();
        assert_eq!(Settings::from_toml_str(&text).unwrap(), settings);
    }
}
