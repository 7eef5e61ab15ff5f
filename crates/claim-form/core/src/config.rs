// File: src/config.rs
// Purpose: Configuration parsing (claim-form.toml) and the compiled ValidationConfig

use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::error::Error;

/// Built-in email pattern
pub const DEFAULT_EMAIL_PATTERN: &str = r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$";

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(DEFAULT_EMAIL_PATTERN).unwrap());

/// Raw form configuration as read from TOML
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct FormConfig {
    #[serde(default)]
    pub validation: ValidationSettings,

    #[serde(default)]
    pub messages: MessageConfig,

    #[serde(default)]
    pub classes: ClassConfig,

    #[serde(default)]
    pub selectors: SelectorConfig,
}

/// Email pattern and success timing
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ValidationSettings {
    #[serde(default = "default_email_pattern")]
    pub email_pattern: String,

    /// How long the success message stays visible (milliseconds)
    #[serde(default = "default_success_display_ms")]
    pub success_display_ms: u32,
}

/// Feedback texts and glyphs
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MessageConfig {
    #[serde(default = "default_empty_fields")]
    pub empty_fields: String,

    #[serde(default = "default_invalid_email")]
    pub invalid_email: String,

    #[serde(default = "default_success")]
    pub success: String,

    #[serde(default = "default_warning_glyph")]
    pub warning_glyph: String,

    #[serde(default = "default_success_glyph")]
    pub success_glyph: String,
}

/// Class tags consumed by the stylesheet
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClassConfig {
    #[serde(default = "default_error_class")]
    pub error: String,

    #[serde(default = "default_success_class")]
    pub success: String,

    /// Element id given to error nodes
    #[serde(default = "default_error_id")]
    pub error_id: String,
}

/// Selectors used to locate the controls once at startup
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SelectorConfig {
    #[serde(default = "default_first_name_selector")]
    pub first_name: String,

    #[serde(default = "default_last_name_selector")]
    pub last_name: String,

    #[serde(default = "default_email_selector")]
    pub email: String,

    #[serde(default = "default_password_selector")]
    pub password: String,

    #[serde(default = "default_submit_selector")]
    pub submit: String,
}

// Default values
fn default_email_pattern() -> String {
    DEFAULT_EMAIL_PATTERN.to_string()
}

fn default_success_display_ms() -> u32 {
    3000
}

fn default_empty_fields() -> String {
    "Please fill in all fields.".to_string()
}

fn default_invalid_email() -> String {
    "Invalid email! Please check your data.".to_string()
}

fn default_success() -> String {
    "Data Has Been Submitted Successfully!".to_string()
}

fn default_warning_glyph() -> String {
    "⚠".to_string()
}

fn default_success_glyph() -> String {
    "✅".to_string()
}

fn default_error_class() -> String {
    "error".to_string()
}

fn default_success_class() -> String {
    "success-validation".to_string()
}

fn default_error_id() -> String {
    "error".to_string()
}

fn default_first_name_selector() -> String {
    r#".input[placeholder*="First Name"]"#.to_string()
}

fn default_last_name_selector() -> String {
    r#".input[placeholder*="Last Name"]"#.to_string()
}

fn default_email_selector() -> String {
    ".email".to_string()
}

fn default_password_selector() -> String {
    r#".input[placeholder*="Password"]"#.to_string()
}

fn default_submit_selector() -> String {
    "button".to_string()
}

// Default implementations
impl Default for ValidationSettings {
    fn default() -> Self {
        Self {
            email_pattern: default_email_pattern(),
            success_display_ms: default_success_display_ms(),
        }
    }
}

impl Default for MessageConfig {
    fn default() -> Self {
        Self {
            empty_fields: default_empty_fields(),
            invalid_email: default_invalid_email(),
            success: default_success(),
            warning_glyph: default_warning_glyph(),
            success_glyph: default_success_glyph(),
        }
    }
}

impl Default for ClassConfig {
    fn default() -> Self {
        Self {
            error: default_error_class(),
            success: default_success_class(),
            error_id: default_error_id(),
        }
    }
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            first_name: default_first_name_selector(),
            last_name: default_last_name_selector(),
            email: default_email_selector(),
            password: default_password_selector(),
            submit: default_submit_selector(),
        }
    }
}

impl FormConfig {
    /// Load configuration from a TOML file
    ///
    /// A missing or empty file yields the default configuration.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        Self::from_toml_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))
    }

    /// Load configuration from default path (./claim-form.toml)
    pub fn load_default() -> Result<Self> {
        Self::load("claim-form.toml")
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: FormConfig = toml::from_str(content).context("Invalid claim form TOML")?;
        Ok(config)
    }
}

/// Immutable, compiled configuration shared with the submit handler
#[derive(Debug, Clone)]
pub struct ValidationConfig {
    pub email_pattern: Regex,
    pub success_display: Duration,
    pub messages: MessageConfig,
    pub classes: ClassConfig,
    pub selectors: SelectorConfig,
}

impl ValidationConfig {
    /// Compile a raw [`FormConfig`]
    pub fn from_config(config: &FormConfig) -> crate::Result<Self> {
        let pattern = &config.validation.email_pattern;
        let email_pattern = if pattern == DEFAULT_EMAIL_PATTERN {
            EMAIL_REGEX.clone()
        } else {
            Regex::new(pattern).map_err(|source| Error::InvalidPattern {
                pattern: pattern.clone(),
                source,
            })?
        };

        if config.validation.success_display_ms == 0 {
            return Err(Error::ZeroDisplayDuration);
        }

        for class in [&config.classes.error, &config.classes.success] {
            if class.is_empty() || class.chars().any(char::is_whitespace) {
                return Err(Error::InvalidClass {
                    class: class.clone(),
                });
            }
        }

        Ok(Self {
            email_pattern,
            success_display: Duration::from_millis(u64::from(config.validation.success_display_ms)),
            messages: config.messages.clone(),
            classes: config.classes.clone(),
            selectors: config.selectors.clone(),
        })
    }
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            email_pattern: EMAIL_REGEX.clone(),
            success_display: Duration::from_millis(u64::from(default_success_display_ms())),
            messages: MessageConfig::default(),
            classes: ClassConfig::default(),
            selectors: SelectorConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_config() {
        let config = FormConfig::default();
        assert_eq!(config.validation.success_display_ms, 3000);
        assert_eq!(config.messages.empty_fields, "Please fill in all fields.");
        assert_eq!(config.messages.invalid_email, "Invalid email! Please check your data.");
        assert_eq!(config.classes.error, "error");
        assert_eq!(config.classes.success, "success-validation");
        assert_eq!(config.selectors.email, ".email");
        assert_eq!(config.selectors.submit, "button");
    }

    #[test]
    fn test_empty_config() {
        let config = FormConfig::from_toml_str("   \n").unwrap();
        assert_eq!(config, FormConfig::default());
    }

    #[test]
    fn test_partial_overrides() {
        let toml = r##"
            [validation]
            success_display_ms = 500

            [messages]
            empty_fields = "All fields are required."

            [selectors]
            submit = "#claim"
        "##;
        let config = FormConfig::from_toml_str(toml).unwrap();
        assert_eq!(config.validation.success_display_ms, 500);
        assert_eq!(config.validation.email_pattern, DEFAULT_EMAIL_PATTERN);
        assert_eq!(config.messages.empty_fields, "All fields are required.");
        assert_eq!(config.messages.invalid_email, "Invalid email! Please check your data.");
        assert_eq!(config.selectors.submit, "#claim");
        assert_eq!(config.selectors.email, ".email");
    }

    #[test]
    fn test_malformed_toml_is_rejected() {
        assert!(FormConfig::from_toml_str("[validation\nsuccess_display_ms = ").is_err());
    }

    #[test]
    fn test_load_missing_file_falls_back_to_default() {
        let config = FormConfig::load("definitely/not/here/claim-form.toml").unwrap();
        assert_eq!(config, FormConfig::default());
    }

    #[test]
    fn test_load_reports_path_on_parse_error() {
        let path = std::env::temp_dir().join(format!("claim-form-bad-{}.toml", std::process::id()));
        fs::write(&path, "validation = 3").unwrap();
        let err = FormConfig::load(&path).unwrap_err();
        fs::remove_file(&path).ok();
        assert!(format!("{err}").contains("Failed to parse config file"));
    }

    #[test]
    fn test_compile_default() {
        let config = ValidationConfig::from_config(&FormConfig::default()).unwrap();
        assert_eq!(config.success_display, Duration::from_millis(3000));
        assert_eq!(config.email_pattern.as_str(), DEFAULT_EMAIL_PATTERN);
    }

    #[test]
    fn test_compile_rejects_bad_pattern() {
        let mut raw = FormConfig::default();
        raw.validation.email_pattern = "([a-z".to_string();
        let err = ValidationConfig::from_config(&raw).unwrap_err();
        assert!(matches!(err, Error::InvalidPattern { .. }));
    }

    #[test]
    fn test_compile_rejects_bad_class() {
        let mut raw = FormConfig::default();
        raw.classes.success = "success validation".to_string();
        let err = ValidationConfig::from_config(&raw).unwrap_err();
        assert!(matches!(err, Error::InvalidClass { class } if class == "success validation"));
    }

    #[test]
    fn test_compile_rejects_zero_duration() {
        let mut raw = FormConfig::default();
        raw.validation.success_display_ms = 0;
        assert!(matches!(
            ValidationConfig::from_config(&raw),
            Err(Error::ZeroDisplayDuration)
        ));
    }
}
