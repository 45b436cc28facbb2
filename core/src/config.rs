//! Controller configuration: endpoints, element ids and user-facing strings.
//!
//! Precedence: defaults < TOML file < `INTAKE_*` environment.
//! Nested keys use a double underscore, e.g. `INTAKE_ELEMENTS__ERROR_DISPLAY`.

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Ids of the page elements the controller reads from or writes to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElementIds {
    pub drop_zone: String,
    pub file_input: String,
    pub browse: Vec<String>,
    pub error_display: String,
    /// Text shown while no request is in flight.
    pub idle_text: String,
    /// Spinner shown while any request is in flight.
    pub busy_spinner: String,
}

impl ElementIds {
    pub fn is_browse_trigger(&self, id: &str) -> bool {
        self.browse.iter().any(|trigger| trigger == id)
    }
}

impl Default for ElementIds {
    fn default() -> Self {
        Self {
            drop_zone: "drop-area".to_string(),
            file_input: "file-input".to_string(),
            browse: vec!["browse".to_string()],
            error_display: "error-message".to_string(),
            idle_text: "center-text".to_string(),
            busy_spinner: "spinner".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntakeConfig {
    /// Origin prefix for endpoint paths. Empty means same origin.
    pub base_url: String,
    pub upload_path: String,
    pub url_path: String,
    pub elements: ElementIds,
    /// Class toggled on the drop zone during a drag gesture.
    pub drag_active_class: String,
    pub warning_prefix: String,
    pub network_error_message: String,
    pub malformed_response_message: String,
}

impl Default for IntakeConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            upload_path: "/upload".to_string(),
            url_path: "/url".to_string(),
            elements: ElementIds::default(),
            drag_active_class: "drag-over".to_string(),
            warning_prefix: "⚠ ".to_string(),
            network_error_message: "network error".to_string(),
            malformed_response_message: "unexpected response from server".to_string(),
        }
    }
}

impl IntakeConfig {
    /// Layer `path` and the environment over the defaults, then validate.
    /// A missing file is not an error.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let config: IntakeConfig = Figment::new()
            .merge(Serialized::defaults(IntakeConfig::default()))
            .merge(Toml::file(path.as_ref()))
            .merge(Env::prefixed("INTAKE_").split("__"))
            .extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Parse the JSON object a page embeds for the controller. Missing keys take defaults.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: IntakeConfig = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, path) in [
            ("upload_path", &self.upload_path),
            ("url_path", &self.url_path),
        ] {
            if !path.starts_with('/') {
                return Err(ConfigError::Invalid(format!(
                    "{name} must start with '/', got {path:?}"
                )));
            }
        }
        if self.elements.browse.is_empty() {
            return Err(ConfigError::Invalid(
                "elements.browse must name at least one trigger".to_string(),
            ));
        }
        Ok(())
    }

    /// Full target for file uploads.
    pub fn upload_endpoint(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), self.upload_path)
    }

    /// Full target for URL uploads.
    pub fn url_endpoint(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), self.url_path)
    }

    /// `message` as it should appear in the error display.
    pub fn format_error(&self, message: &str) -> String {
        format!("{}{message}", self.warning_prefix)
    }
}
