//! Pipeline configuration: which stages run, in which order.
//!
//! ```yaml
//! stages:
//!   - strip-thinking
//! ```

use crate::plugins::StripThinking;
use crate::{Error, ErrorContext, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Environment variable the CLI reads a pipeline config path from.
pub const PIPELINE_ENV_VAR: &str = "STRIP_THINKING_PIPELINE";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PipelineConfig {
    /// Stage names, resolved against a plugin registry.
    pub stages: Vec<String>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            stages: vec![StripThinking::NAME.to_string()],
        }
    }
}

impl PipelineConfig {
    pub fn from_yaml_str(s: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_str(s: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a file. `.json` files are parsed as JSON, anything else as YAML.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path).await?;
        let is_json = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("json"));
        tracing::debug!(path = %path.display(), is_json, "loading pipeline config");
        if is_json {
            Self::from_json_str(&content)
        } else {
            Self::from_yaml_str(&content)
        }
    }

    /// Stage names must be non-empty and unique.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for (i, name) in self.stages.iter().enumerate() {
            if name.trim().is_empty() {
                return Err(Error::configuration_with_context(
                    "stage name must not be empty",
                    ErrorContext::new()
                        .with_field_path(format!("stages[{}]", i))
                        .with_source("pipeline_config"),
                ));
            }
            if !seen.insert(name.as_str()) {
                return Err(Error::configuration_with_context(
                    format!("stage '{}' is listed more than once", name),
                    ErrorContext::new()
                        .with_field_path(format!("stages[{}]", i))
                        .with_source("pipeline_config"),
                ));
            }
        }
        Ok(())
    }
}
