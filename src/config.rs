use serde::Deserialize;

use crate::error::RenderError;
use crate::render::pass::Variant;

/// Page-level settings for a demo; every field is optional in YAML
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DemoConfig {
    /// CSS selector of the target canvas
    pub canvas_selector: String,
    pub variant: Variant,
    /// `error`, `warn`, `info`, `debug` or `trace`
    pub log_level: String,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            canvas_selector: "#c".to_string(),
            variant: Variant::default(),
            log_level: "info".to_string(),
        }
    }
}

impl DemoConfig {
    /// Parse from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self, RenderError> {
        let config: DemoConfig = if yaml.trim().is_empty() {
            DemoConfig::default()
        } else {
            serde_yaml::from_str(yaml)
                .map_err(|e| RenderError::Config(format!("YAML parse error: {}", e)))?
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), RenderError> {
        if self.canvas_selector.trim().is_empty() {
            return Err(RenderError::Config("canvas_selector must not be empty".to_string()));
        }
        self.level_filter()?;
        Ok(())
    }

    pub fn level_filter(&self) -> Result<log::LevelFilter, RenderError> {
        self.log_level
            .parse::<log::LevelFilter>()
            .map_err(|_| RenderError::Config(format!("unknown log level '{}'", self.log_level)))
    }
}
