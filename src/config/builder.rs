use super::MapEventsConfig;
use crate::{MapEventsError, Result};

/// Builder for creating adapter configurations with a fluent API
#[derive(Debug, Clone, Default)]
pub struct MapEventsConfigBuilder {
    label: Option<String>,
    warn_on_skip: Option<bool>,
    dispose_on_drop: Option<bool>,
}

impl MapEventsConfigBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the log label
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Log skipped subscriptions at `warn`
    pub fn warn_on_skip(mut self) -> Self {
        self.warn_on_skip = Some(true);
        self
    }

    /// Require an explicit `dispose()` call instead of disposing on drop
    pub fn manual_dispose(mut self) -> Self {
        self.dispose_on_drop = Some(false);
        self
    }

    /// Build and validate the configuration
    pub fn build(self) -> Result<MapEventsConfig> {
        let defaults = MapEventsConfig::default();

        let label = self.label.unwrap_or(defaults.label);
        if label.trim().is_empty() {
            return Err(MapEventsError::Config(
                "Adapter label must not be empty".to_string(),
            ));
        }

        Ok(MapEventsConfig {
            label,
            warn_on_skip: self.warn_on_skip.unwrap_or(defaults.warn_on_skip),
            dispose_on_drop: self.dispose_on_drop.unwrap_or(defaults.dispose_on_drop),
        })
    }
}
