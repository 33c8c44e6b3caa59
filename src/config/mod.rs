mod builder;

pub use builder::*;

use serde::{Deserialize, Serialize};

/// Configuration for a map event adapter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapEventsConfig {
    /// Name attached to every log event emitted by the adapter
    pub label: String,
    /// Log subscriptions skipped for lack of a map at `warn` instead of `debug`
    pub warn_on_skip: bool,
    /// Whether dropping a `Disposer` disposes the adapter
    pub dispose_on_drop: bool,
}

impl Default for MapEventsConfig {
    fn default() -> Self {
        Self {
            label: "map".to_string(),
            warn_on_skip: false,
            dispose_on_drop: true,
        }
    }
}

impl MapEventsConfig {
    /// Create a default configuration with a custom label
    pub fn labeled(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..Default::default()
        }
    }

    /// Log skipped subscriptions at `warn`
    pub fn with_warn_on_skip(mut self, warn: bool) -> Self {
        self.warn_on_skip = warn;
        self
    }

    /// Set whether dropping the disposer tears the adapter down
    pub fn with_dispose_on_drop(mut self, dispose: bool) -> Self {
        self.dispose_on_drop = dispose;
        self
    }

    /// Create a builder for validated configuration
    pub fn builder() -> MapEventsConfigBuilder {
        MapEventsConfigBuilder::new()
    }
}
