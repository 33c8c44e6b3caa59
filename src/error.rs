use thiserror::Error;

/// Errors that can occur while attaching to a map
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MapEventsError {
    /// The adapter was constructed without a map context
    #[error("Map context missing: map events must be used inside a map owner")]
    ContextMissing,

    /// Configuration validation errors
    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, MapEventsError>;
