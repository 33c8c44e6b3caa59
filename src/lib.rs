//! Click subscriptions for interactive maps with guaranteed cleanup.
//!
//! The code that owns a map publishes it through a [`MapContext`]; UI code
//! attaches with [`use_map`], registers click callbacks that receive
//! longitude and latitude, and releases every listener through the returned
//! [`Disposer`]. The native map API is abstracted by [`MapEventSource`], with
//! [`MockMap`] as an in-memory implementation for tests.

pub mod adapter;
pub mod config;
pub mod coords;
pub mod error;
pub mod map;

pub use adapter::*;
pub use config::*;
pub use coords::*;
pub use error::*;
pub use map::*;
