mod context;
mod mock;

pub use context::*;
pub use mock::*;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::rc::Rc;

use crate::{LngLat, ScreenPoint};

/// Mouse event types understood by the native map API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MapEventType {
    Click,
    DblClick,
    ContextMenu,
    MouseMove,
}

impl MapEventType {
    /// The event name used by the native map library
    pub fn as_str(&self) -> &'static str {
        match self {
            MapEventType::Click => "click",
            MapEventType::DblClick => "dblclick",
            MapEventType::ContextMenu => "contextmenu",
            MapEventType::MouseMove => "mousemove",
        }
    }
}

impl fmt::Display for MapEventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A mouse event delivered by the native map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapMouseEvent {
    /// Which native event fired
    pub event_type: MapEventType,
    /// Geographic position under the pointer
    pub lng_lat: LngLat,
    /// Pointer position in pixels relative to the map container
    pub point: ScreenPoint,
    /// Raw platform event data, passed through untouched
    pub original_event: serde_json::Value,
}

impl MapMouseEvent {
    /// Create an event with no screen position or platform payload
    pub fn new(event_type: MapEventType, lng_lat: LngLat) -> Self {
        Self {
            event_type,
            lng_lat,
            point: ScreenPoint::default(),
            original_event: serde_json::Value::Null,
        }
    }

    /// Create a click event at the given position
    pub fn click(lng: f64, lat: f64) -> Self {
        Self::new(MapEventType::Click, LngLat::new(lng, lat))
    }

    /// Set the screen position
    pub fn with_point(mut self, point: ScreenPoint) -> Self {
        self.point = point;
        self
    }

    /// Attach the raw platform event
    pub fn with_original_event(mut self, original_event: serde_json::Value) -> Self {
        self.original_event = original_event;
        self
    }
}

/// A listener registered with the native map
///
/// Listeners are identified by pointer: `off` removes the registration made
/// with the same `Rc`.
pub type MapEventHandler = Rc<dyn Fn(&MapMouseEvent)>;

/// The native event API of an interactive map
///
/// Implementations must tolerate `off` for listeners that are no longer
/// registered, including after the map itself has been torn down.
pub trait MapEventSource {
    /// Register a listener for an event type
    fn on(&self, event_type: MapEventType, handler: MapEventHandler);

    /// Remove a listener previously passed to `on`
    fn off(&self, event_type: MapEventType, handler: &MapEventHandler);
}

/// Capability object handed out by whoever owns the map
pub trait MapContext {
    type Map: MapEventSource + ?Sized;

    /// The map instance, or `None` if it has not been created yet
    fn get_map(&self) -> Option<Rc<Self::Map>>;

    /// Whether the map has finished loading
    fn is_loaded(&self) -> bool;
}
