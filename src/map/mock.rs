use std::cell::{Cell, RefCell};
use std::rc::Rc;

use super::{MapEventHandler, MapEventSource, MapEventType, MapMouseEvent};

/// In-memory map for testing and development
///
/// Records listeners like a native map would, counts every `on`/`off` call
/// and lets callers dispatch synthetic mouse events.
pub struct MockMap {
    listeners: RefCell<Vec<(MapEventType, MapEventHandler)>>,
    on_calls: Cell<usize>,
    off_calls: Cell<usize>,
    destroyed: Cell<bool>,
}

impl MockMap {
    /// Create a live map with no listeners
    pub fn new() -> Self {
        Self {
            listeners: RefCell::new(Vec::new()),
            on_calls: Cell::new(0),
            off_calls: Cell::new(0),
            destroyed: Cell::new(false),
        }
    }

    /// Dispatch an event to every listener registered for its type
    ///
    /// Returns the number of listeners invoked. Listeners added or removed
    /// during dispatch take effect for the next event.
    pub fn fire(&self, event: &MapMouseEvent) -> usize {
        let targets: Vec<MapEventHandler> = self
            .listeners
            .borrow()
            .iter()
            .filter(|(event_type, _)| *event_type == event.event_type)
            .map(|(_, handler)| Rc::clone(handler))
            .collect();

        tracing::trace!(
            "Mock map dispatching {} to {} listeners",
            event.event_type,
            targets.len()
        );

        for handler in &targets {
            handler(event);
        }
        targets.len()
    }

    /// Dispatch a click at the given position
    pub fn click(&self, lng: f64, lat: f64) -> usize {
        self.fire(&MapMouseEvent::click(lng, lat))
    }

    /// Number of listeners currently registered for an event type
    pub fn listener_count(&self, event_type: MapEventType) -> usize {
        self.listeners
            .borrow()
            .iter()
            .filter(|(registered, _)| *registered == event_type)
            .count()
    }

    /// How many times `on` has been called
    pub fn on_calls(&self) -> usize {
        self.on_calls.get()
    }

    /// How many times `off` has been called
    pub fn off_calls(&self) -> usize {
        self.off_calls.get()
    }

    /// Tear the map down, dropping every listener
    pub fn destroy(&self) {
        tracing::debug!("Mock map destroyed");
        self.destroyed.set(true);
        self.listeners.borrow_mut().clear();
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed.get()
    }
}

impl Default for MockMap {
    fn default() -> Self {
        Self::new()
    }
}

impl MapEventSource for MockMap {
    fn on(&self, event_type: MapEventType, handler: MapEventHandler) {
        self.on_calls.set(self.on_calls.get() + 1);
        if self.destroyed.get() {
            return;
        }
        self.listeners.borrow_mut().push((event_type, handler));
    }

    fn off(&self, event_type: MapEventType, handler: &MapEventHandler) {
        self.off_calls.set(self.off_calls.get() + 1);
        let mut listeners = self.listeners.borrow_mut();
        if let Some(index) = listeners
            .iter()
            .position(|(registered, h)| *registered == event_type && Rc::ptr_eq(h, handler))
        {
            listeners.remove(index);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counting_handler(counter: &Rc<Cell<usize>>) -> MapEventHandler {
        let counter = Rc::clone(counter);
        Rc::new(move |_event: &MapMouseEvent| counter.set(counter.get() + 1))
    }

    #[test]
    fn test_fire_reaches_matching_listeners_only() {
        let map = MockMap::new();
        let clicks = Rc::new(Cell::new(0));
        let moves = Rc::new(Cell::new(0));

        map.on(MapEventType::Click, counting_handler(&clicks));
        map.on(MapEventType::MouseMove, counting_handler(&moves));

        assert_eq!(map.click(1.0, 2.0), 1);
        assert_eq!(clicks.get(), 1);
        assert_eq!(moves.get(), 0);
        assert_eq!(map.listener_count(MapEventType::Click), 1);
        assert_eq!(map.listener_count(MapEventType::DblClick), 0);
    }

    #[test]
    fn test_off_removes_by_identity() {
        let map = MockMap::new();
        let counter = Rc::new(Cell::new(0));
        let first = counting_handler(&counter);
        let second = counting_handler(&counter);

        map.on(MapEventType::Click, Rc::clone(&first));
        map.on(MapEventType::Click, Rc::clone(&second));
        map.off(MapEventType::Click, &first);

        assert_eq!(map.listener_count(MapEventType::Click), 1);
        map.click(0.0, 0.0);
        assert_eq!(counter.get(), 1);

        // Wrong event type leaves the registration alone
        map.off(MapEventType::DblClick, &second);
        assert_eq!(map.listener_count(MapEventType::Click), 1);

        assert_eq!(map.on_calls(), 2);
        assert_eq!(map.off_calls(), 2);
    }

    #[test]
    fn test_off_unknown_handler_is_harmless() {
        let map = MockMap::new();
        let counter = Rc::new(Cell::new(0));
        map.off(MapEventType::Click, &counting_handler(&counter));
        assert_eq!(map.off_calls(), 1);
        assert_eq!(map.listener_count(MapEventType::Click), 0);
    }

    #[test]
    fn test_destroyed_map_ignores_registrations() {
        let map = MockMap::new();
        let counter = Rc::new(Cell::new(0));
        let handler = counting_handler(&counter);
        map.on(MapEventType::Click, Rc::clone(&handler));

        map.destroy();
        assert!(map.is_destroyed());
        assert_eq!(map.listener_count(MapEventType::Click), 0);

        map.off(MapEventType::Click, &handler);
        map.on(MapEventType::Click, handler);
        assert_eq!(map.click(0.0, 0.0), 0);
        assert_eq!(counter.get(), 0);
    }

    #[test]
    fn test_listener_may_subscribe_during_dispatch() {
        let map = Rc::new(MockMap::new());
        let counter = Rc::new(Cell::new(0));

        let inner = counting_handler(&counter);
        let map_for_handler = Rc::clone(&map);
        map.on(
            MapEventType::Click,
            Rc::new(move |_event: &MapMouseEvent| {
                map_for_handler.on(MapEventType::Click, Rc::clone(&inner));
            }),
        );

        assert_eq!(map.click(0.0, 0.0), 1);
        assert_eq!(counter.get(), 0);
        assert_eq!(map.listener_count(MapEventType::Click), 2);
    }
}
