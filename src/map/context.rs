use std::cell::{Cell, RefCell};
use std::rc::Rc;

use super::{MapContext, MapEventSource};

/// A `MapContext` the map owner keeps and updates as its map initializes
///
/// Clones share state, so the owner can hand a clone to child code and keep
/// updating the original.
pub struct SharedMapContext<M: ?Sized> {
    map: Rc<RefCell<Option<Rc<M>>>>,
    loaded: Rc<Cell<bool>>,
}

impl<M: ?Sized> SharedMapContext<M> {
    /// Create a context with no map that is not loaded
    pub fn new() -> Self {
        Self {
            map: Rc::new(RefCell::new(None)),
            loaded: Rc::new(Cell::new(false)),
        }
    }

    /// Create a context for an existing map
    pub fn with_map(map: Rc<M>) -> Self {
        let context = Self::new();
        context.set_map(map);
        context
    }

    /// Publish the map instance
    pub fn set_map(&self, map: Rc<M>) {
        tracing::debug!("Map published to context");
        *self.map.borrow_mut() = Some(map);
    }

    /// Withdraw the map instance, e.g. when the owner tears it down
    pub fn clear_map(&self) {
        tracing::debug!("Map withdrawn from context");
        self.map.borrow_mut().take();
        self.loaded.set(false);
    }

    /// Record whether the map has finished loading
    pub fn set_loaded(&self, loaded: bool) {
        self.loaded.set(loaded);
    }
}

impl<M: ?Sized> Clone for SharedMapContext<M> {
    fn clone(&self) -> Self {
        Self {
            map: Rc::clone(&self.map),
            loaded: Rc::clone(&self.loaded),
        }
    }
}

impl<M: ?Sized> Default for SharedMapContext<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: MapEventSource + ?Sized> MapContext for SharedMapContext<M> {
    type Map = M;

    fn get_map(&self) -> Option<Rc<M>> {
        self.map.borrow().clone()
    }

    fn is_loaded(&self) -> bool {
        self.loaded.get()
    }
}
