mod registry;

pub use registry::*;

use std::cell::RefCell;
use std::rc::Rc;

use crate::{
    LngLat, MapContext, MapEventHandler, MapEventSource, MapEventType, MapEventsConfig,
    MapEventsError, MapMouseEvent, Result,
};

/// Attach to the map published by `ctx`
///
/// Fails with [`MapEventsError::ContextMissing`] when there is no context.
/// The returned [`Disposer`] removes every listener added through the adapter.
pub fn use_map<C>(
    ctx: Option<&C>,
    config: MapEventsConfig,
) -> Result<(MapEvents<C::Map>, Disposer)>
where
    C: MapContext + ?Sized,
    C::Map: 'static,
{
    MapEvents::attach(ctx, config)
}

/// Click subscriptions on a shared map, torn down together
///
/// The map handle and loaded flag are snapshots taken at construction. If the
/// map did not exist yet, subscriptions are skipped rather than queued.
pub struct MapEvents<M: ?Sized> {
    map: Option<Rc<M>>,
    is_loaded: bool,
    registry: Rc<RefCell<CleanupRegistry>>,
    config: MapEventsConfig,
}

impl<M: MapEventSource + ?Sized + 'static> MapEvents<M> {
    /// Snapshot the map from `ctx` and create the adapter with its disposer
    pub fn attach<C>(ctx: Option<&C>, config: MapEventsConfig) -> Result<(Self, Disposer)>
    where
        C: MapContext<Map = M> + ?Sized,
    {
        let ctx = ctx.ok_or(MapEventsError::ContextMissing)?;

        let map = ctx.get_map();
        let is_loaded = ctx.is_loaded();

        tracing::debug!(
            label = %config.label,
            has_map = map.is_some(),
            is_loaded,
            "Attached map events"
        );

        let registry = Rc::new(RefCell::new(CleanupRegistry::default()));
        let disposer = Disposer::new(
            Rc::clone(&registry),
            config.label.clone(),
            config.dispose_on_drop,
        );

        Ok((
            Self {
                map,
                is_loaded,
                registry,
                config,
            },
            disposer,
        ))
    }

    /// The map handle, for direct use of the native API
    pub fn map(&self) -> Option<&Rc<M>> {
        self.map.as_ref()
    }

    /// Whether the map had finished loading when the adapter was created
    pub fn is_loaded(&self) -> bool {
        self.is_loaded
    }

    /// Call `callback(lng, lat, event)` on every map click until disposal
    ///
    /// Does nothing if the map was absent at construction.
    pub fn on_click<F>(&self, callback: F)
    where
        F: Fn(f64, f64, &MapMouseEvent) + 'static,
    {
        self.subscribe_click(callback);
    }

    /// Like [`MapEvents::on_click`], returning an id for [`MapEvents::unsubscribe`]
    ///
    /// Returns `None` when nothing was registered.
    pub fn subscribe_click<F>(&self, callback: F) -> Option<SubscriptionId>
    where
        F: Fn(f64, f64, &MapMouseEvent) + 'static,
    {
        let label = &self.config.label;

        if self.is_disposed() {
            tracing::warn!(label = %label, "Click subscription after disposal ignored");
            return None;
        }

        let Some(map) = &self.map else {
            if self.config.warn_on_skip {
                tracing::warn!(label = %label, "No map available, click subscription skipped");
            } else {
                tracing::debug!(label = %label, "No map available, click subscription skipped");
            }
            return None;
        };

        let handler: MapEventHandler = Rc::new(move |event: &MapMouseEvent| {
            let LngLat { lng, lat } = event.lng_lat;
            callback(lng, lat, event);
        });
        map.on(MapEventType::Click, Rc::clone(&handler));

        let map = Rc::clone(map);
        let id = self
            .registry
            .borrow_mut()
            .push(Box::new(move || map.off(MapEventType::Click, &handler)));

        tracing::debug!(label = %label, "Registered click listener {}", id);
        Some(id)
    }

    /// Remove a single listener before disposal
    ///
    /// Returns `false` if the id is unknown or already removed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let action = self.registry.borrow_mut().take(id);
        match action {
            Some(action) => {
                action();
                tracing::debug!(label = %self.config.label, "Removed click listener {}", id);
                true
            }
            None => false,
        }
    }

    /// Number of listeners that disposal would remove
    pub fn listener_count(&self) -> usize {
        self.registry.borrow().len()
    }

    pub fn is_disposed(&self) -> bool {
        self.registry.borrow().is_disposed()
    }

    pub fn config(&self) -> &MapEventsConfig {
        &self.config
    }
}
