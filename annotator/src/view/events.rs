//! Registry of listeners for map pointer events.

use annotator_types::LayerId;

use super::engine::{EventKind, MapEvent};

/// Identifier returned by [`EventRegistry::attach`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Which events a listener receives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventScope {
    /// All events of the kind, wherever they happen.
    Map,
    /// Only events scoped to features of the layer.
    Layer(LayerId),
}

/// Reaction a listener stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListenerTarget {
    /// Show the pointer cursor.
    PointerCursor,
    /// Restore the default cursor.
    DefaultCursor,
    /// Show the grab cursor.
    GrabCursor,
    /// Open the popup for the clicked feature.
    Inspect,
    /// Pass the click to the draw session.
    Draw,
}

#[derive(Debug, Clone, Copy)]
struct Listener {
    id: ListenerId,
    scope: EventScope,
    kind: EventKind,
    target: ListenerTarget,
}

impl Listener {
    fn accepts(&self, event: &MapEvent) -> bool {
        if self.kind != event.kind() {
            return false;
        }

        match self.scope {
            EventScope::Map => true,
            EventScope::Layer(layer) => event.layer() == Some(layer),
        }
    }
}

/// Listeners subscribed to map events.
///
/// Listeners are plain values describing what should happen; the owner of the
/// registry performs the reaction.
#[derive(Debug, Default)]
pub struct EventRegistry {
    listeners: Vec<Listener>,
    next_id: u64,
}

impl EventRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribes a listener and returns its id.
    pub fn attach(
        &mut self,
        scope: EventScope,
        kind: EventKind,
        target: ListenerTarget,
    ) -> ListenerId {
        self.next_id += 1;
        let id = ListenerId(self.next_id);
        self.listeners.push(Listener {
            id,
            scope,
            kind,
            target,
        });

        log::trace!("Attached listener {id:?}: {target:?} on {kind:?} {scope:?}");
        id
    }

    /// Unsubscribes a listener. Returns false if it was not attached.
    pub fn detach(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|listener| listener.id != id);
        let removed = self.listeners.len() != before;
        if removed {
            log::trace!("Detached listener {id:?}");
        }
        removed
    }

    /// Targets of all listeners accepting the event, in subscription order.
    ///
    /// The result is a snapshot: listeners attached while the targets are being
    /// handled do not receive the same event.
    pub fn dispatch(&self, event: &MapEvent) -> Vec<ListenerTarget> {
        self.listeners
            .iter()
            .filter(|listener| listener.accepts(event))
            .map(|listener| listener.target)
            .collect()
    }

    /// Number of attached listeners with the given target.
    pub fn count(&self, target: ListenerTarget) -> usize {
        self.listeners
            .iter()
            .filter(|listener| listener.target == target)
            .count()
    }

    /// Total number of attached listeners.
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    /// Returns true if no listener is attached.
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::engine::{FeatureHit, HitGeometry};
    use annotator_types::LngLat;

    fn click_on(layer: Option<LayerId>) -> MapEvent {
        MapEvent::Click {
            lnglat: LngLat::new(1.0, 1.0),
            hit: layer.map(|layer| FeatureHit {
                layer,
                date_added: "d".into(),
                geometry: HitGeometry::Point(LngLat::new(1.0, 1.0)),
            }),
        }
    }

    #[test]
    fn layer_scope_filters_events() {
        let mut registry = EventRegistry::new();
        registry.attach(
            EventScope::Layer(LayerId::Points),
            EventKind::Click,
            ListenerTarget::Inspect,
        );

        assert_eq!(
            registry.dispatch(&click_on(Some(LayerId::Points))),
            vec![ListenerTarget::Inspect]
        );
        assert!(registry.dispatch(&click_on(Some(LayerId::Lines))).is_empty());
        assert!(registry.dispatch(&click_on(None)).is_empty());
    }

    #[test]
    fn map_scope_receives_every_click_in_order() {
        let mut registry = EventRegistry::new();
        registry.attach(
            EventScope::Layer(LayerId::Points),
            EventKind::Click,
            ListenerTarget::Inspect,
        );
        registry.attach(EventScope::Map, EventKind::Click, ListenerTarget::Draw);

        assert_eq!(
            registry.dispatch(&click_on(Some(LayerId::Points))),
            vec![ListenerTarget::Inspect, ListenerTarget::Draw]
        );
        assert_eq!(registry.dispatch(&click_on(None)), vec![ListenerTarget::Draw]);
    }

    #[test]
    fn detached_listener_is_not_called() {
        let mut registry = EventRegistry::new();
        let id = registry.attach(EventScope::Map, EventKind::DragStart, ListenerTarget::GrabCursor);

        assert!(registry.detach(id));
        assert!(!registry.detach(id));
        assert!(registry.dispatch(&MapEvent::DragStart).is_empty());
        assert!(registry.is_empty());
    }
}
