//! Signal/slot system for Trellis.
//!
//! Items announce value changes through a [`Signal`]. Slots (callbacks) are
//! connected with [`Signal::connect`] and invoked synchronously, in the order
//! they were connected, on the thread that calls [`Signal::emit`].
//!
//! # Key Types
//!
//! - [`Signal<Args>`] - The signal type for emitting notifications
//! - [`ConnectionId`] - Stable handle returned when connecting a slot
//!
//! # Re-entrancy
//!
//! The connection list is snapshotted before slots run, so a slot may connect,
//! disconnect or emit on the same signal without deadlocking. A slot that
//! mutates the item it observes re-enters that item's equality check and may
//! recurse; this is not guarded against.
//!
//! # Example
//!
//! ```
//! use trellis_core::Signal;
//!
//! let selection = Signal::<usize>::new();
//! let observer = selection.connect(|index| println!("option {index} selected"));
//!
//! selection.emit(2);
//! assert!(selection.disconnect(observer));
//! ```

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use slotmap::{new_key_type, SlotMap};

use crate::logging::targets;

new_key_type! {
    /// Handle to one observer connection, passed to [`Signal::disconnect`].
    ///
    /// Identity is by handle, never by comparing closures.
    pub struct ConnectionId;
}

type Slot<Args> = Arc<dyn Fn(&Args) + Send + Sync>;

/// Connected slots plus their registration order.
///
/// Slot map keys are reused after removal, so iteration order of the map
/// itself says nothing about when a slot was connected.
struct Connections<Args> {
    slots: SlotMap<ConnectionId, Slot<Args>>,
    order: Vec<ConnectionId>,
}

/// An ordered list of observers notified with a value of type `Args`.
pub struct Signal<Args> {
    connections: Mutex<Connections<Args>>,
}

impl<Args: 'static> Default for Signal<Args> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Args: 'static> Signal<Args> {
    /// Create a signal with no observers.
    pub fn new() -> Self {
        Self {
            connections: Mutex::new(Connections {
                slots: SlotMap::with_key(),
                order: Vec::new(),
            }),
        }
    }

    /// Append an observer. It runs after every observer connected before it.
    pub fn connect<F>(&self, slot: F) -> ConnectionId
    where
        F: Fn(&Args) + Send + Sync + 'static,
    {
        let mut connections = self.connections.lock();
        let id = connections.slots.insert(Arc::new(slot));
        connections.order.push(id);
        id
    }

    /// Remove one observer. Returns `false` for unknown or stale handles.
    pub fn disconnect(&self, id: ConnectionId) -> bool {
        let mut connections = self.connections.lock();
        if connections.slots.remove(id).is_none() {
            return false;
        }
        connections.order.retain(|existing| *existing != id);
        true
    }

    /// Remove every observer.
    pub fn disconnect_all(&self) {
        let mut connections = self.connections.lock();
        connections.slots.clear();
        connections.order.clear();
    }

    /// Number of connected observers.
    pub fn connection_count(&self) -> usize {
        self.connections.lock().slots.len()
    }

    /// Notify every observer in registration order.
    pub fn emit(&self, args: Args) {
        let slots: Vec<Slot<Args>> = {
            let connections = self.connections.lock();
            connections
                .order
                .iter()
                .filter_map(|id| connections.slots.get(*id).cloned())
                .collect()
        };
        tracing::trace!(target: targets::SIGNAL, connection_count = slots.len(), "emitting signal");

        for slot in slots {
            slot(&args);
        }
    }
}

impl<Args> fmt::Debug for Signal<Args> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signal")
            .field("connections", &self.connections.lock().slots.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, Ordering};

    use super::*;

    fn recorder() -> (Arc<Mutex<Vec<String>>>, impl Fn(&'static str) -> Slot<String>) {
        let log = Arc::new(Mutex::new(Vec::new()));
        let log_clone = log.clone();
        let make = move |tag: &'static str| -> Slot<String> {
            let log = log_clone.clone();
            Arc::new(move |value: &String| log.lock().push(format!("{tag}={value}")))
        };
        (log, make)
    }

    #[test]
    fn test_observers_run_in_connection_order() {
        let changed = Signal::<String>::new();
        let (log, make) = recorder();
        for tag in ["label", "text_box", "title_bar"] {
            let slot = make(tag);
            changed.connect(move |value| slot(value));
        }

        changed.emit("Ada".to_string());
        assert_eq!(*log.lock(), ["label=Ada", "text_box=Ada", "title_bar=Ada"]);
    }

    #[test]
    fn test_disconnected_observer_stops_receiving() {
        let changed = Signal::<String>::new();
        let (log, make) = recorder();
        let slot = make("label");
        let id = changed.connect(move |value| slot(value));

        changed.emit("first".to_string());
        assert!(changed.disconnect(id));
        assert!(!changed.disconnect(id));
        changed.emit("second".to_string());

        assert_eq!(*log.lock(), ["label=first"]);
    }

    #[test]
    fn test_registration_order_survives_slot_reuse() {
        let changed = Signal::<String>::new();
        let (log, make) = recorder();

        let ids: Vec<_> = ["a", "b", "c"]
            .into_iter()
            .map(|tag| {
                let slot = make(tag);
                changed.connect(move |value| slot(value))
            })
            .collect();

        // The freed key is reused by the next connection, which still runs last.
        changed.disconnect(ids[0]);
        let slot = make("d");
        changed.connect(move |value| slot(value));

        changed.emit("x".to_string());
        assert_eq!(*log.lock(), ["b=x", "c=x", "d=x"]);
    }

    #[test]
    fn test_disconnect_all_clears_observers() {
        let toggled = Signal::<bool>::new();
        let ids: Vec<_> = (0..3).map(|_| toggled.connect(|_| {})).collect();
        assert_eq!(toggled.connection_count(), 3);

        toggled.disconnect_all();
        assert_eq!(toggled.connection_count(), 0);
        assert!(ids.into_iter().all(|id| !toggled.disconnect(id)));
    }

    #[test]
    fn test_observer_may_disconnect_itself() {
        let toggled = Arc::new(Signal::<bool>::new());
        let hits = Arc::new(AtomicBool::new(false));
        let own_id = Arc::new(Mutex::new(None));

        let toggled_clone = toggled.clone();
        let hits_clone = hits.clone();
        let own_id_clone = own_id.clone();
        let id = toggled.connect(move |value| {
            hits_clone.store(*value, Ordering::SeqCst);
            if let Some(id) = own_id_clone.lock().take() {
                toggled_clone.disconnect(id);
            }
        });
        *own_id.lock() = Some(id);

        toggled.emit(true);
        toggled.emit(false);

        assert!(hits.load(Ordering::SeqCst));
        assert_eq!(toggled.connection_count(), 0);
    }

    #[test]
    fn test_observer_may_connect_during_emit() {
        let changed = Arc::new(Signal::<()>::new());
        let changed_clone = changed.clone();
        changed.connect(move |_| {
            changed_clone.connect(|_| {});
        });

        changed.emit(());
        assert_eq!(changed.connection_count(), 2);
    }
}
