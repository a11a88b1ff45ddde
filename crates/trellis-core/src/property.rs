//! Property system for Trellis.
//!
//! A [`Property`] wraps a value and reports whether an assignment actually
//! changed it. Observable items pair a property with a [`crate::Signal`] and
//! only emit when `set()` returns `true`, which keeps repeated assignments of
//! the same value from notifying observers.
//!
//! # Example
//!
//! ```
//! use trellis_core::{Property, Signal};
//!
//! struct Zoom {
//!     level: Property<u32>,
//!     level_changed: Signal<u32>,
//! }
//!
//! impl Zoom {
//!     fn zoom_to(&self, level: u32) {
//!         if self.level.set(level) {
//!             self.level_changed.emit(level);
//!         }
//!     }
//! }
//!
//! let zoom = Zoom { level: Property::new(100), level_changed: Signal::new() };
//! zoom.zoom_to(150);
//! assert_eq!(zoom.level.get(), 150);
//! ```

use std::fmt;

use parking_lot::RwLock;

/// A value that reports whether assignments change it.
///
/// Reads and writes go through a `parking_lot::RwLock`; callers notify
/// observers after the write lock is released.
pub struct Property<T> {
    value: RwLock<T>,
}

impl<T: Clone> Property<T> {
    /// Wrap an initial value.
    pub fn new(value: T) -> Self {
        Self {
            value: RwLock::new(value),
        }
    }

    /// A clone of the current value. See [`with`](Self::with) to borrow instead.
    pub fn get(&self) -> T {
        self.value.read().clone()
    }

    /// Access the value through a closure without cloning.
    pub fn with<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&T) -> R,
    {
        f(&self.value.read())
    }
}

impl<T: Clone + PartialEq> Property<T> {
    /// Assign `value`. Returns `false`, leaving the old value in place, when equal.
    pub fn set(&self, value: T) -> bool {
        let mut current = self.value.write();
        if *current == value {
            return false;
        }
        *current = value;
        true
    }
}

impl<T: Clone + Default> Default for Property<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: Clone + fmt::Debug> fmt::Debug for Property<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.with(|value| f.debug_tuple("Property").field(value).finish())
    }
}
