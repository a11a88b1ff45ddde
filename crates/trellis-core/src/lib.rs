//! Core systems for Trellis.
//!
//! This crate provides the application-facing half of the Trellis UI markup:
//!
//! - **Signal/Slot System**: Ordered, re-entrancy-safe change notification
//! - **Property System**: Thread-safe values with change detection
//! - **Item Model**: Named string, bool, enum and command items in groups
//! - **Items Loader**: Compiles `Items` SML documents into an item store
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use trellis_core::Items;
//!
//! let items = Arc::new(Items::parse(
//!     "Items\n\
//!        Mode Enum \"View mode\"\n\
//!        *    List \"As list\"\n\
//!        *    Grid \"As grid\"\n\
//!      End",
//! )?);
//!
//! let mode = items.get_enum("Mode")?;
//! mode.on_changed(|index| println!("mode changed to {index}"));
//! mode.set_value(1);
//! assert_eq!(mode.selected_option().map(|o| o.name()), Some("Mode:Grid"));
//! # Ok::<(), trellis_core::ItemsError>(())
//! ```

mod error;
pub mod items;
pub mod logging;
pub mod property;
pub mod signal;

pub use error::{ItemsError, Result};
pub use items::{
    BoolItem, CommandItem, EnumItem, Item, ItemGroup, ItemInfo, ItemType, Items, ItemsLoader,
    ItemsNode, LoaderOptions, PlainItem, StringItem,
};
pub use property::Property;
pub use signal::{ConnectionId, Signal};

static_assertions::assert_impl_all!(Items: Send, Sync);
static_assertions::assert_impl_all!(Signal<String>: Send, Sync);
