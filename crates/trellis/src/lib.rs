//! Trellis: declarative UI markup.
//!
//! A Trellis application describes its state and its screens in two SML
//! documents:
//!
//! - An `Items` document declares named, observable items (strings, bools,
//!   enums) and commands. It loads into an [`Items`] store.
//! - A controls document describes a tree of layouts and widgets. The
//!   [`UiParser`] compiles it into an immutable [`Control`] tree whose
//!   widgets reference items by path.
//!
//! A [`RenderAdapter`] materializes control trees on a concrete platform.
//!
//! # Example
//!
//! ```
//! use trellis::{Control, Items, UiParser};
//!
//! let items = Items::parse(
//!     "Items\n\
//!        UserName String \"User name\"\n\
//!        Save     Command \"Save\"\n\
//!      End",
//! )?;
//!
//! let screen = UiParser::parse(
//!     "LinearLayout\n\
//!        Direction Vertical\n\
//!        Child\n\
//!          TextBox\n\
//!            Item UserName\n\
//!          End\n\
//!        End\n\
//!        Child\n\
//!          Button\n\
//!            Command Save\n\
//!          End\n\
//!        End\n\
//!      End",
//! )?;
//!
//! assert!(matches!(screen, Control::LinearLayout(_)));
//! assert_eq!(screen.item_paths(), ["UserName", "Save"]);
//! for path in screen.item_paths() {
//!     items.get_item(path)?;
//! }
//! # Ok::<(), trellis::Error>(())
//! ```

pub mod control;
mod error;
pub mod instance;
pub mod parser;

pub use control::{
    Button, CheckBox, Control, ControlKind, DropDownMenu, GridLayout, GridLayoutChild, GridSpan,
    Label, LinearLayout, LinearLayoutChild, MenuBar, MenuEntry, Orientation, Tab, TabControl,
    TextBox, Thickness,
};
pub use error::{ControlError, Error, Result};
pub use instance::{ChildSlot, ControlInstance, RenderAdapter, Window};
pub use parser::UiParser;

pub use trellis_core::{
    logging, BoolItem, CommandItem, ConnectionId, EnumItem, Item, ItemGroup, ItemType, Items,
    ItemsError, ItemsLoader, ItemsNode, LoaderOptions, PlainItem, Property, Signal, StringItem,
};
pub use trellis_sml::{DocumentError, SmlAttribute, SmlDocument, SmlElement, SmlNode};

static_assertions::assert_impl_all!(Control: Send, Sync, Clone);
static_assertions::assert_impl_all!(Error: Send, Sync);
