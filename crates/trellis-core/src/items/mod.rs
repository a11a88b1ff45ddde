//! The item model: named, observable values and commands.
//!
//! An [`Items`] store is a tree of [`ItemGroup`]s whose leaves are typed
//! items. Items are addressed by dotted paths of case-insensitive segments,
//! e.g. `"File.Open"`. Values live behind interior mutability, so a loaded
//! store can be shared (`Arc<Items>`) between the UI and application code
//! while both read, write and observe values.
//!
//! ```
//! use trellis_core::Items;
//!
//! let items = Items::parse(
//!     "Items\n  UserName String \"User name\"\n  Save Command\nEnd",
//! ).unwrap();
//!
//! let name = items.get_string("username").unwrap();
//! name.on_changed(|value| println!("name is now {value}"));
//! name.set_value("Ada");
//!
//! items.bind_command("Save", || println!("saving")).unwrap();
//! items.get_command("Save").unwrap().execute().unwrap();
//! ```

mod group;
mod loader;
mod node;
mod options;

use std::path::Path;

use trellis_sml::{SmlDocument, SmlElement};

pub use group::{validate_name, ItemGroup};
pub use loader::{ItemsLoader, ENUM_OPTION, ROOT_NAME};
pub use node::{
    BoolItem, CommandItem, EnumItem, Item, ItemInfo, ItemType, ItemsNode, PlainItem, StringItem,
};
pub use options::LoaderOptions;

use crate::logging::targets;
use crate::{ItemsError, Result};

/// Separator between path segments.
pub const PATH_SEPARATOR: char = '.';

/// A loaded tree of items rooted at a group named `Items`.
#[derive(Debug)]
pub struct Items {
    root: ItemGroup,
}

impl Default for Items {
    fn default() -> Self {
        Self::new()
    }
}

impl Items {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            root: ItemGroup::new(ROOT_NAME),
        }
    }

    /// Parse and load an items document with default options.
    pub fn parse(text: &str) -> Result<Self> {
        let document = SmlDocument::parse(text)?;
        Self::load(document.root())
    }

    /// Load an already parsed `Items` element with default options.
    pub fn load(element: &SmlElement) -> Result<Self> {
        ItemsLoader::new().load(element)
    }

    /// Read, parse and load an items file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        tracing::debug!(target: targets::LOADER, path = %path.display(), "reading items file");
        let text = std::fs::read_to_string(path).map_err(|e| ItemsError::io(path, e))?;
        Self::parse(&text)
    }

    /// The root group.
    pub fn root(&self) -> &ItemGroup {
        &self.root
    }

    /// The root group, for building stores in code.
    pub fn root_mut(&mut self) -> &mut ItemGroup {
        &mut self.root
    }

    /// Resolve a dotted path to a node.
    ///
    /// Returns `None` for empty paths and paths with empty segments, or when
    /// a segment other than the last names an item.
    pub fn find(&self, path: &str) -> Option<&ItemsNode> {
        let mut segments = path.split(PATH_SEPARATOR);
        let mut node = self.root.get(segments.next()?)?;
        for segment in segments {
            node = node.as_group()?.get(segment)?;
        }
        Some(node)
    }

    /// Resolve a path to an item of any type.
    pub fn get_item(&self, path: &str) -> Result<&Item> {
        match self.find(path) {
            Some(ItemsNode::Item(item)) => Ok(item),
            Some(node) => Err(ItemsError::wrong_kind("item", node.kind_name(), path)),
            None => Err(ItemsError::missing("item", path)),
        }
    }

    /// Resolve a path to a group.
    pub fn get_group(&self, path: &str) -> Result<&ItemGroup> {
        match self.find(path) {
            Some(ItemsNode::Group(group)) => Ok(group),
            Some(node) => Err(ItemsError::wrong_kind("group", node.kind_name(), path)),
            None => Err(ItemsError::missing("group", path)),
        }
    }

    /// Resolve a path to a string item.
    pub fn get_string(&self, path: &str) -> Result<&StringItem> {
        match self.typed(path, ItemType::String)? {
            Item::String(item) => Ok(item),
            _ => Err(ItemsError::missing("string", path)),
        }
    }

    /// Resolve a path to a bool item.
    pub fn get_bool(&self, path: &str) -> Result<&BoolItem> {
        match self.typed(path, ItemType::Bool)? {
            Item::Bool(item) => Ok(item),
            _ => Err(ItemsError::missing("bool", path)),
        }
    }

    /// Resolve a path to an enum item.
    pub fn get_enum(&self, path: &str) -> Result<&EnumItem> {
        match self.typed(path, ItemType::Enum)? {
            Item::Enum(item) => Ok(item),
            _ => Err(ItemsError::missing("enum", path)),
        }
    }

    /// Resolve a path to a command item.
    pub fn get_command(&self, path: &str) -> Result<&CommandItem> {
        match self.typed(path, ItemType::Command)? {
            Item::Command(item) => Ok(item),
            _ => Err(ItemsError::missing("command", path)),
        }
    }

    /// Bind an action to the command at `path`, replacing any previous one.
    pub fn bind_command<F>(&self, path: &str, action: F) -> Result<()>
    where
        F: Fn() + Send + Sync + 'static,
    {
        let command = self.get_command(path)?;
        tracing::debug!(target: targets::ITEMS, command = command.name(), "binding command");
        command.bind(action);
        Ok(())
    }

    fn typed(&self, path: &str, expected: ItemType) -> Result<&Item> {
        let kind = expected.kind_name();
        match self.find(path) {
            Some(ItemsNode::Item(item)) if item.item_type() == expected => Ok(item),
            Some(node) => Err(ItemsError::wrong_kind(kind, node.kind_name(), path)),
            None => Err(ItemsError::missing(kind, path)),
        }
    }
}
