//! Item variants and the node type shared with groups.

use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;

use super::ItemGroup;
use crate::logging::targets;
use crate::{ConnectionId, ItemsError, Property, Result, Signal};

/// Name, title and hint shared by every item variant.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemInfo {
    name: String,
    title: Option<String>,
    hint: Option<String>,
}

impl ItemInfo {
    fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            title: None,
            hint: None,
        }
    }
}

macro_rules! item_info_accessors {
    ($($ty:ty),* $(,)?) => {
        $(
            impl $ty {
                /// The item identifier.
                pub fn name(&self) -> &str {
                    &self.info.name
                }

                /// Display label, if any.
                pub fn title(&self) -> Option<&str> {
                    self.info.title.as_deref()
                }

                /// Set the display label.
                pub fn set_title(&mut self, title: Option<String>) {
                    self.info.title = title;
                }

                /// Description, if any.
                pub fn hint(&self) -> Option<&str> {
                    self.info.hint.as_deref()
                }

                /// Set the description.
                pub fn set_hint(&mut self, hint: Option<String>) {
                    self.info.hint = hint;
                }

                /// Builder-style: set the display label.
                pub fn with_title(mut self, title: impl Into<String>) -> Self {
                    self.info.title = Some(title.into());
                    self
                }
            }
        )*
    };
}

item_info_accessors!(PlainItem, StringItem, BoolItem, EnumItem, CommandItem);

/// An item without a value, used as an enum option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlainItem {
    info: ItemInfo,
}

impl PlainItem {
    /// Create a plain item.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            info: ItemInfo::new(name),
        }
    }
}

/// An observable string value.
#[derive(Debug)]
pub struct StringItem {
    info: ItemInfo,
    value: Property<String>,
    changed: Signal<String>,
}

impl StringItem {
    /// Create a string item holding the empty string.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            info: ItemInfo::new(name),
            value: Property::default(),
            changed: Signal::new(),
        }
    }

    /// The current value.
    pub fn value(&self) -> String {
        self.value.get()
    }

    /// Access the current value without cloning.
    pub fn with_value<R>(&self, f: impl FnOnce(&str) -> R) -> R {
        self.value.with(|v| f(v.as_str()))
    }

    /// Assign a value. Observers run only if it differs from the current one.
    ///
    /// Returns `true` if the value changed.
    pub fn set_value(&self, value: impl Into<String>) -> bool {
        let value = value.into();
        if !self.value.set(value.clone()) {
            return false;
        }
        tracing::trace!(target: targets::ITEMS, item = %self.info.name, "string item changed");
        self.changed.emit(value);
        true
    }

    /// Signal emitted with the new value after each change.
    pub fn changed(&self) -> &Signal<String> {
        &self.changed
    }

    /// Connect an observer to [`changed`](Self::changed).
    pub fn on_changed<F>(&self, observer: F) -> ConnectionId
    where
        F: Fn(&String) + Send + Sync + 'static,
    {
        self.changed.connect(observer)
    }
}

/// An observable boolean value.
#[derive(Debug)]
pub struct BoolItem {
    info: ItemInfo,
    value: Property<bool>,
    changed: Signal<bool>,
}

impl BoolItem {
    /// Create a bool item holding `false`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            info: ItemInfo::new(name),
            value: Property::default(),
            changed: Signal::new(),
        }
    }

    /// The current value.
    pub fn value(&self) -> bool {
        self.value.get()
    }

    /// Assign a value. Observers run only if it differs from the current one.
    pub fn set_value(&self, value: bool) -> bool {
        if !self.value.set(value) {
            return false;
        }
        tracing::trace!(target: targets::ITEMS, item = %self.info.name, value, "bool item changed");
        self.changed.emit(value);
        true
    }

    /// Flip the value, always notifying.
    pub fn toggle(&self) {
        let value = !self.value();
        self.set_value(value);
    }

    /// Signal emitted with the new value after each change.
    pub fn changed(&self) -> &Signal<bool> {
        &self.changed
    }

    /// Connect an observer to [`changed`](Self::changed).
    pub fn on_changed<F>(&self, observer: F) -> ConnectionId
    where
        F: Fn(&bool) + Send + Sync + 'static,
    {
        self.changed.connect(observer)
    }
}

/// An observable selection among an ordered list of options.
///
/// The selection is an index into [`options`](Self::options). It is not
/// range-checked, so an item may be selected before its options are added.
#[derive(Debug)]
pub struct EnumItem {
    info: ItemInfo,
    value: Property<usize>,
    options: Vec<PlainItem>,
    changed: Signal<usize>,
}

impl EnumItem {
    /// Create an enum item with no options and selection 0.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            info: ItemInfo::new(name),
            value: Property::default(),
            options: Vec::new(),
            changed: Signal::new(),
        }
    }

    /// The selected index.
    pub fn value(&self) -> usize {
        self.value.get()
    }

    /// Select an index. Observers run only if the selection changes.
    pub fn set_value(&self, index: usize) -> bool {
        if !self.value.set(index) {
            return false;
        }
        tracing::trace!(target: targets::ITEMS, item = %self.info.name, index, "enum item changed");
        self.changed.emit(index);
        true
    }

    /// Options in declaration order.
    pub fn options(&self) -> &[PlainItem] {
        &self.options
    }

    /// Append an option.
    pub fn add_option(&mut self, option: PlainItem) {
        self.options.push(option);
    }

    /// The option at the selected index, if it exists.
    pub fn selected_option(&self) -> Option<&PlainItem> {
        self.options.get(self.value())
    }

    /// Signal emitted with the new index after each change.
    pub fn changed(&self) -> &Signal<usize> {
        &self.changed
    }

    /// Connect an observer to [`changed`](Self::changed).
    pub fn on_changed<F>(&self, observer: F) -> ConnectionId
    where
        F: Fn(&usize) + Send + Sync + 'static,
    {
        self.changed.connect(observer)
    }
}

type Action = Arc<dyn Fn() + Send + Sync>;

/// A named command with an optional bound action.
pub struct CommandItem {
    info: ItemInfo,
    action: RwLock<Option<Action>>,
}

impl CommandItem {
    /// Create an unbound command.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            info: ItemInfo::new(name),
            action: RwLock::new(None),
        }
    }

    /// Attach an action, replacing any previous one.
    pub fn bind<F>(&self, action: F)
    where
        F: Fn() + Send + Sync + 'static,
    {
        *self.action.write() = Some(Arc::new(action));
    }

    /// Remove the bound action.
    pub fn unbind(&self) {
        *self.action.write() = None;
    }

    /// Whether an action is attached.
    pub fn is_bound(&self) -> bool {
        self.action.read().is_some()
    }

    /// Run the bound action.
    ///
    /// Fails with [`ItemsError::UnboundCommand`] if nothing is bound. The
    /// action runs without any lock held, so it may rebind this command.
    pub fn execute(&self) -> Result<()> {
        let action = self.action.read().clone();
        let Some(action) = action else {
            return Err(ItemsError::UnboundCommand {
                name: self.info.name.clone(),
            });
        };
        tracing::debug!(target: targets::ITEMS, command = %self.info.name, "executing command");
        action();
        Ok(())
    }
}

impl fmt::Debug for CommandItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandItem")
            .field("info", &self.info)
            .field("bound", &self.is_bound())
            .finish()
    }
}

/// The closed set of item type tags used in items documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemType {
    /// `Item`: a plain item.
    Item,
    /// `Command`: a command item.
    Command,
    /// `String`: a string item.
    String,
    /// `Bool`: a bool item.
    Bool,
    /// `Enum`: an enum item.
    Enum,
}

impl ItemType {
    /// All tags, in declaration order.
    pub const ALL: [ItemType; 5] = [
        ItemType::Item,
        ItemType::Command,
        ItemType::String,
        ItemType::Bool,
        ItemType::Enum,
    ];

    /// Resolve a document tag (case-sensitive).
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.tag() == tag)
    }

    /// The tag as written in documents.
    pub fn tag(self) -> &'static str {
        match self {
            ItemType::Item => "Item",
            ItemType::Command => "Command",
            ItemType::String => "String",
            ItemType::Bool => "Bool",
            ItemType::Enum => "Enum",
        }
    }

    /// The lowercase kind name used in error messages.
    pub fn kind_name(self) -> &'static str {
        match self {
            ItemType::Item => "item",
            ItemType::Command => "command",
            ItemType::String => "string",
            ItemType::Bool => "bool",
            ItemType::Enum => "enum",
        }
    }

    /// Create an empty item of this type.
    pub fn create(self, name: impl Into<String>) -> Item {
        match self {
            ItemType::Item => Item::Plain(PlainItem::new(name)),
            ItemType::Command => Item::Command(CommandItem::new(name)),
            ItemType::String => Item::String(StringItem::new(name)),
            ItemType::Bool => Item::Bool(BoolItem::new(name)),
            ItemType::Enum => Item::Enum(EnumItem::new(name)),
        }
    }
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// A leaf item of any variant.
#[derive(Debug)]
pub enum Item {
    /// A plain item.
    Plain(PlainItem),
    /// A string item.
    String(StringItem),
    /// A bool item.
    Bool(BoolItem),
    /// An enum item.
    Enum(EnumItem),
    /// A command item.
    Command(CommandItem),
}

impl Item {
    /// The item's type tag.
    pub fn item_type(&self) -> ItemType {
        match self {
            Item::Plain(_) => ItemType::Item,
            Item::String(_) => ItemType::String,
            Item::Bool(_) => ItemType::Bool,
            Item::Enum(_) => ItemType::Enum,
            Item::Command(_) => ItemType::Command,
        }
    }

    /// The item identifier.
    pub fn name(&self) -> &str {
        &self.info().name
    }

    /// Display label, if any.
    pub fn title(&self) -> Option<&str> {
        self.info().title.as_deref()
    }

    /// Description, if any.
    pub fn hint(&self) -> Option<&str> {
        self.info().hint.as_deref()
    }

    /// Set the display label.
    pub fn set_title(&mut self, title: Option<String>) {
        self.info_mut().title = title;
    }

    /// Set the description.
    pub fn set_hint(&mut self, hint: Option<String>) {
        self.info_mut().hint = hint;
    }

    fn info(&self) -> &ItemInfo {
        match self {
            Item::Plain(item) => &item.info,
            Item::String(item) => &item.info,
            Item::Bool(item) => &item.info,
            Item::Enum(item) => &item.info,
            Item::Command(item) => &item.info,
        }
    }

    fn info_mut(&mut self) -> &mut ItemInfo {
        match self {
            Item::Plain(item) => &mut item.info,
            Item::String(item) => &mut item.info,
            Item::Bool(item) => &mut item.info,
            Item::Enum(item) => &mut item.info,
            Item::Command(item) => &mut item.info,
        }
    }
}

impl From<PlainItem> for Item {
    fn from(item: PlainItem) -> Self {
        Item::Plain(item)
    }
}

impl From<StringItem> for Item {
    fn from(item: StringItem) -> Self {
        Item::String(item)
    }
}

impl From<BoolItem> for Item {
    fn from(item: BoolItem) -> Self {
        Item::Bool(item)
    }
}

impl From<EnumItem> for Item {
    fn from(item: EnumItem) -> Self {
        Item::Enum(item)
    }
}

impl From<CommandItem> for Item {
    fn from(item: CommandItem) -> Self {
        Item::Command(item)
    }
}

/// A child of an [`ItemGroup`]: a leaf item or a nested group.
#[derive(Debug)]
pub enum ItemsNode {
    /// A leaf item.
    Item(Item),
    /// A nested group.
    Group(ItemGroup),
}

impl ItemsNode {
    /// The node name.
    pub fn name(&self) -> &str {
        match self {
            ItemsNode::Item(item) => item.name(),
            ItemsNode::Group(group) => group.name(),
        }
    }

    /// The lowercase kind name used in error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            ItemsNode::Item(item) => item.item_type().kind_name(),
            ItemsNode::Group(_) => "group",
        }
    }

    /// Returns the item, if this node is one.
    pub fn as_item(&self) -> Option<&Item> {
        match self {
            ItemsNode::Item(item) => Some(item),
            ItemsNode::Group(_) => None,
        }
    }

    /// Returns the group, if this node is one.
    pub fn as_group(&self) -> Option<&ItemGroup> {
        match self {
            ItemsNode::Group(group) => Some(group),
            ItemsNode::Item(_) => None,
        }
    }
}

impl From<Item> for ItemsNode {
    fn from(item: Item) -> Self {
        ItemsNode::Item(item)
    }
}

impl From<ItemGroup> for ItemsNode {
    fn from(group: ItemGroup) -> Self {
        ItemsNode::Group(group)
    }
}
