//! Item groups: ordered, case-insensitively keyed containers.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

use super::{Item, ItemsNode};
use crate::{ItemsError, Result};

static NAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\w+$").expect("name pattern is a valid regex"));

/// Check that `name` is a valid item or group identifier.
///
/// Identifiers are runs of word characters; `.` is reserved as the path
/// separator and `:` for qualified enum option names.
pub fn validate_name(name: &str) -> Result<()> {
    if NAME_PATTERN.is_match(name) {
        Ok(())
    } else {
        Err(ItemsError::InvalidName {
            name: name.to_string(),
        })
    }
}

/// A named container of items and nested groups.
///
/// Children keep their insertion order. A lowercase-name index is updated in
/// the same [`add`](Self::add) call, so no two children ever share a
/// case-insensitive name.
#[derive(Debug)]
pub struct ItemGroup {
    name: String,
    children: Vec<ItemsNode>,
    lookup: HashMap<String, usize>,
}

impl ItemGroup {
    /// Create an empty group.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            children: Vec::new(),
            lookup: HashMap::new(),
        }
    }

    /// The group name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Add a child node and return a mutable reference to it.
    ///
    /// Fails with [`ItemsError::InvalidName`] for names that are not
    /// identifiers and [`ItemsError::DuplicateName`] if a child with the same
    /// case-insensitive name exists.
    pub fn add(&mut self, node: impl Into<ItemsNode>) -> Result<&mut ItemsNode> {
        let index = self.insert(node.into())?;
        Ok(&mut self.children[index])
    }

    /// Add a leaf item.
    pub fn add_item(&mut self, item: impl Into<Item>) -> Result<&mut Item> {
        let index = self.insert(ItemsNode::Item(item.into()))?;
        match &mut self.children[index] {
            ItemsNode::Item(item) => Ok(item),
            node => Err(ItemsError::wrong_kind("item", node.kind_name(), node.name())),
        }
    }

    /// Add an empty nested group.
    pub fn add_group(&mut self, name: impl Into<String>) -> Result<&mut ItemGroup> {
        let index = self.insert(ItemsNode::Group(ItemGroup::new(name)))?;
        match &mut self.children[index] {
            ItemsNode::Group(group) => Ok(group),
            node => Err(ItemsError::wrong_kind("group", node.kind_name(), node.name())),
        }
    }

    fn insert(&mut self, node: ItemsNode) -> Result<usize> {
        validate_name(node.name())?;

        let key = node.name().to_lowercase();
        if self.lookup.contains_key(&key) {
            return Err(ItemsError::DuplicateName {
                group: self.name.clone(),
                name: node.name().to_string(),
            });
        }

        let index = self.children.len();
        self.lookup.insert(key, index);
        self.children.push(node);
        Ok(index)
    }

    /// Look up a direct child by case-insensitive name.
    pub fn get(&self, name: &str) -> Option<&ItemsNode> {
        self.lookup
            .get(&name.to_lowercase())
            .map(|&index| &self.children[index])
    }

    /// Look up a direct child item.
    pub fn get_item(&self, name: &str) -> Option<&Item> {
        self.get(name).and_then(ItemsNode::as_item)
    }

    /// Look up a direct child group.
    pub fn get_group(&self, name: &str) -> Option<&ItemGroup> {
        self.get(name).and_then(ItemsNode::as_group)
    }

    /// Whether a direct child item with this name exists.
    pub fn has_item(&self, name: &str) -> bool {
        self.get_item(name).is_some()
    }

    /// Whether a direct child group with this name exists.
    pub fn has_group(&self, name: &str) -> bool {
        self.get_group(name).is_some()
    }

    /// The most recently added child.
    pub fn last_mut(&mut self) -> Option<&mut ItemsNode> {
        self.children.last_mut()
    }

    /// All children in insertion order.
    pub fn nodes(&self) -> &[ItemsNode] {
        &self.children
    }

    /// Child items in insertion order.
    pub fn items(&self) -> impl Iterator<Item = &Item> {
        self.children.iter().filter_map(ItemsNode::as_item)
    }

    /// Child groups in insertion order.
    pub fn groups(&self) -> impl Iterator<Item = &ItemGroup> {
        self.children.iter().filter_map(ItemsNode::as_group)
    }

    /// Number of direct children.
    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// Whether the group has no children.
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::{CommandItem, ItemType, StringItem};

    #[test]
    fn test_case_insensitive_duplicates() {
        let mut group = ItemGroup::new("Items");
        group.add_item(CommandItem::new("Foo")).unwrap();
        let err = group.add_item(StringItem::new("foo")).unwrap_err();
        assert!(matches!(err, ItemsError::DuplicateName { name, .. } if name == "foo"));
        assert_eq!(group.len(), 1);
    }

    #[test]
    fn test_groups_and_items_share_names_space() {
        let mut group = ItemGroup::new("Items");
        group.add_group("File").unwrap();
        assert!(group.add_item(ItemType::Bool.create("FILE")).is_err());
    }

    #[test]
    fn test_lookup_ignores_case() {
        let mut group = ItemGroup::new("Items");
        group.add_item(StringItem::new("UserName")).unwrap();
        group.add_group("Edit").unwrap();

        assert!(group.has_item("username"));
        assert!(!group.has_group("username"));
        assert!(group.has_group("EDIT"));
        assert!(group.get("missing").is_none());
    }

    #[test]
    fn test_insertion_order() {
        let mut group = ItemGroup::new("Items");
        for name in ["c", "a", "b"] {
            group.add_item(ItemType::Item.create(name)).unwrap();
        }
        group.add_group("g").unwrap();

        let names: Vec<_> = group.nodes().iter().map(ItemsNode::name).collect();
        assert_eq!(names, ["c", "a", "b", "g"]);
        assert_eq!(group.items().count(), 3);
        assert_eq!(group.groups().count(), 1);
    }

    #[test]
    fn test_add_returns_inserted_node() {
        let mut group = ItemGroup::new("Items");
        let item = group.add_item(StringItem::new("Name")).unwrap();
        item.set_title(Some("Full name".to_string()));
        group
            .add_group("Edit")
            .unwrap()
            .add_item(CommandItem::new("Undo"))
            .unwrap();

        assert_eq!(group.get_item("name").unwrap().title(), Some("Full name"));
        assert!(group.get_group("edit").unwrap().has_item("UNDO"));
        assert_eq!(group.add(ItemGroup::new("View")).unwrap().kind_name(), "group");
    }

    #[test]
    fn test_invalid_names() {
        assert!(validate_name("Save_As2").is_ok());
        assert!(validate_name("").is_err());
        assert!(validate_name("File.Open").is_err());
        assert!(validate_name("Mode:A").is_err());

        let mut group = ItemGroup::new("Items");
        assert!(matches!(
            group.add_item(StringItem::new("has space")),
            Err(ItemsError::InvalidName { .. })
        ));
    }
}
