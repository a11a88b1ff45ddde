//! Compiles `Items` documents into an [`Items`] store.
//!
//! Each attribute of the `Items` element declares one item: the attribute
//! name is the identifier, the first value a type tag and the optional second
//! value a title:
//!
//! ```text
//! Items
//!     Save     Command "Save file"
//!     UserName String  "User name"
//!     Mode     Enum    "View mode"
//!     *        List    "As list"
//!     *        Grid    "As grid"
//! End
//! ```
//!
//! An attribute named `*` adds an option to the enum declared directly above
//! it; its qualified name is `<enum><separator><id>` (`Mode:List`). Nested
//! elements load as nested groups.

use trellis_sml::{DocumentError, SmlAttribute, SmlElement, SmlNode};

use super::{Item, ItemGroup, ItemType, Items, ItemsNode, LoaderOptions, PlainItem};
use crate::logging::targets;
use crate::{ItemsError, Result};

/// Name of the root element of an items document.
pub const ROOT_NAME: &str = "Items";

/// Attribute name that declares an enum option.
pub const ENUM_OPTION: &str = "*";

/// Loads item declarations from an SML element tree.
#[derive(Debug, Clone, Default)]
pub struct ItemsLoader {
    options: LoaderOptions,
}

impl ItemsLoader {
    /// Create a loader with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a loader with the given options.
    pub fn with_options(options: LoaderOptions) -> Result<Self> {
        options.validate()?;
        Ok(Self { options })
    }

    /// The loader's options.
    pub fn options(&self) -> &LoaderOptions {
        &self.options
    }

    /// Load an `Items` element.
    ///
    /// Fails if the element is not named `Items` or any declaration is
    /// invalid. Nothing is returned on failure.
    #[tracing::instrument(skip_all, target = "trellis_core::loader", level = "debug")]
    pub fn load(&self, root: &SmlElement) -> Result<Items> {
        root.assure_name(ROOT_NAME)?;
        let mut items = Items::new();
        self.load_element(root, items.root_mut())?;
        tracing::debug!(target: targets::LOADER, nodes = items.root().len(), "loaded items");
        Ok(items)
    }

    fn load_element(&self, element: &SmlElement, group: &mut ItemGroup) -> Result<()> {
        let mut enum_open = false;

        for node in element.nodes() {
            let attribute = match node {
                SmlNode::Attribute(attribute) => attribute,
                SmlNode::Element(child) => {
                    enum_open = false;
                    self.load_group(element, child, group)?;
                    continue;
                }
            };

            if attribute.has_name(ENUM_OPTION) {
                if !enum_open {
                    return Err(orphan_option(attribute));
                }
                self.add_enum_option(attribute, group)?;
                continue;
            }

            enum_open = false;
            let item_type = declare_item(attribute, group)?;
            enum_open = item_type == ItemType::Enum;
        }

        Ok(())
    }

    fn load_group(
        &self,
        parent: &SmlElement,
        child: &SmlElement,
        group: &mut ItemGroup,
    ) -> Result<()> {
        if !self.options.nested_groups {
            return Err(DocumentError::UnexpectedElement {
                element: parent.name().to_string(),
                child: child.name().to_string(),
            }
            .into());
        }
        tracing::trace!(target: targets::LOADER, group = child.name(), "loading nested group");
        let nested = group.add_group(child.name())?;
        self.load_element(child, nested)
    }

    fn add_enum_option(&self, attribute: &SmlAttribute, group: &mut ItemGroup) -> Result<()> {
        attribute.assure_value_count_min_max(1, 2)?;
        let Some(ItemsNode::Item(Item::Enum(enum_item))) = group.last_mut() else {
            return Err(orphan_option(attribute));
        };

        let id = attribute.get_string(0)?;
        let name = format!("{}{}{}", enum_item.name(), self.options.sub_item_separator, id);
        let mut option = PlainItem::new(name);
        if attribute.value_count() > 1 {
            option.set_title(attribute.get_nullable_string(1)?.map(str::to_string));
        }
        tracing::trace!(target: targets::LOADER, option = option.name(), "adding enum option");
        enum_item.add_option(option);
        Ok(())
    }
}

fn declare_item(attribute: &SmlAttribute, group: &mut ItemGroup) -> Result<ItemType> {
    attribute.assure_value_count_min_max(1, 2)?;
    let tag = attribute.get_string(0)?;
    let item_type = ItemType::from_tag(tag).ok_or_else(|| ItemsError::UnsupportedType {
        name: attribute.name().to_string(),
        tag: tag.to_string(),
    })?;

    let mut item = item_type.create(attribute.name());
    if attribute.value_count() > 1 {
        item.set_title(attribute.get_nullable_string(1)?.map(str::to_string));
    }
    tracing::trace!(target: targets::LOADER, item = attribute.name(), %item_type, "declaring item");
    group.add_item(item)?;
    Ok(item_type)
}

fn orphan_option(attribute: &SmlAttribute) -> ItemsError {
    ItemsError::OrphanEnumOption {
        option: attribute
            .get_nullable_string(0)
            .ok()
            .flatten()
            .unwrap_or_default()
            .to_string(),
    }
}
