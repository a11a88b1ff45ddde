//! Compiles SML control documents into [`Control`] trees.
//!
//! Every control routine asserts a closed schema before reading anything: an
//! attribute or child element outside the allowed set fails the whole parse.
//! There is no partial recovery.

use trellis_sml::{DocumentError, SmlAttribute, SmlDocument, SmlElement};

use crate::control::{
    Button, CheckBox, Control, ControlKind, DropDownMenu, GridLayout, GridLayoutChild, GridSpan,
    Label, LinearLayout, LinearLayoutChild, MenuBar, MenuEntry, Orientation, Tab, TabControl,
    TextBox, Thickness,
};
use crate::error::{ControlError, Result};
use trellis_core::logging::targets;

/// Child element holding a control's margin.
const MARGIN: &str = "Margin";

/// Child elements shared by every control that supports control properties.
const CONTROL_PROPERTY_ELEMENTS: [&str; 1] = [MARGIN];

/// Compiles control elements into descriptors.
#[derive(Debug, Clone, Copy, Default)]
pub struct UiParser;

impl UiParser {
    /// Create a parser.
    pub fn new() -> Self {
        Self
    }

    /// Parse SML text and compile its root element.
    pub fn parse(text: &str) -> Result<Control> {
        let document = SmlDocument::parse(text)?;
        Self::new().parse_control(document.root())
    }

    /// Compile one control element and its descendants.
    #[tracing::instrument(skip_all, target = "trellis::parser", level = "debug", fields(element = element.name()))]
    pub fn parse_control(&self, element: &SmlElement) -> Result<Control> {
        let kind = ControlKind::from_name(element.name()).ok_or_else(|| {
            ControlError::UnsupportedElement {
                name: element.name().to_string(),
            }
        })?;
        tracing::trace!(target: targets::PARSER, %kind, "parsing control");

        let control: Control = match kind {
            ControlKind::LinearLayout => self.parse_linear_layout(element)?.into(),
            ControlKind::GridLayout => self.parse_grid_layout(element)?.into(),
            ControlKind::TabControl => self.parse_tab_control(element)?.into(),
            ControlKind::MenuBar => parse_menu_bar(element)?.into(),
            ControlKind::Button => parse_button(element)?.into(),
            ControlKind::CheckBox => parse_check_box(element)?.into(),
            ControlKind::TextBox => parse_text_box(element)?.into(),
            ControlKind::Label => parse_label(element)?.into(),
            ControlKind::Nothing => parse_nothing(element)?,
        };
        Ok(control)
    }

    fn parse_linear_layout(&self, element: &SmlElement) -> Result<LinearLayout> {
        element.assure_attribute_names(&["Direction"])?;
        element.assure_element_names(&with_control_properties(&["Child"]))?;

        let orientation = match element.optional_attribute("Direction")? {
            Some(direction) => {
                let index = direction.as_enum(&Orientation::NAMES)?;
                Orientation::from_index(index).unwrap_or_default()
            }
            None => Orientation::default(),
        };

        let mut children = Vec::new();
        for child in element.elements_named("Child") {
            child.assure_attribute_names(&["Weight"])?;
            let control = self.parse_single_child(child)?;
            let weight = child
                .optional_attribute("Weight")?
                .map(SmlAttribute::as_float)
                .transpose()?;
            children.push(LinearLayoutChild { control, weight });
        }

        Ok(LinearLayout {
            orientation,
            children,
            margin: parse_margin(element)?,
        })
    }

    fn parse_grid_layout(&self, element: &SmlElement) -> Result<GridLayout> {
        element.assure_no_attributes()?;
        element.assure_element_names(&["Child"])?;

        let mut children = Vec::new();
        for child in element.elements_named("Child") {
            child.assure_attribute_names(&["Column", "Row"])?;
            let control = self.parse_single_child(child)?;
            let column = parse_grid_span(child.required_attribute("Column")?)?;
            let row = parse_grid_span(child.required_attribute("Row")?)?;
            children.push(GridLayoutChild {
                control,
                column,
                row,
            });
        }

        Ok(GridLayout { children })
    }

    fn parse_tab_control(&self, element: &SmlElement) -> Result<TabControl> {
        element.assure_no_attributes()?;
        element.assure_element_names(&["Tab"])?;

        let mut tabs = Vec::new();
        for tab in element.elements_named("Tab") {
            tab.assure_attribute_names(&["Title"])?;
            tab.assure_element_names(&["Content"])?;

            let content = match tab.optional_element("Content")? {
                Some(content) => {
                    content.assure_no_attributes()?;
                    Some(self.parse_single_child(content)?)
                }
                None => None,
            };
            let title = optional_string(tab, "Title")?;
            tabs.push(Tab { title, content });
        }

        Ok(TabControl { tabs })
    }

    /// Compile the only child element of a slot element.
    fn parse_single_child(&self, slot: &SmlElement) -> Result<Control> {
        slot.assure_element_count(1)?;
        match slot.elements().next() {
            Some(child) => self.parse_control(child),
            None => Err(DocumentError::ElementCount {
                element: slot.name().to_string(),
                expected: 1,
                found: 0,
            }
            .into()),
        }
    }
}

fn parse_menu_bar(element: &SmlElement) -> Result<MenuBar> {
    element.assure_no_attributes()?;
    element.assure_element_names(&["DropDownMenu"])?;

    let mut menus = Vec::new();
    for menu in element.elements_named("DropDownMenu") {
        menu.assure_attribute_names(&["Item", "Command", "CheckItem", "Enum"])?;
        menu.assure_no_elements()?;

        let title = optional_string(menu, "Item")?;
        let mut entries = Vec::new();
        for attribute in menu.attributes() {
            let entry = match attribute.name() {
                "Command" => MenuEntry::Command(attribute.as_string()?.to_string()),
                "CheckItem" => MenuEntry::Check(attribute.as_string()?.to_string()),
                "Enum" => MenuEntry::Enum(attribute.as_string()?.to_string()),
                _ => continue,
            };
            entries.push(entry);
        }
        menus.push(DropDownMenu { title, entries });
    }

    Ok(MenuBar { menus })
}

fn parse_button(element: &SmlElement) -> Result<Button> {
    element.assure_attribute_names(&["Command"])?;
    element.assure_element_names(&CONTROL_PROPERTY_ELEMENTS)?;

    Ok(Button {
        command: optional_string(element, "Command")?,
        margin: parse_margin(element)?,
    })
}

fn parse_check_box(element: &SmlElement) -> Result<CheckBox> {
    element.assure_no_attributes()?;
    element.assure_element_names(&CONTROL_PROPERTY_ELEMENTS)?;

    Ok(CheckBox {
        margin: parse_margin(element)?,
    })
}

fn parse_text_box(element: &SmlElement) -> Result<TextBox> {
    element.assure_attribute_names(&["MultiLine", "Item"])?;
    element.assure_no_elements()?;

    let multi_line = element
        .optional_attribute("MultiLine")?
        .map(SmlAttribute::as_bool)
        .transpose()?
        .unwrap_or(false);

    Ok(TextBox {
        multi_line,
        item: optional_string(element, "Item")?,
    })
}

fn parse_label(element: &SmlElement) -> Result<Label> {
    element.assure_no_elements()?;
    element.assure_attribute_names(&["Item"])?;

    Ok(Label {
        item: optional_string(element, "Item")?,
    })
}

fn parse_nothing(element: &SmlElement) -> Result<Control> {
    element.assure_no_attributes()?;
    element.assure_no_elements()?;
    Ok(Control::Nothing)
}

fn parse_margin(element: &SmlElement) -> Result<Option<Thickness>> {
    let Some(margin) = element.optional_element(MARGIN)? else {
        return Ok(None);
    };
    margin.assure_attribute_names(&["Left", "Top", "Right", "Bottom"])?;
    margin.assure_no_elements()?;

    let side = |name: &str| -> Result<f64> {
        Ok(margin
            .optional_attribute(name)?
            .map(SmlAttribute::as_float)
            .transpose()?
            .unwrap_or(0.0))
    };
    Ok(Some(Thickness::new(
        side("Left")?,
        side("Top")?,
        side("Right")?,
        side("Bottom")?,
    )))
}

/// Read `index [span]` with span defaulting to 1.
fn parse_grid_span(attribute: &SmlAttribute) -> Result<GridSpan> {
    attribute.assure_value_count_min_max(1, 2)?;
    let index = grid_value(attribute, 0, 0, "non-negative integer")?;
    let span = if attribute.value_count() == 2 {
        grid_value(attribute, 1, 1, "positive integer")?
    } else {
        1
    };
    let placement = GridSpan::new(index, span);
    if placement.checked_end().is_none() {
        return Err(invalid_value(attribute, 0, "index that leaves room for its span"));
    }
    Ok(placement)
}

fn grid_value(
    attribute: &SmlAttribute,
    index: usize,
    min: i64,
    expected: &'static str,
) -> Result<u32> {
    let value = attribute.get_int(index)?;
    if value < min {
        return Err(invalid_value(attribute, index, expected));
    }
    u32::try_from(value).map_err(|_| invalid_value(attribute, index, expected))
}

fn invalid_value(attribute: &SmlAttribute, index: usize, expected: &'static str) -> ControlError {
    DocumentError::InvalidValue {
        attribute: attribute.name().to_string(),
        index,
        expected,
        value: attribute.values().get(index).cloned().flatten(),
    }
    .into()
}

fn optional_string(element: &SmlElement, name: &str) -> Result<Option<String>> {
    Ok(element
        .optional_attribute(name)?
        .map(|attribute| attribute.as_string().map(str::to_string))
        .transpose()?)
}

fn with_control_properties(names: &[&'static str]) -> Vec<&'static str> {
    names
        .iter()
        .copied()
        .chain(CONTROL_PROPERTY_ELEMENTS)
        .collect()
}
