//! Control descriptors.
//!
//! A [`Control`] is an immutable, validated description of one UI element
//! and its descendants, produced by the [`UiParser`](crate::UiParser). Item
//! references (`command`, `item`, menu entries) are plain paths into an
//! [`Items`](trellis_core::Items) store; they are resolved by whoever
//! renders the tree.

use std::fmt;

/// Outer spacing of a control.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Thickness {
    /// Left margin.
    pub left: f64,
    /// Top margin.
    pub top: f64,
    /// Right margin.
    pub right: f64,
    /// Bottom margin.
    pub bottom: f64,
}

impl Thickness {
    /// Create a new thickness.
    pub fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Same value on all sides.
    pub fn uniform(margin: f64) -> Self {
        Self::new(margin, margin, margin, margin)
    }

    /// Total horizontal margin (left + right).
    #[inline]
    pub fn horizontal(&self) -> f64 {
        self.left + self.right
    }

    /// Total vertical margin (top + bottom).
    #[inline]
    pub fn vertical(&self) -> f64 {
        self.top + self.bottom
    }
}

/// Direction in which a linear layout arranges its children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Orientation {
    /// Children are arranged left to right.
    #[default]
    Horizontal,
    /// Children are arranged top to bottom.
    Vertical,
}

impl Orientation {
    /// Names as written in documents, indexed by enumeration value.
    pub const NAMES: [&'static str; 2] = ["Horizontal", "Vertical"];

    /// Resolve an enumeration value.
    pub fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Orientation::Horizontal),
            1 => Some(Orientation::Vertical),
            _ => None,
        }
    }

    /// Whether children stack top to bottom.
    pub fn is_vertical(self) -> bool {
        self == Orientation::Vertical
    }
}

/// A child slot of a [`LinearLayout`].
#[derive(Debug, Clone, PartialEq)]
pub struct LinearLayoutChild {
    /// The nested control.
    pub control: Control,
    /// Share of the remaining space, if weighted.
    pub weight: Option<f64>,
}

impl LinearLayoutChild {
    /// An unweighted child.
    pub fn new(control: Control) -> Self {
        Self {
            control,
            weight: None,
        }
    }
}

/// Children arranged in a single row or column.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LinearLayout {
    /// Arrangement direction.
    pub orientation: Orientation,
    /// Children in document order.
    pub children: Vec<LinearLayoutChild>,
    /// Outer spacing.
    pub margin: Option<Thickness>,
}

/// Position of a grid child along one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridSpan {
    /// First column or row occupied.
    pub index: u32,
    /// Number of columns or rows occupied, at least 1.
    pub span: u32,
}

impl GridSpan {
    /// A span covering `span` cells starting at `index`.
    pub fn new(index: u32, span: u32) -> Self {
        Self { index, span }
    }

    /// A single cell at `index`.
    pub fn cell(index: u32) -> Self {
        Self::new(index, 1)
    }

    /// One past the last index occupied, saturating at `u32::MAX`.
    pub fn end(&self) -> u32 {
        self.index.saturating_add(self.span)
    }

    /// One past the last index occupied, or `None` if it does not fit a `u32`.
    pub fn checked_end(&self) -> Option<u32> {
        self.index.checked_add(self.span)
    }
}

/// A child slot of a [`GridLayout`].
#[derive(Debug, Clone, PartialEq)]
pub struct GridLayoutChild {
    /// The nested control.
    pub control: Control,
    /// Column placement.
    pub column: GridSpan,
    /// Row placement.
    pub row: GridSpan,
}

/// Children placed on a grid of cells.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GridLayout {
    /// Children in document order.
    pub children: Vec<GridLayoutChild>,
}

impl GridLayout {
    /// Number of columns needed to hold every child.
    pub fn column_count(&self) -> u32 {
        self.children.iter().map(|c| c.column.end()).max().unwrap_or(0)
    }

    /// Number of rows needed to hold every child.
    pub fn row_count(&self) -> u32 {
        self.children.iter().map(|c| c.row.end()).max().unwrap_or(0)
    }
}

/// One page of a [`TabControl`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Tab {
    /// Tab header text.
    pub title: Option<String>,
    /// Page content.
    pub content: Option<Control>,
}

/// Pages selected through a row of tab headers.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TabControl {
    /// Tabs in document order.
    pub tabs: Vec<Tab>,
}

/// An entry of a [`DropDownMenu`]. Each holds an item path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MenuEntry {
    /// Executes a command item.
    Command(String),
    /// Toggles a bool item.
    Check(String),
    /// Selects among the options of an enum item.
    Enum(String),
}

impl MenuEntry {
    /// The referenced item path.
    pub fn path(&self) -> &str {
        match self {
            MenuEntry::Command(path) | MenuEntry::Check(path) | MenuEntry::Enum(path) => path,
        }
    }
}

/// A titled menu of entries.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DropDownMenu {
    /// Menu title.
    pub title: Option<String>,
    /// Entries in document order.
    pub entries: Vec<MenuEntry>,
}

/// A bar of drop-down menus.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MenuBar {
    /// Menus in document order.
    pub menus: Vec<DropDownMenu>,
}

/// A push button bound to a command item.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Button {
    /// Command item path.
    pub command: Option<String>,
    /// Outer spacing.
    pub margin: Option<Thickness>,
}

/// A check box.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CheckBox {
    /// Outer spacing.
    pub margin: Option<Thickness>,
}

/// A text input bound to a string item.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TextBox {
    /// Whether the input accepts several lines.
    pub multi_line: bool,
    /// String item path.
    pub item: Option<String>,
}

/// A read-only text bound to an item.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Label {
    /// Item path.
    pub item: Option<String>,
}

/// A compiled control tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Control {
    /// Children stacked along one axis.
    LinearLayout(LinearLayout),
    /// Children placed on grid cells.
    GridLayout(GridLayout),
    /// Titled pages, one visible at a time.
    TabControl(TabControl),
    /// A bar of drop-down menus.
    MenuBar(MenuBar),
    /// A push button, optionally bound to a command.
    Button(Button),
    /// A check box.
    CheckBox(CheckBox),
    /// A text input, optionally bound to a string item.
    TextBox(TextBox),
    /// Read-only text, optionally bound to an item.
    Label(Label),
    /// An empty placeholder.
    Nothing,
}

impl Control {
    /// The control's kind.
    pub fn kind(&self) -> ControlKind {
        match self {
            Control::LinearLayout(_) => ControlKind::LinearLayout,
            Control::GridLayout(_) => ControlKind::GridLayout,
            Control::TabControl(_) => ControlKind::TabControl,
            Control::MenuBar(_) => ControlKind::MenuBar,
            Control::Button(_) => ControlKind::Button,
            Control::CheckBox(_) => ControlKind::CheckBox,
            Control::TextBox(_) => ControlKind::TextBox,
            Control::Label(_) => ControlKind::Label,
            Control::Nothing => ControlKind::Nothing,
        }
    }

    /// Outer spacing, for kinds that support one.
    pub fn margin(&self) -> Option<&Thickness> {
        match self {
            Control::LinearLayout(layout) => layout.margin.as_ref(),
            Control::Button(button) => button.margin.as_ref(),
            Control::CheckBox(check_box) => check_box.margin.as_ref(),
            _ => None,
        }
    }

    /// Direct child controls in document order.
    pub fn children(&self) -> Vec<&Control> {
        match self {
            Control::LinearLayout(layout) => layout.children.iter().map(|c| &c.control).collect(),
            Control::GridLayout(grid) => grid.children.iter().map(|c| &c.control).collect(),
            Control::TabControl(tabs) => {
                tabs.tabs.iter().filter_map(|t| t.content.as_ref()).collect()
            }
            _ => Vec::new(),
        }
    }

    /// Every item path referenced by this control and its descendants, in
    /// document order.
    pub fn item_paths(&self) -> Vec<&str> {
        let mut paths = Vec::new();
        self.collect_item_paths(&mut paths);
        paths
    }

    fn collect_item_paths<'a>(&'a self, paths: &mut Vec<&'a str>) {
        match self {
            Control::Button(Button { command: Some(path), .. })
            | Control::TextBox(TextBox { item: Some(path), .. })
            | Control::Label(Label { item: Some(path) }) => paths.push(path),
            Control::MenuBar(bar) => {
                let entries = bar.menus.iter().flat_map(|menu| menu.entries.iter());
                paths.extend(entries.map(MenuEntry::path));
            }
            _ => {}
        }
        for child in self.children() {
            child.collect_item_paths(paths);
        }
    }
}

impl From<LinearLayout> for Control {
    fn from(layout: LinearLayout) -> Self {
        Control::LinearLayout(layout)
    }
}

impl From<GridLayout> for Control {
    fn from(grid: GridLayout) -> Self {
        Control::GridLayout(grid)
    }
}

impl From<TabControl> for Control {
    fn from(tabs: TabControl) -> Self {
        Control::TabControl(tabs)
    }
}

impl From<MenuBar> for Control {
    fn from(bar: MenuBar) -> Self {
        Control::MenuBar(bar)
    }
}

impl From<Button> for Control {
    fn from(button: Button) -> Self {
        Control::Button(button)
    }
}

impl From<CheckBox> for Control {
    fn from(check_box: CheckBox) -> Self {
        Control::CheckBox(check_box)
    }
}

impl From<TextBox> for Control {
    fn from(text_box: TextBox) -> Self {
        Control::TextBox(text_box)
    }
}

impl From<Label> for Control {
    fn from(label: Label) -> Self {
        Control::Label(label)
    }
}

/// The closed set of control element names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlKind {
    /// `LinearLayout`: supports margin.
    LinearLayout,
    /// `GridLayout`.
    GridLayout,
    /// `TabControl`.
    TabControl,
    /// `MenuBar`.
    MenuBar,
    /// `Button`: supports margin.
    Button,
    /// `CheckBox`: supports margin.
    CheckBox,
    /// `TextBox`.
    TextBox,
    /// `Label`.
    Label,
    /// `Nothing`: an empty placeholder.
    Nothing,
}

impl ControlKind {
    /// All kinds, in declaration order.
    pub const ALL: [ControlKind; 9] = [
        ControlKind::LinearLayout,
        ControlKind::GridLayout,
        ControlKind::TabControl,
        ControlKind::MenuBar,
        ControlKind::Button,
        ControlKind::CheckBox,
        ControlKind::TextBox,
        ControlKind::Label,
        ControlKind::Nothing,
    ];

    /// Resolve an element name (case-sensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    /// The element name as written in documents.
    pub fn name(self) -> &'static str {
        match self {
            ControlKind::LinearLayout => "LinearLayout",
            ControlKind::GridLayout => "GridLayout",
            ControlKind::TabControl => "TabControl",
            ControlKind::MenuBar => "MenuBar",
            ControlKind::Button => "Button",
            ControlKind::CheckBox => "CheckBox",
            ControlKind::TextBox => "TextBox",
            ControlKind::Label => "Label",
            ControlKind::Nothing => "Nothing",
        }
    }

    /// Whether controls of this kind accept a `Margin` element.
    pub fn supports_margin(self) -> bool {
        matches!(
            self,
            ControlKind::LinearLayout | ControlKind::Button | ControlKind::CheckBox
        )
    }
}

impl fmt::Display for ControlKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
