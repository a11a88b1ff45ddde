//! Compiling screens against an items store and rendering them through an
//! adapter that binds widgets to items.

use std::sync::Arc;

use parking_lot::Mutex;
use trellis::{
    ChildSlot, Control, ControlError, ControlInstance, DocumentError, GridSpan, Items,
    LinearLayoutChild, MenuEntry, Orientation, RenderAdapter, UiParser, Window,
};

const ITEMS: &str = r#"
Items
	UserName  String  "User name"
	Remember  Bool    "Remember me"
	Theme     Enum    "Theme"
	*         Light   "Light"
	*         Dark    "Dark"
	Login     Command "Log in"
	Quit      Command "Quit"
End
"#;

const SCREEN: &str = r#"
LinearLayout
	Direction Vertical
	Child
		MenuBar
			DropDownMenu
				Item "File"
				Command Quit
			End
			DropDownMenu
				Item "View"
				Enum Theme
				CheckItem Remember
			End
		End
	End
	Child
		Weight 1
		TabControl
			Tab
				Title "Login"
				Content
					GridLayout
						Child
							Column 0
							Row 0
							Label
								Item UserName
							End
						End
						Child
							Column 1 2
							Row 0
							TextBox
								Item UserName
							End
						End
						Child
							Column 0 3
							Row 1
							Button
								Command Login
								Margin
									Top 8
								End
							End
						End
					End
				End
			End
			Tab
				Title "About"
			End
		End
	End
End
"#;

fn setup() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::TRACE)
        .try_init();
}

/// Binds item-backed widgets and records what is live.
struct BindingAdapter {
    items: Arc<Items>,
    log: Arc<Mutex<Vec<String>>>,
    live: usize,
}

impl BindingAdapter {
    fn new(items: Arc<Items>) -> Self {
        Self {
            items,
            log: Arc::new(Mutex::new(Vec::new())),
            live: 0,
        }
    }

    fn bind(&self, control: &Control) -> trellis::Result<()> {
        match control {
            Control::TextBox(text_box) => {
                if let Some(path) = &text_box.item {
                    let item = self
                        .items
                        .get_string(path)
                        .map_err(|e| ControlError::adapter(e.to_string()))?;
                    let log = self.log.clone();
                    item.on_changed(move |value| log.lock().push(format!("text:{value}")));
                }
            }
            Control::Button(button) => {
                if let Some(path) = &button.command {
                    self.items
                        .get_command(path)
                        .map_err(|e| ControlError::adapter(e.to_string()))?;
                }
            }
            _ => {}
        }
        for child in control.children() {
            self.bind(child)?;
        }
        Ok(())
    }
}

impl RenderAdapter for BindingAdapter {
    type Node = usize;

    fn incarnate(&mut self, control: &Control) -> trellis::Result<usize> {
        self.bind(control)?;
        self.live += 1;
        Ok(self.live)
    }

    fn deincarnate(&mut self, _node: usize) {
        self.live -= 1;
    }
}

#[test]
fn test_screen_structure() {
    setup();
    let screen = UiParser::parse(SCREEN).unwrap();

    let Control::LinearLayout(root) = &screen else {
        panic!("expected a linear layout root");
    };
    assert_eq!(root.orientation, Orientation::Vertical);
    assert_eq!(root.children.len(), 2);
    assert_eq!(root.children[1].weight, Some(1.0));

    let Control::MenuBar(bar) = &root.children[0].control else {
        panic!("expected a menu bar");
    };
    assert_eq!(
        bar.menus[1].entries,
        [
            MenuEntry::Enum("Theme".to_string()),
            MenuEntry::Check("Remember".to_string()),
        ]
    );

    let Control::TabControl(tabs) = &root.children[1].control else {
        panic!("expected a tab control");
    };
    assert_eq!(tabs.tabs[1].title.as_deref(), Some("About"));
    assert!(tabs.tabs[1].content.is_none());

    let Some(Control::GridLayout(grid)) = &tabs.tabs[0].content else {
        panic!("expected a grid on the first tab");
    };
    assert_eq!(grid.children[1].column, GridSpan::new(1, 2));
    assert_eq!(grid.children[2].column, GridSpan::new(0, 3));
    assert_eq!(grid.column_count(), 3);
    assert_eq!(grid.row_count(), 2);
    assert_eq!(grid.children[2].control.margin().map(|m| m.top), Some(8.0));
}

#[test]
fn test_every_path_resolves() {
    setup();
    let items = Items::parse(ITEMS).unwrap();
    let screen = UiParser::parse(SCREEN).unwrap();
    for path in screen.item_paths() {
        assert!(items.get_item(path).is_ok(), "unresolved path {path}");
    }
}

#[test]
fn test_window_binds_items() {
    setup();
    let items = Arc::new(Items::parse(ITEMS).unwrap());
    let adapter = BindingAdapter::new(items.clone());
    let log = adapter.log.clone();

    let mut window = Window::new(adapter);
    window.set_content(Some(UiParser::parse(SCREEN).unwrap())).unwrap();
    assert_eq!(window.adapter().live, 1);

    items.get_string("UserName").unwrap().set_value("ada");
    items.get_string("UserName").unwrap().set_value("ada");
    assert_eq!(*log.lock(), ["text:ada"]);

    window.set_content(None).unwrap();
    assert_eq!(window.adapter().live, 0);
}

#[test]
fn test_unknown_path_fails_incarnation() {
    setup();
    let items = Arc::new(Items::parse(ITEMS).unwrap());
    let mut window = Window::new(BindingAdapter::new(items));
    let screen = UiParser::parse("TextBox\n  Item Password\nEnd").unwrap();
    assert!(matches!(
        window.set_content(Some(screen)),
        Err(ControlError::Adapter(_))
    ));
    assert!(window.content().is_none());
}

#[test]
fn test_growing_a_detached_layout() {
    setup();
    let items = Arc::new(Items::parse(ITEMS).unwrap());
    let mut adapter = BindingAdapter::new(items);
    let mut instance = ControlInstance::new(UiParser::parse("LinearLayout\nEnd").unwrap());

    instance
        .append(ChildSlot::Linear(LinearLayoutChild::new(
            UiParser::parse("Label\n  Item Theme\nEnd").unwrap(),
        )))
        .unwrap();
    instance.attach(&mut adapter).unwrap();
    assert!(matches!(
        instance.append(ChildSlot::Linear(LinearLayoutChild::new(Control::Nothing))),
        Err(ControlError::UnsupportedMutation { .. })
    ));
    assert!(instance.detach(&mut adapter));
    assert_eq!(instance.control().children().len(), 1);
}

#[test]
fn test_schema_violations() {
    setup();
    let cases = [
        ("GridLayout\n  Child\n    Row 0\n    Nothing\n    End\n  End\nEnd", "missing column"),
        ("Label\n  Text Hi\nEnd", "unknown label attribute"),
        ("LinearLayout\n  Child\n  End\nEnd", "empty child"),
        ("TabControl\n  Page\n  End\nEnd", "unknown tab control element"),
    ];
    for (text, case) in cases {
        assert!(
            matches!(UiParser::parse(text), Err(ControlError::Document(_))),
            "expected schema violation: {case}"
        );
    }

    assert!(matches!(
        UiParser::parse("Button\n  Command Save\n"),
        Err(ControlError::Document(DocumentError::Syntax { .. }))
    ));
}
