//! Loading items documents end to end and observing the resulting store.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use trellis_core::{Item, ItemGroup, Items, ItemsError, ItemsLoader, ItemsNode, LoaderOptions};
use trellis_sml::SmlDocument;

const SETTINGS: &str = r#"
# Settings screen items
Items
	UserName   String  "User name"
	Password   String  "Password"
	Remember   Bool    "Remember me"
	Theme      Enum    "Theme"
	*          Light   "Light"
	*          Dark    "Dark"
	*          System  -
	Apply      Command "Apply"
	Cancel     Command
End
"#;

fn setup() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::TRACE)
        .try_init();
}

const EDITOR: &str = r#"
Items
	Title     String  "Document title"
	File
		Open      Command "Open..."
		Recent
			Clear  Command -
		End
	End
	View
		Wrap      Bool    "Word wrap"
		Zoom      Enum    -
		*         Small   "Small text"
		*         Large   "Large ""print"""
	End
	Separator Item
End
"#;

/// Flatten a group into one line per node: path, type, title and options.
fn shape(items: &Items) -> Vec<String> {
    fn walk(group: &ItemGroup, prefix: &str, out: &mut Vec<String>) {
        for node in group.nodes() {
            let path = format!("{prefix}{}", node.name());
            match node {
                ItemsNode::Group(group) => {
                    out.push(format!("{path} group"));
                    walk(group, &format!("{path}."), out);
                }
                ItemsNode::Item(item) => {
                    out.push(format!("{path} {:?} {:?}", item.item_type(), item.title()));
                    if let Item::Enum(item) = item {
                        for option in item.options() {
                            out.push(format!("{path} * {} {:?}", option.name(), option.title()));
                        }
                    }
                }
            }
        }
    }

    let mut out = Vec::new();
    walk(items.root(), "", &mut out);
    out
}

#[test]
fn test_loading_survives_rewrite() {
    setup();
    for text in [SETTINGS, EDITOR] {
        let first = Items::parse(text).unwrap();
        let rewritten = SmlDocument::parse(text).unwrap().to_string();
        let second = Items::parse(&rewritten).unwrap();
        assert_eq!(shape(&first), shape(&second), "rewritten as:\n{rewritten}");

        let third = Items::parse(&SmlDocument::parse(&rewritten).unwrap().to_string()).unwrap();
        assert_eq!(shape(&second), shape(&third));
    }
}

#[test]
fn test_nested_shape() {
    setup();
    let items = Items::parse(EDITOR).unwrap();
    assert_eq!(
        shape(&items),
        [
            "Title String Some(\"Document title\")",
            "File group",
            "File.Open Command Some(\"Open...\")",
            "File.Recent group",
            "File.Recent.Clear Command None",
            "View group",
            "View.Wrap Bool Some(\"Word wrap\")",
            "View.Zoom Enum None",
            "View.Zoom * Zoom:Small Some(\"Small text\")",
            "View.Zoom * Zoom:Large Some(\"Large \\\"print\\\"\")",
            "Separator Item None",
        ]
    );
}

#[test]
fn test_enum_options_are_qualified() {
    setup();
    let items = Items::parse(SETTINGS).unwrap();
    let theme = items.get_enum("theme").unwrap();

    let options: Vec<_> = theme
        .options()
        .iter()
        .map(|option| (option.name(), option.title()))
        .collect();
    assert_eq!(
        options,
        [
            ("Theme:Light", Some("Light")),
            ("Theme:Dark", Some("Dark")),
            ("Theme:System", None),
        ]
    );
}

#[test]
fn test_notifications_fire_once_per_change() {
    setup();
    let items = Arc::new(Items::parse(SETTINGS).unwrap());
    let seen = Arc::new(Mutex::new(Vec::new()));

    let seen_clone = seen.clone();
    items
        .get_string("UserName")
        .unwrap()
        .on_changed(move |value| seen_clone.lock().push(value.clone()));

    let name = items.get_string("username").unwrap();
    name.set_value("ada");
    name.set_value("ada");
    name.set_value("grace");
    assert_eq!(*seen.lock(), ["ada", "grace"]);

    let toggles = Arc::new(AtomicUsize::new(0));
    let toggles_clone = toggles.clone();
    let remember = items.get_bool("Remember").unwrap();
    remember.on_changed(move |_| {
        toggles_clone.fetch_add(1, Ordering::SeqCst);
    });
    remember.set_value(false);
    remember.set_value(true);
    assert_eq!(toggles.load(Ordering::SeqCst), 1);
}

#[test]
fn test_values_shared_across_threads() {
    setup();
    let items = Arc::new(Items::parse(SETTINGS).unwrap());

    let worker = {
        let items = items.clone();
        std::thread::spawn(move || {
            items.get_enum("Theme").unwrap().set_value(2);
        })
    };
    worker.join().unwrap();

    let theme = items.get_enum("Theme").unwrap();
    assert_eq!(theme.value(), 2);
    assert_eq!(theme.selected_option().unwrap().name(), "Theme:System");
}

#[test]
fn test_command_bound_from_application() {
    setup();
    let items = Items::parse(SETTINGS).unwrap();
    let applied = Arc::new(AtomicUsize::new(0));

    let applied_clone = applied.clone();
    items
        .bind_command("Apply", move || {
            applied_clone.fetch_add(1, Ordering::SeqCst);
        })
        .unwrap();

    let apply = items.get_command("Apply").unwrap();
    apply.execute().unwrap();
    apply.execute().unwrap();
    assert_eq!(applied.load(Ordering::SeqCst), 2);

    let cancel = items.get_command("Cancel").unwrap();
    assert_eq!(
        cancel.execute().unwrap_err().to_string(),
        "Command \"Cancel\" is not bound"
    );
}

#[test]
fn test_failures_produce_no_store() {
    setup();
    for text in [
        "Items\n  Foo Command\n  FOO Bool\nEnd",
        "Items\n  * Orphan\nEnd",
        "Items\n  Count Integer\nEnd",
        "Items\n  Bad.Name String\nEnd",
        "Items\n  Name String\n",
    ] {
        assert!(Items::parse(text).is_err(), "expected failure for {text:?}");
    }

    assert!(matches!(
        Items::parse("Items\n  Foo Command\n  FOO Bool\nEnd"),
        Err(ItemsError::DuplicateName { .. })
    ));
}

#[test]
fn test_options_from_toml() {
    setup();
    let options = LoaderOptions::from_toml_str("sub_item_separator = \"_\"").unwrap();
    let loader = ItemsLoader::with_options(options).unwrap();
    let doc = SmlDocument::parse(SETTINGS).unwrap();
    let items = loader.load(doc.root()).unwrap();
    assert_eq!(
        items.get_enum("Theme").unwrap().options()[1].name(),
        "Theme_Dark"
    );
}
