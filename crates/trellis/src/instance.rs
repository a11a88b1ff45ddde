//! Control instances: descriptors bound to live platform nodes.
//!
//! A [`RenderAdapter`] turns a [`Control`] into whatever its platform uses
//! for a live element ("incarnation") and tears it down again. A
//! [`ControlInstance`] owns one descriptor and tracks whether it is currently
//! incarnated. A [`Window`] docks at most one instance at a time.
//!
//! Structural changes to a descriptor are only accepted while its instance is
//! detached. Appending a child to an attached instance fails with
//! [`ControlError::UnsupportedMutation`] instead of rendering twice.

use std::fmt;

use crate::control::{Control, DropDownMenu, GridLayoutChild, LinearLayoutChild, Tab};
use crate::error::{ControlError, Result};
use trellis_core::logging::targets;

/// Materializes control descriptors on a platform surface.
pub trait RenderAdapter {
    /// Handle to a live platform element.
    type Node;

    /// Create live elements for `control` and its descendants.
    fn incarnate(&mut self, control: &Control) -> Result<Self::Node>;

    /// Destroy live elements previously returned by
    /// [`incarnate`](Self::incarnate).
    fn deincarnate(&mut self, node: Self::Node);
}

/// A structural addition to a container control.
#[derive(Debug, Clone, PartialEq)]
pub enum ChildSlot {
    /// A child of a linear layout.
    Linear(LinearLayoutChild),
    /// A child of a grid layout.
    Grid(GridLayoutChild),
    /// A tab of a tab control.
    Tab(Tab),
    /// A drop-down menu of a menu bar.
    Menu(DropDownMenu),
}

impl ChildSlot {
    fn name(&self) -> &'static str {
        match self {
            ChildSlot::Linear(_) => "linear layout child",
            ChildSlot::Grid(_) => "grid layout child",
            ChildSlot::Tab(_) => "tab",
            ChildSlot::Menu(_) => "drop-down menu",
        }
    }
}

/// A control descriptor plus its live node, when attached.
pub struct ControlInstance<A: RenderAdapter> {
    control: Control,
    node: Option<A::Node>,
}

impl<A: RenderAdapter> ControlInstance<A> {
    /// Create a detached instance.
    pub fn new(control: Control) -> Self {
        Self {
            control,
            node: None,
        }
    }

    /// The owned descriptor.
    pub fn control(&self) -> &Control {
        &self.control
    }

    /// The live node, if attached.
    pub fn node(&self) -> Option<&A::Node> {
        self.node.as_ref()
    }

    /// Whether the instance is incarnated.
    pub fn is_attached(&self) -> bool {
        self.node.is_some()
    }

    /// Incarnate the descriptor through `adapter`.
    ///
    /// Fails with [`ControlError::UnsupportedMutation`] if already attached.
    /// Adapter failures leave the instance detached.
    pub fn attach(&mut self, adapter: &mut A) -> Result<()> {
        if self.is_attached() {
            return Err(ControlError::unsupported_mutation(
                self.control.kind().name(),
                "instance is already attached",
            ));
        }
        let node = adapter.incarnate(&self.control)?;
        tracing::debug!(target: targets::INSTANCE, kind = %self.control.kind(), "attached control");
        self.node = Some(node);
        Ok(())
    }

    /// Deincarnate the descriptor. Returns `false` if it was not attached.
    pub fn detach(&mut self, adapter: &mut A) -> bool {
        let Some(node) = self.node.take() else {
            return false;
        };
        adapter.deincarnate(node);
        tracing::debug!(target: targets::INSTANCE, kind = %self.control.kind(), "detached control");
        true
    }

    /// Append a child to the owned descriptor.
    ///
    /// Fails with [`ControlError::UnsupportedMutation`] while attached, or if
    /// the slot does not belong to this kind of control.
    pub fn append(&mut self, slot: ChildSlot) -> Result<()> {
        let kind = self.control.kind();
        if self.is_attached() {
            return Err(ControlError::unsupported_mutation(
                kind.name(),
                format!("cannot add a {} after the control is attached", slot.name()),
            ));
        }

        match (&mut self.control, slot) {
            (Control::LinearLayout(layout), ChildSlot::Linear(child)) => layout.children.push(child),
            (Control::GridLayout(grid), ChildSlot::Grid(child)) => grid.children.push(child),
            (Control::TabControl(tabs), ChildSlot::Tab(tab)) => tabs.tabs.push(tab),
            (Control::MenuBar(bar), ChildSlot::Menu(menu)) => bar.menus.push(menu),
            (_, slot) => {
                return Err(ControlError::unsupported_mutation(
                    kind.name(),
                    format!("does not accept a {}", slot.name()),
                ));
            }
        }
        tracing::trace!(target: targets::INSTANCE, %kind, "appended child");
        Ok(())
    }

    /// Take back the descriptor. Fails if the instance is still attached.
    pub fn into_control(self) -> Result<Control> {
        if self.is_attached() {
            return Err(ControlError::unsupported_mutation(
                self.control.kind().name(),
                "instance must be detached first",
            ));
        }
        Ok(self.control)
    }
}

impl<A: RenderAdapter> fmt::Debug for ControlInstance<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ControlInstance")
            .field("control", &self.control)
            .field("attached", &self.is_attached())
            .finish()
    }
}

/// A top-level surface that docks at most one control instance.
///
/// The window owns its adapter. Content is deincarnated when replaced,
/// cleared, or when the window is dropped.
pub struct Window<A: RenderAdapter> {
    adapter: A,
    content: Option<ControlInstance<A>>,
}

impl<A: RenderAdapter> Window<A> {
    /// Create an empty window.
    pub fn new(adapter: A) -> Self {
        Self {
            adapter,
            content: None,
        }
    }

    /// The render adapter.
    pub fn adapter(&self) -> &A {
        &self.adapter
    }

    /// The render adapter, mutably.
    pub fn adapter_mut(&mut self) -> &mut A {
        &mut self.adapter
    }

    /// The docked instance, if any.
    pub fn content(&self) -> Option<&ControlInstance<A>> {
        self.content.as_ref()
    }

    /// Replace the docked content.
    ///
    /// The previous instance is detached first. With `Some`, the new control
    /// is attached and docked; if incarnation fails the window is left empty.
    pub fn set_content(&mut self, control: Option<Control>) -> Result<()> {
        if let Some(mut previous) = self.content.take() {
            previous.detach(&mut self.adapter);
        }

        let Some(control) = control else {
            tracing::debug!(target: targets::INSTANCE, "cleared window content");
            return Ok(());
        };

        let mut instance = ControlInstance::new(control);
        instance.attach(&mut self.adapter)?;
        self.content = Some(instance);
        Ok(())
    }
}

impl<A: RenderAdapter> Drop for Window<A> {
    fn drop(&mut self) {
        if let Some(mut content) = self.content.take() {
            content.detach(&mut self.adapter);
        }
    }
}

impl<A: RenderAdapter + fmt::Debug> fmt::Debug for Window<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Window")
            .field("adapter", &self.adapter)
            .field("content", &self.content)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control::{Button, ControlKind, LinearLayout, MenuBar, TabControl};

    /// Records incarnations; optionally refuses one kind of control.
    #[derive(Debug, Default)]
    struct Recorder {
        next: usize,
        live: Vec<usize>,
        events: Vec<String>,
        refuse: Option<ControlKind>,
    }

    impl RenderAdapter for Recorder {
        type Node = usize;

        fn incarnate(&mut self, control: &Control) -> Result<usize> {
            if self.refuse == Some(control.kind()) {
                return Err(ControlError::adapter(format!("cannot render {}", control.kind())));
            }
            self.next += 1;
            self.live.push(self.next);
            self.events.push(format!("+{}:{}", control.kind(), self.next));
            Ok(self.next)
        }

        fn deincarnate(&mut self, node: usize) {
            self.live.retain(|n| *n != node);
            self.events.push(format!("-{node}"));
        }
    }

    fn layout() -> Control {
        Control::LinearLayout(LinearLayout::default())
    }

    #[test]
    fn test_attach_detach_cycle() {
        let mut adapter = Recorder::default();
        let mut instance = ControlInstance::<Recorder>::new(layout());

        instance.attach(&mut adapter).unwrap();
        assert!(instance.is_attached());
        assert_eq!(instance.node(), Some(&1));

        assert!(instance.detach(&mut adapter));
        assert!(!instance.detach(&mut adapter));

        instance.attach(&mut adapter).unwrap();
        assert_eq!(adapter.events, ["+LinearLayout:1", "-1", "+LinearLayout:2"]);
    }

    #[test]
    fn test_double_attach_fails() {
        let mut adapter = Recorder::default();
        let mut instance = ControlInstance::<Recorder>::new(Control::Nothing);
        instance.attach(&mut adapter).unwrap();
        assert!(matches!(
            instance.attach(&mut adapter),
            Err(ControlError::UnsupportedMutation { control: "Nothing", .. })
        ));
        assert_eq!(adapter.live, [1]);
    }

    #[test]
    fn test_append_after_attach_fails() {
        let mut adapter = Recorder::default();
        let mut instance = ControlInstance::<Recorder>::new(layout());

        instance
            .append(ChildSlot::Linear(LinearLayoutChild::new(Control::Nothing)))
            .unwrap();
        instance.attach(&mut adapter).unwrap();

        let err = instance
            .append(ChildSlot::Linear(LinearLayoutChild::new(Control::Nothing)))
            .unwrap_err();
        assert!(matches!(err, ControlError::UnsupportedMutation { .. }));
        assert_eq!(instance.control().children().len(), 1);

        instance.detach(&mut adapter);
        instance
            .append(ChildSlot::Linear(LinearLayoutChild::new(Control::Nothing)))
            .unwrap();
        assert_eq!(instance.control().children().len(), 2);
    }

    #[test]
    fn test_append_wrong_slot_fails() {
        let mut tabs = ControlInstance::<Recorder>::new(Control::TabControl(TabControl::default()));
        tabs.append(ChildSlot::Tab(Tab::default())).unwrap();
        assert!(tabs.append(ChildSlot::Menu(DropDownMenu::default())).is_err());

        let mut bar = ControlInstance::<Recorder>::new(Control::MenuBar(MenuBar::default()));
        bar.append(ChildSlot::Menu(DropDownMenu::default())).unwrap();

        let mut button = ControlInstance::<Recorder>::new(Control::Button(Button::default()));
        let err = button.append(ChildSlot::Tab(Tab::default())).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Unsupported mutation of Button: does not accept a tab"
        );
    }

    #[test]
    fn test_adapter_failure_leaves_detached() {
        let mut adapter = Recorder {
            refuse: Some(ControlKind::Label),
            ..Recorder::default()
        };
        let mut instance = ControlInstance::<Recorder>::new(Control::Label(Default::default()));
        assert!(matches!(
            instance.attach(&mut adapter),
            Err(ControlError::Adapter(_))
        ));
        assert!(!instance.is_attached());
        assert!(instance.into_control().is_ok());
    }

    #[test]
    fn test_window_replaces_content() {
        let mut window = Window::new(Recorder::default());
        window.set_content(Some(layout())).unwrap();
        window.set_content(Some(Control::Nothing)).unwrap();
        assert_eq!(window.adapter().live, [2]);
        assert_eq!(
            window.content().map(|c| c.control().kind()),
            Some(ControlKind::Nothing)
        );

        window.set_content(None).unwrap();
        assert!(window.content().is_none());
        assert!(window.adapter().live.is_empty());
        assert_eq!(
            window.adapter().events,
            ["+LinearLayout:1", "-1", "+Nothing:2", "-2"]
        );
    }

    #[test]
    fn test_window_failed_content_leaves_window_empty() {
        let mut window = Window::new(Recorder {
            refuse: Some(ControlKind::Nothing),
            ..Recorder::default()
        });
        window.set_content(Some(layout())).unwrap();
        assert!(window.set_content(Some(Control::Nothing)).is_err());
        assert!(window.content().is_none());
        assert!(window.adapter().live.is_empty());
    }
}
