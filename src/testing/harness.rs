//! Harness: drive a [`Ui`] headlessly and inspect the result.

use crate::component::Component;
use crate::config::Config;
use crate::dom::NodeId;
use crate::modifier::{ApplyError, ModifierRegistry};
use crate::ui::{Mount, Ui};

// ---------------------------------------------------------------------------
// Harness
// ---------------------------------------------------------------------------

/// A [`Ui`] plus helpers for simulating input and reading back styles.
///
/// # Examples
///
/// ```
/// use mantle::prelude::*;
/// use mantle::testing::Harness;
///
/// let mut harness = Harness::new();
/// let node = harness.mount(Text::new("hi").modifiers().opacity(0.5).build());
/// assert_eq!(harness.style(node, "opacity").as_deref(), Some("0.5"));
/// ```
pub struct Harness {
    ui: Ui,
    mounts: Vec<Mount>,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_ui(Ui::new())
    }

    pub fn with_config(config: Config) -> Self {
        Self::with_ui(Ui::with_config(config))
    }

    pub fn with_registry(registry: ModifierRegistry) -> Self {
        Self::with_ui(Ui::new().with_registry(registry))
    }

    pub fn with_ui(ui: Ui) -> Self {
        Self {
            ui,
            mounts: Vec::new(),
        }
    }

    pub fn ui(&self) -> &Ui {
        &self.ui
    }

    // ── Mounting ─────────────────────────────────────────────────────

    /// Mount reactively and return the first top-level node.
    ///
    /// # Panics
    ///
    /// Panics if application fails or the component renders nothing.
    pub fn mount(&mut self, component: impl Component + 'static) -> NodeId {
        match self.try_mount(component) {
            Ok(node) => node,
            Err(err) => panic!("mount failed: {err}"),
        }
    }

    /// Mount reactively, returning the first top-level node or the error.
    ///
    /// # Panics
    ///
    /// Panics if the component renders nothing.
    pub fn try_mount(&mut self, component: impl Component + 'static) -> Result<NodeId, ApplyError> {
        let mount = self.ui.mount_reactive(component)?;
        let node = mount
            .node()
            .unwrap_or_else(|| panic!("component `{}` rendered no nodes", mount.component().id()));
        self.mounts.push(mount);
        Ok(node)
    }

    /// Re-apply every mount whose component gained modifiers.
    pub fn refresh(&self) -> Result<usize, ApplyError> {
        let mut refreshed = 0;
        for mount in &self.mounts {
            refreshed += self.ui.refresh(mount)?;
        }
        Ok(refreshed)
    }

    /// Unmount everything, most recent first.
    pub fn unmount_all(&mut self) {
        while let Some(mount) = self.mounts.pop() {
            self.ui.unmount(mount);
        }
    }

    // ── Input simulation ─────────────────────────────────────────────

    /// Dispatch a click. Returns the number of handlers run.
    pub fn click(&self, node: NodeId) -> usize {
        self.ui.dispatch_event(node, "click")
    }

    pub fn hover(&self, node: NodeId) -> usize {
        self.ui.dispatch_event(node, "mouseenter")
    }

    pub fn unhover(&self, node: NodeId) -> usize {
        self.ui.dispatch_event(node, "mouseleave")
    }

    // ── Query ────────────────────────────────────────────────────────

    /// An inline style by camelCase name.
    pub fn style(&self, node: NodeId, name: &str) -> Option<String> {
        self.ui.dom().style(node)?.get(name).map(str::to_owned)
    }

    pub fn attribute(&self, node: NodeId, name: &str) -> Option<String> {
        self.ui
            .dom()
            .get(node)?
            .get_attribute(name)
            .map(str::to_owned)
    }

    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.ui
            .dom()
            .get(node)
            .is_some_and(|data| data.class_list.contains(class))
    }

    /// HTML of the subtree at `node`.
    pub fn html(&self, node: NodeId) -> String {
        super::to_html(&self.ui.dom(), node)
    }

    /// HTML of everything under the root, without the root itself.
    pub fn root_html(&self) -> String {
        let dom = self.ui.dom();
        dom.children(self.ui.root())
            .iter()
            .map(|&child| super::to_html(&dom, child))
            .collect()
    }
}

impl Default for Harness {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Harness {
    fn drop(&mut self) {
        self.unmount_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::ComponentExt;
    use crate::modifier::kinds::HoverEffect;
    use crate::views::{Button, Text};

    #[test]
    fn hover_round_trip() {
        let mut harness = Harness::new();
        let node = harness.mount(
            Button::new("ok")
                .modifiers()
                .background_color("white")
                .hover_effect(HoverEffect::new().background_color("black"))
                .build(),
        );
        assert_eq!(harness.hover(node), 1);
        assert_eq!(harness.style(node, "backgroundColor").as_deref(), Some("black"));
        assert_eq!(harness.unhover(node), 1);
        assert_eq!(harness.style(node, "backgroundColor").as_deref(), Some("white"));
    }

    #[test]
    fn disabled_blocks_taps() {
        let mut harness = Harness::new();
        let taps = std::rc::Rc::new(std::cell::Cell::new(0));
        let counter = taps.clone();
        let node = harness.mount(
            Button::new("ok")
                .modifiers()
                .disabled(true)
                .on_tap(move || counter.set(counter.get() + 1))
                .build(),
        );
        harness.click(node);
        assert_eq!(taps.get(), 0);
        assert_eq!(harness.attribute(node, "disabled").as_deref(), Some(""));
        assert_eq!(harness.style(node, "pointerEvents").as_deref(), Some("none"));
    }

    #[test]
    fn refresh_and_unmount() {
        let mut harness = Harness::new();
        let text = Text::new("x").modifiers().class("a").build();
        let node = harness.mount(text.clone());
        assert!(harness.has_class(node, "a"));

        text.modifier_builder().class("b").build();
        assert_eq!(harness.refresh().unwrap(), 1);
        assert!(harness.has_class(node, "b"));

        harness.unmount_all();
        assert_eq!(harness.root_html(), "");
    }
}
