//! Ui: the element tree, registry and config that mounted components share.
//!
//! [`Ui`] renders components under its root element and applies the modifier
//! snapshots attached to every rendered node. A reactive mount wraps that
//! application in an effect, so writing a signal read by a modifier re-applies
//! the component's modifiers.

use std::cell::{Ref, RefCell, RefMut};
use std::fmt;
use std::rc::Rc;

use tracing::{debug, warn};

use crate::component::{Component, ModifierSnapshot};
use crate::config::Config;
use crate::dom::{Dom, ElementData, NodeId};
use crate::modifier::{
    apply_modifiers_to_node, apply_snapshot, ApplyError, ApplyOptions, Modifier, ModifierBuilder,
    ModifierRegistry, PartialContext, Phase,
};
use crate::reactive::{
    batch, create_effect_with_id, create_signal, dispose_effect, dispose_signal, EffectId,
    WriteSignal,
};

/// Modifier lists a pass replaces, by node.
type Previous = Vec<(NodeId, Rc<[Modifier]>)>;

// ---------------------------------------------------------------------------
// Mount
// ---------------------------------------------------------------------------

struct ReactiveMount {
    effect: EffectId,
    trigger: WriteSignal<u64>,
    previous: Rc<RefCell<Previous>>,
}

/// A component rendered into a [`Ui`].
pub struct Mount {
    component: Rc<dyn Component>,
    rendered: Vec<NodeId>,
    outer: Rc<RefCell<Vec<NodeId>>>,
    reactive: Option<ReactiveMount>,
}

impl Mount {
    /// The mounted component.
    pub fn component(&self) -> &Rc<dyn Component> {
        &self.component
    }

    /// Nodes the component rendered.
    pub fn rendered(&self) -> &[NodeId] {
        &self.rendered
    }

    /// Top-level nodes under the root. Differs from [`rendered`](Self::rendered)
    /// when a modifier wrapped a node.
    pub fn nodes(&self) -> Vec<NodeId> {
        self.outer.borrow().clone()
    }

    /// The first top-level node.
    pub fn node(&self) -> Option<NodeId> {
        self.outer.borrow().first().copied()
    }

    pub fn is_reactive(&self) -> bool {
        self.reactive.is_some()
    }
}

impl fmt::Debug for Mount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mount")
            .field("component", &self.component.id())
            .field("rendered", &self.rendered)
            .field("reactive", &self.is_reactive())
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Ui
// ---------------------------------------------------------------------------

/// Owns the element tree and mounts components into it.
pub struct Ui {
    dom: Rc<RefCell<Dom>>,
    registry: ModifierRegistry,
    config: Config,
    root: NodeId,
}

impl Ui {
    /// Create a Ui with the default config and the thread's default registry.
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    pub fn with_config(config: Config) -> Self {
        let mut dom = Dom::new();
        let root = dom.create_element(ElementData::new("div").with_id("root"));
        dom.set_root(root);
        Self {
            dom: Rc::new(RefCell::new(dom)),
            registry: ModifierRegistry::global(),
            config,
            root,
        }
    }

    /// Use `registry` for builders created through this Ui (builder).
    pub fn with_registry(mut self, registry: ModifierRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn registry(&self) -> &ModifierRegistry {
        &self.registry
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Borrow the element tree.
    ///
    /// # Panics
    ///
    /// Panics if the tree is mutably borrowed, e.g. from inside a listener.
    pub fn dom(&self) -> Ref<'_, Dom> {
        self.dom.borrow()
    }

    /// Mutably borrow the element tree.
    ///
    /// # Panics
    ///
    /// Panics if the tree is already borrowed.
    pub fn dom_mut(&self) -> RefMut<'_, Dom> {
        self.dom.borrow_mut()
    }

    /// Start a modifier chain resolved against this Ui's registry and lazy
    /// policy.
    pub fn builder(&self, component: impl Component + 'static) -> ModifierBuilder {
        ModifierBuilder::new(Rc::new(component))
            .with_registry(self.registry.clone())
            .with_lazy_policy(self.config.lazy_policy())
    }

    /// Apply `modifiers` to `node` with this Ui's options and default
    /// component id.
    pub fn apply(&self, node: NodeId, modifiers: &[Modifier]) -> Result<NodeId, ApplyError> {
        let context = PartialContext::new().component_id(self.config.default_component_id.as_str());
        apply_modifiers_to_node(
            &mut self.dom.borrow_mut(),
            node,
            modifiers,
            context,
            self.config.apply_options(),
        )
    }

    /// Render `component` under the root and apply its modifiers once.
    ///
    /// On a fatal error the rendered nodes are removed again.
    pub fn mount(&self, component: impl Component + 'static) -> Result<Mount, ApplyError> {
        let component: Rc<dyn Component> = Rc::new(component);
        let mut dom = self.dom.borrow_mut();
        let rendered = render_under(&mut dom, self.root, component.as_ref());
        let pass = apply_pass(
            &mut dom,
            &rendered,
            Phase::Creation,
            &[],
            self.config.apply_options(),
        );
        if let Some(err) = pass.fatal {
            remove_all(&mut dom, &pass.outer);
            return Err(err);
        }
        component.mounted(&mut dom, &pass.outer);
        debug!(component = component.id(), nodes = pass.outer.len(), "mounted");
        Ok(Mount {
            component,
            rendered,
            outer: Rc::new(RefCell::new(pass.outer)),
            reactive: None,
        })
    }

    /// Like [`mount`](Self::mount), but re-applies the modifiers whenever a
    /// signal they read changes.
    ///
    /// Re-application first runs the disposal hooks of the rendered subtree,
    /// then applies in [`Phase::Update`].
    pub fn mount_reactive(&self, component: impl Component + 'static) -> Result<Mount, ApplyError> {
        let component: Rc<dyn Component> = Rc::new(component);
        let rendered = render_under(&mut self.dom.borrow_mut(), self.root, component.as_ref());
        let outer = Rc::new(RefCell::new(rendered.clone()));
        let previous: Rc<RefCell<Previous>> = Rc::default();
        let first_error: Rc<RefCell<Option<ApplyError>>> = Rc::default();
        let (trigger, set_trigger) = create_signal(0_u64);

        let effect = {
            let dom = Rc::clone(&self.dom);
            let outer = Rc::clone(&outer);
            let previous = Rc::clone(&previous);
            let first_error = Rc::clone(&first_error);
            let rendered = rendered.clone();
            let options = self.config.apply_options();
            let component_id = component.id().to_owned();
            let mut first = true;
            create_effect_with_id(move || {
                trigger.get();
                let Ok(mut dom) = dom.try_borrow_mut() else {
                    warn!(component = %component_id, "element tree busy; skipping re-application");
                    return;
                };
                let phase = if first {
                    Phase::Creation
                } else {
                    for &node in &rendered {
                        dispose_subtree(&mut dom, node);
                    }
                    Phase::Update
                };
                let replaced = std::mem::take(&mut *previous.borrow_mut());
                let pass = apply_pass(&mut dom, &rendered, phase, &replaced, options);
                *outer.borrow_mut() = pass.outer;
                match pass.fatal {
                    Some(err) if first => *first_error.borrow_mut() = Some(err),
                    Some(err) => warn!(component = %component_id, error = %err, "re-application failed"),
                    None if !first => debug!(component = %component_id, "modifiers re-applied"),
                    None => {}
                }
                first = false;
            })
        };

        let fatal = first_error.borrow_mut().take();
        let mut dom = self.dom.borrow_mut();
        if let Some(err) = fatal {
            dispose_effect(effect);
            dispose_signal(set_trigger.id());
            remove_all(&mut dom, &outer.borrow());
            return Err(err);
        }
        let nodes = outer.borrow().clone();
        component.mounted(&mut dom, &nodes);
        debug!(component = component.id(), nodes = nodes.len(), "mounted reactively");
        Ok(Mount {
            component,
            rendered,
            outer,
            reactive: Some(ReactiveMount {
                effect,
                trigger: set_trigger,
                previous,
            }),
        })
    }

    /// Pick up modifiers appended to the mounted component since it rendered.
    ///
    /// Returns how many nodes received a newer snapshot. Nothing is
    /// re-applied when that is zero.
    pub fn refresh(&self, mount: &Mount) -> Result<usize, ApplyError> {
        let mut dom = self.dom.borrow_mut();
        let mut replaced: Previous = Vec::new();
        for &top in &mount.rendered {
            for node in dom.walk_depth_first(top) {
                let Some(current) = dom.snapshot(node) else {
                    continue;
                };
                let old = Rc::clone(&current.modifiers);
                if let Some(latest) = current.latest() {
                    replaced.push((node, old));
                    dom.attach_snapshot(node, latest);
                }
            }
        }
        let count = replaced.len();
        if count == 0 {
            return Ok(0);
        }

        match &mount.reactive {
            Some(reactive) => {
                *reactive.previous.borrow_mut() = replaced;
                drop(dom);
                reactive.trigger.update(|n| *n += 1);
            }
            None => {
                for &node in &mount.rendered {
                    dispose_subtree(&mut dom, node);
                }
                let pass = apply_pass(
                    &mut dom,
                    &mount.rendered,
                    Phase::Update,
                    &replaced,
                    self.config.apply_options(),
                );
                *mount.outer.borrow_mut() = pass.outer;
                if let Some(err) = pass.fatal {
                    return Err(err);
                }
            }
        }
        debug!(component = mount.component.id(), nodes = count, "refreshed");
        Ok(count)
    }

    /// Tear down a mount: stop re-application, run disposal hooks, remove the
    /// nodes and call the component's cleanup.
    pub fn unmount(&self, mount: Mount) {
        if let Some(reactive) = &mount.reactive {
            dispose_effect(reactive.effect);
            dispose_signal(reactive.trigger.id());
        }
        remove_all(&mut self.dom.borrow_mut(), &mount.outer.borrow());
        mount.component.cleanup();
        debug!(component = mount.component.id(), "unmounted");
    }

    /// Dispatch an event, deferring effects until every handler has run.
    pub fn dispatch_event(&self, target: NodeId, kind: &str) -> usize {
        batch(|| {
            let mut dom = self.dom.borrow_mut();
            dom.dispatch_event(target, kind)
        })
    }
}

impl Default for Ui {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Ui {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ui")
            .field("root", &self.root)
            .field("registry", &self.registry)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// Passes
// ---------------------------------------------------------------------------

struct Pass {
    outer: Vec<NodeId>,
    fatal: Option<ApplyError>,
}

fn render_under(dom: &mut Dom, root: NodeId, component: &dyn Component) -> Vec<NodeId> {
    let rendered = component.render(dom);
    for &node in &rendered {
        if dom.parent(node).is_none() {
            dom.reparent(node, root);
        }
    }
    rendered
}

/// Apply the snapshot of every node under `rendered`. Keeps going after a
/// fatal error and reports the first one.
fn apply_pass(
    dom: &mut Dom,
    rendered: &[NodeId],
    phase: Phase,
    replaced: &[(NodeId, Rc<[Modifier]>)],
    options: ApplyOptions,
) -> Pass {
    let mut pass = Pass {
        outer: Vec::with_capacity(rendered.len()),
        fatal: None,
    };
    for &top in rendered {
        let mut outer = top;
        for node in dom.walk_depth_first(top) {
            let mut context = PartialContext::new().phase(phase);
            if phase == Phase::Update {
                let previous = replaced
                    .iter()
                    .find(|(n, _)| *n == node)
                    .map(|(_, m)| m.to_vec())
                    .or_else(|| dom.snapshot(node).map(|s: &ModifierSnapshot| s.modifiers.to_vec()));
                if let Some(previous) = previous {
                    context = context.previous_modifiers(previous);
                }
            }
            match apply_snapshot(dom, node, context, options) {
                Ok(result) if node == top => outer = result,
                Ok(_) => {}
                Err(err) => {
                    pass.fatal.get_or_insert(err);
                }
            }
        }
        pass.outer.push(outer);
    }
    pass
}

fn dispose_subtree(dom: &mut Dom, node: NodeId) {
    for id in dom.walk_depth_first(node) {
        dom.dispose(id);
    }
}

fn remove_all(dom: &mut Dom, nodes: &[NodeId]) {
    for &node in nodes {
        dom.remove(node);
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::component::{create_modifiable_component, ComponentExt};
    use crate::css::Edges;
    use crate::modifier::kinds::{appearance, custom, layout};
    use crate::modifier::kinds::HoverEffect;
    use crate::reactive::{is_signal_alive, Reactive};
    use crate::views::{Button, Stack, Text};
    use pretty_assertions::assert_eq;

    struct Tracked {
        mounted: Rc<Cell<usize>>,
        cleaned: Rc<Cell<bool>>,
    }

    impl Component for Tracked {
        fn id(&self) -> &str {
            "tracked"
        }

        fn type_name(&self) -> &str {
            "Tracked"
        }

        fn render(&self, dom: &mut Dom) -> Vec<NodeId> {
            vec![dom.create_element(ElementData::new("div"))]
        }

        fn mounted(&self, _dom: &mut Dom, nodes: &[NodeId]) {
            self.mounted.set(nodes.len());
        }

        fn cleanup(&self) {
            self.cleaned.set(true);
        }
    }

    #[test]
    fn mount_applies_snapshot_under_root() {
        let ui = Ui::new();
        let card = Text::new("hi").modifiers().padding(4).opacity(0.5).build();
        let mount = ui.mount(card).unwrap();
        let node = mount.node().unwrap();
        let dom = ui.dom();
        assert_eq!(dom.parent(node), Some(ui.root()));
        assert_eq!(dom.style(node).unwrap().get("padding"), Some("4px"));
        assert_eq!(dom.style(node).unwrap().get("opacity"), Some("0.5"));
    }

    #[test]
    fn nested_children_are_styled() {
        let ui = Ui::new();
        let child = Text::new("x").modifiers().foreground_color("red").build();
        let stack = Stack::vertical().with_child(child);
        let mount = ui.mount(stack).unwrap();
        let dom = ui.dom();
        let inner = dom.children(mount.node().unwrap())[0];
        assert_eq!(dom.style(inner).unwrap().get("color"), Some("red"));
    }

    #[test]
    fn mount_and_unmount_lifecycle() {
        let ui = Ui::new();
        let mounted = Rc::new(Cell::new(0));
        let cleaned = Rc::new(Cell::new(false));
        let tracked = create_modifiable_component(Tracked {
            mounted: Rc::clone(&mounted),
            cleaned: Rc::clone(&cleaned),
        });
        let mount = ui.mount(tracked).unwrap();
        assert_eq!(mounted.get(), 1);
        let node = mount.node().unwrap();

        ui.unmount(mount);
        assert!(cleaned.get());
        assert!(!ui.dom().contains(node));
        assert!(ui.dom().children(ui.root()).is_empty());
    }

    #[test]
    fn fatal_error_removes_nodes() {
        crate::testing::init_test_logging();
        let ui = Ui::new().with_registry(ModifierRegistry::new());
        let mut builder = ui
            .builder(Text::new("x"))
            .modifier("glassmorphism", ())
            .unwrap();
        let err = ui.mount(builder.build()).unwrap_err();
        assert!(err.is_fatal());
        assert!(ui.dom().children(ui.root()).is_empty());
    }

    #[test]
    fn plain_mount_ignores_signal_writes_until_reapplied() {
        let ui = Ui::new();
        let (color, set_color) = create_signal(String::from("red"));
        let card = Text::new("x").modifiers().background_color(color).build();
        let mount = ui.mount(card.clone()).unwrap();
        let node = mount.node().unwrap();

        set_color.set("blue".into());
        assert_eq!(ui.dom().style(node).unwrap().get("backgroundColor"), Some("red"));

        card.append([appearance::opacity(0.9)]);
        assert_eq!(ui.refresh(&mount).unwrap(), 1);
        let dom = ui.dom();
        let style = dom.style(node).unwrap();
        assert_eq!(style.get("backgroundColor"), Some("blue"));
        assert_eq!(style.get("opacity"), Some("0.9"));
    }

    #[test]
    fn unmount_frees_the_trigger_signal() {
        let ui = Ui::new();
        let card = Text::new("x").modifiers().padding(1).build();
        let mount = ui.mount_reactive(card).unwrap();
        let trigger = mount.reactive.as_ref().map(|r| r.trigger.id()).unwrap();
        assert!(is_signal_alive(trigger));

        ui.unmount(mount);
        assert!(!is_signal_alive(trigger));
    }

    #[test]
    fn reapplication_while_hovered_drops_hover_styles() {
        let ui = Ui::new();
        let (color, set_color) = create_signal(String::from("white"));
        let button = Button::new("ok")
            .modifiers()
            .background_color(color)
            .hover_effect(HoverEffect::new().scale(1.1))
            .build();
        let mount = ui.mount_reactive(button).unwrap();
        let node = mount.node().unwrap();

        ui.dispatch_event(node, "mouseenter");
        assert_eq!(ui.dom().style(node).unwrap().get("transform"), Some("scale(1.1)"));

        set_color.set("black".into());
        assert_eq!(ui.dom().style(node).unwrap().get("transform"), None);
        ui.dispatch_event(node, "mouseleave");
        let dom = ui.dom();
        let style = dom.style(node).unwrap();
        assert_eq!(style.get("transform"), None);
        assert_eq!(style.get("backgroundColor"), Some("black"));
    }

    #[test]
    fn reactive_mount_reapplies_on_signal_write() {
        crate::testing::init_test_logging();
        let ui = Ui::new();
        let (color, set_color) = create_signal(String::from("red"));
        let card = Text::new("x").modifiers().background_color(color).build();
        let mount = ui.mount_reactive(card).unwrap();
        let node = mount.node().unwrap();
        assert_eq!(ui.dom().style(node).unwrap().get("backgroundColor"), Some("red"));

        set_color.set("blue".into());
        assert_eq!(ui.dom().style(node).unwrap().get("backgroundColor"), Some("blue"));

        ui.unmount(mount);
        set_color.set("green".into());
        assert!(!ui.dom().contains(node));
    }

    #[test]
    fn reapplication_runs_disposers_first() {
        let ui = Ui::new();
        let (size, set_size) = create_signal(1.0_f64);
        let disposed = Rc::new(Cell::new(0));
        let counter = Rc::clone(&disposed);
        let tracker = custom::custom("tracker", move |scope| {
            let counter = Rc::clone(&counter);
            scope.on_cleanup(move |_| counter.set(counter.get() + 1));
            Ok(None)
        });
        let card = Text::new("x")
            .modifiers()
            .scale(size)
            .with(tracker)
            .build();
        let mount = ui.mount_reactive(card).unwrap();
        set_size.set(2.0);
        assert_eq!(disposed.get(), 1);
        ui.unmount(mount);
        assert_eq!(disposed.get(), 2);
    }

    #[test]
    fn update_phase_sees_previous_modifiers() {
        let ui = Ui::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let log = Rc::clone(&seen);
        let phases = custom::custom("phases", move |scope| {
            let ctx = scope.context();
            log.borrow_mut().push((ctx.phase, ctx.previous_modifiers.len()));
            Ok(None)
        });
        let card = Text::new("x").modifiers().with(phases).build();
        let mount = ui.mount(card.clone()).unwrap();

        card.append([appearance::clipped()]);
        assert_eq!(ui.refresh(&mount).unwrap(), 1);
        assert_eq!(ui.refresh(&mount).unwrap(), 0);
        assert_eq!(
            *seen.borrow(),
            vec![(Phase::Creation, 0), (Phase::Update, 1)]
        );
        let node = mount.node().unwrap();
        assert_eq!(ui.dom().style(node).unwrap().get("overflow"), Some("hidden"));
    }

    #[test]
    fn refresh_reactive_mount() {
        let ui = Ui::new();
        let card = Text::new("x").modifiers().padding(2).build();
        let mount = ui.mount_reactive(card.clone()).unwrap();
        card.append([layout::margin(Edges::all(6))]);
        assert_eq!(ui.refresh(&mount).unwrap(), 1);
        let node = mount.node().unwrap();
        assert_eq!(ui.dom().style(node).unwrap().get("margin"), Some("6px"));
    }

    #[test]
    fn tap_handler_writes_signal_during_dispatch() {
        let ui = Ui::new();
        let (taps, set_taps) = create_signal(0_i32);
        let opacity = Reactive::derived(move || if taps.get() > 0 { 0.5 } else { 1.0 });
        let button = Button::new("go")
            .modifiers()
            .opacity(opacity)
            .on_tap(move || set_taps.update(|n| *n += 1))
            .build();
        let mount = ui.mount_reactive(button).unwrap();
        let node = mount.node().unwrap();

        assert_eq!(ui.dispatch_event(node, "click"), 1);
        assert_eq!(ui.dom().style(node).unwrap().get("opacity"), Some("0.5"));
        // The re-application replaced the click listener instead of adding one.
        assert_eq!(ui.dom().listener_count(node, "click"), 1);
    }

    #[test]
    fn apply_uses_default_component_id() {
        let ui = Ui::with_config(Config::new().with_default_component_id("page"));
        let seen = Rc::new(RefCell::new(String::new()));
        let log = Rc::clone(&seen);
        let component_id = custom::custom("componentId", move |scope| {
            *log.borrow_mut() = scope.context().component_id.clone();
            Ok(None)
        });
        let node = ui
            .dom_mut()
            .append_child(ui.root(), ElementData::new("div"))
            .unwrap();
        ui.apply(node, &[component_id]).unwrap();
        assert_eq!(*seen.borrow(), "page");
    }
}
