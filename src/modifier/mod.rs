//! Modifier descriptors: typed, immutable styling instructions.
//!
//! A [`Modifier`] pairs a category ([`ModifierKind`]), a priority and a tagged
//! property set ([`ModifierProps`]). Applying it mutates one element's styles,
//! classes, attributes or listeners through an [`ApplyScope`]. Modifiers are
//! reference-counted and never change after construction; two handles are
//! "the same modifier" only if they point to the same allocation.

pub mod builder;
pub mod context;
pub mod engine;
pub mod kinds;
pub mod lazy;
pub mod registry;

use std::fmt;
use std::rc::Rc;

use thiserror::Error;

use crate::dom::{Dom, NodeId};

pub use builder::{modifiers, BuildError, ModifierBuilder};
pub use context::{ApplyScope, ModifierContext, PartialContext, Phase};
pub use engine::{apply_modifiers_to_node, apply_snapshot, ApplyOptions, ApplyReport};
pub use kinds::{
    AccessibilityProps, AppearanceProps, CustomModifier, CustomPropertyProps, FilterProps,
    InteractionProps, LayoutProps, TransformProps, TransitionProps, TypographyProps,
};
pub use lazy::{LazyModifier, LazyPolicy};
pub use registry::{Arg, FactoryError, ModifierArgs, ModifierPlugin, ModifierRegistry};

// ---------------------------------------------------------------------------
// ModifierKind
// ---------------------------------------------------------------------------

/// Modifier category. Each built-in category owns a disjoint set of style
/// properties and attributes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ModifierKind {
    Layout,
    Typography,
    Appearance,
    Filter,
    Transform,
    Transition,
    Interaction,
    Accessibility,
    CustomProperty,
    Custom(Rc<str>),
}

impl ModifierKind {
    /// Create a custom kind.
    pub fn custom(name: &str) -> Self {
        ModifierKind::Custom(Rc::from(name))
    }

    /// Lowercase tag, e.g. `"layout"`.
    pub fn as_str(&self) -> &str {
        match self {
            ModifierKind::Layout => "layout",
            ModifierKind::Typography => "typography",
            ModifierKind::Appearance => "appearance",
            ModifierKind::Filter => "filter",
            ModifierKind::Transform => "transform",
            ModifierKind::Transition => "transition",
            ModifierKind::Interaction => "interaction",
            ModifierKind::Accessibility => "accessibility",
            ModifierKind::CustomProperty => "custom-property",
            ModifierKind::Custom(name) => name,
        }
    }

    /// Priority used when a modifier does not set its own.
    pub fn default_priority(&self) -> i32 {
        match self {
            ModifierKind::Layout => 100,
            ModifierKind::Typography => 150,
            ModifierKind::Appearance => 200,
            ModifierKind::Filter => 250,
            ModifierKind::Transform => 300,
            ModifierKind::Transition => 350,
            ModifierKind::Interaction => 400,
            ModifierKind::Accessibility => 450,
            ModifierKind::CustomProperty | ModifierKind::Custom(_) => 500,
        }
    }
}

impl fmt::Display for ModifierKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ApplyError
// ---------------------------------------------------------------------------

/// Error returned by a single modifier application.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApplyError {
    #[error("invalid value for `{modifier}`: {message}")]
    InvalidValue { modifier: String, message: String },

    #[error("modifier `{modifier}` failed: {reason}")]
    Failed { modifier: String, reason: String },

    #[error("modifier `{name}` is not registered; install the `{package}` plugin before rendering")]
    Unresolved { name: String, package: String },
}

impl ApplyError {
    pub fn invalid(modifier: &str, message: impl Into<String>) -> Self {
        ApplyError::InvalidValue {
            modifier: modifier.to_owned(),
            message: message.into(),
        }
    }

    pub fn failed(modifier: &str, reason: impl Into<String>) -> Self {
        ApplyError::Failed {
            modifier: modifier.to_owned(),
            reason: reason.into(),
        }
    }

    /// Fatal errors abort the pass result; everything else is isolated.
    pub fn is_fatal(&self) -> bool {
        matches!(self, ApplyError::Unresolved { .. })
    }
}

/// Outcome of one application: `Some(node)` replaces the node being styled.
pub type ApplyResult = Result<Option<NodeId>, ApplyError>;

/// Implemented by every property set.
pub trait ApplyModifier {
    fn apply(&self, scope: &mut ApplyScope<'_>) -> ApplyResult;
}

// ---------------------------------------------------------------------------
// ModifierProps
// ---------------------------------------------------------------------------

/// Tagged property set, one variant per category.
#[derive(Debug, Clone)]
pub enum ModifierProps {
    Layout(LayoutProps),
    Typography(TypographyProps),
    Appearance(AppearanceProps),
    Filter(FilterProps),
    Transform(TransformProps),
    Transition(TransitionProps),
    Interaction(InteractionProps),
    Accessibility(AccessibilityProps),
    CustomProperty(CustomPropertyProps),
    Custom(CustomModifier),
    /// Placeholder resolved through the registry at apply time.
    Lazy(LazyModifier),
}

impl ModifierProps {
    /// The category these properties belong to.
    pub fn kind(&self) -> ModifierKind {
        match self {
            ModifierProps::Layout(_) => ModifierKind::Layout,
            ModifierProps::Typography(_) => ModifierKind::Typography,
            ModifierProps::Appearance(_) => ModifierKind::Appearance,
            ModifierProps::Filter(_) => ModifierKind::Filter,
            ModifierProps::Transform(_) => ModifierKind::Transform,
            ModifierProps::Transition(_) => ModifierKind::Transition,
            ModifierProps::Interaction(_) => ModifierKind::Interaction,
            ModifierProps::Accessibility(_) => ModifierKind::Accessibility,
            ModifierProps::CustomProperty(_) => ModifierKind::CustomProperty,
            ModifierProps::Custom(custom) => custom.kind(),
            ModifierProps::Lazy(lazy) => lazy.kind(),
        }
    }
}

impl ApplyModifier for ModifierProps {
    fn apply(&self, scope: &mut ApplyScope<'_>) -> ApplyResult {
        match self {
            ModifierProps::Layout(p) => p.apply(scope),
            ModifierProps::Typography(p) => p.apply(scope),
            ModifierProps::Appearance(p) => p.apply(scope),
            ModifierProps::Filter(p) => p.apply(scope),
            ModifierProps::Transform(p) => p.apply(scope),
            ModifierProps::Transition(p) => p.apply(scope),
            ModifierProps::Interaction(p) => p.apply(scope),
            ModifierProps::Accessibility(p) => p.apply(scope),
            ModifierProps::CustomProperty(p) => p.apply(scope),
            ModifierProps::Custom(p) => p.apply(scope),
            ModifierProps::Lazy(p) => p.apply(scope),
        }
    }
}

// ---------------------------------------------------------------------------
// Modifier
// ---------------------------------------------------------------------------

#[derive(Clone)]
struct ModifierInner {
    name: String,
    kind: ModifierKind,
    priority: i32,
    props: ModifierProps,
}

/// An immutable, shareable styling instruction.
#[derive(Clone)]
pub struct Modifier(Rc<ModifierInner>);

impl Modifier {
    /// Create a modifier named `name` with its kind's default priority.
    pub fn new(name: impl Into<String>, props: ModifierProps) -> Self {
        let kind = props.kind();
        Self(Rc::new(ModifierInner {
            name: name.into(),
            priority: kind.default_priority(),
            kind,
            props,
        }))
    }

    /// Return a modifier identical to this one but with another priority.
    ///
    /// The result is a new descriptor; other handles to `self` are unaffected.
    pub fn with_priority(self, priority: i32) -> Self {
        let mut inner = Rc::unwrap_or_clone(self.0);
        inner.priority = priority;
        Self(Rc::new(inner))
    }

    pub fn name(&self) -> &str {
        &self.0.name
    }

    pub fn kind(&self) -> &ModifierKind {
        &self.0.kind
    }

    pub fn priority(&self) -> i32 {
        self.0.priority
    }

    pub fn props(&self) -> &ModifierProps {
        &self.0.props
    }

    /// Apply within an existing scope.
    pub fn apply(&self, scope: &mut ApplyScope<'_>) -> ApplyResult {
        self.0.props.apply(scope)
    }

    /// Apply to `node` directly with a default context.
    ///
    /// Cleanups registered by the modifier are chained onto `node`'s disposal
    /// hook.
    pub fn apply_to(&self, dom: &mut Dom, node: NodeId) -> ApplyResult {
        let context = PartialContext::new().resolve(dom, node);
        let mut cleanups = Vec::new();
        let result = {
            let mut scope = ApplyScope::new(dom, node, &context, &mut cleanups);
            self.apply(&mut scope)
        };
        for cleanup in cleanups {
            dom.add_disposer(node, cleanup);
        }
        result
    }

    /// Reference identity.
    pub fn ptr_eq(a: &Modifier, b: &Modifier) -> bool {
        Rc::ptr_eq(&a.0, &b.0)
    }
}

impl fmt::Debug for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Modifier")
            .field("name", &self.0.name)
            .field("kind", &self.0.kind.as_str())
            .field("priority", &self.0.priority)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::css::Edges;
    use crate::dom::ElementData;
    use crate::modifier::kinds::{appearance, layout};

    #[test]
    fn default_priorities_ascend_by_category() {
        let order = [
            ModifierKind::Layout,
            ModifierKind::Typography,
            ModifierKind::Appearance,
            ModifierKind::Filter,
            ModifierKind::Transform,
            ModifierKind::Transition,
            ModifierKind::Interaction,
            ModifierKind::Accessibility,
            ModifierKind::CustomProperty,
        ];
        for pair in order.windows(2) {
            assert!(pair[0].default_priority() < pair[1].default_priority());
        }
        assert_eq!(ModifierKind::custom("x").default_priority(), 500);
    }

    #[test]
    fn kind_tags() {
        assert_eq!(ModifierKind::Layout.as_str(), "layout");
        assert_eq!(ModifierKind::custom("glow").to_string(), "glow");
    }

    #[test]
    fn with_priority_creates_new_descriptor() {
        let a = appearance::opacity(0.5);
        let b = a.clone().with_priority(10);
        assert_eq!(a.priority(), 200);
        assert_eq!(b.priority(), 10);
        assert!(!Modifier::ptr_eq(&a, &b));
        assert_eq!(b.kind(), &ModifierKind::Appearance);
    }

    #[test]
    fn clone_shares_identity() {
        let a = layout::padding(Edges::all(8));
        let b = a.clone();
        assert!(Modifier::ptr_eq(&a, &b));
        assert!(!Modifier::ptr_eq(&a, &layout::padding(Edges::all(8))));
    }

    #[test]
    fn apply_to_styles_node() {
        let mut dom = Dom::new();
        let node = dom.create_element(ElementData::new("div"));
        let result = layout::margin(Edges::all(16)).apply_to(&mut dom, node);
        assert_eq!(result, Ok(None));
        assert_eq!(dom.style(node).unwrap().get("margin"), Some("16px"));
    }

    #[test]
    fn fatal_errors() {
        let unresolved = ApplyError::Unresolved {
            name: "shadow".into(),
            package: "mantle-effects".into(),
        };
        assert!(unresolved.is_fatal());
        assert!(!ApplyError::invalid("opacity", "out of range").is_fatal());
        assert_eq!(
            unresolved.to_string(),
            "modifier `shadow` is not registered; install the `mantle-effects` plugin before rendering"
        );
    }

    #[test]
    fn debug_is_compact() {
        let m = appearance::opacity(0.5);
        let s = format!("{m:?}");
        assert!(s.contains("opacity"));
        assert!(s.contains("appearance"));
    }
}
