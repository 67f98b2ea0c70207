//! Deferred resolution for modifiers whose plugin may register late.
//!
//! When a builder asks for a name the registry does not know, and the name is
//! on the allow-list, it gets a [`LazyModifier`] instead of an error. The lazy
//! descriptor looks the name up again when applied. If it is still missing,
//! application fails with the fatal [`ApplyError::Unresolved`].

use tracing::debug;

use super::registry::{ModifierArgs, ModifierRegistry};
use super::{ApplyError, ApplyModifier, ApplyResult, ApplyScope, Modifier, ModifierKind};

/// Names that may be resolved lazily.
pub const LAZY_ALLOW_LIST: &[&str] = &[
    "shadow",
    "glassmorphism",
    "neumorphism",
    "gradient",
    "grid",
    "gridItem",
    "gridArea",
    "blur",
    "hoverEffect",
    "animation",
    "parallax",
];

/// The package expected to provide `name`.
pub fn expected_package(name: &str) -> &'static str {
    match name {
        "glassmorphism" | "neumorphism" | "gradient" | "parallax" | "shadow" | "blur"
        | "hoverEffect" | "animation" => "mantle-effects",
        "grid" | "gridItem" | "gridArea" => "mantle-grid",
        _ => "mantle-modifiers",
    }
}

/// Best guess at the category of a lazily resolved name, used for ordering
/// before the real descriptor is known.
pub fn kind_hint(name: &str) -> ModifierKind {
    match name {
        "grid" | "gridItem" | "gridArea" => ModifierKind::Layout,
        "shadow" | "glassmorphism" | "neumorphism" | "gradient" => ModifierKind::Appearance,
        "blur" => ModifierKind::Filter,
        "parallax" => ModifierKind::Transform,
        "animation" => ModifierKind::Transition,
        "hoverEffect" => ModifierKind::Interaction,
        other => ModifierKind::custom(other),
    }
}

/// Whether and for which names the builder may defer resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LazyPolicy {
    pub enabled: bool,
    pub allow_list: Vec<String>,
}

impl Default for LazyPolicy {
    fn default() -> Self {
        Self {
            enabled: true,
            allow_list: LAZY_ALLOW_LIST.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl LazyPolicy {
    /// Never defer.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            allow_list: Vec::new(),
        }
    }

    /// Whether a missing `name` may become a lazy descriptor. Always `false`
    /// once `registry` is sealed.
    pub fn allows(&self, name: &str, registry: &ModifierRegistry) -> bool {
        self.enabled && !registry.is_sealed() && self.allow_list.iter().any(|n| n == name)
    }
}

/// A modifier resolved through the registry at apply time.
#[derive(Debug, Clone)]
pub struct LazyModifier {
    name: String,
    args: ModifierArgs,
    registry: ModifierRegistry,
}

impl LazyModifier {
    pub fn new(name: &str, args: ModifierArgs, registry: ModifierRegistry) -> Self {
        Self {
            name: name.to_owned(),
            args,
            registry,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> ModifierKind {
        kind_hint(&self.name)
    }

    /// Look the name up again. A name that is still missing gives the fatal
    /// [`ApplyError::Unresolved`]; a factory error is an ordinary failure.
    pub fn resolve(&self) -> Result<Modifier, ApplyError> {
        match self.registry.resolve(&self.name, &self.args) {
            None => Err(ApplyError::Unresolved {
                name: self.name.clone(),
                package: expected_package(&self.name).to_owned(),
            }),
            Some(Err(err)) => Err(ApplyError::failed(&self.name, err.to_string())),
            Some(Ok(resolved)) => {
                debug!(name = %self.name, kind = %resolved.kind(), "lazy modifier resolved");
                Ok(resolved)
            }
        }
    }
}

impl ApplyModifier for LazyModifier {
    fn apply(&self, scope: &mut ApplyScope<'_>) -> ApplyResult {
        self.resolve()?.apply(scope)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{Dom, ElementData};
    use crate::modifier::ModifierProps;
    use crate::modifier_args;

    fn lazy(name: &str, registry: &ModifierRegistry) -> Modifier {
        Modifier::new(
            name,
            ModifierProps::Lazy(LazyModifier::new(name, modifier_args![4], registry.clone())),
        )
    }

    #[test]
    fn policy_respects_seal() {
        let registry = ModifierRegistry::new();
        let policy = LazyPolicy::default();
        assert!(policy.allows("glassmorphism", &registry));
        assert!(!policy.allows("sparkle", &registry));
        registry.seal();
        assert!(!policy.allows("glassmorphism", &registry));
        assert!(!LazyPolicy::disabled().allows("shadow", &ModifierRegistry::new()));
    }

    #[test]
    fn kind_hint_orders_like_builtin() {
        let registry = ModifierRegistry::new();
        let m = lazy("blur", &registry);
        assert_eq!(m.kind(), &ModifierKind::Filter);
        assert_eq!(m.priority(), 250);
    }

    #[test]
    fn resolves_after_late_registration() {
        let registry = ModifierRegistry::new();
        let m = lazy("blur", &registry);
        crate::modifier::kinds::register_builtins(&registry);

        let mut dom = Dom::new();
        let id = dom.create_element(ElementData::new("div"));
        m.apply_to(&mut dom, id).unwrap();
        assert_eq!(dom.style(id).unwrap().get("filter"), Some("blur(4px)"));
    }

    #[test]
    fn exhaustion_is_fatal() {
        let registry = ModifierRegistry::new();
        let m = lazy("glassmorphism", &registry);
        let mut dom = Dom::new();
        let id = dom.create_element(ElementData::new("div"));
        let err = m.apply_to(&mut dom, id).unwrap_err();
        assert!(err.is_fatal());
        assert_eq!(
            err,
            ApplyError::Unresolved {
                name: "glassmorphism".into(),
                package: "mantle-effects".into()
            }
        );
    }

    #[test]
    fn factory_error_is_isolated() {
        let registry = ModifierRegistry::with_builtins();
        let m = Modifier::new(
            "shadow",
            ModifierProps::Lazy(LazyModifier::new("shadow", modifier_args!["x"], registry)),
        );
        let mut dom = Dom::new();
        let id = dom.create_element(ElementData::new("div"));
        let err = m.apply_to(&mut dom, id).unwrap_err();
        assert!(!err.is_fatal());
    }

    #[test]
    fn packages() {
        assert_eq!(expected_package("gridArea"), "mantle-grid");
        assert_eq!(expected_package("sparkle"), "mantle-modifiers");
    }
}
