//! CSS custom properties and closure-backed custom modifiers.

use std::fmt;
use std::rc::Rc;

use crate::modifier::{
    ApplyError, ApplyModifier, ApplyResult, ApplyScope, Modifier, ModifierKind, ModifierProps,
};
use crate::reactive::Reactive;

/// `--name` custom properties. Owns every style property starting with `--`.
#[derive(Debug, Clone, Default)]
pub struct CustomPropertyProps {
    pub vars: Vec<(String, Reactive<String>)>,
}

/// Normalize `accent` or `--accent` to `--accent`.
fn var_name(name: &str) -> Result<String, ApplyError> {
    let bare = name.trim().trim_start_matches("--");
    let valid = !bare.is_empty()
        && bare
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if !valid {
        return Err(ApplyError::invalid(
            "cssVar",
            format!("`{name}` is not a valid custom property name"),
        ));
    }
    Ok(format!("--{bare}"))
}

impl ApplyModifier for CustomPropertyProps {
    fn apply(&self, scope: &mut ApplyScope<'_>) -> ApplyResult {
        for (name, value) in &self.vars {
            let name = var_name(name)?;
            scope.set_style(&name, value.get());
        }
        Ok(None)
    }
}

/// Set a CSS custom property.
pub fn css_var(name: &str, value: impl Into<Reactive<String>>) -> Modifier {
    Modifier::new(
        "cssVar",
        ModifierProps::CustomProperty(CustomPropertyProps {
            vars: vec![(name.to_owned(), value.into())],
        }),
    )
}

type CustomApply = Rc<dyn Fn(&mut ApplyScope<'_>) -> ApplyResult>;

/// A modifier whose behavior is an arbitrary closure.
///
/// Custom modifiers have kind [`ModifierKind::Custom`] and are applied after
/// every built-in category by default.
#[derive(Clone)]
pub struct CustomModifier {
    kind: Rc<str>,
    apply: CustomApply,
}

impl CustomModifier {
    pub fn new(
        kind: &str,
        apply: impl Fn(&mut ApplyScope<'_>) -> ApplyResult + 'static,
    ) -> Self {
        Self {
            kind: Rc::from(kind),
            apply: Rc::new(apply),
        }
    }

    pub fn kind(&self) -> ModifierKind {
        ModifierKind::Custom(Rc::clone(&self.kind))
    }
}

impl fmt::Debug for CustomModifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomModifier")
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

impl ApplyModifier for CustomModifier {
    fn apply(&self, scope: &mut ApplyScope<'_>) -> ApplyResult {
        (self.apply)(scope)
    }
}

/// A custom modifier named and typed `kind`.
pub fn custom(
    kind: &str,
    apply: impl Fn(&mut ApplyScope<'_>) -> ApplyResult + 'static,
) -> Modifier {
    Modifier::new(kind, ModifierProps::Custom(CustomModifier::new(kind, apply)))
}

/// Add a class to the element.
pub fn class(name: &str) -> Modifier {
    let class = name.trim().to_owned();
    custom("class", move |scope| {
        if class.is_empty() || class.contains(char::is_whitespace) {
            return Err(ApplyError::invalid("class", format!("`{class}` is not a class name")));
        }
        scope.add_class(&class);
        Ok(None)
    })
}

/// Attributes written by other modifier kinds or stored outside the
/// attribute map. `attribute` refuses them.
fn owned_elsewhere(name: &str) -> Option<&'static str> {
    let lower = name.to_ascii_lowercase();
    match lower.as_str() {
        "role" | "tabindex" => Some("role/tabIndex"),
        "disabled" => Some("disabled"),
        "class" => Some("class"),
        "id" | "style" => Some("the element itself"),
        _ if lower.starts_with("aria-") => Some("ariaLabel/ariaHidden/aria"),
        _ => None,
    }
}

/// Set an arbitrary attribute.
///
/// Names owned by another modifier (`role`, `tabindex`, `disabled`,
/// `aria-*`, `class`) are rejected so that no two kinds write the same
/// attribute.
pub fn attribute(name: &str, value: impl Into<Reactive<String>>) -> Modifier {
    let name = name.trim().to_owned();
    let value = value.into();
    custom("attribute", move |scope| {
        if name.is_empty() {
            return Err(ApplyError::invalid("attribute", "attribute name is empty"));
        }
        if let Some(owner) = owned_elsewhere(&name) {
            return Err(ApplyError::invalid(
                "attribute",
                format!("`{name}` is set through {owner}, not attribute"),
            ));
        }
        scope.set_attribute(&name, value.get());
        Ok(None)
    })
}
