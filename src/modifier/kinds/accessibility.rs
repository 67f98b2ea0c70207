//! Accessibility modifiers: ARIA attributes, role, tab order.

use crate::modifier::{ApplyError, ApplyModifier, ApplyResult, ApplyScope, Modifier, ModifierProps};
use crate::reactive::Reactive;

use super::ensure_non_empty;

/// Accessibility property set. Writes attributes only.
#[derive(Debug, Clone, Default)]
pub struct AccessibilityProps {
    pub label: Option<Reactive<String>>,
    pub hidden: Option<bool>,
    pub role: Option<String>,
    pub tab_index: Option<i32>,
    /// Extra `aria-*` attributes. Names are stored with the prefix.
    pub aria: Vec<(String, String)>,
}

/// `busy` and `aria-busy` both become `aria-busy`.
fn aria_name(name: &str) -> Result<String, ApplyError> {
    let bare = name.trim().trim_start_matches("aria-");
    if bare.is_empty() || !bare.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
        return Err(ApplyError::invalid("aria", format!("`{name}` is not an ARIA attribute")));
    }
    Ok(format!("aria-{}", bare.to_ascii_lowercase()))
}

impl ApplyModifier for AccessibilityProps {
    fn apply(&self, scope: &mut ApplyScope<'_>) -> ApplyResult {
        if let Some(label) = &self.label {
            scope.set_attribute("aria-label", label.get());
        }
        if let Some(hidden) = self.hidden {
            if hidden {
                scope.set_attribute("aria-hidden", "true");
            } else {
                scope.remove_attribute("aria-hidden");
            }
        }
        if let Some(role) = &self.role {
            ensure_non_empty("role", "role", role)?;
            scope.set_attribute("role", role.as_str());
        }
        if let Some(index) = self.tab_index {
            scope.set_attribute("tabindex", index.to_string());
        }
        for (name, value) in &self.aria {
            let name = aria_name(name)?;
            scope.set_attribute(&name, value.as_str());
        }
        Ok(None)
    }
}

fn accessibility(name: &str, props: AccessibilityProps) -> Modifier {
    Modifier::new(name, ModifierProps::Accessibility(props))
}

pub fn aria_label(label: impl Into<Reactive<String>>) -> Modifier {
    accessibility(
        "ariaLabel",
        AccessibilityProps {
            label: Some(label.into()),
            ..Default::default()
        },
    )
}

/// Hide the element from assistive technology.
pub fn aria_hidden(hidden: bool) -> Modifier {
    accessibility(
        "ariaHidden",
        AccessibilityProps {
            hidden: Some(hidden),
            ..Default::default()
        },
    )
}

pub fn role(role: &str) -> Modifier {
    accessibility(
        "role",
        AccessibilityProps {
            role: Some(role.to_owned()),
            ..Default::default()
        },
    )
}

pub fn tab_index(index: i32) -> Modifier {
    accessibility(
        "tabIndex",
        AccessibilityProps {
            tab_index: Some(index),
            ..Default::default()
        },
    )
}

/// An arbitrary `aria-*` attribute. The prefix is optional.
pub fn aria(name: &str, value: &str) -> Modifier {
    accessibility(
        "aria",
        AccessibilityProps {
            aria: vec![(name.to_owned(), value.to_owned())],
            ..Default::default()
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{Dom, ElementData, NodeId};

    fn node() -> (Dom, NodeId) {
        let mut dom = Dom::new();
        let id = dom.create_element(ElementData::new("div"));
        (dom, id)
    }

    #[test]
    fn label_role_and_tab_index() {
        let (mut dom, id) = node();
        aria_label("Close dialog").apply_to(&mut dom, id).unwrap();
        role("button").apply_to(&mut dom, id).unwrap();
        tab_index(0).apply_to(&mut dom, id).unwrap();
        let el = dom.get(id).unwrap();
        assert_eq!(el.get_attribute("aria-label"), Some("Close dialog"));
        assert_eq!(el.get_attribute("role"), Some("button"));
        assert_eq!(el.get_attribute("tabindex"), Some("0"));
    }

    #[test]
    fn hidden_toggles() {
        let (mut dom, id) = node();
        aria_hidden(true).apply_to(&mut dom, id).unwrap();
        assert_eq!(dom.get(id).unwrap().get_attribute("aria-hidden"), Some("true"));
        aria_hidden(false).apply_to(&mut dom, id).unwrap();
        assert!(!dom.get(id).unwrap().has_attribute("aria-hidden"));
    }

    #[test]
    fn aria_prefix_is_normalized() {
        let (mut dom, id) = node();
        aria("expanded", "false").apply_to(&mut dom, id).unwrap();
        aria("aria-busy", "true").apply_to(&mut dom, id).unwrap();
        let el = dom.get(id).unwrap();
        assert_eq!(el.get_attribute("aria-expanded"), Some("false"));
        assert_eq!(el.get_attribute("aria-busy"), Some("true"));
    }

    #[test]
    fn bad_aria_name_fails() {
        let (mut dom, id) = node();
        assert!(aria("has space", "x").apply_to(&mut dom, id).is_err());
        assert!(aria("aria-", "x").apply_to(&mut dom, id).is_err());
    }
}
