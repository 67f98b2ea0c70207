//! `StyleDeclaration`: an element's inline style map.
//!
//! Mirrors the DOM `element.style` object: properties are addressed by their
//! camelCase names (`marginTop`), custom properties keep their `--name`, and
//! iteration order is the order properties were first set. Setting an empty
//! value removes the property, as assigning `''` does in the browser.

use indexmap::IndexMap;

use crate::css::parser::{parse_declarations, StyleParseError};

/// Convert `margin-top` to `marginTop`. Custom properties are returned as-is.
pub fn to_camel_case(name: &str) -> String {
    if name.starts_with("--") {
        return name.to_owned();
    }
    let mut out = String::with_capacity(name.len());
    let mut upper_next = false;
    for ch in name.chars() {
        if ch == '-' {
            // `-webkit-x` keeps a leading capital: `WebkitX`.
            upper_next = true;
            continue;
        }
        if upper_next {
            out.extend(ch.to_uppercase());
            upper_next = false;
        } else {
            out.push(ch);
        }
    }
    out
}

/// Convert `marginTop` to `margin-top`. Custom properties are returned as-is.
pub fn to_kebab_case(name: &str) -> String {
    if name.starts_with("--") {
        return name.to_owned();
    }
    let mut out = String::with_capacity(name.len() + 4);
    for ch in name.chars() {
        if ch.is_ascii_uppercase() {
            out.push('-');
            out.push(ch.to_ascii_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}

/// Inline styles for one element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleDeclaration {
    properties: IndexMap<String, String>,
}

impl StyleDeclaration {
    /// Create an empty declaration block.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a property by camelCase name. An empty value removes it.
    pub fn set(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        if value.is_empty() {
            self.remove(name);
        } else {
            self.properties.insert(name.to_owned(), value);
        }
    }

    /// Set a property by its CSS (kebab-case) name, like `setProperty`.
    pub fn set_property(&mut self, css_name: &str, value: impl Into<String>) {
        self.set(&to_camel_case(css_name), value);
    }

    /// Read a property by camelCase name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.properties.get(name).map(String::as_str)
    }

    /// Read a property by CSS name, like `getPropertyValue`.
    pub fn get_property_value(&self, css_name: &str) -> Option<&str> {
        self.get(&to_camel_case(css_name))
    }

    /// Remove a property by camelCase name, returning its previous value.
    ///
    /// Remaining properties keep their relative order.
    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.properties.shift_remove(name)
    }

    /// Whether a property is set.
    pub fn contains(&self, name: &str) -> bool {
        self.properties.contains_key(name)
    }

    /// Number of set properties.
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    /// Whether no property is set.
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Remove every property.
    pub fn clear(&mut self) {
        self.properties.clear();
    }

    /// Iterate `(camelCase name, value)` in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.properties
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Serialize as `style` attribute text: `margin-top: 8px; color: red;`.
    pub fn css_text(&self) -> String {
        self.iter()
            .map(|(name, value)| format!("{}: {};", to_kebab_case(name), value))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Replace every property with the parsed contents of `text`.
    ///
    /// On a parse error the existing properties are left untouched.
    pub fn set_css_text(&mut self, text: &str) -> Result<(), StyleParseError> {
        let declarations = parse_declarations(text)?;
        self.properties.clear();
        for d in declarations {
            self.set_property(&d.name, d.value);
        }
        Ok(())
    }

    /// Overlay `other` on top of `self`: properties set in `other` win.
    pub fn merge(&self, other: &StyleDeclaration) -> StyleDeclaration {
        let mut merged = self.clone();
        for (name, value) in other.iter() {
            merged.set(name, value);
        }
        merged
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn camel_case_conversion() {
        assert_eq!(to_camel_case("margin-top"), "marginTop");
        assert_eq!(to_camel_case("color"), "color");
        assert_eq!(to_camel_case("border-top-left-radius"), "borderTopLeftRadius");
        assert_eq!(to_camel_case("--accent-color"), "--accent-color");
        assert_eq!(to_camel_case("-webkit-user-select"), "WebkitUserSelect");
    }

    #[test]
    fn kebab_case_conversion() {
        assert_eq!(to_kebab_case("marginTop"), "margin-top");
        assert_eq!(to_kebab_case("color"), "color");
        assert_eq!(to_kebab_case("--accent"), "--accent");
        assert_eq!(to_kebab_case("WebkitUserSelect"), "-webkit-user-select");
    }

    #[test]
    fn set_get_remove() {
        let mut s = StyleDeclaration::new();
        assert!(s.is_empty());
        s.set("marginTop", "8px");
        assert_eq!(s.get("marginTop"), Some("8px"));
        assert_eq!(s.get_property_value("margin-top"), Some("8px"));
        assert_eq!(s.remove("marginTop"), Some("8px".into()));
        assert!(s.get("marginTop").is_none());
    }

    #[test]
    fn empty_value_removes() {
        let mut s = StyleDeclaration::new();
        s.set("color", "red");
        s.set("color", "");
        assert!(!s.contains("color"));
    }

    #[test]
    fn overwrite_keeps_position() {
        let mut s = StyleDeclaration::new();
        s.set("color", "red");
        s.set("opacity", "0.5");
        s.set("color", "blue");
        let names: Vec<_> = s.iter().map(|(k, _)| k).collect();
        assert_eq!(names, vec!["color", "opacity"]);
        assert_eq!(s.get("color"), Some("blue"));
    }

    #[test]
    fn css_text_round_trip() {
        let mut s = StyleDeclaration::new();
        s.set("marginTop", "8px");
        s.set("--accent", "#ff00aa");
        s.set("color", "red");
        assert_eq!(s.css_text(), "margin-top: 8px; --accent: #ff00aa; color: red;");

        let mut parsed = StyleDeclaration::new();
        parsed.set_css_text(&s.css_text()).unwrap();
        assert_eq!(parsed, s);
    }

    #[test]
    fn set_css_text_error_keeps_existing() {
        let mut s = StyleDeclaration::new();
        s.set("color", "red");
        assert!(s.set_css_text("color red").is_err());
        assert_eq!(s.get("color"), Some("red"));
    }

    #[test]
    fn merge_other_wins() {
        let mut base = StyleDeclaration::new();
        base.set("color", "red");
        base.set("padding", "4px");
        let mut other = StyleDeclaration::new();
        other.set("color", "blue");
        let merged = base.merge(&other);
        assert_eq!(merged.get("color"), Some("blue"));
        assert_eq!(merged.get("padding"), Some("4px"));
        assert_eq!(base.get("color"), Some("red"));
    }
}
