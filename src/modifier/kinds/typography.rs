//! Typography modifiers.
//!
//! Writes `fontFamily`, `fontSize`, `fontWeight`, `fontStyle`, `textAlign`,
//! `lineHeight`, `letterSpacing` and `textDecoration`.

use crate::css::value::format_number;
use crate::css::Length;
use crate::modifier::{ApplyError, ApplyModifier, ApplyResult, ApplyScope, Modifier, ModifierProps};

use super::{ensure_finite, ensure_length, ensure_non_empty};

/// Font weight keywords plus arbitrary numeric weights.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontWeight {
    Thin,
    Light,
    Regular,
    Medium,
    Semibold,
    Bold,
    Heavy,
    Black,
    Numeric(u16),
}

impl FontWeight {
    pub fn value(self) -> u16 {
        match self {
            FontWeight::Thin => 100,
            FontWeight::Light => 300,
            FontWeight::Regular => 400,
            FontWeight::Medium => 500,
            FontWeight::Semibold => 600,
            FontWeight::Bold => 700,
            FontWeight::Heavy => 800,
            FontWeight::Black => 900,
            FontWeight::Numeric(n) => n,
        }
    }

    /// Parse a keyword (`bold`, `semibold`, ...) or a number.
    pub fn parse(input: &str) -> Option<Self> {
        let weight = match input.trim().to_ascii_lowercase().as_str() {
            "thin" => FontWeight::Thin,
            "light" => FontWeight::Light,
            "regular" | "normal" => FontWeight::Regular,
            "medium" => FontWeight::Medium,
            "semibold" => FontWeight::Semibold,
            "bold" => FontWeight::Bold,
            "heavy" => FontWeight::Heavy,
            "black" => FontWeight::Black,
            other => FontWeight::Numeric(other.parse().ok()?),
        };
        Some(weight)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Start,
    Center,
    End,
    Left,
    Right,
    Justify,
}

impl TextAlign {
    pub fn as_str(self) -> &'static str {
        match self {
            TextAlign::Start => "start",
            TextAlign::Center => "center",
            TextAlign::End => "end",
            TextAlign::Left => "left",
            TextAlign::Right => "right",
            TextAlign::Justify => "justify",
        }
    }

    /// Accepts CSS values plus `leading`/`trailing`.
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "start" | "leading" => Some(TextAlign::Start),
            "center" => Some(TextAlign::Center),
            "end" | "trailing" => Some(TextAlign::End),
            "left" => Some(TextAlign::Left),
            "right" => Some(TextAlign::Right),
            "justify" => Some(TextAlign::Justify),
            _ => None,
        }
    }
}

/// A combined font description for [`font`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Font {
    pub family: Option<String>,
    pub size: Option<Length>,
    pub weight: Option<FontWeight>,
    pub italic: bool,
}

impl Font {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn system(size: impl Into<Length>) -> Self {
        Self::new()
            .family("system-ui, sans-serif")
            .size(size)
    }

    pub fn family(mut self, family: &str) -> Self {
        self.family = Some(family.to_owned());
        self
    }

    pub fn size(mut self, size: impl Into<Length>) -> Self {
        self.size = Some(size.into());
        self
    }

    pub fn weight(mut self, weight: FontWeight) -> Self {
        self.weight = Some(weight);
        self
    }

    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }
}

/// Typography property set.
#[derive(Debug, Clone, Default)]
pub struct TypographyProps {
    pub font_family: Option<String>,
    pub font_size: Option<Length>,
    pub font_weight: Option<FontWeight>,
    pub italic: Option<bool>,
    pub text_align: Option<TextAlign>,
    /// Unitless multiplier.
    pub line_height: Option<f64>,
    pub letter_spacing: Option<Length>,
    pub text_decoration: Option<String>,
}

impl ApplyModifier for TypographyProps {
    fn apply(&self, scope: &mut ApplyScope<'_>) -> ApplyResult {
        if let Some(family) = &self.font_family {
            ensure_non_empty("fontFamily", "family", family)?;
            scope.set_style("fontFamily", family.as_str());
        }
        if let Some(size) = &self.font_size {
            ensure_length("fontSize", "size", size, false)?;
            scope.set_style("fontSize", size.to_string());
        }
        if let Some(weight) = self.font_weight {
            let value = weight.value();
            if !(1..=1000).contains(&value) {
                return Err(ApplyError::invalid(
                    "fontWeight",
                    format!("weight {value} is outside 1..=1000"),
                ));
            }
            scope.set_style("fontWeight", value.to_string());
        }
        if let Some(italic) = self.italic {
            scope.set_style("fontStyle", if italic { "italic" } else { "normal" });
        }
        if let Some(align) = self.text_align {
            scope.set_style("textAlign", align.as_str());
        }
        if let Some(line_height) = self.line_height {
            ensure_finite("lineHeight", "value", line_height)?;
            if line_height <= 0.0 {
                return Err(ApplyError::invalid("lineHeight", "must be positive"));
            }
            scope.set_style("lineHeight", format_number(line_height));
        }
        if let Some(spacing) = &self.letter_spacing {
            ensure_length("letterSpacing", "spacing", spacing, true)?;
            scope.set_style("letterSpacing", spacing.to_string());
        }
        if let Some(decoration) = &self.text_decoration {
            scope.set_style("textDecoration", decoration.as_str());
        }
        Ok(None)
    }
}

fn typography(name: &str, props: TypographyProps) -> Modifier {
    Modifier::new(name, ModifierProps::Typography(props))
}

/// Family, size, weight and style in one modifier.
pub fn font(font: Font) -> Modifier {
    typography(
        "font",
        TypographyProps {
            font_family: font.family,
            font_size: font.size,
            font_weight: font.weight,
            italic: font.italic.then_some(true),
            ..Default::default()
        },
    )
}

pub fn font_size(size: impl Into<Length>) -> Modifier {
    typography(
        "fontSize",
        TypographyProps {
            font_size: Some(size.into()),
            ..Default::default()
        },
    )
}

pub fn font_weight(weight: FontWeight) -> Modifier {
    typography(
        "fontWeight",
        TypographyProps {
            font_weight: Some(weight),
            ..Default::default()
        },
    )
}

pub fn font_family(family: &str) -> Modifier {
    typography(
        "fontFamily",
        TypographyProps {
            font_family: Some(family.to_owned()),
            ..Default::default()
        },
    )
}

pub fn italic() -> Modifier {
    typography(
        "italic",
        TypographyProps {
            italic: Some(true),
            ..Default::default()
        },
    )
}

pub fn text_align(align: TextAlign) -> Modifier {
    typography(
        "textAlign",
        TypographyProps {
            text_align: Some(align),
            ..Default::default()
        },
    )
}

pub fn line_height(value: f64) -> Modifier {
    typography(
        "lineHeight",
        TypographyProps {
            line_height: Some(value),
            ..Default::default()
        },
    )
}

pub fn letter_spacing(spacing: impl Into<Length>) -> Modifier {
    typography(
        "letterSpacing",
        TypographyProps {
            letter_spacing: Some(spacing.into()),
            ..Default::default()
        },
    )
}

pub fn text_decoration(value: &str) -> Modifier {
    typography(
        "textDecoration",
        TypographyProps {
            text_decoration: Some(value.to_owned()),
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
        let id = dom.create_element(ElementData::new("p"));
        (dom, id)
    }

    #[test]
    fn font_sets_all_parts() {
        let (mut dom, id) = node();
        font(
            Font::new()
                .family("Inter")
                .size(Length::rem(1.25))
                .weight(FontWeight::Semibold)
                .italic(),
        )
        .apply_to(&mut dom, id)
        .unwrap();
        let style = dom.style(id).unwrap();
        assert_eq!(style.get("fontFamily"), Some("Inter"));
        assert_eq!(style.get("fontSize"), Some("1.25rem"));
        assert_eq!(style.get("fontWeight"), Some("600"));
        assert_eq!(style.get("fontStyle"), Some("italic"));
    }

    #[test]
    fn weight_parsing() {
        assert_eq!(FontWeight::parse("Bold"), Some(FontWeight::Bold));
        assert_eq!(FontWeight::parse("450"), Some(FontWeight::Numeric(450)));
        assert_eq!(FontWeight::parse("fat"), None);
    }

    #[test]
    fn out_of_range_weight_fails() {
        let (mut dom, id) = node();
        assert!(font_weight(FontWeight::Numeric(0))
            .apply_to(&mut dom, id)
            .is_err());
        assert!(dom.style(id).unwrap().get("fontWeight").is_none());
    }

    #[test]
    fn alignment_and_spacing() {
        let (mut dom, id) = node();
        text_align(TextAlign::parse("trailing").unwrap())
            .apply_to(&mut dom, id)
            .unwrap();
        line_height(1.5).apply_to(&mut dom, id).unwrap();
        letter_spacing(Length::em(0.05)).apply_to(&mut dom, id).unwrap();
        let style = dom.style(id).unwrap();
        assert_eq!(style.get("textAlign"), Some("end"));
        assert_eq!(style.get("lineHeight"), Some("1.5"));
        assert_eq!(style.get("letterSpacing"), Some("0.05em"));
    }

    #[test]
    fn non_positive_line_height_fails() {
        let (mut dom, id) = node();
        assert!(line_height(0.0).apply_to(&mut dom, id).is_err());
    }
}
