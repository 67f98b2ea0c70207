//! Appearance modifiers: colors, opacity, corners, border, shadow, clipping.
//!
//! Writes `color`, `backgroundColor`, `opacity`, `borderRadius`, `border`,
//! `boxShadow` and `overflow`.

use std::fmt;

use crate::css::value::format_number;
use crate::css::Length;
use crate::modifier::{ApplyModifier, ApplyResult, ApplyScope, Modifier, ModifierProps};
use crate::reactive::Reactive;

use super::{ensure_length, ensure_non_empty, ensure_range};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BorderStyle {
    Solid,
    Dashed,
    Dotted,
    Double,
    None,
}

impl BorderStyle {
    pub fn as_str(self) -> &'static str {
        match self {
            BorderStyle::Solid => "solid",
            BorderStyle::Dashed => "dashed",
            BorderStyle::Dotted => "dotted",
            BorderStyle::Double => "double",
            BorderStyle::None => "none",
        }
    }
}

/// A border shorthand: `1px solid #ccc`.
#[derive(Debug, Clone, PartialEq)]
pub struct Border {
    pub width: Length,
    pub style: BorderStyle,
    pub color: String,
}

impl Border {
    pub fn solid(width: impl Into<Length>, color: &str) -> Self {
        Self {
            width: width.into(),
            style: BorderStyle::Solid,
            color: color.to_owned(),
        }
    }

    pub fn with_style(mut self, style: BorderStyle) -> Self {
        self.style = style;
        self
    }
}

impl fmt::Display for Border {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.width, self.style.as_str(), self.color)
    }
}

/// A box or drop shadow.
#[derive(Debug, Clone, PartialEq)]
pub struct Shadow {
    pub x: Length,
    pub y: Length,
    pub blur: Length,
    /// Only meaningful for box shadows.
    pub spread: Option<Length>,
    pub color: String,
    pub inset: bool,
}

impl Shadow {
    pub fn new(
        x: impl Into<Length>,
        y: impl Into<Length>,
        blur: impl Into<Length>,
        color: &str,
    ) -> Self {
        Self {
            x: x.into(),
            y: y.into(),
            blur: blur.into(),
            spread: None,
            color: color.to_owned(),
            inset: false,
        }
    }

    pub fn spread(mut self, spread: impl Into<Length>) -> Self {
        self.spread = Some(spread.into());
        self
    }

    pub fn inset(mut self) -> Self {
        self.inset = true;
        self
    }

    pub(crate) fn validate(&self, modifier: &str) -> Result<(), crate::modifier::ApplyError> {
        ensure_length(modifier, "x", &self.x, true)?;
        ensure_length(modifier, "y", &self.y, true)?;
        ensure_length(modifier, "blur", &self.blur, false)?;
        if let Some(spread) = &self.spread {
            ensure_length(modifier, "spread", spread, true)?;
        }
        ensure_non_empty(modifier, "color", &self.color)
    }

    /// `drop-shadow()` form: no spread, no inset.
    pub(crate) fn drop_shadow_css(&self) -> String {
        format!("{} {} {} {}", self.x, self.y, self.blur, self.color)
    }
}

impl fmt::Display for Shadow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.inset {
            f.write_str("inset ")?;
        }
        write!(f, "{} {} {}", self.x, self.y, self.blur)?;
        if let Some(spread) = &self.spread {
            write!(f, " {spread}")?;
        }
        write!(f, " {}", self.color)
    }
}

/// Appearance property set.
#[derive(Debug, Clone, Default)]
pub struct AppearanceProps {
    pub foreground_color: Option<Reactive<String>>,
    pub background_color: Option<Reactive<String>>,
    pub opacity: Option<Reactive<f64>>,
    pub corner_radius: Option<Length>,
    pub border: Option<Border>,
    pub shadow: Option<Shadow>,
    pub clipped: bool,
}

impl ApplyModifier for AppearanceProps {
    fn apply(&self, scope: &mut ApplyScope<'_>) -> ApplyResult {
        if let Some(color) = &self.foreground_color {
            let color = color.get();
            ensure_non_empty("foregroundColor", "color", &color)?;
            scope.set_style("color", color);
        }
        if let Some(color) = &self.background_color {
            let color = color.get();
            ensure_non_empty("backgroundColor", "color", &color)?;
            scope.set_style("backgroundColor", color);
        }
        if let Some(opacity) = &self.opacity {
            let opacity = opacity.get();
            ensure_range("opacity", "value", opacity, 0.0, 1.0)?;
            scope.set_style("opacity", format_number(opacity));
        }
        if let Some(radius) = &self.corner_radius {
            ensure_length("cornerRadius", "radius", radius, false)?;
            scope.set_style("borderRadius", radius.to_string());
        }
        if let Some(border) = &self.border {
            ensure_length("border", "width", &border.width, false)?;
            ensure_non_empty("border", "color", &border.color)?;
            scope.set_style("border", border.to_string());
        }
        if let Some(shadow) = &self.shadow {
            shadow.validate("shadow")?;
            scope.set_style("boxShadow", shadow.to_string());
        }
        if self.clipped {
            scope.set_style("overflow", "hidden");
        }
        Ok(None)
    }
}

fn appearance(name: &str, props: AppearanceProps) -> Modifier {
    Modifier::new(name, ModifierProps::Appearance(props))
}

/// Text color.
pub fn foreground_color(color: impl Into<Reactive<String>>) -> Modifier {
    appearance(
        "foregroundColor",
        AppearanceProps {
            foreground_color: Some(color.into()),
            ..Default::default()
        },
    )
}

pub fn background_color(color: impl Into<Reactive<String>>) -> Modifier {
    appearance(
        "backgroundColor",
        AppearanceProps {
            background_color: Some(color.into()),
            ..Default::default()
        },
    )
}

/// Opacity in `0.0..=1.0`. Values outside the range fail to apply.
pub fn opacity(value: impl Into<Reactive<f64>>) -> Modifier {
    appearance(
        "opacity",
        AppearanceProps {
            opacity: Some(value.into()),
            ..Default::default()
        },
    )
}

pub fn corner_radius(radius: impl Into<Length>) -> Modifier {
    appearance(
        "cornerRadius",
        AppearanceProps {
            corner_radius: Some(radius.into()),
            ..Default::default()
        },
    )
}

pub fn border(border: Border) -> Modifier {
    appearance(
        "border",
        AppearanceProps {
            border: Some(border),
            ..Default::default()
        },
    )
}

pub fn shadow(shadow: Shadow) -> Modifier {
    appearance(
        "shadow",
        AppearanceProps {
            shadow: Some(shadow),
            ..Default::default()
        },
    )
}

/// Hide overflowing content.
pub fn clipped() -> Modifier {
    appearance(
        "clipped",
        AppearanceProps {
            clipped: true,
            ..Default::default()
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{Dom, ElementData, NodeId};
    use crate::modifier::ApplyError;
    use crate::reactive::create_signal;

    fn node() -> (Dom, NodeId) {
        let mut dom = Dom::new();
        let id = dom.create_element(ElementData::new("div"));
        (dom, id)
    }

    #[test]
    fn colors() {
        let (mut dom, id) = node();
        foreground_color("#fff").apply_to(&mut dom, id).unwrap();
        background_color("rebeccapurple").apply_to(&mut dom, id).unwrap();
        let style = dom.style(id).unwrap();
        assert_eq!(style.get("color"), Some("#fff"));
        assert_eq!(style.get("backgroundColor"), Some("rebeccapurple"));
    }

    #[test]
    fn reactive_color_pulls_on_apply() {
        crate::reactive::runtime::reset_runtime();
        let (mut dom, id) = node();
        let (color, set_color) = create_signal(String::from("red"));
        let m = background_color(color);
        m.apply_to(&mut dom, id).unwrap();
        assert_eq!(dom.style(id).unwrap().get("backgroundColor"), Some("red"));

        set_color.set("blue".into());
        assert_eq!(dom.style(id).unwrap().get("backgroundColor"), Some("red"));

        m.apply_to(&mut dom, id).unwrap();
        assert_eq!(dom.style(id).unwrap().get("backgroundColor"), Some("blue"));
    }

    #[test]
    fn opacity_range_checked() {
        let (mut dom, id) = node();
        opacity(0.25).apply_to(&mut dom, id).unwrap();
        assert_eq!(dom.style(id).unwrap().get("opacity"), Some("0.25"));
        let err = opacity(1.5).apply_to(&mut dom, id).unwrap_err();
        assert!(matches!(err, ApplyError::InvalidValue { .. }));
        assert_eq!(dom.style(id).unwrap().get("opacity"), Some("0.25"));
    }

    #[test]
    fn empty_color_rejected() {
        let (mut dom, id) = node();
        assert!(foreground_color("").apply_to(&mut dom, id).is_err());
    }

    #[test]
    fn border_and_radius() {
        let (mut dom, id) = node();
        border(Border::solid(1, "#ccc").with_style(BorderStyle::Dashed))
            .apply_to(&mut dom, id)
            .unwrap();
        corner_radius(8).apply_to(&mut dom, id).unwrap();
        let style = dom.style(id).unwrap();
        assert_eq!(style.get("border"), Some("1px dashed #ccc"));
        assert_eq!(style.get("borderRadius"), Some("8px"));
    }

    #[test]
    fn box_shadow_formatting() {
        let (mut dom, id) = node();
        shadow(Shadow::new(0, 4, 8, "rgba(0,0,0,0.2)").spread(2))
            .apply_to(&mut dom, id)
            .unwrap();
        assert_eq!(
            dom.style(id).unwrap().get("boxShadow"),
            Some("0px 4px 8px 2px rgba(0,0,0,0.2)")
        );
        let inset = Shadow::new(1, 1, 2, "black").inset();
        assert_eq!(inset.to_string(), "inset 1px 1px 2px black");
    }

    #[test]
    fn clipped_hides_overflow() {
        let (mut dom, id) = node();
        clipped().apply_to(&mut dom, id).unwrap();
        assert_eq!(dom.style(id).unwrap().get("overflow"), Some("hidden"));
    }
}
