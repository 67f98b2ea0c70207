//! Layout modifiers: padding, margin, frame, offset, positioning, flex.
//!
//! Writes `display`, `position`, the inset properties, `zIndex`, sizing,
//! flex properties, `margin*` and `padding*`.

use crate::css::{Edges, Length};
use crate::modifier::{
    ApplyError, ApplyModifier, ApplyResult, ApplyScope, Modifier, ModifierProps,
};
use crate::reactive::Reactive;

use super::{ensure_finite, ensure_length};

/// CSS `position` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    Static,
    Relative,
    Absolute,
    Fixed,
    Sticky,
}

impl Position {
    pub fn as_str(self) -> &'static str {
        match self {
            Position::Static => "static",
            Position::Relative => "relative",
            Position::Absolute => "absolute",
            Position::Fixed => "fixed",
            Position::Sticky => "sticky",
        }
    }
}

/// Explicit and bounding sizes. Unset fields are left untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Frame {
    pub width: Option<Length>,
    pub height: Option<Length>,
    pub min_width: Option<Length>,
    pub max_width: Option<Length>,
    pub min_height: Option<Length>,
    pub max_height: Option<Length>,
}

impl Frame {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fixed width and height.
    pub fn fixed(width: impl Into<Length>, height: impl Into<Length>) -> Self {
        Self::new().width(width).height(height)
    }

    pub fn width(mut self, value: impl Into<Length>) -> Self {
        self.width = Some(value.into());
        self
    }

    pub fn height(mut self, value: impl Into<Length>) -> Self {
        self.height = Some(value.into());
        self
    }

    pub fn min_width(mut self, value: impl Into<Length>) -> Self {
        self.min_width = Some(value.into());
        self
    }

    pub fn max_width(mut self, value: impl Into<Length>) -> Self {
        self.max_width = Some(value.into());
        self
    }

    pub fn min_height(mut self, value: impl Into<Length>) -> Self {
        self.min_height = Some(value.into());
        self
    }

    pub fn max_height(mut self, value: impl Into<Length>) -> Self {
        self.max_height = Some(value.into());
        self
    }

    fn entries(&self) -> [(&'static str, Option<Length>); 6] {
        [
            ("width", self.width),
            ("height", self.height),
            ("minWidth", self.min_width),
            ("maxWidth", self.max_width),
            ("minHeight", self.min_height),
            ("maxHeight", self.max_height),
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlexDirection {
    Row,
    Column,
    RowReverse,
    ColumnReverse,
}

impl FlexDirection {
    pub fn as_str(self) -> &'static str {
        match self {
            FlexDirection::Row => "row",
            FlexDirection::Column => "column",
            FlexDirection::RowReverse => "row-reverse",
            FlexDirection::ColumnReverse => "column-reverse",
        }
    }
}

/// Flex container and item settings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Flex {
    pub direction: Option<FlexDirection>,
    pub wrap: Option<bool>,
    pub justify_content: Option<String>,
    pub align_items: Option<String>,
    pub gap: Option<Length>,
    pub grow: Option<f64>,
    pub shrink: Option<f64>,
    pub basis: Option<Length>,
}

impl Flex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn direction(mut self, direction: FlexDirection) -> Self {
        self.direction = Some(direction);
        self
    }

    pub fn wrap(mut self, wrap: bool) -> Self {
        self.wrap = Some(wrap);
        self
    }

    pub fn justify_content(mut self, value: &str) -> Self {
        self.justify_content = Some(value.to_owned());
        self
    }

    pub fn align_items(mut self, value: &str) -> Self {
        self.align_items = Some(value.to_owned());
        self
    }

    pub fn gap(mut self, value: impl Into<Length>) -> Self {
        self.gap = Some(value.into());
        self
    }

    pub fn grow(mut self, value: f64) -> Self {
        self.grow = Some(value);
        self
    }

    pub fn shrink(mut self, value: f64) -> Self {
        self.shrink = Some(value);
        self
    }

    pub fn basis(mut self, value: impl Into<Length>) -> Self {
        self.basis = Some(value.into());
        self
    }
}

/// Layout property set.
#[derive(Debug, Clone, Default)]
pub struct LayoutProps {
    pub padding: Option<Edges>,
    pub margin: Option<Edges>,
    pub frame: Option<Frame>,
    /// Relative displacement `(x, y)`.
    pub offset: Option<(Length, Length)>,
    pub position: Option<Position>,
    /// `top`/`right`/`bottom`/`left`.
    pub insets: Option<Edges>,
    pub z_index: Option<Reactive<i32>>,
    pub display: Option<String>,
    pub flex: Option<Flex>,
}

fn apply_edges(
    scope: &mut ApplyScope<'_>,
    property: &str,
    edges: &Edges,
    allow_negative: bool,
) -> Result<(), ApplyError> {
    for (side, len) in edges.sides() {
        ensure_length(property, side, &len, allow_negative)?;
    }
    match edges.uniform() {
        Some(len) => scope.set_style(property, len.to_string()),
        None => {
            for (side, len) in edges.sides() {
                scope.set_style(&format!("{property}{side}"), len.to_string());
            }
        }
    }
    Ok(())
}

impl ApplyModifier for LayoutProps {
    fn apply(&self, scope: &mut ApplyScope<'_>) -> ApplyResult {
        if let Some(display) = &self.display {
            scope.set_style("display", display.as_str());
        }
        if let Some(position) = self.position {
            scope.set_style("position", position.as_str());
        }
        if let Some(insets) = &self.insets {
            for (side, len) in insets.sides() {
                ensure_length("position", side, &len, true)?;
                scope.set_style(&side.to_ascii_lowercase(), len.to_string());
            }
        }
        if let Some((x, y)) = &self.offset {
            ensure_length("offset", "x", x, true)?;
            ensure_length("offset", "y", y, true)?;
            if self.position.is_none() {
                scope.set_style("position", Position::Relative.as_str());
            }
            scope.set_style("left", x.to_string());
            scope.set_style("top", y.to_string());
        }
        if let Some(z) = &self.z_index {
            scope.set_style("zIndex", z.get().to_string());
        }
        if let Some(frame) = &self.frame {
            for (property, len) in frame.entries() {
                if let Some(len) = len {
                    ensure_length("frame", property, &len, false)?;
                    scope.set_style(property, len.to_string());
                }
            }
        }
        if let Some(flex) = &self.flex {
            apply_flex(scope, flex)?;
        }
        if let Some(margin) = &self.margin {
            apply_edges(scope, "margin", margin, true)?;
        }
        if let Some(padding) = &self.padding {
            apply_edges(scope, "padding", padding, false)?;
        }
        Ok(None)
    }
}

fn apply_flex(scope: &mut ApplyScope<'_>, flex: &Flex) -> Result<(), ApplyError> {
    if let Some(direction) = flex.direction {
        scope.set_style("flexDirection", direction.as_str());
    }
    if let Some(wrap) = flex.wrap {
        scope.set_style("flexWrap", if wrap { "wrap" } else { "nowrap" });
    }
    if let Some(justify) = &flex.justify_content {
        scope.set_style("justifyContent", justify.as_str());
    }
    if let Some(align) = &flex.align_items {
        scope.set_style("alignItems", align.as_str());
    }
    if let Some(gap) = &flex.gap {
        ensure_length("flex", "gap", gap, false)?;
        scope.set_style("gap", gap.to_string());
    }
    if let Some(grow) = flex.grow {
        ensure_finite("flex", "grow", grow)?;
        scope.set_style("flexGrow", crate::css::value::format_number(grow));
    }
    if let Some(shrink) = flex.shrink {
        ensure_finite("flex", "shrink", shrink)?;
        scope.set_style("flexShrink", crate::css::value::format_number(shrink));
    }
    if let Some(basis) = &flex.basis {
        ensure_length("flex", "basis", basis, false)?;
        scope.set_style("flexBasis", basis.to_string());
    }
    Ok(())
}

fn layout(name: &str, props: LayoutProps) -> Modifier {
    Modifier::new(name, ModifierProps::Layout(props))
}

/// Inner spacing. A uniform value sets the `padding` shorthand, otherwise
/// each set side is written separately.
pub fn padding(edges: impl Into<Edges>) -> Modifier {
    layout(
        "padding",
        LayoutProps {
            padding: Some(edges.into()),
            ..Default::default()
        },
    )
}

/// Outer spacing, same shorthand rule as [`padding`].
pub fn margin(edges: impl Into<Edges>) -> Modifier {
    layout(
        "margin",
        LayoutProps {
            margin: Some(edges.into()),
            ..Default::default()
        },
    )
}

pub fn frame(frame: Frame) -> Modifier {
    layout(
        "frame",
        LayoutProps {
            frame: Some(frame),
            ..Default::default()
        },
    )
}

/// Shift the element relative to its normal position.
pub fn offset(x: impl Into<Length>, y: impl Into<Length>) -> Modifier {
    layout(
        "offset",
        LayoutProps {
            offset: Some((x.into(), y.into())),
            ..Default::default()
        },
    )
}

pub fn position(position: Position, insets: Edges) -> Modifier {
    layout(
        "position",
        LayoutProps {
            position: Some(position),
            insets: (!insets.is_empty()).then_some(insets),
            ..Default::default()
        },
    )
}

pub fn z_index(z: impl Into<Reactive<i32>>) -> Modifier {
    layout(
        "zIndex",
        LayoutProps {
            z_index: Some(z.into()),
            ..Default::default()
        },
    )
}

pub fn display(value: &str) -> Modifier {
    layout(
        "display",
        LayoutProps {
            display: Some(value.to_owned()),
            ..Default::default()
        },
    )
}

/// Flex settings. Sets `display: flex` when a direction is given.
pub fn flex(flex: Flex) -> Modifier {
    let display = flex.direction.map(|_| "flex".to_owned());
    layout(
        "flex",
        LayoutProps {
            display,
            flex: Some(flex),
            ..Default::default()
        },
    )
}
