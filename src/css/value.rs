//! Typed CSS values: lengths, per-side edge insets, angles.
//!
//! Every value renders to the exact string an element's style map stores,
//! e.g. `16px`, `50%`, `auto`, `45deg`.

use std::fmt;

/// Format a number the way style strings expect: integral values lose the
/// fractional part (`16`, not `16.0`), everything else uses the shortest
/// round-trip representation (`1.2`).
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

// ---------------------------------------------------------------------------
// Length
// ---------------------------------------------------------------------------

/// A CSS length unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Unit {
    /// CSS pixels. Bare numbers passed to modifiers are pixels.
    Px,
    /// Percentage of the containing block.
    Percent,
    /// Relative to the element's font size.
    Em,
    /// Relative to the root font size.
    Rem,
    /// Viewport width percentage.
    Vw,
    /// Viewport height percentage.
    Vh,
    /// Content-based sizing.
    Auto,
}

impl Unit {
    /// The suffix written after the number (`px`, `%`, ...). Empty for `auto`.
    pub fn suffix(self) -> &'static str {
        match self {
            Unit::Px => "px",
            Unit::Percent => "%",
            Unit::Em => "em",
            Unit::Rem => "rem",
            Unit::Vw => "vw",
            Unit::Vh => "vh",
            Unit::Auto => "",
        }
    }
}

/// A length with a unit, e.g. `16px`, `50%`, `auto`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Length {
    pub value: f64,
    pub unit: Unit,
}

impl Length {
    /// A length in pixels.
    pub fn px(value: f64) -> Self {
        Self {
            value,
            unit: Unit::Px,
        }
    }

    /// A percentage length.
    pub fn percent(value: f64) -> Self {
        Self {
            value,
            unit: Unit::Percent,
        }
    }

    /// A font-relative length.
    pub fn em(value: f64) -> Self {
        Self {
            value,
            unit: Unit::Em,
        }
    }

    /// A root-font-relative length.
    pub fn rem(value: f64) -> Self {
        Self {
            value,
            unit: Unit::Rem,
        }
    }

    /// A viewport-width length.
    pub fn vw(value: f64) -> Self {
        Self {
            value,
            unit: Unit::Vw,
        }
    }

    /// A viewport-height length.
    pub fn vh(value: f64) -> Self {
        Self {
            value,
            unit: Unit::Vh,
        }
    }

    /// The `auto` keyword.
    pub fn auto() -> Self {
        Self {
            value: 0.0,
            unit: Unit::Auto,
        }
    }

    /// Returns `true` for `auto`.
    pub fn is_auto(&self) -> bool {
        self.unit == Unit::Auto
    }

    /// Whether the numeric part is finite. `auto` is always valid.
    pub fn is_finite(&self) -> bool {
        self.is_auto() || self.value.is_finite()
    }

    /// Parse `16px`, `50%`, `1.5em`, `auto`, or a bare number (pixels).
    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        if input.eq_ignore_ascii_case("auto") {
            return Some(Self::auto());
        }
        let split = input
            .find(|c: char| !(c.is_ascii_digit() || c == '.' || c == '-' || c == '+'))
            .unwrap_or(input.len());
        let (number, suffix) = input.split_at(split);
        let value: f64 = number.parse().ok()?;
        let unit = match suffix {
            "" | "px" => Unit::Px,
            "%" => Unit::Percent,
            "em" => Unit::Em,
            "rem" => Unit::Rem,
            "vw" => Unit::Vw,
            "vh" => Unit::Vh,
            _ => return None,
        };
        Some(Self { value, unit })
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_auto() {
            return f.write_str("auto");
        }
        write!(f, "{}{}", format_number(self.value), self.unit.suffix())
    }
}

impl From<i32> for Length {
    fn from(value: i32) -> Self {
        Self::px(f64::from(value))
    }
}

impl From<f64> for Length {
    fn from(value: f64) -> Self {
        Self::px(value)
    }
}

impl From<f32> for Length {
    fn from(value: f32) -> Self {
        Self::px(f64::from(value))
    }
}

// ---------------------------------------------------------------------------
// Edges
// ---------------------------------------------------------------------------

/// Per-side insets for margin/padding. Unset sides are left untouched when
/// applied.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Edges {
    pub top: Option<Length>,
    pub right: Option<Length>,
    pub bottom: Option<Length>,
    pub left: Option<Length>,
}

impl Edges {
    /// The same length on all four sides.
    pub fn all(value: impl Into<Length>) -> Self {
        let v = value.into();
        Self {
            top: Some(v),
            right: Some(v),
            bottom: Some(v),
            left: Some(v),
        }
    }

    /// Vertical (top/bottom) and horizontal (left/right) values.
    pub fn symmetric(vertical: impl Into<Length>, horizontal: impl Into<Length>) -> Self {
        let (v, h) = (vertical.into(), horizontal.into());
        Self {
            top: Some(v),
            right: Some(h),
            bottom: Some(v),
            left: Some(h),
        }
    }

    /// Only the left and right sides.
    pub fn horizontal(value: impl Into<Length>) -> Self {
        let v = value.into();
        Self {
            left: Some(v),
            right: Some(v),
            ..Self::default()
        }
    }

    /// Only the top and bottom sides.
    pub fn vertical(value: impl Into<Length>) -> Self {
        let v = value.into();
        Self {
            top: Some(v),
            bottom: Some(v),
            ..Self::default()
        }
    }

    /// Explicit values for all four sides.
    pub fn new(
        top: impl Into<Length>,
        right: impl Into<Length>,
        bottom: impl Into<Length>,
        left: impl Into<Length>,
    ) -> Self {
        Self {
            top: Some(top.into()),
            right: Some(right.into()),
            bottom: Some(bottom.into()),
            left: Some(left.into()),
        }
    }

    /// Set the top side (builder).
    pub fn with_top(mut self, value: impl Into<Length>) -> Self {
        self.top = Some(value.into());
        self
    }

    /// Set the right side (builder).
    pub fn with_right(mut self, value: impl Into<Length>) -> Self {
        self.right = Some(value.into());
        self
    }

    /// Set the bottom side (builder).
    pub fn with_bottom(mut self, value: impl Into<Length>) -> Self {
        self.bottom = Some(value.into());
        self
    }

    /// Set the left side (builder).
    pub fn with_left(mut self, value: impl Into<Length>) -> Self {
        self.left = Some(value.into());
        self
    }

    /// If all four sides are set to the same length, return it.
    pub fn uniform(&self) -> Option<Length> {
        match (self.top, self.right, self.bottom, self.left) {
            (Some(t), Some(r), Some(b), Some(l)) if t == r && r == b && b == l => Some(t),
            _ => None,
        }
    }

    /// Whether no side is set.
    pub fn is_empty(&self) -> bool {
        self.top.is_none() && self.right.is_none() && self.bottom.is_none() && self.left.is_none()
    }

    /// Iterate `(side suffix, length)` for the sides that are set, in
    /// top/right/bottom/left order.
    pub fn sides(&self) -> impl Iterator<Item = (&'static str, Length)> {
        [
            ("Top", self.top),
            ("Right", self.right),
            ("Bottom", self.bottom),
            ("Left", self.left),
        ]
        .into_iter()
        .filter_map(|(side, len)| len.map(|l| (side, l)))
    }
}

impl From<i32> for Edges {
    fn from(value: i32) -> Self {
        Self::all(value)
    }
}

impl From<f64> for Edges {
    fn from(value: f64) -> Self {
        Self::all(value)
    }
}

impl From<Length> for Edges {
    fn from(value: Length) -> Self {
        Self::all(value)
    }
}

// ---------------------------------------------------------------------------
// Angle
// ---------------------------------------------------------------------------

/// A CSS angle. Bare numbers are degrees.
#[derive(Debug, Clone, PartialEq)]
pub enum Angle {
    Deg(f64),
    Rad(f64),
    Turn(f64),
    /// An angle string that could not be parsed; written through verbatim.
    Raw(String),
}

impl Angle {
    /// Parse `45deg`, `0.5turn`, `1.2rad` or a bare number of degrees.
    pub fn parse(input: &str) -> Self {
        let input = input.trim();
        let parsed = if let Some(n) = input.strip_suffix("deg") {
            n.trim().parse().ok().map(Angle::Deg)
        } else if let Some(n) = input.strip_suffix("turn") {
            n.trim().parse().ok().map(Angle::Turn)
        } else if let Some(n) = input.strip_suffix("rad") {
            n.trim().parse().ok().map(Angle::Rad)
        } else {
            input.parse().ok().map(Angle::Deg)
        };
        parsed.unwrap_or_else(|| Angle::Raw(input.to_owned()))
    }

    /// Whether the numeric part (if any) is finite.
    pub fn is_finite(&self) -> bool {
        match self {
            Angle::Deg(v) | Angle::Rad(v) | Angle::Turn(v) => v.is_finite(),
            Angle::Raw(_) => true,
        }
    }
}

impl fmt::Display for Angle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Angle::Deg(v) => write!(f, "{}deg", format_number(*v)),
            Angle::Rad(v) => write!(f, "{}rad", format_number(*v)),
            Angle::Turn(v) => write!(f, "{}turn", format_number(*v)),
            Angle::Raw(s) => f.write_str(s),
        }
    }
}

impl From<f64> for Angle {
    fn from(value: f64) -> Self {
        Angle::Deg(value)
    }
}

impl From<i32> for Angle {
    fn from(value: i32) -> Self {
        Angle::Deg(f64::from(value))
    }
}

impl From<&str> for Angle {
    fn from(value: &str) -> Self {
        Angle::parse(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_integral_and_fractional() {
        assert_eq!(format_number(16.0), "16");
        assert_eq!(format_number(1.2), "1.2");
        assert_eq!(format_number(-4.0), "-4");
        assert_eq!(format_number(0.0), "0");
    }

    #[test]
    fn length_display() {
        assert_eq!(Length::px(16.0).to_string(), "16px");
        assert_eq!(Length::px(2.5).to_string(), "2.5px");
        assert_eq!(Length::percent(50.0).to_string(), "50%");
        assert_eq!(Length::em(1.5).to_string(), "1.5em");
        assert_eq!(Length::rem(2.0).to_string(), "2rem");
        assert_eq!(Length::vw(100.0).to_string(), "100vw");
        assert_eq!(Length::vh(80.0).to_string(), "80vh");
        assert_eq!(Length::auto().to_string(), "auto");
    }

    #[test]
    fn length_from_numbers_is_pixels() {
        assert_eq!(Length::from(8), Length::px(8.0));
        assert_eq!(Length::from(1.5), Length::px(1.5));
    }

    #[test]
    fn length_parse() {
        assert_eq!(Length::parse("16px"), Some(Length::px(16.0)));
        assert_eq!(Length::parse("16"), Some(Length::px(16.0)));
        assert_eq!(Length::parse(" 50% "), Some(Length::percent(50.0)));
        assert_eq!(Length::parse("-1.5rem"), Some(Length::rem(-1.5)));
        assert_eq!(Length::parse("AUTO"), Some(Length::auto()));
        assert_eq!(Length::parse("12parsecs"), None);
        assert_eq!(Length::parse("px"), None);
    }

    #[test]
    fn length_finite() {
        assert!(Length::auto().is_finite());
        assert!(Length::px(3.0).is_finite());
        assert!(!Length::px(f64::NAN).is_finite());
    }

    #[test]
    fn edges_all_is_uniform() {
        let e = Edges::all(16);
        assert_eq!(e.uniform(), Some(Length::px(16.0)));
        assert!(!e.is_empty());
    }

    #[test]
    fn edges_partial_sides() {
        let e = Edges::default().with_top(8).with_bottom(16);
        assert_eq!(e.uniform(), None);
        let sides: Vec<_> = e.sides().collect();
        assert_eq!(
            sides,
            vec![("Top", Length::px(8.0)), ("Bottom", Length::px(16.0))]
        );
    }

    #[test]
    fn edges_symmetric_and_axes() {
        let e = Edges::symmetric(4, 8);
        assert_eq!(e.top, Some(Length::px(4.0)));
        assert_eq!(e.left, Some(Length::px(8.0)));
        let h = Edges::horizontal(2);
        assert!(h.top.is_none());
        assert_eq!(h.right, Some(Length::px(2.0)));
        let v = Edges::vertical(Length::percent(5.0));
        assert_eq!(v.bottom, Some(Length::percent(5.0)));
        assert!(v.left.is_none());
    }

    #[test]
    fn edges_default_is_empty() {
        assert!(Edges::default().is_empty());
    }

    #[test]
    fn angle_parse_and_display() {
        assert_eq!(Angle::parse("45deg"), Angle::Deg(45.0));
        assert_eq!(Angle::parse("0.5turn").to_string(), "0.5turn");
        assert_eq!(Angle::parse("1.2rad").to_string(), "1.2rad");
        assert_eq!(Angle::parse("90").to_string(), "90deg");
        assert_eq!(Angle::from("calc(1deg + 2deg)").to_string(), "calc(1deg + 2deg)");
        assert_eq!(Angle::from(30).to_string(), "30deg");
    }
}
