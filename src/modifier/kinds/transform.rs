//! Transform modifiers.
//!
//! Every transform modifier writes the whole `transform` property (and
//! `transformOrigin` when set), so separate `scale`/`rotate` modifiers do not
//! compose: the later one wins, as in CSS. Use [`transform`] with a combined
//! [`TransformProps`] to stack functions. Functions are always emitted in the
//! order scale, rotate, translate, skew.

use crate::css::value::format_number;
use crate::css::{Angle, Length};
use crate::modifier::{ApplyError, ApplyModifier, ApplyResult, ApplyScope, Modifier, ModifierProps};
use crate::reactive::Reactive;

use super::{ensure_finite, ensure_length};

/// A 2D or 3D translation. A missing `z` is written as `0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Translate {
    pub x: Length,
    pub y: Length,
    pub z: Option<Length>,
}

/// Transform property set.
#[derive(Debug, Clone, Default)]
pub struct TransformProps {
    pub scale: Option<Reactive<f64>>,
    pub rotate: Option<Angle>,
    pub translate: Option<Translate>,
    pub skew: Option<(Angle, Angle)>,
    pub origin: Option<String>,
}

impl TransformProps {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scale(mut self, factor: impl Into<Reactive<f64>>) -> Self {
        self.scale = Some(factor.into());
        self
    }

    pub fn rotate(mut self, angle: impl Into<Angle>) -> Self {
        self.rotate = Some(angle.into());
        self
    }

    pub fn translate(mut self, x: impl Into<Length>, y: impl Into<Length>) -> Self {
        self.translate = Some(Translate {
            x: x.into(),
            y: y.into(),
            z: None,
        });
        self
    }

    pub fn translate3d(
        mut self,
        x: impl Into<Length>,
        y: impl Into<Length>,
        z: impl Into<Length>,
    ) -> Self {
        self.translate = Some(Translate {
            x: x.into(),
            y: y.into(),
            z: Some(z.into()),
        });
        self
    }

    pub fn skew(mut self, x: impl Into<Angle>, y: impl Into<Angle>) -> Self {
        self.skew = Some((x.into(), y.into()));
        self
    }

    pub fn origin(mut self, origin: &str) -> Self {
        self.origin = Some(origin.to_owned());
        self
    }

    /// The `transform` value, or `None` if no function is set.
    pub fn css(&self) -> Result<Option<String>, ApplyError> {
        let mut parts = Vec::new();
        if let Some(scale) = &self.scale {
            let scale = scale.get();
            ensure_finite("scale", "factor", scale)?;
            parts.push(format!("scale({})", format_number(scale)));
        }
        if let Some(angle) = &self.rotate {
            ensure_angle("rotate", angle)?;
            parts.push(format!("rotate({angle})"));
        }
        if let Some(t) = &self.translate {
            ensure_length("translate", "x", &t.x, true)?;
            ensure_length("translate", "y", &t.y, true)?;
            let z = match &t.z {
                Some(z) => {
                    ensure_length("translate", "z", z, true)?;
                    z.to_string()
                }
                None => "0".to_owned(),
            };
            parts.push(format!("translate3d({}, {}, {z})", t.x, t.y));
        }
        if let Some((x, y)) = &self.skew {
            ensure_angle("skew", x)?;
            ensure_angle("skew", y)?;
            parts.push(format!("skew({x}, {y})"));
        }
        Ok((!parts.is_empty()).then(|| parts.join(" ")))
    }
}

fn ensure_angle(modifier: &str, angle: &Angle) -> Result<(), ApplyError> {
    if angle.is_finite() {
        Ok(())
    } else {
        Err(ApplyError::invalid(modifier, format!("angle {angle} is not finite")))
    }
}

impl ApplyModifier for TransformProps {
    fn apply(&self, scope: &mut ApplyScope<'_>) -> ApplyResult {
        if let Some(value) = self.css()? {
            scope.set_style("transform", value);
        }
        if let Some(origin) = &self.origin {
            scope.set_style("transformOrigin", origin.as_str());
        }
        Ok(None)
    }
}

fn transform_named(name: &str, props: TransformProps) -> Modifier {
    Modifier::new(name, ModifierProps::Transform(props))
}

pub fn transform(props: TransformProps) -> Modifier {
    transform_named("transform", props)
}

pub fn scale(factor: impl Into<Reactive<f64>>) -> Modifier {
    transform_named("scale", TransformProps::new().scale(factor))
}

pub fn rotate(angle: impl Into<Angle>) -> Modifier {
    transform_named("rotate", TransformProps::new().rotate(angle))
}

pub fn translate(x: impl Into<Length>, y: impl Into<Length>) -> Modifier {
    transform_named("translate", TransformProps::new().translate(x, y))
}

pub fn skew(x: impl Into<Angle>, y: impl Into<Angle>) -> Modifier {
    transform_named("skew", TransformProps::new().skew(x, y))
}
