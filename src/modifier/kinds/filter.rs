//! Filter modifiers. Each writes the full `filter` property, functions in a
//! fixed order: blur, brightness, contrast, grayscale, hue-rotate, invert,
//! saturate, sepia, drop-shadow.

use crate::css::value::format_number;
use crate::css::{Angle, Length};
use crate::modifier::{ApplyError, ApplyModifier, ApplyResult, ApplyScope, Modifier, ModifierProps};

use super::appearance::Shadow;
use super::{ensure_length, ensure_range};

/// Filter property set.
#[derive(Debug, Clone, Default)]
pub struct FilterProps {
    pub blur: Option<Length>,
    pub brightness: Option<f64>,
    pub contrast: Option<f64>,
    pub grayscale: Option<f64>,
    pub hue_rotate: Option<Angle>,
    pub invert: Option<f64>,
    pub saturate: Option<f64>,
    pub sepia: Option<f64>,
    pub drop_shadow: Option<Shadow>,
}

impl FilterProps {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn blur(mut self, radius: impl Into<Length>) -> Self {
        self.blur = Some(radius.into());
        self
    }

    pub fn brightness(mut self, amount: f64) -> Self {
        self.brightness = Some(amount);
        self
    }

    pub fn contrast(mut self, amount: f64) -> Self {
        self.contrast = Some(amount);
        self
    }

    pub fn grayscale(mut self, amount: f64) -> Self {
        self.grayscale = Some(amount);
        self
    }

    pub fn hue_rotate(mut self, angle: impl Into<Angle>) -> Self {
        self.hue_rotate = Some(angle.into());
        self
    }

    pub fn invert(mut self, amount: f64) -> Self {
        self.invert = Some(amount);
        self
    }

    pub fn saturate(mut self, amount: f64) -> Self {
        self.saturate = Some(amount);
        self
    }

    pub fn sepia(mut self, amount: f64) -> Self {
        self.sepia = Some(amount);
        self
    }

    pub fn drop_shadow(mut self, shadow: Shadow) -> Self {
        self.drop_shadow = Some(shadow);
        self
    }

    /// The `filter` value, or `None` if no function is set.
    pub fn css(&self) -> Result<Option<String>, ApplyError> {
        let mut parts = Vec::new();
        if let Some(blur) = &self.blur {
            ensure_length("blur", "radius", blur, false)?;
            parts.push(format!("blur({blur})"));
        }
        let amounts = [
            ("brightness", self.brightness, f64::MAX),
            ("contrast", self.contrast, f64::MAX),
            ("grayscale", self.grayscale, 1.0),
        ];
        for (name, amount, max) in amounts {
            if let Some(amount) = amount {
                ensure_range(name, "amount", amount, 0.0, max)?;
                parts.push(format!("{name}({})", format_number(amount)));
            }
        }
        if let Some(angle) = &self.hue_rotate {
            if !angle.is_finite() {
                return Err(ApplyError::invalid("hueRotate", "angle is not finite"));
            }
            parts.push(format!("hue-rotate({angle})"));
        }
        let amounts = [
            ("invert", self.invert, 1.0),
            ("saturate", self.saturate, f64::MAX),
            ("sepia", self.sepia, 1.0),
        ];
        for (name, amount, max) in amounts {
            if let Some(amount) = amount {
                ensure_range(name, "amount", amount, 0.0, max)?;
                parts.push(format!("{name}({})", format_number(amount)));
            }
        }
        if let Some(shadow) = &self.drop_shadow {
            shadow.validate("dropShadow")?;
            parts.push(format!("drop-shadow({})", shadow.drop_shadow_css()));
        }
        Ok((!parts.is_empty()).then(|| parts.join(" ")))
    }
}

impl ApplyModifier for FilterProps {
    fn apply(&self, scope: &mut ApplyScope<'_>) -> ApplyResult {
        if let Some(value) = self.css()? {
            scope.set_style("filter", value);
        }
        Ok(None)
    }
}

fn filter_named(name: &str, props: FilterProps) -> Modifier {
    Modifier::new(name, ModifierProps::Filter(props))
}

pub fn filter(props: FilterProps) -> Modifier {
    filter_named("filter", props)
}

pub fn blur(radius: impl Into<Length>) -> Modifier {
    filter_named("blur", FilterProps::new().blur(radius))
}

pub fn brightness(amount: f64) -> Modifier {
    filter_named("brightness", FilterProps::new().brightness(amount))
}

pub fn contrast(amount: f64) -> Modifier {
    filter_named("contrast", FilterProps::new().contrast(amount))
}

/// `0.0` leaves colors alone, `1.0` is fully gray.
pub fn grayscale(amount: f64) -> Modifier {
    filter_named("grayscale", FilterProps::new().grayscale(amount))
}

pub fn hue_rotate(angle: impl Into<Angle>) -> Modifier {
    filter_named("hueRotate", FilterProps::new().hue_rotate(angle))
}

pub fn invert(amount: f64) -> Modifier {
    filter_named("invert", FilterProps::new().invert(amount))
}

pub fn saturate(amount: f64) -> Modifier {
    filter_named("saturate", FilterProps::new().saturate(amount))
}

pub fn sepia(amount: f64) -> Modifier {
    filter_named("sepia", FilterProps::new().sepia(amount))
}

pub fn drop_shadow(shadow: Shadow) -> Modifier {
    filter_named("dropShadow", FilterProps::new().drop_shadow(shadow))
}
