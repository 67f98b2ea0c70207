//! Transition and animation modifiers. Writes `transition` and `animation`.

use std::fmt;

use crate::css::value::format_number;
use crate::modifier::{ApplyModifier, ApplyResult, ApplyScope, Modifier, ModifierProps};

use super::ensure_non_empty;

/// Timing function.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Easing {
    Linear,
    Ease,
    EaseIn,
    EaseOut,
    EaseInOut,
    CubicBezier(f64, f64, f64, f64),
    Steps(u32),
}

impl Easing {
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "linear" => Some(Easing::Linear),
            "ease" => Some(Easing::Ease),
            "ease-in" | "easeIn" => Some(Easing::EaseIn),
            "ease-out" | "easeOut" => Some(Easing::EaseOut),
            "ease-in-out" | "easeInOut" => Some(Easing::EaseInOut),
            _ => None,
        }
    }
}

impl fmt::Display for Easing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Easing::Linear => f.write_str("linear"),
            Easing::Ease => f.write_str("ease"),
            Easing::EaseIn => f.write_str("ease-in"),
            Easing::EaseOut => f.write_str("ease-out"),
            Easing::EaseInOut => f.write_str("ease-in-out"),
            Easing::CubicBezier(a, b, c, d) => write!(
                f,
                "cubic-bezier({}, {}, {}, {})",
                format_number(*a),
                format_number(*b),
                format_number(*c),
                format_number(*d)
            ),
            Easing::Steps(n) => write!(f, "steps({n})"),
        }
    }
}

/// `{property} {duration}ms {easing}[ {delay}ms]`
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub property: String,
    pub duration_ms: u32,
    pub easing: Easing,
    pub delay_ms: u32,
}

impl Transition {
    pub fn new(property: &str, duration_ms: u32) -> Self {
        Self {
            property: property.to_owned(),
            duration_ms,
            easing: Easing::Ease,
            delay_ms: 0,
        }
    }

    pub fn easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn delay(mut self, delay_ms: u32) -> Self {
        self.delay_ms = delay_ms;
        self
    }
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}ms {}", self.property, self.duration_ms, self.easing)?;
        if self.delay_ms > 0 {
            write!(f, " {}ms", self.delay_ms)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Iterations {
    Count(u32),
    Infinite,
}

/// A keyframe animation reference.
#[derive(Debug, Clone, PartialEq)]
pub struct Animation {
    pub name: String,
    pub duration_ms: u32,
    pub easing: Easing,
    pub delay_ms: u32,
    pub iterations: Iterations,
    pub alternate: bool,
}

impl Animation {
    pub fn new(name: &str, duration_ms: u32) -> Self {
        Self {
            name: name.to_owned(),
            duration_ms,
            easing: Easing::Ease,
            delay_ms: 0,
            iterations: Iterations::Count(1),
            alternate: false,
        }
    }

    pub fn easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn delay(mut self, delay_ms: u32) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    pub fn repeat(mut self, iterations: Iterations) -> Self {
        self.iterations = iterations;
        self
    }

    pub fn alternate(mut self) -> Self {
        self.alternate = true;
        self
    }
}

impl fmt::Display for Animation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}ms {}", self.name, self.duration_ms, self.easing)?;
        if self.delay_ms > 0 {
            write!(f, " {}ms", self.delay_ms)?;
        }
        match self.iterations {
            Iterations::Count(1) => {}
            Iterations::Count(n) => write!(f, " {n}")?,
            Iterations::Infinite => f.write_str(" infinite")?,
        }
        if self.alternate {
            f.write_str(" alternate")?;
        }
        Ok(())
    }
}

/// Transition property set.
#[derive(Debug, Clone, Default)]
pub struct TransitionProps {
    pub transition: Option<Transition>,
    pub animation: Option<Animation>,
}

impl ApplyModifier for TransitionProps {
    fn apply(&self, scope: &mut ApplyScope<'_>) -> ApplyResult {
        if let Some(transition) = &self.transition {
            ensure_non_empty("transition", "property", &transition.property)?;
            scope.set_style("transition", transition.to_string());
        }
        if let Some(animation) = &self.animation {
            ensure_non_empty("animation", "name", &animation.name)?;
            scope.set_style("animation", animation.to_string());
        }
        Ok(None)
    }
}

/// Animate changes to `property` over `duration_ms` with the default easing.
pub fn transition(property: &str, duration_ms: u32) -> Modifier {
    transition_with(Transition::new(property, duration_ms))
}

pub fn transition_with(transition: Transition) -> Modifier {
    Modifier::new(
        "transition",
        ModifierProps::Transition(TransitionProps {
            transition: Some(transition),
            animation: None,
        }),
    )
}

pub fn animation(animation: Animation) -> Modifier {
    Modifier::new(
        "animation",
        ModifierProps::Transition(TransitionProps {
            transition: None,
            animation: Some(animation),
        }),
    )
}
