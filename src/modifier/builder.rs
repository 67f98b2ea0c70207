//! Fluent modifier chains bound to one component.
//!
//! ```
//! use mantle::prelude::*;
//!
//! let card = Text::new("Hello")
//!     .modifiers()
//!     .padding(16)
//!     .background_color("white")
//!     .corner_radius(8)
//!     .build();
//! assert_eq!(card.modifier_list().len(), 3);
//! ```
//!
//! Names without a typed method go through [`ModifierBuilder::modifier`],
//! which resolves them in the builder's registry. Reusing a builder after
//! [`build`](ModifierBuilder::build) is unsupported; build again only to pick
//! up a plugin that registered late.

use std::fmt;
use std::rc::Rc;

use thiserror::Error;
use tracing::debug;

use crate::component::{Component, ModifiableComponent};
use crate::css::{Angle, Edges, Length};
use crate::reactive::Reactive;

use super::kinds::{
    accessibility, appearance, custom, filter, interaction, layout, transform, transition,
    typography, Animation, Border, Flex, Font, FontWeight, Frame, HoverEffect, Position, Shadow,
    TextAlign, TransformProps, Transition,
};
use super::lazy::{expected_package, LazyModifier, LazyPolicy};
use super::registry::{FactoryError, ModifierArgs, ModifierRegistry};
use super::{ApplyResult, ApplyScope, Modifier, ModifierProps};

/// Error from a dynamic [`ModifierBuilder::modifier`] call.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BuildError {
    #[error("modifier `{name}` is not registered; install the `{package}` plugin to use it")]
    MissingModifier { name: String, package: &'static str },

    #[error("invalid arguments for modifier `{name}`: {source}")]
    Factory {
        name: String,
        #[source]
        source: FactoryError,
    },
}

/// Start a modifier chain on `component`.
pub fn modifiers(component: impl Component + 'static) -> ModifierBuilder {
    ModifierBuilder::new(Rc::new(component))
}

enum Target {
    Plain(Rc<dyn Component>),
    Modifiable(ModifiableComponent),
}

/// Accumulates modifiers for one component.
pub struct ModifierBuilder {
    target: Target,
    registry: ModifierRegistry,
    lazy: LazyPolicy,
    modifiers: Vec<Modifier>,
}

impl ModifierBuilder {
    /// Start a chain on `component`, resolving names in the thread's default
    /// registry.
    pub fn new(component: Rc<dyn Component>) -> Self {
        let target = match component.as_modifiable() {
            Some(modifiable) => Target::Modifiable(modifiable.clone()),
            None => Target::Plain(component),
        };
        Self {
            target,
            registry: ModifierRegistry::global(),
            lazy: LazyPolicy::default(),
            modifiers: Vec::new(),
        }
    }

    /// Start a chain that appends to an existing modifiable component.
    pub fn for_component(component: &ModifiableComponent) -> Self {
        Self {
            target: Target::Modifiable(component.clone()),
            registry: ModifierRegistry::global(),
            lazy: LazyPolicy::default(),
            modifiers: Vec::new(),
        }
    }

    /// Resolve dynamic names in `registry` instead of the default one.
    pub fn with_registry(mut self, registry: ModifierRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn with_lazy_policy(mut self, policy: LazyPolicy) -> Self {
        self.lazy = policy;
        self
    }

    /// Append a modifier in place.
    pub fn push(&mut self, modifier: Modifier) -> &mut Self {
        self.modifiers.push(modifier);
        self
    }

    /// Append a modifier.
    pub fn with(mut self, modifier: Modifier) -> Self {
        self.push(modifier);
        self
    }

    /// Modifiers accumulated so far.
    pub fn modifiers(&self) -> &[Modifier] {
        &self.modifiers
    }

    /// Append the modifier registered as `name`.
    ///
    /// If nothing is registered under `name`, an allow-listed name on an
    /// unsealed registry becomes a lazy modifier resolved at apply time; any
    /// other name fails with [`BuildError::MissingModifier`].
    pub fn modifier(self, name: &str, args: impl Into<ModifierArgs>) -> Result<Self, BuildError> {
        let args = args.into();
        match self.registry.resolve(name, &args) {
            Some(Ok(modifier)) => Ok(self.with(modifier)),
            Some(Err(source)) => Err(BuildError::Factory {
                name: name.to_owned(),
                source,
            }),
            None if self.lazy.allows(name, &self.registry) => {
                debug!(name, "modifier not registered yet; deferring to apply time");
                let lazy = LazyModifier::new(name, args, self.registry.clone());
                Ok(self.with(Modifier::new(name, ModifierProps::Lazy(lazy))))
            }
            None => Err(BuildError::MissingModifier {
                name: name.to_owned(),
                package: expected_package(name),
            }),
        }
    }

    /// Attach the accumulated modifiers to the component and return it.
    ///
    /// The first call wraps a plain component. Later calls append only
    /// modifiers the component does not already hold.
    pub fn build(&mut self) -> ModifiableComponent {
        let component = match &self.target {
            Target::Modifiable(component) => component.clone(),
            Target::Plain(plain) => {
                let component = ModifiableComponent::new(Rc::clone(plain));
                self.target = Target::Modifiable(component.clone());
                component
            }
        };
        component.append(self.modifiers.iter().cloned());
        component
    }

    // -- layout -------------------------------------------------------------

    pub fn padding(self, edges: impl Into<Edges>) -> Self {
        self.with(layout::padding(edges))
    }

    pub fn margin(self, edges: impl Into<Edges>) -> Self {
        self.with(layout::margin(edges))
    }

    pub fn frame(self, frame: Frame) -> Self {
        self.with(layout::frame(frame))
    }

    pub fn offset(self, x: impl Into<Length>, y: impl Into<Length>) -> Self {
        self.with(layout::offset(x, y))
    }

    pub fn position(self, position: Position, insets: Edges) -> Self {
        self.with(layout::position(position, insets))
    }

    pub fn z_index(self, z: impl Into<Reactive<i32>>) -> Self {
        self.with(layout::z_index(z))
    }

    pub fn display(self, value: &str) -> Self {
        self.with(layout::display(value))
    }

    pub fn flex(self, flex: Flex) -> Self {
        self.with(layout::flex(flex))
    }

    // -- appearance ---------------------------------------------------------

    pub fn foreground_color(self, color: impl Into<Reactive<String>>) -> Self {
        self.with(appearance::foreground_color(color))
    }

    pub fn background_color(self, color: impl Into<Reactive<String>>) -> Self {
        self.with(appearance::background_color(color))
    }

    pub fn opacity(self, value: impl Into<Reactive<f64>>) -> Self {
        self.with(appearance::opacity(value))
    }

    pub fn corner_radius(self, radius: impl Into<Length>) -> Self {
        self.with(appearance::corner_radius(radius))
    }

    pub fn border(self, border: Border) -> Self {
        self.with(appearance::border(border))
    }

    pub fn shadow(self, shadow: Shadow) -> Self {
        self.with(appearance::shadow(shadow))
    }

    pub fn clipped(self) -> Self {
        self.with(appearance::clipped())
    }

    // -- typography ---------------------------------------------------------

    pub fn font(self, font: Font) -> Self {
        self.with(typography::font(font))
    }

    pub fn font_size(self, size: impl Into<Length>) -> Self {
        self.with(typography::font_size(size))
    }

    pub fn font_weight(self, weight: FontWeight) -> Self {
        self.with(typography::font_weight(weight))
    }

    pub fn font_family(self, family: &str) -> Self {
        self.with(typography::font_family(family))
    }

    pub fn italic(self) -> Self {
        self.with(typography::italic())
    }

    pub fn text_align(self, align: TextAlign) -> Self {
        self.with(typography::text_align(align))
    }

    pub fn line_height(self, value: f64) -> Self {
        self.with(typography::line_height(value))
    }

    pub fn letter_spacing(self, spacing: impl Into<Length>) -> Self {
        self.with(typography::letter_spacing(spacing))
    }

    pub fn text_decoration(self, value: &str) -> Self {
        self.with(typography::text_decoration(value))
    }

    // -- transform ----------------------------------------------------------

    pub fn scale(self, factor: impl Into<Reactive<f64>>) -> Self {
        self.with(transform::scale(factor))
    }

    pub fn rotate(self, angle: impl Into<Angle>) -> Self {
        self.with(transform::rotate(angle))
    }

    pub fn translate(self, x: impl Into<Length>, y: impl Into<Length>) -> Self {
        self.with(transform::translate(x, y))
    }

    pub fn skew(self, x: impl Into<Angle>, y: impl Into<Angle>) -> Self {
        self.with(transform::skew(x, y))
    }

    pub fn transform(self, props: TransformProps) -> Self {
        self.with(transform::transform(props))
    }

    // -- filter -------------------------------------------------------------

    pub fn blur(self, radius: impl Into<Length>) -> Self {
        self.with(filter::blur(radius))
    }

    pub fn brightness(self, amount: f64) -> Self {
        self.with(filter::brightness(amount))
    }

    pub fn contrast(self, amount: f64) -> Self {
        self.with(filter::contrast(amount))
    }

    pub fn saturate(self, amount: f64) -> Self {
        self.with(filter::saturate(amount))
    }

    pub fn grayscale(self, amount: f64) -> Self {
        self.with(filter::grayscale(amount))
    }

    pub fn hue_rotate(self, angle: impl Into<Angle>) -> Self {
        self.with(filter::hue_rotate(angle))
    }

    pub fn invert(self, amount: f64) -> Self {
        self.with(filter::invert(amount))
    }

    pub fn sepia(self, amount: f64) -> Self {
        self.with(filter::sepia(amount))
    }

    pub fn drop_shadow(self, shadow: Shadow) -> Self {
        self.with(filter::drop_shadow(shadow))
    }

    // -- transition ---------------------------------------------------------

    pub fn transition(self, property: &str, duration_ms: u32) -> Self {
        self.with(transition::transition(property, duration_ms))
    }

    pub fn transition_with(self, value: Transition) -> Self {
        self.with(transition::transition_with(value))
    }

    pub fn animation(self, animation: Animation) -> Self {
        self.with(transition::animation(animation))
    }

    // -- interaction --------------------------------------------------------

    pub fn cursor(self, value: &str) -> Self {
        self.with(interaction::cursor(value))
    }

    pub fn disabled(self, value: impl Into<Reactive<bool>>) -> Self {
        self.with(interaction::disabled(value))
    }

    pub fn on_tap(self, handler: impl Fn() + 'static) -> Self {
        self.with(interaction::on_tap(handler))
    }

    pub fn hover_effect(self, effect: HoverEffect) -> Self {
        self.with(interaction::hover_effect(effect))
    }

    // -- accessibility ------------------------------------------------------

    pub fn aria_label(self, label: impl Into<Reactive<String>>) -> Self {
        self.with(accessibility::aria_label(label))
    }

    pub fn aria_hidden(self, hidden: bool) -> Self {
        self.with(accessibility::aria_hidden(hidden))
    }

    pub fn role(self, role: &str) -> Self {
        self.with(accessibility::role(role))
    }

    pub fn tab_index(self, index: i32) -> Self {
        self.with(accessibility::tab_index(index))
    }

    pub fn aria(self, name: &str, value: &str) -> Self {
        self.with(accessibility::aria(name, value))
    }

    // -- custom -------------------------------------------------------------

    pub fn css_var(self, name: &str, value: impl Into<Reactive<String>>) -> Self {
        self.with(custom::css_var(name, value))
    }

    pub fn class(self, name: &str) -> Self {
        self.with(custom::class(name))
    }

    pub fn attribute(self, name: &str, value: impl Into<Reactive<String>>) -> Self {
        self.with(custom::attribute(name, value))
    }

    pub fn custom(
        self,
        kind: &str,
        apply: impl Fn(&mut ApplyScope<'_>) -> ApplyResult + 'static,
    ) -> Self {
        self.with(custom::custom(kind, apply))
    }
}

impl fmt::Debug for ModifierBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (state, id) = match &self.target {
            Target::Plain(c) => ("plain", c.id().to_owned()),
            Target::Modifiable(c) => ("modifiable", c.id().to_owned()),
        };
        f.debug_struct("ModifierBuilder")
            .field("component", &id)
            .field("target", &state)
            .field("modifiers", &self.modifiers)
            .finish_non_exhaustive()
    }
}
