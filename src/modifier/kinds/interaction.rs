//! Interaction modifiers: cursor, disabled state, tap handlers, hover effects.
//!
//! At apply time these write only `cursor`, `pointerEvents` and the
//! `disabled` attribute. Tap and hover behavior is installed as element
//! listeners that are removed when the node is disposed. Hover effects touch
//! other properties, but only while the pointer is over the element, and
//! restore the previous values on `mouseleave`.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::css::value::format_number;
use crate::dom::{Dom, Event, NodeId};
use crate::modifier::{ApplyModifier, ApplyResult, ApplyScope, Modifier, ModifierProps};
use crate::reactive::Reactive;

use super::{ensure_finite, ensure_non_empty, ensure_range};

/// Callback run on click.
pub type TapHandler = Rc<dyn Fn()>;

/// Styles swapped in while the pointer hovers the element.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HoverEffect {
    pub scale: Option<f64>,
    pub opacity: Option<f64>,
    pub background_color: Option<String>,
    pub foreground_color: Option<String>,
}

impl HoverEffect {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scale(mut self, factor: f64) -> Self {
        self.scale = Some(factor);
        self
    }

    pub fn opacity(mut self, value: f64) -> Self {
        self.opacity = Some(value);
        self
    }

    pub fn background_color(mut self, color: &str) -> Self {
        self.background_color = Some(color.to_owned());
        self
    }

    pub fn foreground_color(mut self, color: &str) -> Self {
        self.foreground_color = Some(color.to_owned());
        self
    }

    fn validate(&self) -> Result<(), crate::modifier::ApplyError> {
        if let Some(scale) = self.scale {
            ensure_finite("hoverEffect", "scale", scale)?;
        }
        if let Some(opacity) = self.opacity {
            ensure_range("hoverEffect", "opacity", opacity, 0.0, 1.0)?;
        }
        if let Some(color) = &self.background_color {
            ensure_non_empty("hoverEffect", "backgroundColor", color)?;
        }
        if let Some(color) = &self.foreground_color {
            ensure_non_empty("hoverEffect", "foregroundColor", color)?;
        }
        Ok(())
    }

    fn styles(&self) -> Vec<(&'static str, String)> {
        let mut styles = Vec::new();
        if let Some(scale) = self.scale {
            styles.push(("transform", format!("scale({})", format_number(scale))));
        }
        if let Some(opacity) = self.opacity {
            styles.push(("opacity", format_number(opacity)));
        }
        if let Some(color) = &self.background_color {
            styles.push(("backgroundColor", color.clone()));
        }
        if let Some(color) = &self.foreground_color {
            styles.push(("color", color.clone()));
        }
        styles
    }
}

/// Interaction property set.
#[derive(Clone, Default)]
pub struct InteractionProps {
    pub cursor: Option<String>,
    pub disabled: Option<Reactive<bool>>,
    pub on_tap: Option<TapHandler>,
    pub hover: Option<HoverEffect>,
}

impl fmt::Debug for InteractionProps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InteractionProps")
            .field("cursor", &self.cursor)
            .field("disabled", &self.disabled)
            .field("on_tap", &self.on_tap.is_some())
            .field("hover", &self.hover)
            .finish()
    }
}

fn is_disabled(dom: &Dom, node: NodeId) -> bool {
    dom.get(node).is_some_and(|el| el.has_attribute("disabled"))
}

type Saved = Rc<RefCell<Vec<(&'static str, Option<String>)>>>;

fn restore(dom: &mut Dom, node: NodeId, saved: &Saved) {
    let Some(style) = dom.style_mut(node) else {
        return;
    };
    for (name, previous) in saved.borrow_mut().drain(..) {
        match previous {
            Some(value) => style.set(name, value),
            None => {
                style.remove(name);
            }
        }
    }
}

impl ApplyModifier for InteractionProps {
    fn apply(&self, scope: &mut ApplyScope<'_>) -> ApplyResult {
        if let Some(cursor) = &self.cursor {
            ensure_non_empty("cursor", "value", cursor)?;
            scope.set_style("cursor", cursor.as_str());
        }
        if let Some(disabled) = &self.disabled {
            if disabled.get() {
                scope.set_attribute("disabled", "");
                scope.set_style("pointerEvents", "none");
            } else {
                scope.remove_attribute("disabled");
                scope.remove_style("pointerEvents");
            }
        }
        if let Some(on_tap) = &self.on_tap {
            let on_tap = Rc::clone(on_tap);
            scope.on("click", move |dom: &mut Dom, event: &Event| {
                if !is_disabled(dom, event.current_target) {
                    on_tap();
                }
            });
        }
        if let Some(hover) = &self.hover {
            hover.validate()?;
            let styles = Rc::new(hover.styles());
            let saved: Saved = Rc::default();

            let (enter_styles, enter_saved) = (Rc::clone(&styles), Rc::clone(&saved));
            scope.on("mouseenter", move |dom: &mut Dom, event: &Event| {
                if is_disabled(dom, event.current_target) {
                    return;
                }
                let Some(style) = dom.style_mut(event.current_target) else {
                    return;
                };
                let mut saved = enter_saved.borrow_mut();
                if !saved.is_empty() {
                    return;
                }
                for (name, value) in enter_styles.iter() {
                    saved.push((*name, style.get(name).map(str::to_owned)));
                    style.set(name, value.as_str());
                }
            });

            let leave_saved = Rc::clone(&saved);
            scope.on("mouseleave", move |dom: &mut Dom, event: &Event| {
                restore(dom, event.current_target, &leave_saved);
            });

            // Disposal while hovered must not leave the hover styles behind.
            if let Some(element) = scope.element() {
                scope.on_cleanup(move |dom| restore(dom, element, &saved));
            }
        }
        Ok(None)
    }
}

fn interaction(name: &str, props: InteractionProps) -> Modifier {
    Modifier::new(name, ModifierProps::Interaction(props))
}

pub fn cursor(value: &str) -> Modifier {
    interaction(
        "cursor",
        InteractionProps {
            cursor: Some(value.to_owned()),
            ..Default::default()
        },
    )
}

/// Disable pointer interaction. Tap handlers and hover effects on a disabled
/// element do not fire.
pub fn disabled(value: impl Into<Reactive<bool>>) -> Modifier {
    interaction(
        "disabled",
        InteractionProps {
            disabled: Some(value.into()),
            ..Default::default()
        },
    )
}

pub fn on_tap(handler: impl Fn() + 'static) -> Modifier {
    interaction(
        "onTap",
        InteractionProps {
            on_tap: Some(Rc::new(handler)),
            ..Default::default()
        },
    )
}

pub fn hover_effect(effect: HoverEffect) -> Modifier {
    interaction(
        "hoverEffect",
        InteractionProps {
            hover: Some(effect),
            ..Default::default()
        },
    )
}
