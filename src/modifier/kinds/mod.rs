//! Built-in modifier categories.
//!
//! Each submodule defines one property set and the constructor functions that
//! wrap it in a [`Modifier`]. A category writes only the style properties and
//! attributes it owns:
//!
//! | kind            | writes                                                        |
//! |-----------------|---------------------------------------------------------------|
//! | layout          | box model, position, insets, zIndex, display, flex, size      |
//! | typography      | font*, textAlign, lineHeight, letterSpacing, textDecoration   |
//! | appearance      | color, backgroundColor, opacity, borderRadius, border, boxShadow, overflow |
//! | filter          | filter                                                        |
//! | transform       | transform, transformOrigin                                    |
//! | transition      | transition, animation                                         |
//! | interaction     | cursor, pointerEvents, `disabled`, listeners                  |
//! | accessibility   | `aria-*`, `role`, `tabindex`                                  |
//! | custom-property | `--*`                                                         |

pub mod accessibility;
pub mod appearance;
pub mod custom;
pub mod filter;
pub mod interaction;
pub mod layout;
pub mod transform;
pub mod transition;
pub mod typography;

pub use accessibility::AccessibilityProps;
pub use appearance::{AppearanceProps, Border, BorderStyle, Shadow};
pub use custom::{CustomModifier, CustomPropertyProps};
pub use filter::FilterProps;
pub use interaction::{HoverEffect, InteractionProps};
pub use layout::{Flex, FlexDirection, Frame, LayoutProps, Position};
pub use transform::TransformProps;
pub use transition::{Animation, Easing, Iterations, Transition, TransitionProps};
pub use typography::{Font, FontWeight, TextAlign, TypographyProps};

use crate::css::{Edges, Length};
use crate::modifier::registry::{Arg, FactoryError, ModifierArgs, ModifierRegistry};
use crate::modifier::ApplyError;

// ---------------------------------------------------------------------------
// Validation helpers
// ---------------------------------------------------------------------------

pub(crate) fn ensure_finite(modifier: &str, what: &str, value: f64) -> Result<(), ApplyError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ApplyError::invalid(modifier, format!("{what} is not finite")))
    }
}

pub(crate) fn ensure_length(
    modifier: &str,
    what: &str,
    length: &Length,
    allow_negative: bool,
) -> Result<(), ApplyError> {
    if !length.is_finite() {
        return Err(ApplyError::invalid(modifier, format!("{what} is not finite")));
    }
    if !allow_negative && !length.is_auto() && length.value < 0.0 {
        return Err(ApplyError::invalid(
            modifier,
            format!("{what} must not be negative, got {length}"),
        ));
    }
    Ok(())
}

pub(crate) fn ensure_range(
    modifier: &str,
    what: &str,
    value: f64,
    min: f64,
    max: f64,
) -> Result<(), ApplyError> {
    ensure_finite(modifier, what, value)?;
    if value < min || value > max {
        let max = if max == f64::MAX {
            "inf".to_owned()
        } else {
            crate::css::value::format_number(max)
        };
        return Err(ApplyError::invalid(
            modifier,
            format!(
                "{what} {} is outside {}..={max}",
                crate::css::value::format_number(value),
                crate::css::value::format_number(min)
            ),
        ));
    }
    Ok(())
}

pub(crate) fn ensure_non_empty(modifier: &str, what: &str, value: &str) -> Result<(), ApplyError> {
    if value.trim().is_empty() {
        Err(ApplyError::invalid(modifier, format!("{what} is empty")))
    } else {
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Registry factories
// ---------------------------------------------------------------------------

/// `1`, `2` (vertical, horizontal) or `4` (top, right, bottom, left) lengths.
fn edges_from(args: &ModifierArgs) -> Result<Edges, FactoryError> {
    match args.len() {
        0 => Err(FactoryError::MissingArgument {
            index: 0,
            expected: "length",
        }),
        1 => Ok(Edges::all(args.length(0)?)),
        2 => Ok(Edges::symmetric(args.length(0)?, args.length(1)?)),
        4 => Ok(Edges::new(
            args.length(0)?,
            args.length(1)?,
            args.length(2)?,
            args.length(3)?,
        )),
        found => Err(FactoryError::Arity {
            expected: "1, 2 or 4 arguments",
            found,
        }),
    }
}

fn font_weight_from(args: &ModifierArgs, index: usize) -> Result<FontWeight, FactoryError> {
    let invalid = |found: &Arg| FactoryError::InvalidArgument {
        index,
        expected: "font weight",
        found: found.type_name(),
    };
    match args.get(index) {
        None => Err(FactoryError::MissingArgument {
            index,
            expected: "font weight",
        }),
        Some(Arg::Number(n)) if n.fract() == 0.0 && (0.0..=f64::from(u16::MAX)).contains(n) => {
            Ok(FontWeight::Numeric(*n as u16))
        }
        Some(arg @ Arg::Text(text)) => FontWeight::parse(text).ok_or_else(|| invalid(arg)),
        Some(arg) => Err(invalid(arg)),
    }
}

fn parse_keyword<T>(
    args: &ModifierArgs,
    index: usize,
    expected: &'static str,
    parse: impl Fn(&str) -> Option<T>,
) -> Result<T, FactoryError> {
    let text = args.text(index)?;
    parse(text).ok_or(FactoryError::InvalidArgument {
        index,
        expected,
        found: "text",
    })
}

/// Register every built-in modifier under its camelCase name.
pub fn register_builtins(registry: &ModifierRegistry) {
    // layout
    registry.register("padding", |args| Ok(layout::padding(edges_from(args)?)));
    registry.register("margin", |args| Ok(layout::margin(edges_from(args)?)));
    registry.register("frame", |args| {
        let mut frame = Frame::new().width(args.length(0)?);
        if let Some(height) = args.opt_length(1)? {
            frame = frame.height(height);
        }
        Ok(layout::frame(frame))
    });
    registry.register("offset", |args| {
        Ok(layout::offset(args.length(0)?, args.length(1)?))
    });
    registry.register("zIndex", |args| {
        Ok(layout::z_index(args.number(0)? as i32))
    });
    registry.register("display", |args| Ok(layout::display(args.text(0)?)));

    // appearance
    registry.register("foregroundColor", |args| {
        Ok(appearance::foreground_color(args.text(0)?))
    });
    registry.register("backgroundColor", |args| {
        Ok(appearance::background_color(args.text(0)?))
    });
    registry.register("opacity", |args| Ok(appearance::opacity(args.number(0)?)));
    registry.register("cornerRadius", |args| {
        Ok(appearance::corner_radius(args.length(0)?))
    });
    registry.register("border", |args| {
        let mut border = Border::solid(args.length(0)?, args.text(1)?);
        if let Some(style) = args.opt_text(2)? {
            let style = match style {
                "solid" => BorderStyle::Solid,
                "dashed" => BorderStyle::Dashed,
                "dotted" => BorderStyle::Dotted,
                "double" => BorderStyle::Double,
                "none" => BorderStyle::None,
                _ => {
                    return Err(FactoryError::InvalidArgument {
                        index: 2,
                        expected: "border style",
                        found: "text",
                    })
                }
            };
            border = border.with_style(style);
        }
        Ok(appearance::border(border))
    });
    registry.register("shadow", |args| {
        Ok(appearance::shadow(Shadow::new(
            args.length(0)?,
            args.length(1)?,
            args.length(2)?,
            args.opt_text(3)?.unwrap_or("rgba(0, 0, 0, 0.25)"),
        )))
    });
    registry.register("clipped", |_| Ok(appearance::clipped()));

    // typography
    registry.register("font", |args| {
        let mut font = Font::new().size(args.length(0)?);
        if args.get(1).is_some() {
            font = font.weight(font_weight_from(args, 1)?);
        }
        if let Some(family) = args.opt_text(2)? {
            font = font.family(family);
        }
        Ok(typography::font(font))
    });
    registry.register("fontSize", |args| Ok(typography::font_size(args.length(0)?)));
    registry.register("fontWeight", |args| {
        Ok(typography::font_weight(font_weight_from(args, 0)?))
    });
    registry.register("fontFamily", |args| Ok(typography::font_family(args.text(0)?)));
    registry.register("textAlign", |args| {
        let align = parse_keyword(args, 0, "text alignment", TextAlign::parse)?;
        Ok(typography::text_align(align))
    });

    // transform
    registry.register("scale", |args| Ok(transform::scale(args.number(0)?)));
    registry.register("rotate", |args| Ok(transform::rotate(args.angle(0)?)));
    registry.register("translate", |args| {
        Ok(transform::translate(args.length(0)?, args.length(1)?))
    });
    registry.register("transform", |args| {
        let mut props = TransformProps::new();
        if let Some(scale) = args.opt_number(0)? {
            props = props.scale(scale);
        }
        if let Some(degrees) = args.opt_number(1)? {
            props = props.rotate(degrees);
        }
        if args.len() > 2 {
            props = props.translate(args.length(2)?, args.opt_length(3)?.unwrap_or(Length::px(0.0)));
        }
        Ok(transform::transform(props))
    });

    // filter
    registry.register("blur", |args| Ok(filter::blur(args.length(0)?)));
    registry.register("brightness", |args| Ok(filter::brightness(args.number(0)?)));
    registry.register("contrast", |args| Ok(filter::contrast(args.number(0)?)));
    registry.register("grayscale", |args| Ok(filter::grayscale(args.number(0)?)));
    registry.register("saturate", |args| Ok(filter::saturate(args.number(0)?)));
    registry.register("hueRotate", |args| Ok(filter::hue_rotate(args.angle(0)?)));
    registry.register("invert", |args| Ok(filter::invert(args.number(0)?)));
    registry.register("sepia", |args| Ok(filter::sepia(args.number(0)?)));

    // transition
    registry.register("transition", |args| {
        let duration = args.opt_number(1)?.unwrap_or(300.0).max(0.0) as u32;
        let mut transition = Transition::new(args.text(0)?, duration);
        if args.get(2).is_some() {
            transition = transition.easing(parse_keyword(args, 2, "easing", Easing::parse)?);
        }
        Ok(transition::transition_with(transition))
    });

    // interaction
    registry.register("cursor", |args| Ok(interaction::cursor(args.text(0)?)));
    registry.register("disabled", |args| {
        Ok(interaction::disabled(args.opt_bool(0)?.unwrap_or(true)))
    });

    // accessibility
    registry.register("ariaLabel", |args| {
        Ok(accessibility::aria_label(args.text(0)?))
    });
    registry.register("ariaHidden", |args| {
        Ok(accessibility::aria_hidden(args.opt_bool(0)?.unwrap_or(true)))
    });
    registry.register("role", |args| Ok(accessibility::role(args.text(0)?)));

    // custom
    registry.register("cssVar", |args| {
        Ok(custom::css_var(args.text(0)?, args.text(1)?))
    });
    registry.register("class", |args| Ok(custom::class(args.text(0)?)));
    registry.register("attribute", |args| {
        Ok(custom::attribute(args.text(0)?, args.text(1)?))
    });
}

/// Every name registered by [`register_builtins`], in registration order.
pub const BUILTIN_NAMES: &[&str] = &[
    "padding",
    "margin",
    "frame",
    "offset",
    "zIndex",
    "display",
    "foregroundColor",
    "backgroundColor",
    "opacity",
    "cornerRadius",
    "border",
    "shadow",
    "clipped",
    "font",
    "fontSize",
    "fontWeight",
    "fontFamily",
    "textAlign",
    "scale",
    "rotate",
    "translate",
    "transform",
    "blur",
    "brightness",
    "contrast",
    "grayscale",
    "saturate",
    "hueRotate",
    "invert",
    "sepia",
    "transition",
    "cursor",
    "disabled",
    "ariaLabel",
    "ariaHidden",
    "role",
    "cssVar",
    "class",
    "attribute",
];
