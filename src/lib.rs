//! # mantle
//!
//! A declarative, SwiftUI-style modifier pipeline for reactive element trees.
//!
//! Components render elements into an in-process tree. Chained modifiers
//! (`padding`, `background_color`, `on_tap`, ...) describe how those elements
//! are styled; the engine applies them in priority order, and reactive mounts
//! re-apply them when a signal they read changes.
//!
//! ```
//! use mantle::prelude::*;
//!
//! let ui = Ui::new();
//! let (color, set_color) = create_signal(String::from("white"));
//! let card = Text::new("Hello")
//!     .modifiers()
//!     .padding(16)
//!     .background_color(color)
//!     .corner_radius(8)
//!     .build();
//!
//! let mount = ui.mount_reactive(card).unwrap();
//! let node = mount.node().unwrap();
//! set_color.set("black".into());
//! assert_eq!(ui.dom().style(node).unwrap().get("backgroundColor"), Some("black"));
//! ```
//!
//! ## Core Systems
//!
//! - **[`reactive`]**: signals, effects, memos, batching
//! - **[`dom`]**: slotmap-backed element tree with listeners and disposal hooks
//! - **[`css`]**: inline style declarations and typed CSS values
//! - **[`modifier`]**: descriptors, registry, application engine, builder
//! - **[`component`]**: the component contract and the modifiable wrapper
//! - **[`views`]**: built-in Text, Stack and Button
//! - **[`ui`]**: mounting, refresh and event dispatch
//! - **[`config`]**: engine and resolution settings
//! - **[`testing`]**: headless harness and HTML serialization

// Foundation
pub mod css;
pub mod dom;
pub mod reactive;

// Modifier pipeline
pub mod component;
pub mod modifier;

// Application
pub mod config;
pub mod ui;
pub mod views;

pub mod testing;

pub use component::{
    create_modifiable_component, create_modifiable_component_with, Component, ComponentExt,
    ModifiableComponent,
};
pub use config::Config;
pub use modifier::{
    apply_modifiers_to_node, ApplyError, BuildError, Modifier, ModifierBuilder, ModifierKind,
    ModifierRegistry,
};
pub use ui::{Mount, Ui};

/// Everything needed to build and mount modified components.
pub mod prelude {
    pub use crate::component::{
        create_modifiable_component, create_modifiable_component_with, Component, ComponentExt,
        ModifiableComponent,
    };
    pub use crate::config::Config;
    pub use crate::css::{Angle, Edges, Length};
    pub use crate::modifier::kinds::{
        Animation, Border, Easing, Flex, FlexDirection, Font, FontWeight, Frame, HoverEffect,
        Position, Shadow, TextAlign, TransformProps, Transition,
    };
    pub use crate::modifier::{
        ApplyError, BuildError, Modifier, ModifierBuilder, ModifierPlugin, ModifierRegistry,
    };
    pub use crate::modifier_args;
    pub use crate::reactive::{batch, create_effect, create_memo, create_signal, Reactive};
    pub use crate::ui::{Mount, Ui};
    pub use crate::views::{Button, Stack, Text};
}
