//! Reactive state: signals, effects, memos.
//!
//! Leptos-style fine-grained reactivity for driving modifier re-application.
//!
//! - [`create_signal`]: create a read/write signal pair.
//! - [`create_effect`]: auto-tracking side effect.
//! - [`create_memo`]: cached derived computation.
//! - [`batch`]: coalesce multiple writes into one notification pass.
//! - [`Reactive`]: a property value that is static or pulled from signals.

pub(crate) mod runtime;
pub mod signal;
pub mod effect;
pub mod value;

pub use effect::{
    batch, create_effect, create_effect_with_id, create_memo, dispose_effect, is_effect_alive,
    untrack, EffectId,
};
pub use runtime::SignalId;
pub use signal::{create_signal, dispose_signal, is_signal_alive, ReadSignal, WriteSignal};
pub use value::Reactive;
