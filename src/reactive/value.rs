//! `Reactive<T>`: a modifier property that is either fixed or read from a
//! signal at apply time.

use std::fmt;
use std::rc::Rc;

use super::signal::ReadSignal;

/// A value that is static, backed by a signal, or derived from a closure.
///
/// Reading with [`Reactive::get`] inside an effect subscribes the effect to
/// whatever signals the value depends on.
pub enum Reactive<T: 'static> {
    Static(T),
    Signal(ReadSignal<T>),
    Derived(Rc<dyn Fn() -> T>),
}

impl<T: Clone + 'static> Reactive<T> {
    /// Wrap a closure. Signals it reads are tracked on every `get`.
    pub fn derived(f: impl Fn() -> T + 'static) -> Self {
        Reactive::Derived(Rc::new(f))
    }

    /// Current value, tracked.
    pub fn get(&self) -> T {
        match self {
            Reactive::Static(v) => v.clone(),
            Reactive::Signal(s) => s.get(),
            Reactive::Derived(f) => f(),
        }
    }

    /// Current value without subscribing the running effect.
    pub fn get_untracked(&self) -> T {
        match self {
            Reactive::Static(v) => v.clone(),
            Reactive::Signal(s) => s.get_untracked(),
            Reactive::Derived(f) => super::effect::untrack(|| f()),
        }
    }

    /// Map the current value through `f`, staying reactive.
    pub fn map<U: Clone + 'static>(self, f: impl Fn(T) -> U + 'static) -> Reactive<U> {
        match self {
            Reactive::Static(v) => Reactive::Static(f(v)),
            other => Reactive::derived(move || f(other.get())),
        }
    }
}

impl<T: 'static> Reactive<T> {
    /// Whether the value can change between applications.
    pub fn is_reactive(&self) -> bool {
        !matches!(self, Reactive::Static(_))
    }
}

impl<T: Clone + 'static> Clone for Reactive<T> {
    fn clone(&self) -> Self {
        match self {
            Reactive::Static(v) => Reactive::Static(v.clone()),
            Reactive::Signal(s) => Reactive::Signal(*s),
            Reactive::Derived(f) => Reactive::Derived(f.clone()),
        }
    }
}

impl<T: fmt::Debug + 'static> fmt::Debug for Reactive<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reactive::Static(v) => f.debug_tuple("Static").field(v).finish(),
            Reactive::Signal(s) => f.debug_tuple("Signal").field(s).finish(),
            Reactive::Derived(_) => f.write_str("Derived(..)"),
        }
    }
}

impl<T: 'static> From<T> for Reactive<T> {
    fn from(value: T) -> Self {
        Reactive::Static(value)
    }
}

impl<T: 'static> From<ReadSignal<T>> for Reactive<T> {
    fn from(signal: ReadSignal<T>) -> Self {
        Reactive::Signal(signal)
    }
}

impl From<&str> for Reactive<String> {
    fn from(value: &str) -> Self {
        Reactive::Static(value.to_owned())
    }
}

impl From<i32> for Reactive<f64> {
    fn from(value: i32) -> Self {
        Reactive::Static(f64::from(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reactive::effect::create_effect;
    use crate::reactive::runtime::reset_runtime;
    use crate::reactive::signal::create_signal;
    use std::cell::Cell;

    #[test]
    fn static_value() {
        reset_runtime();
        let v: Reactive<f64> = 0.5.into();
        assert_eq!(v.get(), 0.5);
        assert!(!v.is_reactive());
        let n: Reactive<f64> = 3_i32.into();
        assert_eq!(n.get(), 3.0);
    }

    #[test]
    fn signal_value_pulls_latest() {
        reset_runtime();
        let (r, w) = create_signal(String::from("red"));
        let v: Reactive<String> = r.into();
        assert!(v.is_reactive());
        w.set("blue".into());
        assert_eq!(v.get(), "blue");
    }

    #[test]
    fn derived_tracks_inside_effect() {
        reset_runtime();
        let (r, w) = create_signal(2.0_f64);
        let v = Reactive::derived(move || r.get() * 10.0);
        let seen = Rc::new(Cell::new(0.0));
        let seen_c = seen.clone();
        let v_c = v.clone();
        create_effect(move || seen_c.set(v_c.get()));
        w.set(3.0);
        assert_eq!(seen.get(), 30.0);
    }

    #[test]
    fn untracked_get_does_not_subscribe() {
        reset_runtime();
        let (r, w) = create_signal(1_i32);
        let v: Reactive<i32> = Reactive::derived(move || r.get());
        let runs = Rc::new(Cell::new(0));
        let runs_c = runs.clone();
        create_effect(move || {
            let _ = v.get_untracked();
            runs_c.set(runs_c.get() + 1);
        });
        w.set(2);
        assert_eq!(runs.get(), 1);
    }

    #[test]
    fn map_keeps_reactivity() {
        reset_runtime();
        let (r, w) = create_signal(1.0_f64);
        let px = Reactive::<f64>::from(r).map(|n| format!("{n}px"));
        w.set(4.0);
        assert_eq!(px.get(), "4px");
        let fixed = Reactive::Static(2.0_f64).map(|n| n * 2.0);
        assert!(!fixed.is_reactive());
    }
}
