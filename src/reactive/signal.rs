//! Signal<T> and create_signal() for reactive state.
//!
//! Fine-grained reactive primitives modeled after Leptos's client-side
//! reactivity: signals store values, effects auto-track reads. Single-threaded,
//! synchronous, thread-local runtime.

use std::any::Any;
use std::cell::RefCell;
use std::fmt;
use std::marker::PhantomData;
use std::rc::Rc;

use indexmap::IndexSet;

use super::runtime::{notify, remove_signal, signal_exists, with_runtime, SignalId, SignalState};

/// Create a reactive signal with the given initial value.
///
/// Returns a `(ReadSignal<T>, WriteSignal<T>)` pair. Reading inside an effect
/// automatically subscribes that effect to changes.
pub fn create_signal<T: 'static>(initial: T) -> (ReadSignal<T>, WriteSignal<T>) {
    let value: Rc<dyn Any> = Rc::new(RefCell::new(initial));
    let id = with_runtime(|rt| {
        rt.signals.insert(SignalState {
            value,
            subscribers: IndexSet::new(),
        })
    });
    (
        ReadSignal {
            id,
            _marker: PhantomData,
        },
        WriteSignal {
            id,
            _marker: PhantomData,
        },
    )
}

/// Free a signal's slot. Effects that read it stop depending on it; using
/// either half afterwards panics. Idempotent.
pub fn dispose_signal(id: SignalId) {
    remove_signal(id);
}

/// Whether `id` still refers to a live signal.
pub fn is_signal_alive(id: SignalId) -> bool {
    signal_exists(id)
}

/// Fetch the value cell of a signal, optionally tracking the read.
fn cell(id: SignalId, track: bool) -> Rc<dyn Any> {
    with_runtime(|rt| {
        if track {
            rt.track(id);
        }
        rt.signals
            .get(id)
            .map(|s| s.value.clone())
            .expect("signal used after it was disposed")
    })
}

fn downcast<T: 'static>(value: &Rc<dyn Any>) -> &RefCell<T> {
    value
        .downcast_ref::<RefCell<T>>()
        .expect("signal type mismatch")
}

// ---------------------------------------------------------------------------
// ReadSignal
// ---------------------------------------------------------------------------

/// Read-half of a signal. `Copy`: only stores an id.
pub struct ReadSignal<T: 'static> {
    id: SignalId,
    _marker: PhantomData<T>,
}

impl<T: 'static> Copy for ReadSignal<T> {}
impl<T: 'static> Clone for ReadSignal<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: 'static> PartialEq for ReadSignal<T> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<T: 'static> fmt::Debug for ReadSignal<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReadSignal").field("id", &self.id).finish()
    }
}

impl<T: 'static> ReadSignal<T> {
    /// Read the current value, subscribing the running effect (if any).
    pub fn get(&self) -> T
    where
        T: Clone,
    {
        self.with(T::clone)
    }

    /// Read by reference without cloning. Still subscribes the running effect.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        let value = cell(self.id, true);
        let borrowed = downcast::<T>(&value).borrow();
        f(&borrowed)
    }

    /// Read without tracking; will not subscribe any running effect.
    pub fn get_untracked(&self) -> T
    where
        T: Clone,
    {
        let value = cell(self.id, false);
        let borrowed = downcast::<T>(&value).borrow();
        borrowed.clone()
    }

    pub fn id(&self) -> SignalId {
        self.id
    }
}

// ---------------------------------------------------------------------------
// WriteSignal
// ---------------------------------------------------------------------------

/// Write-half of a signal. `Copy`: only stores an id.
pub struct WriteSignal<T: 'static> {
    id: SignalId,
    _marker: PhantomData<T>,
}

impl<T: 'static> Copy for WriteSignal<T> {}
impl<T: 'static> Clone for WriteSignal<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: 'static> fmt::Debug for WriteSignal<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WriteSignal").field("id", &self.id).finish()
    }
}

impl<T: 'static> WriteSignal<T> {
    pub fn id(&self) -> SignalId {
        self.id
    }

    /// Overwrite the signal value and notify subscribers.
    pub fn set(&self, value: T) {
        self.update(|v| *v = value);
    }

    /// Mutate the value in-place and notify subscribers.
    pub fn update(&self, f: impl FnOnce(&mut T)) {
        {
            let value = cell(self.id, false);
            let mut borrowed = downcast::<T>(&value).borrow_mut();
            f(&mut borrowed);
        }
        notify(self.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reactive::effect::create_effect;
    use crate::reactive::runtime::reset_runtime;
    use std::cell::Cell;

    fn setup() {
        reset_runtime();
    }

    #[test]
    fn create_and_read_signal() {
        setup();
        let (r, _w) = create_signal(42);
        assert_eq!(r.get(), 42);
    }

    #[test]
    fn set_and_read() {
        setup();
        let (r, w) = create_signal(0);
        w.set(7);
        assert_eq!(r.get(), 7);
    }

    #[test]
    fn update_in_place() {
        setup();
        let (r, w) = create_signal(vec![1, 2]);
        w.update(|v| v.push(3));
        assert_eq!(r.get(), vec![1, 2, 3]);
    }

    #[test]
    fn signal_with() {
        setup();
        let (r, _w) = create_signal(String::from("hello"));
        assert_eq!(r.with(|s| s.len()), 5);
    }

    #[test]
    fn nested_reads_inside_with() {
        setup();
        let (a, _) = create_signal(String::from("a"));
        let (b, _) = create_signal(String::from("b"));
        let joined = a.with(|x| b.with(|y| format!("{x}{y}")));
        assert_eq!(joined, "ab");
    }

    #[test]
    fn get_untracked_does_not_subscribe() {
        setup();
        let (r, w) = create_signal(0);
        let count = Rc::new(Cell::new(0));
        let count_c = count.clone();
        create_effect(move || {
            let _ = r.get_untracked();
            count_c.set(count_c.get() + 1);
        });
        assert_eq!(count.get(), 1);
        w.set(99);
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn signals_are_copy() {
        setup();
        let (r, w) = create_signal(1_u8);
        let r2 = r;
        let w2 = w;
        w2.set(2);
        assert_eq!(r.get(), 2);
        assert_eq!(r2, r);
    }

    #[test]
    fn debug_shows_id_only() {
        setup();
        let (r, _) = create_signal(vec![0_u8; 1024]);
        assert!(format!("{r:?}").starts_with("ReadSignal"));
    }

    #[test]
    fn disposed_signal_no_longer_drives_effects() {
        setup();
        let (r, w) = create_signal(0);
        let runs = Rc::new(Cell::new(0));
        let runs_c = runs.clone();
        create_effect(move || {
            if is_signal_alive(r.id()) {
                r.get();
            }
            runs_c.set(runs_c.get() + 1);
        });
        assert_eq!(runs.get(), 1);

        dispose_signal(w.id());
        assert!(!is_signal_alive(r.id()));
        dispose_signal(w.id());
        assert_eq!(runs.get(), 1);
    }
}
