//! Auto-tracking side effects, computed memos and batching.
//!
//! # Effects
//!
//! An effect is a closure that re-runs whenever any signal it reads changes:
//!
//! ```ignore
//! let (count, set_count) = create_signal(0);
//! create_effect(move || {
//!     println!("count = {}", count.get());
//! });
//! set_count.set(1); // prints "count = 1"
//! ```
//!
//! # Memos
//!
//! A memo is a cached derived computation that only notifies downstream
//! subscribers when its output actually changes.
//!
//! # Batching
//!
//! Use [`batch`] to group multiple signal writes so that effects run only once.

use super::runtime::{
    begin_batch, effect_exists, end_batch, flush, register_effect, remove_effect,
    restore_observer, run_effect, take_observer,
};
use super::signal::{create_signal, ReadSignal};

pub use super::runtime::EffectId;

/// Create a side-effect that auto-tracks signal reads.
///
/// The closure runs immediately once (establishing initial subscriptions),
/// then re-runs whenever any tracked signal changes.
pub fn create_effect(f: impl FnMut() + 'static) {
    create_effect_with_id(f);
}

/// Create an effect and return its [`EffectId`] so it can later be disposed.
pub fn create_effect_with_id(f: impl FnMut() + 'static) -> EffectId {
    let eid = register_effect(Box::new(f));
    run_effect(eid);
    eid
}

/// Remove an effect so it never runs again. Idempotent.
pub fn dispose_effect(eid: EffectId) {
    remove_effect(eid);
}

/// Whether `eid` still refers to a live effect.
pub fn is_effect_alive(eid: EffectId) -> bool {
    effect_exists(eid)
}

/// Create a memoised derived computation.
///
/// `f` runs immediately and whenever its dependencies change. The returned
/// signal only notifies its subscribers when the value changes by `PartialEq`.
pub fn create_memo<T: Clone + PartialEq + 'static>(
    mut f: impl FnMut() -> T + 'static,
) -> ReadSignal<T> {
    // The eager run must not subscribe a parent effect.
    let first = untrack(&mut f);
    let (read, write) = create_signal(first);
    create_effect(move || {
        let next = f();
        if read.with(|old| old != &next) {
            write.set(next);
        }
    });
    read
}

/// Batch multiple signal writes so that effects run only once, after the
/// outermost batch returns.
pub fn batch<R>(f: impl FnOnce() -> R) -> R {
    begin_batch();
    let result = f();
    if end_batch() {
        flush();
    }
    result
}

/// Run `f` without subscribing the running effect to anything it reads.
pub fn untrack<R>(f: impl FnOnce() -> R) -> R {
    let observer = take_observer();
    let result = f();
    restore_observer(observer);
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reactive::runtime::reset_runtime;
    use crate::reactive::Reactive;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    fn setup() {
        reset_runtime();
    }

    #[test]
    fn effect_runs_on_creation() {
        setup();
        let ran = Rc::new(Cell::new(false));
        let ran_c = ran.clone();
        create_effect(move || ran_c.set(true));
        assert!(ran.get());
    }

    #[test]
    fn effect_reruns_on_signal_change() {
        setup();
        let (r, w) = create_signal(0_i32);
        let log = Rc::new(RefCell::new(Vec::new()));
        let log_c = log.clone();
        create_effect(move || log_c.borrow_mut().push(r.get()));
        assert_eq!(*log.borrow(), vec![0]);
        w.set(42);
        assert_eq!(*log.borrow(), vec![0, 42]);
    }

    #[test]
    fn effect_pulls_reactive_property() {
        setup();
        let (size, set_size) = create_signal(12.0_f64);
        let (scale, set_scale) = create_signal(1.0_f64);
        let font = Reactive::derived(move || size.get() * scale.get());
        let applied = Rc::new(RefCell::new(Vec::new()));
        let applied_c = applied.clone();
        create_effect(move || applied_c.borrow_mut().push(format!("{}px", font.get())));
        set_size.set(16.0);
        set_scale.set(2.0);
        assert_eq!(*applied.borrow(), vec!["12px", "16px", "32px"]);
    }

    #[test]
    fn effect_retracks_conditional_deps() {
        setup();
        let (flag, set_flag) = create_signal(true);
        let (x, set_x) = create_signal(100_i32);
        let (y, set_y) = create_signal(200_i32);
        let runs = Rc::new(Cell::new(0));
        let result = Rc::new(Cell::new(0));
        let (runs_c, result_c) = (runs.clone(), result.clone());

        create_effect(move || {
            runs_c.set(runs_c.get() + 1);
            result_c.set(if flag.get() { x.get() } else { y.get() });
        });
        assert_eq!(result.get(), 100);

        set_flag.set(false);
        assert_eq!(result.get(), 200);
        set_y.set(999);
        assert_eq!(result.get(), 999);

        // x is no longer a dependency.
        let before = runs.get();
        set_x.set(1);
        assert_eq!(runs.get(), before);
    }

    #[test]
    fn memo_only_notifies_on_change() {
        setup();
        let (r, w) = create_signal(5_i32);
        let clamped = create_memo(move || r.get().clamp(0, 10));
        let downstream = Rc::new(Cell::new(0_u32));
        let d = downstream.clone();
        create_effect(move || {
            let _ = clamped.get();
            d.set(d.get() + 1);
        });
        assert_eq!(downstream.get(), 1);

        w.set(7);
        assert_eq!(downstream.get(), 2);
        w.set(15);
        assert_eq!(downstream.get(), 3);
        assert_eq!(clamped.get(), 10);

        w.set(20);
        assert_eq!(downstream.get(), 3);
    }

    #[test]
    fn memo_inside_effect_does_not_subscribe_parent_eagerly() {
        setup();
        let (r, w) = create_signal(1_i32);
        let outer_runs = Rc::new(Cell::new(0));
        let outer_c = outer_runs.clone();
        create_effect(move || {
            outer_c.set(outer_c.get() + 1);
            if outer_c.get() == 1 {
                let _ = create_memo(move || r.get() + 1);
            }
        });
        w.set(2);
        assert_eq!(outer_runs.get(), 1);
    }

    #[test]
    fn batch_coalesces_notifications() {
        setup();
        let (a, set_a) = create_signal(0_i32);
        let (b, set_b) = create_signal(0_i32);
        let runs = Rc::new(Cell::new(0_u32));
        let runs_c = runs.clone();
        create_effect(move || {
            let _ = a.get() + b.get();
            runs_c.set(runs_c.get() + 1);
        });

        batch(|| {
            set_a.set(10);
            set_b.set(20);
        });
        assert_eq!(runs.get(), 2);
    }

    #[test]
    fn batch_nested_only_flushes_once() {
        setup();
        let (r, w) = create_signal(0_i32);
        let runs = Rc::new(Cell::new(0_u32));
        let runs_c = runs.clone();
        create_effect(move || {
            let _ = r.get();
            runs_c.set(runs_c.get() + 1);
        });

        batch(|| {
            w.set(1);
            batch(|| w.set(2));
            assert_eq!(runs.get(), 1);
            w.set(3);
        });
        assert_eq!(runs.get(), 2);
    }

    #[test]
    fn untrack_skips_subscription() {
        setup();
        let (r, w) = create_signal(0_i32);
        let runs = Rc::new(Cell::new(0_u32));
        let runs_c = runs.clone();
        create_effect(move || {
            let _ = untrack(|| r.get());
            runs_c.set(runs_c.get() + 1);
        });
        w.set(1);
        assert_eq!(runs.get(), 1);
    }

    #[test]
    fn dispose_stops_effect_from_running() {
        setup();
        let (r, w) = create_signal(0_i32);
        let log = Rc::new(RefCell::new(Vec::<i32>::new()));
        let log_c = log.clone();
        let eid = create_effect_with_id(move || log_c.borrow_mut().push(r.get()));
        w.set(1);
        dispose_effect(eid);
        assert!(!is_effect_alive(eid));
        w.set(2);
        assert_eq!(*log.borrow(), vec![0, 1]);
        dispose_effect(eid);
    }

    #[test]
    fn effect_can_dispose_itself() {
        setup();
        let (r, w) = create_signal(0_i32);
        let runs = Rc::new(Cell::new(0_u32));
        let runs_c = runs.clone();
        let slot: Rc<Cell<Option<EffectId>>> = Rc::new(Cell::new(None));
        let slot_c = slot.clone();
        let eid = create_effect_with_id(move || {
            runs_c.set(runs_c.get() + 1);
            if r.get() > 0 {
                if let Some(id) = slot_c.get() {
                    dispose_effect(id);
                }
            }
        });
        slot.set(Some(eid));
        w.set(1);
        w.set(2);
        assert_eq!(runs.get(), 2);
    }

    #[test]
    fn effect_writing_another_signal_settles() {
        setup();
        let (a, set_a) = create_signal(0_i32);
        let (b, set_b) = create_signal(0_i32);
        let runs = Rc::new(Cell::new(0_u32));
        let runs_c = runs.clone();
        create_effect(move || {
            set_b.set(a.get() * 2);
            runs_c.set(runs_c.get() + 1);
        });
        set_a.set(5);
        assert_eq!(b.get(), 10);
        assert_eq!(runs.get(), 2);
    }
}
