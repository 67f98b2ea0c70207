//! Thread-local reactive runtime.
//!
//! Signals and effects live in slotmap arenas so disposed effects free their
//! slot and stale ids are detected instead of aliasing a newer entry. Signal
//! values are stored as `Rc<RefCell<T>>` behind `dyn Any`, which lets a reader
//! release the runtime borrow before handing out a reference; nested reads of
//! other signals inside `with` are therefore fine.

use std::any::Any;
use std::cell::RefCell;
use std::rc::Rc;

use indexmap::IndexSet;
use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// Identifies a signal slot inside the runtime.
    pub struct SignalId;
    /// Identifies an effect slot inside the runtime.
    pub struct EffectId;
}

pub(crate) struct SignalState {
    pub(crate) value: Rc<dyn Any>,
    pub(crate) subscribers: IndexSet<EffectId>,
}

pub(crate) struct EffectState {
    /// Taken out while the effect runs so the runtime is not borrowed across
    /// the user callback.
    pub(crate) callback: Option<Box<dyn FnMut()>>,
    pub(crate) dependencies: IndexSet<SignalId>,
}

pub(crate) struct Runtime {
    pub(crate) signals: SlotMap<SignalId, SignalState>,
    pub(crate) effects: SlotMap<EffectId, EffectState>,
    /// The effect currently executing, for auto-tracking.
    pub(crate) observer: Option<EffectId>,
    /// > 0 inside `batch()`; notifications are deferred.
    pub(crate) batch_depth: usize,
    /// Effects waiting to run, in notification order, without duplicates.
    pub(crate) pending: IndexSet<EffectId>,
    /// Set while the notification loop drains `pending`.
    pub(crate) flushing: bool,
}

impl Runtime {
    fn new() -> Self {
        Self {
            signals: SlotMap::with_key(),
            effects: SlotMap::with_key(),
            observer: None,
            batch_depth: 0,
            pending: IndexSet::new(),
            flushing: false,
        }
    }

    /// Record a dependency edge between the running effect and `signal`.
    pub(crate) fn track(&mut self, signal: SignalId) {
        let Some(eid) = self.observer else {
            return;
        };
        if !self.effects.contains_key(eid) {
            return;
        }
        if let Some(state) = self.signals.get_mut(signal) {
            state.subscribers.insert(eid);
            if let Some(effect) = self.effects.get_mut(eid) {
                effect.dependencies.insert(signal);
            }
        }
    }

    /// Drop every dependency edge of `eid`.
    fn unsubscribe(&mut self, eid: EffectId) {
        let deps = match self.effects.get_mut(eid) {
            Some(effect) => std::mem::take(&mut effect.dependencies),
            None => return,
        };
        for sid in deps {
            if let Some(signal) = self.signals.get_mut(sid) {
                signal.subscribers.shift_remove(&eid);
            }
        }
    }
}

thread_local! {
    static RUNTIME: RefCell<Runtime> = RefCell::new(Runtime::new());
}

/// Run `f` with exclusive access to this thread's runtime.
///
/// `f` must not call back into user code.
pub(crate) fn with_runtime<R>(f: impl FnOnce(&mut Runtime) -> R) -> R {
    RUNTIME.with(|rt| f(&mut rt.borrow_mut()))
}

/// Allocate an effect slot without running it.
pub(crate) fn register_effect(callback: Box<dyn FnMut()>) -> EffectId {
    with_runtime(|rt| {
        rt.effects.insert(EffectState {
            callback: Some(callback),
            dependencies: IndexSet::new(),
        })
    })
}

/// Run a single effect: clear old deps, set the observer, execute the callback.
pub(crate) fn run_effect(eid: EffectId) {
    let callback = with_runtime(|rt| {
        rt.unsubscribe(eid);
        rt.effects.get_mut(eid).and_then(|e| e.callback.take())
    });
    let Some(mut callback) = callback else {
        return;
    };

    let previous = with_runtime(|rt| rt.observer.replace(eid));
    callback();
    with_runtime(|rt| {
        rt.observer = previous;
        // The effect may have disposed itself while running.
        if let Some(effect) = rt.effects.get_mut(eid) {
            effect.callback = Some(callback);
        }
    });
}

/// Remove an effect. Idempotent.
pub(crate) fn remove_effect(eid: EffectId) {
    with_runtime(|rt| {
        rt.unsubscribe(eid);
        rt.effects.remove(eid);
        rt.pending.shift_remove(&eid);
    });
}

/// Remove a signal and the dependency edges pointing at it. Idempotent.
pub(crate) fn remove_signal(sid: SignalId) {
    with_runtime(|rt| {
        let Some(state) = rt.signals.remove(sid) else {
            return;
        };
        for eid in state.subscribers {
            if let Some(effect) = rt.effects.get_mut(eid) {
                effect.dependencies.shift_remove(&sid);
            }
        }
    });
}

pub(crate) fn signal_exists(sid: SignalId) -> bool {
    with_runtime(|rt| rt.signals.contains_key(sid))
}

pub(crate) fn effect_exists(eid: EffectId) -> bool {
    with_runtime(|rt| rt.effects.contains_key(eid))
}

/// Queue the subscribers of `signal` and run them unless a batch or an outer
/// notification loop is in progress.
pub(crate) fn notify(signal: SignalId) {
    let deferred = with_runtime(|rt| {
        let subs: Vec<EffectId> = rt
            .signals
            .get(signal)
            .map(|s| s.subscribers.iter().copied().collect())
            .unwrap_or_default();
        rt.pending.extend(subs);
        rt.batch_depth > 0 || rt.flushing
    });
    if !deferred {
        flush();
    }
}

/// Resets `flushing` even if an effect panics.
struct FlushGuard;

impl Drop for FlushGuard {
    fn drop(&mut self) {
        with_runtime(|rt| rt.flushing = false);
    }
}

/// Drain the pending queue. Effects queued by running effects are picked up by
/// the same loop.
pub(crate) fn flush() {
    let start = with_runtime(|rt| {
        if rt.flushing || rt.pending.is_empty() {
            false
        } else {
            rt.flushing = true;
            true
        }
    });
    if !start {
        return;
    }
    let _guard = FlushGuard;
    while let Some(eid) = with_runtime(|rt| rt.pending.shift_remove_index(0)) {
        run_effect(eid);
    }
}

pub(crate) fn begin_batch() {
    with_runtime(|rt| rt.batch_depth += 1);
}

/// Returns `true` when the outermost batch ended.
pub(crate) fn end_batch() -> bool {
    with_runtime(|rt| {
        rt.batch_depth = rt.batch_depth.saturating_sub(1);
        rt.batch_depth == 0
    })
}

pub(crate) fn take_observer() -> Option<EffectId> {
    with_runtime(|rt| rt.observer.take())
}

pub(crate) fn restore_observer(observer: Option<EffectId>) {
    with_runtime(|rt| rt.observer = observer);
}

/// Reset the thread-local runtime between tests.
#[cfg(test)]
pub(crate) fn reset_runtime() {
    with_runtime(|rt| *rt = Runtime::new());
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn removed_effect_does_not_run() {
        reset_runtime();
        let runs = Rc::new(Cell::new(0));
        let runs_c = runs.clone();
        let eid = register_effect(Box::new(move || runs_c.set(runs_c.get() + 1)));
        run_effect(eid);
        assert_eq!(runs.get(), 1);
        remove_effect(eid);
        assert!(!effect_exists(eid));
        run_effect(eid);
        assert_eq!(runs.get(), 1);
    }

    #[test]
    fn removed_signal_drops_dependency_edges() {
        reset_runtime();
        let sid = with_runtime(|rt| {
            rt.signals.insert(SignalState {
                value: Rc::new(RefCell::new(0_u8)),
                subscribers: IndexSet::new(),
            })
        });
        let eid = register_effect(Box::new(|| {}));
        with_runtime(|rt| {
            rt.observer = Some(eid);
            rt.track(sid);
            rt.observer = None;
        });

        remove_signal(sid);
        remove_signal(sid);
        assert!(!signal_exists(sid));
        assert!(with_runtime(|rt| rt.effects[eid].dependencies.is_empty()));
        assert!(effect_exists(eid));
    }

    #[test]
    fn flush_with_empty_queue_is_noop() {
        reset_runtime();
        flush();
        assert!(!with_runtime(|rt| rt.flushing));
    }

    #[test]
    fn nested_batch_depth() {
        reset_runtime();
        begin_batch();
        begin_batch();
        assert!(!end_batch());
        assert!(end_batch());
        assert!(end_batch());
    }
}
