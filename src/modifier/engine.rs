//! Modifier application engine.
//!
//! [`apply_modifiers_to_node`] applies a list of modifiers to one node in
//! ascending priority order. Two strategies exist:
//!
//! - **sequential**: one stable sort by priority over the whole list;
//! - **batch**: group by kind in first-seen order, stable-sort each group by
//!   priority, apply group by group.
//!
//! Because every built-in kind writes its own properties, both strategies
//! leave the element in the same state. Lazy modifiers are resolved before
//! ordering and sort by the kind and priority of what they resolved to. A
//! failing modifier is logged and skipped; the rest of the pass still runs.
//! Fatal errors (a lazy modifier that never resolved) are returned once the
//! pass is complete.

use indexmap::IndexMap;
use tracing::{trace, warn};

use crate::dom::{Dom, NodeId};

use super::context::{ApplyScope, PartialContext};
use super::{ApplyError, Modifier, ModifierKind, ModifierProps};

/// How to run one application pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApplyOptions {
    /// Use the batch-by-kind strategy.
    pub batch: bool,
    /// Log isolated failures with `warn!`.
    pub log_failures: bool,
}

impl Default for ApplyOptions {
    fn default() -> Self {
        Self {
            batch: false,
            log_failures: true,
        }
    }
}

impl ApplyOptions {
    pub fn batched() -> Self {
        Self {
            batch: true,
            ..Self::default()
        }
    }

    pub fn quiet(mut self) -> Self {
        self.log_failures = false;
        self
    }
}

/// What happened during one pass.
#[derive(Debug, Clone, PartialEq)]
pub struct ApplyReport {
    /// The node styled last. Differs from the input when a modifier wrapped it.
    pub node: NodeId,
    /// Number of modifiers that applied without error.
    pub applied: usize,
    /// Errors in application order, fatal ones included.
    pub failures: Vec<ApplyError>,
}

impl ApplyReport {
    /// The first fatal error, if any.
    pub fn fatal(&self) -> Option<&ApplyError> {
        self.failures.iter().find(|e| e.is_fatal())
    }
}

/// Apply `modifiers` to `node`, returning the final node.
///
/// An empty list returns `node` without touching the tree.
pub fn apply_modifiers_to_node(
    dom: &mut Dom,
    node: NodeId,
    modifiers: &[Modifier],
    context: PartialContext,
    options: ApplyOptions,
) -> Result<NodeId, ApplyError> {
    let report = apply_modifiers_with_report(dom, node, modifiers, context, options);
    match report.failures.into_iter().find(ApplyError::is_fatal) {
        Some(fatal) => Err(fatal),
        None => Ok(report.node),
    }
}

/// Like [`apply_modifiers_to_node`], but reports every failure.
pub fn apply_modifiers_with_report(
    dom: &mut Dom,
    node: NodeId,
    modifiers: &[Modifier],
    context: PartialContext,
    options: ApplyOptions,
) -> ApplyReport {
    let mut report = ApplyReport {
        node,
        applied: 0,
        failures: Vec::new(),
    };
    if modifiers.is_empty() {
        return report;
    }

    let mut context = context.resolve(dom, node);
    let entries = resolve_lazy(modifiers);
    let ordered = if options.batch {
        batch_order(&entries)
    } else {
        sequential_order(&entries)
    };

    for entry in ordered {
        let modifier = &entry.modifier;
        let mut cleanups = Vec::new();
        let result = match &entry.error {
            Some(err) => Err(err.clone()),
            None => {
                let mut scope = ApplyScope::new(dom, report.node, &context, &mut cleanups);
                modifier.apply(&mut scope)
            }
        };
        for cleanup in cleanups {
            dom.add_disposer(node, cleanup);
        }

        match result {
            Ok(replacement) => {
                trace!(
                    name = modifier.name(),
                    kind = %modifier.kind(),
                    priority = modifier.priority(),
                    "modifier applied"
                );
                report.applied += 1;
                if let Some(replacement) = replacement {
                    report.node = replacement;
                    context.element = Some(replacement);
                    context.parent_element = dom.parent(replacement);
                }
            }
            Err(err) => {
                if options.log_failures && !err.is_fatal() {
                    warn!(
                        name = modifier.name(),
                        kind = %modifier.kind(),
                        component = %context.component_id,
                        error = %err,
                        "modifier failed; skipping"
                    );
                }
                report.failures.push(err);
            }
        }
    }
    report
}

/// A modifier ready to order, or the error its lazy lookup produced.
struct Entry {
    modifier: Modifier,
    error: Option<ApplyError>,
}

/// Swap lazy descriptors for what they resolve to, so that ordering uses the
/// real kind and priority. A priority set on the lazy descriptor itself wins
/// over the resolved one. Lookups that fail keep the lazy descriptor and its
/// error.
fn resolve_lazy(modifiers: &[Modifier]) -> Vec<Entry> {
    modifiers
        .iter()
        .map(|modifier| {
            let ModifierProps::Lazy(lazy) = modifier.props() else {
                return Entry {
                    modifier: modifier.clone(),
                    error: None,
                };
            };
            match lazy.resolve() {
                Ok(resolved) => {
                    let overridden = modifier.priority() != modifier.kind().default_priority();
                    let resolved = if overridden {
                        resolved.with_priority(modifier.priority())
                    } else {
                        resolved
                    };
                    Entry {
                        modifier: resolved,
                        error: None,
                    }
                }
                Err(err) => Entry {
                    modifier: modifier.clone(),
                    error: Some(err),
                },
            }
        })
        .collect()
}

fn sequential_order(entries: &[Entry]) -> Vec<&Entry> {
    let mut ordered: Vec<&Entry> = entries.iter().collect();
    ordered.sort_by_key(|e| e.modifier.priority());
    ordered
}

fn batch_order(entries: &[Entry]) -> Vec<&Entry> {
    let mut groups: IndexMap<&ModifierKind, Vec<&Entry>> = IndexMap::new();
    for entry in entries {
        groups.entry(entry.modifier.kind()).or_default().push(entry);
    }
    groups
        .into_values()
        .flat_map(|mut group| {
            group.sort_by_key(|e| e.modifier.priority());
            group
        })
        .collect()
}

/// Apply the snapshot attached to `node` by a modifiable component.
///
/// Fields missing from `context` are taken from the snapshot. A node without a
/// snapshot is returned unchanged.
pub fn apply_snapshot(
    dom: &mut Dom,
    node: NodeId,
    mut context: PartialContext,
    options: ApplyOptions,
) -> Result<NodeId, ApplyError> {
    let Some(snapshot) = dom.snapshot(node).cloned() else {
        return Ok(node);
    };
    if context.component_id.is_none() {
        context.component_id = Some(snapshot.component_id.clone());
    }
    if context.component_instance.is_none() {
        context.component_instance = Some(snapshot.component_type.clone());
    }
    trace!(
        component = %snapshot.component_id,
        version = snapshot.version,
        count = snapshot.modifiers.len(),
        "applying snapshot"
    );
    apply_modifiers_to_node(dom, node, &snapshot.modifiers, context, options)
}
