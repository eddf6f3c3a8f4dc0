//! Conflict report: a multimap from elements to conflict messages.

use indexmap::IndexMap;
use movecheck_common::{DiagnosticCategory, DiagnosticMessage};
use movecheck_model::Element;
use serde::Serialize;

/// One advisory conflict.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Conflict {
    pub code: u32,
    pub category: DiagnosticCategory,
    pub message: String,
}

impl Conflict {
    pub fn new(message: &DiagnosticMessage, args: &[&str]) -> Self {
        Self {
            code: message.code,
            category: message.category,
            message: message.format(args),
        }
    }
}

/// Conflicts keyed on the element they concern, in discovery order.
///
/// An element may carry several messages. Unlike a plain append-only
/// multimap, pushing a message identical to one already recorded for the
/// same element is a no-op, so checkers may rediscover a conflict freely.
#[derive(Clone, Debug, Default)]
pub struct ConflictReport {
    entries: IndexMap<Element, Vec<Conflict>>,
}

impl ConflictReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Format `message` with `args` and record it against `element`.
    pub fn push(&mut self, element: Element, message: &DiagnosticMessage, args: &[&str]) {
        self.push_conflict(element, Conflict::new(message, args));
    }

    pub fn push_conflict(&mut self, element: Element, conflict: Conflict) {
        tracing::trace!(?element, code = conflict.code, message = %conflict.message, "conflict");
        let conflicts = self.entries.entry(element).or_default();
        if !conflicts.contains(&conflict) {
            conflicts.push(conflict);
        }
    }

    /// Merge every entry of `other` into this report.
    pub fn extend(&mut self, other: ConflictReport) {
        for (element, conflicts) in other.entries {
            for conflict in conflicts {
                self.push_conflict(element, conflict);
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of conflicts over all elements.
    pub fn len(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    pub fn contains(&self, element: Element) -> bool {
        self.entries.contains_key(&element)
    }

    pub fn get(&self, element: Element) -> &[Conflict] {
        self.entries.get(&element).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Elements carrying at least one conflict.
    pub fn elements(&self) -> impl Iterator<Item = Element> + '_ {
        self.entries.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Element, &[Conflict])> + '_ {
        self.entries
            .iter()
            .map(|(element, conflicts)| (*element, conflicts.as_slice()))
    }

    /// Every conflict, flattened in report order.
    pub fn conflicts(&self) -> impl Iterator<Item = &Conflict> + '_ {
        self.entries.values().flatten()
    }

    pub fn has_errors(&self) -> bool {
        self.conflicts()
            .any(|c| c.category == DiagnosticCategory::Error)
    }
}
