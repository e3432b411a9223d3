use std::collections::VecDeque;

use crate::containers::HashSet;
use crate::engine::ConstraintId;

/// The work-list of a propagator: constraints awaiting re-evaluation in order of arrival.
///
/// A constraint is present at most once; pushing a constraint which is already waiting leaves it
/// at its current position.
#[derive(Debug, Clone, Default)]
pub(crate) struct Agenda {
    queue: VecDeque<ConstraintId>,
    is_enqueued: HashSet<ConstraintId>,
}

impl Agenda {
    pub(crate) fn len(&self) -> usize {
        self.queue.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub(crate) fn contains(&self, constraint: ConstraintId) -> bool {
        self.is_enqueued.contains(&constraint)
    }

    /// Returns whether the constraint was not yet on the agenda.
    pub(crate) fn push(&mut self, constraint: ConstraintId) -> bool {
        if !self.is_enqueued.insert(constraint) {
            return false;
        }
        self.queue.push_back(constraint);
        true
    }

    /// Puts a constraint at the head of the agenda, e.g. because its execution was cut short.
    pub(crate) fn push_front(&mut self, constraint: ConstraintId) {
        if self.is_enqueued.insert(constraint) {
            self.queue.push_front(constraint);
        }
    }

    pub(crate) fn pop(&mut self) -> Option<ConstraintId> {
        let constraint = self.queue.pop_front()?;
        let _ = self.is_enqueued.remove(&constraint);
        Some(constraint)
    }

    pub(crate) fn remove(&mut self, constraint: ConstraintId) -> bool {
        if !self.is_enqueued.remove(&constraint) {
            return false;
        }
        self.queue.retain(|enqueued| *enqueued != constraint);
        true
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = ConstraintId> + '_ {
        self.queue.iter().copied()
    }
}
