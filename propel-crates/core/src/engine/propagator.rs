use std::fmt::Display;
use std::fmt::Formatter;

use super::agenda::Agenda;
use crate::basic_types::Entity;
use crate::containers::HashSet;
use crate::containers::StorageKey;
use crate::engine::ConstraintId;

/// An identifier of a propagator category within a [`ConstraintEngine`](crate::ConstraintEngine).
///
/// Propagators are never removed, so the identifier stays valid for the lifetime of the engine.
#[repr(transparent)]
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct PropagatorId(pub(crate) u32);

impl Display for PropagatorId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "PropagatorId({})", self.0)
    }
}

impl StorageKey for PropagatorId {
    fn index(&self) -> usize {
        self.0 as usize
    }

    fn create_from_index(index: usize) -> Self {
        PropagatorId(index as u32)
    }
}

/// The order in which dirty propagators are run; lower values run first.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum Priority {
    High = 0,
    Medium = 1,
    Low = 2,
    #[default]
    VeryLow = 3,
}

impl Priority {
    pub(crate) const NUM_LEVELS: u32 = 4;
}

/// The life cycle of a propagator within one call to
/// [`ConstraintEngine::propagate`](crate::ConstraintEngine::propagate).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PropagatorState {
    /// The agenda is empty.
    Idle,
    /// Constraints are waiting on the agenda.
    Dirty,
    /// The agenda is being drained.
    Executing,
}

/// A propagation category: the constraints attached to it and its agenda.
#[derive(Debug)]
pub struct Propagator {
    pub(crate) entity: Entity,
    pub(crate) priority: Priority,
    pub(crate) state: PropagatorState,
    pub(crate) agenda: Agenda,
    pub(crate) constraints: HashSet<ConstraintId>,
}

impl Propagator {
    pub(crate) fn new(entity: Entity, priority: Priority) -> Propagator {
        Propagator {
            entity,
            priority,
            state: PropagatorState::Idle,
            agenda: Agenda::default(),
            constraints: HashSet::default(),
        }
    }

    pub fn entity(&self) -> &Entity {
        &self.entity
    }

    pub fn name(&self) -> &str {
        self.entity.name()
    }

    pub fn priority(&self) -> Priority {
        self.priority
    }

    pub fn state(&self) -> PropagatorState {
        self.state
    }

    pub fn agenda_len(&self) -> usize {
        self.agenda.len()
    }

    /// The constraints waiting on the agenda, in the order they will be executed.
    pub fn agenda(&self) -> impl Iterator<Item = ConstraintId> + '_ {
        self.agenda.iter()
    }

    /// The constraints attached to this propagator, in no particular order.
    pub fn constraints(&self) -> impl Iterator<Item = ConstraintId> + '_ {
        self.constraints.iter().copied()
    }

    /// Re-derives the state from the agenda once execution has stopped.
    pub(crate) fn settle(&mut self) {
        self.state = if self.agenda.is_empty() {
            PropagatorState::Idle
        } else {
            PropagatorState::Dirty
        };
    }
}
