use enumset::EnumSet;
use enumset::EnumSetType;

use crate::basic_types::Entity;
use crate::domains::Domain;
use crate::engine::ConstraintId;
use crate::engine::VariableId;

/// A way in which the domain of a variable can change.
#[derive(Debug, Hash, EnumSetType)]
pub enum DomainChange {
    /// The smallest member was removed.
    LowerBound,
    /// The largest member was removed.
    UpperBound,
    /// A member other than a bound was removed.
    Removal,
    /// Exactly one member is left.
    Singleton,
    /// No member is left.
    Emptied,
    /// Members were added back.
    Relaxed,
}

pub type DomainChanges = EnumSet<DomainChange>;

/// Describes how `before` turned into `after`.
///
/// Narrowings are classified by which side of the domain moved; any widening is reported as
/// [`DomainChange::Relaxed`] only.
pub(crate) fn changes_between(before: &Domain, after: &Domain) -> DomainChanges {
    if before == after {
        return DomainChanges::empty();
    }
    if !after.is_subset_of(before) {
        return DomainChange::Relaxed.into();
    }
    if after.is_empty() {
        return DomainChange::Emptied.into();
    }

    let mut changes = DomainChanges::empty();
    match (before.numeric_bounds(), after.numeric_bounds()) {
        (Some((old_lower, old_upper)), Some((new_lower, new_upper))) => {
            if new_lower > old_lower {
                changes |= DomainChange::LowerBound;
            }
            if new_upper < old_upper {
                changes |= DomainChange::UpperBound;
            }
            if changes.is_empty() {
                changes |= DomainChange::Removal;
            }
        }
        _ => changes |= DomainChange::Removal,
    }
    if after.is_singleton() {
        changes |= DomainChange::Singleton;
    }
    changes
}

/// The notifications which are queued for the
/// [`ConstraintEngineListener`](crate::ConstraintEngineListener)s.
#[derive(Debug, Clone)]
pub(crate) enum EngineEvent {
    VariableAdded(VariableId),
    VariableRemoved(Entity),
    ConstraintAdded(ConstraintId),
    ConstraintRemoved(Entity),
    ConstraintActivated(ConstraintId),
    ConstraintDeactivated(ConstraintId),
    DomainChanged {
        variable: VariableId,
        changes: DomainChanges,
    },
    PropagationCompleted,
    PropagationPreempted(ConstraintId),
}
