use enumset::enum_set;

use crate::engine::DomainChange;
use crate::engine::DomainChanges;
use crate::engine::EnqueueDecision;
use crate::engine::LocalFixpoint;
use crate::engine::PropagationContext;
use crate::engine::PropagationStatus;
use crate::engine::Relation;
use crate::schema::Arity;

/// The two arguments take different values.
///
/// Only propagates once one side is a singleton, whose value is then removed from the other side.
/// Intervals cannot represent holes, so the removal only bites on their bounds; a constraint is
/// therefore woken by bound changes as well as by new singletons.
#[derive(Debug, Clone, Copy, Default)]
pub struct NotEqual;

pub(super) const WAKING_CHANGES: DomainChanges = enum_set!(
    DomainChange::LowerBound | DomainChange::UpperBound | DomainChange::Singleton
);

impl Relation for NotEqual {
    fn name(&self) -> &str {
        "NotEqual"
    }

    fn arity(&self) -> Arity {
        Arity::Exactly(2)
    }

    fn propagate(&mut self, context: &mut PropagationContext<'_>) -> PropagationStatus {
        for (fixed, other) in [(0, 1), (1, 0)] {
            if let Some(value) = context.domain(fixed).singleton_value() {
                let _ = context.remove_value(other, &value)?;
            }
        }
        Ok(LocalFixpoint::Reached)
    }

    fn notify(&mut self, _argument: usize, changes: DomainChanges) -> EnqueueDecision {
        if changes.is_disjoint(WAKING_CHANGES) {
            EnqueueDecision::Skip
        } else {
            EnqueueDecision::Enqueue
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::Domain;
    use crate::engine::test_engine::TestEngine;

    #[test]
    fn singleton_value_is_removed_from_the_other_side() {
        let mut test = TestEngine::default();
        let x = test.new_int(3, 3);
        let y = test.new_int(3, 6);
        let _ = test.post("neq", [x, y]);

        assert!(test.propagate());
        test.assert_int_bounds(y, 4, 6);
    }

    #[test]
    fn interior_values_of_intervals_are_kept() {
        let mut test = TestEngine::default();
        let x = test.new_int(0, 10);
        let y = test.new_int(4, 4);
        let _ = test.post("neq", [x, y]);

        assert!(test.propagate());
        test.assert_int_bounds(x, 0, 10);
    }

    #[test]
    fn interior_removals_do_not_wake_the_constraint() {
        let mut relation = NotEqual;
        assert_eq!(
            relation.notify(0, DomainChange::Removal.into()),
            EnqueueDecision::Skip
        );
        assert_eq!(
            relation.notify(0, DomainChange::LowerBound.into()),
            EnqueueDecision::Enqueue
        );
        assert_eq!(
            relation.notify(1, DomainChange::UpperBound | DomainChange::Singleton),
            EnqueueDecision::Enqueue
        );
    }

    #[test]
    fn value_becoming_a_bound_is_removed() {
        let mut test = TestEngine::default();
        let x = test.new_int(4, 4);
        let y = test.new_int(3, 6);
        let z = test.new_int(4, 10);
        let _ = test.post("neq", [x, y]);
        let _ = test.post("leq", [z, y]);

        assert!(test.propagate());
        test.assert_int_bounds(y, 5, 6);
    }

    #[test]
    fn specifying_a_boolean_flips_the_other() {
        let mut test = TestEngine::default();
        let a = test.new_bool();
        let b = test.new_bool();
        let _ = test.post("neq", [a, b]);
        assert!(test.propagate());

        test.engine.specify(a, true).expect("true is a member");
        assert!(test.propagate());
        assert_eq!(test.domain(b), &Domain::from_value(&false.into()));
    }

    #[test]
    fn equal_singletons_are_inconsistent() {
        let mut test = TestEngine::default();
        let x = test.new_int(2, 2);
        let y = test.new_int(2, 2);
        let _ = test.post("neq", [x, y]);

        assert!(!test.propagate());
    }
}
