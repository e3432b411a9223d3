use super::not_equal::WAKING_CHANGES;
use crate::engine::DomainChanges;
use crate::engine::EnqueueDecision;
use crate::engine::LocalFixpoint;
use crate::engine::PropagationContext;
use crate::engine::PropagationStatus;
use crate::engine::Relation;
use crate::schema::Arity;

/// All arguments take pairwise different values.
///
/// The value of every singleton argument is removed from the other arguments, until no removal
/// is possible.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllDifferent;

impl Relation for AllDifferent {
    fn name(&self) -> &str {
        "AllDifferent"
    }

    fn arity(&self) -> Arity {
        Arity::AtLeast(2)
    }

    fn propagate(&mut self, context: &mut PropagationContext<'_>) -> PropagationStatus {
        // A removal can turn another argument into a singleton, or move the value of an earlier
        // singleton onto a bound, so sweep until nothing changes.
        loop {
            let mut changed = false;
            for fixed in 0..context.arity() {
                let Some(value) = context.domain(fixed).singleton_value() else {
                    continue;
                };
                for other in (0..context.arity()).filter(|other| *other != fixed) {
                    changed |= context.remove_value(other, &value)?;
                }
            }

            if !changed {
                return Ok(LocalFixpoint::Reached);
            }
        }
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
    use crate::schema::EnumeratedTypeFactory;

    fn new_digit(test: &mut TestEngine, values: &[f64]) -> crate::engine::VariableId {
        test.engine
            .new_variable("digit")
            .with_base_domain(Domain::enumerated(values.iter().copied()))
            .create()
            .expect("digit is registered")
    }

    #[test]
    fn singletons_cascade_through_the_scope() {
        let mut test = TestEngine::default();
        test.engine
            .schema_mut()
            .register_factory(EnumeratedTypeFactory::new("digit", [1.0, 2.0, 3.0]))
            .expect("digit is not yet registered");
        let x = new_digit(&mut test, &[1.0]);
        let y = new_digit(&mut test, &[1.0, 2.0]);
        let z = new_digit(&mut test, &[1.0, 2.0, 3.0]);
        let _ = test.post("allDiff", [x, y, z]);

        assert!(test.propagate());
        assert_eq!(test.domain(y), &Domain::enumerated([2.0]));
        assert_eq!(test.domain(z), &Domain::enumerated([3.0]));
    }

    #[test]
    fn specifying_wakes_the_constraint() {
        let mut test = TestEngine::default();
        let x = test.new_int(0, 2);
        let y = test.new_int(0, 2);
        let _ = test.post("allDiff", [x, y]);
        assert!(test.propagate());

        test.engine.specify(x, 0).expect("0 is a member");
        assert!(test.propagate());
        test.assert_int_bounds(y, 1, 2);
    }

    #[test]
    fn earlier_singletons_are_revisited() {
        let mut test = TestEngine::default();
        let x = test.new_int(6, 6);
        let y = test.new_int(5, 5);
        let z = test.new_int(5, 7);
        let _ = test.post("allDiff", [x, y, z]);

        assert!(test.propagate());
        test.assert_int_bounds(z, 7, 7);
    }

    #[test]
    fn repeated_singletons_are_inconsistent() {
        let mut test = TestEngine::default();
        let x = test.new_int(4, 4);
        let y = test.new_int(0, 9);
        let z = test.new_int(4, 4);
        let _ = test.post("allDiff", [x, y, z]);

        assert!(!test.propagate());
    }
}
