use crate::domains::DomainKind;
use crate::domains::EPSILON;
use crate::engine::EmptyDomain;
use crate::engine::LocalFixpoint;
use crate::engine::PropagationContext;
use crate::engine::PropagationStatus;
use crate::engine::Relation;
use crate::schema::Arity;

/// `x <= y`, or `x < y` when strict, by bounds reasoning.
///
/// A strict comparison keeps a gap between the arguments: `1` if both arguments are integral and
/// [`EPSILON`] otherwise.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LessThanEqual {
    gap: f64,
}

impl LessThanEqual {
    pub fn non_strict() -> Self {
        LessThanEqual { gap: 0.0 }
    }

    /// A strict comparison between arguments of the given kinds.
    pub fn strict(kinds: &[DomainKind]) -> Self {
        let gap = if kinds.iter().all(|kind| kind.is_integral()) {
            1.0
        } else {
            EPSILON
        };
        LessThanEqual { gap }
    }

    pub fn is_strict(&self) -> bool {
        self.gap > 0.0
    }
}

impl Relation for LessThanEqual {
    fn name(&self) -> &str {
        if self.is_strict() {
            "LessThan"
        } else {
            "LessThanEqual"
        }
    }

    fn arity(&self) -> Arity {
        Arity::Exactly(2)
    }

    fn propagate(&mut self, context: &mut PropagationContext<'_>) -> PropagationStatus {
        let (Some((x_lower, _)), Some((_, y_upper))) = (
            context.domain(0).numeric_bounds(),
            context.domain(1).numeric_bounds(),
        ) else {
            return Err(EmptyDomain.into());
        };

        let _ = context.restrict_upper(0, y_upper - self.gap)?;
        let _ = context.restrict_lower(1, x_lower + self.gap)?;

        Ok(LocalFixpoint::Reached)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::Domain;
    use crate::engine::test_engine::TestEngine;

    #[test]
    fn bounds_are_pushed_in_both_directions() {
        let mut test = TestEngine::default();
        let x = test.new_int(5, 20);
        let y = test.new_int(0, 12);
        let _ = test.post("leq", [x, y]);

        assert!(test.propagate());
        test.assert_int_bounds(x, 5, 12);
        test.assert_int_bounds(y, 5, 12);
    }

    #[test]
    fn strict_integer_comparison_keeps_a_gap_of_one() {
        let mut test = TestEngine::default();
        let x = test.new_int(5, 20);
        let y = test.new_int(0, 12);
        let _ = test.post("lt", [x, y]);

        assert!(test.propagate());
        test.assert_int_bounds(x, 5, 11);
        test.assert_int_bounds(y, 6, 12);
    }

    #[test]
    fn strict_real_comparison_keeps_an_epsilon_gap() {
        let mut test = TestEngine::default();
        let x = test.new_float(0.0, 10.0);
        let y = test.new_float(0.0, 10.0);
        let _ = test.post("lt", [x, y]);

        assert!(test.propagate());
        assert_eq!(test.domain(x), &Domain::interval(0.0, 10.0 - EPSILON));
        assert_eq!(test.domain(y), &Domain::interval(EPSILON, 10.0));
    }

    #[test]
    fn chains_propagate_transitively() {
        let mut test = TestEngine::default();
        let x = test.new_int(0, 10);
        let y = test.new_int(0, 10);
        let z = test.new_int(0, 3);
        let _ = test.post("lt", [x, y]);
        let _ = test.post("lt", [y, z]);

        assert!(test.propagate());
        test.assert_int_bounds(x, 0, 1);
        test.assert_int_bounds(y, 1, 2);
        test.assert_int_bounds(z, 2, 3);
    }

    #[test]
    fn crossing_bounds_are_inconsistent() {
        let mut test = TestEngine::default();
        let x = test.new_int(5, 8);
        let y = test.new_int(0, 5);
        let _ = test.post("lt", [x, y]);

        assert!(!test.propagate());
    }

    #[test]
    fn symbolic_arguments_are_rejected() {
        let mut test = TestEngine::default();
        test.engine
            .schema_mut()
            .register_factory(crate::schema::SymbolicTypeFactory::new("colour", ["red"]))
            .expect("colour is not yet registered");
        let x = test
            .engine
            .new_variable("colour")
            .create()
            .expect("colour is registered");
        let y = test.new_int(0, 1);

        assert!(test.engine.new_constraint("leq", [x, y]).post().is_err());
    }
}
