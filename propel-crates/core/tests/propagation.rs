#![cfg(test)] // workaround for https://github.com/rust-lang/rust-clippy/issues/11024

mod utils;

use std::cell::Cell;
use std::rc::Rc;

use propel_core::domains::Domain;
use propel_core::engine::ConstraintEngineListener;
use propel_core::engine::DomainChange;
use propel_core::engine::DomainChanges;
use propel_core::engine::ListenerContext;
use propel_core::engine::VariableId;
use propel_core::ConstraintEngine;
use proptest::prelude::*;
use utils::*;

const NUM_VARIABLES: usize = 4;
const CONSTRAINT_TYPES: [(&str, usize); 6] = [
    ("eq", 2),
    ("neq", 2),
    ("leq", 2),
    ("lt", 2),
    ("addEq", 3),
    ("allDiff", 3),
];

/// A constraint of one of [`CONSTRAINT_TYPES`] over up to three of the variables.
type ConstraintChoice = (usize, [usize; 3]);

fn bounds_strategy() -> impl Strategy<Value = Vec<(i64, i64)>> {
    prop::collection::vec(
        (-10_i64..10, 0_i64..10).prop_map(|(lower, width)| (lower, lower + width)),
        NUM_VARIABLES,
    )
}

fn constraints_strategy() -> impl Strategy<Value = Vec<ConstraintChoice>> {
    prop::collection::vec(
        (
            0..CONSTRAINT_TYPES.len(),
            [0..NUM_VARIABLES, 0..NUM_VARIABLES, 0..NUM_VARIABLES],
        ),
        1..6,
    )
}

fn scope_of(choice: &ConstraintChoice, variables: &[VariableId]) -> Option<Vec<VariableId>> {
    let arity = CONSTRAINT_TYPES[choice.0].1;
    let arguments = &choice.1[..arity];
    let distinct = arguments
        .iter()
        .enumerate()
        .all(|(index, argument)| !arguments[..index].contains(argument));
    distinct.then(|| arguments.iter().map(|argument| variables[*argument]).collect())
}

fn build(
    bounds: &[(i64, i64)],
    constraints: impl Iterator<Item = ConstraintChoice>,
) -> (ConstraintEngine, Vec<VariableId>) {
    let mut engine = ConstraintEngine::default();
    let variables: Vec<VariableId> = bounds
        .iter()
        .map(|(lower, upper)| new_int(&mut engine, *lower, *upper))
        .collect();

    for choice in constraints {
        if let Some(scope) = scope_of(&choice, &variables) {
            let _ = engine
                .new_constraint(CONSTRAINT_TYPES[choice.0].0, scope)
                .post()
                .expect("valid constraint");
        }
    }
    (engine, variables)
}

/// Records whether a domain was widened while the engine was propagating.
#[derive(Debug, Default)]
struct WideningDetector {
    widened: Rc<Cell<bool>>,
}

impl ConstraintEngineListener for WideningDetector {
    fn domain_changed(
        &mut self,
        context: &mut ListenerContext<'_>,
        _variable: VariableId,
        changes: DomainChanges,
    ) {
        if context.engine().is_propagating() && changes.contains(DomainChange::Relaxed) {
            self.widened.set(true);
        }
    }
}

#[test]
fn propagating_twice_changes_nothing() {
    init_logging();
    let mut engine = ConstraintEngine::default();
    let x = new_int(&mut engine, 0, 10);
    let y = new_int(&mut engine, 3, 20);
    let z = new_int(&mut engine, 0, 30);
    let _ = engine.new_constraint("leq", [y, x]).post().expect("valid");
    let _ = engine.new_constraint("addEq", [x, y, z]).post().expect("valid");

    assert!(engine.propagate().expect("no error"));
    let first = domains(&engine, &[x, y, z]);
    assert!(!engine.is_propagation_pending());

    assert!(engine.propagate().expect("no error"));
    assert_eq!(domains(&engine, &[x, y, z]), first);
}

#[test]
fn disjoint_equality_is_reported_as_inconsistent() {
    init_logging();
    let mut engine = ConstraintEngine::default();
    let x = new_int(&mut engine, 0, 5);
    let y = new_int(&mut engine, 10, 15);
    let _ = engine.new_constraint("eq", [x, y]).post().expect("valid");

    assert_eq!(engine.propagate(), Ok(false));
    assert!(!engine.is_consistent());

    // Nothing changed, so the verdict stands.
    assert_eq!(engine.propagate(), Ok(false));
}

#[test]
fn relaxing_a_specified_variable_restores_the_network() {
    init_logging();
    let mut engine = ConstraintEngine::default();
    let x = new_int(&mut engine, 0, 10);
    let y = new_int(&mut engine, 0, 10);
    let z = new_int(&mut engine, 0, 20);
    let _ = engine.new_constraint("lt", [x, y]).post().expect("valid");
    let _ = engine.new_constraint("addEq", [x, y, z]).post().expect("valid");

    assert!(engine.propagate().expect("no error"));
    let before = domains(&engine, &[x, y, z]);

    engine.specify(y, 2).expect("2 is a member");
    assert!(engine.propagate().expect("no error"));
    assert_eq!(engine.domain(x), Ok(&Domain::interval_int(0, 1)));

    engine.relax(y).expect("live variable");
    assert!(engine.propagate().expect("no error"));
    assert_eq!(domains(&engine, &[x, y, z]), before);
}

#[test]
fn specifying_into_a_contradiction_can_be_undone() {
    init_logging();
    let mut engine = ConstraintEngine::default();
    let x = new_int(&mut engine, 0, 10);
    let y = new_int(&mut engine, 0, 10);
    let _ = engine.new_constraint("lt", [x, y]).post().expect("valid");

    engine.specify(x, 10).expect("10 is a member");
    assert_eq!(engine.propagate(), Ok(false));

    engine.relax(x).expect("live variable");
    assert!(engine.is_consistent());
    assert_eq!(engine.propagate(), Ok(true));
    assert_eq!(engine.domain(x), Ok(&Domain::interval_int(0, 9)));
}

proptest! {
    #[test]
    fn propagation_only_narrows(
        bounds in bounds_strategy(),
        constraints in constraints_strategy(),
    ) {
        let (mut engine, variables) = build(&bounds, constraints.into_iter());
        let widened = Rc::new(Cell::new(false));
        engine.add_listener(WideningDetector {
            widened: Rc::clone(&widened),
        });
        let before = domains(&engine, &variables);

        let _ = engine.propagate().expect("no error");
        let after = domains(&engine, &variables);
        for (old, new) in before.iter().zip(&after) {
            prop_assert!(new.is_subset_of(old), "{old} was widened to {new}");
        }
        prop_assert!(!widened.get());
    }

    #[test]
    fn posting_order_does_not_change_the_fixpoint(
        bounds in bounds_strategy(),
        constraints in constraints_strategy(),
    ) {
        let (mut forward, forward_variables) = build(&bounds, constraints.clone().into_iter());
        let (mut backward, backward_variables) = build(&bounds, constraints.into_iter().rev());

        let forward_consistent = forward.propagate().expect("no error");
        let backward_consistent = backward.propagate().expect("no error");

        prop_assert_eq!(forward_consistent, backward_consistent);
        if forward_consistent {
            prop_assert_eq!(
                domains(&forward, &forward_variables),
                domains(&backward, &backward_variables)
            );
        }
    }
}
