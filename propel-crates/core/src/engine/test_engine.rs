//! A thin wrapper around [`ConstraintEngine`] for unit tests, which panics instead of returning
//! errors.
use crate::domains::Domain;
use crate::engine::ConstraintEngine;
use crate::engine::ConstraintId;
use crate::engine::VariableId;

#[derive(Debug, Default)]
pub(crate) struct TestEngine {
    pub(crate) engine: ConstraintEngine,
}

impl TestEngine {
    pub(crate) fn new_int(&mut self, lower_bound: i64, upper_bound: i64) -> VariableId {
        self.engine
            .new_variable("int")
            .with_base_domain(Domain::interval_int(lower_bound, upper_bound))
            .create()
            .expect("int is a default type")
    }

    pub(crate) fn new_float(&mut self, lower_bound: f64, upper_bound: f64) -> VariableId {
        self.engine
            .new_variable("float")
            .with_base_domain(Domain::interval(lower_bound, upper_bound))
            .create()
            .expect("float is a default type")
    }

    pub(crate) fn new_bool(&mut self) -> VariableId {
        self.engine
            .new_variable("bool")
            .create()
            .expect("bool is a default type")
    }

    pub(crate) fn post<const N: usize>(
        &mut self,
        constraint_type: &str,
        scope: [VariableId; N],
    ) -> ConstraintId {
        self.engine
            .new_constraint(constraint_type, scope)
            .post()
            .expect("the constraint should be valid")
    }

    pub(crate) fn propagate(&mut self) -> bool {
        self.engine
            .propagate()
            .expect("propagation should not fail with an error")
    }

    pub(crate) fn domain(&self, variable: VariableId) -> &Domain {
        self.engine.domain(variable).expect("live variable")
    }

    pub(crate) fn assert_int_bounds(
        &self,
        variable: VariableId,
        lower_bound: i64,
        upper_bound: i64,
    ) {
        assert_eq!(
            self.domain(variable),
            &Domain::interval_int(lower_bound, upper_bound),
            "unexpected domain for {variable}"
        );
    }
}
