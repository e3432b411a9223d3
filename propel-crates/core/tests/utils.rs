#![allow(dead_code, reason = "every test file uses a different part of the helpers")]

use propel_core::domains::Domain;
use propel_core::engine::VariableId;
use propel_core::ConstraintEngine;

pub(crate) fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub(crate) fn new_int(
    engine: &mut ConstraintEngine,
    lower_bound: i64,
    upper_bound: i64,
) -> VariableId {
    engine
        .new_variable("int")
        .with_base_domain(Domain::interval_int(lower_bound, upper_bound))
        .create()
        .expect("int is a default type")
}

pub(crate) fn domains(engine: &ConstraintEngine, variables: &[VariableId]) -> Vec<Domain> {
    variables
        .iter()
        .map(|variable| engine.domain(*variable).expect("live variable").clone())
        .collect()
}
