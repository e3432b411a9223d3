use std::sync::Arc;

use log::warn;

use crate::basic_types::EngineError;
use crate::domains::Domain;
use crate::engine::ConstraintEngine;
use crate::engine::ConstraintId;
use crate::engine::PropagatorId;
use crate::engine::VariableId;

/// Builds a variable of a registered type; see [`ConstraintEngine::new_variable`].
#[derive(Debug)]
pub struct VariablePoster<'engine> {
    engine: &'engine mut ConstraintEngine,
    type_name: Option<String>,
    base_domain: Option<Domain>,
    name: Option<Arc<str>>,
    can_be_specified: bool,
}

impl<'engine> VariablePoster<'engine> {
    pub(crate) fn new(engine: &'engine mut ConstraintEngine, type_name: &str) -> Self {
        VariablePoster {
            engine,
            type_name: Some(type_name.to_owned()),
            base_domain: None,
            name: None,
            can_be_specified: true,
        }
    }

    /// Uses `base_domain` instead of the base domain of the type. It must be of the kind the type
    /// declares.
    pub fn with_base_domain(mut self, base_domain: Domain) -> Self {
        self.base_domain = Some(base_domain);
        self
    }

    pub fn named(mut self, name: impl Into<Arc<str>>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Makes the variable derived: only propagation may narrow it.
    pub fn derived(mut self) -> Self {
        self.can_be_specified = false;
        self
    }

    pub fn create(mut self) -> Result<VariableId, EngineError> {
        let type_name = self.type_name.take().unwrap_or_default();
        self.engine.create_variable(
            &type_name,
            self.base_domain.take(),
            self.name.take(),
            self.can_be_specified,
        )
    }
}

impl Drop for VariablePoster<'_> {
    fn drop(&mut self) {
        if let Some(type_name) = &self.type_name {
            warn!(
                "A variable poster for type '{type_name}' is never used, this is likely a mistake."
            );
        }
    }
}

/// Builds a constraint of a registered constraint type; see [`ConstraintEngine::new_constraint`].
#[derive(Debug)]
pub struct ConstraintPoster<'engine> {
    engine: &'engine mut ConstraintEngine,
    type_name: Option<String>,
    scope: Vec<VariableId>,
    propagator: Option<PropagatorId>,
    name: Option<Arc<str>>,
}

impl<'engine> ConstraintPoster<'engine> {
    pub(crate) fn new(
        engine: &'engine mut ConstraintEngine,
        type_name: &str,
        scope: Vec<VariableId>,
    ) -> Self {
        ConstraintPoster {
            engine,
            type_name: Some(type_name.to_owned()),
            scope,
            propagator: None,
            name: None,
        }
    }

    /// Attaches the constraint to `propagator` instead of the propagator its type names.
    pub fn on_propagator(mut self, propagator: PropagatorId) -> Self {
        self.propagator = Some(propagator);
        self
    }

    pub fn named(mut self, name: impl Into<Arc<str>>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Adds the constraint to the engine and puts it on the agenda of its propagator.
    pub fn post(mut self) -> Result<ConstraintId, EngineError> {
        let type_name = self.type_name.take().unwrap_or_default();
        self.engine.create_constraint(
            &type_name,
            std::mem::take(&mut self.scope),
            self.propagator,
            self.name.take(),
        )
    }
}

impl Drop for ConstraintPoster<'_> {
    fn drop(&mut self) {
        if let Some(type_name) = &self.type_name {
            warn!(
                "A constraint poster for type '{type_name}' is never used, this is likely a mistake."
            );
        }
    }
}
