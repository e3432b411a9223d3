use std::sync::Arc;

use crate::basic_types::Entity;
use crate::containers::Handle;
use crate::domains::Domain;
use crate::domains::Value;
use crate::engine::ConstraintId;

/// A generation-checked reference to a [`ConstrainedVariable`] of a
/// [`ConstraintEngine`](crate::ConstraintEngine).
pub type VariableId = Handle<ConstrainedVariable>;

/// An occurrence of a variable in the scope of a constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConstraintRef {
    pub constraint: ConstraintId,
    /// The position of the variable in the scope of the constraint.
    pub argument: usize,
}

/// A slot of the constraint network holding one [`Domain`].
///
/// The domain only changes through the engine: by propagation, or by
/// [`specify`](crate::ConstraintEngine::specify) and [`relax`](crate::ConstraintEngine::relax).
#[derive(Debug, Clone)]
pub struct ConstrainedVariable {
    pub(crate) entity: Entity,
    pub(crate) type_name: Arc<str>,
    pub(crate) base_domain: Domain,
    pub(crate) domain: Domain,
    pub(crate) specified: Option<Value>,
    pub(crate) can_be_specified: bool,
    pub(crate) constraints: Vec<ConstraintRef>,
}

impl ConstrainedVariable {
    pub(crate) fn new(
        entity: Entity,
        type_name: Arc<str>,
        base_domain: Domain,
        can_be_specified: bool,
    ) -> ConstrainedVariable {
        ConstrainedVariable {
            entity,
            type_name,
            domain: base_domain.clone(),
            base_domain,
            specified: None,
            can_be_specified,
            constraints: Vec::new(),
        }
    }

    pub fn entity(&self) -> &Entity {
        &self.entity
    }

    pub fn name(&self) -> &Arc<str> {
        self.entity.name()
    }

    /// The name of the type the variable was created with.
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn domain(&self) -> &Domain {
        &self.domain
    }

    pub fn base_domain(&self) -> &Domain {
        &self.base_domain
    }

    pub fn is_specified(&self) -> bool {
        self.specified.is_some()
    }

    pub fn specified_value(&self) -> Option<&Value> {
        self.specified.as_ref()
    }

    /// Whether external code may [`specify`](crate::ConstraintEngine::specify) the variable;
    /// derived variables are only narrowed by propagation.
    pub fn can_be_specified(&self) -> bool {
        self.can_be_specified
    }

    /// The constraints whose scope contains this variable, one entry per occurrence.
    pub fn constraints(&self) -> &[ConstraintRef] {
        &self.constraints
    }

    /// The domain the variable returns to when it is relaxed: its specified value, if any,
    /// within the base domain.
    pub(crate) fn reset_domain(&self) -> Domain {
        let mut domain = self.base_domain.clone();
        if let Some(value) = &self.specified {
            // The value was a member when it was specified, and the base domain cannot change
            // afterwards.
            let _ = domain.intersect(&Domain::from_value(value));
        }
        domain
    }

    pub(crate) fn attach(&mut self, constraint: ConstraintId, argument: usize) {
        let reference = ConstraintRef {
            constraint,
            argument,
        };
        if !self.constraints.contains(&reference) {
            self.constraints.push(reference);
        }
    }

    pub(crate) fn detach(&mut self, constraint: ConstraintId) {
        self.constraints
            .retain(|reference| reference.constraint != constraint);
    }
}
