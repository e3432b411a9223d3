use std::fmt::Debug;
use std::sync::Arc;

use downcast_rs::impl_downcast;
use downcast_rs::Downcast;

use super::PropagationContext;
use crate::basic_types::DomainError;
use crate::basic_types::Entity;
use crate::containers::Handle;
use crate::engine::DomainChanges;
use crate::engine::PropagatorId;
use crate::engine::VariableId;
use crate::schema::Arity;

/// A generation-checked reference to a [`Constraint`] of a
/// [`ConstraintEngine`](crate::ConstraintEngine).
pub type ConstraintId = Handle<Constraint>;

/// A domain became empty while a constraint was propagating.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmptyDomain;

/// Why the propagation of a constraint stopped before completing.
#[derive(Debug, Clone, PartialEq)]
pub enum PropagationFailure {
    /// The constraint cannot be satisfied with the current domains. This is an expected outcome
    /// which makes the network inconsistent.
    EmptyDomain,
    /// The relation combined domains in an unsupported way.
    Domain(DomainError),
}

impl From<EmptyDomain> for PropagationFailure {
    fn from(_: EmptyDomain) -> Self {
        PropagationFailure::EmptyDomain
    }
}

impl From<DomainError> for PropagationFailure {
    fn from(error: DomainError) -> Self {
        PropagationFailure::Domain(error)
    }
}

/// Whether a relation has done all the narrowing it can do with the current domains.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocalFixpoint {
    Reached,
    /// The constraint is put back on its agenda.
    NotReached,
}

pub type PropagationStatus = Result<LocalFixpoint, PropagationFailure>;

/// Whether a constraint should be put on the agenda after a change to one of its arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnqueueDecision {
    Enqueue,
    Skip,
}

/// The filtering algorithm of a constraint.
///
/// A relation only sees its arguments through the [`PropagationContext`], addressed by their
/// position in the scope. Propagation must be monotonic: it may only remove values.
pub trait Relation: Downcast + Debug {
    /// The name used in logging.
    fn name(&self) -> &str;

    /// The number of arguments the relation accepts; scopes of another length are rejected when
    /// the constraint is added.
    fn arity(&self) -> Arity;

    /// Narrows the domains of the arguments.
    fn propagate(&mut self, context: &mut PropagationContext<'_>) -> PropagationStatus;

    /// Called when the domain of the argument at position `argument` changed because of another
    /// constraint or an external restriction.
    fn notify(&mut self, argument: usize, changes: DomainChanges) -> EnqueueDecision {
        let _ = (argument, changes);
        EnqueueDecision::Enqueue
    }
}

impl_downcast!(Relation);

/// A relation over an ordered scope of variables, attached to one propagator.
#[derive(Debug)]
pub struct Constraint {
    pub(crate) entity: Entity,
    pub(crate) type_name: Arc<str>,
    pub(crate) scope: Vec<VariableId>,
    pub(crate) propagator: PropagatorId,
    pub(crate) active: bool,
    pub(crate) relation: Box<dyn Relation>,
}

impl Constraint {
    pub fn entity(&self) -> &Entity {
        &self.entity
    }

    pub fn name(&self) -> &Arc<str> {
        self.entity.name()
    }

    /// The constraint type the constraint was created from, or the relation name for constraints
    /// added directly.
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn scope(&self) -> &[VariableId] {
        &self.scope
    }

    pub fn propagator(&self) -> PropagatorId {
        self.propagator
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn relation(&self) -> &dyn Relation {
        self.relation.as_ref()
    }
}
