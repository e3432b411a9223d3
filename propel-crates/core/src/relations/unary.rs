use crate::domains::Domain;
use crate::engine::DomainChanges;
use crate::engine::EnqueueDecision;
use crate::engine::LocalFixpoint;
use crate::engine::PropagationContext;
use crate::engine::PropagationStatus;
use crate::engine::Relation;
use crate::schema::Arity;

/// Restricts its single argument to a fixed domain.
#[derive(Debug, Clone)]
pub struct Unary {
    domain: Domain,
}

impl Unary {
    pub fn new(domain: Domain) -> Self {
        Unary { domain }
    }

    pub fn domain(&self) -> &Domain {
        &self.domain
    }
}

impl Relation for Unary {
    fn name(&self) -> &str {
        "Unary"
    }

    fn arity(&self) -> Arity {
        Arity::Exactly(1)
    }

    fn propagate(&mut self, context: &mut PropagationContext<'_>) -> PropagationStatus {
        let _ = context.restrict(0, &self.domain)?;
        Ok(LocalFixpoint::Reached)
    }

    /// Narrowing can never take the argument out of the fixed domain.
    fn notify(&mut self, _argument: usize, _changes: DomainChanges) -> EnqueueDecision {
        EnqueueDecision::Skip
    }
}
