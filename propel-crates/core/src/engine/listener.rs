use std::fmt::Debug;

use crate::basic_types::Entity;
use crate::basic_types::EntityRef;
use crate::engine::ConstraintEngine;
use crate::engine::ConstraintId;
use crate::engine::DomainChanges;
use crate::engine::VariableId;

/// Observes the changes made to a [`ConstraintEngine`].
///
/// Callbacks are not invoked from inside a domain mutation; the engine queues its notifications
/// and delivers them in order between constraint executions and at the end of every mutating call.
/// A listener can inspect the engine through the [`ListenerContext`], and can request changes
/// which the engine applies once the notification has been delivered to every listener.
#[allow(unused_variables, reason = "the default implementations ignore their arguments")]
pub trait ConstraintEngineListener: Debug {
    fn variable_added(&mut self, context: &mut ListenerContext<'_>, variable: VariableId) {}

    /// The variable has been physically removed; its handle is no longer valid.
    fn variable_removed(&mut self, context: &mut ListenerContext<'_>, variable: &Entity) {}

    fn constraint_added(&mut self, context: &mut ListenerContext<'_>, constraint: ConstraintId) {}

    /// The constraint has been physically removed; its handle is no longer valid.
    fn constraint_removed(&mut self, context: &mut ListenerContext<'_>, constraint: &Entity) {}

    fn constraint_activated(
        &mut self,
        context: &mut ListenerContext<'_>,
        constraint: ConstraintId,
    ) {
    }

    fn constraint_deactivated(
        &mut self,
        context: &mut ListenerContext<'_>,
        constraint: ConstraintId,
    ) {
    }

    fn domain_changed(
        &mut self,
        context: &mut ListenerContext<'_>,
        variable: VariableId,
        changes: DomainChanges,
    ) {
    }

    /// A call to [`ConstraintEngine::propagate`] reached a fixpoint.
    fn propagation_completed(&mut self, context: &mut ListenerContext<'_>) {}

    /// Propagation stopped because `constraint` emptied a domain.
    fn propagation_preempted(
        &mut self,
        context: &mut ListenerContext<'_>,
        constraint: ConstraintId,
    ) {
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ListenerRequest {
    Discard(EntityRef),
    Propagate,
}

/// Read access to the engine for a [`ConstraintEngineListener`], plus deferred requests.
#[derive(Debug)]
pub struct ListenerContext<'a> {
    engine: &'a ConstraintEngine,
    requests: &'a mut Vec<ListenerRequest>,
}

impl<'a> ListenerContext<'a> {
    pub(crate) fn new(
        engine: &'a ConstraintEngine,
        requests: &'a mut Vec<ListenerRequest>,
    ) -> ListenerContext<'a> {
        ListenerContext { engine, requests }
    }

    pub fn engine(&self) -> &ConstraintEngine {
        self.engine
    }

    /// Discards the entity once the notification has been delivered. During propagation the
    /// entity is only removed after the propagation finishes.
    pub fn request_discard(&mut self, entity: impl Into<EntityRef>) {
        self.requests.push(ListenerRequest::Discard(entity.into()));
    }

    /// Asks for propagation to run. If the engine is already propagating, the request only marks
    /// the pending work; the running propagation picks it up.
    pub fn request_propagation(&mut self) {
        self.requests.push(ListenerRequest::Propagate);
    }
}
