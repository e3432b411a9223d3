//! The constraint network and its propagation.
//!
//! A [`ConstraintEngine`] owns [`ConstrainedVariable`]s and [`Constraint`]s. Constraints are
//! grouped into [`Propagator`]s, each with an agenda of constraints waiting to be re-evaluated.
mod agenda;
mod constraint;
mod constraint_engine;
mod events;
mod listener;
mod options;
mod poster;
mod propagation_context;
mod propagator;
mod propagator_queue;
#[cfg(test)]
pub(crate) mod test_engine;
mod variable;

pub use constraint::Constraint;
pub use constraint::ConstraintId;
pub use constraint::EmptyDomain;
pub use constraint::EnqueueDecision;
pub use constraint::LocalFixpoint;
pub use constraint::PropagationFailure;
pub use constraint::PropagationStatus;
pub use constraint::Relation;
pub use constraint_engine::ConstraintEngine;
pub use events::DomainChange;
pub use events::DomainChanges;
pub use listener::ConstraintEngineListener;
pub use listener::ListenerContext;
pub use options::CheckLevel;
pub use options::EngineOptions;
pub use poster::ConstraintPoster;
pub use poster::VariablePoster;
pub use propagation_context::PropagationContext;
pub use propagator::Priority;
pub use propagator::Propagator;
pub use propagator::PropagatorId;
pub use propagator::PropagatorState;
pub use variable::ConstrainedVariable;
pub use variable::ConstraintRef;
pub use variable::VariableId;
