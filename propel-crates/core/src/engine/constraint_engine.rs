use std::collections::VecDeque;
use std::sync::atomic::AtomicU32;
use std::sync::atomic::Ordering;
use std::sync::Arc;

use log::debug;
use log::error;
use log::trace;
use log::warn;

use super::events::changes_between;
use super::events::EngineEvent;
use super::listener::ListenerRequest;
use super::propagator_queue::PropagatorQueue;
use crate::basic_types::ConfigurationError;
use crate::basic_types::EngineError;
use crate::basic_types::Entity;
use crate::basic_types::EntityKey;
use crate::basic_types::EntityKind;
use crate::basic_types::EntityRef;
use crate::basic_types::InvariantViolation;
use crate::containers::Arena;
use crate::containers::HashMap;
use crate::containers::HashSet;
use crate::containers::KeyedVec;
use crate::create_statistics_struct;
use crate::domains::Domain;
use crate::domains::DomainKind;
use crate::domains::Value;
use crate::engine::CheckLevel;
use crate::engine::ConstrainedVariable;
use crate::engine::Constraint;
use crate::engine::ConstraintEngineListener;
use crate::engine::ConstraintId;
use crate::engine::ConstraintPoster;
use crate::engine::ConstraintRef;
use crate::engine::DomainChange;
use crate::engine::DomainChanges;
use crate::engine::EngineOptions;
use crate::engine::EnqueueDecision;
use crate::engine::ListenerContext;
use crate::engine::LocalFixpoint;
use crate::engine::PropagationContext;
use crate::engine::PropagationFailure;
use crate::engine::Priority;
use crate::engine::Propagator;
use crate::engine::PropagatorId;
use crate::engine::PropagatorState;
use crate::engine::Relation;
use crate::engine::VariableId;
use crate::engine::VariablePoster;
use crate::propel_assert_extreme;
use crate::propel_assert_moderate;
use crate::propel_assert_simple;
use crate::propel_check;
use crate::schema::CeSchema;
use crate::statistics::Statistic;
use crate::statistics::StatisticLogger;
use crate::statistics::StatisticOptions;

static NEXT_ENGINE_TAG: AtomicU32 = AtomicU32::new(0);

create_statistics_struct!(
    /// Counters of the work done by a [`ConstraintEngine`].
    EngineStatistics {
        /// The number of calls to [`ConstraintEngine::propagate`] which did work.
        propagation_passes: u64,
        constraint_executions: u64,
        domain_restrictions: u64,
        /// The number of times the network became proven inconsistent.
        inconsistencies: u64,
        relaxations: u64,
        discards: u64,
        removals: u64,
        variables_created: u64,
        constraints_created: u64,
});

/// Owns a constraint network and keeps it locally consistent.
///
/// Variables are created from the types of the [`CeSchema`] and constraints from its constraint
/// types (or from a hand-built [`Relation`]). Every change to a domain puts the constraints on the
/// changed variable on the agenda of their propagator; [`ConstraintEngine::propagate`] then runs
/// the dirty propagators, in order of [`Priority`], until no agenda has work left or a domain
/// becomes empty.
///
/// An empty domain is not an error: it marks the network as proven inconsistent (see
/// [`ConstraintEngine::is_consistent`]) until a relaxation restores the emptied domains.
///
/// # Example
/// ```rust
/// # use propel_core::ConstraintEngine;
/// # use propel_core::domains::Domain;
/// let mut engine = ConstraintEngine::default();
/// let x = engine
///     .new_variable("int")
///     .with_base_domain(Domain::interval_int(0, 10))
///     .create()?;
/// let y = engine
///     .new_variable("int")
///     .with_base_domain(Domain::interval_int(5, 15))
///     .create()?;
/// let _ = engine.new_constraint("eq", [x, y]).post()?;
///
/// assert!(engine.propagate()?);
/// assert_eq!(engine.domain(x)?, &Domain::interval_int(5, 10));
/// # Ok::<(), propel_core::EngineError>(())
/// ```
#[derive(Debug)]
pub struct ConstraintEngine {
    entity: Entity,
    tag: u32,
    options: EngineOptions,
    schema: CeSchema,
    variables: Arena<ConstrainedVariable>,
    constraints: Arena<Constraint>,
    propagators: KeyedVec<PropagatorId, Propagator>,
    propagator_names: HashMap<Arc<str>, PropagatorId>,
    default_propagator: Option<PropagatorId>,
    dirty_propagators: PropagatorQueue,
    listeners: Vec<Box<dyn ConstraintEngineListener>>,
    events: VecDeque<EngineEvent>,
    pending_removals: Vec<EntityRef>,
    proven_inconsistent: bool,
    is_propagating: bool,
    propagation_requested: bool,
    statistics: EngineStatistics,
}

impl Default for ConstraintEngine {
    fn default() -> Self {
        ConstraintEngine::new(EngineOptions::default())
    }
}

/// Construction and configuration.
impl ConstraintEngine {
    pub fn new(options: EngineOptions) -> ConstraintEngine {
        ConstraintEngine::with_schema(options, CeSchema::new())
    }

    /// Creates an engine around a schema prepared by the caller. The built-in types are added to
    /// it if [`EngineOptions::register_default_types`] is set.
    pub fn with_schema(options: EngineOptions, mut schema: CeSchema) -> ConstraintEngine {
        if options.register_default_types {
            schema.register_default_types();
        }

        let tag = NEXT_ENGINE_TAG.fetch_add(1, Ordering::Relaxed);
        let mut engine = ConstraintEngine {
            entity: Entity::new(EntityKind::Engine, None),
            tag,
            options,
            schema,
            variables: Arena::new(tag),
            constraints: Arena::new(tag),
            propagators: KeyedVec::default(),
            propagator_names: HashMap::default(),
            default_propagator: None,
            dirty_propagators: PropagatorQueue::default(),
            listeners: Vec::new(),
            events: VecDeque::new(),
            pending_removals: Vec::new(),
            proven_inconsistent: false,
            is_propagating: false,
            propagation_requested: false,
            statistics: EngineStatistics::default(),
        };

        if let Some(name) = engine.options.default_propagator.clone() {
            let propagator = engine.insert_propagator(name.into(), Priority::Medium);
            engine.default_propagator = Some(propagator);
        }
        debug!("created engine {}", engine.entity.key());

        engine
    }

    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    pub fn key(&self) -> EntityKey {
        self.entity.key()
    }

    pub fn entity(&self) -> &Entity {
        &self.entity
    }

    pub fn schema(&self) -> &CeSchema {
        &self.schema
    }

    /// Registering types and constraint types is allowed at any time; existing variables and
    /// constraints are not affected.
    pub fn schema_mut(&mut self) -> &mut CeSchema {
        &mut self.schema
    }

    /// Parses a literal of a registered type.
    pub fn create_value(
        &self,
        type_name: &str,
        literal: &str,
    ) -> Result<Value, ConfigurationError> {
        self.schema.create_value(type_name, literal)
    }

    pub fn add_listener(&mut self, listener: impl ConstraintEngineListener + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Writes the statistics of the engine to the writer of `options`.
    pub fn log_statistics(&self, options: &mut StatisticOptions<'_>) {
        self.statistics.log(StatisticLogger::new("engine", options));
        options.log_statistic_postfix();
    }
}

/// Propagators.
impl ConstraintEngine {
    /// Creates a propagation category. Propagators with a higher priority run before those with
    /// a lower one.
    pub fn new_propagator(
        &mut self,
        name: &str,
        priority: Priority,
    ) -> Result<PropagatorId, ConfigurationError> {
        if self.propagator_names.contains_key(name) {
            return Err(ConfigurationError::DuplicatePropagator(name.to_owned()));
        }
        Ok(self.insert_propagator(name.into(), priority))
    }

    fn insert_propagator(&mut self, name: Arc<str>, priority: Priority) -> PropagatorId {
        let entity = Entity::new(EntityKind::Propagator, Some(Arc::clone(&name)));
        let id = self.propagators.push(Propagator::new(entity, priority));
        let _ = self.propagator_names.insert(name, id);
        debug!("created propagator '{}' with priority {priority:?}", self.propagators[id].name());
        id
    }

    pub fn propagator_id(&self, name: &str) -> Result<PropagatorId, ConfigurationError> {
        self.propagator_names
            .get(name)
            .copied()
            .ok_or_else(|| ConfigurationError::UnknownPropagator(name.to_owned()))
    }

    /// The propagator created from [`EngineOptions::default_propagator`].
    pub fn default_propagator(&self) -> Option<PropagatorId> {
        self.default_propagator
    }

    pub fn propagator(&self, propagator: PropagatorId) -> Result<&Propagator, InvariantViolation> {
        self.propagators.get(propagator).ok_or_else(|| {
            invalid_handle(EntityKind::Propagator, propagator.to_string())
        })
    }

    pub fn propagators(&self) -> impl Iterator<Item = (PropagatorId, &Propagator)> + '_ {
        self.propagators.keys().zip(self.propagators.iter())
    }

    pub fn propagator_state(
        &self,
        propagator: PropagatorId,
    ) -> Result<PropagatorState, InvariantViolation> {
        self.propagator(propagator).map(Propagator::state)
    }

    pub fn agenda_len(&self, propagator: PropagatorId) -> Result<usize, InvariantViolation> {
        self.propagator(propagator).map(Propagator::agenda_len)
    }
}

/// Variables.
impl ConstraintEngine {
    /// Starts building a variable of the named type.
    pub fn new_variable(&mut self, type_name: &str) -> VariablePoster<'_> {
        VariablePoster::new(self, type_name)
    }

    pub(crate) fn create_variable(
        &mut self,
        type_name: &str,
        base_domain: Option<Domain>,
        name: Option<Arc<str>>,
        can_be_specified: bool,
    ) -> Result<VariableId, EngineError> {
        let variable =
            self.schema
                .create_variable(type_name, base_domain, name, can_be_specified)?;
        debug!(
            "created variable '{}' of type '{type_name}' over {}",
            variable.name(),
            variable.base_domain()
        );

        let id = self.variables.insert(variable);
        self.statistics.variables_created += 1;
        self.events.push_back(EngineEvent::VariableAdded(id));
        self.settle()?;

        Ok(id)
    }

    pub fn variable(
        &self,
        variable: VariableId,
    ) -> Result<&ConstrainedVariable, InvariantViolation> {
        propel_check!(
            variable.owner() == self.tag,
            foreign_handle(EntityKind::Variable, variable.to_string())
        );
        self.variables
            .get(variable)
            .ok_or_else(|| invalid_handle(EntityKind::Variable, variable.to_string()))
    }

    fn variable_mut(
        &mut self,
        variable: VariableId,
    ) -> Result<&mut ConstrainedVariable, InvariantViolation> {
        propel_check!(
            variable.owner() == self.tag,
            foreign_handle(EntityKind::Variable, variable.to_string())
        );
        self.variables
            .get_mut(variable)
            .ok_or_else(|| invalid_handle(EntityKind::Variable, variable.to_string()))
    }

    /// The live variables, including discarded ones whose removal is still pending.
    pub fn variables(&self) -> impl Iterator<Item = (VariableId, &ConstrainedVariable)> + '_ {
        self.variables.iter()
    }

    pub fn num_variables(&self) -> usize {
        self.variables.len()
    }

    pub fn domain(&self, variable: VariableId) -> Result<&Domain, InvariantViolation> {
        self.variable(variable).map(ConstrainedVariable::domain)
    }

    pub fn is_singleton(&self, variable: VariableId) -> Result<bool, InvariantViolation> {
        self.domain(variable).map(Domain::is_singleton)
    }

    /// The constraints whose scope contains the variable, with the position of the variable.
    pub fn constraints_of(
        &self,
        variable: VariableId,
    ) -> Result<&[ConstraintRef], InvariantViolation> {
        self.variable(variable).map(ConstrainedVariable::constraints)
    }

    /// Pins the variable to `value`, which must be in its current domain.
    pub fn specify(
        &mut self,
        variable: VariableId,
        value: impl Into<Value>,
    ) -> Result<(), EngineError> {
        let value = value.into();
        let entry = self.variable_mut(variable)?;
        propel_check!(
            !entry.entity.is_discarded(),
            InvariantViolation::Discarded {
                kind: EntityKind::Variable,
                name: Arc::clone(entry.name()),
            }
        );
        propel_check!(
            entry.can_be_specified,
            InvariantViolation::NotSpecifiable(Arc::clone(entry.name()))
        );
        propel_check!(
            entry.domain.contains(&value),
            InvariantViolation::ValueNotInDomain {
                variable: Arc::clone(entry.name()),
                value: value.clone(),
                domain: entry.domain.to_string(),
            }
        );

        let before = entry.domain.clone();
        let _ = entry.domain.intersect(&Domain::from_value(&value))?;
        debug!("specified '{}' to {value}", entry.name());
        entry.specified = Some(value);

        let changes = changes_between(&before, &entry.domain);
        self.domain_changed(variable, changes, None);
        self.settle()
    }

    /// Undoes [`ConstraintEngine::specify`]: the variable, and everything connected to it through
    /// active constraints, is reset to its base domain (or to its specified value for the other
    /// specified variables). The affected constraints are put back on their agendas.
    pub fn relax(&mut self, variable: VariableId) -> Result<(), EngineError> {
        let entry = self.variable_mut(variable)?;
        if entry.entity.is_discarded() {
            warn!("relaxing the discarded variable '{}'", entry.name());
        }
        entry.specified = None;
        debug!("relaxing '{}'", entry.name());

        self.statistics.relaxations += 1;
        self.relax_component(&[variable]);
        self.settle()
    }

    /// Intersects the domain of the variable with `domain`; returns whether it changed.
    pub fn restrict_domain(
        &mut self,
        variable: VariableId,
        domain: &Domain,
    ) -> Result<bool, EngineError> {
        let entry = self.variable_mut(variable)?;
        propel_check!(
            !entry.entity.is_discarded(),
            InvariantViolation::Discarded {
                kind: EntityKind::Variable,
                name: Arc::clone(entry.name()),
            }
        );

        let before = entry.domain.clone();
        if !entry.domain.intersect(domain)? {
            return Ok(false);
        }
        trace!("{}: {before} -> {}", entry.name(), entry.domain);

        let changes = changes_between(&before, &entry.domain);
        self.statistics.domain_restrictions += 1;
        self.domain_changed(variable, changes, None);
        self.settle()?;

        Ok(true)
    }

    /// Narrows the base domain of a variable which no constraint refers to yet.
    pub fn restrict_base_domain(
        &mut self,
        variable: VariableId,
        domain: &Domain,
    ) -> Result<(), EngineError> {
        let entry = self.variable_mut(variable)?;
        propel_check!(
            entry.constraints.is_empty(),
            InvariantViolation::BaseDomainLocked(Arc::clone(entry.name()))
        );
        propel_check!(
            domain.is_subset_of(&entry.base_domain),
            InvariantViolation::BaseDomainNotSubset(Arc::clone(entry.name()))
        );

        let _ = entry.base_domain.intersect(domain)?;
        if entry
            .specified
            .as_ref()
            .is_some_and(|value| !entry.base_domain.contains(value))
        {
            entry.specified = None;
        }

        let before = entry.domain.clone();
        entry.domain = entry.reset_domain();
        debug!("restricted the base domain of '{}' to {}", entry.name(), entry.base_domain);

        let changes = changes_between(&before, &entry.domain);
        self.domain_changed(variable, changes, None);
        self.settle()
    }
}

/// Constraints.
impl ConstraintEngine {
    /// Starts building a constraint of the named constraint type over `scope`.
    pub fn new_constraint(
        &mut self,
        type_name: &str,
        scope: impl Into<Vec<VariableId>>,
    ) -> ConstraintPoster<'_> {
        ConstraintPoster::new(self, type_name, scope.into())
    }

    pub(crate) fn create_constraint(
        &mut self,
        type_name: &str,
        scope: Vec<VariableId>,
        propagator: Option<PropagatorId>,
        name: Option<Arc<str>>,
    ) -> Result<ConstraintId, EngineError> {
        let kinds = self.scope_kinds(&scope)?;
        let constraint_type = self.schema.constraint_type(type_name)?;
        let relation = constraint_type.instantiate(&kinds)?;

        let propagator = match propagator {
            Some(propagator) => propagator,
            None => match constraint_type.propagator() {
                Some(name) => self.propagator_id(name)?,
                None => self.default_propagator_id()?,
            },
        };

        self.insert_constraint(type_name.into(), relation, scope, propagator, name)
    }

    /// Adds a constraint with a hand-built relation. Without an explicit propagator the
    /// constraint is attached to the default propagator.
    pub fn add_constraint(
        &mut self,
        relation: impl Relation,
        scope: impl Into<Vec<VariableId>>,
        propagator: Option<PropagatorId>,
    ) -> Result<ConstraintId, EngineError> {
        let scope = scope.into();
        propel_check!(
            relation.arity().accepts(scope.len()),
            InvariantViolation::ScopeMismatch {
                constraint: relation.name().into(),
                expected: relation.arity().to_string(),
                actual: scope.len(),
            }
        );
        let _ = self.scope_kinds(&scope)?;
        let propagator = match propagator {
            Some(propagator) => propagator,
            None => self.default_propagator_id()?,
        };

        let type_name: Arc<str> = relation.name().into();
        self.insert_constraint(type_name, Box::new(relation), scope, propagator, None)
    }

    fn default_propagator_id(&self) -> Result<PropagatorId, ConfigurationError> {
        self.default_propagator
            .ok_or_else(|| ConfigurationError::UnknownPropagator("<default>".to_owned()))
    }

    /// Checks that every variable of the scope is live and returns the kinds of their domains.
    fn scope_kinds(&self, scope: &[VariableId]) -> Result<Vec<DomainKind>, InvariantViolation> {
        scope
            .iter()
            .map(|variable| {
                let entry = self.variable(*variable)?;
                propel_check!(
                    !entry.entity.is_discarded(),
                    InvariantViolation::Discarded {
                        kind: EntityKind::Variable,
                        name: Arc::clone(entry.name()),
                    }
                );
                Ok(entry.base_domain.kind())
            })
            .collect()
    }

    fn insert_constraint(
        &mut self,
        type_name: Arc<str>,
        relation: Box<dyn Relation>,
        scope: Vec<VariableId>,
        propagator: PropagatorId,
        name: Option<Arc<str>>,
    ) -> Result<ConstraintId, EngineError> {
        let _ = self.propagator(propagator)?;

        let entity = Entity::new(EntityKind::Constraint, name);
        debug!(
            "created constraint '{}' of type '{type_name}' on propagator '{}'",
            entity.name(),
            self.propagators[propagator].name()
        );
        let id = self.constraints.insert(Constraint {
            entity,
            type_name,
            scope,
            propagator,
            active: true,
            relation,
        });

        if let Some(constraint) = self.constraints.get(id) {
            for (argument, variable) in constraint.scope.iter().enumerate() {
                if let Some(entry) = self.variables.get_mut(*variable) {
                    entry.attach(id, argument);
                }
            }
        }
        let _ = self.propagators[propagator].constraints.insert(id);

        self.statistics.constraints_created += 1;
        self.events.push_back(EngineEvent::ConstraintAdded(id));
        self.enqueue_constraint(id, propagator);
        self.settle()?;

        Ok(id)
    }

    pub fn constraint(&self, constraint: ConstraintId) -> Result<&Constraint, InvariantViolation> {
        propel_check!(
            constraint.owner() == self.tag,
            foreign_handle(EntityKind::Constraint, constraint.to_string())
        );
        self.constraints
            .get(constraint)
            .ok_or_else(|| invalid_handle(EntityKind::Constraint, constraint.to_string()))
    }

    fn constraint_mut(
        &mut self,
        constraint: ConstraintId,
    ) -> Result<&mut Constraint, InvariantViolation> {
        propel_check!(
            constraint.owner() == self.tag,
            foreign_handle(EntityKind::Constraint, constraint.to_string())
        );
        self.constraints
            .get_mut(constraint)
            .ok_or_else(|| invalid_handle(EntityKind::Constraint, constraint.to_string()))
    }

    /// The live constraints, including discarded ones whose removal is still pending.
    pub fn constraints(&self) -> impl Iterator<Item = (ConstraintId, &Constraint)> + '_ {
        self.constraints.iter()
    }

    pub fn num_constraints(&self) -> usize {
        self.constraints.len()
    }

    pub fn scope(&self, constraint: ConstraintId) -> Result<&[VariableId], InvariantViolation> {
        self.constraint(constraint).map(Constraint::scope)
    }

    /// The relation of the constraint if it is of type `R`.
    pub fn relation<R: Relation>(
        &self,
        constraint: ConstraintId,
    ) -> Result<Option<&R>, InvariantViolation> {
        self.constraint(constraint)
            .map(|constraint| constraint.relation.as_ref().downcast_ref::<R>())
    }

    /// Lets a deactivated constraint take part in propagation again; it is put on its agenda.
    pub fn activate(&mut self, constraint: ConstraintId) -> Result<(), EngineError> {
        let entry = self.constraint_mut(constraint)?;
        propel_check!(
            !entry.entity.is_discarded(),
            InvariantViolation::Discarded {
                kind: EntityKind::Constraint,
                name: Arc::clone(entry.name()),
            }
        );
        if entry.active {
            return Ok(());
        }

        entry.active = true;
        let propagator = entry.propagator;
        debug!("activated constraint '{}'", entry.name());

        self.events.push_back(EngineEvent::ConstraintActivated(constraint));
        self.enqueue_constraint(constraint, propagator);
        self.settle()
    }

    /// Suspends a constraint without removing it. The narrowing it caused is undone by relaxing
    /// its scope.
    pub fn deactivate(&mut self, constraint: ConstraintId) -> Result<(), EngineError> {
        let entry = self.constraint_mut(constraint)?;
        if !entry.active {
            return Ok(());
        }

        entry.active = false;
        let propagator = entry.propagator;
        let scope = entry.scope.clone();
        debug!("deactivated constraint '{}'", entry.name());

        let propagator = &mut self.propagators[propagator];
        let _ = propagator.agenda.remove(constraint);
        if propagator.state == PropagatorState::Dirty {
            propagator.settle();
        }

        self.events.push_back(EngineEvent::ConstraintDeactivated(constraint));
        self.relax_component(&scope);
        self.settle()
    }
}

/// Entities and their removal.
impl ConstraintEngine {
    /// Whether the handle refers to a live entity of this engine. Discarded entities are live
    /// until their removal has been carried out.
    pub fn is_valid(&self, entity: impl Into<EntityRef>) -> bool {
        match entity.into() {
            EntityRef::Variable(variable) => {
                variable.owner() == self.tag && self.variables.contains(variable)
            }
            EntityRef::Constraint(constraint) => {
                constraint.owner() == self.tag && self.constraints.contains(constraint)
            }
            EntityRef::Propagator(propagator) => self.propagators.get(propagator).is_some(),
        }
    }

    pub fn entity_of(&self, entity: impl Into<EntityRef>) -> Result<&Entity, InvariantViolation> {
        match entity.into() {
            EntityRef::Variable(variable) => {
                self.variable(variable).map(ConstrainedVariable::entity)
            }
            EntityRef::Constraint(constraint) => {
                self.constraint(constraint).map(Constraint::entity)
            }
            EntityRef::Propagator(propagator) => {
                self.propagator(propagator).map(Propagator::entity)
            }
        }
    }

    /// Removes a variable or constraint from the network.
    ///
    /// Discarding a variable also discards every constraint on it. When called while the engine
    /// is propagating (from a listener), the entities are only removed once the propagation has
    /// finished. Discarding an entity twice has no further effect.
    pub fn discard(&mut self, entity: impl Into<EntityRef>) -> Result<(), EngineError> {
        self.mark_discarded(entity.into())?;
        if !self.is_propagating {
            self.flush_removals();
            self.run_checks(CheckLevel::Advanced)?;
        }
        self.settle()
    }

    fn mark_discarded(&mut self, entity: EntityRef) -> Result<(), InvariantViolation> {
        match entity {
            EntityRef::Variable(variable) => {
                let entry = self.variable_mut(variable)?;
                if !entry.entity.discard() {
                    return Ok(());
                }
                debug!("discarded variable '{}'", entry.name());

                let constraints: Vec<ConstraintId> = entry
                    .constraints
                    .iter()
                    .map(|reference| reference.constraint)
                    .collect();
                self.statistics.discards += 1;
                self.pending_removals.push(entity);
                for constraint in constraints {
                    self.mark_discarded(EntityRef::Constraint(constraint))?;
                }
            }
            EntityRef::Constraint(constraint) => {
                let entry = self.constraint_mut(constraint)?;
                if !entry.entity.discard() {
                    return Ok(());
                }
                debug!("discarded constraint '{}'", entry.name());

                self.statistics.discards += 1;
                self.pending_removals.push(entity);
            }
            EntityRef::Propagator(propagator) => {
                let violation = InvariantViolation::NotDiscardable {
                    kind: EntityKind::Propagator,
                    name: Arc::clone(self.propagator(propagator)?.entity().name()),
                };
                error!("check failed: {violation}");
                return Err(violation);
            }
        }
        Ok(())
    }

    /// Physically removes the discarded entities. Constraints go first, so that the variables
    /// they scoped are no longer referred to; the variables which remain connected are relaxed.
    fn flush_removals(&mut self) {
        propel_assert_simple!(!self.is_propagating);
        if self.pending_removals.is_empty() {
            return;
        }

        let (constraints, variables): (Vec<EntityRef>, Vec<EntityRef>) =
            std::mem::take(&mut self.pending_removals)
                .into_iter()
                .partition(|entity| matches!(entity, EntityRef::Constraint(_)));

        let mut relaxed = Vec::new();
        for entity in constraints {
            let EntityRef::Constraint(id) = entity else {
                continue;
            };
            let Some(constraint) = self.constraints.remove(id) else {
                continue;
            };

            for variable in &constraint.scope {
                if let Some(entry) = self.variables.get_mut(*variable) {
                    entry.detach(id);
                }
            }
            let propagator = &mut self.propagators[constraint.propagator];
            let _ = propagator.agenda.remove(id);
            let _ = propagator.constraints.remove(&id);
            if propagator.state == PropagatorState::Dirty {
                propagator.settle();
            }

            debug!("removed constraint '{}'", constraint.entity.name());
            self.statistics.removals += 1;
            if constraint.active {
                relaxed.extend(constraint.scope.iter().copied());
            }
            self.events
                .push_back(EngineEvent::ConstraintRemoved(constraint.entity));
        }

        for entity in variables {
            let EntityRef::Variable(id) = entity else {
                continue;
            };
            match self.variables.get(id) {
                Some(entry) if entry.constraints.is_empty() => {
                    if let Some(variable) = self.variables.remove(id) {
                        debug!("removed variable '{}'", variable.entity.name());
                        self.statistics.removals += 1;
                        self.events
                            .push_back(EngineEvent::VariableRemoved(variable.entity));
                    }
                }
                // Still referred to; it goes once the last constraint on it is removed.
                Some(_) => self.pending_removals.push(entity),
                None => {}
            }
        }

        relaxed.retain(|variable| self.variables.contains(*variable));
        relaxed.sort_unstable();
        relaxed.dedup();
        if !relaxed.is_empty() {
            self.relax_component(&relaxed);
        }
    }
}

/// Propagation.
impl ConstraintEngine {
    /// Whether the network is not proven inconsistent.
    pub fn is_consistent(&self) -> bool {
        !self.proven_inconsistent
    }

    /// Whether any agenda holds constraints.
    pub fn is_propagation_pending(&self) -> bool {
        self.propagators
            .iter()
            .any(|propagator| !propagator.agenda.is_empty())
    }

    pub fn is_propagating(&self) -> bool {
        self.is_propagating
    }

    /// Runs the dirty propagators until no agenda has work left or the network is proven
    /// inconsistent, and returns [`ConstraintEngine::is_consistent`].
    ///
    /// Calling this again without changing the network in between does nothing.
    pub fn propagate(&mut self) -> Result<bool, EngineError> {
        if self.is_propagating {
            warn!("propagation requested while propagating; left to the running pass");
            self.propagation_requested = true;
            return Ok(self.is_consistent());
        }

        loop {
            if self.proven_inconsistent || self.dirty_propagators.is_empty() {
                break;
            }

            self.statistics.propagation_passes += 1;
            self.is_propagating = true;
            let result = self.run_to_fixpoint();
            self.is_propagating = false;
            self.flush_removals();
            result?;

            if !self.proven_inconsistent && self.dirty_propagators.is_empty() {
                self.events.push_back(EngineEvent::PropagationCompleted);
            }
            self.dispatch_events()?;
            self.run_checks(CheckLevel::Moderate)?;
        }
        propel_assert_extreme!(
            !self.is_consistent() || !self.is_propagation_pending(),
            "a consistent fixpoint left constraints on an agenda"
        );
        self.propagation_requested = false;

        Ok(self.is_consistent())
    }

    fn run_to_fixpoint(&mut self) -> Result<(), EngineError> {
        while !self.proven_inconsistent {
            let Some(propagator) = self.dirty_propagators.pop() else {
                break;
            };
            self.run_propagator(propagator)?;
        }
        Ok(())
    }

    /// Drains the agenda of one propagator. Constraints of the same propagator which are dirtied
    /// meanwhile are executed in the same run.
    fn run_propagator(&mut self, id: PropagatorId) -> Result<(), EngineError> {
        let propagator = &mut self.propagators[id];
        if propagator.agenda.is_empty() {
            propagator.settle();
            return Ok(());
        }
        propagator.state = PropagatorState::Executing;
        debug!(
            "running propagator '{}' with {} constraints on its agenda",
            propagator.name(),
            propagator.agenda.len()
        );

        let mut outcome = Ok(());
        while let Some(constraint) = self.propagators[id].agenda.pop() {
            match self.execute_constraint(constraint) {
                Ok(Some(LocalFixpoint::NotReached)) => {
                    let _ = self.propagators[id].agenda.push(constraint);
                }
                Ok(_) => {}
                Err(failure) => {
                    // Kept at the head of the agenda, so that it is re-evaluated first once the
                    // network has been relaxed.
                    self.propagators[id].agenda.push_front(constraint);
                    match failure {
                        PropagationFailure::EmptyDomain => self.mark_inconsistent(constraint),
                        PropagationFailure::Domain(error) => {
                            error!("constraint {constraint} failed: {error}");
                            outcome = Err(InvariantViolation::from(error).into());
                        }
                    }
                    break;
                }
            }

            if let Err(error) = self.dispatch_events() {
                outcome = Err(error);
                break;
            }
            if self.proven_inconsistent {
                break;
            }
        }

        let propagator = &mut self.propagators[id];
        propagator.settle();
        if propagator.state == PropagatorState::Dirty {
            self.dirty_propagators
                .enqueue_propagator(id, propagator.priority);
        }

        outcome
    }

    /// Runs the relation of one constraint and dirties the constraints on the variables it
    /// narrowed.
    fn execute_constraint(
        &mut self,
        id: ConstraintId,
    ) -> Result<Option<LocalFixpoint>, PropagationFailure> {
        let Some(constraint) = self.constraints.get_mut(id) else {
            return Ok(None);
        };
        if !constraint.active || constraint.entity.is_discarded() {
            return Ok(None);
        }

        self.statistics.constraint_executions += 1;
        trace!("propagating '{}'", constraint.entity.name());

        let mut changes = Vec::new();
        let mut context =
            PropagationContext::new(&mut self.variables, &constraint.scope, &mut changes);
        let status = constraint.relation.propagate(&mut context);
        let emptied = context.emptied();

        self.statistics.domain_restrictions += changes.len() as u64;
        for (variable, variable_changes) in changes {
            self.domain_changed(variable, variable_changes, Some(id));
        }

        match status {
            Ok(_) if emptied => Err(PropagationFailure::EmptyDomain),
            Ok(fixpoint) => Ok(Some(fixpoint)),
            Err(failure) => Err(failure),
        }
    }

    fn mark_inconsistent(&mut self, constraint: ConstraintId) {
        if !self.proven_inconsistent {
            self.statistics.inconsistencies += 1;
        }
        self.proven_inconsistent = true;
        if let Some(entry) = self.constraints.get(constraint) {
            debug!("constraint '{}' proved the network inconsistent", entry.name());
        }
        self.events
            .push_back(EngineEvent::PropagationPreempted(constraint));
    }

    /// Records a domain change and puts the constraints on the variable, other than `source`,
    /// on their agendas.
    fn domain_changed(
        &mut self,
        variable: VariableId,
        changes: DomainChanges,
        source: Option<ConstraintId>,
    ) {
        if changes.is_empty() {
            return;
        }
        self.events
            .push_back(EngineEvent::DomainChanged { variable, changes });
        if changes.contains(DomainChange::Emptied) {
            if !self.proven_inconsistent {
                self.statistics.inconsistencies += 1;
            }
            self.proven_inconsistent = true;
        }

        let Some(entry) = self.variables.get(variable) else {
            return;
        };
        let references = entry.constraints.clone();
        for reference in references {
            if Some(reference.constraint) == source {
                continue;
            }
            let Some(constraint) = self.constraints.get_mut(reference.constraint) else {
                continue;
            };
            if !constraint.active || constraint.entity.is_discarded() {
                continue;
            }
            if constraint.relation.notify(reference.argument, changes) == EnqueueDecision::Enqueue {
                let propagator = constraint.propagator;
                self.enqueue_constraint(reference.constraint, propagator);
            }
        }
    }

    fn enqueue_constraint(&mut self, constraint: ConstraintId, id: PropagatorId) {
        let propagator = &mut self.propagators[id];
        if propagator.agenda.push(constraint) {
            trace!("agenda of '{}' += {constraint}", propagator.name());
        }
        if propagator.state != PropagatorState::Executing {
            propagator.state = PropagatorState::Dirty;
            self.dirty_propagators
                .enqueue_propagator(id, propagator.priority);
        }
    }

    /// Resets every variable connected to `roots` through active constraints and puts those
    /// constraints back on their agendas.
    fn relax_component(&mut self, roots: &[VariableId]) {
        let mut visited: HashSet<VariableId> = HashSet::default();
        let mut seen_constraints: HashSet<ConstraintId> = HashSet::default();
        let mut component = Vec::new();
        let mut component_constraints = Vec::new();

        let mut stack: Vec<VariableId> = roots.iter().rev().copied().collect();
        while let Some(variable) = stack.pop() {
            let Some(entry) = self.variables.get(variable) else {
                continue;
            };
            if !visited.insert(variable) {
                continue;
            }
            component.push(variable);

            for reference in &entry.constraints {
                let Some(constraint) = self.constraints.get(reference.constraint) else {
                    continue;
                };
                if !constraint.active || constraint.entity.is_discarded() {
                    continue;
                }
                if seen_constraints.insert(reference.constraint) {
                    component_constraints.push((reference.constraint, constraint.propagator));
                    stack.extend(
                        constraint
                            .scope
                            .iter()
                            .rev()
                            .filter(|neighbour| !visited.contains(*neighbour))
                            .copied(),
                    );
                }
            }
        }

        for variable in component {
            let Some(entry) = self.variables.get_mut(variable) else {
                continue;
            };
            let reset = entry.reset_domain();
            let changes = changes_between(&entry.domain, &reset);
            if !changes.is_empty() {
                trace!("{}: {} -> {reset}", entry.name(), entry.domain);
                entry.domain = reset;
                self.events
                    .push_back(EngineEvent::DomainChanged { variable, changes });
            }
        }
        for (constraint, propagator) in component_constraints {
            self.enqueue_constraint(constraint, propagator);
        }

        if self.proven_inconsistent
            && self
                .variables
                .iter()
                .all(|(_, variable)| !variable.domain.is_empty())
        {
            debug!("the network is no longer proven inconsistent");
            self.proven_inconsistent = false;
        }
    }
}

/// Listener dispatch and checks.
impl ConstraintEngine {
    /// Delivers the queued notifications and carries out what the listeners requested, then
    /// propagates if that was requested outside of a propagation.
    fn settle(&mut self) -> Result<(), EngineError> {
        self.dispatch_events()?;
        self.run_checks(CheckLevel::Extreme)?;
        if !self.is_propagating && std::mem::take(&mut self.propagation_requested) {
            let _ = self.propagate()?;
        }
        Ok(())
    }

    fn dispatch_events(&mut self) -> Result<(), EngineError> {
        if self.listeners.is_empty() {
            self.events.clear();
            return Ok(());
        }

        let mut listeners = std::mem::take(&mut self.listeners);
        let mut outcome = Ok(());
        while let Some(event) = self.events.pop_front() {
            let mut requests = Vec::new();
            let mut context = ListenerContext::new(self, &mut requests);
            for listener in listeners.iter_mut() {
                deliver(&event, listener.as_mut(), &mut context);
            }

            for request in requests {
                match request {
                    ListenerRequest::Discard(entity) if !self.is_valid(entity) => {
                        warn!("ignoring a request to discard the removed entity {entity:?}");
                    }
                    ListenerRequest::Discard(entity) => {
                        if let Err(error) = self.mark_discarded(entity) {
                            outcome = Err(error.into());
                            break;
                        }
                        if !self.is_propagating {
                            self.flush_removals();
                        }
                    }
                    ListenerRequest::Propagate => {
                        if self.is_propagating {
                            debug!("propagation requested by a listener while propagating");
                        }
                        self.propagation_requested = true;
                    }
                }
            }
            if outcome.is_err() {
                break;
            }
        }

        // Listeners registered while dispatching are kept after the existing ones.
        listeners.append(&mut self.listeners);
        self.listeners = listeners;
        outcome
    }

    fn run_checks(&self, level: CheckLevel) -> Result<(), InvariantViolation> {
        if self.options.check_level >= level {
            self.check_scope_integrity()?;
        }
        Ok(())
    }

    /// Verifies that every constraint is listed by each variable of its scope, at the right
    /// position, and that every listed constraint has the variable in its scope.
    pub fn check_scope_integrity(&self) -> Result<(), InvariantViolation> {
        for (id, constraint) in self.constraints.iter() {
            for (argument, variable) in constraint.scope.iter().enumerate() {
                let entry = self.variables.get(*variable);
                propel_check!(
                    entry.is_some(),
                    InvariantViolation::ScopeIntegrity(format!(
                        "constraint '{}' refers to the removed variable {variable}",
                        constraint.name()
                    ))
                );
                let listed = entry.is_some_and(|entry| {
                    entry.constraints.contains(&ConstraintRef {
                        constraint: id,
                        argument,
                    })
                });
                propel_check!(
                    listed,
                    InvariantViolation::ScopeIntegrity(format!(
                        "variable {variable} does not list constraint '{}' at argument {argument}",
                        constraint.name()
                    ))
                );
            }
        }

        for (id, variable) in self.variables.iter() {
            for reference in &variable.constraints {
                let in_scope = self
                    .constraints
                    .get(reference.constraint)
                    .is_some_and(|constraint| {
                        constraint.scope.get(reference.argument) == Some(&id)
                    });
                propel_check!(
                    in_scope,
                    InvariantViolation::ScopeIntegrity(format!(
                        "variable '{}' lists constraint {} at argument {} which does not scope it",
                        variable.name(),
                        reference.constraint,
                        reference.argument
                    ))
                );
            }
        }

        let agendas_are_live = self.propagators.iter().all(|propagator| {
            propagator
                .agenda
                .iter()
                .all(|constraint| self.constraints.contains(constraint))
        });
        propel_assert_moderate!(agendas_are_live);

        Ok(())
    }
}

fn deliver(
    event: &EngineEvent,
    listener: &mut dyn ConstraintEngineListener,
    context: &mut ListenerContext<'_>,
) {
    match event {
        EngineEvent::VariableAdded(variable) => listener.variable_added(context, *variable),
        EngineEvent::VariableRemoved(entity) => listener.variable_removed(context, entity),
        EngineEvent::ConstraintAdded(constraint) => listener.constraint_added(context, *constraint),
        EngineEvent::ConstraintRemoved(entity) => listener.constraint_removed(context, entity),
        EngineEvent::ConstraintActivated(constraint) => {
            listener.constraint_activated(context, *constraint)
        }
        EngineEvent::ConstraintDeactivated(constraint) => {
            listener.constraint_deactivated(context, *constraint)
        }
        EngineEvent::DomainChanged { variable, changes } => {
            listener.domain_changed(context, *variable, *changes)
        }
        EngineEvent::PropagationCompleted => listener.propagation_completed(context),
        EngineEvent::PropagationPreempted(constraint) => {
            listener.propagation_preempted(context, *constraint)
        }
    }
}

fn invalid_handle(kind: EntityKind, handle: String) -> InvariantViolation {
    let violation = InvariantViolation::InvalidHandle { kind, handle };
    error!("check failed: {violation}");
    violation
}

fn foreign_handle(kind: EntityKind, handle: String) -> InvariantViolation {
    InvariantViolation::ForeignHandle { kind, handle }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::test_engine::TestEngine;
    use crate::relations::AddEqual;
    use crate::relations::AllDifferent;
    use crate::relations::Unary;

    #[test]
    fn equality_narrows_to_the_intersection() {
        let mut test = TestEngine::default();
        let x = test.new_int(0, 10);
        let y = test.new_int(5, 15);
        let _ = test.post("eq", [x, y]);

        assert!(test.propagate());
        test.assert_int_bounds(x, 5, 10);
        test.assert_int_bounds(y, 5, 10);
    }

    #[test]
    fn disjoint_equality_is_inconsistent_until_relaxed() {
        let mut test = TestEngine::default();
        let x = test.new_int(0, 5);
        let y = test.new_int(10, 15);
        let constraint = test.post("eq", [x, y]);

        assert!(!test.propagate());
        assert!(test.engine.is_propagation_pending());

        test.engine.deactivate(constraint).expect("live constraint");
        assert!(test.engine.is_consistent());
        test.assert_int_bounds(x, 0, 5);
        test.assert_int_bounds(y, 10, 15);
        assert!(test.propagate());
    }

    #[test]
    fn propagation_is_idempotent() {
        let mut test = TestEngine::default();
        let x = test.new_int(0, 10);
        let y = test.new_int(3, 20);
        let _ = test.post("leq", [y, x]);

        assert!(test.propagate());
        let passes = test.engine.statistics.propagation_passes;
        let domains: Vec<Domain> = [x, y].iter().map(|v| test.domain(*v).clone()).collect();

        assert!(test.propagate());
        assert_eq!(test.engine.statistics.propagation_passes, passes);
        assert_eq!(test.domain(x), &domains[0]);
        assert_eq!(test.domain(y), &domains[1]);
    }

    #[test]
    fn specify_then_relax_restores_the_base_domain() {
        let mut test = TestEngine::default();
        let x = test.new_int(0, 10);
        let y = test.new_int(0, 10);
        let _ = test.post("eq", [x, y]);

        test.engine.specify(x, 4).expect("4 is in the domain");
        assert!(test.propagate());
        test.assert_int_bounds(y, 4, 4);

        test.engine.relax(x).expect("live variable");
        test.assert_int_bounds(x, 0, 10);
        test.assert_int_bounds(y, 0, 10);
        assert!(!test.engine.variable(x).expect("live").is_specified());
    }

    #[test]
    fn relaxing_keeps_other_specifications() {
        let mut test = TestEngine::default();
        let x = test.new_int(0, 10);
        let y = test.new_int(0, 10);
        let z = test.new_int(0, 10);
        let _ = test.post("leq", [x, y]);
        let _ = test.post("leq", [y, z]);

        test.engine.specify(z, 3).expect("3 is in the domain");
        test.engine.specify(x, 2).expect("2 is in the domain");
        assert!(test.propagate());
        test.assert_int_bounds(y, 2, 3);

        test.engine.relax(x).expect("live variable");
        assert!(test.propagate());
        test.assert_int_bounds(x, 0, 3);
        test.assert_int_bounds(y, 0, 3);
        test.assert_int_bounds(z, 3, 3);
    }

    #[test]
    fn specify_rejects_values_outside_the_domain() {
        let mut test = TestEngine::default();
        let x = test.new_int(0, 10);

        assert!(matches!(
            test.engine.specify(x, 11),
            Err(EngineError::Invariant(InvariantViolation::ValueNotInDomain { .. }))
        ));

        let derived = test
            .engine
            .new_variable("int")
            .derived()
            .create()
            .expect("int is registered");
        assert!(matches!(
            test.engine.specify(derived, 0),
            Err(EngineError::Invariant(InvariantViolation::NotSpecifiable(_)))
        ));
    }

    #[test]
    fn discarding_a_variable_removes_its_constraints() {
        let mut test = TestEngine::default();
        let x = test.new_int(0, 10);
        let y = test.new_int(5, 15);
        let constraint = test.post("eq", [x, y]);
        assert!(test.propagate());

        test.engine.discard(x).expect("live variable");
        assert!(!test.engine.is_valid(x));
        assert!(!test.engine.is_valid(constraint));
        test.assert_int_bounds(y, 5, 15);
        assert!(test.engine.constraints_of(y).expect("live").is_empty());

        assert!(test.engine.discard(x).is_err());
        assert!(matches!(
            test.engine.domain(x),
            Err(InvariantViolation::InvalidHandle { .. })
        ));
    }

    #[test]
    fn relations_reject_scopes_of_the_wrong_length() {
        let mut test = TestEngine::default();
        let x = test.new_int(0, 10);
        let y = test.new_int(0, 10);

        assert!(matches!(
            test.engine.add_constraint(AddEqual, [x, y], None),
            Err(EngineError::Invariant(InvariantViolation::ScopeMismatch { actual: 2, .. }))
        ));
        assert!(matches!(
            test.engine.add_constraint(Unary::new(Domain::interval_int(0, 1)), [x, y], None),
            Err(EngineError::Invariant(InvariantViolation::ScopeMismatch { .. }))
        ));
        assert_eq!(test.engine.num_constraints(), 0);
        assert!(test.engine.constraints_of(x).expect("live").is_empty());
        assert!(test.propagate());

        let _ = test
            .engine
            .add_constraint(AllDifferent, [x, y], None)
            .expect("two arguments are enough");
        assert_eq!(test.engine.num_constraints(), 1);
    }

    #[test]
    fn propagators_are_entities_which_cannot_be_discarded() {
        let mut test = TestEngine::default();
        let propagator = test
            .engine
            .new_propagator("bounds", Priority::High)
            .expect("fresh name");

        assert!(test.engine.is_valid(propagator));
        assert_eq!(
            test.engine
                .entity_of(propagator)
                .map(|entity| entity.kind()),
            Ok(EntityKind::Propagator)
        );
        assert!(matches!(
            test.engine.discard(propagator),
            Err(EngineError::Invariant(InvariantViolation::NotDiscardable { .. }))
        ));
        assert!(test.engine.is_valid(propagator));
    }

    #[test]
    fn handles_of_other_engines_are_rejected() {
        let mut first = TestEngine::default();
        let mut second = TestEngine::default();
        let _ = first.new_int(0, 1);
        let foreign = second.new_int(0, 1);

        assert!(matches!(
            first.engine.domain(foreign),
            Err(InvariantViolation::ForeignHandle { .. })
        ));
        assert!(!first.engine.is_valid(foreign));
    }

    #[test]
    fn base_domain_is_locked_once_constrained() {
        let mut test = TestEngine::default();
        let x = test.new_int(0, 10);
        let y = test.new_int(0, 10);

        test.engine
            .restrict_base_domain(x, &Domain::interval_int(2, 8))
            .expect("no constraints yet");
        test.assert_int_bounds(x, 2, 8);

        let _ = test.post("eq", [x, y]);
        assert!(matches!(
            test.engine.restrict_base_domain(x, &Domain::interval_int(3, 4)),
            Err(EngineError::Invariant(InvariantViolation::BaseDomainLocked(_)))
        ));
    }

    #[test]
    fn propagators_run_in_priority_order() {
        let mut test = TestEngine::default();
        let late = test
            .engine
            .new_propagator("late", Priority::Low)
            .expect("fresh name");
        let early = test
            .engine
            .new_propagator("early", Priority::High)
            .expect("fresh name");
        assert!(test.engine.new_propagator("early", Priority::Low).is_err());

        let x = test.new_int(0, 10);
        let y = test.new_int(0, 10);
        let _ = test
            .engine
            .new_constraint("leq", [x, y])
            .on_propagator(late)
            .post()
            .expect("valid constraint");
        let _ = test
            .engine
            .new_constraint("eq", [x, y])
            .on_propagator(early)
            .post()
            .expect("valid constraint");

        assert_eq!(test.engine.propagator_state(late), Ok(PropagatorState::Dirty));
        assert_eq!(test.engine.agenda_len(early), Ok(1));
        assert!(test.propagate());
        assert_eq!(test.engine.propagator_state(late), Ok(PropagatorState::Idle));
        assert_eq!(test.engine.statistics.constraint_executions, 2);
    }

    #[test]
    fn scope_integrity_holds_through_removals() {
        let mut test = TestEngine::default();
        let x = test.new_int(0, 10);
        let y = test.new_int(0, 10);
        let z = test.new_int(0, 10);
        let first = test.post("leq", [x, y]);
        let _ = test.post("allDiff", [x, y, z]);

        assert_eq!(test.engine.check_scope_integrity(), Ok(()));
        test.engine.discard(first).expect("live constraint");
        assert_eq!(test.engine.check_scope_integrity(), Ok(()));
        test.engine.discard(z).expect("live variable");
        assert_eq!(test.engine.check_scope_integrity(), Ok(()));
        assert_eq!(test.engine.num_constraints(), 0);
        assert_eq!(test.engine.num_variables(), 2);
    }
}
