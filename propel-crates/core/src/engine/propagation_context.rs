use log::trace;

use super::events::changes_between;
use crate::basic_types::DomainError;
use crate::containers::Arena;
use crate::domains::Domain;
use crate::domains::Value;
use crate::engine::ConstrainedVariable;
use crate::engine::DomainChange;
use crate::engine::DomainChanges;
use crate::engine::EmptyDomain;
use crate::engine::PropagationFailure;
use crate::engine::VariableId;
use crate::propel_assert_advanced;

/// The view a [`Relation`](crate::engine::Relation) has on the network while it propagates.
///
/// Arguments are addressed by their position in the scope of the constraint. Every narrowing is
/// recorded so that the engine can dirty the other constraints on the changed variables once the
/// relation returns.
#[derive(Debug)]
pub struct PropagationContext<'a> {
    variables: &'a mut Arena<ConstrainedVariable>,
    scope: &'a [VariableId],
    changes: &'a mut Vec<(VariableId, DomainChanges)>,
    emptied: bool,
}

impl<'a> PropagationContext<'a> {
    pub(crate) fn new(
        variables: &'a mut Arena<ConstrainedVariable>,
        scope: &'a [VariableId],
        changes: &'a mut Vec<(VariableId, DomainChanges)>,
    ) -> PropagationContext<'a> {
        PropagationContext {
            variables,
            scope,
            changes,
            emptied: false,
        }
    }

    pub fn arity(&self) -> usize {
        self.scope.len()
    }

    pub fn variable(&self, argument: usize) -> VariableId {
        self.scope[argument]
    }

    pub fn domain(&self, argument: usize) -> &Domain {
        &self.entry(argument).domain
    }

    /// Whether any domain became empty during this propagation.
    pub(crate) fn emptied(&self) -> bool {
        self.emptied
    }

    /// Intersects the domain of the argument with `domain`.
    pub fn restrict(
        &mut self,
        argument: usize,
        domain: &Domain,
    ) -> Result<bool, PropagationFailure> {
        self.modify(argument, |current| current.intersect(domain))
    }

    pub fn remove_value(
        &mut self,
        argument: usize,
        value: &Value,
    ) -> Result<bool, PropagationFailure> {
        self.modify(argument, |current| current.remove(value))
    }

    pub fn restrict_lower(
        &mut self,
        argument: usize,
        lower_bound: f64,
    ) -> Result<bool, PropagationFailure> {
        self.modify(argument, |current| current.restrict_lower(lower_bound))
    }

    pub fn restrict_upper(
        &mut self,
        argument: usize,
        upper_bound: f64,
    ) -> Result<bool, PropagationFailure> {
        self.modify(argument, |current| current.restrict_upper(upper_bound))
    }

    /// Narrows the domains of both arguments to their common values.
    pub fn equate(&mut self, first: usize, second: usize) -> Result<bool, PropagationFailure> {
        let (first, second) = (self.scope[first], self.scope[second]);
        if first == second {
            return Ok(false);
        }

        let (left, right) = self
            .variables
            .get_pair_mut(first, second)
            .expect("scope variables outlive their constraints");
        let (left_before, right_before) = (left.domain.clone(), right.domain.clone());
        let changed = left.domain.equate(&mut right.domain)?;
        if !changed {
            return Ok(false);
        }

        let left_changes = changes_between(&left_before, &left.domain);
        let right_changes = changes_between(&right_before, &right.domain);
        self.record(first, left_changes);
        self.record(second, right_changes);

        if self.emptied {
            Err(EmptyDomain.into())
        } else {
            Ok(true)
        }
    }

    fn modify(
        &mut self,
        argument: usize,
        operation: impl FnOnce(&mut Domain) -> Result<bool, DomainError>,
    ) -> Result<bool, PropagationFailure> {
        let variable = self.scope[argument];
        let entry = self
            .variables
            .get_mut(variable)
            .expect("scope variables outlive their constraints");

        let before = entry.domain.clone();
        if !operation(&mut entry.domain)? {
            return Ok(false);
        }
        propel_assert_advanced!(
            entry.domain.is_subset_of(&before),
            "propagation widened {before} to {}",
            entry.domain
        );
        trace!("{}: {before} -> {}", entry.entity.name(), entry.domain);

        let changes = changes_between(&before, &entry.domain);
        let emptied = entry.domain.is_empty();
        self.record(variable, changes);

        if emptied {
            Err(EmptyDomain.into())
        } else {
            Ok(true)
        }
    }

    fn record(&mut self, variable: VariableId, changes: DomainChanges) {
        if changes.is_empty() {
            return;
        }
        if changes.contains(DomainChange::Emptied) {
            self.emptied = true;
        }

        match self.changes.iter_mut().find(|(changed, _)| *changed == variable) {
            Some((_, recorded)) => *recorded |= changes,
            None => self.changes.push((variable, changes)),
        }
    }

    fn entry(&self, argument: usize) -> &ConstrainedVariable {
        self.variables
            .get(self.scope[argument])
            .expect("scope variables outlive their constraints")
    }
}
