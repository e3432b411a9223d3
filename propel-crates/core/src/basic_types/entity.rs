use std::fmt::Display;
use std::fmt::Formatter;
use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;
use std::sync::Arc;

use crate::engine::ConstraintId;
use crate::engine::PropagatorId;
use crate::engine::VariableId;

static NEXT_ENTITY_KEY: AtomicU64 = AtomicU64::new(0);

/// A process-unique, monotonically assigned identifier of an [`Entity`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntityKey(u64);

impl EntityKey {
    pub(crate) fn next() -> EntityKey {
        EntityKey(NEXT_ENTITY_KEY.fetch_add(1, Ordering::Relaxed))
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl Display for EntityKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Variable,
    Constraint,
    Propagator,
    Engine,
}

impl Display for EntityKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            EntityKind::Variable => "variable",
            EntityKind::Constraint => "constraint",
            EntityKind::Propagator => "propagator",
            EntityKind::Engine => "engine",
        };
        write!(f, "{name}")
    }
}

/// The identity shared by every participant of a constraint network.
#[derive(Debug, Clone)]
pub struct Entity {
    key: EntityKey,
    kind: EntityKind,
    name: Arc<str>,
    discarded: bool,
}

impl Entity {
    pub(crate) fn new(kind: EntityKind, name: Option<Arc<str>>) -> Entity {
        let key = EntityKey::next();
        let name = name.unwrap_or_else(|| format!("{kind}_{key}").into());
        Entity {
            key,
            kind,
            name,
            discarded: false,
        }
    }

    pub fn key(&self) -> EntityKey {
        self.key
    }

    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    pub fn name(&self) -> &Arc<str> {
        &self.name
    }

    /// Whether [`discard`](crate::ConstraintEngine::discard) has been called; the entity may still
    /// be physically present until the pending removals are flushed.
    pub fn is_discarded(&self) -> bool {
        self.discarded
    }

    /// Marks the entity as discarded; returns whether it was not discarded before.
    pub(crate) fn discard(&mut self) -> bool {
        !std::mem::replace(&mut self.discarded, true)
    }
}

/// A reference to an entity of a [`ConstraintEngine`](crate::ConstraintEngine).
///
/// Variables and constraints can be discarded. Propagators live as long as their engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityRef {
    Variable(VariableId),
    Constraint(ConstraintId),
    Propagator(PropagatorId),
}

impl From<VariableId> for EntityRef {
    fn from(variable: VariableId) -> Self {
        EntityRef::Variable(variable)
    }
}

impl From<ConstraintId> for EntityRef {
    fn from(constraint: ConstraintId) -> Self {
        EntityRef::Constraint(constraint)
    }
}

impl From<PropagatorId> for EntityRef {
    fn from(propagator: PropagatorId) -> Self {
        EntityRef::Propagator(propagator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_monotonic() {
        let first = Entity::new(EntityKind::Variable, None);
        let second = Entity::new(EntityKind::Constraint, Some("c".into()));

        assert!(first.key() < second.key());
        assert_eq!(&**first.name(), format!("variable_{}", first.key()));
        assert_eq!(&**second.name(), "c");
    }

    #[test]
    fn discarding_twice_is_harmless() {
        let mut entity = Entity::new(EntityKind::Variable, None);
        assert!(entity.discard());
        assert!(!entity.discard());
        assert!(entity.is_discarded());
    }
}
