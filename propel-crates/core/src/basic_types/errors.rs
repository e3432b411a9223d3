use std::sync::Arc;

use thiserror::Error;

use super::EntityKind;
use crate::domains::DomainKind;
use crate::domains::Value;

/// Failures of operations on a single [`Domain`](crate::domains::Domain).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("a {left} domain cannot be combined with a {right} domain")]
    IncompatibleKinds { left: DomainKind, right: DomainKind },
    #[error("the value {value} is not of a kind that a {kind} domain holds")]
    ValueKindMismatch { kind: DomainKind, value: Value },
    #[error("the members of a {0} domain cannot be enumerated")]
    NotEnumerable(DomainKind),
    #[error("a {0} domain has no numeric bounds")]
    NotNumeric(DomainKind),
    #[error("the domain is empty")]
    Empty,
    #[error("{target} is not a superset of {current}")]
    NotASuperset { current: String, target: String },
}

/// Programmer errors: the network is being used in a way that would corrupt it.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InvariantViolation {
    #[error("the {kind} handle {handle} does not refer to a live entity")]
    InvalidHandle { kind: EntityKind, handle: String },
    #[error("the {kind} handle {handle} belongs to another engine")]
    ForeignHandle { kind: EntityKind, handle: String },
    #[error("constraint '{constraint}' expects {expected} arguments but got {actual}")]
    ScopeMismatch {
        constraint: Arc<str>,
        expected: String,
        actual: usize,
    },
    #[error("argument {index} is out of the scope of constraint '{constraint}'")]
    ArgumentOutOfScope { constraint: Arc<str>, index: usize },
    #[error("variable '{0}' is derived and cannot be specified")]
    NotSpecifiable(Arc<str>),
    #[error("cannot specify '{variable}' to {value}: not in its domain {domain}")]
    ValueNotInDomain {
        variable: Arc<str>,
        value: Value,
        domain: String,
    },
    #[error("the base domain of '{0}' cannot change once constraints refer to it")]
    BaseDomainLocked(Arc<str>),
    #[error("the new base domain of '{0}' is not a subset of the current one")]
    BaseDomainNotSubset(Arc<str>),
    #[error("the {kind} '{name}' has been discarded")]
    Discarded { kind: EntityKind, name: Arc<str> },
    #[error("the {kind} '{name}' lives as long as its engine and cannot be discarded")]
    NotDiscardable { kind: EntityKind, name: Arc<str> },
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error("scope integrity is broken: {0}")]
    ScopeIntegrity(String),
}

/// Malformed input to the construction API.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigurationError {
    #[error("a type named '{0}' is already registered")]
    DuplicateType(String),
    #[error("no type named '{0}' is registered")]
    UnknownType(String),
    #[error("'{literal}' is not a valid {type_name} literal: {reason}")]
    InvalidLiteral {
        type_name: String,
        literal: String,
        reason: String,
    },
    #[error("a constraint type named '{0}' is already registered")]
    DuplicateConstraintType(String),
    #[error("no constraint type named '{0}' is registered")]
    UnknownConstraintType(String),
    #[error("a propagator named '{0}' already exists")]
    DuplicatePropagator(String),
    #[error("no propagator named '{0}' exists")]
    UnknownPropagator(String),
    #[error("invalid arguments for constraint type '{constraint}': {reason}")]
    ArgumentMismatch { constraint: String, reason: String },
    #[error("type '{type_name}' expects a {expected} base domain but got a {found} one")]
    BaseDomainKind {
        type_name: String,
        expected: DomainKind,
        found: DomainKind,
    },
    #[error("{domain} is not within the values of type '{type_name}'")]
    BaseDomainNotInType { type_name: String, domain: String },
}

/// The error of the construction and query API of the
/// [`ConstraintEngine`](crate::ConstraintEngine).
///
/// Note that an inconsistent network is not an error; it is reported by
/// [`ConstraintEngine::is_consistent`](crate::ConstraintEngine::is_consistent).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    #[error(transparent)]
    Invariant(#[from] InvariantViolation),
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
}

impl From<DomainError> for EngineError {
    fn from(error: DomainError) -> Self {
        EngineError::Invariant(error.into())
    }
}
