use std::fmt::Debug;
use std::fmt::Display;
use std::fmt::Formatter;
use std::sync::Arc;

use itertools::Itertools;

use crate::basic_types::ConfigurationError;
use crate::basic_types::EngineError;
use crate::basic_types::InvariantViolation;
use crate::domains::DomainKind;
use crate::engine::Relation;

/// The number of arguments a constraint type accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Arity {
    Exactly(usize),
    AtLeast(usize),
}

impl Arity {
    pub fn accepts(self, num_arguments: usize) -> bool {
        match self {
            Arity::Exactly(arity) => num_arguments == arity,
            Arity::AtLeast(arity) => num_arguments >= arity,
        }
    }
}

impl Display for Arity {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Arity::Exactly(arity) => write!(f, "exactly {arity}"),
            Arity::AtLeast(arity) => write!(f, "at least {arity}"),
        }
    }
}

/// The domain kinds a constraint type accepts for its arguments.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ArgumentKinds {
    /// Either all arguments are numeric or all are symbolic.
    #[default]
    Compatible,
    /// All arguments are numeric.
    Numeric,
}

type RelationConstructor = Box<dyn Fn(&[DomainKind]) -> Box<dyn Relation>>;

/// A named kind of constraint which can be created through the
/// [`CeSchema`](crate::schema::CeSchema).
///
/// The constructor receives the domain kinds of the scope, so a relation can adapt to e.g.
/// integral arguments.
pub struct ConstraintType {
    name: Arc<str>,
    arity: Arity,
    argument_kinds: ArgumentKinds,
    propagator: Option<Arc<str>>,
    constructor: RelationConstructor,
}

impl Debug for ConstraintType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConstraintType")
            .field("name", &self.name)
            .field("arity", &self.arity)
            .field("argument_kinds", &self.argument_kinds)
            .field("propagator", &self.propagator)
            .field("constructor", &"<Constructor>")
            .finish()
    }
}

impl ConstraintType {
    pub fn new(
        name: impl Into<Arc<str>>,
        arity: Arity,
        constructor: impl Fn(&[DomainKind]) -> Box<dyn Relation> + 'static,
    ) -> Self {
        ConstraintType {
            name: name.into(),
            arity,
            argument_kinds: ArgumentKinds::default(),
            propagator: None,
            constructor: Box::new(constructor),
        }
    }

    pub fn with_argument_kinds(mut self, argument_kinds: ArgumentKinds) -> Self {
        self.argument_kinds = argument_kinds;
        self
    }

    /// Attaches constraints of this type to the propagator with the given name by default,
    /// instead of to the default propagator of the engine.
    pub fn on_propagator(mut self, propagator: impl Into<Arc<str>>) -> Self {
        self.propagator = Some(propagator.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn arity(&self) -> Arity {
        self.arity
    }

    pub fn argument_kinds(&self) -> ArgumentKinds {
        self.argument_kinds
    }

    pub fn propagator(&self) -> Option<&str> {
        self.propagator.as_deref()
    }

    /// Creates the relation for a scope whose domains have the given kinds.
    pub(crate) fn instantiate(
        &self,
        kinds: &[DomainKind],
    ) -> Result<Box<dyn Relation>, EngineError> {
        if !self.arity.accepts(kinds.len()) {
            return Err(InvariantViolation::ScopeMismatch {
                constraint: Arc::clone(&self.name),
                expected: self.arity.to_string(),
                actual: kinds.len(),
            }
            .into());
        }

        let num_numeric = kinds.iter().filter(|kind| kind.is_numeric()).count();
        let accepted = match self.argument_kinds {
            ArgumentKinds::Compatible => num_numeric == 0 || num_numeric == kinds.len(),
            ArgumentKinds::Numeric => num_numeric == kinds.len(),
        };
        if !accepted {
            return Err(ConfigurationError::ArgumentMismatch {
                constraint: self.name.to_string(),
                reason: format!(
                    "arguments of kinds {} are not {}",
                    kinds.iter().join(", "),
                    match self.argument_kinds {
                        ArgumentKinds::Compatible => "compatible",
                        ArgumentKinds::Numeric => "all numeric",
                    }
                ),
            }
            .into());
        }

        Ok((self.constructor)(kinds))
    }
}
