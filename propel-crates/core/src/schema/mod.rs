//! The registry of the types and constraint types a [`ConstraintEngine`](crate::ConstraintEngine)
//! can create.
//!
//! Each engine owns one [`CeSchema`]. Variables are created from a registered [`TypeFactory`] by
//! name, and constraints from a registered [`ConstraintType`] by name.
mod constraint_type;
mod type_factory;

use std::sync::Arc;

pub use constraint_type::Arity;
pub use constraint_type::ArgumentKinds;
pub use constraint_type::ConstraintType;
use log::debug;
pub use type_factory::BoolTypeFactory;
pub use type_factory::EnumeratedTypeFactory;
pub use type_factory::IntervalIntTypeFactory;
pub use type_factory::IntervalTypeFactory;
pub use type_factory::SymbolicTypeFactory;
pub use type_factory::TypeFactory;

use crate::basic_types::ConfigurationError;
use crate::basic_types::Entity;
use crate::basic_types::EntityKind;
use crate::containers::HashMap;
use crate::domains::Domain;
use crate::domains::Value;
use crate::engine::ConstrainedVariable;

/// Maps type names to [`TypeFactory`]s and constraint-type names to [`ConstraintType`]s.
#[derive(Debug, Default)]
pub struct CeSchema {
    factories: HashMap<Arc<str>, Box<dyn TypeFactory>>,
    constraint_types: HashMap<Arc<str>, ConstraintType>,
}

impl CeSchema {
    /// An empty schema.
    pub fn new() -> CeSchema {
        CeSchema::default()
    }

    /// A schema with the built-in types and constraint types; see
    /// [`CeSchema::register_default_types`].
    pub fn with_default_types() -> CeSchema {
        let mut schema = CeSchema::new();
        schema.register_default_types();
        schema
    }

    /// Registers the `float`, `int` and `bool` types and the built-in constraint types `eq`,
    /// `neq`, `leq`, `lt`, `addEq` and `allDiff`. Names which are already registered are left
    /// untouched.
    pub fn register_default_types(&mut self) {
        let factories: [Box<dyn TypeFactory>; 3] = [
            Box::new(IntervalTypeFactory::new("float")),
            Box::new(IntervalIntTypeFactory::new("int")),
            Box::new(BoolTypeFactory::new("bool")),
        ];
        for factory in factories {
            if self.has_type(factory.type_name()) {
                debug!("keeping the registered type '{}'", factory.type_name());
                continue;
            }
            let _ = self.factories.insert(factory.type_name().into(), factory);
        }

        for constraint_type in crate::relations::default_constraint_types() {
            if self.has_constraint_type(constraint_type.name()) {
                debug!(
                    "keeping the registered constraint type '{}'",
                    constraint_type.name()
                );
                continue;
            }
            let _ = self
                .constraint_types
                .insert(constraint_type.name().into(), constraint_type);
        }
    }

    /// Registers a factory under its [`type name`](TypeFactory::type_name).
    pub fn register_factory(
        &mut self,
        factory: impl TypeFactory + 'static,
    ) -> Result<(), ConfigurationError> {
        let name: Arc<str> = factory.type_name().into();
        if self.factories.contains_key(&name) {
            return Err(ConfigurationError::DuplicateType(name.to_string()));
        }
        debug!("registered type '{name}' over {}", factory.base_domain());
        let _ = self.factories.insert(name, Box::new(factory));
        Ok(())
    }

    pub fn has_type(&self, type_name: &str) -> bool {
        self.factories.contains_key(type_name)
    }

    pub fn factory(&self, type_name: &str) -> Result<&dyn TypeFactory, ConfigurationError> {
        self.factories
            .get(type_name)
            .map(|factory| factory.as_ref())
            .ok_or_else(|| ConfigurationError::UnknownType(type_name.to_owned()))
    }

    /// The registered type names in lexicographic order.
    pub fn type_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.factories.keys().map(|name| &**name).collect();
        names.sort_unstable();
        names
    }

    /// Parses a literal of the named type.
    pub fn create_value(
        &self,
        type_name: &str,
        literal: &str,
    ) -> Result<Value, ConfigurationError> {
        self.factory(type_name)?.create_value(literal)
    }

    /// Creates a variable of the named type. A given base domain must be of the kind of the type
    /// and within its values.
    pub(crate) fn create_variable(
        &self,
        type_name: &str,
        base_domain: Option<Domain>,
        name: Option<Arc<str>>,
        can_be_specified: bool,
    ) -> Result<ConstrainedVariable, ConfigurationError> {
        let factory = self.factory(type_name)?;
        let type_domain = factory.base_domain();

        let base_domain = match base_domain {
            None => type_domain.clone(),
            Some(domain) if domain.kind() != type_domain.kind() => {
                return Err(ConfigurationError::BaseDomainKind {
                    type_name: type_name.to_owned(),
                    expected: type_domain.kind(),
                    found: domain.kind(),
                });
            }
            Some(domain) if !domain.is_subset_of(type_domain) => {
                return Err(ConfigurationError::BaseDomainNotInType {
                    type_name: type_name.to_owned(),
                    domain: domain.to_string(),
                });
            }
            Some(domain) => domain,
        };

        let entity = Entity::new(EntityKind::Variable, name);
        Ok(ConstrainedVariable::new(
            entity,
            factory.type_name().into(),
            base_domain,
            can_be_specified,
        ))
    }

    pub fn register_constraint_type(
        &mut self,
        constraint_type: ConstraintType,
    ) -> Result<(), ConfigurationError> {
        if self.has_constraint_type(constraint_type.name()) {
            return Err(ConfigurationError::DuplicateConstraintType(
                constraint_type.name().to_owned(),
            ));
        }
        debug!("registered constraint type '{}'", constraint_type.name());
        let _ = self
            .constraint_types
            .insert(constraint_type.name().into(), constraint_type);
        Ok(())
    }

    pub fn has_constraint_type(&self, name: &str) -> bool {
        self.constraint_types.contains_key(name)
    }

    pub fn constraint_type(&self, name: &str) -> Result<&ConstraintType, ConfigurationError> {
        self.constraint_types
            .get(name)
            .ok_or_else(|| ConfigurationError::UnknownConstraintType(name.to_owned()))
    }

    /// The registered constraint-type names in lexicographic order.
    pub fn constraint_type_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.constraint_types.keys().map(|name| &**name).collect();
        names.sort_unstable();
        names
    }
}
