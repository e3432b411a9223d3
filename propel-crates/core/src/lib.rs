//! # Propel
//! A constraint-propagation engine: a network of typed variables, each holding a domain of
//! possible values, and of constraints which narrow those domains until local consistency is
//! reached.
//!
//! The main entry point is the [`ConstraintEngine`]. Variables are created from named types of
//! its [`CeSchema`](schema::CeSchema), constraints from named constraint types or from a
//! hand-built [`Relation`](engine::Relation). Constraints are grouped into
//! [`Propagator`](engine::Propagator)s; [`ConstraintEngine::propagate`] runs the dirty propagators
//! in order of [`Priority`](engine::Priority) until a fixpoint is reached or a domain becomes
//! empty.
//!
//! # Example
//! ```rust
//! # use propel_core::ConstraintEngine;
//! # use propel_core::domains::Domain;
//! let mut engine = ConstraintEngine::default();
//! let x = engine
//!     .new_variable("int")
//!     .with_base_domain(Domain::interval_int(0, 5))
//!     .create()?;
//! let y = engine
//!     .new_variable("int")
//!     .with_base_domain(Domain::interval_int(10, 15))
//!     .create()?;
//! let _ = engine.new_constraint("eq", [x, y]).post()?;
//!
//! // The domains have nothing in common.
//! assert!(!engine.propagate()?);
//! assert!(!engine.is_consistent());
//! # Ok::<(), propel_core::EngineError>(())
//! ```
pub(crate) mod basic_types;
pub mod containers;
pub mod domains;
pub mod engine;
pub(crate) mod propel_asserts;
pub mod relations;
pub mod schema;
pub mod statistics;

pub use convert_case;

pub use crate::basic_types::ConfigurationError;
pub use crate::basic_types::DomainError;
pub use crate::basic_types::EngineError;
pub use crate::basic_types::Entity;
pub use crate::basic_types::EntityKey;
pub use crate::basic_types::EntityKind;
pub use crate::basic_types::EntityRef;
pub use crate::basic_types::InvariantViolation;
pub use crate::domains::Domain;
pub use crate::domains::Value;
pub use crate::engine::ConstraintEngine;
