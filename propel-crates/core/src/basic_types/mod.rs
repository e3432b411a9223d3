mod entity;
mod errors;

pub use entity::Entity;
pub use entity::EntityKey;
pub use entity::EntityKind;
pub use entity::EntityRef;
pub use errors::ConfigurationError;
pub use errors::DomainError;
pub use errors::EngineError;
pub use errors::InvariantViolation;
