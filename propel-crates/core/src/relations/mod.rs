//! The built-in relations and the constraint types which create them.
//!
//! Every built-in relation except [`Unary`] is registered in the schema of a new engine under a
//! short name (`eq`, `neq`, `leq`, `lt`, `addEq`, `allDiff`). [`Unary`] carries a domain and is
//! added through [`ConstraintEngine::add_constraint`](crate::ConstraintEngine::add_constraint).
mod add_equal;
mod all_different;
mod equal;
mod less_than_equal;
mod not_equal;
mod unary;

pub use add_equal::AddEqual;
pub use all_different::AllDifferent;
pub use equal::Equal;
pub use less_than_equal::LessThanEqual;
pub use not_equal::NotEqual;
pub use unary::Unary;

use crate::domains::DomainKind;
use crate::engine::Relation;
use crate::schema::ArgumentKinds;
use crate::schema::Arity;
use crate::schema::ConstraintType;

pub(crate) fn default_constraint_types() -> Vec<ConstraintType> {
    vec![
        ConstraintType::new("eq", Arity::AtLeast(2), |_: &[DomainKind]| -> Box<dyn Relation> {
            Box::new(Equal)
        }),
        ConstraintType::new("neq", Arity::Exactly(2), |_: &[DomainKind]| -> Box<dyn Relation> {
            Box::new(NotEqual)
        }),
        ConstraintType::new("leq", Arity::Exactly(2), |_: &[DomainKind]| -> Box<dyn Relation> {
            Box::new(LessThanEqual::non_strict())
        })
        .with_argument_kinds(ArgumentKinds::Numeric),
        ConstraintType::new("lt", Arity::Exactly(2), |kinds: &[DomainKind]| -> Box<dyn Relation> {
            Box::new(LessThanEqual::strict(kinds))
        })
        .with_argument_kinds(ArgumentKinds::Numeric),
        ConstraintType::new("addEq", Arity::Exactly(3), |_: &[DomainKind]| -> Box<dyn Relation> {
            Box::new(AddEqual)
        })
        .with_argument_kinds(ArgumentKinds::Numeric),
        ConstraintType::new(
            "allDiff",
            Arity::AtLeast(2),
            |_: &[DomainKind]| -> Box<dyn Relation> { Box::new(AllDifferent) },
        ),
    ]
}
