use crate::engine::LocalFixpoint;
use crate::engine::PropagationContext;
use crate::engine::PropagationStatus;
use crate::engine::Relation;
use crate::schema::Arity;

/// All arguments take the same value: every domain is narrowed to the common intersection.
#[derive(Debug, Clone, Copy, Default)]
pub struct Equal;

impl Relation for Equal {
    fn name(&self) -> &str {
        "Equal"
    }

    fn arity(&self) -> Arity {
        Arity::AtLeast(2)
    }

    fn propagate(&mut self, context: &mut PropagationContext<'_>) -> PropagationStatus {
        if context.arity() == 2 {
            while context.equate(0, 1)? {}
            return Ok(LocalFixpoint::Reached);
        }

        // Arguments of different kinds may need more than one sweep; every sweep which changes
        // something strictly shrinks a domain.
        loop {
            let mut changed = false;
            for argument in 1..context.arity() {
                let domain = context.domain(argument).clone();
                changed |= context.restrict(0, &domain)?;
            }

            let common = context.domain(0).clone();
            for argument in 1..context.arity() {
                changed |= context.restrict(argument, &common)?;
            }

            if !changed {
                return Ok(LocalFixpoint::Reached);
            }
        }
    }
}
