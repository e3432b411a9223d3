use crate::engine::EmptyDomain;
use crate::engine::LocalFixpoint;
use crate::engine::PropagationContext;
use crate::engine::PropagationFailure;
use crate::engine::PropagationStatus;
use crate::engine::Relation;
use crate::schema::Arity;

/// The number of bounds sweeps done in one execution before the constraint puts itself back on
/// the agenda.
const MAX_SWEEPS: usize = 8;

/// `x + y = z` by bounds reasoning.
///
/// Bounds which would be computed from opposite infinities (`inf - inf`) are left alone.
#[derive(Debug, Clone, Copy, Default)]
pub struct AddEqual;

impl AddEqual {
    /// Projects the bounds onto each argument once; returns whether anything changed.
    fn sweep(context: &mut PropagationContext<'_>) -> Result<bool, PropagationFailure> {
        let mut changed = false;

        let [(x_lower, x_upper), (y_lower, y_upper), _] = bounds(context)?;
        changed |= context.restrict_lower(2, x_lower + y_lower)?;
        changed |= context.restrict_upper(2, x_upper + y_upper)?;

        let [_, (y_lower, y_upper), (z_lower, z_upper)] = bounds(context)?;
        changed |= context.restrict_lower(0, z_lower - y_upper)?;
        changed |= context.restrict_upper(0, z_upper - y_lower)?;

        let [(x_lower, x_upper), _, (z_lower, z_upper)] = bounds(context)?;
        changed |= context.restrict_lower(1, z_lower - x_upper)?;
        changed |= context.restrict_upper(1, z_upper - x_lower)?;

        Ok(changed)
    }
}

fn bounds(context: &PropagationContext<'_>) -> Result<[(f64, f64); 3], EmptyDomain> {
    let mut bounds = [(0.0, 0.0); 3];
    for (argument, bound) in bounds.iter_mut().enumerate() {
        *bound = context.domain(argument).numeric_bounds().ok_or(EmptyDomain)?;
    }
    Ok(bounds)
}

impl Relation for AddEqual {
    fn name(&self) -> &str {
        "AddEqual"
    }

    fn arity(&self) -> Arity {
        Arity::Exactly(3)
    }

    fn propagate(&mut self, context: &mut PropagationContext<'_>) -> PropagationStatus {
        for _ in 0..MAX_SWEEPS {
            if !AddEqual::sweep(context)? {
                return Ok(LocalFixpoint::Reached);
            }
        }
        Ok(LocalFixpoint::NotReached)
    }
}
