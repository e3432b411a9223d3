use super::EPSILON;

/// A closed interval of reals.
///
/// Bounds closer than [`EPSILON`] are considered equal, so an interval whose lower bound exceeds
/// its upper bound by less than [`EPSILON`] collapses onto a singleton rather than becoming empty.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntervalDomain {
    lower_bound: f64,
    upper_bound: f64,
}

impl IntervalDomain {
    pub fn new(lower_bound: f64, upper_bound: f64) -> Self {
        let mut domain = IntervalDomain {
            lower_bound,
            upper_bound,
        };
        domain.normalise();
        domain
    }

    /// The interval `[-inf, +inf]`.
    pub fn unbounded() -> Self {
        IntervalDomain::new(f64::NEG_INFINITY, f64::INFINITY)
    }

    pub fn lower_bound(&self) -> f64 {
        self.lower_bound
    }

    pub fn upper_bound(&self) -> f64 {
        self.upper_bound
    }

    pub fn is_empty(&self) -> bool {
        self.lower_bound > self.upper_bound
    }

    pub fn is_singleton(&self) -> bool {
        !self.is_empty()
            && (self.lower_bound == self.upper_bound
                || self.upper_bound - self.lower_bound <= EPSILON)
    }

    pub fn contains(&self, value: f64) -> bool {
        !self.is_empty()
            && (value >= self.lower_bound || self.lower_bound - value <= EPSILON)
            && (value <= self.upper_bound || value - self.upper_bound <= EPSILON)
    }

    /// Narrows the interval to `[lower_bound, upper_bound]`; returns whether it changed.
    pub(crate) fn restrict_bounds(&mut self, lower_bound: f64, upper_bound: f64) -> bool {
        if self.is_empty() {
            return false;
        }

        let mut changed = false;
        if exceeds(lower_bound, self.lower_bound) {
            self.lower_bound = lower_bound;
            changed = true;
        }
        if exceeds(self.upper_bound, upper_bound) {
            self.upper_bound = upper_bound;
            changed = true;
        }
        self.normalise();

        changed
    }

    pub(crate) fn set_empty(&mut self) -> bool {
        let changed = !self.is_empty();
        self.lower_bound = f64::INFINITY;
        self.upper_bound = f64::NEG_INFINITY;
        changed
    }

    fn normalise(&mut self) {
        if self.lower_bound.is_nan() || self.upper_bound.is_nan() {
            let _ = self.set_empty();
        } else if self.lower_bound > self.upper_bound {
            if self.lower_bound - self.upper_bound <= EPSILON {
                self.upper_bound = self.lower_bound;
            } else {
                let _ = self.set_empty();
            }
        }
    }
}

/// Whether `a` is larger than `b` by more than the precision of real bounds.
pub(crate) fn exceeds(a: f64, b: f64) -> bool {
    if a == b {
        return false;
    }
    a > b && (a - b > EPSILON || a.is_infinite() || b.is_infinite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn restriction_within_precision_is_not_a_change() {
        let mut domain = IntervalDomain::new(0.0, 10.0);
        assert!(!domain.restrict_bounds(EPSILON / 2.0, 10.0));
        assert_eq!(domain.lower_bound(), 0.0);

        assert!(domain.restrict_bounds(1.0, 5.0));
        assert_eq!((domain.lower_bound(), domain.upper_bound()), (1.0, 5.0));
    }

    #[test]
    fn nearly_crossing_bounds_collapse_to_singleton() {
        let mut domain = IntervalDomain::new(0.0, 10.0);
        assert!(domain.restrict_bounds(5.0 + EPSILON / 2.0, 5.0));
        assert!(domain.is_singleton());
        assert!(!domain.is_empty());

        assert!(domain.restrict_bounds(7.0, 10.0));
        assert!(domain.is_empty());
    }

    #[test]
    fn unbounded_interval_narrows_from_infinity() {
        let mut domain = IntervalDomain::unbounded();
        assert!(domain.contains(1e300));
        assert!(domain.restrict_bounds(f64::NEG_INFINITY, 3.5));
        assert!(!domain.contains(4.0));
        assert!(domain.contains(3.5));
    }
}
