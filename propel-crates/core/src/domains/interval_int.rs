use super::INT_MINUS_INFINITY;
use super::INT_PLUS_INFINITY;

/// A closed interval of integers. The bounds [`INT_MINUS_INFINITY`] and [`INT_PLUS_INFINITY`]
/// stand for an unbounded side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IntervalIntDomain {
    lower_bound: i64,
    upper_bound: i64,
}

impl IntervalIntDomain {
    pub fn new(lower_bound: i64, upper_bound: i64) -> Self {
        IntervalIntDomain {
            lower_bound,
            upper_bound,
        }
    }

    /// The interval `[-inf, +inf]`.
    pub fn unbounded() -> Self {
        IntervalIntDomain::new(INT_MINUS_INFINITY, INT_PLUS_INFINITY)
    }

    pub fn lower_bound(&self) -> i64 {
        self.lower_bound
    }

    pub fn upper_bound(&self) -> i64 {
        self.upper_bound
    }

    pub fn is_empty(&self) -> bool {
        self.lower_bound > self.upper_bound
    }

    pub fn is_singleton(&self) -> bool {
        self.lower_bound == self.upper_bound
    }

    pub fn is_finite(&self) -> bool {
        self.lower_bound != INT_MINUS_INFINITY && self.upper_bound != INT_PLUS_INFINITY
    }

    pub fn contains(&self, value: i64) -> bool {
        self.lower_bound <= value && value <= self.upper_bound
    }

    /// The number of members, or [`None`] if a side is unbounded.
    pub fn size(&self) -> Option<u64> {
        if self.is_empty() {
            Some(0)
        } else if !self.is_finite() {
            None
        } else {
            u64::try_from(i128::from(self.upper_bound) - i128::from(self.lower_bound) + 1).ok()
        }
    }

    /// Narrows the interval to `[lower_bound, upper_bound]`; returns whether it changed.
    pub(crate) fn restrict_bounds(&mut self, lower_bound: i64, upper_bound: i64) -> bool {
        if self.is_empty() {
            return false;
        }

        let mut changed = false;
        if lower_bound > self.lower_bound {
            self.lower_bound = lower_bound;
            changed = true;
        }
        if upper_bound < self.upper_bound {
            self.upper_bound = upper_bound;
            changed = true;
        }

        changed
    }

    /// Removes the value if it is one of the bounds; an interval cannot represent an interior
    /// hole, so interior values are left in place.
    pub(crate) fn remove(&mut self, value: i64) -> bool {
        if self.is_empty() || !self.contains(value) {
            false
        } else if self.is_singleton() {
            self.set_empty()
        } else if value == self.lower_bound {
            self.lower_bound += 1;
            true
        } else if value == self.upper_bound {
            self.upper_bound -= 1;
            true
        } else {
            false
        }
    }

    pub(crate) fn set_empty(&mut self) -> bool {
        let changed = !self.is_empty();
        self.lower_bound = 1;
        self.upper_bound = 0;
        changed
    }
}
