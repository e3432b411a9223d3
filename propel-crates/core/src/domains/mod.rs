//! The value sets that constrained variables range over.
//!
//! A [`Domain`] is one of five kinds (see [`DomainKind`]). All operations are defined in terms of
//! the set of values a domain represents rather than its representation: two domains are equal
//! when they contain the same values, and the numeric kinds (real and integer intervals, booleans
//! as `0`/`1`, and enumerated number sets) can be intersected with one another. A domain keeps its
//! own kind when it is narrowed by a domain of another numeric kind. Symbolic domains only combine
//! with symbolic domains.
//!
//! Domains only become smaller through [`Domain::intersect`], [`Domain::remove`] and the bound
//! restrictions; the only way to make them larger again is [`Domain::relax`].
mod boolean;
mod enumerated;
mod interval;
mod interval_int;
mod symbolic;
mod value;

use std::fmt::Display;
use std::fmt::Formatter;
use std::sync::Arc;

pub use boolean::BoolDomain;
pub use enumerated::EnumeratedDomain;
pub use interval::IntervalDomain;
pub use interval_int::IntervalIntDomain;
use itertools::Itertools;
pub use symbolic::SymbolicDomain;
pub use value::Value;

use crate::basic_types::DomainError;

/// The precision used when comparing real-valued bounds and members.
pub const EPSILON: f64 = 1e-5;
/// Stands for an unbounded upper side of an integer interval.
pub const INT_PLUS_INFINITY: i64 = i64::MAX;
/// Stands for an unbounded lower side of an integer interval.
pub const INT_MINUS_INFINITY: i64 = i64::MIN;
/// Integer intervals with more members than this are not enumerated by [`Domain::values`].
pub const MAX_ENUMERATED_VALUES: u64 = 1 << 16;

/// The kinds of [`Domain`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DomainKind {
    /// A closed interval of reals.
    Interval,
    /// A closed interval of integers.
    IntervalInt,
    /// A subset of `{false, true}`.
    Bool,
    /// A finite set of numbers.
    Enumerated,
    /// A finite set of symbols.
    Symbolic,
}

impl DomainKind {
    pub fn is_numeric(self) -> bool {
        self != DomainKind::Symbolic
    }

    /// Whether the members of this kind are integral.
    pub fn is_integral(self) -> bool {
        matches!(self, DomainKind::IntervalInt | DomainKind::Bool)
    }
}

impl Display for DomainKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            DomainKind::Interval => "real interval",
            DomainKind::IntervalInt => "integer interval",
            DomainKind::Bool => "boolean",
            DomainKind::Enumerated => "enumerated",
            DomainKind::Symbolic => "symbolic",
        };
        write!(f, "{name}")
    }
}

/// A set of values; see the module documentation.
#[derive(Debug, Clone)]
pub enum Domain {
    Interval(IntervalDomain),
    IntervalInt(IntervalIntDomain),
    Bool(BoolDomain),
    Enumerated(EnumeratedDomain),
    Symbolic(SymbolicDomain),
}

/// Constructors.
impl Domain {
    pub fn interval(lower_bound: f64, upper_bound: f64) -> Domain {
        Domain::Interval(IntervalDomain::new(lower_bound, upper_bound))
    }

    pub fn interval_int(lower_bound: i64, upper_bound: i64) -> Domain {
        Domain::IntervalInt(IntervalIntDomain::new(lower_bound, upper_bound))
    }

    pub fn boolean() -> Domain {
        Domain::Bool(BoolDomain::default())
    }

    pub fn enumerated(values: impl IntoIterator<Item = f64>) -> Domain {
        Domain::Enumerated(EnumeratedDomain::new(values))
    }

    pub fn symbolic<S: Into<Arc<str>>>(symbols: impl IntoIterator<Item = S>) -> Domain {
        Domain::Symbolic(SymbolicDomain::new(symbols))
    }

    /// The singleton domain of the natural kind of `value`.
    pub fn from_value(value: &Value) -> Domain {
        match value {
            Value::Real(value) => Domain::interval(*value, *value),
            Value::Int(value) => Domain::interval_int(*value, *value),
            Value::Bool(value) => Domain::Bool(BoolDomain::singleton(*value)),
            Value::Symbol(symbol) => Domain::symbolic([Arc::clone(symbol)]),
        }
    }
}

/// Queries.
impl Domain {
    pub fn kind(&self) -> DomainKind {
        match self {
            Domain::Interval(_) => DomainKind::Interval,
            Domain::IntervalInt(_) => DomainKind::IntervalInt,
            Domain::Bool(_) => DomainKind::Bool,
            Domain::Enumerated(_) => DomainKind::Enumerated,
            Domain::Symbolic(_) => DomainKind::Symbolic,
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Domain::Interval(domain) => domain.is_empty(),
            Domain::IntervalInt(domain) => domain.is_empty(),
            Domain::Bool(domain) => domain.is_empty(),
            Domain::Enumerated(domain) => domain.is_empty(),
            Domain::Symbolic(domain) => domain.is_empty(),
        }
    }

    pub fn is_singleton(&self) -> bool {
        match self {
            Domain::Interval(domain) => domain.is_singleton(),
            Domain::IntervalInt(domain) => domain.is_singleton(),
            Domain::Bool(domain) => domain.is_singleton(),
            Domain::Enumerated(domain) => domain.is_singleton(),
            Domain::Symbolic(domain) => domain.is_singleton(),
        }
    }

    /// The only member of a singleton domain.
    pub fn singleton_value(&self) -> Option<Value> {
        if !self.is_singleton() {
            return None;
        }

        match self {
            Domain::Interval(domain) => Some(Value::Real(domain.lower_bound())),
            Domain::IntervalInt(domain) => Some(Value::Int(domain.lower_bound())),
            Domain::Bool(domain) => domain.members().next().map(Value::Bool),
            Domain::Enumerated(domain) => domain.min().map(Value::Real),
            Domain::Symbolic(domain) => domain
                .symbols()
                .next()
                .map(|symbol| Value::Symbol(Arc::clone(symbol))),
        }
    }

    /// Whether `value` is a member; values of an incompatible kind are never members.
    pub fn contains(&self, value: &Value) -> bool {
        match (self, value) {
            (Domain::Symbolic(domain), Value::Symbol(symbol)) => domain.contains(symbol),
            (Domain::Symbolic(_), _) | (_, Value::Symbol(_)) => false,
            (Domain::Bool(domain), Value::Bool(value)) => domain.contains(*value),
            (Domain::IntervalInt(domain), Value::Int(value)) => domain.contains(*value),
            (_, value) => value
                .as_f64()
                .is_some_and(|number| self.contains_number(number)),
        }
    }

    /// The smallest and largest member of a numeric domain.
    pub fn bounds(&self) -> Result<(Value, Value), DomainError> {
        if self.kind() == DomainKind::Symbolic {
            return Err(DomainError::NotNumeric(self.kind()));
        }
        if self.is_empty() {
            return Err(DomainError::Empty);
        }

        let bounds = match self {
            Domain::Interval(domain) => (
                Value::Real(domain.lower_bound()),
                Value::Real(domain.upper_bound()),
            ),
            Domain::IntervalInt(domain) => (
                Value::Int(domain.lower_bound()),
                Value::Int(domain.upper_bound()),
            ),
            Domain::Bool(domain) => (
                Value::Bool(!domain.contains(false)),
                Value::Bool(domain.contains(true)),
            ),
            Domain::Enumerated(domain) => (
                Value::Real(domain.min().unwrap_or(f64::NAN)),
                Value::Real(domain.max().unwrap_or(f64::NAN)),
            ),
            Domain::Symbolic(_) => unreachable!("symbolic domains are rejected above"),
        };
        Ok(bounds)
    }

    /// The bounds of a numeric domain as reals; [`None`] for empty and symbolic domains.
    pub fn numeric_bounds(&self) -> Option<(f64, f64)> {
        if self.is_empty() {
            return None;
        }
        match self {
            Domain::Interval(domain) => Some((domain.lower_bound(), domain.upper_bound())),
            Domain::IntervalInt(domain) => Some((
                value::int_to_f64(domain.lower_bound()),
                value::int_to_f64(domain.upper_bound()),
            )),
            Domain::Bool(domain) => Some((
                if domain.contains(false) { 0.0 } else { 1.0 },
                if domain.contains(true) { 1.0 } else { 0.0 },
            )),
            Domain::Enumerated(domain) => domain.min().zip(domain.max()),
            Domain::Symbolic(_) => None,
        }
    }

    /// The number of members, or [`None`] when there are infinitely many.
    pub fn size(&self) -> Option<u64> {
        match self {
            Domain::Interval(domain) if domain.is_empty() => Some(0),
            Domain::Interval(domain) if domain.is_singleton() => Some(1),
            Domain::Interval(_) => None,
            Domain::IntervalInt(domain) => domain.size(),
            Domain::Bool(domain) => Some(domain.members().count() as u64),
            Domain::Enumerated(domain) => Some(domain.len() as u64),
            Domain::Symbolic(domain) => Some(domain.len() as u64),
        }
    }

    /// Enumerates the members in ascending order.
    pub fn values(&self) -> Result<Vec<Value>, DomainError> {
        match self {
            Domain::Interval(domain) if domain.is_empty() => Ok(vec![]),
            Domain::Interval(domain) if domain.is_singleton() => {
                Ok(vec![Value::Real(domain.lower_bound())])
            }
            Domain::Interval(_) => Err(DomainError::NotEnumerable(self.kind())),
            Domain::IntervalInt(domain) => match domain.size() {
                Some(size) if size <= MAX_ENUMERATED_VALUES => Ok((domain.lower_bound()
                    ..=domain.upper_bound())
                    .map(Value::Int)
                    .collect()),
                _ => Err(DomainError::NotEnumerable(self.kind())),
            },
            Domain::Bool(domain) => Ok(domain.members().map(Value::Bool).collect()),
            Domain::Enumerated(domain) => {
                Ok(domain.values().iter().copied().map(Value::Real).collect())
            }
            Domain::Symbolic(domain) => Ok(domain
                .symbols()
                .map(|symbol| Value::Symbol(Arc::clone(symbol)))
                .collect()),
        }
    }

    /// Whether every member of `self` is a member of `other`.
    pub fn is_subset_of(&self, other: &Domain) -> bool {
        if self.is_empty() {
            return self.kind().is_numeric() == other.kind().is_numeric();
        }
        if self.kind().is_numeric() != other.kind().is_numeric() {
            return false;
        }
        if let Some(value) = self.singleton_value() {
            return other.contains(&value);
        }

        match (self, other) {
            // Interval narrowing only looks at the bounds of `other`, which is exact when `other`
            // has no holes.
            (
                Domain::Interval(_) | Domain::IntervalInt(_),
                Domain::Interval(_) | Domain::IntervalInt(_),
            ) => {
                let mut narrowed = self.clone();
                matches!(narrowed.intersect(other), Ok(false))
            }
            // A proper real interval has infinitely many members.
            (Domain::Interval(_), _) => false,
            (Domain::IntervalInt(domain), _) => match (domain.size(), other.size()) {
                (Some(size), Some(other_size)) if size <= other_size => (domain.lower_bound()
                    ..=domain.upper_bound())
                    .all(|member| other.contains(&Value::Int(member))),
                _ => false,
            },
            // The discrete kinds narrow member by member.
            _ => {
                let mut narrowed = self.clone();
                matches!(narrowed.intersect(other), Ok(false))
            }
        }
    }

    fn contains_number(&self, number: f64) -> bool {
        match self {
            Domain::Interval(domain) => domain.contains(number),
            Domain::IntervalInt(domain) => {
                integral(number).is_some_and(|integer| domain.contains(integer))
            }
            Domain::Bool(domain) => integral(number).is_some_and(|integer| match integer {
                0 => domain.contains(false),
                1 => domain.contains(true),
                _ => false,
            }),
            Domain::Enumerated(domain) => domain.contains(number),
            Domain::Symbolic(_) => false,
        }
    }
}

/// Narrowing and relaxation.
impl Domain {
    /// Narrows `self` to the values it shares with `other`; returns whether `self` changed.
    pub fn intersect(&mut self, other: &Domain) -> Result<bool, DomainError> {
        let (left, right) = (self.kind(), other.kind());
        if left.is_numeric() != right.is_numeric() {
            return Err(DomainError::IncompatibleKinds { left, right });
        }

        let changed = match self {
            Domain::Symbolic(domain) => match other {
                Domain::Symbolic(other) => domain.retain_common(other),
                _ => unreachable!("kinds were checked above"),
            },
            Domain::Interval(domain) => match other.numeric_bounds() {
                Some((lower_bound, upper_bound)) => {
                    domain.restrict_bounds(lower_bound, upper_bound)
                }
                None => domain.set_empty(),
            },
            Domain::IntervalInt(domain) => {
                let bounds = match other {
                    Domain::Bool(_) | Domain::Enumerated(_) => {
                        let members = other.values()?;
                        members
                            .iter()
                            .filter_map(|member| member.as_f64().and_then(integral))
                            .filter(|member| domain.contains(*member))
                            .minmax()
                            .into_option()
                    }
                    _ => other
                        .numeric_bounds()
                        .map(|(lower_bound, upper_bound)| {
                            (int_ceil(lower_bound), int_floor(upper_bound))
                        }),
                };
                match bounds {
                    Some((lower_bound, upper_bound)) => {
                        domain.restrict_bounds(lower_bound, upper_bound)
                    }
                    None => domain.set_empty(),
                }
            }
            Domain::Bool(domain) => {
                domain.retain(|member| other.contains_number(if member { 1.0 } else { 0.0 }))
            }
            Domain::Enumerated(domain) => domain.retain(|member| other.contains_number(*member)),
        };

        Ok(changed)
    }

    /// Narrows both domains to their common values; returns whether either changed.
    pub fn equate(&mut self, other: &mut Domain) -> Result<bool, DomainError> {
        let self_changed = self.intersect(other)?;
        let other_changed = other.intersect(self)?;
        Ok(self_changed || other_changed)
    }

    /// Removes a single value. Intervals cannot represent holes: removing an interior value from
    /// an interval leaves it unchanged.
    pub fn remove(&mut self, value: &Value) -> Result<bool, DomainError> {
        let kind = self.kind();
        let number = match (&mut *self, value) {
            (Domain::Symbolic(domain), Value::Symbol(symbol)) => return Ok(domain.remove(symbol)),
            (Domain::Symbolic(_), _) | (_, Value::Symbol(_)) => {
                return Err(DomainError::ValueKindMismatch {
                    kind,
                    value: value.clone(),
                });
            }
            (_, value) => value.as_f64().unwrap_or(f64::NAN),
        };

        let changed = match self {
            Domain::Interval(domain) => {
                domain.is_singleton() && domain.contains(number) && domain.set_empty()
            }
            Domain::IntervalInt(domain) => {
                integral(number).is_some_and(|integer| domain.remove(integer))
            }
            Domain::Bool(domain) => match integral(number) {
                Some(0) => domain.remove(false),
                Some(1) => domain.remove(true),
                _ => false,
            },
            Domain::Enumerated(domain) => domain.remove(number),
            Domain::Symbolic(_) => unreachable!("symbolic domains are handled above"),
        };
        Ok(changed)
    }

    /// Removes every member smaller than `lower_bound`.
    pub fn restrict_lower(&mut self, lower_bound: f64) -> Result<bool, DomainError> {
        if lower_bound.is_nan() {
            return Ok(false);
        }
        self.intersect(&Domain::interval(lower_bound, f64::INFINITY))
    }

    /// Removes every member larger than `upper_bound`.
    pub fn restrict_upper(&mut self, upper_bound: f64) -> Result<bool, DomainError> {
        if upper_bound.is_nan() {
            return Ok(false);
        }
        self.intersect(&Domain::interval(f64::NEG_INFINITY, upper_bound))
    }

    /// Widens `self` to `to`, which must be a superset of the same kind; returns whether `self`
    /// changed.
    pub fn relax(&mut self, to: &Domain) -> Result<bool, DomainError> {
        if self.kind() != to.kind() {
            return Err(DomainError::IncompatibleKinds {
                left: self.kind(),
                right: to.kind(),
            });
        }
        if !self.is_subset_of(to) {
            return Err(DomainError::NotASuperset {
                current: self.to_string(),
                target: to.to_string(),
            });
        }

        let changed = !to.is_subset_of(self);
        *self = to.clone();
        Ok(changed)
    }
}

impl PartialEq for Domain {
    fn eq(&self, other: &Self) -> bool {
        self.is_subset_of(other) && other.is_subset_of(self)
    }
}

impl Display for Domain {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.is_empty() {
            return write!(f, "{{}}");
        }
        if let Some(value) = self.singleton_value() {
            return write!(f, "{value}");
        }

        match self {
            Domain::Interval(domain) => write!(
                f,
                "[{}, {}]",
                Value::Real(domain.lower_bound()),
                Value::Real(domain.upper_bound())
            ),
            Domain::IntervalInt(domain) => write!(
                f,
                "[{}, {}]",
                Value::Int(domain.lower_bound()),
                Value::Int(domain.upper_bound())
            ),
            Domain::Bool(domain) => write!(f, "{{{}}}", domain.members().join(", ")),
            Domain::Enumerated(domain) => write!(
                f,
                "{{{}}}",
                domain.values().iter().map(|value| Value::Real(*value)).join(", ")
            ),
            Domain::Symbolic(domain) => write!(f, "{{{}}}", domain.symbols().join(", ")),
        }
    }
}

/// The integer `number` stands for, if it is integral within [`EPSILON`].
fn integral(number: f64) -> Option<i64> {
    if number == f64::INFINITY {
        return Some(INT_PLUS_INFINITY);
    }
    if number == f64::NEG_INFINITY {
        return Some(INT_MINUS_INFINITY);
    }
    let rounded = number.round();
    ((number - rounded).abs() <= EPSILON).then(|| clamp_to_int(rounded))
}

fn int_floor(number: f64) -> i64 {
    clamp_to_int((number + EPSILON).floor())
}

fn int_ceil(number: f64) -> i64 {
    clamp_to_int((number - EPSILON).ceil())
}

fn clamp_to_int(number: f64) -> i64 {
    if number >= INT_PLUS_INFINITY as f64 {
        INT_PLUS_INFINITY
    } else if number <= INT_MINUS_INFINITY as f64 {
        INT_MINUS_INFINITY
    } else {
        number as i64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_interval_narrowed_by_real_interval_rounds_inwards() {
        let mut domain = Domain::interval_int(0, 10);
        assert_eq!(domain.intersect(&Domain::interval(1.5, 7.2)), Ok(true));
        assert_eq!(domain, Domain::interval_int(2, 7));
        assert_eq!(domain.kind(), DomainKind::IntervalInt);
    }

    #[test]
    fn integer_interval_narrowed_by_enumeration_takes_extreme_members() {
        let mut domain = Domain::interval_int(0, 10);
        assert_eq!(domain.intersect(&Domain::enumerated([-4.0, 3.0, 4.5, 8.0])), Ok(true));
        assert_eq!(domain, Domain::interval_int(3, 8));
    }

    #[test]
    fn disjoint_integer_intervals_intersect_to_empty() {
        let mut domain = Domain::interval_int(0, 5);
        assert_eq!(domain.intersect(&Domain::interval_int(10, 15)), Ok(true));
        assert!(domain.is_empty());
        assert_eq!(domain.to_string(), "{}");
    }

    #[test]
    fn symbolic_and_numeric_domains_do_not_mix() {
        let mut domain = Domain::symbolic(["a", "b"]);
        assert_eq!(
            domain.intersect(&Domain::boolean()),
            Err(DomainError::IncompatibleKinds {
                left: DomainKind::Symbolic,
                right: DomainKind::Bool
            })
        );
        assert!(!domain.contains(&Value::Int(1)));
    }

    #[test]
    fn boolean_members_are_zero_and_one() {
        let mut domain = Domain::boolean();
        assert_eq!(domain.intersect(&Domain::interval_int(1, 5)), Ok(true));
        assert_eq!(domain.singleton_value(), Some(Value::Bool(true)));
        assert!(domain.contains(&Value::Int(1)));
    }

    #[test]
    fn equality_uses_value_sets() {
        assert_eq!(Domain::interval_int(3, 3), Domain::enumerated([3.0]));
        assert_eq!(Domain::interval_int(0, 1), Domain::boolean());
        assert_ne!(Domain::interval(0.0, 1.0), Domain::interval_int(0, 1));
        assert_eq!(Domain::interval_int(4, 2), Domain::interval(3.0, 1.0));
    }

    #[test]
    fn integer_interval_is_not_a_subset_of_a_set_with_holes() {
        let interval = Domain::interval_int(0, 2);
        let holes = Domain::enumerated([0.0, 2.0]);

        assert!(!interval.is_subset_of(&holes));
        assert!(holes.is_subset_of(&interval));
        assert_ne!(interval, holes);
        assert!(interval.is_subset_of(&Domain::enumerated([0.0, 1.0, 2.0, 3.0])));
        assert!(!Domain::interval_int(0, 2).is_subset_of(&Domain::boolean()));
    }

    #[test]
    fn real_singleton_subset_checks_membership() {
        let half = Domain::interval(0.5, 0.5);

        assert!(!half.is_subset_of(&Domain::interval_int(0, 1)));
        assert!(!half.is_subset_of(&Domain::enumerated([0.0, 1.0])));
        assert!(half.is_subset_of(&Domain::enumerated([0.5, 1.0])));
        assert!(Domain::interval(1.0, 1.0).is_subset_of(&Domain::interval_int(0, 1)));
        assert!(!half.is_subset_of(&Domain::symbolic(["half"])));
    }

    #[test]
    fn equate_narrows_both_sides() {
        let mut left = Domain::interval_int(0, 10);
        let mut right = Domain::interval_int(5, 20);
        assert_eq!(left.equate(&mut right), Ok(true));
        assert_eq!(left, Domain::interval_int(5, 10));
        assert_eq!(right, Domain::interval_int(5, 10));
        assert_eq!(left.equate(&mut right), Ok(false));
    }

    #[test]
    fn relax_requires_a_superset_of_the_same_kind() {
        let mut domain = Domain::interval_int(2, 3);
        assert!(matches!(
            domain.relax(&Domain::interval_int(2, 2)),
            Err(DomainError::NotASuperset { .. })
        ));
        assert!(domain.relax(&Domain::interval(0.0, 10.0)).is_err());
        assert_eq!(domain.relax(&Domain::interval_int(0, 10)), Ok(true));
        assert_eq!(domain, Domain::interval_int(0, 10));
        assert_eq!(domain.relax(&Domain::interval_int(0, 10)), Ok(false));
    }

    #[test]
    fn removal_from_discrete_domains() {
        let mut domain = Domain::symbolic(["red", "green"]);
        assert_eq!(domain.remove(&Value::from("red")), Ok(true));
        assert_eq!(domain.singleton_value(), Some(Value::from("green")));
        assert!(domain.remove(&Value::Int(1)).is_err());

        let mut numbers = Domain::enumerated([1.0, 2.0, 3.0]);
        assert_eq!(numbers.remove(&Value::Int(2)), Ok(true));
        assert_eq!(numbers.to_string(), "{1, 3}");
    }

    #[test]
    fn enumeration_of_bounded_kinds() {
        assert_eq!(
            Domain::interval_int(1, 3).values(),
            Ok(vec![Value::Int(1), Value::Int(2), Value::Int(3)])
        );
        assert_eq!(
            Domain::interval(0.0, 1.0).values(),
            Err(DomainError::NotEnumerable(DomainKind::Interval))
        );
        assert!(Domain::interval_int(INT_MINUS_INFINITY, 0).values().is_err());
        assert_eq!(
            Domain::interval_int(-1, 4).bounds(),
            Ok((Value::Int(-1), Value::Int(4)))
        );
    }

    #[test]
    fn display_forms() {
        assert_eq!(Domain::interval_int(42, 42).to_string(), "42");
        assert_eq!(Domain::interval_int(0, INT_PLUS_INFINITY).to_string(), "[0, +inf]");
        assert_eq!(Domain::boolean().to_string(), "{false, true}");
        assert_eq!(Domain::symbolic(["b", "a"]).to_string(), "{a, b}");
    }

    #[test]
    fn bound_restrictions() {
        let mut domain = Domain::interval_int(0, 10);
        assert_eq!(domain.restrict_upper(6.5), Ok(true));
        assert_eq!(domain.restrict_lower(2.0), Ok(true));
        assert_eq!(domain, Domain::interval_int(2, 6));
        assert_eq!(domain.restrict_lower(f64::NAN), Ok(false));
    }
}
