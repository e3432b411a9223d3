use std::fmt::Debug;
use std::str::FromStr;
use std::sync::Arc;

use crate::basic_types::ConfigurationError;
use crate::domains::Domain;
use crate::domains::Value;
use crate::domains::INT_MINUS_INFINITY;
use crate::domains::INT_PLUS_INFINITY;

/// Creates the variables and values of one named type.
///
/// A factory owns the base domain that variables of its type start from, and parses textual
/// literals into values of its domain kind.
pub trait TypeFactory: Debug {
    fn type_name(&self) -> &str;

    fn base_domain(&self) -> &Domain;

    /// Parses a literal into a value of this type.
    fn create_value(&self, literal: &str) -> Result<Value, ConfigurationError>;
}

fn invalid_literal(type_name: &str, literal: &str, reason: impl ToString) -> ConfigurationError {
    ConfigurationError::InvalidLiteral {
        type_name: type_name.to_owned(),
        literal: literal.to_owned(),
        reason: reason.to_string(),
    }
}

fn parse_real(type_name: &str, literal: &str) -> Result<f64, ConfigurationError> {
    let value = match literal.trim() {
        "+inf" | "inf" => f64::INFINITY,
        "-inf" => f64::NEG_INFINITY,
        trimmed => {
            f64::from_str(trimmed).map_err(|error| invalid_literal(type_name, literal, error))?
        }
    };
    if value.is_nan() {
        return Err(invalid_literal(type_name, literal, "not a number"));
    }
    Ok(value)
}

fn require_member(
    factory: &dyn TypeFactory,
    literal: &str,
    value: Value,
) -> Result<Value, ConfigurationError> {
    if factory.base_domain().contains(&value) {
        Ok(value)
    } else {
        Err(invalid_literal(
            factory.type_name(),
            literal,
            format!("not one of {}", factory.base_domain()),
        ))
    }
}

/// Real-valued interval variables.
#[derive(Debug, Clone)]
pub struct IntervalTypeFactory {
    name: Arc<str>,
    base_domain: Domain,
}

impl IntervalTypeFactory {
    /// A type ranging over all reals.
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        Self::bounded(name, f64::NEG_INFINITY, f64::INFINITY)
    }

    pub fn bounded(name: impl Into<Arc<str>>, lower_bound: f64, upper_bound: f64) -> Self {
        IntervalTypeFactory {
            name: name.into(),
            base_domain: Domain::interval(lower_bound, upper_bound),
        }
    }
}

impl TypeFactory for IntervalTypeFactory {
    fn type_name(&self) -> &str {
        &self.name
    }

    fn base_domain(&self) -> &Domain {
        &self.base_domain
    }

    fn create_value(&self, literal: &str) -> Result<Value, ConfigurationError> {
        let value = parse_real(&self.name, literal)?;
        require_member(self, literal, Value::Real(value))
    }
}

/// Integer interval variables.
#[derive(Debug, Clone)]
pub struct IntervalIntTypeFactory {
    name: Arc<str>,
    base_domain: Domain,
}

impl IntervalIntTypeFactory {
    /// A type ranging over all integers.
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        Self::bounded(name, INT_MINUS_INFINITY, INT_PLUS_INFINITY)
    }

    pub fn bounded(name: impl Into<Arc<str>>, lower_bound: i64, upper_bound: i64) -> Self {
        IntervalIntTypeFactory {
            name: name.into(),
            base_domain: Domain::interval_int(lower_bound, upper_bound),
        }
    }
}

impl TypeFactory for IntervalIntTypeFactory {
    fn type_name(&self) -> &str {
        &self.name
    }

    fn base_domain(&self) -> &Domain {
        &self.base_domain
    }

    fn create_value(&self, literal: &str) -> Result<Value, ConfigurationError> {
        let value = match literal.trim() {
            "+inf" | "inf" => INT_PLUS_INFINITY,
            "-inf" => INT_MINUS_INFINITY,
            trimmed => {
                i64::from_str(trimmed).map_err(|error| invalid_literal(&self.name, literal, error))?
            }
        };
        require_member(self, literal, Value::Int(value))
    }
}

/// Boolean variables; literals are `true`/`false` or `1`/`0`.
#[derive(Debug, Clone)]
pub struct BoolTypeFactory {
    name: Arc<str>,
    base_domain: Domain,
}

impl BoolTypeFactory {
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        BoolTypeFactory {
            name: name.into(),
            base_domain: Domain::boolean(),
        }
    }
}

impl TypeFactory for BoolTypeFactory {
    fn type_name(&self) -> &str {
        &self.name
    }

    fn base_domain(&self) -> &Domain {
        &self.base_domain
    }

    fn create_value(&self, literal: &str) -> Result<Value, ConfigurationError> {
        match literal.trim() {
            "true" | "1" => Ok(Value::Bool(true)),
            "false" | "0" => Ok(Value::Bool(false)),
            _ => Err(invalid_literal(&self.name, literal, "expected true or false")),
        }
    }
}

/// Variables over a fixed set of numbers; literals must be one of them.
#[derive(Debug, Clone)]
pub struct EnumeratedTypeFactory {
    name: Arc<str>,
    base_domain: Domain,
}

impl EnumeratedTypeFactory {
    pub fn new(name: impl Into<Arc<str>>, values: impl IntoIterator<Item = f64>) -> Self {
        EnumeratedTypeFactory {
            name: name.into(),
            base_domain: Domain::enumerated(values),
        }
    }
}

impl TypeFactory for EnumeratedTypeFactory {
    fn type_name(&self) -> &str {
        &self.name
    }

    fn base_domain(&self) -> &Domain {
        &self.base_domain
    }

    fn create_value(&self, literal: &str) -> Result<Value, ConfigurationError> {
        let value = parse_real(&self.name, literal)?;
        require_member(self, literal, Value::Real(value))
    }
}

/// Variables over a fixed set of symbols; literals must be one of them.
#[derive(Debug, Clone)]
pub struct SymbolicTypeFactory {
    name: Arc<str>,
    base_domain: Domain,
}

impl SymbolicTypeFactory {
    pub fn new<S: Into<Arc<str>>>(
        name: impl Into<Arc<str>>,
        symbols: impl IntoIterator<Item = S>,
    ) -> Self {
        SymbolicTypeFactory {
            name: name.into(),
            base_domain: Domain::symbolic(symbols),
        }
    }
}

impl TypeFactory for SymbolicTypeFactory {
    fn type_name(&self) -> &str {
        &self.name
    }

    fn base_domain(&self) -> &Domain {
        &self.base_domain
    }

    fn create_value(&self, literal: &str) -> Result<Value, ConfigurationError> {
        require_member(self, literal, Value::from(literal.trim()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_literals() {
        let factory = IntervalIntTypeFactory::new("int");

        assert_eq!(factory.create_value("42"), Ok(Value::Int(42)));
        assert_eq!(factory.create_value(" -7 "), Ok(Value::Int(-7)));
        assert_eq!(factory.create_value("+inf"), Ok(Value::Int(INT_PLUS_INFINITY)));
        assert!(matches!(
            factory.create_value("4.5"),
            Err(ConfigurationError::InvalidLiteral { .. })
        ));
    }

    #[test]
    fn real_literals() {
        let factory = IntervalTypeFactory::new("float");

        assert_eq!(factory.create_value("2.5"), Ok(Value::Real(2.5)));
        assert_eq!(factory.create_value("-inf"), Ok(Value::Real(f64::NEG_INFINITY)));
        assert!(factory.create_value("NaN").is_err());
        assert!(factory.create_value("two").is_err());
    }

    #[test]
    fn literals_of_bounded_intervals_must_be_members() {
        let digits = IntervalIntTypeFactory::bounded("digit", 0, 9);
        assert_eq!(digits.create_value("7"), Ok(Value::Int(7)));
        assert!(matches!(
            digits.create_value("100"),
            Err(ConfigurationError::InvalidLiteral { .. })
        ));
        assert!(digits.create_value("+inf").is_err());

        let ratios = IntervalTypeFactory::bounded("ratio", 0.0, 1.0);
        assert_eq!(ratios.create_value("0.25"), Ok(Value::Real(0.25)));
        assert!(ratios.create_value("1.5").is_err());
    }

    #[test]
    fn boolean_literals() {
        let factory = BoolTypeFactory::new("bool");

        assert_eq!(factory.create_value("true"), Ok(Value::Bool(true)));
        assert_eq!(factory.create_value("0"), Ok(Value::Bool(false)));
        assert!(factory.create_value("yes").is_err());
    }

    #[test]
    fn literals_of_finite_types_must_be_members() {
        let colours = SymbolicTypeFactory::new("Colour", ["red", "green"]);
        assert_eq!(colours.create_value("red"), Ok(Value::from("red")));
        assert!(colours.create_value("blue").is_err());

        let speeds = EnumeratedTypeFactory::new("Speed", [10.0, 20.0]);
        assert_eq!(speeds.create_value("20"), Ok(Value::Real(20.0)));
        assert!(speeds.create_value("15").is_err());
    }
}
