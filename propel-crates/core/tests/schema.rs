#![cfg(test)] // workaround for https://github.com/rust-lang/rust-clippy/issues/11024

mod utils;

use convert_case::Case;
use propel_core::domains::Domain;
use propel_core::domains::DomainKind;
use propel_core::engine::EngineOptions;
use propel_core::relations::LessThanEqual;
use propel_core::schema::Arity;
use propel_core::schema::CeSchema;
use propel_core::schema::ConstraintType;
use propel_core::schema::EnumeratedTypeFactory;
use propel_core::schema::IntervalIntTypeFactory;
use propel_core::statistics::StatisticOptions;
use propel_core::ConfigurationError;
use propel_core::ConstraintEngine;
use propel_core::EngineError;
use propel_core::Value;
use utils::*;

#[test]
fn literals_are_parsed_by_their_type() {
    init_logging();
    let engine = ConstraintEngine::default();

    let value = engine.create_value("int", "42").expect("valid literal");
    assert_eq!(value, Value::Int(42));
    assert_eq!(value.to_string(), "42");

    assert_eq!(engine.create_value("bool", "true"), Ok(Value::Bool(true)));
    assert_eq!(engine.create_value("float", "2.5"), Ok(Value::Real(2.5)));
    assert_eq!(engine.create_value("int", "+inf").map(|v| v.to_string()), Ok("+inf".to_owned()));
    assert!(matches!(
        engine.create_value("int", "forty-two"),
        Err(ConfigurationError::InvalidLiteral { .. })
    ));
    assert!(matches!(
        engine.create_value("string", "42"),
        Err(ConfigurationError::UnknownType(_))
    ));
}

#[test]
fn custom_types_bound_their_variables() {
    init_logging();
    let mut schema = CeSchema::new();
    schema
        .register_factory(IntervalIntTypeFactory::bounded("digit", 0, 9))
        .expect("fresh name");
    schema
        .register_factory(EnumeratedTypeFactory::new("prime", [2.0, 3.0, 5.0, 7.0]))
        .expect("fresh name");
    assert!(matches!(
        schema.register_factory(IntervalIntTypeFactory::new("digit")),
        Err(ConfigurationError::DuplicateType(_))
    ));

    let mut engine = ConstraintEngine::with_schema(EngineOptions::default(), schema);
    assert!(engine.schema().has_type("int"));
    assert!(engine.schema().has_type("digit"));

    let digit = engine.new_variable("digit").create().expect("digit is registered");
    assert_eq!(engine.domain(digit), Ok(&Domain::interval_int(0, 9)));
    assert!(matches!(
        engine
            .new_variable("digit")
            .with_base_domain(Domain::interval_int(5, 12))
            .create(),
        Err(EngineError::Configuration(ConfigurationError::BaseDomainNotInType { .. }))
    ));
    assert!(matches!(
        engine
            .new_variable("digit")
            .with_base_domain(Domain::interval(0.0, 1.0))
            .create(),
        Err(EngineError::Configuration(ConfigurationError::BaseDomainKind { .. }))
    ));

    let prime = engine.new_variable("prime").create().expect("prime is registered");
    let _ = engine.new_constraint("eq", [digit, prime]).post().expect("numeric kinds");
    engine.specify(digit, 4).expect("4 is a digit");
    assert_eq!(engine.propagate(), Ok(false));

    assert_eq!(engine.create_value("prime", "5"), Ok(Value::Real(5.0)));
    assert!(engine.create_value("prime", "4").is_err());
}

#[test]
fn engines_without_default_types_start_empty() {
    init_logging();
    let options = EngineOptions {
        register_default_types: false,
        default_propagator: None,
        ..EngineOptions::default()
    };
    let mut engine = ConstraintEngine::new(options);

    assert!(engine.schema().type_names().is_empty());
    assert!(engine.default_propagator().is_none());
    assert!(matches!(
        engine.new_variable("int").create(),
        Err(EngineError::Configuration(ConfigurationError::UnknownType(_)))
    ));

    engine
        .schema_mut()
        .register_factory(IntervalIntTypeFactory::new("int"))
        .expect("fresh name");
    let x = new_int(&mut engine, 0, 1);
    let y = new_int(&mut engine, 0, 1);
    assert!(matches!(
        engine.new_constraint("leq", [x, y]).post(),
        Err(EngineError::Configuration(ConfigurationError::UnknownConstraintType(_)))
    ));
    assert!(matches!(
        engine.add_constraint(LessThanEqual::non_strict(), [x, y], None),
        Err(EngineError::Configuration(ConfigurationError::UnknownPropagator(_)))
    ));
}

#[test]
fn constraint_types_name_their_propagator() {
    init_logging();
    let mut engine = ConstraintEngine::default();
    let ordering = engine
        .new_propagator("ordering", propel_core::engine::Priority::Low)
        .expect("fresh name");
    engine
        .schema_mut()
        .register_constraint_type(
            ConstraintType::new("before", Arity::Exactly(2), |kinds: &[DomainKind]| {
                Box::new(LessThanEqual::strict(kinds)) as Box<dyn propel_core::engine::Relation>
            })
            .on_propagator("ordering"),
        )
        .expect("fresh name");

    let x = new_int(&mut engine, 0, 10);
    let y = new_int(&mut engine, 0, 10);
    let constraint = engine.new_constraint("before", [x, y]).post().expect("valid");
    assert_eq!(engine.constraint(constraint).map(|c| c.propagator()), Ok(ordering));
    assert!(matches!(
        engine.new_constraint("before", [x]).post(),
        Err(EngineError::Invariant(_))
    ));

    assert_eq!(engine.propagate(), Ok(true));
    assert_eq!(engine.domain(y), Ok(&Domain::interval_int(1, 10)));
}

#[test]
fn statistics_are_written_with_the_configured_casing() {
    init_logging();
    let mut engine = ConstraintEngine::default();
    let x = new_int(&mut engine, 0, 10);
    let y = new_int(&mut engine, 0, 5);
    let _ = engine.new_constraint("eq", [x, y]).post().expect("valid");
    assert_eq!(engine.propagate(), Ok(true));

    let mut output = Vec::new();
    {
        let mut options = StatisticOptions::new("propel-stat:", Box::new(&mut output))
            .with_casing(Case::Camel)
            .with_after_statistics("propel-stats-end");
        engine.log_statistics(&mut options);
    }

    let output = String::from_utf8(output).expect("statistics are utf-8");
    assert!(output.contains("propel-stat: engineConstraintExecutions=1\n"));
    assert!(output.contains("propel-stat: engineVariablesCreated=2\n"));
    assert!(output.ends_with("propel-stats-end\n"));
}
