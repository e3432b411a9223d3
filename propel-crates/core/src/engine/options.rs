/// Options for constructing a [`ConstraintEngine`](crate::ConstraintEngine).
#[derive(Debug, Clone)]
pub struct EngineOptions {
    /// Which network sweeps run at runtime; see [`CheckLevel`].
    pub check_level: CheckLevel,
    /// Whether the built-in `float`, `int` and `bool` types and the built-in constraint types
    /// are registered in the schema of a new engine.
    pub register_default_types: bool,
    /// The name of the propagator which is created with the engine at
    /// [`Priority::Medium`](crate::engine::Priority::Medium). Constraints which are not assigned a
    /// propagator end up on this one.
    pub default_propagator: Option<String>,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            check_level: CheckLevel::default(),
            register_default_types: true,
            default_propagator: Some("Default".to_owned()),
        }
    }
}

/// The amount of verification of the whole network that the engine does while it runs.
///
/// These checks are independent of the internal assertions, whose level is fixed at compile time
/// by the `debug-checks` feature.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum CheckLevel {
    /// Only the checks on the arguments of every call.
    #[default]
    Simple,
    /// Additionally verifies scope integrity after every propagation.
    Moderate,
    /// Additionally verifies scope integrity after every removal.
    Advanced,
    /// Additionally verifies scope integrity after every mutation.
    Extreme,
}
