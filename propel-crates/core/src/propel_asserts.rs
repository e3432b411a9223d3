//! Levelled internal assertions and the always-on check used by the public API.
//!
//! Internal assertions (`propel_assert_*`) are compiled in according to
//! [`PROPEL_ASSERT_LEVEL_DEFINITION`] and panic on failure; they guard invariants of the engine
//! itself. [`propel_check!`] is always active and turns a failed precondition of a caller into a
//! structured [`InvariantViolation`](crate::InvariantViolation) instead of a panic.

#[cfg(not(feature = "debug-checks"))]
pub(crate) const PROPEL_ASSERT_LEVEL_DEFINITION: u8 = PROPEL_ASSERT_SIMPLE;
#[cfg(feature = "debug-checks")]
pub(crate) const PROPEL_ASSERT_LEVEL_DEFINITION: u8 = PROPEL_ASSERT_ADVANCED;

pub(crate) const PROPEL_ASSERT_SIMPLE: u8 = 1;
pub(crate) const PROPEL_ASSERT_MODERATE: u8 = 2;
pub(crate) const PROPEL_ASSERT_ADVANCED: u8 = 3;
pub(crate) const PROPEL_ASSERT_EXTREME: u8 = 4;

#[macro_export]
#[doc(hidden)]
macro_rules! propel_assert_simple {
    ($($arg:tt)*) => {
        if $crate::propel_asserts::PROPEL_ASSERT_LEVEL_DEFINITION >= $crate::propel_asserts::PROPEL_ASSERT_SIMPLE {
            assert!($($arg)*);
        }
    };
}

#[macro_export]
#[doc(hidden)]
macro_rules! propel_assert_moderate {
    ($($arg:tt)*) => {
        if $crate::propel_asserts::PROPEL_ASSERT_LEVEL_DEFINITION >= $crate::propel_asserts::PROPEL_ASSERT_MODERATE {
            assert!($($arg)*);
        }
    };
}

#[macro_export]
#[doc(hidden)]
macro_rules! propel_assert_advanced {
    ($($arg:tt)*) => {
        if $crate::propel_asserts::PROPEL_ASSERT_LEVEL_DEFINITION >= $crate::propel_asserts::PROPEL_ASSERT_ADVANCED {
            assert!($($arg)*);
        }
    };
}

#[macro_export]
#[doc(hidden)]
macro_rules! propel_assert_extreme {
    ($($arg:tt)*) => {
        if $crate::propel_asserts::PROPEL_ASSERT_LEVEL_DEFINITION >= $crate::propel_asserts::PROPEL_ASSERT_EXTREME {
            assert!($($arg)*);
        }
    };
}

/// Returns the given violation (converted into the error type of the enclosing function) when the
/// condition does not hold. The failure is logged before it is returned.
#[macro_export]
#[doc(hidden)]
macro_rules! propel_check {
    ($condition:expr, $violation:expr $(,)?) => {
        if !$condition {
            let violation: $crate::InvariantViolation = $violation;
            log::error!("check failed: {violation}");
            return Err(violation.into());
        }
    };
}
