//! Structural invariant checks for weight tables and field buffers.

use crate::amr_error::{AmrFieldError, Result};

/// Trait for validating data structure invariants.
pub trait DebugInvariants {
    /// Panic with the first broken invariant. Only does work in debug builds
    /// or with the `check-invariants` feature.
    fn debug_assert_invariants(&self) {
        crate::debug_invariants!(self.validate_invariants(), "invariant check failed");
    }

    /// Validate invariants and return the first error encountered.
    fn validate_invariants(&self) -> Result<()>;
}

/// Turn a failed condition into an [`AmrFieldError::InvariantViolation`].
#[inline]
pub(crate) fn ensure(cond: bool, what: impl FnOnce() -> String) -> Result<()> {
    if cond {
        Ok(())
    } else {
        Err(AmrFieldError::InvariantViolation(what()))
    }
}

/// Run a fallible check and panic on error when invariant checking is enabled.
#[macro_export]
macro_rules! debug_invariants {
    ($expr:expr, $($ctx:tt)*) => {
        #[cfg(any(debug_assertions, feature = "strict-invariants", feature = "check-invariants"))]
        if let Err(e) = $expr {
            panic!(concat!("[invariants] ", $($ctx)*, ": {}"), e);
        }
    };
}
