//! Error types for scheduler operations.
//!
//! Registration is the only fallible operation. Every other form of misuse
//! (stale ids, out-of-range ids) degrades to a silent no-op or a `false`
//! return with no partial mutation - callers rely on that being
//! safe-by-default, so those paths never surface an error value.

use core::fmt;

/// Timer registration error.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// Every timer slot is occupied.
    CapacityExceeded,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::CapacityExceeded => write!(f, "All timer slots are in use"),
        }
    }
}
