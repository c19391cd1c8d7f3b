//! Timer callback representation.
//!
//! Dispatch supports two call shapes: a plain zero-argument function, or a
//! one-argument function paired with the argument it will be invoked with.
//! The argument lives inside the timer slot, so no allocation is involved.

use core::fmt;

/// A registered timer's callback.
///
/// The `P` type parameter is the argument type shared by all parameterized
/// callbacks of one scheduler; zero-argument callbacks ignore it. On every
/// dispatch the stored argument is passed back by mutable reference, so a
/// callback can keep per-timer state without statics.
pub enum Callback<P> {
    /// Zero-argument callback.
    Unit(fn()),

    /// Callback invoked with a mutable reference to its stored argument.
    Param(fn(&mut P), P),
}

impl<P> Callback<P> {
    /// Invoke the callback once.
    pub(crate) fn invoke(&mut self) {
        match self {
            Callback::Unit(f) => f(),
            Callback::Param(f, param) => f(param),
        }
    }
}

// Manual impl: derive would demand `P: Debug` and print the raw fn pointer,
// neither of which is useful here.
impl<P> fmt::Debug for Callback<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Callback::Unit(_) => f.write_str("Callback::Unit"),
            Callback::Param(..) => f.write_str("Callback::Param"),
        }
    }
}
