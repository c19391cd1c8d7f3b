//! # tick-mux
//!
//! Fixed-capacity software timer multiplexer for embedded systems with zero
//! heap allocation.
//!
//! Many logical periodic or one-shot callbacks ("soft timers") are driven
//! from a single interrupt-capable hardware timer tick, so an application can
//! schedule dozens of callbacks while consuming one timer peripheral.
//!
//! **Key features:**
//! - **Static allocation** - Slot capacity is a const generic, zero heap usage
//! - **Catch-up scheduling** - A starved scheduler dispatches a late timer once
//!   and keeps its period boundaries phase-aligned
//! - **Dual callback shapes** - Plain `fn()`, or `fn(&mut P)` paired with a
//!   stored argument
//! - **Flexible clock** - Any monotonic wrapping millisecond counter, down to
//!   a bare `fn() -> u32`
//!
//! Drive [`TimerMux::tick`] from a hardware timer interrupt or a poll loop at
//! a cadence at least as fast as the shortest registered period. Callbacks
//! run inline in the tick path and must return promptly. The scheduler
//! performs no locking; when `tick` runs in interrupt context, wrap the mux
//! in the platform's critical-section primitive.
//!
//! ## Optional Features
//!
//! - `defmt` - Trace instrumentation and `Format` derives via defmt
//! - `log` - Trace instrumentation via the log facade
//!
//! This library is `no_std` compatible.

#![no_std]
#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

// Logging shim; must precede the modules that use its macros.
#[macro_use]
mod fmt;

// ============================================================================
// Module Declarations
// ============================================================================

// Clock seam
pub mod clock;

// Callback representation
pub mod callback;

// Error handling
pub mod error;

// Slot records and run-count accounting
pub mod slot;

// Scheduler core
pub mod mux;

// ============================================================================
// Re-exports - Public API
// ============================================================================

// Clock seam
pub use clock::Clock;

// Callback shapes
pub use callback::Callback;

// Error types
pub use error::Error;

// Run-count sentinels
pub use slot::RunCount;

// Scheduler
pub use mux::TimerMux;

// ============================================================================
// Library Metadata
// ============================================================================

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

// ============================================================================
// Tests
// ============================================================================
