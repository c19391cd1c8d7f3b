//! Shared test helpers to reduce duplication across integration tests.

#![allow(dead_code)]

#[allow(clippy::duplicate_mod)]
#[path = "fixtures/mod.rs"]
mod fixtures;

pub use fixtures::{CAPACITY, FireCounter, MockClock, TestMux, bump, noop};

use tick_mux::TimerMux;

// ============================================================================
// Scheduler Creation Helpers
// ============================================================================

/// Fresh scheduler plus a handle to its clock, time at zero.
pub fn mux_and_clock() -> (TestMux, MockClock) {
    let clock = MockClock::new();
    (TimerMux::new(clock.clone()), clock)
}

/// Fresh invocation counter for parameterized callbacks.
pub fn counter() -> FireCounter {
    FireCounter::default()
}

// ============================================================================
// Tick Helpers
// ============================================================================

/// Advance the clock by `ms` and run one tick.
pub fn step(mux: &mut TestMux, clock: &MockClock, ms: u32) {
    clock.advance(ms);
    mux.tick();
}

/// Jump the clock to an absolute time and run one tick.
pub fn tick_at(mux: &mut TestMux, clock: &MockClock, ms: u32) {
    clock.set(ms);
    mux.tick();
}
