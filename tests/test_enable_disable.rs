//! Enable/disable flag tests.
//!
//! Tests dispatch suppression, deadline tracking while disabled, the
//! toggle accessor, and the bulk operations' run-counter gate.

#[allow(clippy::duplicate_mod)]
#[path = "helpers.rs"]
mod helpers;

use tick_mux::{Callback, RunCount};

// ============================================================================
// Flag Tests
// ============================================================================

#[test]
fn test_disable_suppresses_dispatch() {
    let (mut mux, clock) = helpers::mux_and_clock();
    let fired = helpers::counter();
    let id = mux
        .set_interval_with(10, helpers::bump, fired.clone())
        .unwrap();

    mux.disable(id);
    assert!(!mux.is_enabled(id));

    helpers::tick_at(&mut mux, &clock, 30);
    assert_eq!(fired.get(), 0);

    // Still allocated, only dormant.
    assert_eq!(mux.timer_count(), 1);
}

#[test]
fn test_toggle_flips_flag() {
    let (mut mux, _clock) = helpers::mux_and_clock();
    let id = mux.set_interval(10, helpers::noop).unwrap();

    assert!(mux.is_enabled(id));
    mux.toggle(id);
    assert!(!mux.is_enabled(id));
    mux.toggle(id);
    assert!(mux.is_enabled(id));
}

#[test]
fn test_out_of_range_ids_are_safe() {
    let (mut mux, _clock) = helpers::mux_and_clock();
    let beyond = helpers::CAPACITY + 2;

    assert!(!mux.is_enabled(beyond));
    mux.enable(beyond);
    mux.disable(beyond);
    mux.toggle(beyond);
    assert_eq!(mux.timer_count(), 0);
}

// ============================================================================
// Deadline Tracking While Disabled
// ============================================================================

#[test]
fn test_disabled_timer_advances_deadline_without_burst_on_reenable() {
    let (mut mux, clock) = helpers::mux_and_clock();
    let fired = helpers::counter();
    let id = mux
        .set_interval_with(10, helpers::bump, fired.clone())
        .unwrap();

    mux.disable(id);

    // 3.5 periods pass while disabled; the baseline advances to 30.
    helpers::tick_at(&mut mux, &clock, 35);
    assert_eq!(fired.get(), 0);

    mux.enable(id);

    // Nothing due until the NEXT period boundary: no catch-up burst.
    helpers::tick_at(&mut mux, &clock, 36);
    assert_eq!(fired.get(), 0);

    helpers::tick_at(&mut mux, &clock, 40);
    assert_eq!(fired.get(), 1);
}

#[test]
fn test_disable_enable_round_trip_fires_once_at_deadline() {
    let (mut mux, clock) = helpers::mux_and_clock();
    let fired = helpers::counter();
    let id = mux
        .set_interval_with(10, helpers::bump, fired.clone())
        .unwrap();

    mux.disable(id);
    mux.enable(id);

    helpers::tick_at(&mut mux, &clock, 10);
    assert_eq!(fired.get(), 1);

    // Same instant again: the boundary was already consumed.
    mux.tick();
    assert_eq!(fired.get(), 1);
}

// ============================================================================
// Bulk Operation Gate
// ============================================================================

// The bulk operations only touch in-use slots whose run counter is still
// zero. Repeating timers never advance the counter, so they are always
// affected; counted timers drop out after their first completed run.

#[test]
fn test_bulk_disable_skips_counted_timer_that_has_run() {
    let (mut mux, clock) = helpers::mux_and_clock();
    let fired = helpers::counter();

    let forever = mux
        .set_interval_with(10, helpers::bump, fired.clone())
        .unwrap();
    let counted = mux
        .register(
            10,
            Callback::Param(helpers::bump, fired.clone()),
            RunCount::times(3).unwrap(),
        )
        .unwrap();
    let fresh = mux
        .register(
            1000,
            Callback::Param(helpers::bump, fired.clone()),
            RunCount::times(3).unwrap(),
        )
        .unwrap();

    // Both 10 ms timers complete one run; `fresh` stays at zero runs.
    helpers::tick_at(&mut mux, &clock, 10);
    assert_eq!(fired.get(), 2);

    mux.disable_all();

    assert!(!mux.is_enabled(forever), "repeating timer is gated in");
    assert!(
        mux.is_enabled(counted),
        "counted timer with a completed run is gated out"
    );
    assert!(!mux.is_enabled(fresh), "counted timer with zero runs is gated in");
}

#[test]
fn test_bulk_enable_applies_same_gate() {
    let (mut mux, clock) = helpers::mux_and_clock();
    let fired = helpers::counter();

    let forever = mux
        .set_interval_with(10, helpers::bump, fired.clone())
        .unwrap();
    let counted = mux
        .register(
            10,
            Callback::Param(helpers::bump, fired.clone()),
            RunCount::times(3).unwrap(),
        )
        .unwrap();

    helpers::tick_at(&mut mux, &clock, 10);

    mux.disable(forever);
    mux.disable(counted);
    mux.enable_all();

    assert!(mux.is_enabled(forever));
    assert!(
        !mux.is_enabled(counted),
        "counted timer with a completed run stays disabled"
    );
}

#[test]
fn test_bulk_enable_ignores_free_slots() {
    let (mut mux, _clock) = helpers::mux_and_clock();
    let id = mux.set_interval(10, helpers::noop).unwrap();
    mux.remove(id);

    mux.enable_all();
    assert!(!mux.is_enabled(id), "vacant slots keep their cleared flag");
}
