//! Scheduler core: slot table, registration, and the tick scan/dispatch loop.
//!
//! `TimerMux` owns a fixed array of timer slots and services all of them from
//! a single hardware tick. The slot index doubles as the timer id handed to
//! callers; ids are reused lowest-index-first after a slot is freed.

use crate::callback::Callback;
use crate::clock::Clock;
use crate::error::Error;
use crate::slot::{DispatchState, RunCount, TimerSlot};

/// Fixed-capacity software timer multiplexer.
///
/// Generic over:
/// - `P`: argument type stored with parameterized callbacks
/// - `C`: [`Clock`] implementation supplying wrapping millisecond time
/// - `N`: slot capacity (compile-time bound on concurrent timers)
///
/// All registration and mutation must happen in the same execution context
/// that drives [`tick`](TimerMux::tick); the scheduler performs no locking of
/// its own. Callbacks run inline in the tick path, so a slow callback delays
/// every later timer due in the same tick.
pub struct TimerMux<P, C, const N: usize>
where
    C: Clock,
{
    /// Slot table; the index is the timer id.
    slots: [TimerSlot<P>; N],

    /// In-use count; `None` until the first `init` (lazy on first register).
    num_timers: Option<usize>,

    /// Millisecond time source.
    clock: C,
}

impl<P, C, const N: usize> TimerMux<P, C, N>
where
    C: Clock,
{
    /// Create an uninitialized scheduler with all slots vacant.
    ///
    /// [`init`](TimerMux::init) runs implicitly on the first registration,
    /// so calling it up front is optional.
    pub const fn new(clock: C) -> Self {
        Self {
            slots: [TimerSlot::VACANT; N],
            num_timers: None,
            clock,
        }
    }

    /// Reset every slot to vacant and stamp the current time as each slot's
    /// period baseline.
    ///
    /// Idempotent, but NOT safe to call after timers are registered: all
    /// existing registrations are lost.
    pub fn init(&mut self) {
        let now = self.clock.now_ms();

        for slot in &mut self.slots {
            *slot = TimerSlot::VACANT;
            slot.prev_tick = now;
        }

        self.num_timers = Some(0);
    }

    /// Lowest vacant slot index, or `None` when the table is full.
    fn find_free_slot(&self) -> Option<usize> {
        if self.timer_count() >= N {
            return None;
        }

        self.slots.iter().position(|slot| !slot.in_use())
    }

    /// Register a timer: raw form taking an explicit callback shape and run
    /// count. Returns the timer id (its slot index).
    ///
    /// The first registration on a never-initialized scheduler runs
    /// [`init`](TimerMux::init) implicitly. The new timer is enabled, its
    /// run counter zeroed, and its period baseline stamped with the current
    /// time.
    ///
    /// A `delay_ms` of zero makes the timer due on every tick.
    ///
    /// # Errors
    ///
    /// [`Error::CapacityExceeded`] when every slot is occupied. Nothing is
    /// mutated on failure.
    pub fn register(
        &mut self,
        delay_ms: u32,
        callback: Callback<P>,
        runs: RunCount,
    ) -> Result<usize, Error> {
        if self.num_timers.is_none() {
            self.init();
        }

        let Some(id) = self.find_free_slot() else {
            debug!("timer table full ({} slots)", N);
            return Err(Error::CapacityExceeded);
        };

        let slot = &mut self.slots[id];
        slot.delay = delay_ms;
        slot.callback = Some(callback);
        slot.max_runs = runs;
        slot.num_runs = 0;
        slot.enabled = true;
        slot.dispatch = DispatchState::Idle;
        slot.prev_tick = self.clock.now_ms();

        self.num_timers = Some(self.timer_count() + 1);

        trace!("timer {} armed: period {} ms", id, delay_ms);

        Ok(id)
    }

    /// Register a repeating timer with a zero-argument callback.
    pub fn set_interval(&mut self, delay_ms: u32, f: fn()) -> Result<usize, Error> {
        self.register(delay_ms, Callback::Unit(f), RunCount::Forever)
    }

    /// Register a repeating timer with a parameterized callback.
    pub fn set_interval_with(
        &mut self,
        delay_ms: u32,
        f: fn(&mut P),
        param: P,
    ) -> Result<usize, Error> {
        self.register(delay_ms, Callback::Param(f, param), RunCount::Forever)
    }

    /// Register a one-shot timer with a zero-argument callback.
    pub fn set_timeout(&mut self, delay_ms: u32, f: fn()) -> Result<usize, Error> {
        self.register(delay_ms, Callback::Unit(f), RunCount::ONCE)
    }

    /// Register a one-shot timer with a parameterized callback.
    pub fn set_timeout_with(
        &mut self,
        delay_ms: u32,
        f: fn(&mut P),
        param: P,
    ) -> Result<usize, Error> {
        self.register(delay_ms, Callback::Param(f, param), RunCount::ONCE)
    }

    /// Service all timers once: scan for due slots, then dispatch them.
    ///
    /// Call this once per hardware timer period (or from a poll loop) at a
    /// cadence at least as fast as the shortest registered period.
    ///
    /// When more than one full period elapsed since a timer was last
    /// serviced (a starved scheduler), the callback is dispatched once and
    /// the period baseline advances by the exact multiple of the period that
    /// fits - phase alignment is preserved instead of re-anchoring on `now`.
    /// Disabled timers past their deadline have their baseline advanced the
    /// same way but are never dispatched.
    ///
    /// The scan completes for every slot before the first callback runs, so
    /// a callback mutating other timers (enable/disable/remove) cannot
    /// disturb the due-computation of slots scanned after it.
    pub fn tick(&mut self) {
        let now = self.clock.now_ms();

        // Scan: recompute every slot's dispatch mark.
        for slot in &mut self.slots {
            slot.dispatch = DispatchState::Idle;

            // No callback == no timer; skip free slots.
            if !slot.in_use() {
                continue;
            }

            let elapsed = now.wrapping_sub(slot.prev_tick);
            if elapsed < slot.delay {
                continue;
            }

            if slot.delay == 0 {
                // Due every tick; no period boundary to preserve.
                slot.prev_tick = now;
            } else {
                let skipped = elapsed / slot.delay;
                slot.prev_tick = slot.prev_tick.wrapping_add(slot.delay.wrapping_mul(skipped));
            }

            if !slot.enabled {
                continue;
            }

            match slot.max_runs {
                RunCount::Forever => slot.dispatch = DispatchState::Run,
                RunCount::Times(limit) => {
                    if slot.num_runs < limit.get() {
                        slot.num_runs += 1;
                        slot.dispatch = if slot.num_runs >= limit.get() {
                            DispatchState::RunThenFree
                        } else {
                            DispatchState::Run
                        };
                    }
                }
            }
        }

        // Dispatch: invoke marked slots in index order.
        for id in 0..N {
            let state = self.slots[id].dispatch;
            if state == DispatchState::Idle {
                continue;
            }

            if let Some(callback) = self.slots[id].callback.as_mut() {
                callback.invoke();
            }

            if state == DispatchState::RunThenFree {
                self.remove(id);
            }
        }
    }

    /// Change a timer's period and re-anchor its baseline on the current
    /// time (phase realignment, not preservation).
    ///
    /// Returns `false` without mutating anything when `id` is out of range
    /// or names a free slot.
    pub fn change_interval(&mut self, id: usize, delay_ms: u32) -> bool {
        if id >= N {
            return false;
        }

        if !self.slots[id].in_use() {
            return false;
        }

        self.slots[id].delay = delay_ms;
        self.slots[id].prev_tick = self.clock.now_ms();

        trace!("timer {} period changed to {} ms", id, delay_ms);

        true
    }

    /// Free a timer's slot.
    ///
    /// Silent no-op when `id` is out of range, when no timers are in use, or
    /// when the slot is already free.
    pub fn remove(&mut self, id: usize) {
        if id >= N {
            return;
        }

        let count = self.timer_count();
        if count == 0 {
            return;
        }

        if !self.slots[id].in_use() {
            return;
        }

        self.slots[id] = TimerSlot::VACANT;
        self.slots[id].prev_tick = self.clock.now_ms();
        self.num_timers = Some(count - 1);

        trace!("timer {} freed", id);
    }

    /// Re-anchor a timer's period baseline on the current time, leaving its
    /// run counter and enable flag untouched. Out-of-range ids are a no-op.
    pub fn restart(&mut self, id: usize) {
        if id >= N {
            return;
        }

        self.slots[id].prev_tick = self.clock.now_ms();
    }

    /// Whether the timer is enabled. Out-of-range ids (and free slots)
    /// report `false`.
    pub fn is_enabled(&self, id: usize) -> bool {
        if id >= N {
            return false;
        }

        self.slots[id].enabled
    }

    /// Enable a timer. Out-of-range ids are a no-op.
    pub fn enable(&mut self, id: usize) {
        if id >= N {
            return;
        }

        self.slots[id].enabled = true;
    }

    /// Disable a timer. Out-of-range ids are a no-op.
    ///
    /// A disabled timer keeps its slot and keeps tracking period boundaries,
    /// so re-enabling it later does not release a burst of catch-up runs.
    pub fn disable(&mut self, id: usize) {
        if id >= N {
            return;
        }

        self.slots[id].enabled = false;
    }

    /// Flip a timer's enable flag. Out-of-range ids are a no-op.
    pub fn toggle(&mut self, id: usize) {
        if id >= N {
            return;
        }

        self.slots[id].enabled = !self.slots[id].enabled;
    }

    /// Enable every in-use timer whose run counter is still zero.
    ///
    /// Repeat-forever timers never advance their run counter, so they are
    /// always affected; counted timers drop out of the bulk operations after
    /// their first completed run.
    pub fn enable_all(&mut self) {
        for slot in &mut self.slots {
            if slot.in_use() && slot.num_runs == 0 {
                slot.enabled = true;
            }
        }
    }

    /// Disable every in-use timer whose run counter is still zero.
    ///
    /// Same gate as [`enable_all`](TimerMux::enable_all).
    pub fn disable_all(&mut self) {
        for slot in &mut self.slots {
            if slot.in_use() && slot.num_runs == 0 {
                slot.enabled = false;
            }
        }
    }

    /// Number of slots currently in use (0 when never initialized).
    pub fn timer_count(&self) -> usize {
        self.num_timers.unwrap_or(0)
    }

    /// Total slot capacity.
    pub fn capacity(&self) -> usize {
        N
    }
}

impl<P, C, const N: usize> core::fmt::Debug for TimerMux<P, C, N>
where
    C: Clock,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TimerMux")
            .field("capacity", &N)
            .field("timers", &self.timer_count())
            .finish_non_exhaustive()
    }
}
