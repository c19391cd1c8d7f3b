//! Timer slot records and run-count accounting.

use crate::callback::Callback;
use core::num::NonZeroU32;

/// How many times a timer runs before the scheduler reclaims its slot.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RunCount {
    /// Repeat indefinitely; the slot is only freed by an explicit
    /// [`remove`](crate::TimerMux::remove).
    Forever,

    /// Run the given number of times, then free the slot automatically after
    /// the final execution.
    Times(NonZeroU32),
}

impl RunCount {
    /// Exactly one execution (a one-shot timeout).
    pub const ONCE: RunCount = RunCount::Times(NonZeroU32::MIN);

    /// Run `n` times; `None` when `n` is zero.
    pub fn times(n: u32) -> Option<RunCount> {
        NonZeroU32::new(n).map(RunCount::Times)
    }
}

/// Per-tick dispatch decision.
///
/// Recomputed for every slot at the start of each scan and consumed by the
/// dispatch pass of the same tick; carries no state across ticks.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum DispatchState {
    /// Not due this tick, or due but disabled.
    Idle,

    /// Invoke the callback this tick.
    Run,

    /// Invoke the callback, then free the slot.
    RunThenFree,
}

/// One fixed-position record in the timer array.
///
/// A slot is in use iff `callback` is `Some`.
pub(crate) struct TimerSlot<P> {
    /// Period in milliseconds.
    pub(crate) delay: u32,

    /// `None` denotes a free slot.
    pub(crate) callback: Option<Callback<P>>,

    /// Last millisecond timestamp at which this timer's period boundary was
    /// serviced.
    pub(crate) prev_tick: u32,

    /// Disabled timers are skipped for dispatch but still counted as
    /// allocated.
    pub(crate) enabled: bool,

    /// Completed executions. Repeat-forever timers never advance this.
    pub(crate) num_runs: u32,

    /// Target execution count.
    pub(crate) max_runs: RunCount,

    /// Scratch mark for the current tick.
    pub(crate) dispatch: DispatchState,
}

impl<P> TimerSlot<P> {
    /// The free-slot state. `prev_tick` is stamped separately wherever a
    /// slot is (re)initialized.
    pub(crate) const VACANT: Self = Self {
        delay: 0,
        callback: None,
        prev_tick: 0,
        enabled: false,
        num_runs: 0,
        max_runs: RunCount::Forever,
        dispatch: DispatchState::Idle,
    };

    pub(crate) fn in_use(&self) -> bool {
        self.callback.is_some()
    }
}
