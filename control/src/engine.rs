//! Tick-driven pulse/burst generation.

use crate::config::{Config, TICK_INTERVAL_MS};
use crate::log;

/// Request to emit a single pulse on the output pin.
///
/// The caller asserts the pin, holds it high for `width_us` and releases
/// it. The hold must stay well under the tick interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Pulse {
    pub width_us: u32,
}

#[derive(Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
enum State {
    #[default]
    Idle,
    Running,
}

/// The pulse/burst state machine.
///
/// Fed with one `on_tick` call per time base tick, it decides at which
/// ticks a pulse fires and stops itself once the programmed count was
/// emitted. Period alignment is derived from the absolute elapsed time,
/// never from a countdown, so changing the period mid-burst cannot
/// accumulate drift.
#[derive(Debug, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Engine {
    state: State,
    elapsed_ms: u64,
    burst_pulses: u32,
    total_pulses: u32,
}

impl Engine {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.state == State::Running
    }

    /// Pulses emitted since the burst started.
    #[must_use]
    pub fn burst_pulses(&self) -> u32 {
        self.burst_pulses
    }

    /// Pulses emitted since the last explicit counter reset.
    #[must_use]
    pub fn total_pulses(&self) -> u32 {
        self.total_pulses
    }

    /// Begin a new burst. No-op while one is already running.
    pub fn start(&mut self) {
        if self.state == State::Running {
            return;
        }
        self.burst_pulses = 0;
        self.elapsed_ms = 0;
        self.state = State::Running;
        log::info!("START");
    }

    /// Stop generating. Idempotent; the next tick emits nothing.
    pub fn stop(&mut self) {
        if self.state == State::Idle {
            return;
        }
        self.state = State::Idle;
        log::info!("STOP");
    }

    /// Advance the engine by one time base tick.
    ///
    /// Returns the pulse to emit when the tick falls on a period boundary
    /// and the programmed count is not exhausted yet. The configuration
    /// must be a consistent snapshot valid for the whole call.
    pub fn on_tick(&mut self, config: &Config) -> Option<Pulse> {
        if self.state != State::Running {
            return None;
        }
        self.elapsed_ms += u64::from(TICK_INTERVAL_MS);
        if self.elapsed_ms % u64::from(config.period_ms) != 0 {
            return None;
        }

        let target = config.pulse_count_target;
        if target != 0 && self.burst_pulses >= target {
            // The target was lowered under the emitted count mid-burst.
            self.finish_burst();
            return None;
        }

        self.burst_pulses += 1;
        self.total_pulses = self.total_pulses.saturating_add(1);
        if target != 0 && self.burst_pulses >= target {
            self.finish_burst();
        }
        Some(Pulse {
            width_us: config.pulse_width_us,
        })
    }

    pub fn reset_burst_counter(&mut self) {
        self.burst_pulses = 0;
    }

    pub fn reset_total_counter(&mut self) {
        self.total_pulses = 0;
    }

    fn finish_burst(&mut self) {
        self.state = State::Idle;
        self.burst_pulses = 0;
        log::info!("Burst complete, total={:?}", self.total_pulses);
    }
}
