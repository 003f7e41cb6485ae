//! Tunable generator parameters and their staged, digit-by-digit editing.

use crate::log;

/// Length of one time base tick in milliseconds.
///
/// Committed periods are always a multiple of this, which lets the engine
/// detect period boundaries with a plain modulo over elapsed time.
pub const TICK_INTERVAL_MS: u32 = 100;

const MIN_PERIOD_MS: u32 = 500;
const MAX_PERIOD_MS: u32 = 100_000;
const MIN_PULSE_WIDTH_US: u32 = 1;
const MAX_PULSE_WIDTH_US: u32 = 100;
const MAX_PULSE_COUNT: u32 = 100_000_000;

/// Committed generator parameters.
///
/// This is the record the engine snapshots on every tick. Once committed,
/// all fields sit within their domains and the period is a multiple of
/// [`TICK_INTERVAL_MS`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    /// Time between the starts of two consecutive pulses, in milliseconds.
    pub period_ms: u32,
    /// How long the output stays asserted per pulse, in microseconds.
    pub pulse_width_us: u32,
    /// Pulses per burst, 0 meaning unbounded.
    pub pulse_count_target: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            period_ms: 1000,
            pulse_width_us: 10,
            pulse_count_target: 1000,
        }
    }
}

/// One of the three editable parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Field {
    PulseCount,
    Period,
    PulseWidth,
}

impl Field {
    fn min(self) -> u32 {
        match self {
            Self::PulseCount => 0,
            Self::Period => MIN_PERIOD_MS,
            Self::PulseWidth => MIN_PULSE_WIDTH_US,
        }
    }

    fn max(self) -> u32 {
        match self {
            Self::PulseCount => MAX_PULSE_COUNT,
            Self::Period => MAX_PERIOD_MS,
            Self::PulseWidth => MAX_PULSE_WIDTH_US,
        }
    }
}

/// A value being entered digit by digit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
struct Draft {
    field: Field,
    value: u32,
    first_digit: bool,
}

/// Store of committed parameters with at most one staged edit.
///
/// Editing happens on the draft only. `commit` is the single path mutating
/// the committed record, so a caller serialized against the tick path can
/// guarantee the engine never reads a half-updated configuration.
#[derive(Debug, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ConfigStore {
    committed: Config,
    draft: Option<Draft>,
}

impl ConfigStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Immutable copy of the committed record, read by the engine each tick.
    #[must_use]
    pub fn snapshot(&self) -> Config {
        self.committed
    }

    /// The value staged by the edit in progress, if any.
    #[must_use]
    pub fn staged_value(&self) -> Option<u32> {
        self.draft.map(|draft| draft.value)
    }

    /// Start editing a field, staging its committed value.
    ///
    /// The first digit entered afterwards overwrites the staged value
    /// rather than appending to it.
    pub fn begin_edit(&mut self, field: Field) {
        let value = match field {
            Field::PulseCount => self.committed.pulse_count_target,
            Field::Period => self.committed.period_ms,
            Field::PulseWidth => self.committed.pulse_width_us,
        };
        self.draft = Some(Draft {
            field,
            value,
            first_digit: true,
        });
    }

    /// Append a digit to the staged value.
    ///
    /// The staged value is clamped to the field maximum on every digit, so
    /// no sequence of key presses can overflow it. Ignored when no edit is
    /// in progress.
    pub fn apply_digit(&mut self, digit: u8) {
        debug_assert!(digit < 10);
        let Some(draft) = self.draft.as_mut() else {
            return;
        };
        if draft.first_digit {
            draft.value = u32::from(digit);
            draft.first_digit = false;
        } else {
            draft.value = draft
                .value
                .saturating_mul(10)
                .saturating_add(u32::from(digit));
        }
        if draft.value > draft.field.max() {
            draft.value = draft.field.max();
        }
    }

    /// Validate the staged value and write it into the committed record.
    ///
    /// The value is clamped into the field domain. The period is
    /// additionally rounded to the nearest multiple of the tick interval
    /// and clamped again, keeping the committed invariant unconditional.
    /// Returns the committed field, or `None` when nothing was staged.
    pub fn commit(&mut self) -> Option<Field> {
        let draft = self.draft.take()?;
        let mut value = draft.value.clamp(draft.field.min(), draft.field.max());
        if draft.field == Field::Period {
            value = round_to_tick(value).clamp(MIN_PERIOD_MS, MAX_PERIOD_MS);
        }
        match draft.field {
            Field::PulseCount => self.committed.pulse_count_target = value,
            Field::Period => self.committed.period_ms = value,
            Field::PulseWidth => self.committed.pulse_width_us = value,
        }
        log::info!("COMMIT: {:?}={:?}", draft.field, value);
        Some(draft.field)
    }

    /// Drop the staged edit without touching the committed record.
    pub fn discard_edit(&mut self) {
        self.draft = None;
    }
}

/// Round a period to the nearest multiple of the tick interval.
///
/// A remainder above half a tick rounds up to the next multiple, anything
/// else rounds down, so 333 becomes 300 while 370 becomes 400.
fn round_to_tick(period_ms: u32) -> u32 {
    let rest = period_ms % TICK_INTERVAL_MS;
    if rest > TICK_INTERVAL_MS / 2 {
        period_ms + (TICK_INTERVAL_MS - rest)
    } else {
        period_ms - rest
    }
}
