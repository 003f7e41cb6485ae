//! The central store tying keypad input, configuration and the engine.

use crate::config::{ConfigStore, Field};
use crate::engine::{Engine, Pulse};
use crate::keys::Key;
use crate::log;
use crate::view::View;

/// Screens of the menu state machine.
///
/// The menu is cyclic. Edit screens return to the main menu, the main
/// menu returns to the main screen, there is no terminal state.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Screen {
    #[default]
    Main,
    MainMenu,
    EditPulseCount,
    EditPeriod,
    EditTon,
}

/// The main store of generator state.
///
/// This struct is the central piece of the control crate and the single
/// resource shared between execution contexts. The foreground feeds key
/// events through [`Store::apply_key`], the time base interrupt drives
/// [`Store::on_tick`], and the presentation layer polls [`Store::view`].
/// As long as all three go through the owning lock, a commit can never
/// interleave with a tick and the engine always reads a complete record.
#[derive(Debug, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Store {
    config: ConfigStore,
    engine: Engine,
    screen: Screen,
}

impl Store {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Interpret one key event against the current screen.
    pub fn apply_key(&mut self, key: Key) {
        match self.screen {
            Screen::Main => self.apply_key_in_main(key),
            Screen::MainMenu => self.apply_key_in_main_menu(key),
            Screen::EditPulseCount => self.apply_key_in_edit(Field::PulseCount, key),
            Screen::EditPeriod => self.apply_key_in_edit(Field::Period, key),
            Screen::EditTon => self.apply_key_in_edit(Field::PulseWidth, key),
        }
    }

    /// Advance the engine by one time base tick.
    ///
    /// The engine works on a snapshot taken under the same lock as any
    /// commit, so the whole tick sees one consistent configuration.
    pub fn on_tick(&mut self) -> Option<Pulse> {
        let snapshot = self.config.snapshot();
        self.engine.on_tick(&snapshot)
    }

    /// Read-only state for the presentation layer.
    #[must_use]
    pub fn view(&self) -> View {
        View {
            config: self.config.snapshot(),
            screen: self.screen,
            staged: self.config.staged_value(),
            running: self.engine.is_running(),
            burst_pulses: self.engine.burst_pulses(),
            total_pulses: self.engine.total_pulses(),
        }
    }

    fn apply_key_in_main(&mut self, key: Key) {
        match key {
            Key::StartStop => {
                if self.engine.is_running() {
                    self.engine.stop();
                } else {
                    self.engine.start();
                }
            }
            Key::EnterMenu if !self.engine.is_running() => {
                log::info!("Entering main menu");
                self.screen = Screen::MainMenu;
            }
            Key::ResetBurst => self.engine.reset_burst_counter(),
            Key::ResetTotal => self.engine.reset_total_counter(),
            _ => (),
        }
    }

    fn apply_key_in_main_menu(&mut self, key: Key) {
        match key {
            Key::Digit(1) => {
                self.config.begin_edit(Field::PulseCount);
                // A new target invalidates the current burst progress,
                // starting with the entry into the edit screen.
                self.engine.reset_burst_counter();
                self.screen = Screen::EditPulseCount;
            }
            Key::Digit(2) => {
                self.config.begin_edit(Field::Period);
                self.screen = Screen::EditPeriod;
            }
            Key::Digit(3) => {
                self.config.begin_edit(Field::PulseWidth);
                self.screen = Screen::EditTon;
            }
            Key::Return => self.screen = Screen::Main,
            _ => (),
        }
    }

    fn apply_key_in_edit(&mut self, field: Field, key: Key) {
        match key {
            Key::Digit(digit) => self.config.apply_digit(digit),
            Key::Return => {
                self.config.commit();
                self.screen = Screen::MainMenu;
            }
            _ => (),
        }
        if field == Field::PulseCount {
            self.engine.reset_burst_counter();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(store: &mut Store, keys: &[Key]) {
        for key in keys {
            store.apply_key(*key);
        }
    }

    fn digits(store: &mut Store, digits: &[u8]) {
        for digit in digits {
            store.apply_key(Key::Digit(*digit));
        }
    }

    fn run_ms(store: &mut Store, duration_ms: u32) -> u32 {
        let mut fired = 0;
        for _ in 0..duration_ms / crate::TICK_INTERVAL_MS {
            if store.on_tick().is_some() {
                fired += 1;
            }
        }
        fired
    }

    #[test]
    fn start_stop_key_toggles_generation() {
        let mut store = Store::new();
        assert!(!store.view().running);

        store.apply_key(Key::StartStop);
        assert!(store.view().running);
        assert_eq!(run_ms(&mut store, 2000), 2);

        store.apply_key(Key::StartStop);
        assert!(!store.view().running);
        assert_eq!(run_ms(&mut store, 2000), 0);
    }

    #[test]
    fn menu_cannot_be_entered_while_running() {
        let mut store = Store::new();
        press(&mut store, &[Key::StartStop, Key::EnterMenu]);
        assert_eq!(store.view().screen, Screen::Main);

        press(&mut store, &[Key::StartStop, Key::EnterMenu]);
        assert_eq!(store.view().screen, Screen::MainMenu);
    }

    #[test]
    fn menu_walks_to_edit_screens_and_back_to_main() {
        let mut store = Store::new();
        store.apply_key(Key::EnterMenu);

        for (digit, screen) in [
            (1, Screen::EditPulseCount),
            (2, Screen::EditPeriod),
            (3, Screen::EditTon),
        ] {
            store.apply_key(Key::Digit(digit));
            assert_eq!(store.view().screen, screen);
            store.apply_key(Key::Return);
            assert_eq!(store.view().screen, Screen::MainMenu);
        }

        store.apply_key(Key::Return);
        assert_eq!(store.view().screen, Screen::Main);
    }

    #[test]
    fn entering_pulse_count_commits_the_value_and_resets_burst_progress() {
        let mut store = Store::new();
        store.apply_key(Key::StartStop);
        run_ms(&mut store, 3000);
        assert_eq!(store.view().burst_pulses, 3);
        store.apply_key(Key::StartStop);

        press(&mut store, &[Key::EnterMenu, Key::Digit(1)]);
        assert_eq!(store.view().burst_pulses, 0);
        digits(&mut store, &[1, 2, 3, 4]);
        store.apply_key(Key::Return);

        let view = store.view();
        assert_eq!(view.config.pulse_count_target, 1234);
        assert_eq!(view.burst_pulses, 0);
        assert_eq!(view.screen, Screen::MainMenu);
    }

    #[test]
    fn entered_period_is_rounded_to_the_time_base() {
        let mut store = Store::new();
        press(&mut store, &[Key::EnterMenu, Key::Digit(2)]);
        digits(&mut store, &[1, 3, 7, 0]);
        store.apply_key(Key::Return);
        assert_eq!(store.view().config.period_ms, 1400);

        store.apply_key(Key::Digit(2));
        digits(&mut store, &[1, 3, 3, 3]);
        store.apply_key(Key::Return);
        assert_eq!(store.view().config.period_ms, 1300);
    }

    #[test]
    fn committed_period_drives_the_pulse_rhythm() {
        let mut store = Store::new();
        press(&mut store, &[Key::EnterMenu, Key::Digit(2)]);
        digits(&mut store, &[5, 0, 0]);
        press(&mut store, &[Key::Return, Key::Return, Key::StartStop]);

        assert_eq!(run_ms(&mut store, 5000), 10);
    }

    #[test]
    fn reset_keys_zero_the_counters_from_the_main_screen() {
        let mut store = Store::new();
        store.apply_key(Key::StartStop);
        run_ms(&mut store, 4000);
        let view = store.view();
        assert_eq!((view.burst_pulses, view.total_pulses), (4, 4));

        store.apply_key(Key::ResetBurst);
        let view = store.view();
        assert_eq!((view.burst_pulses, view.total_pulses), (0, 4));

        store.apply_key(Key::ResetTotal);
        assert_eq!(store.view().total_pulses, 0);
    }

    #[test]
    fn digits_on_the_main_screen_are_ignored() {
        let mut store = Store::new();
        digits(&mut store, &[9, 9]);
        let view = store.view();
        assert_eq!(view.screen, Screen::Main);
        assert_eq!(view.config, crate::Config::default());
    }

    #[test]
    fn unbounded_target_runs_until_stop() {
        let mut store = Store::new();
        press(&mut store, &[Key::EnterMenu, Key::Digit(1), Key::Digit(0)]);
        press(&mut store, &[Key::Return, Key::Return, Key::StartStop]);

        assert_eq!(run_ms(&mut store, 20_000), 20);
        assert!(store.view().running);
        store.apply_key(Key::StartStop);
        assert_eq!(run_ms(&mut store, 5000), 0);
    }
}
