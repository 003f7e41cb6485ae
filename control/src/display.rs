//! Text layout for the 20x4 character display.
//!
//! Pure functions from a [`View`] to four rows of text. Blinking is
//! cosmetic and owned by the caller, which passes the current phase in.

use core::fmt::Write;

use heapless::String;

use crate::store::Screen;
use crate::view::View;

pub const COLUMNS: usize = 20;
pub const ROWS: usize = 4;

pub type Row = String<COLUMNS>;

/// One full frame of display content.
///
/// Rows are at most [`COLUMNS`] characters; anything longer is cut off,
/// same as it would fall off the physical display. The driver pads short
/// rows with spaces so stale characters never linger.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Frame {
    pub rows: [Row; ROWS],
}

/// Lay out the current view, with blinking parts shown iff `blink_on`.
#[must_use]
pub fn render(view: &View, blink_on: bool) -> Frame {
    let mut frame = Frame::default();
    match view.screen {
        Screen::Main => render_main(&mut frame, view, blink_on),
        Screen::MainMenu => render_main_menu(&mut frame),
        Screen::EditPulseCount => {
            render_edit(&mut frame, "N_PULSES=", staged(view), "", blink_on);
        }
        Screen::EditPeriod => {
            let value = view.staged.unwrap_or(view.config.period_ms);
            render_edit(&mut frame, "T=", Some(value), "ms", blink_on);
        }
        Screen::EditTon => {
            let value = view.staged.unwrap_or(view.config.pulse_width_us);
            render_edit(&mut frame, "ton=", Some(value), "us", blink_on);
        }
    }
    frame
}

fn render_main(frame: &mut Frame, view: &View, blink_on: bool) {
    let _ = write!(frame.rows[0], "T={}ms", view.config.period_ms);
    let status = if !view.running {
        "    STOPPED"
    } else if blink_on {
        "    RUNNING"
    } else {
        ""
    };
    let _ = frame.rows[0].push_str(status);

    let _ = write!(frame.rows[1], "ton={}us", view.config.pulse_width_us);

    if view.config.pulse_count_target == 0 {
        let _ = frame.rows[2].push_str("N_PULSES=INFINITE");
    } else {
        let _ = write!(frame.rows[2], "N_PULSES={}", view.config.pulse_count_target);
    }

    let _ = write!(frame.rows[3], "A={},R=", view.total_pulses);
    if view.config.pulse_count_target == 0 {
        let _ = frame.rows[3].push_str("INFINITE");
    } else {
        let remaining = view
            .config
            .pulse_count_target
            .saturating_sub(view.burst_pulses);
        let _ = write!(frame.rows[3], "{remaining}");
    }
}

fn render_main_menu(frame: &mut Frame) {
    let _ = frame.rows[0].push_str("1.Set N_PULSES");
    let _ = frame.rows[1].push_str("2.Set T");
    let _ = frame.rows[2].push_str("3.Set ton");
    let _ = frame.rows[3].push_str("C.Return");
}

/// Edit screens show the staged value blinking; `None` means infinite.
fn render_edit(frame: &mut Frame, label: &str, value: Option<u32>, unit: &str, blink_on: bool) {
    let _ = frame.rows[0].push_str(label);
    if blink_on {
        match value {
            Some(value) => {
                let _ = write!(frame.rows[0], "{value}{unit}");
            }
            None => {
                let _ = frame.rows[0].push_str("INFINITE");
            }
        }
    }
    let _ = frame.rows[1].push_str("C.Return");
}

fn staged(view: &View) -> Option<u32> {
    match view.staged.unwrap_or(view.config.pulse_count_target) {
        0 => None,
        staged => Some(staged),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn view() -> View {
        View {
            config: Config::default(),
            screen: Screen::Main,
            staged: None,
            running: false,
            burst_pulses: 0,
            total_pulses: 0,
        }
    }

    #[test]
    fn main_screen_shows_all_parameters_and_counters() {
        let mut view = view();
        view.total_pulses = 42;
        view.burst_pulses = 42;
        let frame = render(&view, true);
        assert_eq!(frame.rows[0], "T=1000ms    STOPPED");
        assert_eq!(frame.rows[1], "ton=10us");
        assert_eq!(frame.rows[2], "N_PULSES=1000");
        assert_eq!(frame.rows[3], "A=42,R=958");
    }

    #[test]
    fn running_status_blinks_while_stopped_stays_solid() {
        let mut view = view();
        view.running = true;
        assert_eq!(render(&view, true).rows[0], "T=1000ms    RUNNING");
        assert_eq!(render(&view, false).rows[0], "T=1000ms");

        view.running = false;
        assert_eq!(render(&view, false).rows[0], "T=1000ms    STOPPED");
    }

    #[test]
    fn unbounded_target_renders_as_infinite() {
        let mut view = view();
        view.config.pulse_count_target = 0;
        let frame = render(&view, true);
        assert_eq!(frame.rows[2], "N_PULSES=INFINITE");
        assert_eq!(frame.rows[3], "A=0,R=INFINITE");
    }

    #[test]
    fn main_menu_lists_the_three_parameters() {
        let mut view = view();
        view.screen = Screen::MainMenu;
        let frame = render(&view, true);
        assert_eq!(frame.rows[0], "1.Set N_PULSES");
        assert_eq!(frame.rows[1], "2.Set T");
        assert_eq!(frame.rows[2], "3.Set ton");
        assert_eq!(frame.rows[3], "C.Return");
    }

    #[test]
    fn edit_screens_blink_the_staged_value() {
        let mut view = view();
        view.screen = Screen::EditPeriod;
        view.staged = Some(2500);
        assert_eq!(render(&view, true).rows[0], "T=2500ms");
        assert_eq!(render(&view, false).rows[0], "T=");
        assert_eq!(render(&view, true).rows[1], "C.Return");

        view.screen = Screen::EditTon;
        view.staged = Some(25);
        assert_eq!(render(&view, true).rows[0], "ton=25us");
    }

    #[test]
    fn staged_zero_pulse_count_shows_as_infinite() {
        let mut view = view();
        view.screen = Screen::EditPulseCount;
        view.staged = Some(0);
        assert_eq!(render(&view, true).rows[0], "N_PULSES=INFINITE");
        view.staged = Some(120);
        assert_eq!(render(&view, true).rows[0], "N_PULSES=120");
    }

    #[test]
    fn overlong_rows_are_cut_at_the_display_width() {
        let mut view = view();
        view.config.pulse_count_target = 100_000_000;
        view.total_pulses = u32::MAX;
        let frame = render(&view, true);
        for row in &frame.rows {
            assert!(row.len() <= COLUMNS);
        }
        assert!(frame.rows[3].starts_with("A=4294967295,R="));
    }
}
