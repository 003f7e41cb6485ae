//! Read-only snapshot of the store for the presentation layer.

use crate::config::Config;
use crate::store::Screen;

/// Everything the presentation layer needs, copied out under the lock.
///
/// Polled once per foreground iteration. Nothing in here is a live
/// reference, so rendering can take its time without holding the store.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct View {
    pub config: Config,
    pub screen: Screen,
    /// Value of the edit in progress, present only on edit screens.
    pub staged: Option<u32>,
    pub running: bool,
    pub burst_pulses: u32,
    pub total_pulses: u32,
}
