//! Control plane of the pulse train generator, tying user input to timing.
//!
//! This crate holds everything about the generator that is not hardware:
//! the committed configuration and its digit-by-digit editing, the menu
//! state machine driven by keypad events, the tick-driven pulse/burst
//! engine, and the text layout for the character display. It is meant to
//! be owned as a single shared resource by a firmware with two execution
//! contexts:
//!
//! ```text
//!              [ TickISR (100 ms) ]
//!                   |       A
//!         (on_tick) |       | (Pulse)
//!                   V       |
//!     +--------> [ Store {Config, Engine} ]
//!     |               |
//!     | (apply_key)   | (view)
//!     |               V
//! [ Keypad ]     [ Display ]
//! ```
//!
//! Both paths go through the owning lock, so a tick always observes a
//! complete, committed configuration record and never a half-written one.

#![cfg_attr(not(test), no_std)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::cast_possible_truncation)]

pub mod config;
pub mod display;
pub mod engine;
pub mod keys;
mod log;
pub mod store;
pub mod view;

pub use config::{Config, ConfigStore, Field, TICK_INTERVAL_MS};
pub use engine::{Engine, Pulse};
pub use keys::Key;
pub use store::{Screen, Store};
pub use view::View;
