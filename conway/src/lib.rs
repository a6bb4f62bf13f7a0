//! Conway's Game of Life on a toroidal grid.
//!
//! [`GridState`] holds the cells and applies the B3/S23 rule, [`Controller`]
//! runs the edit/run/stop state machine on top of it and [`Ticker`] delivers
//! the periodic ticks that drive a run.

pub mod config;
pub mod controller;
pub mod error;
pub mod grid;
pub mod patterns;
pub mod ticker;

pub use config::Settings;
pub use controller::{Controller, HoverChange, Phase, Schedule, StopReason, TickOutcome};
pub use error::{LifeError, Result};
pub use grid::{GridState, Snapshot};
pub use ticker::{Tick, Ticker};
