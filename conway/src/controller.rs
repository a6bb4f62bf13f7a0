// controller.rs - Edit/run state machine around a GridState

use std::time::Duration;

use tracing::info;

use crate::config::Settings;
use crate::error::{LifeError, Result};
use crate::grid::{GridState, Snapshot};
use crate::patterns;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Not running; cells may be toggled
    Editing,
    /// Generations advance on every tick
    Running,
    /// A run ended; the last pattern is left on the grid
    Stopped,
}

/// What the periodic timer should do after a controller operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Schedule {
    /// Drop any current schedule and tick with this period
    Every(Duration),
    /// Drop the current schedule
    Cancel,
    Unchanged,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// A step left no live cell
    Exhausted,
    LimitReached,
    User,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The controller was not running; nothing happened
    Ignored,
    Advanced { generation: u64 },
    Stopped { generation: u64, reason: StopReason },
}

impl TickOutcome {
    pub fn schedule(&self) -> Schedule {
        match self {
            TickOutcome::Stopped { .. } => Schedule::Cancel,
            _ => Schedule::Unchanged,
        }
    }
}

/// Cell under the pointer moved from `previous` to `current`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HoverChange {
    pub previous: (usize, usize),
    pub current: (usize, usize),
}

pub struct Controller {
    grid: GridState,
    phase: Phase,
    cell_size: usize,
    period: Duration,
    generation_limit: u64,
    hovered: (usize, usize),
    // Survives end_evolution so a finished run still shows how far it got
    shown_generation: u64,
}

impl Controller {
    pub fn new(settings: &Settings) -> Result<Self> {
        settings.validate()?;
        let mut grid =
            GridState::from_canvas(settings.canvas_width, settings.canvas_height, settings.cell_size)?;
        if let Some(name) = &settings.pattern {
            patterns::apply_pattern(&mut grid, patterns::find_pattern(name)?);
        }

        info!(
            width = grid.width(),
            height = grid.height(),
            period_ms = settings.period_ms,
            generation_limit = settings.generation_limit,
            "created grid"
        );

        Ok(Self {
            grid,
            phase: Phase::Editing,
            cell_size: settings.cell_size,
            period: settings.period(),
            generation_limit: settings.generation_limit,
            hovered: (0, 0),
            shown_generation: 0,
        })
    }

    pub fn grid(&self) -> &GridState {
        &self.grid
    }

    pub fn snapshot(&self) -> Snapshot {
        self.grid.snapshot()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    pub fn cell_size(&self) -> usize {
        self.cell_size
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn generation_limit(&self) -> u64 {
        self.generation_limit
    }

    pub fn hovered(&self) -> (usize, usize) {
        self.hovered
    }

    /// Generation to display: the live counter while running, the last one
    /// reached once a run has stopped
    pub fn shown_generation(&self) -> u64 {
        if self.is_running() { self.grid.generation() } else { self.shown_generation }
    }

    /// Map a pointer position (pixels from the canvas origin) to a cell,
    /// clamping to the grid.
    pub fn cell_at(&self, px: f32, py: f32) -> (usize, usize) {
        (
            clamp_axis(px, self.cell_size, self.grid.width()),
            clamp_axis(py, self.cell_size, self.grid.height()),
        )
    }

    /// Track the cell under the pointer. Reports a change only when the
    /// pointer enters a different cell.
    pub fn hover(&mut self, px: f32, py: f32) -> Option<HoverChange> {
        let current = self.cell_at(px, py);
        let previous = std::mem::replace(&mut self.hovered, current);
        (previous != current).then_some(HoverChange { previous, current })
    }

    /// Toggle the cell under the pointer. Returns `false` while running,
    /// when edits are not allowed.
    pub fn edit(&mut self, px: f32, py: f32) -> Result<bool> {
        let (x, y) = self.cell_at(px, py);
        self.toggle(x, y)
    }

    pub fn toggle(&mut self, x: usize, y: usize) -> Result<bool> {
        if self.is_running() {
            return Ok(false);
        }
        self.grid.toggle_cell(x, y)?;
        self.phase = Phase::Editing;
        Ok(true)
    }

    /// Start a run from the current pattern at generation 0. Starting while
    /// already running restarts the count.
    pub fn start(&mut self) -> Schedule {
        self.grid.end_evolution();
        self.grid.begin_evolution();
        self.phase = Phase::Running;
        self.shown_generation = 0;
        info!(population = self.grid.population(), "started run");
        Schedule::Every(self.period)
    }

    pub fn stop(&mut self) -> Schedule {
        if !self.is_running() {
            return Schedule::Unchanged;
        }
        self.finish(StopReason::User);
        Schedule::Cancel
    }

    /// Wipe the grid and go back to editing
    pub fn clear(&mut self) -> Schedule {
        self.grid.end_evolution();
        self.grid.clear();
        self.phase = Phase::Editing;
        self.shown_generation = 0;
        info!("cleared grid");
        Schedule::Cancel
    }

    /// Handle one timer tick: advance a generation and decide whether the
    /// run goes on.
    pub fn tick(&mut self) -> TickOutcome {
        if !self.is_running() {
            return TickOutcome::Ignored;
        }

        let alive = self.grid.step();
        let generation = self.grid.generation();
        self.shown_generation = generation;

        let reason = if !alive {
            StopReason::Exhausted
        } else if generation >= self.generation_limit {
            StopReason::LimitReached
        } else {
            return TickOutcome::Advanced { generation };
        };
        self.finish(reason);
        TickOutcome::Stopped { generation, reason }
    }

    /// Handle `ticks` queued timer ticks in order, stopping at the first one
    /// that ends the run. Returns the last outcome, if any tick was handled.
    pub fn run_ticks(&mut self, ticks: usize) -> Option<TickOutcome> {
        let mut last = None;
        for _ in 0..ticks {
            let outcome = self.tick();
            last = Some(outcome);
            if !matches!(outcome, TickOutcome::Advanced { .. }) {
                break;
            }
        }
        last
    }

    pub fn set_period_ms(&mut self, period_ms: u64) -> Result<Schedule> {
        if period_ms == 0 {
            return Err(LifeError::InvalidPeriod);
        }
        self.period = Duration::from_millis(period_ms);
        info!(period_ms, "changed period");
        Ok(if self.is_running() { Schedule::Every(self.period) } else { Schedule::Unchanged })
    }

    /// Takes effect from the next tick
    pub fn set_generation_limit(&mut self, limit: u64) {
        self.generation_limit = limit;
    }

    /// Replace the grid contents with a named pattern. Returns `false` while
    /// running.
    pub fn load_pattern(&mut self, name: &str) -> Result<bool> {
        let pattern = patterns::find_pattern(name)?;
        if self.is_running() {
            return Ok(false);
        }
        patterns::apply_pattern(&mut self.grid, pattern);
        self.phase = Phase::Editing;
        self.shown_generation = 0;
        Ok(true)
    }

    /// Fill the grid at random. Returns `false` while running.
    pub fn randomize(&mut self, seed: u64, density: f64) -> bool {
        if self.is_running() {
            return false;
        }
        patterns::apply_random_pattern(&mut self.grid, seed, density);
        self.phase = Phase::Editing;
        self.shown_generation = 0;
        true
    }

    fn finish(&mut self, reason: StopReason) {
        info!(generation = self.grid.generation(), ?reason, "stopped run");
        self.grid.end_evolution();
        self.phase = Phase::Stopped;
    }
}

fn clamp_axis(pixels: f32, cell_size: usize, cells: usize) -> usize {
    if !pixels.is_finite() || pixels <= 0.0 {
        return 0;
    }
    ((pixels / cell_size as f32).floor() as usize).min(cells - 1)
}
