// Whole-run scenarios across the grid, controller and ticker

use std::collections::BTreeSet;
use std::time::Duration;

use conway::{
    Controller, GridState, Phase, Schedule, Settings, StopReason, TickOutcome, Ticker,
};
use tokio::runtime::Handle;

fn live(grid: &GridState) -> BTreeSet<(usize, usize)> {
    grid.live_cells().collect()
}

fn set(cells: &[(usize, usize)]) -> BTreeSet<(usize, usize)> {
    cells.iter().copied().collect()
}

#[test]
fn blinker_oscillates_with_period_two() {
    let mut grid = GridState::new(5, 5).unwrap();
    for (x, y) in [(1, 2), (2, 2), (3, 2)] {
        grid.toggle_cell(x, y).unwrap();
    }

    assert!(grid.step());
    assert_eq!(live(&grid), set(&[(2, 1), (2, 2), (2, 3)]));

    assert!(grid.step());
    assert_eq!(live(&grid), set(&[(1, 2), (2, 2), (3, 2)]));
    assert_eq!(grid.generation(), 2);
}

#[test]
fn blinker_across_the_seam_still_oscillates() {
    // Horizontal blinker split over the left and right edges
    let mut grid = GridState::new(6, 6).unwrap();
    for (x, y) in [(5, 3), (0, 3), (1, 3)] {
        grid.toggle_cell(x, y).unwrap();
    }

    assert!(grid.step());
    assert_eq!(live(&grid), set(&[(0, 2), (0, 3), (0, 4)]));
    assert!(grid.step());
    assert_eq!(live(&grid), set(&[(5, 3), (0, 3), (1, 3)]));
}

#[test]
fn glider_returns_home_on_a_torus() {
    // A glider moves one cell diagonally every 4 generations, so it crosses
    // an 8x8 torus in 32
    let mut grid = GridState::new(8, 8).unwrap();
    conway::patterns::apply_pattern(&mut grid, conway::patterns::find_pattern("glider").unwrap());
    let start = live(&grid);

    for _ in 0..32 {
        assert!(grid.step());
    }
    assert_eq!(live(&grid), start);
    assert_eq!(grid.population(), 5);
}

#[test]
fn generation_counts_steps_until_reset() {
    let mut grid = GridState::new(4, 4).unwrap();
    for n in 1..=5 {
        grid.step();
        assert_eq!(grid.generation(), n);
    }
    grid.end_evolution();
    assert_eq!(grid.generation(), 0);

    grid.step();
    grid.clear();
    assert_eq!(grid.generation(), 0);
    assert!(!grid.step());
}

#[test]
fn session_runs_until_the_limit_and_freezes() {
    let settings = Settings {
        canvas_width: 100,
        canvas_height: 100,
        cell_size: 10,
        generation_limit: 4,
        pattern: Some("Toad".into()),
        ..Settings::default()
    };
    let mut controller = Controller::new(&settings).unwrap();
    let initial = controller.snapshot();

    controller.start();
    let outcome = controller.run_ticks(usize::MAX);
    assert_eq!(
        outcome,
        Some(TickOutcome::Stopped { generation: 4, reason: StopReason::LimitReached })
    );
    assert_eq!(controller.phase(), Phase::Stopped);
    // Period-2 oscillator after an even number of generations
    assert_eq!(controller.snapshot().live_cells(), initial.live_cells());

    assert_eq!(controller.clear(), Schedule::Cancel);
    assert_eq!(controller.phase(), Phase::Editing);
    assert_eq!(controller.snapshot().population(), 0);
}

#[tokio::test(start_paused = true)]
async fn timer_driven_run_stops_on_exhaustion() {
    let settings = Settings {
        canvas_width: 50,
        canvas_height: 50,
        cell_size: 10,
        period_ms: 100,
        ..Settings::default()
    };
    let mut controller = Controller::new(&settings).unwrap();
    controller.toggle(2, 2).unwrap();
    controller.toggle(3, 2).unwrap();

    let mut ticker = Ticker::new(Handle::current(), || {});
    ticker.apply(controller.start());

    tokio::time::sleep(Duration::from_millis(550)).await;
    let outcome = controller.run_ticks(ticker.drain()).unwrap();
    assert_eq!(outcome, TickOutcome::Stopped { generation: 1, reason: StopReason::Exhausted });
    ticker.apply(outcome.schedule());
    assert!(!ticker.is_active());

    // Nothing reaches the grid after the run ended
    tokio::time::sleep(Duration::from_millis(500)).await;
    assert_eq!(ticker.drain(), 0);
    assert_eq!(controller.tick(), TickOutcome::Ignored);
    assert_eq!(controller.shown_generation(), 1);
}

#[tokio::test(start_paused = true)]
async fn changing_speed_mid_run_keeps_generations_in_order() {
    let settings = Settings {
        canvas_width: 50,
        canvas_height: 50,
        cell_size: 10,
        period_ms: 100,
        generation_limit: 1000,
        pattern: Some("Blinker".into()),
        ..Settings::default()
    };
    let mut controller = Controller::new(&settings).unwrap();
    let mut ticker = Ticker::new(Handle::current(), || {});
    ticker.apply(controller.start());

    tokio::time::sleep(Duration::from_millis(250)).await;
    controller.run_ticks(ticker.drain());
    assert_eq!(controller.grid().generation(), 2);

    ticker.apply(controller.set_period_ms(10).unwrap());
    tokio::time::sleep(Duration::from_millis(35)).await;
    let outcome = controller.run_ticks(ticker.drain());
    assert_eq!(outcome, Some(TickOutcome::Advanced { generation: 5 }));
}
