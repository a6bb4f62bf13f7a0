// grid.rs - Toroidal grid state for Conway's Game of Life

use std::fmt;

use tracing::debug;

use crate::error::{LifeError, Result};

/// Offsets of the eight cells surrounding a cell
const NEIGHBOUR_OFFSETS: [(isize, isize); 8] = [
    (-1, -1), (0, -1), (1, -1),
    (-1,  0),          (1,  0),
    (-1,  1), (0,  1), (1,  1),
];

/// Standard Life rule (B3/S23) for one cell.
///
/// Every count from 0 to 8 falls in exactly one arm.
pub fn next_state(alive: bool, neighbours: u8) -> bool {
    match neighbours {
        0 | 1 => false, // Underpopulation
        2     => alive, // Unchanged
        3     => true,  // Birth or survival
        _     => false, // Overcrowding
    }
}

/// Cell grid whose edges wrap around, plus the generation counter and
/// running flag of the simulation played on it.
///
/// Dimensions are fixed at construction. Cells are stored row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridState {
    width: usize,
    height: usize,
    cells: Vec<bool>,
    generation: u64,
    running: bool,
}

impl GridState {
    /// Create a grid with every cell dead, generation 0 and not running
    pub fn new(width: usize, height: usize) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(LifeError::InvalidDimension { width, height });
        }
        Ok(Self {
            width,
            height,
            cells: vec![false; width * height],
            generation: 0,
            running: false,
        })
    }

    /// Size a grid from a canvas: one cell per `cell_size` pixels, rounding down
    pub fn from_canvas(pixel_width: usize, pixel_height: usize, cell_size: usize) -> Result<Self> {
        if cell_size == 0 {
            return Err(LifeError::InvalidDimension { width: 0, height: 0 });
        }
        Self::new(pixel_width / cell_size, pixel_height / cell_size)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    fn index(&self, x: usize, y: usize) -> Result<usize> {
        if x < self.width && y < self.height {
            Ok(y * self.width + x)
        } else {
            Err(LifeError::OutOfRange { x, y, width: self.width, height: self.height })
        }
    }

    pub fn is_alive(&self, x: usize, y: usize) -> Result<bool> {
        Ok(self.cells[self.index(x, y)?])
    }

    pub fn set_cell(&mut self, x: usize, y: usize, alive: bool) -> Result<()> {
        let idx = self.index(x, y)?;
        self.cells[idx] = alive;
        Ok(())
    }

    /// Flip a single cell between dead and alive
    pub fn toggle_cell(&mut self, x: usize, y: usize) -> Result<()> {
        let idx = self.index(x, y)?;
        self.cells[idx] = !self.cells[idx];
        Ok(())
    }

    /// Count the live cells among the eight neighbours of `(x, y)`,
    /// wrapping across the edges in both directions.
    pub fn count_living_neighbours(&self, x: usize, y: usize) -> Result<u8> {
        self.index(x, y)?;
        Ok(self.neighbours(x, y))
    }

    fn neighbours(&self, x: usize, y: usize) -> u8 {
        let w = self.width as isize;
        let h = self.height as isize;
        let mut count = 0;
        for (dx, dy) in NEIGHBOUR_OFFSETS {
            let nx = (x as isize + dx).rem_euclid(w) as usize;
            let ny = (y as isize + dy).rem_euclid(h) as usize;
            if self.cells[ny * self.width + nx] {
                count += 1;
            }
        }
        count
    }

    /// Advance one generation.
    ///
    /// The next grid is computed entirely from the current one and then
    /// swapped in. Returns whether any cell is alive afterwards.
    pub fn step(&mut self) -> bool {
        let next: Vec<bool> = (0..self.height)
            .flat_map(|y| (0..self.width).map(move |x| (x, y)))
            .map(|(x, y)| next_state(self.cells[y * self.width + x], self.neighbours(x, y)))
            .collect();

        self.cells = next;
        self.generation += 1;

        let population = self.population();
        debug!(generation = self.generation, population, "advanced generation");
        population > 0
    }

    /// Kill every cell and reset the generation counter
    pub fn clear(&mut self) {
        self.cells.fill(false);
        self.generation = 0;
    }

    pub fn begin_evolution(&mut self) {
        self.running = true;
    }

    /// Stop running and reset the generation counter, keeping the cells
    pub fn end_evolution(&mut self) {
        self.running = false;
        self.generation = 0;
    }

    pub fn population(&self) -> usize {
        self.cells.iter().filter(|&&alive| alive).count()
    }

    /// Coordinates of all live cells in row-major order
    pub fn live_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let width = self.width;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, alive)| **alive)
            .map(move |(i, _)| (i % width, i / width))
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            width: self.width,
            height: self.height,
            generation: self.generation,
            cells: self.cells.clone(),
        }
    }
}

/// Read-only copy of a grid handed to renderers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub width: usize,
    pub height: usize,
    pub generation: u64,
    cells: Vec<bool>,
}

impl Snapshot {
    /// `None` outside the grid
    pub fn get(&self, x: usize, y: usize) -> Option<bool> {
        (x < self.width && y < self.height).then(|| self.cells[y * self.width + x])
    }

    pub fn rows(&self) -> impl Iterator<Item = &[bool]> {
        self.cells.chunks(self.width)
    }

    pub fn live_cells(&self) -> Vec<(usize, usize)> {
        self.rows()
            .enumerate()
            .flat_map(|(y, row)| {
                row.iter().enumerate().filter(|(_, alive)| **alive).map(move |(x, _)| (x, y))
            })
            .collect()
    }

    pub fn population(&self) -> usize {
        self.cells.iter().filter(|&&alive| alive).count()
    }
}

impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            for &alive in row {
                f.write_str(if alive { "#" } else { "." })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
