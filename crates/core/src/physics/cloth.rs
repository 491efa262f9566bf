//! Mass-point cloth hanging from pinned cells
//!
//! The cloth is a `cols × rows` grid of points. Each point is tied to its
//! up/down/left/right neighbors; a tie only pulls once the two points are
//! further apart than `rest_length`, and then it pulls hard:
//!
//! ```text
//! |Δv| = dist² × dt × stiffness        (toward the neighbor)
//! ```
//!
//! The pull is quadratic in the separation, not a Hookean spring. Large `dt`
//! values can make it overshoot and diverge.
//!
//! # Tick
//!
//! 1. Every unpinned cell sums the pulls of its neighbors, all evaluated on
//!    the positions as they were at the start of the tick (Jacobi style).
//! 2. Unpinned cells gain `gravity × dt` along `+y` (screen down) and
//!    `wind × wind_coupling × dt`.
//! 3. Every cell's velocity is multiplied by `max(0, 1 - damping × dt)`.
//! 4. Every cell moves by `velocity × dt`.
//!
//! Pinned cells start at rest and never receive any velocity, which is what
//! keeps them in place; step 4 still runs for them.

use crate::config::ClothConfig;
use crate::core_types::units::Seconds;
use crate::core_types::vec3::Vec3;
use crate::core_types::vector_math::{distance, scale, sub};
use crate::physics::Forcing;

/// Direction from a cell to one of its ties
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Neighbor {
    /// `row - 1`
    Up,
    /// `row + 1`
    Down,
    /// `col - 1`
    Left,
    /// `col + 1`
    Right,
}

impl Neighbor {
    /// All four directions, in the order pulls are accumulated
    pub const ALL: [Neighbor; 4] = [Neighbor::Up, Neighbor::Down, Neighbor::Left, Neighbor::Right];
}

/// The cloth: positions, velocities and pin flags in row-major order
#[derive(Debug, Clone)]
pub struct ClothGrid {
    positions: Vec<Vec3>,
    velocities: Vec<Vec3>,
    pinned: Vec<bool>,
    cols: usize,
    rows: usize,
    spacing_x: f64,
    rest_length: f64,
    stiffness: f64,
    damping: f64,
    wind_coupling: f64,
}

impl ClothGrid {
    /// Lay the cloth out flat at `(col × spacing_x, row × spacing_y, 0)`,
    /// at rest, and pin the configured cells
    ///
    /// Panics if the grid is empty or a pin lies outside it; run
    /// [`SimulationConfig::validate`](crate::SimulationConfig::validate)
    /// first to get those as errors.
    #[must_use]
    pub fn new(config: &ClothConfig) -> Self {
        assert!(
            config.cols > 0 && config.rows > 0,
            "cloth grid must be at least 1x1, got {}x{}",
            config.cols,
            config.rows
        );

        let len = config.cols * config.rows;
        let mut positions = Vec::with_capacity(len);
        for row in 0..config.rows {
            for col in 0..config.cols {
                positions.push(Vec3::new(
                    col as f64 * config.spacing_x,
                    row as f64 * config.spacing_y,
                    0.0,
                ));
            }
        }

        let mut grid = ClothGrid {
            positions,
            velocities: vec![Vec3::zeros(); len],
            pinned: vec![false; len],
            cols: config.cols,
            rows: config.rows,
            spacing_x: config.spacing_x,
            rest_length: config.rest_length,
            stiffness: config.stiffness,
            damping: config.damping,
            wind_coupling: config.wind_coupling,
        };
        for &(col, row) in &config.pinned {
            let idx = grid.index(col, row);
            grid.pinned[idx] = true;
        }
        grid
    }

    /// Flat index of `(col, row)`: `col + row × cols`
    ///
    /// Panics if the coordinates lie outside the grid.
    #[inline]
    #[track_caller]
    pub fn index(&self, col: usize, row: usize) -> usize {
        assert!(
            col < self.cols && row < self.rows,
            "cloth cell ({col}, {row}) outside the {}x{} grid",
            self.cols,
            self.rows
        );
        col + row * self.cols
    }

    /// Inverse of [`index`](Self::index)
    #[track_caller]
    pub fn coords(&self, index: usize) -> (usize, usize) {
        assert!(
            index < self.positions.len(),
            "cloth index {index} outside a grid of {} cells",
            self.positions.len()
        );
        (index % self.cols, index / self.cols)
    }

    /// Coordinates of the neighbor in `direction`, if the grid has one there
    #[track_caller]
    pub fn neighbor(&self, col: usize, row: usize, direction: Neighbor) -> Option<(usize, usize)> {
        let _ = self.index(col, row);
        match direction {
            Neighbor::Up => row.checked_sub(1).map(|r| (col, r)),
            Neighbor::Down => (row + 1 < self.rows).then_some((col, row + 1)),
            Neighbor::Left => col.checked_sub(1).map(|c| (c, row)),
            Neighbor::Right => (col + 1 < self.cols).then_some((col + 1, row)),
        }
    }

    /// Existing ties of `(col, row)`; edge cells have fewer than four
    #[track_caller]
    pub fn neighbors(
        &self,
        col: usize,
        row: usize,
    ) -> impl Iterator<Item = (Neighbor, (usize, usize))> + '_ {
        Neighbor::ALL
            .into_iter()
            .filter_map(move |dir| self.neighbor(col, row, dir).map(|at| (dir, at)))
    }

    /// Sum of the neighbor pulls on `(col, row)` for a tick of length `dt`
    ///
    /// Reads positions only, so calling this for every cell before changing
    /// any velocity gives the Jacobi update.
    pub fn constraint_pull(&self, col: usize, row: usize, dt: f64) -> Vec3 {
        let here = self.positions[self.index(col, row)];
        let mut pull = Vec3::zeros();
        for (_, (n_col, n_row)) in self.neighbors(col, row) {
            let there = self.positions[self.index(n_col, n_row)];
            let dist = distance(&here, &there);
            if dist > self.rest_length {
                let magnitude = dist * dist * dt * self.stiffness;
                pull += scale(&sub(&there, &here), magnitude / dist);
            }
        }
        pull
    }

    /// Advance the cloth by one tick
    pub fn step(&mut self, dt: Seconds, forcing: &Forcing) {
        let dt = *dt;

        let pulls: Vec<Vec3> = (0..self.positions.len())
            .map(|idx| {
                if self.pinned[idx] {
                    Vec3::zeros()
                } else {
                    let (col, row) = self.coords(idx);
                    self.constraint_pull(col, row, dt)
                }
            })
            .collect();

        let wind = forcing.wind * (self.wind_coupling * dt);
        let retained = (1.0 - self.damping * dt).max(0.0);

        for (idx, velocity) in self.velocities.iter_mut().enumerate() {
            if !self.pinned[idx] {
                *velocity += pulls[idx];
                velocity.y += dt * forcing.gravity;
                *velocity += wind;
            }
            if velocity.norm() != 0.0 {
                *velocity *= retained;
            }
        }

        for (position, velocity) in self.positions.iter_mut().zip(&self.velocities) {
            *position += velocity * dt;
        }
    }

    /// Position of `(col, row)`
    #[track_caller]
    pub fn position(&self, col: usize, row: usize) -> Vec3 {
        self.positions[self.index(col, row)]
    }

    /// Velocity of `(col, row)`
    #[track_caller]
    pub fn velocity(&self, col: usize, row: usize) -> Vec3 {
        self.velocities[self.index(col, row)]
    }

    /// Whether `(col, row)` is pinned
    #[track_caller]
    pub fn is_pinned(&self, col: usize, row: usize) -> bool {
        self.pinned[self.index(col, row)]
    }

    /// Move an unpinned cell (scenario set-up). Panics on a pinned cell.
    #[track_caller]
    pub fn set_position(&mut self, col: usize, row: usize, position: Vec3) {
        let idx = self.index(col, row);
        assert!(!self.pinned[idx], "cloth cell ({col}, {row}) is pinned");
        self.positions[idx] = position;
    }

    /// Set an unpinned cell's velocity (scenario set-up). Panics on a pinned cell.
    #[track_caller]
    pub fn set_velocity(&mut self, col: usize, row: usize, velocity: Vec3) {
        let idx = self.index(col, row);
        assert!(!self.pinned[idx], "cloth cell ({col}, {row}) is pinned");
        self.velocities[idx] = velocity;
    }

    /// All positions, row-major
    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    /// All velocities, row-major
    pub fn velocities(&self) -> &[Vec3] {
        &self.velocities
    }

    /// Coordinates of every pinned cell, row-major
    pub fn pinned_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.pinned
            .iter()
            .enumerate()
            .filter(|(_, pinned)| **pinned)
            .map(|(idx, _)| (idx % self.cols, idx / self.cols))
    }

    /// Largest separation between any two tied cells
    pub fn max_stretch(&self) -> f64 {
        let mut max: f64 = 0.0;
        for row in 0..self.rows {
            for col in 0..self.cols {
                let here = self.position(col, row);
                for dir in [Neighbor::Down, Neighbor::Right] {
                    if let Some((n_col, n_row)) = self.neighbor(col, row, dir) {
                        max = max.max(distance(&here, &self.position(n_col, n_row)));
                    }
                }
            }
        }
        max
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Initial column spacing; the renderer centres the cloth with it
    pub fn spacing_x(&self) -> f64 {
        self.spacing_x
    }

    /// Number of cells
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Always false: construction rejects empty grids
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}
