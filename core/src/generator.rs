use rand::rngs::SmallRng;
use rand::{Rng, RngCore, SeedableRng};
use std::collections::VecDeque;

use crate::*;

/// Source of player and target positions for new rounds.
pub trait PositionGenerator {
    /// Picks a cell uniformly on each axis within `[0, size)`.
    fn position(&mut self, size: Coord) -> Coord2;
}

/// Purely random placement, reproducible from its seed.
#[derive(Clone, Debug)]
pub struct RandomPositionGenerator {
    seed: u64,
    rng: SmallRng,
}

impl RandomPositionGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self::new(SmallRng::from_os_rng().next_u64())
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl PositionGenerator for RandomPositionGenerator {
    fn position(&mut self, size: Coord) -> Coord2 {
        if size == 0 {
            log::warn!("Asked for a position on an empty grid, using the origin");
            return (0, 0);
        }
        (self.rng.random_range(0..size), self.rng.random_range(0..size))
    }
}

/// Hands out a fixed queue of positions first, then falls back to random placement.
///
/// Positions outside the requested grid are clamped onto its last row/column.
#[derive(Clone, Debug)]
pub struct ScriptedPositions {
    queue: VecDeque<Coord2>,
    fallback: RandomPositionGenerator,
}

impl ScriptedPositions {
    pub fn new(positions: impl IntoIterator<Item = Coord2>, fallback_seed: u64) -> Self {
        Self {
            queue: positions.into_iter().collect(),
            fallback: RandomPositionGenerator::new(fallback_seed),
        }
    }

    pub fn remaining(&self) -> usize {
        self.queue.len()
    }
}

impl PositionGenerator for ScriptedPositions {
    fn position(&mut self, size: Coord) -> Coord2 {
        match self.queue.pop_front() {
            Some((row, col)) => {
                let last = size.saturating_sub(1);
                (row.min(last), col.min(last))
            }
            None => self.fallback.position(size),
        }
    }
}
