use core::fmt;
use serde::{Deserialize, Serialize};

pub use engine::*;
pub use error::*;
pub use estimate::*;
pub use generator::*;
pub use types::*;

mod engine;
mod error;
mod estimate;
mod generator;
mod types;

pub const DEFAULT_SIZE: Coord = 5;
pub const DEFAULT_ATTEMPTS: Attempts = 10;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HuntConfig {
    /// Side length of the square grid.
    pub size: Coord,
    /// Attempts granted at the start of every round.
    pub attempts: Attempts,
}

impl HuntConfig {
    pub const fn new_unchecked(size: Coord, attempts: Attempts) -> Self {
        Self { size, attempts }
    }

    pub fn new(size: Coord, attempts: Attempts) -> Result<Self> {
        let config = Self::new_unchecked(size, attempts);
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.size == 0 || self.attempts == 0 {
            Err(HuntError::InvalidConfiguration)
        } else {
            Ok(())
        }
    }

    pub const fn total_cells(&self) -> u32 {
        (self.size as u32) * (self.size as u32)
    }
}

impl Default for HuntConfig {
    fn default() -> Self {
        Self::new_unchecked(DEFAULT_SIZE, DEFAULT_ATTEMPTS)
    }
}

/// Player and target placement for a single round.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundLayout {
    pub player: Coord2,
    pub target: Coord2,
}

impl RoundLayout {
    pub fn new(size: Coord, player: Coord2, target: Coord2) -> Result<Self> {
        let layout = Self { player, target };
        layout.validate(size)?;
        Ok(layout)
    }

    /// Target first, then player, each drawn independently: the player may spawn on the target.
    pub fn generate<G: PositionGenerator + ?Sized>(size: Coord, generator: &mut G) -> Self {
        let target = generator.position(size);
        let player = generator.position(size);
        Self { player, target }
    }

    pub fn validate(&self, size: Coord) -> Result<()> {
        if in_bounds(self.player, size) && in_bounds(self.target, size) {
            Ok(())
        } else {
            Err(HuntError::InvalidConfiguration)
        }
    }

    pub fn player_on_target(&self) -> bool {
        self.player == self.target
    }
}

/// Lifecycle of a [`HuntRound`]. A won round folds straight back into `Playing`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundPhase {
    Playing,
    AttemptsExhausted,
}

impl RoundPhase {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::AttemptsExhausted)
    }
}

impl Default for RoundPhase {
    fn default() -> Self {
        Self::Playing
    }
}

/// What gets revealed once the attempts run out.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reveal {
    pub target: Coord2,
    pub player: Coord2,
    /// Row and column estimates summed.
    pub estimate: i64,
    pub row_estimate: Estimate,
    pub col_estimate: Estimate,
}

impl fmt::Display for Reveal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (row, col) = self.target;
        writeln!(f, "Game over! The treasure was at row {row} and column {col}.")?;
        write!(f, "Approximate distance: {}", self.estimate)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundOutcome {
    /// Missed the target, attempts remain.
    Continuing,
    /// Reached the target, a fresh round has already started.
    Success,
    /// Last attempt used up, the round is over.
    Exhausted(Reveal),
}

impl RoundOutcome {
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Exhausted(_))
    }
}

/// Read-only view of a round for presentation layers.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundSnapshot {
    pub size: Coord,
    pub player: Coord2,
    /// Exposed for drawing only, never part of gameplay feedback.
    pub target: Coord2,
    pub attempts_remaining: Attempts,
    pub attempts_budget: Attempts,
    pub phase: RoundPhase,
    pub player_on_target: bool,
    pub rounds_won: u32,
}
