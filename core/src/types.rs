use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::{HuntError, Result};

/// Single coordinate axis used for the grid side length and positions.
pub type Coord = u16;

/// Attempt counter type.
pub type Attempts = u16;

/// Two-dimensional coordinates `(row, col)`.
pub type Coord2 = (Coord, Coord);

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    /// Row and column displacement of a single step.
    pub const fn delta(self) -> (i8, i8) {
        use Direction::*;
        match self {
            Up => (-1, 0),
            Down => (1, 0),
            Left => (0, -1),
            Right => (0, 1),
        }
    }

    pub const fn as_str(self) -> &'static str {
        use Direction::*;
        match self {
            Up => "up",
            Down => "down",
            Left => "left",
            Right => "right",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = HuntError;

    fn from_str(token: &str) -> Result<Self> {
        use Direction::*;
        let token = token.trim();
        if token.eq_ignore_ascii_case("up") || token.eq_ignore_ascii_case("w") {
            Ok(Up)
        } else if token.eq_ignore_ascii_case("down") || token.eq_ignore_ascii_case("s") {
            Ok(Down)
        } else if token.eq_ignore_ascii_case("left") || token.eq_ignore_ascii_case("a") {
            Ok(Left)
        } else if token.eq_ignore_ascii_case("right") || token.eq_ignore_ascii_case("d") {
            Ok(Right)
        } else {
            Err(HuntError::InvalidInput)
        }
    }
}

/// Moves `coords` one step towards `direction`, clamping (not wrapping) at the grid edges.
pub fn step_clamped(coords: Coord2, direction: Direction, size: Coord) -> Coord2 {
    let last = size.saturating_sub(1);
    let (row, col) = coords;
    let (d_row, d_col) = direction.delta();

    let clamp_axis = |value: Coord, delta: i8| -> Coord {
        value.saturating_add_signed(delta.into()).min(last)
    };

    (clamp_axis(row, d_row), clamp_axis(col, d_col))
}

pub const fn in_bounds(coords: Coord2, size: Coord) -> bool {
    coords.0 < size && coords.1 < size
}
