use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum HuntError {
    #[error("Invalid configuration: grid size and attempt budget must be positive and positions inside the grid")]
    InvalidConfiguration,
    #[error("Invalid input: expected one of up, down, left, right (or w, s, a, d)")]
    InvalidInput,
    #[error("Round is over, no new moves are accepted")]
    InvalidState,
}

pub type Result<T> = core::result::Result<T, HuntError>;
