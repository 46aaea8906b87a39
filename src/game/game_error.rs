use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum GameError {
    #[error("A game needs at least one strategy per player, got {0}x{1}")]
    EmptyGame(usize, usize),

    #[error("Payoff matrices must have same size: {0:?} and {1:?}")]
    ShapeMismatch(Vec<usize>, Vec<usize>),

    #[error("Payoff {value} of player {player} at ({row}, {column}) is not finite")]
    NonFinitePayoff {
        player: usize,
        row: usize,
        column: usize,
        value: f64,
    },

    #[error("Payoff {value} of player {player} at ({row}, {column}) is not strictly positive")]
    NonPositivePayoff {
        player: usize,
        row: usize,
        column: usize,
        value: f64,
    },

    #[error("Starting pivot must be a number between 1 and {max}, got {label}")]
    InvalidStartLabel { label: isize, max: usize },

    #[error("Tolerance must be positive and finite, got {0}")]
    InvalidTolerance(f64),

    #[error("Minimum ratio test found no row for entering label {0}")]
    NoEligibleRow(isize),
}
