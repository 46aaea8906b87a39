use thiserror::Error;

use crate::GameError;

#[derive(Debug, Error)]
pub enum NfgError {
    #[error("Cannot read game file: {1}")]
    InvalidGamePath(#[source] std::io::Error, String),

    #[error("Not an explicit payoff NFG file, header is {0:?}")]
    InvalidHeader(String),

    #[error("Expected {expected}, found {found:?}")]
    UnexpectedToken {
        expected: &'static str,
        found: String,
    },

    #[error("Unexpected end of file, expected {0}")]
    UnexpectedEnd(&'static str),

    #[error("{0:?} is not a number")]
    InvalidNumber(String),

    #[error("A {0}x{1} game does not fit in memory")]
    InvalidDimensions(usize, usize),

    #[error("Only two player games are supported, found {0} players")]
    InvalidPlayers(usize),

    #[error("Invalid game: {0}")]
    InvalidGame(#[from] GameError),
}
