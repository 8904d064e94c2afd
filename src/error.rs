use crate::State;

#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Invalid door index: {0}")]
    InvalidDoorIndex(usize),
    #[error("Invalid operation: game is {actual}, expected {expected}")]
    InvalidState { expected: State, actual: State },
    #[error("No door holds the prize")]
    NoPrize,
    #[error("No door has been chosen")]
    NoChoice,
    #[error("No door has been opened")]
    NoOpenDoor,
    #[error("Invalid trial count: {0:?}, expected a positive integer")]
    InvalidTrialCount(String),
}

pub type Result<T> = std::result::Result<T, Error>;
