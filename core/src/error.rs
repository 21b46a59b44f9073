use alloc::string::String;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Level has no elements")]
    NoElements,
    #[error("Element {0} appears more than once")]
    DuplicateElement(String),
    #[error("Element {0} has an atomic number of zero")]
    InvalidAtomicNumber(String),
    #[error("Element {0} shows the same text on both of its tiles")]
    IndistinctElement(String),
    #[error("Level has no reaction questions")]
    NoReactions,
    #[error("Question {0:?} does not list its correct answer among the choices")]
    UnanswerableQuestion(String),
    #[error("Move budget must be positive")]
    NoMoveBudget,
    #[error("Time budget must be positive")]
    NoTimeBudget,
    #[error("Hint budget must be positive")]
    NoHintBudget,
    #[error("No hints left")]
    HintsExhausted,
    #[error("Game is not in progress")]
    NotInProgress,
}

impl GameError {
    /// Configuration errors reject session creation; everything else leaves the session playable.
    pub const fn is_configuration(&self) -> bool {
        !matches!(self, Self::HintsExhausted | Self::NotInProgress)
    }
}

pub type Result<T> = core::result::Result<T, GameError>;
