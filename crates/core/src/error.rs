use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("no subset of the pool sums to at most {ceiling}")]
    NoFeasibleTarget { ceiling: u32 },
    #[error("digit out of range: {0}")]
    InvalidDigit(u8),
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    #[error("invalid session state: {0}")]
    InvalidState(String),
}
