//!
//! Errors of CTC table construction and gradient computation
//!
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CTCError {
    #[error("symbol {:?} is not in the alphabet", char::from(*symbol))]
    UnknownSymbol { symbol: u8 },
    #[error("symbol {symbol:?} is not an ascii character")]
    NonAsciiSymbol { symbol: char },
    #[error("symbol {:?} appears twice in the alphabet", char::from(*symbol))]
    DuplicateSymbol { symbol: u8 },
    #[error("label contains the blank symbol at position {position}")]
    BlankInLabel { position: usize },
    #[error("label is empty")]
    EmptyLabel,
    #[error("label of length {label_len} cannot be aligned to {n_steps} timesteps")]
    LabelTooLong { label_len: usize, n_steps: usize },
    #[error("emission matrix shape mismatch: expected {expected}, got {actual}")]
    ShapeMismatch { expected: String, actual: String },
    #[error("invalid emission probability {value} at (t={t}, k={k})")]
    InvalidEmission { t: usize, k: usize, value: f64 },
    #[error("emission probability at (t={t}, k={k}) is zero and is required by the gradient")]
    ZeroEmission { t: usize, k: usize },
    #[error("total alignment probability is zero")]
    ZeroProbability,
    #[error("tolerance must be a non-negative number, got {value}")]
    InvalidTolerance { value: f64 },
}

impl CTCError {
    pub(crate) fn shape_mismatch(expected: impl Into<String>, actual: impl Into<String>) -> Self {
        Self::ShapeMismatch {
            expected: expected.into(),
            actual: actual.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CTCError>;
