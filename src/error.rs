//!
//! Error types of model loading and inference
//!
use thiserror::Error;

///
/// Errors raised while reading a model or running inference on a sequence.
///
/// * `Syntax` and `Format` abort model construction (no partial model).
/// * `NumericDegeneracy` and `Input` are fatal for a single sequence only.
///
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error while reading a model or a sequence file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// model text cannot be tokenized or parsed
    #[error("syntax error at line {line}: {message}")]
    Syntax { line: usize, message: String },

    /// model text is well-formed but semantically broken
    /// (missing `begin`, unresolved tie, unknown state or character, ...)
    #[error("format error: {0}")]
    Format(String),

    /// every reachable state assigns zero probability at this position
    #[error("numeric degeneracy at position {position} (symbol `{symbol}`)")]
    NumericDegeneracy { position: usize, symbol: char },

    /// the residue cannot be mapped into the model alphabet
    #[error("invalid residue `{symbol}` at position {position}")]
    Input { position: usize, symbol: char },
}

/// `Result` alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;
