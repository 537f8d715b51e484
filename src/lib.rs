//!
//! Prediction of transmembrane helices in proteins with a hidden Markov model
//!
//! * `model`: text format of the model and its matrix form
//! * `hmm`: Viterbi, Forward and Backward on a `Model`
//! * `predict`: topology of protein sequences
//! * `io`: FASTA input and prediction artifacts
//!
#[macro_use]
extern crate approx;
pub mod common;
pub mod error;
pub mod hmm;
pub mod io;
pub mod model;
pub mod predict;
pub mod prob;
pub mod seq;
pub mod utils;

pub use error::{Error, Result};
pub use model::{parse_model, read_model, Model};
