//!
//! HMM model: loading from text and the dense matrix form
//!
//! # Pipeline
//!
//! ```text
//! model text -> tokenizer -> parser (Header, RawStates)
//!            -> tie resolver -> matrix builder -> Model
//! ```
//!
//! `Model` is immutable once built and can be shared across threads
//! by reference.
//!
pub mod matrix;
pub mod mocks;
pub mod parser;
pub mod tie;
pub mod tokenizer;

use crate::error::{Error, Result};
use crate::prob::Prob;
use log::{info, warn};
use ndarray::{Array1, Array2, ArrayView1, Axis};
use std::collections::HashMap;
use std::path::Path;
use std::str::FromStr;

pub use parser::{Field, Header, RawState, RawStates};

/// Tolerance of probability sums (initial vector, matrix rows)
pub const PROB_TOLERANCE: f64 = 1e-6;

///
/// HMM in matrix form
///
/// * `S` = number of states (the `begin` pseudostate excluded)
/// * `A` = size of the alphabet
///
#[derive(Debug, Clone)]
pub struct Model {
    /// initial probability of each state (length `S`)
    initial: Array1<f64>,
    /// `transitions[[i, j]]` = P(state i -> state j) (`S x S`)
    transitions: Array2<f64>,
    /// `emissions[[i, k]]` = P(state i emits alphabet[k]) (`S x A`)
    emissions: Array2<f64>,
    /// observation characters in column order
    alphabet: Vec<u8>,
    /// character -> column index
    char_index: HashMap<u8, usize>,
    /// group label of each state, if any
    label_of_state: Vec<Option<u8>>,
    /// original name of each state
    name_of_state: Vec<String>,
    // log space copies for Viterbi
    log_initial: Array1<Prob>,
    log_transitions: Array2<Prob>,
    log_emissions: Array2<Prob>,
}

///
/// Assign column indices to the alphabet characters in order.
///
pub fn index_alphabet(alphabet: &[u8]) -> Result<HashMap<u8, usize>> {
    let mut char_index = HashMap::with_capacity(alphabet.len());
    for (k, &c) in alphabet.iter().enumerate() {
        if char_index.insert(c, k).is_some() {
            return Err(Error::Format(format!(
                "character `{}` appears twice in the alphabet",
                c as char
            )));
        }
    }
    Ok(char_index)
}

fn check_row(kind: &str, name: &str, row: ArrayView1<f64>) -> Result<()> {
    if let Some(x) = row.iter().find(|x| !x.is_finite() || **x < 0.0) {
        return Err(Error::Format(format!(
            "{} probability {} of state `{}` is not a probability",
            kind, x, name
        )));
    }
    let sum = row.sum();
    if sum > 1.0 + PROB_TOLERANCE {
        warn!("{} probabilities of state `{}` sum to {} > 1", kind, name, sum);
    }
    Ok(())
}

impl Model {
    ///
    /// Create a model from pre-built matrices.
    ///
    /// Shapes must agree, every probability must be finite and
    /// non-negative, and alphabet characters must be unique.
    /// Sums that are off by more than `PROB_TOLERANCE` are only warned.
    ///
    pub fn new(
        initial: Array1<f64>,
        transitions: Array2<f64>,
        emissions: Array2<f64>,
        alphabet: &[u8],
        label_of_state: Vec<Option<u8>>,
        name_of_state: Vec<String>,
    ) -> Result<Model> {
        let n_states = initial.len();
        let n_symbols = alphabet.len();
        if n_states == 0 {
            return Err(Error::Format("model has no states".to_string()));
        }
        if n_symbols == 0 {
            return Err(Error::Format("model has an empty alphabet".to_string()));
        }
        if transitions.dim() != (n_states, n_states)
            || emissions.dim() != (n_states, n_symbols)
            || label_of_state.len() != n_states
            || name_of_state.len() != n_states
        {
            return Err(Error::Format(format!(
                "inconsistent shapes: initial={} transitions={:?} emissions={:?} labels={} names={} alphabet={}",
                n_states,
                transitions.dim(),
                emissions.dim(),
                label_of_state.len(),
                name_of_state.len(),
                n_symbols,
            )));
        }
        let char_index = index_alphabet(alphabet)?;

        check_row("initial", "begin", initial.view())?;
        if !approx::abs_diff_eq!(initial.sum(), 1.0, epsilon = PROB_TOLERANCE) {
            warn!("initial probabilities sum to {}", initial.sum());
        }
        for (i, name) in name_of_state.iter().enumerate() {
            check_row("transition", name, transitions.row(i))?;
            check_row("emission", name, emissions.row(i))?;
        }

        Ok(Model {
            log_initial: initial.mapv(Prob::from_prob),
            log_transitions: transitions.mapv(Prob::from_prob),
            log_emissions: emissions.mapv(Prob::from_prob),
            initial,
            transitions,
            emissions,
            alphabet: alphabet.to_vec(),
            char_index,
            label_of_state,
            name_of_state,
        })
    }
    ///
    /// Read and parse a model file.
    ///
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Model> {
        read_model(path).map(|(_, model)| model)
    }
    /// the number of states `S`
    pub fn n_states(&self) -> usize {
        self.initial.len()
    }
    /// the size of the alphabet `A`
    pub fn n_symbols(&self) -> usize {
        self.alphabet.len()
    }
    pub fn initial(&self) -> &Array1<f64> {
        &self.initial
    }
    pub fn transitions(&self) -> &Array2<f64> {
        &self.transitions
    }
    pub fn emissions(&self) -> &Array2<f64> {
        &self.emissions
    }
    pub fn log_initial(&self) -> &Array1<Prob> {
        &self.log_initial
    }
    pub fn log_transitions(&self) -> &Array2<Prob> {
        &self.log_transitions
    }
    pub fn log_emissions(&self) -> &Array2<Prob> {
        &self.log_emissions
    }
    /// observation characters in column order
    pub fn alphabet(&self) -> &[u8] {
        &self.alphabet
    }
    pub fn char_index(&self) -> &HashMap<u8, usize> {
        &self.char_index
    }
    /// column of the character, `None` if it is outside the alphabet
    pub fn symbol_index(&self, c: u8) -> Option<usize> {
        self.char_index.get(&c).copied()
    }
    pub fn contains_symbol(&self, c: u8) -> bool {
        self.char_index.contains_key(&c)
    }
    /// group label of state `i`
    pub fn label(&self, i: usize) -> Option<u8> {
        self.label_of_state[i]
    }
    pub fn labels(&self) -> &[Option<u8>] {
        &self.label_of_state
    }
    /// name of state `i`
    pub fn name(&self, i: usize) -> &str {
        &self.name_of_state[i]
    }
    pub fn names(&self) -> &[String] {
        &self.name_of_state
    }
    ///
    /// Map a (normalized) sequence to column indices.
    ///
    pub fn encode(&self, seq: &[u8]) -> Result<Vec<usize>> {
        seq.iter()
            .enumerate()
            .map(|(position, &c)| {
                self.symbol_index(c).ok_or(Error::Input {
                    position,
                    symbol: c as char,
                })
            })
            .collect()
    }
    /// emission probabilities of every state for the alphabet column `k`
    pub fn emission_column(&self, k: usize) -> ArrayView1<f64> {
        self.emissions.index_axis(Axis(1), k)
    }
}

impl std::fmt::Display for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        writeln!(
            f,
            "# n_states={} alphabet={}",
            self.n_states(),
            String::from_utf8_lossy(&self.alphabet)
        )?;
        for i in 0..self.n_states() {
            let label = self.label(i).map(|l| l as char).unwrap_or('-');
            writeln!(
                f,
                "{}\t{}\t{}\tinit={}",
                i,
                self.name(i),
                label,
                self.initial[i]
            )?;
        }
        Ok(())
    }
}

///
/// Parse a model text into its header and matrix form.
///
pub fn parse_model(text: &str) -> Result<(Header, Model)> {
    let tokens = tokenizer::tokenize(text)?;
    let (header, mut states) = parser::parse_tokens(tokens)?;
    tie::resolve_ties(&mut states)?;
    let model = matrix::build_model(header.alphabet()?, &states)?;
    info!(
        "model loaded: n_states={} n_symbols={}",
        model.n_states(),
        model.n_symbols()
    );
    Ok((header, model))
}

///
/// Read a model file and parse it.
///
pub fn read_model<P: AsRef<Path>>(path: P) -> Result<(Header, Model)> {
    let text = std::fs::read_to_string(path)?;
    parse_model(&text)
}

impl FromStr for Model {
    type Err = Error;
    fn from_str(s: &str) -> Result<Model> {
        parse_model(s).map(|(_, model)| model)
    }
}
