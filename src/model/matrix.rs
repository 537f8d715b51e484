//!
//! Conversion of resolved raw states into the dense `Model`
//!
use super::parser::{Field, RawState, RawStates};
use super::{index_alphabet, Model};
use crate::error::{Error, Result};
use ndarray::{Array1, Array2};
use std::collections::HashMap;

/// name of the pseudostate holding the initial probabilities
pub const BEGIN: &str = "begin";

///
/// Probability map of the field `key`. A missing field is an empty map.
///
fn probability_map<'a>(state: &'a RawState, key: &str) -> Result<&'a [(String, f64)]> {
    match state.get(key) {
        None => Ok(&[]),
        Some(Field::Map(m)) => Ok(m),
        Some(Field::List(_)) => Err(Error::Format(format!(
            "`{}` of state `{}` lists names without probabilities and is not tied",
            key, state.name
        ))),
        Some(other) => Err(Error::Format(format!(
            "`{}` of state `{}` is not a probability map: {:?}",
            key, state.name, other
        ))),
    }
}

fn lookup_state(index: &HashMap<&str, usize>, from: &RawState, target: &str) -> Result<usize> {
    index.get(target).copied().ok_or_else(|| {
        Error::Format(format!(
            "state `{}` has a transition to unknown state `{}`",
            from.name, target
        ))
    })
}

fn lookup_char(index: &HashMap<u8, usize>, from: &RawState, symbol: &str) -> Result<usize> {
    let k = match symbol.as_bytes() {
        [c] => index.get(c).copied(),
        _ => None,
    };
    k.ok_or_else(|| {
        Error::Format(format!(
            "state `{}` emits `{}` which is not in the alphabet",
            from.name, symbol
        ))
    })
}

fn label_of(state: &RawState) -> Result<Option<u8>> {
    match state.get("label") {
        None => Ok(None),
        Some(Field::Scalar(s)) if s.len() == 1 => Ok(Some(s.as_bytes()[0])),
        Some(other) => Err(Error::Format(format!(
            "label of state `{}` must be a single character: {:?}",
            state.name, other
        ))),
    }
}

///
/// Build the `Model` from resolved states.
///
/// * the `trans` of `begin` becomes the initial vector
/// * other states are indexed in declaration order
/// * characters are indexed in `alphabet` order
///
pub fn build_model(alphabet: &str, states: &RawStates) -> Result<Model> {
    let begin = states
        .by_name(BEGIN)
        .ok_or_else(|| Error::Format(format!("model has no `{}` state", BEGIN)))?;
    let body: Vec<&RawState> = states.iter().filter(|s| s.name != BEGIN).collect();
    let state_index: HashMap<&str, usize> = body
        .iter()
        .enumerate()
        .map(|(i, s)| (s.name.as_str(), i))
        .collect();
    let alphabet = alphabet.as_bytes();
    let char_index = index_alphabet(alphabet)?;

    let n_states = body.len();
    let mut initial = Array1::zeros(n_states);
    let mut transitions = Array2::zeros((n_states, n_states));
    let mut emissions = Array2::zeros((n_states, alphabet.len()));
    let mut labels = Vec::with_capacity(n_states);

    for (target, prob) in probability_map(begin, "trans")? {
        let j = lookup_state(&state_index, begin, target)?;
        initial[j] = *prob;
    }
    for (i, state) in body.iter().enumerate() {
        for (target, prob) in probability_map(state, "trans")? {
            let j = lookup_state(&state_index, state, target)?;
            transitions[[i, j]] = *prob;
        }
        for (symbol, prob) in probability_map(state, "only")? {
            let k = lookup_char(&char_index, state, symbol)?;
            emissions[[i, k]] = *prob;
        }
        labels.push(label_of(state)?);
    }

    let names = body.iter().map(|s| s.name.clone()).collect();
    Model::new(initial, transitions, emissions, alphabet, labels, names)
}
