//!
//! Resolution of tied parameters
//!
//! A state may borrow its parameters from another state:
//!
//! * `tied_trans P`: the state declares its own transition *targets*
//!   (as a bare list) and takes the transition *probabilities* of `P`,
//!   paired positionally in the listed order.
//! * `tied_letter P`: the emission map `only` becomes a copy of `P`'s.
//!
//! This is the second pass over the parsed states. Parents are resolved
//! on demand before they are copied from, so the result does not depend
//! on the declaration order.
//!
use super::parser::{Field, RawState, RawStates};
use crate::error::{Error, Result};
use log::debug;

#[derive(Clone, Copy, Debug, PartialEq)]
enum Status {
    Pending,
    InProgress,
    Resolved,
}

///
/// Make every state carry explicit `trans` and `only` parameters.
///
/// Resolving an already resolved arena again does not change it.
///
pub fn resolve_ties(states: &mut RawStates) -> Result<()> {
    let mut status = vec![Status::Pending; states.len()];
    for i in 0..states.len() {
        resolve(states, i, &mut status)?;
    }
    Ok(())
}

fn resolve(states: &mut RawStates, i: usize, status: &mut [Status]) -> Result<()> {
    match status[i] {
        Status::Resolved => return Ok(()),
        Status::InProgress => {
            return Err(Error::Format(format!(
                "cyclic tie through state `{}`",
                states.get(i).name
            )))
        }
        Status::Pending => {}
    }
    status[i] = Status::InProgress;

    if let Some(parent) = states.get(i).scalar("tied_trans").map(str::to_string) {
        let j = parent_index(states, i, &parent)?;
        resolve(states, j, status)?;
        let trans = tied_trans(states.get(i), states.get(j))?;
        debug!("state `{}` takes transitions of `{}`", states.get(i).name, parent);
        states
            .get_mut(i)
            .fields
            .insert("trans".to_string(), Field::Map(trans));
    }

    if let Some(parent) = states.get(i).scalar("tied_letter").map(str::to_string) {
        let j = parent_index(states, i, &parent)?;
        resolve(states, j, status)?;
        let only = states
            .get(j)
            .get("only")
            .and_then(|f| f.as_map())
            .ok_or_else(|| {
                Error::Format(format!(
                    "state `{}` is tied_letter to `{}` which has no emission map",
                    states.get(i).name,
                    parent
                ))
            })?
            .to_vec();
        debug!("state `{}` takes emissions of `{}`", states.get(i).name, parent);
        states
            .get_mut(i)
            .fields
            .insert("only".to_string(), Field::Map(only));
    }

    status[i] = Status::Resolved;
    Ok(())
}

fn parent_index(states: &RawStates, i: usize, parent: &str) -> Result<usize> {
    states.index_of(parent).ok_or_else(|| {
        Error::Format(format!(
            "state `{}` is tied to unknown state `{}`",
            states.get(i).name,
            parent
        ))
    })
}

///
/// Pair the targets of `state` with the probabilities of `parent`.
///
fn tied_trans(state: &RawState, parent: &RawState) -> Result<Vec<(String, f64)>> {
    let targets = state.get("trans").and_then(|f| f.names()).ok_or_else(|| {
        Error::Format(format!(
            "state `{}` is tied_trans to `{}` but lists no transition targets",
            state.name, parent.name
        ))
    })?;
    let probs = parent.get("trans").and_then(|f| f.as_map()).ok_or_else(|| {
        Error::Format(format!(
            "state `{}` is tied_trans to `{}` which has no transition map",
            state.name, parent.name
        ))
    })?;
    if targets.len() != probs.len() {
        return Err(Error::Format(format!(
            "state `{}` lists {} transition targets but `{}` has {} probabilities",
            state.name,
            targets.len(),
            parent.name,
            probs.len()
        )));
    }
    Ok(targets
        .iter()
        .zip(probs.iter())
        .map(|(target, (_, prob))| (target.to_string(), *prob))
        .collect())
}
