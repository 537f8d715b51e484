//!
//! Viterbi algorithm definitions
//!
use crate::error::{Error, Result};
use crate::model::Model;
use crate::prob::Prob;
use ndarray::{Array1, Array2};

/// Most probable state path of a sequence
#[derive(Debug, Clone, PartialEq)]
pub struct ViterbiResult {
    /// log probability of the best path (`0.0` for an empty sequence)
    pub log_prob: f64,
    /// group label of each position
    pub path: String,
    /// state index of each position
    pub states: Vec<usize>,
}

///
/// Index and value of the maximum.
///
/// Only a strictly greater value replaces the current best, so ties
/// resolve to the lowest index.
///
fn argmax<I: Iterator<Item = Prob>>(iter: I) -> (usize, Prob) {
    let mut best = (0, Prob::zero());
    for (i, x) in iter.enumerate() {
        if i == 0 || x > best.1 {
            best = (i, x);
        }
    }
    best
}

impl Model {
    ///
    /// `NumericDegeneracy` if no path can emit the observations up to `t`
    ///
    fn check_viterbi_score(&self, score: &Array1<Prob>, t: usize, o: usize) -> Result<()> {
        if score.iter().all(|x| x.is_zero()) {
            Err(Error::NumericDegeneracy {
                position: t,
                symbol: self.alphabet()[o] as char,
            })
        } else {
            Ok(())
        }
    }
    ///
    /// Run Viterbi algorithm to the observations
    ///
    /// ```text
    /// V[0][j] = log init(j) + log e_j(x[0])
    /// V[t][j] = log e_j(x[t]) + max_i (V[t-1][i] + log a_ij)
    /// ```
    ///
    /// Every state on the decoded path must have a label, and at least
    /// one path must emit the observations.
    ///
    pub fn viterbi(&self, observations: &[usize]) -> Result<ViterbiResult> {
        let n = observations.len();
        if n == 0 {
            return Ok(ViterbiResult {
                log_prob: 0.0,
                path: String::new(),
                states: Vec::new(),
            });
        }
        let s = self.n_states();
        let log_a = self.log_transitions();
        let log_e = self.log_emissions();

        // backpointers[[t, j]] = best previous state of j at t
        let mut backpointers: Array2<usize> = Array2::zeros((n, s));
        let mut score: Array1<Prob> =
            Array1::from_shape_fn(s, |j| self.log_initial()[j] * log_e[[j, observations[0]]]);
        self.check_viterbi_score(&score, 0, observations[0])?;

        for t in 1..n {
            let o = observations[t];
            let mut next = Array1::from_elem(s, Prob::zero());
            for j in 0..s {
                let (i, best) = argmax((0..s).map(|i| score[i] * log_a[[i, j]]));
                backpointers[[t, j]] = i;
                next[j] = best * log_e[[j, o]];
            }
            self.check_viterbi_score(&next, t, o)?;
            score = next;
        }

        let (last, best) = argmax(score.iter().copied());
        let mut states = vec![last; n];
        for t in (1..n).rev() {
            states[t - 1] = backpointers[[t, states[t]]];
        }

        let path = states
            .iter()
            .enumerate()
            .map(|(t, &j)| {
                self.label(j).map(char::from).ok_or_else(|| {
                    Error::Format(format!(
                        "state `{}` at position {} of the decoded path has no label",
                        self.name(j),
                        t
                    ))
                })
            })
            .collect::<Result<String>>()?;

        Ok(ViterbiResult {
            log_prob: best.to_log_value(),
            path,
            states,
        })
    }
}
