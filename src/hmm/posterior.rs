//!
//! Posterior probabilities of states and of topology groups
//! from the result of Forward/Backward.
//!
//! - **State posterior** (for each position and state)
//!     `F[t][j] B[t][j]`, proportional to `P(in j at t | x)`
//!
//! - **Group posterior** (for each position and group)
//!     The sum of state posteriors over the states whose lowercased
//!     label is the group code, divided by the row sum so that
//!     inside + membrane + outside = 1 at every position.
//!
use super::forward::ForwardResult;
use crate::common::{Group, GROUPS};
use crate::error::{Error, Result};
use crate::model::Model;
use ndarray::Array2;

/// Struct for storing the results of forward and backward.
#[derive(Debug, Clone)]
pub struct HMMOutput {
    /// Forward result
    pub forward: ForwardResult,
    /// Backward table scaled with `forward.scales`
    pub backward: Array2<f64>,
}

impl Model {
    ///
    /// Run forward and backward for the observations and returns HMMOutput.
    ///
    pub fn run(&self, observations: &[usize]) -> Result<HMMOutput> {
        let forward = self.forward(observations)?;
        let backward = self.backward(&forward);
        Ok(HMMOutput { forward, backward })
    }
}

impl HMMOutput {
    ///
    /// Unnormalized state posterior `F * B` (elementwise)
    ///
    pub fn to_state_posterior(&self) -> Array2<f64> {
        &self.forward.table * &self.backward
    }
    ///
    /// `n x 3` table of (inside, membrane, outside) probabilities.
    ///
    /// States without a label, or with a label of no group,
    /// contribute to no column.
    ///
    pub fn to_group_posterior(&self, model: &Model) -> Result<Array2<f64>> {
        let observations = &self.forward.observations;
        let columns: Vec<Option<usize>> = model
            .labels()
            .iter()
            .map(|label| label.and_then(Group::from_label).map(|g| g.column()))
            .collect();
        let posterior = self.to_state_posterior();
        let mut table: Array2<f64> = Array2::zeros((posterior.nrows(), GROUPS.len()));

        for (t, row) in posterior.rows().into_iter().enumerate() {
            for (j, &p) in row.iter().enumerate() {
                if let Some(k) = columns[j] {
                    table[[t, k]] += p;
                }
            }
            let total = table.row(t).sum();
            if !(total > 0.0 && total.is_finite()) {
                return Err(Error::NumericDegeneracy {
                    position: t,
                    symbol: model.alphabet()[observations[t]] as char,
                });
            }
            let mut group_row = table.row_mut(t);
            group_row /= total;
        }
        Ok(table)
    }
}
