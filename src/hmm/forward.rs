//!
//! Forward algorithm definitions
//!
use crate::error::{Error, Result};
use crate::model::Model;
use ndarray::{Array1, Array2};

/// Scaled forward table and its scaling constants
#[derive(Debug, Clone)]
pub struct ForwardResult {
    /// `n x S` table, each row sums to 1
    pub table: Array2<f64>,
    /// `c[t]`, the sum of the unscaled row `t`
    pub scales: Array1<f64>,
    /// observations the table was computed on
    pub observations: Vec<usize>,
}

impl ForwardResult {
    /// The number of emissions that this result stores.
    pub fn n_emissions(&self) -> usize {
        self.scales.len()
    }
    ///
    /// `log P(x) = sum_t log c[t]`
    ///
    pub fn log_likelihood(&self) -> f64 {
        self.scales.iter().map(|c| c.ln()).sum()
    }
}

impl Model {
    ///
    /// Run Forward algorithm to the observations
    ///
    /// ```text
    /// f[0]  = init * e(x[0])
    /// f[t]  = (F[t-1] . A) * e(x[t])
    /// c[t]  = sum_j f[t][j]
    /// F[t]  = f[t] / c[t]
    /// ```
    ///
    /// `c[t] = 0` means no state can be at position `t`, which is
    /// reported as `NumericDegeneracy`.
    ///
    pub fn forward(&self, observations: &[usize]) -> Result<ForwardResult> {
        let n = observations.len();
        let mut table = Array2::zeros((n, self.n_states()));
        let mut scales = Array1::zeros(n);

        for (t, &o) in observations.iter().enumerate() {
            let mut row = if t == 0 {
                self.initial().clone()
            } else {
                table.row(t - 1).dot(self.transitions())
            };
            row *= &self.emission_column(o);
            let c = row.sum();
            if !(c > 0.0 && c.is_finite()) {
                return Err(Error::NumericDegeneracy {
                    position: t,
                    symbol: self.alphabet()[o] as char,
                });
            }
            row /= c;
            table.row_mut(t).assign(&row);
            scales[t] = c;
        }

        Ok(ForwardResult {
            table,
            scales,
            observations: observations.to_vec(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::mocks::*;
    use crate::model::parse_model;

    #[test]
    fn forward_two_state() {
        let model = mock_two_state();
        let r = model.forward(&model.encode(b"MVLS").unwrap()).unwrap();
        assert_eq!(r.n_emissions(), 4);
        let expected = [
            [0.9523809523809523, 0.04761904761904762],
            [0.47544204322200395, 0.5245579567779961],
            [0.14528397565922924, 0.8547160243407709],
            [0.09447628033467, 0.9055237196653301],
        ];
        for t in 0..4 {
            for j in 0..2 {
                assert_abs_diff_eq!(r.table[[t, j]], expected[t][j], epsilon = 1e-9);
            }
        }
        let scales = [0.42, 0.24238095238095236, 0.23245579567779961, 0.18273580121703856];
        for t in 0..4 {
            assert_abs_diff_eq!(r.scales[t], scales[t], epsilon = 1e-12);
        }
        // equals the sum over all 16 paths
        assert_abs_diff_eq!(r.log_likelihood(), -5.443514251503168, epsilon = 1e-9);
        assert_eq!(r.observations, model.encode(b"MVLS").unwrap());
    }
    #[test]
    fn forward_rows_are_normalized_on_long_sequence() {
        let model = mock_mini_tmhmm();
        let seq = random_protein(2000, 3);
        let r = model.forward(&model.encode(&seq).unwrap()).unwrap();
        for row in r.table.rows() {
            assert_abs_diff_eq!(row.sum(), 1.0, epsilon = 1e-9);
        }
        assert!(r.scales.iter().all(|&c| c > 0.0));
        assert!(r.log_likelihood().is_finite());
        assert!(r.log_likelihood() < -2000.0);
    }
    #[test]
    fn forward_zero_emission_is_degenerate() {
        let (_, model) = parse_model(
            "header { alphabet MX; }
             begin { trans a:0.5 b:0.5; }
             a { trans a:0.5 b:0.5; only M:1.0 X:0.0; label i; }
             b { trans a:0.5 b:0.5; only M:1.0; label o; }",
        )
        .unwrap();
        let r = model.forward(&model.encode(b"MMX").unwrap());
        assert!(matches!(
            r,
            Err(Error::NumericDegeneracy { position: 2, symbol: 'X' })
        ));
        let r = model.forward(&model.encode(b"XM").unwrap());
        assert!(matches!(
            r,
            Err(Error::NumericDegeneracy { position: 0, symbol: 'X' })
        ));
    }
    #[test]
    fn forward_impossible_transition_is_degenerate() {
        // only `a` emits A, only `b` emits B, and b never returns to a
        let (_, model) = parse_model(
            "header { alphabet AB; }
             begin { trans a:1.0; }
             a { trans a:0.5 b:0.5; only A:1.0; label i; }
             b { trans b:1.0; only B:1.0; label o; }",
        )
        .unwrap();
        assert!(model.forward(&[0, 1, 1]).is_ok());
        let r = model.forward(&[0, 1, 0]);
        assert!(matches!(
            r,
            Err(Error::NumericDegeneracy { position: 2, symbol: 'A' })
        ));
    }
    #[test]
    fn forward_empty_sequence() {
        let model = mock_two_state();
        let r = model.forward(&[]).unwrap();
        assert_eq!(r.n_emissions(), 0);
        assert_eq!(r.table.dim(), (0, 2));
        assert_eq!(r.log_likelihood(), 0.0);
    }
}
