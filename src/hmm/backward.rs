//!
//! Backward algorithm definitions
//!
use super::forward::ForwardResult;
use crate::model::Model;
use ndarray::Array2;

impl Model {
    ///
    /// Run Backward algorithm to the observations of a Forward result,
    /// scaled by its constants `c`.
    ///
    /// ```text
    /// B[n-1][i] = 1 / c[n-1]
    /// B[t][i]   = sum_j a_ij e_j(x[t+1]) B[t+1][j] / c[t]
    /// ```
    ///
    pub fn backward(&self, forward: &ForwardResult) -> Array2<f64> {
        let observations = &forward.observations;
        let scales = &forward.scales;
        let n = observations.len();
        let mut table = Array2::zeros((n, self.n_states()));
        if n == 0 {
            return table;
        }

        table.row_mut(n - 1).fill(1.0 / scales[n - 1]);
        for t in (0..n - 1).rev() {
            let weighted = &self.emission_column(observations[t + 1]) * &table.row(t + 1);
            let mut row = self.transitions().dot(&weighted);
            row /= scales[t];
            table.row_mut(t).assign(&row);
        }
        table
    }
}

#[cfg(test)]
mod tests {
    use crate::model::mocks::*;

    #[test]
    fn backward_two_state() {
        let model = mock_two_state();
        let obs = model.encode(b"MVLS").unwrap();
        let f = model.forward(&obs).unwrap();
        let b = model.backward(&f);
        let expected = [
            [2.328259632862039, 3.434807342759224],
            [3.030345076383011, 5.118563638634125],
            [3.295824025382377, 4.472904034447512],
            [5.472381401673349, 5.472381401673349],
        ];
        for t in 0..4 {
            for j in 0..2 {
                assert_abs_diff_eq!(b[[t, j]], expected[t][j], epsilon = 1e-9);
            }
        }
    }
    #[test]
    fn forward_and_backward_are_consistent() {
        // sum_j F[t][j] B[t][j] c[t] = 1 for every t
        let model = mock_mini_tmhmm();
        let seq = random_protein(500, 5);
        let obs = model.encode(&seq).unwrap();
        let f = model.forward(&obs).unwrap();
        let b = model.backward(&f);
        for t in 0..obs.len() {
            let s: f64 = (&f.table.row(t) * &b.row(t)).sum() * f.scales[t];
            assert_abs_diff_eq!(s, 1.0, epsilon = 1e-8);
        }
    }
    #[test]
    fn backward_empty_sequence() {
        let model = mock_two_state();
        let f = model.forward(&[]).unwrap();
        let b = model.backward(&f);
        assert_eq!(b.dim(), (0, 2));
    }
}
