//!
//! Topology prediction of protein sequences
//!
//! `predict` runs the whole pipeline for one sequence
//!
//! ```text
//! residues -> (normalize) -> encode -> Viterbi path
//!                                   -> forward/backward -> group posterior
//! ```
//!
use crate::common::{Group, Residues};
use crate::error::Result;
use crate::hmm::PredictParams;
use crate::model::Model;
use crate::seq::normalize_sequence;
use crate::utils::progress_common_style;
use indicatif::ParallelProgressIterator;
use itertools::Itertools;
use log::debug;
use ndarray::Array2;
use rayon::prelude::*;
use serde::Serialize;

///
/// Result of a prediction of a sequence
///
#[derive(Debug, Clone)]
pub struct Prediction {
    /// one group label per (normalized) residue
    pub path: String,
    /// log probability of the Viterbi path
    pub log_prob: f64,
    /// `n x 3` table of (inside, membrane, outside) probabilities,
    /// if `PredictParams::compute_posterior`
    pub posterior: Option<Array2<f64>>,
    /// `log P(x)` summed over all paths, computed with the posterior
    pub log_likelihood: Option<f64>,
}

impl Prediction {
    pub fn len(&self) -> usize {
        self.path.len()
    }
    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }
    pub fn segments(&self) -> Vec<Segment> {
        summarize(&self.path)
    }
}

///
/// Predict the topology of a sequence
///
pub fn predict(model: &Model, seq: &Residues, params: &PredictParams) -> Result<Prediction> {
    let observations = if params.normalize {
        model.encode(&normalize_sequence(seq, model.alphabet())?)?
    } else {
        model.encode(seq)?
    };
    let viterbi = model.viterbi(&observations)?;
    let (posterior, log_likelihood) = if params.compute_posterior {
        let output = model.run(&observations)?;
        let posterior = output.to_group_posterior(model)?;
        (Some(posterior), Some(output.forward.log_likelihood()))
    } else {
        (None, None)
    };
    debug!(
        "predicted n={} log_prob={} log_likelihood={:?}",
        observations.len(),
        viterbi.log_prob,
        log_likelihood
    );
    Ok(Prediction {
        path: viterbi.path,
        log_prob: viterbi.log_prob,
        posterior,
        log_likelihood,
    })
}

///
/// `predict` on each sequence in parallel.
///
/// The i-th result corresponds to the i-th sequence, and a failure of a
/// sequence does not affect the others. Progress is shown on stderr.
///
pub fn predict_batch<S>(model: &Model, seqs: &[S], params: &PredictParams) -> Vec<Result<Prediction>>
where
    S: AsRef<Residues> + Sync,
{
    seqs.par_iter()
        .progress_with_style(progress_common_style())
        .map(|seq| predict(model, seq.as_ref(), params))
        .collect()
}

///
/// Maximal run of a single label in a path
///
/// `start` and `end` are 0-based and inclusive.
///
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Segment {
    pub start: usize,
    pub end: usize,
    pub label: char,
}

impl Segment {
    pub fn group(&self) -> Option<Group> {
        u8::try_from(self.label).ok().and_then(Group::from_label)
    }
    /// name of the group, or the label itself if it is of no group
    pub fn pretty_name(&self) -> String {
        match self.group() {
            Some(group) => group.pretty_name().to_string(),
            None => self.label.to_string(),
        }
    }
}

impl std::fmt::Display for Segment {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{} {} {}", self.start, self.end, self.pretty_name())
    }
}

///
/// Split a path into segments of identical labels
///
pub fn summarize(path: &str) -> Vec<Segment> {
    path.chars()
        .enumerate()
        .group_by(|&(_, label)| label)
        .into_iter()
        .map(|(label, group)| {
            let positions: Vec<usize> = group.map(|(i, _)| i).collect();
            Segment {
                start: positions[0],
                end: positions[positions.len() - 1],
                label,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::model::mocks::*;
    use crate::model::parse_model;

    #[test]
    fn summarize_path() {
        let segments = summarize("iiiMMMMoo");
        assert_eq!(
            segments,
            vec![
                Segment { start: 0, end: 2, label: 'i' },
                Segment { start: 3, end: 6, label: 'M' },
                Segment { start: 7, end: 8, label: 'o' },
            ]
        );
        assert_eq!(segments[1].to_string(), "3 6 transmembrane helix");
        assert!(summarize("").is_empty());
        assert_eq!(summarize("O")[0].to_string(), "0 0 outside");
        assert_eq!(summarize("x")[0].pretty_name(), "x");
    }
    #[test]
    fn predict_two_state() {
        let model = mock_two_state();
        let p = predict(&model, b"MVLS", &PredictParams::default()).unwrap();
        assert_eq!(p.path, "iMMM");
        assert_abs_diff_eq!(p.log_prob, -6.060686016149935, epsilon = 1e-9);
        let posterior = p.posterior.unwrap();
        assert_eq!(posterior.dim(), (4, 3));
        assert_abs_diff_eq!(posterior[[0, 0]], 0.9313038531448156, epsilon = 1e-6);
        // sum over all 16 paths
        assert_abs_diff_eq!(p.log_likelihood.unwrap(), -5.443514251503168, epsilon = 1e-9);

        let p = predict(&model, b"MVLS", &PredictParams::path_only()).unwrap();
        assert_eq!(p.path, "iMMM");
        assert!(p.posterior.is_none());
        assert!(p.log_likelihood.is_none());
    }
    #[test]
    fn predict_hydrophobic_stretch_is_membrane() {
        let model = mock_mini_tmhmm();
        let seq = [&b"KDREKDRE"[..], &[b'L'; 20][..], &b"KDREKDRE"[..]].concat();
        let p = predict(&model, &seq, &PredictParams::default()).unwrap();
        assert_eq!(p.path, "iiiiiiiiMMMMMMMMMMMMMMMMMMMMoooooooo");
        assert_abs_diff_eq!(p.log_prob, -79.51211657391518, epsilon = 1e-6);
        let segments = p.segments();
        assert_eq!(segments.len(), 3);
        assert_eq!(segments[1], Segment { start: 8, end: 27, label: 'M' });

        // membrane is the most probable group in the middle of the helix
        let posterior = p.posterior.unwrap();
        assert!(posterior[[18, 1]] > 0.5);
        for row in posterior.rows() {
            assert_abs_diff_eq!(row.sum(), 1.0, epsilon = 1e-9);
        }
    }
    #[test]
    fn predict_substituted_residue() {
        let model = mock_mini_tmhmm();
        let params = PredictParams::default();
        let a = predict(&model, b"MKBLLVIAZ", &params).unwrap();
        let b = predict(&model, b"MKDLLVIAE", &params).unwrap();
        assert_eq!(a.path, b.path);
        assert_abs_diff_eq!(a.log_prob, b.log_prob);

        // without normalization, B is not in the alphabet
        let params = PredictParams::new(false, false);
        let r = predict(&model, b"MKBL", &params);
        assert!(matches!(r, Err(Error::Input { position: 2, symbol: 'B' })));
    }
    #[test]
    fn predict_impossible_sequence_without_posterior() {
        let (_, model) = parse_model(
            "header { alphabet AB; }
             begin { trans a:1.0; }
             a { trans a:1.0; only A:1.0; label i; }",
        )
        .unwrap();
        let r = predict(&model, b"AB", &PredictParams::path_only());
        assert!(matches!(
            r,
            Err(Error::NumericDegeneracy { position: 1, symbol: 'B' })
        ));
    }
    #[test]
    fn predict_empty() {
        let model = mock_mini_tmhmm();
        let p = predict(&model, b"", &PredictParams::default()).unwrap();
        assert!(p.is_empty());
        assert_eq!(p.log_prob, 0.0);
        assert_eq!(p.posterior.unwrap().nrows(), 0);
    }
    #[test]
    fn predict_batch_isolates_errors() {
        let model = mock_mini_tmhmm();
        let params = PredictParams::new(true, false);
        let seqs = vec![random_protein(100, 0), b"MKJL".to_vec(), random_protein(50, 1)];
        let results = predict_batch(&model, &seqs, &params);
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].as_ref().unwrap().len(), 100);
        assert!(results[1].is_err());
        assert_eq!(results[2].as_ref().unwrap().len(), 50);
        for (seq, result) in seqs.iter().zip(results.iter()) {
            if let Ok(p) = result {
                let q = predict(&model, seq, &params).unwrap();
                assert_eq!(p.path, q.path);
            }
        }
    }
}
