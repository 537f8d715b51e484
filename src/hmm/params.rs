///
/// Parameters of a prediction run
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PredictParams {
    /// run forward/backward and compute the group posterior table
    pub compute_posterior: bool,
    /// rewrite residues outside the alphabet before decoding
    pub normalize: bool,
}

impl PredictParams {
    pub fn new(compute_posterior: bool, normalize: bool) -> PredictParams {
        PredictParams {
            compute_posterior,
            normalize,
        }
    }
    /// Viterbi path only
    pub fn path_only() -> PredictParams {
        PredictParams::new(false, true)
    }
}

impl Default for PredictParams {
    fn default() -> PredictParams {
        PredictParams::new(true, true)
    }
}

impl std::fmt::Display for PredictParams {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        writeln!(f, "compute_posterior: {}", self.compute_posterior)?;
        writeln!(f, "normalize: {}", self.normalize)
    }
}
