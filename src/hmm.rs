//!
//! Inference on a `Model`
//!
//! # Overview of calculation
//!
//! x = x[0],...,x[n-1] : observations (alphabet column indices) of length n
//!
//! Viterbi (log space)
//! V[t][j]
//!  = max over paths of log P(emits x[0:t+1] and ends at j)
//!
//! Forward (scaled)
//! F[t][j]
//!  = P(emits x[0:t+1] and ends at j) / (c[0] ... c[t])
//!
//! where `c[t]` is the sum of the unscaled row, so each row of F sums to 1
//! and `P(x) = c[0] ... c[n-1]`.
//!
//! Backward (scaled with the same constants)
//! B[t][j]
//!  = P(emits x[t+1:n] | in j at t) / (c[t] ... c[n-1])
//!
//! Posterior
//! P(in j at t | x) = F[t][j] B[t][j] c[t]
//!
//! Group probabilities (inside / membrane / outside) are sums of posteriors
//! over the states of each group, renormalized per position.
//!
pub mod backward;
pub mod forward;
pub mod params;
pub mod posterior;
pub mod viterbi;

pub use forward::ForwardResult;
pub use params::PredictParams;
pub use posterior::HMMOutput;
pub use viterbi::ViterbiResult;
