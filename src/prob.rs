//!
//! probability calculation in log space
//!
//! Viterbi scores are kept as `Prob`, so that products over hundreds of
//! residues never underflow.
//!

///
/// Wrapper of f64 that represents probability `0 <= p <= 1`
/// by its natural logarithm.
///
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct Prob(f64);

impl Prob {
    ///
    /// `p = 0` becomes `log p = -inf`
    ///
    pub fn from_prob(value: f64) -> Prob {
        Prob(value.ln())
    }
    ///
    /// Get the log probability
    pub fn to_log_value(self) -> f64 {
        self.0
    }
    ///
    /// Is `p == 0` or not? (log p = -inf)
    ///
    pub fn is_zero(self) -> bool {
        self.0.is_infinite() && self.0.is_sign_negative()
    }
    ///
    /// prob=0.0
    ///
    pub fn zero() -> Prob {
        Prob(f64::NEG_INFINITY)
    }
}

/// Multiplication of two probabilities `px * py` in log space
///
/// ```text
/// log(px * py) = log(px) + log(py)
/// ```
impl std::ops::Mul for Prob {
    type Output = Self;
    fn mul(self, other: Self) -> Self {
        Prob(self.0 + other.0)
    }
}
