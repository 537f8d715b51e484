//!
//! Mock models and sequences for testing
//!
use super::Model;
use crate::common::Sequence;
use rand::prelude::*;
use rand_xoshiro::Xoshiro256PlusPlus;

///
/// Two states (`in` labelled `i`, `mem` labelled `M`) over `MVLSX`.
///
/// ```text
/// initial     in=0.8 mem=0.2
/// in  -> in 0.6, mem 0.4   emits M .5 V .2 L .1 S .1 X .1
/// mem -> in 0.1, mem 0.9   emits M .1 V .3 L .3 S .2 X .1
/// ```
///
pub const TWO_STATE: &str = "\
# two state toy model
header {
alphabet MVLSX;
}
begin {
trans in:0.8 mem:0.2;
}
in {
trans in:0.6 mem:0.4;
only M:0.5 V:0.2 L:0.1 S:0.1 X:0.1;
label i;
}
mem {
trans in:0.1 mem:0.9;
only M:0.1 V:0.3 L:0.3 S:0.2 X:0.1;
label M;
}
";

///
/// Small topology model in the TMHMM layout over the 20 amino acids and `X`.
///
/// ```text
///           +-----------------------------------+
///           v                                   |
/// begin -> in -> hin1 -> hin2 -> hin3* -> out* -> hout1 -> hout2 -> hout3*
///                                          ^ |
///                                          | v
///                                        outglob*
/// ```
///
/// `*` marks self loops. Helix states share one hydrophobic emission
/// distribution and their transitions through `tied_trans`/`tied_letter`.
///
pub const MINI_TMHMM: &str = "\
# toy topology model
header {
alphabet ACDEFGHIKLMNPQRSTVWYX;
begin in;
}
begin {
trans in:0.6 out:0.4;
type 0;
end 0;
letter NULL;
}
in {
trans in:0.95 hin1:0.05;
only A:0.05 C:0.01 D:0.08 E:0.08 F:0.02 G:0.06 H:0.03 I:0.02 K:0.1 L:0.04
 M:0.01 N:0.06 P:0.07 Q:0.06 R:0.1 S:0.08 T:0.06 V:0.02 W:0.01 Y:0.03 X:0.01;
label i;
end 1;
}
hin1 {
trans hin2:1.0;
only A:0.1 C:0.02 D:0.005 E:0.005 F:0.1 G:0.06 H:0.005 I:0.14 K:0.005 L:0.2
 M:0.04 N:0.005 P:0.01 Q:0.005 R:0.005 S:0.04 T:0.04 V:0.16 W:0.02 Y:0.02 X:0.015;
label M;
}
hin2 {
tied_trans hin1;
trans hin3;
tied_letter hin1;
label M;
}
hin3 {
trans hin3:0.9 out:0.1;
tied_letter hin1;
label M;
}
out {
trans out:0.9 outglob:0.05 hout1:0.05;
tied_letter in;
label o;
end 1;
}
outglob {
trans outglob:0.9 out:0.1;
tied_letter in;
label O;
}
hout1 {
tied_trans hin1;
trans hout2;
tied_letter hin1;
label M;
}
hout2 {
tied_trans hin1;
trans hout3;
tied_letter hin1;
label M;
}
hout3 {
tied_trans hin3;
trans hout3 in;
tied_letter hin1;
label M;
}
";

///
/// `TWO_STATE` in matrix form
///
pub fn mock_two_state() -> Model {
    TWO_STATE.parse().expect("TWO_STATE is a valid model")
}

///
/// `MINI_TMHMM` in matrix form
///
pub fn mock_mini_tmhmm() -> Model {
    MINI_TMHMM.parse().expect("MINI_TMHMM is a valid model")
}

/// The 20 standard amino acids
pub const AMINO_ACIDS: &[u8; 20] = b"ACDEFGHIKLMNPQRSTVWY";

///
/// generate random amino acids of given length from seed
///
pub fn random_protein(length: usize, seed: u64) -> Sequence {
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
    (0..length)
        .map(|_| AMINO_ACIDS[rng.gen_range(0..AMINO_ACIDS.len())])
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_protein_is_reproducible() {
        let a = random_protein(50, 0);
        let b = random_protein(50, 0);
        assert_eq!(a.len(), 50);
        assert_eq!(a, b);
        assert_ne!(a, random_protein(50, 1));
        assert!(a.iter().all(|c| AMINO_ACIDS.contains(c)));
    }
}
