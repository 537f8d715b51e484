//!
//! Normalization of residues before inference
//!
use crate::common::Sequence;
use crate::error::{Error, Result};
use log::{debug, warn};

/// gap character, removed from the sequence
pub const GAP: u8 = b'-';

/// placeholder of an unknown residue
pub const UNKNOWN: u8 = b'X';

///
/// Substitute of a residue code outside the alphabet
///
/// * `B` (Asx) -> `D`
/// * `Z` (Glx) -> `E`
/// * `X` -> `A`
/// * others -> `X`
///
pub fn substitute(residue: u8) -> u8 {
    match residue {
        b'B' => b'D',
        b'Z' => b'E',
        b'X' => b'A',
        _ => UNKNOWN,
    }
}

///
/// Rewrite every residue outside `alphabet` with its substitute,
/// and drop gaps.
///
/// Fails with `Error::Input` if the substitute is not in the alphabet
/// either.
///
pub fn normalize_sequence(seq: &[u8], alphabet: &[u8]) -> Result<Sequence> {
    let mut normalized = Vec::with_capacity(seq.len());
    let mut n_replaced = 0;
    for (i, &residue) in seq.iter().enumerate() {
        if alphabet.contains(&residue) {
            normalized.push(residue);
            continue;
        }
        n_replaced += 1;
        if residue == GAP {
            continue;
        }
        let s = substitute(residue);
        if !alphabet.contains(&s) {
            return Err(Error::Input {
                position: i,
                symbol: residue as char,
            });
        }
        debug!(
            "residue `{}` in seq[{}] replaced with `{}`",
            residue as char, i, s as char
        );
        normalized.push(s);
    }
    if n_replaced > 0 {
        warn!(
            "{} of {} residues were outside the alphabet",
            n_replaced,
            seq.len()
        );
    }
    Ok(normalized)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::sequence_to_string;
    use test_case::test_case;

    const ALPHABET: &[u8] = b"ACDEFGHIKLMNPQRSTVWYX";

    #[test_case(b"MKLV", b"MKLV" ; "standard residues are kept")]
    #[test_case(b"MBKZ", b"MDKE" ; "ambiguous codes")]
    #[test_case(b"M-K--V", b"MKV" ; "gaps are removed")]
    #[test_case(b"MJOU*", b"MXXXX" ; "unknown residues")]
    #[test_case(b"mk", b"XX" ; "lowercase is unknown")]
    #[test_case(b"", b"" ; "empty")]
    fn normalize(seq: &[u8], expected: &[u8]) {
        let n = normalize_sequence(seq, ALPHABET).unwrap();
        assert_eq!(sequence_to_string(&n), sequence_to_string(expected));
    }
    #[test]
    fn normalize_x_when_alphabet_has_no_placeholder() {
        let n = normalize_sequence(b"AXD", b"ACDE").unwrap();
        assert_eq!(n, b"AAD".to_vec());
        let r = normalize_sequence(b"ACJ", b"ACDE");
        assert!(matches!(r, Err(Error::Input { position: 2, symbol: 'J' })));
    }
}
