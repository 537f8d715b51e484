//!
//! Shared types: sequences and topology groups
//!
use serde::Serialize;

/// Type of protein sequence (one ASCII byte per residue)
pub type Sequence = Vec<u8>;

/// Type of residues as array
///
/// It is used in `AsRef<Residues>` or `&Residues`
pub type Residues = [u8];

/// Convert a sequence into &str
/// useful in displaying
pub fn sequence_to_string<T: AsRef<Residues> + ?Sized>(seq: &T) -> &str {
    std::str::from_utf8(seq.as_ref()).unwrap_or("<non-utf8>")
}

///
/// Topology group that several HMM states are collapsed into.
///
/// A state label belongs to a group if the lowercased label equals
/// the group code, so `M` and `m` are both `Membrane`.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum Group {
    Inside,
    Membrane,
    Outside,
}

/// All groups, in the column order of posterior tables
pub const GROUPS: [Group; 3] = [Group::Inside, Group::Membrane, Group::Outside];

impl Group {
    /// single-letter group code
    pub fn code(&self) -> u8 {
        match self {
            Group::Inside => b'i',
            Group::Membrane => b'm',
            Group::Outside => b'o',
        }
    }
    /// column of this group in a posterior table
    pub fn column(&self) -> usize {
        match self {
            Group::Inside => 0,
            Group::Membrane => 1,
            Group::Outside => 2,
        }
    }
    ///
    /// group of a state label, case-insensitive.
    /// `None` if the label is none of `i`, `m`, `o`.
    ///
    pub fn from_label(label: u8) -> Option<Group> {
        match label.to_ascii_lowercase() {
            b'i' => Some(Group::Inside),
            b'm' => Some(Group::Membrane),
            b'o' => Some(Group::Outside),
            _ => None,
        }
    }
    /// name used in summary files
    pub fn pretty_name(&self) -> &'static str {
        match self {
            Group::Inside => "inside",
            Group::Membrane => "transmembrane helix",
            Group::Outside => "outside",
        }
    }
    /// column name used in posterior files
    pub fn column_name(&self) -> &'static str {
        match self {
            Group::Inside => "inside",
            Group::Membrane => "membrane",
            Group::Outside => "outside",
        }
    }
}

impl std::fmt::Display for Group {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.code() as char)
    }
}
