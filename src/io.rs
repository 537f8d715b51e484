//!
//! Reading sequences and writing prediction artifacts
//!
pub mod fasta;
pub mod output;

pub use fasta::{read_fasta, FastaEntry};
pub use output::write_outputs;
