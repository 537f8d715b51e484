//!
//! FASTA input
//!
use crate::common::{Residues, Sequence};
use crate::error::Result;
use bio::io::fasta;
use log::{info, warn};
use std::collections::HashSet;
use std::fs::File;
use std::path::Path;

///
/// A record of a FASTA file
///
/// header line is `>{id} {description}`
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FastaEntry {
    pub id: String,
    /// everything after the first whitespace of the header (may be empty)
    pub description: String,
    pub sequence: Sequence,
}

impl AsRef<Residues> for FastaEntry {
    fn as_ref(&self) -> &Residues {
        &self.sequence
    }
}

///
/// parse FASTA records from a reader
///
pub fn parse_fasta<R: std::io::Read>(reader: R) -> Result<Vec<FastaEntry>> {
    let reader = fasta::Reader::new(reader);
    let mut entries = Vec::new();
    let mut ids = HashSet::new();
    for result in reader.records() {
        let record = result?;
        if !ids.insert(record.id().to_string()) {
            warn!("duplicated id `{}` in fasta", record.id());
        }
        entries.push(FastaEntry {
            id: record.id().to_string(),
            description: record.desc().unwrap_or("").to_string(),
            sequence: record.seq().to_vec(),
        });
    }
    Ok(entries)
}

///
/// load FASTA file
///
pub fn read_fasta<P: AsRef<Path>>(path: P) -> Result<Vec<FastaEntry>> {
    let entries = parse_fasta(File::open(path.as_ref())?)?;
    info!(
        "read {} sequences from {}",
        entries.len(),
        path.as_ref().display()
    );
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn fasta_parse() {
        let text = b">sp|P1 first protein\nMKLV\nAAIL\n>p2\nMDE\n";
        let entries = parse_fasta(&text[..]).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].id, "sp|P1");
        assert_eq!(entries[0].description, "first protein");
        assert_eq!(entries[0].sequence, b"MKLVAAIL".to_vec());
        assert_eq!(entries[1].id, "p2");
        assert_eq!(entries[1].description, "");
        assert_eq!(entries[1].sequence, b"MDE".to_vec());
        assert_eq!(entries[1].as_ref(), b"MDE");
    }
    #[test]
    fn fasta_read_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("seqs.fa");
        let mut file = File::create(&path).unwrap();
        writeln!(file, ">a desc\nMKL").unwrap();
        drop(file);
        let entries = read_fasta(&path).unwrap();
        assert_eq!(entries[0].sequence, b"MKL".to_vec());

        let r = read_fasta(dir.path().join("missing.fa"));
        assert!(matches!(r, Err(crate::error::Error::Io(_))));
    }
}
