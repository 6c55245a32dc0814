use crate::libs::error::{Error, Result};

/// A named run of residues (nucleotides or amino acids).
///
/// Residues are kept exactly as given; scoring is case-insensitive, and aligned
/// output reproduces the original bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sequence {
    name: String,
    seq: Vec<u8>,
}

impl Sequence {
    /// ```
    /// use phylign::libs::seq::Sequence;
    /// let s = Sequence::new("human", "ACGTac");
    /// assert_eq!(s.name(), "human");
    /// assert_eq!(s.len(), 6);
    /// assert_eq!(s.seq(), b"ACGTac");
    /// ```
    pub fn new(name: impl Into<String>, seq: impl AsRef<[u8]>) -> Self {
        Self {
            name: name.into(),
            seq: seq.as_ref().to_vec(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn seq(&self) -> &[u8] {
        &self.seq
    }

    pub fn len(&self) -> usize {
        self.seq.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seq.is_empty()
    }
}

/// Read all records of a FASTA file.
///
/// `infile` may be `stdin` or a `.gz` file. Whitespace inside sequence lines is
/// dropped by the FASTA reader; names are the first word of the definition line.
pub fn read_fasta(infile: &str) -> Result<Vec<Sequence>> {
    let reader = crate::reader(infile)?;
    let mut fa_in = noodles_fasta::io::Reader::new(reader);

    let mut seqs = vec![];
    for result in fa_in.records() {
        let record = result?;
        let name = String::from_utf8(record.name().into())
            .map_err(|e| Error::Format(format!("non UTF-8 sequence name: {}", e)))?;
        let seq = record
            .sequence()
            .get(..)
            .ok_or_else(|| Error::Format(format!("unreadable sequence '{}'", name)))?;

        seqs.push(Sequence::new(name, seq));
    }

    Ok(seqs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_fasta() {
        let seqs = read_fasta("tests/fasta/globins.fa").unwrap();
        assert_eq!(seqs.len(), 4);
        assert_eq!(seqs[0].name(), "HBA_HUMAN");
        assert!(seqs.iter().all(|s| !s.is_empty()));
    }

    #[test]
    fn test_read_fasta_multiline() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("multi.fa");
        std::fs::write(&path, ">a desc\nAC\nGT\n>b\nTT\n").unwrap();

        let seqs = read_fasta(path.to_str().unwrap()).unwrap();
        assert_eq!(seqs.len(), 2);
        assert_eq!(seqs[0].name(), "a");
        assert_eq!(seqs[0].seq(), b"ACGT");
        assert_eq!(seqs[1].seq(), b"TT");
    }
}
