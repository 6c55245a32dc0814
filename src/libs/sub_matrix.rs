use crate::libs::error::{Error, Result};
use std::fmt::Write as _;

/// A symmetric residue substitution matrix.
///
/// Scores are stored in a flat 256x256 table indexed by byte, with every case
/// combination of each symbol filled in, so lookups are case-insensitive.
#[derive(Debug, Clone, PartialEq)]
pub struct SubMatrix {
    symbols: Vec<u8>,
    matrix: Vec<i32>,
    known: Vec<bool>,
}

const BLOSUM62_SYMBOLS: &[u8] = b"ARNDCQEGHILKMFPSTWYVBZX*";

#[rustfmt::skip]
const BLOSUM62: [[i32; 24]; 24] = [
    [ 4, -1, -2, -2,  0, -1, -1,  0, -2, -1, -1, -1, -1, -2, -1,  1,  0, -3, -2,  0, -2, -1,  0, -4],
    [-1,  5,  0, -2, -3,  1,  0, -2,  0, -3, -2,  2, -1, -3, -2, -1, -1, -3, -2, -3, -1,  0, -1, -4],
    [-2,  0,  6,  1, -3,  0,  0,  0,  1, -3, -3,  0, -2, -3, -2,  1,  0, -4, -2, -3,  3,  0, -1, -4],
    [-2, -2,  1,  6, -3,  0,  2, -1, -1, -3, -4, -1, -3, -3, -1,  0, -1, -4, -3, -3,  4,  1, -1, -4],
    [ 0, -3, -3, -3,  9, -3, -4, -3, -3, -1, -1, -3, -1, -2, -3, -1, -1, -2, -2, -1, -3, -3, -2, -4],
    [-1,  1,  0,  0, -3,  5,  2, -2,  0, -3, -2,  1,  0, -3, -1,  0, -1, -2, -1, -2,  0,  3, -1, -4],
    [-1,  0,  0,  2, -4,  2,  5, -2,  0, -3, -3,  1, -2, -3, -1,  0, -1, -3, -2, -2,  1,  4, -1, -4],
    [ 0, -2,  0, -1, -3, -2, -2,  6, -2, -4, -4, -2, -3, -3, -2,  0, -2, -2, -3, -3, -1, -2, -1, -4],
    [-2,  0,  1, -1, -3,  0,  0, -2,  8, -3, -3, -1, -2, -1, -2, -1, -2, -2,  2, -3,  0,  0, -1, -4],
    [-1, -3, -3, -3, -1, -3, -3, -4, -3,  4,  2, -3,  1,  0, -3, -2, -1, -3, -1,  3, -3, -3, -1, -4],
    [-1, -2, -3, -4, -1, -2, -3, -4, -3,  2,  4, -2,  2,  0, -3, -2, -1, -2, -1,  1, -4, -3, -1, -4],
    [-1,  2,  0, -1, -3,  1,  1, -2, -1, -3, -2,  5, -1, -3, -1,  0, -1, -3, -2, -2,  0,  1, -1, -4],
    [-1, -1, -2, -3, -1,  0, -2, -3, -2,  1,  2, -1,  5,  0, -2, -1, -1, -1, -1,  1, -3, -1, -1, -4],
    [-2, -3, -3, -3, -2, -3, -3, -3, -1,  0,  0, -3,  0,  6, -4, -2, -2,  1,  3, -1, -3, -3, -1, -4],
    [-1, -2, -2, -1, -3, -1, -1, -2, -2, -3, -3, -1, -2, -4,  7, -1, -1, -4, -3, -2, -2, -1, -2, -4],
    [ 1, -1,  1,  0, -1,  0,  0,  0, -1, -2, -2,  0, -1, -2, -1,  4,  1, -3, -2, -2,  0,  0,  0, -4],
    [ 0, -1,  0, -1, -1, -1, -1, -2, -2, -1, -1, -1, -1, -2, -1,  1,  5, -2, -2,  0, -1, -1,  0, -4],
    [-3, -3, -4, -4, -2, -2, -3, -2, -2, -3, -2, -3, -1,  1, -4, -3, -2, 11,  2, -3, -4, -3, -2, -4],
    [-2, -2, -2, -3, -2, -1, -2, -3,  2, -1, -1, -2, -1,  3, -3, -2, -2,  2,  7, -1, -3, -2, -1, -4],
    [ 0, -3, -3, -3, -1, -2, -2, -3, -3,  3,  1, -2,  1, -1, -2, -2,  0, -3, -1,  4, -3, -2, -1, -4],
    [-2, -1,  3,  4, -3,  0,  1, -1,  0, -3, -4,  0, -3, -3, -2,  0, -1, -4, -3, -3,  4,  1, -1, -4],
    [-1,  0,  0,  1, -3,  3,  4, -2,  0, -3, -3,  1, -1, -3, -1,  0, -1, -3, -2, -2,  1,  4, -1, -4],
    [ 0, -1, -1, -1, -2, -1, -1, -1, -1, -1, -1, -1, -1, -1, -2,  0,  0, -2, -1, -1, -1, -1, -1, -4],
    [-4, -4, -4, -4, -4, -4, -4, -4, -4, -4, -4, -4, -4, -4, -4, -4, -4, -4, -4, -4, -4, -4, -4,  1],
];

impl SubMatrix {
    /// Build from a symbol list and a square table in the same order.
    /// Callers guarantee the shape.
    fn from_table<R: AsRef<[i32]>>(symbols: &[u8], rows: &[R]) -> Self {
        let mut matrix = vec![0; 256 * 256];
        let mut known = vec![false; 256];

        for (i, &r) in symbols.iter().enumerate() {
            for (j, &c) in symbols.iter().enumerate() {
                let score = rows[i].as_ref()[j];

                // Fill matrix for all case combinations
                for rr in [r.to_ascii_uppercase(), r.to_ascii_lowercase()] {
                    for cc in [c.to_ascii_uppercase(), c.to_ascii_lowercase()] {
                        matrix[(rr as usize) * 256 + (cc as usize)] = score;
                    }
                }
            }
            known[r.to_ascii_uppercase() as usize] = true;
            known[r.to_ascii_lowercase() as usize] = true;
        }

        SubMatrix {
            symbols: symbols.to_vec(),
            matrix,
            known,
        }
    }

    /// The standard BLOSUM62 protein matrix, including the ambiguity codes `B Z X`
    /// and the stop `*`.
    pub fn blosum62() -> Self {
        Self::from_table(BLOSUM62_SYMBOLS, &BLOSUM62)
    }

    /// A plain nucleotide matrix: match 1, mismatch -1 over `A C G T`.
    pub fn dna() -> Self {
        let bases = b"ACGT";
        let rows: Vec<Vec<i32>> = (0..bases.len())
            .map(|i| {
                (0..bases.len())
                    .map(|j| if i == j { 1 } else { -1 })
                    .collect()
            })
            .collect();
        Self::from_table(bases, &rows)
    }

    /// Load from name (preset) or file.
    ///
    /// ```
    /// use phylign::libs::sub_matrix::SubMatrix;
    /// let m = SubMatrix::from_name("BLOSUM62").unwrap();
    /// assert_eq!(m.score(b'W', b'W').unwrap(), 11);
    /// let m = SubMatrix::from_name("dna").unwrap();
    /// assert_eq!(m.score(b'a', b'C').unwrap(), -1);
    /// ```
    pub fn from_name(name: &str) -> Result<Self> {
        match name.to_lowercase().as_str() {
            "blosum62" => Ok(Self::blosum62()),
            "dna" => Ok(Self::dna()),
            _ => Self::from_file(name),
        }
    }

    /// Load a substitution matrix from a file. `.gz` files are accepted.
    pub fn from_file(path: &str) -> Result<Self> {
        let text = crate::libs::io::read_to_string(path)
            .map_err(|e| Error::Format(format!("cannot read matrix file {}: {}", path, e)))?;
        Self::load(&text)
    }

    /// Parse a substitution matrix in the BLAST/BLOSUM text layout.
    ///
    /// The first meaningful line lists the column symbols. It is followed by one
    /// row per symbol, optionally prefixed with the row's symbol. Lines starting
    /// with '#' are comments. The table must be square and symmetric.
    ///
    /// ```
    /// use phylign::libs::sub_matrix::SubMatrix;
    /// let m = SubMatrix::load("# tiny\n   A  C\nA  2 -1\nC -1  2\n").unwrap();
    /// assert_eq!(m.symbols(), b"AC");
    /// assert_eq!(m.score(b'c', b'C').unwrap(), 2);
    /// assert!(SubMatrix::load("A C\nA 2 x\nC -1 2\n").is_err());
    /// ```
    pub fn load(text: &str) -> Result<Self> {
        let mut symbols: Option<Vec<u8>> = None;
        let mut rows: Vec<Vec<i32>> = vec![];

        for (lineno, line) in text.lines().enumerate() {
            let lineno = lineno + 1;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let parts: Vec<&str> = line.split_whitespace().collect();

            let header = match &symbols {
                None => {
                    symbols = Some(parse_header(&parts, lineno)?);
                    continue;
                }
                Some(header) => header,
            };

            let n = header.len();
            if rows.len() == n {
                return Err(Error::Format(format!(
                    "line {}: more rows than the {} header symbols",
                    lineno, n
                )));
            }

            let values = if parts.len() == n + 1 {
                let label = parts[0].as_bytes();
                let expected = header[rows.len()];
                if label.len() != 1 || !label[0].eq_ignore_ascii_case(&expected) {
                    return Err(Error::Format(format!(
                        "line {}: row label '{}' does not match header symbol '{}'",
                        lineno, parts[0], expected as char
                    )));
                }
                &parts[1..]
            } else if parts.len() == n {
                &parts[..]
            } else {
                return Err(Error::Format(format!(
                    "line {}: row has {} values, expected {}",
                    lineno,
                    parts.len(),
                    n
                )));
            };

            let row = values
                .iter()
                .map(|v| {
                    v.parse::<i32>().map_err(|_| {
                        Error::Format(format!("line {}: '{}' is not an integer score", lineno, v))
                    })
                })
                .collect::<Result<Vec<i32>>>()?;
            rows.push(row);
        }

        let symbols = symbols.ok_or_else(|| Error::Format("no header line found".to_string()))?;
        if rows.len() != symbols.len() {
            return Err(Error::Format(format!(
                "found {} rows for {} header symbols",
                rows.len(),
                symbols.len()
            )));
        }

        for i in 0..symbols.len() {
            for j in (i + 1)..symbols.len() {
                if rows[i][j] != rows[j][i] {
                    return Err(Error::Format(format!(
                        "matrix is not symmetric: {}/{} = {} but {}/{} = {}",
                        symbols[i] as char,
                        symbols[j] as char,
                        rows[i][j],
                        symbols[j] as char,
                        symbols[i] as char,
                        rows[j][i]
                    )));
                }
            }
        }

        Ok(Self::from_table(&symbols, &rows))
    }

    /// Get the substitution score for two residues.
    pub fn score(&self, a: u8, b: u8) -> Result<i32> {
        for c in [a, b] {
            if !self.contains(c) {
                return Err(Error::UnknownSymbol { symbol: c as char });
            }
        }
        Ok(self.get_score(a, b))
    }

    /// Table lookup without the alphabet check; unknown bytes score 0.
    /// Only for residues already accepted by [`SubMatrix::check`].
    pub(crate) fn get_score(&self, a: u8, b: u8) -> i32 {
        self.matrix[(a as usize) * 256 + (b as usize)]
    }

    /// Largest absolute substitution score in the table.
    pub(crate) fn max_abs_score(&self) -> u32 {
        self.matrix.iter().map(|v| v.unsigned_abs()).max().unwrap_or(0)
    }

    /// Verify every residue of `seq` belongs to the alphabet.
    pub fn check(&self, seq: &[u8]) -> Result<()> {
        match seq.iter().find(|&&c| !self.contains(c)) {
            Some(&c) => Err(Error::UnknownSymbol { symbol: c as char }),
            None => Ok(()),
        }
    }

    pub fn contains(&self, c: u8) -> bool {
        self.known[c as usize]
    }

    /// Header symbols in file order.
    pub fn symbols(&self) -> &[u8] {
        &self.symbols
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Render in the same layout [`SubMatrix::load`] accepts.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        out.push(' ');
        for &c in &self.symbols {
            let _ = write!(out, " {:>3}", c as char);
        }
        out.push('\n');

        for &r in &self.symbols {
            out.push(r as char);
            for &c in &self.symbols {
                let _ = write!(out, " {:>3}", self.get_score(r, c));
            }
            out.push('\n');
        }
        out
    }
}

fn parse_header(parts: &[&str], lineno: usize) -> Result<Vec<u8>> {
    let mut symbols: Vec<u8> = vec![];
    for p in parts {
        let bytes = p.as_bytes();
        if bytes.len() != 1 || !bytes[0].is_ascii_graphic() {
            return Err(Error::Format(format!(
                "line {}: header token '{}' is not a single symbol",
                lineno, p
            )));
        }
        if symbols.iter().any(|s| s.eq_ignore_ascii_case(&bytes[0])) {
            return Err(Error::Format(format!(
                "line {}: duplicate header symbol '{}'",
                lineno, p
            )));
        }
        symbols.push(bytes[0].to_ascii_uppercase());
    }
    Ok(symbols)
}
