use crate::libs::error::{Error, Result};
use crate::libs::io::read_to_string;

/// Largest |d(i,j) - d(j,i)| tolerated before a matrix is rejected.
pub const SYMMETRY_TOLERANCE: f64 = 1e-9;

/// Named, symmetric distance matrix with a zero diagonal.
///
/// Values are stored row-major in a flat `Vec<f64>`.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    names: Vec<String>,
    values: Vec<f64>,
}

impl DistanceMatrix {
    /// Build a matrix from names and rows, checking names, shape, values,
    /// the zero diagonal and symmetry.
    ///
    /// ```
    /// use phylign::libs::phylo::matrix::DistanceMatrix;
    ///
    /// let names = vec!["A".to_string(), "B".to_string()];
    /// let m = DistanceMatrix::new(names, vec![vec![0.0, 3.0], vec![3.0, 0.0]]).unwrap();
    /// assert_eq!(m.get(0, 1), 3.0);
    /// assert!(DistanceMatrix::new(vec!["A".to_string()], vec![vec![0.0, 1.0]]).is_err());
    /// ```
    pub fn new(names: Vec<String>, rows: Vec<Vec<f64>>) -> Result<Self> {
        let n = names.len();
        if rows.len() != n {
            return Err(Error::Format(format!(
                "distance matrix has {} names but {} rows",
                n,
                rows.len()
            )));
        }
        for (i, name) in names.iter().enumerate() {
            if names[..i].contains(name) {
                return Err(Error::Format(format!("duplicate taxon name '{}'", name)));
            }
        }
        for (i, row) in rows.iter().enumerate() {
            if row.len() != n {
                return Err(Error::Format(format!(
                    "row '{}' has {} values, expected {}",
                    names[i],
                    row.len(),
                    n
                )));
            }
        }

        for i in 0..n {
            for j in 0..n {
                let d = rows[i][j];
                if !d.is_finite() || d < 0.0 {
                    return Err(Error::Format(format!(
                        "invalid distance {} between '{}' and '{}'",
                        d, names[i], names[j]
                    )));
                }
                if i == j && d.abs() > SYMMETRY_TOLERANCE {
                    return Err(Error::Format(format!(
                        "non-zero self-distance {} for '{}'",
                        d, names[i]
                    )));
                }
                if (d - rows[j][i]).abs() > SYMMETRY_TOLERANCE {
                    return Err(Error::Format(format!(
                        "distance matrix is not symmetric at '{}'/'{}'",
                        names[i], names[j]
                    )));
                }
            }
        }

        Ok(Self {
            names,
            values: rows.into_iter().flatten().collect(),
        })
    }

    /// Load a relaxed PHYLIP file: a count line, then one row per taxon holding
    /// the name and `n` whitespace-separated distances.
    pub fn from_relaxed_phylip(infile: &str) -> Result<Self> {
        let text = read_to_string(infile)
            .map_err(|e| Error::Format(format!("cannot read '{}': {}", infile, e)))?;
        Self::parse(&text)
    }

    pub fn parse(text: &str) -> Result<Self> {
        let mut lines = text
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty());

        let header = lines
            .next()
            .ok_or_else(|| Error::Format("empty PHYLIP input".to_string()))?;
        let n: usize = header
            .split_whitespace()
            .next()
            .and_then(|t| t.parse().ok())
            .ok_or_else(|| Error::Format(format!("invalid PHYLIP header '{}'", header)))?;

        let mut names = Vec::with_capacity(n);
        let mut rows = Vec::with_capacity(n);
        for line in lines {
            let mut fields = line.split_whitespace();
            let name = fields.next().unwrap_or_default();
            let row = fields
                .map(|t| {
                    t.parse::<f64>().map_err(|_| {
                        Error::Format(format!("invalid distance '{}' in row '{}'", t, name))
                    })
                })
                .collect::<Result<Vec<_>>>()?;
            names.push(name.to_string());
            rows.push(row);
        }

        if names.len() != n {
            return Err(Error::Format(format!(
                "PHYLIP header declares {} taxa, found {}",
                n,
                names.len()
            )));
        }

        Self::new(names, rows)
    }

    pub fn size(&self) -> usize {
        self.names.len()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.values[i * self.size() + j]
    }

    /// Render as relaxed PHYLIP, tab-separated.
    pub fn to_phylip(&self) -> String {
        let n = self.size();
        let mut out = format!("{}\n", n);
        for (i, name) in self.names.iter().enumerate() {
            out.push_str(name);
            for j in 0..n {
                out.push_str(&format!("\t{}", self.get(i, j)));
            }
            out.push('\n');
        }
        out
    }
}
