//! All-pairs alignment scores.
//!
//! [`ScoreMatrixBuilder`] aligns every unordered pair of sequences on a rayon
//! pool. Jobs return `(i, j, score)` and the caller thread writes them into the
//! matrix by index, so the result does not depend on scheduling.

use crate::libs::align::{AlignParams, AlignmentEngine};
use crate::libs::error::{Error, Result};
use crate::libs::phylo::matrix::DistanceMatrix;
use crate::libs::seq::Sequence;
use crate::libs::sub_matrix::SubMatrix;
use itertools::Itertools;
use rayon::prelude::*;
use std::collections::HashSet;

/// Symmetric matrix of pairwise alignment scores.
///
/// The diagonal holds each sequence's self-alignment score.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreMatrix {
    names: Vec<String>,
    scores: Vec<i32>,
}

impl ScoreMatrix {
    pub fn size(&self) -> usize {
        self.names.len()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn get(&self, i: usize, j: usize) -> i32 {
        self.scores[i * self.size() + j]
    }

    fn set(&mut self, i: usize, j: usize, score: i32) {
        let n = self.size();
        self.scores[i * n + j] = score;
        self.scores[j * n + i] = score;
    }

    /// Relaxed PHYLIP layout: the count, then one tab-separated row per name.
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

    /// Turn similarities into distances: `d(i,j) = (S(i,i) + S(j,j)) / 2 - S(i,j)`.
    ///
    /// Negative values, which only an unusual matrix can produce, become 0.
    pub fn to_distance(&self) -> Result<DistanceMatrix> {
        let n = self.size();
        let mut rows = vec![vec![0.0; n]; n];
        for i in 0..n {
            for j in (i + 1)..n {
                let raw = (self.get(i, i) as f64 + self.get(j, j) as f64) / 2.0
                    - self.get(i, j) as f64;
                let d = if raw < 0.0 {
                    tracing::warn!(
                        a = %self.names[i],
                        b = %self.names[j],
                        raw,
                        "negative distance clamped to 0"
                    );
                    0.0
                } else {
                    raw
                };
                rows[i][j] = d;
                rows[j][i] = d;
            }
        }
        DistanceMatrix::new(self.names.clone(), rows)
    }
}

/// Computes a [`ScoreMatrix`] from a set of sequences.
///
/// ```
/// use phylign::libs::align::AlignParams;
/// use phylign::libs::score_matrix::ScoreMatrixBuilder;
/// use phylign::libs::seq::Sequence;
/// use phylign::libs::sub_matrix::SubMatrix;
///
/// let m = SubMatrix::dna();
/// let params = AlignParams::default();
/// let seqs = vec![Sequence::new("a", "ACGT"), Sequence::new("b", "ACGA")];
/// let scores = ScoreMatrixBuilder::new(&m, &params).threads(1).build(&seqs).unwrap();
/// assert_eq!(scores.get(0, 1), 2);
/// assert_eq!(scores.get(1, 1), 4);
/// ```
pub struct ScoreMatrixBuilder<'a> {
    matrix: &'a SubMatrix,
    params: &'a AlignParams,
    threads: usize,
}

impl<'a> ScoreMatrixBuilder<'a> {
    pub fn new(matrix: &'a SubMatrix, params: &'a AlignParams) -> Self {
        Self {
            matrix,
            params,
            threads: 0,
        }
    }

    /// Number of worker threads; 0 uses all available cores.
    pub fn threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    pub fn build(&self, seqs: &[Sequence]) -> Result<ScoreMatrix> {
        if seqs.len() < 2 {
            return Err(Error::EmptyInput(format!(
                "a score matrix needs at least 2 sequences, got {}",
                seqs.len()
            )));
        }
        let mut seen = HashSet::new();
        for s in seqs {
            if !seen.insert(s.name()) {
                return Err(Error::Format(format!(
                    "duplicate sequence name '{}'",
                    s.name()
                )));
            }
        }

        let n = seqs.len();
        // self-pairs fill the diagonal
        let jobs: Vec<(usize, usize)> = (0..n)
            .map(|i| (i, i))
            .chain((0..n).tuple_combinations())
            .collect();
        tracing::debug!(sequences = n, jobs = jobs.len(), threads = self.threads, "score matrix");

        let engine = self.params.engine();
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.threads)
            .build()?;
        let results: Vec<(usize, usize, i32)> = pool.install(|| {
            jobs.par_iter()
                .map(|&(i, j)| {
                    let (a, b) = (&seqs[i], &seqs[j]);
                    engine
                        .align(self.matrix, a.seq(), b.seq())
                        .map(|aln| (i, j, aln.score))
                        .map_err(|e| Error::PairFailed {
                            a: a.name().to_string(),
                            b: b.name().to_string(),
                            source: Box::new(e),
                        })
                })
                .collect::<Result<Vec<_>>>()
        })?;

        let mut scores = ScoreMatrix {
            names: seqs.iter().map(|s| s.name().to_string()).collect(),
            scores: vec![0; n * n],
        };
        for (i, j, score) in results {
            scores.set(i, j, score);
        }

        Ok(scores)
    }
}
