//! Pairwise alignment of two sequences.
//!
//! Three dynamic-programming engines share one cell type and one traceback
//! renderer:
//!
//! * [`Global`] - Needleman-Wunsch with a linear gap penalty.
//! * [`Local`] - Smith-Waterman with a linear gap penalty.
//! * [`Affine`] - Gotoh global alignment with gap open/extend penalties.
//!
//! All engines run in O(n*m) time and space.
//!
//! # Tie-breaking
//!
//! When several moves reach the same best score, the diagonal move is taken
//! first, then the vertical move (residue of `a` against a gap), then the
//! horizontal move (residue of `b` against a gap). In the affine engine the
//! same order applies to the three states M > X > Y.

use crate::libs::error::{Error, Result};
use crate::libs::sub_matrix::SubMatrix;
use std::ops::Range;
use std::str::FromStr;

pub mod affine;
pub mod global;
pub mod local;

pub use affine::Affine;
pub use global::Global;
pub use local::Local;

/// Gap symbol used in aligned output.
pub const GAP: u8 = b'-';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlignMode {
    Global, // Needleman-Wunsch
    Local,  // Smith-Waterman
    Affine, // Gotoh
}

impl FromStr for AlignMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "global" => Ok(AlignMode::Global),
            "local" => Ok(AlignMode::Local),
            "affine" => Ok(AlignMode::Affine),
            _ => Err(Error::Format(format!("unknown alignment mode '{}'", s))),
        }
    }
}

/// Alignment mode plus its gap costs.
///
/// `gap` is used by Global and Local, `gap_open`/`gap_extend` by Affine.
/// Penalties are non-positive by convention; they are added to the score.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlignParams {
    pub mode: AlignMode,
    pub gap: i32,
    pub gap_open: i32,
    pub gap_extend: i32,
}

impl Default for AlignParams {
    fn default() -> Self {
        Self {
            mode: AlignMode::Global,
            gap: -1,
            gap_open: -4,
            gap_extend: -1,
        }
    }
}

impl AlignParams {
    pub fn engine(&self) -> Box<dyn AlignmentEngine + Send + Sync> {
        match self.mode {
            AlignMode::Global => Box::new(Global { gap: self.gap }),
            AlignMode::Local => Box::new(Local { gap: self.gap }),
            AlignMode::Affine => Box::new(Affine {
                open: self.gap_open,
                extend: self.gap_extend,
            }),
        }
    }
}

/// Result of a pairwise alignment.
///
/// Removing [`GAP`] from `aligned_a` yields exactly `a[range_a]`, and likewise
/// for `b`. Global and affine alignments cover the whole inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alignment {
    pub score: i32,
    pub aligned_a: String,
    pub aligned_b: String,
    pub range_a: Range<usize>,
    pub range_b: Range<usize>,
}

impl Alignment {
    /// Number of alignment columns.
    pub fn len(&self) -> usize {
        self.aligned_a.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aligned_a.is_empty()
    }
}

/// Where the value of a DP cell came from.
///
/// In the affine engine the tag names the predecessor's state instead:
/// `Diag` = M, `Up` = X, `Left` = Y.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Origin {
    Diag,
    Up,
    Left,
    /// Local alignment restarts here.
    Start,
    #[default]
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cell {
    pub score: i32,
    pub origin: Origin,
}

impl Cell {
    pub fn new(score: i32, origin: Origin) -> Self {
        Self { score, origin }
    }
}

/// Pick the best of the three candidates; ties resolve Diag > Up > Left.
pub(crate) fn best_of(diag: i32, up: i32, left: i32) -> Cell {
    let mut best = Cell::new(diag, Origin::Diag);
    if up > best.score {
        best = Cell::new(up, Origin::Up);
    }
    if left > best.score {
        best = Cell::new(left, Origin::Left);
    }
    best
}

pub trait AlignmentEngine {
    fn align(&self, matrix: &SubMatrix, a: &[u8], b: &[u8]) -> Result<Alignment>;
}

/// Align `a` and `b` with the engine selected by `params.mode`.
///
/// ```
/// use phylign::libs::align::{align, AlignMode, AlignParams};
/// use phylign::libs::sub_matrix::SubMatrix;
///
/// let m = SubMatrix::load("A C\nA 2 -1\nC -1 2\n").unwrap();
/// let params = AlignParams { mode: AlignMode::Global, ..Default::default() };
/// let aln = align(&params, &m, b"AC", b"AC").unwrap();
/// assert_eq!((aln.aligned_a.as_str(), aln.aligned_b.as_str(), aln.score), ("AC", "AC", 4));
/// ```
pub fn align(params: &AlignParams, matrix: &SubMatrix, a: &[u8], b: &[u8]) -> Result<Alignment> {
    params.engine().align(matrix, a, b)
}

/// Bound on any DP value, leaving room below for the affine engine's -inf.
const SCORE_LIMIT: i64 = (i32::MAX / 4) as i64;

/// Inputs must be non-empty and fully covered by the matrix alphabet.
///
/// Gap penalties and substitution scores must be small enough that no path
/// through the DP matrices can leave the `i32` range.
pub(crate) fn validate(matrix: &SubMatrix, a: &[u8], b: &[u8], penalties: &[i32]) -> Result<()> {
    if a.is_empty() || b.is_empty() {
        return Err(Error::EmptyInput(
            "cannot align a sequence of length 0".to_string(),
        ));
    }
    matrix.check(a)?;
    matrix.check(b)?;

    let largest = penalties
        .iter()
        .map(|p| p.unsigned_abs())
        .chain(std::iter::once(matrix.max_abs_score()))
        .max()
        .unwrap_or(0) as i64;
    let steps = (a.len() + b.len() + 2) as i64;
    if largest.saturating_mul(steps) > SCORE_LIMIT {
        return Err(Error::Format(format!(
            "gap penalties {:?} or substitution scores too large for sequences of length {} and {}",
            penalties,
            a.len(),
            b.len()
        )));
    }
    Ok(())
}

/// Turn a forward list of moves starting at `(i, j)` into aligned strings.
pub(crate) fn render(a: &[u8], b: &[u8], start: (usize, usize), moves: &[Origin], score: i32) -> Alignment {
    let (mut i, mut j) = start;
    let mut out_a = Vec::with_capacity(moves.len());
    let mut out_b = Vec::with_capacity(moves.len());

    for mv in moves {
        match mv {
            Origin::Diag => {
                out_a.push(a[i]);
                out_b.push(b[j]);
                i += 1;
                j += 1;
            }
            Origin::Up => {
                out_a.push(a[i]);
                out_b.push(GAP);
                i += 1;
            }
            Origin::Left => {
                out_a.push(GAP);
                out_b.push(b[j]);
                j += 1;
            }
            Origin::Start | Origin::None => {}
        }
    }

    Alignment {
        score,
        aligned_a: String::from_utf8_lossy(&out_a).into_owned(),
        aligned_b: String::from_utf8_lossy(&out_b).into_owned(),
        range_a: start.0..i,
        range_b: start.1..j,
    }
}
