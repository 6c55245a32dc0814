use super::{render, validate, Alignment, AlignmentEngine, Cell, Origin};
use crate::libs::error::Result;
use crate::libs::sub_matrix::SubMatrix;

const NEG_INF: i32 = i32::MIN / 4;

/// Gotoh global alignment with affine gap costs.
///
/// Three matrices are filled side by side:
///
/// * `M` - alignment ends with `a[i]` against `b[j]`
/// * `X` - ends with `a[i]` against a gap
/// * `Y` - ends with `b[j]` against a gap
///
/// ```text
/// M[i][j] = max(M, X, Y)[i-1][j-1] + s(a[i], b[j])
/// X[i][j] = max(M[i-1][j] + open, X[i-1][j] + extend, Y[i-1][j] + open)
/// Y[i][j] = max(M[i][j-1] + open, X[i][j-1] + open,   Y[i][j-1] + extend)
/// ```
///
/// Each cell's origin names the state it came from, so the traceback charges
/// a gap run one `open` and then `extend` per extra column.
#[derive(Debug, Clone, Copy)]
pub struct Affine {
    pub open: i32,
    pub extend: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    M,
    X,
    Y,
}

impl State {
    fn from_origin(origin: Origin) -> Option<Self> {
        match origin {
            Origin::Diag => Some(State::M),
            Origin::Up => Some(State::X),
            Origin::Left => Some(State::Y),
            Origin::Start | Origin::None => None,
        }
    }
}

/// Max over the three states, ties going M > X > Y.
fn best_state(m: i32, x: i32, y: i32) -> Cell {
    let mut best = Cell::new(m, Origin::Diag);
    if x > best.score {
        best = Cell::new(x, Origin::Up);
    }
    if y > best.score {
        best = Cell::new(y, Origin::Left);
    }
    best
}

pub struct AffineMatrices {
    pub m: Vec<Vec<Cell>>,
    pub x: Vec<Vec<Cell>>,
    pub y: Vec<Vec<Cell>>,
}

impl Affine {
    pub fn fill(&self, matrix: &SubMatrix, a: &[u8], b: &[u8]) -> AffineMatrices {
        let n = a.len();
        let l = b.len();
        let blank = Cell::new(NEG_INF, Origin::None);
        let mut m = vec![vec![blank; l + 1]; n + 1];
        let mut x = vec![vec![blank; l + 1]; n + 1];
        let mut y = vec![vec![blank; l + 1]; n + 1];

        m[0][0] = Cell::new(0, Origin::None);
        // One open, then one extend per further column
        for i in 1..=n {
            let origin = if i == 1 { Origin::Diag } else { Origin::Up };
            x[i][0] = Cell::new(self.open + (i as i32 - 1) * self.extend, origin);
        }
        for j in 1..=l {
            let origin = if j == 1 { Origin::Diag } else { Origin::Left };
            y[0][j] = Cell::new(self.open + (j as i32 - 1) * self.extend, origin);
        }

        for i in 1..=n {
            for j in 1..=l {
                let s = matrix.get_score(a[i - 1], b[j - 1]);
                let prev = best_state(m[i - 1][j - 1].score, x[i - 1][j - 1].score, y[i - 1][j - 1].score);
                m[i][j] = Cell::new(prev.score + s, prev.origin);

                x[i][j] = best_state(
                    m[i - 1][j].score + self.open,
                    x[i - 1][j].score + self.extend,
                    y[i - 1][j].score + self.open,
                );

                y[i][j] = best_state(
                    m[i][j - 1].score + self.open,
                    x[i][j - 1].score + self.open,
                    y[i][j - 1].score + self.extend,
                );
            }
        }

        AffineMatrices { m, x, y }
    }
}

impl AlignmentEngine for Affine {
    fn align(&self, matrix: &SubMatrix, a: &[u8], b: &[u8]) -> Result<Alignment> {
        validate(matrix, a, b, &[self.open, self.extend])?;
        let mats = self.fill(matrix, a, b);

        let (mut i, mut j) = (a.len(), b.len());
        let end = best_state(mats.m[i][j].score, mats.x[i][j].score, mats.y[i][j].score);
        let score = end.score;
        let mut state = State::from_origin(end.origin);

        let mut moves = Vec::with_capacity(i + j);
        while i > 0 || j > 0 {
            let (mv, cell) = match state {
                Some(State::M) => (Origin::Diag, mats.m[i][j]),
                Some(State::X) => (Origin::Up, mats.x[i][j]),
                Some(State::Y) => (Origin::Left, mats.y[i][j]),
                None => break,
            };
            match mv {
                Origin::Diag => {
                    i -= 1;
                    j -= 1;
                }
                Origin::Up => i -= 1,
                _ => j -= 1,
            }
            moves.push(mv);
            state = State::from_origin(cell.origin);
        }
        moves.reverse();

        Ok(render(a, b, (0, 0), &moves, score))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::libs::align::global::Global;
    use crate::libs::align::tests::{random_dna, rescore};
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};

    fn gap_runs(s: &str) -> usize {
        s.split(|c| c != '-').filter(|run| !run.is_empty()).count()
    }

    #[test]
    fn test_affine_single_gap_run() {
        let m = SubMatrix::dna();
        let aln = Affine { open: -4, extend: -1 }
            .align(&m, b"AAAATTTTCCCC", b"AAAACCCC")
            .unwrap();
        // 8 matches, one gap of 4: 8 - 4 - 3
        assert_eq!(aln.score, 1);
        assert_eq!(aln.aligned_a, "AAAATTTTCCCC");
        assert_eq!(aln.aligned_b, "AAAA----CCCC");
        assert_eq!(gap_runs(&aln.aligned_b), 1);
    }

    #[test]
    fn test_affine_prefers_one_long_gap() {
        // Linear scoring cannot tell one 2-gap from two 1-gaps; affine must
        // choose the single run.
        let m = SubMatrix::load("A C G T\n5 -4 -4 -4\n-4 5 -4 -4\n-4 -4 5 -4\n-4 -4 -4 5\n").unwrap();
        let aln = Affine { open: -10, extend: -1 }
            .align(&m, b"ACGTTACG", b"ACGACG")
            .unwrap();
        assert_eq!(gap_runs(&aln.aligned_b), 1);
        assert_eq!(aln.score, 6 * 5 - 10 - 1);
        assert_eq!(rescore(&aln, &m, -10, -1), aln.score);
    }

    #[test]
    fn test_affine_border_init() {
        let m = SubMatrix::dna();
        let mats = Affine { open: -4, extend: -1 }.fill(&m, b"AAA", b"AA");
        assert_eq!(mats.m[0][0].score, 0);
        assert_eq!(mats.x[1][0].score, -4);
        assert_eq!(mats.x[3][0].score, -6);
        assert_eq!(mats.y[0][2].score, -5);
        assert_eq!(mats.m[1][0].score, NEG_INF);
        assert_eq!(mats.y[1][0].score, NEG_INF);
    }

    #[test]
    fn test_affine_leading_gap() {
        let m = SubMatrix::dna();
        let aln = Affine { open: -4, extend: -1 }.align(&m, b"GGGACGT", b"ACGT").unwrap();
        assert_eq!(aln.aligned_b, "---ACGT");
        assert_eq!(aln.score, 4 - 4 - 2);
    }

    #[test]
    fn test_affine_equal_costs_match_linear() {
        let m = SubMatrix::blosum62();
        let mut rng = SmallRng::seed_from_u64(2024);
        let residues = b"ARNDCQEGHILKMFPSTWYV";
        for _ in 0..30 {
            let la = rng.gen_range(1..25);
            let lb = rng.gen_range(1..25);
            let a: Vec<u8> = (0..la).map(|_| residues[rng.gen_range(0..20)]).collect();
            let b: Vec<u8> = (0..lb).map(|_| residues[rng.gen_range(0..20)]).collect();
            for g in [-1, -4, -8] {
                let linear = Global { gap: g }.align(&m, &a, &b).unwrap();
                let affine = Affine { open: g, extend: g }.align(&m, &a, &b).unwrap();
                assert_eq!(affine.score, linear.score);
            }
        }
    }

    #[test]
    fn test_affine_rescore_random() {
        let m = SubMatrix::dna();
        let mut rng = SmallRng::seed_from_u64(99);
        for _ in 0..40 {
            let la = rng.gen_range(1..30);
            let lb = rng.gen_range(1..30);
            let a = random_dna(&mut rng, la);
            let b = random_dna(&mut rng, lb);
            let aln = Affine { open: -3, extend: -1 }.align(&m, &a, &b).unwrap();
            assert_eq!(rescore(&aln, &m, -3, -1), aln.score);
        }
    }
}
