use super::{best_of, render, validate, Alignment, AlignmentEngine, Cell, Origin};
use crate::libs::error::Result;
use crate::libs::sub_matrix::SubMatrix;

/// Smith-Waterman local alignment with a linear gap penalty.
///
/// Cells are floored at zero and marked [`Origin::Start`] when they reset.
/// The alignment ends at the highest cell (first one in row-major order on ties)
/// and extends back to the nearest start cell.
#[derive(Debug, Clone, Copy)]
pub struct Local {
    pub gap: i32,
}

impl Local {
    /// Fill the matrix and return it with the position of its maximum.
    pub fn fill(&self, matrix: &SubMatrix, a: &[u8], b: &[u8]) -> (Vec<Vec<Cell>>, (usize, usize)) {
        let n = a.len();
        let m = b.len();
        let mut dp = vec![vec![Cell::new(0, Origin::Start); m + 1]; n + 1];

        let mut best = (0, 0);
        let mut best_score = 0;
        for i in 1..=n {
            for j in 1..=m {
                let diag = dp[i - 1][j - 1].score + matrix.get_score(a[i - 1], b[j - 1]);
                let up = dp[i - 1][j].score + self.gap;
                let left = dp[i][j - 1].score + self.gap;

                let cell = best_of(diag, up, left);
                dp[i][j] = if cell.score > 0 {
                    cell
                } else {
                    Cell::new(0, Origin::Start)
                };

                if dp[i][j].score > best_score {
                    best_score = dp[i][j].score;
                    best = (i, j);
                }
            }
        }

        (dp, best)
    }
}

impl AlignmentEngine for Local {
    fn align(&self, matrix: &SubMatrix, a: &[u8], b: &[u8]) -> Result<Alignment> {
        validate(matrix, a, b, &[self.gap])?;
        let (dp, (mut i, mut j)) = self.fill(matrix, a, b);
        let score = dp[i][j].score;

        let mut moves = vec![];
        loop {
            let origin = dp[i][j].origin;
            match origin {
                Origin::Diag => {
                    i -= 1;
                    j -= 1;
                }
                Origin::Up => i -= 1,
                Origin::Left => j -= 1,
                Origin::Start | Origin::None => break,
            }
            moves.push(origin);
        }
        moves.reverse();

        Ok(render(a, b, (i, j), &moves, score))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::libs::align::global::Global;
    use crate::libs::align::tests::TINY;

    #[test]
    fn test_local_single_residue() {
        let m = SubMatrix::load(TINY).unwrap();
        let aln = Local { gap: -1 }.align(&m, b"AC", b"CA").unwrap();
        assert_eq!(aln.score, 2);
        // A/A at (1,2) comes before C/C at (2,1) in row-major order
        assert_eq!(aln.aligned_a, "A");
        assert_eq!(aln.aligned_b, "A");
        assert_eq!(aln.range_a, 0..1);
        assert_eq!(aln.range_b, 1..2);

        // a forced full-length alignment does worse
        let global = Global { gap: -1 }.align(&m, b"AC", b"CA").unwrap();
        assert!(global.score < aln.score);
    }

    #[test]
    fn test_local_substring() {
        let m = SubMatrix::dna();
        let aln = Local { gap: -2 }.align(&m, b"TTTTACGTACGTTTTT", b"GGACGTACGGG").unwrap();
        assert_eq!(aln.aligned_a, "ACGTACG");
        assert_eq!(aln.aligned_b, "ACGTACG");
        assert_eq!(aln.score, 7);
        assert_eq!(aln.range_a, 4..11);
        assert_eq!(aln.range_b, 2..9);
    }

    #[test]
    fn test_local_with_gap() {
        let m = SubMatrix::load("A C G T\n5 -4 -4 -4\n-4 5 -4 -4\n-4 -4 5 -4\n-4 -4 -4 5\n").unwrap();
        let aln = Local { gap: -3 }.align(&m, b"GGACGTTT", b"ACGATT").unwrap();
        // ACG-TT vs ACGATT: 5 matches, one gap
        assert_eq!(aln.aligned_a, "ACG-TT");
        assert_eq!(aln.aligned_b, "ACGATT");
        assert_eq!(aln.score, 5 * 5 - 3);
    }

    #[test]
    fn test_local_no_positive_cell() {
        let m = SubMatrix::dna();
        let aln = Local { gap: -1 }.align(&m, b"AAAA", b"CCC").unwrap();
        assert_eq!(aln.score, 0);
        assert!(aln.is_empty());
        assert_eq!(aln.range_a, 0..0);
        assert_eq!(aln.range_b, 0..0);
    }

    #[test]
    fn test_local_fill_floors_at_zero() {
        let m = SubMatrix::dna();
        let (dp, best) = Local { gap: -1 }.fill(&m, b"AC", b"GA");
        assert!(dp.iter().flatten().all(|c| c.score >= 0));
        assert_eq!(best, (1, 2));
        assert_eq!(dp[1][1], Cell::new(0, Origin::Start));
    }
}
