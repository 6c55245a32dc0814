use super::{best_of, render, validate, Alignment, AlignmentEngine, Cell, Origin};
use crate::libs::error::Result;
use crate::libs::sub_matrix::SubMatrix;

/// Needleman-Wunsch global alignment with a linear gap penalty.
#[derive(Debug, Clone, Copy)]
pub struct Global {
    pub gap: i32,
}

impl Global {
    /// Fill the (n+1)x(m+1) matrix. Row 0 and column 0 hold the cumulative gap cost.
    pub fn fill(&self, matrix: &SubMatrix, a: &[u8], b: &[u8]) -> Vec<Vec<Cell>> {
        let n = a.len();
        let m = b.len();
        let mut dp = vec![vec![Cell::default(); m + 1]; n + 1];

        for i in 1..=n {
            dp[i][0] = Cell::new(self.gap * i as i32, Origin::Up);
        }
        for j in 1..=m {
            dp[0][j] = Cell::new(self.gap * j as i32, Origin::Left);
        }

        for i in 1..=n {
            for j in 1..=m {
                let diag = dp[i - 1][j - 1].score + matrix.get_score(a[i - 1], b[j - 1]);
                let up = dp[i - 1][j].score + self.gap;
                let left = dp[i][j - 1].score + self.gap;
                dp[i][j] = best_of(diag, up, left);
            }
        }

        dp
    }
}

impl AlignmentEngine for Global {
    fn align(&self, matrix: &SubMatrix, a: &[u8], b: &[u8]) -> Result<Alignment> {
        validate(matrix, a, b, &[self.gap])?;
        let dp = self.fill(matrix, a, b);

        // Walk back from the bottom-right corner to the origin
        let (mut i, mut j) = (a.len(), b.len());
        let score = dp[i][j].score;
        let mut moves = Vec::with_capacity(i + j);
        while i > 0 || j > 0 {
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

        Ok(render(a, b, (0, 0), &moves, score))
    }
}
