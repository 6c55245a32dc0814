use super::matrix::DistanceMatrix;
use super::node::NodeId;
use super::tree::Tree;
use super::writer::write_newick;
use crate::libs::error::{Error, Result};
use crate::libs::score_matrix::ScoreMatrix;

/// A negative branch length that neighbor-joining clamped to zero.
///
/// Non-additive input (e.g. scores turned into distances with an unusual
/// substitution matrix) can make the NJ length formula go negative.
#[derive(Debug, Clone, PartialEq)]
pub struct Degeneracy {
    /// Join number, starting at 0
    pub step: usize,
    /// Node whose branch was clamped
    pub node: NodeId,
    /// Value before clamping
    pub raw: f64,
}

/// Build a tree from a distance matrix using the Neighbor-Joining algorithm.
///
/// The result is the usual unrooted NJ tree: the last internal node created
/// is the root and holds three children. Two taxa give a root with two leaves
/// at half the distance each.
///
/// ```
/// use phylign::libs::phylo::{build, matrix::DistanceMatrix, writer};
///
/// let m = DistanceMatrix::parse("3\nA 0 3 4\nB 3 0 5\nC 4 5 0\n").unwrap();
/// let tree = build::nj(&m).unwrap();
/// assert_eq!(writer::write_newick(&tree), "(A:1,B:2,C:3);");
/// ```
pub fn nj(matrix: &DistanceMatrix) -> Result<Tree> {
    let (tree, _) = nj_with_report(matrix)?;
    Ok(tree)
}

/// Same as [`nj`], also returning every branch length clamped to zero.
pub fn nj_with_report(matrix: &DistanceMatrix) -> Result<(Tree, Vec<Degeneracy>)> {
    let names = matrix.names();
    let n = names.len();
    if n < 2 {
        return Err(Error::EmptyInput(format!(
            "neighbor-joining needs at least 2 taxa, got {}",
            n
        )));
    }

    let mut tree = Tree::new();
    let mut degeneracies = vec![];

    // Live set: positions index both `live` and `dist`
    let mut live: Vec<NodeId> = names.iter().map(|name| tree.add_leaf(name.as_str())).collect();
    let mut dist: Vec<Vec<f64>> = (0..n)
        .map(|i| (0..n).map(|j| matrix.get(i, j)).collect())
        .collect();

    let mut step = 0;
    while live.len() > 2 {
        let k = live.len();
        let r: Vec<f64> = dist.iter().map(|row| row.iter().sum()).collect();

        // Minimum Q; strict `<` keeps the lowest (i, j) on ties
        let mut pair = (0, 1);
        let mut min_q = f64::INFINITY;
        for i in 0..k {
            for j in (i + 1)..k {
                let q = (k - 2) as f64 * dist[i][j] - r[i] - r[j];
                if q < min_q {
                    min_q = q;
                    pair = (i, j);
                }
            }
        }

        let (i, j) = pair;
        let dij = dist[i][j];
        let len_i = dij / 2.0 + (r[i] - r[j]) / (2.0 * (k - 2) as f64);
        let len_j = dij - len_i;

        let u = tree.add_node();
        for (child, raw) in [(live[i], len_i), (live[j], len_j)] {
            let length = clamp_length(step, child, raw, &mut degeneracies);
            tree.add_child_with_length(u, child, length)
                .map_err(Error::Format)?;
        }
        tracing::debug!(step, i = live[i], j = live[j], u, len_i, len_j, "join");

        // u takes i's slot, j is retired
        let du: Vec<f64> = (0..k)
            .map(|m| {
                if m == i || m == j {
                    0.0
                } else {
                    (dist[i][m] + dist[j][m] - dij) / 2.0
                }
            })
            .collect();
        for m in 0..k {
            dist[i][m] = du[m];
            dist[m][i] = du[m];
        }
        dist.remove(j);
        for row in dist.iter_mut() {
            row.remove(j);
        }
        live[i] = u;
        live.remove(j);

        step += 1;
    }

    let (a, b) = (live[0], live[1]);
    let both_leaves = a < n && b < n;
    let root = if both_leaves {
        let root = tree.add_node();
        let half = clamp_length(step, a, dist[0][1] / 2.0, &mut degeneracies);
        tree.add_child_with_length(root, a, half).map_err(Error::Format)?;
        tree.add_child_with_length(root, b, half).map_err(Error::Format)?;
        root
    } else {
        // Node ids grow with creation order
        let (root, other) = if a > b { (a, b) } else { (b, a) };
        let length = clamp_length(step, other, dist[0][1], &mut degeneracies);
        tree.add_child_with_length(root, other, length)
            .map_err(Error::Format)?;
        root
    };
    tree.set_root(root);

    Ok((tree, degeneracies))
}

fn clamp_length(step: usize, node: NodeId, raw: f64, degeneracies: &mut Vec<Degeneracy>) -> f64 {
    if raw < 0.0 {
        tracing::warn!(step, node, raw, "negative branch length clamped to 0");
        degeneracies.push(Degeneracy { step, node, raw });
        0.0
    } else {
        raw
    }
}

/// Convert alignment scores to distances, join them and serialize the tree.
pub fn newick_from_scores(scores: &ScoreMatrix) -> Result<String> {
    let distances = scores.to_distance()?;
    let tree = nj(&distances)?;
    Ok(write_newick(&tree))
}
