//! Depth-limited regression trees with exact greedy splits.
//!
//! Trees are stored as a flat node array. Split search is fully
//! deterministic: features are scanned in ascending index order, candidate
//! thresholds in ascending value order, and a candidate replaces the
//! incumbent only on a strictly better score, so the first best split
//! always wins ties.

use ndarray::{Array1, Array2, ArrayView1};
use serde::{Deserialize, Serialize};

/// Gains below this are treated as no improvement.
const MIN_GAIN: f64 = 1e-12;

/// A node in the flattened tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Node {
    /// Internal decision node; rows with `x[feature] <= threshold` go left.
    Split {
        /// Feature column index.
        feature: usize,
        /// Split threshold (midpoint between adjacent sorted values).
        threshold: f64,
        /// Index of the left child in the node array.
        left: usize,
        /// Index of the right child in the node array.
        right: usize,
    },
    /// Terminal node carrying the mean target of its rows.
    Leaf {
        /// Predicted value.
        value: f64,
    },
}

/// A fitted regression tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tree {
    nodes: Vec<Node>,
}

impl Tree {
    /// Fit a tree to `targets` with at most `max_depth` levels of splits.
    pub fn fit(
        x: &Array2<f64>,
        targets: &Array1<f64>,
        max_depth: usize,
        min_samples_leaf: usize,
    ) -> Self {
        let rows: Vec<usize> = (0..x.nrows()).collect();
        let mut nodes = Vec::new();
        build_node(x, targets, rows, max_depth, min_samples_leaf, &mut nodes);
        Self { nodes }
    }

    /// Predict the value for a single feature row.
    pub fn predict_row(&self, row: ArrayView1<'_, f64>) -> f64 {
        let mut index = 0;
        loop {
            match &self.nodes[index] {
                Node::Leaf { value } => return *value,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    index = if row[*feature] <= *threshold {
                        *left
                    } else {
                        *right
                    };
                }
            }
        }
    }

    /// Number of nodes in the tree.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
}

fn mean_of(targets: &Array1<f64>, rows: &[usize]) -> f64 {
    if rows.is_empty() {
        return 0.0;
    }
    rows.iter().map(|&r| targets[r]).sum::<f64>() / rows.len() as f64
}

struct BestSplit {
    feature: usize,
    threshold: f64,
    score: f64,
    left_rows: Vec<usize>,
    right_rows: Vec<usize>,
}

/// Exact greedy split search over all features and thresholds.
///
/// Score is the reduction in sum of squared errors, expressed as
/// `sum_l^2/n_l + sum_r^2/n_r - total^2/n`, which is non-negative and zero
/// for a useless split.
fn best_split(
    x: &Array2<f64>,
    targets: &Array1<f64>,
    rows: &[usize],
    min_samples_leaf: usize,
) -> Option<BestSplit> {
    let n = rows.len();
    if n < 2 * min_samples_leaf {
        return None;
    }

    let total: f64 = rows.iter().map(|&r| targets[r]).sum();
    let baseline = total * total / n as f64;

    let mut best: Option<BestSplit> = None;

    for feature in 0..x.ncols() {
        let mut order: Vec<usize> = rows.to_vec();
        // Stable sort keeps equal values in row order; NaNs never occur in
        // the assembled matrix, Equal is a safe fallback.
        order.sort_by(|&a, &b| {
            x[[a, feature]]
                .partial_cmp(&x[[b, feature]])
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let mut left_sum = 0.0;
        for split_at in 1..n {
            left_sum += targets[order[split_at - 1]];

            if split_at < min_samples_leaf || n - split_at < min_samples_leaf {
                continue;
            }

            let lower = x[[order[split_at - 1], feature]];
            let upper = x[[order[split_at], feature]];
            if lower >= upper {
                // No threshold separates identical values.
                continue;
            }

            let right_sum = total - left_sum;
            let score = left_sum * left_sum / split_at as f64
                + right_sum * right_sum / (n - split_at) as f64
                - baseline;

            let improves = match &best {
                None => score > MIN_GAIN,
                Some(current) => score > current.score,
            };
            if improves {
                best = Some(BestSplit {
                    feature,
                    threshold: (lower + upper) / 2.0,
                    score,
                    left_rows: order[..split_at].to_vec(),
                    right_rows: order[split_at..].to_vec(),
                });
            }
        }
    }

    best
}

fn build_node(
    x: &Array2<f64>,
    targets: &Array1<f64>,
    rows: Vec<usize>,
    depth_left: usize,
    min_samples_leaf: usize,
    nodes: &mut Vec<Node>,
) -> usize {
    let value = mean_of(targets, &rows);

    if depth_left == 0 {
        nodes.push(Node::Leaf { value });
        return nodes.len() - 1;
    }

    match best_split(x, targets, &rows, min_samples_leaf) {
        None => {
            nodes.push(Node::Leaf { value });
            nodes.len() - 1
        }
        Some(split) => {
            // Reserve the slot before recursing so child indices are known.
            let index = nodes.len();
            nodes.push(Node::Leaf { value });
            let left = build_node(
                x,
                targets,
                split.left_rows,
                depth_left - 1,
                min_samples_leaf,
                nodes,
            );
            let right = build_node(
                x,
                targets,
                split.right_rows,
                depth_left - 1,
                min_samples_leaf,
                nodes,
            );
            nodes[index] = Node::Split {
                feature: split.feature,
                threshold: split.threshold,
                left,
                right,
            };
            index
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    #[test]
    fn test_constant_target_is_a_single_leaf() {
        let x = array![[0.0], [1.0], [2.0]];
        let y = array![5.0, 5.0, 5.0];
        let tree = Tree::fit(&x, &y, 3, 1);
        assert_eq!(tree.node_count(), 1);
        assert_relative_eq!(tree.predict_row(x.row(0)), 5.0);
    }

    #[test]
    fn test_step_function_is_recovered() {
        let x = array![[0.0], [1.0], [2.0], [3.0]];
        let y = array![0.0, 0.0, 10.0, 10.0];
        let tree = Tree::fit(&x, &y, 3, 1);

        assert_relative_eq!(tree.predict_row(x.row(0)), 0.0);
        assert_relative_eq!(tree.predict_row(x.row(1)), 0.0);
        assert_relative_eq!(tree.predict_row(x.row(2)), 10.0);
        assert_relative_eq!(tree.predict_row(x.row(3)), 10.0);
    }

    #[test]
    fn test_depth_zero_yields_mean_leaf() {
        let x = array![[0.0], [1.0]];
        let y = array![2.0, 4.0];
        let tree = Tree::fit(&x, &y, 0, 1);
        assert_eq!(tree.node_count(), 1);
        assert_relative_eq!(tree.predict_row(x.row(0)), 3.0);
    }

    #[test]
    fn test_identical_feature_values_do_not_split() {
        let x = array![[1.0], [1.0], [1.0]];
        let y = array![0.0, 5.0, 10.0];
        let tree = Tree::fit(&x, &y, 4, 1);
        assert_eq!(tree.node_count(), 1);
        assert_relative_eq!(tree.predict_row(x.row(0)), 5.0);
    }

    #[test]
    fn test_min_samples_leaf_is_respected() {
        let x = array![[0.0], [1.0], [2.0], [3.0]];
        let y = array![0.0, 0.0, 0.0, 100.0];
        // A leaf of one row is forbidden, so the 3|1 split may not happen.
        let tree = Tree::fit(&x, &y, 1, 2);
        // Only the 2|2 split is allowed at the root.
        assert_relative_eq!(tree.predict_row(x.row(3)), 50.0);
    }

    #[test]
    fn test_fit_is_deterministic() {
        let x = array![[0.0, 3.0], [1.0, 2.0], [2.0, 1.0], [3.0, 0.0]];
        let y = array![1.0, 2.0, 3.0, 4.0];
        let a = Tree::fit(&x, &y, 3, 1);
        let b = Tree::fit(&x, &y, 3, 1);
        assert_eq!(a, b);
    }
}
