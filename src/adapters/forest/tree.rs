//! CART decision tree used as the forest's weak learner.
//!
//! Splits on Gini impurity with midpoint thresholds. Nodes hold index sets
//! into the shared training slice, so bootstrap samples never copy rows.

use serde::{Deserialize, Serialize};

use crate::domain::FeatureVector;

/// Internal decision node with a split condition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    /// Index of the feature to split on
    pub feature_idx: usize,
    /// Threshold value for the split
    pub threshold: f32,
    /// Left subtree (samples where feature <= threshold)
    pub left: Box<TreeNode>,
    /// Right subtree (samples where feature > threshold)
    pub right: Box<TreeNode>,
}

/// Leaf node with a class prediction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Leaf {
    /// Predicted churn class (0 or 1)
    pub class_label: u8,
    /// Number of training samples in this leaf
    pub n_samples: usize,
}

/// A node in a decision tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum TreeNode {
    Node(Node),
    Leaf(Leaf),
}

/// Binary classification tree over encoded customer features.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionTree {
    root: Option<TreeNode>,
    max_depth: Option<usize>,
}

impl DecisionTree {
    pub fn new(max_depth: Option<usize>) -> Self {
        Self {
            root: None,
            max_depth,
        }
    }

    /// Fit the tree on the rows of `x`/`y` selected by `indices`.
    ///
    /// `indices` may contain duplicates (bootstrap samples do). An empty
    /// index set yields a class-0 leaf.
    pub fn fit(&mut self, x: &[FeatureVector], y: &[u8], indices: Vec<usize>) {
        self.root = Some(build_tree(x, y, indices, 0, self.max_depth));
    }

    /// Predicted class for one sample, or `None` before `fit`.
    pub fn predict(&self, vector: &FeatureVector) -> Option<u8> {
        let mut node = self.root.as_ref()?;
        loop {
            match node {
                TreeNode::Leaf(leaf) => return Some(leaf.class_label),
                TreeNode::Node(internal) => {
                    node = if vector.get(internal.feature_idx) <= internal.threshold {
                        &internal.left
                    } else {
                        &internal.right
                    };
                }
            }
        }
    }
}

/// Gini impurity from binary label counts: 1 - p0² - p1².
fn gini_from_counts(n: u32, yes: u32) -> f32 {
    if n == 0 {
        return 0.0;
    }
    let p = yes as f32 / n as f32;
    1.0 - p * p - (1.0 - p) * (1.0 - p)
}

/// Weighted Gini impurity of splitting `indices` on `feature <= threshold`.
///
/// Returns `None` when the split leaves one side empty.
fn split_impurity(
    x: &[FeatureVector],
    y: &[u8],
    indices: &[usize],
    feature: usize,
    threshold: f32,
) -> Option<f32> {
    let (mut left_n, mut left_yes, mut right_n, mut right_yes) = (0u32, 0u32, 0u32, 0u32);

    for &i in indices {
        if x[i].get(feature) <= threshold {
            left_n += 1;
            left_yes += u32::from(y[i]);
        } else {
            right_n += 1;
            right_yes += u32::from(y[i]);
        }
    }

    if left_n == 0 || right_n == 0 {
        return None;
    }

    let n = (left_n + right_n) as f32;
    let weight_left = left_n as f32 / n;
    let weight_right = right_n as f32 / n;

    Some(
        weight_left * gini_from_counts(left_n, left_yes)
            + weight_right * gini_from_counts(right_n, right_yes),
    )
}

/// Best (feature, threshold) over all features and candidate midpoints,
/// or `None` when no split improves on the parent impurity.
fn find_best_split(x: &[FeatureVector], y: &[u8], indices: &[usize]) -> Option<(usize, f32)> {
    let yes = indices.iter().filter(|&&i| y[i] == 1).count() as u32;
    let parent = gini_from_counts(indices.len() as u32, yes);

    let mut best_gain = 0.0f32;
    let mut best: Option<(usize, f32)> = None;

    for feature in 0..FeatureVector::LEN {
        let mut values: Vec<f32> = indices.iter().map(|&i| x[i].get(feature)).collect();
        values.sort_by(f32::total_cmp);
        values.dedup();

        for pair in values.windows(2) {
            let threshold = (pair[0] + pair[1]) / 2.0;
            if let Some(impurity) = split_impurity(x, y, indices, feature, threshold) {
                let gain = parent - impurity;
                if gain > best_gain {
                    best_gain = gain;
                    best = Some((feature, threshold));
                }
            }
        }
    }

    best
}

/// Majority-class leaf. Ties predict class 0 (no churn).
fn leaf(n: usize, yes: usize) -> TreeNode {
    TreeNode::Leaf(Leaf {
        class_label: u8::from(yes * 2 > n),
        n_samples: n,
    })
}

fn build_tree(
    x: &[FeatureVector],
    y: &[u8],
    indices: Vec<usize>,
    depth: usize,
    max_depth: Option<usize>,
) -> TreeNode {
    let n = indices.len();
    let yes = indices.iter().filter(|&&i| y[i] == 1).count();

    // Pure node or depth cap: stop growing.
    if n == 0 || yes == 0 || yes == n || max_depth.is_some_and(|d| depth >= d) {
        return leaf(n, yes);
    }

    match find_best_split(x, y, &indices) {
        None => leaf(n, yes),
        Some((feature_idx, threshold)) => {
            let (left_indices, right_indices): (Vec<usize>, Vec<usize>) = indices
                .into_iter()
                .partition(|&i| x[i].get(feature_idx) <= threshold);

            TreeNode::Node(Node {
                feature_idx,
                threshold,
                left: Box::new(build_tree(x, y, left_indices, depth + 1, max_depth)),
                right: Box::new(build_tree(x, y, right_indices, depth + 1, max_depth)),
            })
        }
    }
}
