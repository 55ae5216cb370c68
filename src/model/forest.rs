// Random forest inference
//
// Trees are stored as flat node arrays with index links, which serializes
// cleanly to JSON and walks without recursion. The forest averages the
// normalized leaf class distributions of its trees.

use serde::{Deserialize, Serialize};

/// One node of a decision tree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TreeNode {
    /// Internal split: go left when feature value <= threshold.
    Split {
        feature: usize,
        threshold: f32,
        left: usize,
        right: usize,
    },
    /// Terminal node carrying per-class sample weights.
    Leaf { class_weights: [f32; 2] },
}

/// A single decision tree as a flat node array; node 0 is the root.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DecisionTree {
    pub nodes: Vec<TreeNode>,
}

impl DecisionTree {
    /// Walk the tree for one standardized feature row, returning the
    /// normalized class distribution of the reached leaf.
    ///
    /// Index links are validated at load time; a malformed link found
    /// anyway terminates the walk with a uniform distribution rather than
    /// panicking mid-request.
    pub fn class_distribution(&self, values: &[f32]) -> [f32; 2] {
        let mut index = 0usize;
        // Bounded by node count: a well-formed tree reaches a leaf first.
        for _ in 0..=self.nodes.len() {
            match self.nodes.get(index) {
                Some(TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                }) => {
                    let value = values.get(*feature).copied().unwrap_or(0.0);
                    index = if value <= *threshold { *left } else { *right };
                }
                Some(TreeNode::Leaf { class_weights }) => {
                    return normalize(*class_weights);
                }
                None => break,
            }
        }
        [0.5, 0.5]
    }

    /// Highest feature index referenced by any split.
    pub fn max_feature_index(&self) -> Option<usize> {
        self.nodes
            .iter()
            .filter_map(|node| match node {
                TreeNode::Split { feature, .. } => Some(*feature),
                TreeNode::Leaf { .. } => None,
            })
            .max()
    }

    /// True when every child index points inside the node array.
    pub fn links_in_bounds(&self) -> bool {
        self.nodes.iter().all(|node| match node {
            TreeNode::Split { left, right, .. } => {
                *left < self.nodes.len() && *right < self.nodes.len()
            }
            TreeNode::Leaf { .. } => true,
        })
    }
}

fn normalize(weights: [f32; 2]) -> [f32; 2] {
    let total = weights[0] + weights[1];
    if total > 0.0 {
        [weights[0] / total, weights[1] / total]
    } else {
        [0.5, 0.5]
    }
}

/// Random forest: averaged tree distributions plus global feature
/// importances fitted at training time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RandomForest {
    pub trees: Vec<DecisionTree>,
    pub feature_importances: Vec<f32>,
}

impl RandomForest {
    /// Class probabilities for one standardized feature row.
    ///
    /// The mean of the per-tree normalized leaf distributions; sums to 1
    /// whenever the forest has at least one tree.
    pub fn predict_proba(&self, values: &[f32]) -> [f32; 2] {
        if self.trees.is_empty() {
            return [0.5, 0.5];
        }
        let mut sums = [0.0f32; 2];
        for tree in &self.trees {
            let distribution = tree.class_distribution(values);
            sums[0] += distribution[0];
            sums[1] += distribution[1];
        }
        let n = self.trees.len() as f32;
        [sums[0] / n, sums[1] / n]
    }

    /// Predicted class label: the argmax of the probabilities, preferring
    /// class 0 on an exact tie.
    pub fn predict(&self, values: &[f32]) -> u8 {
        let proba = self.predict_proba(values);
        if proba[1] > proba[0] {
            1
        } else {
            0
        }
    }
}
