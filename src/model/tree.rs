use crate::pollutant::Pollutant;

use super::FeatureRecord;

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum TreeNode {
    Split {
        feature: Pollutant,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf(f64),
}

/// Validated regression tree; every child index points past its parent, so walks terminate.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Tree {
    nodes: Vec<TreeNode>,
}

impl Tree {
    pub(crate) fn new(nodes: Vec<TreeNode>) -> Self {
        Self { nodes }
    }

    pub(crate) fn predict(&self, record: &FeatureRecord) -> f64 {
        let mut index = 0;
        loop {
            match self.nodes.get(index) {
                Some(TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                }) => {
                    index = if record.get(*feature) <= *threshold {
                        *left
                    } else {
                        *right
                    };
                }
                Some(TreeNode::Leaf(value)) => return *value,
                None => return 0.0,
            }
        }
    }
}
