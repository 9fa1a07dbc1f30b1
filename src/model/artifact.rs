//! On-disk model format and its validated, ready-to-score form.
//!
//! ```json
//! {
//!   "format_version": 1,
//!   "model_id": "aqi_linear_v1",
//!   "features": ["CO", "CO2", "NO2", "SO2", "O3", "PM2.5", "PM10"],
//!   "model": { "kind": "linear", "intercept": 4.0, "coefficients": { "CO": 0.01, ... } }
//! }
//! ```
//!
//! `kind: "tree_ensemble"` stores regression trees as flat node arrays; see [`TreeSpec`].

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::pollutant::Pollutant;

use super::tree::{Tree, TreeNode};
use super::{FeatureRecord, ModelLoadError, PredictionError, Predictor};

/// Only supported artifact format.
pub const ARTIFACT_FORMAT_VERSION: i64 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub format_version: i64,
    #[serde(default)]
    pub model_id: Option<String>,
    /// Column names the model was trained on.
    pub features: Vec<String>,
    pub model: ModelSpec,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelSpec {
    Linear(LinearSpec),
    TreeEnsemble(TreeEnsembleSpec),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearSpec {
    pub intercept: f64,
    /// One weight per entry of `features`.
    pub coefficients: BTreeMap<String, f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeEnsembleSpec {
    #[serde(default)]
    pub combine: Combine,
    #[serde(default)]
    pub base_score: f64,
    #[serde(default = "default_learning_rate")]
    pub learning_rate: f64,
    pub trees: Vec<TreeSpec>,
}

/// How tree outputs are merged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Combine {
    /// `base_score + mean(trees)`, as in a random forest.
    #[default]
    Mean,
    /// `base_score + learning_rate * sum(trees)`, as in gradient boosting.
    Sum,
}

/// Regression tree as a flat node array rooted at index 0.
///
/// Child indices must point strictly past their parent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeSpec {
    pub nodes: Vec<NodeSpec>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeSpec {
    /// `value <= threshold` goes left.
    Split {
        feature: String,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        value: f64,
    },
}

fn default_learning_rate() -> f64 {
    1.0
}

/// Validation failure not yet tied to a file.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum ArtifactIssue {
    Corrupt(String),
    Schema(String),
}

impl ArtifactIssue {
    pub(crate) fn at(self, path: &Path) -> ModelLoadError {
        let path = path.to_path_buf();
        match self {
            ArtifactIssue::Corrupt(reason) => ModelLoadError::ArtifactCorrupt { path, reason },
            ArtifactIssue::Schema(reason) => ModelLoadError::SchemaMismatch { path, reason },
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Scorer {
    Linear {
        intercept: f64,
        weights: Vec<(Pollutant, f64)>,
    },
    Trees {
        combine: Combine,
        base_score: f64,
        learning_rate: f64,
        trees: Vec<Tree>,
    },
}

/// Validated model ready for inference.
#[derive(Debug, Clone, PartialEq)]
pub struct AqiModel {
    model_id: Option<String>,
    features: Vec<Pollutant>,
    scorer: Scorer,
}

impl AqiModel {
    /// Validate an artifact and resolve its feature names.
    pub(crate) fn compile(artifact: ModelArtifact) -> Result<Self, ArtifactIssue> {
        if artifact.format_version != ARTIFACT_FORMAT_VERSION {
            return Err(ArtifactIssue::Corrupt(format!(
                "unsupported format_version {} (expected {ARTIFACT_FORMAT_VERSION})",
                artifact.format_version
            )));
        }
        let features = resolve_features(&artifact.features)?;
        let known: HashSet<Pollutant> = features.iter().copied().collect();
        let lookup = |name: &str| -> Result<Pollutant, ArtifactIssue> {
            Pollutant::from_column_name(name)
                .filter(|pollutant| known.contains(pollutant))
                .ok_or_else(|| {
                    ArtifactIssue::Schema(format!("'{name}' is not one of the model features"))
                })
        };

        let scorer = match artifact.model {
            ModelSpec::Linear(spec) => {
                if !spec.intercept.is_finite() {
                    return Err(ArtifactIssue::Corrupt("intercept is not finite".into()));
                }
                for name in spec.coefficients.keys() {
                    lookup(name)?;
                }
                let weights = features
                    .iter()
                    .map(|pollutant| {
                        let weight = spec
                            .coefficients
                            .get(pollutant.column_name())
                            .copied()
                            .ok_or_else(|| {
                                ArtifactIssue::Schema(format!("no coefficient for {pollutant}"))
                            })?;
                        if !weight.is_finite() {
                            return Err(ArtifactIssue::Corrupt(format!(
                                "coefficient for {pollutant} is not finite"
                            )));
                        }
                        Ok((*pollutant, weight))
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                Scorer::Linear {
                    intercept: spec.intercept,
                    weights,
                }
            }
            ModelSpec::TreeEnsemble(spec) => {
                if spec.trees.is_empty() {
                    return Err(ArtifactIssue::Corrupt("ensemble has no trees".into()));
                }
                if !spec.base_score.is_finite() || !spec.learning_rate.is_finite() {
                    return Err(ArtifactIssue::Corrupt(
                        "base_score and learning_rate must be finite".into(),
                    ));
                }
                let trees = spec
                    .trees
                    .iter()
                    .enumerate()
                    .map(|(index, tree)| compile_tree(index, tree, &lookup))
                    .collect::<Result<Vec<_>, _>>()?;
                Scorer::Trees {
                    combine: spec.combine,
                    base_score: spec.base_score,
                    learning_rate: spec.learning_rate,
                    trees,
                }
            }
        };

        Ok(Self {
            model_id: artifact.model_id,
            features,
            scorer,
        })
    }

    pub fn model_id(&self) -> Option<&str> {
        self.model_id.as_deref()
    }
}

impl Predictor for AqiModel {
    fn features(&self) -> &[Pollutant] {
        &self.features
    }

    fn predict(&self, record: &FeatureRecord) -> Result<f64, PredictionError> {
        if let Some(pollutant) = record.first_non_finite(&self.features) {
            return Err(PredictionError::NonFiniteInput(pollutant));
        }
        let score = match &self.scorer {
            Scorer::Linear { intercept, weights } => weights
                .iter()
                .fold(*intercept, |acc, (pollutant, weight)| {
                    acc + weight * record.get(*pollutant)
                }),
            Scorer::Trees {
                combine,
                base_score,
                learning_rate,
                trees,
            } => {
                let total: f64 = trees.iter().map(|tree| tree.predict(record)).sum();
                match combine {
                    Combine::Mean => base_score + total / trees.len() as f64,
                    Combine::Sum => base_score + learning_rate * total,
                }
            }
        };
        if score.is_finite() {
            Ok(score)
        } else {
            Err(PredictionError::NonFiniteScore)
        }
    }

    /// Model id (when set) and the kind of regressor.
    fn describe(&self) -> String {
        let kind = match &self.scorer {
            Scorer::Linear { .. } => "linear regression".to_string(),
            Scorer::Trees { trees, combine, .. } => {
                let combine = match combine {
                    Combine::Mean => "averaged",
                    Combine::Sum => "boosted",
                };
                format!("{} {combine} regression trees", trees.len())
            }
        };
        match &self.model_id {
            Some(id) => format!("{id} ({kind})"),
            None => kind,
        }
    }
}

fn resolve_features(names: &[String]) -> Result<Vec<Pollutant>, ArtifactIssue> {
    if names.is_empty() {
        return Err(ArtifactIssue::Schema("feature list is empty".into()));
    }
    let mut seen = HashSet::new();
    names
        .iter()
        .map(|name| {
            let pollutant = Pollutant::from_column_name(name)
                .ok_or_else(|| ArtifactIssue::Schema(format!("unknown feature '{name}'")))?;
            if !seen.insert(pollutant) {
                return Err(ArtifactIssue::Schema(format!("duplicate feature '{name}'")));
            }
            Ok(pollutant)
        })
        .collect()
}

fn compile_tree(
    tree_index: usize,
    tree: &TreeSpec,
    lookup: &dyn Fn(&str) -> Result<Pollutant, ArtifactIssue>,
) -> Result<Tree, ArtifactIssue> {
    let corrupt = |message: String| ArtifactIssue::Corrupt(format!("tree {tree_index}: {message}"));
    if tree.nodes.is_empty() {
        return Err(corrupt("has no nodes".into()));
    }
    let len = tree.nodes.len();
    let nodes = tree
        .nodes
        .iter()
        .enumerate()
        .map(|(index, node)| match node {
            NodeSpec::Split {
                feature,
                threshold,
                left,
                right,
            } => {
                let child_ok = |child: usize| child > index && child < len;
                if !child_ok(*left) || !child_ok(*right) {
                    return Err(corrupt(format!("node {index} has an invalid child index")));
                }
                if !threshold.is_finite() {
                    return Err(corrupt(format!("node {index} threshold is not finite")));
                }
                Ok(TreeNode::Split {
                    feature: lookup(feature)?,
                    threshold: *threshold,
                    left: *left,
                    right: *right,
                })
            }
            NodeSpec::Leaf { value } => {
                if !value.is_finite() {
                    return Err(corrupt(format!("node {index} leaf value is not finite")));
                }
                Ok(TreeNode::Leaf(*value))
            }
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Tree::new(nodes))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_features() -> Vec<String> {
        Pollutant::ALL
            .iter()
            .map(|p| p.column_name().to_string())
            .collect()
    }

    fn linear(intercept: f64, weights: &[(&str, f64)]) -> ModelArtifact {
        ModelArtifact {
            format_version: ARTIFACT_FORMAT_VERSION,
            model_id: Some("test".into()),
            features: weights.iter().map(|(name, _)| name.to_string()).collect(),
            model: ModelSpec::Linear(LinearSpec {
                intercept,
                coefficients: weights
                    .iter()
                    .map(|(name, w)| (name.to_string(), *w))
                    .collect(),
            }),
        }
    }

    #[test]
    fn linear_model_scores_weighted_sum() {
        let model = AqiModel::compile(linear(1.0, &[("PM2.5", 2.0), ("O3", 0.5)])).unwrap();
        let record = FeatureRecord::default();
        let score = model.predict(&record).unwrap();
        assert_eq!(score, 1.0 + 2.0 * 17.0 + 0.5 * 60.0);
        assert_eq!(model.features(), &[Pollutant::Pm25, Pollutant::O3]);
    }

    #[test]
    fn unknown_feature_is_schema_mismatch() {
        let err = AqiModel::compile(linear(0.0, &[("Benzene", 1.0)])).unwrap_err();
        assert!(matches!(err, ArtifactIssue::Schema(_)));
    }

    #[test]
    fn coefficient_outside_feature_list_is_schema_mismatch() {
        let mut artifact = linear(0.0, &[("CO", 1.0)]);
        if let ModelSpec::Linear(spec) = &mut artifact.model {
            spec.coefficients.insert("NO2".into(), 1.0);
        }
        let err = AqiModel::compile(artifact).unwrap_err();
        assert_eq!(
            err,
            ArtifactIssue::Schema("'NO2' is not one of the model features".into())
        );
    }

    #[test]
    fn missing_coefficient_is_schema_mismatch() {
        let mut artifact = linear(0.0, &[("CO", 1.0)]);
        artifact.features.push("SO2".into());
        let err = AqiModel::compile(artifact).unwrap_err();
        assert_eq!(err, ArtifactIssue::Schema("no coefficient for SO2".into()));
    }

    #[test]
    fn wrong_format_version_is_corrupt() {
        let mut artifact = linear(0.0, &[("CO", 1.0)]);
        artifact.format_version = 7;
        assert!(matches!(
            AqiModel::compile(artifact),
            Err(ArtifactIssue::Corrupt(_))
        ));
    }

    #[test]
    fn tree_ensemble_parses_and_scores() {
        let json = r#"{
            "format_version": 1,
            "features": ["CO", "CO2", "NO2", "SO2", "O3", "PM2.5", "PM10"],
            "model": {
                "kind": "tree_ensemble",
                "combine": "mean",
                "trees": [
                    { "nodes": [
                        { "split": { "feature": "PM2.5", "threshold": 20.0, "left": 1, "right": 2 } },
                        { "leaf": { "value": 40.0 } },
                        { "leaf": { "value": 140.0 } }
                    ] },
                    { "nodes": [ { "leaf": { "value": 60.0 } } ] }
                ]
            }
        }"#;
        let artifact: ModelArtifact = serde_json::from_str(json).unwrap();
        assert_eq!(artifact.features, all_features());
        let model = AqiModel::compile(artifact).unwrap();

        let clean = FeatureRecord::default();
        assert_eq!(model.predict(&clean).unwrap(), 50.0);
        let smoky = clean.with(Pollutant::Pm25, 80.0);
        assert_eq!(model.predict(&smoky).unwrap(), 100.0);
        assert_eq!(model.describe(), "2 averaged regression trees");
    }

    #[test]
    fn boosted_trees_sum_with_learning_rate() {
        let artifact = ModelArtifact {
            format_version: 1,
            model_id: None,
            features: vec!["CO".into()],
            model: ModelSpec::TreeEnsemble(TreeEnsembleSpec {
                combine: Combine::Sum,
                base_score: 10.0,
                learning_rate: 0.5,
                trees: vec![
                    TreeSpec {
                        nodes: vec![NodeSpec::Leaf { value: 4.0 }],
                    },
                    TreeSpec {
                        nodes: vec![NodeSpec::Leaf { value: 6.0 }],
                    },
                ],
            }),
        };
        let model = AqiModel::compile(artifact).unwrap();
        assert_eq!(model.predict(&FeatureRecord::default()).unwrap(), 15.0);
    }

    #[test]
    fn backwards_child_index_is_corrupt() {
        let artifact = ModelArtifact {
            format_version: 1,
            model_id: None,
            features: vec!["CO".into()],
            model: ModelSpec::TreeEnsemble(TreeEnsembleSpec {
                combine: Combine::Mean,
                base_score: 0.0,
                learning_rate: 1.0,
                trees: vec![TreeSpec {
                    nodes: vec![
                        NodeSpec::Split {
                            feature: "CO".into(),
                            threshold: 1.0,
                            left: 0,
                            right: 1,
                        },
                        NodeSpec::Leaf { value: 1.0 },
                    ],
                }],
            }),
        };
        let err = AqiModel::compile(artifact).unwrap_err();
        assert_eq!(
            err,
            ArtifactIssue::Corrupt("tree 0: node 0 has an invalid child index".into())
        );
    }

    #[test]
    fn non_finite_input_is_rejected() {
        let model = AqiModel::compile(linear(0.0, &[("CO", 1.0)])).unwrap();
        let record = FeatureRecord::default().with(Pollutant::Co, f64::INFINITY);
        assert_eq!(
            model.predict(&record),
            Err(PredictionError::NonFiniteInput(Pollutant::Co))
        );
        // Readings the model does not use are not checked.
        let record = FeatureRecord::default().with(Pollutant::O3, f64::NAN);
        assert_eq!(model.predict(&record), Ok(258.0));
    }
}
