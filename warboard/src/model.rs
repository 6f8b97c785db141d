//! Model-stats collaborator file
//!
//! The offline trainer exports a `model_stats.json` next to the data file.
//! When it is missing or unreadable the dashboard falls back to a built-in
//! illustrative dataset so the model view still has something to show.

use std::path::Path;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelStats {
    pub model_info: ModelInfo,
    pub confusion_matrix: ConfusionMatrix,
    pub feature_importance: FeatureImportance,
    pub depth_analysis: DepthAnalysis,
    #[serde(default)]
    pub classification_report: serde_json::Value,
    #[serde(default)]
    pub dataset_distribution: serde_json::Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelInfo {
    pub accuracy: f64,
    pub training_samples: u64,
    pub testing_samples: u64,
    pub tree_depth: u32,
    pub leaf_nodes: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfusionMatrix {
    /// Rows are actual loss/win, columns predicted loss/win
    pub matrix: Vec<Vec<u64>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureImportance {
    pub features: Vec<Feature>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Feature {
    pub name: String,
    pub importance: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DepthAnalysis {
    #[serde(default)]
    pub depths: Vec<u32>,
    pub accuracies: Vec<f64>,
}

impl ModelStats {
    /// Read the trainer's export, or fall back to the illustrative stats
    pub fn load_or_fallback(path: Option<&Path>) -> Self {
        path.and_then(|path| std::fs::read_to_string(path).ok())
            .and_then(|text| serde_json::from_str(&text).ok())
            .unwrap_or_else(Self::illustrative)
    }

    /// Hardcoded stand-in numbers for when no trainer export is available
    pub fn illustrative() -> Self {
        let features = [
            ("Score", 0.31),
            ("Damage Done", 0.18),
            ("Kill_Death_Ratio", 0.15),
            ("Skill", 0.12),
            ("Damage_Efficiency", 0.10),
            ("Kills", 0.08),
            ("Accuracy", 0.06),
        ];

        Self {
            model_info: ModelInfo {
                accuracy: 0.72,
                training_samples: 1000,
                testing_samples: 500,
                tree_depth: 5,
                leaf_nodes: 18,
            },
            confusion_matrix: ConfusionMatrix {
                matrix: vec![vec![420, 130], vec![150, 800]],
            },
            feature_importance: FeatureImportance {
                features: features
                    .into_iter()
                    .map(|(name, importance)| Feature {
                        name: name.to_string(),
                        importance,
                    })
                    .collect(),
            },
            depth_analysis: DepthAnalysis {
                depths: vec![1, 2, 3, 4, 5, 6],
                accuracies: vec![0.58, 0.65, 0.72, 0.71, 0.70, 0.69],
            },
            classification_report: serde_json::Value::Null,
            dataset_distribution: serde_json::Value::Null,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_falls_back() {
        let stats = ModelStats::load_or_fallback(Some(Path::new("no-such.json")));
        assert_eq!(stats.model_info.tree_depth, 5);
        assert_eq!(stats.confusion_matrix.matrix[1][1], 800);

        let stats = ModelStats::load_or_fallback(None);
        assert_eq!(stats.model_info.leaf_nodes, 18);
    }

    #[test]
    fn test_parses_the_trainer_export_shape() {
        let text = r#"{
            "model_info": {
                "accuracy": 0.81,
                "training_samples": 1200,
                "testing_samples": 300,
                "tree_depth": 7,
                "leaf_nodes": 24
            },
            "confusion_matrix": { "matrix": [[100, 20], [30, 150]] },
            "feature_importance": {
                "features": [{ "name": "Score", "importance": 0.4 }]
            },
            "depth_analysis": { "accuracies": [0.6, 0.7, 0.81] },
            "classification_report": { "accuracy": 0.81 },
            "dataset_distribution": { "win": 450, "loss": 350 }
        }"#;

        let stats: ModelStats = serde_json::from_str(text).unwrap();
        assert_eq!(stats.model_info.accuracy, 0.81);
        assert_eq!(stats.feature_importance.features[0].name, "Score");
        assert_eq!(stats.depth_analysis.accuracies.len(), 3);
        assert!(stats.depth_analysis.depths.is_empty());
    }
}
