use amaze_training::genetic::{GenerationStats, TrainingConfig};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Summary of a finished training run, written next to the policy file.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TrainingReport {
    pub name: String,
    pub trained_at: DateTime<Utc>,
    pub final_fitness: f32,
    pub seed: u64,
    pub corpus_size: usize,
    pub config: TrainingConfig,
    pub genes: Vec<f32>,
    pub history: Vec<GenerationStats>,
}
