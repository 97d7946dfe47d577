use std::path::PathBuf;

use amaze_engine::maze_file;
use amaze_evaluator::policy::FeatureScheme;
use amaze_training::{
    genetic::{EvolutionEngine, TrainingConfig},
    policy_file,
};
use anyhow::Context;
use chrono::Utc;

use crate::{
    model::training_report::TrainingReport,
    util::{self, Output},
};

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct TrainArg {
    /// Directory of maze files to train on
    #[arg(long, default_value = "mazes")]
    corpus: PathBuf,
    /// Training configuration JSON; flags below override its fields
    #[arg(long)]
    config: Option<PathBuf>,
    /// Number of chromosomes per generation
    #[arg(long)]
    population: Option<usize>,
    /// Number of generations
    #[arg(long)]
    generations: Option<usize>,
    /// Probability of producing a child by crossover
    #[arg(long)]
    crossover_rate: Option<f32>,
    /// Per-gene mutation probability
    #[arg(long)]
    mutation_rate: Option<f32>,
    /// Standard deviation of the mutation noise
    #[arg(long)]
    mutation_sigma: Option<f32>,
    /// Tournament size for parent selection
    #[arg(long)]
    tournament_size: Option<usize>,
    /// Step budget per maze
    #[arg(long)]
    max_steps: Option<usize>,
    /// Feature scheme: `distance` or `offset`
    #[arg(long)]
    features: Option<FeatureScheme>,
    /// Random seed (drawn at random when omitted)
    #[arg(long)]
    seed: Option<u64>,
    /// Policy file to write
    #[arg(long, default_value = "policy.bin")]
    output: PathBuf,
    /// Write a JSON training report to this file (`-` for stdout)
    #[arg(long)]
    report: Option<PathBuf>,
}

impl TrainArg {
    fn load_config(&self) -> anyhow::Result<TrainingConfig> {
        let mut config: TrainingConfig = match &self.config {
            Some(path) => util::read_json_file("training config", path)?,
            None => TrainingConfig::default(),
        };
        let evolution = &mut config.evolution;
        if let Some(v) = self.population {
            evolution.population_size = v;
        }
        if let Some(v) = self.generations {
            evolution.generation_count = v;
        }
        if let Some(v) = self.crossover_rate {
            evolution.crossover_rate = v;
        }
        if let Some(v) = self.mutation_rate {
            evolution.mutation_rate = v;
        }
        if let Some(v) = self.mutation_sigma {
            evolution.mutation_sigma = v;
        }
        if let Some(v) = self.tournament_size {
            evolution.tournament_size = v;
        }
        if let Some(v) = self.max_steps {
            config.fitness.max_steps = v;
        }
        if let Some(v) = self.features {
            config.features = v;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        Ok(config)
    }
}

pub(crate) fn run(arg: &TrainArg) -> anyhow::Result<()> {
    let config = arg.load_config()?;
    let corpus = maze_file::load_corpus(&arg.corpus)?;
    let corpus_size = corpus.len();

    let engine = EvolutionEngine::new(corpus, &config).with_context(|| {
        format!(
            "Failed to start training on {}",
            arg.corpus.display()
        )
    })?;
    let seed = engine.seed();
    eprintln!(
        "Training {} policies on {corpus_size} mazes ({} features, seed {seed})",
        config.evolution.population_size, config.features
    );

    let outcome = engine
        .run_with(|stats| {
            eprintln!(
                "Generation #{:3}: best {:8.3}  mean {:8.3}  min {:8.3}  stddev {:7.3}",
                stats.generation,
                stats.best_fitness,
                stats.mean_fitness,
                stats.min_fitness,
                stats.std_dev
            );
        })
        .context("Training failed")?;

    policy_file::save(&arg.output, &outcome.best)?;

    let report = TrainingReport {
        name: arg
            .output
            .file_stem()
            .map_or_else(|| "policy".to_owned(), |s| s.to_string_lossy().into_owned()),
        trained_at: Utc::now(),
        final_fitness: outcome.best.fitness().unwrap_or(f32::NAN),
        seed: outcome.seed,
        corpus_size,
        config,
        genes: outcome.best.genes().to_vec(),
        history: outcome.history,
    };
    if let Some(path) = &arg.report {
        Output::save_json(&report, path)?;
    }

    eprintln!();
    eprintln!("Policy saved successfully");
    eprintln!("  Path: {}", arg.output.display());
    eprintln!("  Trained at: {}", report.trained_at);
    eprintln!("  Final fitness: {:.3}", report.final_fitness);
    eprintln!(
        "  Genes: {} ({} features)",
        report.genes.len(),
        report.config.features
    );
    if let Some(path) = &arg.report {
        eprintln!("  Report: {}", path.display());
    }

    Ok(())
}
