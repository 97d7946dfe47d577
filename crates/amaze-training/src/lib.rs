//! Training system for evolving maze navigation policies with a genetic algorithm.
//!
//! A policy is a flat vector of genes interpreted as a linear weight matrix by
//! [`amaze_evaluator::policy::LinearPolicy`]. Training searches that vector space for the
//! weights that score best on a fixed corpus of mazes.
//!
//! # How Training Works
//!
//! 1. **Init** - Create a population of chromosomes with genes drawn uniformly from `[-1, 1]`
//! 2. **Evaluate** - Each chromosome walks every maze of the corpus; its fitness is the mean
//! 3. **Select best** - The fittest chromosome becomes the running best
//! 4. **Reproduce** - Elite carry-forward, tournament selection, uniform crossover, mutation
//! 5. **Repeat** - Continue for the configured number of generations
//!
//! # Architecture
//!
//! ```text
//! EvolutionEngine (state machine, seeded RNG, history)
//!     ↓ drives
//! Population / PopulationEvolver (genetic operators)
//!     ↓ scored by
//! FitnessEvaluator (amaze-evaluator)
//!     ↓ over
//! Maze corpus (amaze-engine)
//! ```
//!
//! # Modules
//!
//! - [`genes`] - gene vector operators: initialization, crossover, mutation
//! - [`genetic`] - chromosomes, populations, and the evolution engine
//! - [`policy_file`] - the trained-policy file format
//!
//! # Example
//!
//! ```
//! use amaze_engine::MazeGenerator;
//! use amaze_training::genetic::{EvolutionEngine, TrainingConfig};
//!
//! let mut generator = MazeGenerator::with_seed(1);
//! let corpus = (0..3)
//!     .map(|_| generator.generate(5, 5).unwrap().maze)
//!     .collect::<Vec<_>>();
//!
//! let mut config = TrainingConfig::default();
//! config.evolution.population_size = 8;
//! config.evolution.generation_count = 3;
//! config.seed = Some(7);
//!
//! let outcome = EvolutionEngine::new(corpus, &config).unwrap().run().unwrap();
//! assert_eq!(outcome.history.len(), 3);
//! assert_eq!(outcome.best.genes().len(), config.features.gene_count());
//! ```

pub mod genes;
pub mod genetic;
pub mod policy_file;

#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum TrainingError {
    #[display("cannot train on an empty maze corpus")]
    EmptyCorpus,
    #[display("population size must be at least 1")]
    EmptyPopulation,
    #[display("invalid training parameter {name} = {value}")]
    InvalidParameter { name: &'static str, value: f64 },
    #[display("chromosome has {actual} genes, evaluator expects {expected}")]
    GeneCountMismatch { expected: usize, actual: usize },
}
