//! Genetic algorithm for evolving linear navigation policies.
//!
//! # Algorithm Overview
//!
//! [`EvolutionEngine`] runs the cycle
//!
//! ```text
//! Init → { Evaluate → SelectBest → Reproduce } × generation_count → Done
//! ```
//!
//! 1. **Evaluate** - Every unevaluated chromosome walks each corpus maze; fitness is the mean
//! 2. **Select best** - The fittest chromosome of the generation updates the lifetime best
//! 3. **Elitism** - The best chromosome is carried into the next population unchanged
//! 4. **Tournament selection** - Two parents per child, `tournament_size` draws with replacement
//! 5. **Uniform crossover** - With probability `crossover_rate`; otherwise the child copies parent 1
//! 6. **Mutation** - Gaussian noise per gene with probability `mutation_rate`, clamped to `[-1, 1]`
//!
//! # Key Components
//!
//! - [`Chromosome`] - gene vector plus its fitness once evaluated
//! - [`Population`] - fixed-size set of chromosomes evaluated together
//! - [`PopulationEvolver`] - genetic operators producing the next population
//! - [`EvolutionEngine`] - owns the corpus, the RNG, and the run history
//!
//! # Monotonic Best Fitness
//!
//! The elite keeps its measured fitness and is not re-evaluated: the corpus does not change
//! during a run, so the value is still exact. Every later generation therefore contains a
//! chromosome at least as fit as the previous best, and the reported best fitness never
//! decreases, even though policy tie-breaks are random.
//!
//! # Parallelization
//!
//! Fitness evaluation spawns one scoped thread per unevaluated chromosome. Workers share
//! the corpus read-only and each owns its chromosome exclusively. Every worker gets its own
//! `Pcg32` seeded from the engine RNG before spawning, so results for a given seed do not
//! depend on thread scheduling.

use std::{cmp::Ordering, thread};

use amaze_engine::GridMaze;
use amaze_evaluator::{
    policy::FeatureScheme,
    policy_evaluator::{FitnessEvaluator, FitnessParams, PolicyEvaluator},
};
use amaze_stats::descriptive::DescriptiveStats;
use rand::{Rng, SeedableRng as _};
use rand_distr::Normal;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::{TrainingError, genes};

/// A candidate policy: a gene vector and, once evaluated, its fitness.
#[derive(Debug, Clone, PartialEq)]
pub struct Chromosome {
    genes: Vec<f32>,
    fitness: Option<f32>,
}

impl Chromosome {
    /// Creates an unevaluated chromosome with genes uniform in `[-1, 1]`.
    pub fn random<R>(rng: &mut R, gene_count: usize) -> Self
    where
        R: Rng + ?Sized,
    {
        Self::from_genes(genes::random(rng, gene_count))
    }

    #[must_use]
    pub fn from_genes(genes: Vec<f32>) -> Self {
        Self {
            genes,
            fitness: None,
        }
    }

    #[must_use]
    pub fn genes(&self) -> &[f32] {
        &self.genes
    }

    #[must_use]
    pub fn into_genes(self) -> Vec<f32> {
        self.genes
    }

    /// Mean corpus fitness, or `None` if not evaluated yet.
    #[must_use]
    pub fn fitness(&self) -> Option<f32> {
        self.fitness
    }

    fn rank_key(&self) -> f32 {
        self.fitness.unwrap_or(f32::NEG_INFINITY)
    }

    fn cmp_fitness(&self, other: &Self) -> Ordering {
        self.rank_key().total_cmp(&other.rank_key())
    }
}

/// A population of chromosomes.
#[derive(Debug, Clone)]
pub struct Population {
    chromosomes: Vec<Chromosome>,
}

impl Population {
    /// Creates `count` random chromosomes of `gene_count` genes each.
    #[must_use]
    pub fn random<R>(count: usize, gene_count: usize, rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        let chromosomes = (0..count)
            .map(|_| Chromosome::random(rng, gene_count))
            .collect();
        Self { chromosomes }
    }

    #[must_use]
    pub fn from_chromosomes(chromosomes: Vec<Chromosome>) -> Self {
        Self { chromosomes }
    }

    #[must_use]
    pub fn chromosomes(&self) -> &[Chromosome] {
        &self.chromosomes
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.chromosomes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chromosomes.is_empty()
    }

    /// Evaluates every chromosome without a fitness, in parallel.
    ///
    /// Afterwards chromosomes are sorted by fitness, best first. The sort is stable, so an
    /// elite keeps its place ahead of equally fit children.
    ///
    /// Every pending chromosome must have `evaluator.gene_count()` genes; otherwise nothing
    /// is evaluated and [`TrainingError::GeneCountMismatch`] is returned.
    pub fn evaluate_fitness<E, R>(
        &mut self,
        corpus: &[GridMaze],
        evaluator: &E,
        rng: &mut R,
    ) -> Result<(), TrainingError>
    where
        E: FitnessEvaluator + ?Sized,
        R: Rng + ?Sized,
    {
        if corpus.is_empty() {
            return Err(TrainingError::EmptyCorpus);
        }
        let expected = evaluator.gene_count();
        if let Some(chromosome) = self
            .chromosomes
            .iter()
            .find(|c| c.fitness.is_none() && c.genes.len() != expected)
        {
            return Err(TrainingError::GeneCountMismatch {
                expected,
                actual: chromosome.genes.len(),
            });
        }

        thread::scope(|s| {
            for chromosome in &mut self.chromosomes {
                if chromosome.fitness.is_some() {
                    continue;
                }
                let seed = rng.random::<u64>();
                s.spawn(move || {
                    let mut rng = Pcg32::seed_from_u64(seed);
                    chromosome.fitness =
                        evaluator.evaluate_corpus(&chromosome.genes, corpus, &mut rng);
                });
            }
        });

        self.chromosomes.sort_by(|a, b| b.cmp_fitness(a));
        Ok(())
    }

    /// Returns the fittest chromosome.
    #[must_use]
    pub fn best(&self) -> Option<&Chromosome> {
        // max_by returns the last maximum; search in reverse to keep the earliest
        self.chromosomes
            .iter()
            .rev()
            .max_by(|a, b| a.cmp_fitness(b))
    }

    /// Fitness distribution of the evaluated chromosomes.
    #[must_use]
    pub fn compute_fitness_stats(&self) -> Option<DescriptiveStats> {
        DescriptiveStats::new(self.chromosomes.iter().filter_map(Chromosome::fitness))
    }
}

/// Parameters of the genetic algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvolutionParams {
    pub population_size: usize,
    pub generation_count: usize,
    /// Probability that a child is produced by crossover instead of copying parent 1
    pub crossover_rate: f32,
    /// Per-gene mutation probability
    pub mutation_rate: f32,
    /// Standard deviation of the Gaussian mutation noise
    pub mutation_sigma: f32,
    /// Draws per tournament (larger = stronger selection pressure)
    pub tournament_size: usize,
}

impl Default for EvolutionParams {
    fn default() -> Self {
        Self {
            population_size: 50,
            generation_count: 100,
            crossover_rate: 0.7,
            mutation_rate: 0.1,
            mutation_sigma: 0.1,
            tournament_size: 3,
        }
    }
}

impl EvolutionParams {
    /// Checks that every parameter is usable.
    pub fn validate(&self) -> Result<(), TrainingError> {
        let probability = |name, value: f32| {
            if (0.0..=1.0).contains(&value) {
                Ok(())
            } else {
                Err(TrainingError::InvalidParameter {
                    name,
                    value: value.into(),
                })
            }
        };

        if self.population_size == 0 {
            return Err(TrainingError::EmptyPopulation);
        }
        if self.generation_count == 0 {
            return Err(TrainingError::InvalidParameter {
                name: "generation_count",
                value: 0.0,
            });
        }
        if self.tournament_size == 0 {
            return Err(TrainingError::InvalidParameter {
                name: "tournament_size",
                value: 0.0,
            });
        }
        probability("crossover_rate", self.crossover_rate)?;
        probability("mutation_rate", self.mutation_rate)?;
        if !self.mutation_sigma.is_finite() || self.mutation_sigma < 0.0 {
            return Err(TrainingError::InvalidParameter {
                name: "mutation_sigma",
                value: self.mutation_sigma.into(),
            });
        }
        Ok(())
    }
}

/// Everything that defines a training run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingConfig {
    pub evolution: EvolutionParams,
    pub fitness: FitnessParams,
    pub features: FeatureScheme,
    /// RNG seed; drawn at random when absent.
    pub seed: Option<u64>,
}

/// Produces the next generation from an evaluated population.
#[derive(Debug, Clone)]
pub struct PopulationEvolver {
    pub tournament_size: usize,
    pub crossover_rate: f32,
    pub mutation_rate: f32,
    noise: Normal<f32>,
}

impl PopulationEvolver {
    pub fn new(params: &EvolutionParams) -> Result<Self, TrainingError> {
        params.validate()?;
        let noise = Normal::new(0.0, params.mutation_sigma).map_err(|_| {
            TrainingError::InvalidParameter {
                name: "mutation_sigma",
                value: params.mutation_sigma.into(),
            }
        })?;
        Ok(Self {
            tournament_size: params.tournament_size,
            crossover_rate: params.crossover_rate,
            mutation_rate: params.mutation_rate,
            noise,
        })
    }

    /// Builds the next population of the same size.
    ///
    /// The best chromosome is carried over unchanged, fitness included. Every other slot is
    /// a mutated child of two tournament winners.
    ///
    /// # Panics
    ///
    /// Panics if `population` is empty or not sorted by fitness, best first.
    #[must_use]
    pub fn evolve<R>(&self, population: &Population, rng: &mut R) -> Population
    where
        R: Rng + ?Sized,
    {
        let parents = &population.chromosomes;
        assert!(!parents.is_empty(), "cannot evolve an empty population");
        assert!(
            parents.is_sorted_by(|a, b| a.cmp_fitness(b).is_ge()),
            "population must be sorted by fitness"
        );

        let mut next = Vec::with_capacity(parents.len());
        next.push(parents[0].clone());

        while next.len() < parents.len() {
            let p1 = tournament_select(parents, self.tournament_size, rng);
            let p2 = tournament_select(parents, self.tournament_size, rng);

            let mut child = if rng.random_bool(self.crossover_rate.into()) {
                genes::uniform_crossover(&p1.genes, &p2.genes, rng)
            } else {
                p1.genes.clone()
            };
            genes::mutate(&mut child, &self.noise, self.mutation_rate, rng);

            next.push(Chromosome::from_genes(child));
        }

        Population { chromosomes: next }
    }
}

/// Draws `tournament_size` chromosomes uniformly with replacement and returns the fittest.
fn tournament_select<'a, R>(
    population: &'a [Chromosome],
    tournament_size: usize,
    rng: &mut R,
) -> &'a Chromosome
where
    R: Rng + ?Sized,
{
    let mut winner = &population[rng.random_range(0..population.len())];
    for _ in 1..tournament_size {
        let candidate = &population[rng.random_range(0..population.len())];
        if candidate.cmp_fitness(winner).is_gt() {
            winner = candidate;
        }
    }
    winner
}

/// Fitness summary of one evaluated generation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenerationStats {
    /// Zero-based generation number.
    pub generation: usize,
    pub best_fitness: f32,
    pub mean_fitness: f32,
    pub min_fitness: f32,
    pub std_dev: f32,
    /// Best fitness seen in this or any earlier generation.
    pub lifetime_best: f32,
}

/// Result of a finished run.
#[derive(Debug, Clone)]
pub struct TrainingOutcome {
    pub best: Chromosome,
    pub history: Vec<GenerationStats>,
    pub seed: u64,
}

/// Drives a full training run over a fixed maze corpus.
#[derive(Debug)]
pub struct EvolutionEngine {
    corpus: Vec<GridMaze>,
    evaluator: PolicyEvaluator,
    evolver: PopulationEvolver,
    generation_count: usize,
    population: Population,
    best: Option<Chromosome>,
    history: Vec<GenerationStats>,
    seed: u64,
    rng: Pcg32,
}

impl EvolutionEngine {
    /// Validates `config` and creates the initial random population.
    pub fn new(corpus: Vec<GridMaze>, config: &TrainingConfig) -> Result<Self, TrainingError> {
        if corpus.is_empty() {
            return Err(TrainingError::EmptyCorpus);
        }
        let evolver = PopulationEvolver::new(&config.evolution)?;
        let seed = config.seed.unwrap_or_else(|| rand::rng().random());
        let mut rng = Pcg32::seed_from_u64(seed);
        let population = Population::random(
            config.evolution.population_size,
            config.features.gene_count(),
            &mut rng,
        );
        log::info!(
            "training {} chromosomes on {} mazes with {} features (seed {seed})",
            population.len(),
            corpus.len(),
            config.features,
        );

        Ok(Self {
            corpus,
            evaluator: PolicyEvaluator::new(config.features, config.fitness),
            evolver,
            generation_count: config.evolution.generation_count,
            population,
            best: None,
            history: vec![],
            seed,
            rng,
        })
    }

    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    #[must_use]
    pub fn corpus(&self) -> &[GridMaze] {
        &self.corpus
    }

    #[must_use]
    pub fn evaluator(&self) -> &PolicyEvaluator {
        &self.evaluator
    }

    /// Current population. Chromosomes bred by the last step are not evaluated yet.
    #[must_use]
    pub fn population(&self) -> &Population {
        &self.population
    }

    /// Number of generations evaluated so far.
    #[must_use]
    pub fn generation(&self) -> usize {
        self.history.len()
    }

    #[must_use]
    pub fn is_done(&self) -> bool {
        self.generation() >= self.generation_count
    }

    /// Lifetime best chromosome, once at least one generation has run.
    #[must_use]
    pub fn best(&self) -> Option<&Chromosome> {
        self.best.as_ref()
    }

    #[must_use]
    pub fn history(&self) -> &[GenerationStats] {
        &self.history
    }

    /// Runs one Evaluate, SelectBest, Reproduce cycle.
    pub fn step(&mut self) -> Result<GenerationStats, TrainingError> {
        self.population
            .evaluate_fitness(&self.corpus, &self.evaluator, &mut self.rng)?;

        let fitness = self
            .population
            .compute_fitness_stats()
            .ok_or(TrainingError::EmptyPopulation)?;
        let current = self
            .population
            .best()
            .ok_or(TrainingError::EmptyPopulation)?;
        let improved = self
            .best
            .as_ref()
            .is_none_or(|best| current.cmp_fitness(best).is_gt());
        if improved {
            self.best = Some(current.clone());
        }
        let lifetime_best = self
            .best
            .as_ref()
            .and_then(Chromosome::fitness)
            .unwrap_or(fitness.max);

        let stats = GenerationStats {
            generation: self.history.len(),
            best_fitness: fitness.max,
            mean_fitness: fitness.mean,
            min_fitness: fitness.min,
            std_dev: fitness.std_dev,
            lifetime_best,
        };
        log::debug!(
            "generation {}: best {:.3}, mean {:.3}",
            stats.generation,
            stats.best_fitness,
            stats.mean_fitness
        );
        self.history.push(stats);

        self.population = self.evolver.evolve(&self.population, &mut self.rng);
        Ok(stats)
    }

    /// Runs all remaining generations.
    pub fn run(self) -> Result<TrainingOutcome, TrainingError> {
        self.run_with(|_| {})
    }

    /// Runs all remaining generations, calling `on_generation` after each one.
    pub fn run_with<F>(mut self, mut on_generation: F) -> Result<TrainingOutcome, TrainingError>
    where
        F: FnMut(&GenerationStats),
    {
        while !self.is_done() {
            let stats = self.step()?;
            on_generation(&stats);
        }
        let best = self.best.ok_or(TrainingError::EmptyPopulation)?;
        log::info!(
            "training finished after {} generations, best fitness {:.3}",
            self.history.len(),
            best.fitness.unwrap_or(f32::NAN)
        );
        Ok(TrainingOutcome {
            best,
            history: self.history,
            seed: self.seed,
        })
    }
}

#[cfg(test)]
mod tests {
    use amaze_engine::MazeGenerator;
    use rand::RngCore;

    use super::*;

    fn corpus(count: usize, size: usize) -> Vec<GridMaze> {
        let mut generator = MazeGenerator::with_seed(99);
        (0..count)
            .map(|_| generator.generate(size, size).unwrap().maze)
            .collect()
    }

    fn small_config(seed: u64) -> TrainingConfig {
        TrainingConfig {
            evolution: EvolutionParams {
                population_size: 12,
                generation_count: 8,
                ..EvolutionParams::default()
            },
            fitness: FitnessParams {
                max_steps: 60,
                ..FitnessParams::default()
            },
            features: FeatureScheme::Offset,
            seed: Some(seed),
        }
    }

    /// Scores a chromosome by its first gene.
    #[derive(Debug)]
    struct FirstGene;

    impl FitnessEvaluator for FirstGene {
        fn gene_count(&self) -> usize {
            2
        }

        fn evaluate_maze(&self, genes: &[f32], _maze: &GridMaze, _rng: &mut dyn RngCore) -> f32 {
            genes[0]
        }
    }

    #[test]
    fn test_evaluate_sorts_best_first() {
        let mut rng = Pcg32::seed_from_u64(0);
        let mut population = Population::random(10, 2, &mut rng);
        population
            .evaluate_fitness(&corpus(1, 2), &FirstGene, &mut rng)
            .unwrap();
        let fitness = population
            .chromosomes()
            .iter()
            .map(|c| c.fitness().unwrap())
            .collect::<Vec<_>>();
        assert!(fitness.is_sorted_by(|a, b| a >= b), "{fitness:?}");
        assert_eq!(population.best(), population.chromosomes().first());
    }

    #[test]
    fn test_evaluate_rejects_empty_corpus() {
        let mut rng = Pcg32::seed_from_u64(0);
        let mut population = Population::random(3, 2, &mut rng);
        assert_eq!(
            population.evaluate_fitness(&[], &FirstGene, &mut rng),
            Err(TrainingError::EmptyCorpus)
        );
        assert!(population.chromosomes().iter().all(|c| c.fitness().is_none()));
    }

    #[test]
    fn test_evaluate_rejects_wrong_gene_count() {
        let mut rng = Pcg32::seed_from_u64(0);
        let mut population = Population::from_chromosomes(vec![
            Chromosome::random(&mut rng, 28),
            Chromosome::random(&mut rng, 24),
        ]);
        let evaluator = PolicyEvaluator::new(FeatureScheme::Offset, FitnessParams::default());
        assert_eq!(
            population.evaluate_fitness(&corpus(1, 3), &evaluator, &mut rng),
            Err(TrainingError::GeneCountMismatch {
                expected: 28,
                actual: 24
            })
        );
        assert!(population.chromosomes().iter().all(|c| c.fitness().is_none()));
    }

    #[test]
    fn test_evolve_without_crossover_or_mutation_copies_parents() {
        let mut rng = Pcg32::seed_from_u64(6);
        let mut population = Population::random(10, 2, &mut rng);
        population
            .evaluate_fitness(&corpus(1, 2), &FirstGene, &mut rng)
            .unwrap();
        let params = EvolutionParams {
            crossover_rate: 0.0,
            mutation_rate: 0.0,
            ..EvolutionParams::default()
        };
        let evolver = PopulationEvolver::new(&params).unwrap();
        for _ in 0..10 {
            let next = evolver.evolve(&population, &mut rng);
            for child in next.chromosomes() {
                assert!(
                    population
                        .chromosomes()
                        .iter()
                        .any(|parent| parent.genes() == child.genes()),
                    "{child:?} is not a copy of a parent"
                );
            }
        }
    }

    #[test]
    fn test_evolve_keeps_elite_and_size() {
        let mut rng = Pcg32::seed_from_u64(5);
        let mut population = Population::random(9, 2, &mut rng);
        population
            .evaluate_fitness(&corpus(1, 2), &FirstGene, &mut rng)
            .unwrap();
        let evolver = PopulationEvolver::new(&EvolutionParams::default()).unwrap();
        let next = evolver.evolve(&population, &mut rng);
        assert_eq!(next.len(), 9);
        assert_eq!(next.chromosomes()[0], population.chromosomes()[0]);
        assert!(next.chromosomes()[1..].iter().all(|c| c.fitness().is_none()));
        assert!(
            next.chromosomes()
                .iter()
                .flat_map(Chromosome::genes)
                .all(|g| genes::GENE_RANGE.contains(g))
        );
    }

    #[test]
    fn test_tournament_of_whole_population_picks_best() {
        let mut rng = Pcg32::seed_from_u64(8);
        let chromosomes = (0..4u8)
            .map(|i| Chromosome {
                genes: vec![],
                fitness: Some(f32::from(i)),
            })
            .collect::<Vec<_>>();
        let mut wins = 0;
        for _ in 0..100 {
            if tournament_select(&chromosomes, 64, &mut rng).fitness() == Some(3.0) {
                wins += 1;
            }
        }
        assert!(wins > 95, "{wins}");
        // size 1 is a uniform draw
        let picked = (0..200)
            .map(|_| tournament_select(&chromosomes, 1, &mut rng).fitness())
            .filter(|f| *f == Some(0.0))
            .count();
        assert!(picked > 0);
    }

    #[test]
    fn test_invalid_params() {
        let cases = [
            EvolutionParams {
                population_size: 0,
                ..EvolutionParams::default()
            },
            EvolutionParams {
                generation_count: 0,
                ..EvolutionParams::default()
            },
            EvolutionParams {
                tournament_size: 0,
                ..EvolutionParams::default()
            },
            EvolutionParams {
                crossover_rate: 1.5,
                ..EvolutionParams::default()
            },
            EvolutionParams {
                mutation_rate: -0.1,
                ..EvolutionParams::default()
            },
            EvolutionParams {
                mutation_sigma: f32::NAN,
                ..EvolutionParams::default()
            },
        ];
        for params in cases {
            assert!(params.validate().is_err(), "{params:?}");
            assert!(PopulationEvolver::new(&params).is_err());
        }
        assert_eq!(EvolutionParams::default().validate(), Ok(()));
    }

    #[test]
    fn test_engine_rejects_empty_corpus() {
        let err = EvolutionEngine::new(vec![], &small_config(0)).unwrap_err();
        assert_eq!(err, TrainingError::EmptyCorpus);
    }

    #[test]
    fn test_best_fitness_never_decreases() {
        let engine = EvolutionEngine::new(corpus(4, 6), &small_config(21)).unwrap();
        let mut seen = 0;
        let outcome = engine
            .run_with(|_| {
                seen += 1;
            })
            .unwrap();
        assert_eq!(seen, 8);
        assert_eq!(outcome.history.len(), 8);
        for pair in outcome.history.windows(2) {
            assert!(
                pair[1].best_fitness >= pair[0].best_fitness,
                "{:?}",
                outcome.history
            );
            assert!(pair[1].lifetime_best >= pair[0].lifetime_best);
        }
        for (i, stats) in outcome.history.iter().enumerate() {
            assert_eq!(stats.generation, i);
            assert!(stats.min_fitness <= stats.mean_fitness + 1e-3);
            assert!(stats.mean_fitness <= stats.best_fitness + 1e-3);
            assert_eq!(stats.best_fitness, stats.lifetime_best);
        }
        let last = outcome.history.last().unwrap();
        assert_eq!(outcome.best.fitness(), Some(last.lifetime_best));
        assert_eq!(outcome.best.genes().len(), 28);
    }

    #[test]
    fn test_same_seed_same_outcome() {
        let a = EvolutionEngine::new(corpus(3, 5), &small_config(4))
            .unwrap()
            .run()
            .unwrap();
        let b = EvolutionEngine::new(corpus(3, 5), &small_config(4))
            .unwrap()
            .run()
            .unwrap();
        assert_eq!(a.seed, 4);
        assert_eq!(a.best, b.best);
        assert_eq!(a.history, b.history);
    }

    #[test]
    fn test_step_by_step() {
        let mut engine = EvolutionEngine::new(corpus(2, 4), &small_config(2)).unwrap();
        assert!(engine.best().is_none());
        assert_eq!(engine.population().len(), 12);
        let first = engine.step().unwrap();
        assert_eq!(first.generation, 0);
        assert_eq!(engine.generation(), 1);
        assert!(!engine.is_done());
        assert_eq!(engine.best().unwrap().fitness(), Some(first.best_fitness));
        // the elite survives with its fitness, children are pending
        let pending = engine
            .population()
            .chromosomes()
            .iter()
            .filter(|c| c.fitness().is_none())
            .count();
        assert_eq!(pending, 11);
    }

    #[test]
    fn test_config_json() {
        let config: TrainingConfig = serde_json::from_str(
            r#"{"evolution": {"population_size": 20}, "features": "distance", "seed": 3}"#,
        )
        .unwrap();
        assert_eq!(config.evolution.population_size, 20);
        assert_eq!(
            config.evolution.generation_count,
            EvolutionParams::default().generation_count
        );
        assert_eq!(config.features, FeatureScheme::Distance);
        assert_eq!(config.seed, Some(3));
        assert_eq!(config.fitness, FitnessParams::default());
    }
}
