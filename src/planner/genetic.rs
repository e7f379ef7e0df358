use log::debug;
use rand::rngs::StdRng;
use rand::seq::index;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::error::{PlanError, Result};
use crate::models::{FoodItem, NutrientTarget, UnitCategory};
use crate::planner::calculations::fitness;
use crate::planner::config::GaConfig;
use crate::planner::constants::{LOG_EVERY, SERVING_STEP};

/// One candidate solution: a portion per food, aligned with the item list.
pub type PortionVector = Vec<f64>;

/// Fitness summary of one evaluated population.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenerationStats {
    pub generation: usize,
    pub best: f64,
    pub mean: f64,
}

impl GenerationStats {
    fn from_scores(generation: usize, scores: &[f64]) -> Self {
        let best = scores.iter().copied().fold(f64::INFINITY, f64::min);
        let mean = scores.iter().sum::<f64>() / scores.len() as f64;
        Self {
            generation,
            best,
            mean,
        }
    }
}

/// Best individual of a finished run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Solution {
    pub portions: PortionVector,
    pub fitness: f64,
    /// One entry per generation plus a final entry for the last population.
    pub history: Vec<GenerationStats>,
}

impl Solution {
    /// Running minimum of the per-generation best fitness.
    pub fn best_so_far(&self) -> Vec<f64> {
        self.history
            .iter()
            .scan(f64::INFINITY, |best, stats| {
                *best = best.min(stats.best);
                Some(*best)
            })
            .collect()
    }
}

/// Genetic search over portion vectors for one meal.
///
/// The optimizer owns no random state; each run draws from the generator
/// passed in.
pub struct PortionOptimizer<'a> {
    items: &'a [FoodItem],
    target: NutrientTarget,
    config: &'a GaConfig,
}

impl<'a> PortionOptimizer<'a> {
    pub fn new(
        items: &'a [FoodItem],
        target: NutrientTarget,
        config: &'a GaConfig,
    ) -> Result<Self> {
        if items.is_empty() {
            return Err(PlanError::EmptyInput("meal".to_string()));
        }
        for item in items {
            if !(item.reference_quantity.is_finite() && item.reference_quantity > 0.0) {
                return Err(PlanError::data(
                    &item.name,
                    "reference quantity must be positive",
                ));
            }
            let nutrients = [
                item.calories,
                item.protein_g,
                item.carbs_g,
                item.fats_g,
                item.sugars_g,
                item.fiber_g,
            ];
            if !nutrients.iter().all(|v| v.is_finite() && *v >= 0.0) {
                return Err(PlanError::data(
                    &item.name,
                    "nutrient values must be finite and non-negative",
                ));
            }
        }
        if !target.is_valid() {
            return Err(PlanError::InvalidInput(
                "nutrient target must be finite and non-negative".to_string(),
            ));
        }
        config.validate()?;

        Ok(Self {
            items,
            target,
            config,
        })
    }

    /// Fitness of a single portion vector.
    pub fn fitness(&self, portions: &[f64]) -> f64 {
        fitness(self.items, portions, &self.target)
    }

    /// Run the full fixed number of generations and return the best individual
    /// of the final population.
    pub fn run<R: Rng + ?Sized>(&self, rng: &mut R) -> Solution {
        let generations = self.config.generations;
        let mut population = self.initialize_population(rng);
        let mut history = Vec::with_capacity(generations + 1);

        for generation in 0..generations {
            let scores = self.evaluate(&population);
            let stats = GenerationStats::from_scores(generation, &scores);

            if generation == 0 || (generation + 1) % LOG_EVERY == 0 {
                debug!(
                    "Generation {}: best fitness = {:.4}, avg fitness = {:.4}",
                    generation + 1,
                    stats.best,
                    stats.mean
                );
            }
            history.push(stats);

            let selected = self.tournament_selection(&scores, rng);
            population = self.breed(&population, &selected, rng);
        }

        let scores = self.evaluate(&population);
        history.push(GenerationStats::from_scores(generations, &scores));

        let best_idx = argmin(&scores);
        let best_fitness = scores[best_idx];

        Solution {
            portions: population.swap_remove(best_idx),
            fitness: best_fitness,
            history,
        }
    }

    /// Run with a generator seeded from `seed`.
    pub fn run_seeded(&self, seed: u64) -> Solution {
        let mut rng = StdRng::seed_from_u64(seed);
        self.run(&mut rng)
    }

    /// Run with a generator seeded from OS entropy.
    pub fn run_unseeded(&self) -> Solution {
        let mut rng = StdRng::from_entropy();
        self.run(&mut rng)
    }

    fn evaluate(&self, population: &[PortionVector]) -> Vec<f64> {
        population.iter().map(|c| self.fitness(c)).collect()
    }

    /// Random gene for a food: continuous for base units, whole servings otherwise.
    fn random_gene<R: Rng + ?Sized>(&self, category: UnitCategory, rng: &mut R) -> f64 {
        let range = self.config.init_range(category);
        match category {
            UnitCategory::BaseUnit => rng.gen_range(range.min..=range.max),
            UnitCategory::DiscreteUnit => {
                rng.gen_range(range.min as i64..=range.max as i64) as f64
            }
        }
    }

    fn initialize_population<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<PortionVector> {
        (0..self.config.population_size)
            .map(|_| {
                self.items
                    .iter()
                    .map(|item| self.random_gene(item.unit_category, rng))
                    .collect()
            })
            .collect()
    }

    /// Fill a breeding pool with tournament winners (indices into the population).
    ///
    /// Each tournament samples distinct individuals; the same individual may win
    /// any number of tournaments.
    fn tournament_selection<R: Rng + ?Sized>(&self, scores: &[f64], rng: &mut R) -> Vec<usize> {
        let n = scores.len();
        let k = self.config.tournament_size.min(n);

        (0..self.config.population_size)
            .map(|_| {
                index::sample(rng, n, k)
                    .iter()
                    .min_by(|&a, &b| {
                        scores[a]
                            .partial_cmp(&scores[b])
                            .unwrap_or(std::cmp::Ordering::Equal)
                    })
                    .unwrap_or(0)
            })
            .collect()
    }

    /// Pair consecutive pool members, recombine and mutate. An odd last member
    /// pairs with the first.
    fn breed<R: Rng + ?Sized>(
        &self,
        population: &[PortionVector],
        selected: &[usize],
        rng: &mut R,
    ) -> Vec<PortionVector> {
        let size = self.config.population_size;
        let mut next = Vec::with_capacity(size + 1);

        for i in (0..selected.len()).step_by(2) {
            let parent1 = &population[selected[i]];
            let parent2 = &population[selected.get(i + 1).copied().unwrap_or(selected[0])];

            let (mut child1, mut child2) = self.crossover(parent1, parent2, rng);
            self.mutate(&mut child1, rng);
            self.mutate(&mut child2, rng);

            next.push(child1);
            next.push(child2);
        }

        next.truncate(size);
        next
    }

    /// Single-point crossover. Vectors shorter than two genes cannot be cut and
    /// are copied.
    fn crossover<R: Rng + ?Sized>(
        &self,
        parent1: &[f64],
        parent2: &[f64],
        rng: &mut R,
    ) -> (PortionVector, PortionVector) {
        let len = parent1.len();
        if rng.r#gen::<f64>() < self.config.crossover_rate && len > 1 {
            let point = rng.gen_range(1..len);
            let child1 = parent1[..point].iter().chain(&parent2[point..]).copied().collect();
            let child2 = parent2[..point].iter().chain(&parent1[point..]).copied().collect();
            (child1, child2)
        } else {
            (parent1.to_vec(), parent2.to_vec())
        }
    }

    fn mutate<R: Rng + ?Sized>(&self, chromosome: &mut [f64], rng: &mut R) {
        for (gene, item) in chromosome.iter_mut().zip(self.items) {
            if rng.r#gen::<f64>() >= self.config.mutation_rate {
                continue;
            }

            let bounds = self.config.bounds(item.unit_category);
            *gene = match item.unit_category {
                UnitCategory::BaseUnit => {
                    let factor = self.config.mutation_factor;
                    bounds.clamp(*gene * rng.gen_range(factor.min..=factor.max))
                }
                UnitCategory::DiscreteUnit => {
                    let step = if rng.gen_bool(0.5) {
                        SERVING_STEP
                    } else {
                        -SERVING_STEP
                    };
                    bounds.clamp(*gene + step)
                }
            };
        }
    }
}

/// Index of the first minimum.
fn argmin(scores: &[f64]) -> usize {
    scores
        .iter()
        .enumerate()
        .min_by(|a, b| a.1.partial_cmp(b.1).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(i, _)| i)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planner::config::PortionBounds;

    fn base_item(name: &str) -> FoodItem {
        FoodItem {
            name: name.to_string(),
            unit_category: UnitCategory::BaseUnit,
            unit: "g".to_string(),
            reference_quantity: 100.0,
            calories: 100.0,
            protein_g: 5.0,
            carbs_g: 15.0,
            fats_g: 2.0,
            sugars_g: 0.0,
            fiber_g: 0.0,
        }
    }

    fn discrete_item(name: &str) -> FoodItem {
        FoodItem {
            unit_category: UnitCategory::DiscreteUnit,
            unit: "BAR".to_string(),
            reference_quantity: 1.0,
            ..base_item(name)
        }
    }

    fn mixed_items() -> Vec<FoodItem> {
        vec![base_item("Rice"), discrete_item("Bar"), base_item("Milk")]
    }

    #[test]
    fn test_new_rejects_empty() {
        let config = GaConfig::default();
        let result = PortionOptimizer::new(&[], NutrientTarget::default(), &config);
        assert!(matches!(result, Err(PlanError::EmptyInput(_))));
    }

    #[test]
    fn test_new_rejects_zero_reference_quantity() {
        let config = GaConfig::default();
        let mut item = base_item("Broken");
        item.reference_quantity = 0.0;
        let items = vec![item];
        let result = PortionOptimizer::new(&items, NutrientTarget::default(), &config);
        assert!(matches!(result, Err(PlanError::DataError { .. })));
    }

    #[test]
    fn test_new_rejects_bad_nutrients() {
        let config = GaConfig::default();

        let mut nan = base_item("NaN Fats");
        nan.fats_g = f64::NAN;
        let items = vec![nan];
        let result = PortionOptimizer::new(&items, NutrientTarget::default(), &config);
        assert!(matches!(result, Err(PlanError::DataError { .. })));

        let mut negative = base_item("Negative Protein");
        negative.protein_g = -1.0;
        let items = vec![negative];
        let result = PortionOptimizer::new(&items, NutrientTarget::default(), &config);
        assert!(matches!(result, Err(PlanError::DataError { .. })));

        let mut fiber = base_item("Bad Fiber");
        fiber.fiber_g = f64::INFINITY;
        let items = vec![fiber];
        assert!(PortionOptimizer::new(&items, NutrientTarget::default(), &config).is_err());
    }

    #[test]
    fn test_new_rejects_init_outside_clamp() {
        let config = GaConfig {
            base_init: PortionBounds::new(400.0, 500.0),
            mutation_rate: 0.0,
            ..Default::default()
        };
        let items = vec![base_item("Oats")];
        let result = PortionOptimizer::new(&items, NutrientTarget::default(), &config);
        assert!(matches!(result, Err(PlanError::InvalidConfig(_))));
    }

    #[test]
    fn test_initial_population_within_init_ranges() {
        let config = GaConfig::default();
        let items = mixed_items();
        let optimizer = PortionOptimizer::new(&items, NutrientTarget::default(), &config).unwrap();
        let mut rng = StdRng::seed_from_u64(7);

        let population = optimizer.initialize_population(&mut rng);
        assert_eq!(population.len(), config.population_size);

        for chromosome in &population {
            assert_eq!(chromosome.len(), items.len());
            assert!((1.0..=300.0).contains(&chromosome[0]));
            assert!((1.0..=20.0).contains(&chromosome[1]));
            assert_eq!(chromosome[1].fract(), 0.0);
            assert!((1.0..=300.0).contains(&chromosome[2]));
        }
    }

    #[test]
    fn test_base_mutation_may_drop_below_init_floor() {
        let config = GaConfig {
            mutation_rate: 1.0,
            ..Default::default()
        };
        let items = vec![base_item("Rice")];
        let optimizer = PortionOptimizer::new(&items, NutrientTarget::default(), &config).unwrap();
        let mut rng = StdRng::seed_from_u64(11);

        let mut chromosome = vec![0.5];
        optimizer.mutate(&mut chromosome, &mut rng);
        assert!(chromosome[0] >= 0.49 && chromosome[0] <= 0.51);

        let mut chromosome = vec![300.0];
        for _ in 0..50 {
            optimizer.mutate(&mut chromosome, &mut rng);
            assert!(chromosome[0] <= 300.0);
        }
    }

    #[test]
    fn test_discrete_mutation_steps_and_clamps() {
        let config = GaConfig {
            mutation_rate: 1.0,
            ..Default::default()
        };
        let items = vec![discrete_item("Bar")];
        let optimizer = PortionOptimizer::new(&items, NutrientTarget::default(), &config).unwrap();
        let mut rng = StdRng::seed_from_u64(3);

        for _ in 0..50 {
            let mut low = vec![1.0];
            optimizer.mutate(&mut low, &mut rng);
            assert!(low[0] == 1.0 || low[0] == 2.0);

            let mut high = vec![20.0];
            optimizer.mutate(&mut high, &mut rng);
            assert!(high[0] == 19.0 || high[0] == 20.0);

            let mut mid = vec![7.0];
            optimizer.mutate(&mut mid, &mut rng);
            assert!(mid[0] == 6.0 || mid[0] == 8.0);
        }
    }

    #[test]
    fn test_crossover_swaps_tails() {
        let config = GaConfig {
            crossover_rate: 1.0,
            ..Default::default()
        };
        let items = vec![base_item("A"), base_item("B")];
        let optimizer = PortionOptimizer::new(&items, NutrientTarget::default(), &config).unwrap();
        let mut rng = StdRng::seed_from_u64(5);

        let (c1, c2) = optimizer.crossover(&[1.0, 2.0], &[10.0, 20.0], &mut rng);
        assert_eq!(c1, vec![1.0, 20.0]);
        assert_eq!(c2, vec![10.0, 2.0]);
    }

    #[test]
    fn test_crossover_copies_without_recombination() {
        let config = GaConfig {
            crossover_rate: 0.0,
            ..Default::default()
        };
        let items = mixed_items();
        let optimizer = PortionOptimizer::new(&items, NutrientTarget::default(), &config).unwrap();
        let mut rng = StdRng::seed_from_u64(5);

        let p1 = [1.0, 2.0, 3.0];
        let p2 = [4.0, 5.0, 6.0];
        let (c1, c2) = optimizer.crossover(&p1, &p2, &mut rng);
        assert_eq!(c1, p1.to_vec());
        assert_eq!(c2, p2.to_vec());
    }

    #[test]
    fn test_single_gene_crossover_copies() {
        let config = GaConfig {
            crossover_rate: 1.0,
            ..Default::default()
        };
        let items = vec![base_item("Solo")];
        let optimizer = PortionOptimizer::new(&items, NutrientTarget::default(), &config).unwrap();
        let mut rng = StdRng::seed_from_u64(1);

        let (c1, c2) = optimizer.crossover(&[42.0], &[7.0], &mut rng);
        assert_eq!(c1, vec![42.0]);
        assert_eq!(c2, vec![7.0]);
    }

    #[test]
    fn test_full_tournament_picks_global_best() {
        let config = GaConfig {
            population_size: 6,
            tournament_size: 6,
            ..Default::default()
        };
        let items = vec![base_item("Rice")];
        let optimizer = PortionOptimizer::new(&items, NutrientTarget::default(), &config).unwrap();
        let mut rng = StdRng::seed_from_u64(9);

        let scores = [5.0, 3.0, 9.0, 0.5, 4.0, 8.0];
        let selected = optimizer.tournament_selection(&scores, &mut rng);
        assert_eq!(selected, vec![3; 6]);
    }

    #[test]
    fn test_odd_population_wraps_to_first() {
        let config = GaConfig {
            population_size: 5,
            tournament_size: 2,
            crossover_rate: 0.0,
            mutation_rate: 0.0,
            ..Default::default()
        };
        let items = vec![base_item("Rice")];
        let optimizer = PortionOptimizer::new(&items, NutrientTarget::default(), &config).unwrap();
        let mut rng = StdRng::seed_from_u64(2);

        let population: Vec<PortionVector> = (0..5).map(|i| vec![i as f64]).collect();
        let selected = vec![4, 3, 2, 1, 0];
        let next = optimizer.breed(&population, &selected, &mut rng);

        assert_eq!(next.len(), 5);
        let genes: Vec<f64> = next.iter().map(|c| c[0]).collect();
        assert_eq!(genes, vec![4.0, 3.0, 2.0, 1.0, 0.0]);
    }

    #[test]
    fn test_odd_pool_last_pairs_with_first() {
        let config = GaConfig {
            population_size: 3,
            tournament_size: 1,
            crossover_rate: 1.0,
            mutation_rate: 0.0,
            ..Default::default()
        };
        let items = vec![base_item("A"), base_item("B")];
        let optimizer = PortionOptimizer::new(&items, NutrientTarget::default(), &config).unwrap();
        let mut rng = StdRng::seed_from_u64(4);

        let population = vec![vec![1.0, 1.0], vec![2.0, 2.0], vec![3.0, 3.0]];
        let next = optimizer.breed(&population, &[0, 1, 2], &mut rng);

        // Third child comes from (pool[2], pool[0]) crossed at the only cut point
        assert_eq!(next.len(), 3);
        assert_eq!(next[2], vec![3.0, 1.0]);
    }

    #[test]
    fn test_seeded_runs_are_reproducible() {
        let config = GaConfig {
            generations: 20,
            ..Default::default()
        };
        let items = mixed_items();
        let target = NutrientTarget::new(500.0, 20.0, 60.0, 10.0);
        let optimizer = PortionOptimizer::new(&items, target, &config).unwrap();

        let a = optimizer.run_seeded(1234);
        let b = optimizer.run_seeded(1234);
        assert_eq!(a, b);
    }

    #[test]
    fn test_history_covers_every_generation() {
        let config = GaConfig {
            generations: 15,
            ..Default::default()
        };
        let items = mixed_items();
        let target = NutrientTarget::new(500.0, 20.0, 60.0, 10.0);
        let optimizer = PortionOptimizer::new(&items, target, &config).unwrap();

        let solution = optimizer.run_seeded(99);
        assert_eq!(solution.history.len(), 16);
        assert_eq!(solution.history.last().unwrap().best, solution.fitness);
        assert_eq!(solution.fitness, optimizer.fitness(&solution.portions));
    }

    #[test]
    fn test_zero_generations_returns_best_initial() {
        let config = GaConfig {
            generations: 0,
            ..Default::default()
        };
        let items = mixed_items();
        let target = NutrientTarget::new(500.0, 20.0, 60.0, 10.0);
        let optimizer = PortionOptimizer::new(&items, target, &config).unwrap();

        let solution = optimizer.run_seeded(8);
        assert_eq!(solution.history.len(), 1);
        assert_eq!(solution.portions.len(), 3);
    }
}
