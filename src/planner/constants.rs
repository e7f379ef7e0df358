/// Individuals per generation.
pub const POPULATION_SIZE: usize = 100;

/// Generations per optimizer run. There is no early stopping.
pub const GENERATIONS: usize = 100;

/// Individuals sampled per tournament.
pub const TOURNAMENT_SIZE: usize = 5;

/// Probability that a pair of parents is recombined.
pub const CROSSOVER_RATE: f64 = 0.8;

/// Per-gene mutation probability.
pub const MUTATION_RATE: f64 = 0.2;

// ─────────────────────────────────────────────────────────────────────────────
// Portion bounds
// ─────────────────────────────────────────────────────────────────────────────

/// Hard clamp for base-unit portions (grams/ml).
pub const MIN_PORTION: f64 = 0.0;
pub const MAX_PORTION: f64 = 300.0;

/// Range base-unit portions are drawn from at initialization.
/// The floor is 1 g, not `MIN_PORTION`.
pub const INIT_MIN_PORTION: f64 = 1.0;

/// Serving multiplier range for discrete units.
pub const MIN_SERVINGS: f64 = 1.0;
pub const MAX_SERVINGS: f64 = 20.0;

/// Multiplicative perturbation range for base-unit mutation.
pub const MUTATION_FACTOR_MIN: f64 = 0.98;
pub const MUTATION_FACTOR_MAX: f64 = 1.02;

/// Discrete-unit mutation step (added or subtracted).
pub const SERVING_STEP: f64 = 1.0;

// ─────────────────────────────────────────────────────────────────────────────
// Planning
// ─────────────────────────────────────────────────────────────────────────────

/// Default meal split of the daily targets.
pub const DEFAULT_MEAL_SHARES: [(&str, f64); 3] =
    [("Breakfast", 0.3), ("Lunch", 0.4), ("Dinner", 0.3)];

/// Allowed slack when checking that meal shares sum to 1.
pub const SHARE_TOLERANCE: f64 = 1e-6;

/// Log generation statistics every N generations.
pub const LOG_EVERY: usize = 10;

/// Minimum Jaro-Winkler similarity for a "did you mean" suggestion.
pub const SUGGESTION_THRESHOLD: f64 = 0.7;
