// ********* Input data structures ***********

use std::collections::HashMap;
use std::error::Error;
use std::fmt::Display;

/// One reading of the support of a category.
///
/// The entity is either a time bucket (a polling date) or a geographic unit
/// (an electorate). Shares of the same entity do not need to sum to 100.
#[derive(PartialEq, Debug, Clone)]
pub struct Observation {
    pub entity: String,
    pub category: String,
    pub share: f64,
}

/// The support of each category, in a fixed order.
///
/// It is either the mean over a collection of observations or the shares
/// of a single row (see [RowShares]).
#[derive(PartialEq, Debug, Clone, Default)]
pub struct Baseline {
    pub shares: Vec<(String, f64)>,
}

impl Baseline {
    pub fn new(shares: &[(&str, f64)]) -> Baseline {
        Baseline {
            shares: shares
                .iter()
                .map(|(name, share)| (name.to_string(), *share))
                .collect(),
        }
    }

    pub fn get(&self, category: &str) -> Option<f64> {
        self.shares
            .iter()
            .find(|(name, _)| name == category)
            .map(|(_, share)| *share)
    }

    pub fn contains(&self, category: &str) -> bool {
        self.shares.iter().any(|(name, _)| name == category)
    }

    pub fn categories(&self) -> Vec<String> {
        self.shares.iter().map(|(name, _)| name.clone()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.shares.is_empty()
    }

    pub fn len(&self) -> usize {
        self.shares.len()
    }
}

/// The shares of one geographic unit, keyed by the name of the unit.
#[derive(PartialEq, Debug, Clone)]
pub struct RowShares {
    pub entity: String,
    pub shares: Baseline,
}

/// Signed deltas to apply to the baseline, per category.
///
/// Categories that are not mentioned are not adjusted.
#[derive(PartialEq, Debug, Clone, Default)]
pub struct Adjustments {
    pub deltas: HashMap<String, f64>,
}

impl Adjustments {
    pub fn none() -> Adjustments {
        Adjustments {
            deltas: HashMap::new(),
        }
    }

    pub fn from_pairs(pairs: &[(&str, f64)]) -> Adjustments {
        Adjustments {
            deltas: pairs
                .iter()
                .map(|(name, delta)| (name.to_string(), *delta))
                .collect(),
        }
    }

    /// The delta for this category, zero if none was given.
    pub fn delta(&self, category: &str) -> f64 {
        self.deltas.get(category).cloned().unwrap_or(0.0)
    }

    pub fn is_empty(&self) -> bool {
        self.deltas.is_empty()
    }
}

// ******** Output data structures *********

/// The outcome of a time-series scenario.
#[derive(PartialEq, Debug, Clone)]
pub struct ScenarioProjection {
    /// The averages after adjustment, clamped at zero.
    pub adjusted: Baseline,
    /// For each category, the fraction of simulated draws above the threshold.
    pub probabilities: Vec<(String, f64)>,
}

/// The predicted outcome for one geographic unit.
#[derive(PartialEq, Debug, Clone)]
pub struct RowPrediction {
    pub entity: String,
    pub adjusted: Baseline,
    pub winner: String,
}

/// A geographic unit after the join with the predictions.
///
/// The winner is `None` when no prediction matched the unit.
#[derive(PartialEq, Debug, Clone)]
pub struct JoinedUnit<'a, G> {
    pub unit: &'a G,
    pub key: Option<String>,
    pub winner: Option<String>,
}

impl<'a, G> JoinedUnit<'a, G> {
    pub fn color(&self, policy: &ColorPolicy) -> String {
        policy.color_for(self.winner.as_deref())
    }
}

/// Errors that prevent a projection from completing.
#[derive(PartialEq, Debug, Clone)]
pub enum ProjectionErrors {
    /// A row without any category to choose from.
    EmptyRow,
    /// A category was requested but is not present in the row.
    MissingCategory(String),
    /// A share that is not a finite number.
    InvalidShare(String),
    /// The simulation parameters cannot produce an estimate.
    InvalidSimulation(String),
}

impl Error for ProjectionErrors {}

impl Display for ProjectionErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProjectionErrors::EmptyRow => write!(f, "no category to choose a winner from"),
            ProjectionErrors::MissingCategory(name) => {
                write!(f, "category {:?} is missing from the row", name)
            }
            ProjectionErrors::InvalidShare(name) => {
                write!(f, "share for {:?} is not a finite number", name)
            }
            ProjectionErrors::InvalidSimulation(msg) => {
                write!(f, "invalid simulation settings: {}", msg)
            }
        }
    }
}

// ********* Configuration **********

/// How to choose between categories with exactly the same adjusted share.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum TieBreakMode {
    /// The first category, in the order of the requested categories (or of
    /// the row when no categories are requested).
    UseCategoryOrder,
    /// The category with the smallest name.
    Lexicographic,
}

/// Parameters of the exceedance simulation.
#[derive(PartialEq, Debug, Clone)]
pub struct SimulationSettings {
    /// Draws strictly above this value count as exceeding it.
    pub threshold: f64,
    /// Number of draws per category.
    pub sample_size: u32,
    /// Standard deviation of the noise around each share.
    pub noise_scale: f64,
    /// Fixes the random source. When absent, the source is seeded from the
    /// operating system and results vary between runs.
    pub seed: Option<u64>,
}

impl SimulationSettings {
    pub const DEFAULT_SETTINGS: SimulationSettings = SimulationSettings {
        threshold: 50.0,
        sample_size: 10_000,
        noise_scale: 2.0,
        seed: None,
    };

    pub fn with_seed(&self, seed: u64) -> SimulationSettings {
        SimulationSettings {
            seed: Some(seed),
            ..self.clone()
        }
    }
}

impl Default for SimulationSettings {
    fn default() -> Self {
        SimulationSettings::DEFAULT_SETTINGS
    }
}

/// Colors used to draw each winner on a map.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ColorPolicy {
    pub colors: HashMap<String, String>,
    /// Used for units without a winner and for winners without a color.
    pub neutral: String,
}

impl ColorPolicy {
    pub fn color_for(&self, winner: Option<&str>) -> String {
        winner
            .and_then(|name| self.colors.get(name))
            .cloned()
            .unwrap_or_else(|| self.neutral.clone())
    }
}
