pub use crate::config::*;

/// A builder for collections of observations.
///
/// ```
/// pub use scenario_projection::builder::Builder;
/// pub use scenario_projection::aggregate_baseline;
/// # use scenario_projection::ProjectionErrors;
///
/// let observations = Builder::new()
///     .add_row("2017-06-05", &[("Conservative", 42.0), ("Labour", 35.0)])
///     .observation("2017-06-06", "Conservative", 44.0)
///     .build();
///
/// let baseline = aggregate_baseline(&observations)?;
/// assert_eq!(baseline.get("Conservative"), Some(43.0));
/// # Ok::<(), ProjectionErrors>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Builder {
    pub(crate) _observations: Vec<Observation>,
}

impl Builder {
    pub fn new() -> Builder {
        Builder {
            _observations: Vec::new(),
        }
    }

    /// Adds a single reading.
    pub fn observation(mut self, entity: &str, category: &str, share: f64) -> Builder {
        self._observations.push(Observation {
            entity: entity.to_string(),
            category: category.to_string(),
            share,
        });
        self
    }

    /// Adds all the readings of one entity (one polling date, one electorate).
    pub fn add_row(self, entity: &str, shares: &[(&str, f64)]) -> Builder {
        shares
            .iter()
            .fold(self, |b, (category, share)| b.observation(entity, category, *share))
    }

    pub fn add_observation(&mut self, observation: &Observation) {
        self._observations.push(observation.clone());
    }

    pub fn build(self) -> Vec<Observation> {
        self._observations
    }
}
