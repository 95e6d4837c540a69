use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::*;

/// Draws one sample from a normal distribution (Box-Muller transform).
pub(crate) fn sample_normal<R: Rng>(rng: &mut R, mean: f64, std_dev: f64) -> f64 {
    // u1 is in (0, 1] so that its logarithm is finite.
    let u1: f64 = 1.0 - rng.gen::<f64>();
    let u2: f64 = rng.gen::<f64>();
    let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
    mean + std_dev * z
}

pub(crate) fn check_settings(settings: &SimulationSettings) -> Result<(), ProjectionErrors> {
    if settings.sample_size == 0 {
        return Err(ProjectionErrors::InvalidSimulation(
            "the sample size must be positive".to_string(),
        ));
    }
    if !settings.noise_scale.is_finite() || settings.noise_scale < 0.0 {
        return Err(ProjectionErrors::InvalidSimulation(format!(
            "the noise scale must be a non-negative number, got {}",
            settings.noise_scale
        )));
    }
    if !settings.threshold.is_finite() {
        return Err(ProjectionErrors::InvalidSimulation(format!(
            "the threshold must be a finite number, got {}",
            settings.threshold
        )));
    }
    Ok(())
}

/// The fraction of draws from Normal(mean, noise_scale) strictly above the threshold.
fn exceedance_fraction<R: Rng>(rng: &mut R, mean: f64, settings: &SimulationSettings) -> f64 {
    let mut above: u32 = 0;
    for _ in 0..settings.sample_size {
        if sample_normal(rng, mean, settings.noise_scale) > settings.threshold {
            above += 1;
        }
    }
    above as f64 / settings.sample_size as f64
}

/// Estimates, for each category, the probability that its support is above
/// the threshold of the settings.
///
/// The random source is created from `settings.seed` when it is provided,
/// and from the operating system otherwise.
///
/// ```
/// use scenario_projection::*;
///
/// let adjusted = Baseline::new(&[("Conservative", 49.0), ("Labour", 35.0)]);
/// let settings = SimulationSettings::DEFAULT_SETTINGS.with_seed(42);
/// let probabilities = simulate_exceedance_probability(&adjusted, &settings)?;
/// assert_eq!(probabilities.len(), 2);
/// # Ok::<(), ProjectionErrors>(())
/// ```
pub fn simulate_exceedance_probability(
    adjusted: &Baseline,
    settings: &SimulationSettings,
) -> Result<Vec<(String, f64)>, ProjectionErrors> {
    let mut rng = match settings.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    simulate_exceedance_probability_with_rng(adjusted, settings, &mut rng)
}

/// Same as [simulate_exceedance_probability], with a random source provided
/// by the caller. The seed of the settings is ignored.
pub fn simulate_exceedance_probability_with_rng<R: Rng>(
    adjusted: &Baseline,
    settings: &SimulationSettings,
    rng: &mut R,
) -> Result<Vec<(String, f64)>, ProjectionErrors> {
    check_settings(settings)?;
    let mut res: Vec<(String, f64)> = Vec::new();
    for (category, mean) in adjusted.shares.iter() {
        if !mean.is_finite() {
            return Err(ProjectionErrors::InvalidShare(category.clone()));
        }
        let p = exceedance_fraction(rng, *mean, settings);
        debug!(
            "simulate_exceedance_probability: {}: mean {} -> {}",
            category, mean, p
        );
        res.push((category.clone(), p));
    }
    Ok(res)
}
