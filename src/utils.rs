//! Utility functions shared by the agents

use rand::{SeedableRng, rngs::StdRng};

use crate::error::{Error, Result};

/// Build the random source owned by an agent.
///
/// A seed makes every exploration draw reproducible; without one the source
/// is seeded from the thread-local generator.
pub fn build_rng(seed: Option<u64>) -> StdRng {
    if let Some(seed) = seed {
        StdRng::seed_from_u64(seed)
    } else {
        StdRng::from_rng(&mut rand::rng())
    }
}

/// Dot product of two equally sized vectors.
///
/// # Examples
///
/// ```
/// use qlearning_kit::utils::dot;
///
/// assert_eq!(dot(&[1.0, 2.0], &[3.0, 4.0]), 11.0);
/// ```
pub fn dot(weights: &[f64], features: &[f64]) -> f64 {
    weights.iter().zip(features).map(|(w, f)| w * f).sum()
}

/// Fail fast when a feature extractor breaks its length contract.
pub fn check_feature_len(expected: usize, features: &[f64]) -> Result<()> {
    if features.len() != expected {
        return Err(Error::FeatureLengthMismatch {
            expected,
            got: features.len(),
        });
    }
    Ok(())
}

/// Check that a hyper-parameter lies in the closed unit interval.
pub(crate) fn check_unit_interval(name: &str, value: f64) -> Result<()> {
    if !value.is_finite() || !(0.0..=1.0).contains(&value) {
        return Err(Error::config(format!(
            "{name} must be within [0, 1], got {value}"
        )));
    }
    Ok(())
}

/// Reject NaN and infinite entries before they reach a snapshot.
///
/// JSON has no encoding for them, so they would be written as `null` and the
/// document could not be loaded back.
pub(crate) fn check_finite(what: &str, values: &[f64]) -> Result<()> {
    if let Some(value) = values.iter().find(|v| !v.is_finite()) {
        return Err(Error::SerializationContext {
            operation: format!("snapshot {what}"),
            message: format!("non-finite value {value} cannot be persisted"),
        });
    }
    Ok(())
}
