//! Hyper-parameters for the Q-learning agents.

use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    utils::check_unit_interval,
};

/// Parameters shared by every agent.
///
/// # Examples
///
/// ```
/// use qlearning_kit::q_learning::LearningParams;
///
/// let params = LearningParams::default()
///     .with_alpha(0.5)
///     .with_gamma(0.9)
///     .with_epsilon(0.0);
/// assert!(params.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LearningParams {
    /// Learning rate α
    pub alpha: f64,
    /// Discount factor γ
    pub gamma: f64,
    /// Exploration probability ε
    pub epsilon: f64,
}

impl Default for LearningParams {
    fn default() -> Self {
        Self {
            alpha: 0.1,
            gamma: 0.9,
            epsilon: 0.1,
        }
    }
}

impl LearningParams {
    pub fn new(alpha: f64, gamma: f64, epsilon: f64) -> Self {
        Self {
            alpha,
            gamma,
            epsilon,
        }
    }

    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn with_gamma(mut self, gamma: f64) -> Self {
        self.gamma = gamma;
        self
    }

    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Check that α, γ and ε all lie in [0, 1].
    pub fn validate(&self) -> Result<()> {
        check_unit_interval("alpha", self.alpha)?;
        check_unit_interval("gamma", self.gamma)?;
        check_unit_interval("epsilon", self.epsilon)?;
        Ok(())
    }
}

/// Parameters for the linear agent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinearParams {
    #[serde(flatten)]
    pub learning: LearningParams,
    /// Multiplicative ε decay applied after every update
    pub decay: f64,
    /// Exploration is only applied in train mode
    pub train_mode: bool,
}

impl Default for LinearParams {
    fn default() -> Self {
        Self {
            learning: LearningParams::default(),
            decay: 1.0,
            train_mode: true,
        }
    }
}

impl LinearParams {
    pub fn new(learning: LearningParams) -> Self {
        Self {
            learning,
            ..Self::default()
        }
    }

    pub fn with_decay(mut self, decay: f64) -> Self {
        self.decay = decay;
        self
    }

    pub fn with_train_mode(mut self, train_mode: bool) -> Self {
        self.train_mode = train_mode;
        self
    }

    pub fn validate(&self) -> Result<()> {
        self.learning.validate()?;
        validate_decay(self.decay)
    }
}

pub(crate) fn validate_decay(decay: f64) -> Result<()> {
    if !decay.is_finite() || decay <= 0.0 || decay > 1.0 {
        return Err(Error::config(format!(
            "decay must be within (0, 1], got {decay}"
        )));
    }
    Ok(())
}
