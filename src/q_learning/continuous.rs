//! Continuous-output Q-learning agent (experimental)
//!
//! One weight vector per output dimension. The raw linear output is clamped
//! to [-5, 5] and squashed through `atan`, giving a bounded control signal in
//! roughly (-π/2, π/2) per dimension.

use std::{fmt, marker::PhantomData};

use log::debug;
use rand::{Rng, rngs::StdRng};

use crate::{
    Result,
    error::Error,
    q_learning::{
        config::LearningParams,
        serialization::{ContinuousSnapshot, Persist, RestoreReport},
    },
    utils::{build_rng, check_feature_len, check_finite, check_unit_interval, dot},
};

/// Raw outputs are clamped to ±`OUTPUT_CLAMP` before squashing.
pub const OUTPUT_CLAMP: f64 = 5.0;

/// Half-width of the uniform range used for initial weights.
pub const INIT_WEIGHT_RANGE: f64 = 0.01;

/// Continuous-output agent.
///
/// `F` maps a state to `num_features` values; `M` rescales the (squashed or
/// exploratory) output into the caller's actuator range.
///
/// # Examples
///
/// ```
/// use qlearning_kit::q_learning::{ContinuousAgent, LearningParams};
///
/// let mut agent = ContinuousAgent::new(
///     1,
///     2,
///     LearningParams::new(0.1, 0.9, 0.0),
///     |s: &f64| vec![1.0, *s],
///     |u| 10.0 * u,
/// )?
/// .with_seed(5);
///
/// let throttle = agent.act(&0.5, 0)?;
/// assert!(throttle.abs() <= 10.0 * std::f64::consts::FRAC_PI_2);
/// # Ok::<(), qlearning_kit::Error>(())
/// ```
pub struct ContinuousAgent<S, F, M> {
    /// Weight vectors indexed by output dimension
    weights: Vec<Vec<f64>>,
    num_features: usize,
    params: LearningParams,
    train_mode: bool,
    feature_extractor: F,
    action_mapping: M,
    rng: StdRng,
    rng_seed: Option<u64>,
    _state: PhantomData<fn(&S)>,
}

impl<S, F, M> ContinuousAgent<S, F, M>
where
    F: Fn(&S) -> Vec<f64>,
    M: Fn(f64) -> f64,
{
    /// Create an agent with weights drawn uniformly from ±[`INIT_WEIGHT_RANGE`].
    ///
    /// # Errors
    ///
    /// Fails when either dimension is zero or a hyper-parameter is out of
    /// range.
    pub fn new(
        output_dimension: usize,
        num_features: usize,
        params: LearningParams,
        feature_extractor: F,
        action_mapping: M,
    ) -> Result<Self> {
        params.validate()?;
        if output_dimension == 0 {
            return Err(Error::config("output_dimension must be at least 1"));
        }
        if num_features == 0 {
            return Err(Error::config("num_features must be at least 1"));
        }

        let mut agent = Self {
            weights: vec![vec![0.0; num_features]; output_dimension],
            num_features,
            params,
            train_mode: true,
            feature_extractor,
            action_mapping,
            rng: build_rng(None),
            rng_seed: None,
            _state: PhantomData,
        };
        agent.reset_weights();
        Ok(agent)
    }

    /// Re-seed the random source and redraw the initial weights from it.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.set_rng_seed(seed);
        self.reset_weights();
        self
    }

    /// Re-seed the random source without touching the weights.
    pub fn set_rng_seed(&mut self, seed: u64) {
        self.rng = build_rng(Some(seed));
        self.rng_seed = Some(seed);
    }

    pub fn rng_seed(&self) -> Option<u64> {
        self.rng_seed
    }

    /// Redraw every weight uniformly from ±[`INIT_WEIGHT_RANGE`].
    pub fn reset_weights(&mut self) {
        for row in &mut self.weights {
            for w in row.iter_mut() {
                *w = self
                    .rng
                    .random_range(-INIT_WEIGHT_RANGE..=INIT_WEIGHT_RANGE);
            }
        }
    }

    pub fn output_dimension(&self) -> usize {
        self.weights.len()
    }

    pub fn num_features(&self) -> usize {
        self.num_features
    }

    pub fn params(&self) -> LearningParams {
        self.params
    }

    pub fn epsilon(&self) -> f64 {
        self.params.epsilon
    }

    pub fn set_epsilon(&mut self, epsilon: f64) -> Result<()> {
        check_unit_interval("epsilon", epsilon)?;
        self.params.epsilon = epsilon;
        Ok(())
    }

    pub fn train_mode(&self) -> bool {
        self.train_mode
    }

    /// Evaluation mode turns `act` into the mapped greedy estimate.
    pub fn set_train_mode(&mut self, train_mode: bool) {
        self.train_mode = train_mode;
    }

    pub fn weights(&self, output: usize) -> Option<&[f64]> {
        self.weights.get(output).map(Vec::as_slice)
    }

    pub fn features(&self, state: &S) -> Result<Vec<f64>> {
        let features = (self.feature_extractor)(state);
        check_feature_len(self.num_features, &features)?;
        Ok(features)
    }

    fn check_output(&self, output: usize) -> Result<()> {
        if output >= self.weights.len() {
            return Err(Error::OutputIndexOutOfRange {
                index: output,
                outputs: self.weights.len(),
            });
        }
        Ok(())
    }

    fn squash(&self, output: usize, features: &[f64]) -> f64 {
        dot(&self.weights[output], features)
            .clamp(-OUTPUT_CLAMP, OUTPUT_CLAMP)
            .atan()
    }

    /// Pure value estimate for one output dimension.
    ///
    /// No exploration and no action mapping are applied.
    pub fn estimate(&self, state: &S, output: usize) -> Result<f64> {
        self.check_output(output)?;
        let features = self.features(state)?;
        Ok(self.squash(output, &features))
    }

    /// Control signal for one output dimension.
    ///
    /// With probability ε (train mode only) the squashed estimate is replaced
    /// by a uniform draw from [-1, 1]; the result is then passed through the
    /// action mapping.
    pub fn act(&mut self, state: &S, output: usize) -> Result<f64> {
        let mut signal = self.estimate(state, output)?;
        if self.train_mode && self.rng.random::<f64>() < self.params.epsilon {
            signal = self.rng.random_range(-1.0..=1.0);
        }
        Ok((self.action_mapping)(signal))
    }

    /// Control signals for every output dimension, in order.
    pub fn act_all(&mut self, state: &S) -> Result<Vec<f64>> {
        (0..self.weights.len())
            .map(|output| self.act(state, output))
            .collect()
    }

    /// TD update of one output's weights; no regularization term.
    ///
    /// `w[i] ← w[i] + α (r + γ V(s') − V(s)) φ_i(s)`
    pub fn update(&mut self, state: &S, reward: f64, next_state: &S, output: usize) -> Result<()> {
        self.check_output(output)?;
        let features = self.features(state)?;
        let next_features = self.features(next_state)?;

        let current = self.squash(output, &features);
        let next = self.squash(output, &next_features);
        let td_error = reward + self.params.gamma * next - current;

        let alpha = self.params.alpha;
        for (w, phi) in self.weights[output].iter_mut().zip(&features) {
            *w += alpha * td_error * phi;
        }
        Ok(())
    }
}

impl<S, F, M> Persist for ContinuousAgent<S, F, M>
where
    F: Fn(&S) -> Vec<f64>,
    M: Fn(f64) -> f64,
{
    type Snapshot = ContinuousSnapshot;

    fn snapshot(&self) -> Result<ContinuousSnapshot> {
        for (output, row) in self.weights.iter().enumerate() {
            check_finite(&format!("weights for output {output}"), row)?;
        }
        Ok(ContinuousSnapshot(self.weights.clone()))
    }

    /// The snapshot must match the agent's shape exactly.
    fn restore(&mut self, snapshot: ContinuousSnapshot) -> Result<RestoreReport> {
        let rows = snapshot.0;
        if rows.len() != self.weights.len() {
            return Err(Error::SnapshotShape {
                message: format!(
                    "snapshot has {} outputs, expected {}",
                    rows.len(),
                    self.weights.len()
                ),
            });
        }
        if let Some((output, row)) = rows
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != self.num_features)
        {
            return Err(Error::SnapshotShape {
                message: format!(
                    "output {output} has {} weights, expected {}",
                    row.len(),
                    self.num_features
                ),
            });
        }

        let restored = rows.len();
        self.weights = rows;
        debug!("restored {restored} continuous weight vectors");
        Ok(RestoreReport {
            restored,
            dropped: 0,
        })
    }
}

impl<S, F, M> fmt::Debug for ContinuousAgent<S, F, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContinuousAgent")
            .field("weights", &self.weights)
            .field("num_features", &self.num_features)
            .field("params", &self.params)
            .field("train_mode", &self.train_mode)
            .field("rng_seed", &self.rng_seed)
            .finish_non_exhaustive()
    }
}
