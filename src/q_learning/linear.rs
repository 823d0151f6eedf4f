//! Linear function-approximation Q-learning agent
//!
//! Each discrete action owns one weight vector; the value of a (state, action)
//! pair is the dot product of that vector with the caller's features for the
//! pair. Updates follow the semi-gradient TD rule with a fixed L2 weight decay:
//!
//! ```text
//! w_a[i] ← w_a[i] + α (δ φ_i(s, a) − λ w_a[i])
//! δ      = r + γ max_a' Q(s', a') − Q(s, a)
//! ```
//!
//! Exploration decays geometrically: ε is multiplied by `decay` after every
//! update call.

use std::{fmt, hash::Hash, marker::PhantomData};

use log::{debug, trace};
use rand::{Rng, rngs::StdRng, seq::SliceRandom};

use crate::{
    Result,
    codec::ActionIndex,
    error::Error,
    ports::Learner,
    q_learning::{
        config::{LinearParams, validate_decay},
        serialization::{LinearSnapshot, Persist, RestoreReport},
    },
    utils::{build_rng, check_feature_len, check_finite, check_unit_interval, dot},
};

/// L2 weight-decay coefficient λ applied on every update.
pub const REGULARIZATION: f64 = 0.001;

/// Linear Q-learning agent over a fixed action list.
///
/// `F` maps a (state, action) pair to exactly `num_features` values.
///
/// # Examples
///
/// ```
/// use qlearning_kit::{
///     ports::Learner,
///     q_learning::{LearningParams, LinearAgent, LinearParams},
/// };
///
/// let params = LinearParams::new(LearningParams::new(0.1, 0.9, 0.0));
/// let mut agent = LinearAgent::new(vec![-1_i32, 1], 2, params, |s: &i32, a: &i32| {
///     vec![1.0, f64::from(s * a)]
/// })?;
///
/// agent.update(&1, &1, 1.0, &2)?;
/// assert!(agent.value(&1, &1)? > 0.0);
/// # Ok::<(), qlearning_kit::Error>(())
/// ```
pub struct LinearAgent<S, A, F> {
    actions: ActionIndex<A>,
    /// Weight vectors indexed by action position
    weights: Vec<Vec<f64>>,
    num_features: usize,
    params: LinearParams,
    feature_extractor: F,
    rng: StdRng,
    rng_seed: Option<u64>,
    _state: PhantomData<fn(&S)>,
}

impl<S, A, F> LinearAgent<S, A, F>
where
    A: Eq + Hash + Clone,
    F: Fn(&S, &A) -> Vec<f64>,
{
    /// Create an agent with all weights at zero.
    ///
    /// # Errors
    ///
    /// Fails on an empty or duplicated action list, a zero feature count, and
    /// out-of-range hyper-parameters.
    pub fn new(
        actions: Vec<A>,
        num_features: usize,
        params: LinearParams,
        feature_extractor: F,
    ) -> Result<Self> {
        params.validate()?;
        if num_features == 0 {
            return Err(Error::config("num_features must be at least 1"));
        }

        let actions = ActionIndex::new(actions)?;
        let weights = vec![vec![0.0; num_features]; actions.len()];

        Ok(Self {
            actions,
            weights,
            num_features,
            params,
            feature_extractor,
            rng: build_rng(None),
            rng_seed: None,
            _state: PhantomData,
        })
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.set_rng_seed(seed);
        self
    }

    pub fn rng_seed(&self) -> Option<u64> {
        self.rng_seed
    }

    pub fn num_features(&self) -> usize {
        self.num_features
    }

    pub fn params(&self) -> LinearParams {
        self.params
    }

    pub fn decay(&self) -> f64 {
        self.params.decay
    }

    pub fn train_mode(&self) -> bool {
        self.params.train_mode
    }

    /// Switch between training (ε-greedy) and evaluation (greedy) selection.
    pub fn set_train_mode(&mut self, train_mode: bool) {
        self.params.train_mode = train_mode;
    }

    pub fn set_alpha(&mut self, alpha: f64) -> Result<()> {
        check_unit_interval("alpha", alpha)?;
        self.params.learning.alpha = alpha;
        Ok(())
    }

    pub fn set_gamma(&mut self, gamma: f64) -> Result<()> {
        check_unit_interval("gamma", gamma)?;
        self.params.learning.gamma = gamma;
        Ok(())
    }

    pub fn set_epsilon(&mut self, epsilon: f64) -> Result<()> {
        check_unit_interval("epsilon", epsilon)?;
        self.params.learning.epsilon = epsilon;
        Ok(())
    }

    pub fn set_decay(&mut self, decay: f64) -> Result<()> {
        validate_decay(decay)?;
        self.params.decay = decay;
        Ok(())
    }

    /// Weight vector of a registered action.
    pub fn weights(&self, action: &A) -> Option<&[f64]> {
        self.actions
            .position_of(action)
            .map(|position| self.weights[position].as_slice())
    }

    /// Features for a pair, checked against the configured length.
    pub fn features(&self, state: &S, action: &A) -> Result<Vec<f64>> {
        let features = (self.feature_extractor)(state, action);
        check_feature_len(self.num_features, &features)?;
        Ok(features)
    }

    fn position(&self, action: &A) -> Result<usize> {
        self.actions.position_of(action).ok_or(Error::UnknownAction)
    }

    fn value_at(&self, state: &S, position: usize) -> Result<f64> {
        let action = &self.actions.actions()[position];
        let features = self.features(state, action)?;
        Ok(dot(&self.weights[position], &features))
    }
}

impl<S, A, F> Learner<S, A> for LinearAgent<S, A, F>
where
    A: Eq + Hash + Clone,
    F: Fn(&S, &A) -> Vec<f64>,
{
    fn actions(&self) -> &[A] {
        self.actions.actions()
    }

    fn value(&self, state: &S, action: &A) -> Result<f64> {
        let position = self.position(action)?;
        self.value_at(state, position)
    }

    /// ε-greedy selection; exploration only happens in train mode.
    ///
    /// Actions are scanned in a shuffled order and only a strictly greater
    /// value replaces the incumbent, which starts as the first registered
    /// action.
    fn choose_action(&mut self, state: &S) -> Result<A> {
        if self.params.train_mode && self.rng.random::<f64>() < self.params.learning.epsilon {
            let position = self.rng.random_range(0..self.actions.len());
            return Ok(self.actions.actions()[position].clone());
        }

        let mut order: Vec<usize> = (0..self.actions.len()).collect();
        order.shuffle(&mut self.rng);

        let mut best = 0;
        let mut best_q = self.value_at(state, best)?;
        for position in order {
            let q = self.value_at(state, position)?;
            if q > best_q {
                best_q = q;
                best = position;
            }
        }

        Ok(self.actions.actions()[best].clone())
    }

    fn update(&mut self, state: &S, action: &A, reward: f64, next_state: &S) -> Result<()> {
        let position = self.position(action)?;
        let features = self.features(state, action)?;
        let current_q = dot(&self.weights[position], &features);
        let max_next_q = self.max_value(next_state)?;

        let LinearParams { learning, decay, .. } = self.params;
        let td_error = reward + learning.gamma * max_next_q - current_q;

        for (w, phi) in self.weights[position].iter_mut().zip(&features) {
            *w += learning.alpha * (td_error * phi - REGULARIZATION * *w);
        }

        self.params.learning.epsilon *= decay;
        Ok(())
    }

    fn epsilon(&self) -> f64 {
        self.params.learning.epsilon
    }

    fn set_rng_seed(&mut self, seed: u64) {
        self.rng = build_rng(Some(seed));
        self.rng_seed = Some(seed);
    }

    fn name(&self) -> &str {
        "Linear Q-Learning"
    }
}

impl<S, A, F> Persist for LinearAgent<S, A, F>
where
    A: Eq + Hash + Clone,
    F: Fn(&S, &A) -> Vec<f64>,
{
    type Snapshot = LinearSnapshot;

    fn snapshot(&self) -> Result<LinearSnapshot> {
        let mut snapshot = LinearSnapshot::default();
        for (position, weights) in self.weights.iter().enumerate() {
            let key = ActionIndex::<A>::key_at(position);
            check_finite(&format!("weights for action {key}"), weights)?;
            snapshot.0.insert(key, weights.clone());
        }
        Ok(snapshot)
    }

    /// Actions missing from the snapshot restart from zero weights; a
    /// recognised action whose vector has the wrong length rejects the load.
    fn restore(&mut self, snapshot: LinearSnapshot) -> Result<RestoreReport> {
        let mut report = RestoreReport::default();
        let mut weights = vec![vec![0.0; self.num_features]; self.actions.len()];

        for (key, vector) in snapshot.0 {
            let Some(position) = self.actions.position_of_key(&key) else {
                trace!("dropping unknown action key {key:?}");
                report.dropped += 1;
                continue;
            };
            if vector.len() != self.num_features {
                return Err(Error::SnapshotShape {
                    message: format!(
                        "action {key} has {} weights, expected {}",
                        vector.len(),
                        self.num_features
                    ),
                });
            }
            weights[position] = vector;
            report.restored += 1;
        }

        self.weights = weights;
        debug!(
            "restored {} linear weight vectors ({} dropped)",
            report.restored, report.dropped
        );
        Ok(report)
    }
}

impl<S, A: fmt::Debug, F> fmt::Debug for LinearAgent<S, A, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LinearAgent")
            .field("actions", &self.actions)
            .field("weights", &self.weights)
            .field("num_features", &self.num_features)
            .field("params", &self.params)
            .field("rng_seed", &self.rng_seed)
            .finish_non_exhaustive()
    }
}
