//! Tabular Q-learning agent
//!
//! Exact state -> action -> value lookup, updated with the one-step
//! Q-learning rule.

use std::{collections::HashMap, hash::Hash};

use log::{debug, trace};
use rand::{Rng, rngs::StdRng};
use serde::{Serialize, de::DeserializeOwned};

use crate::{
    Result,
    codec::{ActionIndex, StateCodec},
    error::Error,
    ports::{FnEnvironment, Learner},
    q_learning::{
        config::LearningParams,
        q_table::QTable,
        serialization::{Persist, RestoreReport, TabularSnapshot},
        training::{TrainingConfig, TrainingPipeline, TrainingSummary},
    },
    utils::{build_rng, check_finite, check_unit_interval},
};

/// Tabular Q-learning agent (off-policy TD control)
///
/// # Examples
///
/// ```
/// use qlearning_kit::{
///     ports::Learner,
///     q_learning::{LearningParams, TabularAgent},
/// };
///
/// let mut agent = TabularAgent::new(vec!['L', 'R'], LearningParams::new(0.5, 0.9, 0.0))?;
/// agent.update(&0_u8, &'R', 1.0, &1_u8)?;
///
/// assert_eq!(agent.value(&0, &'R')?, 0.5);
/// assert_eq!(agent.choose_action(&0)?, 'R');
/// # Ok::<(), qlearning_kit::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct TabularAgent<S, A> {
    q_table: QTable<S, A>,
    actions: ActionIndex<A>,
    params: LearningParams,
    rng: StdRng,
    rng_seed: Option<u64>,
}

impl<S, A> TabularAgent<S, A>
where
    S: Eq + Hash + Clone,
    A: Eq + Hash + Clone,
{
    /// Create a new tabular agent over a fixed action list.
    ///
    /// # Errors
    ///
    /// Fails on an empty or duplicated action list and on out-of-range
    /// hyper-parameters.
    pub fn new(actions: Vec<A>, params: LearningParams) -> Result<Self> {
        params.validate()?;
        Ok(Self {
            q_table: QTable::new(),
            actions: ActionIndex::new(actions)?,
            params,
            rng: build_rng(None),
            rng_seed: None,
        })
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.set_rng_seed(seed);
        self
    }

    /// Seed of the random source, if one was set.
    pub fn rng_seed(&self) -> Option<u64> {
        self.rng_seed
    }

    pub fn params(&self) -> LearningParams {
        self.params
    }

    pub fn set_alpha(&mut self, alpha: f64) -> Result<()> {
        check_unit_interval("alpha", alpha)?;
        self.params.alpha = alpha;
        Ok(())
    }

    pub fn set_gamma(&mut self, gamma: f64) -> Result<()> {
        check_unit_interval("gamma", gamma)?;
        self.params.gamma = gamma;
        Ok(())
    }

    pub fn set_epsilon(&mut self, epsilon: f64) -> Result<()> {
        check_unit_interval("epsilon", epsilon)?;
        self.params.epsilon = epsilon;
        Ok(())
    }

    /// Read-only view of the learned table.
    pub fn q_table(&self) -> &QTable<S, A> {
        &self.q_table
    }

    /// Number of stored (state, action) pairs.
    pub fn table_len(&self) -> usize {
        self.q_table.size()
    }

    pub fn state_count(&self) -> usize {
        self.q_table.state_count()
    }

    /// Forget every learned value.
    pub fn clear(&mut self) {
        self.q_table.reset();
    }

    /// Run `episodes` independent rollouts, each capped at
    /// [`MAX_EPISODE_STEPS`](crate::q_learning::MAX_EPISODE_STEPS) steps.
    ///
    /// Every step chooses an action, transitions, computes the reward and
    /// updates the table, in that order.
    pub fn train<I, T, R, D>(
        &mut self,
        episodes: usize,
        initial_state: I,
        transition: T,
        reward: R,
        is_terminal: D,
    ) -> Result<TrainingSummary>
    where
        I: FnMut() -> S,
        T: FnMut(&S, &A) -> S,
        R: FnMut(&S, &A, &S) -> f64,
        D: FnMut(&S) -> bool,
    {
        let mut env = FnEnvironment::new(initial_state, transition, reward, is_terminal);
        TrainingPipeline::new(TrainingConfig::new(episodes)).run(self, &mut env)
    }

    fn random_action(&mut self) -> A {
        let index = self.rng.random_range(0..self.actions.len());
        self.actions.actions()[index].clone()
    }
}

impl<S, A> Learner<S, A> for TabularAgent<S, A>
where
    S: Eq + Hash + Clone,
    A: Eq + Hash + Clone,
{
    fn actions(&self) -> &[A] {
        self.actions.actions()
    }

    fn value(&self, state: &S, action: &A) -> Result<f64> {
        Ok(self.q_table.get(state, action))
    }

    /// ε-greedy over the stored values for `state`.
    ///
    /// Falls back to a uniformly random action when `state` has no stored
    /// values yet.
    fn choose_action(&mut self, state: &S) -> Result<A> {
        if self.rng.random::<f64>() < self.params.epsilon {
            return Ok(self.random_action());
        }

        if let Some(action) = self.q_table.greedy_action(state, self.actions.actions()) {
            return Ok(action.clone());
        }
        Ok(self.random_action())
    }

    fn update(&mut self, state: &S, action: &A, reward: f64, next_state: &S) -> Result<()> {
        if self.actions.position_of(action).is_none() {
            return Err(Error::UnknownAction);
        }

        self.q_table.q_learning_update(
            state.clone(),
            action.clone(),
            reward,
            next_state,
            self.params.alpha,
            self.params.gamma,
        );
        Ok(())
    }

    fn epsilon(&self) -> f64 {
        self.params.epsilon
    }

    fn set_rng_seed(&mut self, seed: u64) {
        self.rng = build_rng(Some(seed));
        self.rng_seed = Some(seed);
    }

    fn name(&self) -> &str {
        "Tabular Q-Learning"
    }
}

impl<S, A> Persist for TabularAgent<S, A>
where
    S: Eq + Hash + Clone + Serialize + DeserializeOwned,
    A: Eq + Hash + Clone,
{
    type Snapshot = TabularSnapshot;

    fn snapshot(&self) -> Result<TabularSnapshot> {
        let mut table = TabularSnapshot::default();
        for (state, action, q) in self.q_table.iter() {
            let Some(action_key) = self.actions.key_of(action) else {
                continue;
            };
            check_finite(&format!("Q-value for action {action_key}"), &[q])?;
            table
                .0
                .entry(StateCodec::encode(state)?)
                .or_default()
                .insert(action_key, q);
        }
        Ok(table)
    }

    fn restore(&mut self, snapshot: TabularSnapshot) -> Result<RestoreReport> {
        let mut report = RestoreReport::default();
        let mut q_values: HashMap<S, HashMap<A, f64>> = HashMap::with_capacity(snapshot.0.len());

        for (state_key, row) in snapshot.0 {
            let state: S = match StateCodec::decode(&state_key) {
                Ok(state) => state,
                Err(e) => {
                    trace!("dropping state key {state_key:?}: {e}");
                    report.dropped += row.len();
                    continue;
                }
            };

            let mut actions = HashMap::with_capacity(row.len());
            for (action_key, q) in row {
                match self.actions.action_of(&action_key) {
                    Some(action) => {
                        actions.insert(action.clone(), q);
                    }
                    None => {
                        trace!("dropping unknown action key {action_key:?}");
                        report.dropped += 1;
                    }
                }
            }

            if actions.is_empty() {
                continue;
            }
            report.restored += actions.len();
            // Distinct keys can decode to one state (`1` and ` 1`); the later
            // row replaces the earlier one, whose entries count as dropped.
            if let Some(replaced) = q_values.insert(state, actions) {
                trace!("state key {state_key:?} replaces an earlier row for the same state");
                report.restored -= replaced.len();
                report.dropped += replaced.len();
            }
        }

        self.q_table.replace(q_values);
        debug!(
            "restored {} tabular Q-values ({} dropped)",
            report.restored, report.dropped
        );
        Ok(report)
    }
}
