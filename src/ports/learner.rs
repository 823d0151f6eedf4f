//! Learner port - the contract shared by the discrete-action agents

use crate::Result;

/// Value-based learner over caller-defined state and action types.
///
/// The tabular and linear agents implement this trait; they differ only in
/// how [`Learner::value`] is represented and how [`Learner::update`] moves it.
///
/// # Examples
///
/// ```
/// use qlearning_kit::{
///     ports::Learner,
///     q_learning::{LearningParams, TabularAgent},
/// };
///
/// fn greedy_gap<L: Learner<u8, char>>(agent: &L, state: u8) -> qlearning_kit::Result<f64> {
///     let best = agent.max_value(&state)?;
///     let first = agent.value(&state, &agent.actions()[0])?;
///     Ok(best - first)
/// }
///
/// let agent = TabularAgent::new(vec!['a', 'b'], LearningParams::default())?;
/// assert_eq!(greedy_gap(&agent, 0)?, 0.0);
/// # Ok::<(), qlearning_kit::Error>(())
/// ```
pub trait Learner<S, A> {
    /// The fixed action set, in registration order.
    fn actions(&self) -> &[A];

    /// Estimated value of taking `action` in `state`.
    ///
    /// # Errors
    ///
    /// Feature-based learners return an error when their extractor breaks
    /// its length contract or `action` is not registered.
    fn value(&self, state: &S, action: &A) -> Result<f64>;

    /// ε-greedy action selection.
    fn choose_action(&mut self, state: &S) -> Result<A>;

    /// Apply one temporal-difference update for an observed transition.
    fn update(&mut self, state: &S, action: &A, reward: f64, next_state: &S) -> Result<()>;

    /// Current exploration rate.
    fn epsilon(&self) -> f64;

    /// Re-seed the learner's random source.
    fn set_rng_seed(&mut self, seed: u64);

    /// Learner name used in logs.
    fn name(&self) -> &str;

    /// Largest value over all registered actions.
    fn max_value(&self, state: &S) -> Result<f64> {
        let mut best = f64::NEG_INFINITY;
        for action in self.actions() {
            best = best.max(self.value(state, action)?);
        }
        Ok(best)
    }
}
