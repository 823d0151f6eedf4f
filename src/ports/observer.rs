//! Observer port - hooks into the episodic training loop
//!
//! Observers collect data during training without coupling the loop to any
//! particular output (progress bars, reward curves, logs).

use crate::{Result, q_learning::training::TrainingSummary};

/// Observer for monitoring training.
///
/// # Event Sequence
///
/// 1. `on_training_start(episodes)` - once
/// 2. For each episode:
///    - `on_episode_start(episode)`
///    - `on_step(...)` - after every update
///    - `on_episode_end(...)`
/// 3. `on_training_end(summary)` - once
///
/// # Examples
///
/// ```
/// use qlearning_kit::ports::EpisodeObserver;
///
/// #[derive(Default)]
/// struct StepCounter {
///     steps: usize,
/// }
///
/// impl EpisodeObserver<u8, char> for StepCounter {
///     fn on_step(
///         &mut self,
///         _episode: usize,
///         _step: usize,
///         _state: &u8,
///         _action: &char,
///         _reward: f64,
///         _next_state: &u8,
///     ) -> qlearning_kit::Result<()> {
///         self.steps += 1;
///         Ok(())
///     }
/// }
/// ```
pub trait EpisodeObserver<S, A> {
    fn on_training_start(&mut self, _episodes: usize) -> Result<()> {
        Ok(())
    }

    fn on_episode_start(&mut self, _episode: usize) -> Result<()> {
        Ok(())
    }

    /// Called after the learner has been updated with the transition.
    fn on_step(
        &mut self,
        _episode: usize,
        _step: usize,
        _state: &S,
        _action: &A,
        _reward: f64,
        _next_state: &S,
    ) -> Result<()> {
        Ok(())
    }

    /// `truncated` is true when the episode hit the step cap before a
    /// terminal state.
    fn on_episode_end(
        &mut self,
        _episode: usize,
        _steps: usize,
        _total_reward: f64,
        _truncated: bool,
    ) -> Result<()> {
        Ok(())
    }

    fn on_training_end(&mut self, _summary: &TrainingSummary) -> Result<()> {
        Ok(())
    }
}
