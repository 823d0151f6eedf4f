//! Episodic training driver
//!
//! Runs independent rollouts of an [`Environment`] and feeds each transition
//! back into a [`Learner`]. Episodes end on a terminal state or after
//! [`MAX_EPISODE_STEPS`] steps, whichever comes first.

use std::{fs::File, path::Path};

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::{
    Result,
    ports::{Environment, EpisodeObserver, Learner},
};

/// Hard cap on the number of steps in one episode.
pub const MAX_EPISODE_STEPS: usize = 1000;

/// Training configuration
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TrainingConfig {
    /// Number of episodes to run
    pub episodes: usize,

    /// Re-seed the learner before the first episode
    pub seed: Option<u64>,
}

impl TrainingConfig {
    pub fn new(episodes: usize) -> Self {
        Self {
            episodes,
            seed: None,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self::new(100)
    }
}

/// Aggregate result of a training run
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TrainingSummary {
    /// Episodes run
    pub episodes: usize,

    /// Updates applied across all episodes
    pub total_steps: usize,

    /// Episodes stopped by the step cap rather than a terminal state
    pub truncated_episodes: usize,

    /// Sum of every reward observed
    pub total_reward: f64,
}

impl TrainingSummary {
    pub fn mean_steps(&self) -> f64 {
        if self.episodes > 0 {
            self.total_steps as f64 / self.episodes as f64
        } else {
            0.0
        }
    }

    pub fn mean_reward(&self) -> f64 {
        if self.episodes > 0 {
            self.total_reward / self.episodes as f64
        } else {
            0.0
        }
    }

    /// Save summary to JSON file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }
}

/// Outcome of a single episode, as recorded by [`RewardHistory`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EpisodeRecord {
    pub steps: usize,
    pub total_reward: f64,
    pub truncated: bool,
}

/// Observer recording one [`EpisodeRecord`] per episode
#[derive(Debug, Clone, Default)]
pub struct RewardHistory {
    episodes: Vec<EpisodeRecord>,
}

impl RewardHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn episodes(&self) -> &[EpisodeRecord] {
        &self.episodes
    }

    /// Mean reward over the last `window` episodes
    pub fn recent_mean_reward(&self, window: usize) -> Option<f64> {
        let start = self.episodes.len().saturating_sub(window);
        let recent = &self.episodes[start..];
        if recent.is_empty() {
            return None;
        }
        Some(recent.iter().map(|e| e.total_reward).sum::<f64>() / recent.len() as f64)
    }
}

impl<S, A> EpisodeObserver<S, A> for RewardHistory {
    fn on_episode_end(
        &mut self,
        _episode: usize,
        steps: usize,
        total_reward: f64,
        truncated: bool,
    ) -> Result<()> {
        self.episodes.push(EpisodeRecord {
            steps,
            total_reward,
            truncated,
        });
        Ok(())
    }
}

/// Training pipeline for a single learner in a single environment
pub struct TrainingPipeline<'a, S, A> {
    config: TrainingConfig,
    observers: Vec<&'a mut dyn EpisodeObserver<S, A>>,
}

impl<'a, S, A> TrainingPipeline<'a, S, A> {
    /// Create a new training pipeline
    pub fn new(config: TrainingConfig) -> Self {
        Self {
            config,
            observers: Vec::new(),
        }
    }

    /// Add an observer to the pipeline
    pub fn with_observer(mut self, observer: &'a mut dyn EpisodeObserver<S, A>) -> Self {
        self.observers.push(observer);
        self
    }

    /// Run every configured episode
    pub fn run<L, E>(&mut self, learner: &mut L, env: &mut E) -> Result<TrainingSummary>
    where
        L: Learner<S, A> + ?Sized,
        E: Environment<S, A> + ?Sized,
    {
        if let Some(seed) = self.config.seed {
            learner.set_rng_seed(seed);
        }

        info!(
            "training {} for {} episodes",
            learner.name(),
            self.config.episodes
        );
        for observer in &mut self.observers {
            observer.on_training_start(self.config.episodes)?;
        }

        let mut summary = TrainingSummary::default();
        for episode in 0..self.config.episodes {
            let (steps, reward, truncated) = self.run_episode(episode, learner, env)?;

            summary.episodes += 1;
            summary.total_steps += steps;
            summary.total_reward += reward;
            if truncated {
                summary.truncated_episodes += 1;
            }
        }

        for observer in &mut self.observers {
            observer.on_training_end(&summary)?;
        }
        info!(
            "finished {} episodes: {} steps, mean reward {:.4}, {} truncated",
            summary.episodes,
            summary.total_steps,
            summary.mean_reward(),
            summary.truncated_episodes
        );

        Ok(summary)
    }

    fn run_episode<L, E>(
        &mut self,
        episode: usize,
        learner: &mut L,
        env: &mut E,
    ) -> Result<(usize, f64, bool)>
    where
        L: Learner<S, A> + ?Sized,
        E: Environment<S, A> + ?Sized,
    {
        for observer in &mut self.observers {
            observer.on_episode_start(episode)?;
        }

        let mut state = env.initial_state();
        let mut steps = 0;
        let mut total_reward = 0.0;
        let mut terminated = false;

        while steps < MAX_EPISODE_STEPS {
            if env.is_terminal(&state) {
                terminated = true;
                break;
            }

            let action = learner.choose_action(&state)?;
            let next_state = env.transition(&state, &action);
            let reward = env.reward(&state, &action, &next_state);
            learner.update(&state, &action, reward, &next_state)?;

            for observer in &mut self.observers {
                observer.on_step(episode, steps, &state, &action, reward, &next_state)?;
            }

            total_reward += reward;
            state = next_state;
            steps += 1;
        }

        let truncated = !terminated;
        if truncated {
            warn!("episode {episode} stopped after {MAX_EPISODE_STEPS} steps without reaching a terminal state");
        }

        for observer in &mut self.observers {
            observer.on_episode_end(episode, steps, total_reward, truncated)?;
        }

        Ok((steps, total_reward, truncated))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        ports::FnEnvironment,
        q_learning::{LearningParams, TabularAgent},
    };

    #[test]
    fn test_episode_stops_at_terminal_state() {
        let mut agent = TabularAgent::new(vec![1_i32], LearningParams::new(0.5, 0.9, 0.0))
            .unwrap()
            .with_seed(1);
        let mut env = FnEnvironment::new(
            || 0_i32,
            |s: &i32, a: &i32| s + a,
            |_: &i32, _: &i32, next: &i32| if *next == 3 { 1.0 } else { 0.0 },
            |s: &i32| *s >= 3,
        );

        let summary = TrainingPipeline::new(TrainingConfig::new(4))
            .run(&mut agent, &mut env)
            .unwrap();

        assert_eq!(summary.episodes, 4);
        assert_eq!(summary.total_steps, 12);
        assert_eq!(summary.truncated_episodes, 0);
        assert_eq!(summary.total_reward, 4.0);
    }

    #[test]
    fn test_step_cap_truncates_endless_episode() {
        let mut agent = TabularAgent::new(vec![()], LearningParams::default())
            .unwrap()
            .with_seed(2);
        let mut env = FnEnvironment::new(
            || 0_u8,
            |s: &u8, _: &()| *s,
            |_: &u8, _: &(), _: &u8| 0.0,
            |_: &u8| false,
        );
        let mut history = RewardHistory::new();

        let summary = TrainingPipeline::<u8, ()>::new(TrainingConfig::new(2))
            .with_observer(&mut history)
            .run(&mut agent, &mut env)
            .unwrap();

        assert_eq!(summary.total_steps, 2 * MAX_EPISODE_STEPS);
        assert_eq!(summary.truncated_episodes, 2);
        assert_eq!(history.episodes().len(), 2);
        assert!(history.episodes().iter().all(|e| e.truncated));
    }

    #[test]
    fn test_terminal_initial_state_runs_no_steps() {
        let mut agent: TabularAgent<u8, char> =
            TabularAgent::new(vec!['x'], LearningParams::default()).unwrap();
        let summary = agent
            .train(3, || 0_u8, |s, _| *s, |_, _, _| 1.0, |_| true)
            .unwrap();

        assert_eq!(summary.total_steps, 0);
        assert_eq!(agent.table_len(), 0);
    }

    #[test]
    fn test_reward_history_window() {
        let mut history = RewardHistory::new();
        assert_eq!(history.recent_mean_reward(5), None);

        for (i, reward) in [1.0, 2.0, 3.0].into_iter().enumerate() {
            EpisodeObserver::<u8, u8>::on_episode_end(&mut history, i, 1, reward, false).unwrap();
        }
        assert_eq!(history.recent_mean_reward(2), Some(2.5));
        assert_eq!(history.recent_mean_reward(10), Some(2.0));
    }

    #[test]
    fn test_summary_means() {
        let summary = TrainingSummary {
            episodes: 4,
            total_steps: 10,
            truncated_episodes: 0,
            total_reward: 2.0,
        };
        assert_eq!(summary.mean_steps(), 2.5);
        assert_eq!(summary.mean_reward(), 0.5);
        assert_eq!(TrainingSummary::default().mean_reward(), 0.0);
    }
}
