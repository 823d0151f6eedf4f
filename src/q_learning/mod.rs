//! Q-learning value functions
//!
//! Three interchangeable representations of an action-value function, all
//! trained with one-step temporal difference (TD) updates:
//!
//! | Agent | Representation | Update |
//! |-------|----------------|--------|
//! | [`TabularAgent`] | exact state -> action -> value table | Q ← Q + α(r + γ max Q' − Q) |
//! | [`LinearAgent`] | one weight vector per action | semi-gradient TD with L2 decay |
//! | [`ContinuousAgent`] | one weight vector per output, `atan` squashed | semi-gradient TD |
//!
//! The two discrete agents implement [`crate::ports::Learner`] and can be
//! driven by the same [`TrainingPipeline`]. All three implement [`Persist`].
//!
//! ## Usage Example
//!
//! ```no_run
//! use qlearning_kit::q_learning::{LearningParams, Persist, TabularAgent};
//!
//! let mut agent: TabularAgent<i32, &str> =
//!     TabularAgent::new(vec!["left", "right"], LearningParams::default())?;
//!
//! // corridor of five cells, reward for reaching the right end
//! agent.train(
//!     200,
//!     || 0_i32,
//!     |s, a| if *a == "right" { s + 1 } else { (s - 1).max(0) },
//!     |_, _, next| if *next == 4 { 1.0 } else { 0.0 },
//!     |s| *s == 4,
//! )?;
//!
//! agent.save("corridor.json")?;
//! # Ok::<(), qlearning_kit::Error>(())
//! ```

pub mod config;
pub mod continuous;
pub mod linear;
pub mod q_table;
pub mod serialization;
pub mod tabular;
pub mod training;

// Public re-exports
pub use config::{LearningParams, LinearParams};
pub use continuous::ContinuousAgent;
pub use linear::{LinearAgent, REGULARIZATION};
pub use q_table::QTable;
pub use serialization::{ContinuousSnapshot, LinearSnapshot, Persist, RestoreReport, TabularSnapshot};
pub use tabular::TabularAgent;
pub use training::{
    EpisodeRecord, MAX_EPISODE_STEPS, RewardHistory, TrainingConfig, TrainingPipeline,
    TrainingSummary,
};
