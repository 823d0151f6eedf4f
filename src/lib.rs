//! Q-learning toolkit with interchangeable value-function representations
//!
//! This crate provides:
//! - Tabular, linear and continuous-output Q-learning agents over
//!   caller-defined state and action types
//! - A bounded episodic training driver with pluggable observers
//! - Reversible string keys for states and actions, and JSON / MessagePack
//!   persistence of learned tables and weights
//!
//! Agents own their random source; seed it with `with_seed` for
//! reproducible exploration.

pub mod adapters;
pub mod cli;
pub mod codec;
pub mod error;
pub mod ports;
pub mod q_learning;
pub mod utils;

pub use codec::{ActionIndex, StateCodec};
pub use error::{Error, Result};
pub use q_learning::{
    ContinuousAgent, LearningParams, LinearAgent, LinearParams, Persist, RestoreReport,
    TabularAgent, TrainingConfig, TrainingPipeline, TrainingSummary,
};
