//! Ports (trait boundaries) between the agents and their collaborators.
//!
//! Agents implement [`Learner`]; storage back-ends implement
//! [`SnapshotRepository`]; the training driver reports to
//! [`EpisodeObserver`]s and pulls transitions from an [`Environment`].

pub mod environment;
pub mod learner;
pub mod observer;
pub mod repository;

pub use environment::{Environment, FnEnvironment};
pub use learner::Learner;
pub use observer::EpisodeObserver;
pub use repository::SnapshotRepository;
