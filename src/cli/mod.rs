//! CLI infrastructure for the `qlearn` demonstration binary
//!
//! Trains and inspects agents on a built-in corridor environment. The agents
//! themselves never depend on this module.

pub mod commands;
pub mod config;
pub mod corridor;
pub mod output;
