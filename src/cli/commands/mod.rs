//! Subcommands of the `qlearn` binary

pub mod inspect;
pub mod train;
