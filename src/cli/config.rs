//! Shared configuration types for CLI commands

use std::path::Path;

use anyhow::{Context, Result};
use clap::ValueEnum;

use crate::{
    adapters::{JsonRepository, MsgPackRepository},
    q_learning::{LinearParams, Persist, RestoreReport},
};

/// Agent representation selectable from the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AgentKind {
    Tabular,
    Linear,
}

/// On-disk encoding of saved tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StorageFormat {
    Json,
    Msgpack,
}

impl StorageFormat {
    pub fn save<P: Persist>(self, agent: &P, path: &Path) -> Result<()> {
        let saved = match self {
            StorageFormat::Json => agent.save_with(&JsonRepository::pretty(), path),
            StorageFormat::Msgpack => agent.save_with(&MsgPackRepository::new(), path),
        };
        saved.with_context(|| format!("Failed to save agent to {}", path.display()))
    }

    pub fn load<P: Persist>(self, agent: &mut P, path: &Path) -> Result<RestoreReport> {
        let loaded = match self {
            StorageFormat::Json => agent.load_with(&JsonRepository::new(), path),
            StorageFormat::Msgpack => agent.load_with(&MsgPackRepository::new(), path),
        };
        loaded.with_context(|| format!("Failed to load agent from {}", path.display()))
    }
}

/// Read hyper-parameters from a JSON file, or fall back to the defaults.
///
/// The file holds a flat object, e.g. `{"alpha": 0.2, "epsilon": 0.3, "decay": 0.999}`;
/// missing keys keep their default values.
pub fn load_params(path: Option<&Path>) -> Result<LinearParams> {
    let Some(path) = path else {
        return Ok(LinearParams::default());
    };

    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    let params: LinearParams = serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
    params
        .validate()
        .with_context(|| format!("Invalid parameters in {}", path.display()))?;
    Ok(params)
}
