//! Train command - Train an agent on the corridor environment

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use crate::{
    cli::{
        config::{AgentKind, StorageFormat, load_params},
        corridor::{Corridor, Move},
        output::{ProgressObserver, print_kv, print_policy, print_summary},
    },
    ports::Learner,
    q_learning::{
        LinearAgent, LinearParams, Persist, RewardHistory, TabularAgent, TrainingConfig,
        TrainingPipeline,
    },
};

#[derive(Parser, Debug)]
#[command(about = "Train a Q-learning agent on the corridor environment")]
pub struct TrainArgs {
    /// Value-function representation
    #[arg(value_enum)]
    pub agent: AgentKind,

    /// Number of training episodes
    #[arg(long, short = 'n', default_value_t = 500)]
    pub episodes: usize,

    /// Number of cells in the corridor
    #[arg(long, default_value_t = 8)]
    pub length: usize,

    /// JSON file with alpha/gamma/epsilon/decay overrides
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Random seed for reproducible exploration
    #[arg(long)]
    pub seed: Option<u64>,

    /// Save the learned table or weights to this file
    #[arg(long, short = 'O')]
    pub output: Option<PathBuf>,

    /// Encoding of the saved file
    #[arg(long, value_enum, default_value_t = StorageFormat::Json)]
    pub format: StorageFormat,

    /// Write the training summary as JSON to this file
    #[arg(long)]
    pub summary: Option<PathBuf>,

    /// Hide the progress bar
    #[arg(long)]
    pub no_progress: bool,
}

pub fn execute(args: TrainArgs) -> Result<()> {
    let params = load_params(args.config.as_deref())?;
    let corridor = Corridor::new(args.length)?;

    match args.agent {
        AgentKind::Tabular => {
            let mut agent = TabularAgent::new(Move::ALL.to_vec(), params.learning)?;
            run(&mut agent, corridor, &args)
        }
        AgentKind::Linear => {
            let mut agent = linear_agent(corridor, params)?;
            run(&mut agent, corridor, &args)
        }
    }
}

/// Linear agent over the corridor's position features
pub(crate) fn linear_agent(
    corridor: Corridor,
    params: LinearParams,
) -> crate::Result<LinearAgent<usize, Move, impl Fn(&usize, &Move) -> Vec<f64>>> {
    LinearAgent::new(
        Move::ALL.to_vec(),
        Corridor::NUM_FEATURES,
        params,
        move |cell: &usize, _: &Move| corridor.features(*cell),
    )
}

fn run<L>(agent: &mut L, mut corridor: Corridor, args: &TrainArgs) -> Result<()>
where
    L: Learner<usize, Move> + Persist,
{
    let mut config = TrainingConfig::new(args.episodes);
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }

    let mut progress = ProgressObserver::new(args.episodes, !args.no_progress)?;
    let mut history = RewardHistory::new();
    let summary = TrainingPipeline::<usize, Move>::new(config)
        .with_observer(&mut progress)
        .with_observer(&mut history)
        .run(agent, &mut corridor)
        .context("Training failed")?;

    print_summary(&summary);
    if let Some(recent) = history.recent_mean_reward(50) {
        print_kv("Recent reward", &format!("{recent:.4}"));
    }
    print_kv("Final epsilon", &format!("{:.4}", agent.epsilon()));
    print_policy(&*agent, &corridor)?;

    if let Some(path) = &args.summary {
        summary
            .save(path)
            .with_context(|| format!("Failed to write summary to {}", path.display()))?;
        info!("summary written to {}", path.display());
    }

    if let Some(path) = &args.output {
        args.format.save(&*agent, path)?;
        println!("\nSaved {} to {}", agent.name(), path.display());
    }

    Ok(())
}
