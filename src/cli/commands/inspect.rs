//! Inspect command - Load a saved agent and print its greedy policy

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use crate::{
    cli::{
        commands::train::linear_agent,
        config::{AgentKind, StorageFormat, load_params},
        corridor::{Corridor, Move},
        output::{print_kv, print_policy, print_section},
    },
    ports::Learner,
    q_learning::{Persist, TabularAgent},
};

#[derive(Parser, Debug)]
#[command(about = "Load a saved agent and show its greedy corridor policy")]
pub struct InspectArgs {
    /// Value-function representation the file was saved from
    #[arg(value_enum)]
    pub agent: AgentKind,

    /// Saved table or weights
    pub input: PathBuf,

    /// Number of cells in the corridor
    #[arg(long, default_value_t = 8)]
    pub length: usize,

    /// Encoding of the saved file
    #[arg(long, value_enum, default_value_t = StorageFormat::Json)]
    pub format: StorageFormat,
}

pub fn execute(args: InspectArgs) -> Result<()> {
    let corridor = Corridor::new(args.length)?;
    let params = load_params(None)?;

    match args.agent {
        AgentKind::Tabular => {
            let mut agent = TabularAgent::<usize, Move>::new(Move::ALL.to_vec(), params.learning)?;
            show(&mut agent, &corridor, &args)
        }
        AgentKind::Linear => {
            let mut agent = linear_agent(corridor, params)?;
            show(&mut agent, &corridor, &args)
        }
    }
}

fn show<L>(agent: &mut L, corridor: &Corridor, args: &InspectArgs) -> Result<()>
where
    L: Learner<usize, Move> + Persist,
{
    let report = args.format.load(agent, &args.input)?;

    print_section(&format!("Loaded {}", args.input.display()));
    print_kv("Agent", agent.name());
    print_kv("Restored entries", &report.restored.to_string());
    print_kv("Dropped entries", &report.dropped.to_string());
    print_policy(&*agent, corridor)?;
    Ok(())
}
