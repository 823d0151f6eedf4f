//! Output formatting and progress bars for CLI

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};

use crate::{
    cli::corridor::{Corridor, Move},
    ports::{EpisodeObserver, Learner},
    q_learning::TrainingSummary,
};

/// Create a progress bar for training
pub fn create_training_progress(total_episodes: u64) -> Result<ProgressBar> {
    let pb = ProgressBar::new(total_episodes);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} episodes ({msg})")
            .context("Invalid progress bar template")?
            .progress_chars("=>-"),
    );
    Ok(pb)
}

/// Observer advancing a progress bar once per episode
pub struct ProgressObserver {
    bar: ProgressBar,
}

impl ProgressObserver {
    pub fn new(total_episodes: usize, visible: bool) -> Result<Self> {
        let bar = if visible {
            create_training_progress(total_episodes as u64)?
        } else {
            ProgressBar::hidden()
        };
        Ok(Self { bar })
    }
}

impl<S, A> EpisodeObserver<S, A> for ProgressObserver {
    fn on_episode_end(
        &mut self,
        _episode: usize,
        steps: usize,
        total_reward: f64,
        _truncated: bool,
    ) -> crate::Result<()> {
        self.bar.inc(1);
        self.bar
            .set_message(format!("{steps} steps, reward {total_reward:.2}"));
        Ok(())
    }

    fn on_training_end(&mut self, _summary: &TrainingSummary) -> crate::Result<()> {
        self.bar.finish_and_clear();
        Ok(())
    }
}

/// Print a section header
pub fn print_section(title: &str) {
    println!("\n{}", "=".repeat(60));
    println!("{title}");
    println!("{}", "=".repeat(60));
}

/// Print a key-value pair
pub fn print_kv(key: &str, value: &str) {
    println!("  {:20} {}", format!("{}:", key), value);
}

pub fn print_summary(summary: &TrainingSummary) {
    print_section("Training Summary");
    print_kv("Episodes", &summary.episodes.to_string());
    print_kv("Total steps", &summary.total_steps.to_string());
    print_kv("Mean steps", &format!("{:.2}", summary.mean_steps()));
    print_kv("Mean reward", &format!("{:.4}", summary.mean_reward()));
    print_kv("Truncated", &summary.truncated_episodes.to_string());
}

/// Print the greedy move and both action values for every non-goal cell
pub fn print_policy<L>(agent: &L, corridor: &Corridor) -> crate::Result<()>
where
    L: Learner<usize, Move>,
{
    print_section(&format!("Greedy Policy ({})", agent.name()));
    println!("  {:>4}  {:>5}  {:>10}  {:>10}", "cell", "move", "Q(left)", "Q(right)");
    for cell in 0..corridor.goal() {
        let left = agent.value(&cell, &Move::Left)?;
        let right = agent.value(&cell, &Move::Right)?;
        let arrow = if right > left { "->" } else { "<-" };
        println!("  {cell:>4}  {arrow:>5}  {left:>10.4}  {right:>10.4}");
    }
    Ok(())
}
