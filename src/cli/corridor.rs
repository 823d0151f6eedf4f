//! One-dimensional corridor used by the CLI.
//!
//! Cells `0..length`; every episode starts in cell 0 and ends on reaching the
//! last cell, which pays +1. Every other step costs 0.01.

use serde::{Deserialize, Serialize};

use crate::{Error, Result, ports::Environment};

/// Reward for entering the goal cell
pub const GOAL_REWARD: f64 = 1.0;

/// Reward for any other step
pub const STEP_REWARD: f64 = -0.01;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Move {
    Left,
    Right,
}

impl Move {
    pub const ALL: [Move; 2] = [Move::Left, Move::Right];
}

#[derive(Debug, Clone, Copy)]
pub struct Corridor {
    length: usize,
}

impl Corridor {
    /// Features produced by [`Corridor::features`]
    pub const NUM_FEATURES: usize = 3;

    pub fn new(length: usize) -> Result<Self> {
        if length < 2 {
            return Err(Error::config(format!(
                "corridor needs at least 2 cells, got {length}"
            )));
        }
        Ok(Self { length })
    }

    pub fn length(&self) -> usize {
        self.length
    }

    pub fn goal(&self) -> usize {
        self.length - 1
    }

    /// Bias, normalized position and its square.
    pub fn features(&self, cell: usize) -> Vec<f64> {
        let x = cell as f64 / self.goal() as f64;
        vec![1.0, x, x * x]
    }
}

impl Environment<usize, Move> for Corridor {
    fn initial_state(&mut self) -> usize {
        0
    }

    fn transition(&mut self, state: &usize, action: &Move) -> usize {
        match action {
            Move::Left => state.saturating_sub(1),
            Move::Right => (state + 1).min(self.goal()),
        }
    }

    fn reward(&mut self, _state: &usize, _action: &Move, next_state: &usize) -> f64 {
        if *next_state == self.goal() {
            GOAL_REWARD
        } else {
            STEP_REWARD
        }
    }

    fn is_terminal(&mut self, state: &usize) -> bool {
        *state == self.goal()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_walls_clamp_moves() {
        let mut corridor = Corridor::new(3).unwrap();
        assert_eq!(corridor.transition(&0, &Move::Left), 0);
        assert_eq!(corridor.transition(&1, &Move::Right), 2);
        assert_eq!(corridor.transition(&2, &Move::Right), 2);
    }

    #[test]
    fn test_goal_pays_and_terminates() {
        let mut corridor = Corridor::new(4).unwrap();
        assert_eq!(corridor.reward(&2, &Move::Right, &3), GOAL_REWARD);
        assert_eq!(corridor.reward(&1, &Move::Right, &2), STEP_REWARD);
        assert!(corridor.is_terminal(&3));
        assert!(!corridor.is_terminal(&0));
    }

    #[test]
    fn test_features_span_unit_interval() {
        let corridor = Corridor::new(5).unwrap();
        assert_eq!(corridor.features(0), vec![1.0, 0.0, 0.0]);
        assert_eq!(corridor.features(4), vec![1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_too_short_rejected() {
        assert!(Corridor::new(1).is_err());
    }
}
