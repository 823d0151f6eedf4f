//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use qlearning_kit::{
    LearningParams, LinearAgent, LinearParams, TabularAgent,
};

pub const TOLERANCE: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Cell {
    pub row: i32,
    pub col: i32,
}

pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < TOLERANCE,
        "expected {expected}, got {actual}"
    );
}

/// Two-state chain: 'A' moves 0 -> 1 (terminal) paying 1.0, 'B' stays put for 0.0.
pub fn two_state_agent(epsilon: f64) -> TabularAgent<u8, char> {
    TabularAgent::new(vec!['A', 'B'], LearningParams::new(0.5, 0.9, epsilon))
        .expect("valid agent")
        .with_seed(11)
}

pub fn two_state_transition(state: &u8, action: &char) -> u8 {
    match action {
        'A' => 1,
        _ => *state,
    }
}

pub fn two_state_reward(state: &u8, action: &char, _next: &u8) -> f64 {
    if *state == 0 && *action == 'A' { 1.0 } else { 0.0 }
}

/// Two-feature linear agent over integer states: `[1, s]`, identical for every action.
pub fn bias_slope_agent(
    params: LinearParams,
) -> LinearAgent<i32, &'static str, impl Fn(&i32, &&'static str) -> Vec<f64>> {
    LinearAgent::new(vec!["left", "right"], 2, params, |s: &i32, _: &&str| {
        vec![1.0, *s as f64]
    })
    .expect("valid agent")
    .with_seed(5)
}
