mod common;

use common::{Cell, assert_close, two_state_agent, two_state_reward, two_state_transition};
use qlearning_kit::{LearningParams, TabularAgent, ports::Learner};

#[test]
fn two_state_chain_converges_to_goal_value() {
    let mut agent = two_state_agent(0.0);

    let summary = agent
        .train(
            50,
            || 0_u8,
            two_state_transition,
            two_state_reward,
            |s: &u8| *s == 1,
        )
        .unwrap();

    assert_eq!(summary.episodes, 50);
    assert_eq!(summary.truncated_episodes, 0);
    assert!((agent.value(&0, &'A').unwrap() - 1.0).abs() < 1e-6);
    assert_eq!(agent.choose_action(&0).unwrap(), 'A');
}

#[test]
fn terminal_start_leaves_table_empty() {
    let mut agent = two_state_agent(0.5);
    let summary = agent
        .train(
            10,
            || 1_u8,
            two_state_transition,
            two_state_reward,
            |s: &u8| *s == 1,
        )
        .unwrap();

    assert_eq!(summary.total_steps, 0);
    assert_eq!(agent.table_len(), 0);
}

#[test]
fn value_read_never_grows_table() {
    let agent = two_state_agent(0.0);
    for state in 0..10 {
        assert_eq!(agent.value(&state, &'B').unwrap(), 0.0);
    }
    assert_eq!(agent.table_len(), 0);
}

#[test]
fn full_exploration_uses_every_action() {
    let mut agent = TabularAgent::<u8, u8>::new(vec![1, 2, 3, 4], LearningParams::new(0.1, 0.9, 1.0))
        .unwrap()
        .with_seed(3);
    let mut seen = [false; 4];
    for _ in 0..400 {
        let action = agent.choose_action(&0).unwrap();
        seen[(action - 1) as usize] = true;
    }
    assert!(seen.iter().all(|&s| s));
}

#[test]
fn struct_states_hash_by_value() {
    let mut agent: TabularAgent<Cell, &str> =
        TabularAgent::new(vec!["up", "down"], LearningParams::new(1.0, 0.0, 0.0))
            .unwrap()
            .with_seed(1);
    let start = Cell { row: 2, col: 3 };
    agent.update(&start, &"up", 4.0, &Cell { row: 1, col: 3 }).unwrap();

    assert_close(agent.value(&Cell { row: 2, col: 3 }, &"up").unwrap(), 4.0);
    assert_eq!(agent.choose_action(&start).unwrap(), "up");
}

#[test]
fn seeded_agents_explore_identically() {
    let run = |seed| {
        let mut agent = TabularAgent::<u8, u8>::new(vec![0, 1, 2], LearningParams::new(0.1, 0.9, 0.7))
            .unwrap()
            .with_seed(seed);
        (0..32).map(|_| agent.choose_action(&0).unwrap()).collect::<Vec<_>>()
    };
    assert_eq!(run(42), run(42));
}

#[test]
fn exploration_rate_matches_epsilon() {
    let mut agent = TabularAgent::<u8, u8>::new(vec![0, 1, 2, 3], LearningParams::new(1.0, 0.0, 0.3))
        .unwrap()
        .with_seed(21);
    agent.update(&0, &2, 5.0, &9).unwrap();

    let trials = 20_000;
    let mut counts = [0_usize; 4];
    for _ in 0..trials {
        counts[agent.choose_action(&0).unwrap() as usize] += 1;
    }

    // ε·(n−1)/n of the picks leave the dominant action.
    let off_policy = (trials - counts[2]) as f64 / trials as f64;
    assert!((off_policy - 0.3 * 3.0 / 4.0).abs() < 0.02, "off-policy rate {off_policy}");

    // Each action receives ε/n of the picks through exploration.
    for action in [0, 1, 3] {
        let rate = counts[action] as f64 / trials as f64;
        assert!((rate - 0.3 / 4.0).abs() < 0.015, "action {action} rate {rate}");
    }
}
