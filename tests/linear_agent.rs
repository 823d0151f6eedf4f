mod common;

use common::{assert_close, bias_slope_agent};
use qlearning_kit::{
    Error, LearningParams, LinearAgent, LinearParams, ports::Learner, q_learning::REGULARIZATION,
};

#[test]
fn epsilon_decays_once_per_update() {
    let params = LinearParams::new(LearningParams::new(0.1, 0.9, 0.5)).with_decay(0.9);
    let mut agent = bias_slope_agent(params);

    for _ in 0..5 {
        agent.update(&0, &"left", 0.0, &0).unwrap();
    }
    assert_close(agent.epsilon(), 0.5 * 0.9_f64.powi(5));

    // Choosing does not decay.
    agent.choose_action(&0).unwrap();
    assert_close(agent.epsilon(), 0.5 * 0.9_f64.powi(5));
}

#[test]
fn regularized_weights_settle_under_constant_reward() {
    let params = LinearParams::new(LearningParams::new(0.1, 0.9, 0.0));
    let mut agent = bias_slope_agent(params);

    for _ in 0..5000 {
        agent.update(&1, &"right", 1.0, &1).unwrap();
    }

    // Fixed point of w += α(δφ − λw) with φ = [1, 1] and δ = 1 + 0.9·2w − 2w.
    let expected = 1.0 / (0.2 + REGULARIZATION);
    for &w in agent.weights(&"right").unwrap() {
        assert!(w.is_finite());
        assert!((w - expected).abs() < 1e-6, "weight {w} vs {expected}");
    }
    assert_eq!(agent.weights(&"left").unwrap(), &[0.0, 0.0]);
}

#[test]
fn exploration_rate_matches_epsilon() {
    let params = LinearParams::new(LearningParams::new(0.1, 0.9, 0.4));
    let mut agent = bias_slope_agent(params);

    // All values are zero, so the greedy branch always keeps "left" and
    // "right" only appears through exploration (half of the ε draws).
    let trials = 4000;
    let right = (0..trials)
        .filter(|_| agent.choose_action(&3).unwrap() == "right")
        .count();
    let rate = right as f64 / trials as f64;
    assert!((0.15..0.25).contains(&rate), "exploration rate {rate}");
}

#[test]
fn evaluation_mode_is_greedy() {
    let params = LinearParams::new(LearningParams::new(0.5, 0.0, 1.0)).with_train_mode(false);
    let mut agent = bias_slope_agent(params);
    agent.update(&1, &"right", 1.0, &1).unwrap();

    assert!(agent.value(&1, &"right").unwrap() > agent.value(&1, &"left").unwrap());
    for _ in 0..100 {
        assert_eq!(agent.choose_action(&1).unwrap(), "right");
    }

    agent.set_train_mode(true);
    let explored = (0..200).any(|_| agent.choose_action(&1).unwrap() == "left");
    assert!(explored);
}

#[test]
fn feature_length_mismatch_is_reported() {
    let mut agent = LinearAgent::new(
        vec!['x', 'y'],
        2,
        LinearParams::default(),
        |_: &u8, _: &char| vec![1.0, 2.0, 3.0],
    )
    .unwrap();

    assert!(matches!(
        agent.value(&0, &'x'),
        Err(Error::FeatureLengthMismatch { expected: 2, got: 3 })
    ));
    assert!(agent.update(&0, &'x', 1.0, &0).is_err());
    assert_eq!(agent.weights(&'x').unwrap(), &[0.0, 0.0]);
}

#[test]
fn unregistered_action_is_rejected() {
    let mut agent = bias_slope_agent(LinearParams::default());
    assert!(matches!(agent.value(&0, &"jump"), Err(Error::UnknownAction)));
    assert!(matches!(
        agent.update(&0, &"jump", 1.0, &1),
        Err(Error::UnknownAction)
    ));
}

#[test]
fn constructor_validates_inputs() {
    let features = |_: &u8, _: &u8| vec![1.0];
    assert!(matches!(
        LinearAgent::new(vec![1_u8], 0, LinearParams::default(), features),
        Err(Error::InvalidConfiguration { .. })
    ));
    assert!(matches!(
        LinearAgent::new(Vec::<u8>::new(), 1, LinearParams::default(), features),
        Err(Error::EmptyActionSet)
    ));
    assert!(
        LinearAgent::new(
            vec![1_u8],
            1,
            LinearParams::default().with_decay(0.0),
            features
        )
        .is_err()
    );
}
