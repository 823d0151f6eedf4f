//! Environment port consumed by the training driver

/// Episodic environment driven by the training loop.
///
/// Only the training driver calls these methods; agents never see them.
pub trait Environment<S, A> {
    /// Start state of a fresh episode.
    fn initial_state(&mut self) -> S;

    /// State reached by taking `action` in `state`.
    fn transition(&mut self, state: &S, action: &A) -> S;

    /// Reward for the transition `state --action--> next_state`.
    fn reward(&mut self, state: &S, action: &A, next_state: &S) -> f64;

    /// Whether an episode ends in `state`.
    fn is_terminal(&mut self, state: &S) -> bool;
}

/// [`Environment`] assembled from four closures.
pub struct FnEnvironment<I, T, R, D> {
    initial_state: I,
    transition: T,
    reward: R,
    is_terminal: D,
}

impl<I, T, R, D> FnEnvironment<I, T, R, D> {
    pub fn new(initial_state: I, transition: T, reward: R, is_terminal: D) -> Self {
        Self {
            initial_state,
            transition,
            reward,
            is_terminal,
        }
    }
}

impl<S, A, I, T, R, D> Environment<S, A> for FnEnvironment<I, T, R, D>
where
    I: FnMut() -> S,
    T: FnMut(&S, &A) -> S,
    R: FnMut(&S, &A, &S) -> f64,
    D: FnMut(&S) -> bool,
{
    fn initial_state(&mut self) -> S {
        (self.initial_state)()
    }

    fn transition(&mut self, state: &S, action: &A) -> S {
        (self.transition)(state, action)
    }

    fn reward(&mut self, state: &S, action: &A, next_state: &S) -> f64 {
        (self.reward)(state, action, next_state)
    }

    fn is_terminal(&mut self, state: &S) -> bool {
        (self.is_terminal)(state)
    }
}
