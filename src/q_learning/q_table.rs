//! Q-table implementation for tabular temporal difference learning

use std::{collections::HashMap, hash::Hash};

/// Q-table mapping (state, action) pairs to Q-values
///
/// Entries exist only for pairs that have been written at least once; reads
/// of any other pair return 0.0 without touching the table.
#[derive(Debug, Clone)]
pub struct QTable<S, A> {
    /// Q-values: state -> action -> Q-value
    q_values: HashMap<S, HashMap<A, f64>>,
}

impl<S, A> Default for QTable<S, A> {
    fn default() -> Self {
        Self {
            q_values: HashMap::new(),
        }
    }
}

impl<S, A> QTable<S, A>
where
    S: Eq + Hash,
    A: Eq + Hash,
{
    /// Create an empty Q-table
    pub fn new() -> Self {
        Self::default()
    }

    /// Get Q-value for a state-action pair
    pub fn get(&self, state: &S, action: &A) -> f64 {
        self.q_values
            .get(state)
            .and_then(|row| row.get(action))
            .copied()
            .unwrap_or(0.0)
    }

    /// Set Q-value for a state-action pair
    pub fn set(&mut self, state: S, action: A, value: f64) {
        self.q_values
            .entry(state)
            .or_default()
            .insert(action, value);
    }

    /// Stored action values for a state, if any were ever written
    pub fn row(&self, state: &S) -> Option<&HashMap<A, f64>> {
        self.q_values.get(state)
    }

    /// Maximum over the values stored for `state`
    ///
    /// Returns `None` for a state with no stored entries.
    pub fn max_stored(&self, state: &S) -> Option<f64> {
        self.q_values
            .get(state)?
            .values()
            .copied()
            .reduce(f64::max)
    }

    /// Select the greedy action among `actions`
    ///
    /// Ties resolve to the earliest action in `actions`. Returns `None` when
    /// the state has no stored entries, leaving the fallback to the caller.
    pub fn greedy_action<'a>(&self, state: &S, actions: &'a [A]) -> Option<&'a A> {
        let max_q = self.max_stored(state)?;
        actions
            .iter()
            .find(|action| self.get(state, action) == max_q)
    }

    /// Q-learning update: off-policy TD control
    ///
    /// Q(s,a) ← Q(s,a) + α[r + γ max_a' Q(s',a') - Q(s,a)]
    ///
    /// The bootstrap term is 0.0 when `next_state` has never been written.
    pub fn q_learning_update(
        &mut self,
        state: S,
        action: A,
        reward: f64,
        next_state: &S,
        learning_rate: f64,
        discount_factor: f64,
    ) -> f64 {
        let current_q = self.get(&state, &action);
        let max_next_q = self.max_stored(next_state).unwrap_or(0.0);
        let td_target = reward + discount_factor * max_next_q;
        let td_error = td_target - current_q;
        let new_q = current_q + learning_rate * td_error;
        self.set(state, action, new_q);
        new_q
    }

    /// Iterate over every stored (state, action, value) triple
    pub fn iter(&self) -> impl Iterator<Item = (&S, &A, f64)> {
        self.q_values
            .iter()
            .flat_map(|(state, row)| row.iter().map(move |(action, &q)| (state, action, q)))
    }

    /// Replace the whole table
    pub(crate) fn replace(&mut self, q_values: HashMap<S, HashMap<A, f64>>) {
        self.q_values = q_values;
    }

    /// Remove every stored value
    pub fn reset(&mut self) {
        self.q_values.clear();
    }

    /// Total number of stored (state, action) pairs
    pub fn size(&self) -> usize {
        self.q_values.values().map(HashMap::len).sum()
    }

    /// Number of states with at least one stored value
    pub fn state_count(&self) -> usize {
        self.q_values.len()
    }
}
