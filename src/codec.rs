//! Key codec for persisted value tables.
//!
//! Persisted keys are kept separate from in-memory identity: agents compare
//! states and actions with their native `Eq`/`Hash`, while the files written
//! to disk use
//!
//! - [`ActionIndex`]: a bijection from the fixed action list to the 1-based
//!   decimal strings `"1"`, `"2"`, ... assigned in construction order, and
//! - [`StateCodec`]: the state's own serde JSON encoding, base64 wrapped so it
//!   is safe to use as an object key.

use std::{collections::HashMap, hash::Hash};

use base64::{Engine as _, engine::general_purpose::STANDARD};
use serde::{Serialize, de::DeserializeOwned};

use crate::error::{Error, Result};

/// Fixed, ordered action set with a stable string key per action.
#[derive(Debug, Clone)]
pub struct ActionIndex<A> {
    actions: Vec<A>,
    positions: HashMap<A, usize>,
}

impl<A> ActionIndex<A>
where
    A: Eq + Hash + Clone,
{
    /// Build the mapping from the action list, in the order given.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyActionSet`] for an empty list and
    /// [`Error::DuplicateAction`] when the same action appears twice.
    pub fn new(actions: Vec<A>) -> Result<Self> {
        if actions.is_empty() {
            return Err(Error::EmptyActionSet);
        }

        let mut positions = HashMap::with_capacity(actions.len());
        for (index, action) in actions.iter().enumerate() {
            if positions.insert(action.clone(), index).is_some() {
                return Err(Error::DuplicateAction { index });
            }
        }

        Ok(Self { actions, positions })
    }

    /// Actions in registration order.
    pub fn actions(&self) -> &[A] {
        &self.actions
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// Always false: construction rejects empty action lists.
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Zero-based position of an action in the registration order.
    pub fn position_of(&self, action: &A) -> Option<usize> {
        self.positions.get(action).copied()
    }

    /// Persisted key of an action (`"1"` for the first registered action).
    pub fn key_of(&self, action: &A) -> Option<String> {
        self.position_of(action).map(Self::key_at)
    }

    /// Persisted key for a zero-based position.
    pub fn key_at(position: usize) -> String {
        (position + 1).to_string()
    }

    /// Reverse of [`ActionIndex::key_of`].
    ///
    /// Only canonical keys are accepted, so `"01"` or `" 1"` do not resolve.
    pub fn action_of(&self, key: &str) -> Option<&A> {
        self.position_of_key(key).map(|position| &self.actions[position])
    }

    /// Zero-based position for a persisted key.
    pub fn position_of_key(&self, key: &str) -> Option<usize> {
        let index: usize = key.parse().ok()?;
        if index == 0 || index > self.actions.len() || Self::key_at(index - 1) != key {
            return None;
        }
        Some(index - 1)
    }
}

/// String-safe encoding of caller-supplied state values.
#[derive(Debug, Clone, Copy, Default)]
pub struct StateCodec;

impl StateCodec {
    /// Encode a state as base64 of its JSON serialization.
    pub fn encode<S: Serialize>(state: &S) -> Result<String> {
        let bytes = serde_json::to_vec(state)?;
        Ok(STANDARD.encode(bytes))
    }

    /// Decode a key produced by [`StateCodec::encode`].
    pub fn decode<S: DeserializeOwned>(key: &str) -> Result<S> {
        let bytes = STANDARD
            .decode(key)
            .map_err(|e| Error::SerializationContext {
                operation: "decode base64 state key".to_string(),
                message: e.to_string(),
            })?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    use super::*;

    #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
    enum Move {
        Left,
        Right,
        Jump { height: u8 },
    }

    #[test]
    fn test_action_keys_follow_registration_order() {
        let index = ActionIndex::new(vec![Move::Right, Move::Left]).unwrap();
        assert_eq!(index.key_of(&Move::Right).as_deref(), Some("1"));
        assert_eq!(index.key_of(&Move::Left).as_deref(), Some("2"));
        assert_eq!(index.key_of(&Move::Jump { height: 1 }), None);
    }

    #[test]
    fn test_action_keys_reverse() {
        let index = ActionIndex::new(vec!['a', 'b', 'c']).unwrap();
        for action in ['a', 'b', 'c'] {
            let key = index.key_of(&action).unwrap();
            assert_eq!(index.action_of(&key), Some(&action));
        }
    }

    #[test]
    fn test_non_canonical_keys_do_not_resolve() {
        let index = ActionIndex::new(vec![10, 20]).unwrap();
        assert_eq!(index.action_of("0"), None);
        assert_eq!(index.action_of("3"), None);
        assert_eq!(index.action_of("01"), None);
        assert_eq!(index.action_of("+1"), None);
        assert_eq!(index.action_of("one"), None);
    }

    #[test]
    fn test_empty_action_list_rejected() {
        let result = ActionIndex::<u8>::new(Vec::new());
        assert!(matches!(result, Err(Error::EmptyActionSet)));
    }

    #[test]
    fn test_duplicate_action_rejected() {
        let result = ActionIndex::new(vec![1, 2, 1]);
        assert!(matches!(result, Err(Error::DuplicateAction { index: 2 })));
    }

    #[test]
    fn test_state_codec_reverses_structured_states() {
        let state = (3_i32, vec![Move::Jump { height: 2 }, Move::Left]);
        let key = StateCodec::encode(&state).unwrap();
        assert!(key.chars().all(|c| c.is_ascii_alphanumeric() || "+/=".contains(c)));

        let decoded: (i32, Vec<Move>) = StateCodec::decode(&key).unwrap();
        assert_eq!(decoded, state);
    }

    #[test]
    fn test_state_codec_rejects_garbage() {
        assert!(StateCodec::decode::<u32>("not base64!").is_err());

        // valid base64, wrong payload type
        let key = StateCodec::encode(&"text").unwrap();
        assert!(StateCodec::decode::<u32>(&key).is_err());
    }
}
