// SPDX-FileCopyrightText: 2026 Bookline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory conversation store with per-user turn serialization.
//!
//! The store is the only shared mutable resource in the system. State is
//! keyed by user identifier and lives in process memory only; loss on
//! restart is accepted.

use std::sync::Arc;

use bookline_core::ConversationState;
use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// Exclusively owned mapping from user identifier to conversation state.
///
/// All reads and writes of a user's state go through this store. Callers
/// processing a turn must hold the guard returned by [`acquire`] for the
/// whole classify → advance → send → (maybe remove) sequence so two
/// overlapping deliveries for the same user never both advance the step.
/// Operations for different users never block each other.
///
/// [`acquire`]: ConversationStore::acquire
#[derive(Default)]
pub struct ConversationStore {
    states: DashMap<String, ConversationState>,
    // Per-user turn locks. Entries are kept after a conversation ends:
    // removing one while a waiter still holds its Arc would let a fresh
    // Mutex admit a second concurrent turn for the same user.
    locks: DashMap<String, Arc<Mutex<()>>>,
}

impl ConversationStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquires the turn lock for one user. The guard is owned so it can
    /// be held across await points for the duration of the turn.
    pub async fn acquire(&self, user_id: &str) -> OwnedMutexGuard<()> {
        let lock = self
            .locks
            .entry(user_id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        lock.lock_owned().await
    }

    /// Returns a copy of the user's current state, if any.
    pub fn get(&self, user_id: &str) -> Option<ConversationState> {
        self.states.get(user_id).map(|entry| entry.clone())
    }

    /// Creates (or resets) the user's state to step 0 with empty fields,
    /// overwriting any prior state, and returns a copy.
    pub fn initialize(&self, user_id: &str) -> ConversationState {
        let state = ConversationState::new();
        self.states.insert(user_id.to_string(), state.clone());
        state
    }

    /// True if the user has an active conversation.
    pub fn exists(&self, user_id: &str) -> bool {
        self.states.contains_key(user_id)
    }

    /// Commits a state for the user.
    pub fn put(&self, user_id: &str, state: ConversationState) {
        self.states.insert(user_id.to_string(), state);
    }

    /// Removes the user's conversation.
    pub fn remove(&self, user_id: &str) {
        self.states.remove(user_id);
    }

    /// Number of active conversations.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// True if no conversations are active.
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initialize_and_get() {
        let store = ConversationStore::new();
        assert!(store.get("u1").is_none());
        assert!(!store.exists("u1"));

        let state = store.initialize("u1");
        assert_eq!(state.step, 0);
        assert!(store.exists("u1"));
        assert_eq!(store.get("u1"), Some(state));
    }

    #[test]
    fn initialize_resets_prior_state() {
        let store = ConversationStore::new();
        let mut state = store.initialize("u1");
        state.step = 3;
        state.fields.name = Some("Jane".into());
        store.put("u1", state);

        let fresh = store.initialize("u1");
        assert_eq!(fresh.step, 0);
        assert!(fresh.fields.name.is_none());
    }

    #[test]
    fn remove_deletes_state() {
        let store = ConversationStore::new();
        store.initialize("u1");
        store.remove("u1");
        assert!(!store.exists("u1"));
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn same_user_turns_are_serialized() {
        use std::time::Duration;

        let store = Arc::new(ConversationStore::new());
        store.initialize("u1");

        // Two overlapping turns: each reads the step, yields, then writes
        // step + 1. Without the per-user lock the increments would collide.
        let mut handles = Vec::new();
        for _ in 0..2 {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(async move {
                let _guard = store.acquire("u1").await;
                let mut state = store.get("u1").unwrap();
                let step = state.step;
                tokio::time::sleep(Duration::from_millis(20)).await;
                state.step = step + 1;
                store.put("u1", state);
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(store.get("u1").unwrap().step, 2);
    }

    #[tokio::test]
    async fn different_users_do_not_block() {
        let store = ConversationStore::new();
        // Holding one user's guard must not prevent acquiring another's.
        let _guard_a = store.acquire("a").await;
        let acquired = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            store.acquire("b"),
        )
        .await;
        assert!(acquired.is_ok());
    }
}
