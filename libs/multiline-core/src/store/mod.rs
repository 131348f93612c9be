//! Flashcard store.
//!
//! [`Store`] owns the current [`StoreState`] and applies [`Command`]s one at
//! a time, in the order they are dispatched. Observers registered with
//! [`Store::subscribe`] see every state change.

mod command;
mod reducer;

pub use command::Command;

use crate::error::Result;
use crate::types::StoreState;

/// Callback invoked after a command has been applied.
pub type Subscriber = Box<dyn FnMut(&StoreState, &Command) + Send>;

/// Handle returned by [`Store::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// The single owned source of truth for sets and flashcards.
pub struct Store {
    state: StoreState,
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_subscription: u64,
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("state", &self.state)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

impl Store {
    /// Create a store with no sets.
    pub fn new() -> Self {
        Self::with_state(StoreState::initial())
    }

    /// Create a store from a previously saved state.
    pub fn with_state(state: StoreState) -> Self {
        Self {
            state,
            subscribers: Vec::new(),
            next_subscription: 0,
        }
    }

    pub fn state(&self) -> &StoreState {
        &self.state
    }

    pub fn into_state(self) -> StoreState {
        self.state
    }

    /// Apply a command and notify subscribers.
    ///
    /// A rejected command leaves the state unchanged and notifies nobody, as
    /// does a no-op move.
    pub fn dispatch(&mut self, command: Command) -> Result<&StoreState> {
        let next = self.state.apply(&command).map_err(|err| {
            tracing::warn!(command = command.name(), error = %err, "rejected command");
            err
        })?;

        if command.is_noop() {
            tracing::debug!(command = command.name(), "skipped no-op command");
            return Ok(&self.state);
        }
        self.state = next;

        tracing::debug!(
            command = command.name(),
            sets = self.state.sets.len(),
            "applied command"
        );

        for (_, subscriber) in self.subscribers.iter_mut() {
            subscriber(&self.state, &command);
        }

        Ok(&self.state)
    }

    /// Register a callback that runs after every applied command.
    pub fn subscribe<F>(&mut self, subscriber: F) -> SubscriptionId
    where
        F: FnMut(&StoreState, &Command) + Send + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscribers.push((id, Box::new(subscriber)));
        id
    }

    /// Remove a subscription. Returns false if it was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(existing, _)| *existing != id);
        self.subscribers.len() != before
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use crate::types::Flashcard;
    use std::sync::{Arc, Mutex};

    fn recorder(store: &mut Store) -> (SubscriptionId, Arc<Mutex<Vec<&'static str>>>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let id = store.subscribe(move |_, command| {
            sink.lock().unwrap().push(command.name());
        });
        (id, seen)
    }

    #[test]
    fn dispatch_applies_in_order() {
        let mut store = Store::new();
        store.dispatch(Command::create_set("Spanish")).unwrap();
        store
            .dispatch(Command::create_flashcard(Flashcard::new("A", "uno"), 0))
            .unwrap();
        store
            .dispatch(Command::create_flashcard(Flashcard::new("B", "dos"), 0))
            .unwrap();

        let state = store.dispatch(Command::move_flashcard(0, 1, 0)).unwrap();
        let titles: Vec<_> = state.sets[0]
            .flashcards
            .iter()
            .map(|f| f.title.as_str())
            .collect();
        assert_eq!(titles, vec!["B", "A"]);
    }

    #[test]
    fn subscribers_see_applied_commands() {
        let mut store = Store::new();
        let (_, seen) = recorder(&mut store);

        store.dispatch(Command::create_set("A")).unwrap();
        store.dispatch(Command::update_set_title(0, "B")).unwrap();

        assert_eq!(*seen.lock().unwrap(), vec!["create_set", "update_set_title"]);
    }

    #[test]
    fn subscribers_receive_the_new_state() {
        let mut store = Store::new();
        let count = Arc::new(Mutex::new(0));
        let sink = Arc::clone(&count);
        store.subscribe(move |state, _| {
            *sink.lock().unwrap() = state.sets.len();
        });

        store.dispatch(Command::create_set("A")).unwrap();
        store.dispatch(Command::create_set("B")).unwrap();
        assert_eq!(*count.lock().unwrap(), 2);
    }

    #[test]
    fn noop_move_notifies_nobody() {
        let mut store = Store::new();
        store.dispatch(Command::create_set("A")).unwrap();
        store
            .dispatch(Command::create_flashcard(Flashcard::new("x", "y"), 0))
            .unwrap();
        let (_, seen) = recorder(&mut store);
        let before = store.state().clone();

        store.dispatch(Command::move_flashcard(0, 0, 0)).unwrap();

        assert_eq!(store.state(), &before);
        assert!(seen.lock().unwrap().is_empty());
    }

    #[test]
    fn noop_move_out_of_range_is_rejected() {
        let mut store = Store::new();
        let (_, seen) = recorder(&mut store);

        let result = store.dispatch(Command::move_flashcard(7, 7, 9)).map(|_| ());
        assert_eq!(result, Err(StoreError::SetOutOfRange { index: 9, len: 0 }));
        assert_eq!(
            result,
            StoreState::initial()
                .apply(&Command::move_flashcard(7, 7, 9))
                .map(|_| ())
        );

        store.dispatch(Command::create_set("A")).unwrap();
        let result = store.dispatch(Command::move_flashcard(0, 0, 0)).map(|_| ());
        assert_eq!(
            result,
            Err(StoreError::FlashcardOutOfRange {
                set_index: 0,
                index: 0,
                len: 0
            })
        );
        assert_eq!(*seen.lock().unwrap(), vec!["create_set"]);
    }

    #[test]
    fn rejected_command_keeps_state() {
        let mut store = Store::new();
        store.dispatch(Command::create_set("A")).unwrap();
        let (_, seen) = recorder(&mut store);

        let result = store.dispatch(Command::delete_set(5));
        assert!(matches!(result, Err(StoreError::SetOutOfRange { index: 5, len: 1 })));
        assert_eq!(store.state().sets.len(), 1);
        assert!(seen.lock().unwrap().is_empty());
    }

    #[test]
    fn unsubscribe_stops_notifications() {
        let mut store = Store::new();
        let (id, seen) = recorder(&mut store);

        store.dispatch(Command::create_set("A")).unwrap();
        assert!(store.unsubscribe(id));
        assert!(!store.unsubscribe(id));
        store.dispatch(Command::create_set("B")).unwrap();

        assert_eq!(*seen.lock().unwrap(), vec!["create_set"]);
    }
}
