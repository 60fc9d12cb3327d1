// ── Session store ──
//
// Owns the current `ImportSession` and is the only place events are
// applied. Writers are serialised by the watch sender's lock, so events
// are applied one at a time in the order `dispatch` acquires it.

use std::sync::Arc;

use tokio::sync::{broadcast, watch};
use tokio_stream::wrappers::WatchStream;
use tracing::{debug, trace};

use crate::event::ImportEvent;
use crate::state::ImportSession;

const EVENT_CHANNEL_SIZE: usize = 256;

/// Single-writer holder of the import session.
pub struct SessionStore {
    state: watch::Sender<Arc<ImportSession>>,
    events: broadcast::Sender<Arc<ImportEvent>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::with_session(ImportSession::default())
    }

    pub fn with_session(session: ImportSession) -> Self {
        let (state, _) = watch::channel(Arc::new(session));
        let (events, _) = broadcast::channel(EVENT_CHANNEL_SIZE);
        Self { state, events }
    }

    /// Apply `event` to the current session and notify subscribers.
    pub fn dispatch(&self, event: ImportEvent) {
        let event = Arc::new(event);
        self.state.send_modify(|session| {
            *session = Arc::new(session.apply(&event));
            // Broadcast under the lock so listeners see events in apply order.
            let _ = self.events.send(Arc::clone(&event));
        });
        match event.error() {
            Some(error) => debug!(event = event.name(), %error, "applied session event"),
            None => trace!(event = event.name(), "applied session event"),
        }
    }

    /// Current session.
    pub fn snapshot(&self) -> Arc<ImportSession> {
        self.state.borrow().clone()
    }

    /// Follow session changes.
    pub fn subscribe(&self) -> SessionStream {
        SessionStream::new(self.state.subscribe())
    }

    /// Receive every event applied from now on.
    pub fn events(&self) -> broadcast::Receiver<Arc<ImportEvent>> {
        self.events.subscribe()
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

/// A subscription to the session.
///
/// Holds the snapshot taken at subscription time and waits for the next one
/// with [`changed`](Self::changed), or converts into a `Stream`.
pub struct SessionStream {
    current: Arc<ImportSession>,
    receiver: watch::Receiver<Arc<ImportSession>>,
}

impl SessionStream {
    fn new(receiver: watch::Receiver<Arc<ImportSession>>) -> Self {
        let current = receiver.borrow().clone();
        Self { current, receiver }
    }

    pub fn current(&self) -> &Arc<ImportSession> {
        &self.current
    }

    /// Wait for the next applied event. `None` once the store is dropped.
    pub async fn changed(&mut self) -> Option<Arc<ImportSession>> {
        self.receiver.changed().await.ok()?;
        let session = self.receiver.borrow_and_update().clone();
        self.current = Arc::clone(&session);
        Some(session)
    }

    pub fn into_stream(self) -> WatchStream<Arc<ImportSession>> {
        WatchStream::new(self.receiver)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::model::{Import, ImportId};

    #[tokio::test]
    async fn dispatch_updates_snapshot_and_broadcasts() {
        let store = SessionStore::new();
        let mut events = store.events();
        let mut sub = store.subscribe();

        store.dispatch(ImportEvent::ImportCreated(Import::new(ImportId(1))));

        let session = sub.changed().await.unwrap();
        assert!(session.is_selected_import(ImportId(1)));
        assert!(store.snapshot().is_selected_import(ImportId(1)));
        assert_eq!(events.recv().await.unwrap().name(), "import_created");
    }

    #[tokio::test]
    async fn earlier_snapshots_are_untouched() {
        let store = SessionStore::new();
        let before = store.snapshot();
        store.dispatch(ImportEvent::LoadingBegan(None));
        assert!(!before.loading);
        assert!(store.snapshot().loading);
    }
}
