use crate::client::BackendClient;
use crate::models::Channel;
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub client: BackendClient,
    pub channels: Arc<Mutex<Vec<Channel>>>,
    refreshes_in_flight: Arc<AtomicUsize>,
}

impl AppState {
    pub fn new(client: BackendClient) -> Self {
        Self {
            client,
            channels: Arc::new(Mutex::new(Vec::new())),
            refreshes_in_flight: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// True while at least one refresh is waiting on the backend.
    pub fn is_busy(&self) -> bool {
        self.refreshes_in_flight.load(Ordering::SeqCst) > 0
    }

    pub(crate) fn begin_refresh(&self) -> RefreshGuard {
        self.refreshes_in_flight.fetch_add(1, Ordering::SeqCst);
        RefreshGuard {
            counter: Arc::clone(&self.refreshes_in_flight),
        }
    }
}

/// Keeps the refresh control disabled and the busy indicator visible until
/// dropped. Dropping runs on every exit path, panics included.
pub struct RefreshGuard {
    counter: Arc<AtomicUsize>,
}

impl Drop for RefreshGuard {
    fn drop(&mut self) {
        self.counter.fetch_sub(1, Ordering::SeqCst);
    }
}
