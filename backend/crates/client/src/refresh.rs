//! Single-flight Token Refresh
//!
//! Many requests can hit a 401 at the same moment when the token expires.
//! Only one of them may perform the refresh call; the rest wait on the
//! same lock and then share the winner's outcome. A generation counter
//! tells waiters a refresh succeeded while they were queued; a recorded
//! failure tells them it failed, so they surface that same error instead
//! of driving a second refresh or a second logout.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::Mutex;

use crate::error::{ClientError, ClientResult};

/// What one caller should do after the coordinator resolves its 401
#[derive(Debug)]
pub enum RefreshOutcome {
    /// A fresh token is in place; replay the original request
    Ready,
    /// This caller ran the refresh and it failed
    Failed(ClientError),
    /// A concurrent caller already ran the refresh and it failed
    AlreadyFailed,
}

/// Coordinates concurrent refresh attempts
#[derive(Default)]
pub struct RefreshCoordinator {
    state: Mutex<FlightState>,
    generation: AtomicU64,
}

#[derive(Default)]
struct FlightState {
    /// Generation whose refresh attempt failed, when the latest one did
    failed_at: Option<u64>,
}

impl RefreshCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Generation observed before deciding a refresh is needed
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    /// Forget a recorded failure, e.g. after a fresh login
    pub async fn reset(&self) {
        self.state.lock().await.failed_at = None;
    }

    /// Resolve a 401 observed at generation `seen`. The first caller in
    /// runs `refresh`; everyone queued behind it on the same generation
    /// inherits that attempt's outcome instead of refreshing again.
    pub async fn run<F, Fut>(&self, seen: u64, refresh: F) -> RefreshOutcome
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = ClientResult<()>>,
    {
        let mut state = self.state.lock().await;

        if self.generation.load(Ordering::Acquire) != seen {
            tracing::debug!("Token already refreshed by a concurrent request");
            return RefreshOutcome::Ready;
        }

        if state.failed_at == Some(seen) {
            return RefreshOutcome::AlreadyFailed;
        }

        match refresh().await {
            Ok(()) => {
                state.failed_at = None;
                self.generation.fetch_add(1, Ordering::AcqRel);
                RefreshOutcome::Ready
            }
            Err(e) => {
                state.failed_at = Some(seen);
                RefreshOutcome::Failed(e)
            }
        }
    }
}
