//! View state for data loaded over the network.
//!
//! Overlapping loads are resolved by sequence number: every [`RemoteView::begin`]
//! issues a newer [`Ticket`], and a result is only applied when it carries the
//! newest ticket. A slow response to an old request can therefore never
//! overwrite a newer one. Success replaces the state wholesale; failures are
//! shown until the user retries by hand.

use crate::errors::Result;
use std::{future::Future, sync::Arc};
use tokio::sync::RwLock;
use tracing::{debug, warn};

/// Sequence number identifying one load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

/// What the host should render.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ViewState<T> {
    /// Nothing requested yet
    #[default]
    Idle,
    /// A request is in flight
    Loading,
    /// Latest successful payload
    Loaded(T),
    /// Error panel text; the host offers a retry button
    Failed(String),
    /// Not-found panel text
    NotFound(String),
}

impl<T> ViewState<T> {
    /// The payload, when loaded.
    #[must_use]
    pub const fn data(&self) -> Option<&T> {
        match self {
            Self::Loaded(data) => Some(data),
            _ => None,
        }
    }

    /// Whether a retry makes sense.
    #[must_use]
    pub const fn can_retry(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

/// Latest-request-wins holder for one remote resource.
#[derive(Debug, Default)]
pub struct RemoteView<T> {
    issued: u64,
    state: ViewState<T>,
}

impl<T> RemoteView<T> {
    /// Creates an idle view.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            issued: 0,
            state: ViewState::Idle,
        }
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> &ViewState<T> {
        &self.state
    }

    /// Starts a load: issues a fresh ticket and moves to `Loading`. Any load
    /// still in flight becomes stale.
    pub fn begin(&mut self) -> Ticket {
        self.issued += 1;
        self.state = ViewState::Loading;
        Ticket(self.issued)
    }

    /// Starts a new load after a failure. Returns `None` when the view is not
    /// showing an error.
    pub fn retry(&mut self) -> Option<Ticket> {
        self.state.can_retry().then(|| self.begin())
    }

    /// Whether `ticket` is the newest one issued.
    #[must_use]
    pub const fn is_current(&self, ticket: Ticket) -> bool {
        ticket.0 == self.issued
    }

    /// Applies the outcome of the load identified by `ticket`. Returns `false`
    /// and leaves the state untouched when a newer load has been started.
    pub fn complete(&mut self, ticket: Ticket, result: Result<T>) -> bool {
        if !self.is_current(ticket) {
            debug!(
                "Discarding stale response #{} (latest is #{})",
                ticket.0, self.issued
            );
            return false;
        }

        self.state = match result {
            Ok(data) => ViewState::Loaded(data),
            Err(e) if e.is_not_found() => ViewState::NotFound(e.user_message()),
            Err(e) => {
                warn!("Load #{} failed: {}", ticket.0, e);
                ViewState::Failed(e.user_message())
            }
        };
        true
    }
}

/// A view shared between the host and in-flight loads.
pub type SharedView<T> = Arc<RwLock<RemoteView<T>>>;

/// Creates an idle shared view.
#[must_use]
pub fn shared<T>() -> SharedView<T> {
    Arc::new(RwLock::new(RemoteView::new()))
}

/// Runs `fetch` as a new load of `view`. The lock is not held while the
/// request is in flight. Returns whether the result was applied.
pub async fn load<T, F>(view: &SharedView<T>, fetch: F) -> bool
where
    F: Future<Output = Result<T>>,
{
    let ticket = view.write().await.begin();
    let result = fetch.await;
    view.write().await.complete(ticket, result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::Error;
    use crate::test_utils::init_test_tracing;
    use tokio::sync::oneshot;

    fn api_error(message: &str) -> Error {
        Error::Api {
            status: Some(500),
            message: message.to_string(),
        }
    }

    #[test]
    fn test_success_replaces_state() {
        let mut view = RemoteView::new();
        assert_eq!(view.state(), &ViewState::Idle);

        let t = view.begin();
        assert_eq!(view.state(), &ViewState::Loading);
        assert!(view.complete(t, Ok(vec![1, 2, 3])));
        assert_eq!(view.state().data(), Some(&vec![1, 2, 3]));

        let t = view.begin();
        assert!(view.complete(t, Ok(vec![9])));
        assert_eq!(view.state(), &ViewState::Loaded(vec![9]));
    }

    #[test]
    fn test_stale_response_is_discarded() {
        init_test_tracing();
        let mut view = RemoteView::new();
        let first = view.begin();
        let second = view.begin();

        assert!(view.complete(second, Ok("new")));
        assert!(!view.complete(first, Ok("old")));
        assert_eq!(view.state(), &ViewState::Loaded("new"));
    }

    #[test]
    fn test_stale_error_does_not_replace_newer_data() {
        let mut view = RemoteView::new();
        let first = view.begin();
        let second = view.begin();

        assert!(view.complete(second, Ok(1)));
        assert!(!view.complete(first, Err(api_error("boom"))));
        assert_eq!(view.state(), &ViewState::Loaded(1));
    }

    #[test]
    fn test_failure_and_manual_retry() {
        let mut view: RemoteView<u32> = RemoteView::new();
        assert!(view.retry().is_none());

        let t = view.begin();
        view.complete(t, Err(api_error("Planner offline")));
        assert_eq!(view.state(), &ViewState::Failed("Planner offline".to_string()));

        let retry = view.retry();
        assert!(retry.is_some());
        assert_eq!(view.state(), &ViewState::Loading);
        assert!(view.retry().is_none());
    }

    #[test]
    fn test_not_found_state() {
        let mut view: RemoteView<u32> = RemoteView::new();
        let t = view.begin();
        view.complete(
            t,
            Err(Error::NotFound {
                resource: "route plan",
                id: "3".to_string(),
            }),
        );
        assert_eq!(
            view.state(),
            &ViewState::NotFound("The requested route plan was not found.".to_string())
        );
        assert!(!view.state().can_retry());
    }

    #[tokio::test]
    async fn test_overlapping_loads_latest_wins() {
        let view: SharedView<&str> = shared();
        let (slow_tx, slow_rx) = oneshot::channel::<Result<&str>>();
        let (fast_tx, fast_rx) = oneshot::channel::<Result<&str>>();

        let slow = load(&view, async move {
            slow_rx.await.unwrap_or_else(|_| Err(api_error("dropped")))
        });
        let fast = load(&view, async move {
            fast_rx.await.unwrap_or_else(|_| Err(api_error("dropped")))
        });
        let driver = async move {
            tokio::task::yield_now().await;
            let _ = fast_tx.send(Ok("march"));
            tokio::task::yield_now().await;
            let _ = slow_tx.send(Ok("february"));
        };

        let (slow_applied, fast_applied, ()) = tokio::join!(slow, fast, driver);

        assert!(!slow_applied);
        assert!(fast_applied);
        assert_eq!(view.read().await.state(), &ViewState::Loaded("march"));
    }
}
