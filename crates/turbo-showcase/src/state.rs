//! Load state machine shared by the listing and detail views.
//!
//! A view starts out loading, settles into ready or failed, and may go from
//! failed back to loading on retry. Every load is tagged with a
//! [`LoadTicket`]; completing with a ticket from an earlier load, or after
//! the view is torn down, is ignored.

use thiserror::Error;
use turbo_data::FetchError;

/// Why a view failed to load.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ViewError {
    /// The server has no such product.
    #[error("Product not found")]
    NotFound,

    /// Any other failure, with the message shown to the user.
    #[error("{0}")]
    Failed(String),
}

impl ViewError {
    /// Classify a fetch failure, separating 404 from everything else.
    pub fn from_fetch(err: &FetchError) -> Self {
        if err.is_not_found() {
            ViewError::NotFound
        } else {
            ViewError::Failed(err.to_string())
        }
    }

    /// Whether trying again could help.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ViewError::Failed(_))
    }
}

/// Illegal transitions of the load state machine.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewStateError {
    #[error("A load is already in progress")]
    LoadInProgress,

    #[error("Retry is only possible after a failed load")]
    NotFailed,

    #[error("This failure cannot be retried")]
    NotRetryable,

    #[error("The view has been torn down")]
    TornDown,
}

/// Load state of a view.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadState<T> {
    Loading,
    Ready(T),
    Failed(ViewError),
}

impl<T> LoadState<T> {
    pub fn as_str(&self) -> &'static str {
        match self {
            LoadState::Loading => "loading",
            LoadState::Ready(_) => "ready",
            LoadState::Failed(_) => "error",
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    /// The loaded value, if ready.
    pub fn ready(&self) -> Option<&T> {
        match self {
            LoadState::Ready(value) => Some(value),
            _ => None,
        }
    }

    /// The failure, if failed.
    pub fn error(&self) -> Option<&ViewError> {
        match self {
            LoadState::Failed(err) => Some(err),
            _ => None,
        }
    }
}

/// Proof that a load was started; pass it back to complete that load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    generation: u64,
}

impl LoadTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Load state plus the bookkeeping that guards against stale responses.
#[derive(Debug, Clone)]
pub struct ViewState<T> {
    state: LoadState<T>,
    generation: u64,
    in_flight: bool,
    torn_down: bool,
}

impl<T> Default for ViewState<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ViewState<T> {
    /// A view that is about to load; no load is in flight yet.
    pub fn new() -> Self {
        Self {
            state: LoadState::Loading,
            generation: 0,
            in_flight: false,
            torn_down: false,
        }
    }

    pub fn state(&self) -> &LoadState<T> {
        &self.state
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    /// Start a load, discarding whatever was loaded before.
    pub fn begin_load(&mut self) -> Result<LoadTicket, ViewStateError> {
        if self.torn_down {
            return Err(ViewStateError::TornDown);
        }
        if self.in_flight {
            return Err(ViewStateError::LoadInProgress);
        }
        self.generation += 1;
        self.in_flight = true;
        self.state = LoadState::Loading;
        Ok(LoadTicket {
            generation: self.generation,
        })
    }

    /// Start a new load after a failure.
    pub fn retry(&mut self) -> Result<LoadTicket, ViewStateError> {
        match &self.state {
            LoadState::Failed(err) if err.is_retryable() => self.begin_load(),
            LoadState::Failed(_) => Err(ViewStateError::NotRetryable),
            _ => Err(ViewStateError::NotFailed),
        }
    }

    /// Settle the load identified by `ticket`.
    ///
    /// Returns `false` and leaves the state untouched when the ticket is
    /// stale or the view was torn down.
    pub fn complete(&mut self, ticket: LoadTicket, result: Result<T, ViewError>) -> bool {
        if self.torn_down || !self.in_flight || ticket.generation != self.generation {
            tracing::warn!(
                ticket = ticket.generation,
                current = self.generation,
                torn_down = self.torn_down,
                "dropping stale load result"
            );
            return false;
        }
        self.in_flight = false;
        self.state = match result {
            Ok(value) => LoadState::Ready(value),
            Err(err) => LoadState::Failed(err),
        };
        true
    }

    /// Stop accepting results; outstanding tickets become stale.
    pub fn teardown(&mut self) {
        self.torn_down = true;
        self.in_flight = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_starts_loading() {
        let view: ViewState<u32> = ViewState::new();
        assert!(view.state().is_loading());
        assert!(!view.is_in_flight());
    }

    #[test]
    fn test_load_then_ready() {
        let mut view = ViewState::new();
        let ticket = view.begin_load().unwrap();
        assert!(view.complete(ticket, Ok(7)));
        assert_eq!(view.state(), &LoadState::Ready(7));
    }

    #[test]
    fn test_second_load_rejected_while_in_flight() {
        let mut view: ViewState<u32> = ViewState::new();
        view.begin_load().unwrap();
        assert_eq!(view.begin_load(), Err(ViewStateError::LoadInProgress));
    }

    #[test]
    fn test_retry_only_from_failed() {
        let mut view = ViewState::new();
        assert_eq!(view.retry(), Err(ViewStateError::NotFailed));

        let ticket = view.begin_load().unwrap();
        view.complete(ticket, Err(ViewError::Failed("Failed to fetch: Bad Gateway".into())));
        assert_eq!(view.state().as_str(), "error");

        let ticket = view.retry().unwrap();
        assert!(view.state().is_loading());
        assert!(view.complete(ticket, Ok("done")));
        assert_eq!(view.retry(), Err(ViewStateError::NotFailed));
    }

    #[test]
    fn test_not_found_cannot_be_retried() {
        let mut view: ViewState<u32> = ViewState::new();
        let ticket = view.begin_load().unwrap();
        view.complete(ticket, Err(ViewError::NotFound));
        assert_eq!(view.retry(), Err(ViewStateError::NotRetryable));
    }

    #[test]
    fn test_stale_ticket_is_ignored() {
        let mut view = ViewState::new();
        let first = view.begin_load().unwrap();
        assert!(view.complete(first, Err(ViewError::Failed("timeout".into()))));

        let second = view.retry().unwrap();
        assert!(!view.complete(first, Ok(1)));
        assert!(view.state().is_loading());
        assert!(view.complete(second, Ok(2)));
        assert_eq!(view.state().ready(), Some(&2));
    }

    #[test]
    fn test_completion_after_teardown_is_ignored() {
        let mut view = ViewState::new();
        let ticket = view.begin_load().unwrap();
        view.teardown();
        assert!(!view.complete(ticket, Ok(5)));
        assert!(view.state().is_loading());
        assert_eq!(view.begin_load(), Err(ViewStateError::TornDown));
    }

    #[test]
    fn test_failure_discards_previous_value() {
        let mut view = ViewState::new();
        let ticket = view.begin_load().unwrap();
        view.complete(ticket, Ok(vec![1, 2, 3]));

        let ticket = view.begin_load().unwrap();
        view.complete(ticket, Err(ViewError::Failed("Failed to fetch: Service Unavailable".into())));
        assert!(view.state().ready().is_none());
        assert_eq!(
            view.state().error().map(ToString::to_string).as_deref(),
            Some("Failed to fetch: Service Unavailable")
        );
    }
}
