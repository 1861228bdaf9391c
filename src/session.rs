//! Screen-lifecycle plumbing for the location fetch: the linear
//! loading → permission → ready sequence, plus cancellation so results
//! arriving after the screen is gone are discarded instead of applied.

use crate::geostamp::GeoStamp;
use crate::location::LocationError;
use crate::permissions::Capability;
use crate::structs::LocationRecord;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::warn;

/// Cancellation token tied to a screen's lifetime.
pub type CancelToken = Arc<AtomicBool>;

/// A fresh, untriggered token.
pub fn new_cancel_token() -> CancelToken {
    Arc::new(AtomicBool::new(false))
}

/// Checks if the cancellation token has been triggered.
#[inline]
pub fn is_cancelled(token: &CancelToken) -> bool {
    token.load(Ordering::SeqCst)
}

/// Triggers the token; pending operations discard their results.
pub fn cancel(token: &CancelToken) {
    token.store(true, Ordering::SeqCst);
}

/// The states of the location-fetch screen, in the only order they can
/// occur.
#[derive(Debug, Clone, PartialEq)]
pub enum ScreenState {
    /// Waiting for the fix; also where the session stays forever when a
    /// collaborator fails without a permission denial (no retries).
    Loading,
    /// Permission denied; the dependent screen renders a message instead.
    PermissionDenied(Capability),
    /// Location resolved; the composite screen may render.
    Ready(LocationRecord),
}

impl ScreenState {
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }
}

/// Drives one location fetch on behalf of a screen.
///
/// Owns the screen's cancellation token. Once the session is cancelled,
/// every subsequent state update is a no-op, so a fetch resolving after
/// the screen unmounted cannot resurrect it.
pub struct LocationSession {
    state: ScreenState,
    token: CancelToken,
}

impl LocationSession {
    pub fn new() -> Self {
        Self {
            state: ScreenState::Loading,
            token: new_cancel_token(),
        }
    }

    pub fn state(&self) -> &ScreenState {
        &self.state
    }

    pub fn cancel_token(&self) -> CancelToken {
        Arc::clone(&self.token)
    }

    /// Cancels the session, as the screen's unmount hook would.
    pub fn cancel(&self) {
        cancel(&self.token);
    }

    /// Runs the fetch and folds the outcome into the screen state.
    ///
    /// Permission denial moves to [`ScreenState::PermissionDenied`]; any
    /// other failure leaves the screen Loading.
    pub async fn resolve(&mut self, app: &GeoStamp) {
        let result = app.fetch_location(&self.token).await;
        match result {
            Ok(record) => self.set_state(ScreenState::Ready(record)),
            Err(LocationError::PermissionDenied(capability)) => {
                self.set_state(ScreenState::PermissionDenied(capability));
            }
            Err(LocationError::Cancelled) => {}
            Err(e) => {
                // No retry; the screen keeps showing its spinner.
                warn!("location fetch failed, staying in loading state: {e}");
            }
        }
    }

    fn set_state(&mut self, state: ScreenState) {
        if is_cancelled(&self.token) {
            return;
        }
        self.state = state;
    }
}

impl Default for LocationSession {
    fn default() -> Self {
        Self::new()
    }
}
