//! Sign-in callback processing: extract the one-time token, exchange it once,
//! publish the handoff and decide where to go next.
//!
//! The processor is a small state machine. `process` moves `Idle` to
//! `Exchanging` inside one synchronous critical section before its first
//! suspension point, so re-renders that call it again while the exchange is in
//! flight (or after it finished) get `None` and issue no request.

use crate::features::auth::{
    client::SessionApi,
    error::AuthError,
    handoff::HandoffStore,
    navigation::{LoginErrorKind, Navigation},
    token::extract_session_token,
};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::{debug, info, warn};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CallbackPhase {
    Idle,
    Exchanging,
    Done(Navigation),
}

pub struct CallbackProcessor<A> {
    api: A,
    handoff: HandoffStore,
    phase: Mutex<CallbackPhase>,
}

impl<A: SessionApi> CallbackProcessor<A> {
    pub fn new(api: A, handoff: HandoffStore) -> Self {
        Self {
            api,
            handoff,
            phase: Mutex::new(CallbackPhase::Idle),
        }
    }

    fn phase_guard(&self) -> MutexGuard<'_, CallbackPhase> {
        self.phase.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn phase(&self) -> CallbackPhase {
        self.phase_guard().clone()
    }

    /// Claims the processor for this mount. Only the first caller wins.
    fn begin(&self) -> bool {
        let mut phase = self.phase_guard();
        if *phase == CallbackPhase::Idle {
            *phase = CallbackPhase::Exchanging;
            true
        } else {
            false
        }
    }

    /// Runs the callback sequence for `fragment`.
    ///
    /// Returns the navigation to apply, or `None` when this processor already
    /// started (the caller is a re-render and must do nothing).
    pub async fn process(&self, fragment: &str) -> Option<Navigation> {
        if !self.begin() {
            debug!("sign-in callback already started; ignoring re-entry");
            return None;
        }

        let navigation = match extract_session_token(fragment) {
            None => {
                warn!("{}", AuthError::MissingToken);
                Navigation::login()
            }
            Some(token) => match self.api.exchange(&token).await {
                Ok(user) => {
                    info!(user_id = %user.id, "session exchange succeeded");
                    self.handoff.publish(user.clone());
                    Navigation::landing(user)
                }
                Err(err) => {
                    warn!(error = %err, "session exchange failed");
                    Navigation::login_with_error(LoginErrorKind::ExchangeFailed)
                }
            },
        };

        *self.phase_guard() = CallbackPhase::Done(navigation.clone());
        Some(navigation)
    }
}
