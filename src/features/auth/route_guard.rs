//! Per-mount authentication check for protected views.
//!
//! A guard resolves `AuthState` exactly once: `Unknown` until the first
//! `check` finishes, then `Authenticated` or `Unauthenticated` for the rest of
//! the mount. The fast path consumes the handoff left by the sign-in callback
//! and never touches the network. Otherwise the guard asks `whoAmI`, retrying
//! within `VerifyPolicy` bounds while a freshly set session cookie may still be
//! propagating. A second `check` while one is in flight returns immediately.
//! Unmounting cancels the in-flight verification and its result is dropped.

use crate::{
    app_lib::time::sleep,
    features::auth::{client::SessionApi, handoff::HandoffStore, types::UserProfile},
};
use futures::future::{AbortHandle, Abortable};
use std::{
    sync::{Arc, Mutex, MutexGuard, PoisonError},
    time::Duration,
};
use tracing::{debug, info};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum AuthState {
    #[default]
    Unknown,
    Authenticated(UserProfile),
    Unauthenticated,
}

impl AuthState {
    pub fn user(&self) -> Option<&UserProfile> {
        match self {
            AuthState::Authenticated(user) => Some(user),
            _ => None,
        }
    }
}

/// Bounds for `whoAmI` verification.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VerifyPolicy {
    /// Wait before the first attempt when no fresh sign-in was observed.
    pub grace_period: Duration,
    /// Total attempts, including the first one.
    pub max_attempts: u32,
    /// Delay before the second attempt; doubled for each later one.
    pub backoff: Duration,
}

impl Default for VerifyPolicy {
    fn default() -> Self {
        Self {
            grace_period: Duration::from_millis(150),
            max_attempts: 3,
            backoff: Duration::from_millis(200),
        }
    }
}

impl VerifyPolicy {
    /// Delay after the failed attempt number `attempt` (1-based).
    pub fn backoff_after(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(16);
        self.backoff.saturating_mul(1 << exponent)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum GuardPhase {
    Idle,
    Checking,
    Resolved(AuthState),
    Cancelled,
}

#[derive(Debug, PartialEq, Eq)]
pub enum CheckOutcome {
    Resolved(AuthState),
    /// Another `check` on this guard is still running.
    AlreadyChecking,
    /// The guard was cancelled; any result was discarded.
    Cancelled,
}

struct Shared {
    phase: Mutex<GuardPhase>,
    abort: Mutex<Option<AbortHandle>>,
}

impl Shared {
    fn phase(&self) -> MutexGuard<'_, GuardPhase> {
        self.phase.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn abort(&self) -> MutexGuard<'_, Option<AbortHandle>> {
        self.abort.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Cancels a guard's verification from outside, e.g. on unmount.
#[derive(Clone)]
pub struct CancelHandle {
    shared: Arc<Shared>,
}

impl CancelHandle {
    /// Cancels an unresolved guard. A resolved guard keeps its state.
    pub fn cancel(&self) {
        let mut phase = self.shared.phase();
        if matches!(*phase, GuardPhase::Resolved(_)) {
            return;
        }
        *phase = GuardPhase::Cancelled;
        drop(phase);

        if let Some(handle) = self.shared.abort().take() {
            debug!("cancelling in-flight session verification");
            handle.abort();
        }
    }
}

pub struct RouteGuard<A> {
    api: A,
    handoff: HandoffStore,
    policy: VerifyPolicy,
    shared: Arc<Shared>,
}

impl<A: SessionApi> RouteGuard<A> {
    pub fn new(api: A, handoff: HandoffStore, policy: VerifyPolicy) -> Self {
        Self {
            api,
            handoff,
            policy,
            shared: Arc::new(Shared {
                phase: Mutex::new(GuardPhase::Idle),
                abort: Mutex::new(None),
            }),
        }
    }

    pub fn cancel_handle(&self) -> CancelHandle {
        CancelHandle {
            shared: Arc::clone(&self.shared),
        }
    }

    /// Current state; `Unknown` until a check resolves.
    pub fn state(&self) -> AuthState {
        match &*self.shared.phase() {
            GuardPhase::Resolved(state) => state.clone(),
            GuardPhase::Idle | GuardPhase::Checking | GuardPhase::Cancelled => AuthState::Unknown,
        }
    }

    /// Resolves the guard's `AuthState`.
    pub async fn check(&self) -> CheckOutcome {
        // Everything up to the first await runs as one critical section, so
        // concurrent checks and concurrent guards see consistent slots.
        let (just_authenticated, registration) = {
            let mut phase = self.shared.phase();
            match &*phase {
                GuardPhase::Idle => {}
                GuardPhase::Checking => return CheckOutcome::AlreadyChecking,
                GuardPhase::Resolved(state) => return CheckOutcome::Resolved(state.clone()),
                GuardPhase::Cancelled => return CheckOutcome::Cancelled,
            }

            if let Some(record) = self.handoff.take() {
                debug!(user_id = %record.user.id, "consumed session handoff");
                let state = AuthState::Authenticated(record.user);
                *phase = GuardPhase::Resolved(state.clone());
                return CheckOutcome::Resolved(state);
            }

            *phase = GuardPhase::Checking;
            let (handle, registration) = AbortHandle::new_pair();
            *self.shared.abort() = Some(handle);
            (self.handoff.take_just_authenticated(), registration)
        };

        let verified = Abortable::new(self.verify(just_authenticated), registration).await;

        let mut phase = self.shared.phase();
        self.shared.abort().take();
        match verified {
            Ok(state) if *phase == GuardPhase::Checking => {
                *phase = GuardPhase::Resolved(state.clone());
                CheckOutcome::Resolved(state)
            }
            _ => {
                debug!("discarding session verification result for cancelled guard");
                CheckOutcome::Cancelled
            }
        }
    }

    async fn verify(&self, just_authenticated: bool) -> AuthState {
        if just_authenticated {
            debug!("fresh sign-in observed; verifying without grace period");
        } else {
            sleep(self.policy.grace_period).await;
        }

        let max_attempts = self.policy.max_attempts.max(1);
        let mut attempt = 1;
        loop {
            match self.api.who_am_i().await {
                Ok(user) => {
                    info!(user_id = %user.id, attempt, "session verified");
                    return AuthState::Authenticated(user);
                }
                Err(err) => {
                    // A 401 right after sign-in may only mean the cookie is not visible yet.
                    let retryable =
                        err.is_transient() || (just_authenticated && err.is_unauthorized());
                    if !retryable || attempt >= max_attempts {
                        debug!(error = %err, attempt, "session verification failed");
                        return AuthState::Unauthenticated;
                    }
                    let delay = self.policy.backoff_after(attempt);
                    debug!(error = %err, attempt, ?delay, "retrying session verification");
                    sleep(delay).await;
                    attempt += 1;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{AuthState, VerifyPolicy};
    use std::time::Duration;

    #[test]
    fn backoff_doubles_per_attempt() {
        let policy = VerifyPolicy {
            grace_period: Duration::ZERO,
            max_attempts: 4,
            backoff: Duration::from_millis(100),
        };

        assert_eq!(policy.backoff_after(1), Duration::from_millis(100));
        assert_eq!(policy.backoff_after(2), Duration::from_millis(200));
        assert_eq!(policy.backoff_after(3), Duration::from_millis(400));
    }

    #[test]
    fn backoff_saturates_instead_of_overflowing() {
        let policy = VerifyPolicy {
            backoff: Duration::MAX,
            ..VerifyPolicy::default()
        };
        assert_eq!(policy.backoff_after(30), Duration::MAX);
    }

    #[test]
    fn unknown_is_the_default_state() {
        assert_eq!(AuthState::default(), AuthState::Unknown);
        assert!(AuthState::Unauthenticated.user().is_none());
    }
}
