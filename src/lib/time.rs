//! Timer shim so the gate's waits run on the browser event loop under wasm32
//! and on tokio everywhere else.

use std::time::Duration;

/// Suspends the current task for `duration`.
#[cfg(target_arch = "wasm32")]
pub async fn sleep(duration: Duration) {
    gloo_timers::future::sleep(duration).await;
}

/// Suspends the current task for `duration`.
#[cfg(not(target_arch = "wasm32"))]
pub async fn sleep(duration: Duration) {
    tokio::time::sleep(duration).await;
}

/// Monotonic-enough timestamp; `std::time::Instant` panics on wasm32.
#[cfg(target_arch = "wasm32")]
#[derive(Clone, Copy, Debug)]
pub struct Instant(f64);

#[cfg(target_arch = "wasm32")]
impl Instant {
    pub fn now() -> Self {
        Self(js_sys::Date::now())
    }

    pub fn elapsed(&self) -> Duration {
        let millis = (js_sys::Date::now() - self.0).max(0.0);
        Duration::from_secs_f64(millis / 1000.0)
    }
}

/// Follows tokio's clock so paused-time tests control it.
#[cfg(not(target_arch = "wasm32"))]
pub use tokio::time::Instant;
