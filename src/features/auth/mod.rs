//! Auth feature module covering the sign-in callback, the same-tab session
//! handoff, and protected-route gating. It keeps authentication logic out of
//! the UI and must stay aligned with backend session expectations. This module
//! touches security boundaries and must avoid logging tokens or passwords.
//!
//! Flow Overview: the sign-in provider redirects back with `#session_id=...`;
//! the redirect interceptor renders the callback instead of any route; the
//! callback exchanges the token once and publishes a handoff; the first
//! protected route consumes the handoff, and every later one verifies the
//! session cookie with `/auth/me`.

pub mod callback;
pub mod client;
pub mod error;
pub mod forms;
#[cfg(target_arch = "wasm32")]
mod guards;
pub mod handoff;
pub mod navigation;
pub mod route_guard;
#[cfg(target_arch = "wasm32")]
pub(crate) mod state;
pub mod token;
pub mod types;

#[cfg(target_arch = "wasm32")]
pub(crate) use guards::{RedirectInterceptor, RequireAuth};
