//! Shared frontend utilities for API access, configuration, errors, logging and
//! timers.
//!
//! ## Session bootstrap
//!
//! 1. **Provider redirect:** The hosted sign-in page sends the browser back to
//!    the app with `#session_id=<token>` in the fragment.
//! 2. **Exchange:** The app POSTs the token to `/auth/session` once; the backend
//!    answers with the user and sets the `HttpOnly` session cookie.
//! 3. **Verification:** Protected routes either consume the in-memory handoff
//!    left by the exchange or call `/auth/me` with the cookie.
//!
//! Centralizing these helpers keeps network behavior consistent and avoids
//! duplicated logic in routes and features. Callers must still avoid logging
//! tokens or credentials.

pub mod api;
pub mod config;
pub mod errors;
pub mod telemetry;
pub mod time;

pub use api::ApiClient;
pub use config::AppConfig;
pub use errors::AppError;
