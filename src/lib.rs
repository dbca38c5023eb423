//! # hub-web
//!
//! Browser frontend for the FinTech Hub dashboard: the session bootstrap that
//! turns a sign-in provider redirect into a cookie session, and the gate that
//! keeps protected routes behind a resolved session.
//!
//! The gate logic in [`features::auth`] is plain async Rust and runs (and is
//! tested) on any target. The Leptos views are compiled for `wasm32` only.

#[path = "lib/mod.rs"]
pub mod app_lib;
pub mod features;

#[cfg(target_arch = "wasm32")]
mod app;
#[cfg(target_arch = "wasm32")]
mod components;
#[cfg(target_arch = "wasm32")]
mod routes;

#[cfg(target_arch = "wasm32")]
pub use app::App;
