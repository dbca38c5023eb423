//! Auth context for the browser app. The provider creates the page-wide
//! handoff store once and exposes it, together with the loaded config, to the
//! callback, guards and sign-in pages. Only non-sensitive metadata lives in
//! memory; the session cookie remains `HttpOnly`.

use crate::{
    app_lib::{AppConfig, AppError},
    features::auth::{
        client::HttpSessionApi,
        handoff::HandoffStore,
        navigation::{NavState, Navigation},
        route_guard::VerifyPolicy,
        types::UserProfile,
    },
};
use leptos::prelude::*;
use leptos_router::{NavigateOptions, hooks::use_location, location::State};
use wasm_bindgen::JsValue;

#[derive(Clone)]
/// Auth context shared through Leptos.
pub struct AuthContext {
    pub config: AppConfig,
    pub handoff: HandoffStore,
}

impl AuthContext {
    fn new(config: AppConfig) -> Self {
        Self {
            config,
            handoff: HandoffStore::new(),
        }
    }

    /// Builds a session client for the configured API.
    pub fn session_api(&self) -> Result<HttpSessionApi, AppError> {
        HttpSessionApi::from_config(&self.config)
    }

    pub fn verify_policy(&self) -> VerifyPolicy {
        self.config.verify_policy()
    }
}

/// User resolved by the nearest `RequireAuth`.
#[derive(Clone, Copy)]
pub struct CurrentUser(pub Signal<Option<UserProfile>>);

/// Provides the auth context for the whole app.
#[component]
pub fn AuthProvider(children: Children) -> impl IntoView {
    provide_context(AuthContext::new(AppConfig::load()));

    view! { {children()} }
}

/// Returns the current auth context or a fallback with its own empty handoff.
pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().unwrap_or_else(|| AuthContext::new(AppConfig::load()))
}

/// Returns the user resolved by the enclosing guard, if any.
pub fn use_current_user() -> Signal<Option<UserProfile>> {
    use_context::<CurrentUser>().map_or_else(|| Signal::derive(|| None), |current| current.0)
}

/// Applies a gate decision to the router, serializing transient state.
pub fn apply_navigation(navigate: &impl Fn(&str, NavigateOptions), navigation: &Navigation) {
    let state = match &navigation.state {
        NavState::None => None,
        state => serde_json::to_string(state)
            .ok()
            .map(|json| JsValue::from_str(&json)),
    };

    navigate(
        &navigation.target,
        NavigateOptions {
            replace: navigation.replace,
            state: State::new(state),
            ..NavigateOptions::default()
        },
    );
}

/// Reads the transient state attached to the current history entry.
pub fn current_nav_state() -> NavState {
    let location = use_location();
    location
        .state
        .get_untracked()
        .to_js_value()
        .as_string()
        .and_then(|json| serde_json::from_str(&json).ok())
        .unwrap_or_default()
}

/// `pathname?search` of the current location.
pub fn current_path_and_query() -> String {
    let location = use_location();
    let pathname = location.pathname.get_untracked();
    let search = location.search.get_untracked();
    let search = search.trim_start_matches('?');
    if search.is_empty() {
        pathname
    } else {
        format!("{pathname}?{search}")
    }
}
