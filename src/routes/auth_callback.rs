//! Landing view for the sign-in provider's redirect. It renders nothing; it
//! strips the token fragment from the address bar, runs the callback processor
//! once for this mount and replaces the history entry with the resulting route.

use crate::features::auth::{
    callback::CallbackProcessor,
    navigation::{LoginErrorKind, Navigation},
    state::{apply_navigation, use_auth},
    token::without_fragment,
};
use leptos::{prelude::*, task::spawn_local};
use leptos_router::hooks::use_navigate;
use std::rc::Rc;
use tracing::{debug, error};
use wasm_bindgen::JsValue;

#[component]
pub fn AuthCallbackPage() -> impl IntoView {
    let auth = use_auth();
    let navigate = use_navigate();
    let fragment = web_sys::window()
        .and_then(|window| window.location().hash().ok())
        .unwrap_or_default();
    clear_token_fragment();

    match auth.session_api() {
        Ok(api) => {
            let processor = Rc::new(CallbackProcessor::new(api, auth.handoff.clone()));
            spawn_local(async move {
                if let Some(navigation) = processor.process(&fragment).await {
                    apply_navigation(&navigate, &navigation);
                }
            });
        }
        Err(err) => {
            error!(error = %err, "session client unavailable");
            apply_navigation(
                &navigate,
                &Navigation::login_with_error(LoginErrorKind::ExchangeFailed),
            );
        }
    }
}

/// Replaces the current entry's URL with the same URL minus its fragment, so
/// the one-time token does not linger in the address bar or history.
fn clear_token_fragment() {
    let Some(window) = web_sys::window() else {
        return;
    };
    let Ok(href) = window.location().href() else {
        return;
    };
    let Ok(history) = window.history() else {
        return;
    };
    if history
        .replace_state_with_url(&JsValue::NULL, "", Some(without_fragment(&href)))
        .is_err()
    {
        debug!("could not clear the sign-in fragment");
    }
}
