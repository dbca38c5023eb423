use crate::{
    components::Spinner,
    features::auth::{
        navigation::Navigation,
        route_guard::{AuthState, CheckOutcome, RouteGuard},
        state::{CurrentUser, apply_navigation, current_path_and_query, use_auth},
        token::has_session_token,
    },
    routes::AuthCallbackPage,
};
use leptos::{prelude::*, task::spawn_local};
use leptos_router::hooks::{use_location, use_navigate};
use std::rc::Rc;
use tracing::error;

/// Renders the sign-in callback instead of any route while the URL fragment
/// carries a one-time token.
#[component]
pub fn RedirectInterceptor(children: ChildrenFn) -> impl IntoView {
    let location = use_location();
    let intercept = Memo::new(move |_| {
        // Re-evaluate on every router navigation; read the live fragment.
        location.hash.track();
        location.pathname.track();
        web_sys::window()
            .and_then(|window| window.location().hash().ok())
            .is_some_and(|hash| has_session_token(&hash))
    });

    move || {
        if intercept.get() {
            view! { <AuthCallbackPage /> }.into_any()
        } else {
            children().into_any()
        }
    }
}

/// Gates its children until this mount has resolved the session.
#[component]
pub fn RequireAuth(children: ChildrenFn) -> impl IntoView {
    let auth = use_auth();
    let navigate = use_navigate();
    let requested = current_path_and_query();
    let state = RwSignal::new(AuthState::Unknown);
    provide_context(CurrentUser(Signal::derive(move || {
        state.with(|state| state.user().cloned())
    })));

    match auth.session_api() {
        Ok(api) => {
            let guard = Rc::new(RouteGuard::new(
                api,
                auth.handoff.clone(),
                auth.verify_policy(),
            ));
            let cancel = guard.cancel_handle();
            on_cleanup(move || cancel.cancel());

            spawn_local(async move {
                if let CheckOutcome::Resolved(resolved) = guard.check().await {
                    state.set(resolved);
                }
            });
        }
        Err(err) => {
            error!(error = %err, "session client unavailable");
            state.set(AuthState::Unauthenticated);
        }
    }

    Effect::new(move |_| {
        if state.with(|state| *state == AuthState::Unauthenticated) {
            // UX-only guard; real access control must live on the API.
            apply_navigation(&navigate, &Navigation::login_redirect(&requested));
        }
    });

    move || match state.get() {
        AuthState::Unknown => view! {
            <div class="flex justify-center py-16">
                <Spinner />
            </div>
        }
        .into_any(),
        AuthState::Authenticated(_) => children().into_any(),
        AuthState::Unauthenticated => ().into_any(),
    }
}
