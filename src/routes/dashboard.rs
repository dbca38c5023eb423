//! Protected landing page. The analytics widgets are served by other views;
//! this page greets the resolved user and offers sign-out.

use crate::components::AppShell;
use crate::features::auth::{
    client::SessionApi,
    navigation::Navigation,
    state::{apply_navigation, use_auth, use_current_user},
};
use leptos::{prelude::*, task::spawn_local};
use leptos_router::hooks::use_navigate;
use tracing::warn;

#[component]
pub fn DashboardPage() -> impl IntoView {
    let auth = use_auth();
    let navigate = use_navigate();
    let user = use_current_user();

    let on_logout = move |_| {
        let auth = auth.clone();
        let navigate = navigate.clone();
        spawn_local(async move {
            match auth.session_api() {
                Ok(api) => {
                    // Best effort: the user is signed out locally either way.
                    if let Err(err) = api.logout().await {
                        warn!(error = %err, "logout was not acknowledged");
                    }
                }
                Err(err) => warn!(error = %err, "session client unavailable for logout"),
            }
            auth.handoff.clear();
            apply_navigation(&navigate, &Navigation::login());
        });
    };

    view! {
        <AppShell>
            {move || {
                user.get()
                    .map(|user| {
                        view! {
                            <div class="space-y-2">
                                <h1 class="text-2xl font-semibold text-slate-900 dark:text-white">
                                    {format!("Welcome, {}", user.display_name())}
                                </h1>
                                <p class="text-sm text-slate-500 dark:text-slate-400">
                                    {user.email.clone()}
                                </p>
                                <p class="text-sm text-slate-500 dark:text-slate-400">
                                    {format!(
                                        "{} plan, {} credits left",
                                        user.subscription_tier.label(),
                                        user.usage_credits,
                                    )}
                                </p>
                            </div>
                        }
                    })
            }}
            <button
                type="button"
                class="mt-6 rounded-lg border border-slate-300 px-4 py-2 text-sm text-slate-900 hover:bg-slate-100 dark:border-slate-600 dark:text-slate-100 dark:hover:bg-slate-800"
                on:click=on_logout
            >
                "Sign out"
            </button>
        </AppShell>
    }
}
