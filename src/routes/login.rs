use crate::components::{Alert, AlertKind, AppShell, Button, Spinner};
use crate::features::auth::{
    client::{HttpSessionApi, SessionApi},
    error::AuthError,
    forms,
    handoff::HandoffStore,
    navigation::{self, paths},
    state::{current_nav_state, use_auth},
    types::{LoginRequest, UserProfile},
};
use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos_router::{
    NavigateOptions,
    components::A,
    hooks::{use_location, use_navigate},
};
use tracing::warn;

const INPUT_CLASS: &str = "bg-slate-50 border border-slate-300 text-slate-900 text-sm rounded-lg focus:ring-emerald-500 focus:border-emerald-500 block w-full p-2.5 dark:bg-slate-700 dark:border-slate-600 dark:text-white";

#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = use_auth();
    let navigate = use_navigate();
    let location = use_location();
    let callback_error = current_nav_state()
        .login_error()
        .map(|kind| kind.message().to_string());
    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (error, set_error) = signal::<Option<String>>(callback_error);
    let notice = navigation::requested_return_path(&location.search.get_untracked())
        .map(|_| "Sign in to continue to the page you requested.");

    let config = auth.config.clone();
    let login_action = Action::new_local(move |request: &LoginRequest| {
        let request = request.clone();
        let config = config.clone();
        async move {
            let api = HttpSessionApi::from_config(&config).map_err(AuthError::LoginFailed)?;
            api.login(&request).await
        }
    });

    let handoff = auth.handoff.clone();
    Effect::new(move |_| {
        if let Some(result) = login_action.value().get() {
            match result {
                Ok(user) => {
                    finish_sign_in(&handoff, user, &location.search.get_untracked(), &navigate);
                }
                Err(err) => {
                    warn!(error = %err, "email sign-in failed");
                    set_error.set(Some("Invalid email or password.".to_string()));
                }
            }
        }
    });

    let on_submit = move |event: SubmitEvent| {
        event.prevent_default();
        set_error.set(None);

        match forms::login_request(&email.get_untracked(), &password.get_untracked()) {
            Ok(request) => {
                login_action.dispatch(request);
            }
            Err(message) => set_error.set(Some(message.to_string())),
        }
    };

    let provider_url = auth.config.auth_provider_url.clone();
    let on_provider = move |_| {
        let Some(window) = web_sys::window() else {
            return;
        };
        let origin = window.location().origin().unwrap_or_default();
        let target = navigation::provider_login_url(&provider_url, &origin);
        let _ = window.location().set_href(&target);
    };

    view! {
        <AppShell>
            <form class="max-w-sm mx-auto space-y-5" on:submit=on_submit>
                <h1 class="text-2xl font-semibold text-slate-900 dark:text-white">"Sign in"</h1>
                {notice.map(|message| view! { <Alert kind=AlertKind::Info message=message /> })}
                <div>
                    <label class="block mb-2 text-sm font-medium text-slate-900 dark:text-white" for="email">
                        "Email"
                    </label>
                    <input
                        id="email"
                        type="email"
                        class=INPUT_CLASS
                        autocomplete="email"
                        required
                        on:input=move |event| set_email.set(event_target_value(&event))
                    />
                </div>
                <div>
                    <label class="block mb-2 text-sm font-medium text-slate-900 dark:text-white" for="password">
                        "Password"
                    </label>
                    <input
                        id="password"
                        type="password"
                        class=INPUT_CLASS
                        autocomplete="current-password"
                        required
                        on:input=move |event| set_password.set(event_target_value(&event))
                    />
                </div>
                <Button button_type="submit" busy=login_action.pending()>
                    "Sign in"
                </Button>
                <button
                    type="button"
                    class="w-full rounded-lg border border-slate-300 bg-white px-5 py-2.5 text-sm font-medium text-slate-900 hover:bg-slate-100 dark:border-slate-600 dark:bg-slate-800 dark:text-slate-100"
                    on:click=on_provider
                >
                    "Continue with Google"
                </button>
                <p class="text-sm text-slate-500 dark:text-slate-400">
                    "No account yet? "
                    <A href=paths::REGISTER {..} class="text-emerald-600 hover:underline">
                        "Create one"
                    </A>
                </p>
                {move || {
                    login_action
                        .pending()
                        .get()
                        .then_some(view! { <div class="flex justify-center"><Spinner /></div> })
                }}
                {move || {
                    error
                        .get()
                        .map(|message| view! { <Alert kind=AlertKind::Error message=message /> })
                }}
            </form>
        </AppShell>
    }
}

/// Publishes the fresh user for the next guard and returns to where the user
/// was headed before being sent to sign in.
pub(super) fn finish_sign_in(
    handoff: &HandoffStore,
    user: UserProfile,
    search: &str,
    navigate: &impl Fn(&str, NavigateOptions),
) {
    handoff.publish(user);
    let target = navigation::return_path_from_query(search);
    navigate(
        &target,
        NavigateOptions {
            replace: true,
            ..NavigateOptions::default()
        },
    );
}
