use super::login::finish_sign_in;
use crate::components::{Alert, AlertKind, AppShell, Button, Spinner};
use crate::features::auth::{
    client::{HttpSessionApi, SessionApi},
    error::AuthError,
    forms,
    navigation::paths,
    state::use_auth,
    types::RegisterRequest,
};
use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos_router::{
    components::A,
    hooks::{use_location, use_navigate},
};
use tracing::warn;

const INPUT_CLASS: &str = "bg-slate-50 border border-slate-300 text-slate-900 text-sm rounded-lg block w-full p-2.5 dark:bg-slate-700 dark:border-slate-600 dark:text-white";

#[component]
pub fn RegisterPage() -> impl IntoView {
    let auth = use_auth();
    let navigate = use_navigate();
    let location = use_location();
    let (name, set_name) = signal(String::new());
    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (error, set_error) = signal::<Option<String>>(None);

    let config = auth.config.clone();
    let register_action = Action::new_local(move |request: &RegisterRequest| {
        let request = request.clone();
        let config = config.clone();
        async move {
            let api = HttpSessionApi::from_config(&config).map_err(AuthError::LoginFailed)?;
            api.register(&request).await
        }
    });

    let handoff = auth.handoff.clone();
    Effect::new(move |_| {
        if let Some(result) = register_action.value().get() {
            match result {
                Ok(user) => {
                    finish_sign_in(&handoff, user, &location.search.get_untracked(), &navigate);
                }
                Err(err) => {
                    warn!(error = %err, "registration failed");
                    set_error.set(Some(
                        "Could not create the account. The email may already be registered."
                            .to_string(),
                    ));
                }
            }
        }
    });

    let on_submit = move |event: SubmitEvent| {
        event.prevent_default();
        set_error.set(None);

        match forms::register_request(
            &name.get_untracked(),
            &email.get_untracked(),
            &password.get_untracked(),
        ) {
            Ok(request) => {
                register_action.dispatch(request);
            }
            Err(message) => set_error.set(Some(message.to_string())),
        }
    };

    view! {
        <AppShell>
            <form class="max-w-sm mx-auto space-y-5" on:submit=on_submit>
                <h1 class="text-2xl font-semibold text-slate-900 dark:text-white">
                    "Create your account"
                </h1>
                <input
                    type="text"
                    class=INPUT_CLASS
                    placeholder="Full name"
                    autocomplete="name"
                    required
                    on:input=move |event| set_name.set(event_target_value(&event))
                />
                <input
                    type="email"
                    class=INPUT_CLASS
                    placeholder="Email"
                    autocomplete="email"
                    required
                    on:input=move |event| set_email.set(event_target_value(&event))
                />
                <input
                    type="password"
                    class=INPUT_CLASS
                    placeholder="Password (8+ characters)"
                    autocomplete="new-password"
                    required
                    on:input=move |event| set_password.set(event_target_value(&event))
                />
                <Button button_type="submit" busy=register_action.pending()>
                    "Create account"
                </Button>
                <p class="text-sm text-slate-500 dark:text-slate-400">
                    "Already registered? "
                    <A href=paths::LOGIN {..} class="text-emerald-600 hover:underline">
                        "Sign in"
                    </A>
                </p>
                {move || {
                    register_action
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
