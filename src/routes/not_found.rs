use crate::components::AppShell;
use crate::features::auth::navigation::paths;
use leptos::prelude::*;
use leptos_router::components::A;

#[component]
pub fn NotFoundPage() -> impl IntoView {
    view! {
        <AppShell>
            <div class="flex flex-col items-center justify-center min-h-[50vh] text-center gap-4">
                <h1 class="text-6xl font-black text-slate-200 dark:text-slate-700">"404"</h1>
                <p class="text-slate-500 dark:text-slate-400">"This page does not exist."</p>
                <A
                    href=paths::DASHBOARD
                    {..}
                    class="rounded-lg bg-emerald-600 px-5 py-2.5 text-sm font-medium text-white hover:bg-emerald-700"
                >
                    "Back to dashboard"
                </A>
            </div>
        </AppShell>
    }
}
