//! Page frame with the product header. Navigation is client-side only; the
//! backend enforces access control.

use leptos::prelude::*;
use leptos_router::components::A;

#[component]
pub fn AppShell(children: Children) -> impl IntoView {
    view! {
        <div class="min-h-screen flex flex-col bg-white dark:bg-slate-900">
            <header class="border-b border-slate-200 dark:border-slate-700">
                <div class="max-w-screen-xl mx-auto flex items-center justify-between p-4">
                    <A href="/" {..} class="font-semibold text-slate-900 dark:text-white">
                        "FinTech Hub"
                    </A>
                </div>
            </header>
            <main class="flex-1 max-w-screen-xl w-full mx-auto px-4 py-8">{children()}</main>
        </div>
    }
}
