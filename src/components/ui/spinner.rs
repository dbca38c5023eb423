use leptos::prelude::*;

/// Loading indicator shown while a route's session is unresolved.
#[component]
pub fn Spinner(#[prop(optional)] label: Option<&'static str>) -> impl IntoView {
    let label = label.unwrap_or("Checking your session");

    view! {
        <div
            class="inline-block h-8 w-8 animate-spin rounded-full border-4 border-emerald-200 border-t-emerald-600"
            role="status"
            aria-live="polite"
            aria-label=label
        ></div>
    }
}
