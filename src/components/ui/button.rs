use leptos::prelude::*;

/// Primary form button; disabled and marked busy while a request is pending.
#[component]
pub fn Button(
    #[prop(optional)] button_type: Option<&'static str>,
    #[prop(into, default = Signal::stored(false))] busy: Signal<bool>,
    children: Children,
) -> impl IntoView {
    view! {
        <button
            type=button_type.unwrap_or("button")
            class="w-full rounded-lg bg-emerald-600 px-5 py-2.5 text-sm font-medium text-white hover:bg-emerald-700 focus:outline-none focus:ring-4 focus:ring-emerald-300"
            class:opacity-70=move || busy.get()
            aria-busy=move || busy.get().to_string()
            disabled=move || busy.get()
        >
            {children()}
        </button>
    }
}
