//! Alert banners for the sign-in screens. Messages must be safe to render and
//! never include tokens or server error detail.

use leptos::prelude::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AlertKind {
    Error,
    Info,
}

impl AlertKind {
    fn class(self) -> &'static str {
        match self {
            Self::Error => {
                "rounded-lg border border-red-200 bg-red-50 px-4 py-3 text-sm text-red-700 dark:border-red-400 dark:bg-red-900/30 dark:text-red-200"
            }
            Self::Info => {
                "rounded-lg border border-emerald-200 bg-emerald-50 px-4 py-3 text-sm text-emerald-800 dark:border-emerald-500 dark:bg-emerald-900/30 dark:text-emerald-100"
            }
        }
    }

    /// Errors interrupt screen readers; notices wait their turn.
    fn role(self) -> &'static str {
        match self {
            Self::Error => "alert",
            Self::Info => "status",
        }
    }
}

#[component]
pub fn Alert(kind: AlertKind, #[prop(into)] message: String) -> impl IntoView {
    view! {
        <div class=kind.class() role=kind.role()>
            {message}
        </div>
    }
}
