mod auth_callback;
mod dashboard;
mod login;
mod not_found;
mod register;

pub(crate) use auth_callback::AuthCallbackPage;
pub(crate) use dashboard::DashboardPage;
pub(crate) use login::LoginPage;
pub(crate) use not_found::NotFoundPage;
pub(crate) use register::RegisterPage;

use crate::features::auth::{RequireAuth, navigation::paths};
use leptos::prelude::*;
use leptos_router::components::{Redirect, Route, Routes};
use leptos_router::path;

#[component]
pub fn AppRoutes() -> impl IntoView {
    view! {
        <Routes fallback=|| view! { <NotFoundPage /> }>
            <Route path=path!("/") view=|| view! { <Redirect path=paths::DASHBOARD /> } />
            <Route path=path!("/login") view=LoginPage />
            <Route path=path!("/register") view=RegisterPage />
            <Route
                path=path!("/dashboard")
                view=|| view! {
                    <RequireAuth>
                        <DashboardPage />
                    </RequireAuth>
                }
            />
        </Routes>
    }
}
