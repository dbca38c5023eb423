//! Root component. The auth context sits above the router so the handoff store
//! lives as long as the page, and the redirect interceptor sits above the routes
//! so a sign-in callback wins over whatever path the provider sent us to.

use crate::{
    features::auth::{RedirectInterceptor, state::AuthProvider},
    routes::AppRoutes,
};
use leptos::prelude::*;
use leptos_router::components::Router;

#[component]
pub fn App() -> impl IntoView {
    view! {
        <AuthProvider>
            <Router>
                <RedirectInterceptor>
                    <AppRoutes />
                </RedirectInterceptor>
            </Router>
        </AuthProvider>
    }
}
