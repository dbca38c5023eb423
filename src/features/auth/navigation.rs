//! Navigation decisions produced by the gate. The state machines return these
//! values instead of touching the router, so the same decisions are applied by
//! the Leptos views and asserted directly in tests.

use crate::features::auth::types::UserProfile;
use serde::{Deserialize, Serialize};
use url::{Url, form_urlencoded};

pub mod paths {
    pub const HOME: &str = "/";
    pub const LOGIN: &str = "/login";
    pub const REGISTER: &str = "/register";
    pub const DASHBOARD: &str = "/dashboard";
}

/// Query parameter on the login route holding the post-login return path.
pub const RETURN_TO_PARAM: &str = "redirect";

/// Why the user was sent back to the login screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoginErrorKind {
    ExchangeFailed,
}

impl LoginErrorKind {
    /// Message shown on the login screen. Never includes technical detail.
    pub fn message(self) -> &'static str {
        match self {
            LoginErrorKind::ExchangeFailed => "Sign-in could not be completed. Please try again.",
        }
    }
}

/// Transient state carried alongside a navigation; never persisted.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum NavState {
    #[default]
    None,
    User(UserProfile),
    LoginError(LoginErrorKind),
}

impl NavState {
    pub fn login_error(&self) -> Option<LoginErrorKind> {
        match self {
            NavState::LoginError(kind) => Some(*kind),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Navigation {
    pub target: String,
    pub replace: bool,
    pub state: NavState,
}

impl Navigation {
    /// Landing route after a successful exchange, carrying the user.
    pub fn landing(user: UserProfile) -> Self {
        Self {
            target: paths::DASHBOARD.to_string(),
            replace: true,
            state: NavState::User(user),
        }
    }

    /// Plain login screen.
    pub fn login() -> Self {
        Self {
            target: paths::LOGIN.to_string(),
            replace: true,
            state: NavState::None,
        }
    }

    /// Login screen with an error marker for display.
    pub fn login_with_error(kind: LoginErrorKind) -> Self {
        Self {
            state: NavState::LoginError(kind),
            ..Self::login()
        }
    }

    /// Login screen remembering where the user was headed.
    pub fn login_redirect(requested: &str) -> Self {
        Self {
            target: login_path_with_return(requested),
            ..Self::login()
        }
    }
}

/// Placeholder origin used to resolve return paths; never navigated to.
const RETURN_PATH_BASE: &str = "https://hub.invalid/";

/// Returns `path` if it is a same-origin absolute path, otherwise the landing route.
pub fn sanitize_return_path(path: &str) -> &str {
    let path = path.trim();
    if !is_same_origin_path(path) || path == paths::LOGIN || path.starts_with("/login?") {
        paths::DASHBOARD
    } else {
        path
    }
}

/// Backslashes, control characters and whitespace are rejected before parsing:
/// URL parsers strip tabs and newlines and read backslashes as slashes. The
/// remainder must resolve onto the same origin.
fn is_same_origin_path(path: &str) -> bool {
    if !path.starts_with('/')
        || path.starts_with("//")
        || path.contains('\\')
        || path.chars().any(|c| c.is_control() || c.is_whitespace())
    {
        return false;
    }
    let Ok(base) = Url::parse(RETURN_PATH_BASE) else {
        return false;
    };
    base.join(path)
        .is_ok_and(|resolved| resolved.origin() == base.origin())
}

/// `/login?redirect=<path>` with the path percent-encoded.
pub fn login_path_with_return(requested: &str) -> String {
    let requested = sanitize_return_path(requested);
    let encoded: String = form_urlencoded::byte_serialize(requested.as_bytes()).collect();
    format!("{}?{RETURN_TO_PARAM}={encoded}", paths::LOGIN)
}

/// The sanitized `?redirect=...` value, if the login route was given one.
pub fn requested_return_path(query: &str) -> Option<String> {
    let query = query.trim_start_matches('?');
    form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == RETURN_TO_PARAM)
        .map(|(_, value)| sanitize_return_path(&value).to_string())
}

/// Where to go after signing in from the login route.
pub fn return_path_from_query(query: &str) -> String {
    requested_return_path(query).unwrap_or_else(|| paths::DASHBOARD.to_string())
}

/// Hosted sign-in page URL that sends the browser back to `origin` + landing route.
pub fn provider_login_url(provider_url: &str, origin: &str) -> String {
    let return_url = format!("{}{}", origin.trim_end_matches('/'), paths::DASHBOARD);
    let encoded: String = form_urlencoded::byte_serialize(return_url.as_bytes()).collect();
    let separator = if provider_url.contains('?') { '&' } else { '?' };
    format!("{provider_url}{separator}redirect={encoded}")
}
