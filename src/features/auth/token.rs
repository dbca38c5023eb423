//! Detection and extraction of the one-time `session_id` the sign-in provider
//! appends to the URL fragment. These functions are pure so the redirect
//! interceptor can call them on every render until the fragment is cleared.

use crate::features::auth::types::OneTimeToken;
use url::form_urlencoded;

/// Fragment key carrying the one-time token.
pub const SESSION_TOKEN_KEY: &str = "session_id";

/// Returns the fragment part of a URL, or the input itself when it is already
/// a bare fragment. The leading `#` is dropped; a URL without `#` has none.
pub fn fragment_of(url_or_fragment: &str) -> &str {
    match url_or_fragment.split_once('#') {
        Some((_, fragment)) => fragment,
        None if looks_like_url(url_or_fragment) => "",
        None => url_or_fragment,
    }
}

fn looks_like_url(value: &str) -> bool {
    value.starts_with('/') || value.contains("://") || value.contains('?')
}

/// True when the fragment carries a non-empty `session_id`.
pub fn has_session_token(url_or_fragment: &str) -> bool {
    extract_session_token(url_or_fragment).is_some()
}

/// Extracts the percent-decoded one-time token from a URL or fragment.
/// `session_id` must be a whole key in the fragment's `key=value` pairs.
pub fn extract_session_token(url_or_fragment: &str) -> Option<OneTimeToken> {
    let fragment = fragment_of(url_or_fragment);
    form_urlencoded::parse(fragment.as_bytes())
        .find(|(key, _)| key == SESSION_TOKEN_KEY)
        .map(|(_, value)| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .map(OneTimeToken::new)
}

/// The URL with its fragment removed, for clearing a consumed token from the
/// address bar.
pub fn without_fragment(url: &str) -> &str {
    url.split_once('#').map_or(url, |(head, _)| head)
}
