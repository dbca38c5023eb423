//! Request and response types for the session endpoints. Login and register
//! payloads carry passwords, so they must never be logged.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Billing tier reported by the backend for the signed-in user.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionTier {
    #[default]
    Free,
    Basic,
    Pro,
    #[serde(other)]
    Other,
}

impl SubscriptionTier {
    pub fn label(self) -> &'static str {
        match self {
            SubscriptionTier::Free => "Free",
            SubscriptionTier::Basic => "Basic",
            SubscriptionTier::Pro => "Pro",
            SubscriptionTier::Other => "Custom",
        }
    }
}

/// How the account was created.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthType {
    Google,
    Email,
}

/// Signed-in user as returned by `/auth/session`, `/auth/login` and `/auth/me`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(rename = "user_id", alias = "id")]
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub picture: Option<String>,
    #[serde(default)]
    pub subscription_tier: SubscriptionTier,
    #[serde(default)]
    pub usage_credits: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_type: Option<AuthType>,
}

impl UserProfile {
    /// Name to greet the user with, falling back to the email address.
    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            &self.email
        } else {
            &self.name
        }
    }
}

/// One-time credential handed back by the external sign-in provider.
///
/// The value is single-use and is redacted from `Debug` output.
#[derive(Clone, PartialEq, Eq)]
pub struct OneTimeToken(String);

impl OneTimeToken {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for OneTimeToken {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("OneTimeToken(<redacted>)")
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct SessionExchangeRequest<'a> {
    pub session_id: &'a str,
}

/// Envelope returned by the exchange, login and register endpoints.
#[derive(Clone, Debug, Deserialize)]
pub struct SessionResponse {
    #[serde(default)]
    pub success: bool,
    pub user: UserProfile,
}

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl fmt::Debug for LoginRequest {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("LoginRequest")
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub name: String,
}

impl fmt::Debug for RegisterRequest {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("RegisterRequest")
            .field("email", &self.email)
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Lightweight `/auth/check` probe result.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct CheckResponse {
    pub authenticated: bool,
    #[serde(default)]
    pub user_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::{OneTimeToken, SessionResponse, SubscriptionTier, UserProfile};
    use serde_json::json;

    #[test]
    fn user_profile_accepts_backend_shape() {
        let user: UserProfile = serde_json::from_value(json!({
            "user_id": "user_1a2b3c",
            "email": "ada@example.com",
            "name": "Ada",
            "picture": null,
            "subscription_tier": "pro",
            "usage_credits": 50,
            "auth_type": "google",
            "created_at": "2024-01-01T00:00:00Z",
            "total_predictions": 3
        }))
        .unwrap();

        assert_eq!(user.id, "user_1a2b3c");
        assert_eq!(user.subscription_tier, SubscriptionTier::Pro);
        assert_eq!(user.usage_credits, 50);
    }

    #[test]
    fn user_profile_accepts_minimal_shape() {
        let user: UserProfile =
            serde_json::from_value(json!({ "id": "u1", "email": "a@b.com" })).unwrap();

        assert_eq!(user.id, "u1");
        assert_eq!(user.name, "");
        assert_eq!(user.picture, None);
        assert_eq!(user.subscription_tier, SubscriptionTier::Free);
        assert_eq!(user.display_name(), "a@b.com");
    }

    #[test]
    fn unknown_tiers_do_not_break_parsing() {
        let user: UserProfile = serde_json::from_value(json!({
            "user_id": "u2",
            "email": "b@c.com",
            "subscription_tier": "enterprise"
        }))
        .unwrap();

        assert_eq!(user.subscription_tier, SubscriptionTier::Other);
    }

    #[test]
    fn session_response_tolerates_missing_success_flag() {
        let response: SessionResponse =
            serde_json::from_value(json!({ "user": { "id": "u1", "email": "a@b.com" } }))
                .unwrap();

        assert!(!response.success);
        assert_eq!(response.user.id, "u1");
    }

    #[test]
    fn token_debug_is_redacted() {
        let token = OneTimeToken::new("abc123");
        assert_eq!(format!("{token:?}"), "OneTimeToken(<redacted>)");
        assert_eq!(token.as_str(), "abc123");
    }
}
