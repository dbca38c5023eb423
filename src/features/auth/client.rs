//! Client for the backend session endpoints. Each call is a single
//! credentialed request/response with no retries; retry policy belongs to the
//! caller. The session itself is an `HttpOnly` cookie this client never reads.

use crate::{
    app_lib::{ApiClient, AppConfig, AppError},
    features::auth::{
        error::AuthError,
        types::{
            CheckResponse, LoginRequest, OneTimeToken, RegisterRequest, SessionExchangeRequest,
            SessionResponse, UserProfile,
        },
    },
};

pub const SESSION_PATH: &str = "/auth/session";
pub const ME_PATH: &str = "/auth/me";
pub const LOGOUT_PATH: &str = "/auth/logout";
pub const LOGIN_PATH: &str = "/auth/login";
pub const REGISTER_PATH: &str = "/auth/register";
pub const CHECK_PATH: &str = "/auth/check";

/// Session operations the gate depends on.
///
/// Futures are not required to be `Send`: the browser event loop is single
/// threaded and the HTTP futures there are not `Send` either.
#[allow(async_fn_in_trait)]
pub trait SessionApi {
    /// Trades a one-time token for a session cookie and the signed-in user.
    async fn exchange(&self, token: &OneTimeToken) -> Result<UserProfile, AuthError>;

    /// Returns the user behind the current session cookie.
    async fn who_am_i(&self) -> Result<UserProfile, AuthError>;

    /// Invalidates the current session on the server.
    async fn logout(&self) -> Result<(), AuthError>;

    /// Email/password sign-in; sets the same session cookie as `exchange`.
    async fn login(&self, request: &LoginRequest) -> Result<UserProfile, AuthError>;

    /// Creates an email/password account and signs it in.
    async fn register(&self, request: &RegisterRequest) -> Result<UserProfile, AuthError>;

    /// Lightweight probe that reports session presence without failing on 401.
    async fn check(&self) -> Result<CheckResponse, AuthError>;
}

/// `SessionApi` backed by the REST endpoints.
#[derive(Clone, Debug)]
pub struct HttpSessionApi {
    api: ApiClient,
}

impl HttpSessionApi {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Builds a client for the configured API base URL.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` when the HTTP client cannot be built.
    pub fn from_config(config: &AppConfig) -> Result<Self, AppError> {
        ApiClient::from_config(config).map(Self::new)
    }
}

impl SessionApi for HttpSessionApi {
    async fn exchange(&self, token: &OneTimeToken) -> Result<UserProfile, AuthError> {
        let request = SessionExchangeRequest {
            session_id: token.as_str(),
        };
        self.api
            .post_json::<_, SessionResponse>(SESSION_PATH, &request)
            .await
            .map(|response| response.user)
            .map_err(AuthError::ExchangeFailed)
    }

    async fn who_am_i(&self) -> Result<UserProfile, AuthError> {
        self.api
            .get_json::<UserProfile>(ME_PATH)
            .await
            .map_err(AuthError::Unauthorized)
    }

    async fn logout(&self) -> Result<(), AuthError> {
        self.api
            .post_empty(LOGOUT_PATH)
            .await
            .map_err(AuthError::LogoutFailed)
    }

    async fn login(&self, request: &LoginRequest) -> Result<UserProfile, AuthError> {
        self.api
            .post_json::<_, SessionResponse>(LOGIN_PATH, request)
            .await
            .map(|response| response.user)
            .map_err(AuthError::LoginFailed)
    }

    async fn register(&self, request: &RegisterRequest) -> Result<UserProfile, AuthError> {
        self.api
            .post_json::<_, SessionResponse>(REGISTER_PATH, request)
            .await
            .map(|response| response.user)
            .map_err(AuthError::LoginFailed)
    }

    async fn check(&self) -> Result<CheckResponse, AuthError> {
        self.api
            .get_json::<CheckResponse>(CHECK_PATH)
            .await
            .map_err(AuthError::Unauthorized)
    }
}
