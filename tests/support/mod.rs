//! Scripted `SessionApi` for driving the gate without a backend.

#![allow(dead_code)]

use hub_web::{
    app_lib::AppError,
    features::auth::{
        client::SessionApi,
        error::AuthError,
        types::{CheckResponse, LoginRequest, OneTimeToken, RegisterRequest, UserProfile},
    },
};
use serde_json::json;
use std::{
    collections::VecDeque,
    sync::{Arc, Mutex},
    time::Duration,
};

pub fn user(id: &str, email: &str) -> UserProfile {
    serde_json::from_value(json!({ "id": id, "email": email })).expect("valid user json")
}

pub fn unauthorized() -> AuthError {
    AuthError::Unauthorized(AppError::Http {
        status: 401,
        message: "Not authenticated".to_string(),
    })
}

pub fn offline() -> AuthError {
    AuthError::Unauthorized(AppError::Network("connection refused".to_string()))
}

#[derive(Default)]
struct Script {
    exchange_result: Option<Result<UserProfile, AuthError>>,
    exchange_delay: Duration,
    who_am_i_results: VecDeque<Result<UserProfile, AuthError>>,
    who_am_i_delay: Duration,
    exchange_tokens: Vec<String>,
    who_am_i_calls: usize,
    logout_calls: usize,
}

/// Cloneable fake; clones share the same script and counters.
#[derive(Clone, Default)]
pub struct FakeSessionApi {
    script: Arc<Mutex<Script>>,
}

impl FakeSessionApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn exchange_returns(self, result: Result<UserProfile, AuthError>) -> Self {
        self.script.lock().unwrap().exchange_result = Some(result);
        self
    }

    pub fn exchange_takes(self, delay: Duration) -> Self {
        self.script.lock().unwrap().exchange_delay = delay;
        self
    }

    /// Queues `whoAmI` answers; the last one repeats once the queue drains.
    pub fn who_am_i_returns(self, results: Vec<Result<UserProfile, AuthError>>) -> Self {
        self.script.lock().unwrap().who_am_i_results = results.into();
        self
    }

    pub fn who_am_i_takes(self, delay: Duration) -> Self {
        self.script.lock().unwrap().who_am_i_delay = delay;
        self
    }

    pub fn exchange_calls(&self) -> usize {
        self.script.lock().unwrap().exchange_tokens.len()
    }

    pub fn exchanged_tokens(&self) -> Vec<String> {
        self.script.lock().unwrap().exchange_tokens.clone()
    }

    pub fn who_am_i_calls(&self) -> usize {
        self.script.lock().unwrap().who_am_i_calls
    }

    pub fn logout_calls(&self) -> usize {
        self.script.lock().unwrap().logout_calls
    }

    pub fn network_calls(&self) -> usize {
        self.exchange_calls() + self.who_am_i_calls() + self.logout_calls()
    }
}

impl SessionApi for FakeSessionApi {
    async fn exchange(&self, token: &OneTimeToken) -> Result<UserProfile, AuthError> {
        let (delay, result) = {
            let mut script = self.script.lock().unwrap();
            script.exchange_tokens.push(token.as_str().to_string());
            let result = script
                .exchange_result
                .clone()
                .unwrap_or_else(|| Ok(user("u1", "a@b.com")));
            (script.exchange_delay, result)
        };
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        result
    }

    async fn who_am_i(&self) -> Result<UserProfile, AuthError> {
        let (delay, result) = {
            let mut script = self.script.lock().unwrap();
            script.who_am_i_calls += 1;
            let result = if script.who_am_i_results.len() > 1 {
                script.who_am_i_results.pop_front()
            } else {
                script.who_am_i_results.front().cloned()
            };
            (script.who_am_i_delay, result.unwrap_or_else(|| Err(unauthorized())))
        };
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        result
    }

    async fn logout(&self) -> Result<(), AuthError> {
        self.script.lock().unwrap().logout_calls += 1;
        Ok(())
    }

    async fn login(&self, request: &LoginRequest) -> Result<UserProfile, AuthError> {
        Ok(user("u-login", &request.email))
    }

    async fn register(&self, request: &RegisterRequest) -> Result<UserProfile, AuthError> {
        Ok(user("u-register", &request.email))
    }

    async fn check(&self) -> Result<CheckResponse, AuthError> {
        Ok(CheckResponse {
            authenticated: false,
            user_id: None,
        })
    }
}
