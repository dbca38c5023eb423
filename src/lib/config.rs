//! Build-time configuration for the API host, the external sign-in provider and
//! the session verification policy, with an optional runtime override. The
//! runtime config is read from `window.HUB_CONFIG` (if present) so static
//! deployments can change endpoints without rebuilding. Configuration values
//! are public; do not store secrets here.

use crate::features::auth::route_guard::VerifyPolicy;
use std::time::Duration;

/// API prefix used when no base URL is configured (same-origin backend).
const DEFAULT_API_BASE_URL: &str = "/api";
/// Hosted sign-in page that redirects back with `#session_id=...`.
const DEFAULT_AUTH_PROVIDER_URL: &str = "https://auth.emergentagent.com/";
const DEFAULT_VERIFY_GRACE_MS: u64 = 150;
const DEFAULT_VERIFY_ATTEMPTS: u32 = 3;
const DEFAULT_VERIFY_BACKOFF_MS: u64 = 200;

/// Frontend configuration derived from build-time environment variables.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    pub api_base_url: String,
    pub auth_provider_url: String,
    pub verify_grace_ms: u64,
    pub verify_attempts: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            auth_provider_url: DEFAULT_AUTH_PROVIDER_URL.to_string(),
            verify_grace_ms: DEFAULT_VERIFY_GRACE_MS,
            verify_attempts: DEFAULT_VERIFY_ATTEMPTS,
        }
    }
}

impl AppConfig {
    /// Loads config from build-time environment variables and applies runtime overrides.
    pub fn load() -> Self {
        let mut config = Self::default();

        let build_time = RuntimeConfig {
            api_base_url: option_env!("HUB_API_BASE_URL").and_then(normalize_runtime_value),
            auth_provider_url: option_env!("HUB_AUTH_PROVIDER_URL")
                .and_then(normalize_runtime_value),
            verify_grace_ms: option_env!("HUB_VERIFY_GRACE_MS").and_then(parse_number),
            verify_attempts: option_env!("HUB_VERIFY_ATTEMPTS").and_then(parse_number),
        };
        apply_runtime_overrides(&mut config, build_time);

        if let Some(runtime) = runtime_config() {
            apply_runtime_overrides(&mut config, runtime);
        }

        config
    }

    /// Retry policy for the route guard's `whoAmI` verification.
    pub fn verify_policy(&self) -> VerifyPolicy {
        VerifyPolicy {
            grace_period: Duration::from_millis(self.verify_grace_ms),
            max_attempts: self.verify_attempts.max(1),
            backoff: Duration::from_millis(DEFAULT_VERIFY_BACKOFF_MS),
        }
    }
}

#[derive(Default)]
struct RuntimeConfig {
    api_base_url: Option<String>,
    auth_provider_url: Option<String>,
    verify_grace_ms: Option<u64>,
    verify_attempts: Option<u32>,
}

fn apply_runtime_overrides(config: &mut AppConfig, runtime: RuntimeConfig) {
    if let Some(value) = runtime.api_base_url {
        config.api_base_url = value;
    }
    if let Some(value) = runtime.auth_provider_url {
        config.auth_provider_url = value;
    }
    if let Some(value) = runtime.verify_grace_ms {
        config.verify_grace_ms = value;
    }
    if let Some(value) = runtime.verify_attempts {
        config.verify_attempts = value;
    }
}

#[cfg(target_arch = "wasm32")]
fn runtime_config() -> Option<RuntimeConfig> {
    use js_sys::{Object, Reflect};
    use wasm_bindgen::JsValue;

    let window = web_sys::window()?;
    let config = Reflect::get(&window, &JsValue::from_str("HUB_CONFIG")).ok()?;
    if config.is_null() || config.is_undefined() {
        return None;
    }
    let object = Object::from(config);

    Some(RuntimeConfig {
        api_base_url: read_runtime_value(&object, "api_base_url"),
        auth_provider_url: read_runtime_value(&object, "auth_provider_url"),
        verify_grace_ms: read_runtime_value(&object, "verify_grace_ms")
            .as_deref()
            .and_then(parse_number),
        verify_attempts: read_runtime_value(&object, "verify_attempts")
            .as_deref()
            .and_then(parse_number),
    })
}

#[cfg(not(target_arch = "wasm32"))]
fn runtime_config() -> Option<RuntimeConfig> {
    None
}

#[cfg(target_arch = "wasm32")]
fn read_runtime_value(object: &js_sys::Object, key: &str) -> Option<String> {
    let value = js_sys::Reflect::get(object, &wasm_bindgen::JsValue::from_str(key)).ok()?;
    // Numbers are accepted as well as strings for the numeric knobs.
    let value = value
        .as_string()
        .or_else(|| value.as_f64().map(|number| number.to_string()))?;
    normalize_runtime_value(&value)
}

fn normalize_runtime_value(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn parse_number<T: std::str::FromStr>(value: &str) -> Option<T> {
    normalize_runtime_value(value)?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::{
        AppConfig, RuntimeConfig, apply_runtime_overrides, normalize_runtime_value, parse_number,
    };
    use std::time::Duration;

    #[test]
    fn normalize_runtime_value_trims_and_rejects_empty() {
        assert_eq!(normalize_runtime_value(""), None);
        assert_eq!(normalize_runtime_value("   "), None);
        assert_eq!(
            normalize_runtime_value("  https://hub.example/api "),
            Some("https://hub.example/api".to_string())
        );
    }

    #[test]
    fn parse_number_ignores_garbage() {
        assert_eq!(parse_number::<u64>(" 250 "), Some(250));
        assert_eq!(parse_number::<u32>("three"), None);
        assert_eq!(parse_number::<u32>(""), None);
    }

    #[test]
    fn apply_runtime_overrides_ignores_missing_values() {
        let mut config = AppConfig::default();
        let runtime = RuntimeConfig {
            api_base_url: normalize_runtime_value(""),
            auth_provider_url: normalize_runtime_value("  "),
            verify_grace_ms: parse_number(""),
            verify_attempts: parse_number("x"),
        };

        apply_runtime_overrides(&mut config, runtime);

        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn apply_runtime_overrides_overwrites_when_present() {
        let mut config = AppConfig::default();
        let runtime = RuntimeConfig {
            api_base_url: normalize_runtime_value("https://api.override"),
            auth_provider_url: normalize_runtime_value("https://login.override/"),
            verify_grace_ms: parse_number("0"),
            verify_attempts: parse_number("5"),
        };

        apply_runtime_overrides(&mut config, runtime);

        assert_eq!(config.api_base_url, "https://api.override");
        assert_eq!(config.auth_provider_url, "https://login.override/");
        assert_eq!(config.verify_grace_ms, 0);
        assert_eq!(config.verify_attempts, 5);
    }

    #[test]
    fn verify_policy_never_drops_below_one_attempt() {
        let config = AppConfig {
            verify_attempts: 0,
            verify_grace_ms: 75,
            ..AppConfig::default()
        };
        let policy = config.verify_policy();

        assert_eq!(policy.max_attempts, 1);
        assert_eq!(policy.grace_period, Duration::from_millis(75));
    }
}
