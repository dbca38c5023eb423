use std::fmt;

/// Transport-level failures raised by the HTTP helpers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AppError {
    Config(String),
    Network(String),
    Timeout(String),
    Http { status: u16, message: String },
    Parse(String),
    Serialization(String),
}

impl AppError {
    /// HTTP status carried by the error, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            AppError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// True when the server rejected the session cookie.
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }

    /// True when the request never got an answer and may succeed if repeated.
    pub fn is_transient(&self) -> bool {
        matches!(self, AppError::Network(_) | AppError::Timeout(_))
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(message) => write!(formatter, "Config error: {message}"),
            AppError::Network(message) => write!(formatter, "Network error: {message}"),
            AppError::Timeout(message) => write!(formatter, "Timeout: {message}"),
            AppError::Http { status, message } => {
                write!(formatter, "Request failed ({status}): {message}")
            }
            AppError::Parse(message) => write!(formatter, "Response error: {message}"),
            AppError::Serialization(message) => {
                write!(formatter, "Request error: {message}")
            }
        }
    }
}

impl std::error::Error for AppError {}

#[cfg(test)]
mod tests {
    use super::AppError;

    #[test]
    fn unauthorized_is_only_a_401_response() {
        let rejected = AppError::Http {
            status: 401,
            message: "Not authenticated".to_string(),
        };
        let forbidden = AppError::Http {
            status: 403,
            message: "Forbidden".to_string(),
        };

        assert!(rejected.is_unauthorized());
        assert!(!forbidden.is_unauthorized());
        assert!(!AppError::Network("offline".to_string()).is_unauthorized());
    }

    #[test]
    fn transient_covers_network_and_timeout() {
        assert!(AppError::Network("offline".to_string()).is_transient());
        assert!(AppError::Timeout("slow".to_string()).is_transient());
        assert!(!AppError::Parse("bad json".to_string()).is_transient());
        assert!(
            !AppError::Http {
                status: 500,
                message: "boom".to_string()
            }
            .is_transient()
        );
    }

    #[test]
    fn display_includes_status() {
        let err = AppError::Http {
            status: 401,
            message: "Invalid session".to_string(),
        };
        assert_eq!(err.to_string(), "Request failed (401): Invalid session");
    }
}
