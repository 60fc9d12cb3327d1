// ── Core error types ──
//
// Errors carried by session events and stored on the session tree. These
// are NOT transport-specific: consumers never see reqwest errors or JSON
// parse failures directly. The `From<geoimport_api::Error>` impl translates
// transport-layer errors into domain-appropriate variants.
//
// Every variant holds owned strings so the error can be cloned into events
// and compared in tests.

use serde::{Serialize, Serializer};
use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot connect to import service at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    #[error("Request to the import service timed out")]
    Timeout,

    // ── Data errors ──────────────────────────────────────────────────
    #[error("Entity not found: {entity_type} {identifier}")]
    NotFound {
        entity_type: String,
        identifier: String,
    },

    // ── Operation errors ─────────────────────────────────────────────
    #[error("Rejected by import service (HTTP {status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("Validation failed: {message}")]
    ValidationFailed { message: String },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    pub(crate) fn not_found(entity_type: &str, identifier: impl ToString) -> Self {
        Self::NotFound {
            entity_type: entity_type.into(),
            identifier: identifier.to_string(),
        }
    }
}

// Rendered as its message in JSON/YAML output of the session tree.
impl Serialize for CoreError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<geoimport_api::Error> for CoreError {
    fn from(err: geoimport_api::Error) -> Self {
        match err {
            geoimport_api::Error::Authentication { message } => {
                CoreError::AuthenticationFailed { message }
            }
            geoimport_api::Error::Transport(ref e) => {
                if e.is_timeout() {
                    CoreError::Timeout
                } else if e.is_connect() {
                    CoreError::ConnectionFailed {
                        url: e.url().map(ToString::to_string).unwrap_or_else(|| "<unknown>".into()),
                        reason: e.to_string(),
                    }
                } else {
                    CoreError::Rejected {
                        status: e.status().map_or(0, |s| s.as_u16()),
                        message: e.to_string(),
                    }
                }
            }
            geoimport_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            geoimport_api::Error::Tls(msg) => CoreError::ConnectionFailed {
                url: String::new(),
                reason: format!("TLS error: {msg}"),
            },
            geoimport_api::Error::Service { status: 404, message } => CoreError::NotFound {
                entity_type: "resource".into(),
                identifier: message,
            },
            geoimport_api::Error::Service { status, message } => {
                CoreError::Rejected { status, message }
            }
            geoimport_api::Error::Deserialization { message, body: _ } => {
                CoreError::Internal(format!("Deserialization error: {message}"))
            }
            geoimport_api::Error::Io(e) => CoreError::ValidationFailed {
                message: format!("cannot read input: {e}"),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_404_becomes_not_found() {
        let err = CoreError::from(geoimport_api::Error::Service {
            status: 404,
            message: "No such import: 3".into(),
        });
        assert!(matches!(err, CoreError::NotFound { .. }));
    }

    #[test]
    fn service_errors_keep_status() {
        let err = CoreError::from(geoimport_api::Error::Service {
            status: 500,
            message: "boom".into(),
        });
        assert_eq!(
            err,
            CoreError::Rejected {
                status: 500,
                message: "boom".into()
            }
        );
    }

    #[test]
    fn serializes_as_message() {
        let err = CoreError::Timeout;
        assert_eq!(
            serde_json::to_value(&err).ok(),
            Some(serde_json::json!("Request to the import service timed out"))
        );
    }
}
