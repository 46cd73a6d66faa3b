//! Exceptions surfaced to the failure hook

use serde::{Deserialize, Serialize};

/// Error raised before or during an upstream call.
///
/// The variants are closed: the failure hook matches on them exhaustively
/// instead of probing for provider attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, thiserror::Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum HookException {
    /// Raised by the upstream model integration
    #[error("{provider} returned status {status} for model {model}: {message}")]
    Provider {
        status: u16,
        provider: String,
        model: String,
        message: String,
    },

    /// Raised by the gateway itself (validation, auth, routing)
    #[error("gateway rejected the request with status {status}: {detail}")]
    Host {
        status: u16,
        detail: serde_json::Value,
    },

    /// Anything that cannot be attributed to either side
    #[error("{message}")]
    Other { message: String },
}

/// Coarse classification used by the failure hook
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExceptionKind {
    /// Upstream model/provider failure, eligible for alerting
    Provider,
    /// Gateway-side failure, never alerted
    Host,
}

impl HookException {
    pub fn provider(
        status: u16,
        provider: impl Into<String>,
        model: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::Provider {
            status,
            provider: provider.into(),
            model: model.into(),
            message: message.into(),
        }
    }

    pub fn host(status: u16, detail: serde_json::Value) -> Self {
        Self::Host { status, detail }
    }

    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
        }
    }

    /// Classify the exception. Unattributable errors are treated as host errors.
    pub fn kind(&self) -> ExceptionKind {
        match self {
            HookException::Provider { .. } => ExceptionKind::Provider,
            HookException::Host { .. } => ExceptionKind::Host,
            HookException::Other { .. } => ExceptionKind::Host,
        }
    }

    /// HTTP status associated with the exception, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            HookException::Provider { status, .. } | HookException::Host { status, .. } => {
                Some(*status)
            }
            HookException::Other { .. } => None,
        }
    }
}

/// Identity of the API key that made the failing request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CallerContext {
    #[serde(default)]
    pub key_alias: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub team_id: Option<String>,
}
