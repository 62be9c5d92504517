//! Error types for the collection client and its HTTP facade.

use crate::domain::ErrorReason;

/// Which part of the exchange failed at the transport level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportErrorKind {
    /// DNS, TCP or TLS failure before a response arrived
    Connect,
    /// The per-call deadline expired
    Timeout,
    /// The caller's cancellation token fired
    Cancelled,
    /// Any other failure while sending or reading the body
    Other,
}

impl std::fmt::Display for TransportErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransportErrorKind::Connect => write!(f, "connect"),
            TransportErrorKind::Timeout => write!(f, "timeout"),
            TransportErrorKind::Cancelled => write!(f, "cancelled"),
            TransportErrorKind::Other => write!(f, "other"),
        }
    }
}

/// Connectivity failure; no usable response was received.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Transport error ({kind}): {message}")]
pub struct TransportError {
    pub kind: TransportErrorKind,
    pub message: String,
}

impl TransportError {
    pub fn new(kind: TransportErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn cancelled() -> Self {
        Self::new(TransportErrorKind::Cancelled, "request cancelled by caller")
    }
}

/// Every way a provider call can fail.
///
/// The client never swallows or retries an error; each variant carries
/// enough context (status code, raw body) to be logged as-is.
#[derive(Debug, thiserror::Error)]
pub enum MomoError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("API error: status {status}, response: {body}")]
    Api {
        status: u16,
        body: String,
        reason: Option<ErrorReason>,
    },

    #[error("Decode error: {message}")]
    Decode { message: String, body: String },

    #[error("Validation error: {0}")]
    Validation(String),
}

impl MomoError {
    /// Builds an `Api` error, decoding the body as an [`ErrorReason`] when it
    /// is a well-formed provider error payload.
    pub fn api(status: u16, body: impl Into<String>) -> Self {
        let body = body.into();
        let reason = serde_json::from_str::<ErrorReason>(&body)
            .ok()
            .filter(|r| !r.code.is_empty() || !r.message.is_empty());
        MomoError::Api {
            status,
            body,
            reason,
        }
    }

    pub fn decode(err: &serde_json::Error, body: impl Into<String>) -> Self {
        MomoError::Decode {
            message: err.to_string(),
            body: body.into(),
        }
    }

    /// Transport failures may be retried by the caller; everything else
    /// reflects a definite answer from the provider or bad input.
    pub fn is_retryable(&self) -> bool {
        matches!(self, MomoError::Transport(_))
    }

    /// HTTP status of the provider response, if one was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            MomoError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Decoded provider error payload, if any.
    pub fn reason(&self) -> Option<&ErrorReason> {
        match self {
            MomoError::Api { reason, .. } => reason.as_ref(),
            _ => None,
        }
    }
}

/// Application-level errors (for HTTP responses).
///
/// Maps cleanly to HTTP status codes.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<MomoError> for AppError {
    fn from(err: MomoError) -> Self {
        match err {
            MomoError::Validation(msg) => AppError::BadRequest(msg),
            other => AppError::Internal(other.to_string()),
        }
    }
}
