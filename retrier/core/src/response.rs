//! Lite Server Responses
//!
//! A lite server can answer a well-formed request with an application-level
//! failure instead of a value. [`LiteResponse`] keeps both outcomes in one sum
//! type so callers match on the tag rather than probing the payload.
//!
//! # Retryable Codes
//!
//! Some remote errors only mean "this node cannot answer right now" and are
//! worth retrying on a different node:
//!
//! | Code   | Meaning                                       |
//! |--------|-----------------------------------------------|
//! | `651`  | block is not applied yet                      |
//! | `652`  | remote timeout                                |
//! | `-400` | observed transient failure                    |
//! | `-503` | remote timeout (observed in practice)         |
//! | `0`    | only when the text reports a failed account state lookup |
//!
//! Codes follow the remote protocol's error catalogue
//! (`common/errorcode.h` in the node implementation).

use thiserror::Error;

/// Remote error codes that are retried on a different node
pub const RETRYABLE_LITE_SERVER_CODES: &[i32] = &[651, 652, -400, -503];

/// Generic code that is only retryable together with [`ACCOUNT_STATE_FAILURE_TEXT`]
pub const ACCOUNT_STATE_FAILURE_CODE: i32 = 0;

/// Message fragment marking a node that failed to load account state
pub const ACCOUNT_STATE_FAILURE_TEXT: &str = "Failed to get account state";

/// Application-level error reported by a lite server
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("lite server error {code}: {text}")]
pub struct LiteServerError {
    /// Numeric error code from the remote catalogue
    pub code: i32,
    /// Free-text message
    pub text: String,
}

impl LiteServerError {
    /// Create a new lite server error
    pub fn new(code: i32, text: impl Into<String>) -> Self {
        Self {
            code,
            text: text.into(),
        }
    }

    /// Whether another node might answer this request successfully
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        RETRYABLE_LITE_SERVER_CODES.contains(&self.code)
            || (self.code == ACCOUNT_STATE_FAILURE_CODE
                && self.text.contains(ACCOUNT_STATE_FAILURE_TEXT))
    }
}

/// Outcome of a successfully transported query
#[derive(Clone, Debug, PartialEq)]
pub enum LiteResponse<T> {
    /// The requested value
    Value(T),
    /// The node answered with an application-level error
    Error(LiteServerError),
}

impl<T> LiteResponse<T> {
    /// The embedded remote error, if any
    pub fn lite_server_error(&self) -> Option<&LiteServerError> {
        match self {
            Self::Value(_) => None,
            Self::Error(err) => Some(err),
        }
    }

    /// The embedded remote error, but only if it is worth a node switch
    pub fn retryable_error(&self) -> Option<&LiteServerError> {
        self.lite_server_error().filter(|err| err.is_retryable())
    }

    /// Convert into a plain `Result`, surfacing the remote error
    pub fn into_result(self) -> Result<T, LiteServerError> {
        match self {
            Self::Value(value) => Ok(value),
            Self::Error(err) => Err(err),
        }
    }
}

impl<T> From<LiteServerError> for LiteResponse<T> {
    fn from(err: LiteServerError) -> Self {
        Self::Error(err)
    }
}
