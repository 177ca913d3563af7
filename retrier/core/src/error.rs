//! Error Types
//!
//! Failure taxonomy shared by node clients and the retrying executor.
//!
//! Errors fall into two families:
//! - [`QueryError`]: a query attempt did not produce a response
//! - [`NodeSwitchError`]: a session could not be rebound to another node
//!
//! Application-level failures that arrive inside a successfully transported
//! response are not errors at this layer; see
//! [`LiteResponse`](crate::response::LiteResponse).

use thiserror::Error;

use crate::response::LiteServerError;

/// The transport gave up waiting for a node to answer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Error)]
#[error("lite server request timed out")]
pub struct RequestTimeout;

/// Error returned by a single query attempt or by the executor as a whole
#[derive(Debug, Error)]
pub enum QueryError {
    /// The transport gave up waiting for the node to answer
    #[error(transparent)]
    Timeout(#[from] RequestTimeout),

    /// Any other transport-level failure (connection reset, bad frame, ...)
    #[error("transport error: {0}")]
    Transport(String),

    /// A remote logical error carried over from a retried response
    #[error(transparent)]
    LiteServer(#[from] LiteServerError),

    /// A timeout was received but no other node was left to try
    #[error(
        "timeout error received, but failed to try with next node, \
         looks like all active nodes were already tried, original error: {source}"
    )]
    NodeSwitchAfterTimeout {
        /// The timeout that triggered the switch
        #[source]
        source: RequestTimeout,
    },

    /// Collaborator error outside the taxonomy above
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl QueryError {
    /// Create a timeout error
    #[must_use]
    pub fn timeout() -> Self {
        Self::Timeout(RequestTimeout)
    }

    /// Create a transport error from anything displayable
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    /// Whether this is a transport timeout
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout(_))
    }
}

/// Error returned when a session cannot be moved to a different node
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NodeSwitchError {
    /// Every node in the pool has already been bound during this session
    #[error("no more nodes left to try ({tried} already tried)")]
    NoNodesLeft {
        /// Number of nodes bound so far in this session
        tried: usize,
    },

    /// The pool could not provide a node for another reason
    #[error("node pool unavailable: {0}")]
    Unavailable(String),
}
