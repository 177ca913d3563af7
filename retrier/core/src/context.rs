//! Sticky Session Context
//!
//! A cloneable session value that pins queries to one node until the session
//! is explicitly rebound. Node clients can use [`SessionContext`] directly as
//! their [`NodeQueryClient::Context`](crate::client::NodeQueryClient::Context).
//!
//! Rebinding never mutates a context in place: [`SessionContext::bound_to`]
//! returns a new value, so a failed switch leaves the old session usable.

use std::time::Duration;

use tokio::time::Instant;

use crate::client::NodeId;

/// Session handle carrying a sticky node binding and an optional deadline
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SessionContext {
    /// Node this session is currently bound to
    node: Option<NodeId>,
    /// Nodes this session was bound to before the current one
    tried: Vec<NodeId>,
    /// Point in time after which the caller no longer wants an answer
    deadline: Option<Instant>,
}

impl SessionContext {
    /// Create an unbound session without a deadline
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a deadline relative to now
    #[must_use]
    pub fn with_deadline(mut self, timeout: Duration) -> Self {
        self.deadline = Some(Instant::now() + timeout);
        self
    }

    /// Return a copy of this session bound to `node`
    ///
    /// The previous binding, if any, is remembered as tried.
    #[must_use]
    pub fn bound_to(&self, node: NodeId) -> Self {
        let mut tried = self.tried.clone();
        if let Some(previous) = self.node {
            if !tried.contains(&previous) {
                tried.push(previous);
            }
        }

        Self {
            node: Some(node),
            tried,
            deadline: self.deadline,
        }
    }

    /// Node the session is bound to, if any
    #[must_use]
    pub fn node(&self) -> Option<NodeId> {
        self.node
    }

    /// Whether `node` is or was bound during this session
    #[must_use]
    pub fn has_tried(&self, node: NodeId) -> bool {
        self.node == Some(node) || self.tried.contains(&node)
    }

    /// Number of distinct nodes this session has been bound to
    #[must_use]
    pub fn tried_count(&self) -> usize {
        let current = self.node.filter(|node| !self.tried.contains(node));
        self.tried.len() + usize::from(current.is_some())
    }

    /// The deadline, if one was set
    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Time left before the deadline (`None` when there is no deadline)
    #[must_use]
    pub fn remaining(&self) -> Option<Duration> {
        self.deadline
            .map(|deadline| deadline.saturating_duration_since(Instant::now()))
    }

    /// Whether the deadline has passed
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.remaining().is_some_and(|left| left.is_zero())
    }
}
