//! Node Client Capability
//!
//! Trait definition for clients that query a fleet of interchangeable lite
//! server nodes. This abstraction lets the retrying executor wrap any
//! transport without knowing how requests are encoded, how sessions are
//! established, or how the next node is chosen.
//!
//! # Sticky Sessions
//!
//! Every query runs inside a session context that is bound to exactly one
//! node. The binding is "sticky": it stays until the session is explicitly
//! rebound with [`NodeQueryClient::sticky_context_next_node`], which returns a
//! *new* context and leaves the old one untouched.

use async_trait::async_trait;

use crate::error::{NodeSwitchError, QueryError};
use crate::response::LiteResponse;

/// Identifier of a lite server node
pub type NodeId = u32;

/// Capability set of a client talking to a fleet of lite server nodes
///
/// Implement this trait to plug a transport into the retrying executor.
#[async_trait]
pub trait NodeQueryClient: Send + Sync {
    /// Session context carrying the node binding, deadline and cancellation
    type Context: Clone + Send + Sync;

    /// Request payload (already in its serializable form)
    type Request: Send + Sync;

    /// Value produced by a successful query
    type Value: Send;

    /// Execute one request against the node currently bound in `ctx`
    ///
    /// A response that carries an application-level error is still `Ok`;
    /// only transport-level failures are returned as `Err`.
    async fn query(
        &self,
        ctx: &Self::Context,
        request: &Self::Request,
    ) -> Result<LiteResponse<Self::Value>, QueryError>;

    /// Return a context pinned to one node for the lifetime of a session
    fn sticky_context(&self, ctx: &Self::Context) -> Self::Context;

    /// Report which node a context is currently bound to
    fn sticky_node_id(&self, ctx: &Self::Context) -> NodeId;

    /// Return a new context bound to a different node
    ///
    /// Fails when no alternative node is available; callers treat that as
    /// "all nodes exhausted".
    fn sticky_context_next_node(
        &self,
        ctx: &Self::Context,
    ) -> Result<Self::Context, NodeSwitchError>;
}
