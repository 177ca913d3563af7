//! Retrying Query Executor
//!
//! Decorator over a [`NodeQueryClient`] that turns transient node failures
//! into retries, moving the session to another node when the failure is
//! node-specific.
//!
//! # Attempt Loop
//!
//! ```text
//!            +-------------------------------+
//!            | prior error && budget spent?  |--yes--> return prior error
//!            +---------------+---------------+
//!                            | no
//!                            v
//!                   inner.query(ctx, req)
//!                            |
//!        +-------------------+---------------------+
//!        |                   |                     |
//!     Timeout          other error              Ok(response)
//!        |                   |                     |
//!   next node?          retry same node     retryable remote error?
//!    |      |                                  |          |
//!   yes     no                                 no        yes
//!    |      |                                  |          |
//!  retry  NodeSwitchAfterTimeout         return Ok   next node?
//!                                                     |       |
//!                                                    yes      no
//!                                                     |       |
//!                                                   retry   return Ok
//! ```
//!
//! Running out of nodes after a timeout is an error, while running out of
//! nodes after a retryable remote error returns the response as it is. Both
//! behaviours are intentional and covered by tests.
//!
//! The executor keeps no state between calls. Concurrent callers can share
//! one instance behind an `Arc`.

use async_trait::async_trait;

use crate::client::{NodeId, NodeQueryClient};
use crate::config::RetryPolicy;
use crate::error::{NodeSwitchError, QueryError};
use crate::response::LiteResponse;

/// Node client wrapper adding retry and node failover to `query`
#[derive(Debug)]
pub struct RetryingQueryExecutor<C> {
    inner: C,
    policy: RetryPolicy,
}

impl<C: NodeQueryClient> RetryingQueryExecutor<C> {
    /// Wrap `inner` with the given retry policy
    pub fn new(inner: C, policy: RetryPolicy) -> Self {
        Self { inner, policy }
    }

    /// Wrap `inner`, stopping after `max_retries` attempts (non-positive = unbounded)
    pub fn with_max_retries(inner: C, max_retries: i32) -> Self {
        Self::new(inner, RetryPolicy::with_max_retries(max_retries))
    }

    /// The retry policy in effect
    pub fn policy(&self) -> RetryPolicy {
        self.policy
    }

    /// The wrapped client
    pub fn inner(&self) -> &C {
        &self.inner
    }

    /// Unwrap the executor, returning the wrapped client
    pub fn into_inner(self) -> C {
        self.inner
    }
}

#[async_trait]
impl<C: NodeQueryClient> NodeQueryClient for RetryingQueryExecutor<C> {
    type Context = C::Context;
    type Request = C::Request;
    type Value = C::Value;

    async fn query(
        &self,
        ctx: &Self::Context,
        request: &Self::Request,
    ) -> Result<LiteResponse<Self::Value>, QueryError> {
        let mut ctx = ctx.clone();
        let mut attempts: u32 = 0;
        let mut prior_error: Option<QueryError> = None;

        loop {
            if let Some(err) = prior_error.take() {
                if self.policy.exhausted(attempts) {
                    tracing::warn!(
                        attempts,
                        max_retries = self.policy.max_retries,
                        error = %err,
                        "Retry budget exhausted"
                    );
                    return Err(err);
                }
            }

            let node = self.inner.sticky_node_id(&ctx);
            let result = self.inner.query(&ctx, request).await;
            attempts = attempts.saturating_add(1);

            match result {
                Err(QueryError::Timeout(timeout)) => {
                    match self.inner.sticky_context_next_node(&ctx) {
                        Ok(next) => {
                            let to = self.inner.sticky_node_id(&next);
                            log_switch(node, to, attempts, &timeout);
                            ctx = next;
                            prior_error = Some(QueryError::Timeout(timeout));
                        }
                        Err(switch_err) => {
                            log_no_node_left(node, attempts, &timeout, &switch_err);
                            return Err(QueryError::NodeSwitchAfterTimeout { source: timeout });
                        }
                    }
                }
                Err(err) => {
                    tracing::debug!(node, attempts, error = %err, "Query failed, retrying");
                    prior_error = Some(err);
                }
                Ok(response) => {
                    let Some(lite_err) = response.retryable_error().cloned() else {
                        return Ok(response);
                    };

                    match self.inner.sticky_context_next_node(&ctx) {
                        Ok(next) => {
                            let to = self.inner.sticky_node_id(&next);
                            log_switch(node, to, attempts, &lite_err);
                            ctx = next;
                            prior_error = Some(QueryError::LiteServer(lite_err));
                        }
                        Err(switch_err) => {
                            log_no_node_left(node, attempts, &lite_err, &switch_err);
                            return Ok(response);
                        }
                    }
                }
            }
        }
    }

    fn sticky_context(&self, ctx: &Self::Context) -> Self::Context {
        self.inner.sticky_context(ctx)
    }

    fn sticky_node_id(&self, ctx: &Self::Context) -> NodeId {
        self.inner.sticky_node_id(ctx)
    }

    fn sticky_context_next_node(
        &self,
        ctx: &Self::Context,
    ) -> Result<Self::Context, NodeSwitchError> {
        self.inner.sticky_context_next_node(ctx)
    }
}

fn log_switch(from: NodeId, to: NodeId, attempts: u32, cause: &dyn std::error::Error) {
    tracing::warn!(from, to, attempts, error = %cause, "Switching to next node");
}

fn log_no_node_left(
    node: NodeId,
    attempts: u32,
    cause: &dyn std::error::Error,
    switch_err: &NodeSwitchError,
) {
    tracing::info!(
        node,
        attempts,
        error = %cause,
        switch_error = %switch_err,
        "No node left to switch to"
    );
}
