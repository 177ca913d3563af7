//! Retrier Core - Retry and Node Failover for Lite Server Clients
//!
//! This crate wraps a client for a fleet of interchangeable lite server nodes
//! and retries queries that fail for transient, node-specific reasons. The
//! wrapper exposes the same capability surface as the client it wraps, so it
//! drops in anywhere the plain client is used.
//!
//! # Architecture
//!
//! ```text
//!   caller
//!     │  query(ctx, request)
//!     v
//! ┌──────────────────────────┐
//! │  RetryingQueryExecutor   │  attempt loop, retry budget, node switching
//! └────────────┬─────────────┘
//!              │  query / sticky_context_next_node
//!              v
//! ┌──────────────────────────┐
//! │     NodeQueryClient      │  transport, encoding, node selection
//! └────────────┬─────────────┘
//!         ┌────┴────┬────────┐
//!         v         v        v
//!      node 1    node 2   node N
//! ```
//!
//! # Key Types
//!
//! - [`NodeQueryClient`]: Capability trait implemented by node clients
//! - [`RetryingQueryExecutor`]: Decorator adding retry and failover
//! - [`LiteResponse`]: A value or an application-level [`LiteServerError`]
//! - [`QueryError`]: Transport-level failure taxonomy
//! - [`SessionContext`]: Sticky node binding with an optional deadline
//! - [`RetryPolicy`]: Attempt bound, loadable from TOML
//!
//! # Quick Start
//!
//! ```ignore
//! use retrier_core::{load_config, NodeQueryClient, RetryingQueryExecutor};
//!
//! let config = load_config()?;
//! let client = RetryingQueryExecutor::new(my_client, config.policy);
//!
//! let ctx = client.sticky_context(&base_ctx);
//! let response = client.query(&ctx, &request).await?;
//! ```
//!
//! # Module Overview
//!
//! - [`client`]: Node client capability trait
//! - [`config`]: Retry policy and TOML/environment loading
//! - [`context`]: Reusable sticky session context
//! - [`error`]: Query and node switch errors
//! - [`executor`]: The retrying executor
//! - [`response`]: Response sum type and the retryable error table

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod client;
pub mod config;
pub mod context;
pub mod error;
pub mod executor;
pub mod response;


// Re-exports for convenience
pub use client::{NodeId, NodeQueryClient};
pub use config::{
    default_config_path, load_config, load_config_from_path, parse_config, ConfigError,
    ConfigOverrides, ConfigSource, RetrierConfig, RetrierToml, RetryPolicy,
};
pub use context::SessionContext;
pub use error::{NodeSwitchError, QueryError, RequestTimeout};
pub use executor::RetryingQueryExecutor;
pub use response::{
    LiteResponse, LiteServerError, ACCOUNT_STATE_FAILURE_CODE, ACCOUNT_STATE_FAILURE_TEXT,
    RETRYABLE_LITE_SERVER_CODES,
};
