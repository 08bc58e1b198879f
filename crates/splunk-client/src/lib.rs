//! Splunk REST client adapter.
//!
//! Implements the [`knowledge::KnowledgeService`] trait over the Splunk
//! management REST API: JSON responses (`output_mode=json`), HTTP basic
//! authentication, and form-encoded request bodies.
//!
//! ## Architectural Layer
//!
//! **Infrastructure.** URL handling, TLS settings, request construction,
//! status handling, and envelope decoding all live here. The [`knowledge`]
//! crate sees only [`knowledge::KnowledgeService`].
//!
//! ## Error Handling
//!
//! Nothing is retried. Network failures, HTTP statuses of 400 and above, and
//! undecodable bodies are each reported as their own
//! [`knowledge::KnowledgeError`] variant. A create with an ACL is two
//! requests; see [`knowledge::KnowledgeError::AclNotApplied`].
//!
//! ## Example
//!
//! ```rust,ignore
//! use knowledge::{ExtractionKey, KnowledgeService};
//! use splunk_client::{ClientConfig, SplunkClient};
//!
//! let config = ClientConfig::new("https://splunk.example:8089", "admin", "changeme");
//! let client = SplunkClient::new(config)?;
//! let extractions = client.knowledge().list_extractions(None).await?;
//! client
//!     .knowledge()
//!     .delete_extraction(&ExtractionKey::new("access_combined", "REPORT", "auth"))
//!     .await?;
//! ```

pub mod client;
pub mod config;
mod operations;

pub use client::SplunkClient;
pub use config::{ClientConfig, DEFAULT_USER_AGENT};
