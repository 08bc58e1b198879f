//! Knowledge-object domain for the Splunk REST client.
//!
//! This crate holds every value type, path rule, and error used when managing
//! field extractions, transforms, and their access-control lists. The HTTP
//! adapter (`splunk-client`) implements the [`KnowledgeService`] trait defined
//! here; it never adds domain rules.
//!
//! ## Architectural Layer
//!
//! **Domain + port definitions.** This crate has no I/O dependencies.
//! It defines *what* is sent; infrastructure crates define *how* it travels.
//!
//! ## Module Layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`acl`] | [`AccessControl`] descriptor and its form encoding |
//! | [`paths`] | Collection endpoints, [`ExtractionKey`], compound-key path encoding |
//! | [`types`] | [`ListOptions`], [`ResponseEnvelope`], [`Record`], [`CreateOutcome`] |
//! | [`errors`] | [`KnowledgeError`] taxonomy |
//! | [`service`] | [`KnowledgeService`] port trait |

pub mod acl;
pub mod errors;
pub mod paths;
pub mod service;
pub mod types;

// Re-export everything at the crate root for ergonomic usage by downstream crates.
pub use acl::AccessControl;
pub use errors::{KnowledgeError, KnowledgeResult};
pub use paths::{encode_path, ExtractionKey, ACL_SEGMENT, EXTRACTIONS_PATH, TRANSFORMS_PATH};
pub use service::KnowledgeService;
pub use types::{CreateOutcome, ListOptions, Record, ResponseEnvelope};
