//! # strip-thinking
//!
//! Request-pipeline plugin that removes reasoning/thinking metadata from
//! chat-completion payloads before they reach a backend that cannot handle it.
//!
//! ## Overview
//!
//! Some model backends reject the top-level `reasoning` configuration object or
//! the `thinking` content attached to historical messages. The
//! [`StripThinking`] stage deletes both and leaves everything else untouched.
//! It is one implementation of the [`Plugin`] contract; hosts compose plugins
//! into a [`pipeline::Pipeline`] and run each outbound request through it.
//!
//! ## Quick Start
//!
//! ```rust
//! use strip_thinking::StripThinking;
//! use serde_json::json;
//!
//! let body = json!({
//!     "model": "local-model",
//!     "reasoning": {"effort": "high"},
//!     "messages": [{"role": "assistant", "content": "ok", "thinking": "…"}]
//! });
//!
//! let clean = StripThinking.sanitize(body).unwrap();
//! assert_eq!(clean, json!({
//!     "model": "local-model",
//!     "messages": [{"role": "assistant", "content": "ok"}]
//! }));
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`plugins`] | Stage contract, registry and the built-in plugins |
//! | [`pipeline`] | Ordered stage execution and its configuration |

pub mod pipeline;
pub mod plugins;

pub use pipeline::{Pipeline, PipelineBuilder, PipelineConfig};
pub use plugins::{Plugin, PluginPriority, PluginRegistry, StripThinking};

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the library
pub mod error;
pub use error::{Error, ErrorContext};
