//! Request pipeline: an ordered chain of plugin stages.
//!
//! ```text
//! client request → stage 1 → stage 2 → … → backend
//! client ← stage 1 ← stage 2 ← … ← backend response
//! ```
//!
//! Each stage receives the payload returned by the previous one. A failing
//! stage aborts that single request; the error names the stage and carries
//! its cause. Nothing is retried.
//!
//! ## Example
//!
//! ```rust,no_run
//! use strip_thinking::pipeline::{Pipeline, PipelineConfig};
//! use strip_thinking::plugins::get_plugin_registry;
//! use serde_json::json;
//!
//! # async fn run() -> strip_thinking::Result<()> {
//! let config = PipelineConfig::from_yaml_str("stages: [strip-thinking]")?;
//! let pipeline = Pipeline::from_config(&config, get_plugin_registry())?;
//! let body = pipeline
//!     .process_request(json!({"model": "m", "reasoning": {"effort": "high"}}))
//!     .await?;
//! assert_eq!(body, json!({"model": "m"}));
//! # Ok(())
//! # }
//! ```

mod config;


pub use config::{PipelineConfig, PIPELINE_ENV_VAR};

use crate::plugins::{Plugin, PluginRegistry};
use crate::Result;
use serde_json::Value;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, warn, Instrument};
use uuid::Uuid;

/// Pipeline error types
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("Unknown pipeline stage: {name}{}", .hint.as_ref().map(|h| format!("\n💡 Hint: {}", h)).unwrap_or_default())]
    UnknownStage { name: String, hint: Option<String> },

    #[error("Duplicate pipeline stage: {0}")]
    DuplicateStage(String),

    #[error("Stage '{stage}' failed: {source}")]
    StageFailed {
        stage: String,
        source: Box<crate::Error>,
    },
}

impl PipelineError {
    /// Attach an actionable hint to the error
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        if let PipelineError::UnknownStage { hint: ref mut slot, .. } = self {
            *slot = Some(hint.into());
        }
        self
    }

    /// Name of the stage this error is about, if any.
    pub fn stage(&self) -> &str {
        match self {
            PipelineError::UnknownStage { name, .. } => name,
            PipelineError::DuplicateStage(name) => name,
            PipelineError::StageFailed { stage, .. } => stage,
        }
    }
}

/// Builds a [`Pipeline`] from stages in the order they are added.
pub struct PipelineBuilder {
    stages: Vec<Arc<dyn Plugin>>,
}

impl PipelineBuilder {
    pub fn new() -> Self {
        Self { stages: Vec::new() }
    }

    pub fn add_stage(mut self, stage: Arc<dyn Plugin>) -> Self {
        self.stages.push(stage);
        self
    }

    pub fn build(self) -> std::result::Result<Pipeline, PipelineError> {
        let mut seen = HashSet::new();
        for stage in &self.stages {
            if !seen.insert(stage.name().to_string()) {
                return Err(PipelineError::DuplicateStage(stage.name().to_string()));
            }
        }
        Ok(Pipeline {
            stages: self.stages,
        })
    }
}

impl Default for PipelineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Ordered request/response stages applied before a request reaches its backend.
pub struct Pipeline {
    stages: Vec<Arc<dyn Plugin>>,
}

impl Pipeline {
    /// Resolve the configured stage names against a registry.
    pub fn from_config(
        config: &PipelineConfig,
        registry: &PluginRegistry,
    ) -> std::result::Result<Self, PipelineError> {
        let mut builder = PipelineBuilder::new();
        for name in &config.stages {
            let stage = registry.get(name).ok_or_else(|| {
                PipelineError::UnknownStage {
                    name: name.clone(),
                    hint: None,
                }
                .with_hint(format!("registered stages: {}", registry.names().join(", ")))
            })?;
            builder = builder.add_stage(stage);
        }
        builder.build()
    }

    pub fn stage_names(&self) -> Vec<&str> {
        self.stages.iter().map(|s| s.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Run an outbound request through every stage, first to last.
    pub async fn process_request(&self, body: Value) -> Result<Value> {
        let request_id = Uuid::new_v4().to_string();
        let span = tracing::debug_span!("pipeline_request", request_id = %request_id);
        async move {
            let mut body = body;
            for stage in &self.stages {
                debug!(stage = stage.name(), "transform_request_in");
                body = stage
                    .transform_request_in(body)
                    .await
                    .map_err(|e| stage_failed(stage.as_ref(), e))?;
            }
            Ok(body)
        }
        .instrument(span)
        .await
    }

    /// Run a backend response through every stage, last to first.
    pub async fn process_response(&self, body: Value) -> Result<Value> {
        let response_id = Uuid::new_v4().to_string();
        let span = tracing::debug_span!("pipeline_response", response_id = %response_id);
        async move {
            let mut body = body;
            for stage in self.stages.iter().rev() {
                debug!(stage = stage.name(), "transform_response_out");
                body = stage
                    .transform_response_out(body)
                    .await
                    .map_err(|e| stage_failed(stage.as_ref(), e))?;
            }
            Ok(body)
        }
        .instrument(span)
        .await
    }
}

fn stage_failed(stage: &dyn Plugin, err: crate::Error) -> crate::Error {
    warn!(stage = stage.name(), error = %err, "pipeline stage failed");
    PipelineError::StageFailed {
        stage: stage.name().to_string(),
        source: Box::new(err),
    }
    .into()
}
