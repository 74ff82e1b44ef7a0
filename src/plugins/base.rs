//! Base plugin types.
//!
//! A plugin is one stage of the request pipeline. The host owns the stages and
//! drives them; a stage never calls into the host.
//!
//! Ownership: payloads travel **by value**. A stage receives the payload the
//! previous stage returned, may mutate it in place, and returns it. The caller
//! gives up the value it passed in, so no stage can observe another's
//! pre-transform shape.

use crate::Result;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PluginPriority {
    Highest = 0,
    High = 25,
    Normal = 50,
    Low = 75,
    Lowest = 100,
}
impl Default for PluginPriority {
    fn default() -> Self {
        PluginPriority::Normal
    }
}

#[async_trait]
pub trait Plugin: Send + Sync {
    /// Stable identifier used for registration, logging and config lookup.
    fn name(&self) -> &str;
    fn priority(&self) -> PluginPriority {
        PluginPriority::Normal
    }
    async fn on_register(&self) -> Result<()> {
        Ok(())
    }
    async fn on_unregister(&self) -> Result<()> {
        Ok(())
    }
    /// Transform an outbound request payload before it reaches the backend.
    async fn transform_request_in(&self, body: Value) -> Result<Value> {
        Ok(body)
    }
    /// Transform a backend response on its way back to the client.
    async fn transform_response_out(&self, body: Value) -> Result<Value> {
        Ok(body)
    }
}

/// Several plugins exposed under a single name.
///
/// Requests flow through the children in insertion order, responses in
/// reverse order.
pub struct CompositePlugin {
    name: String,
    plugins: Vec<Arc<dyn Plugin>>,
}
impl CompositePlugin {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            plugins: Vec::new(),
        }
    }
    pub fn add(mut self, p: Arc<dyn Plugin>) -> Self {
        self.plugins.push(p);
        self
    }
    pub fn len(&self) -> usize {
        self.plugins.len()
    }
    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }
}

#[async_trait]
impl Plugin for CompositePlugin {
    fn name(&self) -> &str {
        &self.name
    }
    async fn on_register(&self) -> Result<()> {
        for p in &self.plugins {
            p.on_register().await?;
        }
        Ok(())
    }
    async fn on_unregister(&self) -> Result<()> {
        for p in &self.plugins {
            p.on_unregister().await?;
        }
        Ok(())
    }
    async fn transform_request_in(&self, mut body: Value) -> Result<Value> {
        for p in &self.plugins {
            body = p.transform_request_in(body).await?;
        }
        Ok(body)
    }
    async fn transform_response_out(&self, mut body: Value) -> Result<Value> {
        for p in self.plugins.iter().rev() {
            body = p.transform_response_out(body).await?;
        }
        Ok(body)
    }
}
