//! Plugin registry.

use super::base::Plugin;
use super::strip_thinking::StripThinking;
use crate::Result;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

pub struct PluginRegistry {
    plugins: RwLock<HashMap<String, Arc<dyn Plugin>>>,
    enabled: RwLock<bool>,
}

impl PluginRegistry {
    pub fn new() -> Self {
        Self {
            plugins: RwLock::new(HashMap::new()),
            enabled: RwLock::new(true),
        }
    }

    /// A registry holding every plugin shipped with this crate.
    pub fn with_builtins() -> Self {
        let registry = Self::new();
        registry.insert(Arc::new(StripThinking::new()));
        registry
    }

    pub async fn register(&self, plugin: Arc<dyn Plugin>) -> Result<()> {
        let name = plugin.name().to_string();
        plugin.on_register().await?;
        if let Some(previous) = self.insert(plugin) {
            tracing::warn!(plugin = %name, "replacing previously registered plugin");
            // The replacement stays registered even if the old teardown fails.
            if let Err(e) = previous.on_unregister().await {
                tracing::warn!(plugin = %name, error = %e, "on_unregister failed for replaced plugin");
            }
        }
        tracing::debug!(plugin = %name, "plugin registered");
        Ok(())
    }

    pub async fn unregister(&self, name: &str) -> Result<Option<Arc<dyn Plugin>>> {
        let plugin = self.write_plugins().remove(name);
        if let Some(ref p) = plugin {
            p.on_unregister().await?;
            tracing::debug!(plugin = %name, "plugin unregistered");
        }
        Ok(plugin)
    }

    fn insert(&self, plugin: Arc<dyn Plugin>) -> Option<Arc<dyn Plugin>> {
        self.write_plugins()
            .insert(plugin.name().to_string(), plugin)
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Plugin>> {
        self.read_plugins().get(name).cloned()
    }
    pub fn has(&self, name: &str) -> bool {
        self.read_plugins().contains_key(name)
    }
    pub fn names(&self) -> Vec<String> {
        self.list_by_priority()
            .iter()
            .map(|p| p.name().to_string())
            .collect()
    }
    /// Plugins ordered by priority, ties broken by name.
    pub fn list_by_priority(&self) -> Vec<Arc<dyn Plugin>> {
        let mut p: Vec<_> = self.read_plugins().values().cloned().collect();
        p.sort_by(|a, b| {
            a.priority()
                .cmp(&b.priority())
                .then_with(|| a.name().cmp(b.name()))
        });
        p
    }
    pub fn count(&self) -> usize {
        self.read_plugins().len()
    }
    pub fn set_enabled(&self, e: bool) {
        *self.enabled.write().unwrap_or_else(PoisonError::into_inner) = e;
    }
    pub fn is_enabled(&self) -> bool {
        *self.enabled.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Run every registered plugin over a request, in priority order.
    pub async fn transform_request_in(&self, mut body: Value) -> Result<Value> {
        if !self.is_enabled() {
            return Ok(body);
        }
        for p in self.list_by_priority() {
            body = p.transform_request_in(body).await?;
        }
        Ok(body)
    }

    pub async fn clear(&self) -> Result<()> {
        let plugins: HashMap<_, _> = std::mem::take(&mut *self.write_plugins());
        for (name, p) in plugins {
            if let Err(e) = p.on_unregister().await {
                tracing::warn!(plugin = %name, error = %e, "on_unregister failed during clear");
            }
        }
        Ok(())
    }

    fn read_plugins(&self) -> RwLockReadGuard<'_, HashMap<String, Arc<dyn Plugin>>> {
        self.plugins.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_plugins(&self) -> RwLockWriteGuard<'_, HashMap<String, Arc<dyn Plugin>>> {
        self.plugins.write().unwrap_or_else(PoisonError::into_inner)
    }
}
impl Default for PluginRegistry {
    fn default() -> Self {
        Self::new()
    }
}

static GLOBAL_REGISTRY: once_cell::sync::Lazy<PluginRegistry> =
    once_cell::sync::Lazy::new(PluginRegistry::with_builtins);

/// Process-wide registry, seeded with the built-in plugins.
pub fn get_plugin_registry() -> &'static PluginRegistry {
    &GLOBAL_REGISTRY
}
