//! Plugin system: the stage contract and the plugins shipped with the crate.

mod base;
mod registry;
mod strip_thinking;

pub use base::{CompositePlugin, Plugin, PluginPriority};
pub use registry::{get_plugin_registry, PluginRegistry};
pub use strip_thinking::StripThinking;
