//! Removes reasoning/thinking metadata from outbound chat-completion requests.
//!
//! Some backends reject the top-level `reasoning` configuration object or the
//! `thinking` content carried on historical messages. This stage deletes both
//! and leaves every other attribute untouched.

use super::base::Plugin;
use crate::{Error, ErrorContext, Result};
use async_trait::async_trait;
use serde_json::Value;

const REASONING_FIELD: &str = "reasoning";
const MESSAGES_FIELD: &str = "messages";
const THINKING_FIELD: &str = "thinking";

/// Stateless request sanitizer registered as `"strip-thinking"`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StripThinking;

impl StripThinking {
    pub const NAME: &'static str = "strip-thinking";

    pub fn new() -> Self {
        Self
    }

    /// Sanitize a payload, consuming it and returning the same value with
    /// `reasoning` and every message's `thinking` removed.
    pub fn sanitize(&self, mut body: Value) -> Result<Value> {
        Self::sanitize_in_place(&mut body)?;
        Ok(body)
    }

    /// Borrowing variant of [`StripThinking::sanitize`].
    ///
    /// Only a non-object payload is an error. A missing or non-array
    /// `messages`, and non-object entries inside it, are left alone.
    pub fn sanitize_in_place(body: &mut Value) -> Result<()> {
        let obj = match body {
            Value::Object(obj) => obj,
            other => {
                return Err(Error::contract_violation_with_context(
                    "request payload must be a JSON object",
                    ErrorContext::new()
                        .with_field_path("request")
                        .with_details(format!("got {}", json_type_name(other)))
                        .with_source(Self::NAME),
                ))
            }
        };

        if obj.contains_key(REASONING_FIELD) {
            obj.shift_remove(REASONING_FIELD);
        }

        if let Some(messages) = obj.get_mut(MESSAGES_FIELD).and_then(Value::as_array_mut) {
            for msg in messages.iter_mut().filter_map(Value::as_object_mut) {
                if msg.contains_key(THINKING_FIELD) {
                    msg.shift_remove(THINKING_FIELD);
                }
            }
        }

        Ok(())
    }
}

#[async_trait]
impl Plugin for StripThinking {
    fn name(&self) -> &str {
        Self::NAME
    }

    async fn transform_request_in(&self, body: Value) -> Result<Value> {
        self.sanitize(body)
    }
}

fn json_type_name(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
