//! Dispatcher: turns a selected tool name into an executed action.
//!
//! Two paths, both recorded in the execution log:
//! - inline: the tool's handler collects nothing itself, it receives the
//!   validated parameters and performs one external call;
//! - external: the tool's program is started in a new terminal.

pub mod log;

pub use log::{ExecutionLog, ExecutionLogEntry, LogStatus, LOG_CAPACITY};

use crate::error::{Result, ToolkitError};
use crate::launcher::{LaunchHandle, Launcher};
use crate::registry::Registry;
use crate::tools::HandlerSet;
use crate::types::{FieldKind, InputField, ToolDescriptor, ToolOutput};
use serde_json::{Map, Value};
use tracing::debug;

/// Logged when a program starts successfully.
pub const LAUNCHED_MESSAGE: &str = "Program launched in new terminal";

pub struct Dispatcher {
    registry: Registry,
    handlers: HandlerSet,
    launcher: Launcher,
    log: ExecutionLog,
}

impl Dispatcher {
    pub fn new(
        registry: Registry,
        handlers: HandlerSet,
        launcher: Launcher,
        log: ExecutionLog,
    ) -> Self {
        Self {
            registry,
            handlers,
            launcher,
            log,
        }
    }

    /// Look up a tool by display name.
    pub fn resolve(&self, name: &str) -> Result<&ToolDescriptor> {
        self.registry
            .get(name)
            .ok_or_else(|| ToolkitError::NotFound(name.to_string()))
    }

    /// Start the tool's program in a new terminal without waiting on it.
    pub fn launch_external(&mut self, tool: &ToolDescriptor) -> Result<LaunchHandle> {
        match self.launcher.launch(tool) {
            Ok(handle) => {
                debug!("{} started as pid {}", tool.name, handle.pid);
                self.log.record(&tool.name, LogStatus::Launched, LAUNCHED_MESSAGE);
                Ok(handle)
            }
            Err(e) => {
                self.log.record(&tool.name, LogStatus::Error, e.to_string());
                Err(e)
            }
        }
    }

    /// Validate `params` against the handler's fields and run its single call.
    pub async fn invoke_inline(
        &mut self,
        tool: &ToolDescriptor,
        params: Value,
    ) -> Result<ToolOutput> {
        let Some(handler) = self.handlers.get(&tool.entrypoint) else {
            let err = ToolkitError::NotFound(format!("no inline handler for '{}'", tool.name));
            self.log.record(&tool.name, LogStatus::Error, err.to_string());
            return Err(err);
        };

        let params = match prepare_params(&tool.name, &handler.fields(), params) {
            Ok(p) => p,
            Err(e) => {
                self.log.record(&tool.name, LogStatus::Error, e.to_string());
                return Err(e);
            }
        };

        match handler.execute(&params).await {
            Ok(output) => {
                self.log
                    .record(&tool.name, LogStatus::Launched, output.log_message.clone());
                Ok(output)
            }
            Err(e) => {
                let err = ToolkitError::from_handler(e);
                self.log.record(&tool.name, LogStatus::Error, err.to_string());
                Err(err)
            }
        }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn handlers(&self) -> &HandlerSet {
        &self.handlers
    }

    pub fn launcher(&self) -> &Launcher {
        &self.launcher
    }

    pub fn log(&self) -> &ExecutionLog {
        &self.log
    }

    pub fn log_mut(&mut self) -> &mut ExecutionLog {
        &mut self.log
    }
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

fn is_checked(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::String(s) => matches!(s.trim().to_lowercase().as_str(), "true" | "y" | "yes"),
        _ => false,
    }
}

/// Fill defaults, check required visible fields, and normalize value types.
///
/// Checkboxes are normalized before visibility is evaluated, so a field
/// gated on `"yes"` is validated exactly like one gated on `true`.
/// Hidden fields are left untouched and never validated.
pub fn prepare_params(tool: &str, fields: &[InputField], params: Value) -> Result<Value> {
    let mut map = match params {
        Value::Object(map) => map,
        Value::Null => Map::new(),
        _ => {
            return Err(ToolkitError::invalid(
                "params",
                "expected an object of field values",
            ))
        }
    };

    for field in fields {
        let present = map.get(field.key).is_some_and(|v| !is_blank(v));
        if !present {
            if let Some(default) = field.default_value() {
                map.insert(field.key.to_string(), default);
            }
        }
    }

    for field in fields {
        if matches!(field.kind, FieldKind::Checkbox { .. }) {
            if let Some(value) = map.get_mut(field.key) {
                *value = Value::Bool(is_checked(value));
            }
        }
    }

    let snapshot = Value::Object(map.clone());
    for field in fields {
        if !field.is_visible(&snapshot) {
            continue;
        }
        let value = map.get(field.key).cloned().unwrap_or(Value::Null);
        if is_blank(&value) {
            if field.required {
                return Err(ToolkitError::MissingParameter {
                    tool: tool.to_string(),
                    field: field.key.to_string(),
                });
            }
            continue;
        }
        if let Some(normalized) = normalize(field, &value)? {
            map.insert(field.key.to_string(), normalized);
        }
    }

    Ok(Value::Object(map))
}

fn normalize(field: &InputField, value: &Value) -> Result<Option<Value>> {
    match &field.kind {
        FieldKind::Number { min, max, .. } => {
            let n = match value {
                Value::Number(n) => n.as_i64(),
                Value::String(s) => s.trim().parse::<i64>().ok(),
                _ => None,
            }
            .ok_or_else(|| ToolkitError::invalid(field.key, "must be a whole number"))?;
            if n < *min || n > *max {
                return Err(ToolkitError::invalid(
                    field.key,
                    format!("{} is outside {}..={}", n, min, max),
                ));
            }
            Ok(Some(Value::from(n)))
        }
        FieldKind::Checkbox { .. } => Ok(Some(Value::Bool(is_checked(value)))),
        FieldKind::Choice { options } => match value.as_str() {
            Some(s) if options.iter().any(|o| *o == s) => Ok(None),
            _ => Err(ToolkitError::invalid(
                field.key,
                format!("expected one of: {}", options.join(", ")),
            )),
        },
        _ => Ok(None),
    }
}
