//! Shared types used across the toolkit.

use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Tool descriptors
// ---------------------------------------------------------------------------

/// Static metadata describing one tool in the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolDescriptor {
    /// Display label, also the dispatch key.
    pub name: String,
    /// Grouping label for presentation.
    pub category: String,
    /// Program / handler identifier.
    pub entrypoint: String,
    #[serde(default)]
    pub description: String,
    /// External package names (informational only).
    #[serde(default)]
    pub dependencies: Vec<String>,
    #[serde(default)]
    pub requires_input: bool,
}

impl ToolDescriptor {
    pub fn new(
        category: &str,
        name: &str,
        entrypoint: &str,
        description: &str,
        dependencies: &[&str],
        requires_input: bool,
    ) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            entrypoint: entrypoint.into(),
            description: description.into(),
            dependencies: dependencies.iter().map(|d| d.to_string()).collect(),
            requires_input,
        }
    }

    /// Comma-separated dependency list, or "None".
    pub fn dependency_list(&self) -> String {
        if self.dependencies.is_empty() {
            "None".into()
        } else {
            self.dependencies.join(", ")
        }
    }
}

// ---------------------------------------------------------------------------
// Input fields
// ---------------------------------------------------------------------------

/// Kind of input control a handler asks for.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    Text { default: Option<&'static str> },
    /// Hidden while typing (passwords, tokens).
    Secret,
    /// Several lines, terminated by an empty line on the terminal.
    Multiline,
    Number { min: i64, max: i64, default: i64 },
    Color { default: &'static str },
    Checkbox { default: bool },
    Choice { options: &'static [&'static str] },
}

/// Show a field only when another field holds a given value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldCondition {
    pub key: &'static str,
    pub equals: &'static str,
}

/// One input control declared by an inline handler.
#[derive(Debug, Clone, PartialEq)]
pub struct InputField {
    pub key: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    pub visible_when: Option<FieldCondition>,
}

impl InputField {
    pub fn text(key: &'static str, label: &'static str) -> Self {
        Self::new(key, label, FieldKind::Text { default: None }, true)
    }

    pub fn text_with_default(
        key: &'static str,
        label: &'static str,
        default: &'static str,
    ) -> Self {
        Self::new(
            key,
            label,
            FieldKind::Text {
                default: Some(default),
            },
            true,
        )
    }

    pub fn secret(key: &'static str, label: &'static str) -> Self {
        Self::new(key, label, FieldKind::Secret, true)
    }

    pub fn multiline(key: &'static str, label: &'static str) -> Self {
        Self::new(key, label, FieldKind::Multiline, true)
    }

    pub fn number(
        key: &'static str,
        label: &'static str,
        min: i64,
        max: i64,
        default: i64,
    ) -> Self {
        Self::new(key, label, FieldKind::Number { min, max, default }, true)
    }

    pub fn color(key: &'static str, label: &'static str, default: &'static str) -> Self {
        Self::new(key, label, FieldKind::Color { default }, true)
    }

    pub fn checkbox(key: &'static str, label: &'static str, default: bool) -> Self {
        Self::new(key, label, FieldKind::Checkbox { default }, false)
    }

    pub fn choice(
        key: &'static str,
        label: &'static str,
        options: &'static [&'static str],
    ) -> Self {
        Self::new(key, label, FieldKind::Choice { options }, true)
    }

    fn new(key: &'static str, label: &'static str, kind: FieldKind, required: bool) -> Self {
        Self {
            key,
            label,
            kind,
            required,
            visible_when: None,
        }
    }

    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    pub fn when(mut self, key: &'static str, equals: &'static str) -> Self {
        self.visible_when = Some(FieldCondition { key, equals });
        self
    }

    /// Default value used when the field was left out.
    pub fn default_value(&self) -> Option<serde_json::Value> {
        match &self.kind {
            FieldKind::Text { default } => default.map(|d| d.into()),
            FieldKind::Number { default, .. } => Some((*default).into()),
            FieldKind::Color { default } => Some((*default).into()),
            FieldKind::Checkbox { default } => Some((*default).into()),
            FieldKind::Choice { options } => options.first().map(|o| (*o).into()),
            FieldKind::Secret | FieldKind::Multiline => None,
        }
    }

    /// Whether the field applies given the values collected so far.
    pub fn is_visible(&self, params: &serde_json::Value) -> bool {
        match self.visible_when {
            None => true,
            Some(cond) => match &params[cond.key] {
                serde_json::Value::String(s) => s == cond.equals,
                serde_json::Value::Bool(b) => b.to_string() == cond.equals,
                serde_json::Value::Number(n) => n.to_string() == cond.equals,
                _ => false,
            },
        }
    }
}

// ---------------------------------------------------------------------------
// Tool output
// ---------------------------------------------------------------------------

/// What a successful inline call reports back.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ToolOutput {
    pub headline: String,
    pub details: Vec<String>,
    /// Short message recorded in the execution log.
    pub log_message: String,
}

impl ToolOutput {
    pub fn new(headline: impl Into<String>, log_message: impl Into<String>) -> Self {
        Self {
            headline: headline.into(),
            details: Vec::new(),
            log_message: log_message.into(),
        }
    }

    pub fn detail(mut self, line: impl Into<String>) -> Self {
        self.details.push(line.into());
        self
    }
}

impl fmt::Display for ToolOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.headline)?;
        for line in &self.details {
            write!(f, "\n{}", line)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn conditional_fields_follow_their_trigger() {
        let hour = InputField::number("hour", "Hour (24h)", 0, 23, 12).when("mode", "Schedule");
        assert!(hour.is_visible(&json!({"mode": "Schedule"})));
        assert!(!hour.is_visible(&json!({"mode": "Send instantly"})));
        assert!(!hour.is_visible(&json!({})));

        let text = InputField::text("text", "Text").when("add_text", "true");
        assert!(text.is_visible(&json!({"add_text": true})));
        assert!(!text.is_visible(&json!({"add_text": false})));
    }

    #[test]
    fn defaults_per_kind() {
        assert_eq!(
            InputField::number("n", "N", 1, 20, 5).default_value(),
            Some(json!(5))
        );
        assert_eq!(InputField::secret("s", "S").default_value(), None);
        assert_eq!(
            InputField::choice("m", "Mode", &["a", "b"]).default_value(),
            Some(json!("a"))
        );
    }

    #[test]
    fn dependency_list_reads_none_when_empty() {
        let d = ToolDescriptor::new("Utilities", "X", "x", "", &[], false);
        assert_eq!(d.dependency_list(), "None");
        let d = ToolDescriptor::new("Web", "Y", "y", "", &["reqwest", "regex"], true);
        assert_eq!(d.dependency_list(), "reqwest, regex");
    }
}
