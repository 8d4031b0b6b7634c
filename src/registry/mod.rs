//! Tool registry: the immutable catalog the dispatcher resolves names against.

pub mod builtin;

pub use builtin::builtin_descriptors;

use crate::error::{Result, ToolkitError};
use crate::types::ToolDescriptor;
use std::collections::HashMap;

/// Read-only catalog of tools, keyed by display name and grouped by category.
#[derive(Debug, Clone)]
pub struct Registry {
    tools: Vec<ToolDescriptor>,
    by_name: HashMap<String, usize>,
}

impl Registry {
    /// Build a registry from descriptors, in presentation order.
    ///
    /// Fails if a name appears twice or a name/entrypoint is empty.
    pub fn new(tools: Vec<ToolDescriptor>) -> Result<Self> {
        let mut by_name = HashMap::with_capacity(tools.len());

        for (idx, tool) in tools.iter().enumerate() {
            if tool.name.trim().is_empty() {
                return Err(ToolkitError::Configuration(format!(
                    "tool #{} has an empty name",
                    idx + 1
                )));
            }
            if tool.entrypoint.trim().is_empty() {
                return Err(ToolkitError::Configuration(format!(
                    "tool '{}' has an empty entrypoint",
                    tool.name
                )));
            }
            if by_name.insert(tool.name.clone(), idx).is_some() {
                return Err(ToolkitError::Configuration(format!(
                    "duplicate tool name '{}'",
                    tool.name
                )));
            }
        }

        Ok(Self { tools, by_name })
    }

    /// The built-in catalog followed by operator-declared tools.
    pub fn with_builtins(extra: &[ToolDescriptor]) -> Result<Self> {
        let mut tools = builtin_descriptors();
        tools.extend(extra.iter().cloned());
        Self::new(tools)
    }

    pub fn get(&self, name: &str) -> Option<&ToolDescriptor> {
        self.by_name.get(name).map(|&idx| &self.tools[idx])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// All descriptors in presentation order.
    pub fn iter(&self) -> impl Iterator<Item = &ToolDescriptor> {
        self.tools.iter()
    }

    /// Category labels in first-appearance order.
    pub fn categories(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for tool in &self.tools {
            if !seen.contains(&tool.category.as_str()) {
                seen.push(&tool.category);
            }
        }
        seen
    }

    /// Tools of one category, in registration order.
    pub fn in_category(&self, category: &str) -> Vec<&ToolDescriptor> {
        self.tools
            .iter()
            .filter(|t| t.category == category)
            .collect()
    }

    /// Category → ordered tools, for rendering the whole catalog.
    pub fn by_category(&self) -> Vec<(&str, Vec<&ToolDescriptor>)> {
        self.categories()
            .into_iter()
            .map(|cat| (cat, self.in_category(cat)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ram_tool() -> ToolDescriptor {
        ToolDescriptor::new(
            "System Tools",
            "Read RAM",
            "ram_monitor",
            "Monitor system memory usage",
            &["sysinfo"],
            false,
        )
    }

    #[test]
    fn single_descriptor_lookup() {
        let registry = Registry::new(vec![ram_tool()]).unwrap();
        let found = registry.get("Read RAM").unwrap();
        assert_eq!(found.entrypoint, "ram_monitor");
        assert!(!found.requires_input);
        assert!(registry.get("Missing").is_none());
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let mut other = ram_tool();
        other.entrypoint = "ram_monitor_v2".into();
        let err = Registry::new(vec![ram_tool(), other]).unwrap_err();
        assert!(matches!(err, ToolkitError::Configuration(_)));
        assert!(err.to_string().contains("Read RAM"));
    }

    #[test]
    fn empty_entrypoint_is_rejected() {
        let mut tool = ram_tool();
        tool.entrypoint = " ".into();
        assert!(matches!(
            Registry::new(vec![tool]),
            Err(ToolkitError::Configuration(_))
        ));
    }

    #[test]
    fn builtins_are_unique_and_have_entrypoints() {
        let registry = Registry::with_builtins(&[]).unwrap();
        assert_eq!(registry.len(), 12);
        for tool in registry.iter() {
            let resolved = registry.get(&tool.name).unwrap();
            assert!(!resolved.entrypoint.is_empty());
        }
    }

    #[test]
    fn categories_keep_first_appearance_order() {
        let registry = Registry::with_builtins(&[]).unwrap();
        assert_eq!(
            registry.categories(),
            vec!["System Tools", "Communication", "Web & Social", "Utilities"]
        );
        let comms: Vec<_> = registry
            .in_category("Communication")
            .iter()
            .map(|t| t.name.as_str())
            .collect();
        assert_eq!(comms.first(), Some(&"Send WhatsApp Message"));
        assert_eq!(comms.len(), 6);
    }

    #[test]
    fn extra_tools_collide_with_builtins() {
        let clash = ToolDescriptor::new("Custom", "Send SMS", "my_sms", "", &[], true);
        assert!(matches!(
            Registry::with_builtins(&[clash]),
            Err(ToolkitError::Configuration(_))
        ));

        let fresh = ToolDescriptor::new("Custom", "Backup Photos", "backup", "", &[], false);
        let registry = Registry::with_builtins(&[fresh]).unwrap();
        assert_eq!(registry.categories().last(), Some(&"Custom"));
    }
}
