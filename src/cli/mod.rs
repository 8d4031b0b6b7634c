//! Console presentation shared by the standalone commands and the dashboard.

pub mod prompt;

pub use prompt::{collect_params, Prompter, TerminalPrompter};

use crate::error::ToolkitError;
use crate::launcher::Launcher;
use crate::registry::Registry;
use crate::tools::ToolHandler;
use crate::types::{ToolDescriptor, ToolOutput};
use colored::Colorize;

/// Heading printed before a tool's prompts.
pub fn banner(title: &str) -> String {
    format!("=== {} ===", title)
}

/// Description, dependencies and any handler notes for one tool.
pub fn usage_card(tool: &ToolDescriptor, handler: Option<&dyn ToolHandler>) -> Vec<String> {
    let mut lines = vec![
        format!("{}", tool.name.bold()),
        format!("  Category:      {}", tool.category),
        format!("  Description:   {}", tool.description),
        format!("  Dependencies:  {}", tool.dependency_list()),
        format!(
            "  Input:         {}",
            if tool.requires_input { "interactive" } else { "none" }
        ),
    ];
    match handler {
        Some(h) => lines.extend(h.notes().iter().map(|n| format!("  Note: {}", n))),
        None => lines.push("  Launch-only tool (no inline handler).".into()),
    }
    lines
}

/// The `✅` / `❌` block printed after a call.
pub fn render_result(result: &std::result::Result<ToolOutput, ToolkitError>) -> String {
    match result {
        Ok(out) => {
            let mut text = format!("{} {}", "✅".green(), out.headline.green());
            for line in &out.details {
                text.push('\n');
                text.push_str(line);
            }
            text
        }
        Err(e) => format!("{} {}", "❌".red(), format!("Error: {}", e).red()),
    }
}

/// Catalog grouped by category, marking tools whose program file is missing.
pub fn catalog(registry: &Registry, launcher: &Launcher) -> Vec<String> {
    let mut lines = Vec::new();
    for (category, tools) in registry.by_category() {
        lines.push(format!("{}", category.bold()));
        for tool in tools {
            let status = if launcher.program_exists(tool) {
                "✓".green()
            } else {
                "missing".yellow()
            };
            lines.push(format!("  {:<38} {}", tool.name, status));
        }
    }
    lines
}

/// "All N programs found" or "X of N programs missing".
pub fn file_status(registry: &Registry, launcher: &Launcher) -> String {
    let total = registry.len();
    let missing = registry
        .iter()
        .filter(|t| !launcher.program_exists(t))
        .count();
    if missing == 0 {
        format!("All {} programs found", total)
    } else {
        format!("{} of {} programs missing", missing, total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ToolkitConfig;
    use crate::launcher::testing::RecordingSpawner;
    use crate::launcher::Platform;
    use std::sync::Arc;

    #[test]
    fn result_block_marks_success_and_failure() {
        colored::control::set_override(false);
        let ok = Ok(ToolOutput::new("Email sent.", "To: a@b.c").detail("extra"));
        assert_eq!(render_result(&ok), "✅ Email sent.\nextra");

        let err = Err(ToolkitError::ExternalCall("bad credentials".into()));
        assert_eq!(render_result(&err), "❌ Error: bad credentials");
    }

    #[test]
    fn file_status_counts_missing_programs() {
        let dir = tempfile::tempdir().unwrap();
        let config = ToolkitConfig {
            programs_dir: dir.path().display().to_string(),
            ..ToolkitConfig::default()
        };
        let launcher = Launcher::new(
            &config,
            Platform::Linux,
            Arc::new(RecordingSpawner::default()),
        );
        let registry = Registry::with_builtins(&[]).unwrap();
        assert_eq!(file_status(&registry, &launcher), "12 of 12 programs missing");

        for tool in registry.iter() {
            std::fs::write(dir.path().join(&tool.entrypoint), "").unwrap();
        }
        assert_eq!(file_status(&registry, &launcher), "All 12 programs found");
    }

    #[test]
    fn usage_card_lists_dependencies() {
        colored::control::set_override(false);
        let registry = Registry::with_builtins(&[]).unwrap();
        let card = usage_card(registry.get("Read RAM").unwrap(), None);
        assert!(card.iter().any(|l| l.starts_with("  Dependencies:")));
        assert!(card.iter().any(|l| l.contains("Launch-only")));
    }
}
