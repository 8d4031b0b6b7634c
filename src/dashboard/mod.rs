//! Interactive terminal dashboard.
//!
//! Each pass prints the status header and the log panel, then offers one
//! action. Tool calls run to completion before the menu comes back.

use crate::cli::{self, collect_params, Prompter};
use crate::dispatch::{Dispatcher, ExecutionLog};
use crate::monitor::SystemSnapshot;
use crate::types::ToolDescriptor;
use anyhow::Result;
use colored::Colorize;
use tracing::debug;

/// Log entries shown under the menu.
pub const LOG_PANEL_ROWS: usize = 25;

const MENU: &[&str] = &[
    "Run a tool",
    "Launch a tool in a new terminal",
    "Clear logs",
    "Refresh",
    "Quit",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuAction {
    RunTool,
    LaunchTool,
    ClearLogs,
    Refresh,
    Quit,
}

impl MenuAction {
    fn from_index(idx: usize) -> Self {
        match idx {
            0 => Self::RunTool,
            1 => Self::LaunchTool,
            2 => Self::ClearLogs,
            3 => Self::Refresh,
            _ => Self::Quit,
        }
    }
}

/// Newest-first panel lines, or a placeholder when nothing ran yet.
pub fn log_panel(log: &ExecutionLog) -> Vec<String> {
    if log.is_empty() {
        return vec!["No actions yet.".into()];
    }
    log.recent(LOG_PANEL_ROWS)
        .map(|entry| entry.to_string())
        .collect()
}

pub struct Dashboard<'a> {
    dispatcher: &'a mut Dispatcher,
    prompter: &'a mut dyn Prompter,
}

impl<'a> Dashboard<'a> {
    pub fn new(dispatcher: &'a mut Dispatcher, prompter: &'a mut dyn Prompter) -> Self {
        Self {
            dispatcher,
            prompter,
        }
    }

    /// Loop until the operator quits.
    pub async fn run(&mut self) -> Result<()> {
        loop {
            self.print_header().await;

            let choice = self.prompter.select("Action", MENU, 0)?;
            let action = MenuAction::from_index(choice);
            debug!("Dashboard action: {:?}", action);

            match action {
                MenuAction::RunTool => self.run_tool().await?,
                MenuAction::LaunchTool => self.launch_tool()?,
                MenuAction::ClearLogs => {
                    self.dispatcher.log_mut().clear();
                    println!("{}", "Logs cleared.".dimmed());
                }
                MenuAction::Refresh => {}
                MenuAction::Quit => return Ok(()),
            }
        }
    }

    async fn print_header(&self) {
        let snapshot = SystemSnapshot::sample().await;
        let files = cli::file_status(self.dispatcher.registry(), self.dispatcher.launcher());

        println!();
        println!("{}", "=== Automation Toolkit ===".bold());
        println!("  {}", snapshot.summary());
        println!("  {}", files);
        println!();
        println!("{}", "Execution log".bold());
        for line in log_panel(self.dispatcher.log()) {
            println!("  {}", line);
        }
        println!();
    }

    /// Category first, then a tool inside it.
    fn pick_tool(&mut self) -> Result<ToolDescriptor> {
        let registry = self.dispatcher.registry();
        let categories = registry.categories();
        let cat_idx = self.prompter.select("Category", &categories, 0)?;
        let category = categories.get(cat_idx).copied().unwrap_or_default();

        let tools = registry.in_category(category);
        let names: Vec<&str> = tools.iter().map(|t| t.name.as_str()).collect();
        let tool_idx = self.prompter.select("Tool", &names, 0)?;
        let tool = tools
            .get(tool_idx)
            .copied()
            .or_else(|| tools.first().copied())
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("Category '{}' has no tools", category))?;
        Ok(tool)
    }

    async fn run_tool(&mut self) -> Result<()> {
        let tool = self.pick_tool()?;
        let handler = self.dispatcher.handlers().get(&tool.entrypoint);

        println!();
        for line in cli::usage_card(&tool, handler.as_deref()) {
            println!("{}", line);
        }

        let Some(handler) = handler else {
            println!("Use \"Launch a tool in a new terminal\" to start it.");
            return Ok(());
        };

        println!();
        println!("{}", cli::banner(handler.title()));
        let params = collect_params(&handler.fields(), &mut *self.prompter)?;
        if !self.prompter.confirm(&format!("{}?", handler.action_label()), true)? {
            println!("{}", "Cancelled.".dimmed());
            return Ok(());
        }

        let result = self.dispatcher.invoke_inline(&tool, params).await;
        println!("{}", cli::render_result(&result));
        Ok(())
    }

    fn launch_tool(&mut self) -> Result<()> {
        let tool = self.pick_tool()?;
        match self.dispatcher.launch_external(&tool) {
            Ok(handle) => println!(
                "{} {} (pid {})",
                "✅".green(),
                "Program launched in new terminal".green(),
                handle.pid
            ),
            Err(e) => println!("{} {}", "❌".red(), e.to_string().red()),
        }
        Ok(())
    }
}
