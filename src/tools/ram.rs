//! "Read RAM": memory usage of the host.

use super::ToolHandler;
use crate::monitor::{gib, MemoryStats};
use crate::types::{InputField, ToolOutput};
use anyhow::Result;
use async_trait::async_trait;

pub struct RamMonitor;

pub fn report(mem: &MemoryStats) -> ToolOutput {
    ToolOutput::new("RAM Information", "Displayed RAM stats")
        .detail(format!("Total: {} GB", gib(mem.total)))
        .detail(format!("Available: {} GB", gib(mem.available)))
        .detail(format!("Used: {} GB", gib(mem.used)))
        .detail(format!("Percentage Used: {:.1}%", mem.percent_used()))
        .detail(format!("Free: {} GB", gib(mem.free)))
}

#[async_trait]
impl ToolHandler for RamMonitor {
    fn entrypoint(&self) -> &str {
        "ram_monitor"
    }

    fn title(&self) -> &str {
        "RAM Monitor"
    }

    fn fields(&self) -> Vec<InputField> {
        Vec::new()
    }

    fn action_label(&self) -> &str {
        "Read RAM"
    }

    async fn execute(&self, _params: &serde_json::Value) -> Result<ToolOutput> {
        Ok(report(&MemoryStats::read()))
    }
}
