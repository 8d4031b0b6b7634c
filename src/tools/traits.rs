//! Inline handler trait: one implementation per tool.

use crate::types::{InputField, ToolOutput};
use anyhow::Result;
use async_trait::async_trait;

/// A tool that runs in-process: declares its inputs, then makes one external call.
#[async_trait]
pub trait ToolHandler: Send + Sync {
    /// Registry entrypoint this handler serves.
    fn entrypoint(&self) -> &str;

    /// Banner shown above the prompts.
    fn title(&self) -> &str;

    /// Hints printed before collecting input (credentials needed, etc.).
    fn notes(&self) -> &[&str] {
        &[]
    }

    /// Input controls, in prompt order.
    fn fields(&self) -> Vec<InputField>;

    /// Label of the single action button.
    fn action_label(&self) -> &str;

    /// Perform the tool's external call with validated parameters.
    async fn execute(&self, params: &serde_json::Value) -> Result<ToolOutput>;
}
