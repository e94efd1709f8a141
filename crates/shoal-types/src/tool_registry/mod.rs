//! Enum-keyed tool registry
//!
//! Central queries over the tool set so no other crate hardcodes tool name
//! strings.

use crate::tools::{ToolCategory, ToolName};
use strum::IntoEnumIterator;

/// Tool registry for centralized tool management
pub struct ToolRegistry;

impl ToolRegistry {
    /// Every registered tool name
    pub fn all_tools() -> Vec<ToolName> {
        ToolName::iter().collect()
    }

    /// Every registered tool name as its wire string
    pub fn all_tool_names() -> Vec<String> {
        ToolName::iter().map(|t| t.to_string()).collect()
    }

    /// Validate a tool name string
    pub fn is_valid_tool(tool_name: &str) -> bool {
        ToolName::from_str_safe(tool_name).is_some()
    }

    /// Get tools by category
    pub fn tools_by_category(category: ToolCategory) -> Vec<ToolName> {
        ToolName::iter()
            .filter(|tool| tool.category() == category)
            .collect()
    }

    /// Tools whose results feed the wallet approval flow
    pub fn transaction_tools() -> Vec<ToolName> {
        ToolName::iter()
            .filter(|tool| tool.produces_transaction())
            .collect()
    }

    /// Read-only discovery tools
    pub fn discovery_tools() -> Vec<ToolName> {
        Self::tools_by_category(ToolCategory::Discovery)
    }
}
