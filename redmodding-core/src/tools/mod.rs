//! Game tools: static descriptors and lookup of discovered installs.
//!
//! - `types`: `ToolDescriptor`, `DiscoveredTool` and path helpers
//! - `catalog`: the REDmod tools and other supported tools
//! - `locator`: finding the discovered REDmod deploy tool

pub mod catalog;
pub mod locator;
pub mod types;

pub use catalog::{
    all_tool_descriptors, get_tool_descriptor, redmodding_tools, supported_tools, CSVMERGE,
    REDLAUNCHER, REDMOD_DEPLOY,
};
pub use locator::{find_discovered_tool, find_redmod_tool};
pub use types::{base_name, join_relative, DiscoveredTool, ToolDescriptor};
