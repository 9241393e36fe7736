//! Finds a discovered tool by its executable name.
//!
//! The host keys discovered tools by whatever id they were registered under,
//! so the only reliable way to spot REDmod is the executable filename.

use crate::host::HostState;

use super::catalog::REDMOD_DEPLOY;
use super::types::DiscoveredTool;

/// Returns the first discovered tool for `game_id` whose executable filename
/// matches `executable_name`, ignoring ASCII case.
///
/// Absent records and records without a path are skipped. `None` is a normal
/// answer, not an error.
pub fn find_discovered_tool(
    state: &dyn HostState,
    game_id: &str,
    executable_name: &str,
) -> Option<DiscoveredTool> {
    state
        .discovered_tools(game_id)
        .into_values()
        .flatten()
        .find(|tool| {
            tool.executable_name()
                .is_some_and(|name| name.eq_ignore_ascii_case(executable_name))
        })
}

/// The discovered REDmod deploy tool (`redMod.exe`) for `game_id`, if any.
pub fn find_redmod_tool(state: &dyn HostState, game_id: &str) -> Option<DiscoveredTool> {
    find_discovered_tool(state, game_id, REDMOD_DEPLOY.executable_name())
}
