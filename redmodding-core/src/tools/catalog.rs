//! Tool catalog with hardcoded definitions.
//!
//! REDmod ships two executables with the game: the pre-launcher that starts
//! the game in modded mode, and the deploy tool that compiles REDmods.

use super::types::ToolDescriptor;

// ============================================================================
// REDmodding Tools
// ============================================================================

/// Starts the game with REDmods enabled.
pub const REDLAUNCHER: ToolDescriptor = ToolDescriptor {
    id: "V2077-tools-REDLauncher",
    name: "REDLauncher",
    short_name: None,
    logo: Some("REDLauncher.png"),
    executable: "REDprelauncher.exe",
    required_files: &["REDprelauncher.exe"],
    parameters: &["-modded"],
    shell: false,
    relative: true,
    exclusive: false,
};

/// Compiles installed REDmods. Triggered by auto-deploy, not by hand.
pub const REDMOD_DEPLOY: ToolDescriptor = ToolDescriptor {
    id: "V2077-tools-redMod",
    name: "REDmod Deploy",
    short_name: Some("REDdeploy"),
    logo: None,
    executable: "tools/redmod/bin/redMod.exe",
    required_files: &["tools/redmod/bin/redMod.exe"],
    parameters: &["deploy"],
    shell: true,
    relative: true,
    exclusive: true,
};

// ============================================================================
// Other Modding Tools
// ============================================================================

pub const CSVMERGE: ToolDescriptor = ToolDescriptor {
    id: "CSVMerge",
    name: "CSVMerge",
    short_name: None,
    logo: None,
    executable: "csvmerge/CSVMerge.cmd",
    required_files: &[
        "csvmerge/CSVMerge.cmd",
        "csvmerge/wolvenkitcli/WolvenKit.CLI.exe",
    ],
    parameters: &[],
    shell: true,
    relative: true,
    exclusive: false,
};

// ============================================================================
// Catalog Access
// ============================================================================

static ALL_TOOLS: [&ToolDescriptor; 3] = [&REDLAUNCHER, &REDMOD_DEPLOY, &CSVMERGE];

/// Tools exposed to the host for display and launching.
///
/// REDmod Deploy is left out: it runs automatically on deployment.
pub fn redmodding_tools() -> Vec<&'static ToolDescriptor> {
    vec![&REDLAUNCHER]
}

/// Tools registered as supported tools of the game itself.
pub fn supported_tools() -> Vec<&'static ToolDescriptor> {
    vec![&CSVMERGE]
}

/// Every known tool.
pub fn all_tool_descriptors() -> Vec<&'static ToolDescriptor> {
    ALL_TOOLS.to_vec()
}

/// Looks up a tool by id.
pub fn get_tool_descriptor(id: &str) -> Option<&'static ToolDescriptor> {
    ALL_TOOLS.iter().copied().find(|tool| tool.id == id)
}
