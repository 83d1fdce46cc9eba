//! Platform-specific configuration

/// Submit shortcut display for wizard help text
/// Ctrl+S works on all platforms (Cmd+S also works on macOS)
#[cfg(target_os = "macos")]
pub const SUBMIT_SHORTCUT: &str = "Cmd+S";

#[cfg(not(target_os = "macos"))]
pub const SUBMIT_SHORTCUT: &str = "Ctrl+S";
