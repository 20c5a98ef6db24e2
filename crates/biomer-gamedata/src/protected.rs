//! Base-game plugins that must never be used as an edit target.

/// Plugins shipped with the game. Editing them would corrupt the install.
pub const PROTECTED_PLUGINS: [&str; 10] = [
    "Starfield.esm",
    "BlueprintShips-Starfield.esm",
    "ShatteredSpace.esm",
    "Constellation.esm",
    "SFBGS003.esm",
    "SFBGS004.esm",
    "SFBGS005.esm",
    "SFBGS006.esm",
    "SFBGS007.esm",
    "SFBGS008.esm",
];

/// Errors from the game-data access policy.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameDataError {
    /// The plugin is on the protected list.
    #[error("plugin {0} is protected and cannot be edited")]
    ProtectedPlugin(String),
}

/// Returns `true` if `plugin` names a protected base-game plugin.
///
/// Only the file name is compared, case-insensitively, so
/// `Data/starfield.ESM` is protected too.
pub fn is_protected_plugin(plugin: &str) -> bool {
    matches_any(plugin, PROTECTED_PLUGINS.iter().copied())
}

/// Checks that `plugin` may be edited, considering the built-in list and any
/// `extra` names from configuration.
///
/// # Errors
///
/// Returns [`GameDataError::ProtectedPlugin`] if the plugin is protected.
pub fn ensure_editable(plugin: &str, extra: &[String]) -> Result<(), GameDataError> {
    if is_protected_plugin(plugin) || matches_any(plugin, extra.iter().map(String::as_str)) {
        tracing::warn!(plugin, "refusing to edit protected plugin");
        return Err(GameDataError::ProtectedPlugin(file_name(plugin).to_string()));
    }
    Ok(())
}

fn matches_any<'a>(plugin: &str, mut names: impl Iterator<Item = &'a str>) -> bool {
    let name = file_name(plugin);
    names.any(|protected| protected.eq_ignore_ascii_case(name))
}

fn file_name(plugin: &str) -> &str {
    plugin.rsplit(|c: char| c == '/' || c == '\\').next().unwrap_or(plugin)
}
