pub mod config;
pub mod presets;
pub mod roll;

use std::path::Path;

use dw_mechanics::SettingsMap;

/// Read a flat JSON object of settings from `path`.
fn read_settings(path: &Path) -> Result<SettingsMap, String> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| format!("cannot read '{}': {e}", path.display()))?;
    serde_json::from_str(&text).map_err(|e| format!("invalid settings in '{}': {e}", path.display()))
}
