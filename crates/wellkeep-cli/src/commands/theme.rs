use serde_json::json;
use wellkeep_core::{Config, ThemeMode};

use super::{print_json, CliResult};

pub fn run(mode: Option<ThemeMode>, toggle: bool, config: &Config) -> CliResult {
    let mode = match mode {
        Some(mode) => mode,
        None if toggle => {
            let mut updated = Config::load()?;
            updated.ui.theme = updated.ui.theme.toggled();
            updated.save()?;
            updated.ui.theme
        }
        None => config.ui.theme,
    };
    print_json(&json!({ "mode": mode, "palette": mode.palette() }))
}
