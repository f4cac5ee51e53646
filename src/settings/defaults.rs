use std::collections::BTreeMap;

use serde_json::Map;

use super::Settings;

/// Settings file looked up in the working directory.
pub const SETTINGS_FILE_NAME: &str = "settings.json";

pub const DEFAULT_START: &str = "./srcds_run";
pub const DEFAULT_DEFAULT_ARGS: &str = "+maxplayers 32 -console -norestart -usercon";
pub const DEFAULT_UNSPECIFIED_ARGS: &str =
    "+gamemode sandbox +host_workshop_collection 2036327578 +map gm_genesis";
pub const DEFAULT_MODE: &str = "sandbox";

const DEFAULT_MODE_MAP: [(&str, &str); 2] = [
    (
        "sandbox",
        "+host_workshop_collection 2035084436 +gamemode sandbox +map gm_genesis",
    ),
    (
        "prophunt",
        "+host_workshop_collection 2036450649 +gamemode prop_hunt +map ph_hotel",
    ),
];

impl Settings {
    /// Settings written when no settings file exists yet.
    pub fn default_instance() -> Self {
        let mode_map = DEFAULT_MODE_MAP
            .iter()
            .map(|(mode, args)| (mode.to_string(), args.to_string()))
            .collect::<BTreeMap<_, _>>();

        Self {
            start: DEFAULT_START.to_string(),
            update: String::new(),
            default_args: DEFAULT_DEFAULT_ARGS.to_string(),
            unspecified_args: DEFAULT_UNSPECIFIED_ARGS.to_string(),
            mode: DEFAULT_MODE.to_string(),
            mode_map,
            extra: Map::new(),
        }
    }
}
