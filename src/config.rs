// Copyright (C) Brian G. Milnes 2025

//! Settings snapshot
//!
//! An immutable configuration value threaded into every analysis and fix
//! call. Reload means constructing a new value, never mutating one a
//! traversal might be reading.

pub mod config {
    use anyhow::{Context, Result};
    use serde::{Deserialize, Serialize};
    use std::collections::BTreeSet;
    use std::path::Path;

    /// Rule enablement and naming-convention preferences.
    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct Settings {
        /// Rule ids switched off; everything else is on.
        #[serde(default)]
        pub disabled_rules: BTreeSet<String>,
        /// Prefix generated backing-field names with an underscore.
        #[serde(default = "default_underscore")]
        pub underscore_field_prefix: bool,
    }

    fn default_underscore() -> bool {
        true
    }

    impl Default for Settings {
        fn default() -> Settings {
            Settings {
                disabled_rules: BTreeSet::new(),
                underscore_field_prefix: true,
            }
        }
    }

    impl Settings {
        /// Load from a JSON settings document. A missing file yields the
        /// defaults; a malformed one is an error.
        pub fn load(path: &Path) -> Result<Settings> {
            if !path.exists() {
                return Ok(Settings::default());
            }
            let text = std::fs::read_to_string(path)
                .context(format!("Failed to read settings: {}", path.display()))?;
            let settings: Settings = serde_json::from_str(&text)
                .context(format!("Failed to parse settings: {}", path.display()))?;
            Ok(settings)
        }

        pub fn is_enabled(&self, rule_id: &str) -> bool {
            !self.disabled_rules.contains(rule_id)
        }
    }
}
