use std::fs;
use std::path::PathBuf;

use crate::config::settings::{AppSettings, LlmSettings};

fn default_settings_path() -> PathBuf {
    let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("language_mentor");
    path.push("settings.json");
    path
}

/// Owns the settings value and the file it came from. Every mutation
/// rewrites the whole file; there is no partial update.
pub struct SettingsStore {
    path: PathBuf,
    settings: AppSettings,
}

impl SettingsStore {
    pub fn load_default() -> Self {
        Self::load_from(default_settings_path())
    }

    /// Missing file: synthesize defaults and write them back. Corrupt file:
    /// substitute defaults and continue without overwriting, so a hand-edited
    /// file is not clobbered over a typo.
    pub fn load_from(path: PathBuf) -> Self {
        let mut store = Self {
            path,
            settings: AppSettings::default(),
        };

        match fs::read_to_string(&store.path) {
            Ok(text) => match serde_json::from_str(&text) {
                Ok(settings) => store.settings = settings,
                Err(e) => {
                    log::warn!(
                        "settings file {} is corrupt ({e}), using defaults",
                        store.path.display()
                    );
                }
            },
            Err(_) => {
                store.save();
            }
        }

        store
    }

    pub fn settings(&self) -> &AppSettings {
        &self.settings
    }

    pub fn set_llm_config(&mut self, llm: LlmSettings) {
        self.settings.llm = llm;
        self.save();
    }

    pub fn enable_scenario(&mut self, id: &str) {
        self.settings.enable_scenario(id);
        self.save();
    }

    pub fn disable_scenario(&mut self, id: &str) {
        self.settings.disable_scenario(id);
        self.save();
    }

    fn save(&self) {
        if let Some(parent) = self.path.parent() {
            if let Err(e) = fs::create_dir_all(parent) {
                log::warn!("could not create {}: {e}", parent.display());
                return;
            }
        }

        match serde_json::to_string_pretty(&self.settings) {
            Ok(json) => {
                if let Err(e) = fs::write(&self.path, json) {
                    log::warn!("could not write {}: {e}", self.path.display());
                }
            }
            Err(e) => log::warn!("could not serialize settings: {e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        let mut path = std::env::temp_dir();
        path.push(format!(
            "language_mentor_test_{name}_{}",
            std::process::id()
        ));
        path.push("settings.json");
        path
    }

    #[test]
    fn missing_file_writes_defaults_back() {
        let path = temp_path("missing");
        let _ = fs::remove_file(&path);

        let store = SettingsStore::load_from(path.clone());
        assert_eq!(store.settings(), &AppSettings::default());
        assert!(path.exists());

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn corrupt_file_falls_back_to_defaults() {
        let path = temp_path("corrupt");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "{not json").unwrap();

        let store = SettingsStore::load_from(path.clone());
        assert_eq!(store.settings(), &AppSettings::default());
        // The corrupt file is left in place for the user to inspect.
        assert_eq!(fs::read_to_string(&path).unwrap(), "{not json");

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn mutations_rewrite_the_file() {
        let path = temp_path("mutations");
        let _ = fs::remove_file(&path);

        let mut store = SettingsStore::load_from(path.clone());
        store.disable_scenario("leave_request");

        let on_disk: AppSettings =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert!(!on_disk.is_scenario_enabled("leave_request"));
        assert_eq!(on_disk.scenarios.enabled.len(), 3);

        let mut llm = LlmSettings::default();
        llm.model = "deepseek-chat".into();
        llm.base_url = Some("https://api.deepseek.com/v1".into());
        store.set_llm_config(llm.clone());

        let on_disk: AppSettings =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(on_disk.llm, llm);

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }
}
