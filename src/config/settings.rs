use serde::{Deserialize, Serialize};

use crate::model::scenario::Scenario;

/// Connection settings for the chat endpoint. `base_url` stays `None` for
/// the default OpenAI endpoint; DeepSeek, Ollama and other compatible
/// providers are reached by overriding it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmSettings {
    pub provider: String,
    pub model: String,
    pub temperature: f32,
    pub api_key: String,
    pub base_url: Option<String>,
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            provider: "openai".into(),
            model: "gpt-4o-mini".into(),
            temperature: 0.7,
            api_key: String::new(),
            base_url: None,
        }
    }
}

impl LlmSettings {
    /// The key from the settings file, or an environment-supplied credential
    /// when the file leaves it empty.
    pub fn resolved_api_key(&self) -> String {
        if !self.api_key.is_empty() {
            return self.api_key.clone();
        }
        std::env::var("OPENAI_API_KEY")
            .or_else(|_| std::env::var("DEEPSEEK_API_KEY"))
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioSettings {
    pub enabled: Vec<String>,
}

impl Default for ScenarioSettings {
    fn default() -> Self {
        Self {
            enabled: Scenario::ALL.iter().map(|s| s.id().to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    pub llm: LlmSettings,
    pub scenarios: ScenarioSettings,
}

impl AppSettings {
    pub fn is_scenario_enabled(&self, id: &str) -> bool {
        self.scenarios.enabled.iter().any(|s| s == id)
    }

    pub fn enable_scenario(&mut self, id: &str) {
        if !self.is_scenario_enabled(id) {
            self.scenarios.enabled.push(id.to_string());
        }
    }

    pub fn disable_scenario(&mut self, id: &str) {
        self.scenarios.enabled.retain(|s| s != id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_enable_all_four_scenarios() {
        let settings = AppSettings::default();
        assert_eq!(settings.llm.provider, "openai");
        assert_eq!(settings.llm.model, "gpt-4o-mini");
        assert_eq!(settings.llm.temperature, 0.7);
        assert_eq!(settings.scenarios.enabled.len(), 4);
        for scenario in Scenario::ALL {
            assert!(settings.is_scenario_enabled(scenario.id()));
        }
    }

    #[test]
    fn enable_is_idempotent_and_disable_removes() {
        let mut settings = AppSettings::default();
        settings.enable_scenario("airport_checkin");
        assert_eq!(settings.scenarios.enabled.len(), 4);

        settings.disable_scenario("airport_checkin");
        assert!(!settings.is_scenario_enabled("airport_checkin"));

        settings.enable_scenario("airport_checkin");
        assert!(settings.is_scenario_enabled("airport_checkin"));
    }

    #[test]
    fn partial_settings_file_fills_in_defaults() {
        let settings: AppSettings =
            serde_json::from_str(r#"{"llm": {"model": "deepseek-chat"}}"#).unwrap();
        assert_eq!(settings.llm.model, "deepseek-chat");
        assert_eq!(settings.llm.provider, "openai");
        assert_eq!(settings.scenarios.enabled.len(), 4);
    }
}
