use crate::config::settings::LlmSettings;
use crate::model::message::Message;
use crate::model::scenario::Scenario;

/// The two chat surfaces. Each has its own transcript and history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    FreeConversation,
    ScenarioPractice,
}

pub enum EngineCommand {
    SubmitMessage { channel: Channel, text: String },
    SelectScenario(Scenario),
    ResetConversation(Channel),
    UpdateLlmSettings(LlmSettings),
    SetScenarioEnabled { scenario: Scenario, enabled: bool },
    TestConnection,
}

pub enum EngineResponse {
    Transcript {
        channel: Channel,
        messages: Vec<Message>,
    },
    ConnectionStatus(String),
    EnabledScenarios(Vec<String>),
}
