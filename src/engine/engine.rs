use std::sync::mpsc::{Receiver, Sender};

use crate::config::settings_io::SettingsStore;
use crate::engine::llm_client::{LlmClient, LlmError};
use crate::engine::normalizer::{normalize, ReplySource};
use crate::engine::prompts::{build_messages, tutor_system_prompt};
use crate::engine::protocol::{Channel, EngineCommand, EngineResponse};
use crate::model::conversation::Conversation;
use crate::model::message::Message;
use crate::model::reply::TutorReply;
use crate::model::scenario::Scenario;

/// Transcript plus raw history for one chat surface.
#[derive(Default)]
struct Session {
    conversation: Conversation,
    transcript: Vec<Message>,
}

/// Runs on its own thread; the mpsc channel serializes turns, so a session's
/// history can never be interleaved by duplicate UI submissions.
pub struct Engine {
    rx: Receiver<EngineCommand>,
    tx: Sender<EngineResponse>,
    client: LlmClient,
    store: SettingsStore,
    free: Session,
    practice: Session,
    active_scenario: Option<Scenario>,
}

impl Engine {
    pub fn new(rx: Receiver<EngineCommand>, tx: Sender<EngineResponse>, store: SettingsStore) -> Self {
        let client = LlmClient::new(store.settings().llm.clone());
        Self {
            rx,
            tx,
            client,
            store,
            free: Session::default(),
            practice: Session::default(),
            active_scenario: None,
        }
    }

    pub fn run(&mut self) {
        while let Ok(cmd) = self.rx.recv() {
            self.handle(cmd);
        }
    }

    fn handle(&mut self, cmd: EngineCommand) {
        match cmd {
            EngineCommand::SubmitMessage { channel, text } => {
                self.submit_message(channel, text);
            }

            EngineCommand::SelectScenario(scenario) => {
                self.active_scenario = Some(scenario);
                self.practice.conversation.reset();
                self.practice.transcript =
                    vec![Message::System(scenario.definition().welcome_message)];
                self.send_transcript(Channel::ScenarioPractice);
            }

            EngineCommand::ResetConversation(channel) => {
                let session = self.session_mut(channel);
                session.conversation.reset();
                session.transcript.clear();
                // A scenario stays selected across resets; its welcome
                // message opens the fresh transcript again.
                if channel == Channel::ScenarioPractice {
                    if let Some(scenario) = self.active_scenario {
                        self.practice.transcript =
                            vec![Message::System(scenario.definition().welcome_message)];
                    }
                }
                self.send_transcript(channel);
            }

            EngineCommand::UpdateLlmSettings(llm) => {
                self.store.set_llm_config(llm.clone());
                self.client.update_settings(llm);
                let _ = self
                    .tx
                    .send(EngineResponse::ConnectionStatus("Settings saved".into()));
            }

            EngineCommand::SetScenarioEnabled { scenario, enabled } => {
                if enabled {
                    self.store.enable_scenario(scenario.id());
                } else {
                    self.store.disable_scenario(scenario.id());
                }
                let _ = self.tx.send(EngineResponse::EnabledScenarios(
                    self.store.settings().scenarios.enabled.clone(),
                ));
            }

            EngineCommand::TestConnection => {
                let status = match self.client.test_connection() {
                    Ok(msg) => msg,
                    Err(e) => format!("Connection failed: {e}"),
                };
                let _ = self.tx.send(EngineResponse::ConnectionStatus(status));
            }
        }
    }

    fn submit_message(&mut self, channel: Channel, text: String) {
        let system_prompt = match channel {
            Channel::FreeConversation => tutor_system_prompt(),
            Channel::ScenarioPractice => match self.active_scenario {
                Some(scenario) => scenario.definition().system_prompt,
                None => {
                    self.practice.transcript.push(Message::User(text));
                    self.practice
                        .transcript
                        .push(Message::System("Please select a scenario first!".into()));
                    self.send_transcript(channel);
                    return;
                }
            },
        };

        let messages = {
            let session = self.session(channel);
            build_messages(&system_prompt, session.conversation.recent(), &text)
        };

        // The only blocking operation; the UI stays responsive because we
        // run behind the channel on this thread.
        let outcome = self.client.chat(messages);

        let session = self.session_mut(channel);
        session.transcript.push(Message::User(text.clone()));
        record_exchange(session, text, outcome);
        self.send_transcript(channel);
    }

    fn session(&self, channel: Channel) -> &Session {
        match channel {
            Channel::FreeConversation => &self.free,
            Channel::ScenarioPractice => &self.practice,
        }
    }

    fn session_mut(&mut self, channel: Channel) -> &mut Session {
        match channel {
            Channel::FreeConversation => &mut self.free,
            Channel::ScenarioPractice => &mut self.practice,
        }
    }

    fn send_transcript(&self, channel: Channel) {
        let _ = self.tx.send(EngineResponse::Transcript {
            channel,
            messages: self.session(channel).transcript.clone(),
        });
    }
}

/// Fold one exchange into the session. On success the *raw* assistant text
/// goes into the history (the model sees its own unnormalized output next
/// turn) while the transcript gets the normalized reply. On call failure the
/// history is left untouched and a canned fallback carries the error text.
fn record_exchange(session: &mut Session, user_text: String, outcome: Result<String, LlmError>) {
    match outcome {
        Ok(raw) => {
            let normalized = normalize(&raw);
            if normalized.source == ReplySource::Heuristic {
                log::debug!("model output was not a JSON object, recovered heuristically");
            }
            session.conversation.push_user(user_text);
            session.conversation.push_assistant(raw);
            session.transcript.push(Message::Tutor(normalized.reply));
        }
        Err(err) => {
            log::warn!("LLM call failed: {err}");
            session
                .transcript
                .push(Message::Tutor(TutorReply::error_fallback(&err.to_string())));
        }
    }
}
