use eframe::egui;
use std::sync::mpsc;

use crate::config::settings::LlmSettings;
use crate::config::settings_io::SettingsStore;
use crate::engine::engine::Engine;
use crate::engine::protocol::{Channel, EngineCommand, EngineResponse};
use crate::model::message::Message;
use crate::model::scenario::Scenario;
use crate::ui::chat_panel::draw_chat_panel;
use crate::ui::settings_window::draw_settings_window;

/* =========================
   UI State
   ========================= */

pub struct UiState {
    pub active_channel: Channel,

    pub free_input: String,
    pub practice_input: String,
    pub free_messages: Vec<Message>,
    pub practice_messages: Vec<Message>,

    pub selected_scenario: Option<Scenario>,
    pub enabled_scenarios: Vec<String>,

    pub show_settings_window: bool,
    pub llm_draft: LlmSettings,
    pub base_url_draft: String,
    pub connection_status: Option<String>,

    pub ui_scale: f32,
    pub should_auto_scroll: bool,
}

impl UiState {
    pub fn input_mut(&mut self) -> &mut String {
        match self.active_channel {
            Channel::FreeConversation => &mut self.free_input,
            Channel::ScenarioPractice => &mut self.practice_input,
        }
    }

    pub fn messages(&self) -> &[Message] {
        match self.active_channel {
            Channel::FreeConversation => &self.free_messages,
            Channel::ScenarioPractice => &self.practice_messages,
        }
    }
}

/* =========================
   Theme
   ========================= */

#[derive(Clone)]
pub struct Theme {
    pub user: egui::Color32,
    pub tutor: egui::Color32,
    pub system: egui::Color32,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            user: egui::Color32::from_rgb(40, 70, 120),
            tutor: egui::Color32::from_rgb(40, 90, 60),
            system: egui::Color32::from_rgb(80, 80, 80),
        }
    }
}

/* =========================
   App
   ========================= */

pub struct TutorApp {
    pub ui: UiState,
    pub theme: Theme,

    pub cmd_tx: mpsc::Sender<EngineCommand>,
    resp_rx: mpsc::Receiver<EngineResponse>,
}

impl TutorApp {
    pub fn new(cc: &eframe::CreationContext<'_>, store: SettingsStore) -> Self {
        let settings = store.settings().clone();

        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (engine_tx, engine_rx) = mpsc::channel();
        let (resp_tx, resp_rx) = mpsc::channel();

        std::thread::spawn(move || {
            let mut engine = Engine::new(cmd_rx, engine_tx, store);
            engine.run();
        });

        // egui only repaints on input; a reply landing after a multi-second
        // LLM call would otherwise sit unrendered until the next event.
        let ctx = cc.egui_ctx.clone();
        std::thread::spawn(move || {
            forward_responses(engine_rx, resp_tx, move || ctx.request_repaint());
        });

        Self {
            ui: UiState {
                active_channel: Channel::FreeConversation,
                free_input: String::new(),
                practice_input: String::new(),
                free_messages: Vec::new(),
                practice_messages: Vec::new(),
                selected_scenario: None,
                enabled_scenarios: settings.scenarios.enabled.clone(),
                show_settings_window: false,
                base_url_draft: settings.llm.base_url.clone().unwrap_or_default(),
                llm_draft: settings.llm,
                connection_status: None,
                ui_scale: 1.0,
                should_auto_scroll: false,
            },
            theme: Theme::default(),
            cmd_tx,
            resp_rx,
        }
    }

    fn drain_responses(&mut self) {
        while let Ok(resp) = self.resp_rx.try_recv() {
            match resp {
                EngineResponse::Transcript { channel, messages } => {
                    match channel {
                        Channel::FreeConversation => self.ui.free_messages = messages,
                        Channel::ScenarioPractice => self.ui.practice_messages = messages,
                    }
                    self.ui.should_auto_scroll = true;
                }
                EngineResponse::ConnectionStatus(status) => {
                    self.ui.connection_status = Some(status);
                }
                EngineResponse::EnabledScenarios(enabled) => {
                    if let Some(selected) = self.ui.selected_scenario {
                        if !enabled.iter().any(|id| id == selected.id()) {
                            self.ui.selected_scenario = None;
                        }
                    }
                    self.ui.enabled_scenarios = enabled;
                }
            }
        }
    }

    fn draw_top_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.selectable_value(
                    &mut self.ui.active_channel,
                    Channel::FreeConversation,
                    "Free Conversation",
                );
                ui.selectable_value(
                    &mut self.ui.active_channel,
                    Channel::ScenarioPractice,
                    "Scenario Practice",
                );

                if self.ui.active_channel == Channel::ScenarioPractice {
                    ui.separator();
                    self.draw_scenario_selector(ui);
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("⚙ Settings").clicked() {
                        self.ui.show_settings_window = !self.ui.show_settings_window;
                    }
                    if ui.button("Reset").clicked() {
                        let _ = self
                            .cmd_tx
                            .send(EngineCommand::ResetConversation(self.ui.active_channel));
                    }
                });
            });
        });
    }

    fn draw_scenario_selector(&mut self, ui: &mut egui::Ui) {
        let selected_label = self
            .ui
            .selected_scenario
            .map(|s| s.label())
            .unwrap_or("Select a scenario…");

        egui::ComboBox::from_id_salt("scenario_selector")
            .selected_text(selected_label)
            .show_ui(ui, |ui| {
                for scenario in Scenario::ALL {
                    if !self
                        .ui
                        .enabled_scenarios
                        .iter()
                        .any(|id| id == scenario.id())
                    {
                        continue;
                    }

                    let is_selected = self.ui.selected_scenario == Some(scenario);
                    if ui.selectable_label(is_selected, scenario.label()).clicked()
                        && !is_selected
                    {
                        self.ui.selected_scenario = Some(scenario);
                        let _ = self.cmd_tx.send(EngineCommand::SelectScenario(scenario));
                    }
                }
            });
    }
}

/// Relay engine responses to the UI channel, waking the UI after each one.
/// Ends when either side hangs up.
fn forward_responses(
    rx: mpsc::Receiver<EngineResponse>,
    tx: mpsc::Sender<EngineResponse>,
    notify: impl Fn(),
) {
    while let Ok(resp) = rx.recv() {
        if tx.send(resp).is_err() {
            break;
        }
        notify();
    }
}

impl eframe::App for TutorApp {
    fn update(&mut self, ctx: &egui::Context, _: &mut eframe::Frame) {
        ctx.set_pixels_per_point(self.ui.ui_scale);

        self.drain_responses();
        self.draw_top_bar(ctx);

        draw_settings_window(ctx, &mut self.ui, &self.cmd_tx);
        draw_chat_panel(ctx, &mut self.ui, &self.theme, &self.cmd_tx);

        self.ui.should_auto_scroll = false;
    }
}
