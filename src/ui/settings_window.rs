use eframe::egui;
use std::sync::mpsc::Sender;

use crate::engine::protocol::EngineCommand;
use crate::model::scenario::Scenario;
use crate::ui::app::UiState;

pub fn draw_settings_window(
    ctx: &egui::Context,
    ui_state: &mut UiState,
    cmd_tx: &Sender<EngineCommand>,
) {
    if !ui_state.show_settings_window {
        return;
    }

    let mut open = true;
    egui::Window::new("Settings")
        .open(&mut open)
        .resizable(false)
        .show(ctx, |ui| {
            ui.heading("LLM");

            ui.label("Provider");
            ui.text_edit_singleline(&mut ui_state.llm_draft.provider);

            ui.label("Model");
            ui.text_edit_singleline(&mut ui_state.llm_draft.model);

            ui.label("Temperature");
            ui.add(egui::Slider::new(&mut ui_state.llm_draft.temperature, 0.0..=2.0));

            ui.label("API key (blank: use OPENAI_API_KEY / DEEPSEEK_API_KEY)");
            ui.add(egui::TextEdit::singleline(&mut ui_state.llm_draft.api_key).password(true));

            ui.label("Base URL (blank: OpenAI default)");
            ui.text_edit_singleline(&mut ui_state.base_url_draft);

            ui.horizontal(|ui| {
                if ui.button("Save").clicked() {
                    let mut llm = ui_state.llm_draft.clone();
                    let base_url = ui_state.base_url_draft.trim();
                    llm.base_url = (!base_url.is_empty()).then(|| base_url.to_string());
                    ui_state.llm_draft = llm.clone();
                    let _ = cmd_tx.send(EngineCommand::UpdateLlmSettings(llm));
                }

                if ui.button("Test connection").clicked() {
                    let _ = cmd_tx.send(EngineCommand::TestConnection);
                }
            });

            if let Some(status) = &ui_state.connection_status {
                ui.label(status);
            }

            ui.separator();
            ui.heading("Scenarios");

            for scenario in Scenario::ALL {
                let mut enabled = ui_state
                    .enabled_scenarios
                    .iter()
                    .any(|id| id == scenario.id());

                if ui.checkbox(&mut enabled, scenario.label()).changed() {
                    let _ = cmd_tx.send(EngineCommand::SetScenarioEnabled { scenario, enabled });
                }
            }

            ui.separator();
            ui.label("UI scale");
            ui.add(egui::Slider::new(&mut ui_state.ui_scale, 0.75..=2.0));
        });

    if !open {
        ui_state.show_settings_window = false;
    }
}
