use eframe::egui;
use std::sync::mpsc::Sender;

use crate::engine::protocol::EngineCommand;
use crate::model::message::Message;
use crate::model::reply::TutorReply;
use crate::ui::app::{Theme, UiState};

pub fn draw_chat_panel(
    ctx: &egui::Context,
    ui_state: &mut UiState,
    theme: &Theme,
    cmd_tx: &Sender<EngineCommand>,
) {
    let input_id = egui::Id::new("chat_input_box");

    // ---------- Input bar ----------
    egui::TopBottomPanel::bottom("chat_input").show(ctx, |ui| {
        let mut send_now = false;

        ui.horizontal(|ui| {
            let response = ui.add_sized(
                [ui.available_width() - 60.0, 60.0],
                egui::TextEdit::multiline(ui_state.input_mut())
                    .id(input_id)
                    .hint_text("Say something in English…")
                    .lock_focus(true),
            );

            // Enter sends, Shift+Enter inserts a newline
            if response.has_focus() {
                let input = ui.input(|i| i.clone());
                if input.key_pressed(egui::Key::Enter) && !input.modifiers.shift {
                    send_now = true;
                }
            }

            if ui.button("Send").clicked() {
                send_now = true;
            }
        });

        if send_now {
            let text = ui_state.input_mut().trim().to_string();

            if !text.is_empty() {
                let _ = cmd_tx.send(EngineCommand::SubmitMessage {
                    channel: ui_state.active_channel,
                    text,
                });
                ui_state.input_mut().clear();
            }

            ui.memory_mut(|m| m.request_focus(input_id));
        }
    });

    // ---------- Transcript ----------
    egui::CentralPanel::default().show(ctx, |ui| {
        egui::ScrollArea::vertical()
            .stick_to_bottom(ui_state.should_auto_scroll)
            .show(ui, |ui| {
                for msg in ui_state.messages() {
                    draw_message(ui, theme, msg);
                }
            });
    });
}

fn draw_message(ui: &mut egui::Ui, theme: &Theme, msg: &Message) {
    ui.add_space(6.0);

    match msg {
        Message::User(text) => {
            ui.with_layout(egui::Layout::right_to_left(egui::Align::TOP), |ui| {
                bubble(ui, theme.user, |ui| {
                    ui.label(format!("You: {text}"));
                });
            });
        }
        Message::System(text) => {
            bubble(ui, theme.system, |ui| {
                ui.label(text);
            });
        }
        Message::Tutor(reply) => {
            bubble(ui, theme.tutor, |ui| {
                draw_tutor_reply(ui, reply);
            });
        }
    }
}

/// Structured rendering of a reply: feedback sections, numbered example
/// sentences, then the in-character answer.
fn draw_tutor_reply(ui: &mut egui::Ui, reply: &TutorReply) {
    let feedback = &reply.teaching_feedback;

    ui.label(egui::RichText::new("📚 Teaching Feedback").strong());

    feedback_list(ui, "Grammar corrections", &feedback.grammar_corrections);
    feedback_list(ui, "Vocabulary suggestions", &feedback.vocabulary_suggestions);
    feedback_list(ui, "Pronunciation tips", &feedback.pronunciation_tips);

    if !feedback.overall_comment.is_empty() {
        ui.label(egui::RichText::new("Overall comment").italics());
        ui.label(&feedback.overall_comment);
    }

    ui.add_space(4.0);
    ui.label(egui::RichText::new("💬 Example Sentences").strong());
    for (i, sentence) in reply.example_sentences.iter().enumerate() {
        ui.label(format!("{}. {}", i + 1, sentence));
    }

    ui.add_space(4.0);
    ui.label(egui::RichText::new("🤖 Reply").strong());
    ui.label(&reply.bot_reply);
}

fn feedback_list(ui: &mut egui::Ui, title: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    ui.label(egui::RichText::new(title).italics());
    for item in items {
        ui.label(format!("• {item}"));
    }
}

fn bubble(ui: &mut egui::Ui, fill: egui::Color32, add_contents: impl FnOnce(&mut egui::Ui)) {
    egui::Frame::new()
        .fill(fill)
        .corner_radius(egui::CornerRadius::same(6))
        .inner_margin(egui::Margin::same(8))
        .show(ui, |ui| {
            ui.set_max_width(ui.available_width() * 0.85);
            add_contents(ui);
        });
}
