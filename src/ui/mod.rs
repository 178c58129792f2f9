pub mod app;
pub mod chat_panel;
pub mod settings_window;
