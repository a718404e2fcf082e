use crate::common::ApiClient;
use crate::config::Config;
use crate::{App, AppView};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Constraint, Layout},
    style::{Color, Modifier, Style, Styled, Stylize},
    text::Line,
    widgets::{Block, Paragraph},
};

/// Possible settings fields.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub enum SettingsField {
    /// Prediction service base URL.
    #[default]
    ApiUrl,
    /// Log file path.
    LogFile,
}

#[derive(Debug, Default, Clone)]
pub struct SettingsState {
    pub selected_field: SettingsField,
    /// Whether the selected field is being edited.
    pub editing: bool,
    /// Input buffer for editing.
    pub input_buffer: String,
    /// Config being edited, applied on save.
    pub temp_config: Config,
    /// Status message.
    pub status_message: String,
}

impl SettingsState {
    /// Start a fresh editing session from the active config.
    pub fn open(&mut self, config: &Config) {
        *self = Self {
            temp_config: config.clone(),
            ..Default::default()
        };
    }

    fn up(&mut self) {
        self.selected_field = match self.selected_field {
            SettingsField::ApiUrl => SettingsField::ApiUrl,
            SettingsField::LogFile => SettingsField::ApiUrl,
        };
    }

    fn down(&mut self) {
        self.selected_field = match self.selected_field {
            SettingsField::ApiUrl => SettingsField::LogFile,
            SettingsField::LogFile => SettingsField::LogFile,
        };
    }

    fn start_edit(&mut self) {
        self.input_buffer = match self.selected_field {
            SettingsField::ApiUrl => self.temp_config.api_url.clone(),
            SettingsField::LogFile => self.temp_config.log_file.clone(),
        };
        self.editing = true;
        self.status_message.clear();
    }

    fn cancel_edit(&mut self) {
        self.input_buffer.clear();
        self.editing = false;
        self.status_message.clear();
    }

    /// Apply the input buffer to the selected field, if it is valid.
    pub fn apply_edit(&mut self) {
        match self.selected_field {
            SettingsField::ApiUrl => match validate_api_url(&self.input_buffer) {
                Ok(url) => {
                    self.temp_config.api_url = url;
                    self.status_message = "API URL updated (press 's' to save)".to_string();
                }
                Err(err) => {
                    self.status_message = format!("Invalid API URL: {}", err);
                }
            },
            SettingsField::LogFile => {
                let path = self.input_buffer.trim();
                if path.is_empty() {
                    self.status_message = "Log file cannot be empty!".to_string();
                } else {
                    self.temp_config.log_file = path.to_string();
                    self.status_message =
                        "Log file updated (press 's' to save, applies on restart)".to_string();
                }
            }
        }
        self.input_buffer.clear();
        self.editing = false;
    }
}

/// Check that `input` is an absolute http(s) URL, returning it without trailing slashes.
pub fn validate_api_url(input: &str) -> Result<String, String> {
    let trimmed = input.trim();
    let url = reqwest::Url::parse(trimmed).map_err(|e| e.to_string())?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(format!("unsupported scheme '{}'", url.scheme()));
    }
    if url.host_str().is_none() {
        return Err("missing host".to_string());
    }
    Ok(trimmed.trim_end_matches('/').to_string())
}

impl App {
    pub(crate) fn draw_settings(&mut self, frame: &mut Frame) {
        let area = frame.area();
        let settings = &self.state.settings;

        let vertical = Layout::vertical([
            Constraint::Length(3), // Title
            Constraint::Min(0),    // Settings fields
            Constraint::Length(3), // Footer
        ]);
        let [title_area, settings_area, footer_area] = vertical.areas(area);

        let title = Line::from("Settings").bold().blue().centered();
        frame.render_widget(Paragraph::new(title), title_area);

        let field_style = |field: SettingsField| {
            if settings.selected_field == field {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            }
        };

        // Show input_buffer if editing, otherwise show temp_config value
        let field_value = |field: SettingsField, value: &str| {
            if settings.editing && settings.selected_field == field {
                format!("{}_", settings.input_buffer)
            } else {
                value.to_string()
            }
        };

        let mut settings_text = vec![
            Line::from(""),
            Line::from(vec![
                "  API URL:   ".into(),
                field_value(SettingsField::ApiUrl, &settings.temp_config.api_url)
                    .set_style(field_style(SettingsField::ApiUrl)),
            ]),
            Line::from(""),
            Line::from(vec![
                "  Log File:  ".into(),
                field_value(SettingsField::LogFile, &settings.temp_config.log_file)
                    .set_style(field_style(SettingsField::LogFile)),
            ]),
            Line::from(""),
            Line::from(vec![
                "  Current config: ".dim(),
                Config::current_location().dim(),
            ]),
        ];

        // Add status message below the current config line if present
        if !settings.status_message.is_empty() {
            settings_text.push(Line::from(""));
            settings_text.push(Line::from(format!("  {}", settings.status_message)).green());
        }

        frame.render_widget(
            Paragraph::new(settings_text)
                .block(Block::default().title("Use ↑↓ to select field, Enter to edit, s to save")),
            settings_area,
        );

        let footer_text = "Press Esc to go back  |  Enter to edit field  |  s to save";
        frame.render_widget(Paragraph::new(footer_text).centered(), footer_area);
    }

    pub(crate) fn handle_settings_input(&mut self, key: KeyEvent) {
        let settings = &mut self.state.settings;
        if settings.editing {
            match key.code {
                KeyCode::Enter => settings.apply_edit(),
                KeyCode::Esc => settings.cancel_edit(),
                KeyCode::Backspace => {
                    settings.input_buffer.pop();
                }
                KeyCode::Char(c) => settings.input_buffer.push(c),
                _ => {}
            }
            return;
        }

        match (key.modifiers, key.code) {
            (_, KeyCode::Esc) => {
                self.view = AppView::Menu;
                self.state.settings.status_message.clear();
            }
            (KeyModifiers::CONTROL, KeyCode::Char('c') | KeyCode::Char('C')) => self.quit(),
            (_, KeyCode::Up) => self.state.settings.up(),
            (_, KeyCode::Down) => self.state.settings.down(),
            (_, KeyCode::Enter) => self.state.settings.start_edit(),
            (_, KeyCode::Char('s')) => self.save_config(),
            _ => {}
        }
    }

    /// Make the edited config active, persist it and point the client at the new URL.
    fn save_config(&mut self) {
        let config = self.state.settings.temp_config.clone();
        if config.api_url != self.config.api_url {
            tracing::info!(api_url = %config.api_url, "Switching prediction service");
            self.api = ApiClient::new(config.api_url.clone());
        }

        self.state.settings.status_message = match config.save() {
            Ok(_) => format!("Configuration saved to {}", Config::current_location()),
            Err(e) => {
                tracing::error!("Failed to save config: {}", e);
                format!("Failed to save: {}", e)
            }
        };
        self.config = config;
    }
}
