use ratatui::style::{Color, Modifier, Style};

pub const SELECTED_FIELD_STYLE: Style = Style::new().fg(Color::Yellow).add_modifier(Modifier::BOLD);

pub const LABEL_STYLE: Style = Style::new().fg(Color::Gray);

pub const SUCCESS_TITLE_STYLE: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);

pub const ERROR_TITLE_STYLE: Style = Style::new().fg(Color::Red).add_modifier(Modifier::BOLD);

pub const BAR_FILL_STYLE: Style = Style::new().fg(Color::Green);

pub const BAR_TRACK_STYLE: Style = Style::new().fg(Color::DarkGray);

pub const HINT_STYLE: Style = Style::new().fg(Color::DarkGray);
