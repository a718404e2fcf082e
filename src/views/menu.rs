use crate::{App, AppView};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Constraint, Layout},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{List, ListItem, Paragraph},
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MenuItem {
    Predict,
    Settings,
    Exit,
}

#[derive(Debug, Default, Clone)]
pub struct MenuState {
    /// Selected menu index.
    pub selected: usize,
}

impl MenuItem {
    /// Formats a menu item for display.
    pub fn fmt(&self) -> String {
        format!("{:<20}: {}", self.label(), self.description())
    }

    pub fn all() -> Vec<MenuItem> {
        vec![MenuItem::Predict, MenuItem::Settings, MenuItem::Exit]
    }

    pub fn label(&self) -> &str {
        match self {
            MenuItem::Predict => "Predict Fertilizer",
            MenuItem::Settings => "Settings",
            MenuItem::Exit => "Exit",
        }
    }

    pub fn description(&self) -> &str {
        match self {
            MenuItem::Predict => "Get a recommendation from soil data",
            MenuItem::Settings => "Edit configuration",
            MenuItem::Exit => "Quit application",
        }
    }

    /// The total height of the menu when fully rendered.
    pub fn total_height() -> u16 {
        Self::all().len() as u16
    }

    /// The total width of the menu when fully rendered.
    pub fn total_width() -> u16 {
        Self::all()
            .iter()
            .map(|item| item.fmt().len() as u16)
            .max()
            .unwrap_or(0)
    }
}

impl App {
    pub(crate) fn draw_menu(&mut self, frame: &mut Frame) {
        let area = frame.area();

        // ASCII Art
        let ascii_art: Vec<_> = crate::constants::MENU_BANNER
            .map(|line| Line::from(line).centered())
            .into_iter()
            .collect();

        let vertical = Layout::vertical([
            Constraint::Length(ascii_art.len() as u16), // ASCII art
            Constraint::Min(0),                         // Menu
            Constraint::Length(1),                      // Footer
        ]);
        let [art_area, menu_area, footer_area] = vertical.areas(area);

        frame.render_widget(Paragraph::new(ascii_art).centered(), art_area);

        let menu_items: Vec<ListItem> = MenuItem::all()
            .iter()
            .enumerate()
            .map(|(i, item)| {
                let style = if i == self.state.menu.selected {
                    Style::default()
                        .fg(Color::Black)
                        .bg(Color::Green)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                };
                ListItem::new(item.fmt()).style(style)
            })
            .collect();

        // Calculate vertical centering for menu
        let menu_height = MenuItem::total_height();
        let top_padding = (menu_area.height.saturating_sub(menu_height)) / 2;
        let [_, vertical_centered_area, _] = Layout::vertical([
            Constraint::Length(top_padding),
            Constraint::Length(menu_height),
            Constraint::Min(0),
        ])
        .areas(menu_area);

        // Calculate horizontal centering for menu
        let menu_width = MenuItem::total_width();
        let left_padding = (vertical_centered_area.width.saturating_sub(menu_width)) / 2;
        let [_, centered_menu_area, _] = Layout::horizontal([
            Constraint::Length(left_padding),
            Constraint::Length(menu_width),
            Constraint::Min(0),
        ])
        .areas(vertical_centered_area);

        frame.render_widget(List::new(menu_items), centered_menu_area);

        let footer_text = format!("API: {}  |  Press Esc quit", self.api.base_url());
        frame.render_widget(
            Paragraph::new(footer_text)
                .style(Style::default().fg(Color::DarkGray))
                .centered(),
            footer_area,
        );
    }

    pub(crate) fn handle_menu_input(&mut self, key: KeyEvent) {
        match (key.modifiers, key.code) {
            (_, KeyCode::Esc)
            | (KeyModifiers::CONTROL, KeyCode::Char('c') | KeyCode::Char('C')) => self.quit(),
            (_, KeyCode::Up) => self.menu_up(),
            (_, KeyCode::Down) => self.menu_down(),
            (_, KeyCode::Enter) => self.select_menu_item(),
            _ => {}
        }
    }

    fn menu_up(&mut self) {
        if self.state.menu.selected > 0 {
            self.state.menu.selected -= 1;
        }
    }

    fn menu_down(&mut self) {
        let menu_count = MenuItem::all().len();
        if self.state.menu.selected < menu_count - 1 {
            self.state.menu.selected += 1;
        }
    }

    fn select_menu_item(&mut self) {
        match MenuItem::all()[self.state.menu.selected] {
            MenuItem::Predict => self.view = AppView::Form,
            MenuItem::Settings => {
                self.state.settings.open(&self.config);
                self.view = AppView::Settings;
            }
            MenuItem::Exit => self.quit(),
        }
    }
}
