mod fields;
pub use fields::FormField;

mod state;
pub use state::*;

mod styles;
use styles::*;

use crate::AppView;
use crate::common::PredictionResponse;
use crate::utils::{confidence_bar, format_confidence, spinner_frame};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use tui_input::backend::crossterm::EventHandler;

/// Width of the `  District_Name : ` prefix in front of each value.
const LABEL_WIDTH: u16 = 18;

impl crate::App {
    pub(crate) fn draw_form(&mut self, frame: &mut Frame) {
        let area = frame.area();

        let vertical = Layout::vertical([
            Constraint::Length(3), // Title
            Constraint::Min(11),   // Form & results
            Constraint::Length(2), // Footer
        ]);
        let [title_area, body_area, footer_area] = vertical.areas(area);

        let title = Line::from("Fertilizer Recommendation")
            .bold()
            .green()
            .centered();
        frame.render_widget(
            Paragraph::new(title).block(Block::default().borders(Borders::BOTTOM)),
            title_area,
        );

        let [form_area, side_area] =
            Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
                .areas(body_area);

        self.draw_form_fields(frame, form_area);

        let form = &self.state.form;
        if form.view.is_loading_visible() {
            self.draw_loading(frame, side_area);
        } else if form.view.is_results_visible() {
            self.draw_results(frame, side_area);
        } else {
            frame.render_widget(
                Paragraph::new("Fill in the form and press Enter to get a recommendation.")
                    .style(HINT_STYLE)
                    .wrap(Wrap { trim: true })
                    .block(Block::bordered().title("Results")),
                side_area,
            );
        }

        let footer_text = "Enter: Predict | ↑↓/Tab: Move | Ctrl+R: Reset | Esc: Back";
        frame.render_widget(
            Paragraph::new(footer_text)
                .style(Style::default().fg(Color::DarkGray))
                .centered(),
            footer_area,
        );
    }

    fn draw_form_fields(&self, frame: &mut Frame, area: Rect) {
        let form = &self.state.form;

        // keep 2 for borders and 1 for cursor
        let value_width = area.width.saturating_sub(LABEL_WIDTH + 3).max(1) as usize;

        let lines: Vec<Line> = FormField::ALL
            .iter()
            .map(|field| {
                let input = form.input(*field);
                let scroll = input.visual_scroll(value_width);
                let value: String = input
                    .value()
                    .chars()
                    .skip(scroll)
                    .take(value_width)
                    .collect();

                let label = format!("  {:<width$}: ", field.id(), width = LABEL_WIDTH as usize - 4);
                if value.is_empty() && *field != form.selected {
                    let placeholder = if field.is_numeric() { "number" } else { "text" };
                    Line::from(vec![
                        Span::styled(label, LABEL_STYLE),
                        Span::styled(placeholder, HINT_STYLE),
                    ])
                } else if *field == form.selected {
                    Line::from(vec![
                        Span::styled(label, SELECTED_FIELD_STYLE),
                        Span::styled(value, SELECTED_FIELD_STYLE),
                    ])
                } else {
                    Line::from(vec![Span::styled(label, LABEL_STYLE), Span::raw(value)])
                }
            })
            .collect();

        frame.render_widget(
            Paragraph::new(lines).block(Block::bordered().title("Soil & Crop")),
            area,
        );

        // place the cursor right after the visible text of the selected field
        let input = form.input(form.selected);
        let scroll = input.visual_scroll(value_width);
        let x = area.x + 1 + LABEL_WIDTH + (input.visual_cursor().max(scroll) - scroll) as u16;
        let y = area.y + 1 + form.selected.index() as u16;
        if x < area.right() && y < area.bottom() {
            frame.set_cursor_position((x, y));
        }
    }

    fn draw_loading(&self, frame: &mut Frame, area: Rect) {
        let elapsed = self
            .state
            .form
            .loading_since
            .map(|since| since.elapsed())
            .unwrap_or_default();

        frame.render_widget(
            Paragraph::new(format!("{} Predicting...", spinner_frame(elapsed)))
                .block(Block::bordered().title("Loading"))
                .centered(),
            area,
        );
    }

    fn draw_results(&self, frame: &mut Frame, area: Rect) {
        match &self.state.form.view {
            PredictionView::Success(response) => self.draw_prediction(frame, area, response),
            PredictionView::Error(message) => {
                let lines = vec![
                    Line::from(""),
                    Line::from("❌ Prediction Error").style(ERROR_TITLE_STYLE),
                    Line::from(""),
                    Line::from(message.as_str()),
                ];
                frame.render_widget(
                    Paragraph::new(lines)
                        .block(Block::bordered().title("Results"))
                        .wrap(Wrap { trim: true }),
                    area,
                );
            }
            _ => {}
        }
    }

    fn draw_prediction(&self, frame: &mut Frame, area: Rect, response: &PredictionResponse) {
        // bar track spans the inner width minus indentation
        let track_width = area.width.saturating_sub(6);
        let bar = confidence_bar(response.confidence, track_width);
        let remaining = (track_width as usize).saturating_sub(bar.chars().count());

        let mut lines = vec![
            Line::from(""),
            Line::from("🌾 Prediction Results").style(SUCCESS_TITLE_STYLE),
            Line::from(""),
            Line::from(vec![
                "  Recommended Fertilizer: ".bold(),
                response.fertilizer.as_str().into(),
            ]),
            Line::from(vec![
                "  Confidence: ".bold(),
                format_confidence(response.confidence).into(),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::raw("  "),
                Span::styled(bar, BAR_FILL_STYLE),
                Span::styled("░".repeat(remaining), BAR_TRACK_STYLE),
            ]),
        ];

        if let Some(message) = &response.message {
            lines.push(Line::from(""));
            lines.push(Line::from(format!("  {}", message)).dim());
        }

        if let Some(at) = &self.state.form.settled_at {
            lines.push(Line::from(""));
            lines.push(Line::from(format!("  Received at {}", at.format("%H:%M:%S"))).dim());
        }

        // no wrapping, an oversized bar is clipped at the border
        frame.render_widget(
            Paragraph::new(lines).block(Block::bordered().title("Results")),
            area,
        );
    }

    pub(crate) fn handle_form_input(&mut self, key: KeyEvent) {
        match (key.modifiers, key.code) {
            (_, KeyCode::Esc) => self.view = AppView::Menu,
            (KeyModifiers::CONTROL, KeyCode::Char('c') | KeyCode::Char('C')) => self.quit(),
            (KeyModifiers::CONTROL, KeyCode::Char('r') | KeyCode::Char('R')) => {
                self.state.form.reset()
            }
            (_, KeyCode::Up | KeyCode::BackTab) => self.state.form.focus_prev(),
            (_, KeyCode::Down | KeyCode::Tab) => self.state.form.focus_next(),
            (_, KeyCode::Enter) => self.submit_prediction(),
            _ => {
                let selected = self.state.form.selected;
                let event = crossterm::event::Event::Key(key);
                self.state.form.input_mut(selected).handle_event(&event);
            }
        }
    }

    /// Submit the form: show loading and run the prediction in the background.
    ///
    /// A previous call still in flight is not cancelled, its result is dropped on arrival.
    pub fn submit_prediction(&mut self) {
        let ticket = self.state.form.submit();
        tracing::info!(generation = ticket.generation, "Submitting prediction form");

        let api = self.api.clone();
        let tx = self.state.form.outcome_tx.clone();
        tokio::spawn(async move {
            let result = api.predict(&ticket.request).await;
            tx.send(PredictionOutcome {
                generation: ticket.generation,
                result,
            })
            .ok();
        });
    }

    /// Apply prediction results that arrived since the last tick.
    pub(crate) fn tick_form(&mut self) {
        self.state.form.drain_outcomes();
    }

    /// Wait for the next prediction result and apply it.
    ///
    /// Only call this after a submit. The form keeps its own sender alive, so with
    /// nothing in flight this waits forever.
    pub async fn settle_next_prediction(&mut self) {
        if let Some(outcome) = self.state.form.outcome_rx.recv().await {
            self.state.form.settle(outcome);
        }
    }
}
