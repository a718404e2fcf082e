use crate::common::{ApiClient, HealthStatus};
use crate::config::Config;
use crate::form::FormState;
use crate::menu::MenuState;
use crate::settings::SettingsState;
use color_eyre::eyre::Result;
use crossterm::event::EventStream;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AppView {
    Menu,
    Settings,
    Form,
}

#[derive(Default, Debug)]
pub struct AppState {
    pub menu: MenuState,
    pub settings: SettingsState,
    pub form: FormState,
}

/// Probe the service and log whether its model is loaded.
pub async fn check_health(api: &ApiClient) -> HealthStatus {
    let health = api.health_check().await;
    if health.model_loaded {
        tracing::info!(status = %health.status, "Prediction service is ready");
    } else {
        tracing::warn!(status = %health.status, "Model not loaded on server");
    }
    health
}

/// 60 FPS = 1000ms / 60 = 16.67ms per frame
const FPS_RATE: Duration = Duration::from_millis(1000 / 60);

#[derive(Debug)]
pub struct App {
    /// Active application view.
    pub view: AppView,
    /// Application state.
    ///
    /// This is shared among all views.
    pub state: AppState,
    /// Is the application running?
    pub is_running: bool,
    /// Configuration.
    pub config: Config,
    /// Prediction service client.
    pub api: ApiClient,
}

impl App {
    /// Construct a new instance of [`App`] around an already configured client.
    pub fn new(config: Config, api: ApiClient) -> Self {
        Self::new_at_view(config, api, AppView::Menu)
    }

    pub fn new_at_view(config: Config, api: ApiClient, view: AppView) -> Self {
        Self {
            view,
            state: AppState::default(),
            is_running: false,
            config,
            api,
        }
    }

    /// Run the application's main loop.
    pub async fn run(mut self, mut terminal: ratatui::DefaultTerminal) -> Result<()> {
        self.is_running = true;
        self.spawn_health_check();

        let mut event_stream = EventStream::new();

        // create a ticker for animation updates
        let mut interval = tokio::time::interval(FPS_RATE);

        while self.is_running {
            // apply finished predictions before drawing, even from other views
            self.tick_form();

            terminal.draw(|frame| self.draw(frame))?;

            // handle events with timeout to allow animation updates
            tokio::select! {
                _ = interval.tick() => {
                    // will trigger a redraw for animation by looping
                    continue;
                }
                result = Self::next_event(&mut event_stream) => {
                    if let Some(event) = result? {
                        self.handle_event(event);
                    }
                }
            }
        }
        Ok(())
    }

    /// Check the service once in the background. Only ever logged, never shown.
    pub fn spawn_health_check(&self) -> tokio::task::JoinHandle<HealthStatus> {
        let api = self.api.clone();
        tokio::spawn(async move { check_health(&api).await })
    }

    /// Renders the user interface.
    pub fn draw(&mut self, frame: &mut ratatui::Frame) {
        match self.view {
            AppView::Menu => self.draw_menu(frame),
            AppView::Settings => self.draw_settings(frame),
            AppView::Form => self.draw_form(frame),
        }
    }

    /// Reads the next crossterm event.
    async fn next_event(
        event_stream: &mut EventStream,
    ) -> Result<Option<crossterm::event::Event>> {
        use futures::{FutureExt, StreamExt};

        match event_stream.next().fuse().await {
            Some(Ok(event)) => Ok(Some(event)),
            Some(Err(err)) => Err(err.into()),
            None => Ok(None),
        }
    }

    /// Updates the state of [`App`] from a terminal event.
    pub fn handle_event(&mut self, event: crossterm::event::Event) {
        use crossterm::event::{Event, KeyEventKind};

        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => match self.view {
                AppView::Menu => self.handle_menu_input(key),
                AppView::Settings => self.handle_settings_input(key),
                AppView::Form => self.handle_form_input(key),
            },
            _ => {}
        }
    }

    /// Set running to false to quit the application.
    pub fn quit(&mut self) {
        self.is_running = false;
    }
}
