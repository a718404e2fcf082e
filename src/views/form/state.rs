use super::FormField;
use crate::common::{ApiError, PredictionRequest, PredictionResponse};
use crate::utils::parse_float;
use chrono::{DateTime, Local};
use std::time::Instant;
use tokio::sync::mpsc;

/// What the prediction side of the form screen is showing.
///
/// The loading region and the results region are never visible together.
#[derive(Debug, Default, Clone, PartialEq)]
pub enum PredictionView {
    /// Nothing submitted yet.
    #[default]
    Idle,
    /// Waiting for the service.
    Loading,
    /// The service recommended a fertilizer.
    Success(PredictionResponse),
    /// The request failed, with the message to show.
    Error(String),
}

impl PredictionView {
    pub fn is_loading_visible(&self) -> bool {
        matches!(self, PredictionView::Loading)
    }

    pub fn is_results_visible(&self) -> bool {
        matches!(self, PredictionView::Success(_) | PredictionView::Error(_))
    }
}

/// A submission ready to be sent, tagged with its generation.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionTicket {
    pub generation: u64,
    pub request: PredictionRequest,
}

/// Result of one prediction call, tagged with the generation that issued it.
#[derive(Debug)]
pub struct PredictionOutcome {
    pub generation: u64,
    pub result: Result<PredictionResponse, ApiError>,
}

#[derive(Debug)]
pub struct FormState {
    /// One text input per [`FormField`], indexed by [`FormField::index`].
    inputs: [tui_input::Input; 9],
    /// Field that receives key presses.
    pub selected: FormField,
    /// Current prediction view.
    pub view: PredictionView,
    /// Generation of the latest submission, results of older ones are dropped.
    generation: u64,
    /// When the current loading phase started, drives the spinner.
    pub loading_since: Option<Instant>,
    /// When the current result arrived.
    pub settled_at: Option<DateTime<Local>>,
    /// Sender handed to each spawned prediction task.
    pub outcome_tx: mpsc::UnboundedSender<PredictionOutcome>,
    /// Receiver drained by the app loop.
    pub outcome_rx: mpsc::UnboundedReceiver<PredictionOutcome>,
}

impl Default for FormState {
    fn default() -> Self {
        let (outcome_tx, outcome_rx) = mpsc::unbounded_channel();
        Self {
            inputs: Default::default(),
            selected: FormField::default(),
            view: PredictionView::default(),
            generation: 0,
            loading_since: None,
            settled_at: None,
            outcome_tx,
            outcome_rx,
        }
    }
}

impl FormState {
    pub fn input(&self, field: FormField) -> &tui_input::Input {
        &self.inputs[field.index()]
    }

    pub fn input_mut(&mut self, field: FormField) -> &mut tui_input::Input {
        &mut self.inputs[field.index()]
    }

    pub fn value(&self, field: FormField) -> &str {
        self.input(field).value()
    }

    pub fn set_value(&mut self, field: FormField, value: impl Into<String>) {
        self.inputs[field.index()] = tui_input::Input::new(value.into());
    }

    /// Build the request body from the current field texts.
    ///
    /// Numbers are parsed leniently and nothing is validated; a field that is
    /// not a number is sent as `NaN` (i.e. `null`) for the service to reject.
    pub fn request(&self) -> PredictionRequest {
        let text = |field: FormField| self.value(field).to_string();
        let number = |field: FormField| parse_float(self.value(field));

        PredictionRequest {
            district_name: text(FormField::DistrictName),
            soil_color: text(FormField::SoilColor),
            nitrogen: number(FormField::Nitrogen),
            phosphorus: number(FormField::Phosphorus),
            potassium: number(FormField::Potassium),
            ph: number(FormField::Ph),
            rainfall: number(FormField::Rainfall),
            temperature: number(FormField::Temperature),
            crop: text(FormField::Crop),
        }
    }

    /// Enter the loading state and hand out the request to send.
    pub fn submit(&mut self) -> PredictionTicket {
        self.generation += 1;
        self.view = PredictionView::Loading;
        self.loading_since = Some(Instant::now());
        self.settled_at = None;

        PredictionTicket {
            generation: self.generation,
            request: self.request(),
        }
    }

    /// Apply a finished call. Returns `false` if it was superseded by a later submission.
    pub fn settle(&mut self, outcome: PredictionOutcome) -> bool {
        if outcome.generation != self.generation {
            tracing::debug!(
                generation = outcome.generation,
                latest = self.generation,
                "Discarding stale prediction result"
            );
            return false;
        }

        // replacing the view is what leaves the loading state, for both branches
        self.view = match outcome.result {
            Ok(response) => PredictionView::Success(response),
            Err(err) => PredictionView::Error(err.to_string()),
        };
        self.loading_since = None;
        self.settled_at = Some(Local::now());
        true
    }

    /// Apply every outcome that has already arrived, without waiting.
    pub fn drain_outcomes(&mut self) {
        while let Ok(outcome) = self.outcome_rx.try_recv() {
            self.settle(outcome);
        }
    }

    /// Clear all fields and go back to idle. Calls in flight are ignored when they land.
    pub fn reset(&mut self) {
        self.inputs = Default::default();
        self.selected = FormField::default();
        self.view = PredictionView::Idle;
        self.generation += 1;
        self.loading_since = None;
        self.settled_at = None;
    }

    pub fn focus_next(&mut self) {
        self.selected = self.selected.next();
    }

    pub fn focus_prev(&mut self) {
        self.selected = self.selected.prev();
    }
}
