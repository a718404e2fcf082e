/// The top-level application module.
mod app;
pub use app::{App, AppState, AppView, check_health};

/// Views for each "screen".
pub mod views;
pub use views::*;

/// Prediction service client and its wire types.
pub mod common;
pub mod config;
pub mod logging;

mod constants;
mod utils;
