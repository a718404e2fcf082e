/// Prediction form and results.
pub mod form;
/// Menu interface.
pub mod menu;
/// View & edit settings.
pub mod settings;
