mod api;
pub use api::*;

mod error;
pub use error::*;

mod prediction;
pub use prediction::*;
