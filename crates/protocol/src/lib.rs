//! Shared wire types for vital-sliders
//!
//! Defines the JSON bodies exchanged between the slider UI and the
//! update service behind `POST /update_vital`.

pub mod messages;
pub mod response;

pub use messages::*;
pub use response::*;
