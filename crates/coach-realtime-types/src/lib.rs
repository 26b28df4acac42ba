//! Realtime wire types read and written by the session summary pipeline.

pub mod events;
mod content;

pub use content::items::Item;
pub use content::message::*;
pub use content::parts::{ContentPart, OutputItem};
pub use events::{ClientEvent, ServerEvent};
