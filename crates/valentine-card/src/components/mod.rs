//! UI components for the card.

mod app;
mod card_button;
mod heart_modal;

pub use app::*;
pub use card_button::*;
pub use heart_modal::*;
