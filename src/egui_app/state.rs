//! Shared state types for the egui UI.

mod form;
mod status;
mod viewer;

pub use form::FormState;
pub use status::{StatusBarState, StatusTone};
pub use viewer::ViewerState;

use crate::config::AppConfig;

/// Top-level UI model consumed by the egui renderer.
#[derive(Clone, Debug)]
pub struct UiState {
    pub status: StatusBarState,
    pub form: FormState,
    pub viewer: ViewerState,
    /// Blocking notice; the rest of the window ignores input while set.
    pub notice: Option<Notice>,
    pub dark_mode: bool,
}

impl UiState {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            status: StatusBarState::idle(),
            form: FormState::from_defaults(&config.generation),
            viewer: ViewerState::default(),
            notice: None,
            dark_mode: true,
        }
    }
}

/// A message the user must acknowledge.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub message: String,
}

impl Notice {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
        }
    }
}
