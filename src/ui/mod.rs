// Terminal UI using Ratatui

pub mod components;
pub mod dashboard;
pub mod events;
pub mod focus;
pub mod modal;
pub mod picker;
pub mod shell;
pub mod state;
pub mod widgets;

pub use dashboard::Dashboard;
pub use events::{UiOptions, handle_key, run_ui};
pub use modal::ModalView;
pub use picker::FolderPicker;
pub use state::{AppState, Modal, RunState};
