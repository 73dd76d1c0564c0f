// Dashboard screen implementation

use crate::ui::components::Footer;
use crate::ui::state::AppState;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
    widgets::Widget,
};

mod sections;

pub struct Dashboard;

impl Dashboard {
    pub fn render(frame: &mut Frame, state: &AppState) {
        let area = frame.area();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(5), // Job form
                Constraint::Length(3), // Progress
                Constraint::Min(0),    // Log
                Constraint::Length(1), // Footer
            ])
            .split(area);

        Self::render_form(frame, chunks[0], state);
        Self::render_progress(frame, chunks[1], state);
        Self::render_log(frame, chunks[2], state);

        let footer = if state.is_running() {
            Footer::running(state.log.len())
        } else {
            Footer::idle(state.log.len())
        };
        footer.render(chunks[3], frame.buffer_mut());
    }
}
