// Batch progress bar with different visual states

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressState {
    Running,
    Done,
    Idle,
}

pub struct EnhancedProgress {
    percent: u16,
    state: ProgressState,
}

impl EnhancedProgress {
    pub fn new(percent: u16, state: ProgressState) -> Self {
        Self {
            percent: percent.min(100),
            state,
        }
    }
}

impl Widget for EnhancedProgress {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        // Leave room for " 100%"
        let label = format!("{:>4}%", self.percent);
        let label_width = label.len() as u16 + 1;
        let bar_width = area.width.saturating_sub(label_width);

        let ratio = self.percent as f64 / 100.0;
        let filled_width = (bar_width as f64 * ratio).round() as u16;

        let (filled_symbol, unfilled_symbol, filled_fg, unfilled_fg) = match self.state {
            ProgressState::Running => ("█", "░", Color::Blue, Color::DarkGray),
            ProgressState::Done => ("█", " ", Color::Green, Color::Black),
            ProgressState::Idle => ("▓", "░", Color::DarkGray, Color::DarkGray),
        };

        for x in 0..bar_width {
            let (symbol, fg) = if x < filled_width {
                (filled_symbol, filled_fg)
            } else {
                (unfilled_symbol, unfilled_fg)
            };
            buf.set_string(area.x + x, area.y, symbol, Style::default().fg(fg));
        }

        if area.width >= label_width {
            buf.set_string(
                area.x + bar_width + 1,
                area.y,
                &label[..],
                Style::default().fg(Color::White),
            );
        }
    }
}
