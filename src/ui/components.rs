// Reusable UI components

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

pub struct Footer {
    content: Line<'static>,
}

impl Footer {
    fn from_controls(prefix: String, controls: &[(&'static str, &'static str)]) -> Self {
        let mut spans = vec![Span::raw(prefix)];

        for (i, (hotkey, desc)) in controls.iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw("  "));
            }
            spans.push(Span::styled(*hotkey, Style::default().fg(Color::Yellow)));
            spans.push(Span::raw(*desc));
        }

        Self {
            content: Line::from(spans),
        }
    }

    /// Controls available while no batch is running
    pub fn idle(log_lines: usize) -> Self {
        Self::from_controls(
            format!("Log: {} lines  |  ", log_lines),
            &[
                ("[Tab]", " Next field"),
                ("[Enter]", " Edit/Choose"),
                ("[←/→]", " Preset"),
                ("[F5]", " Start"),
                ("[Q]", "uit"),
            ],
        )
    }

    /// Controls available while a batch is running
    pub fn running(log_lines: usize) -> Self {
        Self::from_controls(
            format!("Log: {} lines  |  ", log_lines),
            &[("[X]", " Stop"), ("[Esc]", " Stop"), ("[Q]", "uit")],
        )
    }
}

impl Widget for Footer {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Paragraph::new(self.content)
            .style(Style::default().fg(Color::Gray))
            .render(area, buf);
    }
}
