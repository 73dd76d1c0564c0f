// Modal dialogs: warnings, completion acknowledgement, quit confirmation

use crate::ui::state::Modal;
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

pub struct ModalView;

impl ModalView {
    pub fn render(frame: &mut Frame, modal: &Modal) {
        let area = frame.area();

        // Small centered modal
        let modal_width = 60.min(area.width.saturating_sub(4));
        let modal_height = 8.min(area.height.saturating_sub(2));

        let modal_area = Rect {
            x: (area.width.saturating_sub(modal_width)) / 2,
            y: (area.height.saturating_sub(modal_height)) / 2,
            width: modal_width,
            height: modal_height,
        };

        // Clear background
        frame.render_widget(Clear, modal_area);

        let (title, border, lines) = match modal {
            Modal::Warning { title, message } => (
                format!(" {} ", title),
                Color::Red,
                vec![
                    Line::from(""),
                    Line::from(Span::styled(
                        message.clone(),
                        Style::default().fg(Color::White),
                    )),
                    Line::from(""),
                    key_line(&[("[Enter]", " OK")]),
                ],
            ),
            Modal::Done { summary } => (
                " Done ".to_string(),
                Color::Green,
                vec![
                    Line::from(""),
                    Line::from(Span::styled(
                        "Conversion finished!",
                        Style::default().fg(Color::White),
                    )),
                    Line::from(Span::styled(
                        summary.to_string(),
                        Style::default().fg(Color::Gray),
                    )),
                    Line::from(""),
                    key_line(&[("[Enter]", " OK")]),
                ],
            ),
            Modal::QuitConfirm => (
                " Quit Confirmation ".to_string(),
                Color::Yellow,
                vec![
                    Line::from(""),
                    Line::from(Span::styled(
                        "A conversion is currently running.",
                        Style::default().fg(Color::White),
                    )),
                    Line::from(Span::styled(
                        "Quitting will stop it.",
                        Style::default().fg(Color::Gray),
                    )),
                    Line::from(""),
                    key_line(&[("[Y]", " Quit   "), ("[N]", " Cancel")]),
                ],
            ),
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border))
            .title(title)
            .title_alignment(Alignment::Center)
            .style(Style::default().bg(Color::Black));

        let inner = block.inner(modal_area);
        frame.render_widget(block, modal_area);

        let paragraph = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .style(Style::default().fg(Color::White));

        frame.render_widget(paragraph, inner);
    }
}

fn key_line(keys: &[(&'static str, &'static str)]) -> Line<'static> {
    let mut spans = Vec::new();
    for (key, desc) in keys {
        spans.push(Span::styled(
            *key,
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::raw(*desc));
    }
    Line::from(spans)
}
