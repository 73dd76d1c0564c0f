use super::*;
use crate::engine::Preset;
use crate::ui::focus::FormFocus;
use crate::ui::widgets::{EnhancedProgress, ProgressState};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

impl Dashboard {
    pub(super) fn render_form(frame: &mut Frame, area: Rect, state: &AppState) {
        let enabled = state.controls_enabled();

        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Video Converter ")
            .border_style(Style::default().fg(if enabled {
                Color::Cyan
            } else {
                Color::DarkGray
            }));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let field_style = |focus: FormFocus| {
            if !enabled {
                Style::default().fg(Color::DarkGray)
            } else if state.focus == focus {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            }
        };
        let label = |text: &'static str| Span::styled(text, Style::default().fg(Color::Gray));

        let folder_text = match &state.form.folder {
            Some(folder) => format!(" {} ", folder.display()),
            None => " <press Enter to choose a folder> ".to_string(),
        };

        let preset_spans: Vec<Span> = Preset::ALL
            .iter()
            .flat_map(|preset| {
                let marker = if *preset == state.form.preset {
                    "(•)"
                } else {
                    "( )"
                };
                [
                    Span::styled(
                        format!(" {} {} ", marker, preset.label()),
                        if *preset == state.form.preset {
                            field_style(FormFocus::Preset)
                        } else {
                            Style::default().fg(if enabled {
                                Color::White
                            } else {
                                Color::DarkGray
                            })
                        },
                    ),
                    Span::raw(" "),
                ]
            })
            .collect();

        let mut size_text = format!(" {}", state.form.size_input);
        if enabled && state.focus == FormFocus::SizeCap {
            size_text.push('_');
        }
        size_text.push(' ');

        let mut preset_line = vec![label("Output format:   ")];
        preset_line.extend(preset_spans);

        let lines = vec![
            Line::from(vec![
                label("Folder:          "),
                Span::styled(folder_text, field_style(FormFocus::Folder)),
            ]),
            Line::from(preset_line),
            Line::from(vec![
                label("Size limit (MB): "),
                Span::styled(size_text, field_style(FormFocus::SizeCap)),
                Span::styled("  0 = unlimited", Style::default().fg(Color::DarkGray)),
            ]),
        ];

        frame.render_widget(Paragraph::new(lines), inner);
    }

    pub(super) fn render_progress(frame: &mut Frame, area: Rect, state: &AppState) {
        let (title, progress_state) = if state.is_running() {
            (" Converting ", ProgressState::Running)
        } else if state.progress >= 100 {
            (" Done ", ProgressState::Done)
        } else {
            (" Idle ", ProgressState::Idle)
        };

        let block = Block::default().borders(Borders::ALL).title(title);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        frame.render_widget(
            EnhancedProgress::new(state.progress as u16, progress_state),
            inner,
        );
    }

    pub(super) fn render_log(frame: &mut Frame, area: Rect, state: &AppState) {
        let block = Block::default().borders(Borders::ALL).title(" Log ");
        let inner = block.inner(area);
        frame.render_widget(block, area);

        // Always show the tail
        let height = inner.height as usize;
        let start = state.log.follow_offset(height);
        let lines: Vec<Line> = state
            .log
            .lines()
            .skip(start)
            .map(|l| Line::from(l.as_str()))
            .collect();

        frame.render_widget(Paragraph::new(lines), inner);
    }
}
