// Folder picker overlay

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
};
use std::fs;
use std::path::{Path, PathBuf};

/// Directory browser. Lists the subdirectories of `dir`, hidden ones excluded.
#[derive(Debug, Clone)]
pub struct FolderPicker {
    pub dir: PathBuf,
    pub entries: Vec<PathBuf>,
    pub list_state: ListState,
    pub error: Option<String>,
}

impl FolderPicker {
    pub fn new(start: &Path) -> Self {
        let mut picker = Self {
            dir: start.to_path_buf(),
            entries: Vec::new(),
            list_state: ListState::default(),
            error: None,
        };
        picker.reload();
        picker
    }

    fn reload(&mut self) {
        self.entries.clear();
        self.error = None;

        match fs::read_dir(&self.dir) {
            Ok(read_dir) => {
                self.entries = read_dir
                    .filter_map(|e| e.ok())
                    .map(|e| e.path())
                    .filter(|p| p.is_dir())
                    .filter(|p| {
                        !p.file_name()
                            .and_then(|n| n.to_str())
                            .is_some_and(|n| n.starts_with('.'))
                    })
                    .collect();
                self.entries.sort();
            }
            Err(e) => self.error = Some(e.to_string()),
        }

        self.list_state
            .select(if self.entries.is_empty() { None } else { Some(0) });
    }

    pub fn selected(&self) -> Option<&PathBuf> {
        self.list_state.selected().and_then(|i| self.entries.get(i))
    }

    pub fn next(&mut self) {
        if let Some(i) = self.list_state.selected() {
            if i + 1 < self.entries.len() {
                self.list_state.select(Some(i + 1));
            }
        }
    }

    pub fn previous(&mut self) {
        if let Some(i) = self.list_state.selected() {
            if i > 0 {
                self.list_state.select(Some(i - 1));
            }
        }
    }

    /// Descend into the highlighted directory
    pub fn enter(&mut self) {
        if let Some(dir) = self.selected().cloned() {
            self.dir = dir;
            self.reload();
        }
    }

    /// Go to the parent directory, keeping the one we came from highlighted
    pub fn up(&mut self) {
        let Some(parent) = self.dir.parent().map(Path::to_path_buf) else {
            return;
        };
        let previous = std::mem::replace(&mut self.dir, parent);
        self.reload();
        if let Some(idx) = self.entries.iter().position(|p| *p == previous) {
            self.list_state.select(Some(idx));
        }
    }

    /// Folder the user picked: the highlighted entry, or the current
    /// directory when it has no subdirectories
    pub fn choice(&self) -> PathBuf {
        self.selected().cloned().unwrap_or_else(|| self.dir.clone())
    }

    pub fn render(frame: &mut Frame, picker: &mut FolderPicker) {
        let area = frame.area();

        let width = 70.min(area.width.saturating_sub(4));
        let height = 20.min(area.height.saturating_sub(2));
        let modal_area = Rect {
            x: (area.width.saturating_sub(width)) / 2,
            y: (area.height.saturating_sub(height)) / 2,
            width,
            height,
        };

        frame.render_widget(Clear, modal_area);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(format!(" {} ", picker.dir.display()))
            .title_alignment(Alignment::Center)
            .style(Style::default().bg(Color::Black));
        let inner = block.inner(modal_area);
        frame.render_widget(block, modal_area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(2)])
            .split(inner);

        if let Some(ref err) = picker.error {
            frame.render_widget(
                Paragraph::new(err.as_str()).style(Style::default().fg(Color::Red)),
                chunks[0],
            );
        } else if picker.entries.is_empty() {
            frame.render_widget(
                Paragraph::new("(no subfolders)").style(Style::default().fg(Color::DarkGray)),
                chunks[0],
            );
        } else {
            let items: Vec<ListItem> = picker
                .entries
                .iter()
                .map(|p| {
                    let name = p
                        .file_name()
                        .map(|n| n.to_string_lossy().into_owned())
                        .unwrap_or_else(|| p.display().to_string());
                    ListItem::new(format!("{}/", name))
                })
                .collect();

            let list = List::new(items).highlight_style(
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            );
            frame.render_stateful_widget(list, chunks[0], &mut picker.list_state);
        }

        let hint = |key: &'static str, desc: &'static str| {
            vec![
                Span::styled(key, Style::default().fg(Color::Yellow)),
                Span::raw(desc),
            ]
        };
        let mut spans = Vec::new();
        spans.extend(hint("[Enter]", " Open  "));
        spans.extend(hint("[Backspace]", " Up  "));
        spans.extend(hint("[Space]", " Choose  "));
        spans.extend(hint("[.]", " Choose this folder  "));
        spans.extend(hint("[Esc]", " Cancel"));

        frame.render_widget(
            Paragraph::new(Line::from(spans)).alignment(Alignment::Center),
            chunks[1],
        );
    }
}
