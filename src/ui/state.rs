// Application state management

use crate::engine::worker::BatchWorker;
use crate::engine::{BatchSummary, Preset};
use crate::ui::focus::FormFocus;
use crate::ui::picker::FolderPicker;
use chrono::Local;
use std::collections::{VecDeque, vec_deque};
use std::path::PathBuf;
use uuid::Uuid;

/// Shell state machine: `Idle -> Running -> Idle`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Idle,
    Running { job_id: Uuid },
}

/// Overlay dialogs
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Modal {
    /// Blocks input until dismissed
    Warning { title: String, message: String },
    /// Acknowledgement shown when a batch finishes
    Done { summary: BatchSummary },
    /// Quit requested while a batch is running
    QuitConfirm,
}

/// Inputs for the next job. Only read when the user starts a conversion.
#[derive(Debug, Clone, Default)]
pub struct FormState {
    /// None until a folder is chosen
    pub folder: Option<PathBuf>,
    pub preset: Preset,
    /// Raw size field text, validated on start
    pub size_input: String,
    pub overwrite: bool,
}

/// Lines kept in the log view; older ones are dropped first
pub const MAX_LOG_LINES: usize = 2000;

/// Append-only log that keeps the newest line in view
#[derive(Debug, Clone, Default)]
pub struct LogView {
    lines: VecDeque<String>,
}

impl LogView {
    /// Append a message; multi-line messages are split and indented
    pub fn push(&mut self, message: &str) {
        let stamp = Local::now().format("%H:%M:%S");
        let mut parts = message.lines();
        let first = parts.next().unwrap_or("");
        self.push_line(format!("[{}] {}", stamp, first));
        for rest in parts {
            self.push_line(format!("           {}", rest));
        }
    }

    fn push_line(&mut self, line: String) {
        if self.lines.len() == MAX_LOG_LINES {
            self.lines.pop_front();
        }
        self.lines.push_back(line);
    }

    pub fn lines(&self) -> vec_deque::Iter<'_, String> {
        self.lines.iter()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// First line to draw so the last `height` lines are visible
    pub fn follow_offset(&self, height: usize) -> usize {
        self.lines.len().saturating_sub(height)
    }
}

pub struct AppState {
    pub form: FormState,
    pub focus: FormFocus,
    pub run_state: RunState,
    /// Bounded to [0, 100]
    pub progress: u8,
    pub log: LogView,
    pub modal: Option<Modal>,
    pub picker: Option<FolderPicker>,
    pub worker: BatchWorker,
    pub should_quit: bool,
}

impl AppState {
    pub fn new(worker: BatchWorker) -> Self {
        Self {
            form: FormState {
                size_input: "0".to_string(),
                ..FormState::default()
            },
            focus: FormFocus::default(),
            run_state: RunState::Idle,
            progress: 0,
            log: LogView::default(),
            modal: None,
            picker: None,
            worker,
            should_quit: false,
        }
    }

    pub fn is_running(&self) -> bool {
        matches!(self.run_state, RunState::Running { .. })
    }

    /// Configuration controls and the start action are only live when idle
    pub fn controls_enabled(&self) -> bool {
        !self.is_running()
    }

    pub fn active_job(&self) -> Option<Uuid> {
        match self.run_state {
            RunState::Running { job_id } => Some(job_id),
            RunState::Idle => None,
        }
    }

    pub fn warn(&mut self, title: &str, message: impl Into<String>) {
        self.modal = Some(Modal::Warning {
            title: title.to_string(),
            message: message.into(),
        });
    }
}
