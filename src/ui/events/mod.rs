// Event handling and main UI loop

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver};
use std::thread;
use std::time::{Duration, Instant};

use crate::engine::Preset;
use crate::engine::worker::BatchWorker;
use crate::ui::{Dashboard, FolderPicker, ModalView, state::AppState};

mod dashboard;
mod modal;
mod picker;

/// Startup values for the dashboard
#[derive(Debug, Clone, Default)]
pub struct UiOptions {
    pub folder: Option<PathBuf>,
    pub preset: Preset,
    pub size_cap_mb: u64,
    pub overwrite: bool,
}

// Event types sent from dedicated event thread to main loop
enum UiEvent {
    Input(Event), // Keyboard, mouse, or other terminal events
    Tick,         // Periodic update for rendering and worker polling
}

/// Spawn a dedicated thread for event polling.
fn spawn_event_thread(tx: mpsc::Sender<UiEvent>) {
    let tick_rate = Duration::from_millis(50);

    thread::spawn(move || {
        let mut last_tick = Instant::now();
        loop {
            let timeout = tick_rate
                .checked_sub(last_tick.elapsed())
                .unwrap_or(Duration::from_secs(0));

            if event::poll(timeout).unwrap_or(false) {
                if let Ok(evt) = event::read() {
                    if tx.send(UiEvent::Input(evt)).is_err() {
                        break; // Main thread dropped the receiver
                    }
                }
            }

            if last_tick.elapsed() >= tick_rate {
                if tx.send(UiEvent::Tick).is_err() {
                    break;
                }
                last_tick = Instant::now();
            }
        }
    });
}

pub fn run_ui(worker: BatchWorker, options: UiOptions) -> io::Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app_state = AppState::new(worker);
    app_state.form.folder = options.folder;
    app_state.form.preset = options.preset;
    app_state.form.size_input = options.size_cap_mb.to_string();
    app_state.form.overwrite = options.overwrite;

    let (event_tx, event_rx) = mpsc::channel();
    spawn_event_thread(event_tx);

    let result = run_app(&mut terminal, &mut app_state, event_rx);

    // Never leave an encoder behind
    app_state.worker.shutdown();

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    state: &mut AppState,
    event_rx: Receiver<UiEvent>,
) -> io::Result<()> {
    loop {
        let mut pending_inputs: Vec<Event> = Vec::new();

        // Block for at least one event, then drain the queue
        match event_rx.recv() {
            Ok(UiEvent::Input(ev)) => pending_inputs.push(ev),
            Ok(UiEvent::Tick) => {}
            Err(_) => return Ok(()),
        }
        while let Ok(evt) = event_rx.try_recv() {
            if let UiEvent::Input(ev) = evt {
                pending_inputs.push(ev);
            }
        }

        // Inputs first so user commands never wait behind worker output
        for input in pending_inputs {
            if let Event::Key(key) = input {
                if key.kind == KeyEventKind::Press {
                    handle_key(key, state);
                }
            }
            if state.should_quit {
                return Ok(());
            }
        }

        state.pump_worker();

        terminal.draw(|frame| {
            Dashboard::render(frame, state);

            if let Some(ref mut picker) = state.picker {
                FolderPicker::render(frame, picker);
            }
            if let Some(ref modal) = state.modal {
                ModalView::render(frame, modal);
            }
        })?;
    }
}

fn is_force_quit(key: &KeyEvent) -> bool {
    key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)
}

pub fn handle_key(key: KeyEvent, state: &mut AppState) {
    if is_force_quit(&key) {
        state.confirm_quit();
        return;
    }

    // Overlays take all input while open
    if state.modal.is_some() {
        modal::handle_modal_key(key, state);
        return;
    }
    if state.picker.is_some() {
        picker::handle_picker_key(key, state);
        return;
    }

    dashboard::handle_dashboard_key(key, state);
}
