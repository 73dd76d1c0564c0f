// Tests for the dashboard shell: validation, run state and key handling

use crate::common::helpers::{FakeEncoder, source_folder};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ffbatch::engine::worker::BatchWorker;
use ffbatch::engine::{EncoderCommand, Preset};
use ffbatch::ui::{AppState, Dashboard, Modal, RunState, handle_key};
use ratatui::{Terminal, backend::TestBackend};
use std::thread;
use std::time::{Duration, Instant};

fn press(state: &mut AppState, code: KeyCode) {
    handle_key(KeyEvent::new(code, KeyModifiers::NONE), state);
}

fn type_text(state: &mut AppState, text: &str) {
    for c in text.chars() {
        press(state, KeyCode::Char(c));
    }
}

/// Pump worker messages until `done` holds or the timeout expires
fn pump_until(state: &mut AppState, done: impl Fn(&mut AppState) -> bool) -> bool {
    let deadline = Instant::now() + Duration::from_secs(20);
    while Instant::now() < deadline {
        state.pump_worker();
        if done(state) {
            return true;
        }
        thread::sleep(Duration::from_millis(10));
    }
    false
}

fn log_has(state: &AppState, needle: &str) -> bool {
    state.log.lines().any(|l| l.contains(needle))
}

fn idle_state() -> AppState {
    AppState::new(BatchWorker::new(EncoderCommand::default(), true))
}

#[test]
fn test_start_without_folder_warns() {
    let mut state = idle_state();

    state.start_conversion();

    assert_eq!(state.run_state, RunState::Idle);
    assert!(matches!(state.modal, Some(Modal::Warning { .. })));
    assert!(state.log.is_empty(), "Nothing should be logged");

    // Warning swallows keys until dismissed
    press(&mut state, KeyCode::Tab);
    assert_eq!(state.focus, ffbatch::ui::focus::FormFocus::Folder);
    press(&mut state, KeyCode::Enter);
    assert!(state.modal.is_none());
}

#[test]
fn test_invalid_size_warns_and_keeps_idle() {
    let folder = source_folder(&["a.mp4"]);
    let mut state = idle_state();
    state.select_folder(folder.path().to_path_buf());

    // Folder -> Preset -> Size, then replace the default "0"
    press(&mut state, KeyCode::Tab);
    press(&mut state, KeyCode::Tab);
    press(&mut state, KeyCode::Backspace);
    type_text(&mut state, "abc");
    assert_eq!(state.form.size_input, "abc");
    press(&mut state, KeyCode::Enter);

    assert_eq!(state.run_state, RunState::Idle);
    match &state.modal {
        Some(Modal::Warning { message, .. }) => assert!(message.contains("abc")),
        other => panic!("Expected a warning, got {:?}", other),
    }
}

#[test]
fn test_preset_toggles_with_arrow_keys() {
    let mut state = idle_state();
    assert_eq!(state.form.preset, Preset::VideoH264Aac);

    press(&mut state, KeyCode::Tab);
    press(&mut state, KeyCode::Right);
    assert_eq!(state.form.preset, Preset::AudioMp3);
    press(&mut state, KeyCode::Left);
    assert_eq!(state.form.preset, Preset::VideoH264Aac);
}

#[cfg(unix)]
#[test]
fn test_full_run_reaches_done() {
    let encoder = FakeEncoder::new();
    let folder = source_folder(&["a.mp4", "b.mkv"]);
    let mut state = AppState::new(BatchWorker::new(encoder.command(), true));
    state.select_folder(folder.path().to_path_buf());

    press(&mut state, KeyCode::F(5));
    assert!(state.is_running());
    assert!(!state.controls_enabled());

    // Form is locked while running
    press(&mut state, KeyCode::Tab);
    assert_eq!(state.focus, ffbatch::ui::focus::FormFocus::Folder);

    assert!(pump_until(&mut state, |s| !s.is_running()));
    assert_eq!(state.progress, 100);
    match &state.modal {
        Some(Modal::Done { summary }) => {
            assert_eq!(summary.converted, 2);
            assert_eq!(summary.failed, 0);
        }
        other => panic!("Expected the done dialog, got {:?}", other),
    }
    assert!(log_has(&state, "Conversion finished: 2 of 2 converted"));
    assert!(folder.path().join("converted_a.mp4").exists());
    assert!(folder.path().join("converted_b.mp4").exists());
}

#[cfg(unix)]
#[test]
fn test_stop_returns_to_idle_immediately() {
    let encoder = FakeEncoder::with_slow_secs(30);
    let folder = source_folder(&["slow.mp4"]);
    let mut state = AppState::new(BatchWorker::new(encoder.command(), true));
    state.select_folder(folder.path().to_path_buf());

    state.start_conversion();
    assert!(state.is_running());
    assert!(pump_until(&mut state, |s| log_has(s, "Running:")));

    press(&mut state, KeyCode::Char('x'));
    assert_eq!(state.run_state, RunState::Idle);
    assert!(state.controls_enabled());
    assert!(log_has(&state, "Conversion stopped!"));

    // The stopped job still reports in, but never reopens the done dialog
    assert!(pump_until(&mut state, |s| {
        log_has(s, "Interrupted") && !s.worker.is_busy()
    }));
    assert!(state.modal.is_none());
    assert_eq!(state.progress, 0);
    assert!(log_has(&state, "Interrupted slow.mp4"));
    assert!(!folder.path().join("converted_slow.mp4").exists());
}

#[cfg(unix)]
#[test]
fn test_quit_while_running_asks_first() {
    let encoder = FakeEncoder::with_slow_secs(30);
    let folder = source_folder(&["slow.mp4"]);
    let mut state = AppState::new(BatchWorker::new(encoder.command(), true));
    state.select_folder(folder.path().to_path_buf());
    state.start_conversion();

    press(&mut state, KeyCode::Char('q'));
    assert_eq!(state.modal, Some(Modal::QuitConfirm));
    assert!(!state.should_quit);

    press(&mut state, KeyCode::Char('n'));
    assert!(state.modal.is_none());
    assert!(state.is_running());

    press(&mut state, KeyCode::Char('q'));
    press(&mut state, KeyCode::Char('y'));
    assert!(state.should_quit);
    assert!(!state.worker.is_busy(), "Shutdown should join the worker");
}

#[cfg(unix)]
#[test]
fn test_quit_without_interrupt_still_kills_encoder() {
    let encoder = FakeEncoder::with_slow_secs(30);
    let folder = source_folder(&["slow.mp4"]);
    let mut state = AppState::new(BatchWorker::new(encoder.command(), false));
    state.select_folder(folder.path().to_path_buf());
    state.start_conversion();
    assert!(pump_until(&mut state, |s| log_has(s, "Running:")));

    press(&mut state, KeyCode::Char('q'));
    press(&mut state, KeyCode::Char('y'));

    assert!(state.should_quit);
    assert!(!state.worker.is_busy());
    assert!(!folder.path().join("converted_slow.mp4").exists());
    assert!(!folder.path().join("converted_slow.partial.mp4").exists());
}

#[cfg(unix)]
#[test]
fn test_job_finishing_under_quit_dialog_quits() {
    let encoder = FakeEncoder::new();
    let folder = source_folder(&["a.mp4"]);
    let mut state = AppState::new(BatchWorker::new(encoder.command(), true));
    state.select_folder(folder.path().to_path_buf());
    state.start_conversion();

    // Still running until the worker's messages are applied
    press(&mut state, KeyCode::Char('q'));
    assert_eq!(state.modal, Some(Modal::QuitConfirm));

    assert!(pump_until(&mut state, |s| s.should_quit));
    assert!(state.modal.is_none());
    assert!(log_has(&state, "Conversion finished: 1 of 1 converted"));
}

#[test]
fn test_quit_when_idle_is_immediate() {
    let mut state = idle_state();
    press(&mut state, KeyCode::Char('q'));
    assert!(state.should_quit);
    assert!(state.modal.is_none());
}

#[test]
fn test_picker_selects_subfolder() {
    let root = tempfile::TempDir::new().unwrap();
    std::fs::create_dir(root.path().join("clips")).unwrap();
    std::fs::create_dir(root.path().join(".hidden")).unwrap();

    let mut state = idle_state();
    state.form.folder = Some(root.path().to_path_buf());

    press(&mut state, KeyCode::Enter);
    let picker = state.picker.as_ref().expect("picker should open");
    assert_eq!(picker.entries, vec![root.path().join("clips")]);

    press(&mut state, KeyCode::Char(' '));
    assert!(state.picker.is_none());
    assert_eq!(state.form.folder, Some(root.path().join("clips")));
}

#[test]
fn test_dashboard_renders_form_and_footer() {
    let mut state = idle_state();
    state.log.push("hello from the log");

    let mut terminal = Terminal::new(TestBackend::new(120, 20)).unwrap();
    terminal
        .draw(|frame| Dashboard::render(frame, &state))
        .unwrap();

    let buffer = terminal.backend().buffer();
    let text: String = buffer.content().iter().map(|c| c.symbol()).collect();
    assert!(text.contains("Video Converter"));
    assert!(text.contains("MP4 (H.264 + AAC)"));
    assert!(text.contains("hello from the log"));
    assert!(text.contains("Start"));
}
