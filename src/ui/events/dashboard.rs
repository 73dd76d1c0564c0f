use super::*;
use crate::ui::focus::FormFocus;

pub(super) fn handle_dashboard_key(key: KeyEvent, state: &mut AppState) {
    if state.is_running() {
        handle_running_key(key, state);
    } else {
        handle_idle_key(key, state);
    }
}

// Configuration is locked while a batch runs; only stop and quit are live
fn handle_running_key(key: KeyEvent, state: &mut AppState) {
    match key.code {
        KeyCode::Char('x') | KeyCode::Char('X') | KeyCode::Esc => state.stop_conversion(),
        KeyCode::Char('q') | KeyCode::Char('Q') => state.request_quit(),
        _ => {}
    }
}

fn handle_idle_key(key: KeyEvent, state: &mut AppState) {
    match key.code {
        KeyCode::Tab | KeyCode::Down => {
            state.focus = state.focus.next();
            return;
        }
        KeyCode::BackTab | KeyCode::Up => {
            state.focus = state.focus.prev();
            return;
        }
        KeyCode::F(5) => {
            state.start_conversion();
            return;
        }
        _ => {}
    }

    if state.focus.is_text_input() {
        handle_size_field_key(key, state);
        return;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') => state.request_quit(),
        KeyCode::Char('s') | KeyCode::Char('S') => state.start_conversion(),
        KeyCode::Enter | KeyCode::Char(' ') => match state.focus {
            FormFocus::Folder => open_picker(state),
            FormFocus::Preset => state.form.preset = state.form.preset.toggled(),
            FormFocus::SizeCap => {}
        },
        KeyCode::Left | KeyCode::Right if state.focus == FormFocus::Preset => {
            state.form.preset = state.form.preset.toggled();
        }
        _ => {}
    }
}

// Any printable character is accepted here; the value is validated on start
fn handle_size_field_key(key: KeyEvent, state: &mut AppState) {
    match key.code {
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            state.form.size_input.push(c);
        }
        KeyCode::Backspace => {
            state.form.size_input.pop();
        }
        KeyCode::Enter => state.start_conversion(),
        KeyCode::Esc => state.focus = FormFocus::Folder,
        _ => {}
    }
}

fn open_picker(state: &mut AppState) {
    let start = state
        .form
        .folder
        .clone()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."));
    state.picker = Some(FolderPicker::new(&start));
}
