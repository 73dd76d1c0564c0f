use super::*;

pub(super) fn handle_picker_key(key: KeyEvent, state: &mut AppState) {
    let Some(picker) = state.picker.as_mut() else {
        return;
    };

    match key.code {
        KeyCode::Up | KeyCode::Char('k') => picker.previous(),
        KeyCode::Down | KeyCode::Char('j') => picker.next(),
        KeyCode::Enter | KeyCode::Right => picker.enter(),
        KeyCode::Backspace | KeyCode::Left => picker.up(),
        KeyCode::Char(' ') => {
            let folder = picker.choice();
            state.picker = None;
            state.select_folder(folder);
        }
        KeyCode::Char('.') => {
            let folder = picker.dir.clone();
            state.picker = None;
            state.select_folder(folder);
        }
        KeyCode::Esc | KeyCode::Char('q') => state.picker = None,
        _ => {}
    }
}
