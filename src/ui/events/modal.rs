use super::*;
use crate::ui::state::Modal;

pub(super) fn handle_modal_key(key: KeyEvent, state: &mut AppState) {
    match state.modal {
        Some(Modal::QuitConfirm) => match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => state.confirm_quit(),
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => state.modal = None,
            _ => {}
        },
        Some(Modal::Warning { .. }) | Some(Modal::Done { .. }) => {
            if matches!(
                key.code,
                KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ') | KeyCode::Char('q')
            ) {
                state.modal = None;
            }
        }
        None => {}
    }
}
