use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::{App, Focus, form_state::FormField, ui_helpers};

impl App {
    pub(super) fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return true;
        }
        self.status = None;

        match key.code {
            KeyCode::Tab => {
                self.toggle_focus();
                false
            }
            _ if self.in_form() => {
                self.handle_form_key(key);
                false
            }
            _ => self.handle_list_key(key),
        }
    }

    fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Form if !self.store.is_empty_activities() => Focus::List,
            _ => Focus::Form,
        };
        self.clamp_selection();
    }

    fn handle_form_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                if self.is_editing() {
                    self.store.cancel_edit();
                    self.set_status("Edit cancelled");
                }
                self.form.clear();
            }
            KeyCode::Up | KeyCode::BackTab => self.form.prev_field(),
            KeyCode::Down => self.form.next_field(),
            KeyCode::Left | KeyCode::Right if self.form.field == FormField::Category => {
                self.form.toggle_category();
            }
            KeyCode::Enter => self.submit_form(),
            KeyCode::Backspace => self.form.pop_char(),
            KeyCode::Char(c) => self.form.push_char(c),
            _ => {}
        }
    }

    fn handle_list_key(&mut self, key: KeyEvent) -> bool {
        let len = self.store.activities().len();

        match key.code {
            KeyCode::Char('q') => return true,
            KeyCode::Esc => self.focus = Focus::Form,
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected_index = ui_helpers::wrap_prev_index(self.selected_index, len);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.selected_index = ui_helpers::wrap_next_index(self.selected_index, len);
            }
            KeyCode::Enter | KeyCode::Char('e') => self.edit_selected(),
            KeyCode::Delete | KeyCode::Char('x') => self.delete_selected(),
            KeyCode::Char('R') => self.restart(),
            _ => {}
        }
        false
    }

    fn submit_form(&mut self) {
        match self.form.to_draft() {
            Ok(draft) => {
                let editing = self.is_editing();
                self.store.save_activity(draft);
                self.form.clear();
                self.set_status(if editing {
                    "Activity updated"
                } else {
                    "Activity saved"
                });
            }
            Err(e) => self.set_status(e.to_string()),
        }
    }

    fn edit_selected(&mut self) {
        let Some(id) = self.selected_activity_id() else {
            return;
        };

        self.store.handle_edit(&id);
        if let Some(activity) = self.store.active_activity().cloned() {
            self.form.load(&activity);
            self.focus = Focus::Form;
            self.set_status(format!("Editing '{}'", activity.name));
        }
    }

    fn delete_selected(&mut self) {
        let Some(id) = self.selected_activity_id() else {
            return;
        };

        let was_editing = self.store.active_id() == Some(id.as_str());
        self.store.handle_delete(&id);
        if was_editing {
            self.form.clear();
        }
        self.clamp_selection();
        if self.store.is_empty_activities() {
            self.focus = Focus::Form;
        }
        self.set_status("Activity deleted");
    }

    fn restart(&mut self) {
        if !self.store.can_restart() {
            return;
        }
        self.store.restart_app();
        self.form.clear();
        self.selected_index = 0;
        self.focus = Focus::Form;
        self.set_status("All activities cleared");
    }
}
