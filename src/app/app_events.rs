use std::time::Instant;

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::app_state::App;

impl App {
    pub fn handle_key_event(&mut self, key: KeyEvent, now: Instant) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            if self.is_editing() {
                self.cancel();
            }
            self.quit();
            return;
        }

        if self.is_editing() {
            self.handle_editor_key(key, now);
        } else {
            self.handle_grid_key(key);
        }
    }

    fn handle_grid_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.quit(),
            KeyCode::Up => self.move_selection(-1),
            KeyCode::Down => self.move_selection(1),
            KeyCode::PageUp => self.move_selection(-page(self)),
            KeyCode::PageDown => self.move_selection(page(self)),
            KeyCode::Enter | KeyCode::F(2) => self.start_editing(None, &key),
            KeyCode::Delete | KeyCode::Backspace => self.clear_selected(),
            KeyCode::Char(c)
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                self.start_editing(Some(&c.to_string()), &key);
            }
            _ => {}
        }
    }

    fn handle_editor_key(&mut self, key: KeyEvent, now: Instant) {
        match key.code {
            KeyCode::Up | KeyCode::Down => {
                if self.editor.allow_key_event_propagation(key.code) {
                    let list = self.editor.widget_mut();
                    if key.code == KeyCode::Down {
                        list.select_next();
                    } else {
                        list.select_previous();
                    }
                } else {
                    // Past either end of the dropdown the grid takes over
                    self.commit();
                    self.move_selection(if key.code == KeyCode::Down { 1 } else { -1 });
                }
            }
            KeyCode::Enter => self.commit(),
            KeyCode::Tab => {
                self.commit();
                self.move_selection(1);
            }
            KeyCode::Esc => self.cancel(),
            _ => {
                self.editor.host_mut().input(key);
                self.editor.on_keystroke(&key, now);
            }
        }
    }
}

fn page(app: &App) -> isize {
    app.grid_area().height.max(1) as isize
}

#[cfg(test)]
#[path = "app_events_tests.rs"]
mod app_events_tests;
