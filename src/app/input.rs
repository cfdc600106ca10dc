use super::*;

impl App {
    pub(super) fn on_normal_key(&mut self, key: KeyEvent) {
        let Some(key) = self.keybinds.remap_key(key) else {
            return;
        };
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        if self.help_visible {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')) {
                self.help_visible = false;
            }
            return;
        }

        match key.code {
            KeyCode::Char('u') if ctrl => self.clear_filter(),
            _ if ctrl => {}
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('?') => self.help_visible = true,
            KeyCode::Char('/') => {
                self.input_mode = InputMode::EditingFilter;
            }
            KeyCode::Esc => {
                if !self.dashboard.filters().filter_text.is_empty() {
                    self.clear_filter();
                }
            }
            KeyCode::Char('a') => {
                let filters = self.dashboard.filters_mut();
                filters.hide_archived = !filters.hide_archived;
                let hidden = filters.hide_archived;
                self.after_filter_change();
                self.set_status(if hidden {
                    "Hiding archived repositories"
                } else {
                    "Showing archived repositories"
                });
            }
            KeyCode::Char('i') => {
                let filters = self.dashboard.filters_mut();
                filters.require_open_issues = !filters.require_open_issues;
                let required = filters.require_open_issues;
                self.after_filter_change();
                self.set_status(if required {
                    "Only repositories with open issues"
                } else {
                    "Including repositories without open issues"
                });
            }
            KeyCode::Char('p') => {
                let filters = self.dashboard.filters_mut();
                filters.require_open_prs = !filters.require_open_prs;
                let required = filters.require_open_prs;
                self.after_filter_change();
                self.set_status(if required {
                    "Only repositories with open pull requests"
                } else {
                    "Including repositories without open pull requests"
                });
            }
            KeyCode::Char('u') => {
                self.dashboard.begin_backend_update();
                self.pending_action = Some(AppAction::TriggerUpdate);
                self.set_status("Requesting backend update...");
            }
            KeyCode::Char('r') => {
                self.pending_action = Some(AppAction::Refresh);
                self.set_status("Refreshing...");
            }
            KeyCode::Char('j') | KeyCode::Down => self.move_selection(1),
            KeyCode::Char('k') | KeyCode::Up => self.move_selection(-1),
            KeyCode::PageDown => self.move_selection(PAGE_ROWS as isize),
            KeyCode::PageUp => self.move_selection(-(PAGE_ROWS as isize)),
            KeyCode::Char('g') | KeyCode::Home => self.jump_to_top(),
            KeyCode::Char('G') | KeyCode::End => self.jump_to_bottom(),
            _ => {}
        }
    }

    pub(super) fn on_filter_key(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Enter => self.input_mode = InputMode::Normal,
            KeyCode::Esc => {
                self.input_mode = InputMode::Normal;
                self.clear_filter();
            }
            KeyCode::Char('u') if ctrl => self.clear_filter(),
            KeyCode::Backspace => {
                if self.dashboard.filters_mut().filter_text.pop().is_some() {
                    self.after_filter_change();
                }
            }
            KeyCode::Char(ch) if !ctrl => {
                self.dashboard.filters_mut().filter_text.push(ch);
                self.after_filter_change();
            }
            _ => {}
        }
    }

    fn clear_filter(&mut self) {
        if self.dashboard.filters().filter_text.is_empty() {
            return;
        }
        self.dashboard.filters_mut().filter_text.clear();
        self.after_filter_change();
    }

    fn after_filter_change(&mut self) {
        tracing::debug!(filters = ?self.dashboard.filters(), "filters changed");
        self.sync_selection();
    }
}
