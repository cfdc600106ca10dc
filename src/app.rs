use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::backend::{Endpoint, RepositoryRecord};
use crate::config::Config;
use crate::dashboard::Dashboard;
use crate::keybinds::Keybinds;
use crate::poller::PollEvent;
use crate::theme::{ThemePalette, resolve_theme};

mod input;
mod selection;

const PAGE_ROWS: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppAction {
    TriggerUpdate,
    Refresh,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    EditingFilter,
}

pub struct App {
    dashboard: Dashboard,
    keybinds: Keybinds,
    theme: &'static ThemePalette,
    base_url: String,
    input_mode: InputMode,
    selected: usize,
    selected_name: Option<String>,
    help_visible: bool,
    status: String,
    pending_action: Option<AppAction>,
    should_quit: bool,
}

impl App {
    pub fn new(config: &Config) -> Self {
        let dashboard = Dashboard::new(
            config.filters.clone(),
            config.waiting_mode,
            config.stale_after(),
        );
        Self {
            dashboard,
            keybinds: Keybinds::from_overrides(&config.keybinds),
            theme: resolve_theme(config.theme.as_deref()),
            base_url: config.base_url.clone(),
            input_mode: InputMode::Normal,
            selected: 0,
            selected_name: None,
            help_visible: false,
            status: String::new(),
            pending_action: None,
            should_quit: false,
        }
    }

    pub fn dashboard(&self) -> &Dashboard {
        &self.dashboard
    }

    pub fn keybinds(&self) -> &Keybinds {
        &self.keybinds
    }

    pub fn theme(&self) -> &'static ThemePalette {
        self.theme
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    pub fn input_mode(&self) -> InputMode {
        self.input_mode
    }

    pub fn help_visible(&self) -> bool {
        self.help_visible
    }

    pub fn status(&self) -> &str {
        self.status.as_str()
    }

    pub fn set_status(&mut self, status: impl Into<String>) {
        self.status = status.into();
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn take_action(&mut self) -> Option<AppAction> {
        self.pending_action.take()
    }

    pub fn apply_poll_event(&mut self, event: PollEvent) {
        match &event {
            PollEvent::UpdateTriggered => self.set_status("Backend update started"),
            PollEvent::FetchFailed {
                endpoint: Endpoint::TriggerUpdate,
                message,
            } => self.set_status(format!("Update request failed: {}", message)),
            _ => {}
        }
        let repos_changed = matches!(event, PollEvent::ReposFetched(_));
        self.dashboard.apply(event);
        if repos_changed {
            self.sync_selection();
        }
    }

    pub fn on_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }
        match self.input_mode {
            InputMode::Normal => self.on_normal_key(key),
            InputMode::EditingFilter => self.on_filter_key(key),
        }
    }

    pub fn selected_repo(&self) -> Option<&RepositoryRecord> {
        self.dashboard.filtered_rows().get(self.selected).copied()
    }
}
