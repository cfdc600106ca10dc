use std::collections::{HashMap, HashSet};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

pub struct BindingSpec {
    pub action: &'static str,
    pub default: &'static str,
    pub description: &'static str,
}

pub const BINDING_SPECS: &[BindingSpec] = &[
    BindingSpec { action: "quit", default: "q", description: "Quit" },
    BindingSpec { action: "edit_filter", default: "/", description: "Edit name/owner filter" },
    BindingSpec { action: "clear_filter", default: "ctrl+u", description: "Clear filter text" },
    BindingSpec {
        action: "toggle_hide_archived",
        default: "a",
        description: "Hide/show archived repositories",
    },
    BindingSpec {
        action: "toggle_require_issues",
        default: "i",
        description: "Only repositories with open issues",
    },
    BindingSpec {
        action: "toggle_require_prs",
        default: "p",
        description: "Only repositories with open pull requests",
    },
    BindingSpec {
        action: "trigger_update",
        default: "u",
        description: "Ask the backend to refresh",
    },
    BindingSpec { action: "refresh", default: "r", description: "Fetch now" },
    BindingSpec { action: "move_down", default: "j", description: "Next row" },
    BindingSpec { action: "move_up", default: "k", description: "Previous row" },
    BindingSpec { action: "jump_top", default: "g", description: "First row" },
    BindingSpec { action: "jump_bottom", default: "shift+g", description: "Last row" },
    BindingSpec { action: "help", default: "?", description: "Toggle help" },
];

/// Translates user-configured bindings back to the default key for each
/// action, so the rest of the app only matches on defaults.
#[derive(Debug, Default, Clone)]
pub struct Keybinds {
    remap: HashMap<String, KeyEvent>,
    disabled_defaults: HashSet<String>,
}

impl Keybinds {
    pub fn from_overrides(overrides: &HashMap<String, String>) -> Self {
        let mut remap = HashMap::new();
        let mut disabled_defaults = HashSet::new();

        for spec in BINDING_SPECS {
            let Some(default_event) = parse_binding(spec.default) else {
                continue;
            };
            let default_key = normalize_event(default_event);
            let override_key = overrides
                .get(spec.action)
                .and_then(|binding| normalize_binding(binding));

            match override_key {
                Some(override_key) => {
                    if override_key != default_key {
                        disabled_defaults.insert(default_key);
                    }
                    remap.insert(override_key, default_event);
                }
                None => {
                    remap.insert(default_key, default_event);
                }
            }
        }

        // A default freed by one override may be claimed by another action.
        disabled_defaults.retain(|key| !remap.contains_key(key));

        Self {
            remap,
            disabled_defaults,
        }
    }

    pub fn remap_key(&self, key: KeyEvent) -> Option<KeyEvent> {
        let normalized = normalize_event(key);
        if let Some(mapped) = self.remap.get(normalized.as_str()) {
            return Some(KeyEvent::new(mapped.code, mapped.modifiers));
        }
        if self.disabled_defaults.contains(normalized.as_str()) {
            return None;
        }
        Some(key)
    }

    /// Current binding for `action`, for the help overlay.
    pub fn binding_for(&self, action: &str) -> Option<String> {
        let spec = BINDING_SPECS.iter().find(|spec| spec.action == action)?;
        let default_event = parse_binding(spec.default)?;
        self.remap
            .iter()
            .filter(|(_, mapped)| **mapped == default_event)
            .map(|(binding, _)| binding.clone())
            .min_by_key(|binding| (binding != &normalize_event(default_event), binding.clone()))
    }
}

pub fn parse_binding(binding: &str) -> Option<KeyEvent> {
    let tokens = binding
        .split('+')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .collect::<Vec<&str>>();
    let (key_token_raw, modifier_tokens) = tokens.split_last()?;

    let mut modifiers = KeyModifiers::empty();
    for token in modifier_tokens {
        modifiers |= match token.to_ascii_lowercase().as_str() {
            "ctrl" | "control" => KeyModifiers::CONTROL,
            "alt" => KeyModifiers::ALT,
            "shift" => KeyModifiers::SHIFT,
            _ => return None,
        };
    }

    let code = match key_token_raw.to_ascii_lowercase().as_str() {
        "esc" | "escape" => KeyCode::Esc,
        "enter" | "return" => KeyCode::Enter,
        "tab" => KeyCode::Tab,
        "backspace" => KeyCode::Backspace,
        "space" => KeyCode::Char(' '),
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "home" => KeyCode::Home,
        "end" => KeyCode::End,
        "pageup" => KeyCode::PageUp,
        "pagedown" => KeyCode::PageDown,
        _ => {
            let mut chars = key_token_raw.chars();
            let ch = chars.next()?;
            if chars.next().is_some() {
                return None;
            }
            if modifiers.contains(KeyModifiers::SHIFT) && ch.is_ascii_alphabetic() {
                KeyCode::Char(ch.to_ascii_uppercase())
            } else {
                KeyCode::Char(ch.to_ascii_lowercase())
            }
        }
    };

    Some(KeyEvent::new(code, modifiers))
}

pub fn normalize_binding(binding: &str) -> Option<String> {
    parse_binding(binding).map(normalize_event)
}

pub fn normalize_event(event: KeyEvent) -> String {
    let mut modifiers = event.modifiers;
    // Terminals report `G` as shift+G, `?` sometimes as shift+?; fold the
    // uppercase form into an explicit shift.
    if let KeyCode::Char(c) = event.code {
        if c.is_ascii_uppercase() {
            modifiers |= KeyModifiers::SHIFT;
        } else if !c.is_ascii_alphanumeric() {
            modifiers.remove(KeyModifiers::SHIFT);
        }
    }

    let key = match event.code {
        KeyCode::Esc => "esc".to_string(),
        KeyCode::Enter => "enter".to_string(),
        KeyCode::Tab => "tab".to_string(),
        KeyCode::Backspace => "backspace".to_string(),
        KeyCode::Up => "up".to_string(),
        KeyCode::Down => "down".to_string(),
        KeyCode::Home => "home".to_string(),
        KeyCode::End => "end".to_string(),
        KeyCode::PageUp => "pageup".to_string(),
        KeyCode::PageDown => "pagedown".to_string(),
        KeyCode::Char(' ') => "space".to_string(),
        KeyCode::Char(c) => c.to_ascii_lowercase().to_string(),
        _ => return String::new(),
    };

    let mut tokens = Vec::new();
    if modifiers.contains(KeyModifiers::CONTROL) {
        tokens.push("ctrl".to_string());
    }
    if modifiers.contains(KeyModifiers::ALT) {
        tokens.push("alt".to_string());
    }
    if modifiers.contains(KeyModifiers::SHIFT) {
        tokens.push("shift".to_string());
    }
    tokens.push(key);
    tokens.join("+")
}
