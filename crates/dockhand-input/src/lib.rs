// Panel hotkeys
// Matches key presses captured at a panel boundary against the tab-cycling
// bindings, with user overrides layered over the defaults.

mod tests;

use dockhand_core::{Key, Modifiers};
use serde::{Deserialize, Serialize};

// ──────────────────────────────────────────────
// Actions
// ──────────────────────────────────────────────

/// Actions a panel handles itself, ahead of its frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PanelHotkey {
    NextTab,
    PrevTab,
}

impl PanelHotkey {
    pub fn all_actions() -> Vec<PanelHotkey> {
        vec![PanelHotkey::NextTab, PanelHotkey::PrevTab]
    }

    pub fn action_key(&self) -> &'static str {
        match self {
            PanelHotkey::NextTab => "next_tab",
            PanelHotkey::PrevTab => "prev_tab",
        }
    }

    pub fn from_action_key(key: &str) -> Option<PanelHotkey> {
        match key {
            "next_tab" => Some(PanelHotkey::NextTab),
            "prev_tab" => Some(PanelHotkey::PrevTab),
            _ => None,
        }
    }
}

// ──────────────────────────────────────────────
// Hotkey
// ──────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Hotkey {
    pub key: Key,
    pub shift: bool,
    pub ctrl: bool,
    pub meta: bool,
    pub alt: bool,
}

impl Hotkey {
    pub fn new(key: Key, shift: bool, ctrl: bool, meta: bool, alt: bool) -> Self {
        Self {
            key: normalize_key(key),
            shift,
            ctrl,
            meta,
            alt,
        }
    }

    /// Modifiers must match exactly, so Ctrl+Shift+Tab never fires the
    /// Ctrl+Tab binding.
    pub fn matches(&self, key: Key, modifiers: Modifiers) -> bool {
        self.key == normalize_key(key)
            && self.shift == modifiers.shift
            && self.ctrl == modifiers.ctrl
            && self.meta == modifiers.meta
            && self.alt == modifiers.alt
    }

    pub fn key_from_name(name: &str) -> Option<Key> {
        let lower = name.to_ascii_lowercase();
        let key = match lower.as_str() {
            "tab" => Key::Tab,
            "enter" | "return" => Key::Enter,
            "escape" | "esc" => Key::Escape,
            "backspace" => Key::Backspace,
            "delete" => Key::Delete,
            "insert" => Key::Insert,
            "up" => Key::Up,
            "down" => Key::Down,
            "left" => Key::Left,
            "right" => Key::Right,
            "home" => Key::Home,
            "end" => Key::End,
            "pageup" => Key::PageUp,
            "pagedown" => Key::PageDown,
            _ => {
                let mut chars = lower.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Key::Char(c),
                    (Some('f'), Some(_)) => Key::F(lower[1..].parse().ok()?),
                    _ => return None,
                }
            }
        };
        Some(normalize_key(key))
    }

    pub fn key_name(&self) -> String {
        match self.key {
            Key::Char(c) => c.to_string(),
            Key::Tab => "tab".into(),
            Key::Enter => "enter".into(),
            Key::Escape => "escape".into(),
            Key::Backspace => "backspace".into(),
            Key::Delete => "delete".into(),
            Key::Insert => "insert".into(),
            Key::Up => "up".into(),
            Key::Down => "down".into(),
            Key::Left => "left".into(),
            Key::Right => "right".into(),
            Key::Home => "home".into(),
            Key::End => "end".into(),
            Key::PageUp => "pageup".into(),
            Key::PageDown => "pagedown".into(),
            Key::F(n) => format!("f{}", n),
        }
    }
}

/// Fold shifted punctuation and letter case onto the physical key, so that
/// Cmd+Shift+] matches whether the platform reports ']' or '}'.
fn normalize_key(key: Key) -> Key {
    match key {
        Key::Char('{') => Key::Char('['),
        Key::Char('}') => Key::Char(']'),
        Key::Char(c) => Key::Char(c.to_ascii_lowercase()),
        other => other,
    }
}

// ──────────────────────────────────────────────
// Overrides (settings.json)
// ──────────────────────────────────────────────

/// A single keybinding override as stored in settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeybindingOverride {
    pub action: String,
    pub key: String,
    #[serde(default)]
    pub shift: bool,
    #[serde(default)]
    pub ctrl: bool,
    #[serde(default)]
    pub meta: bool,
    #[serde(default)]
    pub alt: bool,
}

impl KeybindingOverride {
    pub fn to_binding(&self) -> Option<(Hotkey, PanelHotkey)> {
        let action = PanelHotkey::from_action_key(&self.action)?;
        let key = Hotkey::key_from_name(&self.key)?;
        Some((Hotkey::new(key, self.shift, self.ctrl, self.meta, self.alt), action))
    }

    pub fn from_binding(hotkey: &Hotkey, action: &PanelHotkey) -> Self {
        Self {
            action: action.action_key().to_string(),
            key: hotkey.key_name(),
            shift: hotkey.shift,
            ctrl: hotkey.ctrl,
            meta: hotkey.meta,
            alt: hotkey.alt,
        }
    }
}

// ──────────────────────────────────────────────
// KeybindingMap
// ──────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct KeybindingMap {
    bindings: Vec<(Hotkey, PanelHotkey)>,
}

impl KeybindingMap {
    pub fn new() -> Self {
        Self {
            bindings: Self::default_bindings(),
        }
    }

    /// Cmd+Shift+] / Ctrl+Tab cycle forward, Cmd+Shift+[ / Ctrl+Shift+Tab
    /// cycle backward.
    pub fn default_bindings() -> Vec<(Hotkey, PanelHotkey)> {
        vec![
            (Hotkey::new(Key::Char(']'), true, false, true, false), PanelHotkey::NextTab),
            (Hotkey::new(Key::Tab, false, true, false, false), PanelHotkey::NextTab),
            (Hotkey::new(Key::Char('['), true, false, true, false), PanelHotkey::PrevTab),
            (Hotkey::new(Key::Tab, true, true, false, false), PanelHotkey::PrevTab),
        ]
    }

    /// Defaults with every overridden action rebound to its override keys.
    pub fn with_overrides(overrides: Vec<(Hotkey, PanelHotkey)>) -> Self {
        let mut bindings: Vec<(Hotkey, PanelHotkey)> = Self::default_bindings()
            .into_iter()
            .filter(|(_, action)| !overrides.iter().any(|(_, o)| o == action))
            .collect();
        bindings.extend(overrides);
        Self { bindings }
    }

    /// Build from raw settings entries, skipping any that do not resolve.
    pub fn from_settings(entries: &[KeybindingOverride]) -> Self {
        if entries.is_empty() {
            return Self::new();
        }
        let overrides = entries
            .iter()
            .filter_map(|entry| {
                let binding = entry.to_binding();
                if binding.is_none() {
                    log::warn!(
                        "Ignoring keybinding override {:?} -> {:?}",
                        entry.action,
                        entry.key
                    );
                }
                binding
            })
            .collect();
        Self::with_overrides(overrides)
    }

    pub fn hotkey_for(&self, action: &PanelHotkey) -> Option<&Hotkey> {
        self.bindings
            .iter()
            .find(|(_, a)| a == action)
            .map(|(h, _)| h)
    }

    pub fn match_key(&self, key: Key, modifiers: Modifiers) -> Option<PanelHotkey> {
        self.bindings
            .iter()
            .find(|(hotkey, _)| hotkey.matches(key, modifiers))
            .map(|(_, action)| *action)
    }
}

impl Default for KeybindingMap {
    fn default() -> Self {
        Self::new()
    }
}
