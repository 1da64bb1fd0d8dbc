//! Maps physical key events to registered actions.
//!
//! The dispatcher is an ordered table of combo/action pairs evaluated
//! synchronously per event. Registration order is authoritative: the first
//! combo whose modifier flags match exactly and whose base key matches wins,
//! and nothing after it fires. More specific combos therefore go first.

use serde::Deserialize;
use std::fmt;

/// Combos that stay live while a text-entry control has focus. Everything
/// else is suppressed there so typed text cannot trigger navigation.
const TEXT_INPUT_ALLOWLIST: &[&str] = &["escape", "ctrl+a", "ctrl+f"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
    pub meta: bool,
}

/// A normalized modifier-flags + base-key identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyCombo {
    pub modifiers: Modifiers,
    keys: Vec<String>,
}

impl KeyCombo {
    /// Parses a `"ctrl+shift+e"`-style string. `cmd` is a synonym for
    /// `meta`; unknown parts are treated as base keys.
    pub fn parse(combo: &str) -> Self {
        let parts: Vec<String> = combo.to_lowercase().split('+').map(str::to_string).collect();
        let modifiers = Modifiers {
            ctrl: parts.iter().any(|p| p == "ctrl"),
            shift: parts.iter().any(|p| p == "shift"),
            alt: parts.iter().any(|p| p == "alt"),
            meta: parts.iter().any(|p| p == "meta" || p == "cmd"),
        };
        let keys = parts
            .into_iter()
            .filter(|p| !matches!(p.as_str(), "ctrl" | "shift" | "alt" | "meta" | "cmd"))
            .collect();
        Self { modifiers, keys }
    }

    /// Modifier-exact match: all four flags must equal the event's state,
    /// not just the ones named in the combo.
    pub fn matches(&self, event: &KeyEvent) -> bool {
        if event.ctrl != self.modifiers.ctrl
            || event.shift != self.modifiers.shift
            || event.alt != self.modifiers.alt
            || event.meta != self.modifiers.meta
        {
            return false;
        }

        let event_key = event.key.to_lowercase();
        let event_code = event.code.to_lowercase();
        self.keys.iter().any(|key| match key.as_str() {
            "space" => event_key == " ",
            "enter" | "escape" | "delete" | "backspace" | "tab" => event_key == *key,
            // Function keys only match via the physical code.
            k if k.starts_with('f') && k.len() > 1 => event_code == *k,
            k => event_key == k,
        })
    }
}

impl fmt::Display for KeyCombo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.modifiers.ctrl {
            write!(f, "⌃")?;
        }
        if self.modifiers.shift {
            write!(f, "⇧")?;
        }
        if self.modifiers.alt {
            write!(f, "⌥")?;
        }
        if self.modifiers.meta {
            write!(f, "⌘")?;
        }
        for key in &self.keys {
            match key.as_str() {
                "enter" => write!(f, "↵")?,
                "escape" => write!(f, "Esc")?,
                "delete" => write!(f, "Del")?,
                "backspace" => write!(f, "⌫")?,
                "space" => write!(f, "Space")?,
                "tab" => write!(f, "⇥")?,
                other => write!(f, "{}", other.to_uppercase())?,
            }
        }
        Ok(())
    }
}

/// A physical key-down event as delivered by the host UI.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct KeyEvent {
    /// The logical key value, e.g. `"e"`, `"Enter"`, `" "`.
    pub key: String,
    /// The physical key code, e.g. `"KeyE"`, `"F5"`.
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub ctrl: bool,
    #[serde(default)]
    pub shift: bool,
    #[serde(default)]
    pub alt: bool,
    #[serde(default)]
    pub meta: bool,
    /// Whether the focused element is a text-entry control.
    #[serde(default)]
    pub is_text_input: bool,
}

impl KeyEvent {
    pub fn plain(key: &str) -> Self {
        Self {
            key: key.to_string(),
            ..Self::default()
        }
    }

    pub fn ctrl(key: &str) -> Self {
        Self {
            key: key.to_string(),
            ctrl: true,
            ..Self::default()
        }
    }
}

/// The closed set of actions a hotkey can invoke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HotkeyAction {
    Refresh,
    ExpandAll,
    CollapseAll,
    ToggleTheme,
}

#[derive(Debug, Clone)]
pub struct Hotkey {
    pub combo: KeyCombo,
    pub action: HotkeyAction,
    pub description: String,
    pub category: Option<String>,
    /// Matched events suppress the host's default handling unless the
    /// registration opts out.
    pub prevent_default: bool,
}

impl Hotkey {
    pub fn new(combo: &str, action: HotkeyAction, description: &str) -> Self {
        Self {
            combo: KeyCombo::parse(combo),
            action,
            description: description.to_string(),
            category: None,
            prevent_default: true,
        }
    }

    pub fn category(mut self, category: &str) -> Self {
        self.category = Some(category.to_string());
        self
    }

    pub fn allow_default(mut self) -> Self {
        self.prevent_default = false;
        self
    }
}

/// The outcome of a matched dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dispatch {
    pub action: HotkeyAction,
    pub prevent_default: bool,
}

#[derive(Debug, Default)]
pub struct HotkeyRegistry {
    bindings: Vec<Hotkey>,
}

impl HotkeyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The stock binding table.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(
            Hotkey::new("ctrl+r", HotkeyAction::Refresh, "Refresh current folder")
                .category("Navigation"),
        );
        registry.register(
            Hotkey::new("f5", HotkeyAction::Refresh, "Refresh current folder")
                .category("Navigation"),
        );
        registry.register(
            Hotkey::new("ctrl+e", HotkeyAction::ExpandAll, "Expand all folders").category("View"),
        );
        registry.register(
            Hotkey::new(
                "ctrl+shift+e",
                HotkeyAction::CollapseAll,
                "Collapse all folders",
            )
            .category("View"),
        );
        registry
            .register(Hotkey::new("ctrl+t", HotkeyAction::ToggleTheme, "Toggle theme").category("View"));
        registry
    }

    pub fn register(&mut self, hotkey: Hotkey) {
        self.bindings.push(hotkey);
    }

    /// The registered table in registration order, for help-panel rendering.
    pub fn bindings(&self) -> &[Hotkey] {
        &self.bindings
    }

    /// Resolves a key-down event to at most one action.
    pub fn dispatch(&self, event: &KeyEvent) -> Option<Dispatch> {
        if event.is_text_input
            && !TEXT_INPUT_ALLOWLIST
                .iter()
                .any(|combo| KeyCombo::parse(combo).matches(event))
        {
            return None;
        }

        self.bindings
            .iter()
            .find(|hotkey| hotkey.combo.matches(event))
            .map(|hotkey| Dispatch {
                action: hotkey.action,
                prevent_default: hotkey.prevent_default,
            })
    }
}
