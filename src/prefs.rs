use ratatui::style::Color;
use serde::{Deserialize, Serialize};

use crate::store::{self, KeyValueStore, StoreKey};

pub const THEMES: &[&str] = &["default", "nord", "dracula", "gruvbox", "solarized"];

#[derive(Clone, Copy)]
pub struct Theme {
    pub pomodoro_color: Color,
    pub short_color: Color,
    pub long_color: Color,
    pub border_color: Color,
    pub accent_color: Color,
}

pub fn get_theme(name: &str) -> Theme {
    match name {
        "nord" => Theme {
            pomodoro_color: Color::Rgb(136, 192, 208),
            short_color: Color::Rgb(163, 190, 140),
            long_color: Color::Rgb(180, 142, 173),
            border_color: Color::Rgb(94, 129, 172),
            accent_color: Color::Rgb(235, 203, 139),
        },
        "dracula" => Theme {
            pomodoro_color: Color::Rgb(189, 147, 249),
            short_color: Color::Rgb(80, 250, 123),
            long_color: Color::Rgb(139, 233, 253),
            border_color: Color::Rgb(98, 114, 164),
            accent_color: Color::Rgb(255, 121, 198),
        },
        "gruvbox" => Theme {
            pomodoro_color: Color::Rgb(254, 128, 25),
            short_color: Color::Rgb(184, 187, 38),
            long_color: Color::Rgb(131, 165, 152),
            border_color: Color::Rgb(213, 196, 161),
            accent_color: Color::Rgb(250, 189, 47),
        },
        "solarized" => Theme {
            pomodoro_color: Color::Rgb(42, 161, 152),
            short_color: Color::Rgb(133, 153, 0),
            long_color: Color::Rgb(108, 113, 196),
            border_color: Color::Rgb(38, 139, 210),
            accent_color: Color::Rgb(181, 137, 0),
        },
        _ => Theme {
            pomodoro_color: Color::Rgb(100, 181, 246),
            short_color: Color::Rgb(129, 199, 132),
            long_color: Color::Rgb(179, 157, 219),
            border_color: Color::Rgb(84, 110, 160),
            accent_color: Color::Rgb(255, 183, 77),
        },
    }
}

/// Look-and-feel choices, stored apart from the timer settings and saved
/// the moment they change.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct UiPrefs {
    #[serde(default = "default_theme")]
    pub theme: String,
}

fn default_theme() -> String {
    THEMES[0].to_string()
}

impl Default for UiPrefs {
    fn default() -> Self {
        Self {
            theme: default_theme(),
        }
    }
}

impl UiPrefs {
    pub fn load(store: &dyn KeyValueStore) -> Self {
        let mut prefs: UiPrefs = store::load_or_default(store, StoreKey::Preferences);
        prefs.theme = normalize_theme(&prefs.theme);
        prefs
    }

    pub fn save(&self, store: &dyn KeyValueStore) {
        if let Err(e) = store::save(store, StoreKey::Preferences, self) {
            tracing::warn!(error = %e, "could not persist preferences");
        }
    }

    pub fn cycle_theme(&mut self, forward: bool) {
        let idx = THEMES.iter().position(|&t| t == self.theme).unwrap_or(0);
        let len = THEMES.len();
        let next = if forward { (idx + 1) % len } else { (idx + len - 1) % len };
        self.theme = THEMES[next].to_string();
    }
}

pub fn normalize_theme(name: &str) -> String {
    let name = name.trim().to_lowercase();
    if THEMES.contains(&name.as_str()) {
        name
    } else {
        default_theme()
    }
}
