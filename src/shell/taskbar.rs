// Taskbar: one button per open window plus the user's display toggles

use serde::{Deserialize, Serialize};

use crate::state::window::WindowRecord;
use crate::state::WindowManager;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskbarEntry {
    pub id: String,
    pub title: String,
    pub icon: String,
    pub active: bool,
    pub minimized: bool,
}

/// Entries in registry (open) order
pub fn entries(wm: &WindowManager) -> Vec<TaskbarEntry> {
    wm.windows()
        .iter()
        .map(|w| TaskbarEntry {
            id: w.id.clone(),
            title: w.title.clone(),
            icon: w.icon.clone(),
            active: wm.focused() == Some(w.id.as_str()),
            minimized: w.minimized,
        })
        .collect()
}

/// Taskbar button click: bring back a minimized or background window,
/// minimize the one already in front.
pub fn click(wm: &mut WindowManager, id: &str) -> Option<WindowRecord> {
    let window = wm.window(id)?;
    if window.minimized || wm.focused() != Some(id) {
        wm.restore(id)
    } else {
        wm.minimize(id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TaskbarConfig {
    pub show_app_names: bool,
    pub show_clock: bool,
    pub enable_calendar: bool,
}

impl Default for TaskbarConfig {
    fn default() -> Self {
        Self {
            show_app_names: true,
            show_clock: true,
            enable_calendar: true,
        }
    }
}

impl TaskbarConfig {
    /// Set one toggle by its settings-panel key. Returns false for unknown keys.
    pub fn update(&mut self, key: &str, value: bool) -> bool {
        match key {
            "showAppNames" => self.show_app_names = value,
            "showClock" => self.show_clock = value,
            "enableCalendar" => self.enable_calendar = value,
            _ => return false,
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::config::DesktopConfig;
    use crate::geometry::Viewport;
    use crate::launcher::AppCatalog;
    use crate::state::window::LaunchParams;

    fn manager_with(ids: &[&str]) -> WindowManager {
        let mut wm = WindowManager::new(
            Arc::new(AppCatalog::builtin()),
            DesktopConfig::default(),
            Viewport::new(1280.0, 800.0),
        );
        for id in ids {
            wm.open(id, LaunchParams::new());
        }
        wm
    }

    #[test]
    fn test_entries_follow_open_order_and_mark_active() {
        let mut wm = manager_with(&["about", "terminal"]);
        wm.focus("about");
        let entries = entries(&wm);
        let ids: Vec<&str> = entries.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["about", "terminal"]);
        assert!(entries[0].active);
        assert!(!entries[1].active);
    }

    #[test]
    fn test_click_cycles_front_window() {
        let mut wm = manager_with(&["about"]);
        assert!(click(&mut wm, "about").unwrap().minimized);
        assert!(!click(&mut wm, "about").unwrap().minimized);
        assert_eq!(wm.focused(), Some("about"));
    }

    #[test]
    fn test_click_on_background_window_raises_it() {
        let mut wm = manager_with(&["about", "terminal"]);
        let win = click(&mut wm, "about").unwrap();
        assert!(!win.minimized);
        assert_eq!(wm.focused(), Some("about"));
        assert!(click(&mut wm, "ghost").is_none());
    }

    #[test]
    fn test_config_update() {
        let mut cfg = TaskbarConfig::default();
        assert!(cfg.update("showClock", false));
        assert!(!cfg.show_clock);
        assert!(!cfg.update("showWeather", true));
    }
}
