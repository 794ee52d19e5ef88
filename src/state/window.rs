use serde::{Deserialize, Serialize};

use crate::geometry::{snap, Rect, Viewport};
use crate::launcher::ContentKind;

/// Free-form per-instance launch parameters (e.g. `initialTab` for settings)
pub type LaunchParams = serde_json::Map<String, serde_json::Value>;

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WindowRecord {
    pub id: String,           // App identifier, unique within the registry
    pub title: String,        // Window title
    pub icon: String,         // Icon asset reference
    pub content: ContentKind, // What to render
    pub bounds: Rect,         // Stored geometry (kept while maximized so restore can return to it)
    pub z_order: u64,         // Stacking order, higher paints on top
    pub minimized: bool,
    pub maximized: bool,
    pub closing: bool,        // Close animation running
    pub params: LaunchParams,
}

impl WindowRecord {
    pub fn new(
        id: String,
        title: String,
        icon: String,
        content: ContentKind,
        bounds: Rect,
        z_order: u64,
        params: LaunchParams,
    ) -> Self {
        Self {
            id,
            title,
            icon,
            content,
            bounds,
            z_order,
            minimized: false,
            maximized: false,
            closing: false,
            params,
        }
    }

    /// Minimized windows stay registered but are not drawn
    pub fn is_rendered(&self) -> bool {
        !self.minimized
    }

    /// Rectangle the window is laid out in right now
    pub fn layout_rect(&self, viewport: Viewport, taskbar_height: f64) -> Rect {
        if self.maximized {
            snap::maximized_rect(viewport, taskbar_height)
        } else {
            self.bounds
        }
    }

    pub fn param(&self, key: &str) -> Option<&serde_json::Value> {
        self.params.get(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> WindowRecord {
        WindowRecord::new(
            "about".to_string(),
            "User Profile".to_string(),
            "icons/profile.png".to_string(),
            ContentKind::Profile,
            Rect::new(100.0, 120.0, 450.0, 600.0),
            101,
            LaunchParams::new(),
        )
    }

    #[test]
    fn test_maximized_layout_ignores_stored_bounds() {
        let mut win = record();
        let vp = Viewport::new(1280.0, 800.0);
        assert_eq!(win.layout_rect(vp, 70.0), win.bounds);

        win.maximized = true;
        assert_eq!(win.layout_rect(vp, 70.0), Rect::new(0.0, 0.0, 1280.0, 730.0));
        // Stored geometry survives for restore
        assert_eq!(win.bounds, Rect::new(100.0, 120.0, 450.0, 600.0));
    }

    #[test]
    fn test_serializes_camel_case() {
        let json = serde_json::to_value(record()).unwrap();
        assert_eq!(json["zOrder"], 101);
        assert_eq!(json["content"]["kind"], "profile");
    }
}
