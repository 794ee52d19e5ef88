// Right-click menus for the desktop, icons and windows

use serde::{Deserialize, Serialize};

use crate::geometry::{Point, Viewport};
use crate::state::WindowManager;

/// What was right-clicked
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "lowercase")]
pub enum ContextTarget {
    Desktop,
    Icon(String),
    Window(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContextAction {
    Open,
    Properties,
    AutoArrange,
    Personalize,
    Minimize,
    ToggleMaximize,
    Center,
    Close,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextOption {
    pub label: String,
    pub action: ContextAction,
    /// Rendered in the warning colour
    pub danger: bool,
    /// Draw a separator above this option
    pub separated: bool,
}

impl ContextOption {
    fn new(label: &str, action: ContextAction) -> Self {
        Self {
            label: label.to_string(),
            action,
            danger: false,
            separated: false,
        }
    }

    fn danger(mut self) -> Self {
        self.danger = true;
        self
    }

    fn separated(mut self) -> Self {
        self.separated = true;
        self
    }
}

pub const MENU_WIDTH: f64 = 180.0;
pub const ITEM_HEIGHT: f64 = 33.0;
pub const SEPARATOR_HEIGHT: f64 = 11.0;
pub const MENU_PADDING: f64 = 12.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextMenu {
    pub target: ContextTarget,
    /// Top-left corner after overflow correction
    pub position: Point,
    pub options: Vec<ContextOption>,
}

impl ContextMenu {
    /// Build the menu for `target`, opened at `pointer`.
    /// `None` when the target no longer exists.
    pub fn build(
        target: ContextTarget,
        pointer: Point,
        wm: &WindowManager,
        viewport: Viewport,
    ) -> Option<Self> {
        let options = options_for(&target, wm)?;
        let (width, height) = menu_size(&options);
        let position = fit_to_viewport(pointer, width, height, viewport);
        Some(Self {
            target,
            position,
            options,
        })
    }

    pub fn has_action(&self, action: ContextAction) -> bool {
        self.options.iter().any(|o| o.action == action)
    }
}

fn options_for(target: &ContextTarget, wm: &WindowManager) -> Option<Vec<ContextOption>> {
    use ContextAction::*;

    let options = match target {
        ContextTarget::Desktop => vec![
            ContextOption::new("Auto Arrange Icons", AutoArrange),
            ContextOption::new("Personalize", Personalize).separated(),
        ],
        ContextTarget::Icon(id) => {
            wm.catalog().describe(id)?;
            vec![
                ContextOption::new("Open", Open),
                ContextOption::new("Properties", Properties).separated(),
            ]
        }
        ContextTarget::Window(id) => {
            let window = wm.window(id)?;
            let maximize_label = if window.maximized { "Restore" } else { "Maximize" };
            vec![
                ContextOption::new("Minimize", Minimize),
                ContextOption::new(maximize_label, ToggleMaximize),
                ContextOption::new("Center", Center),
                ContextOption::new("Close", Close).danger().separated(),
            ]
        }
    };
    Some(options)
}

fn menu_size(options: &[ContextOption]) -> (f64, f64) {
    let separators = options.iter().filter(|o| o.separated).count() as f64;
    let height = MENU_PADDING + options.len() as f64 * ITEM_HEIGHT + separators * SEPARATOR_HEIGHT;
    (MENU_WIDTH, height)
}

/// Flip the menu left of / above the pointer when it would run off the viewport
pub fn fit_to_viewport(pointer: Point, width: f64, height: f64, viewport: Viewport) -> Point {
    let mut position = pointer;
    if pointer.x + width > viewport.width {
        position.x = pointer.x - width;
    }
    if pointer.y + height > viewport.height {
        position.y = pointer.y - height;
    }
    position
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::config::DesktopConfig;
    use crate::launcher::AppCatalog;
    use crate::state::window::LaunchParams;

    fn vp() -> Viewport {
        Viewport::new(1280.0, 800.0)
    }

    fn manager() -> WindowManager {
        WindowManager::new(Arc::new(AppCatalog::builtin()), DesktopConfig::default(), vp())
    }

    #[test]
    fn test_menu_flips_on_overflow() {
        assert_eq!(fit_to_viewport(Point::new(100.0, 100.0), 180.0, 90.0, vp()), Point::new(100.0, 100.0));
        assert_eq!(fit_to_viewport(Point::new(1200.0, 100.0), 180.0, 90.0, vp()), Point::new(1020.0, 100.0));
        assert_eq!(fit_to_viewport(Point::new(1200.0, 750.0), 180.0, 90.0, vp()), Point::new(1020.0, 660.0));
    }

    #[test]
    fn test_options_per_target() {
        let mut wm = manager();
        wm.open("terminal", LaunchParams::new());

        let desktop = ContextMenu::build(ContextTarget::Desktop, Point::new(10.0, 10.0), &wm, vp()).unwrap();
        assert!(desktop.has_action(ContextAction::AutoArrange));

        let icon = ContextMenu::build(ContextTarget::Icon("about".into()), Point::new(10.0, 10.0), &wm, vp()).unwrap();
        assert!(icon.has_action(ContextAction::Properties));
        assert!(!icon.has_action(ContextAction::Close));

        let window = ContextMenu::build(ContextTarget::Window("terminal".into()), Point::new(10.0, 10.0), &wm, vp()).unwrap();
        assert_eq!(window.options[1].label, "Maximize");
        assert!(window.options.last().unwrap().danger);
    }

    #[test]
    fn test_missing_targets_build_nothing() {
        let wm = manager();
        assert!(ContextMenu::build(ContextTarget::Window("about".into()), Point::default(), &wm, vp()).is_none());
        assert!(ContextMenu::build(ContextTarget::Icon("ghost".into()), Point::default(), &wm, vp()).is_none());
    }

    #[test]
    fn test_maximized_window_offers_restore() {
        let mut wm = manager();
        wm.open("terminal", LaunchParams::new());
        wm.maximize("terminal");
        let menu = ContextMenu::build(ContextTarget::Window("terminal".into()), Point::default(), &wm, vp()).unwrap();
        assert_eq!(menu.options[1].label, "Restore");
    }
}
