use std::sync::Arc;

use self::events::DeskEvent;
use self::window::{LaunchParams, WindowRecord};
use crate::config::DesktopConfig;
use crate::geometry::{snap, Point, Rect, SnapState, Viewport};
use crate::launcher::AppCatalog;

pub mod events;
pub mod window;

/// Registry of open windows plus the z-order counter and snap preview.
///
/// Every operation keyed by an app id is a silent no-op (`None`) when the id
/// is unknown or the operation is meaningless in the window's current state.
/// Mutations queue [`DeskEvent`]s which the owner drains with
/// [`WindowManager::drain_events`].
pub struct WindowManager {
    windows: Vec<WindowRecord>, // Open order
    focused: Option<String>,
    z_counter: u64,
    snap_preview: SnapState,
    viewport: Viewport,
    config: DesktopConfig,
    catalog: Arc<AppCatalog>,
    hidden_apps: Vec<String>,
    properties_target: Option<String>,
    shutting_down: bool,
    pending: Vec<DeskEvent>,
}

impl WindowManager {
    pub fn new(catalog: Arc<AppCatalog>, config: DesktopConfig, viewport: Viewport) -> Self {
        Self {
            windows: Vec::new(),
            focused: None,
            z_counter: config.windows.z_base,
            snap_preview: SnapState::None,
            viewport,
            config,
            catalog,
            hidden_apps: Vec::new(),
            properties_target: None,
            shutting_down: false,
            pending: Vec::new(),
        }
    }

    /// Open an app, or bring back its existing window.
    pub fn open(&mut self, id: &str, params: LaunchParams) -> Option<WindowRecord> {
        if let Some(window) = self.window_mut(id) {
            // Reopening during the close animation cancels the close
            if window.closing {
                window.closing = false;
                tracing::debug!(event = "desk.registry.close_cancelled", app_id = id);
            }
            self.restore(id);
            return self.focus(id);
        }

        let Some(app) = self.catalog.describe(id) else {
            tracing::debug!(event = "desk.registry.open_unknown_app", app_id = id);
            return None;
        };

        let cfg = &self.config.windows;
        let offset = (self.windows.len() as f64 * cfg.cascade_step) % cfg.cascade_wrap;
        let x = (self.viewport.width / 2.0 - app.width / 2.0 + offset).max(0.0);
        let y = (self.viewport.height / 2.0 - app.height / 2.0 + offset).max(0.0);
        let bounds = Rect::new(x, y, app.width, app.height);

        let window = WindowRecord::new(
            app.id.clone(),
            app.title.clone(),
            app.icon.clone(),
            app.content,
            bounds,
            0,
            params,
        );
        self.windows.push(window);

        let z_order = self.allocate_z();
        let window = self.window_mut(id)?;
        window.z_order = z_order;
        let window = window.clone();
        self.focused = Some(id.to_string());

        tracing::info!(
            event = "desk.registry.window_opened",
            app_id = id,
            z_order = z_order,
            x = bounds.x,
            y = bounds.y
        );
        self.pending.push(DeskEvent::WindowOpened {
            window: window.clone(),
        });
        Some(window)
    }

    /// Open settings on a given tab
    pub fn open_settings(&mut self, tab: &str) -> Option<WindowRecord> {
        let mut params = LaunchParams::new();
        params.insert("initialTab".to_string(), serde_json::Value::from(tab));
        self.open("settings", params)
    }

    /// Open the properties sheet for another app
    pub fn open_properties(&mut self, target: &str) -> Option<WindowRecord> {
        self.catalog.describe(target)?;
        self.properties_target = Some(target.to_string());
        self.open("properties", LaunchParams::new())
    }

    /// Remove a window from the registry entirely
    pub fn close(&mut self, id: &str) -> Option<WindowRecord> {
        let index = self.windows.iter().position(|w| w.id == id)?;
        let removed = self.windows.remove(index);

        if self.focused.as_deref() == Some(id) {
            self.focused = None;
        }

        tracing::info!(event = "desk.registry.window_closed", app_id = id);
        self.pending.push(DeskEvent::WindowClosed { id: id.to_string() });
        Some(removed)
    }

    /// Flag a window as closing so the close animation can play.
    /// The record stays registered until [`WindowManager::finish_close`].
    pub fn begin_close(&mut self, id: &str) -> Option<WindowRecord> {
        let window = self.window_mut(id)?;
        if window.closing {
            return None;
        }
        window.closing = true;
        let window = window.clone();

        self.pending.push(DeskEvent::WindowClosing { id: id.to_string() });
        Some(window)
    }

    /// Complete a close started by [`WindowManager::begin_close`].
    /// No-op if the window is gone or is no longer closing.
    pub fn finish_close(&mut self, id: &str) -> Option<WindowRecord> {
        if !self.window(id)?.closing {
            tracing::debug!(event = "desk.registry.finish_close_skipped", app_id = id);
            return None;
        }
        self.close(id)
    }

    pub fn minimize(&mut self, id: &str) -> Option<WindowRecord> {
        let window = self.window_mut(id)?;
        if window.minimized {
            return None;
        }
        window.minimized = true;
        let window = window.clone();

        if self.focused.as_deref() == Some(id) {
            self.focused = None;
        }

        self.pending.push(DeskEvent::WindowMinimized { id: id.to_string() });
        Some(window)
    }

    /// Minimize every visible window ("show desktop"). Returns the ids touched.
    pub fn minimize_all(&mut self) -> Vec<String> {
        let ids: Vec<String> = self
            .windows
            .iter()
            .filter(|w| !w.minimized)
            .map(|w| w.id.clone())
            .collect();
        for id in &ids {
            self.minimize(id);
        }
        ids
    }

    pub fn restore(&mut self, id: &str) -> Option<WindowRecord> {
        self.window(id)?;
        let z_order = self.allocate_z();
        let window = self.window_mut(id)?;
        window.minimized = false;
        window.z_order = z_order;
        let window = window.clone();
        self.focused = Some(id.to_string());

        self.pending.push(DeskEvent::WindowRestored {
            id: id.to_string(),
            z_order,
        });
        Some(window)
    }

    /// Toggle the maximized flag and raise the window
    pub fn maximize(&mut self, id: &str) -> Option<WindowRecord> {
        self.window(id)?;
        let z_order = self.allocate_z();
        let window = self.window_mut(id)?;
        window.maximized = !window.maximized;
        window.z_order = z_order;
        let window = window.clone();
        self.focused = Some(id.to_string());

        self.pending.push(DeskEvent::WindowMaximizeToggled {
            id: id.to_string(),
            maximized: window.maximized,
            z_order,
        });
        Some(window)
    }

    /// Raise a window to the top without touching its flags
    pub fn focus(&mut self, id: &str) -> Option<WindowRecord> {
        self.window(id)?;
        let z_order = self.allocate_z();
        let window = self.window_mut(id)?;
        window.z_order = z_order;
        let window = window.clone();
        self.focused = Some(id.to_string());

        self.pending.push(DeskEvent::WindowFocused {
            id: id.to_string(),
            z_order,
        });
        Some(window)
    }

    /// Un-maximize, force the default size and centre in the viewport
    pub fn center(&mut self, id: &str) -> Option<WindowRecord> {
        self.window(id)?;
        let cfg = &self.config.windows;
        let bounds = Rect::new(
            (self.viewport.width - cfg.default_width) / 2.0,
            (self.viewport.height - cfg.default_height) / 2.0,
            cfg.default_width,
            cfg.default_height,
        );

        let was_maximized = self.window(id)?.maximized;
        let z_order = self.allocate_z();
        let window = self.window_mut(id)?;
        window.maximized = false;
        window.bounds = bounds;
        window.z_order = z_order;
        let window = window.clone();
        self.focused = Some(id.to_string());

        if was_maximized {
            self.pending.push(DeskEvent::WindowMaximizeToggled {
                id: id.to_string(),
                maximized: false,
                z_order,
            });
        }
        self.pending.push(DeskEvent::WindowResized {
            id: id.to_string(),
            bounds,
        });
        self.pending.push(DeskEvent::WindowFocused {
            id: id.to_string(),
            z_order,
        });
        Some(window)
    }

    /// Hide or unhide an app's desktop icon. Returns the new hidden flag.
    pub fn toggle_hidden(&mut self, id: &str) -> Option<bool> {
        self.catalog.describe(id)?;
        let hidden = if let Some(index) = self.hidden_apps.iter().position(|h| h == id) {
            self.hidden_apps.remove(index);
            false
        } else {
            self.hidden_apps.push(id.to_string());
            true
        };

        self.pending.push(DeskEvent::AppVisibilityChanged {
            id: id.to_string(),
            hidden,
        });
        Some(hidden)
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        if self.viewport == viewport {
            return;
        }
        self.viewport = viewport;
        self.pending.push(DeskEvent::ViewportChanged { viewport });
    }

    pub fn request_shutdown(&mut self) {
        if self.shutting_down {
            return;
        }
        self.shutting_down = true;
        tracing::info!(event = "desk.registry.shutdown_requested", open_windows = self.windows.len());
        self.pending.push(DeskEvent::ShutdownRequested);
    }

    // ===== Geometry writes (driven by the gesture controller) =====

    pub(crate) fn move_to(&mut self, id: &str, position: Point) -> Option<WindowRecord> {
        let window = self.window_mut(id)?;
        window.bounds = window.bounds.with_origin(position);
        let window = window.clone();

        self.pending.push(DeskEvent::WindowMoved {
            id: id.to_string(),
            position,
        });
        Some(window)
    }

    pub(crate) fn set_bounds(&mut self, id: &str, bounds: Rect) -> Option<WindowRecord> {
        let window = self.window_mut(id)?;
        window.bounds = bounds;
        let window = window.clone();

        self.pending.push(DeskEvent::WindowResized {
            id: id.to_string(),
            bounds,
        });
        Some(window)
    }

    pub(crate) fn set_snap_preview(&mut self, state: SnapState) {
        if self.snap_preview == state {
            return;
        }
        self.snap_preview = state;
        let preview = snap::preview_rect(
            state,
            self.viewport,
            self.config.taskbar.height,
            self.config.snap.margin,
        );
        self.pending.push(DeskEvent::SnapPreviewChanged { state, preview });
    }

    // ===== Queries =====

    pub fn window(&self, id: &str) -> Option<&WindowRecord> {
        self.windows.iter().find(|w| w.id == id)
    }

    /// All records in open order
    pub fn windows(&self) -> &[WindowRecord] {
        &self.windows
    }

    /// Visible windows bottom to top
    pub fn render_order(&self) -> Vec<&WindowRecord> {
        let mut visible: Vec<&WindowRecord> =
            self.windows.iter().filter(|w| w.is_rendered()).collect();
        visible.sort_by_key(|w| w.z_order);
        visible
    }

    pub fn focused(&self) -> Option<&str> {
        self.focused.as_deref()
    }

    /// Last z-order handed out
    pub fn z_counter(&self) -> u64 {
        self.z_counter
    }

    pub fn snap_preview(&self) -> SnapState {
        self.snap_preview
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn config(&self) -> &DesktopConfig {
        &self.config
    }

    pub fn catalog(&self) -> &AppCatalog {
        &self.catalog
    }

    pub fn is_hidden(&self, id: &str) -> bool {
        self.hidden_apps.iter().any(|h| h == id)
    }

    pub fn hidden_apps(&self) -> &[String] {
        &self.hidden_apps
    }

    pub fn properties_target(&self) -> Option<&str> {
        self.properties_target.as_deref()
    }

    pub fn is_shutting_down(&self) -> bool {
        self.shutting_down
    }

    /// Take every event queued since the last drain
    pub fn drain_events(&mut self) -> Vec<DeskEvent> {
        std::mem::take(&mut self.pending)
    }

    fn allocate_z(&mut self) -> u64 {
        self.z_counter += 1;
        self.z_counter
    }

    fn window_mut(&mut self, id: &str) -> Option<&mut WindowRecord> {
        self.windows.iter_mut().find(|w| w.id == id)
    }
}
