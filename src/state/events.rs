// Change notifications published to whatever renders the desktop

use serde::Serialize;
use uuid::Uuid;

use super::window::WindowRecord;
use crate::geometry::{Point, Rect, SnapState, Viewport};
use crate::icons::DesktopIcon;
use crate::shell::context_menu::ContextMenu;
use crate::sounds::SoundCue;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case", rename_all_fields = "camelCase")]
pub enum DeskEvent {
    WindowOpened { window: WindowRecord },
    WindowClosing { id: String },
    WindowClosed { id: String },
    WindowMinimized { id: String },
    WindowRestored { id: String, z_order: u64 },
    WindowMaximizeToggled { id: String, maximized: bool, z_order: u64 },
    WindowFocused { id: String, z_order: u64 },
    WindowMoved { id: String, position: Point },
    WindowResized { id: String, bounds: Rect },
    SnapPreviewChanged { state: SnapState, preview: Option<Rect> },
    ViewportChanged { viewport: Viewport },
    IconsChanged { icons: Vec<DesktopIcon> },
    AppVisibilityChanged { id: String, hidden: bool },
    StartMenuToggled { open: bool },
    ContextMenuChanged { menu: Option<ContextMenu> },
    PreferencesChanged { key: String },
    BackgroundChanged { background: String },
    SoundCue { cue: SoundCue },
    ShutdownRequested,
}

impl DeskEvent {
    /// Event name used on the webview side
    pub fn name(&self) -> &'static str {
        match self {
            DeskEvent::WindowOpened { .. } => "window-opened",
            DeskEvent::WindowClosing { .. } => "window-closing",
            DeskEvent::WindowClosed { .. } => "window-closed",
            DeskEvent::WindowMinimized { .. } => "window-minimized",
            DeskEvent::WindowRestored { .. } => "window-restored",
            DeskEvent::WindowMaximizeToggled { .. } => "window-maximize-toggled",
            DeskEvent::WindowFocused { .. } => "window-focused",
            DeskEvent::WindowMoved { .. } => "window-moved",
            DeskEvent::WindowResized { .. } => "window-resized",
            DeskEvent::SnapPreviewChanged { .. } => "snap-preview-changed",
            DeskEvent::ViewportChanged { .. } => "viewport-changed",
            DeskEvent::IconsChanged { .. } => "icons-changed",
            DeskEvent::AppVisibilityChanged { .. } => "app-visibility-changed",
            DeskEvent::StartMenuToggled { .. } => "start-menu-toggled",
            DeskEvent::ContextMenuChanged { .. } => "context-menu-changed",
            DeskEvent::PreferencesChanged { .. } => "preferences-changed",
            DeskEvent::BackgroundChanged { .. } => "background-changed",
            DeskEvent::SoundCue { .. } => "sound-cue",
            DeskEvent::ShutdownRequested => "shutdown-requested",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct SubscriptionId(Uuid);

type Listener = Box<dyn Fn(&DeskEvent) + Send + Sync>;

/// Subscriber list for desktop change notifications
#[derive(Default)]
pub struct EventBus {
    listeners: Vec<(SubscriptionId, Listener)>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: Fn(&DeskEvent) + Send + Sync + 'static,
    {
        let id = SubscriptionId(Uuid::new_v4());
        self.listeners.push((id, Box::new(listener)));
        tracing::debug!(event = "desk.events.subscribed", subscribers = self.listeners.len());
        id
    }

    /// Returns false if the subscription was already gone
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sub, _)| *sub != id);
        before != self.listeners.len()
    }

    pub fn publish(&self, event: &DeskEvent) {
        for (_, listener) in &self.listeners {
            listener(event);
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.listeners.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_publish_reaches_every_subscriber_until_unsubscribed() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut bus = EventBus::new();

        let first = {
            let seen = seen.clone();
            bus.subscribe(move |e| seen.lock().unwrap().push(format!("a:{}", e.name())))
        };
        {
            let seen = seen.clone();
            bus.subscribe(move |e| seen.lock().unwrap().push(format!("b:{}", e.name())));
        }

        bus.publish(&DeskEvent::ShutdownRequested);
        assert!(bus.unsubscribe(first));
        assert!(!bus.unsubscribe(first));
        bus.publish(&DeskEvent::WindowClosed { id: "about".to_string() });

        assert_eq!(
            *seen.lock().unwrap(),
            vec!["a:shutdown-requested", "b:shutdown-requested", "b:window-closed"]
        );
        assert_eq!(bus.subscriber_count(), 1);
    }

    #[test]
    fn test_event_payload_shape() {
        let json = serde_json::to_value(DeskEvent::WindowFocused {
            id: "terminal".to_string(),
            z_order: 104,
        })
        .unwrap();
        assert_eq!(
            json,
            serde_json::json!({"type": "window-focused", "id": "terminal", "zOrder": 104})
        );
    }
}
