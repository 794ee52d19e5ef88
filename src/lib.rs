// Window manager state engine for a webview desktop shell.
//
// The `Desktop` facade owns every piece of shell state; the webview renders
// from its queries and the events it publishes.

// Loaded desktop settings (window defaults, snap zones, icon grid, timers)
pub mod config;

// Timer-driven follow-ups on a shared desktop
pub mod deferred;

pub mod errors;

// Rects, snap zones, resize math and the pointer gesture state machine
pub mod geometry;

pub mod icons;

// App catalog and content registry
pub mod launcher;

pub mod logging;

// Persisted preferences and theme palettes
pub mod prefs;

// Taskbar, start menu, context menus and the Desktop facade
pub mod shell;

pub mod sounds;

// Window registry
pub mod state;

#[cfg(feature = "tauri-shell")]
pub mod plugin;

pub use config::DesktopConfig;
pub use errors::{ConfigError, StoreError};
pub use geometry::{GeometryController, GestureOutcome, Point, Rect, ResizeDirection, SnapState, Viewport};
pub use launcher::{AppCatalog, AppDescriptor, ContentKind, GameKind};
pub use prefs::Preferences;
pub use shell::Desktop;
pub use sounds::SoundCue;
pub use state::events::{DeskEvent, EventBus, SubscriptionId};
pub use state::window::{LaunchParams, WindowRecord};
pub use state::WindowManager;
