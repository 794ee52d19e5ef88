// Desktop facade: owns every piece of shell state and publishes what changed

pub mod context_menu;
pub mod start_menu;
pub mod taskbar;

use std::sync::Arc;

use crate::config::DesktopConfig;
use crate::geometry::{GeometryController, GestureOutcome, Point, ResizeDirection, Viewport};
use crate::icons::{DesktopIcon, IconLayout};
use crate::launcher::{AppCatalog, GameKind};
use crate::prefs::{
    Preferences, ThemeConfig, OS_THEME, PARTICLES_ENABLED, SOUND_ENABLED, THEME_CONFIG,
};
use crate::sounds::SoundCue;
use crate::state::events::{DeskEvent, EventBus, SubscriptionId};
use crate::state::window::{LaunchParams, WindowRecord};
use crate::state::WindowManager;

use self::context_menu::{ContextAction, ContextMenu, ContextTarget};
use self::start_menu::{StartEntry, StartMenu, StartTab};
use self::taskbar::{TaskbarConfig, TaskbarEntry};

pub const DEFAULT_SETTINGS_TAB: &str = "personalization";

/// CSS `background` value the desktop starts with
pub const DEFAULT_BACKGROUND: &str = "url(/wallpaper.png)";

/// Single owner of the desktop's state.
///
/// Every mutating call publishes the resulting [`DeskEvent`]s to subscribers
/// before returning, in the order the changes happened.
pub struct Desktop {
    wm: WindowManager,
    geometry: GeometryController,
    icons: IconLayout,
    start_menu: StartMenu,
    context_menu: Option<ContextMenu>,
    taskbar: TaskbarConfig,
    background: String,
    prefs: Preferences,
    bus: EventBus,
}

impl Desktop {
    pub fn new(
        config: DesktopConfig,
        catalog: Arc<AppCatalog>,
        viewport: Viewport,
        prefs: Preferences,
    ) -> Self {
        let icons = IconLayout::new(
            catalog.desktop_ids(),
            config.icons.clone(),
            config.taskbar.height,
            viewport,
        );
        let wm = WindowManager::new(catalog, config, viewport);
        Self {
            wm,
            geometry: GeometryController::new(),
            icons,
            start_menu: StartMenu::new(),
            context_menu: None,
            taskbar: TaskbarConfig::default(),
            background: DEFAULT_BACKGROUND.to_string(),
            prefs,
            bus: EventBus::new(),
        }
    }

    /// Built-in apps, default config, in-memory preferences
    pub fn with_defaults(viewport: Viewport) -> Self {
        Self::new(
            DesktopConfig::default(),
            Arc::new(AppCatalog::builtin()),
            viewport,
            Preferences::in_memory(),
        )
    }

    // ===== Subscriptions =====

    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: Fn(&DeskEvent) + Send + Sync + 'static,
    {
        self.bus.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.bus.unsubscribe(id)
    }

    pub fn event_bus_mut(&mut self) -> &mut EventBus {
        &mut self.bus
    }

    /// Publish everything the registry queued, adding sound cues when enabled
    fn flush(&mut self) {
        let sound = self.prefs.sound_enabled();
        for event in self.wm.drain_events() {
            self.bus.publish(&event);

            let cue = match &event {
                DeskEvent::WindowOpened { .. } => Some(SoundCue::WindowOpen),
                DeskEvent::WindowClosing { .. } => Some(SoundCue::WindowClose),
                _ => None,
            };
            if let Some(cue) = cue.filter(|_| sound) {
                self.bus.publish(&DeskEvent::SoundCue { cue });
            }
        }
    }

    fn publish(&mut self, event: DeskEvent) {
        self.flush();
        self.bus.publish(&event);
    }

    fn publish_icons(&mut self) {
        let icons = self.icons.icons().to_vec();
        self.publish(DeskEvent::IconsChanged { icons });
    }

    // ===== Window lifecycle =====

    pub fn open(&mut self, id: &str) -> Option<WindowRecord> {
        self.open_with(id, LaunchParams::new())
    }

    pub fn open_with(&mut self, id: &str, params: LaunchParams) -> Option<WindowRecord> {
        let result = self.wm.open(id, params);
        if result.is_none() {
            self.play(SoundCue::Error);
        }
        self.flush();
        result
    }

    pub fn open_settings(&mut self, tab: Option<&str>) -> Option<WindowRecord> {
        let result = self.wm.open_settings(tab.unwrap_or(DEFAULT_SETTINGS_TAB));
        self.flush();
        result
    }

    pub fn open_properties(&mut self, target: &str) -> Option<WindowRecord> {
        let result = self.wm.open_properties(target);
        self.flush();
        result
    }

    /// Close immediately, without the close animation
    pub fn close(&mut self, id: &str) -> Option<WindowRecord> {
        let result = self.wm.close(id);
        self.flush();
        if result.is_some() {
            self.play(SoundCue::WindowClose);
        }
        result
    }

    /// Start the close animation; see [`crate::deferred::close_window`]
    pub fn begin_close(&mut self, id: &str) -> Option<WindowRecord> {
        let result = self.wm.begin_close(id);
        self.flush();
        result
    }

    pub fn finish_close(&mut self, id: &str) -> Option<WindowRecord> {
        let result = self.wm.finish_close(id);
        self.flush();
        result
    }

    pub fn minimize(&mut self, id: &str) -> Option<WindowRecord> {
        let result = self.wm.minimize(id);
        self.flush();
        result
    }

    pub fn restore(&mut self, id: &str) -> Option<WindowRecord> {
        let result = self.wm.restore(id);
        self.flush();
        result
    }

    pub fn maximize(&mut self, id: &str) -> Option<WindowRecord> {
        let result = self.wm.maximize(id);
        self.flush();
        result
    }

    pub fn focus(&mut self, id: &str) -> Option<WindowRecord> {
        let result = self.wm.focus(id);
        self.flush();
        result
    }

    pub fn center(&mut self, id: &str) -> Option<WindowRecord> {
        let result = self.wm.center(id);
        self.flush();
        result
    }

    /// "Show desktop"
    pub fn minimize_all(&mut self) -> Vec<String> {
        let ids = self.wm.minimize_all();
        self.flush();
        ids
    }

    pub fn toggle_hidden(&mut self, id: &str) -> Option<bool> {
        let result = self.wm.toggle_hidden(id);
        self.flush();
        result
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        if self.wm.viewport() == viewport {
            return;
        }
        self.wm.set_viewport(viewport);
        self.icons.reflow(viewport);
        self.publish_icons();
        self.dismiss_context_menu();
    }

    pub fn request_shutdown(&mut self) {
        self.wm.request_shutdown();
        self.start_menu.close();
        self.flush();
    }

    // ===== Window gestures =====

    pub fn header_pointer_down(&mut self, id: &str, pointer: Point) -> GestureOutcome {
        self.dismiss_context_menu();
        let outcome = self.geometry.header_pointer_down(&mut self.wm, id, pointer);
        self.flush();
        outcome
    }

    pub fn resize_pointer_down(
        &mut self,
        id: &str,
        direction: ResizeDirection,
        pointer: Point,
    ) -> GestureOutcome {
        let outcome = self
            .geometry
            .resize_pointer_down(&mut self.wm, id, direction, pointer);
        self.flush();
        outcome
    }

    pub fn header_double_click(&mut self, id: &str) -> Option<WindowRecord> {
        let result = self.geometry.header_double_click(&mut self.wm, id);
        self.flush();
        result
    }

    /// Pointer moved anywhere on the desktop. Drives whichever drag is active.
    pub fn pointer_move(&mut self, pointer: Point) -> GestureOutcome {
        if self.icons.dragging().is_some() {
            if self.icons.pointer_move(pointer, self.wm.viewport()) {
                self.publish_icons();
                return GestureOutcome::Moved;
            }
            return GestureOutcome::Ignored;
        }
        let outcome = self.geometry.pointer_move(&mut self.wm, pointer);
        self.flush();
        outcome
    }

    pub fn pointer_up(&mut self) -> GestureOutcome {
        if self.icons.dragging().is_some() {
            return match self.icons.pointer_up(self.wm.viewport()) {
                Some(_) => {
                    self.publish_icons();
                    GestureOutcome::Dropped
                }
                None => GestureOutcome::Ignored,
            };
        }
        let outcome = self.geometry.pointer_up(&mut self.wm);
        self.flush();
        outcome
    }

    // ===== Desktop icons =====

    pub fn icon_pointer_down(&mut self, id: &str, pointer: Point) -> bool {
        self.dismiss_context_menu();
        if self.wm.is_hidden(id) {
            return false;
        }
        self.icons.pointer_down(id, pointer)
    }

    /// Click on an icon opens its app unless the click ends a drag
    pub fn icon_click(&mut self, id: &str) -> Option<WindowRecord> {
        if self.wm.is_hidden(id) || !self.icons.click(id) {
            return None;
        }
        self.play(SoundCue::Click);
        self.open(id)
    }

    pub fn auto_arrange(&mut self) {
        self.icons.auto_arrange(self.wm.viewport());
        self.publish_icons();
    }

    pub fn icons(&self) -> &[DesktopIcon] {
        self.icons.icons()
    }

    /// Icons that are drawn (hidden apps removed)
    pub fn visible_icons(&self) -> Vec<DesktopIcon> {
        self.icons.visible(self.wm.hidden_apps()).cloned().collect()
    }

    // ===== Taskbar =====

    pub fn taskbar_entries(&self) -> Vec<TaskbarEntry> {
        taskbar::entries(&self.wm)
    }

    pub fn taskbar_click(&mut self, id: &str) -> Option<WindowRecord> {
        let result = taskbar::click(&mut self.wm, id);
        self.flush();
        result
    }

    pub fn taskbar_config(&self) -> &TaskbarConfig {
        &self.taskbar
    }

    pub fn update_taskbar_config(&mut self, key: &str, value: bool) -> bool {
        self.taskbar.update(key, value)
    }

    // ===== Wallpaper =====

    pub fn background(&self) -> &str {
        &self.background
    }

    /// Replace the desktop wallpaper (any CSS `background` value).
    /// Returns false if it was already set to `value`.
    pub fn set_background(&mut self, value: &str) -> bool {
        if self.background == value {
            return false;
        }
        self.background = value.to_string();
        tracing::debug!(event = "desk.shell.background_changed", background = value);
        self.publish(DeskEvent::BackgroundChanged {
            background: self.background.clone(),
        });
        true
    }

    // ===== Start menu =====

    pub fn toggle_start_menu(&mut self) -> bool {
        let open = self.start_menu.toggle();
        self.publish(DeskEvent::StartMenuToggled { open });
        open
    }

    pub fn close_start_menu(&mut self) {
        if self.start_menu.close() {
            self.publish(DeskEvent::StartMenuToggled { open: false });
        }
    }

    /// Keyboard shortcut handling for the shell (Meta toggles the start menu)
    pub fn handle_key(&mut self, key: &str) -> bool {
        let was_open = self.start_menu.is_open();
        if !self.start_menu.handle_key(key) {
            return false;
        }
        let open = self.start_menu.is_open();
        if open != was_open {
            self.publish(DeskEvent::StartMenuToggled { open });
        }
        true
    }

    pub fn start_menu(&self) -> &StartMenu {
        &self.start_menu
    }

    pub fn set_start_query(&mut self, query: &str) {
        self.start_menu.set_query(query);
    }

    pub fn set_start_tab(&mut self, tab: StartTab) {
        self.start_menu.set_tab(tab);
    }

    pub fn start_menu_entries(&self) -> Vec<StartEntry> {
        self.start_menu
            .entries(self.wm.catalog(), self.wm.hidden_apps())
    }

    /// Launch from a start menu tile; the menu closes either way
    pub fn launch_from_start(&mut self, id: &str) -> Option<WindowRecord> {
        let result = self.open(id);
        self.close_start_menu();
        result
    }

    // ===== Context menu =====

    pub fn open_context_menu(&mut self, target: ContextTarget, pointer: Point) -> Option<&ContextMenu> {
        let menu = ContextMenu::build(target, pointer, &self.wm, self.wm.viewport());
        self.context_menu = menu.clone();
        self.publish(DeskEvent::ContextMenuChanged { menu });
        self.context_menu.as_ref()
    }

    pub fn dismiss_context_menu(&mut self) {
        if self.context_menu.take().is_some() {
            self.publish(DeskEvent::ContextMenuChanged { menu: None });
        }
    }

    pub fn context_menu(&self) -> Option<&ContextMenu> {
        self.context_menu.as_ref()
    }

    /// Run an option from the open context menu, then close the menu.
    /// Returns false when no menu is open or the menu does not offer `action`.
    pub fn select_context_action(&mut self, action: ContextAction) -> bool {
        let Some(menu) = self.context_menu.clone() else {
            return false;
        };
        if !menu.has_action(action) {
            return false;
        }
        self.dismiss_context_menu();

        tracing::debug!(event = "desk.context.action", action = ?action, context_target = ?menu.target);
        match (&menu.target, action) {
            (ContextTarget::Desktop, ContextAction::AutoArrange) => self.auto_arrange(),
            (ContextTarget::Desktop, ContextAction::Personalize) => {
                self.open_settings(Some(DEFAULT_SETTINGS_TAB));
            }
            (ContextTarget::Icon(id), ContextAction::Open) => {
                self.open(id);
            }
            (ContextTarget::Icon(id), ContextAction::Properties) => {
                self.open_properties(id);
            }
            (ContextTarget::Window(id), ContextAction::Minimize) => {
                self.minimize(id);
            }
            (ContextTarget::Window(id), ContextAction::ToggleMaximize) => {
                self.maximize(id);
            }
            (ContextTarget::Window(id), ContextAction::Center) => {
                self.center(id);
            }
            (ContextTarget::Window(id), ContextAction::Close) => {
                self.begin_close(id);
            }
            _ => return false,
        }
        true
    }

    // ===== Preferences =====

    pub fn prefs(&self) -> &Preferences {
        &self.prefs
    }

    pub fn toggle_sound(&mut self) -> bool {
        let enabled = self.prefs.toggle_sound();
        self.publish(DeskEvent::PreferencesChanged {
            key: SOUND_ENABLED.to_string(),
        });
        enabled
    }

    pub fn toggle_particles(&mut self) -> bool {
        let enabled = self.prefs.toggle_particles();
        self.publish(DeskEvent::PreferencesChanged {
            key: PARTICLES_ENABLED.to_string(),
        });
        enabled
    }

    pub fn set_os_theme(&mut self, name: &str) {
        self.prefs.set_os_theme(name);
        self.publish(DeskEvent::PreferencesChanged {
            key: OS_THEME.to_string(),
        });
    }

    pub fn set_theme_config(&mut self, config: &ThemeConfig) {
        self.prefs.set_theme_config(config);
        self.publish(DeskEvent::PreferencesChanged {
            key: THEME_CONFIG.to_string(),
        });
    }

    pub fn reset_theme_config(&mut self) {
        self.set_theme_config(&ThemeConfig::default());
    }

    /// Returns true on a new high score
    pub fn record_score(&mut self, game: GameKind, score: u64) -> bool {
        let record = self.prefs.record_score(game, score);
        if record {
            self.publish(DeskEvent::PreferencesChanged {
                key: game.score_key().to_string(),
            });
        }
        record
    }

    /// Publish a sound cue if sound is on
    pub fn play(&mut self, cue: SoundCue) {
        if self.prefs.sound_enabled() {
            self.publish(DeskEvent::SoundCue { cue });
        }
    }

    // ===== Queries =====

    pub fn windows(&self) -> &[WindowRecord] {
        self.wm.windows()
    }

    pub fn window(&self, id: &str) -> Option<&WindowRecord> {
        self.wm.window(id)
    }

    pub fn render_order(&self) -> Vec<&WindowRecord> {
        self.wm.render_order()
    }

    pub fn focused(&self) -> Option<&str> {
        self.wm.focused()
    }

    pub fn manager(&self) -> &WindowManager {
        &self.wm
    }

    pub fn gesture(&self) -> &GeometryController {
        &self.geometry
    }
}
