// Tauri plugin exposing the desktop to the webview.
// Commands are invoked as `plugin:desktop|<command>`; every DeskEvent is
// re-emitted to the webview under its kebab-case name.

use std::sync::Arc;

use tauri::plugin::{Builder, TauriPlugin};
use tauri::{AppHandle, Emitter, Manager, Runtime, State};

use crate::config::DesktopConfig;
use crate::deferred::{self, SharedDesktop};
use crate::geometry::{GestureOutcome, Point, ResizeDirection, Viewport};
use crate::icons::DesktopIcon;
use crate::launcher::{AppCatalog, GameKind};
use crate::prefs::{JsonFileStore, KeyValueStore, MemoryStore, Preferences, ThemeConfig};
use crate::shell::context_menu::{ContextAction, ContextMenu, ContextTarget};
use crate::shell::start_menu::{StartEntry, StartTab};
use crate::shell::taskbar::TaskbarEntry;
use crate::shell::Desktop;
use crate::state::window::{LaunchParams, WindowRecord};

const PREFS_FILE: &str = "preferences.json";

/// Managed state wrapper
pub struct DesktopState(pub SharedDesktop);

fn with_desktop<T>(state: &State<'_, DesktopState>, f: impl FnOnce(&mut Desktop) -> T) -> T {
    let mut desk = deferred::lock(&state.0);
    f(&mut desk)
}

// ===== Window Management Commands =====

#[tauri::command]
fn open_app(
    id: String,
    params: Option<LaunchParams>,
    state: State<'_, DesktopState>,
) -> Option<WindowRecord> {
    with_desktop(&state, |d| d.open_with(&id, params.unwrap_or_default()))
}

/// Animated close. Async so the removal timer runs on the Tauri runtime.
#[tauri::command]
async fn close_app(id: String, state: State<'_, DesktopState>) -> Result<bool, String> {
    Ok(deferred::close_window(&state.0, &id).is_some())
}

#[tauri::command]
fn minimize_app(id: String, state: State<'_, DesktopState>) -> Option<WindowRecord> {
    with_desktop(&state, |d| d.minimize(&id))
}

#[tauri::command]
fn restore_app(id: String, state: State<'_, DesktopState>) -> Option<WindowRecord> {
    with_desktop(&state, |d| d.restore(&id))
}

#[tauri::command]
fn maximize_app(id: String, state: State<'_, DesktopState>) -> Option<WindowRecord> {
    with_desktop(&state, |d| d.maximize(&id))
}

#[tauri::command]
fn focus_app(id: String, state: State<'_, DesktopState>) -> Option<WindowRecord> {
    with_desktop(&state, |d| d.focus(&id))
}

#[tauri::command]
fn center_app(id: String, state: State<'_, DesktopState>) -> Option<WindowRecord> {
    with_desktop(&state, |d| d.center(&id))
}

#[tauri::command]
fn minimize_all(state: State<'_, DesktopState>) -> Vec<String> {
    with_desktop(&state, |d| d.minimize_all())
}

#[tauri::command]
fn toggle_hide_app(id: String, state: State<'_, DesktopState>) -> Option<bool> {
    with_desktop(&state, |d| d.toggle_hidden(&id))
}

#[tauri::command]
fn open_settings(tab: Option<String>, state: State<'_, DesktopState>) -> Option<WindowRecord> {
    with_desktop(&state, |d| d.open_settings(tab.as_deref()))
}

#[tauri::command]
fn open_properties(id: String, state: State<'_, DesktopState>) -> Option<WindowRecord> {
    with_desktop(&state, |d| d.open_properties(&id))
}

#[tauri::command]
fn get_windows(state: State<'_, DesktopState>) -> Vec<WindowRecord> {
    with_desktop(&state, |d| d.windows().to_vec())
}

#[tauri::command]
fn get_focused(state: State<'_, DesktopState>) -> Option<String> {
    with_desktop(&state, |d| d.focused().map(str::to_string))
}

#[tauri::command]
fn set_viewport(width: f64, height: f64, state: State<'_, DesktopState>) {
    with_desktop(&state, |d| d.set_viewport(Viewport::new(width, height)))
}

#[tauri::command]
fn shutdown(state: State<'_, DesktopState>) {
    with_desktop(&state, |d| d.request_shutdown())
}

// ===== Pointer Gesture Commands =====

#[tauri::command]
fn header_pointer_down(id: String, x: f64, y: f64, state: State<'_, DesktopState>) -> GestureOutcome {
    with_desktop(&state, |d| d.header_pointer_down(&id, Point::new(x, y)))
}

#[tauri::command]
fn resize_pointer_down(
    id: String,
    direction: String,
    x: f64,
    y: f64,
    state: State<'_, DesktopState>,
) -> Result<GestureOutcome, String> {
    let direction = ResizeDirection::from_str(&direction)
        .ok_or_else(|| format!("Invalid resize direction: {}", direction))?;
    Ok(with_desktop(&state, |d| {
        d.resize_pointer_down(&id, direction, Point::new(x, y))
    }))
}

#[tauri::command]
fn pointer_move(x: f64, y: f64, state: State<'_, DesktopState>) -> GestureOutcome {
    with_desktop(&state, |d| d.pointer_move(Point::new(x, y)))
}

#[tauri::command]
fn pointer_up(state: State<'_, DesktopState>) -> GestureOutcome {
    with_desktop(&state, |d| d.pointer_up())
}

#[tauri::command]
fn header_double_click(id: String, state: State<'_, DesktopState>) -> Option<WindowRecord> {
    with_desktop(&state, |d| d.header_double_click(&id))
}

// ===== Desktop Icon Commands =====

#[tauri::command]
fn get_icons(state: State<'_, DesktopState>) -> Vec<DesktopIcon> {
    with_desktop(&state, |d| d.visible_icons())
}

#[tauri::command]
fn icon_pointer_down(id: String, x: f64, y: f64, state: State<'_, DesktopState>) -> bool {
    with_desktop(&state, |d| d.icon_pointer_down(&id, Point::new(x, y)))
}

#[tauri::command]
fn icon_click(id: String, state: State<'_, DesktopState>) -> Option<WindowRecord> {
    with_desktop(&state, |d| d.icon_click(&id))
}

#[tauri::command]
fn auto_arrange(state: State<'_, DesktopState>) {
    with_desktop(&state, |d| d.auto_arrange())
}

// ===== Shell Chrome Commands =====

#[tauri::command]
fn taskbar_entries(state: State<'_, DesktopState>) -> Vec<TaskbarEntry> {
    with_desktop(&state, |d| d.taskbar_entries())
}

#[tauri::command]
fn taskbar_click(id: String, state: State<'_, DesktopState>) -> Option<WindowRecord> {
    with_desktop(&state, |d| d.taskbar_click(&id))
}

#[tauri::command]
fn update_taskbar_config(key: String, value: bool, state: State<'_, DesktopState>) -> Result<(), String> {
    if with_desktop(&state, |d| d.update_taskbar_config(&key, value)) {
        Ok(())
    } else {
        Err(format!("Unknown taskbar setting: {}", key))
    }
}

#[tauri::command]
fn get_background(state: State<'_, DesktopState>) -> String {
    with_desktop(&state, |d| d.background().to_string())
}

#[tauri::command]
fn set_background(value: String, state: State<'_, DesktopState>) -> bool {
    with_desktop(&state, |d| d.set_background(&value))
}

#[tauri::command]
fn toggle_start_menu(state: State<'_, DesktopState>) -> bool {
    with_desktop(&state, |d| d.toggle_start_menu())
}

#[tauri::command]
fn handle_key(key: String, state: State<'_, DesktopState>) -> bool {
    with_desktop(&state, |d| d.handle_key(&key))
}

#[tauri::command]
fn start_menu_entries(
    query: Option<String>,
    tab: Option<StartTab>,
    state: State<'_, DesktopState>,
) -> Vec<StartEntry> {
    with_desktop(&state, |d| {
        d.set_start_query(query.as_deref().unwrap_or(""));
        if let Some(tab) = tab {
            d.set_start_tab(tab);
        }
        d.start_menu_entries()
    })
}

#[tauri::command]
fn launch_from_start(id: String, state: State<'_, DesktopState>) -> Option<WindowRecord> {
    with_desktop(&state, |d| d.launch_from_start(&id))
}

#[tauri::command]
fn open_context_menu(
    target: ContextTarget,
    x: f64,
    y: f64,
    state: State<'_, DesktopState>,
) -> Option<ContextMenu> {
    with_desktop(&state, |d| d.open_context_menu(target, Point::new(x, y)).cloned())
}

#[tauri::command]
fn select_context_action(action: ContextAction, state: State<'_, DesktopState>) -> bool {
    with_desktop(&state, |d| d.select_context_action(action))
}

#[tauri::command]
fn dismiss_context_menu(state: State<'_, DesktopState>) {
    with_desktop(&state, |d| d.dismiss_context_menu())
}

// ===== Preference Commands =====

#[tauri::command]
fn toggle_sound(state: State<'_, DesktopState>) -> bool {
    with_desktop(&state, |d| d.toggle_sound())
}

#[tauri::command]
fn toggle_particles(state: State<'_, DesktopState>) -> bool {
    with_desktop(&state, |d| d.toggle_particles())
}

#[tauri::command]
fn set_os_theme(name: String, state: State<'_, DesktopState>) {
    with_desktop(&state, |d| d.set_os_theme(&name))
}

#[tauri::command]
fn get_theme_config(state: State<'_, DesktopState>) -> ThemeConfig {
    with_desktop(&state, |d| d.prefs().theme_config())
}

#[tauri::command]
fn set_theme_config(config: ThemeConfig, state: State<'_, DesktopState>) {
    with_desktop(&state, |d| d.set_theme_config(&config))
}

#[tauri::command]
fn reset_theme_config(state: State<'_, DesktopState>) {
    with_desktop(&state, |d| d.reset_theme_config())
}

#[tauri::command]
fn record_score(game: GameKind, score: u64, state: State<'_, DesktopState>) -> bool {
    with_desktop(&state, |d| d.record_score(game, score))
}

#[tauri::command]
fn high_score(game: GameKind, state: State<'_, DesktopState>) -> u64 {
    with_desktop(&state, |d| d.prefs().high_score(game))
}

fn open_store<R: Runtime>(app: &AppHandle<R>) -> Box<dyn KeyValueStore> {
    match app.path().app_data_dir() {
        Ok(dir) => Box::new(JsonFileStore::open(dir.join(PREFS_FILE))),
        Err(e) => {
            tracing::warn!(event = "desk.plugin.data_dir_unavailable", error = %e);
            Box::new(MemoryStore::new())
        }
    }
}

/// Build the desktop plugin. Register with `tauri::Builder::plugin`.
pub fn init<R: Runtime>(config: DesktopConfig) -> TauriPlugin<R> {
    Builder::new("desktop")
        .invoke_handler(tauri::generate_handler![
            open_app,
            close_app,
            minimize_app,
            restore_app,
            maximize_app,
            focus_app,
            center_app,
            minimize_all,
            toggle_hide_app,
            open_settings,
            open_properties,
            get_windows,
            get_focused,
            set_viewport,
            shutdown,
            header_pointer_down,
            resize_pointer_down,
            pointer_move,
            pointer_up,
            header_double_click,
            get_icons,
            icon_pointer_down,
            icon_click,
            auto_arrange,
            taskbar_entries,
            taskbar_click,
            update_taskbar_config,
            get_background,
            set_background,
            toggle_start_menu,
            handle_key,
            start_menu_entries,
            launch_from_start,
            open_context_menu,
            select_context_action,
            dismiss_context_menu,
            toggle_sound,
            toggle_particles,
            set_os_theme,
            get_theme_config,
            set_theme_config,
            reset_theme_config,
            record_score,
            high_score,
        ])
        .setup(move |app, _api| {
            let prefs = Preferences::new(open_store(app));
            let mut desktop = Desktop::new(
                config,
                Arc::new(AppCatalog::builtin()),
                Viewport::default(),
                prefs,
            );

            let handle = app.clone();
            desktop.subscribe(move |event| {
                if let Err(e) = handle.emit(event.name(), event) {
                    tracing::warn!(event = "desk.plugin.emit_failed", name = event.name(), error = %e);
                }
            });

            let shared = deferred::shared(desktop);
            app.manage(DesktopState(shared.clone()));

            tauri::async_runtime::spawn(async move {
                if let Some(task) = deferred::boot(&shared) {
                    if let Err(e) = task.await {
                        tracing::error!(event = "desk.plugin.boot_failed", error = %e);
                    }
                }
            });

            tracing::info!(event = "desk.plugin.ready");
            Ok(())
        })
        .build()
}
