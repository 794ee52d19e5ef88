// Timer-driven follow-ups: close animations and the boot auto-launch.
// Every task re-checks its target after sleeping; the window may be gone.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::task::JoinHandle;

use crate::shell::Desktop;

pub type SharedDesktop = Arc<Mutex<Desktop>>;

pub fn shared(desktop: Desktop) -> SharedDesktop {
    Arc::new(Mutex::new(desktop))
}

/// Lock the desktop. A panic in a listener must not wedge the shell, so a
/// poisoned lock is recovered.
pub fn lock(desktop: &SharedDesktop) -> MutexGuard<'_, Desktop> {
    desktop.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Start the close animation and remove the window once it has played.
/// Returns `None` (and schedules nothing) if the window is unknown or already closing.
pub fn close_window(desktop: &SharedDesktop, id: &str) -> Option<JoinHandle<()>> {
    let delay = {
        let mut desk = lock(desktop);
        desk.begin_close(id)?;
        Duration::from_millis(desk.manager().config().timing.close_animation_ms)
    };

    let desktop = Arc::clone(desktop);
    let id = id.to_string();
    Some(tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        let mut desk = lock(&desktop);
        if desk.finish_close(&id).is_none() {
            tracing::debug!(event = "desk.deferred.close_skipped", app_id = %id);
        }
    }))
}

/// Run the boot sequence: open the configured app after a delay, then
/// maximize it if the user has not closed or maximized it meanwhile.
pub fn boot(desktop: &SharedDesktop) -> Option<JoinHandle<()>> {
    let (app, launch_delay, maximize_delay) = {
        let desk = lock(desktop);
        let timing = &desk.manager().config().timing;
        (
            timing.auto_launch.clone()?,
            Duration::from_millis(timing.auto_launch_delay_ms),
            Duration::from_millis(timing.auto_maximize_delay_ms),
        )
    };

    tracing::info!(event = "desk.deferred.boot_scheduled", app_id = %app);
    let desktop = Arc::clone(desktop);
    Some(tokio::spawn(async move {
        tokio::time::sleep(launch_delay).await;
        let opened = lock(&desktop).open(&app).is_some();
        if !opened {
            tracing::warn!(event = "desk.deferred.auto_launch_unknown", app_id = %app);
            return;
        }

        tokio::time::sleep(maximize_delay).await;
        let mut desk = lock(&desktop);
        let still_restored = desk
            .window(&app)
            .is_some_and(|w| !w.maximized && !w.closing);
        if still_restored {
            desk.maximize(&app);
        } else {
            tracing::debug!(event = "desk.deferred.auto_maximize_skipped", app_id = %app);
        }
    }))
}
