// Pointer gesture state machine for window headers and resize handles

use serde::Serialize;

use super::resize::resize_rect;
use super::snap;
use super::types::{Point, Rect, ResizeDirection, SnapState};
use crate::state::window::WindowRecord;
use crate::state::WindowManager;

/// Gesture in progress. At most one at a time.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Gesture {
    #[default]
    Idle,
    /// Header pressed on a maximized window; waiting to see if it tears off
    MaximizedDragPending {
        id: String,
        origin: Point,
        click_ratio: f64,
    },
    Dragging {
        id: String,
        offset: Point, // pointer minus window origin
    },
    Resizing {
        id: String,
        direction: ResizeDirection,
        origin: Point, // pointer at resize start
        start: Rect,   // bounds at resize start
    },
}

/// What a pointer event did
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "outcome", content = "zone", rename_all = "kebab-case")]
pub enum GestureOutcome {
    Ignored,
    Pending,
    DragStarted,
    ResizeStarted,
    Moved,
    Resized,
    /// Released outside every snap zone; the window stays where it was dragged
    Dropped,
    Snapped(SnapState),
    Maximized,
    Released,
}

/// Drives drag, resize and snap for whichever window is under the pointer.
///
/// The controller holds only gesture state. Geometry and flags live in the
/// [`WindowManager`] and are written through it, so the registry keeps sole
/// ownership of z-order allocation.
#[derive(Debug, Default)]
pub struct GeometryController {
    gesture: Gesture,
}

impl GeometryController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn gesture(&self) -> &Gesture {
        &self.gesture
    }

    pub fn is_idle(&self) -> bool {
        self.gesture == Gesture::Idle
    }

    /// Pointer pressed on a window header
    pub fn header_pointer_down(
        &mut self,
        wm: &mut WindowManager,
        id: &str,
        pointer: Point,
    ) -> GestureOutcome {
        let Some(window) = interactive(wm, id) else {
            return GestureOutcome::Ignored;
        };
        let maximized = window.maximized;
        let origin = window.bounds.origin();

        wm.focus(id);

        if maximized {
            let width = wm.viewport().width;
            let click_ratio = if width > 0.0 { pointer.x / width } else { 0.0 };
            self.gesture = Gesture::MaximizedDragPending {
                id: id.to_string(),
                origin: pointer,
                click_ratio,
            };
            tracing::debug!(event = "desk.gesture.drag_pending", app_id = id, click_ratio = click_ratio);
            GestureOutcome::Pending
        } else {
            self.gesture = Gesture::Dragging {
                id: id.to_string(),
                offset: pointer.offset_from(origin),
            };
            tracing::debug!(event = "desk.gesture.drag_started", app_id = id);
            GestureOutcome::DragStarted
        }
    }

    /// Pointer pressed on one of the eight resize handles
    pub fn resize_pointer_down(
        &mut self,
        wm: &mut WindowManager,
        id: &str,
        direction: ResizeDirection,
        pointer: Point,
    ) -> GestureOutcome {
        let Some(window) = interactive(wm, id) else {
            return GestureOutcome::Ignored;
        };
        // Maximized windows have no handles
        if window.maximized {
            return GestureOutcome::Ignored;
        }
        let start = window.bounds;

        wm.focus(id);
        self.gesture = Gesture::Resizing {
            id: id.to_string(),
            direction,
            origin: pointer,
            start,
        };
        tracing::debug!(event = "desk.gesture.resize_started", app_id = id, direction = ?direction);
        GestureOutcome::ResizeStarted
    }

    pub fn pointer_move(&mut self, wm: &mut WindowManager, pointer: Point) -> GestureOutcome {
        match self.gesture.clone() {
            Gesture::Idle => GestureOutcome::Ignored,

            Gesture::MaximizedDragPending {
                id,
                origin,
                click_ratio,
            } => {
                if pointer.distance_to(origin) <= wm.config().snap.drag_threshold {
                    return GestureOutcome::Pending;
                }
                let Some(window) = wm.window(&id) else {
                    return self.abandon(wm);
                };
                let maximized = window.maximized;
                let grab_x = window.bounds.width * click_ratio;
                let grab_y = wm.config().snap.grab_offset;

                // Clear the maximize flag through the registry
                if maximized {
                    wm.maximize(&id);
                }
                wm.move_to(&id, Point::new(pointer.x - grab_x, pointer.y - grab_y));
                self.update_snap_candidate(wm, pointer);

                tracing::debug!(event = "desk.gesture.torn_off", app_id = %id);
                self.gesture = Gesture::Dragging {
                    id,
                    offset: Point::new(grab_x, grab_y),
                };
                GestureOutcome::DragStarted
            }

            Gesture::Dragging { id, offset } => {
                if wm.move_to(&id, pointer.offset_from(offset)).is_none() {
                    return self.abandon(wm);
                }
                self.update_snap_candidate(wm, pointer);
                GestureOutcome::Moved
            }

            Gesture::Resizing {
                id,
                direction,
                origin,
                start,
            } => {
                let cfg = &wm.config().windows;
                let bounds = resize_rect(
                    start,
                    direction,
                    pointer.x - origin.x,
                    pointer.y - origin.y,
                    cfg.min_width,
                    cfg.min_height,
                );
                if wm.set_bounds(&id, bounds).is_none() {
                    return self.abandon(wm);
                }
                GestureOutcome::Resized
            }
        }
    }

    pub fn pointer_up(&mut self, wm: &mut WindowManager) -> GestureOutcome {
        let gesture = std::mem::take(&mut self.gesture);
        let candidate = wm.snap_preview();
        wm.set_snap_preview(SnapState::None);

        match gesture {
            Gesture::Idle => GestureOutcome::Ignored,
            Gesture::MaximizedDragPending { .. } | Gesture::Resizing { .. } => {
                GestureOutcome::Released
            }
            Gesture::Dragging { id, .. } => {
                let Some(window) = wm.window(&id) else {
                    return GestureOutcome::Ignored;
                };
                let maximized = window.maximized;

                match candidate {
                    SnapState::None => GestureOutcome::Dropped,
                    SnapState::Top => {
                        if !maximized {
                            wm.maximize(&id);
                        }
                        tracing::debug!(event = "desk.gesture.snap_maximized", app_id = %id);
                        GestureOutcome::Maximized
                    }
                    zone => {
                        if maximized {
                            wm.maximize(&id);
                        }
                        let cfg = wm.config();
                        let rect = snap::commit_rect(
                            zone,
                            wm.viewport(),
                            cfg.taskbar.height,
                            cfg.snap.margin,
                        );
                        if let Some(rect) = rect {
                            wm.set_bounds(&id, rect);
                        }
                        tracing::debug!(event = "desk.gesture.snapped", app_id = %id, zone = zone.as_str());
                        GestureOutcome::Snapped(zone)
                    }
                }
            }
        }
    }

    /// Double-click on a header toggles maximize
    pub fn header_double_click(&mut self, wm: &mut WindowManager, id: &str) -> Option<WindowRecord> {
        interactive(wm, id)?;
        self.reset(wm);
        wm.maximize(id)
    }

    /// Drop any gesture in progress (pointer capture lost, window closed, ...)
    pub fn reset(&mut self, wm: &mut WindowManager) {
        self.gesture = Gesture::Idle;
        wm.set_snap_preview(SnapState::None);
    }

    fn update_snap_candidate(&self, wm: &mut WindowManager, pointer: Point) {
        let cfg = wm.config();
        let zone = snap::detect_zone(pointer, wm.viewport(), cfg.taskbar.height, &cfg.snap);
        wm.set_snap_preview(zone);
    }

    fn abandon(&mut self, wm: &mut WindowManager) -> GestureOutcome {
        tracing::debug!(event = "desk.gesture.target_gone");
        self.reset(wm);
        GestureOutcome::Ignored
    }
}

/// A window that can take pointer gestures right now
fn interactive<'a>(wm: &'a WindowManager, id: &str) -> Option<&'a WindowRecord> {
    wm.window(id).filter(|w| !w.minimized && !w.closing)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::config::DesktopConfig;
    use crate::geometry::Viewport;
    use crate::launcher::AppCatalog;
    use crate::state::window::LaunchParams;

    fn manager() -> WindowManager {
        WindowManager::new(
            Arc::new(AppCatalog::builtin()),
            DesktopConfig::default(),
            Viewport::new(1280.0, 800.0),
        )
    }

    fn opened(id: &str) -> WindowManager {
        let mut wm = manager();
        wm.open(id, LaunchParams::new());
        wm
    }

    #[test]
    fn test_drag_follows_pointer() {
        let mut wm = opened("terminal");
        let mut ctl = GeometryController::new();
        // terminal opens at (340, 225)
        assert_eq!(
            ctl.header_pointer_down(&mut wm, "terminal", Point::new(400.0, 240.0)),
            GestureOutcome::DragStarted
        );
        assert_eq!(ctl.pointer_move(&mut wm, Point::new(500.0, 300.0)), GestureOutcome::Moved);
        assert_eq!(wm.window("terminal").unwrap().bounds.origin(), Point::new(440.0, 285.0));

        assert_eq!(ctl.pointer_up(&mut wm), GestureOutcome::Dropped);
        assert_eq!(wm.window("terminal").unwrap().bounds.origin(), Point::new(440.0, 285.0));
        assert!(ctl.is_idle());
    }

    #[test]
    fn test_header_press_focuses() {
        let mut wm = opened("terminal");
        wm.open("about", LaunchParams::new());
        let mut ctl = GeometryController::new();
        ctl.header_pointer_down(&mut wm, "terminal", Point::new(400.0, 240.0));
        assert_eq!(wm.focused(), Some("terminal"));
        assert_eq!(wm.render_order().last().unwrap().id, "terminal");
    }

    #[test]
    fn test_left_edge_release_snaps_to_half() {
        let mut wm = opened("terminal");
        let mut ctl = GeometryController::new();
        ctl.header_pointer_down(&mut wm, "terminal", Point::new(400.0, 240.0));
        ctl.pointer_move(&mut wm, Point::new(5.0, 300.0));
        assert_eq!(wm.snap_preview(), SnapState::Left);

        assert_eq!(ctl.pointer_up(&mut wm), GestureOutcome::Snapped(SnapState::Left));
        let bounds = wm.window("terminal").unwrap().bounds;
        assert_eq!(bounds, Rect::new(10.0, 10.0, 625.0, 710.0));
        assert_eq!(bounds.width, (1280.0 - 3.0 * 10.0) / 2.0);
        assert_eq!(bounds.height, 800.0 - 70.0 - 2.0 * 10.0);
        assert_eq!(wm.snap_preview(), SnapState::None);
    }

    #[test]
    fn test_top_edge_release_maximizes() {
        let mut wm = opened("terminal");
        let mut ctl = GeometryController::new();
        ctl.header_pointer_down(&mut wm, "terminal", Point::new(400.0, 240.0));
        ctl.pointer_move(&mut wm, Point::new(640.0, 5.0));
        assert_eq!(wm.snap_preview(), SnapState::Top);

        assert_eq!(ctl.pointer_up(&mut wm), GestureOutcome::Maximized);
        assert!(wm.window("terminal").unwrap().maximized);
        assert_eq!(wm.snap_preview(), SnapState::None);
    }

    #[test]
    fn test_corner_wins_over_edge() {
        let mut wm = opened("terminal");
        let mut ctl = GeometryController::new();
        ctl.header_pointer_down(&mut wm, "terminal", Point::new(400.0, 240.0));
        ctl.pointer_move(&mut wm, Point::new(5.0, 5.0));
        assert_eq!(ctl.pointer_up(&mut wm), GestureOutcome::Snapped(SnapState::TopLeft));
        assert_eq!(
            wm.window("terminal").unwrap().bounds,
            Rect::new(10.0, 10.0, 625.0, 350.0)
        );
    }

    #[test]
    fn test_leaving_a_zone_clears_the_preview() {
        let mut wm = opened("terminal");
        let mut ctl = GeometryController::new();
        ctl.header_pointer_down(&mut wm, "terminal", Point::new(400.0, 240.0));
        ctl.pointer_move(&mut wm, Point::new(5.0, 300.0));
        ctl.pointer_move(&mut wm, Point::new(300.0, 300.0));
        assert_eq!(wm.snap_preview(), SnapState::None);
        assert_eq!(ctl.pointer_up(&mut wm), GestureOutcome::Dropped);
    }

    #[test]
    fn test_maximized_drag_keeps_relative_cursor_point() {
        let mut wm = opened("terminal");
        wm.maximize("terminal");
        let width = wm.window("terminal").unwrap().bounds.width;
        let mut ctl = GeometryController::new();

        let down = Point::new(320.0, 30.0);
        assert_eq!(ctl.header_pointer_down(&mut wm, "terminal", down), GestureOutcome::Pending);
        // Within the threshold nothing happens
        assert_eq!(ctl.pointer_move(&mut wm, Point::new(323.0, 30.0)), GestureOutcome::Pending);
        assert!(wm.window("terminal").unwrap().maximized);

        let moved = Point::new(340.0, 30.0);
        assert_eq!(ctl.pointer_move(&mut wm, moved), GestureOutcome::DragStarted);
        let win = wm.window("terminal").unwrap();
        assert!(!win.maximized);
        assert_eq!(win.bounds.width, width);

        let ratio_before = down.x / 1280.0;
        let ratio_after = (moved.x - win.bounds.x) / win.bounds.width;
        assert!((ratio_before - ratio_after).abs() < 1e-9);
        assert_eq!(win.bounds.y, 30.0 - 15.0);

        // Further moves keep the same grab point
        ctl.pointer_move(&mut wm, Point::new(400.0, 200.0));
        let win = wm.window("terminal").unwrap();
        assert_eq!(win.bounds.origin(), Point::new(400.0 - width * 0.25, 185.0));
    }

    #[test]
    fn test_maximized_click_without_travel_stays_maximized() {
        let mut wm = opened("terminal");
        wm.maximize("terminal");
        let mut ctl = GeometryController::new();
        ctl.header_pointer_down(&mut wm, "terminal", Point::new(320.0, 30.0));
        assert_eq!(ctl.pointer_up(&mut wm), GestureOutcome::Released);
        assert!(wm.window("terminal").unwrap().maximized);
    }

    #[test]
    fn test_nw_resize_moves_origin_in_lockstep() {
        let mut wm = opened("terminal");
        wm.set_bounds("terminal", Rect::new(100.0, 100.0, 800.0, 600.0));
        let mut ctl = GeometryController::new();

        assert_eq!(
            ctl.resize_pointer_down(&mut wm, "terminal", ResizeDirection::NW, Point::new(100.0, 100.0)),
            GestureOutcome::ResizeStarted
        );
        ctl.pointer_move(&mut wm, Point::new(150.0, 150.0));
        assert_eq!(
            wm.window("terminal").unwrap().bounds,
            Rect::new(150.0, 150.0, 750.0, 550.0)
        );
        assert_eq!(ctl.pointer_up(&mut wm), GestureOutcome::Released);
    }

    #[test]
    fn test_resize_stops_at_minimum() {
        let mut wm = opened("terminal");
        wm.set_bounds("terminal", Rect::new(100.0, 100.0, 800.0, 600.0));
        let mut ctl = GeometryController::new();
        ctl.resize_pointer_down(&mut wm, "terminal", ResizeDirection::SW, Point::new(100.0, 700.0));
        ctl.pointer_move(&mut wm, Point::new(1000.0, 0.0));

        let bounds = wm.window("terminal").unwrap().bounds;
        assert_eq!(bounds, Rect::new(600.0, 100.0, 300.0, 200.0));
    }

    #[test]
    fn test_no_gestures_on_maximized_resize_or_minimized_windows() {
        let mut wm = opened("terminal");
        let mut ctl = GeometryController::new();
        wm.maximize("terminal");
        assert_eq!(
            ctl.resize_pointer_down(&mut wm, "terminal", ResizeDirection::SE, Point::new(0.0, 0.0)),
            GestureOutcome::Ignored
        );

        wm.minimize("terminal");
        assert_eq!(
            ctl.header_pointer_down(&mut wm, "terminal", Point::new(0.0, 0.0)),
            GestureOutcome::Ignored
        );
        assert!(ctl.header_double_click(&mut wm, "terminal").is_none());
        assert!(ctl.is_idle());
    }

    #[test]
    fn test_window_closed_mid_drag_abandons_gesture() {
        let mut wm = opened("terminal");
        let mut ctl = GeometryController::new();
        ctl.header_pointer_down(&mut wm, "terminal", Point::new(400.0, 240.0));
        ctl.pointer_move(&mut wm, Point::new(5.0, 300.0));
        wm.close("terminal");

        assert_eq!(ctl.pointer_move(&mut wm, Point::new(6.0, 300.0)), GestureOutcome::Ignored);
        assert!(ctl.is_idle());
        assert_eq!(wm.snap_preview(), SnapState::None);
    }

    #[test]
    fn test_double_click_toggles_maximize() {
        let mut wm = opened("terminal");
        let mut ctl = GeometryController::new();
        assert!(ctl.header_double_click(&mut wm, "terminal").unwrap().maximized);
        assert!(!ctl.header_double_click(&mut wm, "terminal").unwrap().maximized);
    }
}
