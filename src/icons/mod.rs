// Desktop icon layout: column-major grid, live drag, snap-to-cell on release

use serde::{Deserialize, Serialize};

use crate::config::IconGridConfig;
use crate::geometry::{Point, Viewport};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesktopIcon {
    pub id: String,
    pub x: f64,
    pub y: f64,
}

impl DesktopIcon {
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

#[derive(Debug, Clone)]
struct IconDrag {
    id: String,
    offset: Point,
    moved: bool,
}

/// Highest column and row index an icon cell may occupy
fn grid_limits(viewport: Viewport, grid: &IconGridConfig, taskbar_height: f64) -> (f64, f64) {
    let max_col = ((viewport.width - grid.cell_width - grid.margin_x) / grid.cell_width)
        .floor()
        .max(0.0);
    let max_row = ((viewport.height - taskbar_height - grid.cell_height - grid.margin_y)
        / grid.cell_height)
        .floor()
        .max(0.0);
    (max_col, max_row)
}

/// Nearest grid cell to `position`, clamped so the cell stays on screen and
/// above the taskbar. Clamping happens in whole cells, so snapping an already
/// snapped position returns it unchanged.
pub fn snap_to_grid(
    position: Point,
    viewport: Viewport,
    grid: &IconGridConfig,
    taskbar_height: f64,
) -> Point {
    let (max_col, max_row) = grid_limits(viewport, grid, taskbar_height);
    let col = ((position.x - grid.margin_x) / grid.cell_width)
        .round()
        .clamp(0.0, max_col);
    let row = ((position.y - grid.margin_y) / grid.cell_height)
        .round()
        .clamp(0.0, max_row);
    Point::new(
        grid.margin_x + col * grid.cell_width,
        grid.margin_y + row * grid.cell_height,
    )
}

/// Column-major slots for `count` icons: fill a column top to bottom, then move right
pub fn arrange_positions(
    count: usize,
    viewport: Viewport,
    grid: &IconGridConfig,
    taskbar_height: f64,
) -> Vec<Point> {
    let rows = ((viewport.height - taskbar_height - grid.margin_y) / grid.cell_height)
        .floor()
        .max(1.0) as usize;

    (0..count)
        .map(|index| {
            let col = (index / rows) as f64;
            let row = (index % rows) as f64;
            Point::new(
                grid.margin_x + col * grid.cell_width,
                grid.margin_y + row * grid.cell_height,
            )
        })
        .collect()
}

/// Icon positions plus the drag gesture that moves them.
pub struct IconLayout {
    icons: Vec<DesktopIcon>,
    grid: IconGridConfig,
    taskbar_height: f64,
    drag: Option<IconDrag>,
    /// Set when a drag just ended so the trailing click does not launch the app
    suppress_click: bool,
}

impl IconLayout {
    pub fn new(ids: Vec<String>, grid: IconGridConfig, taskbar_height: f64, viewport: Viewport) -> Self {
        let mut layout = Self {
            icons: ids
                .into_iter()
                .map(|id| DesktopIcon { id, x: 0.0, y: 0.0 })
                .collect(),
            grid,
            taskbar_height,
            drag: None,
            suppress_click: false,
        };
        layout.auto_arrange(viewport);
        layout
    }

    pub fn icons(&self) -> &[DesktopIcon] {
        &self.icons
    }

    pub fn icon(&self, id: &str) -> Option<&DesktopIcon> {
        self.icons.iter().find(|i| i.id == id)
    }

    /// Icons not hidden by the user
    pub fn visible<'a>(&'a self, hidden: &'a [String]) -> impl Iterator<Item = &'a DesktopIcon> {
        self.icons.iter().filter(move |i| !hidden.contains(&i.id))
    }

    pub fn dragging(&self) -> Option<&str> {
        self.drag.as_ref().map(|d| d.id.as_str())
    }

    /// Reset every icon to its column-major slot
    pub fn auto_arrange(&mut self, viewport: Viewport) {
        let slots = arrange_positions(self.icons.len(), viewport, &self.grid, self.taskbar_height);
        for (icon, slot) in self.icons.iter_mut().zip(slots) {
            icon.x = slot.x;
            icon.y = slot.y;
        }
        tracing::debug!(event = "desk.icons.arranged", count = self.icons.len());
    }

    /// Pull every icon back onto the grid after the viewport changed
    pub fn reflow(&mut self, viewport: Viewport) {
        for icon in &mut self.icons {
            let snapped = snap_to_grid(icon.position(), viewport, &self.grid, self.taskbar_height);
            icon.x = snapped.x;
            icon.y = snapped.y;
        }
    }

    pub fn pointer_down(&mut self, id: &str, pointer: Point) -> bool {
        let Some(icon) = self.icon(id) else {
            return false;
        };
        self.drag = Some(IconDrag {
            id: id.to_string(),
            offset: pointer.offset_from(icon.position()),
            moved: false,
        });
        self.suppress_click = false;
        true
    }

    /// Move the dragged icon with the pointer. Returns false when no drag is active.
    pub fn pointer_move(&mut self, pointer: Point, viewport: Viewport) -> bool {
        let Some(drag) = self.drag.as_mut() else {
            return false;
        };
        drag.moved = true;

        let max_x = (viewport.width - self.grid.cell_width).max(0.0);
        let max_y = (viewport.height - self.taskbar_height - self.grid.cell_height).max(0.0);
        let target = pointer.offset_from(drag.offset);
        let id = drag.id.clone();

        match self.icons.iter_mut().find(|i| i.id == id) {
            Some(icon) => {
                icon.x = target.x.clamp(0.0, max_x);
                icon.y = target.y.clamp(0.0, max_y);
                true
            }
            None => {
                self.drag = None;
                false
            }
        }
    }

    /// End the drag, snapping the icon to the nearest grid cell
    pub fn pointer_up(&mut self, viewport: Viewport) -> Option<DesktopIcon> {
        let drag = self.drag.take()?;
        self.suppress_click = drag.moved;

        let grid = &self.grid;
        let taskbar_height = self.taskbar_height;
        let icon = self.icons.iter_mut().find(|i| i.id == drag.id)?;
        let snapped = snap_to_grid(icon.position(), viewport, grid, taskbar_height);
        icon.x = snapped.x;
        icon.y = snapped.y;

        tracing::debug!(event = "desk.icons.snapped", icon_id = %icon.id, x = icon.x, y = icon.y);
        Some(icon.clone())
    }

    /// Whether a click on an icon should launch its app.
    /// The click that trails a drag is swallowed.
    pub fn click(&mut self, id: &str) -> bool {
        if std::mem::take(&mut self.suppress_click) {
            return false;
        }
        self.icon(id).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TASKBAR: f64 = 70.0;

    fn vp() -> Viewport {
        Viewport::new(1280.0, 800.0)
    }

    fn ids(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("app{i}")).collect()
    }

    fn layout(n: usize) -> IconLayout {
        IconLayout::new(ids(n), IconGridConfig::default(), TASKBAR, vp())
    }

    #[test]
    fn test_arrange_fills_columns_first() {
        // (800 - 70 - 20) / 110 = 6 rows
        let slots = arrange_positions(8, vp(), &IconGridConfig::default(), TASKBAR);
        assert_eq!(slots[0], Point::new(20.0, 20.0));
        assert_eq!(slots[5], Point::new(20.0, 570.0));
        assert_eq!(slots[6], Point::new(120.0, 20.0));
        assert_eq!(slots[7], Point::new(120.0, 130.0));
    }

    #[test]
    fn test_arrange_on_tiny_viewport_keeps_one_row() {
        let slots = arrange_positions(3, Viewport::new(400.0, 100.0), &IconGridConfig::default(), TASKBAR);
        assert_eq!(slots, vec![
            Point::new(20.0, 20.0),
            Point::new(120.0, 20.0),
            Point::new(220.0, 20.0),
        ]);
    }

    #[test]
    fn test_auto_arrange_is_deterministic() {
        let mut a = layout(9);
        let mut b = layout(9);
        a.pointer_down("app3", Point::new(30.0, 360.0));
        a.pointer_move(Point::new(700.0, 400.0), vp());
        a.pointer_up(vp());

        a.auto_arrange(vp());
        b.auto_arrange(vp());
        assert_eq!(a.icons(), b.icons());
    }

    #[test]
    fn test_snap_rounds_to_nearest_cell() {
        let grid = IconGridConfig::default();
        assert_eq!(snap_to_grid(Point::new(160.0, 70.0), vp(), &grid, TASKBAR), Point::new(120.0, 20.0));
        assert_eq!(snap_to_grid(Point::new(171.0, 76.0), vp(), &grid, TASKBAR), Point::new(220.0, 130.0));
    }

    #[test]
    fn test_snap_clamps_above_taskbar_and_inside_viewport() {
        let grid = IconGridConfig::default();
        let snapped = snap_to_grid(Point::new(5000.0, 5000.0), vp(), &grid, TASKBAR);
        assert!(snapped.x + grid.cell_width <= 1280.0);
        assert!(snapped.y + grid.cell_height <= 800.0 - TASKBAR);

        let snapped = snap_to_grid(Point::new(-300.0, -300.0), vp(), &grid, TASKBAR);
        assert_eq!(snapped, Point::new(20.0, 20.0));
    }

    #[test]
    fn test_snap_is_idempotent() {
        let grid = IconGridConfig::default();
        let viewports = [vp(), Viewport::new(333.0, 257.0), Viewport::new(1920.0, 1080.0)];
        for viewport in viewports {
            for x in (-200..2200).step_by(37) {
                for y in (-200..1300).step_by(41) {
                    let once = snap_to_grid(Point::new(x as f64, y as f64), viewport, &grid, TASKBAR);
                    let twice = snap_to_grid(once, viewport, &grid, TASKBAR);
                    assert_eq!(once, twice);
                }
            }
        }
    }

    #[test]
    fn test_drag_moves_live_and_snaps_on_release() {
        let mut icons = layout(3);
        assert!(icons.pointer_down("app1", Point::new(30.0, 140.0)));
        assert!(icons.pointer_move(Point::new(260.0, 300.0), vp()));
        assert_eq!(icons.icon("app1").unwrap().position(), Point::new(250.0, 290.0));

        let dropped = icons.pointer_up(vp()).unwrap();
        assert_eq!(dropped.position(), Point::new(220.0, 240.0));
        assert!(icons.dragging().is_none());
    }

    #[test]
    fn test_click_after_drag_is_swallowed_once() {
        let mut icons = layout(2);
        icons.pointer_down("app0", Point::new(25.0, 25.0));
        icons.pointer_move(Point::new(400.0, 400.0), vp());
        icons.pointer_up(vp());

        assert!(!icons.click("app0"));
        assert!(icons.click("app0"));
    }

    #[test]
    fn test_press_without_move_still_clicks() {
        let mut icons = layout(2);
        icons.pointer_down("app0", Point::new(25.0, 25.0));
        icons.pointer_up(vp());
        assert!(icons.click("app0"));
        assert!(!icons.click("ghost"));
    }

    #[test]
    fn test_visible_skips_hidden() {
        let icons = layout(3);
        let hidden = vec!["app1".to_string()];
        let shown: Vec<&str> = icons.visible(&hidden).map(|i| i.id.as_str()).collect();
        assert_eq!(shown, vec!["app0", "app2"]);
    }
}
