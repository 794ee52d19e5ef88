// Snap zone detection and the rectangles each zone commits to

use super::types::{Point, Rect, SnapState, Viewport};
use crate::config::SnapConfig;

/// Work out which snap zone (if any) the pointer is in.
///
/// Corners win over edges. A corner is armed when the pointer is inside one
/// edge band and within `corner_band` of the adjoining edge. The bottom
/// corners are measured from the top of the taskbar band, not the viewport.
pub fn detect_zone(
    pointer: Point,
    viewport: Viewport,
    taskbar_height: f64,
    config: &SnapConfig,
) -> SnapState {
    let work = viewport.work_area(taskbar_height);
    let right = viewport.width;
    let bottom = work.height;

    let left_edge = pointer.x <= config.edge_band;
    let right_edge = pointer.x >= right - config.edge_band;
    let top_edge = pointer.y <= config.edge_band;

    let left_corner = pointer.x <= config.corner_band;
    let right_corner = pointer.x >= right - config.corner_band;
    let top_corner = pointer.y <= config.corner_band;
    let bottom_corner = pointer.y >= bottom - config.corner_band;

    if (left_edge && top_corner) || (top_edge && left_corner) {
        SnapState::TopLeft
    } else if (right_edge && top_corner) || (top_edge && right_corner) {
        SnapState::TopRight
    } else if left_edge && bottom_corner {
        SnapState::BottomLeft
    } else if right_edge && bottom_corner {
        SnapState::BottomRight
    } else if left_edge {
        SnapState::Left
    } else if right_edge {
        SnapState::Right
    } else if top_edge {
        SnapState::Top
    } else {
        SnapState::None
    }
}

/// Rectangle a maximized window occupies: full width, everything above the taskbar.
pub fn maximized_rect(viewport: Viewport, taskbar_height: f64) -> Rect {
    viewport.work_area(taskbar_height)
}

/// Rectangle drawn by the preview overlay for a zone.
///
/// `Top` previews the full work area inset by the margin; committing it
/// maximizes instead of resizing (see [`commit_rect`]).
pub fn preview_rect(
    state: SnapState,
    viewport: Viewport,
    taskbar_height: f64,
    margin: f64,
) -> Option<Rect> {
    let work = viewport.work_area(taskbar_height);
    let m = margin;

    let half_w = ((work.width - 3.0 * m) / 2.0).max(0.0);
    let full_h = (work.height - 2.0 * m).max(0.0);
    let quarter_h = ((work.height - 3.0 * m) / 2.0).max(0.0);
    let right_x = work.width - m - half_w;
    let lower_y = m + quarter_h + m;

    let rect = match state {
        SnapState::None => return None,
        SnapState::Top => Rect::new(m, m, (work.width - 2.0 * m).max(0.0), full_h),
        SnapState::Left => Rect::new(m, m, half_w, full_h),
        SnapState::Right => Rect::new(right_x, m, half_w, full_h),
        SnapState::TopLeft => Rect::new(m, m, half_w, quarter_h),
        SnapState::TopRight => Rect::new(right_x, m, half_w, quarter_h),
        SnapState::BottomLeft => Rect::new(m, lower_y, half_w, quarter_h),
        SnapState::BottomRight => Rect::new(right_x, lower_y, half_w, quarter_h),
    };
    Some(rect)
}

/// Rectangle a released window is resized to. `None` for `Top` (maximize) and `None`.
pub fn commit_rect(
    state: SnapState,
    viewport: Viewport,
    taskbar_height: f64,
    margin: f64,
) -> Option<Rect> {
    match state {
        SnapState::None | SnapState::Top => None,
        other => preview_rect(other, viewport, taskbar_height, margin),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TASKBAR: f64 = 70.0;

    fn vp() -> Viewport {
        Viewport::new(1280.0, 800.0)
    }

    fn zone(x: f64, y: f64) -> SnapState {
        detect_zone(Point::new(x, y), vp(), TASKBAR, &SnapConfig::default())
    }

    #[test]
    fn test_edge_zones() {
        assert_eq!(zone(5.0, 400.0), SnapState::Left);
        assert_eq!(zone(1275.0, 400.0), SnapState::Right);
        assert_eq!(zone(640.0, 3.0), SnapState::Top);
        assert_eq!(zone(640.0, 400.0), SnapState::None);
    }

    #[test]
    fn test_corners_take_priority_over_edges() {
        // Inside the left edge band and near the top
        assert_eq!(zone(5.0, 50.0), SnapState::TopLeft);
        // Inside the top band and near the left
        assert_eq!(zone(60.0, 5.0), SnapState::TopLeft);
        assert_eq!(zone(1275.0, 50.0), SnapState::TopRight);
        // Bottom corners are measured from the top of the taskbar (730)
        assert_eq!(zone(5.0, 700.0), SnapState::BottomLeft);
        assert_eq!(zone(1275.0, 640.0), SnapState::BottomRight);
        assert_eq!(zone(1275.0, 620.0), SnapState::Right);
    }

    #[test]
    fn test_left_half_rect() {
        let rect = commit_rect(SnapState::Left, vp(), TASKBAR, 10.0).unwrap();
        assert_eq!(rect, Rect::new(10.0, 10.0, 625.0, 710.0));
    }

    #[test]
    fn test_right_half_mirrors_left() {
        let left = commit_rect(SnapState::Left, vp(), TASKBAR, 10.0).unwrap();
        let right = commit_rect(SnapState::Right, vp(), TASKBAR, 10.0).unwrap();
        assert_eq!(right.width, left.width);
        assert_eq!(right.x + right.width, 1270.0);
        assert_eq!(right.x - (left.x + left.width), 10.0);
    }

    #[test]
    fn test_quarters_tile_the_work_area() {
        let tl = commit_rect(SnapState::TopLeft, vp(), TASKBAR, 10.0).unwrap();
        let bl = commit_rect(SnapState::BottomLeft, vp(), TASKBAR, 10.0).unwrap();
        assert_eq!(tl.height, bl.height);
        assert_eq!(bl.y, tl.y + tl.height + 10.0);
        assert_eq!(bl.y + bl.height, 730.0 - 10.0);
    }

    #[test]
    fn test_top_commits_to_maximize_not_rect() {
        assert!(commit_rect(SnapState::Top, vp(), TASKBAR, 10.0).is_none());
        assert!(preview_rect(SnapState::Top, vp(), TASKBAR, 10.0).is_some());
        assert_eq!(maximized_rect(vp(), TASKBAR), Rect::new(0.0, 0.0, 1280.0, 730.0));
    }

    #[test]
    fn test_tiny_viewport_never_goes_negative() {
        let rect = commit_rect(SnapState::Left, Viewport::new(20.0, 60.0), TASKBAR, 10.0).unwrap();
        assert!(rect.width >= 0.0);
        assert!(rect.height >= 0.0);
    }
}
