// Core geometry types shared by the window manager, snap maths and icon grid

use serde::{Deserialize, Serialize};

/// A point in viewport pixels
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point
    pub fn distance_to(&self, other: Point) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }

    pub fn offset_from(&self, origin: Point) -> Point {
        Point::new(self.x - origin.x, self.y - origin.y)
    }
}

/// Represents a spatial rectangle for positioning windows
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn with_origin(self, origin: Point) -> Self {
        Self {
            x: origin.x,
            y: origin.y,
            ..self
        }
    }
}

/// Size of the browser viewport the desktop is laid out in
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Area above the taskbar band
    pub fn work_area(&self, taskbar_height: f64) -> Rect {
        Rect::new(0.0, 0.0, self.width, (self.height - taskbar_height).max(0.0))
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1920.0, 1080.0)
    }
}

/// Snap preview zone armed while dragging a window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SnapState {
    #[default]
    None,
    Left,
    Right,
    Top,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl SnapState {
    pub fn as_str(&self) -> &'static str {
        match self {
            SnapState::None => "none",
            SnapState::Left => "left",
            SnapState::Right => "right",
            SnapState::Top => "top",
            SnapState::TopLeft => "top-left",
            SnapState::TopRight => "top-right",
            SnapState::BottomLeft => "bottom-left",
            SnapState::BottomRight => "bottom-right",
        }
    }
}

/// Edge or corner handle a resize was started from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResizeDirection {
    N,
    S,
    E,
    W,
    NE,
    NW,
    SE,
    SW,
}

impl ResizeDirection {
    /// Parse from the handle tag used by the webview ("n", "se", ...)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "n" => Some(ResizeDirection::N),
            "s" => Some(ResizeDirection::S),
            "e" => Some(ResizeDirection::E),
            "w" => Some(ResizeDirection::W),
            "ne" => Some(ResizeDirection::NE),
            "nw" => Some(ResizeDirection::NW),
            "se" => Some(ResizeDirection::SE),
            "sw" => Some(ResizeDirection::SW),
            _ => None,
        }
    }

    /// Per-axis component: -1 moves the left/top edge, +1 the right/bottom edge, 0 leaves the axis alone
    pub fn axes(&self) -> (i8, i8) {
        match self {
            ResizeDirection::N => (0, -1),
            ResizeDirection::S => (0, 1),
            ResizeDirection::E => (1, 0),
            ResizeDirection::W => (-1, 0),
            ResizeDirection::NE => (1, -1),
            ResizeDirection::NW => (-1, -1),
            ResizeDirection::SE => (1, 1),
            ResizeDirection::SW => (-1, 1),
        }
    }

    pub const ALL: [ResizeDirection; 8] = [
        ResizeDirection::N,
        ResizeDirection::S,
        ResizeDirection::E,
        ResizeDirection::W,
        ResizeDirection::NE,
        ResizeDirection::NW,
        ResizeDirection::SE,
        ResizeDirection::SW,
    ];
}
