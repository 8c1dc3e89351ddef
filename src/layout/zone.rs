//! Zone geometry: rectangles, rotations and the zones the planner hands out.
//!
//! ## Coordinate System
//!
//! ```text
//! (0,0) ──────────────────────► X (label width, dots)
//!   │
//!   │   ┌──────────────┐
//!   │   │ Rect         │   x0,y0 inclusive
//!   │   │              │   x1,y1 exclusive
//!   │   └──────────────┘
//!   ▼
//!   Y (label height, dots)
//! ```

use std::fmt;

/// Axis-aligned rectangle in canvas pixels, half-open on the right and bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    pub x0: i32,
    pub y0: i32,
    pub x1: i32,
    pub y1: i32,
}

impl Rect {
    pub const fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Rectangle covering a whole `width × height` buffer.
    pub fn of_size(width: u32, height: u32) -> Self {
        Self::new(0, 0, width as i32, height as i32)
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.x1 - self.x0
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.y1 - self.y0
    }

    /// True when the rectangle covers no pixel.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width() <= 0 || self.height() <= 0
    }

    /// Shrink by `dx` on the left and right and `dy` on the top and bottom.
    pub fn inset(&self, dx: i32, dy: i32) -> Self {
        Self::new(self.x0 + dx, self.y0 + dy, self.x1 - dx, self.y1 - dy)
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x0 && x < self.x1 && y >= self.y0 && y < self.y1
    }

    /// True when `other` lies entirely inside `self`. Empty rectangles are never contained.
    pub fn contains_rect(&self, other: &Rect) -> bool {
        !other.is_empty()
            && other.x0 >= self.x0
            && other.y0 >= self.y0
            && other.x1 <= self.x1
            && other.y1 <= self.y1
    }

    /// True when the two rectangles share at least one pixel.
    pub fn intersects(&self, other: &Rect) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && self.x0 < other.x1
            && other.x0 < self.x1
            && self.y0 < other.y1
            && other.y0 < self.y1
    }

    /// Overlapping part of two rectangles (possibly empty).
    pub fn intersection(&self, other: &Rect) -> Rect {
        Rect::new(
            self.x0.max(other.x0),
            self.y0.max(other.y0),
            self.x1.min(other.x1),
            self.y1.min(other.y1),
        )
    }

    /// Top-left corner that centers a `w × h` box inside this rectangle.
    ///
    /// Uses floor division so boxes larger than the rectangle overhang evenly.
    pub fn centered_origin(&self, w: i32, h: i32) -> (i32, i32) {
        (
            self.x0 + (self.width() - w).div_euclid(2),
            self.y0 + (self.height() - h).div_euclid(2),
        )
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({},{})-({},{}) {}x{}",
            self.x0,
            self.y0,
            self.x1,
            self.y1,
            self.width(),
            self.height()
        )
    }
}

/// Orientation a content item is drawn at.
///
/// Quarter turns are clockwise-positive: text at [`Rotation::Cw90`] reads
/// top-to-bottom, text at [`Rotation::Ccw90`] reads bottom-to-top.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Rotation {
    /// Upright.
    #[default]
    None,
    /// 90° clockwise.
    Cw90,
    /// Upside down.
    Half,
    /// 90° counter-clockwise (−90°).
    Ccw90,
}

impl Rotation {
    /// Signed angle in degrees (clockwise positive).
    pub fn degrees(self) -> i32 {
        match self {
            Rotation::None => 0,
            Rotation::Cw90 => 90,
            Rotation::Half => 180,
            Rotation::Ccw90 => -90,
        }
    }

    /// Parse a signed angle. Accepts 270 as an alias of −90.
    pub fn from_degrees(degrees: i32) -> Option<Self> {
        match degrees.rem_euclid(360) {
            0 => Some(Rotation::None),
            90 => Some(Rotation::Cw90),
            180 => Some(Rotation::Half),
            270 => Some(Rotation::Ccw90),
            _ => None,
        }
    }

    /// Quarter turns swap the text block's width and height.
    #[inline]
    pub fn is_quarter(self) -> bool {
        matches!(self, Rotation::Cw90 | Rotation::Ccw90)
    }
}

/// Named region of the printable area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ZoneId {
    Top,
    Middle,
    Bottom,
    Left,
    Right,
}

/// A rectangle of the printable area plus the rotation its content is drawn at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Zone {
    pub id: ZoneId,
    pub rect: Rect,
    pub rotation: Rotation,
}

impl Zone {
    /// Width and height available to the text block before rotation.
    ///
    /// A quarter-turned zone lays text along its height.
    pub fn text_extent(&self) -> (i32, i32) {
        if self.rotation.is_quarter() {
            (self.rect.height(), self.rect.width())
        } else {
            (self.rect.width(), self.rect.height())
        }
    }

    /// Same zone with its rectangle shrunk.
    pub fn inset(&self, dx: i32, dy: i32) -> Self {
        Self {
            rect: self.rect.inset(dx, dy),
            ..*self
        }
    }
}
