//! Integer page geometry.
//!
//! All layout happens in fixed-point units of 1/(72 * 1024) inch, so one
//! typographic point is [`UNITS_PER_POINT`] units.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// Layout units per point.
pub const UNITS_PER_POINT: i32 = 1024;

/// Converts points to layout units, rounding to the nearest unit.
pub fn points_to_units(points: f64) -> i32 {
    (points * UNITS_PER_POINT as f64 + 0.5).floor() as i32
}

/// Converts inches to layout units, rounding to the nearest unit.
pub fn inches_to_units(inches: f64) -> i32 {
    (inches * 72.0 * UNITS_PER_POINT as f64 + 0.5).floor() as i32
}

/// Converts 1/96 inch pixels to layout units.
pub fn px_to_units(px: i32) -> i32 {
    px * 72 * UNITS_PER_POINT / 96
}

pub fn units_to_points(units: i32) -> f64 {
    units as f64 / UNITS_PER_POINT as f64
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    /// Horizontal: columns, x coordinates, widths.
    H = 0,
    /// Vertical: rows, y coordinates, heights.
    V = 1,
}

impl Axis {
    pub const ALL: [Axis; 2] = [Axis::H, Axis::V];

    pub fn opposite(self) -> Axis {
        match self {
            Axis::H => Axis::V,
            Axis::V => Axis::H,
        }
    }
}

/// A pair of values indexed by [`Axis`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PerAxis<T>(pub [T; 2]);

impl<T> PerAxis<T> {
    pub fn new(h: T, v: T) -> Self {
        Self([h, v])
    }
}

impl<T> Index<Axis> for PerAxis<T> {
    type Output = T;

    fn index(&self, axis: Axis) -> &T {
        &self.0[axis as usize]
    }
}

impl<T> IndexMut<Axis> for PerAxis<T> {
    fn index_mut(&mut self, axis: Axis) -> &mut T {
        &mut self.0[axis as usize]
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    pub fn zero() -> Self {
        Self { width: 0, height: 0 }
    }

    pub fn get(&self, axis: Axis) -> i32 {
        match axis {
            Axis::H => self.width,
            Axis::V => self.height,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    /// True if the two rectangles share any area. Touching edges do not count.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    pub fn translate(&self, dx: i32, dy: i32) -> Rect {
        Rect {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }
}
