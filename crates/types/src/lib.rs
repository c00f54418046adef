pub mod color;
pub mod geometry;

pub use color::Color;
pub use geometry::{
    Axis, PerAxis, Rect, Size, UNITS_PER_POINT, inches_to_units, points_to_units, px_to_units,
    units_to_points,
};
