use crate::Vec2;
use std::ops::{Add, Div, Mul, Sub};

/// Axis-aligned rectangle with a top-left `origin` and a `size`.
///
/// Sizes are not forced to be non-negative: a degenerate box read from a
/// model output is carried as-is.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect<T> {
    pub origin: Vec2<T>,
    pub size: Vec2<T>,
}

impl<T> Rect<T> {
    pub const fn new(origin: Vec2<T>, size: Vec2<T>) -> Self {
        Self { origin, size }
    }
}

impl<T: Default> Rect<T> {
    pub fn zero() -> Self {
        Self::default()
    }
}

impl<T: Add<Output = T> + Copy> Rect<T> {
    pub fn min(&self) -> Vec2<T> {
        self.origin
    }

    pub fn max(&self) -> Vec2<T> {
        self.origin + self.size
    }
}

impl<T: Mul<Output = T> + Copy> Rect<T> {
    pub fn area(&self) -> T {
        self.size.x * self.size.y
    }
}

impl<T: Add<Output = T> + Sub<Output = T> + Div<Output = T> + Copy + From<u8>> Rect<T> {
    /// Build a rectangle from its center point and size.
    pub fn from_center(center: Vec2<T>, size: Vec2<T>) -> Self {
        let half = size / T::from(2u8);
        Self {
            origin: center - half,
            size,
        }
    }

    pub fn center(&self) -> Vec2<T> {
        self.origin + self.size / T::from(2u8)
    }
}

impl Rect<f32> {
    /// Area of the overlap between two rectangles, zero when they are disjoint.
    pub fn overlap_area(&self, other: &Rect<f32>) -> f32 {
        let (a_max, b_max) = (self.max(), other.max());
        let w = a_max.x.min(b_max.x) - self.origin.x.max(other.origin.x);
        let h = a_max.y.min(b_max.y) - self.origin.y.max(other.origin.y);
        w.max(0.0) * h.max(0.0)
    }
}
