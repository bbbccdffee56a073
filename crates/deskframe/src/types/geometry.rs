/*! Geometry types for screen coordinates.

Coordinates are global display coordinates with the origin at the top-left of
the main display, y growing downwards (the convention used by the window server
and the accessibility API).
*/

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Rectangle bounds in screen coordinates.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, TS)]
#[ts(export)]
pub struct Bounds {
  pub x: f64,
  pub y: f64,
  #[serde(rename = "width")]
  pub w: f64,
  #[serde(rename = "height")]
  pub h: f64,
}

impl Bounds {
  pub const fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
    Self { x, y, w, h }
  }

  /// Top-left corner.
  pub const fn origin(&self) -> Point {
    Point::new(self.x, self.y)
  }

  /// Width and height.
  pub const fn size(&self) -> Size {
    Size::new(self.w, self.h)
  }

  /// Area shared by two rectangles (0 when they only touch or are disjoint).
  #[cfg(test)]
  pub(crate) fn overlap_area(&self, other: &Bounds) -> f64 {
    let w = (self.x + self.w).min(other.x + other.w) - self.x.max(other.x);
    let h = (self.y + self.h).min(other.y + other.h) - self.y.max(other.y);
    if w <= 0.0 || h <= 0.0 {
      0.0
    } else {
      w * h
    }
  }
}

/// A 2D point in screen coordinates.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, TS)]
#[ts(export)]
pub struct Point {
  pub x: f64,
  pub y: f64,
}

impl Point {
  pub const fn new(x: f64, y: f64) -> Self {
    Self { x, y }
  }
}

/// A width/height pair.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, TS)]
#[ts(export)]
pub struct Size {
  pub width: f64,
  pub height: f64,
}

impl Size {
  pub const fn new(width: f64, height: f64) -> Self {
    Self { width, height }
  }
}
