//! Core geometry and alignment types for pane layout
//!
//! This module provides the fundamental value objects used throughout the
//! layout engine. All units are logical pixels.
//!
//! # Coordinate System
//!
//! The coordinate system has its origin at the top-left corner:
//! - Positive X extends to the right
//! - Positive Y extends downward
//!
//! Child positions reported by layout are relative to their parent pane's
//! top-left corner.

use std::fmt;

use crate::error::{Error, Result};

/// A 2D point in logical pixel space
///
/// Represents a coordinate in a pane's coordinate system.
/// The origin (0, 0) is at the top-left corner.
///
/// # Examples
///
/// ```
/// use panekit::Point;
///
/// let p1 = Point::new(10.0, 20.0);
/// let p2 = Point::ZERO;
///
/// assert_eq!(p1.x, 10.0);
/// assert_eq!(p1.y, 20.0);
/// assert_eq!(p2, Point::new(0.0, 0.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
  /// X coordinate (horizontal position, increases to the right)
  pub x: f32,
  /// Y coordinate (vertical position, increases downward)
  pub y: f32,
}

impl Point {
  /// The zero point at the origin (0, 0)
  pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

  /// Creates a new point at the given coordinates
  pub const fn new(x: f32, y: f32) -> Self {
    Self { x, y }
  }

  /// Translates this point by another point's coordinates
  ///
  /// # Examples
  ///
  /// ```
  /// use panekit::Point;
  ///
  /// let p1 = Point::new(10.0, 20.0);
  /// let p2 = Point::new(5.0, 3.0);
  ///
  /// assert_eq!(p1.translate(p2), Point::new(15.0, 23.0));
  /// ```
  pub fn translate(self, other: Point) -> Self {
    Self {
      x: self.x + other.x,
      y: self.y + other.y,
    }
  }
}

impl fmt::Display for Point {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "({}, {})", self.x, self.y)
  }
}

/// A 2D size in logical pixels
///
/// Represents the dimensions of a rectangular region.
/// Both width and height are non-negative (though not enforced by the type).
///
/// # Examples
///
/// ```
/// use panekit::Size;
///
/// let size = Size::new(100.0, 50.0);
/// assert_eq!(size.width, 100.0);
/// assert_eq!(size.height, 50.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Size {
  /// Width (horizontal extent)
  pub width: f32,
  /// Height (vertical extent)
  pub height: f32,
}

impl Size {
  /// A size with zero width and height
  pub const ZERO: Self = Self {
    width: 0.0,
    height: 0.0,
  };

  /// Creates a new size with the given dimensions
  pub const fn new(width: f32, height: f32) -> Self {
    Self { width, height }
  }

  /// Returns true if either width or height is zero
  ///
  /// # Examples
  ///
  /// ```
  /// use panekit::Size;
  ///
  /// assert!(Size::ZERO.is_empty());
  /// assert!(Size::new(0.0, 10.0).is_empty());
  /// assert!(!Size::new(10.0, 10.0).is_empty());
  /// ```
  pub fn is_empty(self) -> bool {
    self.width == 0.0 || self.height == 0.0
  }
}

impl fmt::Display for Size {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}×{}", self.width, self.height)
  }
}

/// An axis-aligned rectangle in logical pixel space
///
/// Defined by an origin point (top-left corner) and a size. This is the
/// shape of every node's layout bounds: the position assigned by `relocate`
/// plus the size assigned by `resize`.
///
/// # Examples
///
/// ```
/// use panekit::{Rect, Point, Size};
///
/// let rect = Rect::new(Point::new(10.0, 20.0), Size::new(100.0, 50.0));
/// assert_eq!(rect.x(), 10.0);
/// assert_eq!(rect.y(), 20.0);
/// assert_eq!(rect.width(), 100.0);
/// assert_eq!(rect.height(), 50.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
  /// The top-left corner of the rectangle
  pub origin: Point,
  /// The size (width and height) of the rectangle
  pub size: Size,
}

impl Rect {
  /// A zero-sized rectangle at the origin
  pub const ZERO: Self = Self {
    origin: Point::ZERO,
    size: Size::ZERO,
  };

  /// Creates a new rectangle from an origin point and size
  pub const fn new(origin: Point, size: Size) -> Self {
    Self { origin, size }
  }

  /// Creates a rectangle from x, y, width, height components
  ///
  /// # Examples
  ///
  /// ```
  /// use panekit::Rect;
  ///
  /// let rect = Rect::from_xywh(10.0, 20.0, 100.0, 50.0);
  /// assert_eq!(rect.x(), 10.0);
  /// assert_eq!(rect.width(), 100.0);
  /// ```
  pub const fn from_xywh(x: f32, y: f32, width: f32, height: f32) -> Self {
    Self {
      origin: Point::new(x, y),
      size: Size::new(width, height),
    }
  }

  /// Returns the x coordinate of the left edge
  pub fn x(self) -> f32 {
    self.origin.x
  }

  /// Returns the y coordinate of the top edge
  pub fn y(self) -> f32 {
    self.origin.y
  }

  /// Returns the width
  pub fn width(self) -> f32 {
    self.size.width
  }

  /// Returns the height
  pub fn height(self) -> f32 {
    self.size.height
  }

  /// Returns the x coordinate of the right edge
  pub fn max_x(self) -> f32 {
    self.origin.x + self.size.width
  }

  /// Returns the y coordinate of the bottom edge
  pub fn max_y(self) -> f32 {
    self.origin.y + self.size.height
  }
}

impl fmt::Display for Rect {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{} @ {}", self.size, self.origin)
  }
}

/// Immutable offsets on the four sides of a rectangle
///
/// Used for pane padding and per-child margins. Follows the top, right,
/// bottom, left convention. All sides must be non-negative; the validating
/// constructor rejects negative inputs so degenerate insets never reach the
/// layout pass.
///
/// # Examples
///
/// ```
/// use panekit::Insets;
///
/// let padding = Insets::new(10.0, 20.0, 10.0, 20.0)?;
/// assert_eq!(padding.horizontal(), 40.0);
/// assert_eq!(padding.vertical(), 20.0);
///
/// assert!(Insets::new(-1.0, 0.0, 0.0, 0.0).is_err());
/// # Ok::<(), panekit::Error>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Insets {
  /// Top edge offset
  pub top: f32,
  /// Right edge offset
  pub right: f32,
  /// Bottom edge offset
  pub bottom: f32,
  /// Left edge offset
  pub left: f32,
}

impl Insets {
  /// Zero offsets on all sides
  pub const EMPTY: Self = Self {
    top: 0.0,
    right: 0.0,
    bottom: 0.0,
    left: 0.0,
  };

  /// Creates insets with individual values for each side
  ///
  /// Returns `Error::InvalidDimension` if any side is negative.
  pub fn new(top: f32, right: f32, bottom: f32, left: f32) -> Result<Self> {
    for value in [top, right, bottom, left] {
      if value < 0.0 {
        return Err(Error::InvalidDimension {
          what: "inset",
          value,
        });
      }
    }
    Ok(Self {
      top,
      right,
      bottom,
      left,
    })
  }

  /// Creates insets with the same value on all sides
  ///
  /// # Examples
  ///
  /// ```
  /// use panekit::Insets;
  ///
  /// let padding = Insets::all(10.0)?;
  /// assert_eq!(padding.top, 10.0);
  /// assert_eq!(padding.left, 10.0);
  /// # Ok::<(), panekit::Error>(())
  /// ```
  pub fn all(value: f32) -> Result<Self> {
    Self::new(value, value, value, value)
  }

  /// Returns the sum of left and right offsets
  pub fn horizontal(self) -> f32 {
    self.left + self.right
  }

  /// Returns the sum of top and bottom offsets
  pub fn vertical(self) -> f32 {
    self.top + self.bottom
  }
}

impl fmt::Display for Insets {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(
      f,
      "[t:{}, r:{}, b:{}, l:{}]",
      self.top, self.right, self.bottom, self.left
    )
  }
}

/// The two layout axes
///
/// Also used as a node's content bias: a node whose height depends on its
/// width (wrapping text) has a `Horizontal` bias, and vice versa.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
  /// The x axis (widths)
  Horizontal,
  /// The y axis (heights)
  Vertical,
}

/// Horizontal positioning of content within a larger span
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HPos {
  /// Align to the left edge
  #[default]
  Left,
  /// Center within the span
  Center,
  /// Align to the right edge
  Right,
}

/// Vertical positioning of content within a larger span
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VPos {
  /// Align to the top edge
  #[default]
  Top,
  /// Center within the span
  Center,
  /// Align so text baselines line up across siblings
  Baseline,
  /// Align to the bottom edge
  Bottom,
}

/// A combined horizontal and vertical alignment
///
/// Decomposes into an [`HPos`] and a [`VPos`] for the per-axis positioning
/// helpers.
///
/// # Examples
///
/// ```
/// use panekit::{HPos, Pos, VPos};
///
/// assert_eq!(Pos::BottomRight.hpos(), HPos::Right);
/// assert_eq!(Pos::BottomRight.vpos(), VPos::Bottom);
/// assert_eq!(Pos::BaselineCenter.vpos(), VPos::Baseline);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pos {
  TopLeft,
  TopCenter,
  TopRight,
  CenterLeft,
  Center,
  CenterRight,
  BottomLeft,
  BottomCenter,
  BottomRight,
  BaselineLeft,
  BaselineCenter,
  BaselineRight,
}

impl Pos {
  /// The horizontal component of this alignment
  pub fn hpos(self) -> HPos {
    match self {
      Pos::TopLeft | Pos::CenterLeft | Pos::BottomLeft | Pos::BaselineLeft => HPos::Left,
      Pos::TopCenter | Pos::Center | Pos::BottomCenter | Pos::BaselineCenter => HPos::Center,
      Pos::TopRight | Pos::CenterRight | Pos::BottomRight | Pos::BaselineRight => HPos::Right,
    }
  }

  /// The vertical component of this alignment
  pub fn vpos(self) -> VPos {
    match self {
      Pos::TopLeft | Pos::TopCenter | Pos::TopRight => VPos::Top,
      Pos::CenterLeft | Pos::Center | Pos::CenterRight => VPos::Center,
      Pos::BottomLeft | Pos::BottomCenter | Pos::BottomRight => VPos::Bottom,
      Pos::BaselineLeft | Pos::BaselineCenter | Pos::BaselineRight => VPos::Baseline,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_point_translate() {
    let p1 = Point::new(10.0, 20.0);
    let p2 = Point::new(5.0, 3.0);
    assert_eq!(p1.translate(p2), Point::new(15.0, 23.0));
  }

  #[test]
  fn test_size_is_empty() {
    assert!(Size::ZERO.is_empty());
    assert!(Size::new(0.0, 10.0).is_empty());
    assert!(Size::new(10.0, 0.0).is_empty());
    assert!(!Size::new(10.0, 10.0).is_empty());
  }

  #[test]
  fn test_rect_accessors() {
    let rect = Rect::from_xywh(10.0, 20.0, 100.0, 50.0);
    assert_eq!(rect.x(), 10.0);
    assert_eq!(rect.y(), 20.0);
    assert_eq!(rect.width(), 100.0);
    assert_eq!(rect.height(), 50.0);
    assert_eq!(rect.max_x(), 110.0);
    assert_eq!(rect.max_y(), 70.0);
  }

  #[test]
  fn test_insets_sides() {
    let insets = Insets::new(10.0, 20.0, 30.0, 40.0).unwrap();
    assert_eq!(insets.top, 10.0);
    assert_eq!(insets.right, 20.0);
    assert_eq!(insets.bottom, 30.0);
    assert_eq!(insets.left, 40.0);
    assert_eq!(insets.horizontal(), 60.0);
    assert_eq!(insets.vertical(), 40.0);
  }

  #[test]
  fn test_insets_reject_negative() {
    assert!(Insets::new(0.0, 0.0, -0.5, 0.0).is_err());
    assert!(Insets::all(-1.0).is_err());
  }

  #[test]
  fn test_pos_decomposition() {
    assert_eq!(Pos::TopLeft.hpos(), HPos::Left);
    assert_eq!(Pos::TopLeft.vpos(), VPos::Top);
    assert_eq!(Pos::Center.hpos(), HPos::Center);
    assert_eq!(Pos::Center.vpos(), VPos::Center);
    assert_eq!(Pos::BaselineRight.hpos(), HPos::Right);
    assert_eq!(Pos::BaselineRight.vpos(), VPos::Baseline);
  }
}
