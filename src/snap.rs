//! Pixel snapping at a configurable snap scale
//!
//! Panes snap every position, spacing, and size they emit so that child
//! edges land on device pixel boundaries. At snap scale `s` a value is
//! snapped in scaled space: positions and inter-child spaces round to the
//! nearest boundary, sizes ceil so content never gets clipped, and portions
//! (per-child shares of extra space) floor toward zero with a minimum
//! magnitude of one device pixel so distribution loops always make progress.
//!
//! The ceil used for sizes subtracts a small epsilon first, so a size that
//! is already on a boundary up to floating-point noise does not ceil up to
//! the next boundary.

/// Guard against float noise pushing an on-boundary size up a full pixel.
const EPSILON: f32 = 1e-4;

fn scaled_round(value: f32, scale: f32) -> f32 {
  (value * scale).round() / scale
}

fn scaled_floor(value: f32, scale: f32) -> f32 {
  (value * scale + EPSILON).floor() / scale
}

fn scaled_ceil(value: f32, scale: f32) -> f32 {
  (value * scale - EPSILON).ceil() / scale
}

/// Snapping configuration carried by every pane
///
/// When disabled, all snapping methods return their input unchanged.
/// The default is enabled at scale 1.0 (snap to whole logical pixels).
///
/// # Examples
///
/// ```
/// use panekit::Snap;
///
/// let snap = Snap::default();
/// assert_eq!(snap.size(10.2), 11.0);
/// assert_eq!(snap.space(10.2), 10.0);
///
/// let hidpi = Snap::with_scale(1.5);
/// assert_eq!(hidpi.size(10.2), 10.666667);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Snap {
  /// Whether snapping is applied at all
  pub enabled: bool,
  /// Device pixels per logical pixel
  pub scale: f32,
}

impl Default for Snap {
  fn default() -> Self {
    Self {
      enabled: true,
      scale: 1.0,
    }
  }
}

impl Snap {
  /// Snapping enabled at the given scale
  pub fn with_scale(scale: f32) -> Self {
    Self {
      enabled: true,
      scale,
    }
  }

  /// Snapping turned off; all methods become identity
  pub fn disabled() -> Self {
    Self {
      enabled: false,
      scale: 1.0,
    }
  }

  /// Snaps a position to the nearest pixel boundary
  pub fn position(self, value: f32) -> f32 {
    if self.enabled {
      scaled_round(value, self.scale)
    } else {
      value
    }
  }

  /// Snaps an inter-child space (gap, spacing, offset) to the nearest boundary
  ///
  /// Same rounding as [`Snap::position`]; kept separate because spaces and
  /// positions are snapped at different points in a layout pass.
  pub fn space(self, value: f32) -> f32 {
    if self.enabled {
      scaled_round(value, self.scale)
    } else {
      value
    }
  }

  /// Snaps a size up to the next pixel boundary
  ///
  /// Sizes ceil rather than round so snapped content is never smaller than
  /// what was measured.
  pub fn size(self, value: f32) -> f32 {
    if self.enabled {
      scaled_ceil(value, self.scale)
    } else {
      value
    }
  }

  /// Snaps a size down to the previous pixel boundary
  pub fn size_floor(self, value: f32) -> f32 {
    if self.enabled {
      scaled_floor(value, self.scale)
    } else {
      value
    }
  }

  /// Snaps a per-child portion of extra space
  ///
  /// Floors the magnitude but never below one device pixel, preserving sign.
  /// Distribution loops rely on the minimum magnitude to terminate.
  pub fn portion(self, value: f32) -> f32 {
    if !self.enabled || value == 0.0 {
      return value;
    }
    let scaled = value * self.scale;
    let snapped = if scaled > 0.0 {
      scaled.floor().max(1.0)
    } else {
      scaled.ceil().min(-1.0)
    };
    snapped / self.scale
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_size_ceils() {
    let snap = Snap::default();
    assert_eq!(snap.size(10.0), 10.0);
    assert_eq!(snap.size(10.001), 11.0);
    assert_eq!(snap.size(10.9), 11.0);
  }

  #[test]
  fn test_size_epsilon_guard() {
    let snap = Snap::default();
    // A hair over a boundary from accumulated float error stays put.
    assert_eq!(snap.size(10.00001), 10.0);
  }

  #[test]
  fn test_position_rounds() {
    let snap = Snap::default();
    assert_eq!(snap.position(10.4), 10.0);
    assert_eq!(snap.position(10.5), 11.0);
    assert_eq!(snap.space(3.2), 3.0);
  }

  #[test]
  fn test_fractional_scale() {
    let snap = Snap::with_scale(2.0);
    assert_eq!(snap.size(10.2), 10.5);
    assert_eq!(snap.position(10.2), 10.0);
    assert_eq!(snap.position(10.3), 10.5);
  }

  #[test]
  fn test_portion_floors_with_minimum() {
    let snap = Snap::default();
    assert_eq!(snap.portion(7.9), 7.0);
    assert_eq!(snap.portion(0.3), 1.0);
    assert_eq!(snap.portion(-0.3), -1.0);
    assert_eq!(snap.portion(-7.9), -7.0);
    assert_eq!(snap.portion(0.0), 0.0);
  }

  #[test]
  fn test_disabled_is_identity() {
    let snap = Snap::disabled();
    assert_eq!(snap.size(10.2), 10.2);
    assert_eq!(snap.position(10.5), 10.5);
    assert_eq!(snap.portion(0.3), 0.3);
  }
}
