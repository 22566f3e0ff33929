//! Shared pane state: geometry, padding, snapping, and size overrides
//!
//! Every pane embeds a [`Region`]: the layout bounds its parent assigns,
//! the padding it reserves around its content, its snapping configuration,
//! and the six size overrides. An override left at [`USE_COMPUTED_SIZE`]
//! defers to the pane's own computation; [`USE_PREF_SIZE`] pins a min or
//! max to the preferred value; any other non-negative value is used as-is.

use crate::geometry::{Insets, Rect};
use crate::node::ConstraintBag;
use crate::snap::Snap;

/// Override sentinel: compute the size from content
pub const USE_COMPUTED_SIZE: f32 = -1.0;

/// Override sentinel: use the preferred size for this min or max
pub const USE_PREF_SIZE: f32 = f32::NEG_INFINITY;

/// Resolves a min or max override against its computed and preferred values
///
/// Total over all inputs: a negative or NaN explicit override degrades to 0
/// rather than erroring.
pub fn resolve_bound(override_value: f32, computed: impl FnOnce() -> f32, pref: impl FnOnce() -> f32) -> f32 {
  if override_value == USE_COMPUTED_SIZE {
    computed()
  } else if override_value == USE_PREF_SIZE {
    pref()
  } else if override_value.is_nan() || override_value < 0.0 {
    0.0
  } else {
    override_value
  }
}

/// Resolves a preferred-size override against its computed value
pub fn resolve_pref(override_value: f32, computed: impl FnOnce() -> f32) -> f32 {
  if override_value == USE_COMPUTED_SIZE {
    computed()
  } else if override_value.is_nan() || override_value < 0.0 {
    0.0
  } else {
    override_value
  }
}

/// State common to every pane
#[derive(Debug, Clone)]
pub struct Region {
  bounds: Rect,
  padding: Insets,
  snap: Snap,
  min_width: f32,
  min_height: f32,
  pref_width: f32,
  pref_height: f32,
  max_width: f32,
  max_height: f32,
  bag: ConstraintBag,
}

impl Default for Region {
  fn default() -> Self {
    Self {
      bounds: Rect::ZERO,
      padding: Insets::EMPTY,
      snap: Snap::default(),
      min_width: USE_COMPUTED_SIZE,
      min_height: USE_COMPUTED_SIZE,
      pref_width: USE_COMPUTED_SIZE,
      pref_height: USE_COMPUTED_SIZE,
      max_width: USE_COMPUTED_SIZE,
      max_height: USE_COMPUTED_SIZE,
      bag: ConstraintBag::default(),
    }
  }
}

impl Region {
  /// Current layout bounds
  pub fn bounds(&self) -> Rect {
    self.bounds
  }

  /// Current content width
  pub fn width(&self) -> f32 {
    self.bounds.width()
  }

  /// Current content height
  pub fn height(&self) -> f32 {
    self.bounds.height()
  }

  /// Sets the size, snapping each extent up to a pixel boundary
  pub fn resize(&mut self, width: f32, height: f32) {
    self.bounds.size.width = self.snap.size(width);
    self.bounds.size.height = self.snap.size(height);
  }

  /// Sets the position within the parent
  pub fn relocate(&mut self, x: f32, y: f32) {
    self.bounds.origin.x = x;
    self.bounds.origin.y = y;
  }

  /// Padding reserved around the content area
  pub fn padding(&self) -> Insets {
    self.padding
  }

  /// Sets the padding
  pub fn set_padding(&mut self, padding: Insets) {
    self.padding = padding;
  }

  /// Snapping configuration
  pub fn snap(&self) -> Snap {
    self.snap
  }

  /// Sets the snapping configuration
  pub fn set_snap(&mut self, snap: Snap) {
    self.snap = snap;
  }

  /// Top padding, snapped
  pub fn snapped_top_inset(&self) -> f32 {
    self.snap.space(self.padding.top)
  }

  /// Right padding, snapped
  pub fn snapped_right_inset(&self) -> f32 {
    self.snap.space(self.padding.right)
  }

  /// Bottom padding, snapped
  pub fn snapped_bottom_inset(&self) -> f32 {
    self.snap.space(self.padding.bottom)
  }

  /// Left padding, snapped
  pub fn snapped_left_inset(&self) -> f32 {
    self.snap.space(self.padding.left)
  }

  /// Overrides the minimum size; either value may be a sentinel
  pub fn set_min_size(&mut self, width: f32, height: f32) {
    self.min_width = width;
    self.min_height = height;
  }

  /// Overrides the preferred size
  pub fn set_pref_size(&mut self, width: f32, height: f32) {
    self.pref_width = width;
    self.pref_height = height;
  }

  /// Overrides the maximum size
  pub fn set_max_size(&mut self, width: f32, height: f32) {
    self.max_width = width;
    self.max_height = height;
  }

  /// Minimum width override, [`USE_COMPUTED_SIZE`] if unset
  pub fn min_width_override(&self) -> f32 {
    self.min_width
  }

  /// Minimum height override
  pub fn min_height_override(&self) -> f32 {
    self.min_height
  }

  /// Preferred width override
  pub fn pref_width_override(&self) -> f32 {
    self.pref_width
  }

  /// Preferred height override
  pub fn pref_height_override(&self) -> f32 {
    self.pref_height
  }

  /// Maximum width override
  pub fn max_width_override(&self) -> f32 {
    self.max_width
  }

  /// Maximum height override
  pub fn max_height_override(&self) -> f32 {
    self.max_height
  }

  /// Constraint side-table, for when this pane is itself a child
  pub fn properties(&self) -> &ConstraintBag {
    &self.bag
  }

  /// Mutable constraint side-table
  pub fn properties_mut(&mut self) -> &mut ConstraintBag {
    &mut self.bag
  }
}
