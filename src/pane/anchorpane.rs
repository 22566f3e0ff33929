//! Edge-anchored pane
//!
//! [`AnchorPane`] pins each child's edges at fixed offsets from its own
//! edges. A child with only a left anchor sits at that offset at its
//! preferred size; a child with both left and right anchors is stretched to
//! keep both offsets as the pane resizes. Children with no anchors keep
//! whatever position they were given manually.

use log::trace;

use crate::geometry::{Orientation, Rect};
use crate::layout::area::{child_pref_area_height, child_pref_area_width};
use crate::node::{ConstraintBag, ConstraintValue, LayoutNode, UNCONSTRAINED};
use crate::region::{resolve_bound, resolve_pref, Region};

const TOP_ANCHOR: &str = "anchorpane-top-anchor";
const BOTTOM_ANCHOR: &str = "anchorpane-bottom-anchor";
const LEFT_ANCHOR: &str = "anchorpane-left-anchor";
const RIGHT_ANCHOR: &str = "anchorpane-right-anchor";

/// A pane that pins children to its edges at fixed offsets
///
/// # Examples
///
/// ```
/// use panekit::{AnchorPane, LayoutNode, SizedNode};
///
/// let mut child = SizedNode::new(300.0, 400.0);
/// AnchorPane::set_top_anchor(&mut child, Some(20.0));
/// AnchorPane::set_left_anchor(&mut child, Some(10.0));
///
/// let mut pane = AnchorPane::new();
/// pane.add_child(child);
/// assert_eq!(pane.pref_width(-1.0), 310.0);
/// assert_eq!(pane.pref_height(-1.0), 420.0);
/// ```
pub struct AnchorPane {
  region: Region,
  children: Vec<Box<dyn LayoutNode>>,
}

impl Default for AnchorPane {
  fn default() -> Self {
    Self::new()
  }
}

impl AnchorPane {
  /// An empty pane with no children
  pub fn new() -> Self {
    Self {
      region: Region::default(),
      children: Vec::new(),
    }
  }

  /// Pins the child's top edge at the given offset from the pane's top
  pub fn set_top_anchor(child: &mut dyn LayoutNode, offset: Option<f32>) {
    child.properties_mut().set(TOP_ANCHOR, offset.map(ConstraintValue::Number));
  }

  /// The child's top anchor offset, if set
  pub fn top_anchor(child: &dyn LayoutNode) -> Option<f32> {
    child.properties().number(TOP_ANCHOR)
  }

  /// Pins the child's bottom edge at the given offset from the pane's bottom
  pub fn set_bottom_anchor(child: &mut dyn LayoutNode, offset: Option<f32>) {
    child
      .properties_mut()
      .set(BOTTOM_ANCHOR, offset.map(ConstraintValue::Number));
  }

  /// The child's bottom anchor offset, if set
  pub fn bottom_anchor(child: &dyn LayoutNode) -> Option<f32> {
    child.properties().number(BOTTOM_ANCHOR)
  }

  /// Pins the child's left edge at the given offset from the pane's left
  pub fn set_left_anchor(child: &mut dyn LayoutNode, offset: Option<f32>) {
    child.properties_mut().set(LEFT_ANCHOR, offset.map(ConstraintValue::Number));
  }

  /// The child's left anchor offset, if set
  pub fn left_anchor(child: &dyn LayoutNode) -> Option<f32> {
    child.properties().number(LEFT_ANCHOR)
  }

  /// Pins the child's right edge at the given offset from the pane's right
  pub fn set_right_anchor(child: &mut dyn LayoutNode, offset: Option<f32>) {
    child
      .properties_mut()
      .set(RIGHT_ANCHOR, offset.map(ConstraintValue::Number));
  }

  /// The child's right anchor offset, if set
  pub fn right_anchor(child: &dyn LayoutNode) -> Option<f32> {
    child.properties().number(RIGHT_ANCHOR)
  }

  /// Removes all four anchors from the child
  pub fn clear_constraints(child: &mut dyn LayoutNode) {
    for key in [TOP_ANCHOR, BOTTOM_ANCHOR, LEFT_ANCHOR, RIGHT_ANCHOR] {
      child.properties_mut().set(key, None);
    }
  }

  /// Appends a child
  pub fn add_child(&mut self, child: impl LayoutNode + 'static) {
    self.children.push(Box::new(child));
  }

  /// The pane's children in insertion order
  pub fn children(&self) -> &[Box<dyn LayoutNode>] {
    &self.children
  }

  /// Mutable access to the children
  pub fn children_mut(&mut self) -> &mut Vec<Box<dyn LayoutNode>> {
    &mut self.children
  }

  /// Shared pane state (padding, size overrides, snapping)
  pub fn region(&self) -> &Region {
    &self.region
  }

  /// Mutable shared pane state
  pub fn region_mut(&mut self) -> &mut Region {
    &mut self.region
  }

  fn compute_width(&self, minimum: bool, height: f32) -> f32 {
    let snap = self.region.snap();
    let mut max = 0.0f32;
    for child in &self.children {
      let left_anchor = Self::left_anchor(child.as_ref());
      let right_anchor = Self::right_anchor(child.as_ref());
      let left = match (left_anchor, right_anchor) {
        (Some(offset), _) => offset,
        (None, Some(_)) => 0.0,
        (None, None) => child.layout_bounds().x(),
      };
      let right = right_anchor.unwrap_or(0.0);

      // A vertically biased child stretched between top and bottom anchors
      // is measured at the height it will actually get.
      let child_height = if Self::top_anchor(child.as_ref()).is_some()
        && Self::bottom_anchor(child.as_ref()).is_some()
        && child.content_bias() == Some(Orientation::Vertical)
      {
        if height != UNCONSTRAINED {
          self.anchored_height(child.as_ref(), height, UNCONSTRAINED)
        } else {
          child.min_height(UNCONSTRAINED)
        }
      } else {
        UNCONSTRAINED
      };

      let body = if minimum && left_anchor.is_some() && right_anchor.is_some() {
        child.min_width(child_height)
      } else {
        child_pref_area_width(child.as_ref(), UNCONSTRAINED, None, child_height, false, snap)
      };
      max = max.max(left + body + right);
    }
    self.region.snapped_left_inset() + max + self.region.snapped_right_inset()
  }

  fn compute_height(&self, minimum: bool, width: f32) -> f32 {
    let snap = self.region.snap();
    let mut max = 0.0f32;
    for child in &self.children {
      let top_anchor = Self::top_anchor(child.as_ref());
      let bottom_anchor = Self::bottom_anchor(child.as_ref());
      let top = match (top_anchor, bottom_anchor) {
        (Some(offset), _) => offset,
        (None, Some(_)) => 0.0,
        (None, None) => child.layout_bounds().y(),
      };
      let bottom = bottom_anchor.unwrap_or(0.0);

      let child_width = if Self::left_anchor(child.as_ref()).is_some()
        && Self::right_anchor(child.as_ref()).is_some()
        && child.content_bias() == Some(Orientation::Horizontal)
      {
        if width != UNCONSTRAINED {
          self.anchored_width(child.as_ref(), width, UNCONSTRAINED)
        } else {
          child.min_width(UNCONSTRAINED)
        }
      } else {
        UNCONSTRAINED
      };

      let body = if minimum && top_anchor.is_some() && bottom_anchor.is_some() {
        child.min_height(child_width)
      } else {
        child_pref_area_height(child.as_ref(), UNCONSTRAINED, None, child_width, snap)
      };
      max = max.max(top + body + bottom);
    }
    self.region.snapped_top_inset() + max + self.region.snapped_bottom_inset()
  }

  /// Width the child will get inside a pane of `area_width`
  fn anchored_width(&self, child: &dyn LayoutNode, area_width: f32, height: f32) -> f32 {
    let left_anchor = Self::left_anchor(child);
    let right_anchor = Self::right_anchor(child);
    if let (Some(left), Some(right)) = (left_anchor, right_anchor) {
      if child.is_resizable() {
        return area_width - self.region.snapped_left_inset() - self.region.snapped_right_inset() - left - right;
      }
    }
    child_pref_area_width(child, UNCONSTRAINED, None, height, true, self.region.snap())
  }

  /// Height the child will get inside a pane of `area_height`
  fn anchored_height(&self, child: &dyn LayoutNode, area_height: f32, width: f32) -> f32 {
    let top_anchor = Self::top_anchor(child);
    let bottom_anchor = Self::bottom_anchor(child);
    if let (Some(top), Some(bottom)) = (top_anchor, bottom_anchor) {
      if child.is_resizable() {
        return area_height - self.region.snapped_top_inset() - self.region.snapped_bottom_inset() - top - bottom;
      }
    }
    child_pref_area_height(child, UNCONSTRAINED, None, width, self.region.snap())
  }
}

impl LayoutNode for AnchorPane {
  fn min_width(&self, height: f32) -> f32 {
    resolve_bound(
      self.region.min_width_override(),
      || self.compute_width(true, height),
      || self.pref_width(height),
    )
  }

  fn min_height(&self, width: f32) -> f32 {
    resolve_bound(
      self.region.min_height_override(),
      || self.compute_height(true, width),
      || self.pref_height(width),
    )
  }

  fn pref_width(&self, height: f32) -> f32 {
    resolve_pref(self.region.pref_width_override(), || self.compute_width(false, height))
  }

  fn pref_height(&self, width: f32) -> f32 {
    resolve_pref(self.region.pref_height_override(), || self.compute_height(false, width))
  }

  fn max_width(&self, height: f32) -> f32 {
    resolve_bound(self.region.max_width_override(), || f32::MAX, || self.pref_width(height))
  }

  fn max_height(&self, width: f32) -> f32 {
    resolve_bound(self.region.max_height_override(), || f32::MAX, || self.pref_height(width))
  }

  fn resize(&mut self, width: f32, height: f32) {
    self.region.resize(width, height);
  }

  fn relocate(&mut self, x: f32, y: f32) {
    self.region.relocate(x, y);
  }

  fn layout_bounds(&self) -> Rect {
    self.region.bounds()
  }

  fn layout(&mut self) {
    let snap = self.region.snap();
    let width = self.region.width();
    let height = self.region.height();
    let left_inset = self.region.snapped_left_inset();
    let top_inset = self.region.snapped_top_inset();
    let right_inset = self.region.snapped_right_inset();
    let bottom_inset = self.region.snapped_bottom_inset();
    trace!("anchorpane layout: {} children in {}x{}", self.children.len(), width, height);

    struct Placement {
      x: f32,
      y: f32,
      w: f32,
      h: f32,
    }
    let mut placements = Vec::with_capacity(self.children.len());
    for child in &self.children {
      let top_anchor = Self::top_anchor(child.as_ref());
      let bottom_anchor = Self::bottom_anchor(child.as_ref());
      let left_anchor = Self::left_anchor(child.as_ref());
      let right_anchor = Self::right_anchor(child.as_ref());

      let (w, h) = match child.content_bias() {
        Some(Orientation::Vertical) => {
          let h = self.anchored_height(child.as_ref(), height, UNCONSTRAINED);
          let w = self.anchored_width(child.as_ref(), width, h);
          (w, h)
        }
        Some(Orientation::Horizontal) => {
          let w = self.anchored_width(child.as_ref(), width, UNCONSTRAINED);
          let h = self.anchored_height(child.as_ref(), height, w);
          (w, h)
        }
        None => (
          self.anchored_width(child.as_ref(), width, UNCONSTRAINED),
          self.anchored_height(child.as_ref(), height, UNCONSTRAINED),
        ),
      };

      let w = snap.size(w);
      let h = snap.size(h);
      let x = snap.position(match (left_anchor, right_anchor) {
        (Some(left), _) => left_inset + left,
        (None, Some(right)) => width - right_inset - right - w,
        (None, None) => child.layout_bounds().x(),
      });
      let y = snap.position(match (top_anchor, bottom_anchor) {
        (Some(top), _) => top_inset + top,
        (None, Some(bottom)) => height - bottom_inset - bottom - h,
        (None, None) => child.layout_bounds().y(),
      });
      placements.push(Placement { x, y, w, h });
    }

    for (child, p) in self.children.iter_mut().zip(placements) {
      child.resize(p.w, p.h);
      child.relocate(p.x, p.y);
      child.layout();
    }
  }

  fn properties(&self) -> &ConstraintBag {
    self.region.properties()
  }

  fn properties_mut(&mut self) -> &mut ConstraintBag {
    self.region.properties_mut()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::node::{FixedNode, SizedNode};

  #[test]
  fn test_pref_size_includes_anchor_offsets() {
    let mut child = SizedNode::new(300.0, 400.0);
    AnchorPane::set_top_anchor(&mut child, Some(20.0));
    AnchorPane::set_left_anchor(&mut child, Some(10.0));
    let mut pane = AnchorPane::new();
    pane.add_child(child);
    assert_eq!(pane.pref_width(UNCONSTRAINED), 310.0);
    assert_eq!(pane.pref_height(UNCONSTRAINED), 420.0);
  }

  #[test]
  fn test_single_sided_anchors_pin_without_stretching() {
    let mut child = SizedNode::new(300.0, 400.0);
    AnchorPane::set_top_anchor(&mut child, Some(20.0));
    AnchorPane::set_left_anchor(&mut child, Some(10.0));
    let mut pane = AnchorPane::new();
    pane.add_child(child);
    pane.resize(500.0, 500.0);
    pane.layout();
    assert_eq!(pane.children()[0].layout_bounds(), Rect::from_xywh(10.0, 20.0, 300.0, 400.0));
  }

  #[test]
  fn test_opposite_anchors_stretch_the_child() {
    let mut child = SizedNode::new(100.0, 100.0);
    AnchorPane::set_top_anchor(&mut child, Some(20.0));
    AnchorPane::set_bottom_anchor(&mut child, Some(10.0));
    AnchorPane::set_left_anchor(&mut child, Some(40.0));
    AnchorPane::set_right_anchor(&mut child, Some(30.0));
    let mut pane = AnchorPane::new();
    pane.add_child(child);
    pane.resize(500.0, 500.0);
    pane.layout();
    assert_eq!(pane.children()[0].layout_bounds(), Rect::from_xywh(40.0, 20.0, 430.0, 470.0));
  }

  #[test]
  fn test_non_resizable_child_is_positioned_only() {
    let mut child = FixedNode::new(100.0, 50.0);
    AnchorPane::set_left_anchor(&mut child, Some(10.0));
    AnchorPane::set_right_anchor(&mut child, Some(10.0));
    AnchorPane::set_top_anchor(&mut child, Some(5.0));
    let mut pane = AnchorPane::new();
    pane.add_child(child);
    pane.resize(400.0, 300.0);
    pane.layout();
    // Opposite anchors do not stretch a non-resizable child.
    assert_eq!(pane.children()[0].layout_bounds(), Rect::from_xywh(10.0, 5.0, 100.0, 50.0));
  }

  #[test]
  fn test_unanchored_child_keeps_manual_position() {
    let mut pane = AnchorPane::new();
    pane.add_child(SizedNode::new(80.0, 60.0));
    pane.children_mut()[0].relocate(25.0, 35.0);
    assert_eq!(pane.pref_width(UNCONSTRAINED), 105.0);
    pane.resize(300.0, 300.0);
    pane.layout();
    assert_eq!(pane.children()[0].layout_bounds(), Rect::from_xywh(25.0, 35.0, 80.0, 60.0));
  }

  #[test]
  fn test_clear_constraints_removes_all_anchors() {
    let mut child = SizedNode::new(10.0, 10.0);
    AnchorPane::set_left_anchor(&mut child, Some(1.0));
    AnchorPane::set_right_anchor(&mut child, Some(2.0));
    AnchorPane::set_top_anchor(&mut child, Some(3.0));
    AnchorPane::set_bottom_anchor(&mut child, Some(4.0));
    AnchorPane::clear_constraints(&mut child);
    assert!(AnchorPane::left_anchor(&child).is_none());
    assert!(AnchorPane::right_anchor(&child).is_none());
    assert!(AnchorPane::top_anchor(&child).is_none());
    assert!(AnchorPane::bottom_anchor(&child).is_none());
  }

  #[test]
  fn test_fractional_anchors_snap_to_pixels() {
    let mut child = SizedNode::new(100.0, 50.0);
    AnchorPane::set_left_anchor(&mut child, Some(10.3));
    AnchorPane::set_top_anchor(&mut child, Some(5.7));
    AnchorPane::set_right_anchor(&mut child, Some(20.2));
    let mut pane = AnchorPane::new();
    pane.add_child(child);
    pane.resize(300.0, 200.0);
    pane.layout();
    let bounds = pane.children()[0].layout_bounds();
    // Positions round, the stretched 269.5 width ceils.
    assert_eq!(bounds.x(), 10.0);
    assert_eq!(bounds.y(), 6.0);
    assert_eq!(bounds.width(), 270.0);
    assert_eq!(bounds.height(), 50.0);
  }

  #[test]
  fn test_right_anchor_only_tracks_the_far_edge() {
    let mut child = SizedNode::new(100.0, 40.0);
    AnchorPane::set_right_anchor(&mut child, Some(15.0));
    let mut pane = AnchorPane::new();
    pane.add_child(child);
    assert_eq!(pane.pref_width(UNCONSTRAINED), 115.0);
    pane.resize(400.0, 200.0);
    pane.layout();
    let bounds = pane.children()[0].layout_bounds();
    assert_eq!(bounds.x(), 285.0);
    assert_eq!(bounds.width(), 100.0);
  }

  #[test]
  fn test_min_width_uses_child_min_between_opposite_anchors() {
    let mut child = SizedNode::with_bounds(50.0, 50.0, 200.0, 200.0, f32::MAX, f32::MAX);
    AnchorPane::set_left_anchor(&mut child, Some(10.0));
    AnchorPane::set_right_anchor(&mut child, Some(10.0));
    let mut pane = AnchorPane::new();
    pane.add_child(child);
    assert_eq!(pane.min_width(UNCONSTRAINED), 70.0);
    assert_eq!(pane.pref_width(UNCONSTRAINED), 220.0);
  }
}
