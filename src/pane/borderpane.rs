//! Five-slot edge pane
//!
//! [`BorderPane`] holds at most one child in each of five slots: top,
//! bottom, left, right, and center. The top and bottom slots span the full
//! content width at their preferred heights, left and right take the
//! remaining height at their preferred widths, and the center fills
//! whatever is left. Each slot child can carry its own alignment and
//! margin.

use log::trace;

use crate::geometry::{Insets, Orientation, Pos, Rect};
use crate::layout::area::{
  child_min_area_height, child_min_area_width, child_pref_area_height, child_pref_area_width,
  layout_in_area, position_in_area,
};
use crate::layout::sizing::bounded_node_size;
use crate::node::{ConstraintBag, ConstraintValue, LayoutNode, UNCONSTRAINED};
use crate::region::{resolve_bound, resolve_pref, Region};
use crate::snap::Snap;

const BORDER_ALIGNMENT: &str = "borderpane-alignment";
const BORDER_MARGIN: &str = "borderpane-margin";

/// A pane with top, bottom, left, right, and center slots
///
/// # Examples
///
/// ```
/// use panekit::{BorderPane, LayoutNode, SizedNode};
///
/// let mut pane = BorderPane::new();
/// pane.set_top(SizedNode::new(500.0, 50.0));
/// pane.set_center(SizedNode::new(300.0, 300.0));
///
/// pane.autosize();
/// pane.layout();
/// assert_eq!(pane.layout_bounds().height(), 350.0);
/// ```
pub struct BorderPane {
  region: Region,
  top: Option<Box<dyn LayoutNode>>,
  bottom: Option<Box<dyn LayoutNode>>,
  left: Option<Box<dyn LayoutNode>>,
  right: Option<Box<dyn LayoutNode>>,
  center: Option<Box<dyn LayoutNode>>,
}

impl Default for BorderPane {
  fn default() -> Self {
    Self::new()
  }
}

impl BorderPane {
  /// An empty pane with all five slots vacant
  pub fn new() -> Self {
    Self {
      region: Region::default(),
      top: None,
      bottom: None,
      left: None,
      right: None,
      center: None,
    }
  }

  /// Overrides the slot's default alignment for one child
  pub fn set_alignment(child: &mut dyn LayoutNode, alignment: Option<Pos>) {
    child
      .properties_mut()
      .set(BORDER_ALIGNMENT, alignment.map(ConstraintValue::Pos));
  }

  /// The child's alignment override, if set
  pub fn alignment(child: &dyn LayoutNode) -> Option<Pos> {
    child.properties().pos(BORDER_ALIGNMENT)
  }

  /// Reserves space around a child; `None` removes the margin
  pub fn set_margin(child: &mut dyn LayoutNode, margin: Option<Insets>) {
    child.properties_mut().set(BORDER_MARGIN, margin.map(ConstraintValue::Insets));
  }

  /// The child's margin, if one was set
  pub fn margin(child: &dyn LayoutNode) -> Option<Insets> {
    child.properties().insets(BORDER_MARGIN)
  }

  /// Puts a child in the top slot, replacing any present
  pub fn set_top(&mut self, child: impl LayoutNode + 'static) {
    self.top = Some(Box::new(child));
  }

  /// Empties the top slot
  pub fn clear_top(&mut self) {
    self.top = None;
  }

  /// The top slot's child, if present
  pub fn top(&self) -> Option<&dyn LayoutNode> {
    self.top.as_deref()
  }

  /// Mutable access to the top slot's child
  pub fn top_mut(&mut self) -> Option<&mut (dyn LayoutNode + 'static)> {
    self.top.as_deref_mut()
  }

  /// Puts a child in the bottom slot, replacing any present
  pub fn set_bottom(&mut self, child: impl LayoutNode + 'static) {
    self.bottom = Some(Box::new(child));
  }

  /// Empties the bottom slot
  pub fn clear_bottom(&mut self) {
    self.bottom = None;
  }

  /// The bottom slot's child, if present
  pub fn bottom(&self) -> Option<&dyn LayoutNode> {
    self.bottom.as_deref()
  }

  /// Mutable access to the bottom slot's child
  pub fn bottom_mut(&mut self) -> Option<&mut (dyn LayoutNode + 'static)> {
    self.bottom.as_deref_mut()
  }

  /// Puts a child in the left slot, replacing any present
  pub fn set_left(&mut self, child: impl LayoutNode + 'static) {
    self.left = Some(Box::new(child));
  }

  /// Empties the left slot
  pub fn clear_left(&mut self) {
    self.left = None;
  }

  /// The left slot's child, if present
  pub fn left(&self) -> Option<&dyn LayoutNode> {
    self.left.as_deref()
  }

  /// Mutable access to the left slot's child
  pub fn left_mut(&mut self) -> Option<&mut (dyn LayoutNode + 'static)> {
    self.left.as_deref_mut()
  }

  /// Puts a child in the right slot, replacing any present
  pub fn set_right(&mut self, child: impl LayoutNode + 'static) {
    self.right = Some(Box::new(child));
  }

  /// Empties the right slot
  pub fn clear_right(&mut self) {
    self.right = None;
  }

  /// The right slot's child, if present
  pub fn right(&self) -> Option<&dyn LayoutNode> {
    self.right.as_deref()
  }

  /// Mutable access to the right slot's child
  pub fn right_mut(&mut self) -> Option<&mut (dyn LayoutNode + 'static)> {
    self.right.as_deref_mut()
  }

  /// Puts a child in the center slot, replacing any present
  pub fn set_center(&mut self, child: impl LayoutNode + 'static) {
    self.center = Some(Box::new(child));
  }

  /// Empties the center slot
  pub fn clear_center(&mut self) {
    self.center = None;
  }

  /// The center slot's child, if present
  pub fn center(&self) -> Option<&dyn LayoutNode> {
    self.center.as_deref()
  }

  /// Mutable access to the center slot's child
  pub fn center_mut(&mut self) -> Option<&mut (dyn LayoutNode + 'static)> {
    self.center.as_deref_mut()
  }

  /// Shared pane state (padding, size overrides, snapping)
  pub fn region(&self) -> &Region {
    &self.region
  }

  /// Mutable shared pane state
  pub fn region_mut(&mut self) -> &mut Region {
    &mut self.region
  }

  fn slot_width(slot: Option<&dyn LayoutNode>, height: f32, minimum: bool, snap: Snap) -> f32 {
    match slot {
      Some(child) => {
        let margin = Self::margin(child);
        if minimum {
          child_min_area_width(child, UNCONSTRAINED, margin, height, false, snap)
        } else {
          child_pref_area_width(child, UNCONSTRAINED, margin, height, false, snap)
        }
      }
      None => 0.0,
    }
  }

  fn slot_height(slot: Option<&dyn LayoutNode>, width: f32, minimum: bool, snap: Snap) -> f32 {
    match slot {
      Some(child) => {
        let margin = Self::margin(child);
        if minimum {
          child_min_area_height(child, UNCONSTRAINED, margin, width, snap)
        } else {
          child_pref_area_height(child, UNCONSTRAINED, margin, width, snap)
        }
      }
      None => 0.0,
    }
  }

  fn slot_has_vertical_bias(slot: Option<&dyn LayoutNode>) -> bool {
    slot.is_some_and(|c| c.content_bias() == Some(Orientation::Vertical))
  }

  fn slot_has_horizontal_bias(slot: Option<&dyn LayoutNode>) -> bool {
    slot.is_some_and(|c| c.content_bias() == Some(Orientation::Horizontal))
  }

  fn compute_width(&self, height: f32, minimum: bool) -> f32 {
    let snap = self.region.snap();
    let top_width = Self::slot_width(self.top(), UNCONSTRAINED, minimum, snap);
    let bottom_width = Self::slot_width(self.bottom(), UNCONSTRAINED, minimum, snap);

    let middle_height = if height != UNCONSTRAINED
      && (Self::slot_has_vertical_bias(self.left())
        || Self::slot_has_vertical_bias(self.right())
        || Self::slot_has_vertical_bias(self.center()))
    {
      let top_height = Self::slot_height(self.top(), UNCONSTRAINED, false, snap);
      let bottom_height = Self::slot_height(self.bottom(), UNCONSTRAINED, false, snap);
      height - top_height - bottom_height
    } else {
      UNCONSTRAINED
    };
    // The side slots keep their preferred widths even in the minimum; only
    // the center is allowed to shrink.
    let left_width = Self::slot_width(self.left(), middle_height, false, snap);
    let right_width = Self::slot_width(self.right(), middle_height, false, snap);
    let center_width = Self::slot_width(self.center(), middle_height, minimum, snap);

    let middle = left_width + center_width + right_width;
    self.region.snapped_left_inset() + middle.max(top_width.max(bottom_width)) + self.region.snapped_right_inset()
  }

  fn compute_height(&self, width: f32, minimum: bool) -> f32 {
    let snap = self.region.snap();
    let top_height = Self::slot_height(self.top(), width, minimum, snap);
    let bottom_height = Self::slot_height(self.bottom(), width, minimum, snap);

    let center_width = if width != UNCONSTRAINED && Self::slot_has_horizontal_bias(self.center()) {
      let left_width = Self::slot_width(self.left(), UNCONSTRAINED, false, snap);
      let right_width = Self::slot_width(self.right(), UNCONSTRAINED, false, snap);
      width - left_width - right_width
    } else {
      UNCONSTRAINED
    };
    let left_height = Self::slot_height(self.left(), UNCONSTRAINED, minimum, snap);
    let right_height = Self::slot_height(self.right(), UNCONSTRAINED, minimum, snap);
    let center_height = Self::slot_height(self.center(), center_width, minimum, snap);

    let middle = center_height.max(left_height.max(right_height));
    self.region.snapped_top_inset() + top_height + middle + bottom_height + self.region.snapped_bottom_inset()
  }
}

impl LayoutNode for BorderPane {
  fn min_width(&self, height: f32) -> f32 {
    resolve_bound(
      self.region.min_width_override(),
      || self.compute_width(height, true),
      || self.pref_width(height),
    )
  }

  fn min_height(&self, width: f32) -> f32 {
    resolve_bound(
      self.region.min_height_override(),
      || self.compute_height(width, true),
      || self.pref_height(width),
    )
  }

  fn pref_width(&self, height: f32) -> f32 {
    resolve_pref(self.region.pref_width_override(), || self.compute_width(height, false))
  }

  fn pref_height(&self, width: f32) -> f32 {
    resolve_pref(self.region.pref_height_override(), || self.compute_height(width, false))
  }

  fn max_width(&self, height: f32) -> f32 {
    resolve_bound(self.region.max_width_override(), || f32::MAX, || self.pref_width(height))
  }

  fn max_height(&self, width: f32) -> f32 {
    resolve_bound(self.region.max_height_override(), || f32::MAX, || self.pref_height(width))
  }

  fn content_bias(&self) -> Option<Orientation> {
    [self.center(), self.top(), self.right(), self.bottom(), self.left()]
      .into_iter()
      .flatten()
      .find_map(|slot| slot.content_bias())
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
    // Slots are never laid out below the pane's minimum.
    let width = self.region.width().max(self.min_width(UNCONSTRAINED));
    let height = self.region.height().max(self.min_height(UNCONSTRAINED));
    let inside_x = self.region.snapped_left_inset();
    let inside_y = self.region.snapped_top_inset();
    let inside_width = width - inside_x - self.region.snapped_right_inset();
    let inside_height = height - inside_y - self.region.snapped_bottom_inset();
    trace!("borderpane layout: content {}x{}", inside_width, inside_height);

    let mut top_height = 0.0;
    if let Some(t) = self.top.as_deref_mut() {
      let margin = Self::margin(t).unwrap_or(Insets::EMPTY);
      let adjusted_width = inside_width - snap.space(margin.left) - snap.space(margin.right);
      let adjusted_height = inside_height - snap.space(margin.top) - snap.space(margin.bottom);
      top_height = snap.size(t.pref_height(adjusted_width)).min(adjusted_height);
      let size = bounded_node_size(t, adjusted_width, top_height, true, true);
      top_height = snap.size(size.height);
      t.resize(snap.size(size.width), top_height);
      top_height += snap.space(margin.top) + snap.space(margin.bottom);
      let alignment = Self::alignment(t).unwrap_or(Pos::TopLeft);
      position_in_area(
        t,
        Rect::from_xywh(inside_x, inside_y, inside_width, top_height),
        0.0,
        Some(margin),
        alignment.hpos(),
        alignment.vpos(),
        snap,
      );
    }

    let mut bottom_height = 0.0;
    if let Some(b) = self.bottom.as_deref_mut() {
      let margin = Self::margin(b).unwrap_or(Insets::EMPTY);
      let adjusted_width = inside_width - snap.space(margin.left) - snap.space(margin.right);
      let adjusted_height = inside_height - snap.space(margin.top) - snap.space(margin.bottom);
      bottom_height = snap.size(b.pref_height(adjusted_width)).min(adjusted_height - top_height);
      let size = bounded_node_size(b, adjusted_width, bottom_height, true, true);
      bottom_height = snap.size(size.height);
      b.resize(snap.size(size.width), bottom_height);
      bottom_height += snap.space(margin.top) + snap.space(margin.bottom);
      let alignment = Self::alignment(b).unwrap_or(Pos::BottomLeft);
      position_in_area(
        b,
        Rect::from_xywh(
          inside_x,
          inside_y + inside_height - bottom_height,
          inside_width,
          bottom_height,
        ),
        0.0,
        Some(margin),
        alignment.hpos(),
        alignment.vpos(),
        snap,
      );
    }

    let middle_height = inside_height - top_height - bottom_height;

    let mut left_width = 0.0;
    if let Some(l) = self.left.as_deref_mut() {
      let margin = Self::margin(l).unwrap_or(Insets::EMPTY);
      let adjusted_width = inside_width - snap.space(margin.left) - snap.space(margin.right);
      let adjusted_height = middle_height - snap.space(margin.top) - snap.space(margin.bottom);
      left_width = snap.size(l.pref_width(adjusted_height)).min(adjusted_width);
      let size = bounded_node_size(l, left_width, adjusted_height, true, true);
      left_width = snap.size(size.width);
      l.resize(left_width, snap.size(size.height));
      left_width += snap.space(margin.left) + snap.space(margin.right);
      let alignment = Self::alignment(l).unwrap_or(Pos::TopLeft);
      position_in_area(
        l,
        Rect::from_xywh(inside_x, inside_y + top_height, left_width, middle_height),
        0.0,
        Some(margin),
        alignment.hpos(),
        alignment.vpos(),
        snap,
      );
    }

    let mut right_width = 0.0;
    if let Some(r) = self.right.as_deref_mut() {
      let margin = Self::margin(r).unwrap_or(Insets::EMPTY);
      let adjusted_width = inside_width - snap.space(margin.left) - snap.space(margin.right);
      let adjusted_height = middle_height - snap.space(margin.top) - snap.space(margin.bottom);
      right_width = snap.size(r.pref_width(adjusted_height)).min(adjusted_width - left_width);
      let size = bounded_node_size(r, right_width, adjusted_height, true, true);
      right_width = snap.size(size.width);
      r.resize(right_width, snap.size(size.height));
      right_width += snap.space(margin.left) + snap.space(margin.right);
      let alignment = Self::alignment(r).unwrap_or(Pos::TopRight);
      position_in_area(
        r,
        Rect::from_xywh(
          inside_x + inside_width - right_width,
          inside_y + top_height,
          right_width,
          middle_height,
        ),
        0.0,
        Some(margin),
        alignment.hpos(),
        alignment.vpos(),
        snap,
      );
    }

    if let Some(c) = self.center.as_deref_mut() {
      let margin = Self::margin(c);
      let alignment = Self::alignment(c).unwrap_or(Pos::Center);
      layout_in_area(
        c,
        Rect::from_xywh(
          inside_x + left_width,
          inside_y + top_height,
          inside_width - left_width - right_width,
          middle_height,
        ),
        0.0,
        margin,
        true,
        true,
        alignment.hpos(),
        alignment.vpos(),
        snap,
      );
    }

    for slot in [
      self.top.as_deref_mut(),
      self.bottom.as_deref_mut(),
      self.left.as_deref_mut(),
      self.right.as_deref_mut(),
      self.center.as_deref_mut(),
    ]
    .into_iter()
    .flatten()
    {
      slot.layout();
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
  use crate::node::SizedNode;

  #[test]
  fn test_center_only_mirrors_child_bounds() {
    let mut pane = BorderPane::new();
    pane.set_center(SizedNode::with_bounds(10.0, 20.0, 100.0, 200.0, f32::MAX, f32::MAX));
    assert_eq!(pane.min_width(UNCONSTRAINED), 10.0);
    assert_eq!(pane.min_height(UNCONSTRAINED), 20.0);
    assert_eq!(pane.pref_width(UNCONSTRAINED), 100.0);
    assert_eq!(pane.pref_height(UNCONSTRAINED), 200.0);
    assert_eq!(pane.max_width(UNCONSTRAINED), f32::MAX);
  }

  #[test]
  fn test_center_fills_after_autosize() {
    let mut pane = BorderPane::new();
    pane.set_center(SizedNode::with_bounds(10.0, 20.0, 100.0, 200.0, f32::MAX, f32::MAX));
    pane.autosize();
    pane.layout();
    assert_eq!(pane.layout_bounds().size, crate::geometry::Size::new(100.0, 200.0));
    let center = pane.center().unwrap();
    assert_eq!(center.layout_bounds(), Rect::from_xywh(0.0, 0.0, 100.0, 200.0));
  }

  #[test]
  fn test_content_bias_follows_a_biased_slot() {
    use crate::node::BiasedNode;

    let mut pane = BorderPane::new();
    pane.set_center(BiasedNode::new(Orientation::Horizontal, 200.0, 100.0));
    assert_eq!(pane.content_bias(), Some(Orientation::Horizontal));
    // A narrower width makes the biased center taller.
    assert_eq!(pane.pref_height(100.0), 200.0);

    // The center slot wins over biased edges.
    pane.set_top(BiasedNode::new(Orientation::Vertical, 50.0, 50.0));
    assert_eq!(pane.content_bias(), Some(Orientation::Horizontal));

    pane.clear_center();
    assert_eq!(pane.content_bias(), Some(Orientation::Vertical));

    pane.clear_top();
    assert_eq!(pane.content_bias(), None);
  }

  #[test]
  fn test_edges_carve_out_center_area() {
    let mut pane = BorderPane::new();
    pane.set_top(SizedNode::new(100.0, 50.0));
    pane.set_bottom(SizedNode::new(100.0, 30.0));
    pane.set_left(SizedNode::new(40.0, 100.0));
    pane.set_right(SizedNode::new(60.0, 100.0));
    pane.set_center(SizedNode::new(200.0, 200.0));
    pane.resize(400.0, 380.0);
    pane.layout();

    assert_eq!(pane.top().unwrap().layout_bounds(), Rect::from_xywh(0.0, 0.0, 400.0, 50.0));
    assert_eq!(
      pane.bottom().unwrap().layout_bounds(),
      Rect::from_xywh(0.0, 350.0, 400.0, 30.0)
    );
    assert_eq!(
      pane.left().unwrap().layout_bounds(),
      Rect::from_xywh(0.0, 50.0, 40.0, 300.0)
    );
    assert_eq!(
      pane.right().unwrap().layout_bounds(),
      Rect::from_xywh(340.0, 50.0, 60.0, 300.0)
    );
    assert_eq!(
      pane.center().unwrap().layout_bounds(),
      Rect::from_xywh(40.0, 50.0, 300.0, 300.0)
    );
  }

  #[test]
  fn test_pref_size_sums_edges() {
    let mut pane = BorderPane::new();
    pane.set_top(SizedNode::new(100.0, 50.0));
    pane.set_left(SizedNode::new(40.0, 100.0));
    pane.set_center(SizedNode::new(200.0, 200.0));
    // Width: left pref + center pref vs top pref; height: top + middle.
    assert_eq!(pane.pref_width(UNCONSTRAINED), 240.0);
    assert_eq!(pane.pref_height(UNCONSTRAINED), 250.0);
  }

  #[test]
  fn test_margin_reserves_space() {
    let mut pane = BorderPane::new();
    let mut center = SizedNode::new(100.0, 100.0);
    BorderPane::set_margin(&mut center, Some(Insets::all(10.0).unwrap()));
    pane.set_center(center);
    assert_eq!(pane.pref_width(UNCONSTRAINED), 120.0);
    pane.resize(200.0, 200.0);
    pane.layout();
    assert_eq!(
      pane.center().unwrap().layout_bounds(),
      Rect::from_xywh(10.0, 10.0, 180.0, 180.0)
    );
  }

  #[test]
  fn test_replacing_a_slot() {
    let mut pane = BorderPane::new();
    pane.set_center(SizedNode::new(100.0, 100.0));
    pane.set_center(SizedNode::new(50.0, 50.0));
    assert_eq!(pane.pref_width(UNCONSTRAINED), 50.0);
    pane.clear_center();
    assert!(pane.center().is_none());
    assert_eq!(pane.pref_width(UNCONSTRAINED), 0.0);
  }
}
