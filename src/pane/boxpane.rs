//! Single-row and single-column panes
//!
//! [`HBox`] lays its children out in one horizontal row, [`VBox`] in one
//! vertical column. Along the main axis children start at their preferred
//! sizes and the difference to the allocated extent is distributed by grow
//! priority (surplus) or pulled back toward minimums (deficit). Across the
//! main axis children fill the pane by default; turning fill off aligns
//! each child within the cross extent instead.
//!
//! `HBox` additionally supports baseline vertical alignment: children are
//! positioned so their text baselines coincide, and fill is suppressed
//! because a baseline-aligned child keeps its own height.

use log::trace;

use crate::error::{Error, Result};
use crate::geometry::{Insets, Orientation, Pos, Rect, VPos};
use crate::layout::area::{
  self, child_max_area_height, child_max_area_width, child_min_area_height, child_min_area_width,
  child_pref_area_height, child_pref_area_width, layout_in_area,
};
use crate::layout::distribute::{distribute, SpaceItem};
use crate::layout::sizing::{compute_x_offset, compute_y_offset};
use crate::node::{ConstraintBag, ConstraintValue, LayoutNode, BASELINE_OFFSET_SAME_AS_HEIGHT, UNCONSTRAINED};
use crate::pane::constraints::Priority;
use crate::region::{resolve_bound, resolve_pref, Region};

const HBOX_HGROW: &str = "hbox-hgrow";
const HBOX_MARGIN: &str = "hbox-margin";
const VBOX_VGROW: &str = "vbox-vgrow";
const VBOX_MARGIN: &str = "vbox-margin";

/// A pane that lays out its children in a single horizontal row
///
/// # Examples
///
/// ```
/// use panekit::{HBox, LayoutNode, Priority, SizedNode};
///
/// let mut row = HBox::new();
/// row.add_child(SizedNode::new(100.0, 100.0));
/// let mut grower = SizedNode::new(300.0, 300.0);
/// HBox::set_hgrow(&mut grower, Some(Priority::Always));
/// row.add_child(grower);
///
/// row.resize(500.0, 300.0);
/// row.layout();
/// assert_eq!(row.children()[0].layout_bounds().width(), 100.0);
/// assert_eq!(row.children()[1].layout_bounds().width(), 400.0);
/// ```
pub struct HBox {
  region: Region,
  children: Vec<Box<dyn LayoutNode>>,
  spacing: f32,
  alignment: Pos,
  fill_height: bool,
}

impl Default for HBox {
  fn default() -> Self {
    Self::new()
  }
}

impl HBox {
  /// An empty row with no spacing, top-left alignment, and fill on
  pub fn new() -> Self {
    Self {
      region: Region::default(),
      children: Vec::new(),
      spacing: 0.0,
      alignment: Pos::TopLeft,
      fill_height: true,
    }
  }

  /// Marks a child for surplus-width distribution; `None` restores `Never`
  pub fn set_hgrow(child: &mut dyn LayoutNode, priority: Option<Priority>) {
    child
      .properties_mut()
      .set(HBOX_HGROW, priority.map(ConstraintValue::Priority));
  }

  /// The child's grow priority, if one was set
  pub fn hgrow(child: &dyn LayoutNode) -> Option<Priority> {
    child.properties().priority(HBOX_HGROW)
  }

  /// Reserves space around a child; `None` removes the margin
  pub fn set_margin(child: &mut dyn LayoutNode, margin: Option<Insets>) {
    child.properties_mut().set(HBOX_MARGIN, margin.map(ConstraintValue::Insets));
  }

  /// The child's margin, if one was set
  pub fn margin(child: &dyn LayoutNode) -> Option<Insets> {
    child.properties().insets(HBOX_MARGIN)
  }

  /// Appends a child
  pub fn add_child(&mut self, child: impl LayoutNode + 'static) {
    self.children.push(Box::new(child));
  }

  /// The children in layout order
  pub fn children(&self) -> &[Box<dyn LayoutNode>] {
    &self.children
  }

  /// Mutable access to the children, for constraint setters
  pub fn children_mut(&mut self) -> &mut [Box<dyn LayoutNode>] {
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

  /// Gap between adjacent children
  pub fn spacing(&self) -> f32 {
    self.spacing
  }

  /// Sets the gap between adjacent children; must be non-negative
  pub fn set_spacing(&mut self, spacing: f32) -> Result<()> {
    if spacing < 0.0 {
      return Err(Error::InvalidDimension {
        what: "spacing",
        value: spacing,
      });
    }
    self.spacing = spacing;
    Ok(())
  }

  /// How the content block sits within the pane
  pub fn alignment(&self) -> Pos {
    self.alignment
  }

  /// Sets the content alignment
  pub fn set_alignment(&mut self, alignment: Pos) {
    self.alignment = alignment;
  }

  /// Whether children stretch to the full content height
  pub fn fill_height(&self) -> bool {
    self.fill_height
  }

  /// Sets whether children stretch vertically
  pub fn set_fill_height(&mut self, fill: bool) {
    self.fill_height = fill;
  }

  fn should_fill_height(&self) -> bool {
    self.fill_height && self.alignment.vpos() != VPos::Baseline
  }

  fn min_complement(&self) -> f32 {
    if self.alignment.vpos() == VPos::Baseline {
      let refs: Vec<&dyn LayoutNode> = self.children.iter().map(|c| c.as_ref()).collect();
      area::min_baseline_complement(&refs)
    } else {
      UNCONSTRAINED
    }
  }

  fn child_margin(child: &dyn LayoutNode) -> Option<Insets> {
    child.properties().insets(HBOX_MARGIN)
  }

  fn area_widths(&self, height: f32, minimum: bool) -> Vec<f32> {
    let snap = self.region.snap();
    let inside_height = if height == UNCONSTRAINED {
      UNCONSTRAINED
    } else {
      height - self.region.snapped_top_inset() - self.region.snapped_bottom_inset()
    };
    let fill = self.should_fill_height();
    let complement = self.min_complement();
    self
      .children
      .iter()
      .map(|child| {
        let margin = Self::child_margin(child.as_ref());
        if minimum {
          child_min_area_width(child.as_ref(), complement, margin, inside_height, fill, snap)
        } else {
          child_pref_area_width(child.as_ref(), complement, margin, inside_height, fill, snap)
        }
      })
      .collect()
  }

  /// Distributes the width delta over `widths`; returns the content width
  fn adjust_area_widths(&self, widths: &mut [f32], width: f32, height: f32) -> f32 {
    let snap = self.region.snap();
    let space = snap.space(self.spacing);
    let gaps = space * widths.len().saturating_sub(1) as f32;
    let mut content = widths.iter().sum::<f32>() + gaps;
    let extra = width - self.region.snapped_left_inset() - self.region.snapped_right_inset() - content;
    if extra != 0.0 && !widths.is_empty() {
      let ref_height = if self.should_fill_height() && height != UNCONSTRAINED {
        height
      } else {
        UNCONSTRAINED
      };
      let complement = self.min_complement();
      let mut items: Vec<SpaceItem> = self
        .children
        .iter()
        .zip(widths.iter())
        .map(|(child, &w)| {
          let margin = Self::child_margin(child.as_ref());
          SpaceItem {
            size: w,
            min: child_min_area_width(child.as_ref(), complement, margin, ref_height, false, snap),
            max: child_max_area_width(child.as_ref(), complement, margin, ref_height, false, snap),
            priority: Self::hgrow(child.as_ref()).unwrap_or_default(),
          }
        })
        .collect();
      let remaining = distribute(&mut items, extra, snap);
      for (w, item) in widths.iter_mut().zip(&items) {
        *w = item.size;
      }
      content += extra - remaining;
    }
    content
  }

  /// Tallest child area height at min or pref, per the vertical alignment
  fn max_area_height(&self, widths: Option<&[f32]>, minimum: bool) -> f32 {
    let snap = self.region.snap();
    if self.alignment.vpos() == VPos::Baseline {
      let mut max_above = 0.0_f32;
      let mut max_below = 0.0_f32;
      for (i, child) in self.children.iter().enumerate() {
        let child_width = widths.map_or(UNCONSTRAINED, |w| w[i]);
        let margin = Self::child_margin(child.as_ref());
        let top = margin.map_or(0.0, |m| snap.space(m.top));
        let bottom = margin.map_or(0.0, |m| snap.space(m.bottom));
        let baseline = child.baseline_offset();
        let child_height = if minimum {
          snap.size(child.min_height(child_width))
        } else {
          snap.size(child.pref_height(child_width))
        };
        if baseline == BASELINE_OFFSET_SAME_AS_HEIGHT {
          max_above = max_above.max(child_height + top);
        } else {
          max_above = max_above.max(baseline + top);
          max_below = max_below.max(child_height - baseline + bottom);
        }
      }
      max_above + max_below
    } else {
      let mut max = 0.0_f32;
      for (i, child) in self.children.iter().enumerate() {
        let child_width = widths.map_or(UNCONSTRAINED, |w| w[i]);
        let margin = Self::child_margin(child.as_ref());
        max = max.max(if minimum {
          child_min_area_height(child.as_ref(), UNCONSTRAINED, margin, child_width, snap)
        } else {
          child_pref_area_height(child.as_ref(), UNCONSTRAINED, margin, child_width, snap)
        });
      }
      max
    }
  }

  fn content_width(&self, height: f32, minimum: bool) -> f32 {
    let widths = self.area_widths(height, minimum);
    let space = self.region.snap().space(self.spacing);
    widths.iter().sum::<f32>() + space * widths.len().saturating_sub(1) as f32
  }

  fn compute_min_width(&self, height: f32) -> f32 {
    self.region.snapped_left_inset() + self.content_width(height, true) + self.region.snapped_right_inset()
  }

  fn compute_pref_width(&self, height: f32) -> f32 {
    self.region.snapped_left_inset() + self.content_width(height, false) + self.region.snapped_right_inset()
  }

  fn compute_height(&self, width: f32, minimum: bool) -> f32 {
    let content = if width != UNCONSTRAINED && self.content_bias().is_some() {
      let mut widths = self.area_widths(UNCONSTRAINED, false);
      self.adjust_area_widths(&mut widths, width, UNCONSTRAINED);
      self.max_area_height(Some(&widths), minimum)
    } else {
      self.max_area_height(None, minimum)
    };
    self.region.snapped_top_inset() + content + self.region.snapped_bottom_inset()
  }
}

impl LayoutNode for HBox {
  fn min_width(&self, height: f32) -> f32 {
    resolve_bound(
      self.region.min_width_override(),
      || self.compute_min_width(height),
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
    resolve_pref(self.region.pref_width_override(), || self.compute_pref_width(height))
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
    self.children.iter().find_map(|c| c.content_bias())
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
    let top = self.region.snapped_top_inset();
    let left = self.region.snapped_left_inset();
    let bottom = self.region.snapped_bottom_inset();
    let right = self.region.snapped_right_inset();
    let space = snap.space(self.spacing);
    let align = self.alignment;
    let fill = self.should_fill_height();
    trace!("hbox layout: {} children in {}x{}", self.children.len(), width, height);

    let mut widths = self.area_widths(height, false);
    let content_width = self.adjust_area_widths(&mut widths, width, height);
    let content_height = height - top - bottom;

    let baseline_offset = if align.vpos() == VPos::Baseline {
      let refs: Vec<&dyn LayoutNode> = self.children.iter().map(|c| c.as_ref()).collect();
      let complement = area::min_baseline_complement(&refs);
      area::area_baseline_offset(
        &refs,
        |c| Self::child_margin(c),
        |i| widths[i],
        content_height,
        |_| fill,
        complement,
        snap,
      )
    } else {
      0.0
    };

    let margins: Vec<Option<Insets>> = self
      .children
      .iter()
      .map(|c| Self::child_margin(c.as_ref()))
      .collect();

    let mut x = left + compute_x_offset(width - left - right, content_width, align.hpos());
    for (i, child) in self.children.iter_mut().enumerate() {
      layout_in_area(
        child.as_mut(),
        Rect::from_xywh(x, top, widths[i], content_height),
        baseline_offset,
        margins[i],
        true,
        fill,
        align.hpos(),
        align.vpos(),
        snap,
      );
      x += widths[i] + space;
    }
    for child in &mut self.children {
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

/// A pane that stacks its children in a single vertical column
///
/// The vertical mirror of [`HBox`]: surplus or deficit height is
/// distributed by per-child `vgrow` priority, and children fill the content
/// width unless `fill_width` is turned off.
pub struct VBox {
  region: Region,
  children: Vec<Box<dyn LayoutNode>>,
  spacing: f32,
  alignment: Pos,
  fill_width: bool,
}

impl Default for VBox {
  fn default() -> Self {
    Self::new()
  }
}

impl VBox {
  /// An empty column with no spacing, top-left alignment, and fill on
  pub fn new() -> Self {
    Self {
      region: Region::default(),
      children: Vec::new(),
      spacing: 0.0,
      alignment: Pos::TopLeft,
      fill_width: true,
    }
  }

  /// Marks a child for surplus-height distribution; `None` restores `Never`
  pub fn set_vgrow(child: &mut dyn LayoutNode, priority: Option<Priority>) {
    child
      .properties_mut()
      .set(VBOX_VGROW, priority.map(ConstraintValue::Priority));
  }

  /// The child's grow priority, if one was set
  pub fn vgrow(child: &dyn LayoutNode) -> Option<Priority> {
    child.properties().priority(VBOX_VGROW)
  }

  /// Reserves space around a child; `None` removes the margin
  pub fn set_margin(child: &mut dyn LayoutNode, margin: Option<Insets>) {
    child.properties_mut().set(VBOX_MARGIN, margin.map(ConstraintValue::Insets));
  }

  /// The child's margin, if one was set
  pub fn margin(child: &dyn LayoutNode) -> Option<Insets> {
    child.properties().insets(VBOX_MARGIN)
  }

  /// Appends a child
  pub fn add_child(&mut self, child: impl LayoutNode + 'static) {
    self.children.push(Box::new(child));
  }

  /// The children in layout order
  pub fn children(&self) -> &[Box<dyn LayoutNode>] {
    &self.children
  }

  /// Mutable access to the children, for constraint setters
  pub fn children_mut(&mut self) -> &mut [Box<dyn LayoutNode>] {
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

  /// Gap between adjacent children
  pub fn spacing(&self) -> f32 {
    self.spacing
  }

  /// Sets the gap between adjacent children; must be non-negative
  pub fn set_spacing(&mut self, spacing: f32) -> Result<()> {
    if spacing < 0.0 {
      return Err(Error::InvalidDimension {
        what: "spacing",
        value: spacing,
      });
    }
    self.spacing = spacing;
    Ok(())
  }

  /// How the content block sits within the pane
  pub fn alignment(&self) -> Pos {
    self.alignment
  }

  /// Sets the content alignment
  pub fn set_alignment(&mut self, alignment: Pos) {
    self.alignment = alignment;
  }

  /// Whether children stretch to the full content width
  pub fn fill_width(&self) -> bool {
    self.fill_width
  }

  /// Sets whether children stretch horizontally
  pub fn set_fill_width(&mut self, fill: bool) {
    self.fill_width = fill;
  }

  fn child_margin(child: &dyn LayoutNode) -> Option<Insets> {
    child.properties().insets(VBOX_MARGIN)
  }

  fn area_heights(&self, width: f32, minimum: bool) -> Vec<f32> {
    let snap = self.region.snap();
    let inside_width = if width == UNCONSTRAINED {
      UNCONSTRAINED
    } else {
      width - self.region.snapped_left_inset() - self.region.snapped_right_inset()
    };
    let alt_width = if inside_width != UNCONSTRAINED && self.fill_width {
      inside_width
    } else {
      UNCONSTRAINED
    };
    self
      .children
      .iter()
      .map(|child| {
        let margin = Self::child_margin(child.as_ref());
        if minimum {
          child_min_area_height(child.as_ref(), UNCONSTRAINED, margin, alt_width, snap)
        } else {
          child_pref_area_height(child.as_ref(), UNCONSTRAINED, margin, alt_width, snap)
        }
      })
      .collect()
  }

  /// Distributes the height delta over `heights`; returns the content height
  fn adjust_area_heights(&self, heights: &mut [f32], height: f32, width: f32) -> f32 {
    let snap = self.region.snap();
    let space = snap.space(self.spacing);
    let gaps = space * heights.len().saturating_sub(1) as f32;
    let mut content = heights.iter().sum::<f32>() + gaps;
    let extra = height - self.region.snapped_top_inset() - self.region.snapped_bottom_inset() - content;
    if extra != 0.0 && !heights.is_empty() {
      let ref_width = if self.fill_width && width != UNCONSTRAINED {
        width
      } else {
        UNCONSTRAINED
      };
      let mut items: Vec<SpaceItem> = self
        .children
        .iter()
        .zip(heights.iter())
        .map(|(child, &h)| {
          let margin = Self::child_margin(child.as_ref());
          SpaceItem {
            size: h,
            min: child_min_area_height(child.as_ref(), UNCONSTRAINED, margin, ref_width, snap),
            max: child_max_area_height(child.as_ref(), UNCONSTRAINED, margin, ref_width, snap),
            priority: Self::vgrow(child.as_ref()).unwrap_or_default(),
          }
        })
        .collect();
      let remaining = distribute(&mut items, extra, snap);
      for (h, item) in heights.iter_mut().zip(&items) {
        *h = item.size;
      }
      content += extra - remaining;
    }
    content
  }

  /// Widest child area width at min or pref
  fn max_area_width(&self, heights: Option<&[f32]>, minimum: bool) -> f32 {
    let snap = self.region.snap();
    let mut max = 0.0_f32;
    for (i, child) in self.children.iter().enumerate() {
      let child_height = heights.map_or(UNCONSTRAINED, |h| h[i]);
      let margin = Self::child_margin(child.as_ref());
      max = max.max(if minimum {
        child_min_area_width(child.as_ref(), UNCONSTRAINED, margin, child_height, false, snap)
      } else {
        child_pref_area_width(child.as_ref(), UNCONSTRAINED, margin, child_height, false, snap)
      });
    }
    max
  }

  fn content_height(&self, width: f32, minimum: bool) -> f32 {
    let heights = self.area_heights(width, minimum);
    let space = self.region.snap().space(self.spacing);
    heights.iter().sum::<f32>() + space * heights.len().saturating_sub(1) as f32
  }

  fn compute_min_height(&self, width: f32) -> f32 {
    self.region.snapped_top_inset() + self.content_height(width, true) + self.region.snapped_bottom_inset()
  }

  fn compute_pref_height(&self, width: f32) -> f32 {
    self.region.snapped_top_inset() + self.content_height(width, false) + self.region.snapped_bottom_inset()
  }

  fn compute_width(&self, height: f32, minimum: bool) -> f32 {
    let content = if height != UNCONSTRAINED && self.content_bias().is_some() {
      let mut heights = self.area_heights(UNCONSTRAINED, false);
      self.adjust_area_heights(&mut heights, height, UNCONSTRAINED);
      self.max_area_width(Some(&heights), minimum)
    } else {
      self.max_area_width(None, minimum)
    };
    self.region.snapped_left_inset() + content + self.region.snapped_right_inset()
  }
}

impl LayoutNode for VBox {
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
      || self.compute_min_height(width),
      || self.pref_height(width),
    )
  }

  fn pref_width(&self, height: f32) -> f32 {
    resolve_pref(self.region.pref_width_override(), || self.compute_width(height, false))
  }

  fn pref_height(&self, width: f32) -> f32 {
    resolve_pref(self.region.pref_height_override(), || self.compute_pref_height(width))
  }

  fn max_width(&self, height: f32) -> f32 {
    resolve_bound(self.region.max_width_override(), || f32::MAX, || self.pref_width(height))
  }

  fn max_height(&self, width: f32) -> f32 {
    resolve_bound(self.region.max_height_override(), || f32::MAX, || self.pref_height(width))
  }

  fn content_bias(&self) -> Option<Orientation> {
    self.children.iter().find_map(|c| c.content_bias())
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
    let top = self.region.snapped_top_inset();
    let left = self.region.snapped_left_inset();
    let bottom = self.region.snapped_bottom_inset();
    let right = self.region.snapped_right_inset();
    let space = snap.space(self.spacing);
    let align = self.alignment;
    let fill = self.fill_width;
    trace!("vbox layout: {} children in {}x{}", self.children.len(), width, height);

    let mut heights = self.area_heights(width, false);
    let content_height = self.adjust_area_heights(&mut heights, height, width);
    let content_width = width - left - right;

    let margins: Vec<Option<Insets>> = self
      .children
      .iter()
      .map(|c| Self::child_margin(c.as_ref()))
      .collect();

    let mut y = top + compute_y_offset(height - top - bottom, content_height, align.vpos());
    for (i, child) in self.children.iter_mut().enumerate() {
      layout_in_area(
        child.as_mut(),
        Rect::from_xywh(left, y, content_width, heights[i]),
        0.0,
        margins[i],
        fill,
        true,
        align.hpos(),
        align.vpos(),
        snap,
      );
      y += heights[i] + space;
    }
    for child in &mut self.children {
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
  use crate::node::SizedNode;

  #[test]
  fn test_hbox_pref_size_sums_widths() {
    let mut row = HBox::new();
    row.set_spacing(10.0).unwrap();
    row.add_child(SizedNode::new(100.0, 50.0));
    row.add_child(SizedNode::new(200.0, 80.0));
    assert_eq!(row.pref_width(UNCONSTRAINED), 310.0);
    assert_eq!(row.pref_height(UNCONSTRAINED), 80.0);
  }

  #[test]
  fn test_hbox_places_children_in_order() {
    let mut row = HBox::new();
    row.add_child(SizedNode::new(100.0, 100.0));
    row.add_child(SizedNode::new(200.0, 100.0));
    row.autosize();
    row.layout();
    assert_eq!(row.children()[0].layout_bounds(), Rect::from_xywh(0.0, 0.0, 100.0, 100.0));
    assert_eq!(row.children()[1].layout_bounds(), Rect::from_xywh(100.0, 0.0, 200.0, 100.0));
  }

  #[test]
  fn test_hbox_grow_takes_full_delta() {
    let mut row = HBox::new();
    row.add_child(SizedNode::new(100.0, 100.0));
    let mut grower = SizedNode::new(300.0, 300.0);
    HBox::set_hgrow(&mut grower, Some(Priority::Always));
    row.add_child(grower);
    row.autosize();
    assert_eq!(row.layout_bounds().width(), 400.0);

    row.resize(500.0, 500.0);
    row.layout();
    assert_eq!(row.children()[0].layout_bounds().width(), 100.0);
    assert_eq!(row.children()[1].layout_bounds().width(), 400.0);
    assert_eq!(row.children()[1].layout_bounds().x(), 100.0);
  }

  #[test]
  fn test_hbox_fill_height_stretches() {
    let mut row = HBox::new();
    row.add_child(SizedNode::new(100.0, 50.0));
    row.resize(100.0, 200.0);
    row.layout();
    assert_eq!(row.children()[0].layout_bounds().height(), 200.0);

    row.set_fill_height(false);
    row.layout();
    assert_eq!(row.children()[0].layout_bounds().height(), 50.0);
  }

  #[test]
  fn test_hbox_shrinks_toward_min() {
    let mut row = HBox::new();
    row.add_child(SizedNode::with_bounds(50.0, 0.0, 100.0, 100.0, f32::MAX, f32::MAX));
    row.add_child(SizedNode::with_bounds(50.0, 0.0, 100.0, 100.0, f32::MAX, f32::MAX));
    row.resize(140.0, 100.0);
    row.layout();
    assert_eq!(row.children()[0].layout_bounds().width(), 70.0);
    assert_eq!(row.children()[1].layout_bounds().width(), 70.0);
  }

  #[test]
  fn test_hbox_layout_is_idempotent() {
    let mut row = HBox::new();
    row.set_spacing(7.0).unwrap();
    row.add_child(SizedNode::new(103.0, 50.0));
    row.add_child(SizedNode::new(59.0, 80.0));
    row.resize(300.0, 100.0);
    row.layout();
    let first: Vec<Rect> = row.children().iter().map(|c| c.layout_bounds()).collect();
    row.layout();
    let second: Vec<Rect> = row.children().iter().map(|c| c.layout_bounds()).collect();
    assert_eq!(first, second);
  }

  #[test]
  fn test_vbox_pref_size_sums_heights() {
    let mut column = VBox::new();
    column.set_spacing(10.0).unwrap();
    column.add_child(SizedNode::new(50.0, 100.0));
    column.add_child(SizedNode::new(80.0, 200.0));
    assert_eq!(column.pref_height(UNCONSTRAINED), 310.0);
    assert_eq!(column.pref_width(UNCONSTRAINED), 80.0);
  }

  #[test]
  fn test_vbox_vgrow_and_fill_width() {
    let mut column = VBox::new();
    column.add_child(SizedNode::new(100.0, 100.0));
    let mut grower = SizedNode::new(100.0, 100.0);
    VBox::set_vgrow(&mut grower, Some(Priority::Always));
    column.add_child(grower);
    column.resize(150.0, 300.0);
    column.layout();
    assert_eq!(column.children()[0].layout_bounds(), Rect::from_xywh(0.0, 0.0, 150.0, 100.0));
    assert_eq!(column.children()[1].layout_bounds(), Rect::from_xywh(0.0, 100.0, 150.0, 200.0));
  }

  #[test]
  fn test_vbox_alignment_offsets_block() {
    let mut column = VBox::new();
    column.set_alignment(Pos::BottomCenter);
    column.set_fill_width(false);
    column.add_child(SizedNode::new(50.0, 100.0));
    column.resize(150.0, 300.0);
    column.layout();
    assert_eq!(column.children()[0].layout_bounds(), Rect::from_xywh(50.0, 200.0, 50.0, 100.0));
  }

  #[test]
  fn test_negative_spacing_rejected() {
    let mut row = HBox::new();
    assert!(row.set_spacing(-1.0).is_err());
    let mut column = VBox::new();
    assert!(column.set_spacing(-0.5).is_err());
  }

  #[test]
  fn test_hgrow_round_trip_default() {
    let mut child = SizedNode::new(10.0, 10.0);
    assert_eq!(HBox::hgrow(&child), None);
    HBox::set_hgrow(&mut child, Some(Priority::Sometimes));
    assert_eq!(HBox::hgrow(&child), Some(Priority::Sometimes));
    HBox::set_hgrow(&mut child, None);
    assert_eq!(HBox::hgrow(&child), None);
  }
}
