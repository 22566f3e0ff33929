//! Placing a single child inside an allocated area
//!
//! `layout_in_area` is the one routine every pane funnels child placement
//! through: it subtracts the margin, sizes a resizable child to the usable
//! rectangle (bounded by the child's min/max, respecting content bias), and
//! then positions the result per the horizontal and vertical alignment.
//! `position_in_area` is the position-only half, used for children whose size
//! was already decided.
//!
//! The module also carries the per-child area size queries panes measure
//! with (`child_pref_area_width` and friends): a child's contribution to its
//! parent's size is the child's own size plus its snapped margin, with the
//! perpendicular extent threaded through for biased children.
//!
//! Baseline alignment works in two halves. Measurement splits every child's
//! height into the part above its baseline and the part below it (the
//! "baseline complement"); the area's baseline offset is the max ascent.
//! Placement then turns the space below the area baseline into extra bottom
//! margin for children whose baseline is their full height, and offsets all
//! others so their own baselines coincide with the area's.

use crate::geometry::{HPos, Insets, Orientation, Rect, VPos};
use crate::layout::sizing::{bounded_node_size, bounded_size, compute_x_offset, compute_y_offset};
use crate::node::{LayoutNode, BASELINE_OFFSET_SAME_AS_HEIGHT, UNCONSTRAINED};
use crate::snap::Snap;

/// Positions a child within an area without resizing it
///
/// The child's current layout bounds determine its size. If `valignment` is
/// `Baseline`, the child's own baseline is aligned to `area_baseline_offset`
/// (measured from the area's top edge); otherwise that parameter is ignored.
pub fn position_in_area(
  child: &mut dyn LayoutNode,
  area: Rect,
  area_baseline_offset: f32,
  margin: Option<Insets>,
  halignment: HPos,
  valignment: VPos,
  snap: Snap,
) {
  let margin = margin.unwrap_or(Insets::EMPTY);
  position(
    child,
    area,
    area_baseline_offset,
    snap.space(margin.top),
    snap.space(margin.right),
    snap.space(margin.bottom),
    snap.space(margin.left),
    halignment,
    valignment,
    snap,
  );
}

/// Sizes and positions a child within an area
///
/// A resizable child is resized to fill the margin-reduced area on each axis
/// where the fill flag is set, otherwise to its preferred size capped at the
/// area; either way the child's min/max bounds hold, and a content bias is
/// resolved by sizing the biased axis first. A non-resizable child is only
/// positioned.
///
/// With `Baseline` vertical alignment, a resizable child whose baseline is
/// its full height gets the space below the area baseline folded into its
/// bottom margin, so it is sized to end at the baseline rather than the
/// area's bottom edge.
#[allow(clippy::too_many_arguments)]
pub fn layout_in_area(
  child: &mut dyn LayoutNode,
  area: Rect,
  area_baseline_offset: f32,
  margin: Option<Insets>,
  fill_width: bool,
  fill_height: bool,
  halignment: HPos,
  valignment: VPos,
  snap: Snap,
) {
  let margin = margin.unwrap_or(Insets::EMPTY);
  let mut top = snap.space(margin.top);
  let mut bottom = snap.space(margin.bottom);
  let left = snap.space(margin.left);
  let right = snap.space(margin.right);

  if valignment == VPos::Baseline {
    let bo = child.baseline_offset();
    if bo == BASELINE_OFFSET_SAME_AS_HEIGHT {
      if child.is_resizable() {
        // Everything below the area baseline acts as extra bottom margin;
        // the child's height becomes its ascent.
        bottom += snap.space(area.height() - area_baseline_offset);
      } else {
        top = snap.space(area_baseline_offset - child.layout_bounds().height());
      }
    } else {
      top = snap.space(area_baseline_offset - bo);
    }
  }

  if child.is_resizable() {
    let size = bounded_node_size(
      child,
      area.width() - left - right,
      area.height() - top - bottom,
      fill_width,
      fill_height,
    );
    child.resize(snap.size(size.width), snap.size(size.height));
  }
  position(
    child,
    area,
    area_baseline_offset,
    top,
    right,
    bottom,
    left,
    halignment,
    valignment,
    snap,
  );
}

#[allow(clippy::too_many_arguments)]
fn position(
  child: &mut dyn LayoutNode,
  area: Rect,
  area_baseline_offset: f32,
  top: f32,
  right: f32,
  bottom: f32,
  left: f32,
  hpos: HPos,
  vpos: VPos,
  snap: Snap,
) {
  let bounds = child.layout_bounds();
  let xoffset = left + compute_x_offset(area.width() - left - right, bounds.width(), hpos);
  let yoffset = if vpos == VPos::Baseline {
    let bo = child.baseline_offset();
    if bo == BASELINE_OFFSET_SAME_AS_HEIGHT {
      area_baseline_offset - bounds.height()
    } else {
      area_baseline_offset - bo
    }
  } else {
    top + compute_y_offset(area.height() - top - bottom, bounds.height(), vpos)
  };
  child.relocate(snap.position(area.x() + xoffset), snap.position(area.y() + yoffset));
}

/// The child's minimum width plus its horizontal margin
///
/// `height` constrains a vertically biased child: its width is queried at
/// the height it would actually get in an area that tall. Pass
/// [`UNCONSTRAINED`] when no perpendicular extent is known.
pub fn child_min_area_width(
  child: &dyn LayoutNode,
  baseline_complement: f32,
  margin: Option<Insets>,
  height: f32,
  fill_height: bool,
  snap: Snap,
) -> f32 {
  let left = margin.map_or(0.0, |m| snap.space(m.left));
  let right = margin.map_or(0.0, |m| snap.space(m.right));
  let alt = vertical_bias_alt_height(child, baseline_complement, margin, height, fill_height, snap);
  left + snap.size(child.min_width(alt)) + right
}

/// The child's preferred width plus its horizontal margin
pub fn child_pref_area_width(
  child: &dyn LayoutNode,
  baseline_complement: f32,
  margin: Option<Insets>,
  height: f32,
  fill_height: bool,
  snap: Snap,
) -> f32 {
  let left = margin.map_or(0.0, |m| snap.space(m.left));
  let right = margin.map_or(0.0, |m| snap.space(m.right));
  let alt = vertical_bias_alt_height(child, baseline_complement, margin, height, fill_height, snap);
  left
    + snap.size(bounded_size(
      child.min_width(alt),
      child.pref_width(alt),
      child.max_width(alt),
    ))
    + right
}

/// The child's maximum width plus its horizontal margin
///
/// An unbounded maximum stays unbounded: no margin is added to `f32::MAX`.
pub fn child_max_area_width(
  child: &dyn LayoutNode,
  baseline_complement: f32,
  margin: Option<Insets>,
  height: f32,
  fill_height: bool,
  snap: Snap,
) -> f32 {
  let mut max = child.max_width(UNCONSTRAINED);
  if max == f32::MAX {
    return max;
  }
  let left = margin.map_or(0.0, |m| snap.space(m.left));
  let right = margin.map_or(0.0, |m| snap.space(m.right));
  let alt = vertical_bias_alt_height(child, baseline_complement, margin, height, fill_height, snap);
  if alt != UNCONSTRAINED {
    max = child.max_width(alt);
  }
  // min beats an inconsistent max, so the clamp still applies
  left + snap.size(bounded_size(child.min_width(alt), max, f32::MAX)) + right
}

/// Resolved height to query a vertically biased child's width at
fn vertical_bias_alt_height(
  child: &dyn LayoutNode,
  baseline_complement: f32,
  margin: Option<Insets>,
  height: f32,
  fill_height: bool,
  snap: Snap,
) -> f32 {
  if height == UNCONSTRAINED
    || !child.is_resizable()
    || child.content_bias() != Some(Orientation::Vertical)
  {
    return UNCONSTRAINED;
  }
  let top = margin.map_or(0.0, |m| snap.space(m.top));
  let bottom = margin.map_or(0.0, |m| snap.space(m.bottom));
  let bo = child.baseline_offset();
  let content_height = if bo == BASELINE_OFFSET_SAME_AS_HEIGHT && baseline_complement != UNCONSTRAINED {
    height - top - bottom - baseline_complement
  } else {
    height - top - bottom
  };
  if fill_height {
    snap.size(bounded_size(
      child.min_height(UNCONSTRAINED),
      content_height,
      child.max_height(UNCONSTRAINED),
    ))
  } else {
    snap.size(bounded_size(
      child.min_height(UNCONSTRAINED),
      child.pref_height(UNCONSTRAINED),
      child.max_height(UNCONSTRAINED).min(content_height),
    ))
  }
}

/// The child's minimum height plus its vertical margin
///
/// When `min_baseline_complement` is set (not [`UNCONSTRAINED`]), the result
/// accounts for the row's shared descent below the baseline.
pub fn child_min_area_height(
  child: &dyn LayoutNode,
  min_baseline_complement: f32,
  margin: Option<Insets>,
  width: f32,
  snap: Snap,
) -> f32 {
  let top = margin.map_or(0.0, |m| snap.space(m.top));
  let bottom = margin.map_or(0.0, |m| snap.space(m.bottom));
  let alt = horizontal_bias_alt_min_width(child, margin, width, snap);
  if min_baseline_complement != UNCONSTRAINED {
    let baseline = child.baseline_offset();
    if child.is_resizable() && baseline == BASELINE_OFFSET_SAME_AS_HEIGHT {
      top + snap.size(child.min_height(alt)) + bottom + min_baseline_complement
    } else {
      baseline + min_baseline_complement
    }
  } else {
    top + snap.size(child.min_height(alt)) + bottom
  }
}

/// The child's preferred height plus its vertical margin
pub fn child_pref_area_height(
  child: &dyn LayoutNode,
  pref_baseline_complement: f32,
  margin: Option<Insets>,
  width: f32,
  snap: Snap,
) -> f32 {
  let top = margin.map_or(0.0, |m| snap.space(m.top));
  let bottom = margin.map_or(0.0, |m| snap.space(m.bottom));
  let alt = horizontal_bias_alt_pref_width(child, margin, width, snap);
  if pref_baseline_complement != UNCONSTRAINED {
    let baseline = child.baseline_offset();
    if child.is_resizable() && baseline == BASELINE_OFFSET_SAME_AS_HEIGHT {
      // The whole preferred height sits above the baseline, so the row's
      // descent is added on top of it.
      top
        + snap.size(bounded_size(
          child.min_height(alt),
          child.pref_height(alt),
          child.max_height(alt),
        ))
        + bottom
        + pref_baseline_complement
    } else {
      // The complement already contains this child's own descent.
      top + baseline + pref_baseline_complement + bottom
    }
  } else {
    top
      + snap.size(bounded_size(
        child.min_height(alt),
        child.pref_height(alt),
        child.max_height(alt),
      ))
      + bottom
  }
}

/// The child's maximum height plus its vertical margin
pub fn child_max_area_height(
  child: &dyn LayoutNode,
  max_baseline_complement: f32,
  margin: Option<Insets>,
  width: f32,
  snap: Snap,
) -> f32 {
  let mut max = child.max_height(UNCONSTRAINED);
  if max == f32::MAX {
    return max;
  }
  let top = margin.map_or(0.0, |m| snap.space(m.top));
  let bottom = margin.map_or(0.0, |m| snap.space(m.bottom));
  let alt = horizontal_bias_alt_min_width(child, margin, width, snap);
  if alt != UNCONSTRAINED {
    max = child.max_height(alt);
  }
  if max_baseline_complement != UNCONSTRAINED {
    let baseline = child.baseline_offset();
    if child.is_resizable() && baseline == BASELINE_OFFSET_SAME_AS_HEIGHT {
      top + snap.size(bounded_size(child.min_height(alt), max, f32::MAX)) + bottom + max_baseline_complement
    } else {
      top + baseline + max_baseline_complement + bottom
    }
  } else {
    top + snap.size(bounded_size(child.min_height(alt), max, f32::MAX)) + bottom
  }
}

fn horizontal_bias_alt_min_width(
  child: &dyn LayoutNode,
  margin: Option<Insets>,
  width: f32,
  snap: Snap,
) -> f32 {
  if !child.is_resizable() || child.content_bias() != Some(Orientation::Horizontal) {
    return UNCONSTRAINED;
  }
  let left = margin.map_or(0.0, |m| snap.space(m.left));
  let right = margin.map_or(0.0, |m| snap.space(m.right));
  if width != UNCONSTRAINED {
    snap.size(bounded_size(
      child.min_width(UNCONSTRAINED),
      width - left - right,
      child.max_width(UNCONSTRAINED),
    ))
  } else {
    snap.size(child.max_width(UNCONSTRAINED))
  }
}

fn horizontal_bias_alt_pref_width(
  child: &dyn LayoutNode,
  margin: Option<Insets>,
  width: f32,
  snap: Snap,
) -> f32 {
  if !child.is_resizable() || child.content_bias() != Some(Orientation::Horizontal) {
    return UNCONSTRAINED;
  }
  let left = margin.map_or(0.0, |m| snap.space(m.left));
  let right = margin.map_or(0.0, |m| snap.space(m.right));
  let target = if width != UNCONSTRAINED {
    width - left - right
  } else {
    child.pref_width(UNCONSTRAINED)
  };
  snap.size(bounded_size(
    child.min_width(UNCONSTRAINED),
    target,
    child.max_width(UNCONSTRAINED),
  ))
}

/// Max descent below the baseline over all children, at minimum heights
pub fn min_baseline_complement(children: &[&dyn LayoutNode]) -> f32 {
  baseline_complement(children, Extremum::Min)
}

/// Max descent below the baseline over all children, at preferred heights
pub fn pref_baseline_complement(children: &[&dyn LayoutNode]) -> f32 {
  baseline_complement(children, Extremum::Pref)
}

/// Max descent below the baseline over all children, at maximum heights
pub fn max_baseline_complement(children: &[&dyn LayoutNode]) -> f32 {
  baseline_complement(children, Extremum::Max)
}

#[derive(Clone, Copy)]
enum Extremum {
  Min,
  Pref,
  Max,
}

fn baseline_complement(children: &[&dyn LayoutNode], which: Extremum) -> f32 {
  let mut bc = 0.0_f32;
  for child in children {
    let bo = child.baseline_offset();
    if bo == BASELINE_OFFSET_SAME_AS_HEIGHT {
      // Baseline at the bottom: nothing below it.
      continue;
    }
    let height = if child.is_resizable() {
      match which {
        Extremum::Min => child.min_height(UNCONSTRAINED),
        Extremum::Pref => child.pref_height(UNCONSTRAINED),
        Extremum::Max => child.max_height(UNCONSTRAINED),
      }
    } else {
      child.layout_bounds().height()
    };
    bc = bc.max(height - bo);
  }
  bc
}

/// Shared baseline offset for a row of children: the max ascent
///
/// `width_of` supplies the already-resolved width per child (return
/// [`UNCONSTRAINED`] when bias is not in play); `fill_height` reports the
/// per-child fill flag; `min_complement` is the row's shared descent from
/// [`min_baseline_complement`].
pub fn area_baseline_offset(
  children: &[&dyn LayoutNode],
  margin_of: impl Fn(&dyn LayoutNode) -> Option<Insets>,
  width_of: impl Fn(usize) -> f32,
  area_height: f32,
  fill_height: impl Fn(usize) -> bool,
  min_complement: f32,
  snap: Snap,
) -> f32 {
  let mut b = 0.0_f32;
  for (i, child) in children.iter().enumerate() {
    let margin = margin_of(*child);
    let top = margin.map_or(0.0, |m| snap.space(m.top));
    let bottom = margin.map_or(0.0, |m| snap.space(m.bottom));
    let bo = child.baseline_offset();
    if bo == BASELINE_OFFSET_SAME_AS_HEIGHT {
      let alt = if child.content_bias() == Some(Orientation::Horizontal) {
        width_of(i)
      } else {
        UNCONSTRAINED
      };
      if fill_height(i) {
        // Filling children stretch to the area minus the shared descent.
        b = b.max(
          top
            + bounded_size(
              child.min_height(alt),
              area_height - min_complement - top - bottom,
              child.max_height(alt),
            ),
        );
      } else {
        b = b.max(
          top
            + bounded_size(
              child.min_height(alt),
              child.pref_height(alt),
              child.max_height(alt).min(area_height - min_complement - top - bottom),
            ),
        );
      }
    } else {
      b = b.max(top + bo);
    }
  }
  b
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::node::{FixedNode, SizedNode};

  fn area(x: f32, y: f32, w: f32, h: f32) -> Rect {
    Rect::from_xywh(x, y, w, h)
  }

  #[test]
  fn test_layout_in_area_fills_within_max() {
    let mut child = SizedNode::with_bounds(10.0, 10.0, 100.0, 100.0, 150.0, 150.0);
    layout_in_area(
      &mut child,
      area(0.0, 0.0, 300.0, 300.0),
      0.0,
      None,
      true,
      true,
      HPos::Left,
      VPos::Top,
      Snap::default(),
    );
    // Max caps the fill; leftover space is distributed by alignment.
    assert_eq!(child.layout_bounds(), Rect::from_xywh(0.0, 0.0, 150.0, 150.0));
  }

  #[test]
  fn test_layout_in_area_centers_leftover() {
    let mut child = SizedNode::new(100.0, 100.0);
    layout_in_area(
      &mut child,
      area(0.0, 0.0, 300.0, 300.0),
      0.0,
      None,
      false,
      false,
      HPos::Center,
      VPos::Center,
      Snap::default(),
    );
    assert_eq!(child.layout_bounds(), Rect::from_xywh(100.0, 100.0, 100.0, 100.0));
  }

  #[test]
  fn test_layout_in_area_honors_margin() {
    let mut child = SizedNode::new(50.0, 50.0);
    let margin = Insets::new(10.0, 20.0, 30.0, 40.0).unwrap();
    layout_in_area(
      &mut child,
      area(0.0, 0.0, 200.0, 200.0),
      0.0,
      Some(margin),
      true,
      true,
      HPos::Left,
      VPos::Top,
      Snap::default(),
    );
    // Usable area is 140x160 starting at (40, 10).
    assert_eq!(child.layout_bounds(), Rect::from_xywh(40.0, 10.0, 140.0, 160.0));
  }

  #[test]
  fn test_non_resizable_only_positioned() {
    let mut child = FixedNode::new(60.0, 40.0);
    layout_in_area(
      &mut child,
      area(0.0, 0.0, 200.0, 200.0),
      0.0,
      None,
      true,
      true,
      HPos::Right,
      VPos::Bottom,
      Snap::default(),
    );
    assert_eq!(child.layout_bounds(), Rect::from_xywh(140.0, 160.0, 60.0, 40.0));
  }

  #[test]
  fn test_baseline_alignment_with_explicit_baselines() {
    // Baselines at 80 and 30; area baseline picked as the max ascent.
    let mut tall = SizedNode::new(100.0, 100.0);
    tall.set_baseline_offset(80.0);
    let mut short = SizedNode::new(100.0, 40.0);
    short.set_baseline_offset(30.0);

    layout_in_area(
      &mut tall,
      area(0.0, 0.0, 100.0, 120.0),
      80.0,
      None,
      false,
      false,
      HPos::Left,
      VPos::Baseline,
      Snap::default(),
    );
    layout_in_area(
      &mut short,
      area(100.0, 0.0, 100.0, 120.0),
      80.0,
      None,
      false,
      false,
      HPos::Left,
      VPos::Baseline,
      Snap::default(),
    );
    assert_eq!(tall.layout_bounds().y(), 0.0);
    assert_eq!(short.layout_bounds().y(), 50.0);
  }

  #[test]
  fn test_baseline_same_as_height_sized_to_ascent() {
    // Default baseline: the child is laid out to end at the area baseline.
    let mut child = SizedNode::new(100.0, 100.0);
    layout_in_area(
      &mut child,
      area(0.0, 0.0, 100.0, 120.0),
      90.0,
      None,
      false,
      true,
      HPos::Left,
      VPos::Baseline,
      Snap::default(),
    );
    assert_eq!(child.layout_bounds().height(), 90.0);
    assert_eq!(child.layout_bounds().y(), 0.0);
  }

  #[test]
  fn test_child_area_queries_add_margins() {
    let child = SizedNode::with_bounds(10.0, 20.0, 100.0, 200.0, 300.0, 400.0);
    let margin = Insets::new(1.0, 2.0, 3.0, 4.0).unwrap();
    let snap = Snap::default();
    assert_eq!(
      child_min_area_width(&child, UNCONSTRAINED, Some(margin), UNCONSTRAINED, false, snap),
      16.0
    );
    assert_eq!(
      child_pref_area_width(&child, UNCONSTRAINED, Some(margin), UNCONSTRAINED, false, snap),
      106.0
    );
    assert_eq!(
      child_pref_area_height(&child, UNCONSTRAINED, Some(margin), UNCONSTRAINED, snap),
      204.0
    );
    assert_eq!(
      child_max_area_height(&child, UNCONSTRAINED, Some(margin), UNCONSTRAINED, snap),
      404.0
    );
  }

  #[test]
  fn test_unbounded_max_area_stays_unbounded() {
    let child = SizedNode::new(100.0, 200.0);
    let margin = Insets::all(5.0).unwrap();
    assert_eq!(
      child_max_area_width(&child, UNCONSTRAINED, Some(margin), UNCONSTRAINED, false, Snap::default()),
      f32::MAX
    );
  }

  #[test]
  fn test_baseline_complements() {
    let mut a = SizedNode::new(100.0, 100.0);
    a.set_baseline_offset(80.0);
    let b = SizedNode::new(100.0, 40.0);
    let children: Vec<&dyn LayoutNode> = vec![&a, &b];
    // Only the explicit-baseline child contributes descent: 100 - 80.
    assert_eq!(pref_baseline_complement(&children), 20.0);
    assert_eq!(min_baseline_complement(&children), 0.0);
  }
}
