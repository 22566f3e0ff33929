//! Scalar size-negotiation primitives
//!
//! `bounded_size` is the clamp underlying every size query in every pane;
//! `bounded_node_size` applies it to a whole node, resolving content bias by
//! sizing the biased axis first. The offset helpers turn leftover space and
//! an alignment into a position.

use crate::geometry::{HPos, Size, VPos};
use crate::node::{LayoutNode, UNCONSTRAINED};

/// Clamps `pref` into `[min, max]`, preferring `min` when the range is inconsistent
///
/// When `max < min`, the result is `min`: a minimum is a hard floor and wins
/// over a conflicting maximum. Total over all inputs; no error cases.
///
/// # Examples
///
/// ```
/// use panekit::layout::sizing::bounded_size;
///
/// assert_eq!(bounded_size(10.0, 50.0, 100.0), 50.0);
/// assert_eq!(bounded_size(10.0, 5.0, 100.0), 10.0);
/// assert_eq!(bounded_size(10.0, 500.0, 100.0), 100.0);
/// assert_eq!(bounded_size(50.0, 30.0, 10.0), 50.0); // max < min: min wins
/// ```
pub fn bounded_size(min: f32, pref: f32, max: f32) -> f32 {
  // a: pref floored by min. b: effective max, never below min.
  let a = pref.max(min);
  let b = min.max(max);
  a.min(b)
}

/// Sizes a node to fit an allocated area, resolving content bias
///
/// The biased axis is sized first against the unconstrained pref, then the
/// dependent axis is queried with that resolved extent. On each axis the
/// target is the full area when the fill flag is set, otherwise the pref
/// capped at the area; either way the result is bounded by the node's
/// min/max for that axis.
pub fn bounded_node_size(
  node: &dyn LayoutNode,
  area_width: f32,
  area_height: f32,
  fill_width: bool,
  fill_height: bool,
) -> Size {
  let target_w = |pref: f32| {
    if fill_width {
      area_width
    } else {
      area_width.min(pref)
    }
  };
  let target_h = |pref: f32| {
    if fill_height {
      area_height
    } else {
      area_height.min(pref)
    }
  };
  match node.content_bias() {
    None => {
      let w = bounded_size(
        node.min_width(UNCONSTRAINED),
        target_w(node.pref_width(UNCONSTRAINED)),
        node.max_width(UNCONSTRAINED),
      );
      let h = bounded_size(
        node.min_height(UNCONSTRAINED),
        target_h(node.pref_height(UNCONSTRAINED)),
        node.max_height(UNCONSTRAINED),
      );
      Size::new(w, h)
    }
    Some(crate::geometry::Orientation::Horizontal) => {
      let w = bounded_size(
        node.min_width(UNCONSTRAINED),
        target_w(node.pref_width(UNCONSTRAINED)),
        node.max_width(UNCONSTRAINED),
      );
      let h = bounded_size(node.min_height(w), target_h(node.pref_height(w)), node.max_height(w));
      Size::new(w, h)
    }
    Some(crate::geometry::Orientation::Vertical) => {
      let h = bounded_size(
        node.min_height(UNCONSTRAINED),
        target_h(node.pref_height(UNCONSTRAINED)),
        node.max_height(UNCONSTRAINED),
      );
      let w = bounded_size(node.min_width(h), target_w(node.pref_width(h)), node.max_width(h));
      Size::new(w, h)
    }
  }
}

/// Horizontal offset of content within a wider span
pub fn compute_x_offset(width: f32, content_width: f32, hpos: HPos) -> f32 {
  match hpos {
    HPos::Left => 0.0,
    HPos::Center => (width - content_width) / 2.0,
    HPos::Right => width - content_width,
  }
}

/// Vertical offset of content within a taller span
///
/// `Baseline` returns 0 here; baseline alignment is resolved by the caller
/// from baseline offsets before positioning.
pub fn compute_y_offset(height: f32, content_height: f32, vpos: VPos) -> f32 {
  match vpos {
    VPos::Top | VPos::Baseline => 0.0,
    VPos::Center => (height - content_height) / 2.0,
    VPos::Bottom => height - content_height,
  }
}
