//! Uniform tile grid pane
//!
//! [`TilePane`] lays its children out in a grid of uniformly sized tiles.
//! The tile size is the largest preferred size over all children, unless an
//! explicit tile size is set. A horizontal pane fills tiles left to right
//! and wraps to a new row when a row is full; a vertical pane fills top to
//! bottom and wraps to a new column. The number of tiles per row (or
//! column) follows from the pane's actual width (or height).

use log::trace;

use crate::geometry::{HPos, Insets, Orientation, Pos, Rect, VPos};
use crate::layout::area::{self, child_pref_area_height, child_pref_area_width, layout_in_area};
use crate::layout::sizing::{compute_x_offset, compute_y_offset};
use crate::node::{ConstraintBag, ConstraintValue, LayoutNode, BASELINE_OFFSET_SAME_AS_HEIGHT, UNCONSTRAINED};
use crate::error::{Error, Result};
use crate::region::{resolve_bound, resolve_pref, Region, USE_COMPUTED_SIZE};

const TILE_ALIGNMENT: &str = "tilepane-alignment";
const TILE_MARGIN: &str = "tilepane-margin";

/// A pane that arranges children in uniformly sized tiles
///
/// # Examples
///
/// ```
/// use panekit::{LayoutNode, SizedNode, TilePane};
///
/// let mut pane = TilePane::new();
/// for _ in 0..6 {
///   pane.add_child(SizedNode::new(100.0, 50.0));
/// }
/// pane.set_pref_columns(3);
///
/// // Three 100-wide tiles per row, six children make two rows.
/// assert_eq!(pane.pref_width(-1.0), 300.0);
/// assert_eq!(pane.pref_height(-1.0), 100.0);
/// ```
pub struct TilePane {
  region: Region,
  children: Vec<Box<dyn LayoutNode>>,
  orientation: Orientation,
  hgap: f32,
  vgap: f32,
  pref_rows: usize,
  pref_columns: usize,
  pref_tile_width: f32,
  pref_tile_height: f32,
  alignment: Pos,
  tile_alignment: Pos,
}

impl Default for TilePane {
  fn default() -> Self {
    Self::new()
  }
}

impl TilePane {
  /// An empty horizontal pane with no gaps
  pub fn new() -> Self {
    Self::with_orientation(Orientation::Horizontal)
  }

  /// An empty pane filling tiles along the given orientation
  pub fn with_orientation(orientation: Orientation) -> Self {
    Self {
      region: Region::default(),
      children: Vec::new(),
      orientation,
      hgap: 0.0,
      vgap: 0.0,
      pref_rows: 5,
      pref_columns: 5,
      pref_tile_width: USE_COMPUTED_SIZE,
      pref_tile_height: USE_COMPUTED_SIZE,
      alignment: Pos::TopLeft,
      tile_alignment: Pos::Center,
    }
  }

  /// Overrides the pane-wide tile alignment for one child
  pub fn set_alignment(child: &mut dyn LayoutNode, alignment: Option<Pos>) {
    child
      .properties_mut()
      .set(TILE_ALIGNMENT, alignment.map(ConstraintValue::Pos));
  }

  /// The child's alignment override, if set
  pub fn alignment_of(child: &dyn LayoutNode) -> Option<Pos> {
    child.properties().pos(TILE_ALIGNMENT)
  }

  /// Reserves space inside the child's tile; `None` removes the margin
  pub fn set_margin(child: &mut dyn LayoutNode, margin: Option<Insets>) {
    child.properties_mut().set(TILE_MARGIN, margin.map(ConstraintValue::Insets));
  }

  /// The child's margin, if one was set
  pub fn margin(child: &dyn LayoutNode) -> Option<Insets> {
    child.properties().insets(TILE_MARGIN)
  }

  /// Appends a child
  pub fn add_child(&mut self, child: impl LayoutNode + 'static) {
    self.children.push(Box::new(child));
  }

  /// The pane's children in tile-fill order
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

  /// The direction tiles are filled in
  pub fn orientation(&self) -> Orientation {
    self.orientation
  }

  pub fn set_orientation(&mut self, orientation: Orientation) {
    self.orientation = orientation;
  }

  /// Horizontal gap between tile columns
  pub fn hgap(&self) -> f32 {
    self.hgap
  }

  /// Rejects negative or non-finite gaps.
  pub fn set_hgap(&mut self, hgap: f32) -> Result<()> {
    if !hgap.is_finite() || hgap < 0.0 {
      return Err(Error::InvalidDimension {
        what: "hgap",
        value: hgap,
      });
    }
    self.hgap = hgap;
    Ok(())
  }

  /// Vertical gap between tile rows
  pub fn vgap(&self) -> f32 {
    self.vgap
  }

  pub fn set_vgap(&mut self, vgap: f32) -> Result<()> {
    if !vgap.is_finite() || vgap < 0.0 {
      return Err(Error::InvalidDimension {
        what: "vgap",
        value: vgap,
      });
    }
    self.vgap = vgap;
    Ok(())
  }

  /// Preferred number of rows, used only by a vertical pane's preferred size
  pub fn pref_rows(&self) -> usize {
    self.pref_rows
  }

  pub fn set_pref_rows(&mut self, rows: usize) {
    self.pref_rows = rows;
  }

  /// Preferred number of columns, used only by a horizontal pane's preferred size
  pub fn pref_columns(&self) -> usize {
    self.pref_columns
  }

  pub fn set_pref_columns(&mut self, columns: usize) {
    self.pref_columns = columns;
  }

  /// Explicit tile width, or `USE_COMPUTED_SIZE` to derive it from the children
  pub fn pref_tile_width(&self) -> f32 {
    self.pref_tile_width
  }

  pub fn set_pref_tile_width(&mut self, width: f32) {
    self.pref_tile_width = width;
  }

  /// Explicit tile height, or `USE_COMPUTED_SIZE` to derive it from the children
  pub fn pref_tile_height(&self) -> f32 {
    self.pref_tile_height
  }

  pub fn set_pref_tile_height(&mut self, height: f32) {
    self.pref_tile_height = height;
  }

  /// Alignment of the whole tile block within the pane
  pub fn block_alignment(&self) -> Pos {
    self.alignment
  }

  pub fn set_block_alignment(&mut self, alignment: Pos) {
    self.alignment = alignment;
  }

  /// Default alignment of each child within its tile
  pub fn tile_alignment(&self) -> Pos {
    self.tile_alignment
  }

  pub fn set_tile_alignment(&mut self, alignment: Pos) {
    self.tile_alignment = alignment;
  }

  fn tile_width(&self) -> f32 {
    let snap = self.region.snap();
    if self.pref_tile_width != USE_COMPUTED_SIZE {
      return snap.size(self.pref_tile_width);
    }
    // The widest tile may depend on the tile height when a child trades
    // width for height.
    let height = if self
      .children
      .iter()
      .any(|c| c.content_bias() == Some(Orientation::Vertical))
    {
      self.max_pref_tile_height(UNCONSTRAINED)
    } else {
      UNCONSTRAINED
    };
    snap.size(self.max_pref_tile_width(height, true))
  }

  fn tile_height(&self) -> f32 {
    let snap = self.region.snap();
    if self.pref_tile_height != USE_COMPUTED_SIZE {
      return snap.size(self.pref_tile_height);
    }
    let width = if self
      .children
      .iter()
      .any(|c| c.content_bias() == Some(Orientation::Horizontal))
    {
      self.max_pref_tile_width(UNCONSTRAINED, false)
    } else {
      UNCONSTRAINED
    };
    snap.size(self.max_pref_tile_height(width))
  }

  fn max_pref_tile_width(&self, height: f32, fill_height: bool) -> f32 {
    let snap = self.region.snap();
    let mut max = 0.0f32;
    for child in &self.children {
      let margin = Self::margin(child.as_ref());
      max = max.max(child_pref_area_width(
        child.as_ref(),
        UNCONSTRAINED,
        margin,
        height,
        fill_height,
        snap,
      ));
    }
    max
  }

  fn max_pref_tile_height(&self, width: f32) -> f32 {
    let snap = self.region.snap();
    if self.tile_alignment.vpos() == VPos::Baseline {
      let refs: Vec<&dyn LayoutNode> = self.children.iter().map(|c| c.as_ref()).collect();
      let complement = area::pref_baseline_complement(&refs);
      let mut max_baseline = 0.0f32;
      for child in &self.children {
        let baseline = child.baseline_offset();
        let baseline = if baseline == BASELINE_OFFSET_SAME_AS_HEIGHT {
          snap.size(child.pref_height(width))
        } else {
          baseline
        };
        let top = Self::margin(child.as_ref()).map_or(0.0, |m| snap.space(m.top));
        max_baseline = max_baseline.max(baseline + top);
      }
      max_baseline + complement.max(0.0)
    } else {
      let mut max = 0.0f32;
      for child in &self.children {
        let margin = Self::margin(child.as_ref());
        max = max.max(child_pref_area_height(child.as_ref(), UNCONSTRAINED, margin, width, snap));
      }
      max
    }
  }

  fn wrap_count(extent: f32, tile: f32, gap: f32) -> usize {
    (((extent + gap) / (tile + gap)).floor() as usize).max(1)
  }

  fn fill_count(nodes: usize, cells: usize) -> usize {
    (nodes as f32 / cells.max(1) as f32).ceil() as usize
  }

  fn content_width(&self, columns: usize, tile_width: f32) -> f32 {
    if columns == 0 {
      return 0.0;
    }
    columns as f32 * tile_width + (columns - 1) as f32 * self.region.snap().space(self.hgap)
  }

  fn content_height(&self, rows: usize, tile_height: f32) -> f32 {
    if rows == 0 {
      return 0.0;
    }
    rows as f32 * tile_height + (rows - 1) as f32 * self.region.snap().space(self.vgap)
  }

  fn compute_pref_width(&self, height: f32) -> f32 {
    let snap = self.region.snap();
    let columns = if height != UNCONSTRAINED {
      let inside = height - self.region.snapped_top_inset() - self.region.snapped_bottom_inset();
      let rows = Self::wrap_count(inside, self.tile_height(), snap.space(self.vgap));
      Self::fill_count(self.children.len(), rows)
    } else if self.orientation == Orientation::Horizontal {
      self.pref_columns
    } else {
      Self::fill_count(self.children.len(), self.pref_rows)
    };
    self.region.snapped_left_inset() + self.content_width(columns, self.tile_width()) + self.region.snapped_right_inset()
  }

  fn compute_pref_height(&self, width: f32) -> f32 {
    let snap = self.region.snap();
    let rows = if width != UNCONSTRAINED {
      let inside = width - self.region.snapped_left_inset() - self.region.snapped_right_inset();
      let columns = Self::wrap_count(inside, self.tile_width(), snap.space(self.hgap));
      Self::fill_count(self.children.len(), columns)
    } else if self.orientation == Orientation::Horizontal {
      Self::fill_count(self.children.len(), self.pref_columns)
    } else {
      self.pref_rows
    };
    self.region.snapped_top_inset() + self.content_height(rows, self.tile_height()) + self.region.snapped_bottom_inset()
  }
}

impl LayoutNode for TilePane {
  fn min_width(&self, height: f32) -> f32 {
    resolve_bound(
      self.region.min_width_override(),
      || {
        if self.orientation == Orientation::Horizontal {
          self.region.snapped_left_inset() + self.tile_width() + self.region.snapped_right_inset()
        } else {
          self.compute_pref_width(height)
        }
      },
      || self.pref_width(height),
    )
  }

  fn min_height(&self, width: f32) -> f32 {
    resolve_bound(
      self.region.min_height_override(),
      || {
        if self.orientation == Orientation::Vertical {
          self.region.snapped_top_inset() + self.tile_height() + self.region.snapped_bottom_inset()
        } else {
          self.compute_pref_height(width)
        }
      },
      || self.pref_height(width),
    )
  }

  fn pref_width(&self, height: f32) -> f32 {
    resolve_pref(self.region.pref_width_override(), || self.compute_pref_width(height))
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
    Some(self.orientation)
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
    let hpos = self.alignment.hpos();
    let vpos = self.alignment.vpos();
    let left = self.region.snapped_left_inset();
    let top = self.region.snapped_top_inset();
    let inside_width = self.region.width() - left - self.region.snapped_right_inset();
    let inside_height = self.region.height() - top - self.region.snapped_bottom_inset();
    let hgap = snap.space(self.hgap);
    let vgap = snap.space(self.vgap);

    // Tiles never overflow the content area.
    let tile_width = self.tile_width().min(inside_width);
    let tile_height = self.tile_height().min(inside_height);

    let (columns, rows, last_row_remainder, last_column_remainder) =
      if self.orientation == Orientation::Horizontal {
        let columns = Self::wrap_count(inside_width, tile_width, hgap);
        let rows = Self::fill_count(self.children.len(), columns);
        let remainder = if hpos != HPos::Left {
          columns - (columns * rows - self.children.len())
        } else {
          0
        };
        (columns, rows, remainder, 0)
      } else {
        let rows = Self::wrap_count(inside_height, tile_height, vgap);
        let columns = Self::fill_count(self.children.len(), rows);
        let remainder = if vpos != VPos::Top {
          rows - (columns * rows - self.children.len())
        } else {
          0
        };
        (columns, rows, 0, remainder)
      };
    trace!(
      "tilepane layout: {} children as {}x{} tiles of {}x{}",
      self.children.len(),
      columns,
      rows,
      tile_width,
      tile_height
    );

    let row_x = left + compute_x_offset(inside_width, self.content_width(columns, tile_width), hpos);
    let column_y = top + compute_y_offset(inside_height, self.content_height(rows, tile_height), vpos);
    // A partially filled last row (or column) is realigned on its own.
    let last_row_x = if last_row_remainder > 0 {
      left + compute_x_offset(inside_width, self.content_width(last_row_remainder, tile_width), hpos)
    } else {
      row_x
    };
    let last_column_y = if last_column_remainder > 0 {
      top + compute_y_offset(inside_height, self.content_height(last_column_remainder, tile_height), vpos)
    } else {
      column_y
    };

    let baseline_offset = if self.tile_alignment.vpos() == VPos::Baseline {
      let refs: Vec<&dyn LayoutNode> = self.children.iter().map(|c| c.as_ref()).collect();
      area::area_baseline_offset(
        &refs,
        |child| Self::margin(child),
        |_| tile_width,
        tile_height,
        |_| false,
        UNCONSTRAINED,
        snap,
      )
    } else {
      0.0
    };

    let horizontal = self.orientation == Orientation::Horizontal;
    let tile_alignment = self.tile_alignment;
    let mut r = 0usize;
    let mut c = 0usize;
    for child in self.children.iter_mut() {
      let x_offset = if r + 1 == rows { last_row_x } else { row_x };
      let y_offset = if c + 1 == columns { last_column_y } else { column_y };
      let tile_x = x_offset + c as f32 * (tile_width + hgap);
      let tile_y = y_offset + r as f32 * (tile_height + vgap);

      let alignment = Self::alignment_of(child.as_ref()).unwrap_or(tile_alignment);
      let margin = Self::margin(child.as_ref());
      layout_in_area(
        child.as_mut(),
        Rect::from_xywh(tile_x, tile_y, tile_width, tile_height),
        baseline_offset,
        margin,
        true,
        true,
        alignment.hpos(),
        alignment.vpos(),
        snap,
      );
      child.layout();

      if horizontal {
        c += 1;
        if c == columns {
          c = 0;
          r += 1;
        }
      } else {
        r += 1;
        if r == rows {
          r = 0;
          c += 1;
        }
      }
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

  fn filled_pane(count: usize, width: f32, height: f32) -> TilePane {
    let mut pane = TilePane::new();
    for _ in 0..count {
      pane.add_child(SizedNode::new(width, height));
    }
    pane
  }

  #[test]
  fn test_tile_size_is_largest_child_pref() {
    let mut pane = TilePane::new();
    pane.add_child(SizedNode::new(40.0, 80.0));
    pane.add_child(SizedNode::new(100.0, 30.0));
    assert_eq!(pane.min_width(UNCONSTRAINED), 100.0);
    // One row of two 100x80 tiles.
    pane.set_pref_columns(2);
    assert_eq!(pane.pref_width(UNCONSTRAINED), 200.0);
    assert_eq!(pane.pref_height(UNCONSTRAINED), 80.0);
  }

  #[test]
  fn test_pref_size_with_gaps() {
    let mut pane = filled_pane(6, 100.0, 50.0);
    pane.set_hgap(10.0).unwrap();
    pane.set_vgap(5.0).unwrap();
    // Default five columns, so six tiles wrap onto a second row.
    assert_eq!(pane.pref_width(UNCONSTRAINED), 540.0);
    assert_eq!(pane.pref_height(UNCONSTRAINED), 105.0);
  }

  #[test]
  fn test_layout_fills_rows_then_wraps() {
    let mut pane = filled_pane(6, 100.0, 50.0);
    pane.set_hgap(10.0).unwrap();
    pane.set_vgap(5.0).unwrap();
    pane.resize(540.0, 105.0);
    pane.layout();
    let expected = [
      (0.0, 0.0),
      (110.0, 0.0),
      (220.0, 0.0),
      (330.0, 0.0),
      (440.0, 0.0),
      (0.0, 55.0),
    ];
    for (child, (x, y)) in pane.children().iter().zip(expected) {
      assert_eq!(child.layout_bounds(), Rect::from_xywh(x, y, 100.0, 50.0));
    }
  }

  #[test]
  fn test_vertical_orientation_fills_columns() {
    let mut pane = TilePane::with_orientation(Orientation::Vertical);
    for _ in 0..4 {
      pane.add_child(SizedNode::new(60.0, 40.0));
    }
    pane.resize(200.0, 80.0);
    pane.layout();
    // Two rows fit, so tiles wrap to a second column after two children.
    let expected = [(0.0, 0.0), (0.0, 40.0), (60.0, 0.0), (60.0, 40.0)];
    for (child, (x, y)) in pane.children().iter().zip(expected) {
      assert_eq!(child.layout_bounds(), Rect::from_xywh(x, y, 60.0, 40.0));
    }
  }

  #[test]
  fn test_partial_last_row_realigns() {
    let mut pane = filled_pane(3, 100.0, 100.0);
    pane.set_block_alignment(Pos::TopRight);
    pane.resize(200.0, 200.0);
    pane.layout();
    assert_eq!(pane.children()[0].layout_bounds(), Rect::from_xywh(0.0, 0.0, 100.0, 100.0));
    assert_eq!(pane.children()[1].layout_bounds(), Rect::from_xywh(100.0, 0.0, 100.0, 100.0));
    // The lone tile in the last row hugs the right edge.
    assert_eq!(pane.children()[2].layout_bounds(), Rect::from_xywh(100.0, 100.0, 100.0, 100.0));
  }

  #[test]
  fn test_explicit_tile_size_overrides_children() {
    let mut pane = filled_pane(2, 30.0, 30.0);
    pane.set_pref_tile_width(50.0);
    pane.set_pref_tile_height(40.0);
    pane.set_pref_columns(2);
    assert_eq!(pane.pref_width(UNCONSTRAINED), 100.0);
    assert_eq!(pane.pref_height(UNCONSTRAINED), 40.0);
  }

  #[test]
  fn test_small_child_centers_in_tile() {
    let mut pane = TilePane::new();
    pane.add_child(SizedNode::new(100.0, 100.0));
    pane.add_child(FixedNode::new(40.0, 40.0));
    pane.resize(200.0, 100.0);
    pane.layout();
    assert_eq!(pane.children()[1].layout_bounds(), Rect::from_xywh(130.0, 30.0, 40.0, 40.0));
  }

  #[test]
  fn test_child_alignment_override() {
    let mut pane = TilePane::new();
    pane.add_child(SizedNode::new(100.0, 100.0));
    let mut small = FixedNode::new(40.0, 40.0);
    TilePane::set_alignment(&mut small, Some(Pos::TopLeft));
    pane.add_child(small);
    pane.resize(200.0, 100.0);
    pane.layout();
    assert_eq!(pane.children()[1].layout_bounds(), Rect::from_xywh(100.0, 0.0, 40.0, 40.0));
  }

  #[test]
  fn test_negative_gap_rejected() {
    let mut pane = TilePane::new();
    assert!(pane.set_hgap(-1.0).is_err());
    assert!(pane.set_vgap(f32::NAN).is_err());
  }

  #[test]
  fn test_tiles_shrink_to_fit_pane() {
    let mut pane = filled_pane(2, 100.0, 100.0);
    pane.resize(120.0, 60.0);
    pane.layout();
    // Tile height is clamped to the 60-tall content area.
    let first = pane.children()[0].layout_bounds();
    assert_eq!(first.width(), 100.0f32.min(120.0));
    assert_eq!(first.height(), 60.0);
  }
}
