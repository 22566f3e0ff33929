//! Wrapping flow pane
//!
//! [`FlowPane`] lays its children out at their preferred sizes in runs,
//! wrapping to a new run when the next child would overflow the pane's
//! content width (or height, for a vertical pane). Children are never
//! shrunk below their preferred size; a pane narrower than its widest
//! child simply overflows.

use log::trace;

use crate::error::{Error, Result};
use crate::geometry::{HPos, Insets, Orientation, Pos, Rect, VPos};
use crate::layout::area::{self, child_pref_area_height, child_pref_area_width, layout_in_area};
use crate::layout::sizing::{compute_x_offset, compute_y_offset};
use crate::node::{ConstraintBag, ConstraintValue, LayoutNode, BASELINE_OFFSET_SAME_AS_HEIGHT, UNCONSTRAINED};
use crate::region::{resolve_bound, resolve_pref, Region};

const FLOW_MARGIN: &str = "flowpane-margin";

/// Preferred wrap length for new panes, in pixels
const DEFAULT_WRAP_LENGTH: f32 = 400.0;

struct RunRect {
  child: usize,
  x: f32,
  y: f32,
  width: f32,
  height: f32,
}

struct Run {
  rects: Vec<RunRect>,
  width: f32,
  height: f32,
  baseline_offset: f32,
}

/// A pane that wraps children into runs at their preferred sizes
///
/// # Examples
///
/// ```
/// use panekit::{FlowPane, LayoutNode, SizedNode};
///
/// let mut pane = FlowPane::new();
/// for _ in 0..6 {
///   pane.add_child(SizedNode::new(100.0, 50.0));
/// }
///
/// // All six fit on one run at 800 wide.
/// pane.resize(800.0, 50.0);
/// pane.layout();
/// assert_eq!(pane.children()[5].layout_bounds().x(), 500.0);
/// ```
pub struct FlowPane {
  region: Region,
  children: Vec<Box<dyn LayoutNode>>,
  orientation: Orientation,
  hgap: f32,
  vgap: f32,
  pref_wrap_length: f32,
  alignment: Pos,
  row_valignment: VPos,
  column_halignment: HPos,
}

impl Default for FlowPane {
  fn default() -> Self {
    Self::new()
  }
}

impl FlowPane {
  /// An empty horizontal pane with no gaps
  pub fn new() -> Self {
    Self::with_orientation(Orientation::Horizontal)
  }

  /// An empty pane flowing along the given orientation
  pub fn with_orientation(orientation: Orientation) -> Self {
    Self {
      region: Region::default(),
      children: Vec::new(),
      orientation,
      hgap: 0.0,
      vgap: 0.0,
      pref_wrap_length: DEFAULT_WRAP_LENGTH,
      alignment: Pos::TopLeft,
      row_valignment: VPos::Center,
      column_halignment: HPos::Left,
    }
  }

  /// Reserves space around a child; `None` removes the margin
  pub fn set_margin(child: &mut dyn LayoutNode, margin: Option<Insets>) {
    child.properties_mut().set(FLOW_MARGIN, margin.map(ConstraintValue::Insets));
  }

  /// The child's margin, if one was set
  pub fn margin(child: &dyn LayoutNode) -> Option<Insets> {
    child.properties().insets(FLOW_MARGIN)
  }

  /// Appends a child
  pub fn add_child(&mut self, child: impl LayoutNode + 'static) {
    self.children.push(Box::new(child));
  }

  /// The pane's children in flow order
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

  /// The direction runs flow in
  pub fn orientation(&self) -> Orientation {
    self.orientation
  }

  pub fn set_orientation(&mut self, orientation: Orientation) {
    self.orientation = orientation;
  }

  /// Horizontal gap between children in a row, and between columns
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

  /// Vertical gap between rows, and between children in a column
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

  /// Run length used for the preferred size when no extent is given
  pub fn pref_wrap_length(&self) -> f32 {
    self.pref_wrap_length
  }

  pub fn set_pref_wrap_length(&mut self, length: f32) {
    self.pref_wrap_length = length;
  }

  /// Alignment of the run block within the pane
  pub fn alignment(&self) -> Pos {
    self.alignment
  }

  pub fn set_alignment(&mut self, alignment: Pos) {
    self.alignment = alignment;
  }

  /// Vertical alignment of children within a horizontal run
  pub fn row_valignment(&self) -> VPos {
    self.row_valignment
  }

  pub fn set_row_valignment(&mut self, valignment: VPos) {
    self.row_valignment = valignment;
  }

  /// Horizontal alignment of children within a vertical run
  pub fn column_halignment(&self) -> HPos {
    self.column_halignment
  }

  pub fn set_column_halignment(&mut self, halignment: HPos) {
    self.column_halignment = halignment;
  }

  fn runs(&self, max_run_length: f32) -> Vec<Run> {
    let snap = self.region.snap();
    let hgap = snap.space(self.hgap);
    let vgap = snap.space(self.vgap);
    let horizontal = self.orientation == Orientation::Horizontal;

    let mut runs = Vec::new();
    let mut run = Run {
      rects: Vec::new(),
      width: 0.0,
      height: 0.0,
      baseline_offset: 0.0,
    };
    let mut run_length = 0.0f32;
    let mut run_offset = 0.0f32;
    for (i, child) in self.children.iter().enumerate() {
      let margin = Self::margin(child.as_ref());
      let width = child_pref_area_width(child.as_ref(), UNCONSTRAINED, margin, UNCONSTRAINED, false, snap);
      let height = child_pref_area_height(child.as_ref(), UNCONSTRAINED, margin, UNCONSTRAINED, snap);
      let length = if horizontal { width } else { height };
      if run_length + length > max_run_length && run_length > 0.0 {
        self.normalize_run(&mut run, run_offset);
        run_offset += if horizontal { run.height + vgap } else { run.width + hgap };
        runs.push(run);
        run = Run {
          rects: Vec::new(),
          width: 0.0,
          height: 0.0,
          baseline_offset: 0.0,
        };
        run_length = 0.0;
      }
      let mut rect = RunRect {
        child: i,
        x: 0.0,
        y: 0.0,
        width,
        height,
      };
      if horizontal {
        rect.x = run_length;
        run_length += width + hgap;
      } else {
        rect.y = run_length;
        run_length += height + vgap;
      }
      run.rects.push(rect);
    }
    if !run.rects.is_empty() {
      self.normalize_run(&mut run, run_offset);
      runs.push(run);
    }
    runs
  }

  fn normalize_run(&self, run: &mut Run, run_offset: f32) {
    let snap = self.region.snap();
    if self.orientation == Orientation::Horizontal {
      run.width = run.rects.len().saturating_sub(1) as f32 * snap.space(self.hgap);
      for rect in &mut run.rects {
        run.width += rect.width;
        rect.y = run_offset;
      }
      run.height = self.run_height(run);
      run.baseline_offset = if self.row_valignment == VPos::Baseline {
        let members: Vec<&dyn LayoutNode> = run.rects.iter().map(|r| self.children[r.child].as_ref()).collect();
        let widths: Vec<f32> = run.rects.iter().map(|r| r.width).collect();
        area::area_baseline_offset(
          &members,
          |child| Self::margin(child),
          |i| widths[i],
          run.height,
          |_| true,
          UNCONSTRAINED,
          snap,
        )
      } else {
        0.0
      };
    } else {
      run.height = run.rects.len().saturating_sub(1) as f32 * snap.space(self.vgap);
      for rect in &mut run.rects {
        run.height += rect.height;
        rect.x = run_offset;
      }
      run.width = run.rects.iter().fold(0.0f32, |w, r| w.max(r.width));
    }
  }

  fn run_height(&self, run: &Run) -> f32 {
    if self.row_valignment == VPos::Baseline {
      let snap = self.region.snap();
      let members: Vec<&dyn LayoutNode> = run.rects.iter().map(|r| self.children[r.child].as_ref()).collect();
      let complement = area::pref_baseline_complement(&members);
      let mut max_baseline = 0.0f32;
      for rect in &run.rects {
        let child = self.children[rect.child].as_ref();
        let baseline = child.baseline_offset();
        let baseline = if baseline == BASELINE_OFFSET_SAME_AS_HEIGHT {
          snap.size(child.pref_height(UNCONSTRAINED))
        } else {
          baseline
        };
        let top = Self::margin(child).map_or(0.0, |m| snap.space(m.top));
        max_baseline = max_baseline.max(baseline + top);
      }
      max_baseline + complement.max(0.0)
    } else {
      run.rects.iter().fold(0.0f32, |h, r| h.max(r.height))
    }
  }

  fn content_width(&self, runs: &[Run]) -> f32 {
    if self.orientation == Orientation::Horizontal {
      runs.iter().fold(0.0f32, |w, r| w.max(r.width))
    } else {
      let gaps = runs.len().saturating_sub(1) as f32 * self.region.snap().space(self.hgap);
      runs.iter().map(|r| r.width).sum::<f32>() + gaps
    }
  }

  fn content_height(&self, runs: &[Run]) -> f32 {
    if self.orientation == Orientation::Horizontal {
      let gaps = runs.len().saturating_sub(1) as f32 * self.region.snap().space(self.vgap);
      runs.iter().map(|r| r.height).sum::<f32>() + gaps
    } else {
      runs.iter().fold(0.0f32, |h, r| h.max(r.height))
    }
  }

  fn compute_pref_width(&self, height: f32) -> f32 {
    let snap = self.region.snap();
    let content = if self.orientation == Orientation::Horizontal {
      let runs = self.runs(self.pref_wrap_length);
      // An empty or narrow pane still prefers the wrap length.
      snap.size(self.content_width(&runs).max(self.pref_wrap_length))
    } else {
      let max_run_length = if height != UNCONSTRAINED {
        height - self.region.snapped_top_inset() - self.region.snapped_bottom_inset()
      } else {
        self.pref_wrap_length
      };
      self.content_width(&self.runs(max_run_length))
    };
    self.region.snapped_left_inset() + content + self.region.snapped_right_inset()
  }

  fn compute_pref_height(&self, width: f32) -> f32 {
    let snap = self.region.snap();
    let content = if self.orientation == Orientation::Horizontal {
      let max_run_length = if width != UNCONSTRAINED {
        width - self.region.snapped_left_inset() - self.region.snapped_right_inset()
      } else {
        self.pref_wrap_length
      };
      self.content_height(&self.runs(max_run_length))
    } else {
      let runs = self.runs(self.pref_wrap_length);
      snap.size(self.content_height(&runs).max(self.pref_wrap_length))
    };
    self.region.snapped_top_inset() + content + self.region.snapped_bottom_inset()
  }
}

impl LayoutNode for FlowPane {
  fn min_width(&self, height: f32) -> f32 {
    resolve_bound(
      self.region.min_width_override(),
      || {
        if self.orientation == Orientation::Horizontal {
          // Wide enough for the widest child; runs are never squeezed.
          let snap = self.region.snap();
          let max_pref = self
            .children
            .iter()
            .fold(0.0f32, |w, c| w.max(c.pref_width(UNCONSTRAINED)));
          self.region.snapped_left_inset() + snap.size(max_pref) + self.region.snapped_right_inset()
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
          let snap = self.region.snap();
          let max_pref = self
            .children
            .iter()
            .fold(0.0f32, |h, c| h.max(c.pref_height(UNCONSTRAINED)));
          self.region.snapped_top_inset() + snap.size(max_pref) + self.region.snapped_bottom_inset()
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
    let left = self.region.snapped_left_inset();
    let top = self.region.snapped_top_inset();
    let inside_width = self.region.width() - left - self.region.snapped_right_inset();
    let inside_height = self.region.height() - top - self.region.snapped_bottom_inset();
    let horizontal = self.orientation == Orientation::Horizontal;

    let runs = self.runs(if horizontal { inside_width } else { inside_height });
    trace!("flowpane layout: {} children in {} runs", self.children.len(), runs.len());
    let content_width = self.content_width(&runs);
    let content_height = self.content_height(&runs);
    let hpos = self.alignment.hpos();
    let vpos = self.alignment.vpos();
    let halignment = self.column_halignment;
    let valignment = self.row_valignment;

    for run in &runs {
      // Each horizontal run is aligned on its own, so a short last run
      // follows the pane alignment rather than the longest run.
      let x_offset = left
        + compute_x_offset(
          inside_width,
          if horizontal { run.width } else { content_width },
          hpos,
        );
      let y_offset = top
        + compute_y_offset(
          inside_height,
          if horizontal { content_height } else { run.height },
          vpos,
        );
      for rect in &run.rects {
        let child = self.children[rect.child].as_mut();
        let margin = Self::margin(child);
        layout_in_area(
          child,
          Rect::from_xywh(
            x_offset + rect.x,
            y_offset + rect.y,
            if horizontal { rect.width } else { run.width },
            if horizontal { run.height } else { rect.height },
          ),
          run.baseline_offset,
          margin,
          true,
          true,
          halignment,
          valignment,
          snap,
        );
      }
    }
    for child in self.children.iter_mut() {
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
