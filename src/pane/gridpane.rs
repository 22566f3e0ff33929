//! Row/column grid pane
//!
//! [`GridPane`] places each child in a cell addressed by column and row
//! index, optionally spanning several of either. Column widths and row
//! heights are negotiated per track: explicit [`ColumnConstraints`] /
//! [`RowConstraints`] presets win, percentage tracks take their share of the
//! content extent first, and whatever surplus or deficit remains is
//! distributed over the growable tracks by priority tier. A child spanning
//! multiple tracks contributes its size to the span as a whole rather than
//! to any single track.
//!
//! Track sizes are carried in a [`CompositeSize`]: per-track values plus
//! per-span requirements keyed by interval, so a multi-span child can raise
//! the total without pinning any one track.

use std::collections::BTreeMap;
use std::collections::BTreeSet;

use log::trace;

use crate::error::{Error, Result};
use crate::geometry::{HPos, Insets, Orientation, Pos, Rect, VPos};
use crate::layout::area::{
  self, child_min_area_height, child_min_area_width, child_pref_area_height, child_pref_area_width,
  layout_in_area,
};
use crate::layout::sizing::{bounded_size, compute_x_offset, compute_y_offset};
use crate::node::{ConstraintBag, ConstraintValue, LayoutNode, UNCONSTRAINED};
use crate::pane::constraints::{ColumnConstraints, Priority, RowConstraints};
use crate::region::{resolve_bound, resolve_pref, Region, USE_COMPUTED_SIZE, USE_PREF_SIZE};
use crate::snap::Snap;

const GRID_COLUMN_INDEX: &str = "gridpane-column-index";
const GRID_ROW_INDEX: &str = "gridpane-row-index";
const GRID_COLUMN_SPAN: &str = "gridpane-column-span";
const GRID_ROW_SPAN: &str = "gridpane-row-span";
const GRID_HALIGNMENT: &str = "gridpane-halignment";
const GRID_VALIGNMENT: &str = "gridpane-valignment";
const GRID_HGROW: &str = "gridpane-hgrow";
const GRID_VGROW: &str = "gridpane-vgrow";
const GRID_FILL_WIDTH: &str = "gridpane-fill-width";
const GRID_FILL_HEIGHT: &str = "gridpane-fill-height";
const GRID_MARGIN: &str = "gridpane-margin";

/// Span value meaning "to the last column/row of the grid"
pub const REMAINING: usize = usize::MAX;

/// A pane that lays out its children in a flexible grid of rows and columns
///
/// # Examples
///
/// ```
/// use panekit::{GridPane, LayoutNode, SizedNode};
///
/// let mut grid = GridPane::new();
/// grid.add(SizedNode::new(300.0, 100.0), 0, 0);
/// grid.add(SizedNode::new(200.0, 100.0), 1, 0);
/// grid.add(SizedNode::new(100.0, 300.0), 0, 1);
///
/// assert_eq!(grid.pref_width(-1.0), 500.0);
/// assert_eq!(grid.pref_height(-1.0), 400.0);
/// ```
pub struct GridPane {
  region: Region,
  children: Vec<Box<dyn LayoutNode>>,
  hgap: f32,
  vgap: f32,
  alignment: Pos,
  column_constraints: Vec<ColumnConstraints>,
  row_constraints: Vec<RowConstraints>,
}

/// Grid shape and per-track settings derived from children and constraints
struct GridMetrics {
  num_rows: usize,
  num_columns: usize,
  row_percent: Vec<f32>,
  row_percent_total: f32,
  column_percent: Vec<f32>,
  column_percent_total: f32,
  row_grow: Vec<Priority>,
  column_grow: Vec<Priority>,
  row_min_baseline_complement: Vec<f32>,
  row_pref_baseline_complement: Vec<f32>,
  /// Indices of children positioned by baseline, per row
  row_baseline: Vec<Vec<usize>>,
  bias: Option<Orientation>,
}

impl Default for GridPane {
  fn default() -> Self {
    Self::new()
  }
}

impl GridPane {
  /// An empty grid with no gaps and top-left alignment
  pub fn new() -> Self {
    Self {
      region: Region::default(),
      children: Vec::new(),
      hgap: 0.0,
      vgap: 0.0,
      alignment: Pos::TopLeft,
      column_constraints: Vec::new(),
      row_constraints: Vec::new(),
    }
  }

  /// Sets the child's column; `None` restores the default column 0
  pub fn set_column_index(child: &mut dyn LayoutNode, column: Option<usize>) {
    child
      .properties_mut()
      .set(GRID_COLUMN_INDEX, column.map(ConstraintValue::Index));
  }

  /// The child's column index
  pub fn column_index(child: &dyn LayoutNode) -> usize {
    child.properties().index(GRID_COLUMN_INDEX).unwrap_or(0)
  }

  /// Sets the child's row; `None` restores the default row 0
  pub fn set_row_index(child: &mut dyn LayoutNode, row: Option<usize>) {
    child.properties_mut().set(GRID_ROW_INDEX, row.map(ConstraintValue::Index));
  }

  /// The child's row index
  pub fn row_index(child: &dyn LayoutNode) -> usize {
    child.properties().index(GRID_ROW_INDEX).unwrap_or(0)
  }

  /// Sets how many columns the child spans; [`REMAINING`] reaches the last
  pub fn set_column_span(child: &mut dyn LayoutNode, span: Option<usize>) {
    child
      .properties_mut()
      .set(GRID_COLUMN_SPAN, span.map(ConstraintValue::Index));
  }

  /// The child's column span (default 1)
  pub fn column_span(child: &dyn LayoutNode) -> usize {
    child.properties().index(GRID_COLUMN_SPAN).unwrap_or(1)
  }

  /// Sets how many rows the child spans; [`REMAINING`] reaches the last
  pub fn set_row_span(child: &mut dyn LayoutNode, span: Option<usize>) {
    child.properties_mut().set(GRID_ROW_SPAN, span.map(ConstraintValue::Index));
  }

  /// The child's row span (default 1)
  pub fn row_span(child: &dyn LayoutNode) -> usize {
    child.properties().index(GRID_ROW_SPAN).unwrap_or(1)
  }

  /// Overrides the column's horizontal alignment for one child
  pub fn set_halignment(child: &mut dyn LayoutNode, halignment: Option<HPos>) {
    child
      .properties_mut()
      .set(GRID_HALIGNMENT, halignment.map(ConstraintValue::HPos));
  }

  /// The child's horizontal alignment override, if set
  pub fn halignment(child: &dyn LayoutNode) -> Option<HPos> {
    child.properties().hpos(GRID_HALIGNMENT)
  }

  /// Overrides the row's vertical alignment for one child
  pub fn set_valignment(child: &mut dyn LayoutNode, valignment: Option<VPos>) {
    child
      .properties_mut()
      .set(GRID_VALIGNMENT, valignment.map(ConstraintValue::VPos));
  }

  /// The child's vertical alignment override, if set
  pub fn valignment(child: &dyn LayoutNode) -> Option<VPos> {
    child.properties().vpos(GRID_VALIGNMENT)
  }

  /// Marks the child's column for surplus-width distribution
  pub fn set_hgrow(child: &mut dyn LayoutNode, priority: Option<Priority>) {
    child
      .properties_mut()
      .set(GRID_HGROW, priority.map(ConstraintValue::Priority));
  }

  /// The child's horizontal grow priority, if set
  pub fn hgrow(child: &dyn LayoutNode) -> Option<Priority> {
    child.properties().priority(GRID_HGROW)
  }

  /// Marks the child's row for surplus-height distribution
  pub fn set_vgrow(child: &mut dyn LayoutNode, priority: Option<Priority>) {
    child
      .properties_mut()
      .set(GRID_VGROW, priority.map(ConstraintValue::Priority));
  }

  /// The child's vertical grow priority, if set
  pub fn vgrow(child: &dyn LayoutNode) -> Option<Priority> {
    child.properties().priority(GRID_VGROW)
  }

  /// Overrides the column's fill-width default for one child
  pub fn set_fill_width(child: &mut dyn LayoutNode, fill: Option<bool>) {
    child.properties_mut().set(GRID_FILL_WIDTH, fill.map(ConstraintValue::Bool));
  }

  /// The child's fill-width override, if set
  pub fn fill_width(child: &dyn LayoutNode) -> Option<bool> {
    child.properties().boolean(GRID_FILL_WIDTH)
  }

  /// Overrides the row's fill-height default for one child
  pub fn set_fill_height(child: &mut dyn LayoutNode, fill: Option<bool>) {
    child
      .properties_mut()
      .set(GRID_FILL_HEIGHT, fill.map(ConstraintValue::Bool));
  }

  /// The child's fill-height override, if set
  pub fn fill_height(child: &dyn LayoutNode) -> Option<bool> {
    child.properties().boolean(GRID_FILL_HEIGHT)
  }

  /// Reserves space around a child; `None` removes the margin
  pub fn set_margin(child: &mut dyn LayoutNode, margin: Option<Insets>) {
    child.properties_mut().set(GRID_MARGIN, margin.map(ConstraintValue::Insets));
  }

  /// The child's margin, if one was set
  pub fn margin(child: &dyn LayoutNode) -> Option<Insets> {
    child.properties().insets(GRID_MARGIN)
  }

  /// Adds a child at the given cell
  pub fn add(&mut self, mut child: impl LayoutNode + 'static, column: usize, row: usize) {
    Self::set_column_index(&mut child, Some(column));
    Self::set_row_index(&mut child, Some(row));
    self.children.push(Box::new(child));
  }

  /// Adds a child at the given cell spanning several columns and rows
  pub fn add_spanned(
    &mut self,
    mut child: impl LayoutNode + 'static,
    column: usize,
    row: usize,
    colspan: usize,
    rowspan: usize,
  ) {
    Self::set_column_index(&mut child, Some(column));
    Self::set_row_index(&mut child, Some(row));
    Self::set_column_span(&mut child, Some(colspan));
    Self::set_row_span(&mut child, Some(rowspan));
    self.children.push(Box::new(child));
  }

  /// The children in insertion order
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

  /// Gap between adjacent columns
  pub fn hgap(&self) -> f32 {
    self.hgap
  }

  /// Sets the gap between adjacent columns; must be non-negative
  pub fn set_hgap(&mut self, hgap: f32) -> Result<()> {
    if hgap < 0.0 {
      return Err(Error::InvalidDimension {
        what: "hgap",
        value: hgap,
      });
    }
    self.hgap = hgap;
    Ok(())
  }

  /// Gap between adjacent rows
  pub fn vgap(&self) -> f32 {
    self.vgap
  }

  /// Sets the gap between adjacent rows; must be non-negative
  pub fn set_vgap(&mut self, vgap: f32) -> Result<()> {
    if vgap < 0.0 {
      return Err(Error::InvalidDimension {
        what: "vgap",
        value: vgap,
      });
    }
    self.vgap = vgap;
    Ok(())
  }

  /// How the grid of cells sits within the pane
  pub fn alignment(&self) -> Pos {
    self.alignment
  }

  /// Sets the grid alignment
  pub fn set_alignment(&mut self, alignment: Pos) {
    self.alignment = alignment;
  }

  /// Per-column settings; index `i` applies to column `i`
  pub fn column_constraints(&self) -> &[ColumnConstraints] {
    &self.column_constraints
  }

  /// Mutable per-column settings
  pub fn column_constraints_mut(&mut self) -> &mut Vec<ColumnConstraints> {
    &mut self.column_constraints
  }

  /// Per-row settings; index `i` applies to row `i`
  pub fn row_constraints(&self) -> &[RowConstraints] {
    &self.row_constraints
  }

  /// Mutable per-row settings
  pub fn row_constraints_mut(&mut self) -> &mut Vec<RowConstraints> {
    &mut self.row_constraints
  }

  /// Number of rows the grid currently spans
  pub fn row_count(&self) -> usize {
    let mut n = self.row_constraints.len();
    for child in &self.children {
      let row = Self::row_index(child.as_ref());
      let span = Self::row_span(child.as_ref());
      let end = if span == REMAINING { row } else { row + span - 1 };
      n = n.max(end + 1);
    }
    n
  }

  /// Number of columns the grid currently spans
  pub fn column_count(&self) -> usize {
    let mut n = self.column_constraints.len();
    for child in &self.children {
      let col = Self::column_index(child.as_ref());
      let span = Self::column_span(child.as_ref());
      let end = if span == REMAINING { col } else { col + span - 1 };
      n = n.max(end + 1);
    }
    n
  }

  fn row_valignment_at(&self, row: usize) -> VPos {
    self
      .row_constraints
      .get(row)
      .and_then(|c| c.valignment())
      .unwrap_or(VPos::Center)
  }

  fn column_halignment_at(&self, column: usize) -> HPos {
    self
      .column_constraints
      .get(column)
      .and_then(|c| c.halignment())
      .unwrap_or(HPos::Left)
  }

  fn row_min_height_at(&self, row: usize) -> f32 {
    self.row_constraints.get(row).map_or(USE_COMPUTED_SIZE, |c| c.min_height())
  }

  fn row_pref_height_at(&self, row: usize) -> f32 {
    self.row_constraints.get(row).map_or(USE_COMPUTED_SIZE, |c| c.pref_height())
  }

  fn row_max_height_at(&self, row: usize) -> f32 {
    self.row_constraints.get(row).map_or(USE_COMPUTED_SIZE, |c| c.max_height())
  }

  fn column_min_width_at(&self, column: usize) -> f32 {
    self
      .column_constraints
      .get(column)
      .map_or(USE_COMPUTED_SIZE, |c| c.min_width())
  }

  fn column_pref_width_at(&self, column: usize) -> f32 {
    self
      .column_constraints
      .get(column)
      .map_or(USE_COMPUTED_SIZE, |c| c.pref_width())
  }

  fn column_max_width_at(&self, column: usize) -> f32 {
    self
      .column_constraints
      .get(column)
      .map_or(USE_COMPUTED_SIZE, |c| c.max_width())
  }

  fn row_fill_height_at(&self, row: usize) -> bool {
    self.row_constraints.get(row).map_or(true, |c| c.fill_height())
  }

  fn column_fill_width_at(&self, column: usize) -> bool {
    self.column_constraints.get(column).map_or(true, |c| c.fill_width())
  }

  fn positioned_by_baseline(&self, child: &dyn LayoutNode) -> bool {
    match Self::valignment(child) {
      Some(v) => v == VPos::Baseline,
      None => self.row_valignment_at(Self::row_index(child)) == VPos::Baseline,
    }
  }

  fn child_row_end(&self, child: &dyn LayoutNode, num_rows: usize) -> usize {
    let span = Self::row_span(child);
    if span == REMAINING {
      num_rows - 1
    } else {
      Self::row_index(child) + span - 1
    }
  }

  fn child_column_end(&self, child: &dyn LayoutNode, num_columns: usize) -> usize {
    let span = Self::column_span(child);
    if span == REMAINING {
      num_columns - 1
    } else {
      Self::column_index(child) + span - 1
    }
  }

  /// Combined width of the columns a child spans, gaps excluded
  fn total_width_of_columns(&self, child: &dyn LayoutNode, widths: &[f32]) -> f32 {
    let col = Self::column_index(child);
    let last = self.child_column_end(child, widths.len());
    widths[col..=last].iter().sum()
  }

  /// Combined height of the rows a child spans, gaps excluded
  fn total_height_of_rows(&self, child: &dyn LayoutNode, heights: &[f32]) -> f32 {
    let row = Self::row_index(child);
    let last = self.child_row_end(child, heights.len());
    heights[row..=last].iter().sum()
  }

  fn metrics(&self) -> GridMetrics {
    let mut num_rows = self.row_constraints.len();
    let mut num_columns = self.column_constraints.len();
    for child in &self.children {
      let row = Self::row_index(child.as_ref());
      let col = Self::column_index(child.as_ref());
      let row_span = Self::row_span(child.as_ref());
      let col_span = Self::column_span(child.as_ref());
      let row_end = if row_span == REMAINING { row } else { row + row_span - 1 };
      let col_end = if col_span == REMAINING { col } else { col + col_span - 1 };
      num_rows = num_rows.max(row_end + 1);
      num_columns = num_columns.max(col_end + 1);
    }

    let mut row_percent = vec![-1.0_f32; num_rows];
    let mut column_percent = vec![-1.0_f32; num_columns];
    let mut row_grow = vec![Priority::Never; num_rows];
    let mut column_grow = vec![Priority::Never; num_columns];
    let mut row_min_baseline_complement = vec![UNCONSTRAINED; num_rows];
    let mut row_pref_baseline_complement = vec![UNCONSTRAINED; num_rows];
    let mut row_baseline = vec![Vec::new(); num_rows];

    for (i, rc) in self.row_constraints.iter().enumerate() {
      if rc.percent_height() >= 0.0 {
        row_percent[i] = rc.percent_height();
      }
      if let Some(grow) = rc.vgrow() {
        row_grow[i] = grow;
      }
    }
    for (i, cc) in self.column_constraints.iter().enumerate() {
      if cc.percent_width() >= 0.0 {
        column_percent[i] = cc.percent_width();
      }
      if let Some(grow) = cc.hgrow() {
        column_grow[i] = grow;
      }
    }

    for (row, baseline_children) in row_baseline.iter_mut().enumerate() {
      for (i, child) in self.children.iter().enumerate() {
        if Self::row_index(child.as_ref()) == row && self.positioned_by_baseline(child.as_ref()) {
          baseline_children.push(i);
        }
      }
      let refs: Vec<&dyn LayoutNode> = baseline_children.iter().map(|&i| self.children[i].as_ref()).collect();
      row_min_baseline_complement[row] = area::min_baseline_complement(&refs);
      row_pref_baseline_complement[row] = area::pref_baseline_complement(&refs);
    }

    // A span-1 child's grow hint raises its own track's priority.
    for child in &self.children {
      if Self::column_span(child.as_ref()) == 1 {
        let idx = Self::column_index(child.as_ref());
        let grow = Self::hgrow(child.as_ref()).unwrap_or(Priority::Never);
        column_grow[idx] = column_grow[idx].max(grow);
      }
      if Self::row_span(child.as_ref()) == 1 {
        let idx = Self::row_index(child.as_ref());
        let grow = Self::vgrow(child.as_ref()).unwrap_or(Priority::Never);
        row_grow[idx] = row_grow[idx].max(grow);
      }
    }

    let mut row_percent_total: f32 = row_percent.iter().filter(|&&p| p > 0.0).sum();
    if row_percent_total > 100.0 {
      let weight = 100.0 / row_percent_total;
      for p in row_percent.iter_mut().filter(|p| **p > 0.0) {
        *p *= weight;
      }
      row_percent_total = 100.0;
    }
    let mut column_percent_total: f32 = column_percent.iter().filter(|&&p| p > 0.0).sum();
    if column_percent_total > 100.0 {
      let weight = 100.0 / column_percent_total;
      for p in column_percent.iter_mut().filter(|p| **p > 0.0) {
        *p *= weight;
      }
      column_percent_total = 100.0;
    }

    let mut bias = None;
    for child in &self.children {
      if let Some(b) = child.content_bias() {
        bias = Some(b);
        if b == Orientation::Horizontal {
          break;
        }
      }
    }

    GridMetrics {
      num_rows,
      num_columns,
      row_percent,
      row_percent_total,
      column_percent,
      column_percent_total,
      row_grow,
      column_grow,
      row_min_baseline_complement,
      row_pref_baseline_complement,
      row_baseline,
      bias,
    }
  }

  fn composite_rows(&self, m: &GridMetrics, init: f32) -> CompositeSize {
    CompositeSize::new(
      m.num_rows,
      m.row_percent.clone(),
      m.row_percent_total,
      self.region.snap().space(self.vgap),
      init,
    )
  }

  fn composite_columns(&self, m: &GridMetrics, init: f32) -> CompositeSize {
    CompositeSize::new(
      m.num_columns,
      m.column_percent.clone(),
      m.column_percent_total,
      self.region.snap().space(self.hgap),
      init,
    )
  }

  fn compute_pref_heights(&self, m: &GridMetrics, widths: Option<&[f32]>) -> CompositeSize {
    let snap = self.region.snap();
    let mut result = self.composite_rows(m, 0.0);
    for (i, rc) in self.row_constraints.iter().enumerate() {
      let pref = rc.pref_height();
      let min = rc.min_height();
      if pref != USE_COMPUTED_SIZE {
        let pref_h = snap.size(pref);
        let max = rc.max_height();
        if min >= 0.0 || max >= 0.0 {
          let lo = if min < 0.0 { 0.0 } else { snap.size(min) };
          let hi = if max < 0.0 { f32::MAX } else { snap.size(max) };
          result.set_preset_size(i, bounded_size(lo, pref_h, hi));
        } else {
          result.set_preset_size(i, pref_h);
        }
      } else if min > 0.0 {
        result.set_size(i, snap.size(min));
      }
    }
    for child in &self.children {
      let child = child.as_ref();
      let start = Self::row_index(child);
      let end = self.child_row_end(child, m.num_rows);
      let complement = if self.positioned_by_baseline(child) {
        m.row_pref_baseline_complement[start]
      } else {
        UNCONSTRAINED
      };
      let width = widths.map_or(UNCONSTRAINED, |w| self.total_width_of_columns(child, w));
      let h = child_pref_area_height(child, complement, Self::margin(child), width, snap);
      if start == end && !result.is_preset(start) {
        let min = self.row_min_height_at(start);
        let max = self.row_max_height_at(start);
        result.set_max_size(
          start,
          bounded_size(min.max(0.0), h, if max < 0.0 { f32::MAX } else { max }),
        );
      } else if start != end {
        result.set_max_multi_size(start, end + 1, h);
      }
    }
    result
  }

  fn compute_min_heights(&self, m: &GridMetrics, widths: Option<&[f32]>) -> CompositeSize {
    let snap = self.region.snap();
    let mut result = self.composite_rows(m, 0.0);
    let mut pref_heights: Option<CompositeSize> = None;
    for (i, rc) in self.row_constraints.iter().enumerate() {
      let min = rc.min_height();
      if min == USE_PREF_SIZE {
        let prefs = pref_heights.get_or_insert_with(|| self.compute_pref_heights(m, widths));
        result.set_preset_size(i, prefs.size(i));
      } else if min != USE_COMPUTED_SIZE {
        result.set_preset_size(i, snap.size(min));
      }
    }
    for child in &self.children {
      let child = child.as_ref();
      let start = Self::row_index(child);
      let end = self.child_row_end(child, m.num_rows);
      let complement = if self.positioned_by_baseline(child) {
        m.row_min_baseline_complement[start]
      } else {
        UNCONSTRAINED
      };
      let width = widths.map_or(UNCONSTRAINED, |w| self.total_width_of_columns(child, w));
      let h = child_min_area_height(child, complement, Self::margin(child), width, snap);
      if start == end && !result.is_preset(start) {
        result.set_max_size(start, h);
      } else if start != end {
        result.set_max_multi_size(start, end + 1, h);
      }
    }
    result
  }

  // Unpreset tracks stay unbounded; children are clamped to their own max
  // during placement instead.
  fn compute_max_heights(&self, m: &GridMetrics) -> CompositeSize {
    let snap = self.region.snap();
    let mut result = self.composite_rows(m, f32::MAX);
    let mut pref_heights: Option<CompositeSize> = None;
    for (i, rc) in self.row_constraints.iter().enumerate() {
      let max = rc.max_height();
      if max == USE_PREF_SIZE {
        let prefs = pref_heights.get_or_insert_with(|| self.compute_pref_heights(m, None));
        result.set_preset_size(i, prefs.size(i));
      } else if max != USE_COMPUTED_SIZE {
        let max_h = snap.size(max);
        let min = rc.min_height();
        if min >= 0.0 {
          result.set_preset_size(i, bounded_size(snap.size(min), max_h, max_h));
        } else {
          result.set_preset_size(i, max_h);
        }
      }
    }
    result
  }

  fn compute_pref_widths(&self, m: &GridMetrics, heights: Option<&[f32]>) -> CompositeSize {
    let snap = self.region.snap();
    let mut result = self.composite_columns(m, 0.0);
    for (i, cc) in self.column_constraints.iter().enumerate() {
      let pref = cc.pref_width();
      let min = cc.min_width();
      if pref != USE_COMPUTED_SIZE {
        let pref_w = snap.size(pref);
        let max = cc.max_width();
        if min >= 0.0 || max >= 0.0 {
          let lo = if min < 0.0 { 0.0 } else { snap.size(min) };
          let hi = if max < 0.0 { f32::MAX } else { snap.size(max) };
          result.set_preset_size(i, bounded_size(lo, pref_w, hi));
        } else {
          result.set_preset_size(i, pref_w);
        }
      } else if min > 0.0 {
        result.set_size(i, snap.size(min));
      }
    }
    for child in &self.children {
      let child = child.as_ref();
      let start = Self::column_index(child);
      let end = self.child_column_end(child, m.num_columns);
      let complement = if self.positioned_by_baseline(child) {
        m.row_min_baseline_complement[Self::row_index(child)]
      } else {
        UNCONSTRAINED
      };
      let height = heights.map_or(UNCONSTRAINED, |h| self.total_height_of_rows(child, h));
      let w = child_pref_area_width(child, complement, Self::margin(child), height, false, snap);
      if start == end && !result.is_preset(start) {
        let min = self.column_min_width_at(start);
        let max = self.column_max_width_at(start);
        result.set_max_size(
          start,
          bounded_size(min.max(0.0), w, if max < 0.0 { f32::MAX } else { max }),
        );
      } else if start != end {
        result.set_max_multi_size(start, end + 1, w);
      }
    }
    result
  }

  fn compute_min_widths(&self, m: &GridMetrics, heights: Option<&[f32]>) -> CompositeSize {
    let snap = self.region.snap();
    let mut result = self.composite_columns(m, 0.0);
    let mut pref_widths: Option<CompositeSize> = None;
    for (i, cc) in self.column_constraints.iter().enumerate() {
      let min = cc.min_width();
      if min == USE_PREF_SIZE {
        let prefs = pref_widths.get_or_insert_with(|| self.compute_pref_widths(m, heights));
        result.set_preset_size(i, prefs.size(i));
      } else if min != USE_COMPUTED_SIZE {
        result.set_preset_size(i, snap.size(min));
      }
    }
    for child in &self.children {
      let child = child.as_ref();
      let start = Self::column_index(child);
      let end = self.child_column_end(child, m.num_columns);
      let complement = if self.positioned_by_baseline(child) {
        m.row_min_baseline_complement[Self::row_index(child)]
      } else {
        UNCONSTRAINED
      };
      let height = heights.map_or(UNCONSTRAINED, |h| self.total_height_of_rows(child, h));
      let w = child_min_area_width(child, complement, Self::margin(child), height, false, snap);
      if start == end && !result.is_preset(start) {
        result.set_max_size(start, w);
      } else if start != end {
        result.set_max_multi_size(start, end + 1, w);
      }
    }
    result
  }

  fn compute_max_widths(&self, m: &GridMetrics) -> CompositeSize {
    let snap = self.region.snap();
    let mut result = self.composite_columns(m, f32::MAX);
    let mut pref_widths: Option<CompositeSize> = None;
    for (i, cc) in self.column_constraints.iter().enumerate() {
      let max = cc.max_width();
      if max == USE_PREF_SIZE {
        let prefs = pref_widths.get_or_insert_with(|| self.compute_pref_widths(m, None));
        result.set_preset_size(i, prefs.size(i));
      } else if max != USE_COMPUTED_SIZE {
        let max_w = snap.size(max);
        let min = cc.min_width();
        if min >= 0.0 {
          result.set_preset_size(i, bounded_size(snap.size(min), max_w, max_w));
        } else {
          result.set_preset_size(i, max_w);
        }
      }
    }
    result
  }

  fn compute_heights_to_fit(&self, m: &GridMetrics, height: f32) -> CompositeSize {
    let mut heights = if m.row_percent_total == 100.0 {
      // Every row is percentage-driven; preferred heights are irrelevant.
      self.composite_rows(m, 0.0)
    } else {
      self.compute_pref_heights(m, None)
    };
    self.adjust_row_heights(m, &mut heights, height);
    heights
  }

  fn compute_widths_to_fit(&self, m: &GridMetrics, width: f32) -> CompositeSize {
    let mut widths = if m.column_percent_total == 100.0 {
      self.composite_columns(m, 0.0)
    } else {
      self.compute_pref_widths(m, None)
    };
    self.adjust_column_widths(m, &mut widths, width);
    widths
  }

  /// Fits the row tracks into `height`, returning the summed content height
  fn adjust_row_heights(&self, m: &GridMetrics, heights: &mut CompositeSize, height: f32) -> f32 {
    let snap = self.region.snap();
    let top = self.region.snapped_top_inset();
    let bottom = self.region.snapped_bottom_inset();
    let vgaps = snap.space(self.vgap) * m.num_rows.saturating_sub(1) as f32;
    let content_height = height - top - bottom;

    // Percentage rows take their cut first, floored to whole pixels with
    // the running remainder pushed onto later rows.
    if m.row_percent_total > 0.0 {
      let mut remainder = 0.0_f32;
      for i in 0..m.row_percent.len() {
        if m.row_percent[i] >= 0.0 {
          let exact = (content_height - vgaps) * (m.row_percent[i] / 100.0);
          let mut size = exact.floor();
          remainder += exact - size;
          if remainder >= 0.5 {
            size += 1.0;
            remainder -= 1.0;
          }
          heights.set_size(i, size);
        }
      }
    }

    let mut row_total = heights.total();
    if m.row_percent_total < 100.0 {
      let available = height - top - bottom - row_total;
      if available != 0.0 {
        let mut remaining = self.grow_to_multi_span_preferred_heights(m, heights, available);
        remaining = self.grow_or_shrink_row_heights(m, heights, Priority::Always, remaining);
        remaining = self.grow_or_shrink_row_heights(m, heights, Priority::Sometimes, remaining);
        row_total += available - remaining;
      }
    }
    row_total
  }

  /// Fits the column tracks into `width`, returning the summed content width
  fn adjust_column_widths(&self, m: &GridMetrics, widths: &mut CompositeSize, width: f32) -> f32 {
    let snap = self.region.snap();
    let left = self.region.snapped_left_inset();
    let right = self.region.snapped_right_inset();
    let hgaps = snap.space(self.hgap) * m.num_columns.saturating_sub(1) as f32;
    let content_width = width - left - right;

    if m.column_percent_total > 0.0 {
      let mut remainder = 0.0_f32;
      for i in 0..m.column_percent.len() {
        if m.column_percent[i] >= 0.0 {
          let exact = (content_width - hgaps) * (m.column_percent[i] / 100.0);
          let mut size = exact.floor();
          remainder += exact - size;
          if remainder >= 0.5 {
            size += 1.0;
            remainder -= 1.0;
          }
          widths.set_size(i, size);
        }
      }
    }

    let mut column_total = widths.total();
    if m.column_percent_total < 100.0 {
      let available = width - left - right - column_total;
      if available != 0.0 {
        let mut remaining = self.grow_to_multi_span_preferred_widths(m, widths, available);
        remaining = self.grow_or_shrink_column_widths(m, widths, Priority::Always, remaining);
        remaining = self.grow_or_shrink_column_widths(m, widths, Priority::Sometimes, remaining);
        column_total += available - remaining;
      }
    }
    column_total
  }

  /// Raises tracks under a multi-span child until each span reaches its
  /// recorded requirement, consuming surplus before single-track growth
  fn grow_to_multi_span_preferred_heights(
    &self,
    m: &GridMetrics,
    heights: &mut CompositeSize,
    extra: f32,
  ) -> f32 {
    if extra <= 0.0 {
      return extra;
    }
    let mut always = BTreeSet::new();
    let mut sometimes = BTreeSet::new();
    let mut last = BTreeSet::new();
    for ((begin, end), _) in heights.multi_entries() {
      for i in begin..end {
        if m.row_percent[i] < 0.0 {
          match m.row_grow[i] {
            Priority::Always => {
              always.insert(i);
            }
            Priority::Sometimes => {
              sometimes.insert(i);
            }
            Priority::Never => {}
          }
        }
      }
      if m.row_percent[end - 1] < 0.0 {
        last.insert(end - 1);
      }
    }

    let max_of = |i| self.row_max_height_at(i);
    let pref_of = |i| self.row_pref_height_at(i);
    let mut remaining = extra;
    remaining = grow_span_set(heights, &mut always, remaining, false, max_of, pref_of);
    remaining = grow_span_set(heights, &mut sometimes, remaining, false, max_of, pref_of);
    remaining = grow_span_set(heights, &mut last, remaining, true, max_of, pref_of);
    remaining
  }

  fn grow_to_multi_span_preferred_widths(
    &self,
    m: &GridMetrics,
    widths: &mut CompositeSize,
    extra: f32,
  ) -> f32 {
    if extra <= 0.0 {
      return extra;
    }
    let mut always = BTreeSet::new();
    let mut sometimes = BTreeSet::new();
    let mut last = BTreeSet::new();
    for ((begin, end), _) in widths.multi_entries() {
      for i in begin..end {
        if m.column_percent[i] < 0.0 {
          match m.column_grow[i] {
            Priority::Always => {
              always.insert(i);
            }
            Priority::Sometimes => {
              sometimes.insert(i);
            }
            Priority::Never => {}
          }
        }
      }
      if m.column_percent[end - 1] < 0.0 {
        last.insert(end - 1);
      }
    }

    let max_of = |i| self.column_max_width_at(i);
    let pref_of = |i| self.column_pref_width_at(i);
    let mut remaining = extra;
    remaining = grow_span_set(widths, &mut always, remaining, false, max_of, pref_of);
    remaining = grow_span_set(widths, &mut sometimes, remaining, false, max_of, pref_of);
    remaining = grow_span_set(widths, &mut last, remaining, true, max_of, pref_of);
    remaining
  }

  fn grow_or_shrink_row_heights(
    &self,
    m: &GridMetrics,
    heights: &mut CompositeSize,
    priority: Priority,
    extra: f32,
  ) -> f32 {
    if extra == 0.0 {
      return 0.0;
    }
    let shrinking = extra < 0.0;
    let adjusting: Vec<usize> = (0..m.row_grow.len())
      .filter(|&i| m.row_percent[i] < 0.0 && (shrinking || m.row_grow[i] == priority))
      .collect();
    let limits = if shrinking {
      self.compute_min_heights(m, None)
    } else {
      self.compute_max_heights(m)
    };
    grow_or_shrink_tracks(heights, &limits, adjusting, extra, self.region.snap())
  }

  fn grow_or_shrink_column_widths(
    &self,
    m: &GridMetrics,
    widths: &mut CompositeSize,
    priority: Priority,
    extra: f32,
  ) -> f32 {
    if extra == 0.0 {
      return 0.0;
    }
    let shrinking = extra < 0.0;
    let adjusting: Vec<usize> = (0..m.column_grow.len())
      .filter(|&i| m.column_percent[i] < 0.0 && (shrinking || m.column_grow[i] == priority))
      .collect();
    let limits = if shrinking {
      self.compute_min_widths(m, None)
    } else {
      self.compute_max_widths(m)
    };
    grow_or_shrink_tracks(widths, &limits, adjusting, extra, self.region.snap())
  }

  fn compute_min_width(&self, m: &GridMetrics, height: f32) -> f32 {
    let heights = if height == UNCONSTRAINED {
      None
    } else {
      Some(self.compute_heights_to_fit(m, height))
    };
    let arr = heights.as_ref().map(|h| h.sizes());
    self.region.snapped_left_inset()
      + self.compute_min_widths(m, arr).total_with_multi_size()
      + self.region.snapped_right_inset()
  }

  fn compute_min_height(&self, m: &GridMetrics, width: f32) -> f32 {
    let widths = if width == UNCONSTRAINED {
      None
    } else {
      Some(self.compute_widths_to_fit(m, width))
    };
    let arr = widths.as_ref().map(|w| w.sizes());
    self.region.snapped_top_inset()
      + self.compute_min_heights(m, arr).total_with_multi_size()
      + self.region.snapped_bottom_inset()
  }

  fn compute_pref_width(&self, m: &GridMetrics, height: f32) -> f32 {
    let heights = if height == UNCONSTRAINED {
      None
    } else {
      Some(self.compute_heights_to_fit(m, height))
    };
    let arr = heights.as_ref().map(|h| h.sizes());
    self.region.snapped_left_inset()
      + self.compute_pref_widths(m, arr).total_with_multi_size()
      + self.region.snapped_right_inset()
  }

  fn compute_pref_height(&self, m: &GridMetrics, width: f32) -> f32 {
    let widths = if width == UNCONSTRAINED {
      None
    } else {
      Some(self.compute_widths_to_fit(m, width))
    };
    let arr = widths.as_ref().map(|w| w.sizes());
    self.region.snapped_top_inset()
      + self.compute_pref_heights(m, arr).total_with_multi_size()
      + self.region.snapped_bottom_inset()
  }
}

impl LayoutNode for GridPane {
  fn min_width(&self, height: f32) -> f32 {
    resolve_bound(
      self.region.min_width_override(),
      || self.compute_min_width(&self.metrics(), height),
      || self.pref_width(height),
    )
  }

  fn min_height(&self, width: f32) -> f32 {
    resolve_bound(
      self.region.min_height_override(),
      || self.compute_min_height(&self.metrics(), width),
      || self.pref_height(width),
    )
  }

  fn pref_width(&self, height: f32) -> f32 {
    resolve_pref(self.region.pref_width_override(), || {
      self.compute_pref_width(&self.metrics(), height)
    })
  }

  fn pref_height(&self, width: f32) -> f32 {
    resolve_pref(self.region.pref_height_override(), || {
      self.compute_pref_height(&self.metrics(), width)
    })
  }

  fn max_width(&self, height: f32) -> f32 {
    resolve_bound(self.region.max_width_override(), || f32::MAX, || self.pref_width(height))
  }

  fn max_height(&self, width: f32) -> f32 {
    resolve_bound(self.region.max_height_override(), || f32::MAX, || self.pref_height(width))
  }

  fn content_bias(&self) -> Option<Orientation> {
    let mut bias = None;
    for child in &self.children {
      if let Some(b) = child.content_bias() {
        bias = Some(b);
        if b == Orientation::Horizontal {
          break;
        }
      }
    }
    bias
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
    let m = self.metrics();
    let snap = self.region.snap();
    let hgap = snap.space(self.hgap);
    let vgap = snap.space(self.vgap);
    let top = self.region.snapped_top_inset();
    let bottom = self.region.snapped_bottom_inset();
    let left = self.region.snapped_left_inset();
    let right = self.region.snapped_right_inset();
    let width = self.region.width();
    let height = self.region.height();
    let content_width = width - left - right;
    let content_height = height - top - bottom;

    // The biased axis is resolved first so the dependent axis measures
    // against final track sizes.
    let (widths, heights, column_total, row_total) = match m.bias {
      None => {
        let mut h = self.compute_pref_heights(&m, None);
        let mut w = self.compute_pref_widths(&m, None);
        let row_total = self.adjust_row_heights(&m, &mut h, height);
        let column_total = self.adjust_column_widths(&m, &mut w, width);
        (w, h, column_total, row_total)
      }
      Some(Orientation::Horizontal) => {
        let mut w = self.compute_pref_widths(&m, None);
        let column_total = self.adjust_column_widths(&m, &mut w, width);
        let mut h = self.compute_pref_heights(&m, Some(w.sizes()));
        let row_total = self.adjust_row_heights(&m, &mut h, height);
        (w, h, column_total, row_total)
      }
      Some(Orientation::Vertical) => {
        let mut h = self.compute_pref_heights(&m, None);
        let row_total = self.adjust_row_heights(&m, &mut h, height);
        let mut w = self.compute_pref_widths(&m, Some(h.sizes()));
        let column_total = self.adjust_column_widths(&m, &mut w, width);
        (w, h, column_total, row_total)
      }
    };
    trace!(
      "gridpane layout: {}x{} tracks, content {}x{} in {}x{}",
      m.num_columns,
      m.num_rows,
      column_total,
      row_total,
      width,
      height
    );

    let x = left + compute_x_offset(content_width, column_total, self.alignment.hpos());
    let y = top + compute_y_offset(content_height, row_total, self.alignment.vpos());

    struct Placement {
      area: Rect,
      baseline: f32,
      margin: Option<Insets>,
      fill_width: bool,
      fill_height: bool,
      halignment: HPos,
      valignment: VPos,
    }

    let mut baseline_offsets = vec![UNCONSTRAINED; m.num_rows];
    let mut placements = Vec::with_capacity(self.children.len());
    for child in &self.children {
      let child = child.as_ref();
      let row = Self::row_index(child);
      let col = Self::column_index(child);
      let mut colspan = Self::column_span(child);
      if colspan == REMAINING {
        colspan = m.num_columns - col;
      }
      let mut rowspan = Self::row_span(child);
      if rowspan == REMAINING {
        rowspan = m.num_rows - row;
      }

      let mut area_x = x;
      for j in 0..col {
        area_x += widths.size(j) + hgap;
      }
      let mut area_y = y;
      for j in 0..row {
        area_y += heights.size(j) + vgap;
      }
      let mut area_w = widths.size(col);
      for j in 1..colspan {
        area_w += widths.size(col + j) + hgap;
      }
      let mut area_h = heights.size(row);
      for j in 1..rowspan {
        area_h += heights.size(row + j) + vgap;
      }

      let halignment = Self::halignment(child).unwrap_or_else(|| self.column_halignment_at(col));
      let valignment = Self::valignment(child).unwrap_or_else(|| self.row_valignment_at(row));
      let fill_width = Self::fill_width(child).unwrap_or_else(|| self.column_fill_width_at(col));
      let fill_height = Self::fill_height(child).unwrap_or_else(|| self.row_fill_height_at(row));

      let mut baseline = 0.0;
      if valignment == VPos::Baseline {
        if baseline_offsets[row] == UNCONSTRAINED {
          let members = &m.row_baseline[row];
          let refs: Vec<&dyn LayoutNode> = members.iter().map(|&i| self.children[i].as_ref()).collect();
          baseline_offsets[row] = area::area_baseline_offset(
            &refs,
            |c| Self::margin(c),
            |t| {
              let n = self.children[members[t]].as_ref();
              let c = Self::column_index(n);
              let mut cs = Self::column_span(n);
              if cs == REMAINING {
                cs = m.num_columns - c;
              }
              let mut w = widths.size(c);
              for j in 1..cs {
                w += widths.size(c + j) + hgap;
              }
              w
            },
            area_h,
            |t| {
              let n = self.children[members[t]].as_ref();
              Self::fill_height(n).unwrap_or_else(|| self.row_fill_height_at(Self::row_index(n)))
            },
            m.row_min_baseline_complement[row],
            snap,
          );
        }
        baseline = baseline_offsets[row];
      }

      placements.push(Placement {
        area: Rect::from_xywh(area_x, area_y, area_w, area_h),
        baseline,
        margin: Self::margin(child),
        fill_width,
        fill_height,
        halignment,
        valignment,
      });
    }

    for (child, p) in self.children.iter_mut().zip(placements) {
      layout_in_area(
        child.as_mut(),
        p.area,
        p.baseline,
        p.margin,
        p.fill_width,
        p.fill_height,
        p.halignment,
        p.valignment,
        snap,
      );
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

/// One growth tier over a candidate track set
///
/// Tracks are raised in equal floored portions, each capped by the deficit
/// of any span covering it (for the `last_tier`, by the deficit of spans
/// ending on it) and by the track's max (or preferred, when the max says to
/// use it). Tracks that hit a cap drop out; returns the unconsumed surplus.
fn grow_span_set(
  sizes: &mut CompositeSize,
  set: &mut BTreeSet<usize>,
  mut remaining: f32,
  last_tier: bool,
  max_of: impl Fn(usize) -> f32,
  pref_of: impl Fn(usize) -> f32,
) -> f32 {
  let multi = sizes.multi_entries();
  while !set.is_empty() && remaining > set.len() as f32 {
    let portion = (remaining / set.len() as f32).floor();
    let members: Vec<usize> = set.iter().copied().collect();
    for i in members {
      let mut actual = portion;
      for &((begin, end), target) in &multi {
        if last_tier {
          if end - 1 == i {
            let current_span = sizes.total_range(begin, end);
            actual = actual.min((target - current_span).max(0.0));
          }
        } else if begin <= i && i < end {
          let count = (begin..end).filter(|j| set.contains(j)).count();
          let current_span = sizes.total_range(begin, end);
          actual = actual.min(((target - current_span).max(0.0) / count as f32).floor());
        }
      }
      let max = max_of(i);
      let pref = pref_of(i);
      let current = sizes.size(i);
      let bounded = if max >= 0.0 {
        bounded_size(0.0, current + actual, max)
      } else if max == USE_PREF_SIZE && pref > 0.0 {
        bounded_size(0.0, current + actual, pref)
      } else {
        current + actual
      };
      let used = bounded - current;
      remaining -= used;
      if used != actual || used == 0.0 {
        set.remove(&i);
      }
      sizes.set_size(i, bounded);
    }
  }
  remaining
}

/// Distributes `extra` over `adjusting` tracks up to their min/max limits
///
/// Works in whole-pixel portions, then hands out the sub-portion remainder
/// one pixel at a time. Shrinking mirrors growing with negative portions;
/// the sign check stops the loop the moment the surplus crosses zero.
fn grow_or_shrink_tracks(
  sizes: &mut CompositeSize,
  limits: &CompositeSize,
  mut adjusting: Vec<usize>,
  extra: f32,
  snap: Snap,
) -> f32 {
  let shrinking = extra < 0.0;
  let mut available = extra;
  let mut handle_remainder = false;
  let mut portion = 0.0_f32;
  let was_positive = available >= 0.0;
  let mut is_positive = was_positive;

  while available != 0.0 && was_positive == is_positive && !adjusting.is_empty() {
    if !handle_remainder {
      portion = if available > 0.0 {
        (available / adjusting.len() as f32).floor()
      } else {
        (available / adjusting.len() as f32).ceil()
      };
    }
    if portion != 0.0 {
      let mut i = 0;
      while i < adjusting.len() {
        let index = adjusting[i];
        let mut limit = snap.space(limits.proportional_limit(index, shrinking)) - sizes.size(index);
        // A track already past its limit contributes nothing.
        if (shrinking && limit > 0.0) || (!shrinking && limit < 0.0) {
          limit = 0.0;
        }
        let change = if limit.abs() <= portion.abs() { limit } else { portion };
        sizes.add_size(index, change);
        available -= change;
        is_positive = available >= 0.0;
        if change.abs() < portion.abs() {
          adjusting.remove(i);
        } else {
          i += 1;
        }
        if available == 0.0 {
          break;
        }
      }
    } else {
      portion = (available as i64 % adjusting.len() as i64) as f32;
      if portion == 0.0 {
        break;
      }
      portion = if shrinking { -1.0 } else { 1.0 };
      handle_remainder = true;
    }
  }
  available
}

/// Track sizes for one axis: a value per track plus span requirements
///
/// Span requirements are kept per half-open interval so a multi-span child
/// raises the axis total (and the grow passes) without forcing any single
/// track to absorb its whole extent.
#[derive(Clone)]
struct CompositeSize {
  sizes: Vec<f32>,
  multi_sizes: BTreeMap<(usize, usize), f32>,
  preset: Vec<bool>,
  fixed_percent: Vec<f32>,
  total_fixed_percent: f32,
  gap: f32,
}

impl CompositeSize {
  fn new(capacity: usize, fixed_percent: Vec<f32>, total_fixed_percent: f32, gap: f32, init: f32) -> Self {
    Self {
      sizes: vec![init; capacity],
      multi_sizes: BTreeMap::new(),
      preset: vec![false; capacity],
      fixed_percent,
      total_fixed_percent,
      gap,
    }
  }

  fn set_size(&mut self, position: usize, size: f32) {
    self.sizes[position] = size;
  }

  fn set_preset_size(&mut self, position: usize, size: f32) {
    self.sizes[position] = size;
    self.preset[position] = true;
  }

  fn is_preset(&self, position: usize) -> bool {
    self.preset[position]
  }

  fn add_size(&mut self, position: usize, change: f32) {
    self.sizes[position] += change;
  }

  fn size(&self, position: usize) -> f32 {
    self.sizes[position]
  }

  fn set_max_size(&mut self, position: usize, size: f32) {
    self.sizes[position] = self.sizes[position].max(size);
  }

  /// Records a span requirement over `[begin, end)`, keeping the largest
  fn set_max_multi_size(&mut self, begin: usize, end: usize, size: f32) {
    self
      .multi_sizes
      .entry((begin, end))
      .and_modify(|s| *s = s.max(size))
      .or_insert(size);
  }

  fn multi_entries(&self) -> Vec<((usize, usize), f32)> {
    self.multi_sizes.iter().map(|(&k, &v)| (k, v)).collect()
  }

  /// The track's effective limit once span requirements are shared out
  ///
  /// A span's requirement is split into equal segments; tracks already past
  /// their segment push the difference onto this one.
  fn proportional_limit(&self, position: usize, min: bool) -> f32 {
    let mut result = self.sizes[position];
    if !self.is_preset(position) {
      for (&(begin, end), &target) in &self.multi_sizes {
        if begin <= position && position < end {
          let segment = target / (end - begin) as f32;
          let mut prop_size = segment;
          for j in begin..end {
            if j != position {
              let past = if min {
                self.sizes[j] > segment
              } else {
                self.sizes[j] < segment
              };
              if past {
                prop_size += segment - self.sizes[j];
              }
            }
          }
          result = if min { result.max(prop_size) } else { result.min(prop_size) };
        }
      }
    }
    result
  }

  fn total_range(&self, from: usize, to: usize) -> f32 {
    let mut total = self.gap * (to - from).saturating_sub(1) as f32;
    for i in from..to {
      total += self.sizes[i];
    }
    total
  }

  fn total(&self) -> f32 {
    self.total_range(0, self.sizes.len())
  }

  fn all_preset(&self, begin: usize, end: usize) -> bool {
    (begin..end).all(|i| self.preset[i])
  }

  /// Axis total including span requirements and percentage floors
  fn total_with_multi_size(&self) -> f32 {
    let mut total = self.total();
    for (&(begin, end), &target) in &self.multi_sizes {
      if !self.all_preset(begin, end) {
        let sub_total = self.total_range(begin, end);
        if target > sub_total {
          total += target - sub_total;
        }
      }
    }
    if self.total_fixed_percent > 0.0 {
      let mut total_not_fixed = 0.0;
      for i in 0..self.fixed_percent.len() {
        if self.fixed_percent[i] == 0.0 {
          total -= self.sizes[i];
        }
      }
      for i in 0..self.fixed_percent.len() {
        if self.fixed_percent[i] > 0.0 {
          // The total must be large enough that this track's share of it
          // covers the track's computed size.
          total = total.max(self.sizes[i] * (100.0 / self.fixed_percent[i]));
        } else if self.fixed_percent[i] < 0.0 {
          total_not_fixed += self.sizes[i];
        }
      }
      if self.total_fixed_percent < 100.0 {
        total = total.max(total_not_fixed * 100.0 / (100.0 - self.total_fixed_percent));
      }
    }
    total
  }

  fn sizes(&self) -> &[f32] {
    &self.sizes
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::node::{FixedNode, SizedNode};

  fn grid_2x2() -> GridPane {
    let mut grid = GridPane::new();
    grid.add(SizedNode::new(300.0, 100.0), 0, 0);
    grid.add(SizedNode::new(100.0, 100.0), 1, 0);
    grid.add(SizedNode::new(100.0, 300.0), 0, 1);
    grid.add(SizedNode::new(200.0, 200.0), 1, 1);
    grid
  }

  #[test]
  fn test_pref_size_is_max_per_track() {
    let grid = grid_2x2();
    // Columns 300 and 200, rows 100 and 300.
    assert_eq!(grid.pref_width(UNCONSTRAINED), 500.0);
    assert_eq!(grid.pref_height(UNCONSTRAINED), 400.0);
    assert_eq!(grid.min_width(UNCONSTRAINED), 0.0);
  }

  #[test]
  fn test_layout_fills_cells_by_default() {
    let mut grid = GridPane::new();
    grid.add(SizedNode::with_bounds(100.0, 10.0, 300.0, 100.0, 500.0, 600.0), 0, 0);
    grid.add(FixedNode::new(100.0, 100.0), 1, 0);
    grid.add(FixedNode::new(100.0, 300.0), 0, 1);
    grid.add(SizedNode::with_bounds(100.0, 100.0, 200.0, 200.0, 800.0, 800.0), 1, 1);
    grid.resize(500.0, 400.0);
    grid.layout();
    let bounds: Vec<Rect> = grid.children().iter().map(|c| c.layout_bounds()).collect();
    // The resizable children stretch to their 300x100 and 200x300 cells;
    // the fixed ones sit at the cell origin at their own size.
    assert_eq!(bounds[0], Rect::from_xywh(0.0, 0.0, 300.0, 100.0));
    assert_eq!(bounds[1], Rect::from_xywh(300.0, 0.0, 100.0, 100.0));
    assert_eq!(bounds[2], Rect::from_xywh(0.0, 100.0, 100.0, 300.0));
    assert_eq!(bounds[3], Rect::from_xywh(300.0, 100.0, 200.0, 300.0));
  }

  #[test]
  fn test_layout_centers_max_bounded_children() {
    let mut grid = GridPane::new();
    grid.add(SizedNode::with_bounds(0.0, 0.0, 300.0, 100.0, 300.0, 100.0), 0, 0);
    grid.add(SizedNode::with_bounds(0.0, 0.0, 100.0, 100.0, 100.0, 100.0), 1, 0);
    grid.add(SizedNode::with_bounds(0.0, 0.0, 100.0, 300.0, 100.0, 300.0), 0, 1);
    grid.add(SizedNode::with_bounds(0.0, 0.0, 200.0, 200.0, 200.0, 200.0), 1, 1);
    grid.resize(500.0, 400.0);
    grid.layout();
    let bounds: Vec<Rect> = grid.children().iter().map(|c| c.layout_bounds()).collect();
    // Fill is capped at each child's max; rows center, columns left-align.
    assert_eq!(bounds[1], Rect::from_xywh(300.0, 0.0, 100.0, 100.0));
    assert_eq!(bounds[3], Rect::from_xywh(300.0, 150.0, 200.0, 200.0));
  }

  #[test]
  fn test_gaps_add_to_pref_size() {
    let mut grid = grid_2x2();
    grid.set_hgap(10.0).unwrap();
    grid.set_vgap(20.0).unwrap();
    assert_eq!(grid.pref_width(UNCONSTRAINED), 510.0);
    assert_eq!(grid.pref_height(UNCONSTRAINED), 420.0);
  }

  #[test]
  fn test_negative_gap_rejected() {
    let mut grid = GridPane::new();
    assert!(grid.set_hgap(-1.0).is_err());
    assert!(grid.set_vgap(-0.5).is_err());
  }

  #[test]
  fn test_percent_columns_take_their_share() {
    let mut grid = GridPane::new();
    grid.add(SizedNode::new(100.0, 100.0), 0, 0);
    grid.add(SizedNode::new(100.0, 100.0), 1, 0);
    let mut half = ColumnConstraints::new();
    half.set_percent_width(50.0).unwrap();
    let mut quarter = ColumnConstraints::new();
    quarter.set_percent_width(25.0).unwrap();
    grid.column_constraints_mut().push(half);
    grid.column_constraints_mut().push(quarter);
    grid.resize(400.0, 100.0);
    grid.layout();
    let bounds: Vec<Rect> = grid.children().iter().map(|c| c.layout_bounds()).collect();
    assert_eq!(bounds[0].width(), 200.0);
    assert_eq!(bounds[1].width(), 100.0);
    assert_eq!(bounds[1].x(), 200.0);
  }

  #[test]
  fn test_percents_over_one_hundred_normalize() {
    let mut grid = GridPane::new();
    grid.add(SizedNode::new(100.0, 100.0), 0, 0);
    grid.add(SizedNode::new(100.0, 100.0), 1, 0);
    let mut big = ColumnConstraints::new();
    big.set_percent_width(150.0).unwrap();
    let mut small = ColumnConstraints::new();
    small.set_percent_width(50.0).unwrap();
    grid.column_constraints_mut().push(big);
    grid.column_constraints_mut().push(small);
    grid.resize(400.0, 100.0);
    grid.layout();
    // 150:50 rescales to 75:25 of the content width.
    let bounds: Vec<Rect> = grid.children().iter().map(|c| c.layout_bounds()).collect();
    assert_eq!(bounds[0].width(), 300.0);
    assert_eq!(bounds[1].width(), 100.0);
  }

  #[test]
  fn test_hgrow_column_takes_surplus() {
    let mut grid = GridPane::new();
    grid.add(SizedNode::new(100.0, 100.0), 0, 0);
    let mut grower = SizedNode::new(100.0, 100.0);
    GridPane::set_hgrow(&mut grower, Some(Priority::Always));
    grid.add(grower, 1, 0);
    grid.resize(500.0, 100.0);
    grid.layout();
    let bounds: Vec<Rect> = grid.children().iter().map(|c| c.layout_bounds()).collect();
    assert_eq!(bounds[0].width(), 100.0);
    assert_eq!(bounds[1], Rect::from_xywh(100.0, 0.0, 400.0, 100.0));
  }

  #[test]
  fn test_shrink_toward_min() {
    let mut grid = GridPane::new();
    grid.add(SizedNode::with_bounds(50.0, 50.0, 200.0, 100.0, f32::MAX, f32::MAX), 0, 0);
    grid.add(SizedNode::with_bounds(50.0, 50.0, 200.0, 100.0, f32::MAX, f32::MAX), 1, 0);
    grid.resize(300.0, 100.0);
    grid.layout();
    let bounds: Vec<Rect> = grid.children().iter().map(|c| c.layout_bounds()).collect();
    assert_eq!(bounds[0].width() + bounds[1].width(), 300.0);
    assert!(bounds[0].width() >= 50.0 && bounds[1].width() >= 50.0);
  }

  #[test]
  fn test_column_span_raises_total() {
    let mut grid = GridPane::new();
    grid.add(SizedNode::new(100.0, 100.0), 0, 0);
    grid.add(SizedNode::new(100.0, 100.0), 1, 0);
    grid.add_spanned(SizedNode::new(300.0, 100.0), 0, 1, 2, 1);
    // The spanning child needs 300 over two 100-wide columns.
    assert_eq!(grid.pref_width(UNCONSTRAINED), 300.0);
  }

  #[test]
  fn test_remaining_span_reaches_last_column() {
    let mut grid = GridPane::new();
    grid.add(SizedNode::new(100.0, 100.0), 0, 0);
    grid.add(SizedNode::new(100.0, 100.0), 1, 0);
    grid.add(SizedNode::new(100.0, 100.0), 2, 0);
    grid.add_spanned(SizedNode::new(50.0, 100.0), 0, 1, REMAINING, 1);
    grid.resize(300.0, 200.0);
    grid.layout();
    let bounds = grid.children()[3].layout_bounds();
    assert_eq!(bounds.width(), 300.0);
  }

  #[test]
  fn test_row_constraints_preset_height() {
    let mut grid = GridPane::new();
    grid.add(SizedNode::new(100.0, 100.0), 0, 0);
    grid
      .row_constraints_mut()
      .push(RowConstraints::with_heights(USE_COMPUTED_SIZE, 150.0, USE_COMPUTED_SIZE));
    assert_eq!(grid.pref_height(UNCONSTRAINED), 150.0);
  }

  #[test]
  fn test_constraint_accessors_round_trip() {
    let mut node = SizedNode::new(10.0, 10.0);
    assert_eq!(GridPane::column_index(&node), 0);
    assert_eq!(GridPane::row_span(&node), 1);
    GridPane::set_column_index(&mut node, Some(3));
    GridPane::set_row_span(&mut node, Some(2));
    GridPane::set_halignment(&mut node, Some(HPos::Right));
    assert_eq!(GridPane::column_index(&node), 3);
    assert_eq!(GridPane::row_span(&node), 2);
    assert_eq!(GridPane::halignment(&node), Some(HPos::Right));
    GridPane::set_halignment(&mut node, None);
    assert_eq!(GridPane::halignment(&node), None);
  }

  #[test]
  fn test_row_and_column_counts() {
    let mut grid = GridPane::new();
    grid.add(SizedNode::new(10.0, 10.0), 2, 4);
    assert_eq!(grid.column_count(), 3);
    assert_eq!(grid.row_count(), 5);
  }

  #[test]
  fn test_alignment_offsets_whole_grid() {
    let mut grid = grid_2x2();
    grid.set_alignment(Pos::BottomRight);
    grid.resize(600.0, 500.0);
    grid.layout();
    // No track grows, so the 500x400 content block shifts to the
    // bottom-right corner.
    let bounds: Vec<Rect> = grid.children().iter().map(|c| c.layout_bounds()).collect();
    assert_eq!(bounds[3].max_x(), 600.0);
    assert_eq!(bounds[3].max_y(), 500.0);
  }
}
