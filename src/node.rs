//! The layout participant contract and per-child constraint storage
//!
//! Every element a pane can lay out implements [`LayoutNode`]: the six size
//! queries (each parameterized by the perpendicular extent), a content-bias
//! declaration, and the `resize`/`relocate` effectors the pane drives.
//!
//! Layout metadata that belongs to a parent pane rather than the child
//! itself (grow priority, grid cell, anchor offsets, margin) lives in a
//! [`ConstraintBag`] carried by the child. Panes read the bag through their
//! own typed accessors; an absent entry always means the documented default.

use rustc_hash::FxHashMap;

use crate::geometry::{HPos, Insets, Orientation, Pos, Rect, VPos};
use crate::layout::sizing::bounded_size;
use crate::pane::constraints::Priority;

/// Sentinel extent meaning "no perpendicular constraint" in size queries
pub const UNCONSTRAINED: f32 = -1.0;

/// Sentinel baseline meaning the node's baseline sits at its bottom edge
///
/// Nodes without text content report this; baseline alignment then treats
/// the node's full height as its ascent.
pub const BASELINE_OFFSET_SAME_AS_HEIGHT: f32 = f32::NEG_INFINITY;

/// A typed value stored in a node's [`ConstraintBag`]
///
/// One variant per kind of layout metadata a pane attaches to children.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConstraintValue {
  /// A pixel quantity (anchor offset)
  Number(f32),
  /// A grid index or span count
  Index(usize),
  /// A grow/shrink priority
  Priority(Priority),
  /// A per-child margin
  Insets(Insets),
  /// A horizontal alignment override
  HPos(HPos),
  /// A vertical alignment override
  VPos(VPos),
  /// A combined alignment override
  Pos(Pos),
  /// A boolean flag (fill overrides)
  Bool(bool),
}

/// Per-child layout metadata, keyed by constraint name
///
/// Panes write entries through their static setters (`HBox::set_hgrow`,
/// `GridPane::set_column_index`, `AnchorPane::set_top_anchor`, ...) and read
/// them during layout. Passing `None` to a setter removes the entry, which
/// restores the documented default.
///
/// # Examples
///
/// ```
/// use panekit::{ConstraintBag, ConstraintValue};
///
/// let mut bag = ConstraintBag::default();
/// bag.set("hbox-hgrow", Some(ConstraintValue::Number(1.0)));
/// assert_eq!(bag.number("hbox-hgrow"), Some(1.0));
///
/// bag.set("hbox-hgrow", None);
/// assert_eq!(bag.number("hbox-hgrow"), None);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConstraintBag {
  entries: FxHashMap<&'static str, ConstraintValue>,
}

impl ConstraintBag {
  /// Stores or removes an entry; `None` clears back to default
  pub fn set(&mut self, key: &'static str, value: Option<ConstraintValue>) {
    match value {
      Some(value) => {
        self.entries.insert(key, value);
      }
      None => {
        self.entries.remove(&key);
      }
    }
  }

  /// Raw lookup
  pub fn get(&self, key: &'static str) -> Option<ConstraintValue> {
    self.entries.get(&key).copied()
  }

  /// Looks up a `Number` entry
  pub fn number(&self, key: &'static str) -> Option<f32> {
    match self.get(key) {
      Some(ConstraintValue::Number(v)) => Some(v),
      _ => None,
    }
  }

  /// Looks up an `Index` entry
  pub fn index(&self, key: &'static str) -> Option<usize> {
    match self.get(key) {
      Some(ConstraintValue::Index(v)) => Some(v),
      _ => None,
    }
  }

  /// Looks up a `Priority` entry
  pub fn priority(&self, key: &'static str) -> Option<Priority> {
    match self.get(key) {
      Some(ConstraintValue::Priority(v)) => Some(v),
      _ => None,
    }
  }

  /// Looks up an `Insets` entry
  pub fn insets(&self, key: &'static str) -> Option<Insets> {
    match self.get(key) {
      Some(ConstraintValue::Insets(v)) => Some(v),
      _ => None,
    }
  }

  /// Looks up an `HPos` entry
  pub fn hpos(&self, key: &'static str) -> Option<HPos> {
    match self.get(key) {
      Some(ConstraintValue::HPos(v)) => Some(v),
      _ => None,
    }
  }

  /// Looks up a `VPos` entry
  pub fn vpos(&self, key: &'static str) -> Option<VPos> {
    match self.get(key) {
      Some(ConstraintValue::VPos(v)) => Some(v),
      _ => None,
    }
  }

  /// Looks up a `Pos` entry
  pub fn pos(&self, key: &'static str) -> Option<Pos> {
    match self.get(key) {
      Some(ConstraintValue::Pos(v)) => Some(v),
      _ => None,
    }
  }

  /// Looks up a `Bool` entry
  pub fn boolean(&self, key: &'static str) -> Option<bool> {
    match self.get(key) {
      Some(ConstraintValue::Bool(v)) => Some(v),
      _ => None,
    }
  }
}

/// The contract every layout participant implements
///
/// Size queries take the perpendicular extent, [`UNCONSTRAINED`] (`-1.0`)
/// meaning no constraint. Non-resizable nodes report
/// `min == pref == max == intrinsic` on both axes and ignore `resize`.
///
/// Containers implement `layout` to size and place their children; leaves
/// keep the default no-op.
pub trait LayoutNode {
  /// Minimum width for the given height
  fn min_width(&self, height: f32) -> f32;
  /// Minimum height for the given width
  fn min_height(&self, width: f32) -> f32;
  /// Preferred width for the given height
  fn pref_width(&self, height: f32) -> f32;
  /// Preferred height for the given width
  fn pref_height(&self, width: f32) -> f32;
  /// Maximum width for the given height
  fn max_width(&self, height: f32) -> f32;
  /// Maximum height for the given width
  fn max_height(&self, width: f32) -> f32;

  /// Which axis, if any, this node's size on the other axis depends on
  fn content_bias(&self) -> Option<Orientation> {
    None
  }

  /// Whether a parent may change this node's size during layout
  fn is_resizable(&self) -> bool {
    true
  }

  /// Distance from the node's top edge to its text baseline
  ///
  /// [`BASELINE_OFFSET_SAME_AS_HEIGHT`] places the baseline at the bottom.
  fn baseline_offset(&self) -> f32 {
    BASELINE_OFFSET_SAME_AS_HEIGHT
  }

  /// Sets the node's layout size; ignored by non-resizable nodes
  fn resize(&mut self, width: f32, height: f32);

  /// Sets the node's position relative to its parent
  fn relocate(&mut self, x: f32, y: f32);

  /// Current position and size as last set by `relocate`/`resize`
  fn layout_bounds(&self) -> Rect;

  /// Lays out this node's children; no-op for leaves
  fn layout(&mut self) {}

  /// Resizes to the bounded preferred size
  ///
  /// For a biased node the biased axis is resolved first so the dependent
  /// axis is queried against the extent it will actually receive.
  fn autosize(&mut self) {
    if !self.is_resizable() {
      return;
    }
    let (w, h) = match self.content_bias() {
      None => {
        let w = bounded_size(
          self.min_width(UNCONSTRAINED),
          self.pref_width(UNCONSTRAINED),
          self.max_width(UNCONSTRAINED),
        );
        let h = bounded_size(
          self.min_height(UNCONSTRAINED),
          self.pref_height(UNCONSTRAINED),
          self.max_height(UNCONSTRAINED),
        );
        (w, h)
      }
      Some(Orientation::Horizontal) => {
        let w = bounded_size(
          self.min_width(UNCONSTRAINED),
          self.pref_width(UNCONSTRAINED),
          self.max_width(UNCONSTRAINED),
        );
        let h = bounded_size(self.min_height(w), self.pref_height(w), self.max_height(w));
        (w, h)
      }
      Some(Orientation::Vertical) => {
        let h = bounded_size(
          self.min_height(UNCONSTRAINED),
          self.pref_height(UNCONSTRAINED),
          self.max_height(UNCONSTRAINED),
        );
        let w = bounded_size(self.min_width(h), self.pref_width(h), self.max_width(h));
        (w, h)
      }
    };
    self.resize(w, h);
  }

  /// This node's constraint side-table
  fn properties(&self) -> &ConstraintBag;

  /// Mutable access to the constraint side-table
  fn properties_mut(&mut self) -> &mut ConstraintBag;
}

/// A resizable leaf with configurable (min, pref, max) on both axes
///
/// The workhorse child for exercising panes: its size queries are constants,
/// independent of the perpendicular extent, and `resize` stores whatever the
/// parent assigns.
///
/// # Examples
///
/// ```
/// use panekit::{LayoutNode, SizedNode};
///
/// let mut node = SizedNode::new(100.0, 200.0);
/// node.autosize();
/// assert_eq!(node.layout_bounds().width(), 100.0);
/// assert_eq!(node.layout_bounds().height(), 200.0);
/// ```
#[derive(Debug, Clone)]
pub struct SizedNode {
  min_width: f32,
  min_height: f32,
  pref_width: f32,
  pref_height: f32,
  max_width: f32,
  max_height: f32,
  baseline: f32,
  bounds: Rect,
  bag: ConstraintBag,
}

impl SizedNode {
  /// A node with the given preferred size, zero min, and unbounded max
  pub fn new(pref_width: f32, pref_height: f32) -> Self {
    Self::with_bounds(0.0, 0.0, pref_width, pref_height, f32::MAX, f32::MAX)
  }

  /// A node with fully specified min, pref, and max sizes
  pub fn with_bounds(
    min_width: f32,
    min_height: f32,
    pref_width: f32,
    pref_height: f32,
    max_width: f32,
    max_height: f32,
  ) -> Self {
    Self {
      min_width,
      min_height,
      pref_width,
      pref_height,
      max_width,
      max_height,
      baseline: BASELINE_OFFSET_SAME_AS_HEIGHT,
      bounds: Rect::ZERO,
      bag: ConstraintBag::default(),
    }
  }

  /// Sets an explicit baseline offset from the top edge
  pub fn set_baseline_offset(&mut self, baseline: f32) {
    self.baseline = baseline;
  }
}

impl LayoutNode for SizedNode {
  fn min_width(&self, _height: f32) -> f32 {
    self.min_width
  }

  fn min_height(&self, _width: f32) -> f32 {
    self.min_height
  }

  fn pref_width(&self, _height: f32) -> f32 {
    self.pref_width
  }

  fn pref_height(&self, _width: f32) -> f32 {
    self.pref_height
  }

  fn max_width(&self, _height: f32) -> f32 {
    self.max_width
  }

  fn max_height(&self, _width: f32) -> f32 {
    self.max_height
  }

  fn baseline_offset(&self) -> f32 {
    self.baseline
  }

  fn resize(&mut self, width: f32, height: f32) {
    self.bounds.size.width = width;
    self.bounds.size.height = height;
  }

  fn relocate(&mut self, x: f32, y: f32) {
    self.bounds.origin.x = x;
    self.bounds.origin.y = y;
  }

  fn layout_bounds(&self) -> Rect {
    self.bounds
  }

  fn properties(&self) -> &ConstraintBag {
    &self.bag
  }

  fn properties_mut(&mut self) -> &mut ConstraintBag {
    &mut self.bag
  }
}

/// A non-resizable leaf with a fixed intrinsic size
///
/// Models shape-like content: `min == pref == max == intrinsic`, `resize`
/// is ignored, and only `relocate` moves it.
///
/// # Examples
///
/// ```
/// use panekit::{FixedNode, LayoutNode};
///
/// let mut node = FixedNode::new(50.0, 30.0);
/// node.resize(500.0, 500.0);
/// assert_eq!(node.layout_bounds().width(), 50.0);
/// assert_eq!(node.layout_bounds().height(), 30.0);
/// ```
#[derive(Debug, Clone)]
pub struct FixedNode {
  bounds: Rect,
  bag: ConstraintBag,
}

impl FixedNode {
  /// A non-resizable node with the given intrinsic size
  pub fn new(width: f32, height: f32) -> Self {
    Self {
      bounds: Rect::from_xywh(0.0, 0.0, width, height),
      bag: ConstraintBag::default(),
    }
  }
}

impl LayoutNode for FixedNode {
  fn min_width(&self, _height: f32) -> f32 {
    self.bounds.width()
  }

  fn min_height(&self, _width: f32) -> f32 {
    self.bounds.height()
  }

  fn pref_width(&self, _height: f32) -> f32 {
    self.bounds.width()
  }

  fn pref_height(&self, _width: f32) -> f32 {
    self.bounds.height()
  }

  fn max_width(&self, _height: f32) -> f32 {
    self.bounds.width()
  }

  fn max_height(&self, _width: f32) -> f32 {
    self.bounds.height()
  }

  fn is_resizable(&self) -> bool {
    false
  }

  fn resize(&mut self, _width: f32, _height: f32) {}

  fn relocate(&mut self, x: f32, y: f32) {
    self.bounds.origin.x = x;
    self.bounds.origin.y = y;
  }

  fn layout_bounds(&self) -> Rect {
    self.bounds
  }

  fn properties(&self) -> &ConstraintBag {
    &self.bag
  }

  fn properties_mut(&mut self) -> &mut ConstraintBag {
    &mut self.bag
  }
}

/// A leaf whose size on one axis is a function of the other
///
/// Models area-preserving content such as wrapping text: at its natural size
/// `w0 × h0`, a horizontally biased node reports
/// `pref_height(w) = ceil(w0 * h0 / w)`. The minimum on the dependent axis
/// tracks the preferred value, so shrinking the driving axis genuinely grows
/// the dependent one.
///
/// # Examples
///
/// ```
/// use panekit::{BiasedNode, LayoutNode, Orientation};
///
/// let node = BiasedNode::new(Orientation::Horizontal, 100.0, 100.0);
/// assert_eq!(node.content_bias(), Some(Orientation::Horizontal));
/// assert_eq!(node.pref_height(-1.0), 100.0);
/// assert_eq!(node.pref_height(50.0), 200.0);
/// ```
#[derive(Debug, Clone)]
pub struct BiasedNode {
  bias: Orientation,
  natural_width: f32,
  natural_height: f32,
  bounds: Rect,
  bag: ConstraintBag,
}

impl BiasedNode {
  /// A biased node with the given natural size
  pub fn new(bias: Orientation, natural_width: f32, natural_height: f32) -> Self {
    Self {
      bias,
      natural_width,
      natural_height,
      bounds: Rect::ZERO,
      bag: ConstraintBag::default(),
    }
  }

  fn dependent_height(&self, width: f32) -> f32 {
    if width < 0.0 || width == 0.0 {
      self.natural_height
    } else {
      (self.natural_width * self.natural_height / width).ceil()
    }
  }

  fn dependent_width(&self, height: f32) -> f32 {
    if height < 0.0 || height == 0.0 {
      self.natural_width
    } else {
      (self.natural_width * self.natural_height / height).ceil()
    }
  }
}

impl LayoutNode for BiasedNode {
  fn min_width(&self, height: f32) -> f32 {
    match self.bias {
      Orientation::Horizontal => 0.0,
      Orientation::Vertical => self.dependent_width(height),
    }
  }

  fn min_height(&self, width: f32) -> f32 {
    match self.bias {
      Orientation::Horizontal => self.dependent_height(width),
      Orientation::Vertical => 0.0,
    }
  }

  fn pref_width(&self, height: f32) -> f32 {
    match self.bias {
      Orientation::Horizontal => self.natural_width,
      Orientation::Vertical => self.dependent_width(height),
    }
  }

  fn pref_height(&self, width: f32) -> f32 {
    match self.bias {
      Orientation::Horizontal => self.dependent_height(width),
      Orientation::Vertical => self.natural_height,
    }
  }

  fn max_width(&self, _height: f32) -> f32 {
    f32::MAX
  }

  fn max_height(&self, _width: f32) -> f32 {
    f32::MAX
  }

  fn content_bias(&self) -> Option<Orientation> {
    Some(self.bias)
  }

  fn resize(&mut self, width: f32, height: f32) {
    self.bounds.size.width = width;
    self.bounds.size.height = height;
  }

  fn relocate(&mut self, x: f32, y: f32) {
    self.bounds.origin.x = x;
    self.bounds.origin.y = y;
  }

  fn layout_bounds(&self) -> Rect {
    self.bounds
  }

  fn properties(&self) -> &ConstraintBag {
    &self.bag
  }

  fn properties_mut(&mut self) -> &mut ConstraintBag {
    &mut self.bag
  }
}
