use panekit::{
  ColumnConstraints, FixedNode, GridPane, LayoutNode, Priority, Rect, RowConstraints, SizedNode,
  UNCONSTRAINED,
};

fn init_logging() {
  let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn tracks_size_to_the_largest_child() {
  init_logging();
  let mut grid = GridPane::new();
  grid.add(SizedNode::with_bounds(100.0, 10.0, 300.0, 100.0, 500.0, 600.0), 0, 0);
  grid.add(FixedNode::new(100.0, 100.0), 1, 0);
  grid.add(FixedNode::new(100.0, 300.0), 0, 1);
  grid.add(SizedNode::with_bounds(100.0, 100.0, 200.0, 200.0, 800.0, 800.0), 1, 1);

  // Column widths 300 and 200, row heights 100 and 300.
  assert_eq!(grid.min_width(UNCONSTRAINED), 200.0);
  assert_eq!(grid.min_height(UNCONSTRAINED), 400.0);
  assert_eq!(grid.pref_width(UNCONSTRAINED), 500.0);
  assert_eq!(grid.pref_height(UNCONSTRAINED), 400.0);

  grid.autosize();
  grid.layout();
  // Resizable children fill their cells; the fixed ones keep their size.
  assert_eq!(grid.children()[0].layout_bounds(), Rect::from_xywh(0.0, 0.0, 300.0, 100.0));
  assert_eq!(grid.children()[1].layout_bounds(), Rect::from_xywh(300.0, 0.0, 100.0, 100.0));
  assert_eq!(grid.children()[2].layout_bounds(), Rect::from_xywh(0.0, 100.0, 100.0, 300.0));
  assert_eq!(grid.children()[3].layout_bounds(), Rect::from_xywh(300.0, 100.0, 200.0, 300.0));
}

#[test]
fn percent_and_grow_columns_share_surplus() {
  init_logging();
  let mut grid = GridPane::new();
  grid.add(SizedNode::new(100.0, 50.0), 0, 0);
  grid.add(SizedNode::new(100.0, 50.0), 1, 0);

  let mut fixed = ColumnConstraints::new();
  fixed.set_percent_width(25.0).unwrap();
  let mut growing = ColumnConstraints::new();
  growing.set_hgrow(Some(Priority::Always));
  grid.column_constraints_mut().push(fixed);
  grid.column_constraints_mut().push(growing);

  grid.resize(400.0, 50.0);
  grid.layout();
  // The percent column takes its 100 up front, the growing column the rest.
  assert_eq!(grid.children()[0].layout_bounds(), Rect::from_xywh(0.0, 0.0, 100.0, 50.0));
  assert_eq!(grid.children()[1].layout_bounds(), Rect::from_xywh(100.0, 0.0, 300.0, 50.0));
}

#[test]
fn spanned_child_straddles_tracks() {
  let mut grid = GridPane::new();
  grid.add(SizedNode::new(100.0, 40.0), 0, 0);
  grid.add(SizedNode::new(100.0, 40.0), 1, 0);
  grid.add_spanned(SizedNode::new(150.0, 40.0), 0, 1, 2, 1);

  grid.autosize();
  grid.layout();
  let spanning = grid.children()[2].layout_bounds();
  assert_eq!(spanning.x(), 0.0);
  assert_eq!(spanning.width(), 200.0);
}

#[test]
fn row_constraints_fix_track_heights() {
  let mut grid = GridPane::new();
  grid.add(SizedNode::new(100.0, 60.0), 0, 0);
  grid.add(SizedNode::new(100.0, 60.0), 0, 1);

  let mut first = RowConstraints::new();
  first.set_pref_height(150.0);
  grid.row_constraints_mut().push(first);

  assert_eq!(grid.pref_height(UNCONSTRAINED), 210.0);
  grid.autosize();
  grid.layout();
  assert_eq!(grid.children()[1].layout_bounds().y(), 150.0);
}

#[test]
fn shrinking_respects_child_minimums() {
  let mut grid = GridPane::new();
  grid.add(SizedNode::with_bounds(50.0, 10.0, 200.0, 50.0, f32::MAX, 50.0), 0, 0);
  grid.add(SizedNode::with_bounds(50.0, 10.0, 200.0, 50.0, f32::MAX, 50.0), 1, 0);

  grid.resize(300.0, 50.0);
  grid.layout();
  let a = grid.children()[0].layout_bounds();
  let b = grid.children()[1].layout_bounds();
  assert!((a.width() + b.width() - 300.0).abs() < 0.5);
  assert!(a.width() >= 50.0);
  assert!(b.width() >= 50.0);
}

#[test]
fn gaps_separate_tracks() {
  let mut grid = GridPane::new();
  grid.set_hgap(10.0).unwrap();
  grid.set_vgap(20.0).unwrap();
  grid.add(SizedNode::new(100.0, 50.0), 0, 0);
  grid.add(SizedNode::new(100.0, 50.0), 1, 1);

  assert_eq!(grid.pref_width(UNCONSTRAINED), 210.0);
  assert_eq!(grid.pref_height(UNCONSTRAINED), 120.0);
  grid.autosize();
  grid.layout();
  assert_eq!(grid.children()[1].layout_bounds(), Rect::from_xywh(110.0, 70.0, 100.0, 50.0));
}

#[test]
fn nested_grids_lay_out_recursively() {
  let mut inner = GridPane::new();
  inner.add(SizedNode::new(50.0, 50.0), 0, 0);
  inner.add(SizedNode::new(50.0, 50.0), 1, 0);

  let mut outer = GridPane::new();
  outer.add(inner, 0, 0);
  outer.add(SizedNode::new(100.0, 100.0), 0, 1);

  assert_eq!(outer.pref_width(UNCONSTRAINED), 100.0);
  outer.autosize();
  outer.layout();
  // The inner grid filled its 100x100 cell and laid out its own children.
  let inner_bounds = outer.children()[0].layout_bounds();
  assert_eq!(inner_bounds.width(), 100.0);
}
