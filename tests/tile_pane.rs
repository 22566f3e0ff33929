use panekit::{LayoutNode, Orientation, Pos, Rect, SizedNode, TilePane, UNCONSTRAINED};

fn init_logging() {
  let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn tiles_are_uniform_at_the_largest_child_pref() {
  init_logging();
  let mut pane = TilePane::new();
  pane.add_child(SizedNode::new(40.0, 80.0));
  pane.add_child(SizedNode::new(100.0, 30.0));
  pane.set_pref_columns(2);
  assert_eq!(pane.pref_width(UNCONSTRAINED), 200.0);
  assert_eq!(pane.pref_height(UNCONSTRAINED), 80.0);

  pane.autosize();
  pane.layout();
  // Both children get a 100x80 tile; the second starts at the tile edge.
  assert_eq!(pane.children()[1].layout_bounds().x(), 100.0);
}

#[test]
fn rows_wrap_at_the_actual_width() {
  init_logging();
  let mut pane = TilePane::new();
  for _ in 0..6 {
    pane.add_child(SizedNode::new(100.0, 50.0));
  }
  pane.resize(300.0, 100.0);
  pane.layout();
  assert_eq!(pane.children()[2].layout_bounds(), Rect::from_xywh(200.0, 0.0, 100.0, 50.0));
  assert_eq!(pane.children()[3].layout_bounds(), Rect::from_xywh(0.0, 50.0, 100.0, 50.0));
}

#[test]
fn vertical_pane_fills_columns_first() {
  let mut pane = TilePane::with_orientation(Orientation::Vertical);
  for _ in 0..4 {
    pane.add_child(SizedNode::new(60.0, 40.0));
  }
  pane.resize(200.0, 80.0);
  pane.layout();
  assert_eq!(pane.children()[1].layout_bounds(), Rect::from_xywh(0.0, 40.0, 60.0, 40.0));
  assert_eq!(pane.children()[2].layout_bounds(), Rect::from_xywh(60.0, 0.0, 60.0, 40.0));
}

#[test]
fn explicit_tile_size_wins_over_children() {
  let mut pane = TilePane::new();
  pane.add_child(SizedNode::new(30.0, 30.0));
  pane.set_pref_tile_width(50.0);
  pane.set_pref_tile_height(40.0);
  pane.set_pref_columns(1);
  assert_eq!(pane.pref_width(UNCONSTRAINED), 50.0);
  assert_eq!(pane.pref_height(UNCONSTRAINED), 40.0);
}

#[test]
fn partial_last_row_follows_block_alignment() {
  let mut pane = TilePane::new();
  for _ in 0..3 {
    pane.add_child(SizedNode::new(100.0, 100.0));
  }
  pane.set_block_alignment(Pos::TopRight);
  pane.resize(200.0, 200.0);
  pane.layout();
  assert_eq!(pane.children()[2].layout_bounds(), Rect::from_xywh(100.0, 100.0, 100.0, 100.0));
}

#[test]
fn gaps_separate_tiles() {
  let mut pane = TilePane::new();
  pane.set_hgap(10.0).unwrap();
  pane.set_vgap(5.0).unwrap();
  for _ in 0..6 {
    pane.add_child(SizedNode::new(100.0, 50.0));
  }
  assert_eq!(pane.pref_width(UNCONSTRAINED), 540.0);
  assert_eq!(pane.pref_height(UNCONSTRAINED), 105.0);
  pane.autosize();
  pane.layout();
  assert_eq!(pane.children()[5].layout_bounds(), Rect::from_xywh(0.0, 55.0, 100.0, 50.0));
}
