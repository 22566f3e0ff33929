use panekit::{BiasedNode, BorderPane, HBox, LayoutNode, Orientation, Pos, Rect, SizedNode, UNCONSTRAINED};

fn init_logging() {
  let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn center_only_pane_mirrors_child_bounds_and_fills() {
  init_logging();
  let mut pane = BorderPane::new();
  pane.set_center(SizedNode::with_bounds(10.0, 20.0, 100.0, 200.0, f32::MAX, f32::MAX));

  assert_eq!(pane.min_width(UNCONSTRAINED), 10.0);
  assert_eq!(pane.min_height(UNCONSTRAINED), 20.0);
  assert_eq!(pane.pref_width(UNCONSTRAINED), 100.0);
  assert_eq!(pane.pref_height(UNCONSTRAINED), 200.0);
  assert_eq!(pane.max_width(UNCONSTRAINED), f32::MAX);
  assert_eq!(pane.max_height(UNCONSTRAINED), f32::MAX);

  pane.autosize();
  pane.layout();
  assert_eq!(pane.center().unwrap().layout_bounds(), Rect::from_xywh(0.0, 0.0, 100.0, 200.0));

  // The center keeps filling as the pane grows.
  pane.resize(400.0, 300.0);
  pane.layout();
  assert_eq!(pane.center().unwrap().layout_bounds(), Rect::from_xywh(0.0, 0.0, 400.0, 300.0));
}

#[test]
fn five_slots_partition_the_pane() {
  init_logging();
  let mut pane = BorderPane::new();
  pane.set_top(SizedNode::new(100.0, 50.0));
  pane.set_bottom(SizedNode::new(100.0, 30.0));
  pane.set_left(SizedNode::new(40.0, 100.0));
  pane.set_right(SizedNode::new(60.0, 100.0));
  pane.set_center(SizedNode::new(200.0, 200.0));
  pane.resize(400.0, 380.0);
  pane.layout();

  assert_eq!(pane.top().unwrap().layout_bounds(), Rect::from_xywh(0.0, 0.0, 400.0, 50.0));
  assert_eq!(pane.bottom().unwrap().layout_bounds(), Rect::from_xywh(0.0, 350.0, 400.0, 30.0));
  assert_eq!(pane.left().unwrap().layout_bounds(), Rect::from_xywh(0.0, 50.0, 40.0, 300.0));
  assert_eq!(pane.right().unwrap().layout_bounds(), Rect::from_xywh(340.0, 50.0, 60.0, 300.0));
  assert_eq!(pane.center().unwrap().layout_bounds(), Rect::from_xywh(40.0, 50.0, 300.0, 300.0));
}

#[test]
fn slot_alignment_positions_a_bounded_child() {
  let mut pane = BorderPane::new();
  let mut center = SizedNode::with_bounds(0.0, 0.0, 100.0, 100.0, 100.0, 100.0);
  BorderPane::set_alignment(&mut center, Some(Pos::BottomRight));
  pane.set_center(center);
  pane.resize(300.0, 300.0);
  pane.layout();
  assert_eq!(pane.center().unwrap().layout_bounds(), Rect::from_xywh(200.0, 200.0, 100.0, 100.0));
}

#[test]
fn biased_center_drives_the_enclosing_box() {
  init_logging();
  let mut pane = BorderPane::new();
  pane.set_center(BiasedNode::new(Orientation::Horizontal, 200.0, 100.0));
  assert_eq!(pane.content_bias(), Some(Orientation::Horizontal));

  let mut hbox = HBox::new();
  hbox.add_child(pane);
  assert_eq!(hbox.content_bias(), Some(Orientation::Horizontal));

  // Halving the width doubles the preferred height of the biased center,
  // which only happens when the bias reaches the box.
  assert_eq!(hbox.pref_height(UNCONSTRAINED), 100.0);
  assert_eq!(hbox.pref_height(100.0), 200.0);
}

#[test]
fn nested_border_panes_compose() {
  let mut inner = BorderPane::new();
  inner.set_top(SizedNode::new(50.0, 20.0));
  inner.set_center(SizedNode::new(100.0, 100.0));

  let mut outer = BorderPane::new();
  outer.set_left(SizedNode::new(30.0, 50.0));
  outer.set_center(inner);
  outer.resize(230.0, 150.0);
  outer.layout();

  let inner_bounds = outer.center().unwrap().layout_bounds();
  assert_eq!(inner_bounds, Rect::from_xywh(30.0, 0.0, 200.0, 150.0));
}
