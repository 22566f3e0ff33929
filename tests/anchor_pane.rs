use panekit::{AnchorPane, LayoutNode, Rect, SizedNode, UNCONSTRAINED};

fn init_logging() {
  let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn single_sided_anchors_pin_a_child_without_stretching() {
  init_logging();
  let mut child = SizedNode::new(300.0, 400.0);
  AnchorPane::set_top_anchor(&mut child, Some(20.0));
  AnchorPane::set_left_anchor(&mut child, Some(10.0));

  let mut pane = AnchorPane::new();
  pane.add_child(child);
  assert_eq!(pane.pref_width(UNCONSTRAINED), 310.0);
  assert_eq!(pane.pref_height(UNCONSTRAINED), 420.0);

  pane.autosize();
  pane.layout();
  assert_eq!(pane.children()[0].layout_bounds(), Rect::from_xywh(10.0, 20.0, 300.0, 400.0));

  // Growing the pane leaves a singly anchored child in place.
  pane.resize(500.0, 500.0);
  pane.layout();
  assert_eq!(pane.children()[0].layout_bounds(), Rect::from_xywh(10.0, 20.0, 300.0, 400.0));
}

#[test]
fn opposite_anchors_stretch_a_resizable_child() {
  init_logging();
  let mut child = SizedNode::new(100.0, 100.0);
  AnchorPane::set_top_anchor(&mut child, Some(20.0));
  AnchorPane::set_bottom_anchor(&mut child, Some(10.0));
  AnchorPane::set_left_anchor(&mut child, Some(40.0));
  AnchorPane::set_right_anchor(&mut child, Some(30.0));

  let mut pane = AnchorPane::new();
  pane.add_child(child);
  pane.resize(500.0, 500.0);
  pane.layout();
  assert_eq!(pane.children()[0].layout_bounds(), Rect::from_xywh(40.0, 20.0, 430.0, 470.0));

  // The stretch tracks every resize.
  pane.resize(300.0, 200.0);
  pane.layout();
  assert_eq!(pane.children()[0].layout_bounds(), Rect::from_xywh(40.0, 20.0, 230.0, 170.0));
}

#[test]
fn anchored_children_overlap_freely() {
  let mut back = SizedNode::new(100.0, 100.0);
  AnchorPane::set_left_anchor(&mut back, Some(0.0));
  AnchorPane::set_right_anchor(&mut back, Some(0.0));
  AnchorPane::set_top_anchor(&mut back, Some(0.0));
  AnchorPane::set_bottom_anchor(&mut back, Some(0.0));
  let mut badge = SizedNode::new(40.0, 20.0);
  AnchorPane::set_right_anchor(&mut badge, Some(5.0));
  AnchorPane::set_top_anchor(&mut badge, Some(5.0));

  let mut pane = AnchorPane::new();
  pane.add_child(back);
  pane.add_child(badge);
  pane.resize(200.0, 150.0);
  pane.layout();

  assert_eq!(pane.children()[0].layout_bounds(), Rect::from_xywh(0.0, 0.0, 200.0, 150.0));
  assert_eq!(pane.children()[1].layout_bounds(), Rect::from_xywh(155.0, 5.0, 40.0, 20.0));
}

#[test]
fn padding_shifts_anchor_origins() {
  let mut child = SizedNode::new(100.0, 100.0);
  AnchorPane::set_left_anchor(&mut child, Some(10.0));
  AnchorPane::set_top_anchor(&mut child, Some(10.0));

  let mut pane = AnchorPane::new();
  pane.region_mut().set_padding(panekit::Insets::all(5.0).unwrap());
  pane.add_child(child);
  assert_eq!(pane.pref_width(UNCONSTRAINED), 120.0);
  pane.resize(200.0, 200.0);
  pane.layout();
  assert_eq!(pane.children()[0].layout_bounds(), Rect::from_xywh(15.0, 15.0, 100.0, 100.0));
}
