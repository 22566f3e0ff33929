pub mod error;
pub mod geometry;
pub mod layout;
pub mod node;
pub mod pane;
pub mod region;
pub mod snap;

pub use error::{Error, Result};
pub use geometry::{HPos, Insets, Orientation, Point, Pos, Rect, Size, VPos};
pub use node::{
  BiasedNode, ConstraintBag, ConstraintValue, FixedNode, LayoutNode, SizedNode,
  BASELINE_OFFSET_SAME_AS_HEIGHT, UNCONSTRAINED,
};
pub use region::{Region, USE_COMPUTED_SIZE, USE_PREF_SIZE};
pub use snap::Snap;

pub use pane::anchorpane::AnchorPane;
pub use pane::borderpane::BorderPane;
pub use pane::boxpane::{HBox, VBox};
pub use pane::constraints::{ColumnConstraints, Priority, RowConstraints};
pub use pane::flowpane::FlowPane;
pub use pane::gridpane::{GridPane, REMAINING};
pub use pane::tilepane::TilePane;
