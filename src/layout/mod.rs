//! Layout algorithms shared by every pane
//!
//! Three layers, leaves first:
//!
//! - [`sizing`] — the scalar size-negotiation primitives: `bounded_size`
//!   clamping and bias-aware whole-node sizing.
//! - [`area`] — placing one child inside an allocated rectangle: margins,
//!   alignment offsets, baseline bookkeeping, and the per-child area size
//!   queries panes measure with.
//! - [`distribute`] — spreading surplus or deficit space across a sequence
//!   of children by grow priority, respecting per-child bounds.

pub mod area;
pub mod distribute;
pub mod sizing;
