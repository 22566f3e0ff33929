//! Distribution of surplus or deficit space across a run of children
//!
//! Starting from preferred sizes, `distribute` spreads the difference
//! between the allocated extent and the content's preferred extent over the
//! children. Growth goes to the highest priority tier first (`Always`, then
//! `Sometimes`; `Never` children keep their pref); shrinking pulls every
//! child toward its minimum regardless of priority.
//!
//! Each round hands every still-adjustable child an equal snapped portion of
//! what remains, clamped at the child's limit; a child that hits its limit
//! drops out and later rounds redistribute among the rest. The loop stops
//! when less than one pixel remains or no child can move, so the final sizes
//! absorb the available delta exactly to the pixel.

use crate::pane::constraints::Priority;
use crate::snap::Snap;

/// One participant in a distribution pass
///
/// `size` starts at the child's preferred area extent and is adjusted in
/// place; `min` and `max` are the child's area limits in the same axis;
/// `priority` gates participation in growth.
#[derive(Debug, Clone, Copy)]
pub struct SpaceItem {
  /// Current allocated extent, mutated by distribution
  pub size: f32,
  /// Floor when shrinking
  pub min: f32,
  /// Ceiling when growing
  pub max: f32,
  /// Growth tier
  pub priority: Priority,
}

impl SpaceItem {
  /// An item starting at `pref` with the given limits and priority
  pub fn new(min: f32, pref: f32, max: f32, priority: Priority) -> Self {
    Self {
      size: pref,
      min,
      max,
      priority,
    }
  }
}

/// Distributes `extra` (positive to grow, negative to shrink) over `items`
///
/// Growth runs the `Always` tier first and gives any space that tier could
/// not absorb to the `Sometimes` tier. Returns the undistributed remainder;
/// a magnitude below one pixel means the target extent was met.
pub fn distribute(items: &mut [SpaceItem], extra: f32, snap: Snap) -> f32 {
  if extra == 0.0 {
    return 0.0;
  }
  let remaining = grow_or_shrink(items, Priority::Always, extra, snap);
  grow_or_shrink(items, Priority::Sometimes, remaining, snap)
}

fn grow_or_shrink(items: &mut [SpaceItem], priority: Priority, extra: f32, snap: Snap) -> f32 {
  let shrinking = extra < 0.0;

  // A limit of None marks a child that is done adjusting.
  let mut limits: Vec<Option<f32>> = Vec::with_capacity(items.len());
  let mut adjusting = 0usize;
  for item in items.iter() {
    if shrinking {
      limits.push(Some(item.min));
      adjusting += 1;
    } else if item.priority == priority {
      limits.push(Some(item.max));
      adjusting += 1;
    } else {
      limits.push(None);
    }
  }

  let mut available = extra;
  'outer: while available.abs() > 1.0 && adjusting > 0 {
    let portion = snap.portion(available / adjusting as f32);
    for (item, limit) in items.iter_mut().zip(limits.iter_mut()) {
      let Some(bound) = *limit else {
        continue;
      };
      let headroom = bound - item.size;
      let change = if headroom.abs() <= portion.abs() {
        headroom
      } else {
        portion
      };
      item.size += change;
      available -= change;
      if available.abs() < 1.0 {
        break 'outer;
      }
      if change.abs() < portion.abs() {
        *limit = None;
        adjusting -= 1;
      }
    }
  }
  available
}
