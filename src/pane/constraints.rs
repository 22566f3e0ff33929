//! Grow priorities and per-column/per-row constraint objects

use crate::error::{Error, Result};
use crate::geometry::{HPos, VPos};
use crate::region::USE_COMPUTED_SIZE;

/// How eagerly a child or track soaks up surplus space
///
/// Surplus goes to the highest tier present: all `Always` participants
/// first, then `Sometimes` with whatever they could not absorb. `Never`
/// participants keep their preferred size.
///
/// The derived ordering puts `Always` highest, so merging priorities from
/// several sources is `a.max(b)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum Priority {
  /// Never grows beyond the preferred size
  #[default]
  Never,
  /// Grows if no `Always` participant can absorb the surplus
  Sometimes,
  /// First in line for surplus space
  Always,
}

/// Sizing rules for one grid column
///
/// A significant `percent_width` (> 0) takes precedence over the min, pref,
/// and max settings; percentages across all columns are weighted down
/// proportionally when their total exceeds 100. The size fields accept the
/// same sentinels as pane size overrides.
///
/// # Examples
///
/// ```
/// use panekit::ColumnConstraints;
///
/// let mut column = ColumnConstraints::new();
/// column.set_percent_width(50.0)?;
/// assert_eq!(column.percent_width(), 50.0);
/// # Ok::<(), panekit::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct ColumnConstraints {
  percent_width: f32,
  min_width: f32,
  pref_width: f32,
  max_width: f32,
  hgrow: Option<Priority>,
  halignment: Option<HPos>,
  fill_width: bool,
}

impl Default for ColumnConstraints {
  fn default() -> Self {
    Self {
      percent_width: -1.0,
      min_width: USE_COMPUTED_SIZE,
      pref_width: USE_COMPUTED_SIZE,
      max_width: USE_COMPUTED_SIZE,
      hgrow: None,
      halignment: None,
      fill_width: true,
    }
  }
}

impl ColumnConstraints {
  /// A column with everything computed from content
  pub fn new() -> Self {
    Self::default()
  }

  /// A column with fixed min, pref, and max widths
  pub fn with_widths(min_width: f32, pref_width: f32, max_width: f32) -> Self {
    Self {
      min_width,
      pref_width,
      max_width,
      ..Self::default()
    }
  }

  /// Percentage of the grid's content width this column claims; -1 if unset
  pub fn percent_width(&self) -> f32 {
    self.percent_width
  }

  /// Sets the percentage width; must be finite
  pub fn set_percent_width(&mut self, percent: f32) -> Result<()> {
    if !percent.is_finite() {
      return Err(Error::InvalidPercentage { value: percent });
    }
    self.percent_width = percent;
    Ok(())
  }

  /// Minimum width override
  pub fn min_width(&self) -> f32 {
    self.min_width
  }

  /// Sets the minimum width override
  pub fn set_min_width(&mut self, width: f32) {
    self.min_width = width;
  }

  /// Preferred width override
  pub fn pref_width(&self) -> f32 {
    self.pref_width
  }

  /// Sets the preferred width override
  pub fn set_pref_width(&mut self, width: f32) {
    self.pref_width = width;
  }

  /// Maximum width override
  pub fn max_width(&self) -> f32 {
    self.max_width
  }

  /// Sets the maximum width override
  pub fn set_max_width(&mut self, width: f32) {
    self.max_width = width;
  }

  /// Grow priority, if set
  pub fn hgrow(&self) -> Option<Priority> {
    self.hgrow
  }

  /// Sets or clears the grow priority
  pub fn set_hgrow(&mut self, hgrow: Option<Priority>) {
    self.hgrow = hgrow;
  }

  /// Default horizontal alignment for children in this column
  pub fn halignment(&self) -> Option<HPos> {
    self.halignment
  }

  /// Sets or clears the default horizontal alignment
  pub fn set_halignment(&mut self, halignment: Option<HPos>) {
    self.halignment = halignment;
  }

  /// Whether children stretch to the column width by default
  pub fn fill_width(&self) -> bool {
    self.fill_width
  }

  /// Sets the default fill behavior
  pub fn set_fill_width(&mut self, fill: bool) {
    self.fill_width = fill;
  }
}

/// Sizing rules for one grid row; the vertical mirror of [`ColumnConstraints`]
#[derive(Debug, Clone)]
pub struct RowConstraints {
  percent_height: f32,
  min_height: f32,
  pref_height: f32,
  max_height: f32,
  vgrow: Option<Priority>,
  valignment: Option<VPos>,
  fill_height: bool,
}

impl Default for RowConstraints {
  fn default() -> Self {
    Self {
      percent_height: -1.0,
      min_height: USE_COMPUTED_SIZE,
      pref_height: USE_COMPUTED_SIZE,
      max_height: USE_COMPUTED_SIZE,
      vgrow: None,
      valignment: None,
      fill_height: true,
    }
  }
}

impl RowConstraints {
  /// A row with everything computed from content
  pub fn new() -> Self {
    Self::default()
  }

  /// A row with fixed min, pref, and max heights
  pub fn with_heights(min_height: f32, pref_height: f32, max_height: f32) -> Self {
    Self {
      min_height,
      pref_height,
      max_height,
      ..Self::default()
    }
  }

  /// Percentage of the grid's content height this row claims; -1 if unset
  pub fn percent_height(&self) -> f32 {
    self.percent_height
  }

  /// Sets the percentage height; must be finite
  pub fn set_percent_height(&mut self, percent: f32) -> Result<()> {
    if !percent.is_finite() {
      return Err(Error::InvalidPercentage { value: percent });
    }
    self.percent_height = percent;
    Ok(())
  }

  /// Minimum height override
  pub fn min_height(&self) -> f32 {
    self.min_height
  }

  /// Sets the minimum height override
  pub fn set_min_height(&mut self, height: f32) {
    self.min_height = height;
  }

  /// Preferred height override
  pub fn pref_height(&self) -> f32 {
    self.pref_height
  }

  /// Sets the preferred height override
  pub fn set_pref_height(&mut self, height: f32) {
    self.pref_height = height;
  }

  /// Maximum height override
  pub fn max_height(&self) -> f32 {
    self.max_height
  }

  /// Sets the maximum height override
  pub fn set_max_height(&mut self, height: f32) {
    self.max_height = height;
  }

  /// Grow priority, if set
  pub fn vgrow(&self) -> Option<Priority> {
    self.vgrow
  }

  /// Sets or clears the grow priority
  pub fn set_vgrow(&mut self, vgrow: Option<Priority>) {
    self.vgrow = vgrow;
  }

  /// Default vertical alignment for children in this row
  pub fn valignment(&self) -> Option<VPos> {
    self.valignment
  }

  /// Sets or clears the default vertical alignment
  pub fn set_valignment(&mut self, valignment: Option<VPos>) {
    self.valignment = valignment;
  }

  /// Whether children stretch to the row height by default
  pub fn fill_height(&self) -> bool {
    self.fill_height
  }

  /// Sets the default fill behavior
  pub fn set_fill_height(&mut self, fill: bool) {
    self.fill_height = fill;
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_priority_ordering() {
    assert!(Priority::Always > Priority::Sometimes);
    assert!(Priority::Sometimes > Priority::Never);
    assert_eq!(Priority::Never.max(Priority::Always), Priority::Always);
    assert_eq!(Priority::default(), Priority::Never);
  }

  #[test]
  fn test_column_defaults() {
    let column = ColumnConstraints::new();
    assert_eq!(column.percent_width(), -1.0);
    assert_eq!(column.min_width(), USE_COMPUTED_SIZE);
    assert_eq!(column.hgrow(), None);
    assert!(column.fill_width());
  }

  #[test]
  fn test_percent_rejects_non_finite() {
    let mut column = ColumnConstraints::new();
    assert!(column.set_percent_width(f32::INFINITY).is_err());
    assert!(column.set_percent_width(f32::NAN).is_err());
    assert!(column.set_percent_width(30.0).is_ok());
    assert_eq!(column.percent_width(), 30.0);
  }

  #[test]
  fn test_row_with_heights() {
    let row = RowConstraints::with_heights(10.0, 100.0, 200.0);
    assert_eq!(row.min_height(), 10.0);
    assert_eq!(row.pref_height(), 100.0);
    assert_eq!(row.max_height(), 200.0);
    assert!(row.fill_height());
  }
}
