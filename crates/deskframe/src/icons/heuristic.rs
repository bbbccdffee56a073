/*! Recognize Finder desktop icons that show up as windows in the window list. */

use std::collections::BTreeSet;

use super::{FINDER_BUNDLE_ID, FINDER_NAME};
use crate::types::WindowRecord;

/// Smallest icon side, in points.
pub const MIN_ICON_SIDE: f64 = 24.0;
/// Largest icon side, in points.
pub const MAX_ICON_SIDE: f64 = 260.0;
/// Icons are roughly square; labels make them at most this much wider than tall.
pub const MAX_ASPECT_RATIO: f64 = 1.8;

/// Whether `record` is a Finder window that is really a desktop icon.
pub fn classify_as_icon_window(record: &WindowRecord, known_names: &BTreeSet<String>) -> bool {
  let owned_by_finder =
    record.owner_identifier == FINDER_BUNDLE_ID || record.owner_identifier == FINDER_NAME;
  if !owned_by_finder || !known_names.contains(&record.title) {
    return false;
  }
  let (w, h) = (record.frame.w, record.frame.h);
  let side = MIN_ICON_SIDE..=MAX_ICON_SIDE;
  side.contains(&w) && side.contains(&h) && w / h <= MAX_ASPECT_RATIO
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::types::{Bounds, WindowId};

  fn record(owner: &str, title: &str, w: f64, h: f64) -> WindowRecord {
    WindowRecord {
      owner_identifier: owner.to_string(),
      title: title.to_string(),
      frame: Bounds::new(1500.0, 40.0, w, h),
      is_minimized: false,
      is_hidden: false,
      window_handle: WindowId(7),
    }
  }

  fn known() -> BTreeSet<String> {
    ["report.pdf".to_string()].into_iter().collect()
  }

  #[test]
  fn accepts_finder_icon_sized_window() {
    assert!(classify_as_icon_window(&record(FINDER_BUNDLE_ID, "report.pdf", 80.0, 90.0), &known()));
    assert!(classify_as_icon_window(&record(FINDER_NAME, "report.pdf", 24.0, 24.0), &known()));
  }

  #[test]
  fn rejects_other_owners() {
    assert!(!classify_as_icon_window(&record("com.apple.Preview", "report.pdf", 80.0, 90.0), &known()));
  }

  #[test]
  fn rejects_unknown_titles() {
    assert!(!classify_as_icon_window(&record(FINDER_BUNDLE_ID, "Downloads", 80.0, 90.0), &known()));
  }

  #[test]
  fn rejects_out_of_range_sizes() {
    assert!(!classify_as_icon_window(&record(FINDER_BUNDLE_ID, "report.pdf", 23.9, 80.0), &known()));
    assert!(!classify_as_icon_window(&record(FINDER_BUNDLE_ID, "report.pdf", 100.0, 261.0), &known()));
  }

  #[test]
  fn rejects_wide_windows() {
    assert!(classify_as_icon_window(&record(FINDER_BUNDLE_ID, "report.pdf", 180.0, 100.0), &known()));
    assert!(!classify_as_icon_window(&record(FINDER_BUNDLE_ID, "report.pdf", 181.0, 100.0), &known()));
  }
}
