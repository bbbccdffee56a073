/*! Events broadcast by a `Deskframe` instance. */

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Notifications for interested UI parties (list views, the "applying layout"
/// overlay, status indicators).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
#[ts(export)]
pub enum Event {
  /// A layout was appended to the store.
  LayoutSaved { index: usize, name: String },
  /// A layout was removed from the store.
  LayoutDeleted { index: usize, name: String },
  /// A layout was replaced in place.
  LayoutReplaced { index: usize, name: String },
  /// A restore began; show the overlay.
  RestoreStarted { name: String },
  /// A restore completed; dismiss the overlay.
  RestoreFinished { name: String },
  /// The overlay safety timeout fired before the restore completed.
  OverlayTimedOut { name: String },
  /// A grid arrangement was applied to `count` windows.
  GridApplied { count: usize },
}
