/*! Captured window records. */

use super::{Bounds, WindowId};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// One on-screen window of a foreign process, as seen at capture time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct WindowRecord {
  /// Bundle identifier of the owning app, or its raw owner name when the app
  /// has no bundle identifier.
  pub owner_identifier: String,
  /// Window title, or the owning app's name for untitled windows.
  pub title: String,
  pub frame: Bounds,
  pub is_minimized: bool,
  pub is_hidden: bool,
  pub window_handle: WindowId,
}
