/*! Desktop icon records. */

use super::Point;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Last known position of one Finder desktop item, keyed by file name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DesktopIconRecord {
  pub name: String,
  pub position: Point,
}

impl DesktopIconRecord {
  pub fn new(name: impl Into<String>, position: Point) -> Self {
    Self {
      name: name.into(),
      position,
    }
  }
}
