/*! Error types for deskframe operations. */

use super::ProcessId;

/// Errors that can occur during deskframe operations.
///
/// Most capture and restore paths degrade instead of failing; these surface
/// where a caller can act on them (store persistence, platform primitives).
#[derive(Debug, thiserror::Error)]
pub enum DeskframeError {
  #[error("No running application for '{0}'")]
  ApplicationNotFound(String),

  #[error("Failed to launch '{bundle_id}': {reason}")]
  LaunchFailed { bundle_id: String, reason: String },

  #[error("Attribute '{attribute}' is not settable on window of process {pid}")]
  AttributeNotSettable {
    attribute: &'static str,
    pid: ProcessId,
  },

  #[error("Setting '{attribute}' failed: {reason}")]
  SetAttributeFailed {
    attribute: &'static str,
    reason: String,
  },

  #[error("Layout encoding failed: {0}")]
  Encode(#[from] serde_json::Error),

  #[error("I/O error: {0}")]
  Io(#[from] std::io::Error),

  #[error("Finder preferences error: {0}")]
  FinderPreferences(#[from] plist::Error),

  #[error("Finder script failed: {0}")]
  Script(String),

  #[error("No layout at index {index} (store has {len})")]
  InvalidLayoutIndex { index: usize, len: usize },

  #[error("Operation not supported: {0}")]
  NotSupported(String),
}

/// Result type for deskframe operations.
pub type DeskframeResult<T> = Result<T, DeskframeError>;
