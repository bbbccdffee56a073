/*! Inert platform for non-macOS targets. */

use std::path::PathBuf;

use crate::platform::traits::{
  Platform, PlatformHandle, RunningApplication, WindowAttribute, WindowInfo,
};
use crate::types::{Bounds, DeskframeError, DeskframeResult, Point, ProcessId, Size};

/// Platform that sees nothing and can change nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnsupportedPlatform;

/// Element handle of `UnsupportedPlatform`; has no attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnsupportedHandle(ProcessId);

fn unsupported<T>(what: &str) -> DeskframeResult<T> {
  Err(DeskframeError::NotSupported(format!(
    "{what} is only available on macOS"
  )))
}

impl Platform for UnsupportedPlatform {
  type Handle = UnsupportedHandle;

  fn has_accessibility_permissions(&self) -> bool {
    false
  }

  fn has_screen_capture_permissions(&self) -> bool {
    false
  }

  fn request_screen_capture_permissions(&self) {}

  fn fetch_window_infos(&self) -> Vec<WindowInfo> {
    Vec::new()
  }

  fn fetch_main_display_bounds(&self) -> Bounds {
    Bounds::default()
  }

  fn running_applications(&self) -> Vec<RunningApplication> {
    Vec::new()
  }

  fn launch_application(&self, _bundle_id: &str, _activate: bool) -> DeskframeResult<()> {
    unsupported("launching applications")
  }

  fn app_element(&self, pid: ProcessId) -> Self::Handle {
    UnsupportedHandle(pid)
  }

  fn desktop_dir(&self) -> Option<PathBuf> {
    directories::UserDirs::new().and_then(|dirs| dirs.desktop_dir().map(PathBuf::from))
  }

  fn finder_preferences_path(&self) -> Option<PathBuf> {
    None
  }

  fn scripting_available(&self) -> bool {
    false
  }

  fn run_finder_script(&self, _script: &str) -> DeskframeResult<()> {
    unsupported("Finder scripting")
  }

  fn restart_finder(&self) -> DeskframeResult<()> {
    unsupported("restarting Finder")
  }
}

impl PlatformHandle for UnsupportedHandle {
  fn pid(&self) -> ProcessId {
    self.0
  }

  fn title(&self) -> Option<String> {
    None
  }

  fn role(&self) -> Option<String> {
    None
  }

  fn subrole(&self) -> Option<String> {
    None
  }

  fn role_description(&self) -> Option<String> {
    None
  }

  fn windows(&self) -> Vec<Self> {
    Vec::new()
  }

  fn children(&self) -> Vec<Self> {
    Vec::new()
  }

  fn visible_children(&self) -> Vec<Self> {
    Vec::new()
  }

  fn main_window(&self) -> Option<Self> {
    None
  }

  fn focused_window(&self) -> Option<Self> {
    None
  }

  fn position(&self) -> Option<Point> {
    None
  }

  fn is_settable(&self, _attribute: WindowAttribute) -> bool {
    false
  }

  fn set_position(&self, _position: Point) -> DeskframeResult<()> {
    unsupported("moving windows")
  }

  fn set_size(&self, _size: Size) -> DeskframeResult<()> {
    unsupported("resizing windows")
  }
}
