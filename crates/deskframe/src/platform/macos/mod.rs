/*!
macOS platform implementation.

Implements the platform traits defined in `platform/traits.rs`.
All macOS-specific code (AXUIElement, CoreFoundation, AppKit) stays within this module.
*/

// === Internal modules ===
mod cf_utils;
mod finder;
mod handles;
mod util;
mod window_list;
mod workspace;

pub use handles::ElementHandle;

// === Trait Implementations ===

use std::path::PathBuf;

use crate::platform::traits::{
  Platform, PlatformHandle, RunningApplication, WindowAttribute, WindowInfo,
};
use crate::types::{Bounds, DeskframeResult, Point, ProcessId, Size};

/// Finder's preferences, relative to the home directory.
const FINDER_PREFERENCES: &str = "Library/Preferences/com.apple.finder.plist";

/// macOS platform implementation.
#[derive(Debug, Default, Clone, Copy)]
pub struct MacPlatform;

impl Platform for MacPlatform {
  type Handle = ElementHandle;

  fn has_accessibility_permissions(&self) -> bool {
    util::has_accessibility_permissions()
  }

  fn has_screen_capture_permissions(&self) -> bool {
    util::has_screen_capture_permissions()
  }

  fn request_screen_capture_permissions(&self) {
    util::request_screen_capture_permissions();
  }

  fn fetch_window_infos(&self) -> Vec<WindowInfo> {
    window_list::enumerate_windows()
  }

  fn fetch_main_display_bounds(&self) -> Bounds {
    util::main_display_bounds()
  }

  fn running_applications(&self) -> Vec<RunningApplication> {
    workspace::running_applications()
  }

  fn launch_application(&self, bundle_id: &str, activate: bool) -> DeskframeResult<()> {
    workspace::launch_application(bundle_id, activate)
  }

  fn app_element(&self, pid: ProcessId) -> Self::Handle {
    ElementHandle::new(util::app_element(pid))
  }

  fn desktop_dir(&self) -> Option<PathBuf> {
    directories::UserDirs::new().and_then(|dirs| dirs.desktop_dir().map(PathBuf::from))
  }

  fn finder_preferences_path(&self) -> Option<PathBuf> {
    directories::BaseDirs::new().map(|dirs| dirs.home_dir().join(FINDER_PREFERENCES))
  }

  fn scripting_available(&self) -> bool {
    finder::scripting_available()
  }

  fn run_finder_script(&self, script: &str) -> DeskframeResult<()> {
    finder::run_script(script)
  }

  fn restart_finder(&self) -> DeskframeResult<()> {
    finder::restart_finder()
  }
}

impl PlatformHandle for ElementHandle {
  fn pid(&self) -> ProcessId {
    self.process_id()
  }

  fn title(&self) -> Option<String> {
    self.get_string("AXTitle")
  }

  fn role(&self) -> Option<String> {
    self.get_string("AXRole")
  }

  fn subrole(&self) -> Option<String> {
    self.get_string("AXSubrole")
  }

  fn role_description(&self) -> Option<String> {
    self.get_string("AXRoleDescription")
  }

  fn windows(&self) -> Vec<Self> {
    self.get_elements("AXWindows")
  }

  fn children(&self) -> Vec<Self> {
    self.get_elements("AXChildren")
  }

  fn visible_children(&self) -> Vec<Self> {
    self.get_elements("AXVisibleChildren")
  }

  fn main_window(&self) -> Option<Self> {
    self.get_element("AXMainWindow")
  }

  fn focused_window(&self) -> Option<Self> {
    self.get_element("AXFocusedWindow")
  }

  fn position(&self) -> Option<Point> {
    self.get_position()
  }

  fn is_settable(&self, attribute: WindowAttribute) -> bool {
    self.attribute_settable(attribute)
  }

  fn set_position(&self, position: Point) -> DeskframeResult<()> {
    self.set_point(position)
  }

  fn set_size(&self, size: Size) -> DeskframeResult<()> {
    self.set_extent(size)
  }
}
