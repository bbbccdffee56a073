/*!
Platform abstraction traits.

These traits define the contract between core code and platform implementations.
Platform-specific code (e.g., macOS) implements these traits.
Core code only uses these traits - never platform-specific types directly.

Implementations are constructed explicitly and handed to `Deskframe`, so tests
(and embedders) can substitute their own.
*/

use std::path::PathBuf;

use crate::types::{Bounds, DeskframeResult, Point, ProcessId, Size, WindowId};

/// One raw window-server entry, before any filtering.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowInfo {
  /// Window-server window number.
  pub id: WindowId,
  /// Owning process.
  pub owner_pid: ProcessId,
  /// Owning process name as reported by the window server.
  pub owner_name: String,
  /// Window title; empty when untitled or when screen capture is not granted.
  pub title: String,
  /// Frame in global coordinates.
  pub bounds: Bounds,
  /// Window level. 0 is the normal level for document windows.
  pub layer: i32,
  /// Whether the window is currently on screen.
  pub is_onscreen: bool,
  /// Window opacity, 0.0-1.0.
  pub alpha: f64,
}

/// A running application as known to the workspace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunningApplication {
  /// Bundle identifier, absent for bare executables.
  pub bundle_id: Option<String>,
  /// Process id.
  pub pid: ProcessId,
  /// User-visible application name.
  pub localized_name: Option<String>,
}

/// Window geometry attributes that can be written through accessibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WindowAttribute {
  /// `AXPosition`.
  Position,
  /// `AXSize`.
  Size,
}

impl WindowAttribute {
  /// Accessibility attribute name.
  pub const fn as_str(self) -> &'static str {
    match self {
      Self::Position => "AXPosition",
      Self::Size => "AXSize",
    }
  }
}

/// Platform-global operations.
pub trait Platform: Send + Sync + 'static {
  /// Accessibility element handle type for this platform.
  type Handle: PlatformHandle;

  /// Check if accessibility permissions are granted. Never prompts.
  fn has_accessibility_permissions(&self) -> bool;

  /// Check if screen-content enumeration is granted. Never prompts.
  fn has_screen_capture_permissions(&self) -> bool;

  /// Ask the OS to prompt for screen-content enumeration. Does not wait for
  /// the user's answer.
  fn request_screen_capture_permissions(&self);

  /// Fetch window-server metadata for every on-screen window, in z-order.
  fn fetch_window_infos(&self) -> Vec<WindowInfo>;

  /// Bounds of the main display in global coordinates.
  fn fetch_main_display_bounds(&self) -> Bounds;

  /// Currently running applications.
  fn running_applications(&self) -> Vec<RunningApplication>;

  /// Ask the OS to launch an application by bundle identifier.
  ///
  /// Returns once the request is issued; launch completion is asynchronous.
  fn launch_application(&self, bundle_id: &str, activate: bool) -> DeskframeResult<()>;

  /// Get the root application element for a process.
  fn app_element(&self, pid: ProcessId) -> Self::Handle;

  /// The user's Desktop directory.
  fn desktop_dir(&self) -> Option<PathBuf>;

  /// Location of the Finder preferences property list.
  fn finder_preferences_path(&self) -> Option<PathBuf>;

  /// Whether Finder can be driven by script.
  fn scripting_available(&self) -> bool;

  /// Run a script addressed to Finder.
  fn run_finder_script(&self, script: &str) -> DeskframeResult<()>;

  /// Restart Finder so it reloads its preferences.
  fn restart_finder(&self) -> DeskframeResult<()>;
}

/// Per-element accessibility operations. Clone is cheap (reference-counted).
///
/// Equality is element identity: two handles are equal when they refer to the
/// same UI element.
pub trait PlatformHandle: Clone + PartialEq + Send + Sync + 'static {
  /// Owning process.
  fn pid(&self) -> ProcessId;

  /// `AXTitle`.
  fn title(&self) -> Option<String>;

  /// `AXRole`.
  fn role(&self) -> Option<String>;

  /// `AXSubrole`.
  fn subrole(&self) -> Option<String>;

  /// `AXRoleDescription`.
  fn role_description(&self) -> Option<String>;

  /// Windows of an application element. Empty for non-application elements.
  fn windows(&self) -> Vec<Self>;

  /// All children.
  fn children(&self) -> Vec<Self>;

  /// Children currently visible on screen.
  fn visible_children(&self) -> Vec<Self>;

  /// The application's main window.
  fn main_window(&self) -> Option<Self>;

  /// The application's focused window.
  fn focused_window(&self) -> Option<Self>;

  /// Current top-left position.
  fn position(&self) -> Option<Point>;

  /// Whether a geometry attribute can be written.
  fn is_settable(&self, attribute: WindowAttribute) -> bool;

  /// Move the element's top-left corner.
  fn set_position(&self, position: Point) -> DeskframeResult<()>;

  /// Resize the element.
  fn set_size(&self, size: Size) -> DeskframeResult<()>;
}
