/*! In-memory platform for unit tests.

`FakePlatform` serves canned window lists, applications and element trees,
records every side effect (launches, scripts, Finder restarts, geometry writes)
and counts calls so tests can assert which collaborators were touched.
*/

use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::platform::traits::{
  Platform, PlatformHandle, RunningApplication, WindowAttribute, WindowInfo,
};
use crate::types::{Bounds, DeskframeError, DeskframeResult, Point, ProcessId, Size, WindowId};

// ============================================================================
// Elements
// ============================================================================

#[derive(Debug, Default)]
struct ElementState {
  pid: ProcessId,
  title: Option<String>,
  role: Option<String>,
  subrole: Option<String>,
  role_description: Option<String>,
  windows: Mutex<Vec<FakeElement>>,
  children: Vec<FakeElement>,
  visible_children: Vec<FakeElement>,
  main_window: Option<FakeElement>,
  focused_window: Option<FakeElement>,
  position: Mutex<Option<Point>>,
  position_settable: bool,
  size_settable: bool,
  reject_size: bool,
  positions_set: Mutex<Vec<Point>>,
  sizes_set: Mutex<Vec<Size>>,
}

/// Shared, mutable stand-in for an accessibility element.
#[derive(Debug, Clone, Default)]
pub(crate) struct FakeElement(Arc<ElementState>);

#[derive(Debug)]
pub(crate) struct FakeElementBuilder(ElementState);

impl FakeElementBuilder {
  pub(crate) fn title(mut self, title: &str) -> Self {
    self.0.title = Some(title.to_string());
    self
  }

  pub(crate) fn role(mut self, role: &str) -> Self {
    self.0.role = Some(role.to_string());
    self
  }

  pub(crate) fn subrole(mut self, subrole: &str) -> Self {
    self.0.subrole = Some(subrole.to_string());
    self
  }

  pub(crate) fn role_description(mut self, description: &str) -> Self {
    self.0.role_description = Some(description.to_string());
    self
  }

  pub(crate) fn position(self, x: f64, y: f64) -> Self {
    *self.0.position.lock() = Some(Point::new(x, y));
    self
  }

  pub(crate) fn window(self, window: FakeElement) -> Self {
    self.0.windows.lock().push(window);
    self
  }

  pub(crate) fn child(mut self, child: FakeElement) -> Self {
    self.0.children.push(child);
    self
  }

  pub(crate) fn visible_child(mut self, child: FakeElement) -> Self {
    self.0.visible_children.push(child);
    self
  }

  pub(crate) fn main_window(mut self, window: FakeElement) -> Self {
    self.0.main_window = Some(window);
    self
  }

  pub(crate) fn focused_window(mut self, window: FakeElement) -> Self {
    self.0.focused_window = Some(window);
    self
  }

  /// Geometry cannot be written at all.
  pub(crate) fn read_only(mut self) -> Self {
    self.0.position_settable = false;
    self.0.size_settable = false;
    self
  }

  /// Position is writable but size is not.
  pub(crate) fn fixed_size(mut self) -> Self {
    self.0.size_settable = false;
    self
  }

  /// Size reports settable but every write fails.
  pub(crate) fn rejecting_size(mut self) -> Self {
    self.0.reject_size = true;
    self
  }

  pub(crate) fn build(self) -> FakeElement {
    FakeElement(Arc::new(self.0))
  }
}

impl FakeElement {
  pub(crate) fn builder(pid: u32) -> FakeElementBuilder {
    FakeElementBuilder(ElementState {
      pid: ProcessId(pid),
      position_settable: true,
      size_settable: true,
      ..ElementState::default()
    })
  }

  /// Writable window with a title.
  pub(crate) fn window(pid: u32, title: &str) -> Self {
    Self::builder(pid).role("AXWindow").title(title).build()
  }

  pub(crate) fn add_window(&self, window: FakeElement) {
    self.0.windows.lock().push(window);
  }

  pub(crate) fn positions_set(&self) -> Vec<Point> {
    self.0.positions_set.lock().clone()
  }

  pub(crate) fn sizes_set(&self) -> Vec<Size> {
    self.0.sizes_set.lock().clone()
  }

  pub(crate) fn was_moved(&self) -> bool {
    !self.positions_set().is_empty() || !self.sizes_set().is_empty()
  }

  pub(crate) fn same_as(&self, other: &FakeElement) -> bool {
    Arc::ptr_eq(&self.0, &other.0)
  }
}

impl PartialEq for FakeElement {
  fn eq(&self, other: &Self) -> bool {
    self.same_as(other)
  }
}

impl PlatformHandle for FakeElement {
  fn pid(&self) -> ProcessId {
    self.0.pid
  }

  fn title(&self) -> Option<String> {
    self.0.title.clone()
  }

  fn role(&self) -> Option<String> {
    self.0.role.clone()
  }

  fn subrole(&self) -> Option<String> {
    self.0.subrole.clone()
  }

  fn role_description(&self) -> Option<String> {
    self.0.role_description.clone()
  }

  fn windows(&self) -> Vec<Self> {
    self.0.windows.lock().clone()
  }

  fn children(&self) -> Vec<Self> {
    self.0.children.clone()
  }

  fn visible_children(&self) -> Vec<Self> {
    self.0.visible_children.clone()
  }

  fn main_window(&self) -> Option<Self> {
    self.0.main_window.clone()
  }

  fn focused_window(&self) -> Option<Self> {
    self.0.focused_window.clone()
  }

  fn position(&self) -> Option<Point> {
    *self.0.position.lock()
  }

  fn is_settable(&self, attribute: WindowAttribute) -> bool {
    match attribute {
      WindowAttribute::Position => self.0.position_settable,
      WindowAttribute::Size => self.0.size_settable,
    }
  }

  fn set_position(&self, position: Point) -> DeskframeResult<()> {
    if !self.0.position_settable {
      return Err(DeskframeError::AttributeNotSettable {
        attribute: WindowAttribute::Position.as_str(),
        pid: self.0.pid,
      });
    }
    self.0.positions_set.lock().push(position);
    *self.0.position.lock() = Some(position);
    Ok(())
  }

  fn set_size(&self, size: Size) -> DeskframeResult<()> {
    if !self.0.size_settable || self.0.reject_size {
      return Err(DeskframeError::SetAttributeFailed {
        attribute: WindowAttribute::Size.as_str(),
        reason: "rejected".to_string(),
      });
    }
    self.0.sizes_set.lock().push(size);
    Ok(())
  }
}

// ============================================================================
// Platform
// ============================================================================

/// How often each collaborator was called.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct CallCounts {
  pub(crate) window_infos: usize,
  pub(crate) app_element: usize,
  pub(crate) accessibility_checks: usize,
  pub(crate) screen_capture_requests: usize,
  pub(crate) running_applications: usize,
}

#[derive(Debug, Default)]
struct PlatformState {
  windows: Vec<WindowInfo>,
  display: Bounds,
  running: Vec<RunningApplication>,
  launchable: BTreeMap<String, RunningApplication>,
  failing_launches: BTreeSet<String>,
  elements: BTreeMap<ProcessId, FakeElement>,
  accessibility: bool,
  screen_capture: bool,
  scripting: bool,
  failing_scripts: bool,
  panicking_app_queries: bool,
  desktop_dir: Option<PathBuf>,
  finder_preferences: Option<PathBuf>,
  launched: Vec<(String, bool)>,
  scripts: Vec<String>,
  finder_restarts: usize,
  calls: CallCounts,
}

/// Scriptable `Platform` for tests.
#[derive(Debug, Default)]
pub(crate) struct FakePlatform {
  state: Mutex<PlatformState>,
}

impl FakePlatform {
  /// Trusted, screen capture granted, 1920x1080 display, scripting off.
  pub(crate) fn new() -> Self {
    let platform = Self::default();
    {
      let mut state = platform.state.lock();
      state.accessibility = true;
      state.screen_capture = true;
      state.display = Bounds::new(0.0, 0.0, 1920.0, 1080.0);
    }
    platform
  }

  pub(crate) fn with_windows(self, windows: Vec<WindowInfo>) -> Self {
    self.state.lock().windows = windows;
    self
  }

  pub(crate) fn with_display(self, display: Bounds) -> Self {
    self.state.lock().display = display;
    self
  }

  /// A running application and its root element.
  pub(crate) fn with_app(self, app: RunningApplication, element: FakeElement) -> Self {
    {
      let mut state = self.state.lock();
      state.elements.insert(app.pid, element);
      state.running.push(app);
    }
    self
  }

  /// An installed application that starts running once launched.
  pub(crate) fn with_launchable(self, app: RunningApplication, element: FakeElement) -> Self {
    {
      let mut state = self.state.lock();
      state.elements.insert(app.pid, element);
      if let Some(bundle_id) = app.bundle_id.clone() {
        state.launchable.insert(bundle_id, app);
      }
    }
    self
  }

  pub(crate) fn with_failing_launch(self, bundle_id: &str) -> Self {
    self.state.lock().failing_launches.insert(bundle_id.to_string());
    self
  }

  pub(crate) fn with_accessibility(self, trusted: bool) -> Self {
    self.state.lock().accessibility = trusted;
    self
  }

  pub(crate) fn with_screen_capture(self, granted: bool) -> Self {
    self.state.lock().screen_capture = granted;
    self
  }

  pub(crate) fn with_scripting(self, available: bool) -> Self {
    self.state.lock().scripting = available;
    self
  }

  pub(crate) fn with_failing_scripts(self) -> Self {
    self.state.lock().failing_scripts = true;
    self
  }

  /// `running_applications` panics, as a crashing collaborator would.
  pub(crate) fn with_panicking_app_queries(self) -> Self {
    self.state.lock().panicking_app_queries = true;
    self
  }

  pub(crate) fn with_desktop_dir(self, dir: PathBuf) -> Self {
    self.state.lock().desktop_dir = Some(dir);
    self
  }

  pub(crate) fn with_finder_preferences(self, path: PathBuf) -> Self {
    self.state.lock().finder_preferences = Some(path);
    self
  }

  /// Bundle ids passed to `launch_application`, with their activate flag.
  pub(crate) fn launched(&self) -> Vec<(String, bool)> {
    self.state.lock().launched.clone()
  }

  pub(crate) fn scripts(&self) -> Vec<String> {
    self.state.lock().scripts.clone()
  }

  pub(crate) fn finder_restarts(&self) -> usize {
    self.state.lock().finder_restarts
  }

  pub(crate) fn calls(&self) -> CallCounts {
    self.state.lock().calls
  }
}

impl Platform for FakePlatform {
  type Handle = FakeElement;

  fn has_accessibility_permissions(&self) -> bool {
    let mut state = self.state.lock();
    state.calls.accessibility_checks += 1;
    state.accessibility
  }

  fn has_screen_capture_permissions(&self) -> bool {
    self.state.lock().screen_capture
  }

  fn request_screen_capture_permissions(&self) {
    self.state.lock().calls.screen_capture_requests += 1;
  }

  fn fetch_window_infos(&self) -> Vec<WindowInfo> {
    let mut state = self.state.lock();
    state.calls.window_infos += 1;
    state.windows.clone()
  }

  fn fetch_main_display_bounds(&self) -> Bounds {
    self.state.lock().display
  }

  fn running_applications(&self) -> Vec<RunningApplication> {
    let mut state = self.state.lock();
    state.calls.running_applications += 1;
    if state.panicking_app_queries {
      drop(state);
      panic!("application query failed");
    }
    state.running.clone()
  }

  fn launch_application(&self, bundle_id: &str, activate: bool) -> DeskframeResult<()> {
    let mut state = self.state.lock();
    state.launched.push((bundle_id.to_string(), activate));
    if state.failing_launches.contains(bundle_id) {
      return Err(DeskframeError::LaunchFailed {
        bundle_id: bundle_id.to_string(),
        reason: "not installed".to_string(),
      });
    }
    match state.launchable.remove(bundle_id) {
      Some(app) => {
        state.running.push(app);
        Ok(())
      }
      None => Err(DeskframeError::ApplicationNotFound(bundle_id.to_string())),
    }
  }

  fn app_element(&self, pid: ProcessId) -> Self::Handle {
    let mut state = self.state.lock();
    state.calls.app_element += 1;
    state
      .elements
      .get(&pid)
      .cloned()
      .unwrap_or_else(|| FakeElement::builder(pid.0).role("AXApplication").build())
  }

  fn desktop_dir(&self) -> Option<PathBuf> {
    self.state.lock().desktop_dir.clone()
  }

  fn finder_preferences_path(&self) -> Option<PathBuf> {
    self.state.lock().finder_preferences.clone()
  }

  fn scripting_available(&self) -> bool {
    self.state.lock().scripting
  }

  fn run_finder_script(&self, script: &str) -> DeskframeResult<()> {
    let mut state = self.state.lock();
    state.scripts.push(script.to_string());
    if state.failing_scripts {
      return Err(DeskframeError::Script("execution error".to_string()));
    }
    Ok(())
  }

  fn restart_finder(&self) -> DeskframeResult<()> {
    self.state.lock().finder_restarts += 1;
    Ok(())
  }
}

// ============================================================================
// Fixtures
// ============================================================================

/// Normal-layer, on-screen, opaque window.
pub(crate) fn window_info(id: u32, pid: u32, owner: &str, title: &str, bounds: Bounds) -> WindowInfo {
  WindowInfo {
    id: WindowId(id),
    owner_pid: ProcessId(pid),
    owner_name: owner.to_string(),
    title: title.to_string(),
    bounds,
    layer: 0,
    is_onscreen: true,
    alpha: 1.0,
  }
}

pub(crate) fn running_app(bundle_id: &str, pid: u32, name: &str) -> RunningApplication {
  RunningApplication {
    bundle_id: Some(bundle_id.to_string()),
    pid: ProcessId(pid),
    localized_name: Some(name.to_string()),
  }
}
