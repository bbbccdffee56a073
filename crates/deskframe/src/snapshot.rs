/*!
Window snapshot: turn the raw window-server list into `WindowRecord`s.

Filtering is split from the platform query so it can be tested on canned
`WindowInfo` lists.
*/

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::platform::{Platform, RunningApplication, WindowInfo};
use crate::types::{ProcessId, WindowRecord};

/// Windows smaller than this in either dimension are ignored.
pub const MIN_WINDOW_DIMENSION: f64 = 50.0;

/// Windows with opacity below this count as hidden.
pub const HIDDEN_ALPHA_THRESHOLD: f64 = 0.1;

/// The normal window level for document windows.
const NORMAL_LAYER: i32 = 0;

/// Remembers whether the screen-capture prompt was already requested, so it is
/// only shown once per instance.
#[derive(Debug, Default)]
pub struct PermissionPrompt {
  requested: AtomicBool,
}

impl PermissionPrompt {
  /// A prompt that has not been shown yet.
  pub fn new() -> Self {
    Self::default()
  }

  /// Request screen-capture access unless granted or already asked.
  /// Returns whether a request was issued. Never waits for the answer.
  pub fn request_once<P: Platform>(&self, platform: &P) -> bool {
    if platform.has_screen_capture_permissions() {
      return false;
    }
    if self.requested.swap(true, Ordering::SeqCst) {
      return false;
    }
    log::debug!("Screen capture not granted; requesting (titles may be empty)");
    platform.request_screen_capture_permissions();
    true
  }
}

/// Capture every normal, reasonably sized window not owned by `exclude_pid`.
///
/// Records keep the window server's enumeration order.
pub fn capture_visible_windows<P: Platform>(
  platform: &P,
  exclude_pid: Option<ProcessId>,
  prompt: &PermissionPrompt,
) -> Vec<WindowRecord> {
  prompt.request_once(platform);
  let infos = platform.fetch_window_infos();
  let apps = platform.running_applications();
  let records = filter_window_infos(infos, &apps, exclude_pid);
  log::trace!("Captured {} windows", records.len());
  records
}

fn is_capturable(info: &WindowInfo, exclude_pid: Option<ProcessId>) -> bool {
  if exclude_pid.is_some_and(|pid| info.owner_pid == pid) {
    return false;
  }
  if info.layer != NORMAL_LAYER {
    return false;
  }
  info.bounds.w >= MIN_WINDOW_DIMENSION && info.bounds.h >= MIN_WINDOW_DIMENSION
}

/// Filter and normalize raw window-server entries.
pub(crate) fn filter_window_infos(
  infos: Vec<WindowInfo>,
  apps: &[RunningApplication],
  exclude_pid: Option<ProcessId>,
) -> Vec<WindowRecord> {
  let apps_by_pid: HashMap<ProcessId, &RunningApplication> =
    apps.iter().map(|app| (app.pid, app)).collect();

  infos
    .into_iter()
    .filter(|info| is_capturable(info, exclude_pid))
    .map(|info| {
      let app = apps_by_pid.get(&info.owner_pid);
      let owner_identifier = app
        .and_then(|app| app.bundle_id.clone())
        .unwrap_or_else(|| info.owner_name.clone());
      let title = if info.title.is_empty() {
        app
          .and_then(|app| app.localized_name.clone())
          .unwrap_or_else(|| info.owner_name.clone())
      } else {
        info.title
      };
      WindowRecord {
        owner_identifier,
        title,
        frame: info.bounds,
        is_minimized: !info.is_onscreen,
        is_hidden: info.alpha < HIDDEN_ALPHA_THRESHOLD,
        window_handle: info.id,
      }
    })
    .collect()
}
