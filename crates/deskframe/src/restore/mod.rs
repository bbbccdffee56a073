/*!
Layout restore engine.

Restoring a layout:

1. launch apps the layout references that are not running (without
   activating them);
2. wait until each launched app exposes a window, bounded by a timeout;
3. for each saved window: find its app, pick a live window with
   `match_window` (never one an earlier record already took), and move it;
4. put desktop icons back when the layout carries them.

Everything runs sequentially on the calling thread. Failures are logged and
the restore moves on to the next window.
*/

mod matcher;

use std::collections::BTreeSet;
use std::thread;
use std::time::{Duration, Instant};

use serde::Serialize;

pub(crate) use matcher::ClaimedWindows;
pub use matcher::{match_unclaimed_window, match_window, MatchKind};

use crate::icons::{restore_desktop_icons, IconRestoreReport};
use crate::platform::{Platform, PlatformHandle, RunningApplication, WindowAttribute};
use crate::types::{Bounds, DeskframeError, DeskframeResult, Layout, ProcessId, WindowRecord};

/// Knobs for a restore run.
#[derive(Debug, Clone, Copy)]
pub struct RestoreOptions {
  /// Windows of this process are never touched.
  pub exclude_pid: Option<ProcessId>,
  /// Upper bound on waiting for launched apps.
  pub settle_timeout: Duration,
  /// Delay between readiness checks.
  pub poll_interval: Duration,
}

impl Default for RestoreOptions {
  fn default() -> Self {
    Self {
      exclude_pid: None,
      settle_timeout: Duration::from_secs(2),
      poll_interval: Duration::from_millis(100),
    }
  }
}

/// What a restore run did.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RestoreReport {
  /// Bundle ids whose launch request succeeded.
  pub launched: Vec<String>,
  /// Windows moved to their saved frame.
  pub moved: usize,
  /// Windows with no app, no match, or that refused the move.
  pub skipped: usize,
  /// Desktop icon restore, when the layout carried icons.
  pub icons: Option<IconRestoreReport>,
}

/// Move and resize `window` to `frame`. Both attributes must be settable;
/// nothing is written otherwise. A failure after the position write is not
/// rolled back.
pub fn move_window<H: PlatformHandle>(window: &H, frame: Bounds) -> DeskframeResult<()> {
  for attribute in [WindowAttribute::Position, WindowAttribute::Size] {
    if !window.is_settable(attribute) {
      return Err(DeskframeError::AttributeNotSettable {
        attribute: attribute.as_str(),
        pid: window.pid(),
      });
    }
  }
  window.set_position(frame.origin())?;
  window.set_size(frame.size())?;
  Ok(())
}

/// Running app for a saved owner identifier: by bundle id, then by name.
pub(crate) fn resolve_app<'a>(
  apps: &'a [RunningApplication],
  owner_identifier: &str,
) -> Option<&'a RunningApplication> {
  apps
    .iter()
    .find(|app| app.bundle_id.as_deref() == Some(owner_identifier))
    .or_else(|| {
      apps
        .iter()
        .find(|app| app.localized_name.as_deref() == Some(owner_identifier))
    })
}

/// Owner identifiers referenced by `windows` with no running app, in first
/// appearance order.
fn missing_apps(windows: &[WindowRecord], apps: &[RunningApplication]) -> Vec<String> {
  let mut seen = BTreeSet::new();
  windows
    .iter()
    .map(|w| w.owner_identifier.as_str())
    .filter(|id| resolve_app(apps, id).is_none())
    .filter(|id| seen.insert(*id))
    .map(ToString::to_string)
    .collect()
}

/// Launch every missing app without activating it. Returns the ids whose
/// launch request was accepted.
pub fn launch_missing_apps<P: Platform>(platform: &P, windows: &[WindowRecord]) -> Vec<String> {
  let apps = platform.running_applications();
  missing_apps(windows, &apps)
    .into_iter()
    .filter(|bundle_id| match platform.launch_application(bundle_id, false) {
      Ok(()) => {
        log::debug!("Launched {bundle_id}");
        true
      }
      Err(e) => {
        log::warn!("Could not launch {bundle_id}: {e}");
        false
      }
    })
    .collect()
}

fn is_ready<P: Platform>(platform: &P, apps: &[RunningApplication], bundle_id: &str) -> bool {
  resolve_app(apps, bundle_id).is_some_and(|app| !platform.app_element(app.pid).windows().is_empty())
}

/// Poll until every app in `launched` has at least one window, or `timeout`
/// passes. Returns whether all became ready.
pub fn wait_until_ready<P: Platform>(
  platform: &P,
  launched: &[String],
  timeout: Duration,
  poll_interval: Duration,
) -> bool {
  if launched.is_empty() {
    return true;
  }
  let deadline = Instant::now() + timeout;
  let mut pending: Vec<&str> = launched.iter().map(String::as_str).collect();

  loop {
    let apps = platform.running_applications();
    pending.retain(|bundle_id| !is_ready(platform, &apps, bundle_id));
    if pending.is_empty() {
      return true;
    }
    let now = Instant::now();
    if now >= deadline {
      log::debug!("Gave up waiting for {pending:?}");
      return false;
    }
    thread::sleep(poll_interval.min(deadline - now));
  }
}

/// Move the window saved in `record`. Returns whether it was moved.
fn restore_window<P: Platform>(
  platform: &P,
  apps: &[RunningApplication],
  claims: &mut ClaimedWindows<P::Handle>,
  record: &WindowRecord,
  exclude_pid: Option<ProcessId>,
) -> bool {
  let Some(app) = resolve_app(apps, &record.owner_identifier) else {
    log::debug!("No running app for {}", record.owner_identifier);
    return false;
  };
  if exclude_pid.is_some_and(|pid| pid == app.pid) {
    return false;
  }
  let element = platform.app_element(app.pid);
  let Some((window, kind)) = claims.claim(&element, &record.title) else {
    log::debug!("No window of {} to match '{}'", record.owner_identifier, record.title);
    return false;
  };
  match move_window(&window, record.frame) {
    Ok(()) => {
      log::trace!("Moved '{}' ({kind:?})", record.title);
      true
    }
    Err(e) => {
      log::debug!("Skipping '{}': {e}", record.title);
      false
    }
  }
}

/// Restore `layout` synchronously.
pub fn apply_layout<P: Platform>(platform: &P, layout: &Layout, options: &RestoreOptions) -> RestoreReport {
  let mut report = RestoreReport {
    launched: launch_missing_apps(platform, &layout.windows),
    ..RestoreReport::default()
  };
  if !report.launched.is_empty() {
    wait_until_ready(platform, &report.launched, options.settle_timeout, options.poll_interval);
  }

  let apps = platform.running_applications();
  let mut claims = ClaimedWindows::new();
  for record in &layout.windows {
    if restore_window(platform, &apps, &mut claims, record, options.exclude_pid) {
      report.moved += 1;
    } else {
      report.skipped += 1;
    }
  }

  let icons = layout.icons_to_restore();
  if !icons.is_empty() {
    report.icons = Some(restore_desktop_icons(platform, icons));
  }

  log::debug!(
    "Restored '{}': {} moved, {} skipped",
    layout.name,
    report.moved,
    report.skipped
  );
  report
}
