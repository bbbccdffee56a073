/*!
Restoring layouts and applying grids.

A restore runs on its own worker thread and reports progress as events:
`RestoreStarted` when the overlay should appear, `RestoreFinished` when it
should go away (also after a panic), and `OverlayTimedOut` if the restore is
still running when the overlay timeout passes. Concurrent restores are not serialized.
*/

use std::panic::{self, AssertUnwindSafe};
use std::thread::{self, JoinHandle};

use super::overlay::OverlayWatchdog;
use super::{emit, Deskframe};
use crate::grid::{self, GridPlacement};
use crate::platform::Platform;
use crate::restore::{self, ClaimedWindows, RestoreOptions, RestoreReport};
use crate::types::{DeskframeError, DeskframeResult, Event, Layout};

/// Handle to a running restore. Dropping it lets the restore continue in the
/// background.
#[derive(Debug)]
#[must_use = "dropping the handle detaches the restore; call join() to wait for it"]
pub struct RestoreHandle {
  thread: JoinHandle<RestoreReport>,
}

impl RestoreHandle {
  /// Wait for the restore to finish. `None` if the worker panicked.
  pub fn join(self) -> Option<RestoreReport> {
    self.thread.join().ok()
  }

  /// Whether the restore thread has exited.
  pub fn is_finished(&self) -> bool {
    self.thread.is_finished()
  }
}

impl<P: Platform> Deskframe<P> {
  fn restore_options(&self) -> RestoreOptions {
    RestoreOptions {
      exclude_pid: self.exclude_pid,
      settle_timeout: self.config.settle_timeout,
      poll_interval: self.config.poll_interval,
    }
  }

  /// Restore `layout` on a background thread.
  pub fn restore_layout(&self, layout: Layout) -> DeskframeResult<RestoreHandle> {
    let platform = std::sync::Arc::clone(&self.platform);
    let tx = self.events_tx.clone();
    let options = self.restore_options();
    let overlay_timeout = self.config.overlay_timeout;

    let thread = thread::Builder::new()
      .name("deskframe-restore".to_string())
      .spawn(move || {
        let name = layout.name.clone();
        emit(&tx, Event::RestoreStarted { name: name.clone() });

        let watchdog_tx = tx.clone();
        let watchdog_name = name.clone();
        let watchdog = OverlayWatchdog::start(overlay_timeout, move || {
          log::warn!("Restore of '{watchdog_name}' still running; dismissing overlay");
          emit(&watchdog_tx, Event::OverlayTimedOut { name: watchdog_name });
        });

        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
          restore::apply_layout(&*platform, &layout, &options)
        }));

        watchdog.finish();
        emit(&tx, Event::RestoreFinished { name: name.clone() });
        match outcome {
          Ok(report) => report,
          Err(payload) => {
            log::error!("Restore of '{name}' panicked");
            panic::resume_unwind(payload)
          }
        }
      })?;

    Ok(RestoreHandle { thread })
  }

  /// Restore the saved layout at `index` on a background thread.
  pub fn restore_saved(&self, index: usize) -> DeskframeResult<RestoreHandle> {
    let layout = self.layout(index).ok_or_else(|| DeskframeError::InvalidLayoutIndex {
      index,
      len: self.store.read().len(),
    })?;
    self.restore_layout(layout)
  }

  /// Arrange the currently visible windows in a grid on the main display.
  /// Returns how many windows were moved.
  pub fn apply_grid(&self, placement: &GridPlacement) -> usize {
    let windows = self.windows();
    let screen = self.platform.fetch_main_display_bounds();
    let frames = grid::frames_for_captured(windows.len(), screen, placement);
    let apps = self.platform.running_applications();

    let mut claims = ClaimedWindows::new();
    let mut moved = 0;
    for (record, frame) in windows.iter().zip(frames) {
      let Some(app) = restore::resolve_app(&apps, &record.owner_identifier) else {
        continue;
      };
      let element = self.platform.app_element(app.pid);
      let Some((window, _)) = claims.claim(&element, &record.title) else {
        continue;
      };
      match restore::move_window(&window, frame) {
        Ok(()) => moved += 1,
        Err(e) => log::debug!("Grid: skipping '{}': {e}", record.title),
      }
    }

    self.emit(Event::GridApplied { count: moved });
    moved
  }
}
