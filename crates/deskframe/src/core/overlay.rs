/*! Safety timeout for the "applying layout" overlay. */

use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Runs `on_timeout` unless `finish` is called (or the watchdog is dropped)
/// within the timeout.
pub(crate) struct OverlayWatchdog {
  done: Option<mpsc::Sender<()>>,
  thread: Option<JoinHandle<bool>>,
}

impl std::fmt::Debug for OverlayWatchdog {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("OverlayWatchdog").finish_non_exhaustive()
  }
}

impl OverlayWatchdog {
  pub(crate) fn start(timeout: Duration, on_timeout: impl FnOnce() + Send + 'static) -> Self {
    let (done, rx) = mpsc::channel::<()>();
    let thread = thread::Builder::new()
      .name("deskframe-overlay-watchdog".to_string())
      .spawn(move || match rx.recv_timeout(timeout) {
        Err(RecvTimeoutError::Timeout) => {
          on_timeout();
          true
        }
        // Completion signalled or sender dropped.
        Ok(()) | Err(RecvTimeoutError::Disconnected) => false,
      });

    let thread = match thread {
      Ok(thread) => Some(thread),
      Err(e) => {
        log::warn!("Could not start overlay watchdog: {e}");
        None
      }
    };
    Self {
      done: Some(done),
      thread,
    }
  }

  /// Cancel the watchdog. Returns whether it had already fired.
  pub(crate) fn finish(mut self) -> bool {
    self.stop()
  }

  fn stop(&mut self) -> bool {
    drop(self.done.take());
    self
      .thread
      .take()
      .is_some_and(|thread| thread.join().unwrap_or(false))
  }
}

impl Drop for OverlayWatchdog {
  fn drop(&mut self) {
    self.stop();
  }
}
