/*!
Core Deskframe instance: owns the platform, the layout store and event
broadcasting.

# Module Structure

- `mod.rs` - Deskframe struct, builder, construction, events
- `layouts.rs` - capture and layout store operations
- `apply.rs` - restoring layouts and applying grids
- `overlay.rs` - watchdog that force-dismisses the "applying layout" overlay

# Example

```ignore
use async_broadcast::RecvError;
use deskframe::{Deskframe, Event};

let deskframe = Deskframe::new()?;
let layout = deskframe.capture_current_layout("Work", true);
let index = deskframe.save_layout(layout)?;

let mut events = deskframe.subscribe();
let restore = deskframe.restore_saved(index)?;
loop {
    match events.recv().await {
        Ok(Event::RestoreFinished { .. }) | Err(RecvError::Closed) => break,
        Ok(_) | Err(RecvError::Overflowed(_)) => continue,
    }
}
```
*/

mod apply;
mod layouts;
mod overlay;

pub use apply::RestoreHandle;

use std::sync::Arc;

use async_broadcast::{InactiveReceiver, Receiver, Sender};
use parking_lot::RwLock;

use crate::config::Config;
use crate::platform::{CurrentPlatform, Platform};
use crate::snapshot::PermissionPrompt;
use crate::store::{FilePreferences, LayoutStore, Preferences};
use crate::types::{DeskframeResult, Event, ProcessId};

/// Main Deskframe instance.
///
/// Clone is cheap (Arc bumps) - share freely across threads.
pub struct Deskframe<P: Platform = CurrentPlatform> {
  platform: Arc<P>,
  store: Arc<RwLock<LayoutStore>>,
  prompt: Arc<PermissionPrompt>,
  config: Config,
  exclude_pid: Option<ProcessId>,
  events_tx: Sender<Event>,
  events_keepalive: InactiveReceiver<Event>,
}

impl<P: Platform> Clone for Deskframe<P> {
  fn clone(&self) -> Self {
    Self {
      platform: Arc::clone(&self.platform),
      store: Arc::clone(&self.store),
      prompt: Arc::clone(&self.prompt),
      config: self.config,
      exclude_pid: self.exclude_pid,
      events_tx: self.events_tx.clone(),
      events_keepalive: self.events_keepalive.clone(),
    }
  }
}

impl<P: Platform> std::fmt::Debug for Deskframe<P> {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Deskframe")
      .field("exclude_pid", &self.exclude_pid)
      .field("config", &self.config)
      .finish_non_exhaustive()
  }
}

/// Builder for configuring a Deskframe instance.
///
/// # Example
///
/// ```ignore
/// let deskframe = Deskframe::builder()
///     .preferences(Arc::new(FilePreferences::new("/tmp/deskframe")))
///     .settle_timeout(Duration::from_secs(4))
///     .build()?;
/// ```
#[derive(Clone)]
#[must_use = "Builder does nothing until .build() is called"]
pub struct DeskframeBuilder {
  config: Config,
  exclude_pid: Option<ProcessId>,
  preferences: Option<Arc<dyn Preferences>>,
}

impl Default for DeskframeBuilder {
  fn default() -> Self {
    Self {
      config: Config::default(),
      exclude_pid: Some(ProcessId::current()),
      preferences: None,
    }
  }
}

impl std::fmt::Debug for DeskframeBuilder {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("DeskframeBuilder")
      .field("config", &self.config)
      .field("exclude_pid", &self.exclude_pid)
      .field("custom_preferences", &self.preferences.is_some())
      .finish()
  }
}

impl DeskframeBuilder {
  /// Replace the whole configuration.
  pub fn config(mut self, config: Config) -> Self {
    self.config = config;
    self
  }

  /// Never capture or move windows of this process. Default: the current
  /// process.
  pub fn exclude_pid(mut self, pid: u32) -> Self {
    self.exclude_pid = Some(ProcessId(pid));
    self
  }

  /// Capture and move windows of every process, including this one.
  pub fn include_all_processes(mut self) -> Self {
    self.exclude_pid = None;
    self
  }

  /// Upper bound on waiting for launched apps. Default: 2s.
  pub fn settle_timeout(mut self, timeout: std::time::Duration) -> Self {
    self.config.settle_timeout = timeout;
    self
  }

  /// Readiness polling interval. Default: 100ms.
  pub fn poll_interval(mut self, interval: std::time::Duration) -> Self {
    self.config.poll_interval = interval;
    self
  }

  /// Overlay safety timeout. Default: 20s.
  pub fn overlay_timeout(mut self, timeout: std::time::Duration) -> Self {
    self.config.overlay_timeout = timeout;
    self
  }

  /// Where layouts are persisted. Default: `FilePreferences` in the per-user
  /// application-support directory.
  pub fn preferences(mut self, preferences: Arc<dyn Preferences>) -> Self {
    self.preferences = Some(preferences);
    self
  }

  /// Build an instance on the platform of the compilation target.
  pub fn build(self) -> DeskframeResult<Deskframe> {
    self.build_with_platform(CurrentPlatform::default())
  }

  /// Build an instance on a specific platform implementation.
  pub fn build_with_platform<P: Platform>(self, platform: P) -> DeskframeResult<Deskframe<P>> {
    let preferences: Arc<dyn Preferences> = match self.preferences {
      Some(preferences) => preferences,
      None => Arc::new(FilePreferences::default_location()?),
    };
    Ok(Deskframe::create(platform, preferences, self.config, self.exclude_pid))
  }
}

impl Deskframe {
  /// Create an instance with default options.
  pub fn new() -> DeskframeResult<Self> {
    Self::builder().build()
  }

  /// Create a builder for configuring a new instance.
  pub fn builder() -> DeskframeBuilder {
    DeskframeBuilder::default()
  }
}

impl<P: Platform> Deskframe<P> {
  fn create(
    platform: P,
    preferences: Arc<dyn Preferences>,
    config: Config,
    exclude_pid: Option<ProcessId>,
  ) -> Self {
    let (mut tx, rx) = async_broadcast::broadcast(config.event_channel_capacity.max(1));
    tx.set_overflow(true); // Drop oldest messages when full

    Self {
      platform: Arc::new(platform),
      store: Arc::new(RwLock::new(LayoutStore::load(preferences))),
      prompt: Arc::new(PermissionPrompt::new()),
      config,
      exclude_pid,
      events_tx: tx,
      events_keepalive: rx.deactivate(),
    }
  }

  /// Subscribe to events from this instance.
  pub fn subscribe(&self) -> Receiver<Event> {
    self.events_keepalive.activate_cloned()
  }

  /// The platform this instance drives.
  pub fn platform(&self) -> &P {
    &self.platform
  }

  /// Active configuration.
  pub fn config(&self) -> &Config {
    &self.config
  }

  /// Whether accessibility access is granted. Without it restores move
  /// nothing.
  pub fn has_accessibility_permissions(&self) -> bool {
    self.platform.has_accessibility_permissions()
  }

  pub(crate) fn emit(&self, event: Event) {
    emit(&self.events_tx, event);
  }
}

pub(crate) fn emit(tx: &Sender<Event>, event: Event) {
  if let Err(e) = tx.try_broadcast(event) {
    if e.is_full() {
      log::error!("Event channel overflow - events are being dropped");
    }
  }
}


#[cfg(test)]
mod tests {
  use super::test_support::*;
  use super::*;
  use crate::platform::fake::FakePlatform;

  #[test]
  fn builder_defaults_exclude_current_process() {
    let builder = DeskframeBuilder::default();
    assert_eq!(builder.exclude_pid, Some(ProcessId::current()));
    assert_eq!(builder.include_all_processes().exclude_pid, None);
  }

  #[test]
  fn clones_share_events() {
    let deskframe = deskframe(FakePlatform::new());
    let clone = deskframe.clone();
    let mut events = deskframe.subscribe();
    clone.emit(Event::GridApplied { count: 2 });
    assert_eq!(drain(&mut events), vec![Event::GridApplied { count: 2 }]);
  }

  #[test]
  fn overflow_drops_oldest() {
    let preferences = Arc::new(crate::store::MemoryPreferences::new());
    let deskframe = Deskframe::builder()
      .config(Config {
        event_channel_capacity: 2,
        ..Config::default()
      })
      .preferences(preferences)
      .build_with_platform(FakePlatform::new())
      .unwrap();
    let mut events = deskframe.subscribe();
    for count in 0..3 {
      deskframe.emit(Event::GridApplied { count });
    }
    assert_eq!(
      drain(&mut events),
      vec![Event::GridApplied { count: 1 }, Event::GridApplied { count: 2 }]
    );
  }
}
