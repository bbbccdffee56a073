/*!
Configuration for deskframe.

All values have sensible defaults. Override through `DeskframeBuilder`, or
build a `Config` directly:

```ignore
use deskframe::{Config, Deskframe};
use std::time::Duration;

let deskframe = Deskframe::builder()
    .config(Config {
        settle_timeout: Duration::from_secs(5),
        ..Config::default()
    })
    .build()?;
```
*/

use std::time::Duration;

/// Deskframe configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
  /// Capacity of the event broadcast channel.
  /// Default: 64 events.
  pub event_channel_capacity: usize,

  /// Longest wait for freshly launched apps to show a window before their
  /// windows are moved.
  /// Default: 2s.
  pub settle_timeout: Duration,

  /// How often launched apps are checked while settling.
  /// Default: 100ms.
  pub poll_interval: Duration,

  /// When the "applying layout" overlay is force-dismissed if a restore never
  /// completes.
  /// Default: 20s.
  pub overlay_timeout: Duration,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      event_channel_capacity: 64,
      settle_timeout: Duration::from_secs(2),
      poll_interval: Duration::from_millis(100),
      overlay_timeout: Duration::from_secs(20),
    }
  }
}

impl Config {
  /// Create a new config with default values.
  pub fn new() -> Self {
    Self::default()
  }
}
