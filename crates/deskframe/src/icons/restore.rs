/*!
Put desktop icons back where a layout recorded them.

Three strategies run in order, each only for icons the previous ones could not
place:

1. accessibility: write `AXPosition` on Finder's icon elements;
2. scripting: ask Finder to set each item's `desktop position`;
3. preferences: rewrite `IconPositions` in Finder's plist and restart Finder.

Every strategy logs and swallows its own failures.
*/

use std::collections::{BTreeSet, HashMap};

use serde::Serialize;

use super::{finder_element, preferences, tree};
use crate::platform::{Platform, PlatformHandle, WindowAttribute};
use crate::types::DesktopIconRecord;

/// Which strategy placed how many icons.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IconRestoreReport {
  /// Icons moved by writing their accessibility position.
  pub via_accessibility: usize,
  /// Icons moved by a Finder script.
  pub via_script: usize,
  /// Icons written to Finder's preferences (applied after Finder restarts).
  pub via_preferences: usize,
  /// Nothing was attempted: neither accessibility nor scripting is available.
  pub skipped: bool,
}

impl IconRestoreReport {
  /// Icons placed by any strategy.
  pub fn placed(&self) -> usize {
    self.via_accessibility + self.via_script + self.via_preferences
  }
}

/// Restore `icons`, best effort.
pub fn restore_desktop_icons<P: Platform>(
  platform: &P,
  icons: &[DesktopIconRecord],
) -> IconRestoreReport {
  let mut report = IconRestoreReport::default();
  if icons.is_empty() {
    return report;
  }

  let trusted = platform.has_accessibility_permissions();
  let scripting = platform.scripting_available();
  if !trusted && !scripting {
    log::debug!("Icon restore skipped: no accessibility trust and no scripting");
    report.skipped = true;
    return report;
  }

  let mut placed = BTreeSet::new();

  if trusted {
    for name in place_with_accessibility(platform, icons) {
      placed.insert(name);
      report.via_accessibility += 1;
    }
  }

  if scripting {
    let pending: Vec<&DesktopIconRecord> = icons
      .iter()
      .filter(|icon| !placed.contains(&icon.name))
      .collect();
    for icon in pending {
      match platform.run_finder_script(&desktop_position_script(icon)) {
        Ok(()) => {
          placed.insert(icon.name.clone());
          report.via_script += 1;
        }
        Err(e) => log::debug!("Scripted move of '{}' failed: {e}", icon.name),
      }
    }
  }

  let remaining: Vec<DesktopIconRecord> = icons
    .iter()
    .filter(|icon| !placed.contains(&icon.name))
    .cloned()
    .collect();
  if !remaining.is_empty() {
    report.via_preferences = place_with_preferences(platform, &remaining);
  }

  log::debug!(
    "Restored {} of {} desktop icons ({report:?})",
    report.placed(),
    icons.len()
  );
  report
}

/// Names of the icons moved through accessibility.
fn place_with_accessibility<P: Platform>(platform: &P, icons: &[DesktopIconRecord]) -> Vec<String> {
  let Some(finder) = finder_element(platform) else {
    log::debug!("Finder is not running; skipping accessibility icon restore");
    return Vec::new();
  };
  let elements: HashMap<String, P::Handle> = tree::find_icon_elements(&finder, None)
    .into_iter()
    .collect();

  icons
    .iter()
    .filter_map(|icon| {
      let element = elements.get(&icon.name)?;
      if !element.is_settable(WindowAttribute::Position) {
        return None;
      }
      match element.set_position(icon.position) {
        Ok(()) => Some(icon.name.clone()),
        Err(e) => {
          log::debug!("Moving icon '{}' failed: {e}", icon.name);
          None
        }
      }
    })
    .collect()
}

/// Rewrite Finder's preferences and restart it. Returns how many icons were
/// written.
fn place_with_preferences<P: Platform>(platform: &P, icons: &[DesktopIconRecord]) -> usize {
  let Some(path) = platform.finder_preferences_path() else {
    return 0;
  };
  if let Err(e) = preferences::write_icon_positions(&path, icons) {
    log::warn!("Writing Finder icon positions failed: {e}");
    return 0;
  }
  if let Err(e) = platform.restart_finder() {
    log::warn!("Restarting Finder failed: {e}");
  }
  icons.len()
}

fn escape_script_string(value: &str) -> String {
  value.replace('\\', "\\\\").replace('"', "\\\"")
}

/// `tell application "Finder"` one-liner moving one desktop item.
pub(crate) fn desktop_position_script(icon: &DesktopIconRecord) -> String {
  format!(
    "tell application \"Finder\" to set desktop position of item \"{}\" of desktop to {{{:.0}, {:.0}}}",
    escape_script_string(&icon.name),
    icon.position.x,
    icon.position.y
  )
}
