/*!
Desktop icon locator.

Desktop icons are found by the first of three sources that yields anything:

1. Finder's preferences (`preferences`), cheap and prompt-free;
2. Finder's accessibility tree (`tree`), only when already trusted;
3. Finder-owned entries of the window snapshot (`heuristic`).

Results are sorted case-insensitively by name.
*/

mod heuristic;
mod preferences;
mod restore;
mod tree;

use std::collections::BTreeSet;
use std::path::Path;

use crate::platform::{Platform, PlatformHandle};
use crate::types::{DesktopIconRecord, WindowRecord};

pub use heuristic::classify_as_icon_window;
pub use preferences::{write_icon_positions, FinderIconPositions};
pub use restore::{restore_desktop_icons, IconRestoreReport};
pub use tree::find_icon_elements;

/// Finder's bundle identifier.
pub const FINDER_BUNDLE_ID: &str = "com.apple.finder";
/// Finder's process name.
pub const FINDER_NAME: &str = "Finder";

/// Names of the non-hidden entries in `desktop_dir`. Empty when the directory
/// cannot be read.
pub fn known_desktop_file_names(desktop_dir: &Path) -> BTreeSet<String> {
  let Ok(entries) = std::fs::read_dir(desktop_dir) else {
    log::debug!("Desktop directory {} is not readable", desktop_dir.display());
    return BTreeSet::new();
  };
  entries
    .filter_map(Result::ok)
    .filter_map(|entry| entry.file_name().into_string().ok())
    .filter(|name| !name.starts_with('.'))
    .collect()
}

/// Names of the current Desktop entries, as seen by `platform`.
pub fn current_desktop_file_names<P: Platform>(platform: &P) -> BTreeSet<String> {
  platform
    .desktop_dir()
    .map(|dir| known_desktop_file_names(&dir))
    .unwrap_or_default()
}

/// Finder's application element, when Finder is running.
pub(crate) fn finder_element<P: Platform>(platform: &P) -> Option<P::Handle> {
  let finder = platform
    .running_applications()
    .into_iter()
    .find(|app| app.bundle_id.as_deref() == Some(FINDER_BUNDLE_ID))?;
  Some(platform.app_element(finder.pid))
}

fn from_preferences<P: Platform>(
  platform: &P,
  known_names: &BTreeSet<String>,
) -> Vec<DesktopIconRecord> {
  let Some(path) = platform.finder_preferences_path() else {
    return Vec::new();
  };
  match FinderIconPositions::read(&path) {
    Ok(positions) => positions.known(known_names),
    Err(e) => {
      log::debug!("Finder preferences unavailable: {e}");
      Vec::new()
    }
  }
}

fn from_accessibility<P: Platform>(
  platform: &P,
  known_names: &BTreeSet<String>,
) -> Vec<DesktopIconRecord> {
  if !platform.has_accessibility_permissions() {
    return Vec::new();
  }
  let Some(finder) = finder_element(platform) else {
    return Vec::new();
  };

  let known = (!known_names.is_empty()).then_some(known_names);
  let all: Vec<DesktopIconRecord> = find_icon_elements(&finder, known)
    .into_iter()
    .filter_map(|(name, element)| Some(DesktopIconRecord::new(name, element.position()?)))
    .collect();

  if known_names.is_empty() {
    return all;
  }
  let known: Vec<DesktopIconRecord> = all
    .iter()
    .filter(|icon| known_names.contains(&icon.name))
    .cloned()
    .collect();
  if known.is_empty() {
    all
  } else {
    known
  }
}

fn from_windows(windows: &[WindowRecord], known_names: &BTreeSet<String>) -> Vec<DesktopIconRecord> {
  windows
    .iter()
    .filter(|w| classify_as_icon_window(w, known_names))
    .map(|w| DesktopIconRecord::new(w.title.clone(), w.frame.origin()))
    .collect()
}

/// Locate desktop icons, falling through the sources in order. `windows` is
/// the snapshot used by the last source.
pub fn locate_desktop_icons<P: Platform>(
  platform: &P,
  known_names: &BTreeSet<String>,
  windows: &[WindowRecord],
) -> Vec<DesktopIconRecord> {
  let mut icons = from_preferences(platform, known_names);
  if icons.is_empty() {
    icons = from_accessibility(platform, known_names);
  }
  if icons.is_empty() {
    icons = from_windows(windows, known_names);
  }
  icons.sort_by_cached_key(|icon| icon.name.to_lowercase());
  icons
}

/// Split a snapshot into desktop icons and real windows.
pub fn extract_desktop_icons_and_filter<P: Platform>(
  platform: &P,
  windows: Vec<WindowRecord>,
) -> (Vec<DesktopIconRecord>, Vec<WindowRecord>) {
  let known_names = current_desktop_file_names(platform);
  let icons = locate_desktop_icons(platform, &known_names, &windows);
  let filtered = windows
    .into_iter()
    .filter(|w| !classify_as_icon_window(w, &known_names))
    .collect();
  (icons, filtered)
}
