/*!
Capture and layout store operations.

The store lock is only held for in-memory work and the flush; platform calls
happen before it is taken.
*/

use super::Deskframe;
use crate::icons;
use crate::platform::Platform;
use crate::snapshot;
use crate::types::{DeskframeError, DeskframeResult, DesktopIconRecord, Event, Layout, WindowRecord};

impl<P: Platform> Deskframe<P> {
  /// Snapshot the visible windows of other processes.
  pub fn windows(&self) -> Vec<WindowRecord> {
    snapshot::capture_visible_windows(&*self.platform, self.exclude_pid, &self.prompt)
  }

  /// Split `windows` into desktop icons and real windows.
  pub fn extract_desktop_icons_and_filter(
    &self,
    windows: Vec<WindowRecord>,
  ) -> (Vec<DesktopIconRecord>, Vec<WindowRecord>) {
    icons::extract_desktop_icons_and_filter(&*self.platform, windows)
  }

  /// Currently visible desktop icons.
  pub fn desktop_icons(&self) -> Vec<DesktopIconRecord> {
    let windows = self.windows();
    self.extract_desktop_icons_and_filter(windows).0
  }

  /// Capture a layout of the current screen. Windows that are really desktop
  /// icons are never recorded as windows.
  pub fn capture_current_layout(&self, name: &str, include_desktop_icons: bool) -> Layout {
    let windows = self.windows();
    let (icons, windows) = if include_desktop_icons {
      self.extract_desktop_icons_and_filter(windows)
    } else {
      let known_names = icons::current_desktop_file_names(&*self.platform);
      let windows = windows
        .into_iter()
        .filter(|w| !icons::classify_as_icon_window(w, &known_names))
        .collect();
      (Vec::new(), windows)
    };
    log::debug!(
      "Captured '{name}': {} windows, {} icons",
      windows.len(),
      icons.len()
    );
    Layout::new(name, windows, icons, include_desktop_icons)
  }

  /// Append `layout` to the store. Returns its index.
  pub fn save_layout(&self, layout: Layout) -> DeskframeResult<usize> {
    let name = layout.name.clone();
    let index = self.store.write().save(layout)?;
    self.emit(Event::LayoutSaved { index, name });
    Ok(index)
  }

  /// Saved layouts, in save order.
  pub fn layouts(&self) -> Vec<Layout> {
    self.store.read().layouts().to_vec()
  }

  /// Saved layout at `index`.
  pub fn layout(&self, index: usize) -> Option<Layout> {
    self.store.read().get(index).cloned()
  }

  /// Index and contents of the first layout named `name`.
  pub fn find_layout(&self, name: &str) -> Option<(usize, Layout)> {
    self
      .store
      .read()
      .find(name)
      .map(|(index, layout)| (index, layout.clone()))
  }

  /// Delete the layout at `index`, returning it.
  pub fn delete_layout(&self, index: usize) -> DeskframeResult<Layout> {
    let removed = self.store.write().delete(index)?;
    self.emit(Event::LayoutDeleted {
      index,
      name: removed.name.clone(),
    });
    Ok(removed)
  }

  /// Replace the layout at `index`, keeping its position in the list.
  pub fn replace_layout(&self, index: usize, layout: Layout) -> DeskframeResult<Layout> {
    let name = layout.name.clone();
    let previous = self.store.write().replace(index, layout)?;
    self.emit(Event::LayoutReplaced { index, name });
    Ok(previous)
  }

  /// Re-capture the layout at `index` from the current screen, keeping its
  /// name and icon setting.
  pub fn update_layout(&self, index: usize) -> DeskframeResult<Layout> {
    let existing = self.layout(index).ok_or_else(|| DeskframeError::InvalidLayoutIndex {
      index,
      len: self.store.read().len(),
    })?;
    let layout = self.capture_current_layout(&existing.name, existing.include_desktop_icons);
    self.replace_layout(index, layout)
  }
}

#[cfg(test)]
mod tests {
  use super::super::test_support::{deskframe, deskframe_with, drain};
  use crate::icons::{FINDER_BUNDLE_ID, FINDER_NAME};
  use crate::platform::fake::{running_app, window_info, FakePlatform};
  use crate::store::{MemoryPreferences, Preferences, SAVED_LAYOUTS_KEY};
  use crate::types::{Bounds, Event, Layout};
  use std::sync::Arc;

  fn screen() -> FakePlatform {
    FakePlatform::new()
      .with_accessibility(false)
      .with_app(running_app("com.apple.TextEdit", 10, "TextEdit"), Default::default())
      .with_app(running_app(FINDER_BUNDLE_ID, 20, FINDER_NAME), Default::default())
      .with_windows(vec![
        window_info(1, 10, "TextEdit", "Draft", Bounds::new(0.0, 25.0, 800.0, 600.0)),
        window_info(2, 20, "Finder", "todo.txt", Bounds::new(1700.0, 40.0, 80.0, 90.0)),
        // the instance's own pid
        window_info(3, 1, "deskframe", "Settings", Bounds::new(0.0, 0.0, 400.0, 300.0)),
      ])
  }

  fn with_desktop(platform: FakePlatform, files: &[&str]) -> (FakePlatform, tempfile::TempDir) {
    let dir = tempfile::tempdir().unwrap();
    for file in files {
      std::fs::write(dir.path().join(file), "").unwrap();
    }
    (platform.with_desktop_dir(dir.path().to_path_buf()), dir)
  }

  mod capture {
    use super::*;

    #[test]
    fn excludes_own_windows_and_icon_windows() {
      let (platform, _desktop) = with_desktop(screen(), &["todo.txt"]);
      let layout = deskframe(platform).capture_current_layout("Work", false);

      let titles: Vec<&str> = layout.windows.iter().map(|w| w.title.as_str()).collect();
      assert_eq!(titles, vec!["Draft"]);
      assert_eq!(layout.windows[0].owner_identifier, "com.apple.TextEdit");
      assert!(layout.desktop_icons.is_none());
      assert!(!layout.include_desktop_icons);
    }

    #[test]
    fn includes_icons_when_requested() {
      let (platform, _desktop) = with_desktop(screen(), &["todo.txt"]);
      let layout = deskframe(platform).capture_current_layout("Desk", true);

      assert_eq!(layout.windows.len(), 1);
      let icons = layout.icons_to_restore();
      assert_eq!(icons.len(), 1);
      assert_eq!(icons[0].name, "todo.txt");
      assert_eq!(icons[0].position.x, 1700.0);
    }

    #[test]
    fn requested_icons_absent_when_none_found() {
      let layout = deskframe(screen()).capture_current_layout("Desk", true);
      assert!(layout.include_desktop_icons);
      assert!(layout.desktop_icons.is_none());
      // without known names the Finder window is kept
      assert_eq!(layout.windows.len(), 2);
    }
  }

  mod store {
    use super::*;

    #[test]
    fn save_emits_and_persists() {
      let prefs = Arc::new(MemoryPreferences::new());
      let deskframe = deskframe_with(screen(), prefs.clone());
      let mut events = deskframe.subscribe();

      let layout = deskframe.capture_current_layout("Test", false);
      let index = deskframe.save_layout(layout.clone()).unwrap();

      assert_eq!(index, 0);
      assert_eq!(deskframe.layouts(), vec![layout.clone()]);
      assert_eq!(
        drain(&mut events),
        vec![Event::LayoutSaved {
          index: 0,
          name: "Test".to_string()
        }]
      );

      let bytes = prefs.get(SAVED_LAYOUTS_KEY).unwrap().unwrap();
      let persisted: Vec<Layout> = serde_json::from_slice(&bytes).unwrap();
      assert_eq!(persisted.len(), 1);
      assert_eq!(persisted[0].name, "Test");
      assert_eq!(persisted[0].windows, layout.windows);

      let reopened = deskframe_with(FakePlatform::new(), prefs);
      assert_eq!(reopened.find_layout("Test").map(|(i, _)| i), Some(0));
    }

    #[test]
    fn delete_and_replace_emit_events() {
      let deskframe = deskframe(screen());
      for name in ["a", "b", "c"] {
        deskframe.save_layout(Layout::new(name, vec![], vec![], false)).unwrap();
      }
      let mut events = deskframe.subscribe();

      assert_eq!(deskframe.delete_layout(1).unwrap().name, "b");
      deskframe.replace_layout(0, Layout::new("a2", vec![], vec![], false)).unwrap();

      let names: Vec<String> = deskframe.layouts().into_iter().map(|l| l.name).collect();
      assert_eq!(names, vec!["a2", "c"]);
      assert_eq!(
        drain(&mut events),
        vec![
          Event::LayoutDeleted { index: 1, name: "b".to_string() },
          Event::LayoutReplaced { index: 0, name: "a2".to_string() },
        ]
      );
    }

    #[test]
    fn update_recaptures_in_place() {
      let deskframe = deskframe(screen());
      deskframe.save_layout(Layout::new("keep", vec![], vec![], false)).unwrap();

      let previous = deskframe.update_layout(0).unwrap();

      assert!(previous.windows.is_empty());
      let updated = deskframe.layout(0).unwrap();
      assert_eq!(updated.name, "keep");
      assert!(!updated.windows.is_empty());
      assert!(deskframe.update_layout(5).is_err());
    }
  }
}
