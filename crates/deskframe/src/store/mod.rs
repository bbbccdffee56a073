/*!
Layout store: the ordered list of saved layouts.

Layouts are persisted as one JSON array under `SAVED_LAYOUTS_KEY`. The store
is loaded once, and every mutation is flushed immediately. If the flush fails
the in-memory change is kept and the error is returned.
*/

mod preferences;

use std::sync::Arc;

pub use preferences::{FilePreferences, MemoryPreferences, Preferences};

use crate::types::{DeskframeError, DeskframeResult, Layout};

/// Preference key holding the saved layouts.
pub const SAVED_LAYOUTS_KEY: &str = "SavedLayouts";

/// Saved layouts in save order.
pub struct LayoutStore {
  prefs: Arc<dyn Preferences>,
  layouts: Vec<Layout>,
}

impl std::fmt::Debug for LayoutStore {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("LayoutStore")
      .field("layouts", &self.layouts.len())
      .finish_non_exhaustive()
  }
}

impl LayoutStore {
  /// Load the persisted layouts. Unreadable data yields an empty store; data
  /// that fails to decode is also deleted.
  pub fn load(prefs: Arc<dyn Preferences>) -> Self {
    let layouts = match prefs.get(SAVED_LAYOUTS_KEY) {
      Ok(Some(bytes)) => match serde_json::from_slice::<Vec<Layout>>(&bytes) {
        Ok(layouts) => layouts,
        Err(e) => {
          log::warn!("Saved layouts are corrupt, resetting: {e}");
          if let Err(e) = prefs.remove(SAVED_LAYOUTS_KEY) {
            log::warn!("Failed to delete corrupt layouts: {e}");
          }
          Vec::new()
        }
      },
      Ok(None) => Vec::new(),
      Err(e) => {
        log::warn!("Failed to read saved layouts: {e}");
        Vec::new()
      }
    };
    log::debug!("Loaded {} saved layouts", layouts.len());
    Self { prefs, layouts }
  }

  /// All layouts, oldest first.
  pub fn layouts(&self) -> &[Layout] {
    &self.layouts
  }

  /// Number of saved layouts.
  pub fn len(&self) -> usize {
    self.layouts.len()
  }

  /// Whether nothing is saved.
  pub fn is_empty(&self) -> bool {
    self.layouts.is_empty()
  }

  /// Layout at `index`.
  pub fn get(&self, index: usize) -> Option<&Layout> {
    self.layouts.get(index)
  }

  /// First layout named `name`.
  pub fn find(&self, name: &str) -> Option<(usize, &Layout)> {
    self.layouts.iter().enumerate().find(|(_, l)| l.name == name)
  }

  /// Append `layout`; returns its index.
  pub fn save(&mut self, layout: Layout) -> DeskframeResult<usize> {
    self.layouts.push(layout);
    self.flush()?;
    Ok(self.layouts.len() - 1)
  }

  /// Remove and return the layout at `index`.
  pub fn delete(&mut self, index: usize) -> DeskframeResult<Layout> {
    self.check_index(index)?;
    let removed = self.layouts.remove(index);
    self.flush()?;
    Ok(removed)
  }

  /// Replace the layout at `index`, returning the previous one.
  pub fn replace(&mut self, index: usize, layout: Layout) -> DeskframeResult<Layout> {
    let len = self.layouts.len();
    let slot = self
      .layouts
      .get_mut(index)
      .ok_or(DeskframeError::InvalidLayoutIndex { index, len })?;
    let previous = std::mem::replace(slot, layout);
    self.flush()?;
    Ok(previous)
  }

  fn check_index(&self, index: usize) -> DeskframeResult<()> {
    if index < self.layouts.len() {
      Ok(())
    } else {
      Err(DeskframeError::InvalidLayoutIndex {
        index,
        len: self.layouts.len(),
      })
    }
  }

  /// Write the whole list back.
  pub fn flush(&self) -> DeskframeResult<()> {
    let bytes = serde_json::to_vec(&self.layouts)?;
    self.prefs.set(SAVED_LAYOUTS_KEY, &bytes)
  }
}
