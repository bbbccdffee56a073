/*! Find the live window that corresponds to a saved record. */

use std::collections::BTreeMap;

use crate::platform::PlatformHandle;
use crate::types::ProcessId;

/// How a window was matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
  /// Title equal to the saved one.
  ExactTitle,
  /// Titles contain one another, ignoring case.
  TitleSubstring,
  /// The app's main window.
  MainWindow,
  /// The app's focused window.
  FocusedWindow,
  /// The app's first window.
  FirstWindow,
}

/// Pick the window of `app` that best corresponds to `title`.
///
/// Tried in order, first hit wins: exact title, case-insensitive substring in
/// either direction, the main window, the focused window, the first window.
pub fn match_window<H: PlatformHandle>(app: &H, title: &str) -> Option<(H, MatchKind)> {
  match_unclaimed_window(app, title, &[])
}

/// `match_window` over the windows of `app` not listed in `claimed`.
pub fn match_unclaimed_window<H: PlatformHandle>(
  app: &H,
  title: &str,
  claimed: &[H],
) -> Option<(H, MatchKind)> {
  let windows: Vec<H> = app
    .windows()
    .into_iter()
    .filter(|w| !claimed.contains(w))
    .collect();
  let titled: Vec<(String, &H)> = windows
    .iter()
    .filter_map(|w| Some((w.title()?, w)))
    .collect();

  if let Some((_, window)) = titled.iter().find(|(t, _)| t == title) {
    return Some(((*window).clone(), MatchKind::ExactTitle));
  }

  if !title.is_empty() {
    let wanted = title.to_lowercase();
    let substring = titled.iter().find(|(t, _)| {
      let candidate = t.to_lowercase();
      !candidate.is_empty() && (candidate.contains(&wanted) || wanted.contains(&candidate))
    });
    if let Some((_, window)) = substring {
      return Some(((*window).clone(), MatchKind::TitleSubstring));
    }
  }

  if let Some(window) = app.main_window().filter(|w| !claimed.contains(w)) {
    return Some((window, MatchKind::MainWindow));
  }
  if let Some(window) = app.focused_window().filter(|w| !claimed.contains(w)) {
    return Some((window, MatchKind::FocusedWindow));
  }
  windows.into_iter().next().map(|w| (w, MatchKind::FirstWindow))
}

/// Live windows already handed out during one pass, per process, so two
/// records never resolve to the same window.
#[derive(Debug)]
pub(crate) struct ClaimedWindows<H> {
  by_pid: BTreeMap<ProcessId, Vec<H>>,
}

impl<H: PlatformHandle> ClaimedWindows<H> {
  pub(crate) const fn new() -> Self {
    Self {
      by_pid: BTreeMap::new(),
    }
  }

  /// Match an unclaimed window of `app` and claim it.
  pub(crate) fn claim(&mut self, app: &H, title: &str) -> Option<(H, MatchKind)> {
    let claimed = self.by_pid.entry(app.pid()).or_default();
    let found = match_unclaimed_window(app, title, claimed)?;
    claimed.push(found.0.clone());
    Some(found)
  }
}
