/*! Window enumeration for macOS.

Uses `CGWindowListCopyWindowInfo` to enumerate on-screen windows. Filtering
(own process, layer, minimum size) happens in `snapshot.rs`, not here.
*/

#![allow(unsafe_code)]
#![allow(clippy::cast_sign_loss)]

use super::cf_utils::{
  get_cf_boolean, get_cf_f64, get_cf_number, get_cf_string, get_cf_window_bounds,
  retain_cf_dictionary,
};
use crate::platform::WindowInfo;
use crate::types::{Bounds, ProcessId, WindowId};
use objc2_core_foundation::{CFArray, CFDictionary};
use objc2_core_graphics::{kCGNullWindowID, CGWindowListCopyWindowInfo, CGWindowListOption};

/// Enumerate all on-screen windows in z-order (frontmost first).
pub(super) fn enumerate_windows() -> Vec<WindowInfo> {
  // IMPORTANT: Wrap in autorelease pool to prevent memory leaks.
  objc2::rc::autoreleasepool(|_pool| enumerate_windows_inner())
}

fn enumerate_windows_inner() -> Vec<WindowInfo> {
  let mut windows = Vec::new();

  let option = CGWindowListOption::OptionOnScreenOnly | CGWindowListOption::ExcludeDesktopElements;

  let Some(window_list_info) = CGWindowListCopyWindowInfo(option, kCGNullWindowID) else {
    log::debug!("CGWindowListCopyWindowInfo returned nothing");
    return windows;
  };

  let windows_count = CFArray::count(&window_list_info);

  for idx in 0..windows_count {
    let window_cf_dictionary_ref =
      unsafe { CFArray::value_at_index(&window_list_info, idx).cast::<CFDictionary>() };

    let Some(dict) = retain_cf_dictionary(window_cf_dictionary_ref) else {
      continue;
    };

    let Some(cg_bounds) = get_cf_window_bounds(&dict) else {
      continue;
    };

    let process_id = get_cf_number(&dict, "kCGWindowOwnerPID");
    if process_id <= 0 {
      continue;
    }

    windows.push(WindowInfo {
      id: WindowId::from(get_cf_number(&dict, "kCGWindowNumber") as u32),
      owner_pid: ProcessId::from(process_id as u32),
      owner_name: get_cf_string(&dict, "kCGWindowOwnerName"),
      title: get_cf_string(&dict, "kCGWindowName"),
      bounds: Bounds {
        x: cg_bounds.origin.x,
        y: cg_bounds.origin.y,
        w: cg_bounds.size.width,
        h: cg_bounds.size.height,
      },
      layer: get_cf_number(&dict, "kCGWindowLayer"),
      is_onscreen: get_cf_boolean(&dict, "kCGWindowIsOnscreen"),
      alpha: get_cf_f64(&dict, "kCGWindowAlpha", 1.0),
    });
  }

  windows
}
