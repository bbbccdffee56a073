/*! Shared utilities for macOS: permissions, app elements, display bounds. */

#![allow(unsafe_code)]
#![allow(clippy::cast_possible_wrap)]

use objc2_application_services::{AXIsProcessTrusted, AXUIElement};
use objc2_core_foundation::CFRetained;
use objc2_core_graphics::{CGDisplayBounds, CGMainDisplayID};

use crate::types::{Bounds, ProcessId};

// Screen-capture TCC entry points (CoreGraphics, macOS 10.15+).
extern "C" {
  fn CGPreflightScreenCaptureAccess() -> bool;
  fn CGRequestScreenCaptureAccess() -> bool;
}

/// Create an `AXUIElement` for an application by PID.
pub(super) fn app_element(pid: ProcessId) -> CFRetained<AXUIElement> {
  unsafe { AXUIElement::new_application(pid.0 as i32) }
}

/// Check if accessibility permissions are granted (never prompts).
pub(super) fn has_accessibility_permissions() -> bool {
  unsafe { AXIsProcessTrusted() }
}

pub(super) fn has_screen_capture_permissions() -> bool {
  unsafe { CGPreflightScreenCaptureAccess() }
}

/// Fire the system prompt. The answer arrives out-of-band; the return value only
/// reflects the state at call time.
pub(super) fn request_screen_capture_permissions() {
  let granted = unsafe { CGRequestScreenCaptureAccess() };
  log::debug!("Screen capture access requested (granted now: {granted})");
}

pub(super) fn main_display_bounds() -> Bounds {
  let rect = CGDisplayBounds(CGMainDisplayID());
  Bounds {
    x: rect.origin.x,
    y: rect.origin.y,
    w: rect.size.width,
    h: rect.size.height,
  }
}
