/*! Opaque accessibility handles with safe accessor methods.

All accessibility-related unsafe code is encapsulated here.
The rest of the crate interacts with elements through `PlatformHandle`.
*/

#![allow(unsafe_code)]
#![allow(clippy::cast_sign_loss)]

use crate::platform::WindowAttribute;
use crate::types::{DeskframeError, DeskframeResult, Point, ProcessId, Size};
use objc2_application_services::{AXError, AXUIElement, AXValue as AXValueRef, AXValueType};
use objc2_core_foundation::{CFArray, CFRetained, CFString, CFType, CGPoint, CGSize};
use std::ffi::c_void;
use std::ptr::NonNull;

// Not exposed by objc2-core-foundation.
extern "C" {
  fn CFEqual(cf1: *const c_void, cf2: *const c_void) -> u8;
}

/// Opaque handle to a UI element. Clone is cheap (reference counted).
#[derive(Clone)]
pub struct ElementHandle {
  inner: CFRetained<AXUIElement>,
  /// Cached PID (extracted once at construction)
  cached_pid: u32,
}

impl std::fmt::Debug for ElementHandle {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("ElementHandle")
      .field("pid", &self.cached_pid)
      .finish_non_exhaustive()
  }
}

impl ElementHandle {
  pub(super) fn new(element: CFRetained<AXUIElement>) -> Self {
    let cached_pid = unsafe {
      let mut pid: i32 = 0;
      let result = element.pid(NonNull::new_unchecked(&raw mut pid));
      if result == AXError::Success {
        pid as u32
      } else {
        0
      }
    };

    Self {
      inner: element,
      cached_pid,
    }
  }

  /// Get non-empty string attribute by name.
  pub(super) fn get_string(&self, attr: &str) -> Option<String> {
    let value = self.get_raw_attr(&CFString::from_str(attr))?;
    let s = value.downcast_ref::<CFString>()?.to_string();
    if s.is_empty() {
      None
    } else {
      Some(s)
    }
  }

  /// Get element-array attribute (`AXChildren`, `AXWindows`, ...).
  pub(super) fn get_elements(&self, attr: &str) -> Vec<ElementHandle> {
    let Some(value) = self.get_raw_attr(&CFString::from_str(attr)) else {
      return Vec::new();
    };
    let Some(array) = value.downcast::<CFArray>().ok() else {
      return Vec::new();
    };
    // SAFETY: element-array attributes always hold AXUIElements
    let typed_array: CFRetained<CFArray<AXUIElement>> =
      unsafe { CFRetained::cast_unchecked(array) };

    let len = typed_array.len();
    let mut elements = Vec::with_capacity(len);
    for i in 0..len {
      if let Some(child) = typed_array.get(i) {
        elements.push(ElementHandle::new(child));
      }
    }
    elements
  }

  /// Get element attribute (returns another `ElementHandle`).
  pub(super) fn get_element(&self, attr: &str) -> Option<ElementHandle> {
    let value = self.get_raw_attr(&CFString::from_str(attr))?;
    let element = value.downcast::<AXUIElement>().ok()?;
    Some(ElementHandle::new(element))
  }

  pub(super) fn get_position(&self) -> Option<Point> {
    let value = self.get_raw_attr(&CFString::from_static_str("AXPosition"))?;
    let ax_value = value.downcast_ref::<AXValueRef>()?;
    unsafe {
      if ax_value.r#type() != AXValueType::CGPoint {
        return None;
      }
      let mut point = CGPoint { x: 0.0, y: 0.0 };
      if !ax_value.value(
        AXValueType::CGPoint,
        NonNull::new((&raw mut point).cast::<c_void>())?,
      ) {
        return None;
      }
      Some(Point::new(point.x, point.y))
    }
  }

  pub(super) fn attribute_settable(&self, attribute: WindowAttribute) -> bool {
    let attr = CFString::from_static_str(attribute.as_str());
    unsafe {
      let mut settable: u8 = 0;
      let result = self
        .inner
        .is_attribute_settable(&attr, NonNull::new_unchecked(&raw mut settable));
      result == AXError::Success && settable != 0
    }
  }

  pub(super) fn set_point(&self, point: Point) -> DeskframeResult<()> {
    let mut cg_point = CGPoint {
      x: point.x,
      y: point.y,
    };
    let value = unsafe {
      AXValueRef::new(
        AXValueType::CGPoint,
        NonNull::new_unchecked((&raw mut cg_point).cast::<c_void>()),
      )
    };
    self.set_ax_value(WindowAttribute::Position, value)
  }

  pub(super) fn set_extent(&self, size: Size) -> DeskframeResult<()> {
    let mut cg_size = CGSize {
      width: size.width,
      height: size.height,
    };
    let value = unsafe {
      AXValueRef::new(
        AXValueType::CGSize,
        NonNull::new_unchecked((&raw mut cg_size).cast::<c_void>()),
      )
    };
    self.set_ax_value(WindowAttribute::Size, value)
  }

  fn set_ax_value(
    &self,
    attribute: WindowAttribute,
    value: Option<CFRetained<AXValueRef>>,
  ) -> DeskframeResult<()> {
    let Some(value) = value else {
      return Err(DeskframeError::SetAttributeFailed {
        attribute: attribute.as_str(),
        reason: "could not box value".to_string(),
      });
    };
    let attr = CFString::from_static_str(attribute.as_str());
    let result = unsafe { self.inner.set_attribute_value(&attr, &value) };
    if result == AXError::Success {
      Ok(())
    } else {
      Err(DeskframeError::SetAttributeFailed {
        attribute: attribute.as_str(),
        reason: format!("{result:?}"),
      })
    }
  }

  fn get_raw_attr(&self, attr: &CFString) -> Option<CFRetained<CFType>> {
    unsafe {
      let mut value: *const CFType = std::ptr::null();
      let result = self
        .inner
        .copy_attribute_value(attr, NonNull::new(&raw mut value)?);
      if result != AXError::Success || value.is_null() {
        return None;
      }
      Some(CFRetained::from_raw(NonNull::new_unchecked(
        value.cast_mut(),
      )))
    }
  }

  pub(super) const fn process_id(&self) -> ProcessId {
    ProcessId(self.cached_pid)
  }
}

impl PartialEq for ElementHandle {
  fn eq(&self, other: &Self) -> bool {
    if self.cached_pid != other.cached_pid {
      return false;
    }
    let self_ptr = CFRetained::as_ptr(&self.inner).as_ptr().cast::<c_void>();
    let other_ptr = CFRetained::as_ptr(&other.inner).as_ptr().cast::<c_void>();
    unsafe { CFEqual(self_ptr, other_ptr) != 0 }
  }
}

impl Eq for ElementHandle {}

unsafe impl Send for ElementHandle {}
unsafe impl Sync for ElementHandle {}
