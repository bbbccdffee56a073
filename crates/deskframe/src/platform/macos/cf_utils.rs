/*! Core Foundation utilities for macOS.

Type-safe wrappers for reading window-server dictionaries: numbers, strings,
booleans and window bounds.
*/

#![allow(unsafe_code)]

use objc2_core_foundation::{
  CFBoolean, CFDictionary, CFNumber, CFNumberType, CFRetained, CFString, CGRect,
};
use objc2_core_graphics::CGRectMakeWithDictionaryRepresentation;
use std::ffi::c_void;

fn get_cf_dictionary_value<T>(dict: &CFDictionary, key: &str) -> Option<*const T> {
  let key = CFString::from_str(key);
  let key_ref = key.as_ref() as *const CFString;
  if unsafe { CFDictionary::contains_ptr_key(dict, key_ref.cast()) } {
    let value = unsafe { CFDictionary::value(dict, key_ref.cast()) };
    Some(value.cast::<T>())
  } else {
    None
  }
}

/// Extract an i32 number, 0 when missing.
pub(super) fn get_cf_number(dict: &CFDictionary, key: &str) -> i32 {
  unsafe {
    let mut value: i32 = 0;
    if let Some(number) = get_cf_dictionary_value::<CFNumber>(dict, key) {
      CFNumber::value(
        &*number,
        CFNumberType::IntType,
        (&raw mut value).cast::<c_void>(),
      );
    }
    value
  }
}

/// Extract an f64 number, `default` when missing.
pub(super) fn get_cf_f64(dict: &CFDictionary, key: &str, default: f64) -> f64 {
  unsafe {
    let mut value: f64 = default;
    if let Some(number) = get_cf_dictionary_value::<CFNumber>(dict, key) {
      CFNumber::value(
        &*number,
        CFNumberType::DoubleType,
        (&raw mut value).cast::<c_void>(),
      );
    }
    value
  }
}

pub(super) fn get_cf_boolean(dict: &CFDictionary, key: &str) -> bool {
  unsafe {
    match get_cf_dictionary_value::<CFBoolean>(dict, key) {
      Some(value) => CFBoolean::value(&*value),
      None => false,
    }
  }
}

/// Extract a string, empty when missing.
pub(super) fn get_cf_string(dict: &CFDictionary, key: &str) -> String {
  unsafe {
    match get_cf_dictionary_value::<CFString>(dict, key) {
      Some(value) => (*value).to_string(),
      None => String::new(),
    }
  }
}

pub(super) fn get_cf_window_bounds(dict: &CFDictionary) -> Option<CGRect> {
  let dict_rect = get_cf_dictionary_value::<CFDictionary>(dict, "kCGWindowBounds")?;
  unsafe {
    let mut cg_rect = CGRect::default();
    if !dict_rect.is_null()
      && CGRectMakeWithDictionaryRepresentation(Some(&*dict_rect), &raw mut cg_rect)
    {
      Some(cg_rect)
    } else {
      None
    }
  }
}

pub(super) fn retain_cf_dictionary(ptr: *const CFDictionary) -> Option<CFRetained<CFDictionary>> {
  if ptr.is_null() {
    None
  } else {
    Some(unsafe { CFRetained::retain(std::ptr::NonNull::from(&*ptr)) })
  }
}
