//! FFI bindings for Synheart Workout
//!
//! This module provides C-compatible functions for calling Workout from other languages.
//! All functions use C strings (null-terminated) and return allocated memory that
//! must be freed by the caller using `workout_free_string`.

use std::cell::RefCell;
use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::ptr;
use std::slice;

use crate::adapter::SensorPackageAdapter;
use crate::pipeline::summarize_packages;

// Thread-local storage for the last error message
thread_local! {
    static LAST_ERROR: RefCell<Option<CString>> = const { RefCell::new(None) };
}

/// Set the last error message
fn set_last_error(msg: &str) {
    LAST_ERROR.with(|e| {
        *e.borrow_mut() = CString::new(msg).ok();
    });
}

/// Clear the last error message
fn clear_last_error() {
    LAST_ERROR.with(|e| {
        *e.borrow_mut() = None;
    });
}

/// Helper to convert C string to Rust string
unsafe fn cstr_to_string(ptr: *const c_char) -> Option<String> {
    if ptr.is_null() {
        return None;
    }
    CStr::from_ptr(ptr).to_str().ok().map(|s| s.to_string())
}

/// Helper to convert Rust string to C string (caller must free)
fn string_to_cstr(s: &str) -> *mut c_char {
    match CString::new(s) {
        Ok(cstr) => cstr.into_raw(),
        Err(_) => ptr::null_mut(),
    }
}

/// Summarize a JSON array of sensor packages.
///
/// Returns a JSON array of summary lines, one per package, in input order.
///
/// # Safety
/// - `json` must be a valid null-terminated C string.
/// - Returns a newly allocated string that must be freed with `workout_free_string`.
/// - Returns NULL on error; call `workout_last_error` to get the error message.
#[no_mangle]
pub unsafe extern "C" fn workout_summarize_json(json: *const c_char) -> *mut c_char {
    clear_last_error();

    let json_str = match cstr_to_string(json) {
        Some(s) => s,
        None => {
            set_last_error("Invalid JSON string pointer");
            return ptr::null_mut();
        }
    };

    let lines = SensorPackageAdapter::parse_array(&json_str)
        .and_then(|packages| summarize_packages(&packages))
        .and_then(|lines| serde_json::to_string(&lines).map_err(Into::into));

    match lines {
        Ok(result) => string_to_cstr(&result),
        Err(e) => {
            set_last_error(&e.to_string());
            ptr::null_mut()
        }
    }
}

/// Summarize a single package given as a tag and a readings buffer.
///
/// # Safety
/// - `tag` must be a valid null-terminated C string.
/// - `readings` must point to `len` contiguous doubles (may be NULL when `len` is 0).
/// - Returns a newly allocated string that must be freed with `workout_free_string`.
/// - Returns NULL on error; call `workout_last_error` to get the error message.
#[no_mangle]
pub unsafe extern "C" fn workout_summary_line(
    tag: *const c_char,
    readings: *const f64,
    len: usize,
) -> *mut c_char {
    clear_last_error();

    let tag_str = match cstr_to_string(tag) {
        Some(s) => s,
        None => {
            set_last_error("Invalid tag string pointer");
            return ptr::null_mut();
        }
    };

    let readings: &[f64] = if len == 0 {
        &[]
    } else if readings.is_null() {
        set_last_error("Null readings pointer");
        return ptr::null_mut();
    } else {
        slice::from_raw_parts(readings, len)
    };

    match SensorPackageAdapter::build(&tag_str, readings) {
        Ok(workout) => string_to_cstr(&workout.summary().message()),
        Err(e) => {
            set_last_error(&e.to_string());
            ptr::null_mut()
        }
    }
}

// ============================================================================
// Memory Management
// ============================================================================

/// Free a string returned by Workout functions.
///
/// # Safety
/// - `ptr` must be a valid pointer returned by a Workout function, or NULL.
/// - After calling this function, the pointer is invalid.
#[no_mangle]
pub unsafe extern "C" fn workout_free_string(ptr: *mut c_char) {
    if !ptr.is_null() {
        drop(CString::from_raw(ptr));
    }
}

// ============================================================================
// Error Handling
// ============================================================================

/// Get the last error message.
///
/// # Safety
/// - Returns a pointer to a thread-local error string.
/// - The returned pointer is valid until the next Workout function call on this thread.
/// - Do NOT free the returned pointer.
/// - Returns NULL if no error occurred.
#[no_mangle]
pub unsafe extern "C" fn workout_last_error() -> *const c_char {
    LAST_ERROR.with(|e| match &*e.borrow() {
        Some(cstr) => cstr.as_ptr(),
        None => ptr::null(),
    })
}

/// Get the library version.
///
/// # Safety
/// - Returns a pointer to a static string. Do NOT free.
#[no_mangle]
pub unsafe extern "C" fn workout_version() -> *const c_char {
    static VERSION: &[u8] = concat!(env!("CARGO_PKG_VERSION"), "\0").as_bytes();
    VERSION.as_ptr() as *const c_char
}
