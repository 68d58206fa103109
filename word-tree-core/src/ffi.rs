//! C boundary adapter.
//!
//! Converts C strings to owned Rust values, forwards to the process-wide
//! index in `global`, and hands result strings back as heap-allocated C
//! strings. Strings returned by `get_autocomplete` must be released with
//! `free_autocomplete`.

use std::ffi::{c_char, c_int, CStr, CString};
use std::ptr;

use log::error;

use crate::error::{Error, Result};
use crate::global;

/// Borrows a C string as `&str`.
///
/// # Safety
/// `ptr` must be null or point to a NUL-terminated string valid for `'a`.
unsafe fn borrow_str<'a>(ptr: *const c_char) -> Result<&'a str> {
	if ptr.is_null() {
		return Err(Error::InvalidArgument);
	}
	// SAFETY: non-null and NUL-terminated per the caller contract
	let raw = unsafe { CStr::from_ptr(ptr) };
	raw.to_str().map_err(|_| Error::InvalidArgument)
}

/// Builds the process-wide index from the vocabulary file at `filename`.
///
/// Returns 0 on success and -1 on failure. Must succeed once before any
/// call to `get_autocomplete`.
///
/// # Safety
/// `filename` must be null or a valid NUL-terminated string.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn set_tree(filename: *const c_char) -> c_int {
	// SAFETY: forwarded caller contract
	let result = unsafe { borrow_str(filename) }.and_then(|path| global::initialize(path));
	match result {
		Ok(()) => 0,
		Err(e) => {
			error!("set_tree failed: {e}");
			-1
		}
	}
}

/// Returns up to `n` completions of `prefix`, space separated, with the
/// last character of the line removed.
///
/// Returns null when the index is not initialized or `prefix` is invalid.
/// A negative `n` is treated as zero.
///
/// # Safety
/// `prefix` must be null or a valid NUL-terminated string.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn get_autocomplete(prefix: *const c_char, n: c_int) -> *mut c_char {
	let limit = usize::try_from(n).unwrap_or(0);
	// SAFETY: forwarded caller contract
	let line = unsafe { borrow_str(prefix) }.and_then(|prefix| global::query_line(prefix, limit));
	match line {
		// NUL can only come from the vocabulary file itself
		Ok(line) => match CString::new(line) {
			Ok(line) => line.into_raw(),
			Err(e) => {
				error!("get_autocomplete produced an interior NUL: {e}");
				ptr::null_mut()
			}
		},
		Err(e) => {
			error!("get_autocomplete failed: {e}");
			ptr::null_mut()
		}
	}
}

/// Releases a string returned by `get_autocomplete`. Null is ignored.
///
/// # Safety
/// `line` must be null or a pointer obtained from `get_autocomplete` that
/// has not been freed yet.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn free_autocomplete(line: *mut c_char) {
	if !line.is_null() {
		// SAFETY: allocated by CString::into_raw in get_autocomplete
		drop(unsafe { CString::from_raw(line) });
	}
}
