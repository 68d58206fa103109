use std::ffi::{CStr, CString};
use std::fs;
use std::ptr;

use tempfile::TempDir;
use word_tree_core::ffi::{free_autocomplete, get_autocomplete, set_tree};
use word_tree_core::global;

fn complete(prefix: &str, n: i32) -> Option<String> {
	let prefix = CString::new(prefix).unwrap();
	let raw = unsafe { get_autocomplete(prefix.as_ptr(), n) };
	if raw.is_null() {
		return None;
	}
	let line = unsafe { CStr::from_ptr(raw) }.to_str().unwrap().to_owned();
	unsafe { free_autocomplete(raw) };
	Some(line)
}

// One test: the index is process-wide.
#[test]
fn c_interface_lifecycle() {
	assert_eq!(complete("ca", 2), None);
	assert_eq!(unsafe { set_tree(ptr::null()) }, -1);

	let dir = TempDir::new().unwrap();
	let path = dir.path().join("word_list.txt");
	fs::write(&path, "15\ncar 30\ncart 10\ncat 50\ndog 90\n").unwrap();
	let c_path = CString::new(path.to_str().unwrap()).unwrap();

	assert_eq!(unsafe { set_tree(c_path.as_ptr()) }, 0);
	assert!(global::is_initialized());

	assert_eq!(complete("ca", 2).as_deref(), Some("cart ca"));
	assert_eq!(complete("d", 5).as_deref(), Some("do"));
	assert_eq!(complete("q", 5).as_deref(), Some(""));
	assert_eq!(complete("ca", -3).as_deref(), Some(""));
	assert_eq!(unsafe { get_autocomplete(ptr::null(), 3) }, ptr::null_mut());

	// Exactly once
	assert_eq!(unsafe { set_tree(c_path.as_ptr()) }, -1);
	unsafe { free_autocomplete(ptr::null_mut()) };
}
