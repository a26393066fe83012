//! Strings and string lists that cross the C boundary.
//!
//! Everything handed out here is a fresh allocation owned by the caller until
//! it comes back through the matching release function. Input pointers are
//! only read for the duration of the call.

use std::ffi::{c_char, CStr, CString, NulError};
use std::ptr;

/// An owned list of NUL-terminated strings.
///
/// Released as a whole by [`super::dna_string_list_free`]; entries must never
/// be freed individually.
#[repr(C)]
#[derive(Debug)]
pub struct DnaStringList {
    pub len: usize,
    pub items: *mut *mut c_char,
}

impl DnaStringList {
    pub const fn empty() -> Self {
        Self {
            len: 0,
            items: ptr::null_mut(),
        }
    }

    /// Copy `names` into a new list. On an interior NUL nothing is allocated.
    pub(crate) fn from_strs<'a, I>(names: I) -> Result<Self, NulError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let owned = names
            .into_iter()
            .map(CString::new)
            .collect::<Result<Vec<_>, _>>()?;
        if owned.is_empty() {
            return Ok(Self::empty());
        }
        let raw: Box<[*mut c_char]> = owned.into_iter().map(CString::into_raw).collect();
        let len = raw.len();
        Ok(Self {
            len,
            items: Box::into_raw(raw) as *mut *mut c_char,
        })
    }

    /// Borrow the entries. Test and diagnostics helper.
    ///
    /// # Safety
    /// `self` must have been produced by this module and not yet released.
    pub unsafe fn to_vec(&self) -> Vec<String> {
        if self.items.is_null() {
            return Vec::new();
        }
        std::slice::from_raw_parts(self.items, self.len)
            .iter()
            .map(|item| CStr::from_ptr(*item).to_string_lossy().into_owned())
            .collect()
    }

    /// Free every entry and the array, leaving an empty list behind.
    ///
    /// # Safety
    /// `self` must have been produced by this module (or be empty).
    pub(crate) unsafe fn release(&mut self) {
        if !self.items.is_null() {
            let raw = Box::from_raw(ptr::slice_from_raw_parts_mut(self.items, self.len));
            for item in raw.iter().copied().filter(|item| !item.is_null()) {
                drop(CString::from_raw(item));
            }
        }
        *self = Self::empty();
    }
}

/// Hand a copy of `value` to the caller; null if it contains a NUL byte.
pub(crate) fn into_c_string(value: &str) -> *mut c_char {
    match CString::new(value) {
        Ok(s) => s.into_raw(),
        Err(_) => {
            tracing::debug!("String with interior NUL cannot cross the C boundary");
            ptr::null_mut()
        }
    }
}

/// Borrow caller text as UTF-8. `None` for null or invalid UTF-8.
///
/// # Safety
/// `ptr` must be null or point to a NUL-terminated string that outlives `'a`.
pub(crate) unsafe fn read_str<'a>(ptr: *const c_char) -> Option<&'a str> {
    if ptr.is_null() {
        return None;
    }
    CStr::from_ptr(ptr).to_str().ok()
}

/// Copy caller text, replacing invalid UTF-8. `None` only for null.
///
/// # Safety
/// `ptr` must be null or point to a NUL-terminated string.
pub(crate) unsafe fn read_lossy(ptr: *const c_char) -> Option<String> {
    if ptr.is_null() {
        return None;
    }
    Some(CStr::from_ptr(ptr).to_string_lossy().into_owned())
}
