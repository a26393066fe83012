//! C-compatible boundary over the DNA document model.
//!
//! A document is handed out as an opaque `Dna*` handle. Ownership rules:
//!
//! - every handle from `dna_create`, `dna_create_from_json` or
//!   `dna_parse_json` is released exactly once with [`dna_free`];
//! - every returned `char*` is a fresh copy released with [`dna_string_free`];
//! - every [`DnaStringList`] filled by a query is released with
//!   [`dna_string_list_free`], which frees the entries and the array together.
//!
//! Liveness is not tracked: using a handle after `dna_free` is undefined.
//! Input strings are only read during the call and never retained.

mod strings;

pub use strings::DnaStringList;

use std::ffi::c_char;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::ptr;

use crate::dna::{Dna, DnaError, DnaErrorKind, DnaField};
use strings::{into_c_string, read_lossy, read_str};

/// C ABI revision exported by this library.
pub const DNA_FFI_ABI_VERSION: u32 = 1;

/// Status codes returned by the status-reporting entry points.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DnaStatus {
    Ok = 0,
    InvalidArgument = 1,
    Malformed = 2,
    SchemaMismatch = 3,
    NotFound = 4,
    InteriorNul = 5,
    InternalError = 6,
}

impl From<&DnaError> for DnaStatus {
    fn from(err: &DnaError) -> Self {
        match err.kind() {
            DnaErrorKind::Malformed => DnaStatus::Malformed,
            DnaErrorKind::SchemaMismatch => DnaStatus::SchemaMismatch,
            DnaErrorKind::NotFound => DnaStatus::NotFound,
            DnaErrorKind::InvalidInput => DnaStatus::InvalidArgument,
            DnaErrorKind::Internal => DnaStatus::InternalError,
        }
    }
}

/// Run `f`, turning a panic into `fallback` so it never unwinds into C.
fn guard<R>(fallback: R, f: impl FnOnce() -> R) -> R {
    catch_unwind(AssertUnwindSafe(f)).unwrap_or_else(|_| {
        tracing::error!("Panic caught at the DNA C boundary");
        fallback
    })
}

/// Zero `out` and borrow it for writing. `None` if `out` is null.
///
/// Previous contents are overwritten, not released.
unsafe fn reset_list<'a>(out: *mut DnaStringList) -> Option<&'a mut DnaStringList> {
    let out = out.as_mut()?;
    *out = DnaStringList::empty();
    Some(out)
}

fn write_list(out: &mut DnaStringList, names: Result<Vec<&str>, DnaError>) -> DnaStatus {
    match names {
        Ok(names) => match DnaStringList::from_strs(names) {
            Ok(list) => {
                *out = list;
                DnaStatus::Ok
            }
            Err(_) => DnaStatus::InteriorNul,
        },
        Err(err) => {
            tracing::debug!("DNA query failed: {}", err);
            DnaStatus::from(&err)
        }
    }
}

/// Return the C ABI version supported by this library.
#[no_mangle]
pub extern "C" fn dna_ffi_abi_version() -> u32 {
    DNA_FFI_ABI_VERSION
}

/// Create a fresh document. Release with [`dna_free`].
#[no_mangle]
pub extern "C" fn dna_create() -> *mut Dna {
    guard(ptr::null_mut(), || Box::into_raw(Box::new(Dna::new())))
}

/// Parse a JSON manifest, returning null on any failure.
///
/// # Safety
/// `json` must be null or a valid NUL-terminated string.
#[no_mangle]
pub unsafe extern "C" fn dna_create_from_json(json: *const c_char) -> *mut Dna {
    let mut dna = ptr::null_mut();
    match dna_parse_json(json, &mut dna) {
        DnaStatus::Ok => dna,
        _ => ptr::null_mut(),
    }
}

/// Parse a JSON manifest into `*out_dna`, reporting why parsing failed.
///
/// `*out_dna` is null unless the status is `Ok`.
///
/// # Safety
/// `json` must be null or a valid NUL-terminated string; `out_dna` must be
/// null or valid for a pointer write.
#[no_mangle]
pub unsafe extern "C" fn dna_parse_json(json: *const c_char, out_dna: *mut *mut Dna) -> DnaStatus {
    if out_dna.is_null() {
        return DnaStatus::InvalidArgument;
    }
    *out_dna = ptr::null_mut();
    if json.is_null() {
        return DnaStatus::InvalidArgument;
    }
    guard(DnaStatus::InternalError, || {
        let Some(text) = read_str(json) else {
            tracing::warn!("Rejected DNA manifest: input is not valid UTF-8");
            return DnaStatus::Malformed;
        };
        match Dna::from_json_str(text) {
            Ok(dna) => {
                *out_dna = Box::into_raw(Box::new(dna));
                DnaStatus::Ok
            }
            Err(err) => {
                tracing::warn!("Rejected DNA manifest: {}", err);
                DnaStatus::from(&err)
            }
        }
    })
}

/// Release a document and everything it owns. Null is ignored.
///
/// # Safety
/// `dna` must be null or a handle from this library not yet released.
#[no_mangle]
pub unsafe extern "C" fn dna_free(dna: *mut Dna) {
    if dna.is_null() {
        return;
    }
    guard((), || drop(Box::from_raw(dna)));
}

/// Serialize a document to compact JSON. Release with [`dna_string_free`].
///
/// # Safety
/// `dna` must be null or a live handle.
#[no_mangle]
pub unsafe extern "C" fn dna_to_json(dna: *const Dna) -> *mut c_char {
    let Some(dna) = dna.as_ref() else {
        return ptr::null_mut();
    };
    guard(ptr::null_mut(), || match dna.to_json() {
        Ok(json) => into_c_string(&json),
        Err(err) => {
            tracing::error!("Failed to serialize DNA: {}", err);
            ptr::null_mut()
        }
    })
}

/// Release a string returned by this library. Null is ignored.
///
/// # Safety
/// `s` must be null or a string from this library not yet released.
#[no_mangle]
pub unsafe extern "C" fn dna_string_free(s: *mut c_char) {
    if s.is_null() {
        return;
    }
    guard((), || drop(std::ffi::CString::from_raw(s)));
}

/// Release a list filled by a query, entries included, and zero it.
///
/// # Safety
/// `list` must be null, zeroed, or filled by this library and not yet released.
#[no_mangle]
pub unsafe extern "C" fn dna_string_list_free(list: *mut DnaStringList) {
    if let Some(list) = list.as_mut() {
        guard((), || list.release());
    }
}

unsafe fn get_field(dna: *const Dna, field: DnaField) -> *mut c_char {
    let Some(dna) = dna.as_ref() else {
        return ptr::null_mut();
    };
    guard(ptr::null_mut(), || into_c_string(dna.field(field)))
}

unsafe fn set_field(dna: *mut Dna, field: DnaField, value: *const c_char) -> DnaStatus {
    let Some(dna) = dna.as_mut() else {
        return DnaStatus::InvalidArgument;
    };
    let Some(value) = read_lossy(value) else {
        return DnaStatus::InvalidArgument;
    };
    guard(DnaStatus::InternalError, || {
        dna.set_field(field, value);
        DnaStatus::Ok
    })
}

/// Read a scalar field by its manifest key. Null for an unknown key.
///
/// # Safety
/// `dna` must be null or a live handle; `field_name` must be null or a valid
/// NUL-terminated string.
#[no_mangle]
pub unsafe extern "C" fn dna_get_field(dna: *const Dna, field_name: *const c_char) -> *mut c_char {
    match read_str(field_name).map(str::parse::<DnaField>) {
        Some(Ok(field)) => get_field(dna, field),
        _ => ptr::null_mut(),
    }
}

/// Replace a scalar field by its manifest key.
///
/// # Safety
/// `dna` must be null or a live handle; `field_name` and `value` must be null
/// or valid NUL-terminated strings.
#[no_mangle]
pub unsafe extern "C" fn dna_set_field(
    dna: *mut Dna,
    field_name: *const c_char,
    value: *const c_char,
) -> DnaStatus {
    match read_str(field_name).map(str::parse::<DnaField>) {
        Some(Ok(field)) => set_field(dna, field, value),
        _ => DnaStatus::InvalidArgument,
    }
}

/// Generates the typed getter/setter pair for one scalar field.
macro_rules! dna_str_accessors {
    ($field:expr, $getname:ident, $setname:ident) => {
        /// Copy of the field; release with [`dna_string_free`].
        ///
        /// # Safety
        /// `dna` must be null or a live handle.
        #[no_mangle]
        pub unsafe extern "C" fn $getname(dna: *const Dna) -> *mut c_char {
            get_field(dna, $field)
        }

        /// Replace the field with a copy of `value` (invalid UTF-8 is replaced).
        ///
        /// # Safety
        /// `dna` must be null or a live handle; `value` must be null or a
        /// valid NUL-terminated string.
        #[no_mangle]
        pub unsafe extern "C" fn $setname(dna: *mut Dna, value: *const c_char) -> DnaStatus {
            set_field(dna, $field, value)
        }
    };
}

dna_str_accessors!(DnaField::Name, dna_get_name, dna_set_name);
dna_str_accessors!(DnaField::Description, dna_get_description, dna_set_description);
dna_str_accessors!(DnaField::Version, dna_get_version, dna_set_version);
dna_str_accessors!(DnaField::Uuid, dna_get_uuid, dna_set_uuid);
dna_str_accessors!(
    DnaField::DnaSpecVersion,
    dna_get_dna_spec_version,
    dna_set_dna_spec_version
);

/// Fill `out_names` with every zome name, in declared order.
///
/// # Safety
/// `dna` must be null or a live handle; `out_names` must be null or valid
/// for writes.
#[no_mangle]
pub unsafe extern "C" fn dna_get_zome_names(
    dna: *const Dna,
    out_names: *mut DnaStringList,
) -> DnaStatus {
    let Some(out) = reset_list(out_names) else {
        return DnaStatus::InvalidArgument;
    };
    let Some(dna) = dna.as_ref() else {
        return DnaStatus::InvalidArgument;
    };
    guard(DnaStatus::InternalError, || {
        write_list(out, Ok(dna.zome_names()))
    })
}

/// Fill `out_names` with the capability names of `zome_name`.
///
/// # Safety
/// As [`dna_get_zome_names`]; `zome_name` must be null or a valid
/// NUL-terminated string.
#[no_mangle]
pub unsafe extern "C" fn dna_get_capability_names(
    dna: *const Dna,
    zome_name: *const c_char,
    out_names: *mut DnaStringList,
) -> DnaStatus {
    let Some(out) = reset_list(out_names) else {
        return DnaStatus::InvalidArgument;
    };
    let (Some(dna), Some(zome_name)) = (dna.as_ref(), read_str(zome_name)) else {
        return DnaStatus::InvalidArgument;
    };
    guard(DnaStatus::InternalError, || {
        write_list(out, dna.capability_names(zome_name))
    })
}

/// Fill `out_names` with the function names of `zome_name`, in declaration order.
///
/// # Safety
/// As [`dna_get_capability_names`].
#[no_mangle]
pub unsafe extern "C" fn dna_get_function_names(
    dna: *const Dna,
    zome_name: *const c_char,
    out_names: *mut DnaStringList,
) -> DnaStatus {
    let Some(out) = reset_list(out_names) else {
        return DnaStatus::InvalidArgument;
    };
    let (Some(dna), Some(zome_name)) = (dna.as_ref(), read_str(zome_name)) else {
        return DnaStatus::InvalidArgument;
    };
    guard(DnaStatus::InternalError, || {
        write_list(out, dna.function_names(zome_name))
    })
}

/// Fill `out_names` with the input names of `function_name` in `zome_name`.
///
/// An unknown function yields `Ok` and an empty list.
///
/// # Safety
/// As [`dna_get_capability_names`]; `function_name` must be null or a valid
/// NUL-terminated string.
#[no_mangle]
pub unsafe extern "C" fn dna_get_function_parameters(
    dna: *const Dna,
    zome_name: *const c_char,
    function_name: *const c_char,
    out_names: *mut DnaStringList,
) -> DnaStatus {
    let Some(out) = reset_list(out_names) else {
        return DnaStatus::InvalidArgument;
    };
    let (Some(dna), Some(zome_name), Some(function_name)) =
        (dna.as_ref(), read_str(zome_name), read_str(function_name))
    else {
        return DnaStatus::InvalidArgument;
    };
    guard(DnaStatus::InternalError, || {
        write_list(out, dna.parameter_names(zome_name, function_name))
    })
}

/// Fill `out_names` with the functions listed by capability `capability_name`.
///
/// An unknown capability in a known zome yields `Ok` and an empty list.
///
/// # Safety
/// As [`dna_get_capability_names`]; `capability_name` must be null or a valid
/// NUL-terminated string.
#[no_mangle]
pub unsafe extern "C" fn dna_get_capability_functions(
    dna: *const Dna,
    zome_name: *const c_char,
    capability_name: *const c_char,
    out_names: *mut DnaStringList,
) -> DnaStatus {
    let Some(out) = reset_list(out_names) else {
        return DnaStatus::InvalidArgument;
    };
    let (Some(dna), Some(zome_name), Some(capability_name)) =
        (dna.as_ref(), read_str(zome_name), read_str(capability_name))
    else {
        return DnaStatus::InvalidArgument;
    };
    guard(DnaStatus::InternalError, || {
        write_list(out, dna.capability_function_names(zome_name, capability_name))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::{CStr, CString};

    fn take_string(raw: *mut c_char) -> String {
        assert!(!raw.is_null());
        let s = unsafe { CStr::from_ptr(raw) }.to_string_lossy().into_owned();
        unsafe { dna_string_free(raw) };
        s
    }

    #[test]
    fn serialize_and_deserialize() {
        let dna = dna_create();
        let dna_json_raw = unsafe { dna_to_json(dna) };
        unsafe { dna_free(dna) };

        let dna2 = unsafe { dna_create_from_json(dna_json_raw) };
        unsafe { dna_string_free(dna_json_raw) };
        assert!(!dna2.is_null());

        let version = take_string(unsafe { dna_get_dna_spec_version(dna2) });
        assert_eq!(version, "2.0");

        unsafe { dna_free(dna2) };
    }

    #[test]
    fn can_set_and_get_value() {
        let val = CString::new("test").unwrap();
        let dna = dna_create();

        assert_eq!(unsafe { dna_set_name(dna, val.as_ptr()) }, DnaStatus::Ok);
        assert_eq!(take_string(unsafe { dna_get_name(dna) }), "test");

        unsafe { dna_free(dna) };
    }

    #[test]
    fn null_arguments_are_rejected() {
        let mut list = DnaStringList::empty();
        unsafe {
            assert_eq!(
                dna_get_zome_names(ptr::null(), &mut list),
                DnaStatus::InvalidArgument
            );
            assert_eq!(
                dna_get_zome_names(ptr::null(), ptr::null_mut()),
                DnaStatus::InvalidArgument
            );
            assert!(dna_get_name(ptr::null()).is_null());
            assert!(dna_to_json(ptr::null()).is_null());
            assert_eq!(
                dna_set_name(ptr::null_mut(), ptr::null()),
                DnaStatus::InvalidArgument
            );
            dna_free(ptr::null_mut());
            dna_string_free(ptr::null_mut());
            dna_string_list_free(ptr::null_mut());
        }
    }

    #[test]
    fn status_follows_error_kind() {
        assert_eq!(
            DnaStatus::from(&DnaError::zome_not_found("z")),
            DnaStatus::NotFound
        );
        assert_eq!(
            DnaStatus::from(&DnaError::Internal("x".into())),
            DnaStatus::InternalError
        );
        assert_eq!(dna_ffi_abi_version(), DNA_FFI_ABI_VERSION);
    }
}
