//! C ABI used by the desktop front end to print amounts in words.
//!
//! Strings returned through `out` parameters are owned by Rust and must be
//! released with [`gs_string_free`].

use std::ffi::CString;
use std::os::raw::c_char;
use std::sync::OnceLock;

use crate::errors::AmountError;

/// Semantic version of the Rust core (mirrors `Cargo.toml`).
pub const CORE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Error categories surfaced across the FFI boundary.
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiErrorCategory {
    Ok = 0,
    Validation = 1,
    Internal = 5,
}

impl From<FfiErrorCategory> for i32 {
    fn from(value: FfiErrorCategory) -> Self {
        value as i32
    }
}

pub fn classify_error(err: &AmountError) -> FfiErrorCategory {
    match err {
        AmountError::Negative(_)
        | AmountError::NonFinite
        | AmountError::OutOfRange(_)
        | AmountError::Unparsable(_) => FfiErrorCategory::Validation,
    }
}

/// Returns the core semantic version as a static C string.
#[no_mangle]
pub extern "C" fn gs_core_version() -> *const c_char {
    static CORE: OnceLock<CString> = OnceLock::new();
    CORE.get_or_init(|| CString::new(CORE_VERSION).unwrap_or_default())
        .as_ptr()
}

/// Spells `value` with the default template and stores the text in `out`.
///
/// # Safety
/// `out` must be null or point to writable storage for one pointer.
#[no_mangle]
pub unsafe extern "C" fn gs_spell_amount(value: f64, out: *mut *mut c_char) -> i32 {
    if out.is_null() {
        return FfiErrorCategory::Internal.into();
    }
    *out = std::ptr::null_mut();
    let spelled = match crate::spell_f64(value) {
        Ok(spelled) => spelled,
        Err(err) => {
            tracing::warn!(error = %err, "ffi spell rejected amount");
            return classify_error(&err).into();
        }
    };
    match CString::new(spelled.into_string()) {
        Ok(text) => {
            *out = text.into_raw();
            FfiErrorCategory::Ok.into()
        }
        Err(_) => FfiErrorCategory::Internal.into(),
    }
}

/// Releases a string produced by this library.
///
/// # Safety
/// `ptr` must be null or come from [`gs_spell_amount`], and be freed once.
#[no_mangle]
pub unsafe extern "C" fn gs_string_free(ptr: *mut c_char) {
    if !ptr.is_null() {
        drop(CString::from_raw(ptr));
    }
}
