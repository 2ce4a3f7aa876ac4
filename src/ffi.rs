//! FFI interface for C++ interop
//!
//! The host hands over already-parsed payloads as one JSON request and gets
//! the extraction result back as JSON. Field-level failures are part of the
//! result; `error_ptr` is only set when the request itself is unusable.

use std::ffi::{c_char, CStr, CString};
use std::ptr;

use serde::Deserialize;
use serde_json::Value;

use crate::error::{Error, Result};
use crate::extractor::{ExtractionResult, Extractor};
use crate::mapping::{details_mapping, MappingSpec};
use crate::router::SecondarySources;

/// Extraction request from C++
#[derive(Debug, Clone, Deserialize)]
pub struct DetailsRequest {
    /// Dataset partitions of the document payload, keyed by id (`"ds:6"`)
    pub primary: Value,
    /// Trees from additional service calls, keyed by service id
    #[serde(default)]
    pub secondary: SecondarySources,
    /// Replaces the built-in details mapping when present
    #[serde(default)]
    pub mapping: Option<MappingSpec>,
}

impl DetailsRequest {
    pub fn extract(&self) -> ExtractionResult {
        let spec = self.mapping.as_ref().unwrap_or_else(|| details_mapping());
        Extractor::new(spec).extract(&self.primary, &self.secondary)
    }
}

/// Parse a JSON request, extract, and serialize the result
pub fn extract_details_json(request_json: &str) -> Result<String> {
    let request: DetailsRequest =
        serde_json::from_str(request_json).map_err(Error::InvalidRequest)?;
    serde_json::to_string(&request.extract()).map_err(Error::Serialize)
}

/// Result struct returned to C++
/// Both pointers are owned by Rust and must be freed via free_extraction_result
#[repr(C)]
pub struct ExtractionResultFFI {
    /// JSON-serialized result (null-terminated)
    pub json_ptr: *mut c_char,
    /// Error message if extraction failed (null-terminated), or null on success
    pub error_ptr: *mut c_char,
}

/// Extract app details from a JSON request.
///
/// # Arguments
/// * `request_json` - JSON-serialized DetailsRequest (null-terminated)
///
/// # Returns
/// ExtractionResultFFI with either json_ptr set (success) or error_ptr set (failure)
///
/// # Safety
/// - `request_json` must be a valid null-terminated C string
/// - Caller must free the result via `free_extraction_result`
#[no_mangle]
pub unsafe extern "C" fn extract_details_ffi(request_json: *const c_char) -> ExtractionResultFFI {
    if request_json.is_null() {
        return make_error_result("Request JSON is null");
    }

    let request_str = match CStr::from_ptr(request_json).to_str() {
        Ok(s) => s,
        Err(_) => return make_error_result("Invalid UTF-8 in request JSON"),
    };

    match extract_details_json(request_str) {
        Ok(json) => make_json_result(json),
        Err(e) => make_error_result(&e.to_string()),
    }
}

/// The built-in mapping as JSON, so a host can see which service ids it
/// has to fetch before calling `extract_details_ffi`
#[no_mangle]
pub extern "C" fn mapping_spec_ffi() -> ExtractionResultFFI {
    match serde_json::to_string(details_mapping()) {
        Ok(json) => make_json_result(json),
        Err(e) => make_error_result(&Error::Serialize(e).to_string()),
    }
}

/// Free an ExtractionResultFFI returned by this module
///
/// # Safety
/// - `result` must have been returned by `extract_details_ffi` or `mapping_spec_ffi`
/// - Must only be called once per result
#[no_mangle]
pub unsafe extern "C" fn free_extraction_result(result: ExtractionResultFFI) {
    if !result.json_ptr.is_null() {
        drop(CString::from_raw(result.json_ptr));
    }
    if !result.error_ptr.is_null() {
        drop(CString::from_raw(result.error_ptr));
    }
}

fn make_json_result(json: String) -> ExtractionResultFFI {
    match CString::new(json) {
        Ok(cstr) => ExtractionResultFFI {
            json_ptr: cstr.into_raw(),
            error_ptr: ptr::null_mut(),
        },
        Err(_) => make_error_result("Result JSON contains null bytes"),
    }
}

// Helper to create error result
fn make_error_result(msg: &str) -> ExtractionResultFFI {
    let error_cstr = CString::new(msg.replace('\0', " ")).unwrap_or_default();
    ExtractionResultFFI {
        json_ptr: ptr::null_mut(),
        error_ptr: error_cstr.into_raw(),
    }
}
