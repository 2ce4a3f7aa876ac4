//! App details extraction from parsed page payloads
//!
//! Turns the nested, loosely-typed arrays embedded in a store page into a
//! flat record with a stable set of fields:
//! - Path resolution that never fails on reshaped data
//! - Per-field rules (prices, histograms, screenshots, comments, ...)
//! - Fields sourced from the page payload or from separately fetched trees
//! - A declarative, introspectable mapping table
//! - FFI entry points taking and returning JSON
//!
//! ```
//! use details_parser::{extract_details, SecondarySources};
//! use serde_json::json;
//!
//! let primary = json!({"ds:3": ["23M", "2.1.0", "5.0 and up"]});
//! let result = extract_details(&primary, &SecondarySources::new());
//!
//! assert_eq!(result.get("androidVersion"), Some(&json!("5.0")));
//! assert_eq!(result.get("title"), Some(&json!(null)));
//! ```

pub mod error;
pub mod extractor;
pub mod ffi;
pub mod mapping;
pub mod markup;
pub mod path;
pub mod router;
pub mod transforms;

pub use error::{Error, Result, TransformError};
pub use extractor::*;
pub use ffi::*;
pub use mapping::*;
pub use path::{resolve, PathSegment};
pub use router::*;
pub use transforms::{is_truthy, Transform};
