//! Extractors with rejections mapped to this crate's error responses.

mod enhanced_json;
mod validated_json;

pub use enhanced_json::Json;
pub use validated_json::ValidateJson;
