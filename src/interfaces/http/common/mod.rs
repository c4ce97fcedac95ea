//! Shared HTTP building blocks

pub mod response;
pub mod validated_json;

pub use response::{ApiError, ApiResponse, ApiResult};
pub use validated_json::ValidatedJson;
