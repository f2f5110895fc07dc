pub mod record;
pub mod schema;

// Re-export handler functions for use in routing
pub use record::delete as record_delete;
pub use record::get as record_get;
pub use record::put as record_put;

pub use schema::get as schema_get;
pub use schema::post as schema_post;

use serde::Serialize;
use serde_json::Value;

use crate::error::ApiError;

pub(crate) fn to_value<T: Serialize>(data: T) -> Result<Value, ApiError> {
    serde_json::to_value(data).map_err(|e| {
        tracing::error!("JSON serialization error: {}", e);
        ApiError::internal_server_error("Failed to format response")
    })
}
