//! # JSON Rendering
//!
//! Converts generated resources to `serde_json::Value` without requiring serde derives on the
//! generated types: the message is re-read as a `prost_reflect::DynamicMessage` using the
//! descriptor set embedded at build time, which follows the canonical protobuf JSON mapping
//! (camelCase names, RFC 3339 timestamps, enum names).
use crate::api::FILE_DESCRIPTOR_SET;
use crate::sdk::Resource;
use once_cell::sync::Lazy;
use prost_reflect::{DescriptorPool, DynamicMessage};

static DESCRIPTOR_POOL: Lazy<DescriptorPool> = Lazy::new(|| {
    DescriptorPool::decode(FILE_DESCRIPTOR_SET).expect("embedded descriptor set is valid")
});

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("Message '{0}' is not part of the embedded schema")]
    UnknownMessage(String),
    #[error("Failed to decode message as '{name}': '{source}'")]
    Decode {
        name: String,
        source: prost::DecodeError,
    },
    #[error("Failed to map message to JSON: '{0}'")]
    Json(#[from] serde_json::Error),
}

/// Renders a resource as JSON.
pub fn to_json<R: Resource>(resource: &R) -> Result<serde_json::Value, RenderError> {
    let descriptor = DESCRIPTOR_POOL
        .get_message_by_name(R::MESSAGE_NAME)
        .ok_or_else(|| RenderError::UnknownMessage(R::MESSAGE_NAME.to_string()))?;

    let message =
        DynamicMessage::decode(descriptor, resource.encode_to_vec().as_slice()).map_err(
            |source| RenderError::Decode {
                name: R::MESSAGE_NAME.to_string(),
                source,
            },
        )?;

    Ok(serde_json::to_value(&message)?)
}
