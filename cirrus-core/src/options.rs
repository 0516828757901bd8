//! # Call Options
//!
//! Per-call settings attached to every outgoing request: custom gRPC metadata (headers) and an
//! optional deadline. Paginated iterators forward the same options to each page fetch, so a
//! deadline bounds every single call rather than the whole listing.
use std::str::FromStr;
use std::time::Duration;
use tonic::{
    Request, Status,
    metadata::{
        MetadataKey, MetadataValue,
        errors::{InvalidMetadataKey, InvalidMetadataValue},
    },
};

/// Errors that can occur when applying [`CallOptions`] to a request.
///
/// They are reported to callers as `INVALID_ARGUMENT` statuses, through the same path as any
/// other RPC failure.
#[derive(thiserror::Error, Debug)]
pub enum InvalidCallOption {
    #[error("Invalid metadata (header) key '{key}': '{source}'")]
    MetadataKey {
        key: String,
        source: InvalidMetadataKey,
    },
    #[error("Invalid metadata (header) value for key '{key}': '{source}'")]
    MetadataValue {
        key: String,
        source: InvalidMetadataValue,
    },
}

impl From<InvalidCallOption> for Status {
    fn from(err: InvalidCallOption) -> Self {
        Status::invalid_argument(err.to_string())
    }
}

#[derive(Debug, Clone, Default)]
pub struct CallOptions {
    /// Custom gRPC metadata (headers) to attach to the request.
    pub headers: Vec<(String, String)>,
    /// Deadline of a single call, sent to the server as `grpc-timeout`.
    pub timeout: Option<Duration>,
}

impl CallOptions {
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((key.into(), value.into()));
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Wraps `message` in a `tonic::Request` carrying these options.
    pub fn request<T>(&self, message: T) -> Result<Request<T>, InvalidCallOption> {
        let mut request = Request::new(message);

        for (k, v) in &self.headers {
            let key =
                MetadataKey::from_str(k).map_err(|source| InvalidCallOption::MetadataKey {
                    key: k.clone(),
                    source,
                })?;
            let val = MetadataValue::from_str(v).map_err(|source| {
                InvalidCallOption::MetadataValue {
                    key: k.clone(),
                    source,
                }
            })?;
            request.metadata_mut().append(key, val);
        }

        if let Some(timeout) = self.timeout {
            request.set_timeout(timeout);
        }

        Ok(request)
    }
}
